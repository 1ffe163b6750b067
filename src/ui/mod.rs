//! Terminal rendering for the menus and the run.

pub mod canvas;
pub mod game_common;
pub mod game_scene;
pub mod menu_scenes;

pub use game_scene::{render_game_scene, SceneSprites};
pub use menu_scenes::{
    render_game_over, render_sprite_picker, render_sprite_preview, render_start_menu,
};
