//! Key mapping from crossterm events to menu and run actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::GameInput;
use crate::menu::MenuInput;

/// Ctrl-C. Raw mode swallows SIGINT, so it is handled as a key.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

/// Only presses count; repeats and releases (on terminals that report
/// them) are dropped.
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

pub fn menu_input(key: &KeyEvent) -> MenuInput {
    match key.code {
        KeyCode::Up => MenuInput::Up,
        KeyCode::Down => MenuInput::Down,
        KeyCode::Left => MenuInput::Left,
        KeyCode::Right => MenuInput::Right,
        KeyCode::Enter => MenuInput::Select,
        KeyCode::Esc | KeyCode::Char('q') => MenuInput::Back,
        _ => MenuInput::Other,
    }
}

pub fn game_input(key: &KeyEvent) -> GameInput {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => GameInput::Jump,
        KeyCode::Esc | KeyCode::Char('q') => GameInput::Quit,
        _ => GameInput::Other,
    }
}

/// One frame's worth of run input.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub actions: Vec<GameInput>,
    /// Ctrl-C was seen. Anything queued after it is dropped.
    pub interrupted: bool,
}

/// Map every event queued during a frame. Non-key events and key releases
/// are skipped; they never hide presses queued behind them.
pub fn frame_input<I>(events: I) -> FrameInput
where
    I: IntoIterator<Item = Event>,
{
    let mut input = FrameInput::default();
    for event in events {
        let Event::Key(key) = event else {
            continue;
        };
        if is_interrupt(&key) {
            input.interrupted = true;
            break;
        }
        if is_press(&key) {
            input.actions.push(game_input(&key));
        }
    }
    input
}
