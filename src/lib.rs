//! Hurdle - a terminal jump-over-the-pipes arcade game.
//!
//! The simulation (`game`) is frame-stepped and knows nothing about the
//! terminal; `ui` draws it with ratatui and `input` maps crossterm keys onto
//! the game's own input enums.

pub mod assets;
pub mod build_info;
pub mod cli;
pub mod clock;
pub mod config;
pub mod game;
pub mod input;
pub mod menu;
pub mod ui;
