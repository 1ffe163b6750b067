//! Menu state around a run: the start menu and the character picker.
//!
//! Both menus wrap around at either end of their option list.

use crate::config::GameConfig;
use crate::game::{Entity, Obstacle};

/// Input actions for the menus (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Up,
    Down,
    Left,
    Right,
    Select, // Enter
    Back,   // Esc
    Other,
}

/// Start menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartChoice {
    NewGame,
    EndGame,
}

impl StartChoice {
    pub const ALL: [StartChoice; 2] = [StartChoice::NewGame, StartChoice::EndGame];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NewGame => "New Game",
            Self::EndGame => "End Game",
        }
    }
}

/// Start menu state, plus a decorative obstacle that keeps scrolling along
/// the floor behind the options.
#[derive(Debug, Clone)]
pub struct StartMenu {
    pub selected_index: usize,
    pub attract: Obstacle,
}

impl StartMenu {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            selected_index: 0,
            attract: Obstacle::new(config),
        }
    }

    pub fn selected(&self) -> StartChoice {
        StartChoice::ALL[self.selected_index % StartChoice::ALL.len()]
    }

    pub fn navigate_up(&mut self) {
        let len = StartChoice::ALL.len();
        self.selected_index = (self.selected_index + len - 1) % len;
    }

    pub fn navigate_down(&mut self) {
        self.selected_index = (self.selected_index + 1) % StartChoice::ALL.len();
    }

    /// Advance the attract-mode obstacle one frame. It wraps forever.
    pub fn tick(&mut self, config: &GameConfig) {
        self.attract.update(config);
    }

    /// Process a menu input. Returns the confirmed choice, if any.
    pub fn process_input(&mut self, input: MenuInput) -> Option<StartChoice> {
        match input {
            MenuInput::Up => self.navigate_up(),
            MenuInput::Down => self.navigate_down(),
            MenuInput::Select => return Some(self.selected()),
            MenuInput::Back => return Some(StartChoice::EndGame),
            MenuInput::Left | MenuInput::Right | MenuInput::Other => {}
        }
        None
    }
}

/// What the character picker wants to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Stay,
    Chosen(usize),
    Cancelled,
}

/// Character picker over `count` sprites laid out left to right.
#[derive(Debug, Clone)]
pub struct SpritePicker {
    pub selected_index: usize,
    pub count: usize,
}

impl SpritePicker {
    pub fn new(count: usize) -> Self {
        Self {
            selected_index: 0,
            count,
        }
    }

    pub fn navigate_left(&mut self) {
        if self.count > 0 {
            self.selected_index = (self.selected_index + self.count - 1) % self.count;
        }
    }

    pub fn navigate_right(&mut self) {
        if self.count > 0 {
            self.selected_index = (self.selected_index + 1) % self.count;
        }
    }

    pub fn process_input(&mut self, input: MenuInput) -> PickerOutcome {
        match input {
            MenuInput::Left => self.navigate_left(),
            MenuInput::Right => self.navigate_right(),
            MenuInput::Select if self.count > 0 => {
                return PickerOutcome::Chosen(self.selected_index)
            }
            MenuInput::Back => return PickerOutcome::Cancelled,
            _ => {}
        }
        PickerOutcome::Stay
    }
}
