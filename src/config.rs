//! Game tuning constants and their optional JSON override file.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Playfield dimensions in simulation units (pixels of the sprite art).
pub const PLAYFIELD_WIDTH: i32 = 800;
pub const PLAYFIELD_HEIGHT: i32 = 400;

/// Target frame rate of the game loop.
pub const FRAMES_PER_SECOND: u32 = 50;

pub const GRAVITY: i32 = 1;
pub const JUMP_IMPULSE: i32 = -18;
pub const MAX_JUMPS: i32 = 3;

/// Horizontal obstacle speed in units per frame.
pub const OBSTACLE_SPEED: i32 = 10;

/// Chance per frame that a new obstacle spawns at the right edge.
pub const SPAWN_CHANCE: f64 = 0.01;

/// Square sprite sizes the collision rectangles are built from.
pub const OBSTACLE_SIZE: i32 = 50;
pub const PLAYER_SIZE: i32 = 75;

/// How long the chosen sprite is shown before a run starts.
pub const PREVIEW_MS: u64 = 2000;

/// Largest accepted playfield side. With `MAX_JUMPS_LIMIT` chained jumps of
/// at most one playfield height each, positions stay well inside `i32`.
pub const MAX_PLAYFIELD_SIZE: i32 = 4000;
pub const MAX_JUMPS_LIMIT: i32 = 100;

/// Constants fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub gravity: i32,
    /// Velocity set by a jump (negative = upward).
    pub jump_impulse: i32,
    pub max_jumps: i32,
    pub obstacle_speed: i32,
    pub spawn_chance: f64,
    pub obstacle_size: i32,
    pub player_size: i32,
    pub preview_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            fps: FRAMES_PER_SECOND,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            max_jumps: MAX_JUMPS,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_chance: SPAWN_CHANCE,
            obstacle_size: OBSTACLE_SIZE,
            player_size: PLAYER_SIZE,
            preview_ms: PREVIEW_MS,
        }
    }
}

impl GameConfig {
    /// Load a config from a JSON file. Keys that are absent keep their defaults.
    pub fn load(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        config.validate()?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Reject values the game loop cannot run with.
    pub fn validate(&self) -> io::Result<()> {
        let problem = if self.width <= 0 || self.height <= 0 {
            Some("playfield size must be positive")
        } else if self.width > MAX_PLAYFIELD_SIZE || self.height > MAX_PLAYFIELD_SIZE {
            Some("playfield size is too large")
        } else if self.fps == 0 {
            Some("fps must be at least 1")
        } else if self.gravity <= 0 {
            Some("gravity must be positive (downward)")
        } else if self.gravity > self.height {
            Some("gravity must not exceed the playfield height")
        } else if self.obstacle_speed <= 0 {
            Some("obstacle_speed must be positive")
        } else if self.obstacle_speed > self.width {
            Some("obstacle_speed must not exceed the playfield width")
        } else if !(0.0..=1.0).contains(&self.spawn_chance) {
            Some("spawn_chance must be between 0 and 1")
        } else if self.jump_impulse >= 0 {
            Some("jump_impulse must be negative (upward)")
        } else if self.jump_impulse < -self.height {
            Some("jump_impulse must not exceed the playfield height")
        } else if !(0..=MAX_JUMPS_LIMIT).contains(&self.max_jumps) {
            Some("max_jumps must be between 0 and 100")
        } else if self.obstacle_size <= 0 || self.player_size <= 0 {
            Some("sprite sizes must be positive")
        } else if self.obstacle_size > self.height.min(self.width)
            || self.player_size > self.height.min(self.width)
        {
            Some("sprites must fit inside the playfield")
        } else {
            None
        };

        match problem {
            Some(msg) => Err(io::Error::new(io::ErrorKind::InvalidData, msg)),
            None => Ok(()),
        }
    }

    /// Time budget of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / self.fps.max(1) as u64)
    }

    /// Y coordinate of the floor (bottom edge of the playfield).
    pub fn floor(&self) -> i32 {
        self.height
    }
}
