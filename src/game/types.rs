//! Run data structures: rectangles, the player, obstacles and the session.

use std::time::Instant;

use crate::config::GameConfig;

/// Integer axis-aligned rectangle in playfield units. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `(cx, cy)`.
    pub fn centered_at(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Move the rectangle so its bottom edge sits at `bottom`.
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// True if the interiors overlap. Rectangles that only share an edge do
    /// not collide, and empty rectangles never do.
    pub fn collides(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// The overlapping region, or `None` when the rectangles don't collide.
    pub fn clip(&self, other: &Rect) -> Option<Rect> {
        if !self.collides(other) {
            return None;
        }
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// Something that lives on the playfield and advances once per frame.
pub trait Entity {
    /// Current hitbox, which is also where the sprite is drawn.
    fn rect(&self) -> Rect;

    /// Advance one frame.
    fn update(&mut self, config: &GameConfig);
}

/// The player-controlled jumper.
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity in units/frame (negative = upward).
    pub velocity: i32,
    pub on_ground: bool,
    /// Jumps left before landing. Can dip below zero after a grounded jump
    /// with an exhausted counter; landing restores it to `max_jumps`.
    pub jumps_remaining: i32,
}

impl Player {
    /// Spawn centered at a quarter of the width and half the height. The
    /// player starts flagged as grounded and drops to the floor during the
    /// first frames.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rect: Rect::centered_at(
                config.width / 4,
                config.height / 2,
                config.player_size,
                config.player_size,
            ),
            velocity: 0,
            on_ground: true,
            jumps_remaining: config.max_jumps,
        }
    }

    /// Jump if grounded or if any air jumps remain. Every successful jump
    /// spends one from the counter, the grounded one included.
    ///
    /// Returns true if the jump happened.
    pub fn jump(&mut self, config: &GameConfig) -> bool {
        if !(self.on_ground || self.jumps_remaining > 0) {
            return false;
        }
        self.velocity = config.jump_impulse;
        self.on_ground = false;
        self.jumps_remaining -= 1;
        true
    }
}

impl Entity for Player {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, config: &GameConfig) {
        self.velocity += config.gravity;
        self.rect.y += self.velocity;

        if self.rect.bottom() > config.floor() {
            self.rect.set_bottom(config.floor());
            self.velocity = 0;
            self.on_ground = true;
            self.jumps_remaining = config.max_jumps;
        }
    }
}

/// A floor-bound block scrolling left at a constant speed.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub rect: Rect,
}

impl Obstacle {
    /// New obstacle just beyond the right edge, resting on the floor.
    pub fn new(config: &GameConfig) -> Self {
        let mut rect = Rect::new(config.width, 0, config.obstacle_size, config.obstacle_size);
        rect.set_bottom(config.floor());
        Self { rect }
    }

    /// Scroll left by one frame's worth, without wrapping.
    pub fn advance(&mut self, config: &GameConfig) {
        self.rect.x -= config.obstacle_speed;
    }

    /// True once the right edge has crossed the left boundary.
    pub fn is_off_screen(&self) -> bool {
        self.rect.right() < 0
    }
}

impl Entity for Obstacle {
    fn rect(&self) -> Rect {
        self.rect
    }

    /// Scroll left and wrap back to the right edge once fully off-screen.
    fn update(&mut self, config: &GameConfig) {
        self.advance(config);
        if self.is_off_screen() {
            self.rect.x = config.width;
            self.rect.set_bottom(config.floor());
        }
    }
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The player overlapped an obstacle by more than half its area.
    Collision,
    /// The player asked to leave.
    Quit,
}

/// Session lifecycle. `Over` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Over(EndReason),
}

/// What a finished session hands back to the menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub score: u32,
    pub elapsed_ms: u64,
    pub reason: EndReason,
}

/// One run: the player, the active obstacles and the bookkeeping around them.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    pub player: Player,
    /// Active obstacles. Order carries no meaning.
    pub obstacles: Vec<Obstacle>,
    /// Obstacles that made it off the left edge.
    pub score: u32,
    pub state: SessionState,
    pub started_at: Instant,
    /// Frames simulated so far.
    pub tick_count: u64,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        Self::started_at(config, Instant::now())
    }

    /// Create a session whose clock started at `started_at`.
    pub fn started_at(config: GameConfig, started_at: Instant) -> Self {
        Self {
            player: Player::new(&config),
            obstacles: Vec::new(),
            score: 0,
            state: SessionState::Running,
            started_at,
            tick_count: 0,
            config,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, SessionState::Over(_))
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.state {
            SessionState::Running => None,
            SessionState::Over(reason) => Some(reason),
        }
    }

    /// Milliseconds since the session started, as of `now`.
    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.started_at).as_millis() as u64
    }

    /// Release the session and report the final score and run time.
    /// A session that is still running counts as quit.
    pub fn finish(self, now: Instant) -> SessionReport {
        let report = SessionReport {
            score: self.score,
            elapsed_ms: self.elapsed_ms(now),
            reason: self.end_reason().unwrap_or(EndReason::Quit),
        };
        log::info!(
            "Run ended ({:?}): score {}, {} ms, {} frames",
            report.reason,
            report.score,
            report.elapsed_ms,
            self.tick_count
        );
        report
    }
}
