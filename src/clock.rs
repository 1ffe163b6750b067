//! Fixed-rate frame pacing for the game loop.

use std::thread;
use std::time::{Duration, Instant};

/// Blocks the loop for whatever is left of each frame's time budget.
pub struct FrameLimiter {
    frame: Duration,
    frame_start: Instant,
    pub frame_count: u64,
}

impl FrameLimiter {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            frame_start: Instant::now(),
            frame_count: 0,
        }
    }

    /// Time still available in the current frame as of `now`.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.frame
            .checked_sub(now.saturating_duration_since(self.frame_start))
            .unwrap_or(Duration::ZERO)
    }

    /// Sleep out the rest of the frame, then start the next one.
    /// Returns how long the call slept.
    pub fn wait(&mut self) -> Duration {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        } else {
            log::trace!("Frame {} overran its budget", self.frame_count);
        }
        self.frame_start = Instant::now();
        self.frame_count += 1;
        remaining
    }
}
