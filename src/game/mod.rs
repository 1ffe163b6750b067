//! The jump-over-obstacles run.
//!
//! A real-time session where the player sprite jumps (up to a few times in
//! the air) over obstacles scrolling in from the right. Gravity pulls the
//! player down each frame, shallow overlaps are forgiven, deep overlaps end
//! the run, and every obstacle that scrolls off the left edge scores a point.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
