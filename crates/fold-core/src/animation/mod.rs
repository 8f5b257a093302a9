#![forbid(unsafe_code)]

//! Time-driven animation primitives.
//!
//! Every animation here is advanced explicitly with [`Animation::tick`];
//! nothing reads a wall clock. Hosts feed frame deltas, tests feed fixed
//! steps, and both observe identical motion.

use std::time::Duration;

pub mod height;
pub mod spring;

pub use height::HeightAnimator;
pub use spring::{Spring, SpringConfig};

/// A value that evolves over time.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has finished and will not change on further
    /// ticks.
    fn is_complete(&self) -> bool;
}
