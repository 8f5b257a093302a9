#![forbid(unsafe_code)]

//! Height transition for expanding and collapsing content.
//!
//! [`HeightAnimator`] eases a visible height toward a target with a
//! [`Spring`], or snaps straight to it while *immediate* mode is on. Panels
//! use immediate mode right after a deep-link activation so the page loads
//! with the panel already open instead of visibly unfolding.
//!
//! # Invariants
//!
//! 1. `height()` is never negative.
//! 2. Targets that are negative or not finite are treated as `0.0`.
//! 3. While immediate, `height() == target()` after every mutation and tick.

use std::time::Duration;

use super::Animation;
use super::spring::{Spring, SpringConfig};

/// Spring-driven height with an immediate (non-animated) override.
#[derive(Debug, Clone)]
pub struct HeightAnimator {
    spring: Spring,
    immediate: bool,
}

impl HeightAnimator {
    /// Create an animator resting at height 0.
    #[must_use]
    pub fn new(config: SpringConfig) -> Self {
        let mut spring = config.build(0.0, 0.0);
        spring.snap_to(0.0);
        Self {
            spring,
            immediate: false,
        }
    }

    /// Set the height to ease toward.
    pub fn set_target(&mut self, target: f64) {
        let target = sanitize(target);
        if self.immediate {
            self.spring.snap_to(target);
        } else {
            self.spring.set_target(target);
        }
    }

    /// Turn immediate mode on or off. Turning it on lands the height on the
    /// current target at once.
    pub fn set_immediate(&mut self, immediate: bool) {
        self.immediate = immediate;
        if immediate {
            let target = self.spring.target();
            self.spring.snap_to(target);
        }
    }

    /// Whether targets are applied without interpolation.
    #[inline]
    #[must_use]
    pub fn is_immediate(&self) -> bool {
        self.immediate
    }

    /// Advance the transition by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if self.immediate {
            let target = self.spring.target();
            self.spring.snap_to(target);
            return;
        }
        self.spring.tick(dt);
    }

    /// Current visible height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.spring.position().max(0.0)
    }

    /// Height being eased toward.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.spring.target()
    }

    /// Whether the height has reached its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.spring.is_complete()
    }
}

impl Default for HeightAnimator {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}

fn sanitize(height: f64) -> f64 {
    if height.is_finite() { height.max(0.0) } else { 0.0 }
}
