#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Based on the classical damped spring equation:
//!
//!   F = -tension × (position - target) - friction × velocity
//!
//! # Parameters
//!
//! - **tension** (stiffness, k): restoring force strength. Higher = faster
//!   response.
//! - **friction** (damping, c): velocity drag. Higher = less oscillation.
//!   Critical damping is `c = 2√k`.
//! - **clamp**: when set, the spring stops exactly on its target the moment
//!   a step would carry it across, so it never overshoots regardless of
//!   damping.
//!
//! # Integration
//!
//! Semi-implicit Euler, subdivided into steps of at most 4 ms so that a
//! long frame cannot destabilize a stiff spring.
//!
//! # Invariants
//!
//! 1. Tension is always at least 0.1 and friction never negative.
//! 2. A spring at rest stays at rest until `set_target` wakes it.
//! 3. With clamp enabled, the spring stops on `target()` as soon as it
//!    reaches it or is beyond it in its direction of travel. Retargeting
//!    behind a moving spring therefore lands on the new target instead of
//!    coasting past it.
//! 4. `target()` always reports the last value passed to `set_target`.
//! 5. `snap_to` leaves the spring at rest on the new target.

use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta below which the spring may be considered at rest.
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Velocity below which (together with the position threshold) the spring
/// is at rest.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum tension to prevent degenerate springs.
const MIN_TENSION: f64 = 0.1;

/// Tunable spring parameters.
///
/// The default (`tension = 250`, `friction = 32`, `clamp = true`) is just
/// over critical damping and is what collapsible panels use for their
/// height transition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringConfig {
    /// Restoring force (stiffness).
    pub tension: f64,
    /// Velocity drag (damping).
    pub friction: f64,
    /// Stop on the target instead of overshooting it.
    pub clamp: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            tension: 250.0,
            friction: 32.0,
            clamp: true,
        }
    }
}

impl SpringConfig {
    /// Build a spring with these parameters.
    #[must_use]
    pub fn build(&self, initial: f64, target: f64) -> Spring {
        Spring::new(initial, target)
            .with_stiffness(self.tension)
            .with_damping(self.friction)
            .with_clamp(self.clamp)
    }
}

/// A damped harmonic oscillator producing physically-based motion.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use fold_core::animation::{Animation, Spring};
///
/// let mut spring = Spring::new(0.0, 1.0)
///     .with_stiffness(170.0)
///     .with_damping(26.0);
///
/// for _ in 0..120 {
///     spring.tick(Duration::from_millis(16));
/// }
///
/// assert!((spring.position() - 1.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    clamp: bool,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`.
    ///
    /// Default parameters: stiffness = 170.0, damping = 26.0, no clamp.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            stiffness: 170.0,
            damping: 26.0,
            clamp: false,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: false,
        }
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_TENSION);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Enable or disable overshoot clamping (builder pattern).
    #[must_use]
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Stiffness parameter.
    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping parameter.
    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Whether overshoot clamping is enabled.
    #[inline]
    #[must_use]
    pub fn is_clamped(&self) -> bool {
        self.clamp
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Change the target. Wakes the spring unless the change is within the
    /// rest threshold, in which case a resting spring moves onto it
    /// directly.
    pub fn set_target(&mut self, target: f64) {
        let moved = (self.target - target).abs() > self.rest_threshold;
        self.target = target;
        if moved {
            self.at_rest = false;
        } else if self.at_rest {
            self.position = target;
        }
    }

    /// Jump straight to `target` with zero velocity, at rest.
    pub fn snap_to(&mut self, target: f64) {
        self.target = target;
        self.position = target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Perform a single integration step of `dt` seconds.
    ///
    /// Returns `true` when clamping stopped the spring on its target.
    fn step(&mut self, dt: f64) -> bool {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;

        if !self.clamp {
            return false;
        }
        // Reached, or beyond the target and still moving away from it.
        let offset = self.position - self.target;
        let passed = offset == 0.0
            || (self.velocity != 0.0 && offset.signum() == self.velocity.signum());
        if passed {
            self.snap_to(self.target);
        }
        passed
    }

    /// Advance the spring by `dt`, subdividing if necessary for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let total_secs = dt.as_secs_f64();
        if total_secs <= 0.0 {
            return;
        }

        let mut remaining = total_secs;
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            if self.step(step_dt) {
                return;
            }
            remaining -= step_dt;
        }

        let pos_delta = (self.position - self.target).abs();
        if pos_delta < self.rest_threshold && self.velocity.abs() < self.velocity_threshold {
            self.snap_to(self.target);
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }
}
