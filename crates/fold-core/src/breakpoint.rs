#![forbid(unsafe_code)]

//! Viewport width tiers.
//!
//! Content reflows when the viewport crosses a width threshold, which can
//! change its natural height. [`ViewportTracker`] reports those crossings so
//! a widget knows when to re-measure; widths that stay inside a tier are
//! not interesting.
//!
//! Thresholds behave like `max-width` media queries: a width equal to a
//! threshold belongs to the narrower tier.
//!
//! ```
//! use fold_core::breakpoint::{Breakpoint, Breakpoints};
//!
//! let bps = Breakpoints::default();
//! assert_eq!(bps.classify(600), Breakpoint::Compact);
//! assert_eq!(bps.classify(601), Breakpoint::Medium);
//! assert_eq!(bps.classify(961), Breakpoint::Wide);
//! ```

use std::fmt;

/// Width tier, ordered narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    /// `width <= medium`.
    Compact,
    /// `medium < width <= wide`.
    Medium,
    /// `width > wide`.
    Wide,
}

impl Breakpoint {
    /// All tiers in ascending order.
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Compact, Breakpoint::Medium, Breakpoint::Wide];

    /// Short label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Medium => "medium",
            Self::Wide => "wide",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Threshold widths separating the tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Breakpoints {
    /// Upper bound (inclusive) of [`Breakpoint::Compact`].
    pub medium: u16,
    /// Upper bound (inclusive) of [`Breakpoint::Medium`].
    pub wide: u16,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            medium: 600,
            wide: 960,
        }
    }
}

impl Breakpoints {
    /// Create thresholds. The pair is reordered if given backwards.
    #[must_use]
    pub fn new(medium: u16, wide: u16) -> Self {
        Self {
            medium: medium.min(wide),
            wide: medium.max(wide),
        }
    }

    /// Tier for a viewport width.
    #[must_use]
    pub fn classify(&self, width: u16) -> Breakpoint {
        if width <= self.medium {
            Breakpoint::Compact
        } else if width <= self.wide {
            Breakpoint::Medium
        } else {
            Breakpoint::Wide
        }
    }
}

/// Remembers the last tier and reports when a new width leaves it.
#[derive(Debug, Clone, Default)]
pub struct ViewportTracker {
    breakpoints: Breakpoints,
    current: Option<Breakpoint>,
}

impl ViewportTracker {
    /// Create a tracker with no width observed yet.
    #[must_use]
    pub fn new(breakpoints: Breakpoints) -> Self {
        Self {
            breakpoints,
            current: None,
        }
    }

    /// Record a width. Returns `true` when it lands in a different tier
    /// than the previous observation. The first observation only records.
    pub fn observe(&mut self, width: u16) -> bool {
        let next = self.breakpoints.classify(width);
        match self.current.replace(next) {
            Some(prev) => prev != next,
            None => false,
        }
    }

    /// Tier of the most recent observation.
    #[must_use]
    pub fn current(&self) -> Option<Breakpoint> {
        self.current
    }

    /// Thresholds in use.
    #[must_use]
    pub fn breakpoints(&self) -> Breakpoints {
        self.breakpoints
    }
}
