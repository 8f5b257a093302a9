#![forbid(unsafe_code)]

//! Render output of a collapsible panel.
//!
//! A [`CollapseView`] is what a host paints: an activatable header that
//! exposes its expanded state to assistive technology, followed by a
//! clipped content region of a given height. Styling is left to the host.

/// Accessibility role of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Pointer- and keyboard-activatable control.
    Button,
    /// Region whose visibility a button controls.
    Region,
}

/// Orientation of the disclosure indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chevron {
    /// Panel closed.
    Down,
    /// Panel open (indicator rotated half a turn).
    Up,
}

impl Chevron {
    /// Indicator for the given open state.
    #[must_use]
    pub const fn for_open(open: bool) -> Self {
        if open { Self::Up } else { Self::Down }
    }

    /// Rotation in degrees applied to the closed glyph.
    #[must_use]
    pub const fn rotation_degrees(self) -> i16 {
        match self {
            Self::Down => 0,
            Self::Up => -180,
        }
    }
}

/// Header region.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    /// Always [`Role::Button`].
    pub role: Role,
    /// Reachable with Tab.
    pub focusable: bool,
    /// `aria-expanded`; always equals the panel's open state.
    pub expanded: bool,
    /// Disclosure indicator matching `expanded`.
    pub chevron: Chevron,
}

/// Animated content region.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentView {
    /// Always [`Role::Region`].
    pub role: Role,
    /// Visible height; content beyond it is clipped.
    pub height: f64,
    /// Natural height of the content.
    pub measured_height: f64,
    /// Open state the height is animating toward.
    pub open: bool,
}

/// Everything a host needs to paint one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct CollapseView {
    /// Anchor id for deep links.
    pub id: Option<String>,
    /// Header text; also the selection key within a group.
    pub title: String,
    /// Secondary header text.
    pub subtitle: Option<String>,
    /// Card presentation variant.
    pub card: bool,
    /// Mounted under a group coordinator.
    pub grouped: bool,
    /// Activatable header.
    pub header: HeaderView,
    /// Clipped content region.
    pub content: ContentView,
    /// Bumped whenever the viewport crosses a breakpoint; hosts re-measure
    /// when it changes.
    pub layout_epoch: u64,
}

impl CollapseView {
    /// Whether the header reports the panel as expanded.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.header.expanded
    }

    /// Whether any content is visible.
    #[must_use]
    pub fn is_content_visible(&self) -> bool {
        self.content.height > 0.0
    }
}
