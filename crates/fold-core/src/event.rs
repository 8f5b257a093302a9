#![forbid(unsafe_code)]

//! Input events a panel reacts to.
//!
//! Hosts translate their native input (DOM events, terminal input, test
//! scripts) into these types and deliver them to the widget they target.
//! Hit-testing is the host's job, so mouse coordinates are informational.
//!
//! A panel header cares about three things: activation (primary click,
//! Space, Enter), viewport resizes, and focus. Keys outside that set still
//! need a representation so the host can forward them and have them
//! ignored.

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A mouse event.
    Mouse(MouseEvent),

    /// Viewport was resized.
    Resize {
        /// New viewport width.
        width: u16,
        /// New viewport height.
        height: u16,
    },

    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    /// Press, repeat, or release.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A key press.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            kind: KeyEventKind::Press,
        }
    }

    /// Same key with a different kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this key activates a button: Space or Enter, pressed or
    /// auto-repeated. Releases never activate.
    #[must_use]
    pub const fn is_activation(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
            && matches!(self.code, KeyCode::Enter | KeyCode::Char(' '))
    }
}

/// Key codes. Space is `Char(' ')`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    Up,
    Down,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// X coordinate relative to the target (0-indexed).
    pub x: u16,
    /// Y coordinate relative to the target (0-indexed).
    pub y: u16,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self { kind, x, y }
    }

    /// A primary-button press at the origin of the target.
    #[must_use]
    pub const fn click() -> Self {
        Self::new(MouseEventKind::Down(MouseButton::Left), 0, 0)
    }

    /// Whether this is a primary-button press.
    #[must_use]
    pub const fn is_click(&self) -> bool {
        matches!(self.kind, MouseEventKind::Down(MouseButton::Left))
    }
}

/// The type of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// Mouse button pressed down.
    Down(MouseButton),
    /// Mouse button released.
    Up(MouseButton),
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}
