#![forbid(unsafe_code)]

//! Shared selection for a set of sibling panels.
//!
//! A panel mounted with a [`SelectionCoordinator`] stops owning its open
//! state: it is open exactly when the coordinator's selection equals its
//! title. Since a selection holds one title at most, at most one sibling is
//! open at a time, which is what makes a group of panels an accordion.
//!
//! [`CollapseGroup`] is the stock coordinator. Any other type can take its
//! place as long as `on_change` is visible to every panel before their next
//! frame.

use fold_runtime::{Observable, Subscription};
use tracing::debug;

/// Contract a panel relies on when it is part of a group.
pub trait SelectionCoordinator {
    /// Title of the open panel, if any.
    fn selected(&self) -> Option<String>;

    /// Replace the selection. Must take effect synchronously.
    fn on_change(&self, selection: Option<String>);
}

/// Accordion coordinator backed by an [`Observable`].
///
/// Cloning yields another handle to the same selection, so one clone can be
/// handed to each panel.
#[derive(Debug, Clone, Default)]
pub struct CollapseGroup {
    selection: Observable<Option<String>>,
}

impl CollapseGroup {
    /// Create a group with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group with `title` selected.
    #[must_use]
    pub fn with_selected(title: impl Into<String>) -> Self {
        Self {
            selection: Observable::new(Some(title.into())),
        }
    }

    /// Select `title`, closing whichever panel was open.
    pub fn select(&self, title: impl Into<String>) {
        self.on_change(Some(title.into()));
    }

    /// Close every panel in the group.
    pub fn clear(&self) {
        self.on_change(None);
    }

    /// Whether `title` is the current selection.
    #[must_use]
    pub fn is_selected(&self, title: &str) -> bool {
        self.selection.with(|sel| sel.as_deref() == Some(title))
    }

    /// Be told about every selection change.
    pub fn subscribe(&self, callback: impl Fn(Option<&str>) + 'static) -> Subscription {
        self.selection.subscribe(move |sel| callback(sel.as_deref()))
    }

    /// Number of selection changes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.selection.version()
    }
}

impl SelectionCoordinator for CollapseGroup {
    fn selected(&self) -> Option<String> {
        self.selection.get()
    }

    fn on_change(&self, selection: Option<String>) {
        debug!(selection = ?selection, "collapse group selection");
        self.selection.set(selection);
    }
}
