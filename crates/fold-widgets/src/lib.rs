#![forbid(unsafe_code)]

//! Collapsible panels and accordion groups.
//!
//! - [`Collapse`] / [`MountedCollapse`]: a panel that opens and closes with
//!   a spring-animated height, deep-links open from the URL fragment, and
//!   re-measures on breakpoint crossings.
//! - [`CollapseGroup`]: a shared selection that keeps at most one panel of
//!   a group open.
//! - [`CollapseView`]: the paintable snapshot of a panel.
//! - [`CollapseConfig`]: tuning, loadable from TOML/JSON with the `config`
//!   feature.

pub mod collapse;
pub mod config;
pub mod group;
pub mod view;

pub use collapse::{Collapse, EventResult, MountContext, MountedCollapse, derive_open};
#[cfg(feature = "config")]
pub use config::ConfigError;
pub use config::CollapseConfig;
pub use group::{CollapseGroup, SelectionCoordinator};
pub use view::{Chevron, CollapseView, ContentView, HeaderView, Role};
