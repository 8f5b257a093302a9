#![forbid(unsafe_code)]

//! Runtime collaborators for foldkit widgets.
//!
//! Everything here runs on the host's single UI thread. State transitions
//! happen one discrete event at a time (a report from a size observer, a
//! timer firing, a value being set), so shared state is `Rc<RefCell<..>>`
//! and there are no locks.
//!
//! # Resource discipline
//! Every subscription or scheduled callback is handed back as an RAII
//! guard ([`Subscription`], [`Timer`], [`SizeSubscription`]). Dropping the
//! guard releases the resource, which is how a widget guarantees nothing
//! fires into it after teardown.

pub mod location;
pub mod reactive;
pub mod size;
pub mod timer;

pub use location::Location;
pub use reactive::{Observable, Subscription};
pub use size::{SizeObserver, SizeSubscription};
pub use timer::{Timer, TimerId, TimerQueue};
