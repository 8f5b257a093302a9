//! Reactive values with change notification.

pub mod observable;

pub use observable::{Observable, Subscription};
