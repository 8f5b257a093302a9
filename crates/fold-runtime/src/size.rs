#![forbid(unsafe_code)]

//! Push-based content size observation.
//!
//! The host owns a [`SizeObserver`] per measured subtree and calls
//! [`report`](SizeObserver::report) whenever layout gives that subtree a new
//! natural height. Widgets [`observe`](SizeObserver::observe) it for as long
//! as they are mounted; the returned [`SizeSubscription`] releases the
//! registration when dropped, on every exit path.
//!
//! Reports are sanitized: a negative or non-finite height is recorded as
//! `0.0`. Repeating the current height notifies nobody.

use tracing::trace;

use crate::reactive::{Observable, Subscription};

/// Source of natural-height reports for one content subtree.
///
/// Cloning yields another handle to the same source.
#[derive(Debug, Clone)]
pub struct SizeObserver {
    height: Observable<f64>,
}

impl Default for SizeObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl SizeObserver {
    /// Create an observer whose content has not been measured (height 0).
    #[must_use]
    pub fn new() -> Self {
        Self {
            height: Observable::new(0.0),
        }
    }

    /// Create an observer with an initial measurement.
    #[must_use]
    pub fn with_height(height: f64) -> Self {
        Self {
            height: Observable::new(sanitize(height)),
        }
    }

    /// Latest reported height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height.get()
    }

    /// Publish a new natural height.
    pub fn report(&self, height: f64) {
        let height = sanitize(height);
        trace!(height, "content size reported");
        self.height.set(height);
    }

    /// Receive every subsequent height change.
    pub fn observe(&self, callback: impl Fn(f64) + 'static) -> SizeSubscription {
        SizeSubscription {
            _inner: self.height.subscribe(move |h| callback(*h)),
        }
    }

    /// Live observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.height.live_subscriber_count()
    }
}

/// Registration with a [`SizeObserver`]; dropping it stops notifications.
#[derive(Debug)]
#[must_use = "dropping the subscription stops size notifications"]
pub struct SizeSubscription {
    _inner: Subscription,
}

fn sanitize(height: f64) -> f64 {
    if height.is_finite() { height.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn reports_reach_observers() {
        let observer = SizeObserver::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = observer.observe(move |h| s.borrow_mut().push(h));

        observer.report(120.0);
        observer.report(120.0);
        observer.report(96.5);
        assert_eq!(*seen.borrow(), vec![120.0, 96.5]);
        assert!((observer.height() - 96.5).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_reports_sanitized() {
        let observer = SizeObserver::with_height(40.0);
        observer.report(-3.0);
        assert!(observer.height().abs() < f64::EPSILON);
        observer.report(80.0);
        observer.report(f64::INFINITY);
        assert!(observer.height().abs() < f64::EPSILON);
        observer.report(f64::NAN);
        assert!(observer.height().abs() < f64::EPSILON);
    }

    #[test]
    fn dropping_subscription_releases() {
        let observer = SizeObserver::new();
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        let sub = observer.observe(move |_| *h.borrow_mut() += 1);
        assert_eq!(observer.observer_count(), 1);

        drop(sub);
        assert_eq!(observer.observer_count(), 0);
        observer.report(10.0);
        assert_eq!(*hits.borrow(), 0);
    }
}
