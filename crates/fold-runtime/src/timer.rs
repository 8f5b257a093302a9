#![forbid(unsafe_code)]

//! Host-driven, cancelable one-shot timers.
//!
//! [`TimerQueue`] keeps a virtual clock that only moves when the host calls
//! [`advance`](TimerQueue::advance) (typically once per frame with the
//! frame delta). Due callbacks run on the calling thread, in deadline
//! order, ties broken by scheduling order. There is no background thread,
//! so a callback can never race the widget that scheduled it.
//!
//! # Cancellation
//!
//! [`schedule`](TimerQueue::schedule) returns a [`Timer`] guard. Dropping
//! the guard (or calling [`Timer::cancel`]) removes the callback if it has
//! not fired yet; its captured state is dropped right away. Cancelling a
//! timer that already fired, or whose queue is gone, does nothing.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use web_time::Duration;
//! use fold_runtime::TimerQueue;
//!
//! let queue = TimerQueue::new();
//! let fired = Rc::new(Cell::new(false));
//! let f = Rc::clone(&fired);
//! let timer = queue.schedule(Duration::from_millis(1000), move || f.set(true));
//!
//! queue.advance(Duration::from_millis(400));
//! drop(timer);
//! queue.advance(Duration::from_millis(600));
//! assert!(!fired.get());
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};
use web_time::Duration;

/// Identifier of a scheduled callback, unique within its queue.
pub type TimerId = u64;

struct Entry {
    id: TimerId,
    deadline: Duration,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct QueueInner {
    now: Duration,
    next_id: TimerId,
    entries: Vec<Entry>,
}

impl QueueInner {
    /// Remove and return the earliest entry due at or before `now`.
    fn pop_due(&mut self) -> Option<Entry> {
        let now = self.now;
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.id))
            .map(|(i, _)| i)?;
        Some(self.entries.swap_remove(idx))
    }
}

/// Single-threaded queue of one-shot callbacks on a virtual clock.
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct TimerQueue {
    inner: Rc<RefCell<QueueInner>>,
}

impl std::fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TimerQueue")
            .field("now", &inner.now)
            .field("pending", &inner.entries.len())
            .finish()
    }
}

impl TimerQueue {
    /// Create a queue whose clock reads zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Callbacks scheduled but neither fired nor cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Run `callback` once `delay` has elapsed on this queue's clock.
    pub fn schedule(&self, delay: Duration, callback: impl FnOnce() + 'static) -> Timer {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let deadline = inner.now.saturating_add(delay);
        inner.entries.push(Entry {
            id,
            deadline,
            callback: Box::new(callback),
        });
        trace!(timer_id = id, delay_ms = delay.as_millis() as u64, "timer scheduled");
        Timer {
            id,
            queue: Rc::downgrade(&self.inner),
        }
    }

    /// Move the clock forward by `dt` and run every callback that came due.
    ///
    /// Returns how many callbacks ran. Callbacks may schedule or cancel
    /// timers; newly scheduled ones run in the same call if already due.
    pub fn advance(&self, dt: Duration) -> usize {
        {
            let mut inner = self.inner.borrow_mut();
            inner.now = inner.now.saturating_add(dt);
        }

        let mut fired = 0;
        loop {
            let due = self.inner.borrow_mut().pop_due();
            let Some(entry) = due else { break };
            trace!(timer_id = entry.id, "timer fired");
            (entry.callback)();
            fired += 1;
        }
        fired
    }

    fn cancel(inner: &Rc<RefCell<QueueInner>>, id: TimerId) -> bool {
        let removed = {
            let mut inner = inner.borrow_mut();
            let idx = inner.entries.iter().position(|e| e.id == id);
            idx.map(|idx| inner.entries.swap_remove(idx))
        };
        // Captured state is dropped outside the borrow.
        match removed {
            Some(entry) => {
                debug!(timer_id = entry.id, "timer cancelled");
                drop(entry);
                true
            }
            None => false,
        }
    }
}

/// Guard for a scheduled callback. Dropping it cancels the callback.
#[must_use = "dropping the timer cancels it immediately"]
pub struct Timer {
    id: TimerId,
    queue: Weak<RefCell<QueueInner>>,
}

impl Timer {
    /// Identifier within the owning queue.
    #[must_use]
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Whether the callback is still waiting to run.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.queue
            .upgrade()
            .is_some_and(|q| q.borrow().entries.iter().any(|e| e.id == self.id))
    }

    /// Cancel the callback. Returns `true` if it was still pending.
    pub fn cancel(mut self) -> bool {
        self.cancel_in_place()
    }

    fn cancel_in_place(&mut self) -> bool {
        let Some(queue) = self.queue.upgrade() else {
            return false;
        };
        self.queue = Weak::new();
        TimerQueue::cancel(&queue, self.id)
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel_in_place();
    }
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer")
            .field("id", &self.id)
            .field("pending", &self.is_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        (hits, move || h.set(h.get() + 1))
    }

    #[test]
    fn fires_at_deadline_not_before() {
        let queue = TimerQueue::new();
        let (hits, cb) = counter();
        let timer = queue.schedule(ms(1000), cb);

        assert_eq!(queue.advance(ms(999)), 0);
        assert!(timer.is_pending());
        assert_eq!(queue.advance(ms(1)), 1);
        assert_eq!(hits.get(), 1);
        assert!(!timer.is_pending());
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn drop_cancels() {
        let queue = TimerQueue::new();
        let (hits, cb) = counter();
        let timer = queue.schedule(ms(10), cb);
        drop(timer);
        assert_eq!(queue.pending(), 0);
        assert_eq!(queue.advance(ms(100)), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn cancel_reports_whether_pending() {
        let queue = TimerQueue::new();
        let (_, cb) = counter();
        let timer = queue.schedule(ms(5), cb);
        assert!(timer.cancel());

        let (_, cb) = counter();
        let timer = queue.schedule(ms(5), cb);
        queue.advance(ms(5));
        assert!(!timer.cancel());
    }

    #[test]
    fn cancel_drops_captured_state() {
        let queue = TimerQueue::new();
        let token = Rc::new(());
        let held = Rc::clone(&token);
        let timer = queue.schedule(ms(50), move || drop(held));
        assert_eq!(Rc::strong_count(&token), 2);
        drop(timer);
        assert_eq!(Rc::strong_count(&token), 1);
    }

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let queue = TimerQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mk = |tag: &'static str| {
            let l = Rc::clone(&log);
            move || l.borrow_mut().push(tag)
        };
        let _a = queue.schedule(ms(30), mk("a"));
        let _b = queue.schedule(ms(10), mk("b"));
        let _c = queue.schedule(ms(10), mk("c"));

        assert_eq!(queue.advance(ms(50)), 3);
        assert_eq!(*log.borrow(), vec!["b", "c", "a"]);
    }

    #[test]
    fn callback_may_schedule_follow_up() {
        let queue = TimerQueue::new();
        let hits = Rc::new(Cell::new(0));
        let keep = Rc::new(RefCell::new(None));

        let q = queue.clone();
        let h = Rc::clone(&hits);
        let k = Rc::clone(&keep);
        let _first = queue.schedule(ms(10), move || {
            let h2 = Rc::clone(&h);
            *k.borrow_mut() = Some(q.schedule(ms(0), move || h2.set(h2.get() + 1)));
        });

        assert_eq!(queue.advance(ms(10)), 2);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn timer_outliving_queue_is_inert() {
        let queue = TimerQueue::new();
        let (_, cb) = counter();
        let timer = queue.schedule(ms(10), cb);
        drop(queue);
        assert!(!timer.is_pending());
        assert!(!timer.cancel());
    }

    #[test]
    fn clock_accumulates() {
        let queue = TimerQueue::new();
        queue.advance(ms(16));
        queue.advance(ms(16));
        assert_eq!(queue.now(), ms(32));
    }
}
