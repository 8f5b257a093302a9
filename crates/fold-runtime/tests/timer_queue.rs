#![forbid(unsafe_code)]

//! Ordering and cancellation properties of the virtual-clock timer queue.
//!
//! Run:
//!   cargo test -p fold-runtime --test timer_queue

use std::cell::RefCell;
use std::rc::Rc;

use fold_runtime::{SizeObserver, TimerQueue};
use proptest::prelude::*;
use web_time::Duration;

#[test]
fn timers_and_size_subscriptions_release_together() {
    let queue = TimerQueue::new();
    let size = SizeObserver::with_height(10.0);
    let log = Rc::new(RefCell::new(Vec::new()));

    let l = Rc::clone(&log);
    let timer = queue.schedule(Duration::from_millis(100), move || l.borrow_mut().push(-1.0));
    let l = Rc::clone(&log);
    let sub = size.observe(move |h| l.borrow_mut().push(h));

    size.report(20.0);
    drop(timer);
    drop(sub);
    size.report(30.0);
    assert_eq!(queue.advance(Duration::from_millis(200)), 0);
    assert_eq!(*log.borrow(), vec![20.0]);
    assert_eq!(size.observer_count(), 0);
}

proptest! {
    #[test]
    fn callbacks_fire_in_deadline_then_schedule_order(
        delays in prop::collection::vec(0_u64..50, 1..24),
        steps in prop::collection::vec(1_u64..20, 1..10),
    ) {
        let queue = TimerQueue::new();
        let fired = Rc::new(RefCell::new(Vec::new()));
        let _timers: Vec<_> = delays
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                let f = Rc::clone(&fired);
                queue.schedule(Duration::from_millis(d), move || f.borrow_mut().push(i))
            })
            .collect();

        for step in &steps {
            queue.advance(Duration::from_millis(*step));
        }
        queue.advance(Duration::from_millis(50));

        let mut expected: Vec<usize> = (0..delays.len()).collect();
        expected.sort_by_key(|&i| (delays[i], i));
        prop_assert_eq!(fired.borrow().clone(), expected);
        prop_assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn cancelled_timers_never_fire(
        cancel in prop::collection::vec(any::<bool>(), 1..16),
        split in 0_u64..30,
    ) {
        let queue = TimerQueue::new();
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut timers: Vec<_> = (0..cancel.len())
            .map(|i| {
                let f = Rc::clone(&fired);
                Some(queue.schedule(Duration::from_millis(20 + i as u64), move || {
                    f.borrow_mut().push(i)
                }))
            })
            .collect();

        queue.advance(Duration::from_millis(split));
        for (slot, &c) in timers.iter_mut().zip(&cancel) {
            if c {
                drop(slot.take());
            }
        }
        queue.advance(Duration::from_millis(100));

        for &i in fired.borrow().iter() {
            // Fired before the cancel pass, or never cancelled.
            prop_assert!(!cancel[i] || 20 + i as u64 <= split);
        }
        let survivors = cancel
            .iter()
            .enumerate()
            .filter(|&(i, &c)| !c || 20 + i as u64 <= split)
            .count();
        prop_assert_eq!(fired.borrow().len(), survivors);
        prop_assert_eq!(queue.pending(), 0);
    }
}
