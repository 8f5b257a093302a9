#![forbid(unsafe_code)]

//! Open-state properties of panels with and without a group.
//!
//! Proves that:
//! 1. Toggling an ungrouped panel twice restores its state
//! 2. At most one panel of a group is open after any toggle sequence
//! 3. A selection opens exactly the panel with that title
//! 4. Space/Enter behave like a click; other keys do nothing
//!
//! Run:
//!   cargo test -p fold-widgets --test accordion_properties

use std::cell::Cell;
use std::rc::Rc;

use fold_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use fold_runtime::{SizeObserver, TimerQueue};
use fold_widgets::{
    Collapse, CollapseGroup, EventResult, MountContext, MountedCollapse, SelectionCoordinator,
};
use proptest::prelude::*;

const TITLES: [&str; 5] = ["Install", "Login", "Deploy", "Env", "Logs"];

fn mount_group(group: &CollapseGroup, n: usize) -> Vec<MountedCollapse> {
    let timers = TimerQueue::new();
    TITLES[..n]
        .iter()
        .map(|title| {
            Collapse::new(*title)
                .group(group.clone())
                .mount(MountContext::new(timers.clone(), SizeObserver::with_height(50.0)))
        })
        .collect()
}

fn mount_local(title: &str) -> MountedCollapse {
    Collapse::new(title).mount(MountContext::new(TimerQueue::new(), SizeObserver::new()))
}

fn open_count(panels: &[MountedCollapse]) -> usize {
    panels.iter().filter(|p| p.is_open()).count()
}

// ============================================================================
// 1. Ungrouped involution
// ============================================================================

#[test]
fn ungrouped_siblings_are_independent() {
    let mut a = mount_local("A");
    let mut b = mount_local("B");
    a.toggle();
    b.toggle();
    assert!(a.is_open() && b.is_open());
    a.toggle();
    assert!(!a.is_open());
    assert!(b.is_open());
}

// ============================================================================
// 2/3. Grouped exclusivity
// ============================================================================

#[test]
fn selection_opens_only_matching_title() {
    let group = CollapseGroup::with_selected("Deploy");
    let panels = mount_group(&group, 5);
    for p in &panels {
        assert_eq!(p.is_open(), p.title() == "Deploy", "{}", p.title());
    }
}

#[test]
fn opening_one_closes_the_other() {
    let group = CollapseGroup::new();
    let mut panels = mount_group(&group, 3);
    panels[0].toggle();
    assert!(panels[0].is_open());
    panels[2].toggle();
    assert!(!panels[0].is_open());
    assert!(panels[2].is_open());
    assert_eq!(group.selected().as_deref(), Some("Deploy"));

    panels[2].toggle();
    assert_eq!(open_count(&panels), 0);
    assert_eq!(group.selected(), None);
}

#[test]
fn sibling_closure_retargets_height_on_next_frame() {
    let group = CollapseGroup::new();
    let mut panels = mount_group(&group, 2);
    panels[0].toggle();
    for _ in 0..100 {
        panels[0].tick(web_time::Duration::from_millis(16));
    }
    assert!((panels[0].height() - 50.0).abs() < f64::EPSILON);

    panels[1].toggle();
    assert!(panels[0].target_height().abs() < f64::EPSILON);
    for _ in 0..100 {
        panels[0].tick(web_time::Duration::from_millis(16));
    }
    assert!(panels[0].height().abs() < f64::EPSILON);
}

#[test]
fn on_toggle_fires_for_grouped_panels() {
    let group = CollapseGroup::new();
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    let mut panel = Collapse::new("Install")
        .group(group.clone())
        .on_toggle(move || h.set(h.get() + 1))
        .mount(MountContext::new(TimerQueue::new(), SizeObserver::new()));
    panel.toggle();
    panel.toggle();
    assert_eq!(hits.get(), 2);

    // A sibling forcing this panel closed is not a toggle of this panel.
    group.select("Install");
    group.select("Login");
    assert_eq!(hits.get(), 2);
}

// ============================================================================
// 4. Keyboard parity
// ============================================================================

#[test]
fn keyboard_activation_matches_click() {
    let activations = [
        Event::Mouse(MouseEvent::click()),
        Event::Key(KeyEvent::new(KeyCode::Char(' '))),
        Event::Key(KeyEvent::new(KeyCode::Enter)),
    ];
    for ev in &activations {
        let group = CollapseGroup::new();
        let mut panels = mount_group(&group, 2);
        assert!(panels[1].handle_event(ev).is_handled());
        assert!(panels[1].is_open(), "{ev:?}");
        assert!(!panels[0].is_open());
    }
}

#[test]
fn non_activation_keys_do_nothing() {
    let mut panel = mount_local("A");
    for code in [
        KeyCode::Char('a'),
        KeyCode::Escape,
        KeyCode::Tab,
        KeyCode::Up,
        KeyCode::Down,
        KeyCode::Backspace,
    ] {
        assert_eq!(
            panel.handle_event(&Event::Key(KeyEvent::new(code))),
            EventResult::Ignored
        );
    }
    let release = KeyEvent::new(KeyCode::Enter).with_kind(KeyEventKind::Release);
    assert_eq!(panel.handle_event(&Event::Key(release)), EventResult::Ignored);
    assert!(!panel.is_open());
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #[test]
    fn ungrouped_double_toggle_is_identity(pre in 0_usize..6) {
        let mut panel = mount_local("P");
        for _ in 0..pre {
            panel.toggle();
        }
        let before = panel.is_open();
        panel.toggle();
        panel.toggle();
        prop_assert_eq!(panel.is_open(), before);
    }

    #[test]
    fn at_most_one_open_after_any_toggles(ops in prop::collection::vec(0_usize..5, 0..40)) {
        let group = CollapseGroup::new();
        let mut panels = mount_group(&group, 5);
        for idx in ops {
            panels[idx].toggle();
            prop_assert!(open_count(&panels) <= 1);
            match group.selected() {
                Some(sel) => {
                    for p in &panels {
                        prop_assert_eq!(p.is_open(), p.title() == sel);
                    }
                }
                None => prop_assert_eq!(open_count(&panels), 0),
            }
        }
    }

    #[test]
    fn activation_key_equals_click(
        keys in prop::collection::vec(prop_oneof![Just(' '), Just('\n'), Just('c')], 0..20)
    ) {
        let mut by_key = mount_local("K");
        let mut by_click = mount_local("C");
        for k in keys {
            let ev = if k == '\n' {
                KeyEvent::new(KeyCode::Enter)
            } else {
                KeyEvent::new(KeyCode::Char(k))
            };
            let res = by_key.handle_event(&Event::Key(ev));
            if ev.is_activation() {
                prop_assert!(res.prevent_default());
                by_click.handle_event(&Event::Mouse(MouseEvent::click()));
            } else {
                prop_assert_eq!(res, EventResult::Ignored);
            }
            prop_assert_eq!(by_key.is_open(), by_click.is_open());
        }
    }
}
