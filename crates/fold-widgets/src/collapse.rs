#![forbid(unsafe_code)]

//! Collapsible panel with optional accordion coordination.
//!
//! A [`Collapse`] describes a panel: its title, optional subtitle and
//! anchor id, callbacks, and animation tuning. [`Collapse::mount`] turns it
//! into a live [`MountedCollapse`] bound to the host's collaborators:
//!
//! - a [`SizeObserver`] reporting the content's natural height,
//! - a [`TimerQueue`] for the deep-link immediate window,
//! - the page [`Location`], read once for deep-link activation.
//!
//! # Open state
//!
//! Open state is derived, never stored twice. Without a coordinator it is
//! the panel's local flag. With one, it is `selection == title`, except
//! that an empty selection defers to the local flag. See [`derive_open`].
//!
//! # Lifecycle
//!
//! ```text
//!            toggle / selection == title
//!   Closed ─────────────────────────────▶ Open
//!      ▲                                   │
//!      └───────────────────────────────────┘
//!            toggle / selection != title
//! ```
//!
//! Mounting starts Closed unless the location fragment equals the panel id,
//! in which case it starts Open and snaps (no animation) for the immediate
//! window. The window's timer and the size subscription are owned by the
//! mounted panel and released when it is dropped.
//!
//! # Example
//!
//! ```
//! use fold_runtime::{Location, SizeObserver, TimerQueue};
//! use fold_widgets::{Collapse, CollapseGroup, MountContext};
//! use web_time::Duration;
//!
//! let timers = TimerQueue::new();
//! let group = CollapseGroup::new();
//! let install = SizeObserver::with_height(120.0);
//! let login = SizeObserver::with_height(80.0);
//!
//! let mut a = Collapse::new("Install").group(group.clone())
//!     .mount(MountContext::new(timers.clone(), install));
//! let b = Collapse::new("Login").id("login").group(group.clone())
//!     .mount(MountContext::new(timers.clone(), login).with_location(Location::parse("/docs#login")));
//!
//! assert!(b.is_open());
//! a.toggle();
//! assert!(a.is_open());
//! assert!(!b.is_open());
//!
//! a.tick(Duration::from_millis(16));
//! assert!(a.height() > 0.0);
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use fold_core::animation::{HeightAnimator, SpringConfig};
use fold_core::breakpoint::{Breakpoint, Breakpoints, ViewportTracker};
use fold_core::event::Event;
use fold_runtime::{Location, SizeObserver, SizeSubscription, Timer, TimerQueue};
use tracing::{debug, trace};
use web_time::Duration;

use crate::config::{CollapseConfig, DEFAULT_IMMEDIATE_WINDOW_MS};
use crate::group::SelectionCoordinator;
use crate::view::{Chevron, CollapseView, ContentView, HeaderView, Role};

/// Open state of a panel titled `title`.
///
/// - no coordinator, or a coordinator with nothing selected: `local_open`
/// - otherwise: whether the selection is `title`
#[must_use]
pub fn derive_open(
    coordinator: Option<&dyn SelectionCoordinator>,
    local_open: bool,
    title: &str,
) -> bool {
    match coordinator.and_then(|c| c.selected()) {
        Some(selected) => selected == title,
        None => local_open,
    }
}

/// Outcome of [`MountedCollapse::handle_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event not meant for this panel.
    Ignored,
    /// The panel toggled.
    Toggled {
        /// The host should suppress the event's default action (keyboard
        /// activation, so Space does not scroll the page).
        prevent_default: bool,
    },
    /// The viewport crossed a breakpoint; content must be re-measured.
    Relayout,
}

impl EventResult {
    /// Whether the panel reacted to the event.
    #[must_use]
    pub const fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Whether the host should suppress the event's default action.
    #[must_use]
    pub const fn prevent_default(self) -> bool {
        matches!(
            self,
            Self::Toggled {
                prevent_default: true
            }
        )
    }
}

/// Panel description, built before mounting.
#[derive(Clone)]
pub struct Collapse {
    title: String,
    subtitle: Option<String>,
    id: Option<String>,
    card: bool,
    on_toggle: Option<Rc<dyn Fn()>>,
    on_open_change: Option<Rc<dyn Fn(bool)>>,
    group: Option<Rc<dyn SelectionCoordinator>>,
    spring: SpringConfig,
    immediate_window: Duration,
    breakpoints: Breakpoints,
}

impl fmt::Debug for Collapse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collapse")
            .field("title", &self.title)
            .field("subtitle", &self.subtitle)
            .field("id", &self.id)
            .field("card", &self.card)
            .field("grouped", &self.group.is_some())
            .field("spring", &self.spring)
            .field("immediate_window", &self.immediate_window)
            .finish_non_exhaustive()
    }
}

impl Collapse {
    /// Describe a panel with the given title.
    ///
    /// Under a coordinator the title is the selection key, so it must be
    /// unique among the group's panels.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            id: None,
            card: false,
            on_toggle: None,
            on_open_change: None,
            group: None,
            spring: SpringConfig::default(),
            immediate_window: Duration::from_millis(DEFAULT_IMMEDIATE_WINDOW_MS),
            breakpoints: Breakpoints::default(),
        }
    }

    /// Secondary text under the title.
    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Anchor id; a page loaded with `#id` opens this panel.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Card presentation variant. No behavioral effect.
    #[must_use]
    pub fn card(mut self, card: bool) -> Self {
        self.card = card;
        self
    }

    /// Called after every user-initiated toggle, in both local and
    /// coordinated mode.
    #[must_use]
    pub fn on_toggle(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_toggle = Some(Rc::new(callback));
        self
    }

    /// Called with the new state whenever the derived open state changes,
    /// including closures forced by a sibling opening.
    #[must_use]
    pub fn on_open_change(mut self, callback: impl Fn(bool) + 'static) -> Self {
        self.on_open_change = Some(Rc::new(callback));
        self
    }

    /// Join an accordion.
    #[must_use]
    pub fn group(mut self, coordinator: impl SelectionCoordinator + 'static) -> Self {
        self.group = Some(Rc::new(coordinator));
        self
    }

    /// Join an accordion through a shared coordinator handle.
    #[must_use]
    pub fn shared_group(mut self, coordinator: Rc<dyn SelectionCoordinator>) -> Self {
        self.group = Some(coordinator);
        self
    }

    /// Height transition profile.
    #[must_use]
    pub fn spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    /// How long a deep-linked panel snaps instead of animating.
    #[must_use]
    pub fn immediate_window(mut self, window: Duration) -> Self {
        self.immediate_window = window;
        self
    }

    /// Viewport widths at which content is re-measured.
    #[must_use]
    pub fn breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Apply spring, immediate window, and breakpoints from a config.
    #[must_use]
    pub fn config(self, config: &CollapseConfig) -> Self {
        self.spring(config.spring)
            .immediate_window(config.immediate_window())
            .breakpoints(config.breakpoints)
    }

    /// Panel title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Bind to host collaborators and run deep-link activation.
    #[must_use]
    pub fn mount(self, cx: MountContext) -> MountedCollapse {
        let measured = Rc::new(Cell::new(cx.size.height()));
        let sink = Rc::clone(&measured);
        let size_subscription = cx.size.observe(move |height| sink.set(height));

        let mut viewport = ViewportTracker::new(self.breakpoints);
        if let Some(width) = cx.viewport_width {
            viewport.observe(width);
        }

        let animator = HeightAnimator::new(self.spring);
        let mut panel = MountedCollapse {
            props: self,
            local_open: false,
            measured,
            animator,
            immediate: Rc::new(Cell::new(false)),
            immediate_timer: None,
            viewport,
            layout_epoch: 0,
            last_open: false,
            _size_subscription: size_subscription,
        };

        let deep_linked = panel
            .props
            .id
            .as_deref()
            .is_some_and(|id| cx.location.targets(id));
        if deep_linked {
            panel.activate_from_location(&cx.timers);
        }

        panel.last_open = panel.is_open();
        panel.reconcile();
        trace!(
            title = %panel.props.title,
            open = panel.last_open,
            deep_linked,
            "collapse mounted"
        );
        panel
    }
}

/// Host collaborators a panel binds to when mounted.
#[derive(Debug, Clone)]
pub struct MountContext {
    timers: TimerQueue,
    size: SizeObserver,
    location: Location,
    viewport_width: Option<u16>,
}

impl MountContext {
    /// Context with no URL fragment and no known viewport width.
    #[must_use]
    pub fn new(timers: TimerQueue, size: SizeObserver) -> Self {
        Self {
            timers,
            size,
            location: Location::none(),
            viewport_width: None,
        }
    }

    /// Page location read for deep-link activation.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Viewport width at mount.
    #[must_use]
    pub fn with_viewport_width(mut self, width: u16) -> Self {
        self.viewport_width = Some(width);
        self
    }
}

/// A panel bound to its host.
///
/// Dropping it (or calling [`unmount`](Self::unmount)) cancels a pending
/// immediate-window timer and releases the size subscription.
pub struct MountedCollapse {
    props: Collapse,
    local_open: bool,
    measured: Rc<Cell<f64>>,
    animator: HeightAnimator,
    immediate: Rc<Cell<bool>>,
    immediate_timer: Option<Timer>,
    viewport: ViewportTracker,
    layout_epoch: u64,
    /// Open state as of the last reconcile, for change notification.
    last_open: bool,
    _size_subscription: SizeSubscription,
}

impl fmt::Debug for MountedCollapse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedCollapse")
            .field("title", &self.props.title)
            .field("open", &self.is_open())
            .field("measured", &self.measured.get())
            .field("height", &self.animator.height())
            .field("immediate", &self.immediate.get())
            .field("layout_epoch", &self.layout_epoch)
            .finish_non_exhaustive()
    }
}

impl MountedCollapse {
    /// Panel title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.props.title
    }

    /// Anchor id, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.props.id.as_deref()
    }

    /// Whether the panel is part of a group.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.props.group.is_some()
    }

    /// Current open state, derived from the coordinator or the local flag.
    #[must_use]
    pub fn is_open(&self) -> bool {
        derive_open(
            self.props.group.as_deref(),
            self.local_open,
            &self.props.title,
        )
    }

    /// Whether height changes currently snap instead of animating.
    #[must_use]
    pub fn is_immediate(&self) -> bool {
        self.immediate.get()
    }

    /// Latest natural height reported for the content.
    #[must_use]
    pub fn measured_height(&self) -> f64 {
        self.measured.get()
    }

    /// Height the panel is heading to: the measured height when open,
    /// otherwise 0.
    #[must_use]
    pub fn target_height(&self) -> f64 {
        if self.is_open() {
            self.measured.get()
        } else {
            0.0
        }
    }

    /// Visible height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.animator.height()
    }

    /// Whether the visible height is still moving.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.animator.is_settled()
    }

    /// Current viewport tier, once a width has been observed.
    #[must_use]
    pub fn breakpoint(&self) -> Option<Breakpoint> {
        self.viewport.current()
    }

    /// Number of breakpoint crossings since mount.
    #[must_use]
    pub fn layout_epoch(&self) -> u64 {
        self.layout_epoch
    }

    /// Flip the panel.
    ///
    /// In a group this selects the panel's title when closed and clears the
    /// selection when open, which every sibling observes. Otherwise it flips
    /// the local flag. `on_toggle` runs afterwards either way.
    pub fn toggle(&mut self) {
        let was_open = self.is_open();
        match &self.props.group {
            Some(group) => {
                let next = (!was_open).then(|| self.props.title.clone());
                group.on_change(next);
            }
            None => self.local_open = !self.local_open,
        }
        debug!(
            title = %self.props.title,
            open = !was_open,
            grouped = self.props.group.is_some(),
            "collapse toggled"
        );
        if let Some(on_toggle) = &self.props.on_toggle {
            on_toggle();
        }
        self.reconcile();
    }

    /// React to an input event delivered to this panel's header.
    ///
    /// A primary click, Space, or Enter toggles. Keyboard activation asks
    /// the host to suppress the default action. A resize that crosses a
    /// breakpoint requests a relayout. Everything else is ignored.
    pub fn handle_event(&mut self, event: &Event) -> EventResult {
        match event {
            Event::Mouse(mouse) if mouse.is_click() => {
                self.toggle();
                EventResult::Toggled {
                    prevent_default: false,
                }
            }
            Event::Key(key) if key.is_activation() => {
                self.toggle();
                EventResult::Toggled {
                    prevent_default: true,
                }
            }
            Event::Resize { width, .. } => {
                if self.on_viewport_resize(*width) {
                    EventResult::Relayout
                } else {
                    EventResult::Ignored
                }
            }
            _ => EventResult::Ignored,
        }
    }

    /// Record a viewport width. Returns `true` when it crossed a
    /// breakpoint, meaning content may have reflowed and must be
    /// re-measured.
    pub fn on_viewport_resize(&mut self, width: u16) -> bool {
        if !self.viewport.observe(width) {
            return false;
        }
        self.layout_epoch += 1;
        debug!(
            title = %self.props.title,
            width,
            breakpoint = %self.viewport.current().map_or("unknown", Breakpoint::label),
            epoch = self.layout_epoch,
            "collapse relayout"
        );
        true
    }

    /// Pick up external changes (coordinator selection, new measurements,
    /// the immediate window closing) without advancing the animation.
    pub fn sync(&mut self) {
        self.reconcile();
    }

    /// Advance one frame.
    pub fn tick(&mut self, dt: Duration) {
        self.reconcile();
        self.animator.tick(dt);
    }

    /// Snapshot for painting.
    #[must_use]
    pub fn view(&self) -> CollapseView {
        let open = self.is_open();
        CollapseView {
            id: self.props.id.clone(),
            title: self.props.title.clone(),
            subtitle: self.props.subtitle.clone(),
            card: self.props.card,
            grouped: self.props.group.is_some(),
            header: HeaderView {
                role: Role::Button,
                focusable: true,
                expanded: open,
                chevron: Chevron::for_open(open),
            },
            content: ContentView {
                role: Role::Region,
                height: self.animator.height(),
                measured_height: self.measured.get(),
                open,
            },
            layout_epoch: self.layout_epoch,
        }
    }

    /// Tear down. Equivalent to dropping the panel.
    pub fn unmount(self) {
        drop(self);
    }

    fn activate_from_location(&mut self, timers: &TimerQueue) {
        self.immediate.set(true);
        match &self.props.group {
            Some(group) => group.on_change(Some(self.props.title.clone())),
            None => self.local_open = true,
        }

        let flag = Rc::clone(&self.immediate);
        self.immediate_timer = Some(timers.schedule(self.props.immediate_window, move || {
            flag.set(false);
        }));
        debug!(
            title = %self.props.title,
            id = ?self.props.id,
            window_ms = self.props.immediate_window.as_millis() as u64,
            "collapse deep-link activation"
        );
    }

    fn reconcile(&mut self) {
        let open = self.is_open();
        self.animator.set_immediate(self.immediate.get());
        self.animator.set_target(self.target_height());

        if open != self.last_open {
            self.last_open = open;
            if let Some(on_open_change) = &self.props.on_open_change {
                on_open_change(open);
            }
        }
    }
}

impl Drop for MountedCollapse {
    fn drop(&mut self) {
        if let Some(timer) = self.immediate_timer.take()
            && timer.cancel()
        {
            trace!(title = %self.props.title, "collapse unmounted inside immediate window");
        }
    }
}
