#![forbid(unsafe_code)]

//! Core: input events, spring animation, and viewport breakpoints.
//!
//! # Role in foldkit
//! `fold-core` is the dependency-light bottom layer. It owns the canonical
//! input events a panel reacts to, the damped spring that drives height
//! transitions, and the width tiers that decide when content must reflow.
//!
//! # How it fits in the system
//! `fold-runtime` supplies the host-driven collaborators (timers, size
//! observation, page location) and `fold-widgets` combines both into the
//! collapsible panel. Nothing in this crate allocates shared state or
//! touches a clock; every type is driven by explicit `tick`/`observe`
//! calls, which keeps it deterministic under test.

pub mod animation;
pub mod breakpoint;
pub mod event;
