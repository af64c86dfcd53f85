// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll_edge --heading-base-level=0

//! Understory Scroll Edge: debounced trailing-edge detection for scroll containers.
//!
//! Infinite and paginated grids want to know when the user has scrolled close
//! enough to the end of the content to load more. Scroll geometry arrives at
//! frame rate during a gesture, so this crate coalesces it and reports each
//! approach to the trailing edge exactly once.
//!
//! The core concepts are:
//!
//! - [`Debouncer`]: a caller-clocked, last-write-wins coalescer. Each push
//!   cancels the previous deadline and schedules a new one.
//! - [`ScrollEdgeDetector`]: an `Idle`/`AtEdge` state machine over debounced
//!   content frames ([`kurbo::Rect`] in viewport coordinates) along a single
//!   [`ScrollAxis`]. It reports [`EdgeEvent::Reached`] once per approach and
//!   [`EdgeEvent::Left`] when the content scrolls back, which rearms it.
//!
//! This crate owns no timers. Hosts pass millisecond timestamps from their own
//! clock, schedule a wakeup at [`ScrollEdgeDetector::deadline`], and call
//! [`ScrollEdgeDetector::poll`]. Tearing a view down calls
//! [`ScrollEdgeDetector::detach`], after which nothing fires.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_scroll_edge::{EdgeConfig, EdgeEvent, ScrollEdgeDetector};
//!
//! // 400px tall viewport over 1000px of content.
//! let mut detector = ScrollEdgeDetector::with_viewport(EdgeConfig::default(), 400.0);
//!
//! // The initial layout measurement is never evaluated.
//! detector.on_geometry(Rect::new(0.0, 0.0, 300.0, 1000.0), 0);
//!
//! // The user scrolls to the end; frames arrive every 16ms.
//! detector.on_geometry(Rect::new(0.0, -500.0, 300.0, 500.0), 16);
//! detector.on_geometry(Rect::new(0.0, -610.0, 300.0, 390.0), 32);
//! assert_eq!(detector.poll(48), None);
//!
//! // Once the last frame has settled for the debounce window, the edge fires.
//! let wake = detector.deadline().unwrap();
//! assert_eq!(detector.poll(wake), Some(EdgeEvent::Reached));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod debounce;
mod detector;

pub use debounce::{DEFAULT_DEBOUNCE_MS, Debouncer};
pub use detector::{EdgeConfig, EdgeEvent, EdgeState, ScrollAxis, ScrollEdgeDetector};
