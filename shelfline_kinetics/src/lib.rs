// Copyright 2025 the Shelfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelfline Kinetics: touch-to-scroll translation for list containers.
//!
//! This crate turns raw pointer events into the scroll deltas a windowed
//! list consumes, in three small, single-threaded pieces:
//!
//! - [`DragTracker`]: decides when a gesture stops being a tap and becomes a
//!   scroll (the touch-slop threshold), then emits incremental deltas per
//!   move.
//! - [`VelocityTracker`]: estimates the pointer's velocity from its recent
//!   movement samples, so a release can kick off a fling.
//! - [`FlingScroller`]: a stateful stepper advanced once per animation
//!   frame, decelerating from the release velocity and emitting the delta
//!   to forward into the list each frame.
//!
//! Nothing here owns a clock or an event loop: the host feeds in event
//! timestamps and frame intervals and applies the returned deltas. There is
//! no cancellation machinery beyond resetting on the next touch-down.
//!
//! ## Example
//!
//! A drag that crosses the slop, releases, and decays as a fling:
//!
//! ```rust
//! use shelfline_kinetics::{DragTracker, FlingScroller};
//!
//! let mut drag = DragTracker::new();
//! let mut fling = FlingScroller::new();
//!
//! drag.on_down(0, 500);
//! fling.abort(); // a touch-down interrupts any running fling
//!
//! assert_eq!(drag.on_move(16, 497), None); // jitter, within the slop
//! assert_eq!(drag.on_move(32, 460), Some(40)); // captured: 500 - 460
//!
//! if let Some(velocity) = drag.on_up() {
//!     fling.fling(velocity);
//! }
//!
//! let mut travelled = 0;
//! while !fling.is_finished() {
//!     // Each frame: forward the delta into the list's scroll entry point.
//!     travelled += fling.step(16);
//! }
//! assert!(travelled > 0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod drag;
mod fling;
mod velocity;

pub use drag::{DragTracker, FLING_VELOCITY_SCALE, TOUCH_SLOP};
pub use fling::{FlingScroller, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY};
pub use velocity::{ASSUME_STOPPED_MS, VelocityTracker};
