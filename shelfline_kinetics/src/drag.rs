// Copyright 2025 the Shelfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag capture: turns raw pointer-down/move/up events into scroll deltas
//! and a release velocity.

use crate::fling::MAX_FLING_VELOCITY;
use crate::velocity::VelocityTracker;

/// Vertical movement (pixels) a pointer must accumulate from its down point
/// before the gesture is captured as a scroll.
pub const TOUCH_SLOP: i32 = 8;

/// Fraction of the release velocity handed to the fling, matching the
/// original widget's hand-tuned damping.
pub const FLING_VELOCITY_SCALE: f32 = 0.5;

/// Tracks one vertical drag gesture.
///
/// The tracker mirrors how scroll capture works in touch UIs: a pointer-down
/// arms it, moves are ignored until the pointer has travelled more than the
/// touch slop from the down point (so taps and jitter pass through to
/// children), and from then on every move yields a scroll delta of
/// `last_y - y` — positive when the finger moves up, revealing later items.
///
/// On release, a captured drag yields a fling velocity for a
/// [`FlingScroller`](crate::FlingScroller); an uncaptured one yields `None`
/// (it was a tap). Hosts abort any running fling on the next pointer-down.
#[derive(Clone, Debug)]
pub struct DragTracker {
    touch_slop: i32,
    velocity: VelocityTracker,
    down_y: i32,
    last_y: i32,
    active: bool,
    captured: bool,
}

impl DragTracker {
    /// Creates a tracker with the default [`TOUCH_SLOP`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_touch_slop(TOUCH_SLOP)
    }

    /// Creates a tracker with a platform-supplied slop threshold.
    #[must_use]
    pub const fn with_touch_slop(touch_slop: i32) -> Self {
        Self {
            touch_slop,
            velocity: VelocityTracker::new(),
            down_y: 0,
            last_y: 0,
            active: false,
            captured: false,
        }
    }

    /// Pointer down at vertical position `y`. Starts a fresh gesture.
    pub fn on_down(&mut self, time_ms: i64, y: i32) {
        self.active = true;
        self.captured = false;
        self.down_y = y;
        self.last_y = y;
        self.velocity.clear();
        #[expect(clippy::cast_precision_loss, reason = "Pixel coordinates")]
        self.velocity.add_sample(time_ms, y as f32);
    }

    /// Pointer moved to `y`. Returns a scroll delta once the gesture is
    /// captured, `None` before that (or without a preceding down).
    ///
    /// The move that first exceeds the slop begins capture and its returned
    /// delta covers the whole travel since the down point, so no motion is
    /// lost to the threshold.
    pub fn on_move(&mut self, time_ms: i64, y: i32) -> Option<i32> {
        if !self.active {
            return None;
        }
        #[expect(clippy::cast_precision_loss, reason = "Pixel coordinates")]
        self.velocity.add_sample(time_ms, y as f32);

        if !self.captured {
            if (y - self.down_y).abs() <= self.touch_slop {
                return None;
            }
            self.captured = true;
        }
        let delta = self.last_y - y;
        self.last_y = y;
        Some(delta)
    }

    /// Pointer released. A captured drag yields the velocity to hand to a
    /// fling (already scaled and capped); a tap yields `None`.
    pub fn on_up(&mut self) -> Option<f32> {
        let was_captured = self.active && self.captured;
        self.active = false;
        self.captured = false;
        if !was_captured {
            return None;
        }
        // Finger velocity is in screen coordinates; scroll deltas are its
        // negation, like the per-move `last_y - y`.
        let finger = self.velocity.velocity_capped(MAX_FLING_VELOCITY);
        Some(-FLING_VELOCITY_SCALE * finger)
    }

    /// Returns `true` while a gesture has crossed the slop and is scrolling.
    #[must_use]
    pub const fn is_captured(&self) -> bool {
        self.captured
    }
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new()
    }
}
