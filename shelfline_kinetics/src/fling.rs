// Copyright 2025 the Shelfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A frame-stepped fling: constant-friction deceleration from an initial
//! velocity, emitting per-frame scroll deltas.

/// Maximum fling start velocity, pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Speeds below this are treated as stopped: at typical frame rates the
/// residual motion is under a pixel per frame.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Default deceleration, pixels per second squared.
const DEFAULT_DECELERATION: f32 = 3_000.0;

/// A decelerating scroller advanced once per animation frame.
///
/// After a drag is released with some velocity, the host starts a fling and
/// calls [`step`](Self::step) from its frame callback, forwarding each
/// returned delta into the list's scroll entry point. The scroller applies
/// constant friction until the speed decays below [`MIN_FLING_VELOCITY`].
///
/// There is no cancellation beyond [`abort`](Self::abort) (or starting a new
/// fling); hosts reset it on the next touch-down.
///
/// Deltas are integer pixels; fractional remainders carry over between
/// frames so slow flings still make progress.
#[derive(Clone, Debug)]
pub struct FlingScroller {
    /// Signed velocity in px/s; `0.0` when finished.
    velocity: f32,
    deceleration: f32,
    /// Fractional pixels not yet emitted.
    carry: f32,
}

impl FlingScroller {
    /// Creates an idle scroller with the default friction.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_deceleration(DEFAULT_DECELERATION)
    }

    /// Creates an idle scroller decelerating at `deceleration` px/s².
    #[must_use]
    pub const fn with_deceleration(deceleration: f32) -> Self {
        Self {
            velocity: 0.0,
            deceleration,
            carry: 0.0,
        }
    }

    /// Starts a fling at `velocity` px/s (sign gives the scroll direction).
    ///
    /// The magnitude is capped at [`MAX_FLING_VELOCITY`]. A velocity below
    /// [`MIN_FLING_VELOCITY`] leaves the scroller finished; a tap release
    /// does not kick off motion.
    pub fn fling(&mut self, velocity: f32) {
        let velocity = velocity.clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY);
        self.velocity = if velocity.abs() < MIN_FLING_VELOCITY {
            0.0
        } else {
            velocity
        };
        self.carry = 0.0;
    }

    /// Advances the fling by `dt_ms` and returns the scroll delta to apply.
    ///
    /// Returns `0` once finished; hosts typically stop their frame callback
    /// when [`is_finished`](Self::is_finished) reports `true`.
    pub fn step(&mut self, dt_ms: i64) -> i32 {
        if self.is_finished() || dt_ms <= 0 {
            return 0;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "Frame intervals are a handful of milliseconds"
        )]
        let dt = dt_ms as f32 / 1000.0;

        let direction = self.velocity.signum();
        let speed = self.velocity.abs();
        let slowed = (speed - self.deceleration * dt).max(0.0);
        // Trapezoidal distance: exact for a linear speed ramp.
        let distance = (speed + slowed) / 2.0 * dt * direction;

        self.velocity = if slowed < MIN_FLING_VELOCITY {
            0.0
        } else {
            slowed * direction
        };

        let total = distance + self.carry;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Per-frame distances are far below the i32 range; the fraction is carried"
        )]
        let whole = total as i32;
        #[expect(clippy::cast_precision_loss, reason = "whole is a truncation of total")]
        {
            self.carry = total - whole as f32;
        }
        whole
    }

    /// Stops the fling immediately.
    pub fn abort(&mut self) {
        self.velocity = 0.0;
        self.carry = 0.0;
    }

    /// Returns `true` when no motion remains.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.velocity == 0.0
    }

    /// The current signed velocity, px/s.
    #[must_use]
    pub const fn velocity(&self) -> f32 {
        self.velocity
    }
}

impl Default for FlingScroller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{FlingScroller, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY};

    #[test]
    fn a_tap_release_does_not_fling() {
        let mut scroller = FlingScroller::new();
        scroller.fling(MIN_FLING_VELOCITY / 2.0);
        assert!(scroller.is_finished());
        assert_eq!(scroller.step(16), 0);
    }

    #[test]
    fn flings_decelerate_to_a_stop() {
        let mut scroller = FlingScroller::new();
        scroller.fling(2_000.0);

        let mut total = 0_i64;
        let mut frames = 0;
        while !scroller.is_finished() {
            total += i64::from(scroller.step(16));
            frames += 1;
            assert!(frames < 1_000, "fling failed to terminate");
        }
        // v²/2a ≈ 667px at 2000 px/s with 3000 px/s² of friction.
        assert!((600..=700).contains(&total), "travelled {total}px");
        // Roughly v/a ≈ 0.67s of frames.
        assert!((30..=50).contains(&frames), "ran for {frames} frames");
    }

    #[test]
    fn direction_follows_the_velocity_sign() {
        let mut scroller = FlingScroller::new();
        scroller.fling(-2_000.0);
        let mut total = 0_i64;
        while !scroller.is_finished() {
            total += i64::from(scroller.step(16));
        }
        assert!(total < -500);
    }

    #[test]
    fn start_velocity_is_capped() {
        let mut scroller = FlingScroller::new();
        scroller.fling(50_000.0);
        assert_eq!(scroller.velocity(), MAX_FLING_VELOCITY);
    }

    #[test]
    fn fractional_motion_carries_between_frames() {
        // Slow enough that a single frame moves less than a pixel.
        let mut scroller = FlingScroller::with_deceleration(0.5);
        scroller.fling(55.0);
        let mut emitted = 0;
        for _ in 0..20 {
            emitted += scroller.step(8);
        }
        // 55 px/s over 160ms is ~8.8px; truncation without carry would lose
        // most of it at 0.44px per frame.
        assert!((8..=9).contains(&emitted), "emitted {emitted}px");
    }

    #[test]
    fn abort_stops_motion() {
        let mut scroller = FlingScroller::new();
        scroller.fling(2_000.0);
        assert!(!scroller.is_finished());
        scroller.abort();
        assert!(scroller.is_finished());
        assert_eq!(scroller.step(16), 0);
    }
}
