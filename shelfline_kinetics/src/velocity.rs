// Copyright 2025 the Shelfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer velocity estimation from recent movement samples.

/// Number of samples kept in the ring buffer.
const HISTORY_SIZE: usize = 20;

/// Only samples within this many milliseconds of the newest one contribute.
const HORIZON_MS: i64 = 100;

/// A gap longer than this between samples is treated as the pointer having
/// stopped; older samples are ignored.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: i64,
    y: f32,
}

/// Estimates a pointer's 1D velocity from its recent position samples.
///
/// Feed it `(time, position)` pairs while a gesture is in progress and ask
/// for [`velocity`](Self::velocity) on release. Only samples inside a short
/// horizon contribute, so a drag that slows to a stop before lifting yields
/// a near-zero velocity even if it started fast.
///
/// The estimate is a least-squares line fit over the contributing samples,
/// in pixels per second.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl VelocityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Forgets all samples. Call on touch-down to start a fresh gesture.
    pub fn clear(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }

    /// Records the pointer at position `y` (pixels) at `time_ms`.
    ///
    /// Times are expected to be monotonically non-decreasing within a
    /// gesture; the ring buffer keeps the twenty most recent entries.
    pub fn add_sample(&mut self, time_ms: i64, y: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, y });
    }

    /// Estimated velocity in pixels per second.
    ///
    /// Returns `0.0` with fewer than two contributing samples, or when the
    /// pointer held still long enough to be considered stopped.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        let mut times = [0.0_f32; HISTORY_SIZE];
        let mut positions = [0.0_f32; HISTORY_SIZE];
        let mut count = 0;

        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        let mut cursor = self.index;
        let mut previous = newest;
        while let Some(sample) = self.samples[cursor] {
            let age = newest.time_ms - sample.time_ms;
            let gap = previous.time_ms - sample.time_ms;
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            previous = sample;

            #[expect(
                clippy::cast_precision_loss,
                reason = "Sample ages are at most HORIZON_MS milliseconds"
            )]
            {
                times[count] = -(age as f32);
            }
            positions[count] = sample.y;
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }

            cursor = cursor.checked_sub(1).unwrap_or(HISTORY_SIZE - 1);
            if cursor == self.index {
                break;
            }
        }

        if count < 2 {
            return 0.0;
        }

        // Least-squares slope over the contributing samples, px per ms.
        #[expect(
            clippy::cast_precision_loss,
            reason = "Sample counts are at most HISTORY_SIZE"
        )]
        let n = count as f32;
        let mean_t: f32 = times[..count].iter().sum::<f32>() / n;
        let mean_y: f32 = positions[..count].iter().sum::<f32>() / n;
        let mut covariance = 0.0_f32;
        let mut variance = 0.0_f32;
        for i in 0..count {
            let dt = times[i] - mean_t;
            covariance += dt * (positions[i] - mean_y);
            variance += dt * dt;
        }
        if variance == 0.0 {
            return 0.0;
        }
        covariance / variance * 1000.0
    }

    /// Like [`velocity`](Self::velocity), with the magnitude capped at
    /// `max_velocity` (pixels per second).
    #[must_use]
    pub fn velocity_capped(&self, max_velocity: f32) -> f32 {
        self.velocity().clamp(-max_velocity, max_velocity)
    }
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::VelocityTracker;

    #[test]
    fn no_samples_means_no_velocity() {
        let tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity(), 0.0);

        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0, 100.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn constant_motion_is_recovered_exactly() {
        let mut tracker = VelocityTracker::new();
        // 2 px per ms downward, sampled every 16 ms.
        for frame in 0..6_i64 {
            #[expect(clippy::cast_precision_loss, reason = "Small test values")]
            tracker.add_sample(frame * 16, (frame * 32) as f32);
        }
        let v = tracker.velocity();
        assert!((v - 2000.0).abs() < 1.0, "got {v}");
    }

    #[test]
    fn stale_history_outside_the_horizon_is_ignored() {
        let mut tracker = VelocityTracker::new();
        // Fast early movement, well outside the horizon by release time.
        tracker.add_sample(0, 0.0);
        tracker.add_sample(16, 400.0);
        // Recent slow movement.
        for frame in 0..5_i64 {
            #[expect(clippy::cast_precision_loss, reason = "Small test values")]
            tracker.add_sample(500 + frame * 16, (400 + frame) as f32);
        }
        let v = tracker.velocity();
        assert!(v < 100.0, "stale samples leaked into the estimate: {v}");
    }

    #[test]
    fn a_pause_before_lifting_reads_as_stopped() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0, 0.0);
        tracker.add_sample(16, 100.0);
        // Held still past the stop threshold, then a single parting sample.
        tracker.add_sample(120, 100.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn capping_preserves_direction() {
        let mut tracker = VelocityTracker::new();
        for frame in 0..4_i64 {
            #[expect(clippy::cast_precision_loss, reason = "Small test values")]
            tracker.add_sample(frame * 8, (-frame * 160) as f32);
        }
        let v = tracker.velocity_capped(8000.0);
        assert_eq!(v, -8000.0);
    }
}
