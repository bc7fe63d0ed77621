//! Velocity tracking for fling gesture support.
//!
//! Impulse strategy: the velocity is derived from the kinetic energy the
//! pointer imparted over the recent samples, which is far less sensitive to a
//! single jittery sample than a least-squares fit.

use smallvec::SmallVec;

/// Number of samples retained.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window of the newest one contribute.
const HORIZON_MS: i64 = 100;

/// A gap longer than this between consecutive samples means the pointer
/// stopped; older samples are ignored.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// 1D velocity tracker over absolute positions.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Sample; HISTORY_SIZE],
    /// Slot of the newest sample.
    head: usize,
    len: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [Sample::default(); HISTORY_SIZE],
            head: 0,
            len: 0,
        }
    }

    /// Records `position` at `time_ms`. Times must be non-decreasing.
    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        self.head = (self.head + 1) % HISTORY_SIZE;
        self.samples[self.head] = Sample { time_ms, position };
        self.len = (self.len + 1).min(HISTORY_SIZE);
    }

    /// Newest-first walk over the samples that belong to the current motion.
    fn recent_samples(&self) -> SmallVec<[Sample; HISTORY_SIZE]> {
        let mut recent = SmallVec::new();
        if self.len == 0 {
            return recent;
        }
        let newest = self.samples[self.head];
        let mut previous_time = newest.time_ms;
        for offset in 0..self.len {
            let slot = (self.head + HISTORY_SIZE - offset) % HISTORY_SIZE;
            let sample = self.samples[slot];
            let age = newest.time_ms - sample.time_ms;
            let gap = previous_time - sample.time_ms;
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            previous_time = sample.time_ms;
            recent.push(sample);
        }
        recent
    }

    /// Velocity in units/second, or `0.0` without enough recent motion.
    pub fn calculate_velocity(&self) -> f32 {
        let recent = self.recent_samples();
        if recent.len() < 2 {
            return 0.0;
        }

        // Oldest to newest, accumulating work done between consecutive samples.
        let mut work = 0.0f32;
        let mut first_segment = true;
        for pair in recent.windows(2).rev() {
            let (newer, older) = (pair[0], pair[1]);
            let dt = (newer.time_ms - older.time_ms) as f32;
            if dt == 0.0 {
                continue;
            }
            let segment_velocity = (newer.position - older.position) / dt;
            let previous_velocity = kinetic_energy_to_velocity(work);
            work += (segment_velocity - previous_velocity) * segment_velocity.abs();
            if first_segment {
                work *= 0.5;
                first_segment = false;
            }
        }

        kinetic_energy_to_velocity(work) * 1000.0
    }

    /// Velocity in units/second, capped to `max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

/// `E = v² / 2` with unit mass.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
