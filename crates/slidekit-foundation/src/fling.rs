//! Fling simulation producing per-frame integer deltas.

use std::ops::RangeInclusive;

use slidekit_animation::{ConstantDecelerationDecay, DecaySpec};

use crate::gesture_constants::MIN_FLING_VELOCITY;

/// Steps a decay from a release velocity and turns it into per-frame deltas.
///
/// Positions start at 0, move in the direction of the velocity, are rounded
/// to whole pixels and clamped to the bounds. Each step yields
/// `previous - current`, so a downward fling (positive velocity) produces
/// negative deltas, matching a pull-down. A simulator runs once: after it
/// finishes or is stopped it never yields again.
#[derive(Clone, Debug)]
pub struct FlingSimulator<D: DecaySpec = ConstantDecelerationDecay> {
    decay: D,
    velocity: f32,
    bounds: RangeInclusive<i32>,
    duration_nanos: i64,
    start_time_nanos: Option<u64>,
    last_position: i32,
    finished: bool,
}

impl<D: DecaySpec> FlingSimulator<D> {
    /// Starts a fling. Velocities below [`MIN_FLING_VELOCITY`] produce an
    /// already finished simulator.
    pub fn start(decay: D, velocity: f32, bounds: RangeInclusive<i32>) -> Self {
        debug_assert!(bounds.contains(&0), "fling bounds must contain the start position");
        let finished = !velocity.is_finite() || velocity.abs() < MIN_FLING_VELOCITY;
        let duration_nanos = if finished {
            0
        } else {
            decay.get_duration_nanos(velocity)
        };
        Self {
            decay,
            velocity,
            bounds,
            duration_nanos,
            start_time_nanos: None,
            last_position: 0,
            finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Current position relative to the start.
    pub fn position(&self) -> i32 {
        self.last_position
    }

    pub fn stop(&mut self) {
        self.finished = true;
    }

    /// Delta for the frame at `frame_time_nanos`, or `None` once finished.
    ///
    /// The first frame pins the start time and yields `0`.
    pub fn next_delta(&mut self, frame_time_nanos: u64) -> Option<i32> {
        if self.finished {
            return None;
        }
        let start = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let play_time_nanos = frame_time_nanos.saturating_sub(start) as i64;

        let raw = self
            .decay
            .get_value_from_nanos(play_time_nanos, 0.0, self.velocity)
            .round() as i32;
        let position = raw.clamp(*self.bounds.start(), *self.bounds.end());
        let delta = self.last_position - position;
        self.last_position = position;

        let hit_bound = position != raw
            || (position != 0 && (position == *self.bounds.start() || position == *self.bounds.end()));
        if play_time_nanos >= self.duration_nanos || hit_bound {
            log::trace!("fling finished at {position} (bound: {hit_bound})");
            self.finished = true;
        }
        Some(delta)
    }
}

impl FlingSimulator<ConstantDecelerationDecay> {
    /// Fling with the default friction for `density`.
    pub fn with_density(density: f32, velocity: f32, bounds: RangeInclusive<i32>) -> Self {
        Self::start(
            ConstantDecelerationDecay::with_density(density),
            velocity,
            bounds,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: u64 = 16_000_000;

    fn drain(simulator: &mut FlingSimulator) -> Vec<i32> {
        let mut deltas = Vec::new();
        let mut time = 0;
        while let Some(delta) = simulator.next_delta(time) {
            deltas.push(delta);
            time += FRAME;
            assert!(deltas.len() < 10_000, "fling never finished");
        }
        deltas
    }

    #[test]
    fn downward_fling_pulls_down_and_decelerates() {
        let decay = ConstantDecelerationDecay::new(2_000.0);
        let mut simulator = FlingSimulator::start(decay, 1_000.0, -10_000..=10_000);
        let deltas = drain(&mut simulator);

        assert_eq!(deltas[0], 0);
        assert!(deltas.iter().all(|delta| *delta <= 0));
        // v²/2a = 250 px
        assert_eq!(deltas.iter().sum::<i32>(), -250);
        assert!(deltas[1].abs() > deltas[deltas.len() - 1].abs());
        assert!(simulator.is_finished());
    }

    #[test]
    fn bound_cuts_the_fling_short() {
        let decay = ConstantDecelerationDecay::new(1_000.0);
        let mut simulator = FlingSimulator::start(decay, -4_000.0, -100..=100);
        let deltas = drain(&mut simulator);
        assert_eq!(deltas.iter().sum::<i32>(), 100);
        assert_eq!(simulator.position(), -100);
    }

    #[test]
    fn slow_release_never_moves() {
        let mut simulator = FlingSimulator::with_density(1.0, 0.5, -1_000..=1_000);
        assert!(simulator.is_finished());
        assert_eq!(simulator.next_delta(0), None);
    }

    #[test]
    fn stop_ends_the_sequence_for_good() {
        let mut simulator = FlingSimulator::with_density(2.0, 3_000.0, -2_000..=2_000);
        assert_eq!(simulator.next_delta(0), Some(0));
        assert!(simulator.next_delta(FRAME).is_some());
        simulator.stop();
        assert_eq!(simulator.next_delta(2 * FRAME), None);
        assert_eq!(simulator.next_delta(3 * FRAME), None);
    }
}
