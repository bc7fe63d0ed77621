//! Decay animation specification for fling animations.
//!
//! A decay has no fixed target. It starts with a velocity and decelerates to
//! zero; the final position depends on the initial velocity.

/// Earth's gravity in SI units (m/s²)
const GRAVITY_EARTH: f32 = 9.80665;
/// Inches per meter (for density conversion)
const INCHES_PER_METER: f32 = 39.37;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Computes physical deceleration in px/s² based on density and friction.
pub fn compute_deceleration(friction: f32, density: f32) -> f32 {
    GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * friction
}

/// Trait for decay animation specifications.
pub trait DecaySpec {
    /// Get position at a given time.
    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    /// Get velocity at a given time, in px/sec.
    fn get_velocity_from_nanos(&self, play_time_nanos: i64, initial_velocity: f32) -> f32;

    /// Get total animation duration in nanoseconds.
    fn get_duration_nanos(&self, initial_velocity: f32) -> i64;

    /// Get the target value (final position) of the animation.
    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32;
}

/// Decay with a constant deceleration: `x(t) = v·t - a·t²/2` until the
/// velocity reaches zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantDecelerationDecay {
    deceleration: f32,
}

impl ConstantDecelerationDecay {
    /// Default friction value (matches Android default)
    pub const DEFAULT_FRICTION: f32 = 0.015;

    /// Create a decay from a raw deceleration in px/s².
    pub fn new(deceleration: f32) -> Self {
        debug_assert!(deceleration > 0.0, "deceleration must be positive");
        Self { deceleration }
    }

    /// Create a decay from a friction coefficient and screen density.
    pub fn from_friction(friction: f32, density: f32) -> Self {
        Self::new(compute_deceleration(friction, density))
    }

    /// Create a decay with default friction for the given density.
    pub fn with_density(density: f32) -> Self {
        Self::from_friction(Self::DEFAULT_FRICTION, density)
    }

    pub fn deceleration(&self) -> f32 {
        self.deceleration
    }

    fn duration_seconds(&self, initial_velocity: f32) -> f64 {
        initial_velocity.abs() as f64 / self.deceleration as f64
    }

    fn distance_at(&self, seconds: f64, initial_velocity: f32) -> f64 {
        let t = seconds.clamp(0.0, self.duration_seconds(initial_velocity));
        let speed = initial_velocity.abs() as f64;
        let traveled = speed * t - 0.5 * self.deceleration as f64 * t * t;
        traveled * initial_velocity.signum() as f64
    }
}

impl Default for ConstantDecelerationDecay {
    fn default() -> Self {
        Self::with_density(1.0)
    }
}

impl DecaySpec for ConstantDecelerationDecay {
    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let seconds = play_time_nanos as f64 / NANOS_PER_SECOND;
        initial_value + self.distance_at(seconds, initial_velocity) as f32
    }

    fn get_velocity_from_nanos(&self, play_time_nanos: i64, initial_velocity: f32) -> f32 {
        let seconds = play_time_nanos as f64 / NANOS_PER_SECOND;
        let speed = (initial_velocity.abs() as f64 - self.deceleration as f64 * seconds).max(0.0);
        speed as f32 * initial_velocity.signum()
    }

    fn get_duration_nanos(&self, initial_velocity: f32) -> i64 {
        (self.duration_seconds(initial_velocity) * NANOS_PER_SECOND) as i64
    }

    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        let seconds = self.duration_seconds(initial_velocity);
        initial_value + self.distance_at(seconds, initial_velocity) as f32
    }
}
