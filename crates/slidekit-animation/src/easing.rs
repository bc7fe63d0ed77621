//! Easing curves mapping a linear fraction onto an eased fraction.

/// Easing functions used by SlideKit animators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Quadratic deceleration, `1 - (1 - t)^2`.
    Decelerate,
    /// Material fast-out-slow-in curve.
    FastOutSlowIn,
    /// Arbitrary cubic bezier through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    pub const fn cubic(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Easing::CubicBezier { x1, y1, x2, y2 }
    }

    /// Apply the easing function to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        let fraction = fraction.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => fraction,
            Easing::Decelerate => 1.0 - (1.0 - fraction) * (1.0 - fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, fraction),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::FastOutSlowIn
    }
}

#[derive(Clone, Copy)]
struct Polynomial {
    a: f32,
    b: f32,
    c: f32,
}

impl Polynomial {
    fn from_control_points(p1: f32, p2: f32) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self {
            a: 1.0 - c - b,
            b,
            c,
        }
    }

    fn sample(self, t: f32) -> f32 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn derivative(self, t: f32) -> f32 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}

/// Solves the bezier for the parametric `t` matching `fraction` on the x axis
/// and samples y there.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let x = Polynomial::from_control_points(x1, x2);
    let y = Polynomial::from_control_points(y1, y2);

    let mut t = fraction;
    for _ in 0..8 {
        let error = x.sample(t) - fraction;
        if error.abs() < 1e-6 {
            return y.sample(t);
        }
        let slope = x.derivative(t);
        if slope.abs() < 1e-6 {
            break;
        }
        t = (t - error / slope).clamp(0.0, 1.0);
    }

    // Newton-Raphson stalled, bisect instead.
    let (mut low, mut high) = (0.0f32, 1.0f32);
    t = fraction;
    for _ in 0..20 {
        let error = x.sample(t) - fraction;
        if error.abs() < 1e-6 {
            break;
        }
        if error > 0.0 {
            high = t;
        } else {
            low = t;
        }
        t = 0.5 * (low + high);
    }
    y.sample(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for easing in [
            Easing::Linear,
            Easing::Decelerate,
            Easing::FastOutSlowIn,
            Easing::cubic(0.28, 0.73, 0.31, 0.98),
        ] {
            assert_eq!(easing.transform(0.0), 0.0, "{easing:?}");
            assert!((easing.transform(1.0) - 1.0).abs() < 1e-4, "{easing:?}");
        }
    }

    #[test]
    fn decelerate_runs_ahead_of_linear() {
        assert_eq!(Easing::Decelerate.transform(0.5), 0.75);
        assert!(Easing::Decelerate.transform(0.25) > 0.25);
    }

    #[test]
    fn path_curve_is_monotonic() {
        let easing = Easing::cubic(0.28, 0.73, 0.31, 0.98);
        let mut previous = 0.0;
        for step in 0..=50 {
            let value = easing.transform(step as f32 / 50.0);
            assert!(value + 1e-4 >= previous, "step {step}: {value} < {previous}");
            previous = value;
        }
    }

    #[test]
    fn out_of_range_fractions_are_clamped() {
        assert_eq!(Easing::Linear.transform(-1.0), 0.0);
        assert_eq!(Easing::Linear.transform(2.0), 1.0);
    }
}
