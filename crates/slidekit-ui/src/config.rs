//! Construction-time configuration for [`SlideLayout`](crate::SlideLayout).

use std::fmt;

/// Fling speed (px/s) a released slider needs to settle in the fling
/// direction rather than to the closer bound.
pub const DEFAULT_FLING_SLOP: f32 = 50.0;
pub const DEFAULT_SLIDER_DURATION_MS: u64 = 400;
pub const DEFAULT_SCROLL_AROUND_DURATION_MS: u64 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideConfig {
    /// How far the slider overlaps the bottom of the header, in px.
    pub overlap_distance: i32,
    /// Disables pull-to-refresh started from an expanded slider.
    pub disable_slider_refresh: bool,
    /// Space kept free above the slider when it is measured, in px.
    pub min_vertical_margin: i32,
    pub density: f32,
    pub fling_slop: f32,
    pub slider_duration_ms: u64,
    pub scroll_around_duration_ms: u64,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            overlap_distance: 0,
            disable_slider_refresh: false,
            min_vertical_margin: 0,
            density: 1.0,
            fling_slop: DEFAULT_FLING_SLOP,
            slider_duration_ms: DEFAULT_SLIDER_DURATION_MS,
            scroll_around_duration_ms: DEFAULT_SCROLL_AROUND_DURATION_MS,
        }
    }
}

impl SlideConfig {
    pub fn with_overlap_distance(mut self, overlap_distance: i32) -> Self {
        self.overlap_distance = overlap_distance;
        self
    }

    pub fn with_disable_slider_refresh(mut self, disable: bool) -> Self {
        self.disable_slider_refresh = disable;
        self
    }

    pub fn with_min_vertical_margin(mut self, margin: i32) -> Self {
        self.min_vertical_margin = margin;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_fling_slop(mut self, fling_slop: f32) -> Self {
        self.fling_slop = fling_slop;
        self
    }

    pub fn with_slider_duration_ms(mut self, duration_ms: u64) -> Self {
        self.slider_duration_ms = duration_ms;
        self
    }

    pub fn with_scroll_around_duration_ms(mut self, duration_ms: u64) -> Self {
        self.scroll_around_duration_ms = duration_ms;
        self
    }

    /// Checks the configuration and hands it back unchanged when valid.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.overlap_distance < 0 {
            return Err(ConfigError::NegativeDistance {
                field: "overlap_distance",
                value: self.overlap_distance,
            });
        }
        if self.min_vertical_margin < 0 {
            return Err(ConfigError::NegativeDistance {
                field: "min_vertical_margin",
                value: self.min_vertical_margin,
            });
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(ConfigError::InvalidDensity(self.density));
        }
        if !self.fling_slop.is_finite() || self.fling_slop < 0.0 {
            return Err(ConfigError::InvalidFlingSlop(self.fling_slop));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    NegativeDistance { field: &'static str, value: i32 },
    InvalidDensity(f32),
    InvalidFlingSlop(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NegativeDistance { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            ConfigError::InvalidDensity(density) => {
                write!(f, "density must be finite and positive, got {density}")
            }
            ConfigError::InvalidFlingSlop(slop) => {
                write!(f, "fling slop must be finite and non-negative, got {slop}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SlideConfig::default();
        assert_eq!(config.validate(), Ok(config));
        assert_eq!(config.fling_slop, 50.0);
        assert_eq!(config.slider_duration_ms, 400);
    }

    #[test]
    fn rejects_negative_distances() {
        let err = SlideConfig::default()
            .with_overlap_distance(-4)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NegativeDistance {
                field: "overlap_distance",
                value: -4
            }
        );
        assert_eq!(err.to_string(), "overlap_distance must not be negative, got -4");

        assert!(SlideConfig::default()
            .with_min_vertical_margin(-1)
            .validate()
            .is_err());
    }

    #[test]
    fn rejects_degenerate_density_and_slop() {
        for density in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                SlideConfig::default().with_density(density).validate(),
                Err(ConfigError::InvalidDensity(_))
            ));
        }
        assert!(matches!(
            SlideConfig::default().with_fling_slop(f32::NAN).validate(),
            Err(ConfigError::InvalidFlingSlop(_))
        ));
    }
}
