//! Region hosting the refresh indicator.

use crate::refresh::RefreshIndicator;
use crate::region::{move_top_to, RegionView};

const BASE_DAMP_FACTOR: f32 = 1.25;
const REFRESH_HEIGHT_RATIO: f32 = 1.0 / 8.0;
const FULL_HEIGHT_DIVISOR: i32 = 3;

/// Wraps the refresh region and its indicator, tracks the visible height and
/// derives the refresh threshold from the container height.
pub struct RefreshContainer {
    region: Box<dyn RegionView>,
    indicator: Option<Box<dyn RefreshIndicator>>,
    visible_height: i32,
    height_can_refresh: i32,
    full_height: i32,
}

impl RefreshContainer {
    pub fn new(region: Box<dyn RegionView>) -> Self {
        Self {
            region,
            indicator: None,
            visible_height: 0,
            height_can_refresh: 0,
            full_height: 0,
        }
    }

    pub fn with_indicator(mut self, indicator: Box<dyn RefreshIndicator>) -> Self {
        self.set_indicator(indicator);
        self
    }

    /// Installs the indicator and brings it up to date with the current
    /// visible height.
    pub fn set_indicator(&mut self, mut indicator: Box<dyn RefreshIndicator>) {
        indicator.update_visible_height(self.visible_height);
        self.indicator = Some(indicator);
    }

    pub fn visible_height(&self) -> i32 {
        self.visible_height
    }

    /// Height at which a released pull starts loading.
    pub fn height_can_refresh(&self) -> i32 {
        self.height_can_refresh
    }

    /// Height of the fully pulled indicator.
    pub fn full_height(&self) -> i32 {
        self.full_height
    }

    pub fn region(&self) -> &dyn RegionView {
        self.region.as_ref()
    }

    pub fn on_container_height_ready(&mut self, height: i32) {
        self.height_can_refresh = (REFRESH_HEIGHT_RATIO * height as f32) as i32;
        self.full_height = height / FULL_HEIGHT_DIVISOR;
    }

    /// Damping applied to pull-down deltas; grows with the pulled height once
    /// past the threshold. `range` is usually the container height.
    pub fn damp_factor(&self, range: i32) -> f32 {
        if self.visible_height > self.height_can_refresh && range > 0 {
            self.visible_height as f32 * 6.0 / range as f32 + BASE_DAMP_FACTOR
        } else {
            BASE_DAMP_FACTOR
        }
    }

    pub fn update_visible_height(&mut self, height: i32) {
        if self.visible_height == height {
            return;
        }
        self.visible_height = height;
        let threshold = self.height_can_refresh;
        let Some(indicator) = self.indicator.as_mut() else {
            return;
        };
        indicator.update_visible_height(height);
        if indicator.can_drag() {
            let fraction = if threshold > 0 {
                (height as f32 / threshold as f32).clamp(0.0, 1.0)
            } else {
                1.0
            };
            indicator.update_dragging(fraction);
        } else if indicator.is_loading() {
            let alpha = if height < threshold {
                (height - threshold / 4).max(0) as f32 / threshold as f32
            } else {
                1.0
            };
            self.region.set_alpha(alpha);
        }
    }

    /// Places the region so that only its bottom `visible_height` pixels show
    /// below `offset`.
    pub fn place(&mut self, offset: i32) {
        let top = offset + self.visible_height - self.full_height;
        move_top_to(self.region.as_mut(), top);
    }

    /// Whether a released pull should start loading. Starts the indicator's
    /// loading state when it does.
    pub fn can_refresh(&mut self) -> bool {
        if self.visible_height < self.height_can_refresh {
            return false;
        }
        match self.indicator.as_mut() {
            Some(indicator) if indicator.can_refresh() => {
                indicator.start_loading();
                true
            }
            _ => false,
        }
    }

    pub fn is_restore(&self) -> bool {
        self.indicator
            .as_ref()
            .is_some_and(|indicator| indicator.is_restore())
    }

    pub fn restore(&mut self) {
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.restore();
        }
    }

    pub fn reset(&mut self) {
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.reset();
        }
        self.region.set_alpha(1.0);
    }
}

#[cfg(test)]
#[path = "../tests/refresh_container_tests.rs"]
mod tests;
