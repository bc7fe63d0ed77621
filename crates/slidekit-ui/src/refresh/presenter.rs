//! Pull-to-refresh state machine.

use slidekit_animation::{AnimationSpec, Easing, ValueAnimator};
use slidekit_foundation::ScrollKind;

use crate::refresh::RefreshContainer;

const HIDE_REFRESH_DURATION_MS: i64 = 150;
const REFRESH_ANIMATION_DURATION_MS: u64 = 200;

/// Where the refresh gesture stands, derived from the presenter state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshPhase {
    Idle,
    Dragging,
    ThresholdReached,
    Loading,
    Restoring,
}

/// What runs once the height animation completes. Cancelling skips it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EndAction {
    None,
    Reset,
    TryStartRefresh,
}

struct HeightAnimation {
    animator: ValueAnimator,
    on_end: EndAction,
}

/// Owns the visible refresh height.
///
/// Pull-down deltas grow the height with damping, pull-up deltas shrink it
/// one to one. When the gesture ends the height either starts loading and
/// holds at the threshold or animates back to zero.
pub struct RefreshPresenter {
    container: Option<RefreshContainer>,
    height: i32,
    refreshing: bool,
    refresh_by_pull: bool,
    container_height: i32,
    offset: i32,
    hide_animation: Option<HeightAnimation>,
    height_dirty: bool,
}

impl Default for RefreshPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshPresenter {
    pub fn new() -> Self {
        Self {
            container: None,
            height: 0,
            refreshing: false,
            refresh_by_pull: true,
            container_height: 0,
            offset: 0,
            hide_animation: None,
            height_dirty: false,
        }
    }

    pub fn set_container(&mut self, mut container: RefreshContainer) {
        if self.container_height > 0 {
            container.on_container_height_ready(self.container_height);
        }
        self.container = Some(container);
        self.change_height(self.height);
    }

    pub fn container(&self) -> Option<&RefreshContainer> {
        self.container.as_ref()
    }

    pub fn container_mut(&mut self) -> Option<&mut RefreshContainer> {
        self.container.as_mut()
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_visible(&self) -> bool {
        self.height > 0
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn height_can_refresh(&self) -> i32 {
        self.container
            .as_ref()
            .map_or(0, RefreshContainer::height_can_refresh)
    }

    pub fn full_height(&self) -> i32 {
        self.container.as_ref().map_or(0, RefreshContainer::full_height)
    }

    pub fn phase(&self) -> RefreshPhase {
        if self.refreshing {
            return RefreshPhase::Loading;
        }
        let restoring = self.hide_animation.as_ref().is_some_and(|animation| {
            animation.animator.is_running() && animation.animator.end_value() == 0
        });
        if restoring {
            RefreshPhase::Restoring
        } else if self.height == 0 {
            RefreshPhase::Idle
        } else if self.height >= self.height_can_refresh() {
            RefreshPhase::ThresholdReached
        } else {
            RefreshPhase::Dragging
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.hide_animation
            .as_ref()
            .is_some_and(|animation| animation.animator.is_running())
    }

    /// Returns and clears whether the height was applied since the last call.
    pub fn take_height_dirty(&mut self) -> bool {
        std::mem::take(&mut self.height_dirty)
    }

    pub fn on_container_height_ready(&mut self, height: i32) {
        self.container_height = height;
        if let Some(container) = self.container.as_mut() {
            container.on_container_height_ready(height);
        }
    }

    pub fn on_layout(&mut self) {
        self.change_height(self.height);
    }

    pub fn on_detach(&mut self) {
        self.cancel_hide_animation();
    }

    pub fn on_start_scroll(&mut self) {
        self.cancel_hide_animation();
    }

    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
        self.change_height(self.height);
    }

    /// Applies a scroll delta and returns how much of it was consumed.
    pub fn on_scroll(&mut self, dy: i32, kind: ScrollKind) -> i32 {
        let Some(container) = self.container.as_ref() else {
            return 0;
        };
        let full = container.full_height();
        if dy < 0 {
            if kind != ScrollKind::Touch || self.height >= full {
                return 0;
            }
            let consumed = dy.max(-(full - self.height));
            let damp = container.damp_factor(self.container_height);
            let height = (self.height as f32 - consumed as f32 / damp) as i32;
            self.change_height(height.min(full));
            consumed
        } else if dy > 0 {
            let consumed = dy.min(self.height);
            self.change_height(self.height - consumed);
            consumed
        } else {
            0
        }
    }

    /// A simulated scroll stops once it tries to pull the indicator down.
    pub fn can_stop_simulated(&self, dy: i32) -> bool {
        dy < 0
    }

    /// Handles the end of the gesture. Returns `Some(by_pull)` when loading
    /// started.
    pub fn on_stop_scroll(&mut self) -> Option<bool> {
        let started = self.try_start_refresh();
        self.hide_if_needed(false);
        started
    }

    /// Animates to the threshold and starts loading there.
    pub fn refresh(&mut self) -> Option<bool> {
        let threshold = self.height_can_refresh();
        if threshold <= 0 {
            return None;
        }
        self.refresh_by_pull = false;
        if self.height == threshold {
            return self.try_start_refresh();
        }
        self.animate_to_height(
            threshold,
            AnimationSpec::tween(REFRESH_ANIMATION_DURATION_MS, Easing::Decelerate),
            false,
            EndAction::TryStartRefresh,
        );
        None
    }

    /// Hides the indicator and leaves the loading state. Calling it while
    /// idle changes nothing.
    pub fn finish_refresh(&mut self) {
        if self.refreshing {
            log::debug!("refresh finished at height {}", self.height);
        }
        self.hide_if_needed(true);
        self.refreshing = false;
    }

    /// Steps the height animation. Returns `Some(by_pull)` when loading
    /// started on completion.
    pub fn on_frame(&mut self, frame_time_nanos: u64) -> Option<bool> {
        let frame = self
            .hide_animation
            .as_mut()
            .and_then(|animation| animation.animator.step(frame_time_nanos))?;
        self.change_height(frame.value);
        if !frame.finished {
            return None;
        }
        let on_end = self
            .hide_animation
            .take()
            .map_or(EndAction::None, |animation| animation.on_end);
        match on_end {
            EndAction::None => None,
            EndAction::Reset => {
                if let Some(container) = self.container.as_mut() {
                    container.reset();
                }
                None
            }
            EndAction::TryStartRefresh => self.try_start_refresh(),
        }
    }

    fn change_height(&mut self, height: i32) {
        self.height = height;
        if let Some(container) = self.container.as_mut() {
            container.update_visible_height(height);
            container.place(self.offset);
        }
        self.height_dirty = true;
    }

    fn try_start_refresh(&mut self) -> Option<bool> {
        let can_refresh = self
            .container
            .as_mut()
            .is_some_and(RefreshContainer::can_refresh);
        if can_refresh {
            self.start_refresh()
        } else {
            None
        }
    }

    fn start_refresh(&mut self) -> Option<bool> {
        if self.refreshing {
            return None;
        }
        self.refreshing = true;
        let by_pull = self.refresh_by_pull;
        self.refresh_by_pull = true;
        log::debug!("refresh started (by pull: {by_pull})");
        Some(by_pull)
    }

    fn hide_if_needed(&mut self, force: bool) {
        let Some(container) = self.container.as_ref() else {
            return;
        };
        if !self.is_visible() {
            if let Some(container) = self.container.as_mut() {
                container.reset();
            }
            return;
        }
        let threshold = container.height_can_refresh();
        let full = container.full_height();
        let collapse = self.height < threshold || container.is_restore() || force;
        let target = if collapse { 0 } else { threshold };
        let distance = i64::from((target - self.height).abs());
        let duration_ms = if full > 0 {
            HIDE_REFRESH_DURATION_MS * distance / i64::from(full) + HIDE_REFRESH_DURATION_MS
        } else {
            HIDE_REFRESH_DURATION_MS
        };
        let spec = AnimationSpec::tween(duration_ms as u64, Easing::Decelerate);
        let on_end = if collapse {
            EndAction::Reset
        } else {
            EndAction::None
        };
        self.animate_to_height(target, spec, collapse, on_end);
    }

    fn animate_to_height(
        &mut self,
        target: i32,
        spec: AnimationSpec,
        restore_on_start: bool,
        on_end: EndAction,
    ) {
        if self.container.is_none() || target == self.height {
            return;
        }
        self.cancel_hide_animation();
        let mut animator = ValueAnimator::of_int(self.height, target, spec);
        if animator.start() && restore_on_start {
            if let Some(container) = self.container.as_mut() {
                container.restore();
            }
        }
        self.hide_animation = Some(HeightAnimation { animator, on_end });
    }

    fn cancel_hide_animation(&mut self) {
        if let Some(mut animation) = self.hide_animation.take() {
            animation.animator.cancel();
        }
    }
}

#[cfg(test)]
#[path = "../tests/refresh_presenter_tests.rs"]
mod tests;
