//! The gesture coordinator.
//!
//! [`SlideLayout`] stacks three regions: a collapsible header, a slider that
//! rests below the header and can slide up over it, and a pull-to-refresh
//! indicator above both. It is the nested scroll parent of everything inside
//! those regions and decides, for every delta, which region moves.

mod animation;
mod gesture;
mod nested;

use std::ops::RangeInclusive;

use slidekit_animation::ValueAnimator;
use slidekit_foundation::{ScrollSessions, ScrollTarget};

use crate::config::{ConfigError, SlideConfig};
use crate::events::{SlideEvent, SlideObservers, SubscriptionId};
use crate::margin::MinVerticalMargin;
use crate::refresh::{RefreshContainer, RefreshPhase, RefreshPresenter};
use crate::region::{move_top_to, RegionView};

use animation::SliderAnimation;
pub use gesture::SlideGesture;

type RefreshListener = Box<dyn FnMut(bool, bool)>;

/// Coordinates the header, the slider and the refresh indicator.
///
/// All positions are container coordinates in whole pixels. The layout owns
/// `header_top` and `slider_top`; the refresh presenter owns the refresh
/// height. Hosts feed it sizes and layout passes, frames, and the nested
/// scroll traffic of the content inside the regions.
pub struct SlideLayout {
    config: SlideConfig,
    header: Option<Box<dyn RegionView>>,
    slider: Option<Box<dyn RegionView>>,
    header_content: Option<Box<dyn ScrollTarget>>,
    refresh: RefreshPresenter,
    margin: MinVerticalMargin,
    width: i32,
    height: i32,
    attached: bool,
    header_top: i32,
    slider_top: i32,
    sessions: ScrollSessions,
    slider_velocity: f32,
    last_gesture: Option<SlideGesture>,
    slider_offset_when_refresh: i32,
    slider_expanded: bool,
    header_visible: bool,
    header_visible_range: Option<RangeInclusive<i32>>,
    layout_suspended: bool,
    last_header_height: Option<i32>,
    header_animation: Option<ValueAnimator>,
    slider_animation: Option<SliderAnimation>,
    observers: SlideObservers,
    refresh_listener: Option<RefreshListener>,
}

impl SlideLayout {
    /// Builds an idle layout. Fails when `config` does not validate.
    pub fn new(config: SlideConfig) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        Ok(Self {
            margin: MinVerticalMargin::new(config.min_vertical_margin),
            config,
            header: None,
            slider: None,
            header_content: None,
            refresh: RefreshPresenter::new(),
            width: 0,
            height: 0,
            attached: false,
            header_top: 0,
            slider_top: 0,
            sessions: ScrollSessions::new(),
            slider_velocity: 0.0,
            last_gesture: None,
            slider_offset_when_refresh: 0,
            slider_expanded: false,
            header_visible: true,
            header_visible_range: None,
            layout_suspended: false,
            last_header_height: None,
            header_animation: None,
            slider_animation: None,
            observers: SlideObservers::new(),
            refresh_listener: None,
        })
    }

    pub fn with_header(mut self, header: Box<dyn RegionView>) -> Self {
        self.set_header(header);
        self
    }

    pub fn with_slider(mut self, slider: Box<dyn RegionView>) -> Self {
        self.set_slider(slider);
        self
    }

    pub fn with_refresh_container(mut self, container: RefreshContainer) -> Self {
        self.set_refresh_container(container);
        self
    }

    pub fn with_header_content(mut self, content: Box<dyn ScrollTarget>) -> Self {
        self.set_header_content(content);
        self
    }

    pub fn set_header(&mut self, header: Box<dyn RegionView>) {
        self.header = Some(header);
    }

    pub fn set_slider(&mut self, slider: Box<dyn RegionView>) {
        self.slider = Some(slider);
    }

    pub fn set_refresh_container(&mut self, container: RefreshContainer) {
        self.refresh.set_container(container);
        self.sync_refresh_height();
    }

    /// The scrollable inside the header whose capability decides between
    /// scrolling the header and refreshing while everything is at rest.
    pub fn set_header_content(&mut self, content: Box<dyn ScrollTarget>) {
        self.header_content = Some(content);
    }

    pub fn config(&self) -> &SlideConfig {
        &self.config
    }

    pub fn header_top(&self) -> i32 {
        self.header_top
    }

    pub fn slider_top(&self) -> i32 {
        self.slider_top
    }

    pub fn refresh_height(&self) -> i32 {
        self.refresh.height()
    }

    pub fn refresh_phase(&self) -> RefreshPhase {
        self.refresh.phase()
    }

    pub fn refresh_presenter(&self) -> &RefreshPresenter {
        &self.refresh
    }

    /// Gesture class cached by the last classification.
    pub fn current_gesture(&self) -> Option<SlideGesture> {
        self.last_gesture
    }

    pub fn is_slider_expanded(&self) -> bool {
        self.slider_top == self.header_min_height().unwrap_or(0)
    }

    pub fn is_header_visible(&self) -> bool {
        self.header_visible
    }

    /// Last dispatched visible part of the header, in header coordinates.
    pub fn header_visible_range(&self) -> Option<RangeInclusive<i32>> {
        self.header_visible_range.clone()
    }

    /// Height of the header the slider rests against:
    /// `max(height - overlap, min_height)`.
    pub fn effective_header_height(&self) -> Option<i32> {
        self.header.as_ref().map(|header| {
            (header.height() - self.config.overlap_distance).max(header.min_height())
        })
    }

    /// Slider resting range, `min_height..=effective_height`.
    pub fn header_range(&self) -> Option<RangeInclusive<i32>> {
        let min = self.header_min_height()?;
        let max = self.effective_header_height()?;
        (max >= min).then_some(min..=max)
    }

    /// Height budget for measuring the slider, after the minimum vertical
    /// margin.
    pub fn slider_height_budget(&self) -> i32 {
        self.margin.constrain(self.height)
    }

    /// Natural slider height within [`slider_height_budget`](Self::slider_height_budget).
    pub fn measure_slider(&mut self) -> Option<i32> {
        let (width, budget) = (self.width, self.slider_height_budget());
        self.slider
            .as_mut()
            .map(|slider| slider.measure_height(width, budget))
    }

    /// Returns `true` when the host needs to measure again.
    pub fn set_min_vertical_margin(&mut self, margin: i32) -> bool {
        self.margin.set_margin(margin)
    }

    // Host contract

    pub fn on_size_changed(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.refresh.on_container_height_ready(height);
    }

    /// Re-applies offsets after the host laid out the regions.
    pub fn on_layout(&mut self) {
        self.refresh.on_layout();
        self.sync_refresh_height();
        if self.last_gesture == Some(SlideGesture::Refresh) {
            self.update_header_slider_for_refresh();
        } else if !self.layout_suspended {
            self.change_header_top(self.header_top, false);
            let current = self.effective_header_height();
            let override_top = if self.last_gesture == Some(SlideGesture::Scroll)
                && self.last_header_height != current
            {
                current
            } else {
                None
            };
            self.change_slider_top(override_top.unwrap_or(self.slider_top), false);
        }
        self.last_header_height = self.effective_header_height();
    }

    pub fn on_attached(&mut self) {
        self.attached = true;
    }

    pub fn on_detached(&mut self) {
        self.attached = false;
        self.refresh.on_detach();
        self.cancel_header_animation();
        self.cancel_slider_animation();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn needs_frame(&self) -> bool {
        self.attached
            && (self.refresh.needs_frame()
                || self
                    .header_animation
                    .as_ref()
                    .is_some_and(ValueAnimator::is_running)
                || self
                    .slider_animation
                    .as_ref()
                    .is_some_and(|animation| animation.animator.is_running()))
    }

    pub fn on_frame(&mut self, frame_time_nanos: u64) {
        if !self.attached {
            return;
        }
        let started = self.refresh.on_frame(frame_time_nanos);
        self.sync_refresh_height();
        if let Some(by_pull) = started {
            self.notify_refresh(by_pull);
        }
        self.step_header_animation(frame_time_nanos);
        self.step_slider_animation(frame_time_nanos);
    }

    // Imperative operations

    /// Shows the whole header with the slider resting below it. With an
    /// `offset`, the header is scrolled up by that much instead, at most
    /// down to its minimum height.
    pub fn expand_header(&mut self, offset: Option<i32>) {
        let (Some(min), Some(effective)) = (self.header_min_height(), self.effective_header_height())
        else {
            return;
        };
        let offset = offset.unwrap_or(0).clamp(0, (effective - min).max(0));
        self.change_header_top(-offset, true);
        self.change_slider_top(effective - offset, false);
        self.reapply_refresh_offset();
        self.debug_assert_invariants();
    }

    /// Moves the slider to the top. In slide mode the header stays where it
    /// is; otherwise it collapses along.
    pub fn expand_slider(&mut self, slide_mode: bool) {
        let (Some(min), Some(effective)) = (self.header_min_height(), self.effective_header_height())
        else {
            return;
        };
        let header_top = if slide_mode {
            self.header_top
        } else {
            -(effective - min).max(0)
        };
        self.change_header_top(header_top, true);
        self.change_slider_top(min, false);
        self.reapply_refresh_offset();
        self.debug_assert_invariants();
    }

    pub fn slide_expand_slider(&mut self) {
        if self.is_slider_collapsed() {
            if let Some(min_height) = self.header_min_height() {
                self.animate_slider(min_height);
            }
        }
    }

    /// Whether the slider rests at the header bottom in slide mode.
    pub fn is_slider_collapsed(&mut self) -> bool {
        self.gesture(None, 0) == SlideGesture::Slide
            && self.effective_header_height() == Some(self.slider_top)
    }

    /// Brings back whatever the current gesture hid: the header when
    /// scrolled, the slider's resting position when slid.
    pub fn quick_return(&mut self) {
        if self.sessions.revoke_simulated().is_some() {
            self.on_session_stopped(None);
        }
        match self.gesture(None, 0) {
            SlideGesture::Scroll => self.animate_header(0),
            SlideGesture::Slide => {
                if let Some(height) = self.effective_header_height() {
                    self.animate_slider(height);
                }
            }
            SlideGesture::Refresh => {}
        }
    }

    pub fn refresh(&mut self) {
        let started = self.refresh.refresh();
        self.sync_refresh_height();
        if let Some(by_pull) = started {
            self.notify_refresh(by_pull);
        }
    }

    pub fn finish_refresh(&mut self) {
        self.refresh.finish_refresh();
        self.sync_refresh_height();
    }

    /// Moves the refresh indicator down by `offset`, for hosts that draw
    /// something above it.
    pub fn set_refresh_offset(&mut self, offset: i32) {
        self.refresh.set_offset(offset);
        self.sync_refresh_height();
    }

    /// `listener(by_pull, slider_expanded)` runs once per loading start.
    pub fn set_on_refresh_listener(&mut self, listener: impl FnMut(bool, bool) + 'static) {
        self.refresh_listener = Some(Box::new(listener));
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&SlideEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Observes the header top. Runs once right away with the current value.
    pub fn do_on_header_update(&mut self, mut listener: impl FnMut(i32) + 'static) -> SubscriptionId {
        listener(self.header_top);
        self.observers.subscribe(move |event| {
            if let SlideEvent::HeaderTopChanged(top) = event {
                listener(*top);
            }
        })
    }

    /// Observes slider expansion. Runs once right away with the current value.
    pub fn do_on_slider_expand_change(
        &mut self,
        mut listener: impl FnMut(bool) + 'static,
    ) -> SubscriptionId {
        listener(self.slider_expanded);
        self.observers.subscribe(move |event| {
            if let SlideEvent::SliderExpandChanged(expanded) = event {
                listener(*expanded);
            }
        })
    }

    pub fn do_on_slider_offset_change(
        &mut self,
        mut listener: impl FnMut(i32) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(move |event| {
            if let SlideEvent::SliderOffsetChanged(top) = event {
                listener(*top);
            }
        })
    }

    /// Observes the visible header range. Runs right away when the current
    /// range is not empty.
    pub fn do_on_header_visible_range_change(
        &mut self,
        mut listener: impl FnMut(RangeInclusive<i32>) + 'static,
    ) -> SubscriptionId {
        if let Some(range) = self.compute_header_visible_range() {
            self.header_visible_range = Some(range.clone());
            listener(range);
        }
        self.observers.subscribe(move |event| {
            if let SlideEvent::HeaderVisibleRangeChanged(range) = event {
                listener(range.clone());
            }
        })
    }

    // Geometry and offsets

    fn header_min_height(&self) -> Option<i32> {
        self.header.as_ref().map(|header| header.min_height())
    }

    /// Where the slider may be while the header sits at its current top.
    fn slider_bounds(&self) -> Option<RangeInclusive<i32>> {
        let header = self.header.as_ref()?;
        let effective = self.effective_header_height()?;
        Some(header.top() + header.min_height()..=header.top() + effective)
    }

    fn change_header_top(&mut self, top: i32, unchecked: bool) {
        if self.header_top != top {
            self.header_top = top;
            self.observers.emit(SlideEvent::HeaderTopChanged(top));
            self.dispatch_header_visible_range();
        }
        let Some(header) = self.header.as_mut() else {
            return;
        };
        move_top_to(header.as_mut(), self.header_top);
        if unchecked {
            return;
        }
        if let Some(bounds) = self.slider_bounds() {
            let valid = self.slider_top.clamp(*bounds.start(), *bounds.end());
            if valid != self.slider_top {
                self.change_slider_top(valid, false);
            }
        }
    }

    fn change_slider_top(&mut self, top: i32, unchecked: bool) {
        let Some(bounds) = self.slider_bounds() else {
            return;
        };
        let top = if unchecked {
            top
        } else {
            top.clamp(*bounds.start(), *bounds.end())
        };
        if self.slider_top != top {
            self.slider_top = top;
            self.observers.emit(SlideEvent::SliderOffsetChanged(top));
            self.dispatch_header_visible_range();
            let expanded = self.is_slider_expanded();
            if self.slider_expanded != expanded {
                self.slider_expanded = expanded;
                self.observers.emit(SlideEvent::SliderExpandChanged(expanded));
            }
        }
        if let Some(slider) = self.slider.as_mut() {
            move_top_to(slider.as_mut(), self.slider_top);
        }
    }

    fn sync_slider_with_header(&mut self) {
        if let Some(bottom) = self.header.as_ref().map(|header| header.bottom()) {
            self.change_slider_top(bottom, false);
        }
    }

    fn compute_header_visible_range(&self) -> Option<RangeInclusive<i32>> {
        let effective = self.effective_header_height()?;
        let top = (-self.header_top).max(0);
        let bottom = (self.slider_top - self.header_top).min(effective);
        (top < bottom).then_some(top..=bottom)
    }

    fn dispatch_header_visible_range(&mut self) {
        let Some(range) = self.compute_header_visible_range() else {
            return;
        };
        if self.header_visible_range.as_ref() != Some(&range) {
            self.header_visible_range = Some(range.clone());
            self.observers.emit(SlideEvent::HeaderVisibleRangeChanged(range));
        }
    }

    /// Pushes header and slider down by the refresh height.
    fn update_header_slider_for_refresh(&mut self) {
        let header_top = self.header_top + self.refresh.height();
        let slider_top = if self.slider_offset_when_refresh > 0 {
            self.slider_offset_when_refresh + header_top
        } else {
            self.slider_top
        };
        if let Some(header) = self.header.as_mut() {
            move_top_to(header.as_mut(), header_top);
        }
        if let Some(slider) = self.slider.as_mut() {
            move_top_to(slider.as_mut(), slider_top);
        }
    }

    fn reapply_refresh_offset(&mut self) {
        if self.last_gesture == Some(SlideGesture::Refresh) {
            self.update_header_slider_for_refresh();
        }
    }

    fn sync_refresh_height(&mut self) {
        if self.refresh.take_height_dirty() {
            self.update_header_slider_for_refresh();
        }
    }

    fn notify_refresh(&mut self, by_pull: bool) {
        let expanded = self.is_slider_expanded();
        log::debug!("refresh listener: by pull {by_pull}, slider expanded {expanded}");
        if let Some(listener) = self.refresh_listener.as_mut() {
            listener(by_pull, expanded);
        }
    }

    fn debug_assert_invariants(&self) {
        if let (Some(min), Some(effective)) = (self.header_min_height(), self.effective_header_height())
        {
            debug_assert!(
                (-(effective - min)..=0).contains(&self.header_top),
                "header top {} outside -{}..=0",
                self.header_top,
                effective - min
            );
            debug_assert!(
                (self.header_top + min..=self.header_top + effective).contains(&self.slider_top),
                "slider top {} outside the visible header",
                self.slider_top
            );
        }
        let full = self.refresh.full_height();
        debug_assert!(
            full == 0 || (0..=full).contains(&self.refresh.height()),
            "refresh height {} outside 0..={full}",
            self.refresh.height()
        );
    }
}

impl std::fmt::Debug for SlideLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideLayout")
            .field("header_top", &self.header_top)
            .field("slider_top", &self.slider_top)
            .field("refresh_height", &self.refresh.height())
            .field("gesture", &self.last_gesture)
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../tests/slide_layout_tests.rs"]
mod tests;
