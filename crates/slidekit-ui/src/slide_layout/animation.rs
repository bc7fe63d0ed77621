use slidekit_animation::{AnimationSpec, Easing, ValueAnimator};

use super::SlideLayout;
use crate::events::SlideEvent;

const SLIDER_EASING: Easing = Easing::cubic(0.28, 0.73, 0.31, 0.98);

pub(super) enum SliderAnimationKind {
    Settle,
    /// Layout stays suspended while it runs. `on_end` runs on completion and
    /// on cancel.
    ScrollAround { on_end: Box<dyn FnOnce()> },
}

pub(super) struct SliderAnimation {
    pub(super) animator: ValueAnimator,
    kind: SliderAnimationKind,
}

impl SlideLayout {
    fn slider_spec(&self, duration_ms: u64) -> AnimationSpec {
        AnimationSpec::tween(duration_ms, SLIDER_EASING)
    }

    pub(super) fn animate_slider(&mut self, top: i32) {
        let Some(current) = self.slider.as_ref().map(|slider| slider.top()) else {
            return;
        };
        if top == current {
            return;
        }
        self.cancel_slider_animation();
        let mut animator =
            ValueAnimator::of_int(current, top, self.slider_spec(self.config.slider_duration_ms));
        animator.start();
        log::debug!("slider animates {current} -> {top}");
        self.slider_animation = Some(SliderAnimation {
            animator,
            kind: SliderAnimationKind::Settle,
        });
    }

    pub(super) fn animate_header(&mut self, top: i32) {
        let Some(current) = self.header.as_ref().map(|header| header.top()) else {
            return;
        };
        if top == current {
            return;
        }
        self.cancel_header_animation();
        let mut animator =
            ValueAnimator::of_int(current, top, self.slider_spec(self.config.slider_duration_ms));
        animator.start();
        log::debug!("header animates {current} -> {top}");
        self.header_animation = Some(animator);
    }

    /// Bounces the slider up by `distance` and back, as a hint that it can be
    /// dragged. Layout passes are ignored while it runs.
    pub fn scroll_around_slider(&mut self, distance: i32, on_end: impl FnOnce() + 'static) {
        self.cancel_slider_animation();
        let Some(start) = self.slider.as_ref().map(|slider| slider.top()) else {
            return;
        };
        let mut animator = ValueAnimator::of_keyframes(
            &[start, start - distance, start],
            self.slider_spec(self.config.scroll_around_duration_ms),
        );
        if animator.start() {
            self.layout_suspended = true;
        }
        self.slider_animation = Some(SliderAnimation {
            animator,
            kind: SliderAnimationKind::ScrollAround {
                on_end: Box::new(on_end),
            },
        });
    }

    pub(super) fn cancel_header_animation(&mut self) {
        if let Some(mut animator) = self.header_animation.take() {
            animator.cancel();
        }
    }

    pub(super) fn cancel_slider_animation(&mut self) {
        if let Some(mut animation) = self.slider_animation.take() {
            if animation.animator.cancel() {
                self.finish_slider_animation(animation.kind);
            }
        }
    }

    pub(super) fn step_header_animation(&mut self, frame_time_nanos: u64) {
        let Some(frame) = self
            .header_animation
            .as_mut()
            .and_then(|animator| animator.step(frame_time_nanos))
        else {
            return;
        };
        self.change_header_top(frame.value, false);
        self.sync_slider_with_header();
        if frame.finished {
            self.header_animation = None;
        }
    }

    pub(super) fn step_slider_animation(&mut self, frame_time_nanos: u64) {
        let Some(frame) = self
            .slider_animation
            .as_mut()
            .and_then(|animation| animation.animator.step(frame_time_nanos))
        else {
            return;
        };
        self.change_slider_top(frame.value, false);
        if frame.finished {
            if let Some(animation) = self.slider_animation.take() {
                self.finish_slider_animation(animation.kind);
            }
        }
    }

    fn finish_slider_animation(&mut self, kind: SliderAnimationKind) {
        if let SliderAnimationKind::ScrollAround { on_end } = kind {
            on_end();
            self.layout_suspended = false;
            self.observers.emit(SlideEvent::LayoutRequested);
        }
    }
}
