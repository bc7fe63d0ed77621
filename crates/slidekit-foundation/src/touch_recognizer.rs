//! Touch gesture recognizer for the slide bar.
//!
//! Turns raw pointer events into nested scroll traffic: drags become
//! touch-kind post-scrolls, releases become either a click or a fling that is
//! stepped frame by frame as a simulated session.

use slidekit_animation::ConstantDecelerationDecay;
use web_time::Duration;

use crate::fling::FlingSimulator;
use crate::gesture_constants::{
    dp_to_px, CLICK_TIMEOUT_MS, FLING_BOUND_DP, MAX_FLING_VELOCITY, TOUCH_SLOP,
};
use crate::nested_scroll::{
    NestedScrollChildHelper, NestedScrollParent, ScrollAxes, ScrollKind, ScrollOffset,
    SlideChildType, StaticTarget, TargetId,
};
use crate::pointer::{PointerEvent, PointerEventKind, PointerId};
use crate::velocity_tracker::VelocityTracker1D;

/// Pointer state between down and up/cancel.
struct TouchSession {
    pointer_id: PointerId,
    last_y: i32,
    velocity: VelocityTracker1D,
    down: PointerEvent,
}

impl TouchSession {
    fn new(down: PointerEvent) -> Self {
        Self {
            pointer_id: down.id,
            last_y: down.position.y as i32,
            velocity: VelocityTracker1D::new(),
            down,
        }
    }

    fn track(&mut self, event: &PointerEvent) {
        let time_ms = event.elapsed_since(&self.down).as_millis() as i64;
        self.velocity.add_data_point(time_ms, event.position.y);
    }

    fn is_click(&self, up: &PointerEvent, touch_slop: i32) -> bool {
        let slop = touch_slop as f32;
        self.down.position.distance_squared(up.position) <= slop * slop
            && up.elapsed_since(&self.down) < Duration::from_millis(CLICK_TIMEOUT_MS)
    }
}

/// Recognizer for a single interactive strip (the slide bar).
///
/// `Idle` until a pointer goes down, `Tracking` while it stays within the
/// touch slop, `Dragging` once it leaves it. Only one pointer is followed;
/// events of other pointers are ignored.
pub struct TouchGestureRecognizer {
    target: StaticTarget,
    helper: NestedScrollChildHelper,
    touch_slop: i32,
    density: f32,
    is_dragging: bool,
    session: Option<TouchSession>,
    fling: Option<FlingSimulator>,
    intercept: Option<Box<dyn FnMut() -> bool>>,
    on_click: Option<Box<dyn FnMut()>>,
}

impl TouchGestureRecognizer {
    pub fn new(id: TargetId, density: f32) -> Self {
        Self {
            target: StaticTarget::new(id, SlideChildType::Bar),
            helper: NestedScrollChildHelper::new(id),
            touch_slop: TOUCH_SLOP,
            density,
            is_dragging: false,
            session: None,
            fling: None,
            intercept: None,
            on_click: None,
        }
    }

    pub fn with_touch_slop(mut self, touch_slop: i32) -> Self {
        self.touch_slop = touch_slop.max(0);
        self
    }

    pub fn target(&self) -> StaticTarget {
        self.target
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_flinging(&self) -> bool {
        self.fling.is_some()
    }

    /// Whether the recognizer wants [`on_frame`](Self::on_frame) calls.
    pub fn needs_frame(&self) -> bool {
        self.fling.is_some()
    }

    /// Predicate consulted before anything else on the intercept path.
    /// Returning `true` steals the event stream from the bar's children.
    pub fn set_intercept_func(&mut self, intercept: impl FnMut() -> bool + 'static) {
        self.intercept = Some(Box::new(intercept));
    }

    pub fn set_on_click(&mut self, on_click: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(on_click));
    }

    /// Intercept path: watches events headed for the bar's children and
    /// returns `true` once the bar should take over the stream.
    pub fn on_intercept_touch_event(
        &mut self,
        event: &PointerEvent,
        parent: &mut dyn NestedScrollParent,
    ) -> bool {
        if let Some(intercept) = self.intercept.as_mut() {
            if intercept() {
                return true;
            }
        }
        if event.kind == PointerEventKind::Move && self.is_dragging {
            return true;
        }
        match event.kind {
            PointerEventKind::Down => self.on_touch_down(event, parent),
            PointerEventKind::Up | PointerEventKind::Cancel => {
                self.on_touch_cancel(parent);
                return self.is_dragging;
            }
            PointerEventKind::Move => {
                let y = event.position.y as i32;
                let slop = self.touch_slop;
                let crossed = self
                    .active_session(event.id)
                    .is_some_and(|session| (y - session.last_y).abs() > slop);
                if crossed {
                    self.on_drag_detected(parent);
                    if let Some(session) = self.session.as_mut() {
                        session.last_y = y;
                    }
                }
            }
        }
        if let Some(session) = self.session.as_mut() {
            session.track(event);
        }
        self.is_dragging
    }

    /// Touch path: the bar owns the stream. Returns `false` for moves of a
    /// pointer it is not following.
    pub fn on_touch_event(
        &mut self,
        event: &PointerEvent,
        parent: &mut dyn NestedScrollParent,
    ) -> bool {
        match event.kind {
            PointerEventKind::Down => self.on_touch_down(event, parent),
            PointerEventKind::Up => {
                self.on_touch_up(event, parent);
                return true;
            }
            PointerEventKind::Cancel => {
                self.on_touch_cancel(parent);
                return true;
            }
            PointerEventKind::Move => {
                let y = event.position.y as i32;
                let Some(last_y) = self.active_session(event.id).map(|session| session.last_y)
                else {
                    return false;
                };
                let mut dy = last_y - y;
                if !self.is_dragging && dy.abs() > self.touch_slop {
                    self.on_drag_detected(parent);
                    if dy > 0 {
                        dy -= self.touch_slop;
                    } else {
                        dy += self.touch_slop;
                    }
                }
                if self.is_dragging {
                    let target = self.target;
                    self.helper.dispatch_nested_scroll(
                        parent,
                        &target,
                        ScrollOffset::ZERO,
                        ScrollOffset::vertical(dy),
                        ScrollKind::Touch,
                    );
                    if let Some(session) = self.session.as_mut() {
                        session.last_y = y;
                    }
                }
            }
        }
        if let Some(session) = self.session.as_mut() {
            session.track(event);
        }
        true
    }

    /// Steps a running fling through the parent. Ends the fling when the
    /// simulator is exhausted or the parent revoked the session.
    pub fn on_frame(&mut self, frame_time_nanos: u64, parent: &mut dyn NestedScrollParent) {
        let Some(fling) = self.fling.as_mut() else {
            return;
        };
        if !self.helper.sync_with_parent(parent, ScrollKind::Simulated) {
            log::debug!("bar {}: fling stopped by parent", self.target.id);
            self.fling = None;
            return;
        }
        match fling.next_delta(frame_time_nanos) {
            Some(dy) => {
                if dy != 0 {
                    let target = self.target;
                    self.helper.dispatch_nested_scroll(
                        parent,
                        &target,
                        ScrollOffset::ZERO,
                        ScrollOffset::vertical(dy),
                        ScrollKind::Simulated,
                    );
                }
                if !self.helper.sync_with_parent(parent, ScrollKind::Simulated) {
                    log::debug!("bar {}: fling stopped by parent", self.target.id);
                    self.fling = None;
                }
            }
            None => self.on_fling_finished(parent),
        }
    }

    /// Stops a running fling and closes its session.
    pub fn stop_fling(&mut self, parent: &mut dyn NestedScrollParent) {
        if self.fling.is_some() {
            self.on_fling_finished(parent);
        }
    }

    fn active_session(&self, pointer: PointerId) -> Option<&TouchSession> {
        self.session
            .as_ref()
            .filter(|session| session.pointer_id == pointer)
    }

    fn on_touch_down(&mut self, event: &PointerEvent, parent: &mut dyn NestedScrollParent) {
        self.on_drag_finish(parent);
        self.session = Some(TouchSession::new(*event));
    }

    fn on_touch_up(&mut self, event: &PointerEvent, parent: &mut dyn NestedScrollParent) {
        if let Some(mut session) = self.session.take() {
            if session.pointer_id == event.id && session.is_click(event, self.touch_slop) {
                if let Some(on_click) = self.on_click.as_mut() {
                    on_click();
                }
            } else {
                session.track(event);
                let velocity = session
                    .velocity
                    .calculate_velocity_with_max(MAX_FLING_VELOCITY);
                let bound = dp_to_px(FLING_BOUND_DP, self.density);
                self.fling(-bound, bound, velocity, parent);
            }
        }
        self.on_touch_cancel(parent);
    }

    fn on_touch_cancel(&mut self, parent: &mut dyn NestedScrollParent) {
        self.on_drag_finish(parent);
        self.session = None;
    }

    fn on_drag_detected(&mut self, parent: &mut dyn NestedScrollParent) {
        if !self.is_dragging {
            self.is_dragging = true;
            let target = self.target;
            self.helper
                .start_nested_scroll(parent, &target, ScrollAxes::VERTICAL, ScrollKind::Touch);
            log::debug!("bar {}: drag started", target.id);
        }
    }

    fn on_drag_finish(&mut self, parent: &mut dyn NestedScrollParent) {
        if self.is_dragging {
            self.is_dragging = false;
            let target = self.target;
            self.helper
                .stop_nested_scroll(parent, &target, ScrollKind::Touch);
        }
    }

    fn fling(
        &mut self,
        min_offset: i32,
        max_offset: i32,
        velocity: f32,
        parent: &mut dyn NestedScrollParent,
    ) -> bool {
        self.fling = None;
        let decay = ConstantDecelerationDecay::with_density(self.density);
        let simulator = FlingSimulator::start(decay, velocity, min_offset..=max_offset);
        if simulator.is_finished() {
            self.on_fling_finished(parent);
            return false;
        }

        let target = self.target;
        self.helper
            .start_nested_scroll(parent, &target, ScrollAxes::VERTICAL, ScrollKind::Simulated);
        if self
            .helper
            .dispatch_nested_pre_fling(parent, &target, 0.0, -velocity)
        {
            log::debug!("bar {}: fling of {velocity} px/s taken by parent", target.id);
            self.on_fling_finished(parent);
        } else {
            log::debug!("bar {}: fling started at {velocity} px/s", target.id);
            self.fling = Some(simulator);
        }
        true
    }

    fn on_fling_finished(&mut self, parent: &mut dyn NestedScrollParent) {
        self.fling = None;
        let target = self.target;
        self.helper
            .stop_nested_scroll(parent, &target, ScrollKind::Simulated);
    }
}

#[cfg(test)]
#[path = "tests/touch_recognizer_tests.rs"]
mod tests;
