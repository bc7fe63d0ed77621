//! Nested scroll parent side of [`SlideLayout`].

use slidekit_foundation::{
    NestedScrollParent, ScrollAxes, ScrollKind, ScrollOffset, ScrollTarget, SlideChildType,
    TargetId,
};

use super::{SlideGesture, SlideLayout};

/// Upper bound on how often one delta is re-routed after the gesture class
/// changed under it.
const MAX_ROUTING_PASSES: usize = 8;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pre,
    Post,
}

impl SlideLayout {
    /// Routes `dy` until it is used up or the gesture class stops changing.
    /// Returns the consumed part.
    fn route(&mut self, target: &dyn ScrollTarget, dy: i32, kind: ScrollKind, phase: Phase) -> i32 {
        let mut remaining = dy;
        let mut consumed_total = 0;
        let mut gesture = self.gesture(Some(target), remaining);
        for _ in 0..MAX_ROUTING_PASSES {
            if remaining == 0 {
                break;
            }
            let consumed = match gesture {
                SlideGesture::Refresh => self.scroll_refresh(remaining, kind),
                SlideGesture::Scroll => {
                    let routed = match phase {
                        Phase::Pre => {
                            let slider_scroll_up =
                                remaining > 0 && target.child_type() == SlideChildType::Slider;
                            let header_scroll_down =
                                remaining < 0 && target.child_type() == SlideChildType::Header;
                            slider_scroll_up || header_scroll_down
                        }
                        Phase::Post => true,
                    };
                    if routed {
                        self.scroll_header(remaining)
                    } else {
                        0
                    }
                }
                SlideGesture::Slide => {
                    let routed = kind == ScrollKind::Touch
                        && match phase {
                            Phase::Pre => self.is_unexpanded_slider(target),
                            Phase::Post => matches!(
                                target.child_type(),
                                SlideChildType::Bar | SlideChildType::Slider
                            ),
                        };
                    if routed {
                        self.scroll_slider(remaining)
                    } else {
                        0
                    }
                }
            };
            log::trace!("{gesture:?} took {consumed} of {remaining} from target {}", target.id());
            remaining -= consumed;
            consumed_total += consumed;
            let next = self.gesture(Some(target), remaining);
            if next == gesture {
                break;
            }
            gesture = next;
        }
        self.debug_assert_invariants();
        consumed_total
    }

    fn scroll_refresh(&mut self, dy: i32, kind: ScrollKind) -> i32 {
        let consumed = self.refresh.on_scroll(dy, kind);
        self.sync_refresh_height();
        consumed
    }

    /// Scrolls the header and drags the slider along with its bottom.
    fn scroll_header(&mut self, dy: i32) -> i32 {
        let (Some(min), Some(effective)) = (self.header_min_height(), self.effective_header_height())
        else {
            return 0;
        };
        if effective <= 0 {
            return 0;
        }
        let Some(current) = self.header.as_ref().map(|header| header.top()) else {
            return 0;
        };
        let top = (current - dy).clamp(-(effective - min), 0);
        self.change_header_top(top, false);
        self.sync_slider_with_header();
        current - top
    }

    fn scroll_slider(&mut self, dy: i32) -> i32 {
        let Some(range) = self.header_range().filter(|range| *range.end() > 0) else {
            return 0;
        };
        let Some(current) = self.slider.as_ref().map(|slider| slider.top()) else {
            return 0;
        };
        let top = (current - dy).clamp(*range.start(), *range.end());
        self.change_slider_top(top, false);
        current - top
    }

    /// Stops a simulated session that ran into the boundary in its travel
    /// direction.
    fn try_stop_simulated(&mut self, gesture: SlideGesture, target: &dyn ScrollTarget, dy: i32) -> bool {
        let stop = match gesture {
            SlideGesture::Refresh => self.refresh.can_stop_simulated(dy),
            SlideGesture::Scroll => {
                if dy < 0 {
                    self.header_top >= 0
                } else if dy > 0 {
                    match (self.header_min_height(), self.effective_header_height()) {
                        (Some(min), Some(effective)) => self.header_top <= -(effective - min),
                        _ => false,
                    }
                } else {
                    false
                }
            }
            SlideGesture::Slide => true,
        };
        if stop && self.sessions.stop(target.id(), ScrollKind::Simulated) {
            log::debug!("stopped simulated scroll of target {} in {gesture:?}", target.id());
            self.on_session_stopped(Some(target));
        }
        stop
    }

    /// Settles whatever the last session left behind once no session is
    /// open anymore.
    pub(super) fn on_session_stopped(&mut self, target: Option<&dyn ScrollTarget>) {
        if !self.sessions.is_idle() {
            return;
        }
        match self.gesture(target, 0) {
            SlideGesture::Refresh => {
                let started = self.refresh.on_stop_scroll();
                self.sync_refresh_height();
                if let Some(by_pull) = started {
                    self.notify_refresh(by_pull);
                }
            }
            SlideGesture::Slide => self.settle_slider(),
            SlideGesture::Scroll => {}
        }
    }

    /// Fast releases settle in the fling direction, slow ones at the closer
    /// bound.
    fn settle_slider(&mut self) {
        let Some(range) = self.header_range() else {
            return;
        };
        let (first, last) = (*range.start(), *range.end());
        let velocity = self.slider_velocity;
        if velocity.abs() > self.config.fling_slop {
            self.animate_slider(if velocity > 0.0 { first } else { last });
        } else if last > 0 {
            let target = if self.slider_top - first < last - self.slider_top {
                first
            } else {
                last
            };
            self.animate_slider(target);
        }
    }
}

impl NestedScrollParent for SlideLayout {
    fn on_start_nested_scroll(
        &mut self,
        target: &dyn ScrollTarget,
        axes: ScrollAxes,
        _kind: ScrollKind,
    ) -> bool {
        match self.gesture(Some(target), 0) {
            SlideGesture::Refresh => self.refresh.on_start_scroll(),
            SlideGesture::Scroll => self.cancel_header_animation(),
            SlideGesture::Slide => {
                if target.child_type() == SlideChildType::Bar || self.is_unexpanded_slider(target) {
                    self.cancel_slider_animation();
                }
            }
        }
        self.slider_velocity = 0.0;
        axes.contains(ScrollAxes::VERTICAL)
    }

    fn on_nested_scroll_accepted(
        &mut self,
        target: &dyn ScrollTarget,
        _axes: ScrollAxes,
        kind: ScrollKind,
    ) {
        if self.sessions.accept(target.id(), kind).is_some() {
            self.on_session_stopped(None);
        }
    }

    fn on_stop_nested_scroll(&mut self, target: &dyn ScrollTarget, kind: ScrollKind) {
        if self.sessions.stop(target.id(), kind) {
            self.on_session_stopped(Some(target));
        }
    }

    fn on_nested_pre_scroll(
        &mut self,
        target: &dyn ScrollTarget,
        _dx: i32,
        dy: i32,
        kind: ScrollKind,
    ) -> ScrollOffset {
        ScrollOffset::vertical(self.route(target, dy, kind, Phase::Pre))
    }

    fn on_nested_scroll(
        &mut self,
        target: &dyn ScrollTarget,
        _consumed: ScrollOffset,
        unconsumed: ScrollOffset,
        kind: ScrollKind,
    ) -> ScrollOffset {
        let dy = unconsumed.y;
        if kind == ScrollKind::Simulated {
            let gesture = self.gesture(Some(target), dy);
            if self.try_stop_simulated(gesture, target, dy) {
                return ScrollOffset::ZERO;
            }
        }
        ScrollOffset::vertical(self.route(target, dy, kind, Phase::Post))
    }

    fn on_nested_pre_fling(&mut self, target: &dyn ScrollTarget, _vx: f32, vy: f32) -> bool {
        let captures = self.gesture(Some(target), 0) == SlideGesture::Slide
            && (target.child_type() == SlideChildType::Bar || self.is_unexpanded_slider(target));
        if captures {
            self.slider_velocity = vy;
        }
        captures
    }

    fn on_nested_fling(
        &mut self,
        target: &dyn ScrollTarget,
        _vx: f32,
        vy: f32,
        _consumed: bool,
    ) -> bool {
        let captures = self.gesture(Some(target), 0) == SlideGesture::Slide
            && target.child_type() == SlideChildType::Slider;
        if captures {
            self.slider_velocity = vy;
        }
        captures
    }

    fn is_nested_scroll_active(&self, target: TargetId, kind: ScrollKind) -> bool {
        self.sessions.is_active(target, kind)
    }
}
