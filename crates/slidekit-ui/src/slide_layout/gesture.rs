use slidekit_foundation::{ScrollTarget, SlideChildType};

use super::SlideLayout;
use crate::events::SlideEvent;

/// Which region a delta belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlideGesture {
    /// The header scrolls, the slider follows its bottom.
    Scroll,
    /// The slider slides over a resting header.
    Slide,
    /// The refresh indicator is pulled.
    Refresh,
}

/// A target of `child_type` that is already at its top.
fn is_at_top(target: Option<&dyn ScrollTarget>, child_type: SlideChildType) -> bool {
    target.is_some_and(|target| {
        target.child_type() == child_type && !target.can_scroll_vertically(-1)
    })
}

impl SlideLayout {
    /// Classifies a delta from `target` and applies the side effects of a
    /// class change.
    pub(super) fn gesture(&mut self, target: Option<&dyn ScrollTarget>, dy: i32) -> SlideGesture {
        let gesture = self.classify(target, dy);
        if self.last_gesture != Some(gesture) {
            self.on_gesture_changed(gesture);
        }
        gesture
    }

    /// Pure classification, without side effects.
    pub fn classify(&self, target: Option<&dyn ScrollTarget>, dy: i32) -> SlideGesture {
        if self.refresh.is_visible() {
            return SlideGesture::Refresh;
        }
        if self.header_top < 0 {
            return if self.can_refresh_by_slider(target, dy) {
                SlideGesture::Refresh
            } else {
                SlideGesture::Scroll
            };
        }
        if self.slider_top < self.effective_header_height().unwrap_or(0) {
            return if self.can_refresh_by_slider(target, dy) {
                SlideGesture::Refresh
            } else {
                SlideGesture::Slide
            };
        }

        // Header and slider at rest.
        let pull_down = dy < 0;
        if let Some(content) = self.header_content.as_deref() {
            // A header list that can still scroll up keeps the pull-down.
            if !content.can_scroll_vertically(1) {
                return if !content.can_scroll_vertically(-1) && pull_down {
                    SlideGesture::Refresh
                } else {
                    SlideGesture::Scroll
                };
            }
        }
        let content_at_top = self
            .header_content
            .as_deref()
            .map_or(true, |content| !content.can_scroll_vertically(-1));
        let target_at_top = is_at_top(target, SlideChildType::Slider)
            || is_at_top(target, SlideChildType::Header);
        if !self.config.disable_slider_refresh
            && target_at_top
            && content_at_top
            && pull_down
        {
            SlideGesture::Refresh
        } else {
            SlideGesture::Slide
        }
    }

    fn can_refresh_by_slider(&self, target: Option<&dyn ScrollTarget>, dy: i32) -> bool {
        !self.config.disable_slider_refresh
            && is_at_top(target, SlideChildType::Slider)
            && self.is_slider_expanded()
            && dy < 0
    }

    pub(super) fn is_unexpanded_slider(&self, target: &dyn ScrollTarget) -> bool {
        target.child_type() == SlideChildType::Slider && !self.is_slider_expanded()
    }

    fn on_gesture_changed(&mut self, gesture: SlideGesture) {
        match self.last_gesture {
            Some(SlideGesture::Refresh) => self.slider_offset_when_refresh = 0,
            Some(SlideGesture::Scroll) => self.cancel_header_animation(),
            Some(SlideGesture::Slide) => self.cancel_slider_animation(),
            None => {}
        }
        let refresh = gesture == SlideGesture::Refresh;
        let content_at_bottom = self
            .header_content
            .as_deref()
            .is_some_and(|content| !content.can_scroll_vertically(1));
        if refresh && (self.is_slider_expanded() || content_at_bottom) {
            self.slider_offset_when_refresh = self.slider_top - self.header_top;
        }

        let visible = !(refresh && self.is_slider_expanded());
        if let Some(header) = self.header.as_mut() {
            header.set_visible(visible);
        }
        if self.header_visible != visible {
            self.header_visible = visible;
            self.observers.emit(SlideEvent::HeaderVisibilityChanged(visible));
        }
        log::debug!("gesture {:?} -> {gesture:?}", self.last_gesture);
        self.last_gesture = Some(gesture);
    }
}
