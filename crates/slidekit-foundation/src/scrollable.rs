//! Generic nested scrollable content.
//!
//! Models a list or scroll view inside one of the slide regions: it owns a
//! clamped scroll offset and runs the full negotiation for every delta.

use crate::nested_scroll::{
    NestedScrollChildHelper, NestedScrollParent, ScrollAxes, ScrollKind, ScrollOffset,
    ScrollTarget, SlideChildType, TargetId,
};

/// How a single delta was split between parent and content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NestedScrollResult {
    /// Taken by the parent before the content scrolled.
    pub parent_pre: i32,
    /// Taken by the content itself.
    pub content: i32,
    /// Taken by the parent from the leftover.
    pub parent_post: i32,
    /// Claimed by nobody.
    pub unconsumed: i32,
}

impl NestedScrollResult {
    pub fn total_consumed(&self) -> i32 {
        self.parent_pre + self.content + self.parent_post
    }
}

#[derive(Clone, Copy, Debug)]
struct ContentPosition {
    id: TargetId,
    child_type: SlideChildType,
    offset: i32,
    max_offset: i32,
}

impl ScrollTarget for ContentPosition {
    fn id(&self) -> TargetId {
        self.id
    }

    fn child_type(&self) -> SlideChildType {
        self.child_type
    }

    fn can_scroll_vertically(&self, direction: i32) -> bool {
        if direction < 0 {
            self.offset > 0
        } else {
            self.offset < self.max_offset
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScrollableContent {
    position: ContentPosition,
    helper: NestedScrollChildHelper,
}

impl ScrollableContent {
    pub fn new(id: TargetId, child_type: SlideChildType, max_offset: i32) -> Self {
        Self {
            position: ContentPosition {
                id,
                child_type,
                offset: 0,
                max_offset: max_offset.max(0),
            },
            helper: NestedScrollChildHelper::new(id),
        }
    }

    pub fn target(&self) -> &dyn ScrollTarget {
        &self.position
    }

    pub fn offset(&self) -> i32 {
        self.position.offset
    }

    pub fn max_offset(&self) -> i32 {
        self.position.max_offset
    }

    pub fn set_max_offset(&mut self, max_offset: i32) {
        self.position.max_offset = max_offset.max(0);
        self.position.offset = self.position.offset.min(self.position.max_offset);
    }

    /// Jumps to `offset` without involving the parent.
    pub fn scroll_to(&mut self, offset: i32) {
        self.position.offset = offset.clamp(0, self.position.max_offset);
    }

    pub fn start_scroll(&mut self, parent: &mut dyn NestedScrollParent, kind: ScrollKind) -> bool {
        self.helper
            .start_nested_scroll(parent, &self.position, ScrollAxes::VERTICAL, kind)
    }

    pub fn stop_scroll(&mut self, parent: &mut dyn NestedScrollParent, kind: ScrollKind) {
        self.helper.stop_nested_scroll(parent, &self.position, kind);
    }

    /// Offers `dy` to the parent, consumes what is left, and hands the rest
    /// back to the parent.
    pub fn scroll_by(
        &mut self,
        parent: &mut dyn NestedScrollParent,
        dy: i32,
        kind: ScrollKind,
    ) -> NestedScrollResult {
        let parent_pre = self
            .helper
            .dispatch_nested_pre_scroll(parent, &self.position, 0, dy, kind)
            .map_or(0, |consumed| consumed.y);
        let remaining = dy - parent_pre;

        let content = self.consume(remaining);
        let leftover = remaining - content;

        let parent_post = self
            .helper
            .dispatch_nested_scroll(
                parent,
                &self.position,
                ScrollOffset::vertical(content),
                ScrollOffset::vertical(leftover),
                kind,
            )
            .map_or(0, |consumed| consumed.y);

        let result = NestedScrollResult {
            parent_pre,
            content,
            parent_post,
            unconsumed: leftover - parent_post,
        };
        log::trace!("content {} scrolled {dy}: {result:?}", self.position.id);
        result
    }

    /// Offers a release velocity to the parent. Returns `true` when the
    /// parent took it over.
    pub fn fling(&mut self, parent: &mut dyn NestedScrollParent, vy: f32) -> bool {
        if self
            .helper
            .dispatch_nested_pre_fling(parent, &self.position, 0.0, vy)
        {
            return true;
        }
        let direction = if vy > 0.0 { 1 } else { -1 };
        let can_scroll = self.position.can_scroll_vertically(direction);
        self.helper
            .dispatch_nested_fling(parent, &self.position, 0.0, vy, can_scroll)
    }

    fn consume(&mut self, dy: i32) -> i32 {
        let current = self.position.offset;
        let next = (current + dy).clamp(0, self.position.max_offset);
        self.position.offset = next;
        next - current
    }
}
