//! Nested scroll delegation between a coordinating parent and scrollable
//! children.
//!
//! A child that wants to scroll first starts a session with its parent, then
//! offers every delta to the parent before consuming it (pre-scroll) and
//! offers back whatever it left unconsumed (post-scroll). Flings go through
//! the same two phases. Sessions come in two kinds: [`ScrollKind::Touch`],
//! driven by a pointer, and [`ScrollKind::Simulated`], driven by a fling.
//!
//! Sign convention: a positive `dy` moves content up (the finger moves up),
//! a negative `dy` is a pull-down.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Stable identity of a scroll participant.
pub type TargetId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollKind {
    /// Pointer-driven scrolling.
    Touch,
    /// Scrolling produced by a fling simulation.
    Simulated,
}

/// Role a scroll participant plays inside a slide layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlideChildType {
    /// Scrollable content hosted in the header.
    Header,
    /// The drag handle on top of the slider.
    Bar,
    /// Scrollable content hosted in the slider.
    Slider,
    /// Anything else.
    Content,
}

/// Axes a nested scroll session covers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScrollAxes(u8);

impl ScrollAxes {
    pub const NONE: Self = Self(0);
    pub const HORIZONTAL: Self = Self(1 << 0);
    pub const VERTICAL: Self = Self(1 << 1);

    /// Returns whether all bits in `other` are present in `self`.
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for ScrollAxes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ScrollAxes {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl fmt::Debug for ScrollAxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAxes")
            .field("horizontal", &self.contains(Self::HORIZONTAL))
            .field("vertical", &self.contains(Self::VERTICAL))
            .finish()
    }
}

/// Integer scroll amounts on both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub x: i32,
    pub y: i32,
}

impl ScrollOffset {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn vertical(y: i32) -> Self {
        Self { x: 0, y }
    }
}

/// A participant in nested scrolling, as seen by the parent.
///
/// Queries must be free of side effects; the parent may ask repeatedly while
/// classifying a single delta.
pub trait ScrollTarget {
    fn id(&self) -> TargetId;

    fn child_type(&self) -> SlideChildType;

    /// Whether the target can scroll its own content further in `direction`.
    /// Negative checks scrolling up (towards the start), positive down.
    fn can_scroll_vertically(&self, direction: i32) -> bool;
}

/// A scroll target that never scrolls its own content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticTarget {
    pub id: TargetId,
    pub child_type: SlideChildType,
}

impl StaticTarget {
    pub const fn new(id: TargetId, child_type: SlideChildType) -> Self {
        Self { id, child_type }
    }
}

impl ScrollTarget for StaticTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn child_type(&self) -> SlideChildType {
        self.child_type
    }

    fn can_scroll_vertically(&self, _direction: i32) -> bool {
        false
    }
}

/// Parent side of the delegation protocol.
pub trait NestedScrollParent {
    /// Offered when a child starts scrolling. Returning `true` claims the
    /// session.
    fn on_start_nested_scroll(
        &mut self,
        target: &dyn ScrollTarget,
        axes: ScrollAxes,
        kind: ScrollKind,
    ) -> bool;

    /// Called right after `on_start_nested_scroll` returned `true`.
    fn on_nested_scroll_accepted(
        &mut self,
        target: &dyn ScrollTarget,
        axes: ScrollAxes,
        kind: ScrollKind,
    );

    fn on_stop_nested_scroll(&mut self, target: &dyn ScrollTarget, kind: ScrollKind);

    /// First refusal on a delta. Returns the part the parent consumed.
    fn on_nested_pre_scroll(
        &mut self,
        target: &dyn ScrollTarget,
        dx: i32,
        dy: i32,
        kind: ScrollKind,
    ) -> ScrollOffset;

    /// Offers the delta the child left unconsumed. Returns the part the
    /// parent consumed.
    fn on_nested_scroll(
        &mut self,
        target: &dyn ScrollTarget,
        consumed: ScrollOffset,
        unconsumed: ScrollOffset,
        kind: ScrollKind,
    ) -> ScrollOffset;

    /// Returns `true` to take the fling over from the child.
    fn on_nested_pre_fling(&mut self, target: &dyn ScrollTarget, vx: f32, vy: f32) -> bool;

    /// Returns `true` if the parent handled the fling.
    fn on_nested_fling(
        &mut self,
        target: &dyn ScrollTarget,
        vx: f32,
        vy: f32,
        consumed: bool,
    ) -> bool;

    /// Whether the parent still considers the session of `target` alive.
    ///
    /// A parent may revoke a session on its own, for example when a new
    /// session replaces a running fling. Children consult this before
    /// driving the next simulated frame.
    fn is_nested_scroll_active(&self, target: TargetId, kind: ScrollKind) -> bool;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct ActiveKinds {
    touch: bool,
    simulated: bool,
}

impl ActiveKinds {
    fn get(&self, kind: ScrollKind) -> bool {
        match kind {
            ScrollKind::Touch => self.touch,
            ScrollKind::Simulated => self.simulated,
        }
    }

    fn set(&mut self, kind: ScrollKind, active: bool) {
        match kind {
            ScrollKind::Touch => self.touch = active,
            ScrollKind::Simulated => self.simulated = active,
        }
    }
}

/// Child side bookkeeping of the delegation protocol.
///
/// Tracks which session kinds are open with the parent and refuses to
/// dispatch for kinds that are not.
#[derive(Clone, Debug)]
pub struct NestedScrollChildHelper {
    target: TargetId,
    enabled: bool,
    active: ActiveKinds,
}

impl NestedScrollChildHelper {
    pub fn new(target: TargetId) -> Self {
        Self {
            target,
            enabled: true,
            active: ActiveKinds::default(),
        }
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn is_nested_scrolling_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_nested_scrolling_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn has_nested_scrolling_parent(&self, kind: ScrollKind) -> bool {
        self.active.get(kind)
    }

    /// Drops a session the parent revoked. Returns whether the session is
    /// still open.
    pub fn sync_with_parent(&mut self, parent: &dyn NestedScrollParent, kind: ScrollKind) -> bool {
        if self.active.get(kind) && !parent.is_nested_scroll_active(self.target, kind) {
            log::debug!("target {}: {kind:?} session revoked by parent", self.target);
            self.active.set(kind, false);
        }
        self.active.get(kind)
    }

    pub fn start_nested_scroll(
        &mut self,
        parent: &mut dyn NestedScrollParent,
        child: &dyn ScrollTarget,
        axes: ScrollAxes,
        kind: ScrollKind,
    ) -> bool {
        debug_assert_eq!(child.id(), self.target);
        if self.sync_with_parent(parent, kind) {
            return true;
        }
        if !self.enabled {
            return false;
        }
        if parent.on_start_nested_scroll(child, axes, kind) {
            parent.on_nested_scroll_accepted(child, axes, kind);
            self.active.set(kind, true);
            return true;
        }
        false
    }

    pub fn stop_nested_scroll(
        &mut self,
        parent: &mut dyn NestedScrollParent,
        child: &dyn ScrollTarget,
        kind: ScrollKind,
    ) {
        if self.active.get(kind) {
            self.active.set(kind, false);
            parent.on_stop_nested_scroll(child, kind);
        }
    }

    /// Returns what the parent consumed, or `None` when no session of
    /// `kind` is open or the delta is empty.
    pub fn dispatch_nested_pre_scroll(
        &mut self,
        parent: &mut dyn NestedScrollParent,
        child: &dyn ScrollTarget,
        dx: i32,
        dy: i32,
        kind: ScrollKind,
    ) -> Option<ScrollOffset> {
        if !self.enabled || !self.sync_with_parent(parent, kind) || (dx == 0 && dy == 0) {
            return None;
        }
        Some(parent.on_nested_pre_scroll(child, dx, dy, kind))
    }

    /// Returns what the parent consumed, or `None` when nothing was
    /// dispatched.
    pub fn dispatch_nested_scroll(
        &mut self,
        parent: &mut dyn NestedScrollParent,
        child: &dyn ScrollTarget,
        consumed: ScrollOffset,
        unconsumed: ScrollOffset,
        kind: ScrollKind,
    ) -> Option<ScrollOffset> {
        if !self.enabled || !self.sync_with_parent(parent, kind) {
            return None;
        }
        if consumed == ScrollOffset::ZERO && unconsumed == ScrollOffset::ZERO {
            return None;
        }
        Some(parent.on_nested_scroll(child, consumed, unconsumed, kind))
    }

    /// Flings are offered while any session is open.
    pub fn dispatch_nested_pre_fling(
        &mut self,
        parent: &mut dyn NestedScrollParent,
        child: &dyn ScrollTarget,
        vx: f32,
        vy: f32,
    ) -> bool {
        if !self.enabled || !self.has_any_session(parent) {
            return false;
        }
        parent.on_nested_pre_fling(child, vx, vy)
    }

    pub fn dispatch_nested_fling(
        &mut self,
        parent: &mut dyn NestedScrollParent,
        child: &dyn ScrollTarget,
        vx: f32,
        vy: f32,
        consumed: bool,
    ) -> bool {
        if !self.enabled || !self.has_any_session(parent) {
            return false;
        }
        parent.on_nested_fling(child, vx, vy, consumed)
    }

    fn has_any_session(&mut self, parent: &dyn NestedScrollParent) -> bool {
        let touch = self.sync_with_parent(parent, ScrollKind::Touch);
        let simulated = self.sync_with_parent(parent, ScrollKind::Simulated);
        touch || simulated
    }
}

/// Parent side registry of open sessions.
///
/// Holds non-owning target ids. At most one touch and one simulated session
/// exist at a time, and accepting any session revokes the running simulated
/// one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollSessions {
    touch: Option<TargetId>,
    simulated: Option<TargetId>,
}

impl ScrollSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new session and returns the simulated session it revoked.
    pub fn accept(&mut self, target: TargetId, kind: ScrollKind) -> Option<TargetId> {
        let revoked = self.simulated.take();
        match kind {
            ScrollKind::Touch => self.touch = Some(target),
            ScrollKind::Simulated => self.simulated = Some(target),
        }
        if let Some(revoked) = revoked {
            log::debug!("simulated session of target {revoked} revoked by {kind:?} target {target}");
        }
        revoked
    }

    /// Ends the session of `target`. Returns `false` if it was not open.
    pub fn stop(&mut self, target: TargetId, kind: ScrollKind) -> bool {
        let slot = self.slot_mut(kind);
        if *slot == Some(target) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Ends the running simulated session, whoever owns it.
    pub fn revoke_simulated(&mut self) -> Option<TargetId> {
        self.simulated.take()
    }

    pub fn active(&self, kind: ScrollKind) -> Option<TargetId> {
        match kind {
            ScrollKind::Touch => self.touch,
            ScrollKind::Simulated => self.simulated,
        }
    }

    pub fn is_active(&self, target: TargetId, kind: ScrollKind) -> bool {
        self.active(kind) == Some(target)
    }

    pub fn is_idle(&self) -> bool {
        self.touch.is_none() && self.simulated.is_none()
    }

    fn slot_mut(&mut self, kind: ScrollKind) -> &mut Option<TargetId> {
        match kind {
            ScrollKind::Touch => &mut self.touch,
            ScrollKind::Simulated => &mut self.simulated,
        }
    }
}

#[cfg(test)]
#[path = "tests/nested_scroll_tests.rs"]
mod tests;
