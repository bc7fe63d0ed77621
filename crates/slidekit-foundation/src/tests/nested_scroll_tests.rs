use super::*;

/// Parent that consumes half of every pre-scroll and all of every post-scroll,
/// tracking sessions the way a real coordinator does.
#[derive(Default)]
struct RecordingParent {
    sessions: ScrollSessions,
    refuse: bool,
    intercept_fling: bool,
    calls: Vec<String>,
}

impl NestedScrollParent for RecordingParent {
    fn on_start_nested_scroll(
        &mut self,
        target: &dyn ScrollTarget,
        axes: ScrollAxes,
        kind: ScrollKind,
    ) -> bool {
        self.calls.push(format!("start {} {kind:?}", target.id()));
        !self.refuse && axes.contains(ScrollAxes::VERTICAL)
    }

    fn on_nested_scroll_accepted(
        &mut self,
        target: &dyn ScrollTarget,
        _axes: ScrollAxes,
        kind: ScrollKind,
    ) {
        self.sessions.accept(target.id(), kind);
    }

    fn on_stop_nested_scroll(&mut self, target: &dyn ScrollTarget, kind: ScrollKind) {
        self.calls.push(format!("stop {} {kind:?}", target.id()));
        self.sessions.stop(target.id(), kind);
    }

    fn on_nested_pre_scroll(
        &mut self,
        _target: &dyn ScrollTarget,
        _dx: i32,
        dy: i32,
        _kind: ScrollKind,
    ) -> ScrollOffset {
        ScrollOffset::vertical(dy / 2)
    }

    fn on_nested_scroll(
        &mut self,
        _target: &dyn ScrollTarget,
        _consumed: ScrollOffset,
        unconsumed: ScrollOffset,
        _kind: ScrollKind,
    ) -> ScrollOffset {
        unconsumed
    }

    fn on_nested_pre_fling(&mut self, _target: &dyn ScrollTarget, _vx: f32, _vy: f32) -> bool {
        self.intercept_fling
    }

    fn on_nested_fling(
        &mut self,
        _target: &dyn ScrollTarget,
        _vx: f32,
        _vy: f32,
        consumed: bool,
    ) -> bool {
        !consumed
    }

    fn is_nested_scroll_active(&self, target: TargetId, kind: ScrollKind) -> bool {
        self.sessions.is_active(target, kind)
    }
}

const BAR: StaticTarget = StaticTarget::new(7, SlideChildType::Bar);

#[test]
fn axes_flags_combine() {
    let mut axes = ScrollAxes::NONE;
    assert!(axes.is_empty());
    axes |= ScrollAxes::VERTICAL;
    assert!(axes.contains(ScrollAxes::VERTICAL));
    assert!(!axes.contains(ScrollAxes::HORIZONTAL));
    let both = ScrollAxes::HORIZONTAL | ScrollAxes::VERTICAL;
    assert!(both.contains(axes));
    assert_eq!(both.bits(), 0b11);
}

#[test]
fn helper_dispatches_only_inside_a_session() {
    let mut parent = RecordingParent::default();
    let mut helper = NestedScrollChildHelper::new(BAR.id);

    assert_eq!(
        helper.dispatch_nested_pre_scroll(&mut parent, &BAR, 0, 10, ScrollKind::Touch),
        None
    );
    assert!(helper.start_nested_scroll(&mut parent, &BAR, ScrollAxes::VERTICAL, ScrollKind::Touch));
    assert!(helper.has_nested_scrolling_parent(ScrollKind::Touch));
    assert_eq!(
        helper.dispatch_nested_pre_scroll(&mut parent, &BAR, 0, 10, ScrollKind::Touch),
        Some(ScrollOffset::vertical(5))
    );
    assert_eq!(
        helper.dispatch_nested_scroll(
            &mut parent,
            &BAR,
            ScrollOffset::ZERO,
            ScrollOffset::vertical(-3),
            ScrollKind::Touch
        ),
        Some(ScrollOffset::vertical(-3))
    );

    helper.stop_nested_scroll(&mut parent, &BAR, ScrollKind::Touch);
    assert!(!helper.has_nested_scrolling_parent(ScrollKind::Touch));
    assert!(parent.sessions.is_idle());
}

#[test]
fn start_is_not_repeated_for_an_open_session() {
    let mut parent = RecordingParent::default();
    let mut helper = NestedScrollChildHelper::new(BAR.id);
    assert!(helper.start_nested_scroll(&mut parent, &BAR, ScrollAxes::VERTICAL, ScrollKind::Touch));
    assert!(helper.start_nested_scroll(&mut parent, &BAR, ScrollAxes::VERTICAL, ScrollKind::Touch));
    assert_eq!(parent.calls, vec!["start 7 Touch".to_string()]);
}

#[test]
fn refused_or_disabled_sessions_never_open() {
    let mut parent = RecordingParent {
        refuse: true,
        ..Default::default()
    };
    let mut helper = NestedScrollChildHelper::new(BAR.id);
    assert!(!helper.start_nested_scroll(&mut parent, &BAR, ScrollAxes::VERTICAL, ScrollKind::Touch));

    let mut parent = RecordingParent::default();
    helper.set_nested_scrolling_enabled(false);
    assert!(!helper.start_nested_scroll(&mut parent, &BAR, ScrollAxes::VERTICAL, ScrollKind::Touch));
    assert!(parent.calls.is_empty());

    helper.set_nested_scrolling_enabled(true);
    assert!(!helper.start_nested_scroll(
        &mut parent,
        &BAR,
        ScrollAxes::HORIZONTAL,
        ScrollKind::Touch
    ));
}

#[test]
fn parent_revocation_closes_the_child_session() {
    let mut parent = RecordingParent::default();
    let mut helper = NestedScrollChildHelper::new(BAR.id);
    assert!(helper.start_nested_scroll(
        &mut parent,
        &BAR,
        ScrollAxes::VERTICAL,
        ScrollKind::Simulated
    ));

    assert_eq!(parent.sessions.revoke_simulated(), Some(BAR.id));
    assert!(!helper.sync_with_parent(&parent, ScrollKind::Simulated));
    assert_eq!(
        helper.dispatch_nested_scroll(
            &mut parent,
            &BAR,
            ScrollOffset::ZERO,
            ScrollOffset::vertical(4),
            ScrollKind::Simulated
        ),
        None
    );
    // Already closed on the parent side, so no stop callback is sent.
    helper.stop_nested_scroll(&mut parent, &BAR, ScrollKind::Simulated);
    assert!(!parent.calls.iter().any(|call| call.starts_with("stop")));
}

#[test]
fn flings_need_an_open_session() {
    let mut parent = RecordingParent {
        intercept_fling: true,
        ..Default::default()
    };
    let mut helper = NestedScrollChildHelper::new(BAR.id);
    assert!(!helper.dispatch_nested_pre_fling(&mut parent, &BAR, 0.0, 100.0));

    helper.start_nested_scroll(&mut parent, &BAR, ScrollAxes::VERTICAL, ScrollKind::Touch);
    assert!(helper.dispatch_nested_pre_fling(&mut parent, &BAR, 0.0, 100.0));
    assert!(helper.dispatch_nested_fling(&mut parent, &BAR, 0.0, 100.0, false));
    assert!(!helper.dispatch_nested_fling(&mut parent, &BAR, 0.0, 100.0, true));
}

#[test]
fn accepting_any_session_revokes_the_simulated_one() {
    let mut sessions = ScrollSessions::new();
    assert_eq!(sessions.accept(1, ScrollKind::Simulated), None);
    assert!(sessions.is_active(1, ScrollKind::Simulated));

    assert_eq!(sessions.accept(2, ScrollKind::Touch), Some(1));
    assert!(!sessions.is_active(1, ScrollKind::Simulated));
    assert_eq!(sessions.active(ScrollKind::Touch), Some(2));

    assert_eq!(sessions.accept(3, ScrollKind::Simulated), None);
    assert_eq!(sessions.accept(4, ScrollKind::Simulated), Some(3));
    assert_eq!(sessions.active(ScrollKind::Simulated), Some(4));
}

#[test]
fn stale_stops_are_ignored() {
    let mut sessions = ScrollSessions::new();
    sessions.accept(1, ScrollKind::Simulated);
    sessions.accept(2, ScrollKind::Simulated);

    assert!(!sessions.stop(1, ScrollKind::Simulated));
    assert!(sessions.is_active(2, ScrollKind::Simulated));
    assert!(sessions.stop(2, ScrollKind::Simulated));
    assert!(sessions.is_idle());
}
