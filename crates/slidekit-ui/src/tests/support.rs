//! Fake host collaborators shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slidekit_foundation::{ScrollTarget, SlideChildType, TargetId};

use crate::refresh::RefreshIndicator;
use crate::region::RegionView;

#[derive(Debug)]
pub(crate) struct RegionState {
    pub top: Cell<i32>,
    pub height: Cell<i32>,
    pub min_height: Cell<i32>,
    pub visible: Cell<bool>,
    pub alpha: Cell<f32>,
}

/// Region whose state stays observable after it was handed to the layout.
#[derive(Clone, Debug)]
pub(crate) struct FakeRegion(pub Rc<RegionState>);

impl FakeRegion {
    pub fn new(height: i32, min_height: i32) -> Self {
        Self(Rc::new(RegionState {
            top: Cell::new(0),
            height: Cell::new(height),
            min_height: Cell::new(min_height),
            visible: Cell::new(true),
            alpha: Cell::new(1.0),
        }))
    }

    pub fn boxed(&self) -> Box<dyn RegionView> {
        Box::new(self.clone())
    }

    pub fn top(&self) -> i32 {
        self.0.top.get()
    }
}

impl RegionView for FakeRegion {
    fn top(&self) -> i32 {
        self.0.top.get()
    }

    fn height(&self) -> i32 {
        self.0.height.get()
    }

    fn min_height(&self) -> i32 {
        self.0.min_height.get()
    }

    fn measure_height(&mut self, _width: i32, max_height: i32) -> i32 {
        self.0.height.get().min(max_height)
    }

    fn offset_top_and_bottom(&mut self, delta: i32) {
        self.0.top.set(self.0.top.get() + delta);
    }

    fn set_visible(&mut self, visible: bool) {
        self.0.visible.set(visible);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.0.alpha.set(alpha);
    }
}

#[derive(Debug, Default)]
pub(crate) struct IndicatorState {
    pub can_drag: Cell<bool>,
    pub can_refresh: Cell<bool>,
    pub loading: Cell<bool>,
    pub restore: Cell<bool>,
    pub fraction: Cell<Option<f32>>,
    pub visible_height: Cell<i32>,
    pub calls: RefCell<Vec<&'static str>>,
}

/// Indicator that can drag and refresh until it starts loading.
#[derive(Clone, Debug)]
pub(crate) struct FakeIndicator(pub Rc<IndicatorState>);

impl FakeIndicator {
    pub fn new() -> Self {
        let state = IndicatorState::default();
        state.can_drag.set(true);
        state.can_refresh.set(true);
        Self(Rc::new(state))
    }

    pub fn boxed(&self) -> Box<dyn RefreshIndicator> {
        Box::new(self.clone())
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.0.calls.borrow().clone()
    }
}

impl RefreshIndicator for FakeIndicator {
    fn can_drag(&self) -> bool {
        self.0.can_drag.get()
    }

    fn can_refresh(&self) -> bool {
        self.0.can_refresh.get()
    }

    fn is_loading(&self) -> bool {
        self.0.loading.get()
    }

    fn is_restore(&self) -> bool {
        self.0.restore.get()
    }

    fn update_dragging(&mut self, fraction: f32) {
        self.0.fraction.set(Some(fraction));
    }

    fn start_loading(&mut self) {
        self.0.calls.borrow_mut().push("start_loading");
        self.0.can_drag.set(false);
        self.0.loading.set(true);
    }

    fn restore(&mut self) {
        self.0.calls.borrow_mut().push("restore");
    }

    fn reset(&mut self) {
        self.0.calls.borrow_mut().push("reset");
        self.0.can_drag.set(true);
        self.0.loading.set(false);
    }

    fn update_visible_height(&mut self, height: i32) {
        self.0.visible_height.set(height);
    }
}

/// Scroll target with a fixed capability in each direction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FakeTarget {
    pub id: TargetId,
    pub child_type: SlideChildType,
    pub can_scroll_up: bool,
    pub can_scroll_down: bool,
}

impl FakeTarget {
    pub const fn at_rest(id: TargetId, child_type: SlideChildType) -> Self {
        Self {
            id,
            child_type,
            can_scroll_up: false,
            can_scroll_down: true,
        }
    }
}

impl ScrollTarget for FakeTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn child_type(&self) -> SlideChildType {
        self.child_type
    }

    fn can_scroll_vertically(&self, direction: i32) -> bool {
        if direction < 0 {
            self.can_scroll_up
        } else {
            self.can_scroll_down
        }
    }
}

/// Target whose capability the test can change after handing it out.
#[derive(Clone, Debug)]
pub(crate) struct SharedTarget(pub Rc<Cell<FakeTarget>>);

impl SharedTarget {
    pub fn new(target: FakeTarget) -> Self {
        Self(Rc::new(Cell::new(target)))
    }

    pub fn set_can_scroll(&self, up: bool, down: bool) {
        let mut target = self.0.get();
        target.can_scroll_up = up;
        target.can_scroll_down = down;
        self.0.set(target);
    }
}

impl ScrollTarget for SharedTarget {
    fn id(&self) -> TargetId {
        self.0.get().id
    }

    fn child_type(&self) -> SlideChildType {
        self.0.get().child_type
    }

    fn can_scroll_vertically(&self, direction: i32) -> bool {
        self.0.get().can_scroll_vertically(direction)
    }
}
