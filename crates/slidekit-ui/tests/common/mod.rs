//! Host doubles shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slidekit_ui::prelude::*;

pub const FRAME: u64 = 16_000_000;

#[derive(Debug)]
pub struct RegionState {
    pub top: Cell<i32>,
    pub height: Cell<i32>,
    pub min_height: Cell<i32>,
    pub visible: Cell<bool>,
}

#[derive(Clone, Debug)]
pub struct Region(pub Rc<RegionState>);

impl Region {
    pub fn new(height: i32, min_height: i32) -> Self {
        Self(Rc::new(RegionState {
            top: Cell::new(0),
            height: Cell::new(height),
            min_height: Cell::new(min_height),
            visible: Cell::new(true),
        }))
    }

    pub fn boxed(&self) -> Box<dyn RegionView> {
        Box::new(self.clone())
    }

    pub fn top(&self) -> i32 {
        self.0.top.get()
    }
}

impl RegionView for Region {
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
}

/// Spinner that accepts a refresh once and then loads until reset.
#[derive(Clone, Debug, Default)]
pub struct Spinner {
    pub loading: Rc<Cell<bool>>,
    pub log: Rc<RefCell<Vec<String>>>,
}

impl Spinner {
    pub fn boxed(&self) -> Box<dyn RefreshIndicator> {
        Box::new(self.clone())
    }
}

impl RefreshIndicator for Spinner {
    fn can_drag(&self) -> bool {
        !self.loading.get()
    }

    fn can_refresh(&self) -> bool {
        !self.loading.get()
    }

    fn is_loading(&self) -> bool {
        self.loading.get()
    }

    fn is_restore(&self) -> bool {
        false
    }

    fn update_dragging(&mut self, _fraction: f32) {}

    fn start_loading(&mut self) {
        self.loading.set(true);
        self.log.borrow_mut().push("start".into());
    }

    fn restore(&mut self) {
        self.log.borrow_mut().push("restore".into());
    }

    fn reset(&mut self) {
        self.loading.set(false);
        self.log.borrow_mut().push("reset".into());
    }

    fn update_visible_height(&mut self, _height: i32) {}
}

pub struct Scene {
    pub layout: SlideLayout,
    pub header: Region,
    pub slider: Region,
    pub spinner: Spinner,
    pub refreshes: Rc<RefCell<Vec<(bool, bool)>>>,
    pub now: u64,
}

impl Scene {
    /// 300px header collapsing to 55px over a 900px container.
    pub fn new(config: SlideConfig) -> Self {
        let header = Region::new(300, 55);
        let slider = Region::new(900, 0);
        let spinner = Spinner::default();
        let refresh = RefreshContainer::new(Region::new(300, 0).boxed())
            .with_indicator(spinner.boxed());
        let mut layout = SlideLayout::new(config)
            .expect("valid config")
            .with_header(header.boxed())
            .with_slider(slider.boxed())
            .with_refresh_container(refresh);
        layout.on_size_changed(400, 900);
        layout.on_attached();
        layout.expand_header(None);
        layout.on_layout();

        let refreshes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&refreshes);
        layout.set_on_refresh_listener(move |by_pull, expanded| {
            sink.borrow_mut().push((by_pull, expanded));
        });
        Self {
            layout,
            header,
            slider,
            spinner,
            refreshes,
            now: 0,
        }
    }

    pub fn run_frames(&mut self) {
        let deadline = self.now + 1_000 * FRAME;
        while self.layout.needs_frame() {
            self.now += FRAME;
            self.layout.on_frame(self.now);
            assert!(self.now < deadline, "layout kept animating");
        }
    }

    /// Checks the geometric bounds every delta has to preserve.
    pub fn assert_bounds(&self) {
        let layout = &self.layout;
        let range = layout.header_range().expect("header attached");
        let (min, effective) = (*range.start(), *range.end());
        let header_top = layout.header_top();
        assert!(
            (-(effective - min)..=0).contains(&header_top),
            "header top {header_top}"
        );
        assert!(
            (header_top + min..=header_top + effective).contains(&layout.slider_top()),
            "slider top {} with header top {header_top}",
            layout.slider_top()
        );
        let full = layout.refresh_presenter().full_height();
        assert!(
            (0..=full).contains(&layout.refresh_height()),
            "refresh height {}",
            layout.refresh_height()
        );
    }
}
