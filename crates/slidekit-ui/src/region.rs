//! Host-side view of a laid-out region.

/// A rectangle the host lays out and the coordinator moves vertically.
///
/// Positions are in container coordinates. The coordinator only shifts a
/// region with [`offset_top_and_bottom`](RegionView::offset_top_and_bottom);
/// sizing stays with the host.
pub trait RegionView {
    fn top(&self) -> i32;

    /// Laid-out height.
    fn height(&self) -> i32;

    fn min_height(&self) -> i32 {
        0
    }

    fn bottom(&self) -> i32 {
        self.top() + self.height()
    }

    /// Natural height for an exact `width` and at most `max_height`.
    fn measure_height(&mut self, width: i32, max_height: i32) -> i32;

    fn offset_top_and_bottom(&mut self, delta: i32);

    fn set_visible(&mut self, _visible: bool) {}

    fn set_alpha(&mut self, _alpha: f32) {}
}

/// Moves `region` so its top lands on `top`.
pub(crate) fn move_top_to(region: &mut dyn RegionView, top: i32) {
    let delta = top - region.top();
    if delta != 0 {
        region.offset_top_and_bottom(delta);
    }
}
