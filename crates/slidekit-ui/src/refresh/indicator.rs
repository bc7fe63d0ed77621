/// Visual pull-to-refresh indicator supplied by the host.
///
/// The capability queries decide which height side effect the container
/// forwards: a drag fraction while draggable, a fade alpha while loading.
pub trait RefreshIndicator {
    fn can_drag(&self) -> bool;

    fn can_refresh(&self) -> bool;

    fn is_loading(&self) -> bool;

    /// Whether the indicator wants to collapse instead of holding at the
    /// refresh threshold.
    fn is_restore(&self) -> bool;

    /// Drag progress towards the refresh threshold, in `[0, 1]`.
    fn update_dragging(&mut self, fraction: f32);

    fn start_loading(&mut self);

    fn restore(&mut self);

    fn reset(&mut self);

    fn update_visible_height(&mut self, height: i32);
}
