use web_time::{Duration, Instant};

pub type PointerId = u64;

/// Position in container coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer sample delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(id: PointerId, kind: PointerEventKind, position: Point, time: Instant) -> Self {
        Self {
            id,
            kind,
            position,
            time,
        }
    }

    /// Time elapsed since `earlier`, saturating at zero.
    pub fn elapsed_since(&self, earlier: &PointerEvent) -> Duration {
        self.time.saturating_duration_since(earlier.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_saturates_for_out_of_order_events() {
        let now = Instant::now();
        let later = now + Duration::from_millis(30);
        let down = PointerEvent::new(1, PointerEventKind::Down, Point::ZERO, later);
        let up = PointerEvent::new(1, PointerEventKind::Up, Point::ZERO, now);
        assert_eq!(up.elapsed_since(&down), Duration::ZERO);
        assert_eq!(down.elapsed_since(&up), Duration::from_millis(30));
    }

    #[test]
    fn distance_squared_is_symmetric() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(b.distance_squared(a), 25.0);
    }
}
