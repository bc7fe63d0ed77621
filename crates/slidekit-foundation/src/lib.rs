//! Foundation gestures and nested scrolling for SlideKit
//!
//! Pointer input, velocity tracking, the nested scroll delegation protocol,
//! fling simulation and the slide bar touch recognizer.

pub mod fling;
pub mod gesture_constants;
pub mod nested_scroll;
pub mod pointer;
pub mod scrollable;
pub mod touch_recognizer;
pub mod velocity_tracker;

pub use fling::FlingSimulator;
pub use nested_scroll::{
    NestedScrollChildHelper, NestedScrollParent, ScrollAxes, ScrollKind, ScrollOffset,
    ScrollSessions, ScrollTarget, SlideChildType, StaticTarget, TargetId,
};
pub use pointer::{Point, PointerEvent, PointerEventKind, PointerId};
pub use scrollable::{NestedScrollResult, ScrollableContent};
pub use touch_recognizer::TouchGestureRecognizer;
pub use velocity_tracker::VelocityTracker1D;

pub mod prelude {
    pub use crate::nested_scroll::{
        NestedScrollParent, ScrollAxes, ScrollKind, ScrollOffset, ScrollTarget, SlideChildType,
    };
    pub use crate::pointer::{Point, PointerEvent, PointerEventKind};
    pub use crate::touch_recognizer::TouchGestureRecognizer;
}
