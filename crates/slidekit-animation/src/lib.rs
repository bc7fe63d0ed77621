//! Animation system for SlideKit
//!
//! This crate provides frame-stepped value animators, easing curves and the
//! decay physics used by flings.

pub mod animator;
pub mod decay;
pub mod easing;

pub use animator::{AnimationSpec, AnimatorFrame, AnimatorState, ValueAnimator};
pub use decay::{ConstantDecelerationDecay, DecaySpec};
pub use easing::Easing;

pub mod prelude {
    pub use crate::animator::{AnimationSpec, AnimatorFrame, AnimatorState, ValueAnimator};
    pub use crate::decay::{ConstantDecelerationDecay, DecaySpec};
    pub use crate::easing::Easing;
}
