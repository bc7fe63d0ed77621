//! Frame-stepped integer animator.
//!
//! A [`ValueAnimator`] interpolates through a list of integer keyframes. It
//! owns no clock: the caller feeds frame times into [`ValueAnimator::step`]
//! and reacts to the returned [`AnimatorFrame`]. Lifecycle transitions are
//! explicit so start and end hooks can be run exactly once by the owner.

use slidekit_core::NANOS_PER_MILLI;
use smallvec::SmallVec;

use crate::easing::Easing;

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// Lifecycle of a [`ValueAnimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Running,
    Cancelled,
    Completed,
}

impl AnimatorState {
    pub fn is_terminal(self) -> bool {
        matches!(self, AnimatorState::Cancelled | AnimatorState::Completed)
    }
}

/// Outcome of stepping a running animator by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimatorFrame {
    /// Interpolated value for this frame.
    pub value: i32,
    /// `true` on the frame that moved the animator to `Completed`.
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct ValueAnimator {
    keyframes: SmallVec<[i32; 3]>,
    spec: AnimationSpec,
    state: AnimatorState,
    start_time_nanos: Option<u64>,
}

impl ValueAnimator {
    pub fn of_int(from: i32, to: i32, spec: AnimationSpec) -> Self {
        Self::of_keyframes(&[from, to], spec)
    }

    /// Animator passing through every keyframe, spending an equal share of
    /// the eased progress on each segment.
    pub fn of_keyframes(keyframes: &[i32], spec: AnimationSpec) -> Self {
        debug_assert!(!keyframes.is_empty(), "animator needs at least one keyframe");
        Self {
            keyframes: SmallVec::from_slice(keyframes),
            spec,
            state: AnimatorState::Idle,
            start_time_nanos: None,
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    pub fn start_value(&self) -> i32 {
        self.keyframes.first().copied().unwrap_or_default()
    }

    pub fn end_value(&self) -> i32 {
        self.keyframes.last().copied().unwrap_or_default()
    }

    /// Moves `Idle` to `Running`. Returns `false` if the animator already
    /// left `Idle`, so the caller's start hook runs at most once.
    pub fn start(&mut self) -> bool {
        if self.state != AnimatorState::Idle {
            return false;
        }
        self.state = AnimatorState::Running;
        self.start_time_nanos = None;
        true
    }

    /// Moves `Running` to `Cancelled`. Returns `false` for any other state.
    pub fn cancel(&mut self) -> bool {
        if self.state != AnimatorState::Running {
            return false;
        }
        self.state = AnimatorState::Cancelled;
        true
    }

    /// Advances the animation to `frame_time_nanos`.
    ///
    /// The first step after [`start`](Self::start) pins the start time and
    /// yields the first keyframe. Returns `None` unless the animator is
    /// running.
    pub fn step(&mut self, frame_time_nanos: u64) -> Option<AnimatorFrame> {
        if self.state != AnimatorState::Running {
            return None;
        }
        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
        let duration_nanos = self.spec.duration_millis * NANOS_PER_MILLI;

        if elapsed_nanos >= duration_nanos {
            self.state = AnimatorState::Completed;
            return Some(AnimatorFrame {
                value: self.end_value(),
                finished: true,
            });
        }

        let linear_progress = elapsed_nanos as f32 / duration_nanos as f32;
        Some(AnimatorFrame {
            value: self.value_at(linear_progress),
            finished: false,
        })
    }

    /// Value at a linear progress in `[0, 1]`, after easing.
    pub fn value_at(&self, linear_progress: f32) -> i32 {
        let eased = self.spec.easing.transform(linear_progress);
        match self.keyframes.as_slice() {
            [] => 0,
            [only] => *only,
            keyframes => {
                let segments = keyframes.len() - 1;
                let scaled = eased * segments as f32;
                let index = (scaled.floor().max(0.0) as usize).min(segments - 1);
                let local = scaled - index as f32;
                let from = keyframes[index];
                let to = keyframes[index + 1];
                (from as f32 + local * (to - from) as f32) as i32
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/animator_tests.rs"]
mod tests;
