//! Core runtime for SlideKit.
//!
//! Everything in SlideKit runs on a single logical UI thread. Animations and
//! flings are never driven by blocking; they re-enter from frame callbacks
//! registered on the [`FrameClock`] defined here.

mod frame_clock;

pub use frame_clock::{FrameCallbackId, FrameCallbackRegistration, FrameClock};

/// Nanoseconds per millisecond, shared by frame-time conversions.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
