//! Shared gesture constants for consistent touch/pointer handling.
//!
//! Values are in pixels at a baseline density of 1.0. Callers scale the
//! density-dependent ones themselves.

/// Touch slop in pixels.
///
/// A pointer has to travel further than this from its last anchor before a
/// drag starts. The first slop of motion is absorbed and never dispatched.
pub const TOUCH_SLOP: i32 = 8;

/// A press released within this many milliseconds, and within the slop of
/// its down position, is a click.
pub const CLICK_TIMEOUT_MS: u64 = 200;

/// Maximum fling velocity in pixels per second.
///
/// Matches Android's default maximum fling velocity (ViewConfiguration) on a
/// baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Flings below this velocity (px/sec) stop immediately.
pub const MIN_FLING_VELOCITY: f32 = 1.0;

/// Distance in dp a slide bar fling may travel in either direction before it
/// is cut off.
pub const FLING_BOUND_DP: i32 = 1_000;

/// Converts a dp value to pixels, rounding to the nearest pixel.
pub fn dp_to_px(dp: i32, density: f32) -> i32 {
    (dp as f32 * density).round() as i32
}
