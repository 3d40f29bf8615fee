//! Buffer Sizes and Filter Time Constants
//!
//! All sizes are fixed at compile time so the estimators never allocate.

use core::num::NonZeroU32;

use super::time::{HISTORY_STEP_NS, NS_PER_SECOND};

const fn ticks(n: u32) -> NonZeroU32 {
    match NonZeroU32::new(n) {
        Some(t) => t,
        None => panic!("time constant must be at least one tick"),
    }
}

// ===== HISTORY =====

/// Entries in each trend history (altitude and vertical speed).
///
/// 61 entries at one per 500 ms gives a 30 second graph with both ends
/// inclusive.
pub const HISTORY_CAPACITY: usize = 61;

/// Time span covered by a full history (ns).
pub const HISTORY_WINDOW_NS: i64 = (HISTORY_CAPACITY as i64 - 1) * HISTORY_STEP_NS;

const _: () = assert!(HISTORY_WINDOW_NS == 30 * NS_PER_SECOND);

// ===== VERTICAL SPEED DELAY LINE =====

/// Ticks between the two pressures the vertical speed is derived from.
///
/// 100 ticks of 10 ms is exactly one second of virtual time.
pub const DELTA_TICKS: usize = 100;

/// Slots in the vertical speed delay line (newest at 0, 1 s old at 100).
pub const DELAY_LINE_LEN: usize = DELTA_TICKS + 1;

// ===== FILTER TIME CONSTANTS (ticks) =====

/// First-stage pressure smoothing of the vertical speed estimator.
///
/// 100 ticks, a one second time constant.
pub const VSI_PRESSURE_TIME_CONSTANT: NonZeroU32 = ticks(100);

/// Second-stage smoothing of the raw vertical speed.
///
/// 200 ticks, a two second time constant.
pub const VSI_OUTPUT_TIME_CONSTANT: NonZeroU32 = ticks(200);

/// Ticks per time constant for each second of requested settling time.
///
/// Empirical scale carried by every released version of the instrument;
/// it must stay at 20 for behavioural compatibility.
pub const TICKS_PER_SETTLING_SECOND: f32 = 20.0;

// ===== NAMED FILTER STRENGTHS (ticks) =====

/// Weak altitude smoothing, settles in 0.25 s.
pub const WEAK_TIME_CONSTANT: NonZeroU32 = ticks(10);

/// Medium altitude smoothing, settles in 0.5 s.
pub const MEDIUM_TIME_CONSTANT: NonZeroU32 = ticks(20);

/// Strong altitude smoothing, settles in 1 s.
pub const STRONG_TIME_CONSTANT: NonZeroU32 = ticks(40);

/// Very strong altitude smoothing, settles in 10 s.
pub const VERY_STRONG_TIME_CONSTANT: NonZeroU32 = ticks(400);
