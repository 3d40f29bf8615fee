//! Time-Related Constants
//!
//! Timestamps from the sensor are in nanoseconds; the staleness monitor runs
//! on a wall clock in milliseconds.

// ===== TIME UNIT CONVERSIONS =====

/// Nanoseconds per millisecond.
pub const NS_PER_MS: i64 = 1_000_000;

/// Nanoseconds per second.
pub const NS_PER_SECOND: i64 = 1_000_000_000;

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

// ===== RESAMPLING =====

/// Virtual clock tick (ns).
///
/// All filter time constants are expressed in ticks of this size, which makes
/// the filter dynamics independent of the sensor's reporting rate.
pub const TICK_NS: i64 = 10_000_000;

/// Ticks per second of virtual time.
pub const TICKS_PER_SECOND: u32 = (NS_PER_SECOND / TICK_NS) as u32;

/// Default cap on catch-up ticks replayed by a single push.
///
/// 60 seconds of virtual time. A longer gap (process suspended, sensor
/// paused) re-seeds the clock and filters instead of replaying.
pub const DEFAULT_MAX_CATCH_UP_TICKS: u32 = 60 * TICKS_PER_SECOND;

// ===== HISTORY =====

/// Minimum virtual time between two history entries (ns).
pub const HISTORY_STEP_NS: i64 = 500_000_000;

// ===== LIVENESS =====

/// Wall-clock time without samples after which the display is stale (ms).
pub const STALE_AFTER_MS: u64 = 1000;
