//! Time management for the altimeter
//!
//! Two clocks meet in this crate:
//! - Sensor time: nanosecond timestamps attached to each pressure sample,
//!   used to drive the fixed-step resampler (virtual time)
//! - Wall clock: milliseconds from a [`TimeSource`], used only to decide
//!   whether samples are still arriving
//!
//! They are never compared with each other.

use core::sync::atomic::{AtomicU64, Ordering};

pub use crate::traits::TimeSource;

/// Wall-clock timestamp in milliseconds (epoch defined by the source)
pub type Timestamp = u64;

/// Sensor timestamp in nanoseconds, monotonic non-decreasing per stream
pub type SampleTime = i64;

/// Monotonic time source backed by `std::time::Instant`
///
/// Starts at 0 when created, always increases.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Clock starting at 0 now
    pub fn new() -> Self {
        Self { origin: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        false
    }

    fn precision_ms(&self) -> u32 {
        1
    }
}

/// Controllable time source for testing and simulation
///
/// Clones share the same counter, so a test can keep one handle to advance
/// time while the code under test owns another.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MockTimeSource {
    now_ms: std::sync::Arc<AtomicU64>,
}

#[cfg(feature = "std")]
impl MockTimeSource {
    /// Clock frozen at `start` ms
    pub fn new(start: Timestamp) -> Self {
        Self { now_ms: std::sync::Arc::new(AtomicU64::new(start)) }
    }

    /// Jump to `timestamp` ms
    pub fn set(&self, timestamp: Timestamp) {
        self.now_ms.store(timestamp, Ordering::Release);
    }

    /// Move forward by `ms`
    pub fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::AcqRel);
    }
}

#[cfg(feature = "std")]
impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.now_ms.load(Ordering::Acquire)
    }

    fn is_wall_clock(&self) -> bool {
        false
    }

    fn precision_ms(&self) -> u32 {
        1
    }
}

/// Fixed time source for `no_std` targets driven by an external tick counter
///
/// The owner stores the current tick count (ms) from its timer interrupt.
#[derive(Debug, Default)]
pub struct TickCounter {
    ticks_ms: AtomicU64,
}

impl TickCounter {
    /// Counter at 0 ms
    pub const fn new() -> Self {
        Self { ticks_ms: AtomicU64::new(0) }
    }

    /// Record the current tick count, called from the timer context
    pub fn store(&self, ms: Timestamp) {
        self.ticks_ms.store(ms, Ordering::Release);
    }
}

impl TimeSource for TickCounter {
    fn now(&self) -> Timestamp {
        self.ticks_ms.load(Ordering::Acquire)
    }

    fn is_wall_clock(&self) -> bool {
        false
    }

    fn precision_ms(&self) -> u32 {
        1
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn mock_time_advances_across_clones() {
        let time = MockTimeSource::new(1000);
        let handle = time.clone();
        assert_eq!(time.now(), 1000);

        handle.advance(500);
        assert_eq!(time.now(), 1500);

        handle.set(10);
        assert_eq!(time.now(), 10);
    }

    #[test]
    fn tick_counter_reports_stored_value() {
        let counter = TickCounter::new();
        assert_eq!(counter.now(), 0);
        counter.store(42);
        assert_eq!(counter.now(), 42);
    }

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert!(!clock.is_wall_clock());
    }
}
