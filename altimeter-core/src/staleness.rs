//! Sample Liveness Detection
//!
//! ## Overview
//!
//! The display must show when the sensor has stopped delivering, for example
//! after the platform suspends it. Instead of a background timer that every
//! sample cancels and re-arms, the monitor keeps the wall-clock time of the
//! last sample and compares it with the clock when asked:
//!
//! ```text
//! stopped = no sample yet  ||  now - last_sample >= timeout
//! ```
//!
//! ## Concurrency
//!
//! The producer calls [`StalenessMonitor::record_sample`] and any number of
//! readers call [`StalenessMonitor::is_stopped`] concurrently. The state is a
//! single atomic, so there is no lock and no torn read. If a sample lands
//! while a reader is evaluating, the reader either sees the new time (running)
//! or compares against a `now` taken before the sample; a sample newer than
//! `now` always counts as fresh, so a push is never lost to the race.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::constants::time::STALE_AFTER_MS;
use crate::errors::{AltimeterError, AltimeterResult};
use crate::time::{TimeSource, Timestamp};

const NO_SAMPLE: u64 = u64::MAX;

/// Tracks whether samples are still arriving
#[derive(Debug)]
pub struct StalenessMonitor<T: TimeSource> {
    time: T,
    last_sample_ms: AtomicU64,
    timeout_ms: u64,
}

impl<T: TimeSource> StalenessMonitor<T> {
    /// Monitor with the default one second timeout
    pub fn new(time: T) -> Self {
        Self {
            time,
            last_sample_ms: AtomicU64::new(NO_SAMPLE),
            timeout_ms: STALE_AFTER_MS,
        }
    }

    /// Monitor with a custom timeout, which must be non-zero
    pub fn with_timeout(time: T, timeout_ms: u64) -> AltimeterResult<Self> {
        if timeout_ms == 0 {
            return Err(AltimeterError::InvalidConfig {
                reason: "staleness timeout must be positive",
            });
        }
        Ok(Self { timeout_ms, ..Self::new(time) })
    }

    /// Mark a sample as received now
    pub fn record_sample(&self) {
        let now = self.time.now().min(NO_SAMPLE - 1);
        self.last_sample_ms.store(now, Ordering::Release);
    }

    /// Whether no sample has arrived within the timeout
    ///
    /// `true` before the first sample.
    pub fn is_stopped(&self) -> bool {
        let now = self.time.now();
        match self.last_sample_ms.load(Ordering::Acquire) {
            NO_SAMPLE => true,
            last => now.saturating_sub(last) >= self.timeout_ms,
        }
    }

    /// Wall-clock time of the last sample
    pub fn last_sample(&self) -> Option<Timestamp> {
        match self.last_sample_ms.load(Ordering::Acquire) {
            NO_SAMPLE => None,
            last => Some(last),
        }
    }

    /// Time without samples before the monitor reports stopped
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Clock the monitor reads
    pub fn time_source(&self) -> &T {
        &self.time
    }

    /// Forget the last sample; the monitor reports stopped until the next one
    pub fn reset(&self) {
        self.last_sample_ms.store(NO_SAMPLE, Ordering::Release);
    }
}
