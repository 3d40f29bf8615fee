//! Raw pressure samples and input rate tracking

use crate::constants::time::{NS_PER_MS, NS_PER_SECOND};
use crate::errors::{AltimeterError, AltimeterResult};
use crate::time::SampleTime;

/// One absolute pressure reading from the sensor collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureSample {
    /// Absolute pressure in hPa
    pub value: f32,
    /// Sensor timestamp in nanoseconds
    pub timestamp: SampleTime,
}

impl PressureSample {
    /// Sample of `value` hPa at `timestamp` ns
    pub fn new(value: f32, timestamp: SampleTime) -> Self {
        Self { value, timestamp }
    }

    /// Reject readings that would poison the filters
    pub fn check(&self) -> AltimeterResult<()> {
        if self.value.is_finite() && self.value > 0.0 {
            Ok(())
        } else {
            Err(AltimeterError::InvalidValue)
        }
    }
}

/// Tracks the interval between consecutive raw samples
///
/// Reports how fast the sensor is actually delivering, independent of the
/// fixed 10 ms rate the estimators resample to. Useful on a status line to
/// spot a sensor stuck at a slow reporting rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleRateTracker {
    last_timestamp: Option<SampleTime>,
    last_interval_ns: Option<i64>,
    last_value: Option<f32>,
    count: u64,
}

impl SampleRateTracker {
    /// Tracker that has seen no samples
    pub const fn new() -> Self {
        Self {
            last_timestamp: None,
            last_interval_ns: None,
            last_value: None,
            count: 0,
        }
    }

    /// Record a sample
    pub fn record(&mut self, sample: &PressureSample) {
        if let Some(previous) = self.last_timestamp {
            self.last_interval_ns = Some(sample.timestamp.saturating_sub(previous));
        }
        self.last_timestamp = Some(sample.timestamp);
        self.last_value = Some(sample.value);
        self.count += 1;
    }

    /// Most recent raw pressure (hPa)
    pub fn last_value(&self) -> Option<f32> {
        self.last_value
    }

    /// Samples recorded so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Interval between the last two samples in milliseconds
    pub fn interval_ms(&self) -> Option<f32> {
        self.last_interval_ns
            .map(|ns| ns as f32 / NS_PER_MS as f32)
    }

    /// Sample rate implied by the last interval in Hz
    ///
    /// `None` until two samples with distinct timestamps have arrived.
    pub fn rate_hz(&self) -> Option<f32> {
        match self.last_interval_ns {
            Some(ns) if ns > 0 => Some(NS_PER_SECOND as f32 / ns as f32),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_rejects_non_finite() {
        assert!(PressureSample::new(1013.25, 0).check().is_ok());
        assert_eq!(PressureSample::new(f32::NAN, 0).check(), Err(AltimeterError::InvalidValue));
        assert!(PressureSample::new(f32::INFINITY, 0).check().is_err());
        assert!(PressureSample::new(-1.0, 0).check().is_err());
    }

    #[test]
    fn rate_from_interval() {
        let mut tracker = SampleRateTracker::new();
        tracker.record(&PressureSample::new(1013.0, 0));
        assert_eq!(tracker.interval_ms(), None);
        assert_eq!(tracker.rate_hz(), None);

        // Nexus 4 fastest rate, about 33 ms
        tracker.record(&PressureSample::new(1013.1, 33_000_000));
        assert_eq!(tracker.interval_ms(), Some(33.0));
        let hz = tracker.rate_hz().unwrap();
        assert!((hz - 30.303).abs() < 0.01);
        assert_eq!(tracker.count(), 2);
        assert_eq!(tracker.last_value(), Some(1013.1));
    }

    #[test]
    fn repeated_timestamp_has_no_rate() {
        let mut tracker = SampleRateTracker::new();
        tracker.record(&PressureSample::new(1013.0, 5));
        tracker.record(&PressureSample::new(1013.0, 5));
        assert_eq!(tracker.interval_ms(), Some(0.0));
        assert_eq!(tracker.rate_hz(), None);
    }
}
