//! Common test utilities for integration tests
//!
//! This module provides:
//! - Deterministic pressure streams (steady, climbing, jittered arrival)
//! - Helpers to drive an instrument or estimator with a stream

#![allow(dead_code)]

pub mod streams;

use altimeter_core::time::SampleTime;
use altimeter_core::{AltitudeEstimator, Instrument, TimeSource, VerticalSpeedEstimator};

pub use streams::{PressureStream, StreamShape};

/// One second of sensor time (ns)
pub const SECOND: SampleTime = 1_000_000_000;

/// One resampler tick (ns)
pub const TICK: SampleTime = 10_000_000;

/// Push every sample of `stream` into the instrument
pub fn drive<T: TimeSource>(instrument: &Instrument<T>, stream: PressureStream) {
    for sample in stream {
        instrument
            .push_pressure(sample.value, sample.timestamp)
            .expect("stream produces valid pressures");
    }
}

/// Push every sample of `stream` into both estimators
pub fn drive_estimators(
    altimeter: &mut AltitudeEstimator,
    variometer: &mut VerticalSpeedEstimator,
    stream: PressureStream,
) {
    for sample in stream {
        altimeter
            .push_pressure(sample.value, sample.timestamp)
            .expect("stream produces valid pressures");
        variometer
            .push_pressure(sample.value, sample.timestamp)
            .expect("stream produces valid pressures");
    }
}

/// Assert two floats are within `tolerance` of each other
pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}
