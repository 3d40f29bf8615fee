//! Barometric altimeter and vertical speed indicator core
//!
//! Turns a stream of absolute pressure samples, arriving at whatever rate the
//! sensor manages, into an indicated altitude and a vertical speed, each
//! smoothed for display and each with a 30 second trend history.
//!
//! Key constraints:
//! - Filter dynamics independent of the sensor rate (fixed 10 ms resampling)
//! - No heap allocation in the estimators
//! - Safe to read from a render thread while the sensor thread pushes
//!
//! ```rust
//! use altimeter_core::{Instrument, MockTimeSource};
//!
//! let instrument = Instrument::with_time_source(MockTimeSource::new(0));
//! instrument.set_datum(1013.25).unwrap();
//!
//! // 2 seconds of samples, one every 10 ms
//! for i in 0..=200 {
//!     instrument.push_pressure(1013.25, i * 10_000_000).unwrap();
//! }
//!
//! assert!(instrument.is_data_valid());
//! assert!(instrument.current_altitude().abs() < 1.0);
//! assert!(instrument.current_vertical_speed().abs() < 1.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod altimeter;
pub mod barometric;
pub mod buffer;
pub mod config;
pub mod constants;
pub mod datum;
pub mod errors;
pub mod filters;
#[cfg(feature = "std")]
pub mod instrument;
pub mod resampler;
pub mod sample;
pub mod staleness;
pub mod time;
pub mod traits;
pub mod variometer;

// Public API
pub use altimeter::{AltitudeEstimator, FilterSetting, FilterStrength};
pub use barometric::{AltitudeUnit, PressureUnit};
pub use config::InstrumentConfig;
pub use datum::{DatumMode, DatumSelector, DatumStep};
pub use errors::{AltimeterError, AltimeterResult};
pub use filters::{ExponentialSmoother, MovingAverageFilter, RcLowPassFilter};
#[cfg(feature = "std")]
pub use instrument::{Instrument, InstrumentSnapshot};
pub use resampler::{Advance, FixedStepResampler};
pub use staleness::StalenessMonitor;
#[cfg(feature = "std")]
pub use time::{MockTimeSource, MonotonicClock};
pub use traits::{Filter, TimeSource};
pub use variometer::VerticalSpeedEstimator;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
