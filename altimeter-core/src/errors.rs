//! Error Types for Altimeter Configuration and Input Failures
//!
//! ## Design Philosophy
//!
//! The altimeter core has no I/O and no parsing, so it has no recoverable
//! external failure modes. Errors only ever describe a caller bug:
//!
//! 1. **Invalid configuration**: a non-positive filter time constant or
//!    settling time, a zero staleness timeout.
//! 2. **Invalid input**: a pressure sample or datum that is not a finite,
//!    positive number.
//! 3. **Locked datum**: an attempt to step the datum while the standard
//!    (pressure altitude) datum is selected.
//!
//! Invalid values are rejected at the mutator boundary and never clamped, since
//! clamping would hide the caller's mistake.
//!
//! Things that are deliberately *not* errors:
//! - A timestamp that does not advance (the resampler simply runs no ticks).
//! - Querying altitude or speed before data is valid (a neutral `0.0` is
//!   returned and `is_data_valid()` reports `false`).
//!
//! ## Memory Layout
//!
//! Like the rest of the crate the error type is `Copy`, holds no heap data and
//! only uses `&'static str` for reasons, so it can be returned from the
//! producer hot path on targets without an allocator.
//!
//! ```rust
//! use altimeter_core::{AltimeterError, ExponentialSmoother};
//!
//! match ExponentialSmoother::from_time_constant(0.0) {
//!     Err(AltimeterError::InvalidTimeConstant { samples }) => assert_eq!(samples, 0.0),
//!     _ => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for altimeter operations
pub type AltimeterResult<T> = Result<T, AltimeterError>;

/// Altimeter errors - kept small so they can be returned from the sample path
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AltimeterError {
    /// Filter time constant must be a positive, finite number of samples
    #[error("Invalid time constant: {samples} samples (must be > 0)")]
    InvalidTimeConstant {
        /// The rejected number of samples per time constant
        samples: f32,
    },

    /// Filter settling time must be a positive, finite number of seconds
    #[error("Invalid settling time: {seconds}s (must be > 0)")]
    InvalidSettlingTime {
        /// The rejected settling time
        seconds: f32,
    },

    /// Pressure makes no physical sense (NaN, infinity, zero or negative)
    #[error("Invalid value: not a valid pressure")]
    InvalidValue,

    /// The standard datum is selected and cannot be stepped
    #[error("Datum is locked to standard pressure")]
    DatumLocked,

    /// Configuration rejected as a whole
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which setting was rejected and why
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for AltimeterError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidTimeConstant { samples } =>
                defmt::write!(fmt, "Time constant {} samples invalid", samples),
            Self::InvalidSettlingTime { seconds } =>
                defmt::write!(fmt, "Settling time {}s invalid", seconds),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
            Self::DatumLocked =>
                defmt::write!(fmt, "Datum locked"),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
        }
    }
}
