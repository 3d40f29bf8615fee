//! Physical Constants for the Altimeter
//!
//! Standard atmosphere values and the fixed factors used by the barometric
//! conversion and the vertical speed estimator.

// ===== STANDARD ATMOSPHERE =====

/// Standard atmospheric pressure at sea level (hPa/mbar).
///
/// Setting this as the datum makes the altimeter read pressure altitude
/// (flight levels).
///
/// Source: International Standard Atmosphere (ISA)
pub const STANDARD_PRESSURE_HPA: f32 = 1013.25;

/// Standard atmospheric pressure in inches of mercury.
///
/// Source: ICAO Doc 7488
pub const STANDARD_PRESSURE_INHG: f32 = 29.92126;

// ===== BAROMETRIC FORMULA =====

/// Exponent denominator of the pressure altitude formula.
///
/// `pressure_alt_ft = (1 - atm^(1 / 5.2558797)) / 6.8755856e-6`
///
/// Source: Aviation Formulary (standard atmosphere approximation)
pub const BAROMETRIC_EXPONENT: f64 = 5.2558797;

/// Divisor of the pressure altitude formula (1/ft).
///
/// Source: Aviation Formulary
pub const BAROMETRIC_SCALE_PER_FT: f32 = 6.8755856e-6;

// ===== VERTICAL SPEED =====

/// Pressure-to-height-rate factor near sea level (ft per hPa).
///
/// A local linearisation used by the vertical speed estimator. Kept exactly
/// as calibrated; re-deriving it from the barometric formula would change
/// the displayed vertical speed.
pub const FEET_PER_HPA: f32 = 27.3104136394385;

/// Seconds per minute, vertical speed is reported per minute.
pub const SECONDS_PER_MINUTE: f32 = 60.0;

// ===== UNIT CONVERSIONS =====

/// Feet to metres (12 in/ft × 25.4 mm/in ÷ 1000).
///
/// Written as the same product the display conversion has always used so
/// rounding matches.
pub const FEET_TO_METRES: f32 = 12.0 * 25.4 / 1000.0;
