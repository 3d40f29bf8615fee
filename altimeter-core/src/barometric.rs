//! Barometric Altitude and Pressure Unit Conversions
//!
//! ## Indicated Altitude
//!
//! An altimeter does not measure height; it measures static pressure and
//! reports the height difference between that pressure and a reference
//! pressure (the datum set on the subscale, the "Kollsman window").
//!
//! Both pressures are converted to *pressure altitude* with the standard
//! atmosphere approximation from the Aviation Formulary:
//!
//! ```text
//! atm(p)          = p / 1013.25
//! pressure_alt(p) = (1 - atm(p)^(1 / 5.2558797)) / 6.8755856e-6      [ft]
//! indicated       = pressure_alt(measured) - pressure_alt(datum)
//! ```
//!
//! Subtracting the datum's own pressure altitude makes the reading exactly
//! zero whenever `measured == datum`, whatever the datum.
//!
//! | Datum        | Reads                                   |
//! |--------------|-----------------------------------------|
//! | QNH          | altitude above mean sea level           |
//! | QFE          | height above the airfield               |
//! | 1013.25 hPa  | pressure altitude (flight level × 100)  |
//!
//! ## Precision
//!
//! The power is evaluated in double precision and narrowed to `f32`, and
//! every constant is used exactly as calibrated, so the displayed numbers
//! match the instrument's established behaviour.

use crate::constants::physics::{
    BAROMETRIC_EXPONENT, BAROMETRIC_SCALE_PER_FT, FEET_TO_METRES, STANDARD_PRESSURE_HPA,
    STANDARD_PRESSURE_INHG,
};

/// Unit altitudes and vertical speeds are displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AltitudeUnit {
    /// Feet, and feet per minute for vertical speed
    #[default]
    Feet,
    /// Metres, and metres per minute
    Metres,
}

impl AltitudeUnit {
    /// Convert a value in feet (or feet per minute) to this unit
    pub fn from_feet(self, feet: f32) -> f32 {
        match self {
            Self::Feet => feet,
            Self::Metres => feet_to_metres(feet),
        }
    }

    /// Short unit label for altitudes
    pub fn label(self) -> &'static str {
        match self {
            Self::Feet => "ft",
            Self::Metres => "m",
        }
    }

    /// Short unit label for vertical speeds
    pub fn rate_label(self) -> &'static str {
        match self {
            Self::Feet => "ft/min",
            Self::Metres => "m/min",
        }
    }
}

/// Unit the pressure datum is displayed and stepped in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PressureUnit {
    /// hPa (same as mbar), stepped in whole units
    #[default]
    Hectopascal,
    /// inHg, stepped in hundredths
    InchesOfMercury,
}

impl PressureUnit {
    /// Convert a pressure in hPa to this unit
    pub fn from_hpa(self, hpa: f32) -> f32 {
        match self {
            Self::Hectopascal => hpa,
            Self::InchesOfMercury => hpa_to_inhg(hpa),
        }
    }

    /// Convert a pressure in this unit to hPa
    pub fn to_hpa(self, value: f32) -> f32 {
        match self {
            Self::Hectopascal => value,
            Self::InchesOfMercury => inhg_to_hpa(value),
        }
    }
}

/// Convert hPa to inches of mercury (1013.25 hPa = 29.92126 inHg)
pub fn hpa_to_inhg(hpa: f32) -> f32 {
    hpa / STANDARD_PRESSURE_HPA * STANDARD_PRESSURE_INHG
}

/// Convert inches of mercury to hPa
pub fn inhg_to_hpa(inhg: f32) -> f32 {
    inhg / STANDARD_PRESSURE_INHG * STANDARD_PRESSURE_HPA
}

/// Convert hPa to standard atmospheres
pub fn hpa_to_atm(hpa: f32) -> f32 {
    hpa / STANDARD_PRESSURE_HPA
}

/// Convert feet to metres
pub fn feet_to_metres(feet: f32) -> f32 {
    feet * FEET_TO_METRES
}

/// Pressure altitude in feet for a static pressure in hPa
pub fn pressure_altitude_ft(hpa: f32) -> f32 {
    let ratio = libm::pow(hpa_to_atm(hpa) as f64, 1.0 / BAROMETRIC_EXPONENT) as f32;
    (1.0 - ratio) / BAROMETRIC_SCALE_PER_FT
}

/// Indicated altitude in feet for a measured pressure and a datum, both hPa
pub fn indicated_altitude_ft(datum_hpa: f32, measured_hpa: f32) -> f32 {
    pressure_altitude_ft(measured_hpa) - pressure_altitude_ft(datum_hpa)
}

/// Indicated altitude in the requested unit
pub fn indicated_altitude(datum_hpa: f32, measured_hpa: f32, unit: AltitudeUnit) -> f32 {
    unit.from_feet(indicated_altitude_ft(datum_hpa, measured_hpa))
}
