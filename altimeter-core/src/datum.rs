//! Pressure Datum Selection (QNH / QFE / Standard)
//!
//! A pilot sets one of three references on the altimeter subscale:
//!
//! - **QNH**: sea level pressure reported by the local station. The altimeter
//!   reads altitude above mean sea level.
//! - **QFE**: pressure at the airfield. The altimeter reads height above it.
//! - **Standard**: 1013.25 hPa. The altimeter reads pressure altitude, used
//!   for flight levels. The subscale cannot be adjusted in this mode.
//!
//! QNH and QFE each remember their own setting, so switching between modes
//! restores the last value used.
//!
//! ## Stepping
//!
//! Adjustments snap to whole display units of the selected pressure unit
//! (1 hPa or 0.01 inHg), then move by one or ten of them. The snapping is
//! asymmetric on purpose: stepping up from 1013.25 hPa gives 1014, stepping
//! down gives 1013.

use crate::barometric::{hpa_to_inhg, inhg_to_hpa, PressureUnit};
use crate::constants::physics::STANDARD_PRESSURE_HPA;
use crate::errors::{AltimeterError, AltimeterResult};

/// Which reference the altimeter is set to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DatumMode {
    /// Altitude above mean sea level
    Qnh,
    /// Height above the airfield
    Qfe,
    /// Pressure altitude against 1013.25 hPa
    #[default]
    Standard,
}

impl DatumMode {
    /// Subscale caption for the mode
    pub fn caption(self) -> &'static str {
        match self {
            Self::Qnh => "QNH",
            Self::Qfe => "QFE",
            Self::Standard => "Press Alt",
        }
    }

    /// Whether the subscale can be stepped in this mode
    pub fn is_adjustable(self) -> bool {
        !matches!(self, Self::Standard)
    }
}

/// One subscale adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatumStep {
    /// Up one display unit
    Up1,
    /// Up ten display units
    Up10,
    /// Down one display unit
    Down1,
    /// Down ten display units
    Down10,
}

/// Check a datum is a pressure the subscale can be set to
///
/// Any finite, positive pressure is accepted. QFE at a high airfield sits
/// well below any sea level pressure.
pub fn check_datum(hpa: f32) -> AltimeterResult<()> {
    if hpa.is_finite() && hpa > 0.0 {
        Ok(())
    } else {
        Err(AltimeterError::InvalidValue)
    }
}

/// Apply a step to a datum displayed in `unit`
///
/// Pure function, no range check.
pub fn stepped_datum(datum_hpa: f32, step: DatumStep, unit: PressureUnit) -> f32 {
    match unit {
        PressureUnit::Hectopascal => {
            let d = datum_hpa as f64;
            let stepped = match step {
                DatumStep::Up1 => libm::ceil(d + 0.01),
                DatumStep::Up10 => libm::ceil(d + 9.01),
                DatumStep::Down1 => libm::floor(d - 0.01),
                DatumStep::Down10 => libm::floor(d - 9.01),
            };
            stepped as f32
        }
        PressureUnit::InchesOfMercury => {
            // Work in hundredths of an inch
            let hundredths = hpa_to_inhg(datum_hpa) as f64 * 100.0;
            let stepped = match step {
                DatumStep::Up1 => libm::floor(hundredths + 1.01),
                DatumStep::Up10 => libm::floor(hundredths + 10.01),
                DatumStep::Down1 => libm::floor(hundredths - 0.01),
                DatumStep::Down10 => libm::floor(hundredths - 9.01),
            };
            inhg_to_hpa((stepped / 100.0) as f32)
        }
    }
}

/// Remembers the QNH and QFE settings and which one is active
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DatumSelector {
    mode: DatumMode,
    qnh_hpa: f32,
    qfe_hpa: f32,
}

impl Default for DatumSelector {
    fn default() -> Self {
        Self {
            mode: DatumMode::Standard,
            qnh_hpa: STANDARD_PRESSURE_HPA,
            qfe_hpa: STANDARD_PRESSURE_HPA,
        }
    }
}

impl DatumSelector {
    /// Standard mode, both settings at 1013.25 hPa
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a selector from persisted settings
    pub fn with_settings(mode: DatumMode, qnh_hpa: f32, qfe_hpa: f32) -> AltimeterResult<Self> {
        check_datum(qnh_hpa)?;
        check_datum(qfe_hpa)?;
        Ok(Self { mode, qnh_hpa, qfe_hpa })
    }

    /// Selected reference
    pub fn mode(&self) -> DatumMode {
        self.mode
    }

    /// Remembered QNH setting (hPa)
    pub fn qnh(&self) -> f32 {
        self.qnh_hpa
    }

    /// Remembered QFE setting (hPa)
    pub fn qfe(&self) -> f32 {
        self.qfe_hpa
    }

    /// Datum in force for the current mode (hPa)
    pub fn active(&self) -> f32 {
        match self.mode {
            DatumMode::Qnh => self.qnh_hpa,
            DatumMode::Qfe => self.qfe_hpa,
            DatumMode::Standard => STANDARD_PRESSURE_HPA,
        }
    }

    /// Whether the altimeter reads pressure altitude
    pub fn is_pressure_altitude(&self) -> bool {
        self.active() == STANDARD_PRESSURE_HPA
    }

    /// Switch mode and return the datum now in force
    pub fn select(&mut self, mode: DatumMode) -> f32 {
        self.mode = mode;
        self.active()
    }

    /// Set the datum directly
    ///
    /// In QNH or QFE mode this replaces that mode's setting. In standard mode
    /// a datum other than 1013.25 hPa is taken as a QNH setting and the mode
    /// switches to QNH.
    pub fn set(&mut self, hpa: f32) -> AltimeterResult<f32> {
        check_datum(hpa)?;
        match self.mode {
            DatumMode::Qnh => self.qnh_hpa = hpa,
            DatumMode::Qfe => self.qfe_hpa = hpa,
            DatumMode::Standard if hpa == STANDARD_PRESSURE_HPA => {}
            DatumMode::Standard => {
                self.qnh_hpa = hpa;
                self.mode = DatumMode::Qnh;
            }
        }
        Ok(self.active())
    }

    /// Step the active setting and return the new datum
    ///
    /// Fails with [`AltimeterError::DatumLocked`] in standard mode, and with
    /// [`AltimeterError::InvalidValue`] if the step would go to zero or below.
    /// The setting is unchanged on error.
    pub fn step(&mut self, step: DatumStep, unit: PressureUnit) -> AltimeterResult<f32> {
        if !self.mode.is_adjustable() {
            return Err(AltimeterError::DatumLocked);
        }
        let stepped = stepped_datum(self.active(), step, unit);
        self.set(stepped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hpa_steps_snap_to_whole_units() {
        let unit = PressureUnit::Hectopascal;
        assert_eq!(stepped_datum(1013.25, DatumStep::Up1, unit), 1014.0);
        assert_eq!(stepped_datum(1013.25, DatumStep::Down1, unit), 1013.0);
        assert_eq!(stepped_datum(1013.0, DatumStep::Up1, unit), 1014.0);
        assert_eq!(stepped_datum(1013.0, DatumStep::Down1, unit), 1012.0);
        assert_eq!(stepped_datum(1013.0, DatumStep::Up10, unit), 1023.0);
        assert_eq!(stepped_datum(1013.25, DatumStep::Up10, unit), 1023.0);
        assert_eq!(stepped_datum(1013.0, DatumStep::Down10, unit), 1003.0);
        assert_eq!(stepped_datum(1013.25, DatumStep::Down10, unit), 1004.0);
    }

    #[test]
    fn inhg_steps_move_by_hundredths() {
        let unit = PressureUnit::InchesOfMercury;
        let start = inhg_to_hpa(29.92);

        let up = stepped_datum(start, DatumStep::Up1, unit);
        assert!((hpa_to_inhg(up) - 29.93).abs() < 1e-3, "got {}", hpa_to_inhg(up));

        let down = stepped_datum(start, DatumStep::Down1, unit);
        assert!((hpa_to_inhg(down) - 29.91).abs() < 1e-3, "got {}", hpa_to_inhg(down));

        let up10 = stepped_datum(start, DatumStep::Up10, unit);
        assert!((hpa_to_inhg(up10) - 30.02).abs() < 1e-3);

        let down10 = stepped_datum(start, DatumStep::Down10, unit);
        assert!((hpa_to_inhg(down10) - 29.82).abs() < 1e-3);
    }

    #[test]
    fn standard_mode_is_locked() {
        let mut selector = DatumSelector::new();
        assert_eq!(selector.mode(), DatumMode::Standard);
        assert!(selector.is_pressure_altitude());
        assert_eq!(
            selector.step(DatumStep::Up1, PressureUnit::Hectopascal),
            Err(AltimeterError::DatumLocked)
        );
    }

    #[test]
    fn modes_remember_their_settings() {
        let mut selector = DatumSelector::new();
        selector.select(DatumMode::Qnh);
        selector.set(1020.0).unwrap();
        selector.select(DatumMode::Qfe);
        selector.set(995.0).unwrap();

        assert_eq!(selector.select(DatumMode::Qnh), 1020.0);
        assert_eq!(selector.select(DatumMode::Qfe), 995.0);
        assert_eq!(selector.select(DatumMode::Standard), STANDARD_PRESSURE_HPA);
        assert_eq!(selector.select(DatumMode::Qnh), 1020.0);
    }

    #[test]
    fn setting_in_standard_mode_switches_to_qnh() {
        let mut selector = DatumSelector::new();
        assert_eq!(selector.set(STANDARD_PRESSURE_HPA), Ok(STANDARD_PRESSURE_HPA));
        assert_eq!(selector.mode(), DatumMode::Standard);

        assert_eq!(selector.set(1008.0), Ok(1008.0));
        assert_eq!(selector.mode(), DatumMode::Qnh);
        assert_eq!(selector.qnh(), 1008.0);
    }

    #[test]
    fn step_updates_active_setting() {
        let mut selector = DatumSelector::with_settings(DatumMode::Qfe, 1013.25, 990.0).unwrap();
        assert_eq!(selector.step(DatumStep::Down10, PressureUnit::Hectopascal), Ok(980.0));
        assert_eq!(selector.qfe(), 980.0);
        assert_eq!(selector.qnh(), 1013.25);
    }

    #[test]
    fn non_physical_datum_is_rejected() {
        let mut selector = DatumSelector::with_settings(DatumMode::Qnh, 5.0, 1000.0).unwrap();
        assert_eq!(
            selector.step(DatumStep::Down10, PressureUnit::Hectopascal),
            Err(AltimeterError::InvalidValue)
        );
        assert_eq!(selector.qnh(), 5.0);

        assert_eq!(check_datum(f32::NAN), Err(AltimeterError::InvalidValue));
        assert_eq!(check_datum(f32::INFINITY), Err(AltimeterError::InvalidValue));
        assert_eq!(check_datum(0.0), Err(AltimeterError::InvalidValue));
        assert_eq!(check_datum(-1013.25), Err(AltimeterError::InvalidValue));
        assert!(DatumSelector::with_settings(DatumMode::Qnh, 1013.25, -1.0).is_err());
    }

    #[test]
    fn high_airfield_qfe_is_accepted() {
        let mut selector = DatumSelector::with_settings(DatumMode::Qfe, 1013.25, 700.0).unwrap();
        assert_eq!(selector.active(), 700.0);
        assert_eq!(selector.set(550.0), Ok(550.0));
        assert_eq!(selector.step(DatumStep::Down10, PressureUnit::Hectopascal), Ok(540.0));
        assert_eq!(selector.set(1200.0), Ok(1200.0));
    }
}
