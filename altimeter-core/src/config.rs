//! Instrument Configuration
//!
//! The settings collaborator owns persistence. It hands the core an
//! [`InstrumentConfig`] at start-up (typically deserialized from its own
//! store) and reads one back from
//! [`Instrument::config`](crate::instrument::Instrument::config) to save.
//!
//! Every field has a default, so a partial document is accepted:
//!
//! ```json
//! {
//!   "datum_mode": "qnh",
//!   "qnh_hpa": 1021.0,
//!   "filter": { "strength": "strong" }
//! }
//! ```

use crate::altimeter::FilterSetting;
use crate::barometric::{AltitudeUnit, PressureUnit};
use crate::constants::physics::STANDARD_PRESSURE_HPA;
use crate::constants::time::{DEFAULT_MAX_CATCH_UP_TICKS, STALE_AFTER_MS};
use crate::datum::{check_datum, DatumMode, DatumSelector};
use crate::errors::{AltimeterError, AltimeterResult};

/// Settings injected by the settings collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InstrumentConfig {
    /// Active datum reference
    pub datum_mode: DatumMode,
    /// Remembered QNH setting (hPa)
    pub qnh_hpa: f32,
    /// Remembered QFE setting (hPa)
    pub qfe_hpa: f32,
    /// Unit for altitude and vertical speed
    pub altitude_unit: AltitudeUnit,
    /// Unit the datum is shown and stepped in
    pub pressure_unit: PressureUnit,
    /// Altitude smoothing
    pub filter: FilterSetting,
    /// Whether the trend graphs are shown
    pub display_graph: bool,
    /// Wall-clock time without samples before the display is stale (ms)
    pub stale_after_ms: u64,
    /// Most ticks a single push may replay before the clocks re-seed
    pub max_catch_up_ticks: u32,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            datum_mode: DatumMode::default(),
            qnh_hpa: STANDARD_PRESSURE_HPA,
            qfe_hpa: STANDARD_PRESSURE_HPA,
            altitude_unit: AltitudeUnit::default(),
            pressure_unit: PressureUnit::default(),
            filter: FilterSetting::default(),
            display_graph: true,
            stale_after_ms: STALE_AFTER_MS,
            max_catch_up_ticks: DEFAULT_MAX_CATCH_UP_TICKS,
        }
    }
}

impl InstrumentConfig {
    /// Check every field, returning the first problem found
    pub fn validate(&self) -> AltimeterResult<()> {
        check_datum(self.qnh_hpa)?;
        check_datum(self.qfe_hpa)?;
        self.filter.validate()?;

        if self.stale_after_ms == 0 {
            return Err(AltimeterError::InvalidConfig {
                reason: "staleness timeout must be positive",
            });
        }
        if self.max_catch_up_ticks == 0 {
            return Err(AltimeterError::InvalidConfig {
                reason: "catch-up cap must allow at least one tick",
            });
        }
        Ok(())
    }

    /// Datum selector restored from the remembered settings
    pub fn datum_selector(&self) -> AltimeterResult<DatumSelector> {
        DatumSelector::with_settings(self.datum_mode, self.qnh_hpa, self.qfe_hpa)
    }
}
