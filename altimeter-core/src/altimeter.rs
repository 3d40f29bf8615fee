//! Indicated Altitude Estimation
//!
//! ## Pipeline
//!
//! ```text
//! raw hPa ──► FixedStepResampler ──► ExponentialSmoother ──► filtered hPa
//!   (irregular)     (10 ms ticks)       (filter setting)          │
//!                                                                 ▼
//!                              datum ──► indicated_altitude_ft ──► history (500 ms gate)
//! ```
//!
//! The filtered pressure is the only state the ticks mutate. The displayed
//! altitude is recomputed from it and the current datum on every read, so a
//! datum or unit change shows up immediately without touching the filter.
//!
//! ## Filter Setting
//!
//! | Setting       | Ticks per time constant | Settles in |
//! |---------------|-------------------------|------------|
//! | Off           | pass-through            | immediate  |
//! | Weak          | 10                      | 0.25 s     |
//! | Medium        | 20                      | 0.5 s      |
//! | Strong        | 40                      | 1 s        |
//! | Very strong   | 400                     | 10 s       |
//! | Settling `s`  | `s × 20`                | `s` / 4 s  |
//!
//! Replacing the filter seeds the new smoother with the current filtered
//! pressure, so the display does not jump.
//!
//! ## History
//!
//! History entries are stored in feet using the datum in force when the tick
//! ran, and converted to the display unit on read.

use core::num::NonZeroU32;

use crate::barometric::{indicated_altitude, indicated_altitude_ft, AltitudeUnit};
use crate::buffer::RingHistory;
use crate::constants::buffers::{
    HISTORY_CAPACITY, MEDIUM_TIME_CONSTANT, STRONG_TIME_CONSTANT, TICKS_PER_SETTLING_SECOND,
    VERY_STRONG_TIME_CONSTANT, WEAK_TIME_CONSTANT,
};
use crate::constants::physics::STANDARD_PRESSURE_HPA;
use crate::constants::time::HISTORY_STEP_NS;
use crate::datum::check_datum;
use crate::errors::{AltimeterError, AltimeterResult};
use crate::filters::ExponentialSmoother;
use crate::resampler::{Advance, FixedStepResampler};
use crate::sample::PressureSample;
use crate::time::SampleTime;
use crate::traits::Filter;

/// Named altitude smoothing strengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FilterStrength {
    /// Raw resampled pressure
    Off,
    /// A quarter second to settle
    Weak,
    /// Half a second to settle
    #[default]
    Medium,
    /// One second to settle
    Strong,
    /// Ten seconds to settle, for cruise
    VeryStrong,
}

impl FilterStrength {
    /// Ticks per time constant, `None` when smoothing is off
    pub fn time_constant(self) -> Option<NonZeroU32> {
        match self {
            Self::Off => None,
            Self::Weak => Some(WEAK_TIME_CONSTANT),
            Self::Medium => Some(MEDIUM_TIME_CONSTANT),
            Self::Strong => Some(STRONG_TIME_CONSTANT),
            Self::VeryStrong => Some(VERY_STRONG_TIME_CONSTANT),
        }
    }

    fn smoother(self) -> ExponentialSmoother {
        self.time_constant()
            .map_or(ExponentialSmoother::pass_through(), ExponentialSmoother::from_ticks)
    }
}

/// Altitude smoothing, either a named strength or a settling time
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FilterSetting {
    /// One of the named strengths
    Strength(FilterStrength),
    /// Settling time in seconds
    SettlingTime(f32),
}

impl Default for FilterSetting {
    fn default() -> Self {
        Self::Strength(FilterStrength::default())
    }
}

impl FilterSetting {
    /// Reject settling times that are zero, negative or not a number
    pub fn validate(&self) -> AltimeterResult<()> {
        match *self {
            Self::SettlingTime(seconds) if !(seconds.is_finite() && seconds > 0.0) => {
                Err(AltimeterError::InvalidSettlingTime { seconds })
            }
            _ => Ok(()),
        }
    }

    /// Build the smoother this setting describes
    pub fn smoother(&self) -> AltimeterResult<ExponentialSmoother> {
        self.validate()?;
        match *self {
            Self::Strength(strength) => Ok(strength.smoother()),
            Self::SettlingTime(seconds) => {
                ExponentialSmoother::from_time_constant(seconds * TICKS_PER_SETTLING_SECOND)
            }
        }
    }
}

/// Indicated altitude from a pressure stream and a datum
#[derive(Debug, Clone)]
pub struct AltitudeEstimator {
    resampler: FixedStepResampler,
    smoother: ExponentialSmoother,
    setting: FilterSetting,
    datum_hpa: f32,
    unit: AltitudeUnit,
    filtered_pressure: Option<f32>,
    history: RingHistory<HISTORY_CAPACITY>,
}

impl AltitudeEstimator {
    /// Medium smoothing, standard datum, feet
    pub fn new() -> Self {
        let setting = FilterSetting::default();
        Self {
            resampler: FixedStepResampler::new(),
            smoother: FilterStrength::default().smoother(),
            setting,
            datum_hpa: STANDARD_PRESSURE_HPA,
            unit: AltitudeUnit::default(),
            filtered_pressure: None,
            history: RingHistory::new(HISTORY_STEP_NS),
        }
    }

    /// Limit the ticks a single push may replay before the clock re-seeds
    pub fn with_max_catch_up(mut self, ticks: u32) -> AltimeterResult<Self> {
        self.resampler = self.resampler.with_max_catch_up(ticks)?;
        Ok(self)
    }

    /// Replace the datum; history entries already recorded are not recomputed
    pub fn set_datum(&mut self, hpa: f32) -> AltimeterResult<()> {
        check_datum(hpa)?;
        self.datum_hpa = hpa;
        Ok(())
    }

    /// Datum in force (hPa)
    pub fn datum(&self) -> f32 {
        self.datum_hpa
    }

    /// Unit for the reading and the history; stored values stay in feet
    pub fn set_display_units(&mut self, unit: AltitudeUnit) {
        self.unit = unit;
    }

    /// Unit the reading and history are reported in
    pub fn display_units(&self) -> AltitudeUnit {
        self.unit
    }

    /// Switch to a named smoothing strength
    pub fn set_filter_strength(&mut self, strength: FilterStrength) {
        self.replace_smoother(FilterSetting::Strength(strength), strength.smoother());
    }

    /// Smooth over `seconds` of settling time (`N = seconds × 20` ticks)
    pub fn set_filter_settling_time(&mut self, seconds: f32) -> AltimeterResult<()> {
        self.set_filter(FilterSetting::SettlingTime(seconds))
    }

    /// Replace the smoother; a no-op if the setting is unchanged
    pub fn set_filter(&mut self, setting: FilterSetting) -> AltimeterResult<()> {
        if setting != self.setting {
            let smoother = setting.smoother()?;
            self.replace_smoother(setting, smoother);
        }
        Ok(())
    }

    fn replace_smoother(&mut self, setting: FilterSetting, mut smoother: ExponentialSmoother) {
        if setting == self.setting {
            return;
        }
        if let Some(pressure) = self.filtered_pressure {
            smoother.seed(pressure);
        }
        self.smoother = smoother;
        self.setting = setting;
        log_debug!("Altitude filter set to {:?}", setting);
    }

    /// Smoothing currently applied
    pub fn filter_setting(&self) -> FilterSetting {
        self.setting
    }

    /// Most ticks one push may replay before the clock re-seeds
    pub fn max_catch_up(&self) -> u32 {
        self.resampler.max_catch_up()
    }

    /// Feed one raw sample
    ///
    /// Non-finite or non-positive pressures are rejected and leave the
    /// estimator untouched.
    pub fn push_pressure(&mut self, pressure: f32, timestamp: SampleTime) -> AltimeterResult<Advance> {
        PressureSample::new(pressure, timestamp).check()?;

        let Self { resampler, smoother, datum_hpa, filtered_pressure, history, .. } = self;
        let advance = resampler.push(pressure, timestamp, |raw, tick| {
            let filtered = smoother.filter(raw);
            *filtered_pressure = Some(filtered);
            history.push(indicated_altitude_ft(*datum_hpa, filtered), tick);
        });

        if advance.needs_seed() {
            if let Advance::Reseeded { skipped } = advance {
                log_warn!(
                    "Altitude clock re-seeded at {} ns, skipped {} ticks",
                    timestamp,
                    skipped
                );
            }
            self.smoother.seed(pressure);
            self.filtered_pressure = Some(pressure);
        }

        Ok(advance)
    }

    /// Whether at least one sample has been pushed
    pub fn is_valid(&self) -> bool {
        self.filtered_pressure.is_some()
    }

    /// Smoothed pressure (hPa), `None` before the first sample
    pub fn filtered_pressure(&self) -> Option<f32> {
        self.filtered_pressure
    }

    /// Indicated altitude in the display unit, `0.0` before the first sample
    pub fn current_altitude(&self) -> f32 {
        match self.filtered_pressure {
            Some(pressure) => indicated_altitude(self.datum_hpa, pressure, self.unit),
            None => 0.0,
        }
    }

    /// 30 second altitude trend, oldest first, in the display unit
    pub fn history(&self) -> [f32; HISTORY_CAPACITY] {
        let mut out = self.history.snapshot();
        for value in out.iter_mut() {
            *value = self.unit.from_feet(*value);
        }
        out
    }
}

impl Default for AltitudeEstimator {
    fn default() -> Self {
        Self::new()
    }
}
