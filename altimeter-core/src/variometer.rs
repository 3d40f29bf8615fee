//! Vertical Speed Estimation
//!
//! ## Pipeline
//!
//! Every 10 ms tick:
//!
//! ```text
//! raw hPa ─► smoother (100 ticks) ─► delay line [0..=100]
//!                                       │
//!                     older - newer ◄───┘   (exactly 1.00 s apart)
//!                          │
//!                          ▼
//!            × 27.3104136394385 ft/hPa × 60 ─► smoother (200 ticks) ─► ft/min
//!                                                                        │
//!                                                            history (500 ms gate)
//! ```
//!
//! The estimator is invalid until the delay line has been filled once (101
//! ticks, 1.01 s of virtual time). The second smoother and the history only
//! run on valid ticks, so the reported speed never ramps in from a fake zero.
//!
//! ## Sign
//!
//! Pressure falls as the aircraft climbs, so the delta is taken older minus
//! newer: a climb reads positive.
//!
//! ## Scale
//!
//! 27.3104136394385 ft/hPa linearises the barometric formula near sea level.
//! The displayed vertical speed depends on this exact factor.

use crate::barometric::AltitudeUnit;
use crate::buffer::{DelayLine, RingHistory};
use crate::constants::buffers::{
    DELAY_LINE_LEN, DELTA_TICKS, HISTORY_CAPACITY, VSI_OUTPUT_TIME_CONSTANT,
    VSI_PRESSURE_TIME_CONSTANT,
};
use crate::constants::physics::{FEET_PER_HPA, SECONDS_PER_MINUTE};
use crate::constants::time::{HISTORY_STEP_NS, TICKS_PER_SECOND};
use crate::errors::AltimeterResult;
use crate::filters::ExponentialSmoother;
use crate::resampler::{Advance, FixedStepResampler};
use crate::sample::PressureSample;
use crate::time::SampleTime;
use crate::traits::Filter;

/// Convert a pressure drop over the delay line to feet per minute
fn speed_from_delta(delta_hpa: f32) -> f32 {
    let span_seconds = DELTA_TICKS as f32 / TICKS_PER_SECOND as f32;
    delta_hpa * FEET_PER_HPA / span_seconds * SECONDS_PER_MINUTE
}

/// Vertical speed from a pressure stream
#[derive(Debug, Clone)]
pub struct VerticalSpeedEstimator {
    resampler: FixedStepResampler,
    pressure_smoother: ExponentialSmoother,
    delay: DelayLine<DELAY_LINE_LEN>,
    speed_smoother: ExponentialSmoother,
    raw_speed: f32,
    speed: f32,
    unit: AltitudeUnit,
    history: RingHistory<HISTORY_CAPACITY>,
}

impl VerticalSpeedEstimator {
    /// Estimator in feet per minute, invalid until primed
    pub fn new() -> Self {
        Self {
            resampler: FixedStepResampler::new(),
            pressure_smoother: ExponentialSmoother::from_ticks(VSI_PRESSURE_TIME_CONSTANT),
            delay: DelayLine::new(),
            speed_smoother: ExponentialSmoother::from_ticks(VSI_OUTPUT_TIME_CONSTANT),
            raw_speed: 0.0,
            speed: 0.0,
            unit: AltitudeUnit::default(),
            history: RingHistory::new(HISTORY_STEP_NS),
        }
    }

    /// Limit the ticks a single push may replay before the clock re-seeds
    pub fn with_max_catch_up(mut self, ticks: u32) -> AltimeterResult<Self> {
        self.resampler = self.resampler.with_max_catch_up(ticks)?;
        Ok(self)
    }

    /// Unit per minute for the reading and history
    pub fn set_display_units(&mut self, unit: AltitudeUnit) {
        self.unit = unit;
    }

    /// Unit per minute the reading is reported in
    pub fn display_units(&self) -> AltitudeUnit {
        self.unit
    }

    /// Most ticks one push may replay before the clock re-seeds
    pub fn max_catch_up(&self) -> u32 {
        self.resampler.max_catch_up()
    }

    /// Feed one raw sample
    ///
    /// A re-seed after a long gap clears the delay line, so the estimator is
    /// invalid again for 1.01 s of virtual time. History is kept.
    pub fn push_pressure(&mut self, pressure: f32, timestamp: SampleTime) -> AltimeterResult<Advance> {
        PressureSample::new(pressure, timestamp).check()?;

        let Self {
            resampler,
            pressure_smoother,
            delay,
            speed_smoother,
            raw_speed,
            speed,
            history,
            ..
        } = self;
        let advance = resampler.push(pressure, timestamp, |raw, tick| {
            delay.push(pressure_smoother.filter(raw));

            let Some(delta) = delay.span_delta() else {
                return;
            };
            if !speed_smoother.is_initialized() {
                log_info!("Vertical speed valid at {} ns", tick);
            }
            *raw_speed = speed_from_delta(delta);
            *speed = speed_smoother.filter(*raw_speed);
            history.push(*speed, tick);
        });

        match advance {
            Advance::Seeded => self.pressure_smoother.seed(pressure),
            Advance::Reseeded { skipped } => {
                log_warn!(
                    "Vertical speed clock re-seeded at {} ns, skipped {} ticks",
                    timestamp,
                    skipped
                );
                self.pressure_smoother.seed(pressure);
                self.delay.clear();
                self.speed_smoother.reset();
                self.raw_speed = 0.0;
                self.speed = 0.0;
            }
            Advance::Ticked(_) => {}
        }

        Ok(advance)
    }

    /// Whether a full second of pressure is in the delay line
    pub fn is_valid(&self) -> bool {
        self.delay.is_primed()
    }

    /// Smoothed vertical speed per minute in the display unit, `0.0` while invalid
    pub fn current_speed(&self) -> f32 {
        if !self.is_valid() {
            return 0.0;
        }
        self.unit.from_feet(self.speed)
    }

    /// Unsmoothed speed of the last valid tick (ft/min)
    pub fn raw_speed(&self) -> f32 {
        self.raw_speed
    }

    /// 30 second vertical speed trend, oldest first, in the display unit
    pub fn history(&self) -> [f32; HISTORY_CAPACITY] {
        let mut out = self.history.snapshot();
        for value in out.iter_mut() {
            *value = self.unit.from_feet(*value);
        }
        out
    }
}

impl Default for VerticalSpeedEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::time::TICK_NS;

    const SECOND: SampleTime = 1_000_000_000;

    #[test]
    fn one_hpa_per_second_is_1638_fpm() {
        assert!((speed_from_delta(1.0) - 1638.6248).abs() < 1e-2);
        assert_eq!(speed_from_delta(0.0), 0.0);
    }

    #[test]
    fn invalid_until_delay_line_is_full() {
        let mut vsi = VerticalSpeedEstimator::new();
        vsi.push_pressure(1013.25, 0).unwrap();
        assert!(!vsi.is_valid());

        // 100 ticks
        assert_eq!(vsi.push_pressure(1013.25, 101 * TICK_NS), Ok(Advance::Ticked(100)));
        assert!(!vsi.is_valid());
        assert_eq!(vsi.current_speed(), 0.0);
        assert_eq!(vsi.history(), [0.0; HISTORY_CAPACITY]);

        // 101st tick
        vsi.push_pressure(1013.25, 102 * TICK_NS).unwrap();
        assert!(vsi.is_valid());
    }

    #[test]
    fn constant_pressure_reads_level() {
        let mut vsi = VerticalSpeedEstimator::new();
        let mut t = 0;
        while t <= 3 * SECOND {
            vsi.push_pressure(1013.25, t).unwrap();
            t += TICK_NS;
        }
        assert!(vsi.is_valid());
        assert!(vsi.current_speed().abs() < 1.0);
    }

    #[test]
    fn falling_pressure_reads_climb() {
        let mut vsi = VerticalSpeedEstimator::new();
        let mut t = 0;
        while t <= 20 * SECOND {
            // 1 hPa per second
            let pressure = 1013.25 - t as f32 / SECOND as f32;
            vsi.push_pressure(pressure, t).unwrap();
            t += TICK_NS;
        }

        let speed = vsi.current_speed();
        assert!((speed - 1638.6).abs() < 1638.6 * 0.02, "speed {}", speed);

        vsi.set_display_units(AltitudeUnit::Metres);
        assert!((vsi.current_speed() - speed * 0.3048).abs() < 0.1);
    }

    #[test]
    fn rising_pressure_reads_descent() {
        let mut vsi = VerticalSpeedEstimator::new();
        let mut t = 0;
        while t <= 10 * SECOND {
            let pressure = 1000.0 + 0.5 * t as f32 / SECOND as f32;
            vsi.push_pressure(pressure, t).unwrap();
            t += TICK_NS;
        }
        assert!(vsi.current_speed() < -500.0);
        assert!(vsi.raw_speed() < -500.0);
    }

    #[test]
    fn history_records_valid_speed_only() {
        let mut vsi = VerticalSpeedEstimator::new();
        let mut t = 0;
        while t <= 5 * SECOND {
            let pressure = 1013.25 - t as f32 / SECOND as f32;
            vsi.push_pressure(pressure, t).unwrap();
            t += TICK_NS;
        }

        let history = vsi.history();
        // Valid after ~1 s, entries every 500 ms from then on
        assert_eq!(history[0], 0.0);
        assert!(history[HISTORY_CAPACITY - 1] > 0.0);
        assert_eq!(history.iter().filter(|v| **v != 0.0).count(), 8);
    }

    #[test]
    fn reseed_invalidates_until_refilled() {
        let mut vsi = VerticalSpeedEstimator::new().with_max_catch_up(500).unwrap();
        let mut t = 0;
        while t <= 2 * SECOND {
            vsi.push_pressure(1013.25, t).unwrap();
            t += TICK_NS;
        }
        assert!(vsi.is_valid());

        let advance = vsi.push_pressure(1013.25, 60 * SECOND).unwrap();
        assert!(matches!(advance, Advance::Reseeded { .. }));
        assert!(!vsi.is_valid());
        assert_eq!(vsi.current_speed(), 0.0);

        vsi.push_pressure(1013.25, 60 * SECOND + 102 * TICK_NS).unwrap();
        assert!(vsi.is_valid());
    }

    #[test]
    fn invalid_sample_is_rejected() {
        let mut vsi = VerticalSpeedEstimator::new();
        assert!(vsi.push_pressure(f32::INFINITY, 0).is_err());
        assert_eq!(vsi.push_pressure(1000.0, 0), Ok(Advance::Seeded));
    }
}
