//! Thread-Safe Instrument Facade
//!
//! ## Overview
//!
//! [`Instrument`] bundles both estimators, the datum selector, the sample rate
//! tracker and the staleness monitor behind one handle that the sensor
//! callback (producer) and the render loop (consumer) share through an `Arc`.
//!
//! ## Publication Model
//!
//! ```text
//! producer                                     consumers
//! ────────                                     ─────────
//! push_pressure ─► Mutex<ProducerState>
//!                   ├─ altitude estimator
//!                   ├─ vertical speed estimator
//!                   └─ build snapshot ─► RwLock<Arc<InstrumentSnapshot>> ─► clone Arc
//! ```
//!
//! All filter state is mutated under the mutex. Each push or setting change
//! ends by swapping in a fresh immutable snapshot, so a reader always sees the
//! complete result of some push and never a half-shifted history. Readers hold
//! the read lock only long enough to clone the `Arc`.
//!
//! The staleness monitor sits outside the mutex and is lock-free.
//!
//! ## Lock Poisoning
//!
//! A panic while holding a lock leaves the estimators in a consistent state
//! (every mutation is a whole tick), so poisoned locks are recovered rather
//! than propagated.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::altimeter::{AltitudeEstimator, FilterSetting, FilterStrength};
use crate::barometric::{AltitudeUnit, PressureUnit};
use crate::config::InstrumentConfig;
use crate::constants::buffers::HISTORY_CAPACITY;
use crate::datum::{DatumMode, DatumSelector, DatumStep};
use crate::errors::AltimeterResult;
use crate::sample::{PressureSample, SampleRateTracker};
use crate::staleness::StalenessMonitor;
use crate::time::{MonotonicClock, SampleTime, TimeSource};
use crate::variometer::VerticalSpeedEstimator;

/// Immutable view of the instrument after one push or setting change
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentSnapshot {
    /// Indicated altitude in `altitude_unit`
    pub altitude: f32,
    /// Vertical speed per minute in `altitude_unit`
    pub vertical_speed: f32,
    /// At least one sample has been pushed
    pub altitude_valid: bool,
    /// The vertical speed delay line is full
    pub vertical_speed_valid: bool,
    /// Altitude trend, oldest first
    pub altitude_history: [f32; HISTORY_CAPACITY],
    /// Vertical speed trend, oldest first
    pub vertical_speed_history: [f32; HISTORY_CAPACITY],
    /// Smoothed pressure (hPa)
    pub filtered_pressure: Option<f32>,
    /// Unit of the readings and histories
    pub altitude_unit: AltitudeUnit,
    /// Unit the datum is stepped in
    pub pressure_unit: PressureUnit,
    /// Selected datum reference
    pub datum_mode: DatumMode,
    /// Active datum (hPa)
    pub datum_hpa: f32,
    /// Altitude smoothing
    pub filter: FilterSetting,
    /// Whether the trend graphs are shown
    pub display_graph: bool,
    /// Interval between the last two raw samples (ms)
    pub sample_interval_ms: Option<f32>,
    /// Raw sample rate implied by that interval (Hz)
    pub sample_rate_hz: Option<f32>,
    /// Raw samples accepted so far
    pub samples: u64,
}

impl InstrumentSnapshot {
    /// Whether the altimeter reads pressure altitude (flight levels)
    pub fn is_pressure_altitude(&self) -> bool {
        matches!(self.datum_mode, DatumMode::Standard)
    }
}

#[derive(Debug)]
struct ProducerState {
    altimeter: AltitudeEstimator,
    variometer: VerticalSpeedEstimator,
    datum: DatumSelector,
    pressure_unit: PressureUnit,
    display_graph: bool,
    rate: SampleRateTracker,
}

impl ProducerState {
    fn snapshot(&self) -> InstrumentSnapshot {
        InstrumentSnapshot {
            altitude: self.altimeter.current_altitude(),
            vertical_speed: self.variometer.current_speed(),
            altitude_valid: self.altimeter.is_valid(),
            vertical_speed_valid: self.variometer.is_valid(),
            altitude_history: self.altimeter.history(),
            vertical_speed_history: self.variometer.history(),
            filtered_pressure: self.altimeter.filtered_pressure(),
            altitude_unit: self.altimeter.display_units(),
            pressure_unit: self.pressure_unit,
            datum_mode: self.datum.mode(),
            datum_hpa: self.datum.active(),
            filter: self.altimeter.filter_setting(),
            display_graph: self.display_graph,
            sample_interval_ms: self.rate.interval_ms(),
            sample_rate_hz: self.rate.rate_hz(),
            samples: self.rate.count(),
        }
    }
}

/// Altimeter and vertical speed indicator shared by producer and consumers
#[derive(Debug)]
pub struct Instrument<T: TimeSource = MonotonicClock> {
    state: Mutex<ProducerState>,
    published: RwLock<Arc<InstrumentSnapshot>>,
    staleness: StalenessMonitor<T>,
}

impl Instrument<MonotonicClock> {
    /// Instrument with default settings on the process monotonic clock
    pub fn new() -> Self {
        Self::with_time_source(MonotonicClock::new())
    }
}

impl Default for Instrument<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> Instrument<T> {
    /// Instrument with default settings on the given wall clock
    pub fn with_time_source(time: T) -> Self {
        let state = ProducerState {
            altimeter: AltitudeEstimator::new(),
            variometer: VerticalSpeedEstimator::new(),
            datum: DatumSelector::new(),
            pressure_unit: PressureUnit::default(),
            display_graph: InstrumentConfig::default().display_graph,
            rate: SampleRateTracker::new(),
        };
        Self::from_parts(state, StalenessMonitor::new(time))
    }

    /// Instrument restored from persisted settings
    pub fn with_config(config: InstrumentConfig, time: T) -> AltimeterResult<Self> {
        config.validate()?;

        let datum = config.datum_selector()?;
        let mut altimeter = AltitudeEstimator::new().with_max_catch_up(config.max_catch_up_ticks)?;
        altimeter.set_filter(config.filter)?;
        altimeter.set_datum(datum.active())?;
        altimeter.set_display_units(config.altitude_unit);

        let mut variometer =
            VerticalSpeedEstimator::new().with_max_catch_up(config.max_catch_up_ticks)?;
        variometer.set_display_units(config.altitude_unit);

        let state = ProducerState {
            altimeter,
            variometer,
            datum,
            pressure_unit: config.pressure_unit,
            display_graph: config.display_graph,
            rate: SampleRateTracker::new(),
        };
        let staleness = StalenessMonitor::with_timeout(time, config.stale_after_ms)?;
        Ok(Self::from_parts(state, staleness))
    }

    fn from_parts(state: ProducerState, staleness: StalenessMonitor<T>) -> Self {
        let published = RwLock::new(Arc::new(state.snapshot()));
        Self {
            state: Mutex::new(state),
            published,
            staleness,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProducerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &ProducerState) {
        let snapshot = Arc::new(state.snapshot());
        *self.published.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    /// Run `f` on the producer state and publish the result if it succeeds
    fn update<R>(&self, f: impl FnOnce(&mut ProducerState) -> AltimeterResult<R>) -> AltimeterResult<R> {
        let mut state = self.lock();
        let result = f(&mut state)?;
        self.publish(&state);
        Ok(result)
    }

    /// Apply a change that cannot fail and publish it
    fn modify(&self, f: impl FnOnce(&mut ProducerState)) {
        let mut state = self.lock();
        f(&mut state);
        self.publish(&state);
    }

    // ===== PRODUCER =====

    /// Feed one raw sample from the sensor
    ///
    /// Marks the instrument live before any filtering. Invalid pressures are
    /// rejected with [`AltimeterError::InvalidValue`](crate::AltimeterError::InvalidValue)
    /// and change nothing.
    pub fn push_pressure(&self, pressure: f32, timestamp: SampleTime) -> AltimeterResult<()> {
        let sample = PressureSample::new(pressure, timestamp);
        if let Err(err) = sample.check() {
            log_warn!("Rejected pressure sample {} at {} ns", pressure, timestamp);
            return Err(err);
        }
        self.staleness.record_sample();

        self.update(|state| {
            state.rate.record(&sample);
            state.altimeter.push_pressure(pressure, timestamp)?;
            state.variometer.push_pressure(pressure, timestamp)?;
            Ok(())
        })
    }

    // ===== SETTINGS =====

    /// Set the datum directly (hPa)
    ///
    /// With the standard datum selected, a non-standard value switches to QNH.
    pub fn set_datum(&self, hpa: f32) -> AltimeterResult<()> {
        self.update(|state| {
            let active = state.datum.set(hpa)?;
            state.altimeter.set_datum(active)?;
            log_debug!("Datum set to {} hPa ({:?})", active, state.datum.mode());
            Ok(())
        })
    }

    /// Switch between QNH, QFE and standard; returns the datum now in force
    pub fn select_datum_mode(&self, mode: DatumMode) -> AltimeterResult<f32> {
        self.update(|state| {
            let active = state.datum.select(mode);
            state.altimeter.set_datum(active)?;
            log_debug!("Datum mode {:?}, {} hPa", mode, active);
            Ok(active)
        })
    }

    /// Step the active datum in the current pressure unit; returns the new datum
    pub fn step_datum(&self, step: DatumStep) -> AltimeterResult<f32> {
        self.update(|state| {
            let active = state.datum.step(step, state.pressure_unit)?;
            state.altimeter.set_datum(active)?;
            Ok(active)
        })
    }

    /// Switch altitude smoothing to a named strength
    pub fn set_filter_strength(&self, strength: FilterStrength) {
        self.modify(|state| state.altimeter.set_filter_strength(strength));
    }

    /// Smooth altitude over `seconds` of settling time
    pub fn set_filter_settling_time(&self, seconds: f32) -> AltimeterResult<()> {
        self.update(|state| state.altimeter.set_filter_settling_time(seconds))
    }

    /// Unit for altitude, vertical speed and both histories
    pub fn set_display_units(&self, unit: AltitudeUnit) {
        self.modify(|state| {
            state.altimeter.set_display_units(unit);
            state.variometer.set_display_units(unit);
            log_debug!("Display units {}", unit.label());
        });
    }

    /// Unit the datum is stepped in
    pub fn set_pressure_units(&self, unit: PressureUnit) {
        self.modify(|state| state.pressure_unit = unit);
    }

    /// Show or hide the trend graphs
    pub fn set_display_graph(&self, show: bool) {
        self.modify(|state| state.display_graph = show);
    }

    /// Current settings, for the settings collaborator to persist
    pub fn config(&self) -> InstrumentConfig {
        let state = self.lock();
        InstrumentConfig {
            datum_mode: state.datum.mode(),
            qnh_hpa: state.datum.qnh(),
            qfe_hpa: state.datum.qfe(),
            altitude_unit: state.altimeter.display_units(),
            pressure_unit: state.pressure_unit,
            filter: state.altimeter.filter_setting(),
            display_graph: state.display_graph,
            stale_after_ms: self.staleness.timeout_ms(),
            max_catch_up_ticks: state.altimeter.max_catch_up(),
        }
    }

    // ===== CONSUMER =====

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<InstrumentSnapshot> {
        Arc::clone(&self.published.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Indicated altitude in the display unit, `0.0` before the first sample
    pub fn current_altitude(&self) -> f32 {
        self.snapshot().altitude
    }

    /// Vertical speed per minute in the display unit, `0.0` while invalid
    pub fn current_vertical_speed(&self) -> f32 {
        self.snapshot().vertical_speed
    }

    /// Whether both readings are backed by enough data
    ///
    /// Altitude is valid from the first sample; vertical speed needs 1.01 s of
    /// virtual time, so this follows the vertical speed.
    pub fn is_data_valid(&self) -> bool {
        let snapshot = self.snapshot();
        snapshot.altitude_valid && snapshot.vertical_speed_valid
    }

    /// Whether samples have stopped arriving
    pub fn is_stopped(&self) -> bool {
        self.staleness.is_stopped()
    }

    /// 30 second altitude trend, oldest first
    pub fn altitude_history(&self) -> [f32; HISTORY_CAPACITY] {
        self.snapshot().altitude_history
    }

    /// 30 second vertical speed trend, oldest first
    pub fn vertical_speed_history(&self) -> [f32; HISTORY_CAPACITY] {
        self.snapshot().vertical_speed_history
    }

    /// Whether the trend graphs are shown
    pub fn display_graph(&self) -> bool {
        self.snapshot().display_graph
    }

    /// Mean interval between raw samples (ms)
    pub fn sample_interval_ms(&self) -> Option<f32> {
        self.snapshot().sample_interval_ms
    }

    /// Raw sample rate (Hz)
    pub fn sample_rate_hz(&self) -> Option<f32> {
        self.snapshot().sample_rate_hz
    }

    /// Clock used for staleness
    pub fn time_source(&self) -> &T {
        self.staleness.time_source()
    }
}
