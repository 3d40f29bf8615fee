//! Property-Based Tests
//!
//! Invariants that must hold for every pressure, datum and arrival pattern,
//! not only the hand-picked values of the unit tests.

mod common;

use altimeter_core::barometric::{hpa_to_inhg, indicated_altitude_ft, inhg_to_hpa};
use altimeter_core::constants::buffers::HISTORY_CAPACITY;
use altimeter_core::{AltitudeEstimator, Filter, FixedStepResampler, MovingAverageFilter};
use common::{PressureStream, StreamShape, SECOND, TICK};
use proptest::prelude::*;

proptest! {
    #[test]
    fn pressure_unit_round_trip(p in 100.0f32..1200.0) {
        let back = inhg_to_hpa(hpa_to_inhg(p));
        prop_assert!((back - p).abs() < 1e-3, "{} -> {}", p, back);
    }

    #[test]
    fn altitude_is_zero_at_datum(p in 10.0f32..1200.0) {
        prop_assert_eq!(indicated_altitude_ft(p, p), 0.0);
    }

    #[test]
    fn estimator_reads_zero_at_datum(p in 100.0f32..=1200.0, seconds in 1i64..5) {
        let mut estimator = AltitudeEstimator::new();
        estimator.set_datum(p).unwrap();
        for sample in PressureStream::new(StreamShape::Steady(p), 0, seconds * SECOND, TICK) {
            estimator.push_pressure(sample.value, sample.timestamp).unwrap();
        }
        prop_assert!(estimator.current_altitude().abs() < 0.05);
    }

    #[test]
    fn higher_pressure_is_lower_altitude(
        datum in 100.0f32..=1200.0,
        low in 300.0f32..1100.0,
        gap in 0.1f32..200.0,
    ) {
        let high = low + gap;
        prop_assert!(indicated_altitude_ft(datum, low) > indicated_altitude_ft(datum, high));
    }

    #[test]
    fn ticks_do_not_depend_on_arrival_pattern(
        gaps in prop::collection::vec(1i64..200_000_000, 1..100),
    ) {
        let end: i64 = gaps.iter().sum();

        let mut chunked = FixedStepResampler::new();
        chunked.push(1000.0, 0, |_, _| {});
        let mut ticks = Vec::new();
        let mut t = 0;
        for gap in &gaps {
            t += gap;
            chunked.push(1000.0, t, |_, tick| ticks.push(tick));
        }

        let mut single = FixedStepResampler::new();
        single.push(1000.0, 0, |_, _| {});
        let advance = single.push(1000.0, end, |_, _| {});

        prop_assert_eq!(ticks.len() as u32, advance.ticks());
        prop_assert_eq!(chunked.last_processed(), single.last_processed());
        for (i, tick) in ticks.iter().enumerate() {
            prop_assert_eq!(*tick, (i as i64 + 1) * TICK);
        }
    }

    #[test]
    fn moving_average_stays_within_input_range(
        samples in prop::collection::vec(900.0f32..1100.0, 1..64),
    ) {
        let mut avg = MovingAverageFilter::<8>::warm_start();
        let min = samples.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = samples.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        for sample in samples {
            let out = avg.filter(sample);
            prop_assert!(out >= min - 1e-2 && out <= max + 1e-2);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn history_window_is_always_full(
        p in 850.0f32..1050.0,
        interval_ms in 5i64..60,
        seconds in 31i64..45,
    ) {
        let mut estimator = AltitudeEstimator::new();
        let stream = PressureStream::new(StreamShape::Steady(p), 0, seconds * SECOND, interval_ms * 1_000_000);
        for sample in stream {
            estimator.push_pressure(sample.value, sample.timestamp).unwrap();
        }

        let history = estimator.history();
        prop_assert_eq!(history.len(), HISTORY_CAPACITY);
        let current = estimator.current_altitude();
        prop_assert!((history[HISTORY_CAPACITY - 1] - current).abs() < 0.05);
        for value in history {
            prop_assert!((value - current).abs() < 0.05, "{} vs {}", value, current);
        }
    }
}
