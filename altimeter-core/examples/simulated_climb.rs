//! Simulated climb through the public API
//!
//! A sensor thread pushes pressure at about 30 Hz while the main thread plays
//! the render loop and prints the instrument every half second.
//!
//! Run with: `cargo run --example simulated_climb`

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use altimeter_core::{DatumMode, DatumStep, FilterStrength, Instrument};

/// Sensor reporting interval
const SAMPLE_INTERVAL: Duration = Duration::from_millis(33);

/// Pressure change while climbing (hPa/s), about 820 ft/min near sea level
const CLIMB_RATE: f32 = -0.5;

fn main() {
    let instrument = Arc::new(Instrument::new());
    instrument.set_filter_strength(FilterStrength::Strong);
    instrument.select_datum_mode(DatumMode::Qnh).expect("standard datum is in range");
    for _ in 0..8 {
        instrument.step_datum(DatumStep::Up1).expect("QNH is adjustable");
    }

    let sensor = {
        let instrument = Arc::clone(&instrument);
        thread::spawn(move || {
            let interval_ns = SAMPLE_INTERVAL.as_nanos() as i64;
            let mut t = 0;
            // 5 s level, 10 s climbing, 5 s level
            while t <= 20_000_000_000 {
                let seconds = t as f32 / 1e9;
                let climbing = (seconds - 5.0).clamp(0.0, 10.0);
                let pressure = 1021.25 + CLIMB_RATE * climbing;
                if let Err(err) = instrument.push_pressure(pressure, t) {
                    eprintln!("sample rejected: {}", err);
                }
                t += interval_ns;
                thread::sleep(SAMPLE_INTERVAL);
            }
        })
    };

    while !sensor.is_finished() {
        thread::sleep(Duration::from_millis(500));
        let snapshot = instrument.snapshot();
        let unit = snapshot.altitude_unit;

        if !snapshot.vertical_speed_valid {
            println!("{:?} {:.0} hPa  -- no data --", snapshot.datum_mode, snapshot.datum_hpa);
            continue;
        }
        println!(
            "{:?} {:.0} hPa  {:>7.1} {}  {:>+7.0} {}  ({:.1} Hz)",
            snapshot.datum_mode,
            snapshot.datum_hpa,
            snapshot.altitude,
            unit.label(),
            snapshot.vertical_speed,
            unit.rate_label(),
            snapshot.sample_rate_hz.unwrap_or(0.0),
        );
    }

    if sensor.join().is_err() {
        eprintln!("sensor thread panicked");
    }
    if instrument.is_stopped() {
        println!("sensor stopped");
    }
}
