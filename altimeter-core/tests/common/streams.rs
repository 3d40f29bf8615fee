//! Deterministic pressure streams
//!
//! Arrival jitter comes from a 64-bit linear congruential generator so every
//! run sees the same sequence.

use altimeter_core::sample::PressureSample;
use altimeter_core::time::SampleTime;

/// How pressure evolves over the stream
#[derive(Debug, Clone, Copy)]
pub enum StreamShape {
    /// Constant pressure (hPa)
    Steady(f32),
    /// Linear change from `start` at `rate` hPa per second
    Ramp { start: f32, rate: f32 },
}

impl StreamShape {
    fn pressure_at(self, seconds: f32) -> f32 {
        match self {
            Self::Steady(p) => p,
            Self::Ramp { start, rate } => start + rate * seconds,
        }
    }
}

/// Iterator of samples at a nominal interval, optionally jittered
#[derive(Debug, Clone)]
pub struct PressureStream {
    shape: StreamShape,
    next: SampleTime,
    end: SampleTime,
    interval: SampleTime,
    jitter: SampleTime,
    seed: u64,
}

impl PressureStream {
    /// Samples every `interval` ns from `start` up to and including `end`
    pub fn new(shape: StreamShape, start: SampleTime, end: SampleTime, interval: SampleTime) -> Self {
        Self {
            shape,
            next: start,
            end,
            interval,
            jitter: 0,
            seed: 42,
        }
    }

    /// Vary each interval by up to `±jitter` ns
    pub fn with_jitter(mut self, jitter: SampleTime) -> Self {
        self.jitter = jitter;
        self
    }

    fn random(&mut self) -> u32 {
        self.seed = self
            .seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.seed >> 33) as u32
    }
}

impl Iterator for PressureStream {
    type Item = PressureSample;

    fn next(&mut self) -> Option<PressureSample> {
        if self.next > self.end {
            return None;
        }

        let timestamp = self.next;
        let seconds = timestamp as f64 / 1e9;
        let sample = PressureSample::new(self.shape.pressure_at(seconds as f32), timestamp);

        let offset = if self.jitter > 0 {
            let span = 2 * self.jitter + 1;
            (self.random() as SampleTime % span) - self.jitter
        } else {
            0
        };
        self.next += (self.interval + offset).max(1);

        Some(sample)
    }
}
