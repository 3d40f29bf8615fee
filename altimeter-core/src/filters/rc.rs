//! Continuous-time RC low-pass filter

use crate::errors::{AltimeterError, AltimeterResult};

/// RC low-pass evaluated at arbitrary sample times
///
/// Models the capacitor voltage of an RC network whose input is held at the
/// last sample between updates:
///
/// ```text
/// f(t) = f(t0) + (s - f(t0))·(1 - exp(-(t - t0) / tau))
/// ```
///
/// Unlike [`ExponentialSmoother`](super::ExponentialSmoother) this does not
/// need a fixed input rate, so it can be fed straight from sensor callbacks.
/// Time is in any consistent unit; `tau` uses the same unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RcLowPassFilter {
    tau: f32,
    sample: f32,
    time: f32,
    output: f32,
    initialized: bool,
}

impl RcLowPassFilter {
    /// Create a filter with time constant `tau` (must be positive)
    pub fn new(tau: f32) -> AltimeterResult<Self> {
        if !tau.is_finite() || tau <= 0.0 {
            return Err(AltimeterError::InvalidTimeConstant { samples: tau });
        }
        Ok(Self {
            tau,
            sample: 0.0,
            time: 0.0,
            output: 0.0,
            initialized: false,
        })
    }

    /// Time constant
    pub fn tau(&self) -> f32 {
        self.tau
    }

    /// Filter output at `time` given the samples seen so far
    ///
    /// Does not change state; `time` before the last sample returns the
    /// output at the last sample.
    pub fn sample_at(&self, time: f32) -> f32 {
        let dt = (time - self.time).max(0.0);
        let gain = 1.0 - libm::expf(-dt / self.tau);
        self.output + (self.sample - self.output) * gain
    }

    /// Add a sample taken at `time` and return the output at that instant
    ///
    /// The returned value reflects the previous input held until `time`; the
    /// new sample only starts pulling the output from here on.
    pub fn new_sample(&mut self, sample: f32, time: f32) -> f32 {
        if self.initialized {
            self.output = self.sample_at(time);
        } else {
            self.output = sample;
            self.initialized = true;
        }
        self.sample = sample;
        self.time = time;
        self.output
    }

    /// Last computed output, `None` until the first sample
    pub fn output(&self) -> Option<f32> {
        self.initialized.then_some(self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_seeds_output() {
        let mut rc = RcLowPassFilter::new(1.0).unwrap();
        assert_eq!(rc.new_sample(1013.0, 0.0), 1013.0);
    }

    #[test]
    fn one_time_constant_reaches_63_percent() {
        let mut rc = RcLowPassFilter::new(2.0).unwrap();
        rc.new_sample(0.0, 0.0);
        rc.new_sample(100.0, 0.0);

        let at_tau = rc.sample_at(2.0);
        assert!((at_tau - 63.212).abs() < 0.01, "got {}", at_tau);

        // Irregular steps land on the same curve
        rc.new_sample(100.0, 0.5);
        rc.new_sample(100.0, 1.7);
        let out = rc.new_sample(100.0, 2.0);
        assert!((out - at_tau).abs() < 0.01);
    }

    #[test]
    fn time_going_backwards_holds_output() {
        let mut rc = RcLowPassFilter::new(1.0).unwrap();
        rc.new_sample(10.0, 5.0);
        rc.new_sample(20.0, 5.0);
        assert_eq!(rc.sample_at(4.0), 10.0);
    }

    #[test]
    fn rejects_non_positive_tau() {
        assert!(RcLowPassFilter::new(0.0).is_err());
        assert!(RcLowPassFilter::new(-1.0).is_err());
    }
}
