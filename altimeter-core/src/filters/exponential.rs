//! Single-pole IIR low-pass filter

use core::num::NonZeroU32;

use crate::errors::{AltimeterError, AltimeterResult};
use crate::traits::Filter;

/// Exponential smoother, the basic smoothing primitive of every stage
///
/// The first sample seeds the output, so there is no start-up transient
/// from zero towards the real pressure.
///
/// ```rust
/// use altimeter_core::filters::ExponentialSmoother;
/// use altimeter_core::traits::Filter;
///
/// let mut smoother = ExponentialSmoother::from_time_constant(20.0).unwrap();
/// assert_eq!(smoother.filter(1013.25), 1013.25); // seeded
/// assert!(smoother.filter(1000.0) < 1013.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialSmoother {
    alpha: f32,
    last_output: f32,
    initialized: bool,
}

impl ExponentialSmoother {
    /// Create a smoother with `samples` samples per time constant
    ///
    /// `alpha = exp(-1 / samples)`. Larger values respond more slowly.
    pub fn from_time_constant(samples: f32) -> AltimeterResult<Self> {
        if !samples.is_finite() || samples <= 0.0 {
            return Err(AltimeterError::InvalidTimeConstant { samples });
        }

        // Computed in double precision, then narrowed
        let alpha = libm::exp(-1.0 / samples as f64) as f32;
        Ok(Self::with_alpha_unchecked(alpha))
    }

    /// Create a smoother with a whole number of ticks per time constant
    ///
    /// Same `alpha` as [`Self::from_time_constant`], but cannot fail.
    pub fn from_ticks(ticks: NonZeroU32) -> Self {
        Self::with_alpha_unchecked(libm::exp(-1.0 / ticks.get() as f64) as f32)
    }

    /// Create a smoother from a raw smoothing factor in `[0, 1)`
    ///
    /// `alpha = 0` passes samples straight through.
    pub fn from_alpha(alpha: f32) -> AltimeterResult<Self> {
        if !(0.0..1.0).contains(&alpha) {
            return Err(AltimeterError::InvalidConfig {
                reason: "smoothing factor must lie in [0, 1)",
            });
        }
        Ok(Self::with_alpha_unchecked(alpha))
    }

    /// A smoother that performs no smoothing at all
    pub const fn pass_through() -> Self {
        Self::with_alpha_unchecked(0.0)
    }

    const fn with_alpha_unchecked(alpha: f32) -> Self {
        Self {
            alpha,
            last_output: 0.0,
            initialized: false,
        }
    }

    /// Smoothing factor
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Samples per time constant (`0.0` for a pass-through smoother)
    pub fn time_constant(&self) -> f32 {
        if self.alpha <= 0.0 {
            return 0.0;
        }
        (-1.0 / libm::log(self.alpha as f64)) as f32
    }

    /// Samples needed to settle to 99.3% of a step (5 time constants)
    pub fn settling_samples(&self) -> f32 {
        5.0 * self.time_constant()
    }

    /// Whether at least one sample has been seen
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Filter for ExponentialSmoother {
    fn filter(&mut self, sample: f32) -> f32 {
        if !self.initialized {
            self.last_output = sample;
            self.initialized = true;
        }

        let output = sample * (1.0 - self.alpha) + self.last_output * self.alpha;
        self.last_output = output;
        output
    }

    fn output(&self) -> Option<f32> {
        self.initialized.then_some(self.last_output)
    }

    fn reset(&mut self) {
        self.last_output = 0.0;
        self.initialized = false;
    }

    fn seed(&mut self, value: f32) {
        self.last_output = value;
        self.initialized = true;
    }
}
