//! Smoothing Filters
//!
//! ## Overview
//!
//! Every stage of the altimeter and the vertical speed indicator is smoothed
//! with the same primitive, a single-pole IIR low-pass
//! ([`ExponentialSmoother`]), driven once per 10 ms resampler tick. Because
//! the input is resampled to a fixed rate first, a time constant expressed in
//! samples is also a time constant in seconds:
//!
//! ```text
//! alpha          = exp(-1 / N)          N = samples per time constant
//! y[n]           = x[n]·(1 - alpha) + y[n-1]·alpha
//! settling time  = 5·N ticks            (99.3 % of a step)
//! ```
//!
//! Two further filters are provided for collaborators that process raw,
//! irregular samples themselves:
//!
//! - [`MovingAverageFilter`]: N-tap running mean over a circular window
//! - [`RcLowPassFilter`]: continuous-time RC response evaluated at arbitrary
//!   sample times, no resampling required
//!
//! ## Choosing a Filter
//!
//! | Filter              | Input rate | Memory | Step response          |
//! |---------------------|------------|--------|------------------------|
//! | ExponentialSmoother | fixed      | O(1)   | exponential            |
//! | MovingAverageFilter | fixed      | O(N)   | linear ramp over N     |
//! | RcLowPassFilter     | irregular  | O(1)   | exponential in time    |

pub mod exponential;
pub mod moving_average;
pub mod rc;

pub use exponential::ExponentialSmoother;
pub use moving_average::MovingAverageFilter;
pub use rc::RcLowPassFilter;
