//! Smoothing stage abstraction

/// A causal, single-input filter stage
///
/// Implementations own all of their state; calling [`Filter::filter`] once per
/// resampler tick is the only way to advance them.
pub trait Filter {
    /// Feed one sample and return the filtered output
    fn filter(&mut self, sample: f32) -> f32;

    /// Most recent output, `None` until the first sample
    fn output(&self) -> Option<f32>;

    /// Forget all history; the next sample seeds the filter again
    fn reset(&mut self);

    /// Seed the filter so its output starts at `value`
    ///
    /// Used when a filter replaces another mid-stream, so the display does not
    /// jump back towards a stale value.
    fn seed(&mut self, value: f32);
}
