//! Running mean over a fixed window

use crate::traits::Filter;

/// N-tap moving average over a circular window
///
/// Keeps a running sum so each sample costs O(1) regardless of `N`.
///
/// Two start-up behaviours are available:
/// - [`MovingAverageFilter::new`]: the window starts full of zeros and the sum
///   is always divided by `N`, so a step ramps up linearly over `N` samples
/// - [`MovingAverageFilter::warm_start`]: divides by the number of samples seen
///   until the window is full, so the first output equals the first sample
///
/// ```rust
/// use altimeter_core::filters::MovingAverageFilter;
/// use altimeter_core::traits::Filter;
///
/// let mut avg = MovingAverageFilter::<3>::new();
/// let out: Vec<f32> = [3.0, 3.0, 3.0, 3.0, 0.0, 0.0, 0.0, 0.0]
///     .iter()
///     .map(|&x| avg.filter(x))
///     .collect();
/// assert_eq!(out, [1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct MovingAverageFilter<const N: usize> {
    samples: [f32; N],
    next: usize,
    seen: usize,
    running_sum: f32,
    warm_start: bool,
    last_output: Option<f32>,
}

impl<const N: usize> MovingAverageFilter<N> {
    const NON_EMPTY: () = assert!(N > 0, "moving average window must not be empty");

    /// Zero-filled window, always divides by `N`
    pub fn new() -> Self {
        let _ = Self::NON_EMPTY;
        Self {
            samples: [0.0; N],
            next: 0,
            seen: 0,
            running_sum: 0.0,
            warm_start: false,
            last_output: None,
        }
    }

    /// Divides by the samples seen so far until the window fills
    pub fn warm_start() -> Self {
        Self { warm_start: true, ..Self::new() }
    }

    /// Window length
    pub const fn window(&self) -> usize {
        N
    }

    /// Whether `N` samples have been seen
    pub fn is_full(&self) -> bool {
        self.seen >= N
    }

    fn divisor(&self) -> f32 {
        if self.warm_start {
            self.seen.min(N) as f32
        } else {
            N as f32
        }
    }
}

impl<const N: usize> Default for MovingAverageFilter<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Filter for MovingAverageFilter<N> {
    fn filter(&mut self, sample: f32) -> f32 {
        // Oldest sample leaves the window (zero while filling)
        self.running_sum -= self.samples[self.next];
        self.samples[self.next] = sample;
        self.running_sum += sample;

        self.next = (self.next + 1) % N;
        if self.seen < N {
            self.seen += 1;
        }

        let output = self.running_sum / self.divisor();
        self.last_output = Some(output);
        output
    }

    fn output(&self) -> Option<f32> {
        self.last_output
    }

    fn reset(&mut self) {
        let warm_start = self.warm_start;
        *self = Self::new();
        self.warm_start = warm_start;
    }

    fn seed(&mut self, value: f32) {
        self.samples = [value; N];
        self.running_sum = value * N as f32;
        self.next = 0;
        self.seen = N;
        self.last_output = Some(value);
    }
}
