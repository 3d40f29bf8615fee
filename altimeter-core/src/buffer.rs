//! Fixed-Size Buffers for Trend History and Pressure Delay
//!
//! ## Overview
//!
//! Two fixed-capacity buffers back the instruments:
//!
//! - [`RingHistory`]: the rolling trend graph. Fed on every resampler tick but
//!   only materializes an entry when at least `step` of virtual time has passed
//!   since the last one, so 61 slots at 500 ms cover a 30 second window.
//! - [`DelayLine`]: the last 101 ticks of once-smoothed pressure for the
//!   vertical speed indicator, newest first, so the value exactly one second
//!   ago is always at index 100.
//!
//! ## Design Rationale
//!
//! ### Index-and-modulo instead of shifting
//!
//! A trend graph is conceptually an array where every push shifts all entries
//! down by one. Doing that literally costs O(capacity) per push. Both buffers
//! here keep a write position instead:
//!
//! ```text
//! RingHistory<5> after 7 entries (write_pos = 2):
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  F  │  G  │  C  │  D  │  E  │  ← physical
//! └─────┴─────┴─────┴─────┴─────┘
//!              ↑
//!          write_pos (oldest, overwritten next)
//!
//! Logical view (oldest → newest): [C, D, E, F, G]
//! ```
//!
//! ### Always full
//!
//! The history is pre-filled with a neutral value (0) so a snapshot is always
//! exactly `N` entries long; a renderer never needs to special-case a partly
//! filled graph.
//!
//! ## Thread Safety
//!
//! These types are plain values and are not synchronized. The instrument
//! facade copies a snapshot out under its lock and publishes that copy.

use heapless::Deque;

use crate::time::SampleTime;

/// Fixed-capacity, time-gated rolling history
///
/// ## Internal Invariants
///
/// - `write_pos < N` and always points at the oldest entry
/// - Logical order (index 0 = oldest, `N - 1` = newest) is chronological
/// - `newest_boundary` only moves forward
#[derive(Debug, Clone)]
pub struct RingHistory<const N: usize> {
    data: [f32; N],
    write_pos: usize,
    newest_boundary: SampleTime,
    step: i64,
}

impl<const N: usize> RingHistory<N> {
    const NON_EMPTY: () = assert!(N > 0, "history must hold at least one entry");

    /// Create a history pre-filled with zeros, gated every `step` ns
    pub const fn new(step: i64) -> Self {
        Self::with_fill(0.0, step)
    }

    /// Create a history pre-filled with `value`
    pub const fn with_fill(value: f32, step: i64) -> Self {
        let _ = Self::NON_EMPTY;
        Self {
            data: [value; N],
            write_pos: 0,
            newest_boundary: 0,
            step,
        }
    }

    /// Offer a value computed at `tick` (virtual time, ns)
    ///
    /// Returns `true` when the gate opened and the value became the newest
    /// entry, evicting the oldest.
    pub fn push(&mut self, value: f32, tick: SampleTime) -> bool {
        if tick < self.newest_boundary.saturating_add(self.step) {
            return false;
        }

        self.newest_boundary = tick;
        self.data[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % N;
        true
    }

    /// Number of entries, always the capacity
    pub const fn len(&self) -> usize {
        N
    }

    /// A history is never empty
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Minimum virtual time between entries (ns)
    pub fn step(&self) -> i64 {
        self.step
    }

    /// Tick time of the newest materialized entry
    pub fn newest_boundary(&self) -> SampleTime {
        self.newest_boundary
    }

    /// Most recent entry
    pub fn latest(&self) -> f32 {
        self.data[(self.write_pos + N - 1) % N]
    }

    /// Entry by logical index (0 = oldest, `N - 1` = newest)
    pub fn get(&self, index: usize) -> Option<f32> {
        if index >= N {
            return None;
        }
        Some(self.data[(self.write_pos + index) % N])
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        (0..N).map(move |i| self.data[(self.write_pos + i) % N])
    }

    /// Copy of the entries in chronological order
    pub fn snapshot(&self) -> [f32; N] {
        let mut out = [0.0; N];
        for (slot, value) in out.iter_mut().zip(self.iter()) {
            *slot = value;
        }
        out
    }

    /// Overwrite every entry with `value`, keeping the gate position
    pub fn fill(&mut self, value: f32) {
        self.data = [value; N];
        self.write_pos = 0;
    }
}

/// Newest-first delay line of per-tick values
///
/// Index 0 holds the value of the current tick, index `N - 1` the value
/// `N - 1` ticks ago. The line is primed once `N` values have been pushed.
#[derive(Debug, Clone)]
pub struct DelayLine<const N: usize> {
    slots: Deque<f32, N>,
}

impl<const N: usize> DelayLine<N> {
    /// Empty delay line
    pub const fn new() -> Self {
        Self { slots: Deque::new() }
    }

    /// Shift a new value in at index 0, dropping the oldest once primed
    pub fn push(&mut self, value: f32) {
        if self.slots.is_full() {
            self.slots.pop_back();
        }
        // A slot is free at this point, so this cannot be rejected
        let _ = self.slots.push_front(value);
    }

    /// Whether every slot has been written at least once
    pub fn is_primed(&self) -> bool {
        self.slots.is_full()
    }

    /// Values written so far, at most `N`
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Value `age` ticks old (0 = newest)
    pub fn get(&self, age: usize) -> Option<f32> {
        self.slots.iter().nth(age).copied()
    }

    /// Newest value
    pub fn newest(&self) -> Option<f32> {
        self.slots.front().copied()
    }

    /// Oldest value, `N - 1` ticks old once primed
    pub fn oldest(&self) -> Option<f32> {
        self.slots.back().copied()
    }

    /// Oldest minus newest, only once primed
    pub fn span_delta(&self) -> Option<f32> {
        if !self.is_primed() {
            return None;
        }
        Some(self.oldest()? - self.newest()?)
    }

    /// Forget all values; the line must be primed again
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<const N: usize> Default for DelayLine<N> {
    fn default() -> Self {
        Self::new()
    }
}
