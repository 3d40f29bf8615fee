//! Fixed-Step Resampling of Irregular Sensor Input
//!
//! ## Overview
//!
//! Pressure sensors report at whatever rate the platform grants them, with
//! jitter. The estimators instead run a virtual clock that only advances in
//! whole 10 ms ticks. On every push the clock catches up to the sample's
//! timestamp, replaying the latest raw value once per tick:
//!
//! ```text
//! raw samples:   x₁           x₂                      x₃
//! sensor time:   |----33ms----|---------55ms----------|
//! ticks:         ·  ·  ·  ·  ·  ·  ·  ·  ·  ·  ·  ·  ·
//!                └ x₁ ×3 ┘└──── x₂ ×5 ─────┘
//! ```
//!
//! This is sample-and-hold, not interpolation: a tick always uses the newest
//! raw value pushed, even across an uneven real gap. Filter time constants
//! expressed in ticks therefore mean the same thing on every device.
//!
//! ## Catch-up Cap
//!
//! A large jump in sensor time (process suspended, sensor paused) would
//! otherwise replay one tick per 10 ms of the gap, synchronously. When a push
//! needs more than `max_catch_up` ticks the resampler instead re-seeds the
//! clock at the new timestamp and reports [`Advance::Reseeded`]; owners re-seed
//! their filters from the new raw value.

use crate::constants::time::{DEFAULT_MAX_CATCH_UP_TICKS, TICK_NS};
use crate::errors::{AltimeterError, AltimeterResult};
use crate::time::SampleTime;

/// Outcome of one push through the resampler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// First sample ever; clock seeded, no ticks run
    Seeded,
    /// `n` ticks were run (possibly zero)
    Ticked(u32),
    /// Gap exceeded the catch-up cap; clock re-seeded, no ticks run
    Reseeded {
        /// Ticks that would have been replayed
        skipped: u64,
    },
}

impl Advance {
    /// Ticks that were actually run
    pub fn ticks(&self) -> u32 {
        match self {
            Self::Ticked(n) => *n,
            _ => 0,
        }
    }

    /// Whether the owner must seed its filters from the raw value
    pub fn needs_seed(&self) -> bool {
        matches!(self, Self::Seeded | Self::Reseeded { .. })
    }
}

/// Virtual sample clock replaying the latest raw value once per tick
#[derive(Debug, Clone)]
pub struct FixedStepResampler {
    last_raw: f32,
    last_processed: Option<SampleTime>,
    max_catch_up: u32,
}

impl FixedStepResampler {
    /// Unseeded resampler with the default catch-up cap
    pub const fn new() -> Self {
        Self {
            last_raw: 0.0,
            last_processed: None,
            max_catch_up: DEFAULT_MAX_CATCH_UP_TICKS,
        }
    }

    /// Limit the ticks a single push may replay
    pub fn with_max_catch_up(mut self, ticks: u32) -> AltimeterResult<Self> {
        if ticks == 0 {
            return Err(AltimeterError::InvalidConfig {
                reason: "catch-up cap must allow at least one tick",
            });
        }
        self.max_catch_up = ticks;
        Ok(self)
    }

    /// Latest raw value pushed
    pub fn last_raw(&self) -> f32 {
        self.last_raw
    }

    /// Virtual time of the last processed tick, `None` before the first push
    pub fn last_processed(&self) -> Option<SampleTime> {
        self.last_processed
    }

    /// Most ticks one push may replay
    pub fn max_catch_up(&self) -> u32 {
        self.max_catch_up
    }

    /// Store `raw` and run one `on_tick(raw, tick_time)` per elapsed tick
    ///
    /// Ticks run while `last_processed + TICK < timestamp`, strictly in
    /// chronological order. A timestamp that does not advance runs nothing.
    pub fn push<F>(&mut self, raw: f32, timestamp: SampleTime, mut on_tick: F) -> Advance
    where
        F: FnMut(f32, SampleTime),
    {
        self.last_raw = raw;

        let Some(mut processed) = self.last_processed else {
            self.last_processed = Some(timestamp);
            return Advance::Seeded;
        };

        let pending = Self::pending_ticks(processed, timestamp);
        if pending > self.max_catch_up as u64 {
            self.last_processed = Some(timestamp);
            return Advance::Reseeded { skipped: pending };
        }

        let mut ticks = 0;
        while processed.saturating_add(TICK_NS) < timestamp {
            processed += TICK_NS;
            on_tick(self.last_raw, processed);
            ticks += 1;
        }
        self.last_processed = Some(processed);

        Advance::Ticked(ticks)
    }

    /// Ticks the catch-up loop would run between `processed` and `timestamp`
    fn pending_ticks(processed: SampleTime, timestamp: SampleTime) -> u64 {
        // Loop runs while processed + k·TICK < timestamp, i.e. ceil(gap/TICK) - 1
        let gap = timestamp.saturating_sub(processed);
        if gap <= TICK_NS {
            return 0;
        }
        ((gap - 1) / TICK_NS) as u64
    }

    /// Forget the clock; the next push seeds again
    pub fn reset(&mut self) {
        self.last_processed = None;
    }
}

impl Default for FixedStepResampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(resampler: &mut FixedStepResampler, raw: f32, t: SampleTime) -> (Advance, Vec<(f32, SampleTime)>) {
        let mut ticks = Vec::new();
        let advance = resampler.push(raw, t, |v, tick| ticks.push((v, tick)));
        (advance, ticks)
    }

    #[test]
    fn first_push_seeds_without_ticks() {
        let mut resampler = FixedStepResampler::new();
        let (advance, ticks) = run(&mut resampler, 1013.25, 5_000_000_000);
        assert_eq!(advance, Advance::Seeded);
        assert!(advance.needs_seed());
        assert!(ticks.is_empty());
        assert_eq!(resampler.last_processed(), Some(5_000_000_000));
    }

    #[test]
    fn one_second_jump_replays_latest_value() {
        let mut resampler = FixedStepResampler::new();
        run(&mut resampler, 1000.0, 0);

        let (advance, ticks) = run(&mut resampler, 990.0, 1_000_000_000);
        // processed + TICK < t stops one tick short of t
        assert_eq!(advance, Advance::Ticked(99));
        assert!(ticks.iter().all(|(v, _)| *v == 990.0));
        assert_eq!(ticks.first().map(|t| t.1), Some(TICK_NS));
        assert_eq!(ticks.last().map(|t| t.1), Some(990_000_000));

        // The outstanding tick runs on the next push
        let (advance, _) = run(&mut resampler, 990.0, 1_000_000_001);
        assert_eq!(advance, Advance::Ticked(1));
    }

    #[test]
    fn ticks_are_chronological_and_whole() {
        let mut resampler = FixedStepResampler::new();
        run(&mut resampler, 1.0, 0);

        let mut all = Vec::new();
        for t in [33_000_000, 61_000_000, 95_500_000, 140_000_000] {
            let (_, ticks) = run(&mut resampler, 1.0, t);
            all.extend(ticks.into_iter().map(|(_, tick)| tick));
        }

        for pair in all.windows(2) {
            assert_eq!(pair[1] - pair[0], TICK_NS);
        }
        assert_eq!(all.len(), 13);
    }

    #[test]
    fn non_monotonic_timestamp_is_a_no_op() {
        let mut resampler = FixedStepResampler::new();
        run(&mut resampler, 1.0, 100_000_000);
        run(&mut resampler, 1.0, 200_000_000);
        let before = resampler.last_processed();

        let (advance, ticks) = run(&mut resampler, 2.0, 50_000_000);
        assert_eq!(advance, Advance::Ticked(0));
        assert!(ticks.is_empty());
        assert_eq!(resampler.last_processed(), before);
        // Raw value is still taken for the next tick
        assert_eq!(resampler.last_raw(), 2.0);
    }

    #[test]
    fn gap_beyond_cap_reseeds() {
        let mut resampler = FixedStepResampler::new().with_max_catch_up(100).unwrap();
        run(&mut resampler, 1.0, 0);

        // 100 pending ticks is still allowed
        let (advance, ticks) = run(&mut resampler, 1.0, 1_010_000_000);
        assert_eq!(advance, Advance::Ticked(100));
        assert_eq!(ticks.len(), 100);

        let (advance, ticks) = run(&mut resampler, 1.0, 10_000_000_000);
        assert!(matches!(advance, Advance::Reseeded { skipped } if skipped > 100));
        assert!(advance.needs_seed());
        assert!(ticks.is_empty());
        assert_eq!(resampler.last_processed(), Some(10_000_000_000));
    }

    #[test]
    fn zero_cap_is_rejected() {
        assert!(FixedStepResampler::new().with_max_catch_up(0).is_err());
    }

    #[test]
    fn pending_tick_count_matches_loop() {
        for gap in [0, 1, TICK_NS - 1, TICK_NS, TICK_NS + 1, 2 * TICK_NS, 2 * TICK_NS + 1, 1_000_000_000] {
            let mut resampler = FixedStepResampler::new();
            run(&mut resampler, 0.0, 0);
            let (advance, _) = run(&mut resampler, 0.0, gap);
            assert_eq!(advance.ticks() as u64, FixedStepResampler::pending_ticks(0, gap), "gap={}", gap);
        }
    }
}
