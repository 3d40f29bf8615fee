//! Time Source Abstraction
//!
//! This module provides the `TimeSource` trait which abstracts the wall clock
//! used by the staleness monitor.
//!
//! ## Design Goals
//!
//! - **Platform Independence**: Works with `Instant`, an RTOS tick count or a
//!   hardware timer
//! - **Testability**: Easy to mock for deterministic liveness tests
//! - **Efficiency**: Zero allocation, one load per query
//!
//! ## Common Implementations
//!
//! - `MonotonicClock`: `std::time::Instant` based
//! - `MockTimeSource`: Controllable time for testing
//! - `TickCounter`: Stored by a timer interrupt on `no_std` targets

use crate::time::Timestamp;

/// Source of wall-clock time for the system
///
/// ## Implementation Requirements
///
/// - `now()` is called from the consumer (render) context while the producer
///   (sensor) context also calls it, so it must be thread-safe
/// - Time must not go backwards; a monotonic source is preferred, since a
///   wall clock adjusted by NTP could make a live sensor look stale
///
/// ## Example Implementation
///
/// ```rust
/// use altimeter_core::traits::TimeSource;
/// use altimeter_core::time::Timestamp;
///
/// struct RtosTicks;
///
/// impl TimeSource for RtosTicks {
///     fn now(&self) -> Timestamp {
///         // Read the kernel tick count and convert to milliseconds
///         0 // placeholder
///     }
///
///     fn is_wall_clock(&self) -> bool {
///         false
///     }
///
///     fn precision_ms(&self) -> u32 {
///         1
///     }
/// }
/// ```
pub trait TimeSource: Send + Sync {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Check if this source provides wall clock time (vs monotonic)
    ///
    /// Wall clock time can be adjusted and may go backwards. Monotonic time
    /// always increases and is only useful for measuring intervals, which is
    /// all the staleness monitor needs.
    fn is_wall_clock(&self) -> bool;

    /// Get precision in milliseconds
    fn precision_ms(&self) -> u32;
}
