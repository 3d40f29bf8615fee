//! Constants for the Altimeter Core
//!
//! This module provides centralized, documented constants used throughout
//! the altimeter. Every numeric value that shapes the filter dynamics or the
//! barometric conversion is defined here, with its unit in the name.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Physics**: Standard atmosphere, barometric formula and unit conversions
//! - **Time**: Resampler tick, history gate and staleness timeout
//! - **Buffers**: History and delay line capacities, filter time constants
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Barometric and vertical speed constants must not be re-derived; the
//!    displayed values depend on them bit for bit
//! 3. Use descriptive names that include units

/// Standard atmosphere, barometric conversion and unit factors.
pub mod physics;

/// Virtual clock tick, history gate and liveness timeouts.
pub mod time;

/// Buffer capacities and filter time constants (in ticks).
pub mod buffers;

// Re-export commonly used constants for convenience
pub use physics::{
    STANDARD_PRESSURE_HPA, FEET_TO_METRES,
};

pub use time::{
    TICK_NS, HISTORY_STEP_NS, STALE_AFTER_MS, DEFAULT_MAX_CATCH_UP_TICKS,
};

pub use buffers::{
    HISTORY_CAPACITY, DELAY_LINE_LEN, DELTA_TICKS,
};
