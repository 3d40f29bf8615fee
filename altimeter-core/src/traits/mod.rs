//! Core Traits for the Altimeter
//!
//! Two seams are abstracted:
//!
//! - [`filter`] - single-input smoothing stages ([`Filter`])
//! - [`time`] - wall-clock source for liveness checks ([`TimeSource`])
//!
//! Filters are used by value inside the estimators (static dispatch); the
//! trait exists so the estimators, tests and benches can swap stages without
//! touching the resampling code.

pub mod filter;
pub mod time;

pub use filter::Filter;
pub use time::TimeSource;
