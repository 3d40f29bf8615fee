//! Optional logging
//!
//! Thin wrappers over the `log` facade that compile to nothing when the `log`
//! feature is off, so the estimators can log on `no_std` targets without
//! pulling in a logger. The disabled forms still build their format
//! arguments, so values that are only logged count as used.

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let _ = core::format_args!($($arg)*);
    }};
}

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        let _ = core::format_args!($($arg)*);
    }};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        let _ = core::format_args!($($arg)*);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn values_only_logged_are_still_used() {
        let skipped: u64 = 7;
        let tick: i64 = 10_000_000;
        log_warn!("re-seeded, skipped {} ticks", skipped);
        log_info!("valid at {} ns", tick);
        log_debug!("filter {:?}", Some(20));
    }
}
