//! Tick timing constants.
//!
//! # Example
//!
//! ```
//! use breath_events::{days_elapsed, TICKS_PER_DAY};
//!
//! assert_eq!(days_elapsed(TICKS_PER_DAY * 3 + 5), 3);
//! ```

/// Number of ticks in one second of host time.
pub const TICKS_PER_SECOND: u32 = 20;

/// Number of ticks in one full day/night cycle.
pub const TICKS_PER_DAY: u64 = 24_000;

/// Whole days elapsed at `world_time`.
pub fn days_elapsed(world_time: u64) -> u64 {
    world_time / TICKS_PER_DAY
}

/// Duration of a single tick in seconds.
pub fn tick_seconds() -> f64 {
    1.0 / f64::from(TICKS_PER_SECOND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_elapsed() {
        assert_eq!(days_elapsed(0), 0);
        assert_eq!(days_elapsed(23_999), 0);
        assert_eq!(days_elapsed(24_000), 1);
    }

    #[test]
    fn test_tick_seconds() {
        assert!((tick_seconds() - 0.05).abs() < 1e-12);
    }
}
