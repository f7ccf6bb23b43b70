#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-time accumulator that decides when the game should tick.
//!
//! Backends report real elapsed time per frame; the pacing system converts it
//! into whole ticks at an interval of `base_interval / speed_factor`.

use std::time::Duration;

/// Upper bound on ticks reported for a single frame.
pub const MAX_TICKS_PER_FRAME: u32 = 4;

/// Pure system that turns elapsed frame time into tick counts.
#[derive(Clone, Copy, Debug)]
pub struct Pacing {
    base_interval: Duration,
    accumulator: Duration,
}

impl Pacing {
    /// Creates a pacing system ticking every `base_interval` at speed one.
    #[must_use]
    pub const fn new(base_interval: Duration) -> Self {
        Self {
            base_interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Interval between ticks for the provided speed factor.
    ///
    /// Speed factors below one are treated as one.
    #[must_use]
    pub fn interval(&self, speed_factor: u32) -> Duration {
        self.base_interval / speed_factor.max(1)
    }

    /// Accumulates `dt` and returns how many ticks are now due.
    pub fn advance(&mut self, dt: Duration, speed_factor: u32) -> u32 {
        let interval = self.interval(speed_factor);
        if interval.is_zero() {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(dt);

        let mut ticks = 0;
        while self.accumulator >= interval {
            self.accumulator -= interval;
            ticks += 1;
            if ticks == MAX_TICKS_PER_FRAME {
                self.accumulator = Duration::ZERO;
                break;
            }
        }
        ticks
    }

    /// Discards any partially accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_never_ticks() {
        let mut pacing = Pacing::new(Duration::ZERO);
        assert_eq!(pacing.advance(Duration::from_secs(5), 1), 0);
    }

    #[test]
    fn speed_factor_below_one_is_clamped() {
        let pacing = Pacing::new(Duration::from_millis(200));
        assert_eq!(pacing.interval(0), Duration::from_millis(200));
    }
}
