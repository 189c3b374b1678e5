//! Fixed-step accumulator driven by real frame time.

use std::time::Duration;

/// Converts variable frame durations into a whole number of fixed ticks.
#[derive(Clone, Copy, Debug)]
pub struct FixedStepClock {
    step: Duration,
    max_frame: Duration,
    accumulator: Duration,
}

impl FixedStepClock {
    /// Creates a clock with the given tick length and per-frame ceiling.
    #[must_use]
    pub const fn new(step: Duration, max_frame: Duration) -> Self {
        Self {
            step,
            max_frame,
            accumulator: Duration::ZERO,
        }
    }

    /// Length of one tick.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Banks `frame` (clamped to the ceiling) and returns how many ticks are due.
    ///
    /// The remainder smaller than one tick carries into the next frame.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        if self.step.is_zero() {
            return 0;
        }

        self.accumulator += frame.min(self.max_frame);
        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }

    /// Drops any banked time.
    pub fn discard(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    /// Time banked toward the next tick.
    #[must_use]
    pub const fn banked(&self) -> Duration {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> FixedStepClock {
        FixedStepClock::new(Duration::from_millis(10), Duration::from_millis(100))
    }

    #[test]
    fn remainder_carries_between_frames() {
        let mut clock = clock();
        assert_eq!(clock.advance(Duration::from_millis(25)), 2);
        assert_eq!(clock.banked(), Duration::from_millis(5));
        assert_eq!(clock.advance(Duration::from_millis(5)), 1);
        assert_eq!(clock.banked(), Duration::ZERO);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut clock = clock();
        assert_eq!(clock.advance(Duration::from_secs(3)), 10);
    }

    #[test]
    fn discard_drops_banked_time() {
        let mut clock = clock();
        assert_eq!(clock.advance(Duration::from_millis(9)), 0);
        clock.discard();
        assert_eq!(clock.advance(Duration::from_millis(9)), 0);
        assert_eq!(clock.step(), Duration::from_millis(10));
    }
}
