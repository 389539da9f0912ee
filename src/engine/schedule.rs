//! Owned periodic tick source.

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// Period of the countdown tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A periodic tick source owned by exactly one engine.
///
/// The first tick fires one full period after the schedule starts, so each
/// start or resume begins a fresh phase. Dropping the schedule cancels it;
/// nothing fires afterwards.
#[derive(Debug)]
pub struct TickSchedule {
    interval: Interval,
}

impl TickSchedule {
    /// Starts a schedule that fires every `period`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    /// Waits for the next tick.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    /// Cancels the schedule.
    pub fn cancel(self) {
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Duration, expected: Duration) {
        assert!(
            actual >= expected && actual < expected + Duration::from_millis(5),
            "expected ~{:?}, got {:?}",
            expected,
            actual
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let started = Instant::now();
        let mut schedule = TickSchedule::start(TICK_PERIOD);

        schedule.tick().await;
        assert_close(started.elapsed(), TICK_PERIOD);

        schedule.tick().await;
        assert_close(started.elapsed(), TICK_PERIOD * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_period() {
        let started = Instant::now();
        let mut schedule = TickSchedule::start(Duration::from_millis(250));

        schedule.tick().await;
        assert_close(started.elapsed(), Duration::from_millis(250));
        schedule.cancel();
    }
}
