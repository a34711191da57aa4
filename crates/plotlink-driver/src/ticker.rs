use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

/// Fixed-rate scheduler.
///
/// Missed deadlines are not made up: after an overrun the next deadline is
/// one period from now.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    next: Instant,
    overruns: u64,
}

impl Ticker {
    /// The first `wait` returns after one full period.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
            overruns: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of ticks that started late.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Block until the next deadline.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if let Some(remaining) = self.next.checked_duration_since(now) {
            thread::sleep(remaining);
            self.next += self.period;
        } else {
            let late = now.duration_since(self.next);
            self.overruns = self.overruns.saturating_add(1);
            debug!(late_us = late.as_micros() as u64, "tick overran");
            self.next = now + self.period;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_roughly_one_period() {
        let mut ticker = Ticker::new(Duration::from_millis(5));
        let start = Instant::now();
        ticker.wait();
        ticker.wait();
        assert!(start.elapsed() >= Duration::from_millis(10));
        assert_eq!(ticker.period(), Duration::from_millis(5));
    }

    #[test]
    fn overrun_reschedules_without_burst() {
        let mut ticker = Ticker::new(Duration::from_millis(2));
        thread::sleep(Duration::from_millis(20));

        let before = Instant::now();
        ticker.wait();
        assert_eq!(ticker.overruns(), 1);
        assert!(ticker.next >= before + ticker.period());
    }
}
