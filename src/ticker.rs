//! Start/stoppable periodic timers.
//!
//! A `Ticker` only describes the schedule; iced owns the actual timer and
//! delivers each tick as a message to `update`, so ticks never preempt the
//! update loop.

use iced::Subscription;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    running: bool,
}

impl Ticker {
    /// Create a stopped ticker.
    pub fn new(interval: Duration) -> Self {
        Ticker {
            interval,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Subscription emitting `on_tick` every interval while running.
    ///
    /// `on_tick` must not capture anything (iced identifies mapped
    /// subscriptions by the closure type).
    pub fn subscription<M, F>(&self, on_tick: F) -> Subscription<M>
    where
        M: 'static,
        F: Fn(Instant) -> M + Send + Clone + 'static,
    {
        if self.is_running() {
            iced::time::every(self.interval).map(on_tick)
        } else {
            Subscription::none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::advanced::subscription::into_recipes;

    #[test]
    fn test_new_ticker_is_stopped() {
        let ticker = Ticker::new(Duration::from_millis(16));
        assert!(!ticker.is_running());
        assert_eq!(ticker.interval, Duration::from_millis(16));
    }

    #[test]
    fn test_start_stop() {
        let mut ticker = Ticker::new(Duration::from_millis(5));
        ticker.start();
        assert!(ticker.is_running());
        ticker.start();
        assert!(ticker.is_running());
        ticker.stop();
        assert!(!ticker.is_running());
    }

    #[test]
    fn test_subscription_is_empty_when_stopped() {
        let mut ticker = Ticker::new(Duration::from_millis(16));
        let stopped = into_recipes(ticker.subscription(|_: Instant| ()));
        assert!(stopped.is_empty());

        ticker.start();
        let running = into_recipes(ticker.subscription(|_: Instant| ()));
        assert_eq!(running.len(), 1);

        ticker.stop();
        assert!(into_recipes(ticker.subscription(|_: Instant| ())).is_empty());
    }
}
