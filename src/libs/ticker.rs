//! Periodic refresh scheduler for the running clock.
//!
//! The ticker is armed while the stopwatch runs and disarmed otherwise. A
//! disarmed ticker never fires, so it can sit in a `tokio::select!` branch
//! without waking the event loop.

use std::future;
use tokio::time::{self, Duration, Instant, Interval, MissedTickBehavior};

/// Lowest refresh period accepted, in milliseconds.
pub const MIN_PERIOD_MS: u64 = 10;

pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Ticker {
    /// Creates a disarmed ticker. Periods below [`MIN_PERIOD_MS`] are raised to it.
    pub fn new(period_ms: u64) -> Self {
        Self {
            period: Duration::from_millis(period_ms.max(MIN_PERIOD_MS)),
            interval: None,
        }
    }

    /// Arms or disarms the ticker to match `active`.
    pub fn sync(&mut self, active: bool) {
        match (active, self.interval.is_some()) {
            (true, false) => {
                let mut interval = time::interval_at(Instant::now() + self.period, self.period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                self.interval = Some(interval);
            }
            (false, true) => self.interval = None,
            _ => {}
        }
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Waits for the next tick. Pends forever while disarmed.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}
