use std::{future, time::Duration};

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use crate::countdown::{Countdown, Tick};

struct Running {
    interval: Interval,
    countdown: Countdown,
}

/// The one repeating timer of a coordinator.
///
/// Starting always drops the previous interval first, so at most one countdown
/// is ever running. An expired countdown stops itself.
pub struct Ticker {
    period: Duration,
    running: Option<Running>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            running: None,
        }
    }

    /// Replaces any running countdown with one of `seconds`.
    ///
    /// A countdown that starts at zero fires its only tick immediately.
    pub fn start(&mut self, seconds: i64) {
        self.stop();

        let countdown = Countdown::new(seconds);
        let first = if countdown.is_expired() {
            Instant::now()
        } else {
            Instant::now() + self.period
        };
        let mut interval = interval_at(first, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        debug!(remaining = countdown.remaining(), "countdown started");
        self.running = Some(Running {
            interval,
            countdown,
        });
    }

    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            debug!(remaining = running.countdown.remaining(), "countdown stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.running.is_some()
    }

    pub fn remaining(&self) -> Option<i64> {
        self.running.as_ref().map(|r| r.countdown.remaining())
    }

    /// Waits for the next tick. Never resolves while stopped.
    ///
    /// Cancel safe: a tick lost to a `select!` branch is not consumed.
    pub async fn tick(&mut self) -> Tick {
        let Some(running) = self.running.as_mut() else {
            return future::pending().await;
        };

        running.interval.tick().await;
        let tick = if running.countdown.is_expired() {
            Tick::Expired
        } else {
            running.countdown.tick()
        };

        if tick == Tick::Expired {
            self.running = None;
        }
        tick
    }
}
