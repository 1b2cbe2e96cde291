//! Pure countdown state. No timers, no rendering.

/// Outcome of one decrement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Seconds still on the clock, always positive.
    Remaining(i64),
    /// The clock hit zero; the round is due for settlement.
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: i64,
}

impl Countdown {
    /// Negative starting values are treated as zero.
    pub fn new(seconds: i64) -> Self {
        Self {
            remaining: seconds.max(0),
        }
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0
    }

    /// Removes one second. Never goes below zero.
    pub fn tick(&mut self) -> Tick {
        self.remaining = (self.remaining - 1).max(0);
        if self.remaining == 0 {
            Tick::Expired
        } else {
            Tick::Remaining(self.remaining)
        }
    }
}

/// `MM:SS`, zero-padded. Minutes keep growing past 99 instead of wrapping.
pub fn format_clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
