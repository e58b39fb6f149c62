//! Owned timer primitives
//!
//! The engine holds these in `Option`s: arming is `Some(..)`, cancelling is
//! dropping. Time is measured in whole `Duration`s so repeated steps never drift.

use std::time::Duration;

/// Repeating timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    until_next: Duration,
}

impl Interval {
    /// First fire is one full period from now
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            until_next: period,
        }
    }

    /// Time left before the next fire
    pub fn due_in(&self) -> Duration {
        self.until_next
    }

    /// Advance by `dt` (never past the next fire). Returns true when it fires,
    /// after which the timer has re-armed for another period.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.until_next = self.until_next.saturating_sub(dt);
        if self.until_next.is_zero() {
            self.until_next = self.period;
            true
        } else {
            false
        }
    }
}

/// One-shot timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delay {
    remaining: Duration,
}

impl Delay {
    pub fn new(delay: Duration) -> Self {
        Self { remaining: delay }
    }

    pub fn due_in(&self) -> Duration {
        self.remaining
    }

    /// Advance by `dt`; true once the delay has elapsed
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        self.remaining.is_zero()
    }
}
