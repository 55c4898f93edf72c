//! Cooperative retry timer.
//!
//! Used where the machine has to wait for the host to materialise something
//! (the notation container, the rendered elements). Nothing sleeps and nothing
//! recurses: the owner arms the timer, the host calls back into `poll` with the
//! current time, and the owner retries when the timer is due. There is no
//! attempt ceiling.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Retry {
    interval: Duration,
    due_at: Option<Instant>,
    attempts: u32,
}

impl Retry {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            due_at: None,
            attempts: 0,
        }
    }

    /// Schedule the next attempt one interval after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.attempts += 1;
        self.due_at = Some(now + self.interval);
    }

    /// Cancel any pending attempt and reset the attempt count.
    pub fn disarm(&mut self) {
        self.due_at = None;
        self.attempts = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.due_at.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.due_at.is_some_and(|due| now >= due)
    }

    /// Failed attempts since the timer was last disarmed.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
