use chrono::{Duration, Utc};
use std::cell::Cell;

/// Source of the current time in epoch milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to. Used to simulate session expiry.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: Cell::new(now_millis),
        }
    }

    pub fn set(&self, now_millis: i64) {
        self.now.set(now_millis);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by.num_milliseconds());
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}
