//! Injectable wall-clock source.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::TimeMs;

/// Source of the current time for every time-dependent calculation.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> TimeMs;
}

/// Reads the system clock via chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeMs {
        TimeMs::new(chrono::Utc::now().timestamp_millis())
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Default)]
pub struct FixedClock {
    now_ms: AtomicI64,
}

impl FixedClock {
    pub fn new(now: TimeMs) -> Self {
        Self {
            now_ms: AtomicI64::new(now.as_ms()),
        }
    }

    pub fn at_secs(secs: i64) -> Self {
        Self::new(TimeMs::from_secs(secs))
    }

    pub fn set(&self, now: TimeMs) {
        self.now_ms.store(now.as_ms(), Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.now_ms
            .fetch_add(secs.saturating_mul(1000), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> TimeMs {
        TimeMs::new(self.now_ms.load(Ordering::SeqCst))
    }
}
