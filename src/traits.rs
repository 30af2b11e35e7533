//! Abstraction over time so availability text can be tested deterministically.

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDateTime};

/// Trait for abstracting time access.
///
/// Opening hours are evaluated against the wall clock of the person
/// searching, so `now_local` hands out a naive local timestamp.
pub trait Clock: Send + Sync {
    /// Get the current local wall-clock time.
    fn now_local(&self) -> NaiveDateTime;
}

/// System clock implementation using real time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Mock clock for testing with controllable time.
#[derive(Debug, Clone)]
pub struct MockClock {
    local_time: Arc<Mutex<NaiveDateTime>>,
}

impl MockClock {
    /// Create a new mock clock showing the given wall-clock time.
    pub fn new(time: NaiveDateTime) -> Self {
        Self {
            local_time: Arc::new(Mutex::new(time)),
        }
    }

    /// Set the mock clock to a new time.
    pub fn set_time(&self, time: NaiveDateTime) {
        *self.local_time.lock().unwrap() = time;
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, duration: chrono::Duration) {
        let mut time = self.local_time.lock().unwrap();
        *time += duration;
    }
}

impl Clock for MockClock {
    fn now_local(&self) -> NaiveDateTime {
        *self.local_time.lock().unwrap()
    }
}
