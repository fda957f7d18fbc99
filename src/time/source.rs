//! Time source abstraction for supporting both real and fixed time.
//!
//! Gesture handling, overlap checks against ongoing naps, and the
//! confirmation timeout cycle all depend on "now". Injecting the clock as a
//! collaborator keeps every one of those paths deterministic under test
//! instead of racing the wall clock.

use chrono::{DateTime, Local};

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Local>;

    /// Check if this is a fixed (test-controlled) time source
    fn is_fixed(&self) -> bool {
        false
    }
}

/// Real-time implementation that uses the actual system clock
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fixed time source for deterministic tests.
///
/// Holds an explicit instant that tests advance manually. Interior mutability
/// keeps the `TimeSource` methods `&self`, matching the trait the engine
/// consumes through an `Arc`.
#[cfg(any(test, feature = "testing-support"))]
pub struct FixedTimeSource {
    current: std::sync::Mutex<DateTime<Local>>,
}

#[cfg(any(test, feature = "testing-support"))]
impl FixedTimeSource {
    /// Create a fixed time source pinned to the given instant
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            current: std::sync::Mutex::new(start),
        }
    }

    /// Jump the clock to a specific instant
    pub fn set(&self, instant: DateTime<Local>) {
        *self.current.lock().unwrap() = instant;
    }

    /// Advance the clock by a duration
    pub fn advance(&self, duration: chrono::Duration) {
        let mut guard = self.current.lock().unwrap();
        *guard += duration;
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Local> {
        *self.current.lock().unwrap()
    }

    fn is_fixed(&self) -> bool {
        true
    }
}
