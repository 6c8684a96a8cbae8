//! Time source injection for deadline checks.
//!
//! The settlement engine compares authorization deadlines against an
//! injected [`TimeSource`] rather than reading the system clock directly,
//! so tests can pin the clock.

use chrono::Utc;

/// Read-only wall-clock seconds since the UNIX epoch.
pub trait TimeSource {
    fn now_secs(&self) -> u64;
}

/// Production time source backed by the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_secs(&self) -> u64 {
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

/// Pinned time source for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub u64);

#[cfg(any(test, feature = "test-helpers"))]
impl TimeSource for FixedTimeSource {
    fn now_secs(&self) -> u64 {
        self.0
    }
}
