//! Time provider abstraction
//!
//! This module provides a [`Clock`] trait that abstracts over time sources,
//! allowing production code to use real system time while tests can pin the
//! instant a token's expiry is evaluated against.
//!
//! # Example
//!
//! ```
//! use precog::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! let now = clock.now();
//! assert!(clock.now_millis() >= now.timestamp_millis());
//! ```

use std::fmt::Debug;
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};

/// A time provider for getting the current instant.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current time as milliseconds since Unix epoch.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Returns the current time as an RFC3339-formatted string.
    fn now_rfc3339(&self) -> String {
        self.now().to_rfc3339()
    }
}

/// Production clock using real system time.
///
/// This is the default clock used by [`crate::Precog`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually controlled clock.
///
/// Unlike [`SystemClock`] the time only moves when [`FixedClock::advance`] or
/// [`FixedClock::set`] is called, so expiry checks made against it are exact.
///
/// ```
/// use chrono::Duration;
/// use precog::{Clock, FixedClock};
///
/// let clock = FixedClock::from_millis(1_000);
/// assert_eq!(clock.now_millis(), 1_000);
/// clock.advance(Duration::milliseconds(500));
/// assert_eq!(clock.now_millis(), 1_500);
/// ```
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Create a clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Create a clock frozen at the given milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        let now = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or_default();
        Self::new(now)
    }

    /// Move the clock forward (or backward, for a negative duration).
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    /// Set the clock to a specific instant.
    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01 00:00:00 UTC
        Self::from_millis(1_704_067_200_000)
    }
}

impl Clone for FixedClock {
    fn clone(&self) -> Self {
        Self::new(self.now())
    }
}
