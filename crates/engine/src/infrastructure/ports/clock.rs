//! Time source port.

use chrono::{DateTime, Utc};

/// Supplies "now" for created/updated timestamps.
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
