//! Wall-clock timestamps for log entries and photos

use time::macros::format_description;
use time::{OffsetDateTime, Time};

/// Source of `HH:MM:SS` wall-clock strings
pub trait Clock {
    fn timestamp(&self) -> String;
}

/// Formats a time of day the way every timestamp in the dashboard is shown
pub fn format_time_of_day(time: Time) -> String {
    let format = format_description!("[hour]:[minute]:[second]");
    time.format(&format)
        .unwrap_or_else(|_| format!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second()))
}

/// Local wall time, falling back to UTC when the local offset is unknown
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        format_time_of_day(now.time())
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(pub String);

impl FixedClock {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self(timestamp.into())
    }
}

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}
