// tests/support/mocks.rs
use chrono::{DateTime, TimeZone, Utc};
use dispatch_core::application::ports::time::Clock;
use once_cell::sync::Lazy;

pub static FIXED_NOW: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2024, 9, 3, 8, 30, 0).unwrap());

/// Clock pinned to `FIXED_NOW` so timestamps in responses are predictable.
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *FIXED_NOW
    }
}
