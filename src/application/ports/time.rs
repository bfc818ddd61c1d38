// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of timestamps for pages, placements and article revisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
