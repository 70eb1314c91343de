//! Timestamp-to-partition mapping.
//!
//! A [`PartitionKey`] is a pure function of an event timestamp, truncated
//! to the minute. The mapper performs no I/O; directory creation belongs to
//! the file sink.

use chrono::{DateTime, Datelike, Timelike, Utc};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// The `(year, month, day, hour, minute)` tuple a timestamp falls into.
///
/// Two timestamps within the same minute map to the same key. Keys order
/// the same way the timestamps do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl PartitionKey {
    /// Derive the partition key for a timestamp.
    pub fn from_datetime(timestamp: &DateTime<Utc>) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
            day: timestamp.day(),
            hour: timestamp.hour(),
            minute: timestamp.minute(),
        }
    }

    /// Relative directory path for this partition:
    /// `year=YYYY/month=MM/day=DD/hour=HH/minute=mm`.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.to_string())
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "year={:04}/month={:02}/day={:02}/hour={:02}/minute={:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

/// A fresh unique leaf file name for one emission unit.
///
/// Uniqueness comes from the UUID v4 space; the name carries no content
/// derived from the records.
pub fn unit_file_name() -> String {
    format!("{}.json.gz", Uuid::new_v4())
}
