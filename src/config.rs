//! Resolved run configuration.
//!
//! The CLI layer turns arguments into these immutable values before any
//! generation begins; everything that can be rejected is rejected here
//! (fail fast, no partial runs on malformed input).

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// Default event rate used to derive `total_events` from a time range when
/// no explicit count is given (a fixed policy, not a tunable).
pub const DEFAULT_RANGE_EVENTS_PER_SECOND: f64 = 2.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid timestamp '{0}': expected RFC 3339, YYYY-MM-DDTHH:MM:SS, or YYYY-MM-DD")]
    InvalidTimestamp(String),

    #[error("time range is empty: start {start} is not before end {end}")]
    EmptyRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("events-per-batch must be at least 1")]
    ZeroBatch,

    #[error("events-per-second must be positive, got {0}")]
    NonPositiveRate(f64),
}

/// Parse a timestamp in any of the accepted input formats.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, ConfigError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc());
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }
    Err(ConfigError::InvalidTimestamp(s.to_string()))
}

/// A half-open `[start, end)` interval of logical event time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Resolve optional start/end strings; `end` defaults to now, `start`
    /// to `end - duration_hours`.
    pub fn resolve(
        start: Option<&str>,
        end: Option<&str>,
        duration_hours: i64,
    ) -> Result<Self, ConfigError> {
        let end = match end {
            Some(s) => parse_timestamp(s)?,
            None => Utc::now(),
        };
        let start = match start {
            Some(s) => parse_timestamp(s)?,
            None => end - chrono::Duration::hours(duration_hours),
        };
        if start >= end {
            return Err(ConfigError::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn duration_seconds(&self) -> f64 {
        (self.end - self.start).num_microseconds().unwrap_or(i64::MAX) as f64 / 1e6
    }
}

/// Parameters for batch mode against the file sink.
#[derive(Debug, Clone)]
pub struct FilesConfig {
    pub output_dir: PathBuf,
    pub range: TimeRange,
    /// Records per emission unit (file). Zero writes empty files.
    pub records_per_file: u32,
    /// Units per minute. Zero still advances the cursor through the minute.
    pub files_per_minute: u32,
}

/// Parameters for batch mode against the stream sink.
#[derive(Debug, Clone)]
pub struct SendConfig {
    pub range: TimeRange,
    pub total_events: Option<u64>,
    pub events_per_batch: usize,
    /// Fixed pause after each send. Pure backpressure knob, not adaptive.
    pub delay_between_batches: Duration,
}

impl SendConfig {
    pub fn new(
        range: TimeRange,
        total_events: Option<u64>,
        events_per_batch: usize,
        delay_between_batches: Duration,
    ) -> Result<Self, ConfigError> {
        if events_per_batch == 0 {
            return Err(ConfigError::ZeroBatch);
        }
        Ok(Self {
            range,
            total_events,
            events_per_batch,
            delay_between_batches,
        })
    }

    /// Explicit count, or the fixed default of 2 events per second of range.
    pub fn resolved_total_events(&self) -> u64 {
        self.total_events.unwrap_or_else(|| {
            (self.range.duration_seconds() * DEFAULT_RANGE_EVENTS_PER_SECOND) as u64
        })
    }
}

/// Parameters for continuous mode.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub events_per_second: f64,
    pub events_per_batch: usize,
    /// Optional run budget; absent means run until cancelled.
    pub duration: Option<Duration>,
}

impl StreamConfig {
    pub fn new(
        events_per_second: f64,
        events_per_batch: usize,
        duration: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        if events_per_batch == 0 {
            return Err(ConfigError::ZeroBatch);
        }
        if !(events_per_second > 0.0) {
            return Err(ConfigError::NonPositiveRate(events_per_second));
        }
        Ok(Self {
            events_per_second,
            events_per_batch,
            duration,
        })
    }

    /// Time budget for one produce-and-send cycle.
    pub fn target_cycle_duration(&self) -> Duration {
        Duration::from_secs_f64(self.events_per_batch as f64 / self.events_per_second)
    }
}
