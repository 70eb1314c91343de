//! In-memory sink for exercising the emitters without files or brokers.

use async_trait::async_trait;
use std::time::Duration;
use synth_core::{EventRecord, PartitionKey, Sink, SinkError, SinkStats};

/// Sink that records everything it is given. An optional per-unit record
/// cap lets tests drive the capacity path, and an optional flush delay
/// simulates a slow transport under the paused tokio clock.
#[derive(Default)]
pub struct RecordingSink {
    pub max_records_per_unit: Option<usize>,
    pub flush_delay: Option<Duration>,
    /// Sealed units in flush order.
    pub units: Vec<Vec<EventRecord>>,
    /// Partition key passed to each flush.
    pub flush_partitions: Vec<Option<PartitionKey>>,
    /// When each flush began, for pacing assertions.
    pub flush_times: Vec<tokio::time::Instant>,
    pending: Vec<EventRecord>,
    stats: SinkStats,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_records_per_unit(mut self, max: usize) -> Self {
        self.max_records_per_unit = Some(max);
        self
    }

    pub fn with_flush_delay(mut self, delay: Duration) -> Self {
        self.flush_delay = Some(delay);
        self
    }

    /// All records across all sealed units, in emission order.
    pub fn all_records(&self) -> impl Iterator<Item = &EventRecord> {
        self.units.iter().flatten()
    }
}

#[async_trait]
impl Sink for RecordingSink {
    fn try_add(&mut self, record: &EventRecord) -> Result<bool, SinkError> {
        if let Some(max) = self.max_records_per_unit {
            if !self.pending.is_empty() && self.pending.len() >= max {
                return Ok(false);
            }
        }
        self.pending.push(record.clone());
        Ok(true)
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }

    async fn flush(&mut self, partition: Option<&PartitionKey>) -> Result<(), SinkError> {
        self.flush_times.push(tokio::time::Instant::now());
        if let Some(delay) = self.flush_delay {
            tokio::time::sleep(delay).await;
        }
        let unit = std::mem::take(&mut self.pending);
        self.stats.units_sent += 1;
        self.stats.records_sent += unit.len() as u64;
        self.flush_partitions.push(partition.copied());
        self.units.push(unit);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    fn stats(&self) -> SinkStats {
        self.stats
    }
}
