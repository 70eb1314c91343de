//! The delivery seam between emitters and destinations.
//!
//! Emitters assemble emission units record by record through [`Sink::try_add`]
//! and seal them with [`Sink::flush`]. Capacity exhaustion is a normal
//! control-flow signal (`Ok(false)`), not an error; transport and filesystem
//! failures are fatal for the run and propagate as [`SinkError`].

use crate::partition::PartitionKey;
use crate::record::EventRecord;
use async_trait::async_trait;

/// Error from a sink. No sink retries internally; whatever was already
/// sent stands, whatever was in flight is lost.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(String),

    /// A single serialized record exceeds the unit byte capacity, so the
    /// sink could never make progress on it.
    #[error("record of {size} bytes exceeds the {limit}-byte unit capacity")]
    RecordTooLarge { size: usize, limit: usize },

    /// The file sink was flushed without a partition key to place the unit.
    #[error("file sink flushed without a partition key")]
    MissingPartition,
}

/// Throughput counters reported uniformly by every sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkStats {
    /// Emission units delivered (files written or batches sent).
    pub units_sent: u64,
    /// Records delivered across all units.
    pub records_sent: u64,
}

/// A delivery destination for emission units.
///
/// Exactly one emitter drives exactly one sink per run; implementations do
/// not need to be re-entrant. Contract: `try_add` on an empty unit either
/// accepts the record or returns an error -- `Ok(false)` is only valid for
/// a non-empty unit, which guarantees emitters always make progress.
#[async_trait]
pub trait Sink {
    /// Add a record to the unit currently being assembled.
    ///
    /// Returns `Ok(false)` when the unit is at capacity; the record was
    /// not added and the caller decides when to flush and re-add it.
    fn try_add(&mut self, record: &EventRecord) -> Result<bool, SinkError>;

    /// Number of records in the unit currently being assembled.
    fn pending(&self) -> usize;

    /// Seal the assembled unit and deliver it. File destinations require
    /// the partition key the unit belongs to; stream destinations ignore it.
    async fn flush(&mut self, partition: Option<&PartitionKey>) -> Result<(), SinkError>;

    /// Release the underlying transport. Does not deliver a partial unit;
    /// emitters flush explicitly before closing.
    async fn close(&mut self) -> Result<(), SinkError>;

    /// Counters for units and records delivered so far.
    fn stats(&self) -> SinkStats;
}
