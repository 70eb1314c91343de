//! Stream sink: delivers emission units to a Kafka topic.
//!
//! The unit under assembly is a byte-capped batch of compact-serialized
//! records. The transport's real ceiling is not known a priori, so the cap
//! is enforced locally and surfaced the same way the transport would: a
//! rejected append (`Ok(false)`) seals the unit. Sends are not retried;
//! the first transport error ends the run.

use async_trait::async_trait;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::ClientConfig;
use std::time::Duration;
use synth_core::{EventRecord, PartitionKey, Sink, SinkError, SinkStats};
use tracing::{debug, info};

/// Default cap on the serialized size of one batch.
pub const DEFAULT_MAX_BATCH_BYTES: usize = 1024 * 1024;

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Kafka-backed sink. One instance targets one topic for the whole run.
pub struct StreamSink {
    producer: FutureProducer,
    brokers: String,
    topic: String,
    payloads: Vec<Vec<u8>>,
    pending_bytes: usize,
    max_batch_bytes: usize,
    stats: SinkStats,
}

impl StreamSink {
    /// Create a producer for the given brokers and topic. Credential
    /// acquisition beyond the broker address is outside this layer.
    pub fn new(brokers: &str, topic: &str) -> Result<Self, SinkError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        Ok(Self {
            producer,
            brokers: brokers.to_string(),
            topic: topic.to_string(),
            payloads: Vec::new(),
            pending_bytes: 0,
            max_batch_bytes: DEFAULT_MAX_BATCH_BYTES,
            stats: SinkStats::default(),
        })
    }

    pub fn with_max_batch_bytes(mut self, max_batch_bytes: usize) -> Self {
        self.max_batch_bytes = max_batch_bytes;
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Create the target topic if it doesn't exist.
    pub async fn create_topic_if_not_exists(&self, partitions: i32) -> Result<(), SinkError> {
        let admin_client: AdminClient<DefaultClientContext> = ClientConfig::new()
            .set("bootstrap.servers", &self.brokers)
            .create()
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        let new_topic = NewTopic::new(&self.topic, partitions, TopicReplication::Fixed(1));
        let opts = AdminOptions::new().operation_timeout(Some(Duration::from_secs(5)));

        let results = admin_client
            .create_topics(&[new_topic], &opts)
            .await
            .map_err(|e| SinkError::Transport(format!("failed to create topic: {e}")))?;

        for result in results {
            match result {
                Ok(topic_name) => {
                    info!("Topic '{topic_name}' created successfully");
                }
                Err((topic_name, err)) => {
                    if err.to_string().contains("already exists") {
                        info!("Topic '{topic_name}' already exists");
                    } else {
                        return Err(SinkError::Transport(format!(
                            "failed to create topic {topic_name}: {err}"
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Sink for StreamSink {
    fn try_add(&mut self, record: &EventRecord) -> Result<bool, SinkError> {
        let payload = serde_json::to_vec(record)?;
        if payload.len() > self.max_batch_bytes {
            return Err(SinkError::RecordTooLarge {
                size: payload.len(),
                limit: self.max_batch_bytes,
            });
        }
        if !self.payloads.is_empty() && self.pending_bytes + payload.len() > self.max_batch_bytes
        {
            return Ok(false);
        }
        self.pending_bytes += payload.len();
        self.payloads.push(payload);
        Ok(true)
    }

    fn pending(&self) -> usize {
        self.payloads.len()
    }

    async fn flush(&mut self, _partition: Option<&PartitionKey>) -> Result<(), SinkError> {
        let batch = std::mem::take(&mut self.payloads);
        let count = batch.len();
        self.pending_bytes = 0;

        for payload in &batch {
            let record = FutureRecord::<(), _>::to(&self.topic).payload(payload);
            self.producer
                .send(record, SEND_TIMEOUT)
                .await
                .map_err(|(err, _)| SinkError::Transport(err.to_string()))?;
        }

        debug!(topic = %self.topic, records = count, "sent batch");
        self.stats.units_sent += 1;
        self.stats.records_sent += count as u64;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SinkError> {
        self.producer
            .flush(SEND_TIMEOUT)
            .map_err(|e| SinkError::Transport(e.to_string()))?;
        Ok(())
    }

    fn stats(&self) -> SinkStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};
    use synth_core::EventTemplate;

    fn record() -> EventRecord {
        EventRecord {
            identity: EventTemplate::default(),
            timestamp: "2026-01-01T00:00:00.0000000Z".to_string(),
            data: Map::new(),
        }
    }

    fn record_size() -> usize {
        serde_json::to_vec(&record()).unwrap().len()
    }

    // Creating a producer performs no network I/O, so capacity logic is
    // testable without a broker.
    #[test]
    fn test_try_add_signals_capacity_at_byte_cap() {
        let size = record_size();
        let mut sink = StreamSink::new("localhost:9092", "events")
            .unwrap()
            .with_max_batch_bytes(size * 2 + 1);

        assert!(sink.try_add(&record()).unwrap());
        assert!(sink.try_add(&record()).unwrap());
        // Third record would exceed the cap on a non-empty batch.
        assert!(!sink.try_add(&record()).unwrap());
        assert_eq!(sink.pending(), 2);
    }

    #[test]
    fn test_oversized_record_is_an_error_not_a_signal() {
        let mut sink = StreamSink::new("localhost:9092", "events")
            .unwrap()
            .with_max_batch_bytes(8);

        let err = sink.try_add(&record()).unwrap_err();
        assert!(matches!(err, SinkError::RecordTooLarge { .. }));
        assert_eq!(sink.pending(), 0);
    }

    #[test]
    fn test_empty_batch_always_accepts_a_fitting_record() {
        let size = record_size();
        let mut sink = StreamSink::new("localhost:9092", "events")
            .unwrap()
            .with_max_batch_bytes(size);

        // Exactly at the cap: accepted into the empty batch, next one rejected.
        assert!(sink.try_add(&record()).unwrap());
        assert!(!sink.try_add(&record()).unwrap());
    }
}
