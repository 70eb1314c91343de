//! Core types shared by the logsynth generator, emitters and sinks.
//!
//! This crate defines the event record shape, the timestamp-to-partition
//! mapping, and the `Sink` delivery seam. It performs no I/O itself; the
//! sink implementations live in their own crates.

pub mod partition;
pub mod record;
pub mod sink;

pub use partition::{unit_file_name, PartitionKey};
pub use record::{format_event_timestamp, EventRecord, EventTemplate, TemplateError};
pub use sink::{Sink, SinkError, SinkStats};
