//! logsynth: synthetic pod-log event generation with rate-controlled
//! delivery.
//!
//! The engine builds schema-shaped log events from a template plus
//! randomized field generators and delivers them through one of two
//! drivers:
//!
//! - **Batch mode** walks a historical `[start, end)` interval and emits
//!   back-dated events, either as partitioned `.json.gz` files or as
//!   byte-capped batches to a Kafka topic.
//! - **Continuous mode** emits events with live wall-clock timestamps,
//!   paced to a target rate with a closed loop (no cross-cycle catch-up).
//!
//! Exactly one emitter drives exactly one sink per run. Generation is
//! deterministic under a fixed seed; delivery is fail-fast with no retries.

pub mod batch;
pub mod cli;
pub mod config;
pub mod continuous;
pub mod report;
pub mod testing;

pub use report::EmitReport;
