//! Bounded emission across a historical time range.
//!
//! Two drivers share the same generation core but differ in unit shape:
//! file mode groups records by partition minute, stream mode accretes them
//! into byte-capped batches. Both assign synthetic historical timestamps;
//! neither paces against the wall clock (the optional inter-batch delay is
//! a fixed backpressure knob, not rate control).

use crate::config::{FilesConfig, SendConfig};
use crate::report::EmitReport;
use rand::Rng;
use std::time::Instant;
use synth_core::{EventRecord, PartitionKey, Sink, SinkError};
use synth_generator::RecordBuilder;
use tracing::info;

/// Walk `[start, end)` minute by minute and write every configured unit
/// for each minute to its partition directory.
pub async fn emit_partitioned<S: Sink, R: Rng>(
    cfg: &FilesConfig,
    builder: &RecordBuilder,
    rng: &mut R,
    sink: &mut S,
) -> Result<EmitReport, SinkError> {
    info!(
        start = %cfg.range.start,
        end = %cfg.range.end,
        records_per_file = cfg.records_per_file,
        files_per_minute = cfg.files_per_minute,
        output = %cfg.output_dir.display(),
        "generating partitioned files"
    );

    let started = Instant::now();
    let mut records: u64 = 0;
    let mut units: u64 = 0;

    let mut cursor = cfg.range.start;
    while cursor < cfg.range.end {
        let key = PartitionKey::from_datetime(&cursor);

        for _ in 0..cfg.files_per_minute {
            for _ in 0..cfg.records_per_file {
                // Jitter each record within its minute.
                let offset_secs: f64 = rng.random_range(0.0..59.0);
                let timestamp =
                    cursor + chrono::Duration::microseconds((offset_secs * 1e6) as i64);
                let record = builder.build(rng, timestamp);
                add_with_carry(sink, record, Some(&key)).await?;
                records += 1;
            }
            sink.flush(Some(&key)).await?;
            units += 1;

            if units % 100 == 0 {
                info!(files = units, records, "progress");
            }
        }

        cursor += chrono::Duration::minutes(1);
    }

    let report = EmitReport {
        records_sent: records,
        units_sent: units,
        elapsed: started.elapsed(),
    };
    info!(
        files = report.units_sent,
        records = report.records_sent,
        "partitioned generation complete"
    );
    Ok(report)
}

/// Send `total_events` across the range, with timestamps interpolated
/// linearly by emission progress (`start + span * sent/total`). The loop
/// runs as fast as the sink allows; a capacity-rejected record is carried
/// forward as the first record of the next batch, and a trailing partial
/// batch is always flushed.
pub async fn emit_range<S: Sink, R: Rng>(
    cfg: &SendConfig,
    builder: &RecordBuilder,
    rng: &mut R,
    sink: &mut S,
) -> Result<EmitReport, SinkError> {
    let total = cfg.resolved_total_events();
    let span_micros = (cfg.range.end - cfg.range.start)
        .num_microseconds()
        .unwrap_or(i64::MAX);

    info!(
        total,
        start = %cfg.range.start,
        end = %cfg.range.end,
        events_per_batch = cfg.events_per_batch,
        "sending events"
    );

    let started = Instant::now();
    let mut sent: u64 = 0;
    let mut units: u64 = 0;
    let mut carried: Option<EventRecord> = None;

    while sent < total {
        let mut in_batch = 0usize;

        while in_batch < cfg.events_per_batch && sent < total {
            let record = match carried.take() {
                Some(record) => record,
                None => {
                    let progress = sent as f64 / total as f64;
                    let timestamp = cfg.range.start
                        + chrono::Duration::microseconds(
                            (span_micros as f64 * progress) as i64,
                        );
                    builder.build(rng, timestamp)
                }
            };

            if sink.try_add(&record)? {
                in_batch += 1;
                sent += 1;
            } else {
                // Batch is at capacity; seal it and retry this record as
                // the first of the next batch.
                carried = Some(record);
                break;
            }
        }

        if in_batch > 0 {
            sink.flush(None).await?;
            units += 1;

            if units % 10 == 0 {
                let elapsed = started.elapsed().as_secs_f64();
                let rate = if elapsed > 0.0 { sent as f64 / elapsed } else { 0.0 };
                info!(sent, total, batches = units, rate, "progress");
            }
        }

        if !cfg.delay_between_batches.is_zero() {
            tokio::time::sleep(cfg.delay_between_batches).await;
        }
    }

    let report = EmitReport {
        records_sent: sent,
        units_sent: units,
        elapsed: started.elapsed(),
    };
    info!(
        sent = report.records_sent,
        batches = report.units_sent,
        "send complete"
    );
    Ok(report)
}

/// Add a record, sealing and re-adding on a capacity signal. The sink
/// contract (an empty unit accepts or errors) guarantees progress.
async fn add_with_carry<S: Sink>(
    sink: &mut S,
    record: EventRecord,
    partition: Option<&PartitionKey>,
) -> Result<(), SinkError> {
    if !sink.try_add(&record)? {
        sink.flush(partition).await?;
        sink.try_add(&record)?;
    }
    Ok(())
}
