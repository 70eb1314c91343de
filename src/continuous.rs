//! Continuous emission paced to a target rate.
//!
//! Each cycle builds up to `events_per_batch` records stamped with the
//! current wall clock, sends them, then sleeps off whatever remains of the
//! cycle's time budget. Pacing is closed-loop per cycle: an over-budget
//! cycle is not compensated for afterwards, so sustained throughput
//! degrades gracefully instead of bursting to catch up.

use crate::config::StreamConfig;
use crate::report::EmitReport;
use chrono::Utc;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use synth_core::{Sink, SinkError};
use synth_generator::RecordBuilder;
use tracing::info;

/// Run cycles until `stop` is set or the configured duration elapses.
/// Both conditions are checked at cycle boundaries only; an in-flight
/// batch always completes.
pub async fn stream_continuous<S: Sink, R: Rng>(
    cfg: &StreamConfig,
    builder: &RecordBuilder,
    rng: &mut R,
    sink: &mut S,
    stop: Arc<AtomicBool>,
) -> Result<EmitReport, SinkError> {
    let target_cycle = cfg.target_cycle_duration();
    info!(
        events_per_second = cfg.events_per_second,
        events_per_batch = cfg.events_per_batch,
        "streaming events"
    );

    let run_start = tokio::time::Instant::now();
    let deadline = cfg.duration.map(|d| run_start + d);
    let mut sent: u64 = 0;
    let mut units: u64 = 0;
    let mut cycles: u64 = 0;

    loop {
        let cycle_start = tokio::time::Instant::now();

        let mut added = 0usize;
        while added < cfg.events_per_batch {
            let record = builder.build(rng, Utc::now());
            if !sink.try_add(&record)? {
                // Capacity before the count target; send a short batch.
                break;
            }
            added += 1;
        }

        if added > 0 {
            sink.flush(None).await?;
            sent += added as u64;
            units += 1;
        }
        cycles += 1;

        if cycles % 100 == 0 {
            let elapsed = run_start.elapsed().as_secs_f64();
            let rate = if elapsed > 0.0 { sent as f64 / elapsed } else { 0.0 };
            info!(sent, batches = units, rate, "progress");
        }

        // Sleep off the remainder of this cycle's budget, if any.
        if let Some(remaining) = target_cycle.checked_sub(cycle_start.elapsed()) {
            tokio::time::sleep(remaining).await;
        }

        if stop.load(Ordering::Relaxed) {
            info!("stop requested, finishing");
            break;
        }
        if let Some(deadline) = deadline {
            if tokio::time::Instant::now() >= deadline {
                break;
            }
        }
    }

    let report = EmitReport {
        records_sent: sent,
        units_sent: units,
        elapsed: run_start.elapsed(),
    };
    info!(
        sent = report.records_sent,
        batches = report.units_sent,
        "streaming complete"
    );
    Ok(report)
}
