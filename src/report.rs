//! Run-level throughput reporting.

use std::time::Duration;

/// Counters for one emitter run, consistent with the driven sink's own
/// [`synth_core::SinkStats`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitReport {
    /// Records accepted by the sink.
    pub records_sent: u64,
    /// Emission units delivered (files written or batches sent).
    pub units_sent: u64,
    /// Wall-clock time for the whole run.
    pub elapsed: Duration,
}

impl EmitReport {
    /// Achieved records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.records_sent as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}
