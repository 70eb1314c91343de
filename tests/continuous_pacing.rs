use logsynth::config::StreamConfig;
use logsynth::continuous;
use logsynth::testing::RecordingSink;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use synth_generator::{FieldPolicy, RecordBuilder};

fn builder() -> RecordBuilder {
    RecordBuilder::new(Default::default(), FieldPolicy::OperationalMetadata)
}

// The paused tokio clock advances only across awaits, so cycle timing is
// exact and these assertions are not flaky.

#[tokio::test(start_paused = true)]
async fn test_cycles_are_spaced_at_the_target_interval() {
    let cfg = StreamConfig::new(10.0, 10, Some(Duration::from_secs(5))).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let mut sink = RecordingSink::new();
    let stop = Arc::new(AtomicBool::new(false));

    let report = continuous::stream_continuous(&cfg, &builder(), &mut rng, &mut sink, stop)
        .await
        .unwrap();

    // 10 events/s at 10 per batch is one batch per second for 5 seconds.
    assert_eq!(report.units_sent, 5);
    assert_eq!(report.records_sent, 50);

    for pair in sink.flush_times.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(
            gap >= Duration::from_millis(990) && gap <= Duration::from_millis(1010),
            "cycle gap was {gap:?}"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_over_budget_cycle_is_not_compensated() {
    let cfg = StreamConfig::new(10.0, 10, Some(Duration::from_secs(3))).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    // Each send takes 1.2s against a 1s cycle budget.
    let mut sink = RecordingSink::new().with_flush_delay(Duration::from_millis(1200));
    let stop = Arc::new(AtomicBool::new(false));

    let report = continuous::stream_continuous(&cfg, &builder(), &mut rng, &mut sink, stop)
        .await
        .unwrap();

    // No sleep is added and no catch-up burst follows; cycles simply run
    // back to back at the send latency.
    assert_eq!(report.units_sent, 3);
    for pair in sink.flush_times.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(
            gap >= Duration::from_millis(1190) && gap <= Duration::from_millis(1210),
            "cycle gap was {gap:?}"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_stop_flag_ends_the_run_after_the_current_batch() {
    let cfg = StreamConfig::new(10.0, 10, None).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let mut sink = RecordingSink::new();
    let stop = Arc::new(AtomicBool::new(true));

    let report = continuous::stream_continuous(&cfg, &builder(), &mut rng, &mut sink, stop)
        .await
        .unwrap();

    // The flag is only observed at the cycle boundary, so the first batch
    // still goes out whole.
    assert_eq!(report.units_sent, 1);
    assert_eq!(report.records_sent, 10);
}

#[tokio::test(start_paused = true)]
async fn test_capacity_truncates_the_cycle_but_counts_what_was_sent() {
    let cfg = StreamConfig::new(10.0, 10, Some(Duration::from_secs(2))).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    // The sink seals at 7 records, below the 10-record cycle target.
    let mut sink = RecordingSink::new().with_max_records_per_unit(7);
    let stop = Arc::new(AtomicBool::new(false));

    let report = continuous::stream_continuous(&cfg, &builder(), &mut rng, &mut sink, stop)
        .await
        .unwrap();

    assert_eq!(report.units_sent, 2);
    assert_eq!(report.records_sent, 14);
    assert!(sink.units.iter().all(|u| u.len() == 7));
}

#[tokio::test(start_paused = true)]
async fn test_stop_flag_shared_with_a_setter_task() {
    let cfg = StreamConfig::new(10.0, 10, None).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let mut sink = RecordingSink::new();
    let stop = Arc::new(AtomicBool::new(false));

    let setter_stop = stop.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(2500)).await;
        setter_stop.store(true, Ordering::Relaxed);
    });

    let report = continuous::stream_continuous(&cfg, &builder(), &mut rng, &mut sink, stop)
        .await
        .unwrap();

    // Cycles complete at 1s, 2s, 3s; the flag set at 2.5s is seen after
    // the third cycle's sleep.
    assert_eq!(report.units_sent, 3);
    assert_eq!(report.records_sent, 30);
}
