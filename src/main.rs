use anyhow::Context;
use clap::Parser;
use logsynth::cli::{Cli, Commands, FieldPolicyArg, FilesArgs, GenerateArgs, SendArgs, StreamArgs};
use logsynth::config::{FilesConfig, SendConfig, StreamConfig, TimeRange};
use logsynth::{batch, continuous, EmitReport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use synth_core::{EventTemplate, Sink};
use synth_file_sink::FileSink;
use synth_generator::{FieldPolicy, RecordBuilder};
use synth_stream_sink::StreamSink;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(report) => {
            println!(
                "Done: {} records in {} units over {:.2}s ({:.1} records/s)",
                report.records_sent,
                report.units_sent,
                report.elapsed.as_secs_f64(),
                report.records_per_second()
            );
        }
        Err(e) => {
            eprintln!("Error: {e:?}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<EmitReport> {
    match cli.command {
        Commands::Files(args) => run_files(args).await,
        Commands::Send(args) => run_send(args).await,
        Commands::Stream(args) => run_stream(args).await,
    }
}

fn builder_from(args: &GenerateArgs) -> anyhow::Result<(RecordBuilder, StdRng)> {
    let template = match &args.template {
        Some(path) => EventTemplate::from_file(path)
            .with_context(|| format!("loading template {}", path.display()))?,
        None => EventTemplate::default(),
    };
    let policy = match args.field_policy {
        FieldPolicyArg::Subset => FieldPolicy::subset(),
        FieldPolicyArg::Operational => FieldPolicy::OperationalMetadata,
    };
    Ok((
        RecordBuilder::new(template, policy),
        StdRng::seed_from_u64(args.seed),
    ))
}

async fn run_files(args: FilesArgs) -> anyhow::Result<EmitReport> {
    let (builder, mut rng) = builder_from(&args.generate)?;
    let range = TimeRange::resolve(
        args.range.start.as_deref(),
        args.range.end.as_deref(),
        args.range.duration_hours,
    )?;
    let cfg = FilesConfig {
        output_dir: args.output_dir,
        range,
        records_per_file: args.records_per_file,
        files_per_minute: args.files_per_minute,
    };

    let mut sink = FileSink::new(&cfg.output_dir);
    let report = batch::emit_partitioned(&cfg, &builder, &mut rng, &mut sink).await?;
    sink.close().await?;
    Ok(report)
}

async fn run_send(args: SendArgs) -> anyhow::Result<EmitReport> {
    let (builder, mut rng) = builder_from(&args.generate)?;
    let range = TimeRange::resolve(
        args.range.start.as_deref(),
        args.range.end.as_deref(),
        args.range.duration_hours,
    )?;
    let cfg = SendConfig::new(
        range,
        args.total_events,
        args.events_per_batch,
        Duration::from_secs_f64(args.delay_between_batches),
    )?;

    let mut sink = StreamSink::new(&args.kafka.brokers, &args.kafka.topic)?
        .with_max_batch_bytes(args.kafka.max_batch_bytes);
    if args.kafka.create_topic {
        sink.create_topic_if_not_exists(1).await?;
    }

    let report = batch::emit_range(&cfg, &builder, &mut rng, &mut sink).await?;
    sink.close().await?;
    Ok(report)
}

async fn run_stream(args: StreamArgs) -> anyhow::Result<EmitReport> {
    let (builder, mut rng) = builder_from(&args.generate)?;
    let cfg = StreamConfig::new(
        args.events_per_second,
        args.events_per_batch,
        args.duration_seconds.map(Duration::from_secs),
    )?;

    let mut sink = StreamSink::new(&args.kafka.brokers, &args.kafka.topic)?
        .with_max_batch_bytes(args.kafka.max_batch_bytes);
    if args.kafka.create_topic {
        sink.create_topic_if_not_exists(1).await?;
    }

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping after current batch");
            handler_stop.store(true, Ordering::Relaxed);
        }
    });

    let report = continuous::stream_continuous(&cfg, &builder, &mut rng, &mut sink, stop).await?;
    sink.close().await?;
    Ok(report)
}
