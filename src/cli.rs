//! Command-line surface.
//!
//! Each subcommand pairs one emitter with one sink; combinations outside
//! the supported set simply do not exist as commands.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "logsynth",
    about = "Synthetic pod-log event generator with file and Kafka delivery"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate time-partitioned gzip JSONL files for a historical range
    Files(FilesArgs),
    /// Send a bounded number of back-dated events to a Kafka topic
    Send(SendArgs),
    /// Stream live-timestamped events to a Kafka topic at a target rate
    Stream(StreamArgs),
}

/// Which generator fills the per-record `data` object.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicyArg {
    /// A random subset of the optional correlation fields
    Subset,
    /// The full operational metadata block
    Operational,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Seed for the random generator; identical seeds reproduce identical
    /// record streams
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// JSON file overriding the built-in identity template
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Generator for the per-record data payload
    #[arg(long, value_enum, default_value_t = FieldPolicyArg::Operational)]
    pub field_policy: FieldPolicyArg,
}

#[derive(Args, Debug)]
pub struct RangeArgs {
    /// Range start (RFC 3339, YYYY-MM-DDTHH:MM:SS, or YYYY-MM-DD);
    /// defaults to end minus --duration-hours
    #[arg(long)]
    pub start: Option<String>,

    /// Range end; defaults to now
    #[arg(long)]
    pub end: Option<String>,

    /// Range length when --start is omitted
    #[arg(long, default_value_t = 1)]
    pub duration_hours: i64,
}

#[derive(Args, Debug)]
pub struct KafkaArgs {
    /// Kafka bootstrap servers
    #[arg(long, env = "LOGSYNTH_BROKERS", default_value = "localhost:9092")]
    pub brokers: String,

    /// Target topic
    #[arg(long, env = "LOGSYNTH_TOPIC")]
    pub topic: String,

    /// Create the topic (single partition) before sending
    #[arg(long)]
    pub create_topic: bool,

    /// Cap on the serialized size of one batch
    #[arg(long, default_value_t = 1024 * 1024)]
    pub max_batch_bytes: usize,
}

#[derive(Args, Debug)]
pub struct FilesArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Root directory for the partition tree
    #[arg(long, default_value = "./output")]
    pub output_dir: PathBuf,

    /// Records written to each file
    #[arg(long, default_value_t = 10)]
    pub records_per_file: u32,

    /// Files written for each minute of the range
    #[arg(long, default_value_t = 2)]
    pub files_per_minute: u32,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,

    #[command(flatten)]
    pub range: RangeArgs,

    #[command(flatten)]
    pub kafka: KafkaArgs,

    /// Events to send; defaults to 2 per second of range
    #[arg(long)]
    pub total_events: Option<u64>,

    /// Target records per batch
    #[arg(long, default_value_t = 100)]
    pub events_per_batch: usize,

    /// Fixed pause in seconds after each batch
    #[arg(long, default_value_t = 0.0)]
    pub delay_between_batches: f64,
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,

    #[command(flatten)]
    pub kafka: KafkaArgs,

    /// Target sustained event rate
    #[arg(long, default_value_t = 10.0)]
    pub events_per_second: f64,

    /// Records per send cycle
    #[arg(long, default_value_t = 10)]
    pub events_per_batch: usize,

    /// Stop after this many seconds; omit to run until interrupted
    #[arg(long)]
    pub duration_seconds: Option<u64>,
}
