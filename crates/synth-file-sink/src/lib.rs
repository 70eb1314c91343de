//! File sink: writes emission units as gzip-compressed newline-delimited
//! JSON under a time-partitioned directory hierarchy.
//!
//! Layout: `<root>/year=YYYY/month=MM/day=DD/hour=HH/minute=mm/<uuid>.json.gz`,
//! one file per emission unit. A unit is never split across partition
//! directories; the caller tags each flush with the partition key the whole
//! unit belongs to.

use async_trait::async_trait;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use synth_core::{unit_file_name, EventRecord, PartitionKey, Sink, SinkError, SinkStats};
use tracing::debug;

/// Sink that writes each unit as one `.json.gz` file under the partition
/// path for its minute. Directory creation is idempotent; any I/O error is
/// fatal for the run.
pub struct FileSink {
    root: PathBuf,
    lines: Vec<String>,
    stats: SinkStats,
}

impl FileSink {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            lines: Vec::new(),
            stats: SinkStats::default(),
        }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[async_trait]
impl Sink for FileSink {
    /// Files have no byte cap; this never signals capacity.
    fn try_add(&mut self, record: &EventRecord) -> Result<bool, SinkError> {
        self.lines.push(record.to_json_line()?);
        Ok(true)
    }

    fn pending(&self) -> usize {
        self.lines.len()
    }

    async fn flush(&mut self, partition: Option<&PartitionKey>) -> Result<(), SinkError> {
        let key = partition.ok_or(SinkError::MissingPartition)?;

        let dir = self.root.join(key.relative_path());
        std::fs::create_dir_all(&dir)?;

        let path = dir.join(unit_file_name());
        let file = File::create(&path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        for line in &self.lines {
            encoder.write_all(line.as_bytes())?;
            encoder.write_all(b"\n")?;
        }
        encoder.finish()?.flush()?;

        debug!(
            path = %path.display(),
            records = self.lines.len(),
            "wrote partition file"
        );

        self.stats.units_sent += 1;
        self.stats.records_sent += self.lines.len() as u64;
        self.lines.clear();
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SinkError> {
        // Nothing held open between units.
        Ok(())
    }

    fn stats(&self) -> SinkStats {
        self.stats
    }
}
