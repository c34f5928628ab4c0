use crate::models::{ListingRecord, HEADER};
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Append-only CSV writer for listing rows.
///
/// Every row is flushed as soon as it is written, and the underlying
/// `csv::Writer` flushes again when the sink is dropped.
pub struct ListingSink<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl ListingSink<File> {
    /// Open `path` for appending, creating it if needed.
    ///
    /// The header row is written only when the file is new or empty.
    pub fn open_append(path: &Path) -> Result<Self> {
        let is_new = match std::fs::metadata(path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {} for appending", path.display()))?;

        debug!(path = %path.display(), is_new, "Opened output file");
        Self::new(file, is_new)
    }
}

impl<W: Write> ListingSink<W> {
    pub fn new(inner: W, write_header: bool) -> Result<Self> {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);

        let mut sink = Self {
            writer,
            rows_written: 0,
        };

        if write_header {
            sink.writer
                .write_record(HEADER)
                .context("Failed to write header row")?;
            sink.writer.flush().context("Failed to flush header row")?;
        }

        Ok(sink)
    }

    pub fn append(&mut self, record: &ListingRecord) -> Result<()> {
        self.writer
            .serialize(record)
            .with_context(|| format!("Failed to write row for {}", record.link))?;
        self.writer.flush().context("Failed to flush output")?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and hand back the underlying writer, reporting flush errors.
    pub fn close(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush output: {}", e.error()))
    }
}
