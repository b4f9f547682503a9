//! Delimited input and the two output sinks.

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use asinmap_core::ResolutionOutcome;

/// Reads the input catalog: comma-separated, first record is a header and
/// is skipped, fields trimmed, short records passed through for the driver
/// to reject (they are diagnostic failures, not parse errors).
pub(crate) struct InputReader {
    reader: csv::Reader<File>,
    record_number: u64,
}

impl InputReader {
    pub(crate) fn open(path: &Path) -> anyhow::Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("unable to open data file {}", path.display()))?;
        Ok(Self {
            reader,
            record_number: 0,
        })
    }

    /// The next data record with its 1-based line number. Record 1 (the
    /// header) is skipped; `None` at end of input.
    pub(crate) fn next_record(&mut self) -> anyhow::Result<Option<(u64, Vec<String>)>> {
        let mut record = csv::StringRecord::new();
        loop {
            let more = self
                .reader
                .read_record(&mut record)
                .context("failed reading input record")?;
            if !more {
                return Ok(None);
            }
            self.record_number += 1;
            if self.record_number == 1 {
                continue;
            }
            let fields = record.iter().map(str::to_string).collect();
            return Ok(Some((self.record_number, fields)));
        }
    }
}

#[derive(Debug, Serialize)]
struct SuccessRecord<'a> {
    sku: &'a str,
    asin: &'a str,
}

#[derive(Debug, Serialize)]
struct FailureRecord<'a> {
    line: u64,
    sku: Option<&'a str>,
    reason: String,
}

/// The success and failure sinks. Exactly one record is appended per
/// finalized row, to exactly one of the two files.
pub(crate) struct OutcomeWriters {
    success: csv::Writer<File>,
    failure: csv::Writer<File>,
}

impl OutcomeWriters {
    pub(crate) fn create(output: &Path, errors: &Path) -> anyhow::Result<Self> {
        let success = open_writer(output)?;
        let failure = open_writer(errors)?;
        Ok(Self { success, failure })
    }

    pub(crate) fn write(&mut self, outcome: &ResolutionOutcome) -> anyhow::Result<()> {
        match outcome {
            ResolutionOutcome::Success { sku, asin } => self
                .success
                .serialize(SuccessRecord { sku, asin })
                .context("failed writing success record")?,
            ResolutionOutcome::Failure {
                line_number,
                sku,
                reason,
            } => self
                .failure
                .serialize(FailureRecord {
                    line: *line_number,
                    sku: sku.as_deref(),
                    reason: reason.to_string(),
                })
                .context("failed writing failure record")?,
        }
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> anyhow::Result<()> {
        self.success.flush().context("failed flushing success file")?;
        self.failure.flush().context("failed flushing error file")?;
        Ok(())
    }
}

fn open_writer(path: &Path) -> anyhow::Result<csv::Writer<File>> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("unable to open {} for writing", path.display()))
}
