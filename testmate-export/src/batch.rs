//! Multi-format export with per-format outcome reporting.

use crate::csv::write_delimited;
use crate::error::ExportError;
use crate::matrix::ExportMatrix;
use std::fmt;
use std::io;
use tracing::warn;

/// A delimited-text output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
}

impl ExportFormat {
    /// Conventional file extension for the format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
        }
    }

    fn delimiter(&self) -> u8 {
        match self {
            ExportFormat::Csv => b',',
            ExportFormat::Tsv => b'\t',
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Outcome of a multi-target export.
///
/// One failing target does not abort the rest; each target gets its own
/// entry in the tally.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Formats written successfully.
    pub succeeded: Vec<ExportFormat>,
    /// Formats that failed, with the error for each.
    pub failed: Vec<(ExportFormat, ExportError)>,
}

impl BatchReport {
    /// Whether every target succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of targets attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Write the matrix to every target, collecting outcomes per format.
pub fn export_all<'a, I>(matrix: &ExportMatrix, targets: I) -> BatchReport
where
    I: IntoIterator<Item = (ExportFormat, Box<dyn io::Write + 'a>)>,
{
    let mut report = BatchReport::default();
    for (format, writer) in targets {
        match write_delimited(matrix, writer, format.delimiter()) {
            Ok(()) => report.succeeded.push(format),
            Err(err) => {
                warn!(%format, error = %err, "export target failed");
                report.failed.push((format, err));
            }
        }
    }
    report
}
