//! Delimited-text writers over the export matrix.
//!
//! Merge ranges are a spreadsheet concern and are ignored here; every
//! row is written as-is, so a block's case-level cells appear once and
//! the continuation rows keep their blanks.

use crate::error::ExportError;
use crate::matrix::ExportMatrix;
use std::io;

/// Write the matrix as comma-separated text, header row first.
pub fn write_csv<W: io::Write>(matrix: &ExportMatrix, writer: W) -> Result<(), ExportError> {
    write_delimited(matrix, writer, b',')
}

/// Write the matrix as tab-separated text, header row first.
pub fn write_tsv<W: io::Write>(matrix: &ExportMatrix, writer: W) -> Result<(), ExportError> {
    write_delimited(matrix, writer, b'\t')
}

pub(crate) fn write_delimited<W: io::Write>(
    matrix: &ExportMatrix,
    writer: W,
    delimiter: u8,
) -> Result<(), ExportError> {
    if matrix.is_empty() {
        return Err(ExportError::EmptySet);
    }

    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    out.write_record(ExportMatrix::header())?;
    for row in &matrix.rows {
        out.write_record(row)?;
    }
    out.flush()?;
    Ok(())
}
