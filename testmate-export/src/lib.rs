//! # testmate-export
//!
//! Tabular export of generated test cases.
//!
//! The core product is [`to_export_matrix`]: a format-agnostic flattening
//! of a [`testmate_core::TestCaseSet`] into a fixed 16-column table plus
//! the vertical merge ranges a spreadsheet writer needs. Delimited-text
//! writers ([`write_csv`], [`write_tsv`]) consume the same matrix and
//! ignore the merges.
//!
//! ## Example
//!
//! ```rust
//! use testmate_core::{Step, TestCase, TestCaseSet};
//! use testmate_export::{to_export_matrix, write_csv};
//!
//! let case = TestCase::new("Login")
//!     .with_step(Step::new("1", "open the page", "form is shown"));
//! let matrix = to_export_matrix(&TestCaseSet::from(vec![case]));
//!
//! let mut out = Vec::new();
//! write_csv(&matrix, &mut out).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

mod batch;
mod csv;
mod error;
mod matrix;

pub use batch::{export_all, BatchReport, ExportFormat};
pub use csv::{write_csv, write_tsv};
pub use error::{ExportError, ExportResult};
pub use matrix::{to_export_matrix, ExportMatrix, HeaderStyle, MergeRange, COLUMNS};
