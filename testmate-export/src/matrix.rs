//! The format-agnostic export matrix.
//!
//! A [`TestCaseSet`] flattens into one row per step (one row for a
//! stepless case), with case-level fields written on the first row of
//! each block and left blank on the rest. Merge ranges record which
//! cells a spreadsheet writer should join; delimited-text writers
//! ignore them.

use testmate_core::TestCaseSet;

/// Fixed export header, in column order.
pub const COLUMNS: [&str; 16] = [
    "Name",
    "Attachments",
    "Status",
    "Type",
    "Description",
    "Precondition",
    "Test step #",
    "Test step description",
    "Test step expected result",
    "Test Step Attachment",
    "Priority",
    "Execution Time",
    "Sanity Testcase",
    "Regression Testcase",
    "Automatable",
    "Labels",
];

// Column indexes used when building rows.
const COL_NAME: usize = 0;
const COL_STATUS: usize = 2;
const COL_TYPE: usize = 3;
const COL_DESCRIPTION: usize = 4;
const COL_PRECONDITION: usize = 5;
const COL_STEP_NUMBER: usize = 6;
const COL_STEP_ACTION: usize = 7;
const COL_STEP_EXPECTED: usize = 8;
const COL_PRIORITY: usize = 10;
const COL_EXECUTION_TIME: usize = 11;
const COL_SANITY: usize = 12;
const COL_REGRESSION: usize = 13;

/// Columns that hold case-level values and get merged across a block.
/// The three step columns are per-row and never merged.
const MERGE_COLUMNS: [usize; 13] = [0, 1, 2, 3, 4, 5, 9, 10, 11, 12, 13, 14, 15];

/// A vertical cell range to merge, in one column.
///
/// Rows are 1-based over the full sheet: row 0 is the header, so the
/// first data row is row 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    /// First sheet row of the range.
    pub start_row: usize,
    /// Last sheet row of the range (inclusive).
    pub end_row: usize,
    /// Column index.
    pub col: usize,
}

/// Styling hint for the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderStyle {
    /// Render the header bold.
    pub bold: bool,
    /// Render the header with a highlight fill.
    pub highlighted: bool,
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            bold: true,
            highlighted: true,
        }
    }
}

/// Flattened test-case table plus spreadsheet merge hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMatrix {
    /// Data rows (header excluded), each with [`COLUMNS`] cells.
    pub rows: Vec<Vec<String>>,
    /// Vertical merges for spreadsheet writers.
    pub merges: Vec<MergeRange>,
}

impl ExportMatrix {
    /// The fixed header row.
    #[must_use]
    pub fn header() -> &'static [&'static str; 16] {
        &COLUMNS
    }

    /// Styling for the header row.
    #[must_use]
    pub fn header_style() -> HeaderStyle {
        HeaderStyle::default()
    }

    /// Whether the matrix has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn blank_row() -> Vec<String> {
    vec![String::new(); COLUMNS.len()]
}

/// Flatten a test-case set into the export matrix.
///
/// The first row of each case block carries the name, description,
/// precondition and the fixed metadata defaults (Status "New", Type
/// "Manual", Priority "Medium", Execution Time "15", Sanity and
/// Regression "Yes"). Later rows of the block are blank in every
/// non-step column; the merge list joins them back for spreadsheet
/// output, but only when the block spans more than one row.
#[must_use]
pub fn to_export_matrix(cases: &TestCaseSet) -> ExportMatrix {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut merges: Vec<MergeRange> = Vec::new();

    for case in cases {
        let block_start = rows.len();
        let block_len = case.steps.len().max(1);

        let mut first = blank_row();
        first[COL_NAME] = case.name.clone();
        first[COL_STATUS] = "New".to_string();
        first[COL_TYPE] = "Manual".to_string();
        first[COL_DESCRIPTION] = case.description.clone();
        first[COL_PRECONDITION] = case.precondition.clone();
        first[COL_PRIORITY] = "Medium".to_string();
        first[COL_EXECUTION_TIME] = "15".to_string();
        first[COL_SANITY] = "Yes".to_string();
        first[COL_REGRESSION] = "Yes".to_string();

        if case.steps.is_empty() {
            rows.push(first);
        } else {
            for (i, step) in case.steps.iter().enumerate() {
                let mut row = if i == 0 {
                    std::mem::take(&mut first)
                } else {
                    blank_row()
                };
                row[COL_STEP_NUMBER] = step.index.clone();
                row[COL_STEP_ACTION] = step.action.clone();
                row[COL_STEP_EXPECTED] = step.expected_result.clone();
                rows.push(row);
            }
        }

        if block_len > 1 {
            for col in MERGE_COLUMNS {
                merges.push(MergeRange {
                    start_row: block_start + 1,
                    end_row: block_start + block_len,
                    col,
                });
            }
        }
    }

    ExportMatrix { rows, merges }
}
