//! Check rows produced by a run.
//!
//! Each requirement produces one `CheckRow` (a tool list produces one per
//! tool). Rows are plain values: a new run builds a new [`RowSet`].

use serde::Serialize;

/// Shown when nothing was discovered.
pub const NOT_FOUND: &str = "Not found";

/// Shown when a tool answered but no version could be read from it.
pub const VERSION_UNKNOWN: &str = "Found (version unknown)";

/// The result of checking a single requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRow {
    /// Requirement name (or `"<name>: <tool>"` for list entries)
    pub item: String,
    /// Human-readable threshold
    pub required: String,
    /// Human-readable discovered value
    pub actual: String,
    /// Whether the row passed
    pub passed: bool,
    /// Whether the row counts toward the overall result
    pub mandatory: bool,
}

impl CheckRow {
    /// `PASS` or `FAIL`.
    pub fn status(&self) -> &'static str {
        if self.passed {
            "PASS"
        } else {
            "FAIL"
        }
    }
}

/// Ordered rows of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowSet {
    pub rows: Vec<CheckRow>,
    pub overall_passed: bool,
}

impl RowSet {
    /// Build a row set; the overall result passes iff every mandatory row
    /// passed.
    pub fn new(rows: Vec<CheckRow>) -> Self {
        let overall_passed = rows.iter().filter(|r| r.mandatory).all(|r| r.passed);
        Self {
            rows,
            overall_passed,
        }
    }

    /// Number of passing rows.
    pub fn pass_count(&self) -> usize {
        self.rows.iter().filter(|r| r.passed).count()
    }

    /// Number of rows.
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    /// Rows that failed and count toward the result.
    pub fn blocking_failures(&self) -> impl Iterator<Item = &CheckRow> {
        self.rows.iter().filter(|r| r.mandatory && !r.passed)
    }

    /// `PASS` or `FAIL`.
    pub fn status(&self) -> &'static str {
        if self.overall_passed {
            "PASS"
        } else {
            "FAIL"
        }
    }
}
