//! Readiness report rendering and saving.
//!
//! A report is a pure view over an already computed [`RowSet`] plus the
//! optional summaries. Rendering the same context twice gives the same
//! bytes, so a caller can print a report and save it without running the
//! checks again.
//!
//! # Example
//!
//! ```
//! use buildready::report::{render, ReportContext};
//! use buildready::requirements::{CheckRow, RowSet};
//! use chrono::NaiveDate;
//!
//! let rows = RowSet::new(vec![CheckRow {
//!     item: "RAM (GB)".to_string(),
//!     required: ">= 4".to_string(),
//!     actual: "16".to_string(),
//!     passed: true,
//!     mandatory: true,
//! }]);
//! let generated = NaiveDate::from_ymd_opt(2026, 1, 2)
//!     .unwrap()
//!     .and_hms_opt(3, 4, 5)
//!     .unwrap();
//!
//! let text = render(&ReportContext::new(&rows, generated));
//! assert!(text.contains("Result: PASS (1/1 checks passed)"));
//! ```

mod render;

pub use render::{
    render, render_summary, row_line, ReportContext, ACTUAL_WIDTH, ITEM_WIDTH, REQUIRED_WIDTH,
    TIMESTAMP_FORMAT, TITLE,
};

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::error::Result;
use crate::requirements::{CheckRow, HardwareSummary, SystemSummary};

/// Write report text to `path` as UTF-8, creating parent directories.
pub fn save_report(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, text)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    tracing::debug!("Report saved to {}", path.display());
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: String,
    result: &'static str,
    passed: usize,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a SystemSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hardware: Option<&'a HardwareSummary>,
    checks: &'a [CheckRow],
}

/// The report as pretty-printed JSON.
pub fn to_json(ctx: &ReportContext<'_>) -> Result<String> {
    let report = JsonReport {
        generated: ctx.generated.format(TIMESTAMP_FORMAT).to_string(),
        result: ctx.rows.status(),
        passed: ctx.rows.pass_count(),
        total: ctx.rows.total(),
        system: ctx.system,
        hardware: ctx.hardware,
        checks: &ctx.rows.rows,
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    Ok(json)
}
