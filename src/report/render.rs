//! Fixed-width text rendering.

use std::fmt::Write as _;

use chrono::NaiveDateTime;

use crate::requirements::{CheckRow, HardwareSummary, RowSet, SystemSummary};

pub const TITLE: &str = "Build Readiness Report";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const ITEM_WIDTH: usize = 26;
pub const REQUIRED_WIDTH: usize = 18;
pub const ACTUAL_WIDTH: usize = 42;
const STATUS_WIDTH: usize = 6;
const LABEL_WIDTH: usize = 16;

/// Everything a report shows. Rendering never looks past this.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub rows: &'a RowSet,
    pub system: Option<&'a SystemSummary>,
    pub hardware: Option<&'a HardwareSummary>,
    pub generated: NaiveDateTime,
}

impl<'a> ReportContext<'a> {
    pub fn new(rows: &'a RowSet, generated: NaiveDateTime) -> Self {
        Self {
            rows,
            system: None,
            hardware: None,
            generated,
        }
    }

    pub fn with_system(mut self, system: &'a SystemSummary) -> Self {
        self.system = Some(system);
        self
    }

    pub fn with_hardware(mut self, hardware: &'a HardwareSummary) -> Self {
        self.hardware = Some(hardware);
        self
    }
}

/// Render the full report.
pub fn render(ctx: &ReportContext<'_>) -> String {
    let mut lines = vec![
        TITLE.to_string(),
        format!("Generated: {}", ctx.generated.format(TIMESTAMP_FORMAT)),
        format!(
            "Result: {} ({}/{} checks passed)",
            ctx.rows.status(),
            ctx.rows.pass_count(),
            ctx.rows.total()
        ),
    ];

    lines.extend(context_blocks(ctx.system, ctx.hardware));

    lines.push(String::new());
    lines.push("[Checks]".to_string());
    lines.push(columns("Item", "Required", "Actual", "Status"));
    lines.push("-".repeat(ITEM_WIDTH + REQUIRED_WIDTH + ACTUAL_WIDTH + STATUS_WIDTH));
    lines.extend(ctx.rows.rows.iter().map(row_line));

    finish(lines)
}

/// Render only the system and hardware blocks.
pub fn render_summary(
    system: &SystemSummary,
    hardware: &HardwareSummary,
    generated: NaiveDateTime,
) -> String {
    let mut lines = vec![
        "System Summary".to_string(),
        format!("Generated: {}", generated.format(TIMESTAMP_FORMAT)),
    ];
    lines.extend(context_blocks(Some(system), Some(hardware)));
    finish(lines)
}

/// One aligned check line.
pub fn row_line(row: &CheckRow) -> String {
    columns(&row.item, &row.required, &row.actual, row.status())
}

fn columns(item: &str, required: &str, actual: &str, status: &str) -> String {
    let mut line = String::new();
    push_padded(&mut line, item, ITEM_WIDTH);
    push_padded(&mut line, required, REQUIRED_WIDTH);
    push_padded(&mut line, actual, ACTUAL_WIDTH);
    line.push_str(status);
    line
}

/// Pad to `width`; a longer value is kept whole and followed by one space.
fn push_padded(line: &mut String, value: &str, width: usize) {
    let len = value.chars().count();
    line.push_str(value);
    let spaces = if len < width { width - len } else { 1 };
    line.extend(std::iter::repeat_n(' ', spaces));
}

fn context_blocks(
    system: Option<&SystemSummary>,
    hardware: Option<&HardwareSummary>,
) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(system) = system {
        block(&mut lines, "System", system_fields(system));
    }
    if let Some(hardware) = hardware {
        block(&mut lines, "CPU", cpu_fields(hardware));
        block(&mut lines, "Hardware", hardware_fields(hardware));
    }
    lines
}

fn block(lines: &mut Vec<String>, title: &str, fields: Vec<(&'static str, String)>) {
    lines.push(String::new());
    lines.push(format!("[{}]", title));
    if fields.is_empty() {
        lines.push("(unavailable)".to_string());
    }
    for (label, value) in fields {
        let mut line = String::new();
        push_padded(&mut line, &format!("{}:", label), LABEL_WIDTH);
        line.push_str(&value);
        lines.push(line);
    }
}

fn system_fields(s: &SystemSummary) -> Vec<(&'static str, String)> {
    let version = match (&s.os_version, &s.os_build) {
        (Some(v), Some(b)) => Some(format!("{} (build {})", v, b)),
        (Some(v), None) => Some(v.clone()),
        (None, Some(b)) => Some(format!("build {}", b)),
        (None, None) => None,
    };
    let mut fields = Vec::new();
    opt(&mut fields, "Machine", s.machine_name.clone());
    opt(&mut fields, "OS", s.os_caption.clone().or_else(|| s.os_name.clone()));
    opt(&mut fields, "Version", version);
    opt(&mut fields, "Architecture", s.architecture.clone());
    opt(&mut fields, "RAM (GB)", s.ram_gb.map(|v| v.to_string()));
    opt(&mut fields, "Free disk (GB)", s.free_disk_gb.map(|v| v.to_string()));
    opt(&mut fields, "Time zone", s.time_zone.clone());
    fields
}

fn cpu_fields(h: &HardwareSummary) -> Vec<(&'static str, String)> {
    let cores = match (h.physical_cores, h.logical_processors) {
        (Some(p), Some(l)) => Some(format!("{} physical, {} logical", p, l)),
        (Some(p), None) => Some(format!("{} physical", p)),
        (None, Some(l)) => Some(format!("{} logical", l)),
        (None, None) => None,
    };
    let mut fields = Vec::new();
    opt(&mut fields, "Name", h.cpu_name.clone());
    if h.sockets > 0 {
        fields.push(("Sockets", h.sockets.to_string()));
    }
    opt(&mut fields, "Cores", cores);
    opt(&mut fields, "Max clock", h.max_clock_mhz.map(|mhz| format!("{} MHz", mhz)));
    opt(&mut fields, "L2 cache", h.l2_cache.clone());
    opt(&mut fields, "L3 cache", h.l3_cache.clone());
    fields
}

fn hardware_fields(h: &HardwareSummary) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();
    opt(&mut fields, "Board", h.board.clone());
    opt(&mut fields, "BIOS", h.bios.clone());
    opt(&mut fields, "Display", h.display_adapter.clone());
    for module in &h.memory_modules {
        fields.push(("Memory", module.clone()));
    }
    for drive in &h.drives {
        let mut value = String::new();
        let _ = write!(
            value,
            "{} {} {:.1}/{:.1} GB free",
            drive.mount_point, drive.file_system, drive.free_gb, drive.total_gb
        );
        fields.push(("Drive", value.trim_end().to_string()));
    }
    fields
}

fn opt(fields: &mut Vec<(&'static str, String)>, label: &'static str, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        fields.push((label, value));
    }
}

fn finish(lines: Vec<String>) -> String {
    let mut text = lines
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    text.push('\n');
    text
}
