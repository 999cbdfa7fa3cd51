//! System and hardware context for the report.
//!
//! These summaries are informational only; nothing in them is compared
//! against a threshold.

use serde::Serialize;

use super::probe::{probe_free_disk, probe_ram};
use crate::host::{Host, PlatformFacts};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Machine identity and capacity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SystemSummary {
    pub machine_name: Option<String>,
    pub os_name: Option<String>,
    pub os_caption: Option<String>,
    pub os_version: Option<String>,
    pub os_build: Option<String>,
    pub architecture: Option<String>,
    pub ram_gb: Option<u64>,
    pub free_disk_gb: Option<u64>,
    pub time_zone: Option<String>,
}

impl SystemSummary {
    pub fn from_facts(facts: &PlatformFacts) -> Self {
        Self {
            machine_name: facts.host_name.clone(),
            os_name: facts.os_name.clone(),
            os_caption: facts.os_caption.clone(),
            os_version: facts.os_version.clone(),
            os_build: facts.os_build.clone(),
            architecture: facts.architecture.clone(),
            ram_gb: probe_ram(facts).numeric(),
            free_disk_gb: probe_free_disk(facts).numeric(),
            time_zone: facts.time_zone.clone(),
        }
    }
}

/// CPU, board, display and storage details.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HardwareSummary {
    pub cpu_name: Option<String>,
    pub sockets: usize,
    pub physical_cores: Option<usize>,
    pub logical_processors: Option<usize>,
    pub max_clock_mhz: Option<u64>,
    pub l2_cache: Option<String>,
    pub l3_cache: Option<String>,
    pub board: Option<String>,
    pub bios: Option<String>,
    pub display_adapter: Option<String>,
    pub memory_modules: Vec<String>,
    pub drives: Vec<DriveSummary>,
}

/// A local fixed drive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriveSummary {
    pub mount_point: String,
    pub file_system: String,
    pub free_gb: f64,
    pub total_gb: f64,
}

impl HardwareSummary {
    pub fn from_facts(facts: &PlatformFacts) -> Self {
        let packages = &facts.cpu_packages;
        let first = packages.first();

        Self {
            cpu_name: first.and_then(|p| p.name.clone()),
            sockets: packages.len(),
            physical_cores: sum(packages.iter().map(|p| p.physical_cores)),
            logical_processors: sum(packages.iter().map(|p| p.logical_processors)),
            max_clock_mhz: first.and_then(|p| p.max_clock_mhz),
            l2_cache: first.and_then(|p| p.l2_cache.clone()),
            l3_cache: first.and_then(|p| p.l3_cache.clone()),
            board: join_present(
                facts.firmware.board_vendor.as_deref(),
                facts.firmware.board_product.as_deref(),
            ),
            bios: join_present(
                facts.firmware.bios_vendor.as_deref(),
                facts.firmware.bios_version.as_deref(),
            ),
            display_adapter: facts.display_adapter.clone(),
            memory_modules: facts.memory_modules.clone(),
            drives: facts
                .disks
                .iter()
                .filter(|d| !d.removable && d.total_bytes > 0)
                .map(|d| DriveSummary {
                    mount_point: d.mount_point.display().to_string(),
                    file_system: d.file_system.clone(),
                    free_gb: round_tenth(d.available_bytes as f64 / GIB),
                    total_gb: round_tenth(d.total_bytes as f64 / GIB),
                })
                .collect(),
        }
    }
}

/// Collect both summaries with a single platform query.
pub fn collect(host: &dyn Host) -> (SystemSummary, HardwareSummary) {
    let facts = host.platform();
    (
        SystemSummary::from_facts(&facts),
        HardwareSummary::from_facts(&facts),
    )
}

fn sum(values: impl Iterator<Item = Option<usize>>) -> Option<usize> {
    values.fold(None, |acc, v| match (acc, v) {
        (Some(a), Some(b)) => Some(a + b),
        (None, v) => v,
        (a, None) => a,
    })
}

fn join_present(a: Option<&str>, b: Option<&str>) -> Option<String> {
    match (a, b) {
        (Some(a), Some(b)) => Some(format!("{} {}", a, b)),
        (Some(x), None) | (None, Some(x)) => Some(x.to_string()),
        (None, None) => None,
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
