//! Requirement evaluation.
//!
//! [`run`] probes the host for every requirement of a catalog and turns
//! each outcome into [`CheckRow`]s. Requirements are evaluated on the rayon
//! pool, but rows always come back in catalog order. Every requirement is
//! evaluated; a failing row never stops the run.

use std::sync::OnceLock;

use rayon::prelude::*;

use super::catalog::{Catalog, Check, Fact, Requirement};
use super::probe::{self, ProbeResult, RuntimeProbe};
use super::status::{CheckRow, RowSet, NOT_FOUND, VERSION_UNKNOWN};
use super::toolchain;
use super::version::satisfies_minimum;
use crate::config::ProbeSettings;
use crate::host::{Host, PlatformFacts};

/// How a run is executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Evaluate requirements one after another on the calling thread.
    pub sequential: bool,
}

impl RunOptions {
    pub fn sequential() -> Self {
        Self { sequential: true }
    }
}

/// Probe results shared between requirements of one run.
///
/// Platform facts and the runtime probe are computed at most once, the
/// first time a requirement needs them. A session lives for a single run.
pub struct ProbeSession<'a> {
    host: &'a dyn Host,
    settings: &'a ProbeSettings,
    platform: OnceLock<PlatformFacts>,
    runtime: OnceLock<RuntimeProbe>,
}

impl<'a> ProbeSession<'a> {
    pub fn new(host: &'a dyn Host, settings: &'a ProbeSettings) -> Self {
        Self {
            host,
            settings,
            platform: OnceLock::new(),
            runtime: OnceLock::new(),
        }
    }

    /// Platform facts, collected on first use.
    pub fn platform(&self) -> &PlatformFacts {
        self.platform.get_or_init(|| self.host.platform())
    }

    /// Runtime probe, run on first use.
    pub fn runtime(&self) -> &RuntimeProbe {
        self.runtime
            .get_or_init(|| probe::probe_runtime(self.host, &self.settings.runtime))
    }

    /// Probe a single-valued fact.
    pub fn probe(&self, fact: Fact) -> ProbeResult {
        let result = match fact {
            Fact::Os => probe::probe_os(self.platform()),
            Fact::Ram => probe::probe_ram(self.platform()),
            Fact::CpuCores => probe::probe_cpu_cores(self.platform()),
            Fact::FreeDisk => probe::probe_free_disk(self.platform()),
            Fact::Runtime => self.runtime().result.clone(),
            Fact::PackageManager => probe::probe_package_manager(
                self.host,
                self.runtime(),
                &self.settings.runtime.package_manager,
            ),
            Fact::VersionControl => {
                probe::probe_tool(self.host, &self.settings.version_control.candidates)
            }
            Fact::NativeCompiler => {
                toolchain::probe_native_compiler(&self.settings.toolchain, self.host)
            }
            Fact::Tools => ProbeResult::not_found(),
        };
        tracing::debug!(
            "Probed {:?}: found={} value={:?}",
            fact,
            result.found,
            result.value
        );
        result
    }

    /// Probe an additional named tool.
    pub fn probe_tool(&self, name: &str) -> ProbeResult {
        let result = probe::probe_tool(self.host, &self.settings.tool(name).candidates);
        tracing::debug!("Probed tool {}: found={}", name, result.found);
        result
    }
}

/// Evaluate every requirement of `catalog` against `host`.
pub fn run(catalog: &Catalog, settings: &ProbeSettings, host: &dyn Host) -> RowSet {
    run_with_options(catalog, settings, host, RunOptions::default())
}

/// [`run`] with explicit execution options.
pub fn run_with_options(
    catalog: &Catalog,
    settings: &ProbeSettings,
    host: &dyn Host,
    options: RunOptions,
) -> RowSet {
    let session = ProbeSession::new(host, settings);
    run_in_session(catalog, &session, options)
}

/// Evaluate `catalog` within an existing session.
///
/// Callers that also want the summaries use this so the platform is only
/// queried once; see [`ProbeSession::platform`].
pub fn run_in_session(
    catalog: &Catalog,
    session: &ProbeSession<'_>,
    options: RunOptions,
) -> RowSet {
    tracing::debug!("Checking {} requirements", catalog.len());

    let grouped: Vec<Vec<CheckRow>> = if options.sequential {
        catalog.iter().map(|req| evaluate(req, session)).collect()
    } else {
        catalog
            .requirements()
            .par_iter()
            .map(|req| evaluate(req, session))
            .collect()
    };

    let rows = RowSet::new(grouped.into_iter().flatten().collect());
    tracing::debug!(
        "Readiness {} ({}/{} checks passed)",
        rows.status(),
        rows.pass_count(),
        rows.total()
    );
    rows
}

/// Rows for one requirement.
pub fn evaluate(requirement: &Requirement, session: &ProbeSession<'_>) -> Vec<CheckRow> {
    match &requirement.check {
        Check::ToolList(tools) if tools.is_empty() => vec![CheckRow {
            item: requirement.name.clone(),
            required: requirement.check.label(),
            actual: "(none)".to_string(),
            passed: true,
            mandatory: requirement.mandatory,
        }],
        Check::ToolList(tools) => tools
            .iter()
            .map(|tool| {
                let result = session.probe_tool(tool);
                let passed = result.found || requirement.is_optional();
                CheckRow {
                    item: format!("{}: {}", requirement.name, tool),
                    required: requirement.check.label(),
                    actual: presence_actual(&result),
                    passed,
                    mandatory: requirement.mandatory,
                }
            })
            .collect(),
        check => {
            let result = session.probe(requirement.fact);
            vec![row_for(requirement, check, &result)]
        }
    }
}

/// Build the row for a single-valued requirement.
pub fn row_for(requirement: &Requirement, check: &Check, result: &ProbeResult) -> CheckRow {
    let (passed, actual) = match check {
        Check::MinimumNumeric(min) => (
            result.numeric().is_some_and(|n| n >= *min),
            value_actual(result),
        ),
        Check::MinimumVersion(min) => (
            result.found && result.value().is_some_and(|v| satisfies_minimum(v, min)),
            version_actual(result),
        ),
        Check::Presence(_) => (result.found, presence_actual(result)),
        Check::OneOf(families) => (
            result.found && result.value().is_some_and(|v| probe::is_supported_os(v, families)),
            value_actual(result),
        ),
        Check::ToolList(_) => (result.found, presence_actual(result)),
    };

    CheckRow {
        item: requirement.name.clone(),
        required: check.label(),
        actual,
        passed: passed || requirement.is_optional(),
        mandatory: requirement.mandatory,
    }
}

fn value_actual(result: &ProbeResult) -> String {
    match result.value() {
        Some(value) if result.found => value.to_string(),
        _ => NOT_FOUND.to_string(),
    }
}

fn version_actual(result: &ProbeResult) -> String {
    if !result.found {
        NOT_FOUND.to_string()
    } else {
        result
            .value()
            .map(str::to_string)
            .unwrap_or_else(|| VERSION_UNKNOWN.to_string())
    }
}

fn presence_actual(result: &ProbeResult) -> String {
    if !result.found {
        return NOT_FOUND.to_string();
    }
    match (result.value(), &result.path) {
        (Some(value), _) => value.to_string(),
        (None, Some(path)) => path.display().to_string(),
        (None, None) => "Found".to_string(),
    }
}
