//! Host probes.
//!
//! One probe per fact. Probes are read-only and never fail: anything that
//! is missing, times out or answers in an unexpected shape comes back as a
//! [`ProbeResult`] with `found = false` (or `found = true` with an empty
//! value when a tool answered without a parseable version).
//!
//! Platform probes (OS, RAM, CPU, disk) read a [`PlatformFacts`] snapshot
//! so one run queries the OS once. Tool probes go through [`Host::run`],
//! which bounds every process wait.
//!
//! # Example
//!
//! ```
//! use buildready::host::{CommandOutput, MockHost};
//! use buildready::requirements::probe::probe_tool;
//!
//! let host = MockHost::new()
//!     .with_command("git --version", CommandOutput::success("git version 2.43.0.windows.1"));
//!
//! let git = probe_tool(&host, &["git --version".to_string()]);
//! assert!(git.found);
//! assert_eq!(git.value.as_deref(), Some("2.43.0"));
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::version::extract_version;
use crate::config::{PackageManagerSettings, RuntimeSettings};
use crate::host::{CommandOutput, Host, PlatformFacts};

const GIB: u64 = 1024 * 1024 * 1024;

/// Outcome of querying one fact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    /// Whether the fact or tool is present.
    pub found: bool,
    /// Discovered value. Empty when a tool answered without a version.
    pub value: Option<String>,
    /// Resolved location, when there is one.
    pub path: Option<PathBuf>,
}

impl ProbeResult {
    /// Nothing was found.
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Present, with no value yet.
    pub fn found() -> Self {
        Self {
            found: true,
            ..Self::default()
        }
    }

    /// Attach a value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach a path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// The value, if present and non-empty.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    /// The value as a whole number.
    pub fn numeric(&self) -> Option<u64> {
        self.value()?.trim().parse().ok()
    }
}

/// Split a configured command line into program and arguments.
pub fn split_command_line(line: &str) -> Option<(String, Vec<String>)> {
    let mut parts = line.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// OS identity: `"<caption> (build <n>)"`.
pub fn probe_os(facts: &PlatformFacts) -> ProbeResult {
    let Some(caption) = facts.os_caption.as_deref().or(facts.os_name.as_deref()) else {
        return ProbeResult::not_found();
    };
    let value = match facts.os_build.as_deref() {
        Some(build) => format!("{} (build {})", caption, build),
        None => caption.to_string(),
    };
    ProbeResult::found().with_value(value)
}

/// Whether an OS caption belongs to one of the supported families.
pub fn is_supported_os(caption: &str, families: &[String]) -> bool {
    let caption = caption.to_lowercase();
    families
        .iter()
        .any(|family| caption.contains(&family.to_lowercase()))
}

/// Installed RAM in whole GiB, rounded down.
pub fn probe_ram(facts: &PlatformFacts) -> ProbeResult {
    match facts.total_memory_bytes {
        Some(bytes) if bytes > 0 => ProbeResult::found().with_value((bytes / GIB).to_string()),
        _ => ProbeResult::not_found(),
    }
}

/// Logical processors, summed across sockets.
pub fn probe_cpu_cores(facts: &PlatformFacts) -> ProbeResult {
    let total: usize = facts
        .cpu_packages
        .iter()
        .filter_map(|p| p.logical_processors)
        .sum();
    if total == 0 {
        ProbeResult::not_found()
    } else {
        ProbeResult::found().with_value(total.to_string())
    }
}

/// Free space on the system volume in whole GiB, rounded down.
pub fn probe_free_disk(facts: &PlatformFacts) -> ProbeResult {
    let Some(volume) = facts.system_volume.as_deref() else {
        return ProbeResult::not_found();
    };
    match system_disk(facts, volume) {
        Some(disk) => ProbeResult::found()
            .with_value((disk.available_bytes / GIB).to_string())
            .with_path(disk.mount_point.clone()),
        None => ProbeResult::not_found(),
    }
}

/// The disk whose mount point is the longest prefix of `volume`.
pub fn system_disk<'a>(
    facts: &'a PlatformFacts,
    volume: &Path,
) -> Option<&'a crate::host::DiskFacts> {
    facts
        .disks
        .iter()
        .filter(|d| volume.starts_with(&d.mount_point) || same_volume(&d.mount_point, volume))
        .max_by_key(|d| d.mount_point.as_os_str().len())
}

fn same_volume(mount: &Path, volume: &Path) -> bool {
    mount
        .to_string_lossy()
        .eq_ignore_ascii_case(&volume.to_string_lossy())
}

/// Result of the runtime probe, plus the launcher that answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeProbe {
    pub result: ProbeResult,
    /// Program and leading arguments of the winning candidate.
    pub launcher: Option<(String, Vec<String>)>,
}

/// Find the language runtime.
///
/// Candidates are tried in order and the first one reporting a parseable
/// version wins. A candidate that answers without a version is kept as a
/// fallback (`found = true`, empty value) in case no later one does better.
pub fn probe_runtime(host: &dyn Host, settings: &RuntimeSettings) -> RuntimeProbe {
    let mut fallback: Option<RuntimeProbe> = None;

    for candidate in &settings.candidates {
        let Some((program, leading)) = split_command_line(candidate) else {
            continue;
        };
        let mut args = leading.clone();
        args.extend(settings.version_args.iter().cloned());

        let Some(output) = host.run(&program, &args).filter(|o| o.success) else {
            tracing::debug!("Runtime candidate '{}' did not respond", candidate);
            continue;
        };

        let mut result = ProbeResult::found();
        if let Some(path) = host.which(&program) {
            result = result.with_path(path);
        }
        let launcher = Some((program, leading));

        match extract_version(&output.combined()) {
            Some(version) => {
                tracing::debug!("Runtime candidate '{}' reports {}", candidate, version);
                return RuntimeProbe {
                    result: result.with_value(version),
                    launcher,
                };
            }
            None => {
                tracing::debug!("Runtime candidate '{}' has no parseable version", candidate);
                fallback.get_or_insert(RuntimeProbe {
                    result: result.with_value(""),
                    launcher,
                });
            }
        }
    }

    fallback.unwrap_or_default()
}

/// Find the runtime's package manager.
///
/// Only attempted when the runtime was found: first through the runtime
/// launcher (`python -m pip --version`), then the standalone candidates.
pub fn probe_package_manager(
    host: &dyn Host,
    runtime: &RuntimeProbe,
    settings: &PackageManagerSettings,
) -> ProbeResult {
    if !runtime.result.found {
        tracing::debug!("Runtime not found, skipping package manager probe");
        return ProbeResult::not_found();
    }

    if let Some((program, leading)) = &runtime.launcher {
        let mut args = leading.clone();
        args.extend(settings.runtime_args.iter().cloned());
        if let Some(output) = host.run(program, &args).filter(|o| o.success) {
            let result = from_output(&output);
            return match &runtime.result.path {
                Some(path) => result.with_path(path.clone()),
                None => result,
            };
        }
    }

    probe_tool(host, &settings.candidates)
}

/// Presence and version of a named tool, first candidate with a version
/// wins.
///
/// Presence and version are separate: a candidate that produced any output,
/// whatever its exit status, or that resolves on `PATH` is present. If no
/// candidate reports a parseable version, the first present one is
/// returned with an empty value.
pub fn probe_tool(host: &dyn Host, candidates: &[String]) -> ProbeResult {
    let mut fallback: Option<ProbeResult> = None;

    for candidate in candidates {
        let Some((program, args)) = split_command_line(candidate) else {
            continue;
        };
        let path = host.which(&program);
        let result = match host.run(&program, &args) {
            Some(output) => from_output(&output),
            None if path.is_some() => {
                tracing::debug!("Tool candidate '{}' is on PATH but did not run", candidate);
                ProbeResult::found().with_value("")
            }
            None => {
                tracing::debug!("Tool candidate '{}' did not respond", candidate);
                continue;
            }
        };
        let result = match path {
            Some(path) => result.with_path(path),
            None => result,
        };

        if result.value().is_some() {
            return result;
        }
        fallback.get_or_insert(result);
    }

    fallback.unwrap_or_default()
}

fn from_output(output: &CommandOutput) -> ProbeResult {
    ProbeResult::found().with_value(extract_version(&output.combined()).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{CpuPackage, DiskFacts, MockHost};

    fn facts() -> PlatformFacts {
        PlatformFacts {
            os_name: Some("Windows".into()),
            os_caption: Some("Microsoft Windows 11 Pro".into()),
            os_build: Some("22631".into()),
            total_memory_bytes: Some(8 * GIB + 123),
            cpu_packages: vec![
                CpuPackage {
                    logical_processors: Some(8),
                    ..CpuPackage::default()
                },
                CpuPackage {
                    logical_processors: Some(8),
                    ..CpuPackage::default()
                },
            ],
            disks: vec![
                DiskFacts {
                    mount_point: PathBuf::from("/"),
                    available_bytes: 50 * GIB + 10,
                    ..DiskFacts::default()
                },
                DiskFacts {
                    mount_point: PathBuf::from("/home"),
                    available_bytes: 5 * GIB,
                    ..DiskFacts::default()
                },
            ],
            system_volume: Some(PathBuf::from("/")),
            ..PlatformFacts::default()
        }
    }

    #[test]
    fn os_value_includes_build() {
        let result = probe_os(&facts());
        assert_eq!(
            result.value.as_deref(),
            Some("Microsoft Windows 11 Pro (build 22631)")
        );
    }

    #[test]
    fn os_missing_caption_is_not_found() {
        assert!(!probe_os(&PlatformFacts::default()).found);
    }

    #[test]
    fn supported_os_family_is_case_insensitive() {
        let families = vec!["Windows 10".to_string(), "Windows 11".to_string()];
        assert!(is_supported_os("Microsoft WINDOWS 11 Pro", &families));
        assert!(!is_supported_os("Microsoft Windows Server 2019", &families));
        assert!(!is_supported_os("Ubuntu 24.04", &families));
    }

    #[test]
    fn ram_rounds_down() {
        assert_eq!(probe_ram(&facts()).numeric(), Some(8));
        let mut f = facts();
        f.total_memory_bytes = Some(8 * GIB - 1);
        assert_eq!(probe_ram(&f).numeric(), Some(7));
    }

    #[test]
    fn ram_unknown_is_not_found() {
        assert!(!probe_ram(&PlatformFacts::default()).found);
    }

    #[test]
    fn cpu_cores_sum_across_sockets() {
        assert_eq!(probe_cpu_cores(&facts()).numeric(), Some(16));
        assert!(!probe_cpu_cores(&PlatformFacts::default()).found);
    }

    #[test]
    fn free_disk_uses_system_volume() {
        let result = probe_free_disk(&facts());
        assert_eq!(result.numeric(), Some(50));
        assert_eq!(result.path, Some(PathBuf::from("/")));
    }

    #[test]
    fn free_disk_longest_prefix_wins() {
        let mut f = facts();
        f.system_volume = Some(PathBuf::from("/home"));
        assert_eq!(probe_free_disk(&f).numeric(), Some(5));
    }

    #[test]
    fn free_disk_matches_drive_letters_case_insensitively() {
        let f = PlatformFacts {
            disks: vec![DiskFacts {
                mount_point: PathBuf::from(r"c:\"),
                available_bytes: 20 * GIB,
                ..DiskFacts::default()
            }],
            system_volume: Some(PathBuf::from(r"C:\")),
            ..PlatformFacts::default()
        };
        assert_eq!(probe_free_disk(&f).numeric(), Some(20));
    }

    #[test]
    fn free_disk_without_volume_is_not_found() {
        let mut f = facts();
        f.system_volume = None;
        assert!(!probe_free_disk(&f).found);
    }

    #[test]
    fn split_command_line_handles_leading_args() {
        assert_eq!(
            split_command_line("py -3"),
            Some(("py".to_string(), vec!["-3".to_string()]))
        );
        assert_eq!(split_command_line("   "), None);
    }

    #[test]
    fn runtime_first_versioned_candidate_wins() {
        let host = MockHost::new()
            .with_command("python3 --version", CommandOutput::success("Python 3.11.2"))
            .with_command("python --version", CommandOutput::success("Python 3.8.0"));
        let probe = probe_runtime(&host, &RuntimeSettings::default());
        assert!(probe.result.found);
        assert_eq!(probe.result.value.as_deref(), Some("3.11.2"));
        assert_eq!(probe.launcher, Some(("python3".to_string(), vec![])));
        assert_eq!(host.invocations(), vec!["python3 --version".to_string()]);
    }

    #[test]
    fn runtime_launcher_keeps_leading_args() {
        let host = MockHost::new()
            .with_command("py -3 --version", CommandOutput::success("Python 3.12.1"));
        let probe = probe_runtime(&host, &RuntimeSettings::default());
        assert_eq!(probe.result.value.as_deref(), Some("3.12.1"));
        assert_eq!(
            probe.launcher,
            Some(("py".to_string(), vec!["-3".to_string()]))
        );
    }

    #[test]
    fn runtime_without_version_is_found_with_empty_value() {
        let host = MockHost::new()
            .with_command("python3 --version", CommandOutput::success("Python"));
        let probe = probe_runtime(&host, &RuntimeSettings::default());
        assert!(probe.result.found);
        assert_eq!(probe.result.value.as_deref(), Some(""));
        assert!(probe.result.value().is_none());
    }

    #[test]
    fn runtime_later_versioned_candidate_beats_unversioned() {
        let host = MockHost::new()
            .with_command("python3 --version", CommandOutput::success("Python"))
            .with_command("python --version", CommandOutput::success("Python 3.10.4"));
        let probe = probe_runtime(&host, &RuntimeSettings::default());
        assert_eq!(probe.result.value.as_deref(), Some("3.10.4"));
        assert_eq!(probe.launcher.map(|l| l.0), Some("python".to_string()));
    }

    #[test]
    fn runtime_failing_candidate_is_skipped() {
        let host = MockHost::new()
            .with_command("python3 --version", CommandOutput::failure(9009, "not installed"));
        let probe = probe_runtime(&host, &RuntimeSettings::default());
        assert!(!probe.result.found);
        assert!(probe.launcher.is_none());
    }

    #[test]
    fn package_manager_skipped_without_runtime() {
        let host = MockHost::new()
            .with_command("pip3 --version", CommandOutput::success("pip 24.0"));
        let result = probe_package_manager(
            &host,
            &RuntimeProbe::default(),
            &PackageManagerSettings::default(),
        );
        assert!(!result.found);
        assert!(host.invocations().is_empty());
    }

    #[test]
    fn package_manager_through_runtime_launcher() {
        let host = MockHost::new().with_command(
            "py -3 -m pip --version",
            CommandOutput::success("pip 24.0 from C:\\Python312\\Lib\\site-packages\\pip (python 3.12)"),
        );
        let runtime = RuntimeProbe {
            result: ProbeResult::found().with_value("3.12.1"),
            launcher: Some(("py".to_string(), vec!["-3".to_string()])),
        };
        let result = probe_package_manager(&host, &runtime, &PackageManagerSettings::default());
        assert!(result.found);
        assert_eq!(result.value.as_deref(), Some("24.0"));
    }

    #[test]
    fn package_manager_falls_back_to_standalone() {
        let host = MockHost::new()
            .with_command("pip --version", CommandOutput::success("pip 23.3.1 from /usr/lib"));
        let runtime = RuntimeProbe {
            result: ProbeResult::found().with_value("3.11.2"),
            launcher: Some(("python3".to_string(), vec![])),
        };
        let result = probe_package_manager(&host, &runtime, &PackageManagerSettings::default());
        assert_eq!(result.value.as_deref(), Some("23.3.1"));
        assert_eq!(
            host.invocations(),
            vec![
                "python3 -m pip --version".to_string(),
                "pip3 --version".to_string(),
                "pip --version".to_string(),
            ]
        );
    }

    #[test]
    fn tool_missing_is_not_found() {
        let host = MockHost::new();
        let result = probe_tool(&host, &["git --version".to_string()]);
        assert_eq!(result, ProbeResult::not_found());
    }

    #[test]
    fn tool_without_version_is_found_with_empty_value() {
        let host = MockHost::new()
            .with_command("ninja --version", CommandOutput::success("unknown build"));
        let result = probe_tool(&host, &["ninja --version".to_string()]);
        assert!(result.found);
        assert_eq!(result.value.as_deref(), Some(""));
    }

    #[test]
    fn tool_version_on_stderr_counts() {
        let host = MockHost::new()
            .with_command("cmake --version", CommandOutput::failure(1, "cmake version 3.28.1"));
        let result = probe_tool(&host, &["cmake --version".to_string()]);
        assert_eq!(result.value.as_deref(), Some("3.28.1"));
    }

    #[test]
    fn tool_rejecting_version_flag_is_still_present() {
        let host = MockHost::new().with_command(
            "mytool --version",
            CommandOutput::failure(2, "usage: mytool [options]\nunknown option --version"),
        );
        let result = probe_tool(&host, &["mytool --version".to_string()]);
        assert!(result.found);
        assert_eq!(result.value.as_deref(), Some(""));
    }

    #[test]
    fn later_versioned_candidate_beats_earlier_unversioned_one() {
        let host = MockHost::new()
            .with_command("mytool --version", CommandOutput::failure(2, "unknown option"))
            .with_command("mytool -V", CommandOutput::success("mytool 1.4.2"));
        let result = probe_tool(
            &host,
            &["mytool --version".to_string(), "mytool -V".to_string()],
        );
        assert_eq!(result.value.as_deref(), Some("1.4.2"));
    }

    #[cfg(unix)]
    #[test]
    fn tool_on_path_that_does_not_run_is_present() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        let temp = tempfile::TempDir::new().unwrap();
        let tool = temp.path().join("mytool");
        fs::write(&tool, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        let host = MockHost::new().with_path_entry(temp.path());
        let result = probe_tool(&host, &["mytool --version".to_string()]);
        assert!(result.found);
        assert_eq!(result.value.as_deref(), Some(""));
        assert_eq!(result.path, Some(tool));
    }

    #[cfg(unix)]
    #[test]
    fn tool_path_is_resolved_on_path() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        let temp = tempfile::TempDir::new().unwrap();
        let git = temp.path().join("git");
        fs::write(&git, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&git, fs::Permissions::from_mode(0o755)).unwrap();

        let host = MockHost::new()
            .with_path_entry(temp.path())
            .with_command("git --version", CommandOutput::success("git version 2.43.0"));
        let result = probe_tool(&host, &["git --version".to_string()]);
        assert_eq!(result.path, Some(git));
    }

    #[test]
    fn numeric_parses_value() {
        assert_eq!(ProbeResult::found().with_value("8").numeric(), Some(8));
        assert_eq!(ProbeResult::found().with_value("").numeric(), None);
        assert_eq!(ProbeResult::found().with_value("abc").numeric(), None);
    }
}
