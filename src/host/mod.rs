//! Read-only access to the machine being checked.
//!
//! Every probe talks to the host through the [`Host`] trait: environment
//! variables, `PATH` lookup, filesystem existence checks, bounded process
//! invocations and platform facts (memory, CPUs, disks, OS identity).
//! Nothing here mutates the system.
//!
//! # Modules
//!
//! - [`command`] - Process invocation with a bounded wait
//! - [`path`] - `PATH` parsing and tool resolution
//! - [`platform`] - Platform fact collection (sysinfo plus OS-specific sources)
//! - [`mock`] - Scriptable host for tests
//!
//! # Example
//!
//! ```no_run
//! use buildready::host::{Host, SystemHost};
//!
//! let host = SystemHost::new();
//! if let Some(git) = host.which("git") {
//!     println!("git at {}", git.display());
//! }
//! ```

pub mod command;
pub mod mock;
pub mod path;
pub mod platform;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

pub use command::{run_bounded, CommandOutput, DEFAULT_TIMEOUT};
pub use mock::MockHost;
pub use path::{find_on_path, is_runnable, system_path_dirs};

/// Read-only view of the host.
///
/// Implementations must never surface platform faults as panics: a failed
/// query is reported as absence (`None`, `false` or an empty collection).
///
/// [`Host::run`] is bounded by a timeout. The filesystem checks
/// ([`Host::is_file`], [`Host::is_dir`], [`Host::subdirectories`]) are not:
/// their default implementations call straight into `std::fs`, so a hung
/// network share or stalled mount on a configured path can stall a check.
/// Known limit; point toolchain roots and overrides at local paths.
pub trait Host: Send + Sync {
    /// Look up an environment variable. Empty values count as unset.
    fn env_var(&self, key: &str) -> Option<String>;

    /// Directories searched when resolving a tool by name.
    fn path_entries(&self) -> Vec<PathBuf>;

    /// Run a program and capture its output, giving up after a bounded wait.
    ///
    /// Returns `None` if the program cannot be spawned or times out.
    fn run(&self, program: &str, args: &[String]) -> Option<CommandOutput>;

    /// Snapshot of platform facts. Fields the platform cannot provide are
    /// left empty.
    fn platform(&self) -> PlatformFacts;

    /// Resolve a tool by name on [`Host::path_entries`].
    fn which(&self, tool: &str) -> Option<PathBuf> {
        find_on_path(tool, &self.path_entries())
    }

    /// Whether `path` is an existing regular file.
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Whether `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// Names of the immediate subdirectories of `path`, unsorted.
    ///
    /// An unreadable or missing directory yields an empty list.
    fn subdirectories(&self, path: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(path) else {
            return Vec::new();
        };
        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect()
    }
}

/// The real machine.
#[derive(Debug, Clone)]
pub struct SystemHost {
    timeout: Duration,
}

impl SystemHost {
    /// Create a host using the default per-command timeout.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a host with a custom per-command timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// The per-command timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for SystemHost {
    fn env_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }

    fn path_entries(&self) -> Vec<PathBuf> {
        system_path_dirs()
    }

    fn run(&self, program: &str, args: &[String]) -> Option<CommandOutput> {
        run_bounded(program, args, self.timeout)
    }

    fn platform(&self) -> PlatformFacts {
        platform::collect(self)
    }
}

/// Platform facts gathered from the OS query API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlatformFacts {
    /// Machine (host) name.
    pub host_name: Option<String>,
    /// Short OS name (e.g. "Windows", "Ubuntu").
    pub os_name: Option<String>,
    /// Long, human-facing OS caption (e.g. "Windows 11 Pro").
    pub os_caption: Option<String>,
    /// OS version string.
    pub os_version: Option<String>,
    /// Build or kernel number.
    pub os_build: Option<String>,
    /// CPU architecture the OS runs on.
    pub architecture: Option<String>,
    /// Installed physical memory, in bytes.
    pub total_memory_bytes: Option<u64>,
    /// One entry per CPU socket.
    pub cpu_packages: Vec<CpuPackage>,
    /// Mounted disks.
    pub disks: Vec<DiskFacts>,
    /// Root of the system volume (`C:\` or `/`).
    pub system_volume: Option<PathBuf>,
    /// Local time zone.
    pub time_zone: Option<String>,
    /// Board and BIOS identity.
    pub firmware: FirmwareFacts,
    /// Primary display adapter.
    pub display_adapter: Option<String>,
    /// Installed memory modules, one description each.
    pub memory_modules: Vec<String>,
}

/// A physical CPU package (socket).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CpuPackage {
    pub name: Option<String>,
    pub physical_cores: Option<usize>,
    pub logical_processors: Option<usize>,
    pub max_clock_mhz: Option<u64>,
    pub l2_cache: Option<String>,
    pub l3_cache: Option<String>,
}

/// A mounted disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiskFacts {
    pub mount_point: PathBuf,
    pub name: String,
    pub file_system: String,
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub removable: bool,
}

/// Board and BIOS identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FirmwareFacts {
    pub board_vendor: Option<String>,
    pub board_product: Option<String>,
    pub bios_vendor: Option<String>,
    pub bios_version: Option<String>,
}
