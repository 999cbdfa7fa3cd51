//! Native compiler discovery.
//!
//! The compiler can live in several install topologies, so it is searched
//! for through ordered [`Tier`]s. Each tier is an independent lookup over
//! `(ToolchainSettings, Host)`; the first tier that yields an existing file
//! wins. A tier that hits a missing or unreadable location simply yields
//! nothing and the next tier runs.
//!
//! # Example
//!
//! ```
//! use buildready::config::ToolchainSettings;
//! use buildready::host::MockHost;
//! use buildready::requirements::toolchain::ToolchainResolver;
//!
//! let settings = ToolchainSettings {
//!     installer_utility: None,
//!     known_roots: Vec::new(),
//!     ..ToolchainSettings::default()
//! };
//! let host = MockHost::new();
//! assert!(ToolchainResolver::new(&settings, &host).resolve().is_none());
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::probe::ProbeResult;
use super::version::extract_version;
use crate::config::ToolchainSettings;
use crate::host::Host;

/// A compiler search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Explicitly configured path.
    Override,
    /// Compiler already resolvable on `PATH`.
    AmbientPath,
    /// Installation reported by the installer discovery utility.
    InstallerMetadata,
    /// Toolchain root exported by an activated developer shell.
    DeveloperEnvironment,
    /// Conventional installation roots.
    KnownRoots,
}

impl Tier {
    /// All tiers in evaluation order.
    pub const ALL: [Tier; 5] = [
        Tier::Override,
        Tier::AmbientPath,
        Tier::InstallerMetadata,
        Tier::DeveloperEnvironment,
        Tier::KnownRoots,
    ];

    /// Short label used in logs.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Override => "override",
            Tier::AmbientPath => "PATH",
            Tier::InstallerMetadata => "installer metadata",
            Tier::DeveloperEnvironment => "developer environment",
            Tier::KnownRoots => "known roots",
        }
    }

    /// Run this tier alone.
    pub fn resolve(self, settings: &ToolchainSettings, host: &dyn Host) -> Option<PathBuf> {
        match self {
            Tier::Override => from_override(settings, host),
            Tier::AmbientPath => host.which(&settings.binary),
            Tier::InstallerMetadata => from_installer_metadata(settings, host),
            Tier::DeveloperEnvironment => from_developer_environment(settings, host),
            Tier::KnownRoots => from_known_roots(settings, host),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the compiler was found, and by which tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub tier: Tier,
    pub path: PathBuf,
}

/// Evaluates the tiers in order.
pub struct ToolchainResolver<'a> {
    settings: &'a ToolchainSettings,
    host: &'a dyn Host,
}

impl<'a> ToolchainResolver<'a> {
    pub fn new(settings: &'a ToolchainSettings, host: &'a dyn Host) -> Self {
        Self { settings, host }
    }

    /// First tier that finds the compiler, or `None`.
    pub fn resolve(&self) -> Option<Resolution> {
        for tier in Tier::ALL {
            match tier.resolve(self.settings, self.host) {
                Some(path) => {
                    tracing::debug!("Compiler found via {}: {}", tier, path.display());
                    return Some(Resolution { tier, path });
                }
                None => tracing::debug!("Compiler not found via {}", tier),
            }
        }
        None
    }
}

/// Locate the native compiler and capture its banner version.
///
/// The banner run is best effort: a compiler that is found but whose
/// banner cannot be read is reported present with an empty version.
pub fn probe_native_compiler(settings: &ToolchainSettings, host: &dyn Host) -> ProbeResult {
    let Some(resolution) = ToolchainResolver::new(settings, host).resolve() else {
        return ProbeResult::not_found();
    };

    let program = resolution.path.to_string_lossy().into_owned();
    let version = host
        .run(&program, &settings.version_args)
        .and_then(|output| extract_version(&output.combined()))
        .unwrap_or_default();

    ProbeResult::found()
        .with_value(version)
        .with_path(resolution.path)
}

fn from_override(settings: &ToolchainSettings, host: &dyn Host) -> Option<PathBuf> {
    let path = settings.override_path.as_ref()?;
    if host.is_file(path) {
        Some(path.clone())
    } else {
        tracing::debug!("Compiler override {} does not exist", path.display());
        None
    }
}

fn from_installer_metadata(settings: &ToolchainSettings, host: &dyn Host) -> Option<PathBuf> {
    let utility = settings
        .installer_utility
        .as_ref()
        .filter(|p| host.is_file(p))
        .cloned()
        .or_else(|| host.which(&settings.installer_utility_name))?;

    let args: Vec<String> = [
        "-latest",
        "-products",
        "*",
        "-requires",
        settings.component.as_str(),
        "-property",
        "installationPath",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let output = host.run(&utility.to_string_lossy(), &args)?;
    if !output.success {
        return None;
    }
    let root = output
        .stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())?;
    tracing::debug!("Installer reports installation at {}", root);

    from_install_root(Path::new(root), settings, host)
}

fn from_developer_environment(settings: &ToolchainSettings, host: &dyn Host) -> Option<PathBuf> {
    let root = host.env_var(&settings.env_var)?;
    probe_binary_subpaths(Path::new(root.trim()), settings, host)
}

fn from_known_roots(settings: &ToolchainSettings, host: &dyn Host) -> Option<PathBuf> {
    settings
        .known_roots
        .iter()
        .filter(|root| host.is_dir(root))
        .find_map(|root| from_install_root(root, settings, host))
}

/// `<root>/<toolchain_subdir>/<greatest version>/<sub-path>/<binary>`.
fn from_install_root(root: &Path, settings: &ToolchainSettings, host: &dyn Host) -> Option<PathBuf> {
    let versions_dir = join_relative(root, &settings.toolchain_subdir);
    let version = latest_version_dir(host, &versions_dir)?;
    tracing::debug!("Latest toolchain version under {}: {}", root.display(), version);
    probe_binary_subpaths(&versions_dir.join(version), settings, host)
}

/// Lexicographically greatest subdirectory name.
pub fn latest_version_dir(host: &dyn Host, dir: &Path) -> Option<String> {
    host.subdirectories(dir).into_iter().max()
}

/// First configured host/target sub-path under `toolchain_root` that
/// contains the compiler.
pub fn probe_binary_subpaths(
    toolchain_root: &Path,
    settings: &ToolchainSettings,
    host: &dyn Host,
) -> Option<PathBuf> {
    settings
        .binary_subpaths
        .iter()
        .map(|sub| join_relative(toolchain_root, sub).join(&settings.binary))
        .find(|candidate| host.is_file(candidate))
}

/// Join a `/`-separated relative path onto `base`.
fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split(['/', '\\'])
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |acc, part| acc.join(part))
}
