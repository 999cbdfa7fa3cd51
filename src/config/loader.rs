//! Configuration file discovery and loading.
//!
//! Discovery order, first hit wins:
//! 1. Explicit path (`--config` or `BUILDREADY_CONFIG`)
//! 2. `./buildready.yml`
//! 3. `<user config dir>/buildready/config.yml`
//! 4. Built-in defaults

use crate::config::schema::BuildReadyConfig;
use crate::error::{BuildReadyError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "buildready.yml";

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from a file.
    File(PathBuf),
    /// No file found; built-in defaults.
    Builtin,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Builtin => write!(f, "built-in defaults"),
        }
    }
}

/// Find the configuration file to load.
///
/// An explicit path is returned as-is, even if it does not exist, so that
/// loading it reports `ConfigNotFound`. Implicit locations are only
/// returned when they exist.
pub fn discover_config(explicit: Option<&Path>, working_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let project = working_dir.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }

    let user = dirs::config_dir()?.join("buildready").join("config.yml");
    if user.is_file() {
        Some(user)
    } else {
        None
    }
}

/// Discover and load configuration, falling back to the built-in defaults.
pub fn load_config(
    explicit: Option<&Path>,
    working_dir: &Path,
) -> Result<(BuildReadyConfig, ConfigSource)> {
    match discover_config(explicit, working_dir) {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path.display());
            let config = load_config_file(&path)?;
            Ok((config, ConfigSource::File(path)))
        }
        None => {
            tracing::debug!("No configuration file found, using built-in defaults");
            Ok((BuildReadyConfig::default(), ConfigSource::Builtin))
        }
    }
}

/// Load a single config file and parse it into BuildReadyConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<BuildReadyConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BuildReadyError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BuildReadyError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into BuildReadyConfig.
///
/// Blank content is the default configuration.
pub fn parse_config(content: &str, source_path: &Path) -> Result<BuildReadyConfig> {
    if content.trim().is_empty() {
        return Ok(BuildReadyConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| BuildReadyError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_path_wins_even_if_missing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), "{}").unwrap();
        let explicit = temp.path().join("other.yml");

        let found = discover_config(Some(&explicit), temp.path());
        assert_eq!(found, Some(explicit));
    }

    #[test]
    fn project_file_is_discovered() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(PROJECT_CONFIG_FILE);
        fs::write(&path, "probes:\n  command_timeout_secs: 5\n").unwrap();

        let (config, source) = load_config(None, temp.path()).unwrap();
        assert_eq!(config.probes.command_timeout_secs, 5);
        assert_eq!(source, ConfigSource::File(path));
    }

    #[test]
    fn missing_explicit_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yml");
        let err = load_config(Some(&missing), temp.path()).unwrap_err();
        assert!(matches!(err, BuildReadyError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let err = parse_config("requirements: [", Path::new("bad.yml")).unwrap_err();
        match err {
            BuildReadyError::ConfigParseError { path, .. } => {
                assert_eq!(path, PathBuf::from("bad.yml"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_file_is_default() {
        let config = parse_config("\n  \n", Path::new("blank.yml")).unwrap();
        assert_eq!(config, BuildReadyConfig::default());
    }

    #[test]
    fn unknown_top_level_key_is_parse_error() {
        assert!(parse_config("steps: {}", Path::new("x.yml")).is_err());
    }

    #[test]
    fn config_source_display() {
        assert_eq!(ConfigSource::Builtin.to_string(), "built-in defaults");
        assert_eq!(
            ConfigSource::File(PathBuf::from("buildready.yml")).to_string(),
            "buildready.yml"
        );
    }
}
