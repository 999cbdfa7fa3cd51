//! Configuration schema definitions for buildready.
//!
//! These structs map to the YAML configuration file format. Every field
//! has a default, so an empty file is a valid configuration that checks
//! the built-in catalog with the built-in probe settings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::requirements::catalog::{Fact, RequirementKind, ThresholdValue};

/// Root configuration structure for buildready.yml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct BuildReadyConfig {
    /// Ordered requirement list. Empty means "use the built-in catalog".
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<RequirementConfig>,

    /// How facts are discovered
    pub probes: ProbeSettings,
}

/// A requirement as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RequirementConfig {
    /// Display name, shown as the report item
    pub name: String,

    /// Which host fact is checked
    pub fact: Fact,

    /// How the threshold is compared
    pub kind: RequirementKind,

    /// Threshold value; its shape must match `kind`
    pub threshold: ThresholdValue,

    /// Whether failing this requirement fails the run
    #[serde(default = "default_true")]
    pub mandatory: bool,
}

/// Probe settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeSettings {
    /// Per-process wait bound, in seconds
    pub command_timeout_secs: u64,

    /// Language runtime and its package manager
    pub runtime: RuntimeSettings,

    /// Version-control client
    pub version_control: ToolSettings,

    /// Invocations for additional named tools
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tools: BTreeMap<String, ToolSettings>,

    /// Native compiler discovery
    pub toolchain: ToolchainSettings,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            command_timeout_secs: 10,
            runtime: RuntimeSettings::default(),
            version_control: ToolSettings::named("git"),
            tools: BTreeMap::new(),
            toolchain: ToolchainSettings::default(),
        }
    }
}

impl ProbeSettings {
    /// Settings for an additional tool, defaulting to `<name> --version`.
    pub fn tool(&self, name: &str) -> ToolSettings {
        self.tools
            .get(name)
            .cloned()
            .unwrap_or_else(|| ToolSettings::named(name))
    }
}

/// Runtime discovery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeSettings {
    /// Launchers tried in order; each is a program plus leading args
    /// (e.g. `py -3`)
    pub candidates: Vec<String>,

    /// Arguments appended to a launcher to ask for its version
    pub version_args: Vec<String>,

    /// Companion package manager
    pub package_manager: PackageManagerSettings,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            candidates: vec!["python3".into(), "python".into(), "py -3".into()],
            version_args: vec!["--version".into()],
            package_manager: PackageManagerSettings::default(),
        }
    }
}

/// Package manager discovery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct PackageManagerSettings {
    /// Arguments passed to the discovered runtime launcher
    pub runtime_args: Vec<String>,

    /// Standalone command lines tried after the runtime form
    pub candidates: Vec<String>,
}

impl Default for PackageManagerSettings {
    fn default() -> Self {
        Self {
            runtime_args: vec!["-m".into(), "pip".into(), "--version".into()],
            candidates: vec!["pip3 --version".into(), "pip --version".into()],
        }
    }
}

/// Command lines used to detect a tool, tried in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ToolSettings {
    pub candidates: Vec<String>,
}

impl ToolSettings {
    /// The default detection for a tool: `<name> --version`.
    pub fn named(name: &str) -> Self {
        Self {
            candidates: vec![format!("{} --version", name)],
        }
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }
}

/// Native compiler discovery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainSettings {
    /// Explicit compiler path; wins when the file exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_path: Option<PathBuf>,

    /// Compiler binary file name
    pub binary: String,

    /// Installer discovery utility path; resolved on PATH when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installer_utility: Option<PathBuf>,

    /// Installer discovery utility name used for PATH resolution
    pub installer_utility_name: String,

    /// Component the installation must provide
    pub component: String,

    /// Versioned toolchain directory under an installation root
    pub toolchain_subdir: String,

    /// Environment variable naming an active toolchain root
    pub env_var: String,

    /// Host/target binary directories, probed in order
    pub binary_subpaths: Vec<String>,

    /// Installation roots searched last
    pub known_roots: Vec<PathBuf>,

    /// Arguments used to capture the compiler banner
    pub version_args: Vec<String>,
}

impl Default for ToolchainSettings {
    fn default() -> Self {
        Self {
            override_path: None,
            binary: "cl.exe".to_string(),
            installer_utility: Some(PathBuf::from(
                r"C:\Program Files (x86)\Microsoft Visual Studio\Installer\vswhere.exe",
            )),
            installer_utility_name: "vswhere.exe".to_string(),
            component: "Microsoft.VisualStudio.Component.VC.Tools.x86.x64".to_string(),
            toolchain_subdir: "VC/Tools/MSVC".to_string(),
            env_var: "VCToolsInstallDir".to_string(),
            binary_subpaths: vec![
                "bin/Hostx64/x64".to_string(),
                "bin/Hostx64/x86".to_string(),
                "bin/Hostx86/x86".to_string(),
            ],
            known_roots: default_known_roots(),
            version_args: Vec::new(),
        }
    }
}

fn default_known_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    for program_files in [r"C:\Program Files", r"C:\Program Files (x86)"] {
        for year in ["2022", "2019"] {
            for edition in ["BuildTools", "Community", "Professional", "Enterprise"] {
                roots.push(
                    PathBuf::from(program_files)
                        .join("Microsoft Visual Studio")
                        .join(year)
                        .join(edition),
                );
            }
        }
    }
    roots
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_default_config() {
        let config: BuildReadyConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, BuildReadyConfig::default());
        assert!(config.requirements.is_empty());
        assert_eq!(config.probes.command_timeout_secs, 10);
    }

    #[test]
    fn requirement_mandatory_defaults_to_true() {
        let yaml = r#"
requirements:
  - name: RAM (GB)
    fact: ram
    kind: minimum-numeric
    threshold: 4
"#;
        let config: BuildReadyConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.requirements[0].mandatory);
        assert_eq!(config.requirements[0].threshold, ThresholdValue::Number(4));
    }

    #[test]
    fn threshold_shapes_parse() {
        let yaml = r#"
requirements:
  - { name: Python, fact: runtime, kind: minimum-version, threshold: "3.10" }
  - { name: pip, fact: package_manager, kind: boolean-presence, threshold: true, mandatory: false }
  - { name: Tools, fact: tools, kind: string-list, threshold: [cmake, ninja] }
"#;
        let config: BuildReadyConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.requirements[0].threshold,
            ThresholdValue::Text("3.10".into())
        );
        assert_eq!(config.requirements[1].threshold, ThresholdValue::Bool(true));
        assert!(!config.requirements[1].mandatory);
        assert_eq!(
            config.requirements[2].threshold,
            ThresholdValue::List(vec!["cmake".into(), "ninja".into()])
        );
    }

    #[test]
    fn unknown_kind_is_parse_error() {
        let yaml = r#"
requirements:
  - { name: RAM, fact: ram, kind: at-least, threshold: 4 }
"#;
        assert!(serde_yaml::from_str::<BuildReadyConfig>(yaml).is_err());
    }

    #[test]
    fn unknown_fact_is_parse_error() {
        let yaml = r#"
requirements:
  - { name: GPU, fact: gpu, kind: minimum-numeric, threshold: 1 }
"#;
        assert!(serde_yaml::from_str::<BuildReadyConfig>(yaml).is_err());
    }

    #[test]
    fn partial_probe_settings_keep_defaults() {
        let yaml = r#"
probes:
  command_timeout_secs: 3
  toolchain:
    override_path: D:\tools\cl.exe
"#;
        let config: BuildReadyConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.probes.command_timeout_secs, 3);
        assert_eq!(
            config.probes.toolchain.override_path,
            Some(PathBuf::from(r"D:\tools\cl.exe"))
        );
        assert_eq!(config.probes.toolchain.binary, "cl.exe");
        assert_eq!(config.probes.runtime.candidates[0], "python3");
    }

    #[test]
    fn unknown_tool_defaults_to_version_flag() {
        let settings = ProbeSettings::default();
        assert_eq!(settings.tool("cmake").candidates, vec!["cmake --version"]);
    }

    #[test]
    fn configured_tool_overrides_default() {
        let mut settings = ProbeSettings::default();
        settings.tools.insert(
            "ninja".to_string(),
            ToolSettings {
                candidates: vec!["ninja-build --version".to_string()],
            },
        );
        assert_eq!(
            settings.tool("ninja").candidates,
            vec!["ninja-build --version"]
        );
    }

    #[test]
    fn known_roots_cover_editions_and_channels() {
        let roots = default_known_roots();
        assert_eq!(roots.len(), 16);
        assert!(roots[0].ends_with("BuildTools"));
        assert!(roots.iter().any(|r| r.to_string_lossy().contains("2019")));
        assert!(roots
            .iter()
            .any(|r| r.to_string_lossy().contains("Program Files (x86)")));
    }
}
