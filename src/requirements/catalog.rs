//! Requirement catalog.
//!
//! A [`Catalog`] is the ordered list of requirements a machine is checked
//! against. Order is significant: it is the order of the report rows. The
//! catalog is validated once, when it is built, so that a misconfigured
//! requirement fails before any probe runs.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::version::Version;
use crate::config::RequirementConfig;
use crate::error::{BuildReadyError, Result};

/// The host fact a requirement is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Fact {
    /// OS identity, build and support flag.
    Os,
    /// Installed RAM in whole GiB.
    Ram,
    /// Logical processors, summed across sockets.
    CpuCores,
    /// Free space on the system volume in whole GiB.
    FreeDisk,
    /// Language runtime (Python by default).
    Runtime,
    /// The runtime's package manager (pip by default).
    PackageManager,
    /// Version-control client (git by default).
    VersionControl,
    /// Native compiler toolchain (MSVC `cl.exe` by default).
    NativeCompiler,
    /// Additional named tools, one row each.
    Tools,
}

impl Fact {
    /// Whether a requirement of `kind` makes sense for this fact.
    pub fn accepts(self, kind: RequirementKind) -> bool {
        use RequirementKind::*;
        match self {
            Fact::Os => matches!(kind, OneOf | BooleanPresence),
            Fact::Ram | Fact::CpuCores | Fact::FreeDisk => {
                matches!(kind, MinimumNumeric | BooleanPresence)
            }
            Fact::Runtime | Fact::PackageManager | Fact::VersionControl | Fact::NativeCompiler => {
                matches!(kind, MinimumVersion | BooleanPresence)
            }
            Fact::Tools => kind == StringList,
        }
    }

    /// The configuration name of this fact.
    pub fn as_str(self) -> &'static str {
        match self {
            Fact::Os => "os",
            Fact::Ram => "ram",
            Fact::CpuCores => "cpu_cores",
            Fact::FreeDisk => "free_disk",
            Fact::Runtime => "runtime",
            Fact::PackageManager => "package_manager",
            Fact::VersionControl => "version_control",
            Fact::NativeCompiler => "native_compiler",
            Fact::Tools => "tools",
        }
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a requirement's threshold is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RequirementKind {
    /// Discovered number must be `>=` the threshold.
    MinimumNumeric,
    /// Discovered version must be `>=` the threshold (fail-closed).
    MinimumVersion,
    /// The fact must be present; `false` marks the requirement optional.
    BooleanPresence,
    /// Each listed tool must be present.
    StringList,
    /// The discovered value must contain one of the listed families.
    OneOf,
}

impl std::fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RequirementKind::MinimumNumeric => "minimum-numeric",
            RequirementKind::MinimumVersion => "minimum-version",
            RequirementKind::BooleanPresence => "boolean-presence",
            RequirementKind::StringList => "string-list",
            RequirementKind::OneOf => "one-of",
        };
        f.write_str(name)
    }
}

/// A threshold as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ThresholdValue {
    Bool(bool),
    Number(u64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

/// A validated, typed comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "threshold", rename_all = "kebab-case")]
pub enum Check {
    MinimumNumeric(u64),
    MinimumVersion(String),
    #[serde(rename = "boolean-presence")]
    Presence(bool),
    #[serde(rename = "string-list")]
    ToolList(Vec<String>),
    OneOf(Vec<String>),
}

impl Check {
    /// The kind this check was built from.
    pub fn kind(&self) -> RequirementKind {
        match self {
            Check::MinimumNumeric(_) => RequirementKind::MinimumNumeric,
            Check::MinimumVersion(_) => RequirementKind::MinimumVersion,
            Check::Presence(_) => RequirementKind::BooleanPresence,
            Check::ToolList(_) => RequirementKind::StringList,
            Check::OneOf(_) => RequirementKind::OneOf,
        }
    }

    /// Human-readable threshold, as shown in the "Required" column.
    pub fn label(&self) -> String {
        match self {
            Check::MinimumNumeric(n) => format!(">= {}", n),
            Check::MinimumVersion(v) => format!(">= {}", v),
            Check::Presence(true) => "Installed".to_string(),
            Check::Presence(false) => "Optional".to_string(),
            Check::ToolList(tools) if tools.is_empty() => "None".to_string(),
            Check::ToolList(_) => "Installed".to_string(),
            Check::OneOf(families) => families.join(" / "),
        }
    }
}

/// One requirement of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// Display name, also the report item.
    pub name: String,
    /// The fact probed.
    pub fact: Fact,
    /// The comparison applied.
    pub check: Check,
    /// Whether failing this requirement fails the run.
    pub mandatory: bool,
}

impl Requirement {
    /// Create a mandatory requirement.
    pub fn new(name: &str, fact: Fact, check: Check) -> Self {
        Self {
            name: name.to_string(),
            fact,
            check,
            mandatory: true,
        }
    }

    /// Mark the requirement optional.
    pub fn optional(mut self) -> Self {
        self.mandatory = false;
        self
    }

    /// Optional requirements always pass, whatever is discovered.
    ///
    /// A presence check with a `false` threshold is optional too.
    pub fn is_optional(&self) -> bool {
        !self.mandatory || self.check == Check::Presence(false)
    }

    /// Build a typed requirement from configuration.
    pub fn from_config(config: &RequirementConfig) -> Result<Self> {
        let invalid = |message: String| BuildReadyError::CatalogInvalid {
            requirement: config.name.clone(),
            message,
        };

        let check = match (config.kind, &config.threshold) {
            (RequirementKind::MinimumNumeric, ThresholdValue::Number(n)) => {
                Check::MinimumNumeric(*n)
            }
            (RequirementKind::MinimumVersion, ThresholdValue::Text(v)) => {
                Check::MinimumVersion(v.trim().to_string())
            }
            (RequirementKind::MinimumVersion, ThresholdValue::Number(_))
            | (RequirementKind::MinimumVersion, ThresholdValue::Float(_)) => {
                return Err(invalid(
                    "version thresholds must be quoted strings (e.g. \"3.10\")".to_string(),
                ));
            }
            (RequirementKind::BooleanPresence, ThresholdValue::Bool(b)) => Check::Presence(*b),
            (RequirementKind::StringList, ThresholdValue::List(tools)) => {
                Check::ToolList(tools.clone())
            }
            (RequirementKind::OneOf, ThresholdValue::List(families)) => {
                Check::OneOf(families.clone())
            }
            (kind, threshold) => {
                return Err(invalid(format!(
                    "threshold {:?} does not match kind {:?}",
                    threshold, kind
                )));
            }
        };

        let requirement = Self {
            name: config.name.clone(),
            fact: config.fact,
            check,
            mandatory: config.mandatory,
        };
        requirement.validate()?;
        Ok(requirement)
    }

    /// Reject requirements that could never be evaluated meaningfully.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| BuildReadyError::CatalogInvalid {
            requirement: self.name.clone(),
            message,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }
        if !self.fact.accepts(self.check.kind()) {
            return Err(invalid(format!(
                "kind {:?} cannot be applied to fact {:?}",
                self.check.kind(),
                self.fact
            )));
        }
        match &self.check {
            Check::MinimumVersion(v) if Version::parse(v).is_none() => {
                Err(invalid(format!("'{}' is not a version", v)))
            }
            Check::OneOf(families) if families.is_empty() => {
                Err(invalid("one-of needs at least one entry".to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Ordered, validated set of requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    requirements: Vec<Requirement>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names and any requirement
    /// that fails [`Requirement::validate`].
    pub fn new(requirements: Vec<Requirement>) -> Result<Self> {
        let mut seen = HashSet::new();
        for req in &requirements {
            if !seen.insert(req.name.as_str()) {
                return Err(BuildReadyError::CatalogInvalid {
                    requirement: req.name.clone(),
                    message: "duplicate requirement name".to_string(),
                });
            }
            req.validate()?;
        }
        Ok(Self { requirements })
    }

    /// Build a catalog from configuration entries, in order.
    pub fn from_config(configs: &[RequirementConfig]) -> Result<Self> {
        let requirements = configs
            .iter()
            .map(Requirement::from_config)
            .collect::<Result<Vec<_>>>()?;
        Self::new(requirements)
    }

    /// The default catalog for a Windows Python/MSVC build machine.
    pub fn builtin() -> Self {
        Self {
            requirements: vec![
                Requirement::new(
                    "Operating system",
                    Fact::Os,
                    Check::OneOf(vec!["Windows 10".to_string(), "Windows 11".to_string()]),
                ),
                Requirement::new("RAM (GB)", Fact::Ram, Check::MinimumNumeric(4)),
                Requirement::new("CPU cores", Fact::CpuCores, Check::MinimumNumeric(2)),
                Requirement::new("Free disk (GB)", Fact::FreeDisk, Check::MinimumNumeric(10)),
                Requirement::new(
                    "Python",
                    Fact::Runtime,
                    Check::MinimumVersion("3.10".to_string()),
                ),
                Requirement::new("pip", Fact::PackageManager, Check::Presence(true)),
                Requirement::new("Git", Fact::VersionControl, Check::Presence(true)),
                Requirement::new("MSVC compiler", Fact::NativeCompiler, Check::Presence(true)),
                Requirement::new("Tools", Fact::Tools, Check::ToolList(Vec::new())),
            ],
        }
    }

    /// Iterate requirements in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Requirement> {
        self.requirements.iter()
    }

    /// Requirements as a slice.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Look up a requirement by name.
    pub fn get(&self, name: &str) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.name == name)
    }

    /// Number of requirements.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
