//! Configuration loading and parsing for buildready.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use buildready::config::parse_config;
//! use std::path::Path;
//!
//! let yaml = r#"
//! requirements:
//!   - name: RAM (GB)
//!     fact: ram
//!     kind: minimum-numeric
//!     threshold: 8
//! "#;
//! let config = parse_config(yaml, Path::new("buildready.yml")).unwrap();
//! assert_eq!(config.requirements.len(), 1);
//! assert_eq!(config.probes.toolchain.binary, "cl.exe");
//! ```

pub mod loader;
pub mod schema;

pub use schema::{
    BuildReadyConfig, PackageManagerSettings, ProbeSettings, RequirementConfig, RuntimeSettings,
    ToolSettings, ToolchainSettings,
};

pub use loader::{
    discover_config, load_config, load_config_file, parse_config, ConfigSource,
    PROJECT_CONFIG_FILE,
};

use crate::error::Result;
use crate::requirements::Catalog;

impl BuildReadyConfig {
    /// The catalog this configuration describes: its requirement list, or
    /// the built-in catalog when the list is empty.
    pub fn catalog(&self) -> Result<Catalog> {
        if self.requirements.is_empty() {
            Ok(Catalog::builtin())
        } else {
            Catalog::from_config(&self.requirements)
        }
    }
}
