//! Requirement catalog, host probes and evaluation.
//!
//! A run takes an ordered [`Catalog`] and the live host, probes each fact
//! the catalog names and returns a [`RowSet`] with one row per requirement
//! (one per tool for tool lists) plus the overall result.
//!
//! # Modules
//!
//! - [`catalog`] - Requirement definitions and the built-in catalog
//! - [`probe`] - One read-only probe per host fact
//! - [`toolchain`] - Tiered native compiler discovery
//! - [`version`] - Tolerant version parsing and comparison
//! - [`checker`] - Evaluation of a catalog into rows
//! - [`status`] - Check rows and row sets
//! - [`summary`] - Informational system and hardware summaries
//!
//! # Example
//!
//! ```
//! use buildready::config::ProbeSettings;
//! use buildready::host::{CommandOutput, MockHost};
//! use buildready::requirements::{run, Catalog, Check, Fact, Requirement};
//!
//! let catalog = Catalog::new(vec![Requirement::new(
//!     "Git",
//!     Fact::VersionControl,
//!     Check::Presence(true),
//! )])
//! .unwrap();
//! let host = MockHost::new()
//!     .with_command("git --version", CommandOutput::success("git version 2.43.0"));
//!
//! let rows = run(&catalog, &ProbeSettings::default(), &host);
//! assert!(rows.overall_passed);
//! assert_eq!(rows.rows[0].actual, "2.43.0");
//! ```

pub mod catalog;
pub mod checker;
pub mod probe;
pub mod status;
pub mod summary;
pub mod toolchain;
pub mod version;

pub use catalog::{Catalog, Check, Fact, Requirement, RequirementKind, ThresholdValue};
pub use checker::{run, run_in_session, run_with_options, ProbeSession, RunOptions};
pub use probe::ProbeResult;
pub use status::{CheckRow, RowSet};
pub use summary::{HardwareSummary, SystemSummary};
pub use toolchain::{Resolution, Tier, ToolchainResolver};
pub use version::{compare_versions, satisfies_minimum, Version};
