//! buildready - Check that a machine can run the build.
//!
//! buildready probes the host for the facts a build depends on (OS, memory,
//! CPU, disk, language runtime, package manager, version control and the
//! native compiler toolchain), compares them against an ordered requirement
//! catalog and prints a fixed-width PASS/FAIL report.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and schema
//! - [`error`] - Error types and result aliases
//! - [`host`] - Read-only access to the machine being checked
//! - [`report`] - Report rendering, JSON output and saving
//! - [`requirements`] - Requirement catalog, probes and evaluation
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use buildready::config::parse_config;
//! use buildready::host::MockHost;
//! use buildready::requirements::run;
//! use std::path::Path;
//!
//! let config = parse_config(
//!     "requirements:\n  - { name: Tools, fact: tools, kind: string-list, threshold: [] }\n",
//!     Path::new("buildready.yml"),
//! )
//! .unwrap();
//! let catalog = config.catalog().unwrap();
//!
//! let rows = run(&catalog, &config.probes, &MockHost::new());
//! assert!(rows.overall_passed);
//! assert_eq!(rows.rows[0].item, "Tools");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod report;
pub mod requirements;
pub mod ui;

pub use error::{BuildReadyError, Result};
