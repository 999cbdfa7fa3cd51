//! Error types for buildready operations.
//!
//! This module defines [`BuildReadyError`], the error type used by the
//! configuration and reporting layers, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - Probing never produces a `BuildReadyError`: a missing tool, a malformed
//!   version string or a failed platform query is a value (`ProbeResult`),
//!   not an error
//! - Catalog misconfiguration fails loudly when the catalog is built, before
//!   any probe runs
//! - Use `anyhow::Error` (via `BuildReadyError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for buildready operations.
#[derive(Debug, Error)]
pub enum BuildReadyError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A requirement in the catalog is inconsistent (wrong threshold shape,
    /// unparsable version, empty one-of list, kind not applicable to the
    /// fact, duplicate name).
    #[error("Invalid requirement '{requirement}': {message}")]
    CatalogInvalid {
        requirement: String,
        message: String,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BuildReadyError {
    /// Process exit code for this error: 2 for configuration faults, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigNotFound { .. }
            | Self::ConfigParseError { .. }
            | Self::CatalogInvalid { .. } => 2,
            Self::Io(_) | Self::Other(_) => 1,
        }
    }
}

/// Result type alias for buildready operations.
pub type Result<T> = std::result::Result<T, BuildReadyError>;
