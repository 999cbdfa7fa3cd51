//! Command-line interface for buildready.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CatalogArgs, CheckArgs, Cli, Commands, CompletionsArgs, SummaryArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
