//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// buildready - Check that a machine can run the build.
#[derive(Debug, Parser)]
#[command(name = "buildready")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ./buildready.yml and the user config)
    #[arg(short, long, global = true, env = "BUILDREADY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only print the report
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check the machine against the requirement catalog (default)
    Check(CheckArgs),

    /// Show system and hardware details without checking anything
    Summary(SummaryArgs),

    /// Show the active requirement catalog
    Catalog(CatalogArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Also save the report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Omit the system, CPU and hardware blocks
    #[arg(long)]
    pub no_context: bool,

    /// Evaluate requirements one at a time
    #[arg(long)]
    pub sequential: bool,
}

/// Arguments for the `summary` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SummaryArgs {
    /// Print the summaries as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `catalog` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CatalogArgs {
    /// Print the JSON schema of the configuration file instead
    #[arg(long)]
    pub schema: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
