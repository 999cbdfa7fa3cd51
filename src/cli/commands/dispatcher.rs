//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::config::{load_config, BuildReadyConfig, ConfigSource};
use crate::error::Result;
use crate::host::{Host, SystemHost};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
    host: Option<Box<dyn Host>>,
}

impl CommandDispatcher {
    /// Create a dispatcher that checks the real machine.
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            host: None,
        }
    }

    /// Check `host` instead of the real machine.
    pub fn with_host(mut self, host: Box<dyn Host>) -> Self {
        self.host = Some(host);
        self
    }

    /// Get the working directory used for config discovery.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Dispatch and execute a command.
    ///
    /// Loads configuration first; configuration faults are returned as
    /// errors before any probe runs.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Some(Commands::Completions(args)) = &cli.command {
            return super::completions::CompletionsCommand::new(args.clone()).execute(ui);
        }

        let (config, source) = load_config(cli.config.as_deref(), &self.working_dir)?;
        tracing::debug!("Configuration: {}", source);

        let system;
        let host: &dyn Host = match &self.host {
            Some(host) => host.as_ref(),
            None => {
                system = SystemHost::with_timeout(Duration::from_secs(
                    config.probes.command_timeout_secs,
                ));
                &system
            }
        };

        self.dispatch_loaded(cli, &config, &source, host, ui)
    }

    fn dispatch_loaded(
        &self,
        cli: &Cli,
        config: &BuildReadyConfig,
        source: &ConfigSource,
        host: &dyn Host,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(config, host, args.clone()).execute(ui)
            }
            Some(Commands::Summary(args)) => {
                super::summary::SummaryCommand::new(host, args.clone()).execute(ui)
            }
            Some(Commands::Catalog(args)) => {
                super::catalog::CatalogCommand::new(config, source, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::check::CheckCommand::new(config, host, CheckArgs::default()).execute(ui),
        }
    }
}
