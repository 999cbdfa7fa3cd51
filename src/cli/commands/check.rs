//! The `buildready check` command.

use chrono::Local;

use crate::cli::args::CheckArgs;
use crate::config::BuildReadyConfig;
use crate::error::Result;
use crate::host::Host;
use crate::report::{self, ReportContext};
use crate::requirements::{
    run_in_session, HardwareSummary, ProbeSession, RunOptions, SystemSummary,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand<'a> {
    config: &'a BuildReadyConfig,
    host: &'a dyn Host,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    /// Create a new check command.
    pub fn new(config: &'a BuildReadyConfig, host: &'a dyn Host, args: CheckArgs) -> Self {
        Self { config, host, args }
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let catalog = self.config.catalog()?;
        let session = ProbeSession::new(self.host, &self.config.probes);
        let options = RunOptions {
            sequential: self.args.sequential,
        };

        let mut spinner = ui.start_spinner(&format!("Checking {} requirements...", catalog.len()));
        let rows = run_in_session(&catalog, &session, options);
        let summaries = if self.args.no_context {
            None
        } else {
            spinner.set_message("Collecting system details...");
            let facts = session.platform();
            Some((
                SystemSummary::from_facts(facts),
                HardwareSummary::from_facts(facts),
            ))
        };
        spinner.finish_clear();

        let mut ctx = ReportContext::new(&rows, Local::now().naive_local());
        if let Some((system, hardware)) = &summaries {
            ctx = ctx.with_system(system).with_hardware(hardware);
        }

        let text = if self.args.json {
            let json = report::to_json(&ctx)?;
            ui.emit(&json);
            json
        } else {
            let text = report::render(&ctx);
            ui.show_report(&text);
            text
        };

        if let Some(path) = &self.args.output {
            report::save_report(path, &text)?;
            ui.success(&format!("Report saved to {}", path.display()));
        }

        if rows.overall_passed {
            ui.success(&format!(
                "Ready to build ({}/{} checks passed)",
                rows.pass_count(),
                rows.total()
            ));
            Ok(CommandResult::success())
        } else {
            let blocking: Vec<&str> = rows.blocking_failures().map(|r| r.item.as_str()).collect();
            ui.warning(&format!("Not ready: {}", blocking.join(", ")));
            Ok(CommandResult::failure(1))
        }
    }
}
