//! The `buildready summary` command.
//!
//! Prints the system and hardware blocks without checking anything.

use anyhow::Context;
use chrono::Local;

use crate::cli::args::SummaryArgs;
use crate::error::Result;
use crate::host::Host;
use crate::report::render_summary;
use crate::requirements::summary::collect;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The summary command implementation.
pub struct SummaryCommand<'a> {
    host: &'a dyn Host,
    args: SummaryArgs,
}

impl<'a> SummaryCommand<'a> {
    /// Create a new summary command.
    pub fn new(host: &'a dyn Host, args: SummaryArgs) -> Self {
        Self { host, args }
    }
}

impl Command for SummaryCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut spinner = ui.start_spinner("Collecting system details...");
        let (system, hardware) = collect(self.host);
        spinner.finish_clear();

        if self.args.json {
            let value = serde_json::json!({
                "system": system,
                "hardware": hardware,
            });
            let json =
                serde_json::to_string_pretty(&value).context("Failed to serialize summary")?;
            ui.emit(&json);
        } else {
            ui.show_report(&render_summary(&system, &hardware, Local::now().naive_local()));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MockHost, PlatformFacts};
    use crate::ui::MockUI;

    fn host() -> MockHost {
        MockHost::new().with_platform(PlatformFacts {
            host_name: Some("BUILD-01".into()),
            os_caption: Some("Microsoft Windows 11 Pro".into()),
            ..PlatformFacts::default()
        })
    }

    #[test]
    fn prints_summary_blocks() {
        let host = host();
        let mut ui = MockUI::new();

        let result = SummaryCommand::new(&host, SummaryArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        let text = &ui.reports()[0];
        assert!(text.starts_with("System Summary\n"));
        assert!(text.contains("BUILD-01"));
        assert!(!text.contains("[Checks]"));
    }

    #[test]
    fn json_summary_has_both_sections() {
        let host = host();
        let mut ui = MockUI::new();

        SummaryCommand::new(&host, SummaryArgs { json: true })
            .execute(&mut ui)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.emitted()[0]).unwrap();
        assert_eq!(value["system"]["machine_name"], "BUILD-01");
        assert_eq!(value["hardware"]["sockets"], 0);
    }

    #[test]
    fn summary_runs_no_commands() {
        let host = host();
        let mut ui = MockUI::new();
        SummaryCommand::new(&host, SummaryArgs::default())
            .execute(&mut ui)
            .unwrap();
        assert!(host.invocations().is_empty());
    }
}
