//! Shell completions generation.
//!
//! The `buildready completions` command prints a completion script for the
//! requested shell.

use clap::CommandFactory;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const BIN_NAME: &str = "buildready";

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// The completion script as text.
    pub fn script(&self) -> String {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(self.args.shell, &mut cmd, BIN_NAME, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.emit(self.script().trim_end());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap_complete::Shell;

    #[test]
    fn generates_bash_completions() {
        let script = CompletionsCommand::new(CompletionsArgs { shell: Shell::Bash }).script();
        assert!(script.contains("buildready"));
        assert!(script.contains("complete"));
        assert!(script.contains("summary"));
    }

    #[test]
    fn generates_fish_completions() {
        let script = CompletionsCommand::new(CompletionsArgs { shell: Shell::Fish }).script();
        assert!(script.contains("no-context"));
    }

    #[test]
    fn emits_script_through_ui() {
        let mut ui = MockUI::new();
        let result = CompletionsCommand::new(CompletionsArgs { shell: Shell::Zsh })
            .execute(&mut ui)
            .unwrap();
        assert!(result.success);
        assert!(ui.emitted()[0].contains("#compdef buildready"));
    }
}
