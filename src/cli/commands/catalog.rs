//! The `buildready catalog` command.
//!
//! Shows the requirement catalog a `check` would use, or the JSON schema
//! of the configuration file.

use anyhow::Context;

use crate::cli::args::CatalogArgs;
use crate::config::{BuildReadyConfig, ConfigSource};
use crate::error::Result;
use crate::requirements::Catalog;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const NAME_WIDTH: usize = 26;
const FACT_WIDTH: usize = 18;
const KIND_WIDTH: usize = 18;
const REQUIRED_WIDTH: usize = 26;

/// The catalog command implementation.
pub struct CatalogCommand<'a> {
    config: &'a BuildReadyConfig,
    source: &'a ConfigSource,
    args: CatalogArgs,
}

impl<'a> CatalogCommand<'a> {
    /// Create a new catalog command.
    pub fn new(config: &'a BuildReadyConfig, source: &'a ConfigSource, args: CatalogArgs) -> Self {
        Self {
            config,
            source,
            args,
        }
    }
}

impl Command for CatalogCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.schema {
            let schema = schemars::schema_for!(BuildReadyConfig);
            let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
            ui.emit(&json);
            return Ok(CommandResult::success());
        }

        let catalog = self.config.catalog()?;
        let origin = if self.config.requirements.is_empty() {
            "built-in catalog".to_string()
        } else {
            self.source.to_string()
        };
        ui.show_header(&format!("{} requirements ({})", catalog.len(), origin));
        ui.emit(&table(&catalog));
        Ok(CommandResult::success())
    }
}

fn table(catalog: &Catalog) -> String {
    let mut lines = vec![line("Requirement", "Fact", "Kind", "Required", "Mandatory")];
    for req in catalog.iter() {
        lines.push(line(
            &req.name,
            req.fact.as_str(),
            &req.check.kind().to_string(),
            &req.check.label(),
            if req.mandatory { "yes" } else { "no" },
        ));
    }
    lines.join("\n")
}

fn line(name: &str, fact: &str, kind: &str, required: &str, mandatory: &str) -> String {
    format!(
        "{:<nw$} {:<fw$} {:<kw$} {:<rw$} {}",
        name,
        fact,
        kind,
        required,
        mandatory,
        nw = NAME_WIDTH,
        fw = FACT_WIDTH,
        kw = KIND_WIDTH,
        rw = REQUIRED_WIDTH,
    )
    .trim_end()
    .to_string()
}
