//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminal usage
//! - [`MockUI`] for tests
//! - Spinner, theme and output mode
//!
//! # Example
//!
//! ```
//! use buildready::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(OutputMode::Quiet, true);
//! ui.show_header("Build readiness");
//! ui.success("Report saved");
//! ```

pub mod mock;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, BuildReadyTheme};

/// Where commands send what they have to say.
///
/// Status lines (messages, successes, warnings, headers, spinners) are
/// for people and may be suppressed. Errors, reports and emitted text are
/// always written.
pub trait UserInterface {
    /// The mode this interface was created with.
    fn output_mode(&self) -> OutputMode;

    /// Plain status line.
    fn message(&mut self, msg: &str);

    /// Status line for something that worked.
    fn success(&mut self, msg: &str);

    /// Status line for something the user should look at.
    fn warning(&mut self, msg: &str);

    /// Error line. Written in every mode.
    fn error(&mut self, msg: &str);

    /// Start a spinner; it stays up until the handle is finished.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Heading above a block of status output.
    fn show_header(&mut self, title: &str);

    /// Print a rendered report line by line. Written in every mode.
    fn show_report(&mut self, text: &str);

    /// Write machine-readable text (JSON, schema, completions) verbatim.
    fn emit(&mut self, text: &str);
}

/// A running spinner.
pub trait SpinnerHandle {
    /// Replace the text next to the spinner.
    fn set_message(&mut self, msg: &str);

    /// Stop and erase the spinner.
    fn finish_clear(&mut self);
}
