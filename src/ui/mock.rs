//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use buildready::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Probing host");
//! ui.show_report("Build Readiness Report\n");
//!
//! assert!(ui.has_message("Probing"));
//! assert_eq!(ui.reports().len(), 1);
//! ```

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Records everything a command sends to the UI.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    reports: Vec<String>,
    emitted: Vec<String>,
}

impl MockUI {
    /// A recorder in normal mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder reporting `mode`.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Plain status lines.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Success lines.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Warning lines.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Error lines.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Headings.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Initial text of every spinner started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Rendered reports, in order.
    pub fn reports(&self) -> &[String] {
        &self.reports
    }

    /// Machine-readable output, in order.
    pub fn emitted(&self) -> &[String] {
        &self.emitted
    }

    /// Whether any message contains `needle`.
    pub fn has_message(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }

    /// Whether any success message contains `needle`.
    pub fn has_success(&self, needle: &str) -> bool {
        self.successes.iter().any(|m| m.contains(needle))
    }

    /// Whether any error message contains `needle`.
    pub fn has_error(&self, needle: &str) -> bool {
        self.errors.iter().any(|m| m.contains(needle))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner)
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_report(&mut self, text: &str) {
        self.reports.push(text.to_string());
    }

    fn emit(&mut self, text: &str) {
        self.emitted.push(text.to_string());
    }
}

/// Spinner handle that ignores updates.
pub struct MockSpinner;

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}
    fn finish_clear(&mut self) {}
}
