//! Visual theme and styling.

use console::Style;

/// Terminal styles used by buildready.
#[derive(Debug, Clone)]
pub struct BuildReadyTheme {
    /// Style for success messages and PASS (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages and FAIL (red bold).
    pub error: Style,
    /// Style for headers (bold).
    pub header: Style,
    /// Style for report section titles like `[Checks]` (cyan bold).
    pub section: Style,
}

impl Default for BuildReadyTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildReadyTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            header: Style::new().bold(),
            section: Style::new().cyan().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            header: Style::new(),
            section: Style::new(),
        }
    }

    /// Pick the colored or plain theme.
    pub fn for_colors(colors: bool) -> Self {
        if colors {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    /// Style one report line for the terminal.
    ///
    /// Only the trailing PASS/FAIL token and section titles are styled, so
    /// the visible text is unchanged.
    pub fn format_report_line(&self, line: &str) -> String {
        if line.starts_with('[') && line.ends_with(']') {
            return format!("{}", self.section.apply_to(line));
        }
        for (token, style) in [("PASS", &self.success), ("FAIL", &self.error)] {
            if let Some(head) = line.strip_suffix(token) {
                if head.ends_with(' ') {
                    return format!("{}{}", head, style.apply_to(token));
                }
            }
        }
        if let Some(rest) = line.strip_prefix("Result: ") {
            let (status, tail) = rest.split_at(rest.find(' ').unwrap_or(rest.len()));
            let style = if status == "PASS" {
                &self.success
            } else {
                &self.error
            };
            return format!("Result: {}{}", style.apply_to(status), tail);
        }
        line.to_string()
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors(no_color: bool) -> bool {
    if no_color {
        return false;
    }

    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
