//! Scriptable host for tests.
//!
//! `MockHost` implements [`Host`] with canned environment variables,
//! `PATH` entries, command outputs and platform facts. Filesystem checks
//! go to the real filesystem, so tests build fake install trees in a
//! temporary directory.
//!
//! # Example
//!
//! ```
//! use buildready::host::{CommandOutput, Host, MockHost};
//!
//! let host = MockHost::new()
//!     .with_env("VCToolsInstallDir", "/opt/msvc/14.44")
//!     .with_command("git --version", CommandOutput::success("git version 2.43.0"));
//!
//! assert_eq!(host.env_var("VCToolsInstallDir").as_deref(), Some("/opt/msvc/14.44"));
//! let out = host.run("git", &["--version".to_string()]).unwrap();
//! assert!(out.stdout.contains("2.43.0"));
//! assert_eq!(host.invocations(), vec!["git --version".to_string()]);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use super::{CommandOutput, Host, PlatformFacts};

/// Mock host implementation for testing.
///
/// Commands are matched on their full command line (`program` followed by
/// the space-joined arguments). Unscripted commands behave like a missing
/// program.
#[derive(Debug, Default)]
pub struct MockHost {
    env: HashMap<String, String>,
    path_entries: Vec<PathBuf>,
    commands: HashMap<String, CommandOutput>,
    platform: PlatformFacts,
    invocations: Mutex<Vec<String>>,
}

impl MockHost {
    /// Create an empty host: no env vars, empty `PATH`, no tools, no facts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an environment variable.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Append a directory to the mock `PATH`.
    pub fn with_path_entry(mut self, dir: impl Into<PathBuf>) -> Self {
        self.path_entries.push(dir.into());
        self
    }

    /// Script the output of a command line.
    pub fn with_command(mut self, command_line: &str, output: CommandOutput) -> Self {
        self.commands.insert(command_line.to_string(), output);
        self
    }

    /// Set the platform facts.
    pub fn with_platform(mut self, platform: PlatformFacts) -> Self {
        self.platform = platform;
        self
    }

    /// Command lines run so far, in call order.
    pub fn invocations(&self) -> Vec<String> {
        self.invocations
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn command_line(program: &str, args: &[String]) -> String {
        if args.is_empty() {
            program.to_string()
        } else {
            format!("{} {}", program, args.join(" "))
        }
    }
}

impl Host for MockHost {
    fn env_var(&self, key: &str) -> Option<String> {
        self.env.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn path_entries(&self) -> Vec<PathBuf> {
        self.path_entries.clone()
    }

    fn run(&self, program: &str, args: &[String]) -> Option<CommandOutput> {
        let line = Self::command_line(program, args);
        if let Ok(mut calls) = self.invocations.lock() {
            calls.push(line.clone());
        }
        self.commands.get(&line).cloned()
    }

    fn platform(&self) -> PlatformFacts {
        self.platform.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscripted_command_is_absent() {
        let host = MockHost::new();
        assert!(host.run("python3", &["--version".to_string()]).is_none());
        assert_eq!(host.invocations(), vec!["python3 --version".to_string()]);
    }

    #[test]
    fn command_without_args_matches_program_only() {
        let host = MockHost::new().with_command("cl.exe", CommandOutput::failure(2, "banner"));
        let out = host.run("cl.exe", &[]).unwrap();
        assert_eq!(out.stderr, "banner");
    }

    #[test]
    fn empty_env_value_is_unset() {
        let host = MockHost::new().with_env("VCToolsInstallDir", "");
        assert!(host.env_var("VCToolsInstallDir").is_none());
    }

    #[test]
    fn default_platform_is_empty() {
        let host = MockHost::new();
        let facts = host.platform();
        assert!(facts.total_memory_bytes.is_none());
        assert!(facts.cpu_packages.is_empty());
    }

    #[test]
    fn which_uses_mock_path_only() {
        let host = MockHost::new();
        assert!(host.which("sh").is_none());
    }
}
