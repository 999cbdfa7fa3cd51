//! Resolving bare tool names against `PATH`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[cfg(windows)]
const WINDOWS_SUFFIXES: &[&str] = &[".exe", ".cmd", ".bat", ".com"];

/// Directories listed in the process `PATH`, in search order.
pub fn system_path_dirs() -> Vec<PathBuf> {
    match std::env::var_os("PATH") {
        Some(raw) => std::env::split_paths(&raw).collect(),
        None => Vec::new(),
    }
}

/// Whether `path` is a regular file the current user could run.
///
/// Unix checks the execute bits; Windows runs by extension, so any file
/// counts.
pub fn is_runnable(path: &Path) -> bool {
    let Ok(meta) = path.metadata() else {
        return false;
    };
    meta.is_file() && has_exec_bits(&meta)
}

#[cfg(unix)]
fn has_exec_bits(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn has_exec_bits(_meta: &std::fs::Metadata) -> bool {
    true
}

/// First runnable file named `tool` in `dirs`.
///
/// A name without an extension also matches `.exe`, `.cmd`, `.bat` and
/// `.com` on Windows. No shell `which`/`where` is spawned.
pub fn find_on_path(tool: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let names = file_names(tool);
    dirs.iter()
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|candidate| is_runnable(candidate))
}

fn file_names(tool: &str) -> Vec<OsString> {
    #[allow(unused_mut)]
    let mut names = vec![OsString::from(tool)];
    #[cfg(windows)]
    if Path::new(tool).extension().is_none() {
        names.extend(WINDOWS_SUFFIXES.iter().map(|s| OsString::from(format!("{tool}{s}"))));
    }
    names
}
