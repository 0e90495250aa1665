//! Test utilities for bcdev
//!
//! This crate provides shared testing utilities used across the bcdev workspace.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// This ensures all test temporary files are centralized in a single location
/// that is gitignored and easy to clean up manually if needed.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot be created.
///
/// # Examples
///
/// ```rust
/// use bcdev_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("test.txt");
/// std::fs::write(&file_path, "test data").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Write an executable script named `name` into `dir`
///
/// On Unix the file is a `/bin/sh` script with mode 0755; `body` is shell code.
/// On Windows the file is `<name>.bat` and `body` is batch code.
///
/// Returns the path of the written file.
pub fn write_fake_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[cfg(windows)]
    {
        let path = dir.join(format!("{name}.bat"));
        std::fs::write(&path, format!("@echo off\r\n{body}\r\n")).unwrap();
        path
    }
}

/// Shell body for a modern `al` that behaves like the real one:
/// `--help` prints the `altool` banner to stderr and exits 1,
/// `--version` prints `altool <version>`,
/// `compile` prints each received argument on its own line and exits 0.
#[cfg(unix)]
pub fn modern_al_body(version: &str) -> String {
    format!(
        r#"case "$1" in
  --help) echo "altool {version}" >&2; echo "Usage: al [command]" >&2; exit 1 ;;
  --version) echo "altool {version}" ;;
  compile) shift; for a in "$@"; do printf '%s\n' "$a"; done ;;
  *) echo "unknown command $1" >&2; exit 2 ;;
esac"#
    )
}

/// Shell body for a legacy `alc` that answers `/?` with its version banner
/// and fails every compile with the given diagnostic on stderr.
#[cfg(unix)]
pub fn legacy_alc_body(version: &str, diagnostic: &str) -> String {
    format!(
        r#"case "$1" in
  "/?") echo "AL Compiler version {version}" ;;
  *) echo "{diagnostic}" >&2; exit 1 ;;
esac"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_is_under_tmp() {
        let temp = temp_dir_in_workspace();
        assert!(temp.path().exists());
        assert!(temp.path().parent().unwrap().ends_with(".tmp"));
    }

    #[test]
    #[cfg(unix)]
    fn test_fake_executable_runs() {
        let temp = temp_dir_in_workspace();
        let path = write_fake_executable(temp.path(), "hello", "echo hi");

        let output = std::process::Command::new(&path).output().unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "hi\n");
    }
}
