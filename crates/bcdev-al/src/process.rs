//! Launching toolchain processes through the platform shell

use bcdev_core::{BcdevError, Result, ToolchainConfig};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Captured result of a process that started and ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub command_line: String,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Message used when a failed process wrote nothing to either stream
    pub fn failure_message(&self) -> String {
        match self.exit_code {
            Some(code) => format!("Command failed: {} (exit code {})", self.command_line, code),
            None => format!(
                "Command failed: {} (terminated by signal)",
                self.command_line
            ),
        }
    }
}

/// The OS could not start the process at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    #[error("executable '{program}' not found")]
    NotFound { program: String },

    #[error("failed to launch '{program}': {message}")]
    Io { program: String, message: String },
}

/// Outcome of a single invocation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Exited(ProcessOutput),
    Failed(LaunchError),
}

/// Seam between the adapter and OS process execution
pub trait ProcessRunner: Send + Sync {
    /// Run `program args...` once and wait for it to finish
    fn run(&self, program: &str, args: &[String]) -> LaunchOutcome;
}

/// `program arg1 arg2 ...`, the line handed to the shell
pub fn command_line(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Runs command lines through `/bin/sh -c` (Unix) or `cmd.exe /C` (Windows)
///
/// The executable is looked up before launching so a missing toolchain is reported as
/// [`LaunchError::NotFound`] instead of a shell "command not found" exit.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    search_path: Option<OsString>,
}

impl ShellRunner {
    /// Search the process PATH
    pub fn new() -> Self {
        Self::default()
    }

    /// Search only `dirs` for executables; they are also prepended to the child's PATH
    pub fn with_search_path<I, P>(dirs: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let dirs: Vec<PathBuf> = dirs.into_iter().map(|d| d.as_ref().to_path_buf()).collect();
        if dirs.is_empty() {
            return Ok(Self::new());
        }

        let joined =
            std::env::join_paths(&dirs).map_err(|e| BcdevError::ConfigInvalidValue {
                field: "toolchain.search_path".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            search_path: Some(joined),
        })
    }

    pub fn from_config(config: &ToolchainConfig) -> Result<Self> {
        Self::with_search_path(&config.search_path)
    }

    fn resolve(&self, program: &str) -> std::result::Result<PathBuf, which::Error> {
        match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                which::which_in(program, Some(paths), cwd)
            }
            None => which::which(program),
        }
    }

    fn child_path(&self) -> Option<OsString> {
        let search_path = self.search_path.as_ref()?;
        let mut dirs: Vec<PathBuf> = std::env::split_paths(search_path).collect();
        if let Some(inherited) = std::env::var_os("PATH") {
            dirs.extend(std::env::split_paths(&inherited));
        }
        std::env::join_paths(dirs).ok()
    }
}

impl ProcessRunner for ShellRunner {
    fn run(&self, program: &str, args: &[String]) -> LaunchOutcome {
        let line = command_line(program, args);

        match self.resolve(program) {
            Ok(path) => tracing::debug!("Resolved {} to {}", program, path.display()),
            Err(e) => {
                tracing::debug!("{} not found: {}", program, e);
                return LaunchOutcome::Failed(LaunchError::NotFound {
                    program: program.to_string(),
                });
            }
        }

        let mut command = shell_command(&line);
        if let Some(path) = self.child_path() {
            command.env("PATH", path);
        }

        match command.output() {
            Ok(output) => LaunchOutcome::Exited(ProcessOutput {
                command_line: line,
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                LaunchOutcome::Failed(LaunchError::NotFound {
                    program: program.to_string(),
                })
            }
            Err(e) => LaunchOutcome::Failed(LaunchError::Io {
                program: program.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(unix)]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("/bin/sh");
    command.arg("-c").arg(line);
    command
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    use std::os::windows::process::CommandExt;

    // /S strips exactly the outer quote pair and keeps the rest of the line verbatim;
    // /V:OFF keeps `!` literal whatever the registry default
    let mut command = Command::new("cmd.exe");
    command.args(["/D", "/V:OFF", "/S", "/C"]).raw_arg(format!("\"{line}\""));
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(exit_code: Option<i32>) -> ProcessOutput {
        ProcessOutput {
            command_line: "al compile /project:\"x\"".to_string(),
            exit_code,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    #[test]
    fn test_command_line_joins_with_single_spaces() {
        let args = vec!["compile".to_string(), "/project:\"a b\"".to_string()];
        assert_eq!(command_line("al", &args), "al compile /project:\"a b\"");
        assert_eq!(command_line("alc", &[]), "alc");
    }

    #[test]
    fn test_success_requires_zero_exit() {
        assert!(output(Some(0)).success());
        assert!(!output(Some(1)).success());
        assert!(!output(None).success());
    }

    #[test]
    fn test_failure_message_names_command_and_status() {
        let msg = output(Some(3)).failure_message();
        assert!(msg.contains("al compile"));
        assert!(msg.contains("exit code 3"));
        assert!(output(None).failure_message().contains("signal"));
    }

    #[test]
    fn test_empty_search_path_uses_process_path() {
        let runner = ShellRunner::with_search_path(Vec::<PathBuf>::new()).unwrap();
        assert!(runner.search_path.is_none());
        assert!(runner.child_path().is_none());
    }

    #[test]
    fn test_missing_executable_is_not_found() {
        let temp = bcdev_testkit::temp_dir_in_workspace();
        let runner = ShellRunner::with_search_path([temp.path()]).unwrap();

        let outcome = runner.run("al", &["--help".to_string()]);
        assert_eq!(
            outcome,
            LaunchOutcome::Failed(LaunchError::NotFound {
                program: "al".to_string()
            })
        );
    }
}
