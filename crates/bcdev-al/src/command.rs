//! Compile command construction
//!
//! Tokens are emitted in a fixed order, each optional field only when present:
//!
//! ```text
//! al compile /project:"<p>" [/packagecachepath:"<p>"] [/out:"<p>"] [/assemblyprobingpaths:"<p1>;<p2>"]
//! ```

use crate::info::AlCommand;
use crate::process::command_line;
use crate::request::CompileRequest;

/// Sub-action passed to both toolchain generations
pub const COMPILE_ACTION: &str = "compile";

/// Joins assembly probing paths into one value
pub const PROBING_PATH_SEPARATOR: &str = ";";

/// `%` under cmd.exe: close the quote, caret-escape, reopen
const CMD_PERCENT: &str = "\"^%\"";

/// Shell that re-tokenizes the command line before the toolchain sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    /// `/bin/sh -c`
    Posix,
    /// `cmd.exe /C`, arguments split by the MSVC runtime rules.
    /// A `"` inside a value cannot survive cmd's own quote scan, so
    /// [`CompileRequest::validate_for`] rejects it up front.
    Cmd,
}

impl ShellKind {
    /// The shell [`crate::process::ShellRunner`] launches on this platform
    pub fn native() -> Self {
        if cfg!(windows) {
            ShellKind::Cmd
        } else {
            ShellKind::Posix
        }
    }

    /// Wrap `value` in double quotes so the shell hands it back as one token
    pub fn quote(self, value: &str) -> String {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        match self {
            ShellKind::Posix => {
                for c in value.chars() {
                    if matches!(c, '\\' | '"' | '$' | '`') {
                        quoted.push('\\');
                    }
                    quoted.push(c);
                }
            }
            ShellKind::Cmd => {
                let mut backslashes = 0;
                for c in value.chars() {
                    match c {
                        '\\' => {
                            backslashes += 1;
                            continue;
                        }
                        '"' => push_backslashes(&mut quoted, backslashes * 2 + 1),
                        '%' => {
                            // cmd.exe expands %NAME% even inside quotes; stepping out
                            // of the quoted run leaves no variable name to match
                            push_backslashes(&mut quoted, backslashes * 2);
                            backslashes = 0;
                            quoted.push_str(CMD_PERCENT);
                            continue;
                        }
                        _ => push_backslashes(&mut quoted, backslashes),
                    }
                    backslashes = 0;
                    quoted.push(c);
                }
                // a trailing run would otherwise escape the closing quote
                push_backslashes(&mut quoted, backslashes * 2);
            }
        }
        quoted.push('"');
        quoted
    }
}

fn push_backslashes(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n('\\', count));
}

/// Argument tokens for `request`, quoted for the native shell
pub fn build_args(request: &CompileRequest) -> Vec<String> {
    build_args_for(request, ShellKind::native())
}

/// Argument tokens for `request`, quoted for `shell`
pub fn build_args_for(request: &CompileRequest, shell: ShellKind) -> Vec<String> {
    let mut args = vec![flag("project", &request.project_path, shell)];

    if let Some(path) = &request.package_cache_path {
        args.push(flag("packagecachepath", path, shell));
    }

    if let Some(path) = &request.output_path {
        args.push(flag("out", path, shell));
    }

    if let Some(paths) = &request.assembly_probing_paths {
        if !paths.is_empty() {
            let joined = paths.join(PROBING_PATH_SEPARATOR);
            args.push(flag("assemblyprobingpaths", &joined, shell));
        }
    }

    args
}

/// Arguments after the executable: `compile` followed by [`build_args`]
pub fn compile_invocation(request: &CompileRequest) -> Vec<String> {
    let mut args = vec![COMPILE_ACTION.to_string()];
    args.extend(build_args(request));
    args
}

/// The full line, e.g. `al compile /project:"C:\Apps\My App"`
pub fn build_command_line(command: AlCommand, request: &CompileRequest) -> String {
    command_line(command.executable(), &compile_invocation(request))
}

fn flag(name: &str, value: &str, shell: ShellKind) -> String {
    format!("/{}:{}", name, shell.quote(value))
}
