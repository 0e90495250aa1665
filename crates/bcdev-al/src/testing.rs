//! Scripted [`ProcessRunner`] for tests in this and downstream crates

use crate::process::{LaunchError, LaunchOutcome, ProcessOutput, ProcessRunner, command_line};
use std::sync::Mutex;

enum Matcher {
    Exact(String),
    Prefix(String),
}

impl Matcher {
    fn matches(&self, line: &str) -> bool {
        match self {
            Matcher::Exact(expected) => line == expected,
            Matcher::Prefix(prefix) => line.starts_with(prefix.as_str()),
        }
    }
}

/// Replays canned outcomes keyed by command line and records every invocation.
/// Unscripted command lines fail with [`LaunchError::NotFound`].
#[derive(Default)]
pub struct ScriptedRunner {
    responses: Vec<(Matcher, LaunchOutcome)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// `line` exits with `code` after writing `stdout` and `stderr`
    pub fn exits(mut self, line: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        let outcome = exited(line, code, stdout, stderr);
        self.responses
            .push((Matcher::Exact(line.to_string()), outcome));
        self
    }

    /// `line` cannot be launched
    pub fn fails(mut self, line: &str, error: LaunchError) -> Self {
        self.responses
            .push((Matcher::Exact(line.to_string()), LaunchOutcome::Failed(error)));
        self
    }

    /// Any `<program> compile ...` line exits with `code`
    pub fn compile_exits(mut self, program: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        let prefix = format!("{program} compile");
        let outcome = exited(&prefix, code, stdout, stderr);
        self.responses.push((Matcher::Prefix(prefix), outcome));
        self
    }

    /// Any `<program> compile ...` line cannot be launched
    pub fn compile_fails(mut self, program: &str, error: LaunchError) -> Self {
        self.responses.push((
            Matcher::Prefix(format!("{program} compile")),
            LaunchOutcome::Failed(error),
        ));
        self
    }

    /// Command lines run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn was_called(&self, line: &str) -> bool {
        self.calls().iter().any(|call| call == line)
    }

    pub fn compile_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.split_whitespace().nth(1) == Some("compile"))
            .collect()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> LaunchOutcome {
        let line = command_line(program, args);
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.clone());

        let scripted = self
            .responses
            .iter()
            .find(|(matcher, _)| matcher.matches(&line))
            .map(|(_, outcome)| outcome.clone());

        match scripted {
            Some(LaunchOutcome::Exited(output)) => LaunchOutcome::Exited(ProcessOutput {
                command_line: line,
                ..output
            }),
            Some(failed) => failed,
            None => LaunchOutcome::Failed(LaunchError::NotFound {
                program: program.to_string(),
            }),
        }
    }
}

fn exited(line: &str, code: i32, stdout: &str, stderr: &str) -> LaunchOutcome {
    LaunchOutcome::Exited(ProcessOutput {
        command_line: line.to_string(),
        exit_code: Some(code),
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    })
}
