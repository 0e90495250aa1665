use crate::process::{LaunchError, LaunchOutcome};
use serde::{Deserialize, Serialize};

/// Output when detection found no usable toolchain
pub const UNAVAILABLE_OUTPUT: &str = "AL compiler is not available. Please install it via AL Language extension or Business Central Development Tools.";
pub const UNAVAILABLE_ERROR: &str = "AL compiler not found";

/// Output when the OS could not find the executable at launch time
pub const NOT_IN_PATH_OUTPUT: &str = "AL compiler not found in PATH.";
pub const NOT_IN_PATH_ERROR: &str = "Compiler executable not found";

/// Output for a successful compile that wrote nothing
pub const NO_OUTPUT_PLACEHOLDER: &str = "Compilation completed (no output)";

/// Result of one compile attempt. Every failure is reported here, never as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileVerdict {
    pub success: bool,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl CompileVerdict {
    /// No process is launched for this verdict
    pub fn unavailable() -> Self {
        Self {
            success: false,
            output: UNAVAILABLE_OUTPUT.to_string(),
            errors: Some(vec![UNAVAILABLE_ERROR.to_string()]),
        }
    }

    fn failed(output: String, errors: Vec<String>) -> Self {
        Self {
            success: false,
            output,
            errors: (!errors.is_empty()).then_some(errors),
        }
    }
}

/// Turn a compile invocation's outcome into a verdict
///
/// Failure prefers stderr, success prefers stdout: the toolchain writes diagnostics to
/// stderr even on success, and nothing to stdout on some failures.
pub fn interpret(outcome: &LaunchOutcome) -> CompileVerdict {
    match outcome {
        LaunchOutcome::Failed(LaunchError::NotFound { .. }) => CompileVerdict::failed(
            NOT_IN_PATH_OUTPUT.to_string(),
            vec![NOT_IN_PATH_ERROR.to_string()],
        ),
        LaunchOutcome::Failed(error @ LaunchError::Io { .. }) => {
            CompileVerdict::failed(error.to_string(), vec![error.to_string()])
        }
        LaunchOutcome::Exited(output) if output.success() => {
            let text = first_non_empty(&[&output.stdout, &output.stderr])
                .unwrap_or(NO_OUTPUT_PLACEHOLDER);
            CompileVerdict {
                success: true,
                output: text.to_string(),
                errors: None,
            }
        }
        LaunchOutcome::Exited(output) => {
            let text = match first_non_empty(&[&output.stderr, &output.stdout]) {
                Some(text) => text.to_string(),
                None => output.failure_message(),
            };
            let errors = extract_diagnostics(&text);
            CompileVerdict::failed(text, errors)
        }
    }
}

/// Lines containing "error" or "Error", trimmed
///
/// When no line qualifies, the whole text is returned verbatim as the only entry.
/// Empty text yields no entries.
pub fn extract_diagnostics(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let diagnostics: Vec<String> = text
        .lines()
        .filter(|line| line.contains("error") || line.contains("Error"))
        .map(|line| line.trim().to_string())
        .collect();

    if diagnostics.is_empty() {
        vec![text.to_string()]
    } else {
        diagnostics
    }
}

fn first_non_empty<'a>(candidates: &[&'a String]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|text| !text.is_empty())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessOutput;

    fn exited(code: i32, stdout: &str, stderr: &str) -> LaunchOutcome {
        LaunchOutcome::Exited(ProcessOutput {
            command_line: r#"al compile /project:"/app""#.to_string(),
            exit_code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        })
    }

    #[test]
    fn test_failure_with_syntax_error_on_stderr() {
        let verdict = interpret(&exited(1, "", "Error: Syntax error in line 10"));
        assert!(!verdict.success);
        assert!(verdict.output.contains("Error: Syntax error in line 10"));
        assert_eq!(
            verdict.errors,
            Some(vec!["Error: Syntax error in line 10".to_string()])
        );
    }

    #[test]
    fn test_success_falls_back_to_stderr() {
        let verdict = interpret(&exited(0, "", "altool 16.0.24.41895"));
        assert_eq!(
            verdict,
            CompileVerdict {
                success: true,
                output: "altool 16.0.24.41895".to_string(),
                errors: None,
            }
        );
    }

    #[test]
    fn test_success_prefers_stdout() {
        let verdict = interpret(&exited(0, "Success: app built", "warning AL0432"));
        assert_eq!(verdict.output, "Success: app built");
        assert!(verdict.errors.is_none());
    }

    #[test]
    fn test_success_without_output_uses_placeholder() {
        let verdict = interpret(&exited(0, "", ""));
        assert!(verdict.success);
        assert_eq!(verdict.output, NO_OUTPUT_PLACEHOLDER);
    }

    #[test]
    fn test_failure_prefers_stderr_then_stdout() {
        let verdict = interpret(&exited(1, "stdout text", "stderr error"));
        assert_eq!(verdict.output, "stderr error");

        let verdict = interpret(&exited(1, "app.al(3,1): error AL0104: ';' expected", ""));
        assert_eq!(
            verdict.output,
            "app.al(3,1): error AL0104: ';' expected"
        );
        assert_eq!(verdict.errors.unwrap().len(), 1);
    }

    #[test]
    fn test_failure_without_output_uses_failure_message() {
        let verdict = interpret(&exited(2, "", ""));
        assert!(!verdict.success);
        assert!(verdict.output.contains("Command failed"));
        assert!(verdict.output.contains("exit code 2"));
        assert_eq!(verdict.errors, Some(vec![verdict.output.clone()]));
    }

    #[test]
    fn test_launch_not_found() {
        let verdict = interpret(&LaunchOutcome::Failed(LaunchError::NotFound {
            program: "al".to_string(),
        }));
        assert!(!verdict.success);
        assert_eq!(verdict.output, NOT_IN_PATH_OUTPUT);
        assert_eq!(verdict.errors, Some(vec![NOT_IN_PATH_ERROR.to_string()]));
    }

    #[test]
    fn test_launch_io_failure() {
        let verdict = interpret(&LaunchOutcome::Failed(LaunchError::Io {
            program: "al".to_string(),
            message: "permission denied".to_string(),
        }));
        assert!(!verdict.success);
        assert!(verdict.output.contains("permission denied"));
        assert_eq!(verdict.errors.unwrap().len(), 1);
    }

    #[test]
    fn test_unavailable_verdict() {
        let verdict = CompileVerdict::unavailable();
        assert!(!verdict.success);
        assert_eq!(verdict.errors, Some(vec![UNAVAILABLE_ERROR.to_string()]));
    }

    #[test]
    fn test_extract_keeps_both_casings_and_trims() {
        let text = "Compiling...\n  src/a.al(1,1): error AL0001: x  \r\nError: build failed\nwarning AL0432\nERROR upper\n";
        assert_eq!(
            extract_diagnostics(text),
            vec![
                "src/a.al(1,1): error AL0001: x".to_string(),
                "Error: build failed".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_without_match_returns_whole_text() {
        let text = "Something went wrong\nwith no diagnostic marker\n";
        assert_eq!(extract_diagnostics(text), vec![text.to_string()]);
    }

    #[test]
    fn test_extract_empty_text() {
        assert!(extract_diagnostics("").is_empty());
    }

    #[test]
    fn test_verdict_json_omits_absent_errors() {
        let json = serde_json::to_value(interpret(&exited(0, "ok", ""))).unwrap();
        assert!(json.get("errors").is_none());
        assert_eq!(json["success"], true);
    }
}
