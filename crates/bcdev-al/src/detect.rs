//! Toolchain detection
//!
//! ```text
//! detect()
//!     ↓
//! 1. al --help
//!     → exit 0, or nonzero with "altool" on stderr ⇒ Modern
//!     ↓ (anything else)
//! 2. alc "/?"
//!     → same rule ⇒ Legacy
//!     ↓ (anything else)
//! 3. { command: Modern, available: false }
//! ```
//!
//! `al --help` exits 1 on several releases while still printing its banner, so the
//! banner on stderr outranks the exit code.

use crate::info::{AlCommand, ToolchainInfo};
use crate::process::{LaunchOutcome, ProcessRunner};
use regex::Regex;
use std::sync::LazyLock;

/// Banner word the modern toolchain prints on stderr
pub const SIGNATURE_TOKEN: &str = "altool";

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+\.\d+\.\d+)").expect("version pattern is valid"));

/// Probe for the modern toolchain, then the legacy one
pub fn detect(runner: &dyn ProcessRunner) -> ToolchainInfo {
    for command in [AlCommand::Modern, AlCommand::Legacy] {
        if probe(runner, command) {
            let version = query_version(runner, command);
            tracing::debug!(
                "Detected {} (version: {})",
                command,
                version.as_deref().unwrap_or("unknown")
            );
            return ToolchainInfo::found(command, version);
        }
    }

    tracing::debug!("Neither al nor alc responded to probes");
    ToolchainInfo::unavailable()
}

/// True when the executable launched and either exited 0 or printed the banner
fn probe(runner: &dyn ProcessRunner, command: AlCommand) -> bool {
    let args = to_args(command.probe_args());
    match runner.run(command.executable(), &args) {
        LaunchOutcome::Exited(output) if output.success() => true,
        LaunchOutcome::Exited(output) => {
            let has_banner = output.stderr.contains(SIGNATURE_TOKEN);
            tracing::debug!(
                "{} probe exited with {:?}, banner present: {}",
                command,
                output.exit_code,
                has_banner
            );
            has_banner
        }
        LaunchOutcome::Failed(e) => {
            tracing::debug!("{} probe failed: {}", command, e);
            false
        }
    }
}

fn query_version(runner: &dyn ProcessRunner, command: AlCommand) -> Option<String> {
    let args = to_args(command.version_args());
    match runner.run(command.executable(), &args) {
        LaunchOutcome::Exited(output) => {
            let text = if output.stdout.is_empty() {
                &output.stderr
            } else {
                &output.stdout
            };
            parse_version(text)
        }
        LaunchOutcome::Failed(_) => None,
    }
}

/// First `D.D.D.D` in `text`
///
/// - "altool 16.0.24.41895" -> "16.0.24.41895"
/// - "AL Compiler version 15.0.0.0" -> "15.0.0.0"
pub fn parse_version(text: &str) -> Option<String> {
    VERSION_PATTERN
        .captures(text)
        .map(|caps| caps[1].to_string())
}

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}
