use crate::command::compile_invocation;
use crate::detect::detect;
use crate::info::ToolchainInfo;
use crate::process::{ProcessRunner, ShellRunner, command_line};
use crate::request::CompileRequest;
use crate::verdict::{CompileVerdict, interpret};
use bcdev_core::{Result, ToolchainConfig};
use std::sync::{Arc, OnceLock};

/// Detects the toolchain once and runs compile requests against it
///
/// Construct one per process and share it (e.g. behind an `Arc`). The detected
/// [`ToolchainInfo`] is never refreshed; re-detection needs a new adapter.
pub struct AlCompilerAdapter {
    runner: Arc<dyn ProcessRunner>,
    toolchain: OnceLock<ToolchainInfo>,
}

impl AlCompilerAdapter {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            runner,
            toolchain: OnceLock::new(),
        }
    }

    /// Adapter launching through the platform shell with the configured search path
    pub fn from_config(config: &ToolchainConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(ShellRunner::from_config(config)?)))
    }

    /// Detect the toolchain on first call; later calls return the cached record.
    /// Concurrent first calls wait for a single detection.
    pub fn initialize(&self) -> &ToolchainInfo {
        self.toolchain.get_or_init(|| {
            let info = detect(self.runner.as_ref());
            if info.available {
                tracing::info!(
                    command = %info.command,
                    version = info.version.as_deref().unwrap_or("unknown"),
                    "AL compiler found"
                );
            } else {
                tracing::warn!("AL compiler not found in PATH");
            }
            info
        })
    }

    /// `None` until [`initialize`](Self::initialize) has run
    pub fn toolchain_info(&self) -> Option<&ToolchainInfo> {
        self.toolchain.get()
    }

    /// Run one compile. Never launches a process when no toolchain is available.
    pub fn compile(&self, request: &CompileRequest) -> CompileVerdict {
        let command = match self.toolchain.get() {
            Some(info) if info.available => info.command,
            _ => {
                tracing::warn!("Compile requested without an available AL compiler");
                return CompileVerdict::unavailable();
            }
        };

        let args = compile_invocation(request);
        tracing::info!("Executing: {}", command_line(command.executable(), &args));

        let outcome = self.runner.run(command.executable(), &args);
        let verdict = interpret(&outcome);

        if verdict.success {
            tracing::debug!("Compilation succeeded");
        } else {
            tracing::warn!(
                errors = verdict.errors.as_ref().map_or(0, Vec::len),
                "Compilation failed"
            );
        }
        verdict
    }
}
