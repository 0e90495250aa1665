//! AL compiler toolchain adapter for bcdev.
//!
//! Drives the external Business Central AL compiler (`al`, or the legacy `alc`)
//! and turns its process results into compile verdicts.
//!
//! # Architecture
//!
//! - [`info`]: toolchain record and the two command generations
//! - [`detect`]: probe `al`, fall back to `alc`, extract the version
//! - [`command`]: ordered, shell-quoted compile arguments
//! - [`process`]: the [`ProcessRunner`] seam and the shell-backed runner
//! - [`verdict`]: process outcome → [`CompileVerdict`]
//! - [`adapter`]: detect-once state tying the phases together
//!
//! # Flow
//!
//! ```text
//! initialize() ──► detect() ──► cached ToolchainInfo
//!                                   │
//! compile(request) ─────────────────┤ available?
//!                                   ├── no  ──► unavailable verdict (no process)
//!                                   └── yes ──► build args ──► run ──► interpret
//! ```
//!
//! # Example
//!
//! ```no_run
//! use bcdev_al::{AlCompilerAdapter, CompileRequest};
//! use bcdev_core::ToolchainConfig;
//!
//! # fn main() -> bcdev_core::Result<()> {
//! let adapter = AlCompilerAdapter::from_config(&ToolchainConfig::default())?;
//! let info = adapter.initialize();
//! println!("available: {}", info.available);
//!
//! let verdict = adapter.compile(&CompileRequest::new("./MyApp").output_path("./MyApp.app"));
//! if !verdict.success {
//!     for error in verdict.errors.unwrap_or_default() {
//!         eprintln!("{error}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod command;
pub mod detect;
pub mod info;
pub mod process;
pub mod request;
pub mod testing;
pub mod verdict;

// Re-export commonly used types
pub use adapter::AlCompilerAdapter;
pub use info::{AlCommand, ToolchainInfo};
pub use process::{LaunchError, LaunchOutcome, ProcessOutput, ProcessRunner, ShellRunner};
pub use request::CompileRequest;
pub use verdict::CompileVerdict;
