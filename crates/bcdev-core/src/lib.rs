// Core modules
pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{CompileDefaults, Config, ToolchainConfig};
pub use error::{BcdevError, Result};
