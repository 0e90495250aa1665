//! CLI command implementations

pub mod compile;
pub mod mcp;
pub mod toolchain;
