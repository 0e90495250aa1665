//! Configuration and adapter construction shared by the commands

use crate::cli::GlobalArgs;
use anyhow::{Context as _, Result};
use bcdev_al::AlCompilerAdapter;
use bcdev_core::Config;
use std::env;
use std::sync::Arc;

pub struct Context {
    pub config: Config,
    pub adapter: Arc<AlCompilerAdapter>,
}

impl Context {
    /// Load the effective config, apply CLI overrides and build an (uninitialized) adapter
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `--config` names a missing file
    /// - The config file cannot be parsed or holds invalid values
    /// - A search path directory is unusable
    pub fn new(global: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read current directory")?;
        let mut config = bcdev_core::config::load(global.config.as_deref(), &cwd)?;

        if let Some(search_path) = &global.search_path {
            config.toolchain.search_path = env::split_paths(search_path)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }

        let adapter = AlCompilerAdapter::from_config(&config.toolchain)?;
        Ok(Self {
            config,
            adapter: Arc::new(adapter),
        })
    }
}
