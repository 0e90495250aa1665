//! bcdev.toml loading and location rules

mod model;

pub use model::{CompileDefaults, Config, ToolchainConfig};

use crate::error::{BcdevError, Result};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the per-user config dir
pub const CONFIG_FILE_NAME: &str = "bcdev.toml";

/// Locate the config file to use, if any
///
/// Precedence:
/// 1. `explicit` (from `--config` / `BCDEV_CONFIG`), which must exist
/// 2. `<cwd>/bcdev.toml`
/// 3. `<user config dir>/bcdev/bcdev.toml`
pub fn locate(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(BcdevError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = cwd.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(user_config_path().filter(|p| p.is_file()))
}

/// Load the effective configuration, falling back to defaults when no file exists
pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    match locate(explicit, cwd)? {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

/// Platform-specific per-user location:
/// - macOS: ~/Library/Application Support/bcdev/bcdev.toml
/// - Linux: ~/.config/bcdev/bcdev.toml
/// - Windows: %APPDATA%\bcdev\bcdev.toml
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("bcdev").join(CONFIG_FILE_NAME))
}
