use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// bcdev.toml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub compile: CompileDefaults,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// Directories probed for `al`/`alc`. Empty means the process PATH.
    #[serde(default)]
    pub search_path: Vec<PathBuf>,
}

/// Values applied to compile requests that leave the field unset
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompileDefaults {
    #[serde(default)]
    pub package_cache_path: Option<String>,
    #[serde(default)]
    pub assembly_probing_paths: Vec<String>,
}

impl Config {
    /// bcdev.toml を読み込む
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| crate::error::BcdevError::ConfigParseError(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::error::BcdevError::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self
            .toolchain
            .search_path
            .iter()
            .any(|p| p.as_os_str().is_empty())
        {
            return Err(crate::error::BcdevError::ConfigInvalidValue {
                field: "toolchain.search_path".to_string(),
                reason: "entries must not be empty".to_string(),
            });
        }
        if self.compile.package_cache_path.as_deref() == Some("") {
            return Err(crate::error::BcdevError::ConfigInvalidValue {
                field: "compile.package_cache_path".to_string(),
                reason: "must not be empty when set".to_string(),
            });
        }
        Ok(())
    }
}
