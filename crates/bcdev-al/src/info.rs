use serde::{Deserialize, Serialize};
use std::fmt;

/// The two toolchain generations. Their command names are mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlCommand {
    /// `al`, shipped as a dotnet tool and with recent AL Language extensions
    #[default]
    #[serde(rename = "al")]
    Modern,
    /// `alc`, shipped with older AL Language extensions
    #[serde(rename = "alc")]
    Legacy,
}

/// `/?` quoted so `/bin/sh` does not glob it against the filesystem root;
/// cmd.exe and the MSVC runtime strip the quotes again
const LEGACY_HELP_ARG: &str = "\"/?\"";

impl AlCommand {
    pub fn executable(self) -> &'static str {
        match self {
            AlCommand::Modern => "al",
            AlCommand::Legacy => "alc",
        }
    }

    /// Arguments for the liveness probe
    pub fn probe_args(self) -> &'static [&'static str] {
        match self {
            AlCommand::Modern => &["--help"],
            AlCommand::Legacy => &[LEGACY_HELP_ARG],
        }
    }

    /// Arguments for the version query
    pub fn version_args(self) -> &'static [&'static str] {
        match self {
            AlCommand::Modern => &["--version"],
            AlCommand::Legacy => &[LEGACY_HELP_ARG],
        }
    }
}

impl fmt::Display for AlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

/// What detection found. Callers must check `available`; `command` is only a label
/// when nothing was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainInfo {
    pub command: AlCommand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub available: bool,
}

impl ToolchainInfo {
    pub fn found(command: AlCommand, version: Option<String>) -> Self {
        Self {
            command,
            version,
            available: true,
        }
    }

    /// `available == false` never carries a version
    pub fn unavailable() -> Self {
        Self {
            command: AlCommand::Modern,
            version: None,
            available: false,
        }
    }
}
