//! Toolchain command - detect the AL compiler and report it

use crate::cli::GlobalArgs;
use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::Result;
use bcdev_al::ToolchainInfo;
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

/// `bcdev toolchain --json` output schema
#[derive(Debug, Serialize)]
struct ToolchainOutput<'a> {
    #[serde(flatten)]
    toolchain: &'a ToolchainInfo,
    executable: &'static str,
    checked_at: String,
}

/// Always exits 0; an absent compiler is reported, not an error
pub fn run(global: &GlobalArgs, json: bool) -> Result<()> {
    let ctx = Context::new(global)?;
    let info = ctx.adapter.initialize();

    if json {
        return print_json(&ToolchainOutput {
            toolchain: info,
            executable: info.command.executable(),
            checked_at: Utc::now().to_rfc3339(),
        });
    }

    if info.available {
        print_text(&format!(
            "{} AL compiler found: {}",
            "✓".green(),
            info.command.executable().bold()
        ))?;
        print_text(&format!(
            "  Version: {}",
            info.version.as_deref().unwrap_or("unknown")
        ))?;
    } else {
        print_text(&format!("{} AL compiler not found", "✗".red()))?;
        print_text("  Install the AL Language extension in VS Code, or:")?;
        print_text(
            "  dotnet tool install Microsoft.Dynamics.BusinessCentral.Development.Tools --interactive --prerelease --global",
        )?;
    }
    Ok(())
}
