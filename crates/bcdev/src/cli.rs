//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bcdev")]
#[command(version, about = "Business Central AL compiler front-end", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Clone, Default)]
pub struct GlobalArgs {
    /// Config file to use instead of ./bcdev.toml or the user config
    #[arg(long, global = true, env = "BCDEV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directories to search for the compiler, separated like PATH
    #[arg(long, global = true, env = "BCDEV_SEARCH_PATH")]
    pub search_path: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect the AL compiler and show its version
    Toolchain {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compile an app project
    Compile(CompileArgs),

    /// Serve the MCP tools over stdio
    Mcp,
}

#[derive(Args)]
pub struct CompileArgs {
    /// Project folder containing app.json
    pub project: String,

    /// Folder with dependency symbol packages (.alpackages)
    #[arg(long)]
    pub package_cache: Option<String>,

    /// Output .app file
    #[arg(long)]
    pub out: Option<String>,

    /// Extra .NET assembly probing directory (repeatable)
    #[arg(long = "assembly-probing-path")]
    pub assembly_probing_paths: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
