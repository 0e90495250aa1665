use crate::cli::GlobalArgs;
use crate::context::Context;
use anyhow::{Context as _, Result};
use bcdev_mcp::context::McpContext;
use bcdev_mcp::BcdevServer;

/// Run MCP server in stdio mode
pub fn run_stdio(global: &GlobalArgs) -> Result<()> {
    let ctx = Context::new(global)?;
    let mcp_context = McpContext::new(ctx.adapter, ctx.config.compile);

    // We need a tokio runtime for the server
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    rt.block_on(async { BcdevServer::run_stdio_server(mcp_context).await })
}
