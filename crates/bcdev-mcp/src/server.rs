use crate::context::McpContext;
use crate::handlers::compile::CompileTool;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::router::tool::ToolRouter,
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool_handler,
};

const INSTRUCTIONS: &str = "Business Central development tools. Use `compile-app` to compile an AL project \
and `toolchain-info` to see which AL compiler is installed.";

/// MCP server exposing the AL compiler adapter
#[derive(Clone)]
pub struct BcdevServer {
    pub context: McpContext,
    pub tool_router: ToolRouter<BcdevServer>,
}

impl BcdevServer {
    pub fn new(context: McpContext) -> Self {
        Self {
            context,
            tool_router: CompileTool.into_router(),
        }
    }

    /// Detect the toolchain, then serve over stdin/stdout until the client disconnects
    pub async fn run_stdio_server(context: McpContext) -> anyhow::Result<()> {
        let adapter = context.adapter.clone();
        let available = tokio::task::spawn_blocking(move || adapter.initialize().available).await?;
        if !available {
            tracing::warn!("compile-app will report installation steps until a compiler is installed");
        }

        let server = Self::new(context);
        tracing::info!("bcdev MCP server running on stdio");
        server.serve(rmcp::transport::stdio()).await?.waiting().await?;
        Ok(())
    }
}

#[tool_handler]
impl ServerHandler for BcdevServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bcdev-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}
