use crate::errors;
use crate::handlers::{Safety, ToolExt};
use crate::server::BcdevServer;
use bcdev_al::{CompileRequest, CompileVerdict};
use futures_util::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::common::FromContextPart,
    handler::server::router::tool::{ToolRoute, ToolRouter},
    handler::server::wrapper::Parameters,
    model::*,
    schemars, serde,
};
use std::borrow::Cow;
use std::sync::{Arc, OnceLock};
use tokio::sync::Semaphore;
use tokio::task::spawn_blocking;

/// Returned instead of launching anything when no toolchain was detected
pub const INSTALL_HINT: &str = "Error: AL compiler is not available in PATH.\n\nTo install it:\n1. Install the AL Language extension in VS Code\n2. Or install Business Central Development Tools:\n   dotnet tool install Microsoft.Dynamics.BusinessCentral.Development.Tools --interactive --prerelease --global\n3. Make sure 'al' command is in your system PATH";

pub struct CompileTool;

impl CompileTool {
    pub fn into_router(self) -> ToolRouter<BcdevServer> {
        ToolRouter::new()
            .with_route(ToolRoute::new_dyn(Self::compile_app_attr(), |mut ctx| {
                let server = ctx.service;
                let args_res = Parameters::<CompileAppArgs>::from_context_part(&mut ctx);
                async move {
                    let Parameters(args) = args_res?;
                    Self::compile_app(server, args).await
                }
                .boxed()
            }))
            .with_route(ToolRoute::new_dyn(Self::toolchain_info_attr(), |ctx| {
                let server = ctx.service;
                async move { Self::toolchain_info(server).await }.boxed()
            }))
    }

    fn compile_app_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("compile-app"),
            "Compile a Business Central app project using the AL compiler",
            rmcp::handler::server::common::schema_for_type::<CompileAppArgs>(),
        )
        .with_safety(Safety::LOCAL_BUILD)
    }

    fn toolchain_info_attr() -> Tool {
        Tool::new(
            Cow::Borrowed("toolchain-info"),
            "Show which AL compiler was detected and its version",
            rmcp::handler::server::common::schema_for_type::<ToolchainInfoArgs>(),
        )
        .with_safety(Safety::INSPECT)
    }

    pub async fn compile_app(
        server: &BcdevServer,
        args: CompileAppArgs,
    ) -> Result<CallToolResult, McpError> {
        let request = args.into_request().with_defaults(&server.context.defaults);
        request.validate().map_err(errors::from_core_error)?;

        let adapter = server.context.adapter.clone();
        if !adapter.toolchain_info().is_some_and(|info| info.available) {
            return Ok(CallToolResult::error(vec![Content::text(INSTALL_HINT)]));
        }

        let verdict = run_blocking(move || Ok(adapter.compile(&request))).await?;

        let content = vec![Content::text(render_verdict(&verdict))];
        if verdict.success {
            Ok(CallToolResult::success(content))
        } else {
            Ok(CallToolResult::error(content))
        }
    }

    pub async fn toolchain_info(server: &BcdevServer) -> Result<CallToolResult, McpError> {
        let info = server.context.adapter.toolchain_info();
        let json = serde_json::to_string_pretty(&info).map_err(errors::from_display)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

fn render_verdict(verdict: &CompileVerdict) -> String {
    let mut text = if verdict.success {
        format!("Compilation result:\n\n{}", verdict.output)
    } else {
        format!("Compilation failed:\n\n{}", verdict.output)
    };

    // diagnostics identical to the output add nothing
    if let Some(errors) = &verdict.errors {
        if errors.as_slice() != [verdict.output.clone()] {
            text.push_str("\n\nErrors:");
            for error in errors {
                text.push_str("\n- ");
                text.push_str(error);
            }
        }
    }
    text
}

async fn run_blocking<T, F>(f: F) -> Result<T, McpError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, McpError> + Send + 'static,
{
    let permit = blocking_semaphore()
        .acquire_owned()
        .await
        .map_err(errors::from_display)?;

    spawn_blocking(move || {
        let _permit = permit;
        f()
    })
    .await
    .map_err(errors::from_display)?
}

fn blocking_semaphore() -> Arc<Semaphore> {
    static SEM: OnceLock<Arc<Semaphore>> = OnceLock::new();
    SEM.get_or_init(|| Arc::new(Semaphore::new(4))).clone()
}

#[derive(serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompileAppArgs {
    /// Path to the app project folder containing app.json
    pub project_path: String,
    /// Path to the .alpackages folder with dependencies
    #[serde(default)]
    pub package_cache_path: Option<String>,
    /// Path for the output .app file
    #[serde(default)]
    pub output_path: Option<String>,
    /// Additional paths to search for .NET assemblies
    #[serde(default)]
    pub assembly_probing_paths: Option<Vec<String>>,
}

impl CompileAppArgs {
    fn into_request(self) -> CompileRequest {
        CompileRequest {
            project_path: self.project_path,
            package_cache_path: self.package_cache_path,
            output_path: self.output_path,
            assembly_probing_paths: self.assembly_probing_paths,
        }
    }
}

#[derive(serde::Deserialize, schemars::JsonSchema)]
pub struct ToolchainInfoArgs {}
