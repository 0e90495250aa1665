//! MCP tool handlers

use rmcp::model::Tool;
use serde_json::json;

pub mod compile;

/// What a tool touches outside the server process
///
/// Published both as MCP annotations (`readOnlyHint`, `openWorldHint`) and verbatim
/// under `_meta.safety` so clients can gate tools on each flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Safety {
    /// Talks to anything beyond the local machine
    pub network: bool,
    /// Reads project files
    pub reads: bool,
    /// Creates files, e.g. the `.app` package `compile-app` writes next to the project
    pub writes: bool,
}

impl Safety {
    /// Reports cached server state only
    pub const INSPECT: Safety = Safety {
        network: false,
        reads: true,
        writes: false,
    };

    /// Runs the local compiler, which reads sources and symbol packages and writes the output
    pub const LOCAL_BUILD: Safety = Safety {
        network: false,
        reads: true,
        writes: true,
    };
}

pub trait ToolExt {
    fn with_safety(self, safety: Safety) -> Tool;
}

impl ToolExt for Tool {
    fn with_safety(mut self, safety: Safety) -> Tool {
        let mut annotations = self.annotations.unwrap_or_default();
        annotations.read_only_hint = Some(!safety.writes);
        annotations.open_world_hint = Some(safety.network);
        self.annotations = Some(annotations);

        let mut meta = self.meta.unwrap_or_default();
        meta.insert(
            "safety".to_string(),
            json!({
                "network": safety.network,
                "reads": safety.reads,
                "writes": safety.writes,
            }),
        );
        self.meta = Some(meta);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::sync::Arc;

    fn bare_tool() -> Tool {
        Tool::new(Cow::Borrowed("t"), "t", Arc::new(serde_json::Map::new()))
    }

    #[test]
    fn test_local_build_is_not_read_only() {
        let tool = bare_tool().with_safety(Safety::LOCAL_BUILD);
        let annotations = tool.annotations.unwrap();
        assert_eq!(annotations.read_only_hint, Some(false));
        assert_eq!(annotations.open_world_hint, Some(false));

        let meta = tool.meta.unwrap();
        let safety = meta.get("safety").unwrap();
        assert_eq!(safety["writes"], true);
        assert_eq!(safety["network"], false);
    }

    #[test]
    fn test_inspect_is_read_only() {
        let tool = bare_tool().with_safety(Safety::INSPECT);
        assert_eq!(tool.annotations.unwrap().read_only_hint, Some(true));
    }
}
