use bcdev_al::AlCompilerAdapter;
use bcdev_core::CompileDefaults;
use std::sync::Arc;

#[derive(Clone)]
pub struct McpContext {
    pub adapter: Arc<AlCompilerAdapter>,
    pub defaults: CompileDefaults,
}

impl McpContext {
    pub fn new(adapter: Arc<AlCompilerAdapter>, defaults: CompileDefaults) -> Self {
        Self { adapter, defaults }
    }
}
