//! MCP surface: `tools/list` and `tools/call` over stdio.

use crate::descriptor::list_tools;
use crate::dispatch::Dispatcher;
use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::{RequestContext, ServerInitializeError},
    transport::stdio,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

mod envelope;
use envelope::*;

#[derive(Clone)]
pub struct SearchlightMcp {
    dispatcher: Arc<Dispatcher>,
    tools: Arc<Vec<Tool>>,
}

impl SearchlightMcp {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            tools: Arc::new(list_tools()),
        }
    }
}

impl ServerHandler for SearchlightMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Tavily web search and page extraction. Use `search` to find sources and answers; \
                 use `extract` to read the full content of specific URLs. Results come back as one \
                 plain-text block per call."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools.as_ref().clone()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatcher
            .handle(&request.name, request.arguments)
            .await
            .map(tool_result)
            .map_err(|f| {
                tracing::warn!(code = f.code(), error = %f, "tool call rejected");
                fault_error(&f)
            })
    }
}

/// Serve until the client closes stdio or `ct` is cancelled.
///
/// An interrupt or a closed stdin before the handshake completes is a clean shutdown.
pub async fn serve_stdio(svc: SearchlightMcp, ct: CancellationToken) -> Result<(), McpError> {
    let running = match svc.serve_with_ct(stdio(), ct.clone()).await {
        Ok(running) => running,
        Err(e) if is_clean_shutdown(&e, &ct) => {
            tracing::info!(reason = %e, "mcp stdio server stopped before initialize");
            return Ok(());
        }
        Err(e) => return Err(McpError::internal_error(e.to_string(), None)),
    };
    tracing::info!("mcp stdio server ready");
    running
        .waiting()
        .await
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    tracing::info!("mcp stdio server stopped");
    Ok(())
}

fn is_clean_shutdown(e: &ServerInitializeError, ct: &CancellationToken) -> bool {
    ct.is_cancelled()
        || matches!(
            e,
            ServerInitializeError::Cancelled | ServerInitializeError::ConnectionClosed(_)
        )
}
