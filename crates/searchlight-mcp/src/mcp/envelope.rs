use crate::dispatch::Fault;
use rmcp::model::{CallToolResult, Content, ErrorCode};
use rmcp::ErrorData as McpError;
use searchlight_core::ToolReply;

impl Fault {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
        }
    }
}

/// One text block per call; `is_error` marks domain failures the caller can react to.
pub(crate) fn tool_result(reply: ToolReply) -> CallToolResult {
    let content = vec![Content::text(reply.text)];
    if reply.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

pub(crate) fn fault_error(fault: &Fault) -> McpError {
    let data = match fault {
        Fault::UnknownTool(name) => serde_json::json!({
            "code": fault.code(),
            "tool": name,
        }),
    };
    McpError::new(ErrorCode::METHOD_NOT_FOUND, fault.to_string(), Some(data))
}
