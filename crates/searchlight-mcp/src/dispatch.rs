//! Routing of a single tool call through normalize -> submit -> render.

use crate::args::{normalize_extract, normalize_search, ArrayPolicy, JsonObject};
use crate::descriptor::ToolKind;
use searchlight_core::{classify, render, Result, ToolReply, UpstreamClient, UpstreamRequest};
use std::sync::Arc;
use std::time::Instant;

/// Failures that are not tool results but protocol faults.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

pub struct Dispatcher {
    client: Arc<dyn UpstreamClient>,
    arrays: ArrayPolicy,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn UpstreamClient>, arrays: ArrayPolicy) -> Self {
        Self { client, arrays }
    }

    /// Handle one call. Domain failures come back as `Ok` with `is_error` set; only an
    /// unknown tool name is a `Fault`.
    pub async fn handle(
        &self,
        tool_name: &str,
        raw: Option<JsonObject>,
    ) -> std::result::Result<ToolReply, Fault> {
        let kind =
            ToolKind::from_name(tool_name).ok_or_else(|| Fault::UnknownTool(tool_name.to_string()))?;
        let t0 = Instant::now();
        tracing::debug!(tool = tool_name, "tool call");

        match self.run(kind, raw.unwrap_or_default()).await {
            Ok(text) => {
                tracing::debug!(
                    tool = tool_name,
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "tool call ok"
                );
                Ok(ToolReply::ok(text))
            }
            Err(e) => {
                tracing::warn!(tool = tool_name, code = e.code(), error = %e, "tool call failed");
                Ok(ToolReply::error(&e))
            }
        }
    }

    fn normalize(&self, kind: ToolKind, raw: JsonObject) -> Result<UpstreamRequest> {
        Ok(match kind {
            ToolKind::Search => UpstreamRequest::Search(normalize_search(raw, self.arrays)?),
            ToolKind::Extract => UpstreamRequest::Extract(normalize_extract(raw, self.arrays)?),
        })
    }

    async fn run(&self, kind: ToolKind, raw: JsonObject) -> Result<String> {
        let req = self.normalize(kind, raw)?;
        let result = self.client.submit(&req).await.map_err(|e| classify(&e))?;
        Ok(render(&result))
    }
}
