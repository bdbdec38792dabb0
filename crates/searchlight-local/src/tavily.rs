use crate::TavilyConfig;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use searchlight_core::{Endpoint, UpstreamClient, UpstreamError, UpstreamRequest, UpstreamResult};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct TavilyClient {
    http: reqwest::Client,
    config: TavilyConfig,
}

impl TavilyClient {
    pub fn new(http: reqwest::Client, config: &TavilyConfig) -> Self {
        Self {
            http,
            config: config.clone(),
        }
    }

    fn endpoint(&self, e: Endpoint) -> &str {
        match e {
            Endpoint::Search => self.config.search_endpoint(),
            Endpoint::Extract => self.config.extract_endpoint(),
        }
    }

    /// JSON body: the normalized request plus the credential field.
    fn body(&self, req: &UpstreamRequest) -> Result<serde_json::Value, UpstreamError> {
        let mut body = req
            .to_json()
            .map_err(|e| UpstreamError::transport(format!("encode request: {e}")))?;
        body["api_key"] = serde_json::json!(self.config.api_key());
        Ok(body)
    }
}

#[async_trait::async_trait]
impl UpstreamClient for TavilyClient {
    async fn submit(&self, req: &UpstreamRequest) -> Result<UpstreamResult, UpstreamError> {
        let t0 = Instant::now();
        let endpoint = req.endpoint();
        let body = self.body(req)?;

        tracing::debug!(endpoint = endpoint.as_str(), "tavily request");
        let resp = self
            .http
            .post(self.endpoint(endpoint))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.config.api_key()),
            )
            .json(&body)
            .send()
            .await
            .map_err(UpstreamError::transport)?;

        let status = resp.status();
        if !status.is_success() {
            // Error bodies are best-effort; an unreadable one still yields the status line.
            let text = resp.text().await.unwrap_or_default();
            tracing::debug!(
                endpoint = endpoint.as_str(),
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "tavily request failed"
            );
            return Err(UpstreamError::http(status.as_u16(), &text, status));
        }

        let parsed: UpstreamResult = resp.json().await.map_err(UpstreamError::transport)?;
        tracing::debug!(
            endpoint = endpoint.as_str(),
            results = parsed.results.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "tavily request ok"
        );
        Ok(parsed)
    }
}
