use searchlight_core::{Error, Result};

pub mod tavily;

pub use tavily::TavilyClient;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.tavily.com/search";
pub const DEFAULT_EXTRACT_ENDPOINT: &str = "https://api.tavily.com/extract";

/// Process-wide upstream configuration. Built once at startup, read-only afterwards.
#[derive(Clone)]
pub struct TavilyConfig {
    api_key: String,
    search_endpoint: String,
    extract_endpoint: String,
}

impl std::fmt::Debug for TavilyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TavilyConfig")
            .field("api_key", &"<redacted>")
            .field("search_endpoint", &self.search_endpoint)
            .field("extract_endpoint", &self.extract_endpoint)
            .finish()
    }
}

impl TavilyConfig {
    /// Validate and assemble the configuration.
    ///
    /// A missing or blank key is `NotConfigured`; endpoints fall back to the public API
    /// and must be absolute http(s) URLs.
    pub fn new(
        api_key: Option<&str>,
        search_endpoint: Option<&str>,
        extract_endpoint: Option<&str>,
    ) -> Result<Self> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::NotConfigured("missing TAVILY_API_KEY".to_string()))?
            .to_string();
        Ok(Self {
            api_key,
            search_endpoint: endpoint_or(search_endpoint, DEFAULT_SEARCH_ENDPOINT)?,
            extract_endpoint: endpoint_or(extract_endpoint, DEFAULT_EXTRACT_ENDPOINT)?,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn search_endpoint(&self) -> &str {
        &self.search_endpoint
    }

    pub fn extract_endpoint(&self) -> &str {
        &self.extract_endpoint
    }
}

fn endpoint_or(v: Option<&str>, default: &str) -> Result<String> {
    let s = v.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(default);
    let u = url::Url::parse(s)
        .map_err(|e| Error::NotConfigured(format!("invalid endpoint {s:?}: {e}")))?;
    if !matches!(u.scheme(), "http" | "https") {
        return Err(Error::NotConfigured(format!(
            "invalid endpoint {s:?}: scheme must be http or https"
        )));
    }
    Ok(s.to_string())
}

/// Shared HTTP client. No request timeout is set; the transport default applies.
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("searchlight/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::NotConfigured(format!("http client: {e}")))
}
