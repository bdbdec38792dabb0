use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod classify;
pub mod render;

pub use classify::{classify, UpstreamError};
pub use render::render;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Invalid API key")]
    AuthenticationFailed,
    #[error("Usage limit exceeded")]
    QuotaExceeded,
    #[error("{0}")]
    UpstreamFailure(String),
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl Error {
    /// Stable machine-readable name for logs and error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArguments(_) => "invalid_arguments",
            Self::AuthenticationFailed => "authentication_failed",
            Self::QuotaExceeded => "quota_exceeded",
            Self::UpstreamFailure(_) => "upstream_failure",
            Self::NotConfigured(_) => "not_configured",
        }
    }

    /// True for failures that came back from the upstream API (as opposed to local validation).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed | Self::QuotaExceeded | Self::UpstreamFailure(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    #[default]
    Basic,
    Advanced,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    #[default]
    General,
    News,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    Month,
    Year,
    D,
    W,
    M,
    Y,
}

pub const DEFAULT_DAYS: u32 = 3;
pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const MIN_MAX_RESULTS: u32 = 5;
pub const MAX_MAX_RESULTS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub search_depth: Depth,
    pub topic: Topic,
    /// Only meaningful when `topic` is `News`.
    pub days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    pub max_results: u32,
    pub include_images: bool,
    pub include_image_descriptions: bool,
    pub include_raw_content: bool,
    pub include_domains: Vec<String>,
    pub exclude_domains: Vec<String>,
}

impl SearchRequest {
    /// A request for `query` with every option at its default.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            search_depth: Depth::Basic,
            topic: Topic::General,
            days: DEFAULT_DAYS,
            time_range: None,
            max_results: DEFAULT_MAX_RESULTS,
            include_images: false,
            include_image_descriptions: false,
            include_raw_content: false,
            include_domains: Vec::new(),
            exclude_domains: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractRequest {
    pub urls: Vec<String>,
    pub extract_depth: Depth,
    pub include_images: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Extract,
}

impl Endpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Extract => "extract",
        }
    }
}

/// A validated request. The variant alone decides which endpoint receives it.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamRequest {
    Search(SearchRequest),
    Extract(ExtractRequest),
}

impl UpstreamRequest {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Search(_) => Endpoint::Search,
            Self::Extract(_) => Endpoint::Extract,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Self::Search(r) => serde_json::to_value(r),
            Self::Extract(r) => serde_json::to_value(r),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpstreamImage {
    Url(String),
    Described {
        url: String,
        #[serde(default)]
        description: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamHit {
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub raw_content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpstreamResult {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub follow_up_questions: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<UpstreamImage>>,
    #[serde(default)]
    pub results: Vec<UpstreamHit>,
}

/// Outward envelope for one tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReply {
    pub text: String,
    pub is_error: bool,
}

impl ToolReply {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(e: &Error) -> Self {
        let text = if e.is_upstream() {
            format!("Tavily API error: {e}")
        } else {
            e.to_string()
        };
        Self {
            text,
            is_error: true,
        }
    }
}

#[async_trait::async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn submit(
        &self,
        req: &UpstreamRequest,
    ) -> std::result::Result<UpstreamResult, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_request_serializes_snake_case_and_skips_missing_time_range() {
        let v = serde_json::to_value(SearchRequest::new("rust")).unwrap();
        assert_eq!(v["query"], "rust");
        assert_eq!(v["search_depth"], "basic");
        assert_eq!(v["topic"], "general");
        assert_eq!(v["days"], 3);
        assert_eq!(v["max_results"], 10);
        assert_eq!(v["include_domains"], serde_json::json!([]));
        assert!(v.get("time_range").is_none());

        let mut r = SearchRequest::new("rust");
        r.time_range = Some(TimeRange::W);
        let v = serde_json::to_value(r).unwrap();
        assert_eq!(v["time_range"], "w");
    }

    #[test]
    fn request_variant_picks_endpoint() {
        let s = UpstreamRequest::Search(SearchRequest::new("q"));
        let e = UpstreamRequest::Extract(ExtractRequest {
            urls: vec!["https://example.com".to_string()],
            extract_depth: Depth::Advanced,
            include_images: false,
        });
        assert_eq!(s.endpoint(), Endpoint::Search);
        assert_eq!(e.endpoint(), Endpoint::Extract);
        assert_eq!(e.to_json().unwrap()["extract_depth"], "advanced");
    }

    #[test]
    fn parses_search_shape_with_mixed_images() {
        let js = r#"
        {
          "query": "rust",
          "answer": "A systems language",
          "images": ["https://i/1.png", {"url": "https://i/2.png", "description": "logo"}],
          "results": [
            {"title":"Rust","url":"https://rust-lang.org","content":"Hello","score":0.9,
             "published_date":"2024-01-01"}
          ]
        }
        "#;
        let parsed: UpstreamResult = serde_json::from_str(js).unwrap();
        assert_eq!(parsed.answer.as_deref(), Some("A systems language"));
        let images = parsed.images.unwrap();
        assert_eq!(images[0], UpstreamImage::Url("https://i/1.png".to_string()));
        assert_eq!(
            images[1],
            UpstreamImage::Described {
                url: "https://i/2.png".to_string(),
                description: Some("logo".to_string())
            }
        );
        assert_eq!(parsed.results[0].published_date.as_deref(), Some("2024-01-01"));
        assert!(parsed.results[0].raw_content.is_none());
    }

    #[test]
    fn parses_minimal_extract_shape() {
        let js = r#"
        {
          "results": [
            {"url":"https://example.com","raw_content":"Body"}
          ],
          "failed_results": []
        }
        "#;
        let parsed: UpstreamResult = serde_json::from_str(js).unwrap();
        assert_eq!(parsed.query, "");
        assert_eq!(parsed.results[0].title, "");
        assert_eq!(parsed.results[0].raw_content.as_deref(), Some("Body"));
    }

    #[test]
    fn error_replies_prefix_upstream_failures_only() {
        let r = ToolReply::error(&Error::QuotaExceeded);
        assert!(r.is_error);
        assert_eq!(r.text, "Tavily API error: Usage limit exceeded");

        let r = ToolReply::error(&Error::InvalidArguments("query is required".to_string()));
        assert_eq!(r.text, "Invalid arguments: query is required");
    }
}
