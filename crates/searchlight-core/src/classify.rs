//! Mapping from raw upstream failures to the domain error taxonomy.

use crate::Error;

/// A failed upstream call: either a non-2xx response (`status` set) or a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError {
    pub status: Option<u16>,
    pub message: String,
}

impl UpstreamError {
    pub fn transport(message: impl ToString) -> Self {
        Self {
            status: None,
            message: message.to_string(),
        }
    }

    /// Build from a non-2xx response. `fallback` is used when the body carries no message.
    pub fn http(status: u16, body: &str, fallback: impl ToString) -> Self {
        Self {
            status: Some(status),
            message: message_from_body(body).unwrap_or_else(|| fallback.to_string()),
        }
    }
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(s) => write!(f, "HTTP {s}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Pull the human-readable message out of an error body.
///
/// Tavily answers errors as `{"detail": {"error": "..."}}`; other gateways in front of it
/// use `detail`, `error` or `message`. Non-JSON bodies are returned as-is when non-empty.
fn message_from_body(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let Ok(v) = serde_json::from_str::<serde_json::Value>(body) else {
        return Some(body.to_string());
    };
    let candidates = [
        v.pointer("/detail/error"),
        v.get("detail"),
        v.get("error"),
        v.get("message"),
    ];
    for c in candidates.into_iter().flatten() {
        if let Some(s) = c.as_str().map(str::trim).filter(|s| !s.is_empty()) {
            return Some(s.to_string());
        }
    }
    Some(body.to_string())
}

pub fn classify(e: &UpstreamError) -> Error {
    match e.status {
        Some(401) => Error::AuthenticationFailed,
        Some(429) => Error::QuotaExceeded,
        _ => Error::UpstreamFailure(e.message.clone()),
    }
}
