//! Tool arguments: the documented argument shapes advertised to callers, and the
//! normalizer that turns an untyped argument object into a typed upstream request.
//!
//! Nothing untyped leaves this module: the dispatcher only ever sees `UpstreamRequest`.

use schemars::JsonSchema;
use searchlight_core::{
    Depth, Error, ExtractRequest, Result, SearchRequest, TimeRange, Topic, DEFAULT_DAYS,
    DEFAULT_MAX_RESULTS, MAX_MAX_RESULTS, MIN_MAX_RESULTS,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

pub type JsonObject = serde_json::Map<String, Value>;

/// How to treat array arguments (`include_domains`, `exclude_domains`, `urls`) that are
/// not arrays of strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArrayPolicy {
    /// Coerce a non-array to `[]` and drop non-string items.
    #[default]
    Lenient,
    /// Reject the call with `InvalidArguments`.
    Strict,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchArgs {
    /// Search query (required, non-empty). If the query contains the word "news"
    /// (any case), the search always runs with topic="news".
    #[schemars(with = "String", length(min = 1))]
    pub query: Option<String>,
    /// Search depth: "basic" (default) or "advanced". Advanced is slower but returns
    /// more relevant content.
    pub search_depth: Option<Depth>,
    /// Search category: "general" (default) or "news". Use "news" for current events
    /// and recent coverage.
    pub topic: Option<Topic>,
    /// Number of days back from today to include (default 3). Only used when
    /// topic="news".
    #[schemars(range(min = 1))]
    pub days: Option<i64>,
    /// Only return results published within this window back from today: one of
    /// "day", "week", "month", "year" or the short forms "d", "w", "m", "y".
    /// Omit for no limit.
    pub time_range: Option<TimeRange>,
    /// Maximum number of results, between 5 and 20 (default 10). Values outside the
    /// range are clamped.
    #[schemars(range(min = 5, max = 20))]
    pub max_results: Option<i64>,
    /// Also return a list of query-related images (default false).
    pub include_images: Option<bool>,
    /// When include_images is true, also return a short description for each image
    /// (default false).
    pub include_image_descriptions: Option<bool>,
    /// Include the cleaned, parsed HTML content of each result (default false).
    pub include_raw_content: Option<bool>,
    /// Only return results from these domains, e.g. ["arxiv.org"] (default: no
    /// restriction).
    #[schemars(with = "Option<Vec<String>>")]
    pub include_domains: Option<Value>,
    /// Never return results from these domains (default: none excluded).
    #[schemars(with = "Option<Vec<String>>")]
    pub exclude_domains: Option<Value>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExtractArgs {
    /// URLs to extract content from (required, at least one).
    #[schemars(with = "Vec<String>", length(min = 1))]
    pub urls: Option<Value>,
    /// Extraction depth: "basic" (default) or "advanced". Advanced also retrieves
    /// tables and embedded content, at a higher cost.
    pub extract_depth: Option<Depth>,
    /// Also return images found on each page (default false).
    pub include_images: Option<bool>,
}

fn parse<T: DeserializeOwned>(raw: JsonObject) -> Result<T> {
    serde_json::from_value(Value::Object(raw)).map_err(|e| Error::InvalidArguments(e.to_string()))
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn string_list(field: &str, v: Option<Value>, policy: ArrayPolicy) -> Result<Vec<String>> {
    let items = match v {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return match policy {
                ArrayPolicy::Lenient => Ok(Vec::new()),
                ArrayPolicy::Strict => Err(Error::InvalidArguments(format!(
                    "{field} must be an array of strings, got {}",
                    json_type(&other)
                ))),
            };
        }
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => out.push(s),
            other if policy == ArrayPolicy::Strict => {
                return Err(Error::InvalidArguments(format!(
                    "{field} must contain only strings, got {}",
                    json_type(&other)
                )));
            }
            _ => {}
        }
    }
    Ok(out)
}

/// Any integer is accepted and clamped; only non-integers are rejected (by serde).
fn clamp_u32(v: Option<i64>, default: u32, min: u32, max: u32) -> u32 {
    match v {
        None => default,
        // In range for u32 after the clamp, so the cast cannot truncate.
        Some(n) => n.clamp(i64::from(min), i64::from(max)) as u32,
    }
}

pub fn normalize_search(raw: JsonObject, arrays: ArrayPolicy) -> Result<SearchRequest> {
    let args: SearchArgs = parse(raw)?;
    let query = args
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| Error::InvalidArguments("query is required".to_string()))?;

    let topic = if query.to_lowercase().contains("news") {
        Topic::News
    } else {
        args.topic.unwrap_or_default()
    };

    Ok(SearchRequest {
        search_depth: args.search_depth.unwrap_or_default(),
        topic,
        days: clamp_u32(args.days, DEFAULT_DAYS, 1, u32::MAX),
        time_range: args.time_range,
        max_results: clamp_u32(
            args.max_results,
            DEFAULT_MAX_RESULTS,
            MIN_MAX_RESULTS,
            MAX_MAX_RESULTS,
        ),
        include_images: args.include_images.unwrap_or(false),
        include_image_descriptions: args.include_image_descriptions.unwrap_or(false),
        include_raw_content: args.include_raw_content.unwrap_or(false),
        include_domains: string_list("include_domains", args.include_domains, arrays)?,
        exclude_domains: string_list("exclude_domains", args.exclude_domains, arrays)?,
        query,
    })
}

pub fn normalize_extract(raw: JsonObject, arrays: ArrayPolicy) -> Result<ExtractRequest> {
    let args: ExtractArgs = parse(raw)?;
    let urls = string_list("urls", args.urls, arrays)?;
    if urls.is_empty() {
        return Err(Error::InvalidArguments(
            "urls must be a non-empty array of strings".to_string(),
        ));
    }
    Ok(ExtractRequest {
        urls,
        extract_depth: args.extract_depth.unwrap_or_default(),
        include_images: args.include_images.unwrap_or(false),
    })
}
