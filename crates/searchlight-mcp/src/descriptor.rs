//! The advertised tool catalogue.

use crate::args::{ExtractArgs, JsonObject, SearchArgs};
use rmcp::model::Tool;
use schemars::generate::SchemaSettings;
use schemars::JsonSchema;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Search,
    Extract,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::Search, ToolKind::Extract];

    pub fn name(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Extract => "extract",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    fn description(self) -> &'static str {
        match self {
            Self::Search => {
                "Search the web with Tavily and return an answer-ready text block: titles, URLs \
                 and content snippets for each result, in relevance order. Use for open questions, \
                 current events (topic=\"news\", bounded by days) and finding sources. Filter with \
                 include_domains/exclude_domains and time_range; max_results is 5-20 (default 10)."
            }
            Self::Extract => {
                "Extract the readable content of one or more web pages with Tavily. Pass the exact \
                 URLs in urls (at least one). Use after search when a snippet is not enough, or \
                 when the user already supplied the pages to read."
            }
        }
    }

    fn input_schema(self) -> Arc<JsonObject> {
        match self {
            Self::Search => schema_for::<SearchArgs>(),
            Self::Extract => schema_for::<ExtractArgs>(),
        }
    }

    pub fn descriptor(self) -> Tool {
        Tool::new(self.name(), self.description(), self.input_schema())
    }
}

fn schema_for<T: JsonSchema>() -> Arc<JsonObject> {
    let schema = SchemaSettings::draft2020_12()
        .with(|s| s.inline_subschemas = true)
        .into_generator()
        .into_root_schema_for::<T>();
    let mut obj = match serde_json::to_value(schema) {
        Ok(serde_json::Value::Object(m)) => m,
        _ => JsonObject::new(),
    };
    obj.remove("$schema");
    Arc::new(obj)
}

/// The full capability set, in a stable order.
pub fn list_tools() -> Vec<Tool> {
    ToolKind::ALL.into_iter().map(ToolKind::descriptor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn schema(kind: ToolKind) -> serde_json::Value {
        serde_json::Value::Object(kind.input_schema().as_ref().clone())
    }

    #[test]
    fn names_are_unique_and_resolvable() {
        let tools = list_tools();
        let names: BTreeSet<String> = tools.iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names.len(), tools.len());
        assert_eq!(
            names,
            BTreeSet::from(["extract".to_string(), "search".to_string()])
        );
        for t in &tools {
            let k = ToolKind::from_name(&t.name).expect("listed tool resolves");
            assert_eq!(k.name(), t.name);
        }
        assert_eq!(ToolKind::from_name("crawl"), None);
    }

    #[test]
    fn search_schema_documents_required_fields_ranges_and_enums() {
        let s = schema(ToolKind::Search);
        assert_eq!(s["type"], "object");
        assert_eq!(s["required"], serde_json::json!(["query"]));
        let props = &s["properties"];
        assert_eq!(props["max_results"]["minimum"], 5);
        assert_eq!(props["max_results"]["maximum"], 20);
        let text = s.to_string();
        for needle in ["\"basic\"", "\"advanced\"", "\"general\"", "\"news\"", "\"week\"", "\"y\""] {
            assert!(text.contains(needle), "missing {needle} in {text}");
        }
        assert!(props["max_results"]["description"]
            .as_str()
            .unwrap_or_default()
            .contains("default 10"));
        assert!(text.contains("include_domains"));
        assert!(!text.contains("$ref"), "schema should be inlined: {text}");
    }

    #[test]
    fn extract_schema_requires_urls() {
        let s = schema(ToolKind::Extract);
        assert_eq!(s["required"], serde_json::json!(["urls"]));
        assert_eq!(s["properties"]["urls"]["type"], "array");
        assert_eq!(s["properties"]["urls"]["minItems"], 1);
    }

    #[test]
    fn descriptions_are_present() {
        for t in list_tools() {
            let v = serde_json::to_value(&t).unwrap();
            let d = v["description"].as_str().unwrap_or_default();
            assert!(d.len() > 40, "short description for {}", t.name);
            assert!(v["inputSchema"]["properties"].is_object());
        }
    }
}
