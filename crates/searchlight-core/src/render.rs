use crate::UpstreamResult;

/// Flatten an upstream result into the text block handed back to the caller.
///
/// Output order follows `result.results` exactly; nothing is truncated, sorted or deduped.
pub fn render(result: &UpstreamResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(answer) = result.answer.as_deref() {
        lines.push(format!("Answer: {answer}"));
        lines.push(String::new());
        lines.push("Sources:".to_string());
        for r in &result.results {
            lines.push(format!("- {}: {}", r.title, r.url));
        }
        lines.push(String::new());
    }

    lines.push("Detailed Results:".to_string());
    for r in &result.results {
        lines.push(String::new());
        lines.push(format!("Title: {}", r.title));
        lines.push(format!("URL: {}", r.url));
        lines.push(format!("Content: {}", r.content));
        if let Some(raw) = r.raw_content.as_deref() {
            lines.push(format!("Raw Content: {raw}"));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UpstreamHit;
    use proptest::prelude::*;

    fn hit(title: &str, url: &str, content: &str) -> UpstreamHit {
        UpstreamHit {
            title: title.to_string(),
            url: url.to_string(),
            content: content.to_string(),
            score: 0.5,
            published_date: None,
            raw_content: None,
        }
    }

    #[test]
    fn renders_results_without_answer() {
        let r = UpstreamResult {
            query: "latest AI news".to_string(),
            results: vec![UpstreamHit {
                score: 0.9,
                ..hit("A", "u1", "c1")
            }],
            ..Default::default()
        };
        assert_eq!(render(&r), "Detailed Results:\n\nTitle: A\nURL: u1\nContent: c1");
    }

    #[test]
    fn renders_answer_and_sources_first() {
        let r = UpstreamResult {
            query: "x".to_string(),
            answer: Some("Y".to_string()),
            results: vec![hit("T", "U", "C")],
            ..Default::default()
        };
        let out = render(&r);
        assert!(out.starts_with("Answer: Y\n\nSources:\n- T: U\n"), "{out}");
        assert_eq!(
            out,
            "Answer: Y\n\nSources:\n- T: U\n\nDetailed Results:\n\nTitle: T\nURL: U\nContent: C"
        );
    }

    #[test]
    fn raw_content_line_only_when_present() {
        let mut with_raw = hit("T", "U", "C");
        with_raw.raw_content = Some("full page".to_string());
        let r = UpstreamResult {
            results: vec![with_raw, hit("T2", "U2", "C2")],
            ..Default::default()
        };
        let out = render(&r);
        assert_eq!(out.matches("Raw Content:").count(), 1);
        assert!(out.contains("Content: C\nRaw Content: full page\n\nTitle: T2"));
    }

    #[test]
    fn empty_results_render_heading_only() {
        assert_eq!(render(&UpstreamResult::default()), "Detailed Results:");
    }

    proptest! {
        #[test]
        fn detailed_titles_preserve_input_order(
            titles in proptest::collection::vec("[A-Za-z0-9 ]{1,12}", 0..8),
            answer in proptest::option::of("[a-z ]{0,20}"),
        ) {
            let r = UpstreamResult {
                answer: answer.clone(),
                results: titles
                    .iter()
                    .enumerate()
                    .map(|(i, t)| hit(t, &format!("https://e/{i}"), "c"))
                    .collect(),
                ..Default::default()
            };
            let out = render(&r);
            let (_, detailed) = out.split_once("Detailed Results:").unwrap();
            let seen: Vec<&str> = detailed
                .lines()
                .filter_map(|l| l.strip_prefix("Title: "))
                .collect();
            let expected: Vec<&str> = titles.iter().map(String::as_str).collect();
            prop_assert_eq!(seen, expected);
            prop_assert_eq!(out.contains("\nSources:\n"), answer.is_some());
        }
    }
}
