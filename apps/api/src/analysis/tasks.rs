//! The five analysis artifacts and their fixed download filenames.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisTask {
    Structure,
    Script,
    Design,
    Benchmark,
    OnePager,
}

impl AnalysisTask {
    /// Parses a path segment. Accepts `one_pager`, `one-pager`, and `onepager`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "structure" => Some(AnalysisTask::Structure),
            "script" => Some(AnalysisTask::Script),
            "design" => Some(AnalysisTask::Design),
            "benchmark" => Some(AnalysisTask::Benchmark),
            "one_pager" | "onepager" => Some(AnalysisTask::OnePager),
            _ => None,
        }
    }

    /// Human-readable name used in logs and error messages.
    pub fn label(self) -> &'static str {
        match self {
            AnalysisTask::Structure => "structure analysis",
            AnalysisTask::Script => "pitch script",
            AnalysisTask::Design => "design suggestions",
            AnalysisTask::Benchmark => "benchmark analysis",
            AnalysisTask::OnePager => "one-pager",
        }
    }

    /// `template_key` is only used by the benchmark artifact. It is reduced to `[a-z0-9_]` so the
    /// name is always safe inside a quoted `Content-Disposition` header.
    pub fn filename(self, template_key: Option<&str>) -> String {
        match self {
            AnalysisTask::Structure => "pitch_structure.md".to_string(),
            AnalysisTask::Script => "pitch_script.md".to_string(),
            AnalysisTask::Design => "design_suggestions.md".to_string(),
            AnalysisTask::Benchmark => {
                let key = template_key.map(filename_safe).unwrap_or_default();
                if key.trim_matches('_').is_empty() {
                    "benchmark_template.md".to_string()
                } else {
                    format!("benchmark_{key}.md")
                }
            }
            AnalysisTask::OnePager => "executive_summary.md".to_string(),
        }
    }
}

fn filename_safe(key: &str) -> String {
    key.to_ascii_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' => c,
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tasks() {
        assert_eq!(AnalysisTask::parse("structure"), Some(AnalysisTask::Structure));
        assert_eq!(AnalysisTask::parse("Script"), Some(AnalysisTask::Script));
        assert_eq!(AnalysisTask::parse("one-pager"), Some(AnalysisTask::OnePager));
        assert_eq!(AnalysisTask::parse("one_pager"), Some(AnalysisTask::OnePager));
        assert_eq!(AnalysisTask::parse("poem"), None);
    }

    #[test]
    fn test_fixed_filenames() {
        assert_eq!(AnalysisTask::Structure.filename(None), "pitch_structure.md");
        assert_eq!(AnalysisTask::Script.filename(None), "pitch_script.md");
        assert_eq!(AnalysisTask::Design.filename(None), "design_suggestions.md");
        assert_eq!(AnalysisTask::OnePager.filename(None), "executive_summary.md");
    }

    #[test]
    fn test_benchmark_filename_uses_template_key() {
        assert_eq!(
            AnalysisTask::Benchmark.filename(Some("y_combinator")),
            "benchmark_y_combinator.md"
        );
    }

    #[test]
    fn test_benchmark_filename_is_header_safe() {
        assert_eq!(
            AnalysisTask::Benchmark.filename(Some("founders\nfund")),
            "benchmark_founders_fund.md"
        );
        assert_eq!(
            AnalysisTask::Benchmark.filename(Some("a16z_\"growth\"")),
            "benchmark_a16z__growth_.md"
        );
        assert_eq!(
            AnalysisTask::Benchmark.filename(Some("\u{e9}\u{e9}")),
            "benchmark_template.md"
        );
        assert_eq!(AnalysisTask::Benchmark.filename(None), "benchmark_template.md");
    }

    #[test]
    fn test_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(AnalysisTask::OnePager).unwrap(),
            serde_json::json!("one_pager")
        );
    }
}
