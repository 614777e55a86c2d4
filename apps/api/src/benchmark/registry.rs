//! Template Registry: fixed investor-deck templates used for benchmarking.
//!
//! Templates are static data. Lookups accept either the template key (`y_combinator`) or the
//! human label shown in a UI (`Y Combinator`); unknown names resolve to `None`.

use std::collections::BTreeSet;

use serde::Serialize;

/// An investor archetype's expected deck structure.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub key: &'static str,
    pub name: &'static str,
    pub required_sections: &'static [&'static str],
    pub optional_sections: &'static [&'static str],
    pub description: &'static str,
}

static TEMPLATES: [Template; 2] = [
    Template {
        key: "y_combinator",
        name: "Y Combinator",
        required_sections: &[
            "problem",
            "solution",
            "market",
            "traction",
            "business model",
            "competition",
            "team",
            "financials",
            "ask",
            "use of funds",
        ],
        optional_sections: &[
            "demo",
            "product roadmap",
            "partnerships",
            "go-to-market",
            "risks",
        ],
        description: "Y Combinator standard pitch deck format focusing on problem-solution fit and traction",
    },
    Template {
        key: "sequoia_capital",
        name: "Sequoia Capital",
        required_sections: &[
            "company purpose",
            "problem",
            "solution",
            "market size",
            "competition",
            "product",
            "business model",
            "team",
            "financial model",
            "funding ask",
        ],
        optional_sections: &[
            "go-to-market strategy",
            "technology",
            "risks and mitigation",
            "timeline",
            "partnerships",
        ],
        description: "Sequoia Capital pitch deck framework emphasizing market opportunity and execution",
    },
];

/// Derives the external template key from a human-readable label:
/// lowercased, spaces replaced with underscores.
pub fn template_key(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_")
}

/// Looks up a template by key or label. Never guesses a default.
pub fn get_template(name: &str) -> Option<&'static Template> {
    let key = template_key(name);
    TEMPLATES.iter().find(|t| t.key == key)
}

pub fn list_template_names() -> BTreeSet<&'static str> {
    TEMPLATES.iter().map(|t| t.key).collect()
}

pub fn all_templates() -> &'static [Template] {
    &TEMPLATES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_both_template_keys() {
        let names = list_template_names();
        assert_eq!(names.len(), 2);
        assert!(names.contains("y_combinator"));
        assert!(names.contains("sequoia_capital"));
    }

    #[test]
    fn test_get_template_by_key() {
        let t = get_template("sequoia_capital").unwrap();
        assert_eq!(t.name, "Sequoia Capital");
        assert_eq!(t.required_sections.len(), 10);
        assert_eq!(t.optional_sections.len(), 5);
    }

    #[test]
    fn test_get_template_by_label() {
        let t = get_template("Y Combinator").unwrap();
        assert_eq!(t.key, "y_combinator");
        assert_eq!(t.required_sections[0], "problem");
        assert_eq!(t.required_sections[9], "use of funds");
    }

    #[test]
    fn test_unknown_template_is_none() {
        assert!(get_template("a16z").is_none());
        assert!(get_template("").is_none());
    }

    #[test]
    fn test_template_key_from_label() {
        assert_eq!(template_key("Y Combinator"), "y_combinator");
        assert_eq!(template_key("Sequoia Capital"), "sequoia_capital");
        assert_eq!(template_key("y_combinator"), "y_combinator");
    }

    #[test]
    fn test_every_template_has_required_sections() {
        for t in all_templates() {
            assert!(!t.required_sections.is_empty(), "{} has no sections", t.key);
            assert_eq!(template_key(t.name), t.key);
        }
    }
}
