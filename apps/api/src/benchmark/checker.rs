//! Gap Checker: required template sections with no keyword hit in the deck text.
//!
//! Algorithm:
//! 1. Lowercase the deck text once.
//! 2. Walk the template's required sections in registry order.
//! 3. A section is covered when any of its keywords is a substring of the text.
//! 4. Uncovered sections are reported title-cased, in registry order.
//!
//! An unknown template is a no-op: no gaps, zero coverage.

use serde::Serialize;

use crate::benchmark::keywords::section_present;
use crate::benchmark::registry::get_template;

/// Gap summary for one (deck, template) pair. Recomputed on every request.
#[derive(Debug, Clone, Serialize)]
pub struct GapReport {
    pub template_key: Option<&'static str>,
    pub template_name: String,
    pub gaps: Vec<String>,
    pub coverage: f64,
    pub required_count: usize,
    pub optional_count: usize,
}

pub fn check_gaps(deck_text: &str, template_name: &str) -> Vec<String> {
    let Some(template) = get_template(template_name) else {
        return Vec::new();
    };

    let normalized = deck_text.to_lowercase();
    template
        .required_sections
        .iter()
        .filter(|section| !section_present(section, &normalized))
        .map(|section| title_case(section))
        .collect()
}

/// Percentage of required sections covered, rounded to one decimal place.
pub fn coverage_score(deck_text: &str, template_name: &str) -> f64 {
    let Some(template) = get_template(template_name) else {
        return 0.0;
    };
    let total = template.required_sections.len();
    if total == 0 {
        return 0.0;
    }
    let missing = check_gaps(deck_text, template_name).len();
    coverage_from_counts(total, missing)
}

/// Builds the full report. Unknown templates keep the caller's label and report no gaps.
pub fn gap_report(deck_text: &str, template_name: &str) -> GapReport {
    match get_template(template_name) {
        Some(template) => {
            let gaps = check_gaps(deck_text, template.key);
            let coverage = coverage_from_counts(template.required_sections.len(), gaps.len());
            GapReport {
                template_key: Some(template.key),
                template_name: template.name.to_string(),
                gaps,
                coverage,
                required_count: template.required_sections.len(),
                optional_count: template.optional_sections.len(),
            }
        }
        None => GapReport {
            template_key: None,
            template_name: template_name.to_string(),
            gaps: Vec::new(),
            coverage: 0.0,
            required_count: 0,
            optional_count: 0,
        },
    }
}

fn coverage_from_counts(total: usize, missing: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let covered = total.saturating_sub(missing) as f64;
    (covered / total as f64 * 1000.0).round() / 10.0
}

/// Uppercases every letter that follows a non-letter, lowercases the rest.
/// `use of funds` → `Use Of Funds`, `go-to-market` → `Go-To-Market`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
