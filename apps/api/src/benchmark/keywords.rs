//! Keyword Matcher: one shared `section -> synonyms` table for every template.
//!
//! A section is present when any of its keywords occurs as a substring of the lowercased deck
//! text. Sections missing from the table fall back to their own name as the only keyword.

/// Shared synonym table. Keys are section names exactly as they appear in templates.
static SECTION_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "problem",
        &[
            "problem", "pain point", "challenge", "issue", "difficulty", "struggle",
            "frustration", "barrier", "obstacle", "gap",
        ],
    ),
    (
        "solution",
        &[
            "solution", "product", "approach", "how we", "our platform", "we solve", "we built",
            "we created", "our technology",
        ],
    ),
    (
        "market",
        &[
            "market", "tam", "addressable", "opportunity", "market size", "industry", "sector",
            "customers", "target market",
        ],
    ),
    (
        "traction",
        &[
            "traction", "growth", "users", "customers", "revenue", "metrics", "kpis",
            "milestones", "progress", "momentum",
        ],
    ),
    (
        "business model",
        &[
            "business model", "revenue", "pricing", "monetization", "how we make money",
            "revenue streams", "subscription",
        ],
    ),
    (
        "competition",
        &[
            "competition", "competitive", "competitors", "vs", "compared to", "alternatives",
            "differentiation", "advantage",
        ],
    ),
    (
        "team",
        &[
            "team", "founder", "ceo", "experience", "background", "leadership", "advisors",
            "employees", "staff",
        ],
    ),
    (
        "financials",
        &[
            "financial", "revenue", "projections", "forecast", "profit", "loss", "cash flow",
            "burn rate",
        ],
    ),
    (
        "ask",
        &[
            "funding", "raise", "investment", "capital", "round", "asking for", "seeking", "need",
        ],
    ),
    (
        "use of funds",
        &[
            "use of funds", "allocation", "spend", "budget", "how we will use",
            "investment will go",
        ],
    ),
    (
        "company purpose",
        &[
            "mission", "vision", "purpose", "why", "our goal", "we believe", "our mission",
        ],
    ),
    (
        "market size",
        &[
            "market size", "tam", "sam", "som", "addressable market", "billion", "million",
            "market opportunity",
        ],
    ),
    (
        "product",
        &[
            "product", "features", "demo", "technology", "platform", "software", "app",
            "service", "offering",
        ],
    ),
    (
        "financial model",
        &[
            "financial model", "unit economics", "metrics", "ltv", "cac", "gross margin",
            "operating margin",
        ],
    ),
];

/// Returns the keywords for a section, or the section name itself when unmapped.
pub fn keywords_for(section: &str) -> Vec<&str> {
    match SECTION_KEYWORDS.iter().find(|(name, _)| *name == section) {
        Some((_, keywords)) => keywords.to_vec(),
        None => vec![section],
    }
}

/// `normalized_text` must already be lowercased.
pub fn section_present(section: &str, normalized_text: &str) -> bool {
    keywords_for(section)
        .iter()
        .any(|kw| normalized_text.contains(kw.to_lowercase().as_str()))
}
