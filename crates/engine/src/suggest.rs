//! Description suggester: derives business-facing text from metric fields.
//!
//! Every output is driven by an ordered rule table of `(condition, text)`
//! pairs matched case-insensitively against the metric's name, formula and
//! themes. The business summary takes the FIRST matching rule; the other
//! outputs accumulate every match and then truncate.

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Inputs and outputs
// ──────────────────────────────────────────────

/// The create-form fields the suggester reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DescriptionRequest {
    pub name: String,
    pub theme: Vec<String>,
    pub bu: Vec<String>,
    pub formula: String,
    pub grain: String,
    pub filters: String,
}

/// Suggested narrative text plus governance flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedDescription {
    pub business_summary: String,
    pub when_to_use: String,
    pub when_not_to_use: String,
    pub guardrails: Vec<String>,
}

pub const CROSS_BU_GUARDRAIL: &str =
    "⚠️ Cross-BU impact: Changes require approval from all business units";
pub const PII_GUARDRAIL: &str =
    "🔒 PII present: Ensure proper data governance and access controls";
pub const BREAKING_CHANGE_GUARDRAIL: &str =
    "🚨 Breaking change: Modifying aggregation logic requires version bump";
pub const PERFORMANCE_GUARDRAIL: &str =
    "⚡ Performance: Monitor query performance, may require optimization";
pub const STANDARD_GUARDRAIL: &str = "✓ Standard governance: Follows canonical metric patterns";

const MAX_USE_CASES: usize = 3;
const MAX_RESTRICTIONS: usize = 2;
const MAX_GUARDRAILS: usize = 3;
const FILTERS_PREVIEW_CHARS: usize = 50;

// ──────────────────────────────────────────────
// Rule tables
// ──────────────────────────────────────────────

/// Lower-cased view of a request that conditions match against.
struct Subject {
    name: String,
    formula: String,
    themes: String,
    bu_count: usize,
}

impl Subject {
    fn new(req: &DescriptionRequest) -> Self {
        Subject {
            name: req.name.to_lowercase(),
            formula: req.formula.to_lowercase(),
            themes: req.theme.join(", ").to_lowercase(),
            bu_count: req.bu.len(),
        }
    }
}

#[derive(Debug)]
enum Condition {
    FormulaContains(&'static [&'static str]),
    NameContains(&'static [&'static str]),
    ThemesContain(&'static [&'static str]),
    MultipleBusinessUnits,
    Any(&'static [Condition]),
    All(&'static [Condition]),
    Not(&'static Condition),
}

impl Condition {
    fn holds(&self, s: &Subject) -> bool {
        let contains_any = |haystack: &str, needles: &[&str]| needles.iter().any(|n| haystack.contains(n));
        match self {
            Condition::FormulaContains(words) => contains_any(&s.formula, words),
            Condition::NameContains(words) => contains_any(&s.name, words),
            Condition::ThemesContain(words) => contains_any(&s.themes, words),
            Condition::MultipleBusinessUnits => s.bu_count > 1,
            Condition::Any(conds) => conds.iter().any(|c| c.holds(s)),
            Condition::All(conds) => conds.iter().all(|c| c.holds(s)),
            Condition::Not(cond) => !cond.holds(s),
        }
    }
}

#[derive(Debug)]
struct Rule {
    when: Condition,
    text: &'static str,
}

const fn rule(when: Condition, text: &'static str) -> Rule {
    Rule { when, text }
}

use Condition::*;

/// Summary verb by formula keyword. First match wins.
const SUMMARY_RULES: &[Rule] = &[
    rule(FormulaContains(&["count"]), "Counts"),
    rule(FormulaContains(&["sum"]), "Calculates total"),
    rule(FormulaContains(&["avg", "average"]), "Computes average"),
    rule(FormulaContains(&["rate", "ratio"]), "Calculates the rate of"),
];

const USE_CASE_RULES: &[Rule] = &[
    rule(
        ThemesContain(&["revenue", "monetization"]),
        "revenue optimization and pricing analysis",
    ),
    rule(
        ThemesContain(&["engagement", "growth"]),
        "user engagement tracking and growth monitoring",
    ),
    rule(
        ThemesContain(&["risk", "credit"]),
        "risk assessment and portfolio monitoring",
    ),
    rule(
        ThemesContain(&["operations"]),
        "operational efficiency and capacity planning",
    ),
    rule(
        FormulaContains(&["conversion"]),
        "funnel analysis and A/B test evaluation",
    ),
    rule(
        FormulaContains(&["retention"]),
        "cohort analysis and retention reporting",
    ),
];

const DEFAULT_USE_CASES: [&str; 2] = ["general analytics and reporting", "executive dashboards"];

const RESTRICTION_RULES: &[Rule] = &[
    rule(
        NameContains(&["monthly", "mau"]),
        "Do not use for intra-month or daily trends",
    ),
    rule(
        Any(&[FormulaContains(&["avg"]), NameContains(&["average"])]),
        "Do not use when distribution or percentiles are more relevant",
    ),
    rule(
        Any(&[NameContains(&["rate"]), FormulaContains(&["rate"])]),
        "Do not use when absolute numbers are more meaningful",
    ),
    rule(
        All(&[FormulaContains(&["count"]), Not(&NameContains(&["rate"]))]),
        "Do not use for rate or percentage analysis",
    ),
];

const DEFAULT_RESTRICTIONS: [&str; 2] = [
    "Do not use outside the intended business context",
    "Do not use when more granular metrics are available",
];

const GUARDRAIL_RULES: &[Rule] = &[
    rule(MultipleBusinessUnits, CROSS_BU_GUARDRAIL),
    rule(
        Any(&[
            NameContains(&["user", "customer"]),
            FormulaContains(&["user_id"]),
        ]),
        PII_GUARDRAIL,
    ),
    rule(FormulaContains(&["sum", "count"]), BREAKING_CHANGE_GUARDRAIL),
    rule(FormulaContains(&["distinct", "join"]), PERFORMANCE_GUARDRAIL),
];

fn matching<'a>(rules: &'a [Rule], subject: &'a Subject) -> impl Iterator<Item = &'static str> + 'a {
    rules
        .iter()
        .filter(move |r| r.when.holds(subject))
        .map(|r| r.text)
}

// ──────────────────────────────────────────────
// Suggester
// ──────────────────────────────────────────────

/// Derive a description from structured fields. Pure and deterministic.
pub fn suggest(req: &DescriptionRequest) -> SuggestedDescription {
    let subject = Subject::new(req);
    SuggestedDescription {
        business_summary: business_summary(req, &subject),
        when_to_use: when_to_use(req, &subject),
        when_not_to_use: when_not_to_use(&subject),
        guardrails: guardrails(&subject),
    }
}

/// The part of the name a summary talks about: every token after the
/// first when the name has several, else the whole name. Lower-cased.
///
/// A run of separators splits once. A leading or trailing run still yields
/// an empty edge token, so `"Revenue "` has the empty subject.
pub fn metric_subject(name: &str) -> String {
    let lower = name.to_lowercase();
    let pieces: Vec<&str> = lower
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .collect();
    let last = pieces.len().saturating_sub(1);
    let tokens: Vec<&str> = pieces
        .iter()
        .enumerate()
        .filter(|(i, t)| !t.is_empty() || *i == 0 || *i == last)
        .map(|(_, t)| *t)
        .collect();
    if tokens.len() > 1 {
        tokens[1..].join(" ")
    } else {
        lower
    }
}

fn business_summary(req: &DescriptionRequest, subject: &Subject) -> String {
    let mut summary = match matching(SUMMARY_RULES, subject).next() {
        Some(verb) => format!("{} {}", verb, metric_subject(&req.name)),
        None => format!("Measures {}", subject.name),
    };

    if !req.grain.is_empty() {
        summary.push_str(&format!(" at {} level", req.grain));
    }

    if !req.filters.is_empty() {
        let preview: String = req.filters.chars().take(FILTERS_PREVIEW_CHARS).collect();
        let ellipsis = if req.filters.chars().count() > FILTERS_PREVIEW_CHARS {
            "..."
        } else {
            ""
        };
        summary.push_str(&format!(". Applies specific filters: {preview}{ellipsis}"));
    }

    summary
}

fn when_to_use(req: &DescriptionRequest, subject: &Subject) -> String {
    let mut use_cases: Vec<String> = matching(USE_CASE_RULES, subject)
        .map(str::to_string)
        .collect();

    if use_cases.is_empty() {
        use_cases.extend(DEFAULT_USE_CASES.iter().map(|s| s.to_string()));
    }

    let units = req.bu.join(", ");
    if !units.is_empty() {
        use_cases.push(format!("{units}-specific strategic decisions"));
    }

    use_cases.truncate(MAX_USE_CASES);
    format!("Use for {}", use_cases.join(", "))
}

fn when_not_to_use(subject: &Subject) -> String {
    let mut restrictions: Vec<&str> = matching(RESTRICTION_RULES, subject).collect();
    if restrictions.is_empty() {
        restrictions.extend(DEFAULT_RESTRICTIONS);
    }
    restrictions.truncate(MAX_RESTRICTIONS);
    format!("{}.", restrictions.join(". "))
}

fn guardrails(subject: &Subject) -> Vec<String> {
    let mut flags: Vec<String> = matching(GUARDRAIL_RULES, subject)
        .take(MAX_GUARDRAILS)
        .map(str::to_string)
        .collect();
    if flags.is_empty() {
        flags.push(STANDARD_GUARDRAIL.to_string());
    }
    flags
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
