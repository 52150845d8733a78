//! Filter & Sort Engine.
//!
//! Narrows a metric collection through five independent stages and then
//! applies a stable sort:
//!
//! 1. Search: case-insensitive substring over id, name and business summary
//! 2. Themes: OR-match, skipped when the spec has no themes
//! 3. Business units: OR-match, skipped when the spec has no units
//! 4. Status: membership in `spec.statuses`; an empty set keeps nothing
//! 5. Freshness: resolved SLO hours must not exceed `spec.freshness`
//!
//! The stages commute, so their order only affects the stage-size log.
//! Malformed dates and unknown SLO labels never fail a query.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use prisma_catalog::{FilterSpec, Metric, SortKey};
use serde::Serialize;
use tracing::{debug, warn};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::freshness::slo_hours;
use crate::timestamp::parse_timestamp;

/// A policy state worth surfacing alongside the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryNotice {
    /// `statuses` was empty, which matches no metric.
    NoStatusesSelected,
}

/// Ordered query output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub metrics: Vec<Metric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<QueryNotice>,
}

impl QueryResult {
    pub fn ids(&self) -> Vec<&str> {
        self.metrics.iter().map(|m| m.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Search,
    Themes,
    BusinessUnits,
    Status,
    Freshness,
}

const STAGES: [Stage; 5] = [
    Stage::Search,
    Stage::Themes,
    Stage::BusinessUnits,
    Stage::Status,
    Stage::Freshness,
];

impl Stage {
    fn name(self) -> &'static str {
        match self {
            Stage::Search => "search",
            Stage::Themes => "themes",
            Stage::BusinessUnits => "business_units",
            Stage::Status => "status",
            Stage::Freshness => "freshness",
        }
    }

    /// Whether the stage narrows anything for this spec.
    fn is_active(self, spec: &FilterSpec) -> bool {
        match self {
            Stage::Search => !spec.search.is_empty(),
            Stage::Themes => !spec.themes.is_empty(),
            Stage::BusinessUnits => !spec.business_units.is_empty(),
            Stage::Status | Stage::Freshness => true,
        }
    }

    fn keeps(self, metric: &Metric, spec: &FilterSpec, needle: &str) -> bool {
        match self {
            Stage::Search => {
                metric.id.to_lowercase().contains(needle)
                    || metric.name.to_lowercase().contains(needle)
                    || metric.business_summary.to_lowercase().contains(needle)
            }
            Stage::Themes => has_any_tag(&metric.themes, &spec.themes),
            Stage::BusinessUnits => has_any_tag(&metric.business_units, &spec.business_units),
            Stage::Status => spec.statuses.contains(&metric.status),
            Stage::Freshness => slo_hours(&metric.freshness_slo) <= spec.freshness,
        }
    }
}

fn has_any_tag(tags: &[String], wanted: &BTreeSet<String>) -> bool {
    tags.iter().any(|tag| wanted.contains(tag))
}

/// Run `spec` over `records`. Pure and deterministic.
pub fn query(records: &[Metric], spec: &FilterSpec) -> QueryResult {
    let notice = spec
        .statuses
        .is_empty()
        .then_some(QueryNotice::NoStatusesSelected);

    let needle = spec.search.to_lowercase();
    let mut results: Vec<Metric> = records.to_vec();

    for stage in STAGES {
        if !stage.is_active(spec) {
            continue;
        }
        results.retain(|m| stage.keeps(m, spec, &needle));
        debug!(stage = stage.name(), remaining = results.len(), "query stage applied");
    }

    sort_metrics(&mut results, spec.sort_by);

    QueryResult {
        metrics: results,
        notice,
    }
}

/// Stable sort by `key`. Equal keys keep their input order.
pub fn sort_metrics(metrics: &mut Vec<Metric>, key: SortKey) {
    match key {
        SortKey::Usage => {
            metrics.sort_by(|a, b| b.usage.total().cmp(&a.usage.total()));
        }
        SortKey::Updated => {
            let mut keyed: Vec<_> = metrics
                .drain(..)
                .map(|m| {
                    let ts = parse_timestamp(&m.updated_at);
                    if ts.is_none() {
                        warn!(metric = %m.id, updated_at = %m.updated_at, "unparseable updatedAt, sorting last");
                    }
                    (ts, m)
                })
                .collect();
            keyed.sort_by(|(a, _), (b, _)| match (a, b) {
                (Some(a), Some(b)) => b.cmp(a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
            metrics.extend(keyed.into_iter().map(|(_, m)| m));
        }
        SortKey::Name => {
            metrics.sort_by(|a, b| locale_cmp(&a.name, &b.name));
        }
    }
}

/// Collation-style ordering in three levels: base letters (accents and
/// case ignored), then accents, then case with the lowercase form first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| b.nfd().cmp(a.nfd()))
}

/// NFD-decomposed, lower-cased, with combining marks dropped.
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}
