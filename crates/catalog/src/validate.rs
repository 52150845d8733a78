//! Invariant checks over a loaded catalog.
//!
//! Every violation is collected rather than stopping at the first, so a
//! catalog author sees the full list in one pass.

use std::collections::HashSet;
use std::fmt;

use crate::types::{Catalog, ChangeType, Metric, MetricStatus, QueueStatus, ValidationQueueItem};

/// A single broken invariant, located by record kind and id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: &'static str,
    pub id: String,
    pub message: String,
}

impl Violation {
    fn new(kind: &'static str, id: &str, message: impl Into<String>) -> Self {
        Violation {
            kind,
            id: id.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}': {}", self.kind, self.id, self.message)
    }
}

/// Check every record in `catalog`. Returns all violations found.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    let mut seen = HashSet::new();
    for metric in &catalog.metrics {
        if !seen.insert(metric.id.as_str()) {
            violations.push(Violation::new("metric", &metric.id, "duplicate metric id"));
        }
        check_metric(metric, &mut violations);
    }

    let mut pending = HashSet::new();
    for item in &catalog.validation_queue {
        if item.status == QueueStatus::Pending && !pending.insert(item.metric_id.as_str()) {
            violations.push(Violation::new(
                "queue item",
                &item.metric_id,
                "more than one pending queue item for this metric",
            ));
        }
        check_queue_item(item, &mut violations);
    }

    let mut seen = HashSet::new();
    for adapter in &catalog.adapters {
        if !seen.insert(adapter.id.as_str()) {
            violations.push(Violation::new("adapter", &adapter.id, "duplicate adapter id"));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// True when `id` has the `domain.metric_name` shape: two non-empty,
/// dot-separated segments of lowercase letters, digits and underscores.
pub fn is_valid_metric_id(id: &str) -> bool {
    let Some((domain, name)) = id.split_once('.') else {
        return false;
    };
    let segment_ok = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    };
    segment_ok(domain) && segment_ok(name)
}

fn check_metric(metric: &Metric, out: &mut Vec<Violation>) {
    let id = metric.id.as_str();

    if !is_valid_metric_id(id) {
        out.push(Violation::new(
            "metric",
            id,
            "id must have the form domain.metric_name",
        ));
    }
    if metric.version < 1 {
        out.push(Violation::new("metric", id, "version must be at least 1"));
    }
    if metric.owners.business.is_empty() {
        out.push(Violation::new("metric", id, "no business owner"));
    }
    if metric.owners.tech.is_empty() {
        out.push(Violation::new("metric", id, "no tech owner"));
    }
    if let Some(shared) = metric
        .owners
        .business
        .iter()
        .find(|owner| metric.owners.tech.contains(owner))
    {
        out.push(Violation::new(
            "metric",
            id,
            format!("'{shared}' is listed as both business and tech owner"),
        ));
    }
    if metric.status == MetricStatus::Canonical && !metric.auto_checks.all_pass() {
        out.push(Violation::new(
            "metric",
            id,
            "canonical metric with failing auto-checks",
        ));
    }
}

fn check_queue_item(item: &ValidationQueueItem, out: &mut Vec<Violation>) {
    let id = item.metric_id.as_str();

    match (&item.status, item.flag_reason.as_deref()) {
        (QueueStatus::Flagged, None) => {
            out.push(Violation::new("queue item", id, "flagged without a reason"));
        }
        (QueueStatus::Flagged, Some(reason)) if reason.is_empty() => {
            out.push(Violation::new("queue item", id, "flag reason is empty"));
        }
        (QueueStatus::Pending | QueueStatus::Approved, Some(_)) => {
            out.push(Violation::new(
                "queue item",
                id,
                "flag reason present on an item that is not flagged",
            ));
        }
        _ => {}
    }

    if item.change_type == ChangeType::New && !item.diff.is_empty() {
        out.push(Violation::new(
            "queue item",
            id,
            "a new metric submission cannot carry a diff",
        ));
    }
}
