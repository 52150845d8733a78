//! Typed structs representing the catalog JSON document.
//!
//! Field names follow the JSON the UI produces (`businessUnits`,
//! `freshnessSLO`, `autoChecks.crossBUImpact`, ...). Timestamps are kept as
//! ISO 8601 strings; interpreting them is the engine's concern.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── Metric ──────────────────────────────────────────────────────────

/// Lifecycle status of a governed metric definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    /// Approved source of truth.
    Canonical,
    /// Provisional definition.
    Experimental,
    /// Kept for lineage only; excluded from default discovery.
    Deprecated,
}

impl MetricStatus {
    pub const ALL: [MetricStatus; 3] = [
        MetricStatus::Canonical,
        MetricStatus::Experimental,
        MetricStatus::Deprecated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricStatus::Canonical => "canonical",
            MetricStatus::Experimental => "experimental",
            MetricStatus::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown metric status '{s}' (expected canonical, experimental or deprecated)")
            })
    }
}

/// Business and technical owners of a metric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owners {
    #[serde(default)]
    pub business: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
}

/// Automated checks recorded on a metric definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricChecks {
    pub lint: bool,
    pub unit: bool,
    pub slo: bool,
    pub lineage: bool,
}

impl MetricChecks {
    /// True when every check passed.
    pub fn all_pass(&self) -> bool {
        self.lint && self.unit && self.slo && self.lineage
    }
}

/// Consumption counters, incremented outside the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub dashboards: u64,
    pub experiments: u64,
    pub decisions: u64,
}

impl Usage {
    /// Sum of the three counters, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.dashboards
            .saturating_add(self.experiments)
            .saturating_add(self.decisions)
    }
}

/// A governed definition of a business measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// `domain.metric_name`, unique across the catalog.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub owners: Owners,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub business_units: Vec<String>,
    #[serde(default)]
    pub dataset_link: String,
    #[serde(default)]
    pub business_summary: String,
    #[serde(default)]
    pub when_to_use: String,
    #[serde(default)]
    pub when_not_to_use: String,
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub grain: String,
    #[serde(default)]
    pub filters: String,
    /// Duration label such as `6h` or `3d`.
    #[serde(rename = "freshnessSLO", default)]
    pub freshness_slo: String,
    pub version: u32,
    pub status: MetricStatus,
    #[serde(default)]
    pub auto_checks: MetricChecks,
    #[serde(default)]
    pub usage: Usage,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

// ── Validation queue ────────────────────────────────────────────────

/// Review state of a queue item. `Approved` and `Flagged` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    Pending,
    Approved,
    Flagged,
}

impl QueueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueStatus::Pending => "pending",
            QueueStatus::Approved => "approved",
            QueueStatus::Flagged => "flagged",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, QueueStatus::Pending)
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of change a queue item proposes. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    New,
    Update,
    Deprecation,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::New => "new",
            ChangeType::Update => "update",
            ChangeType::Deprecation => "deprecation",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream check results supplied with a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueChecks {
    pub lint: bool,
    pub unit: bool,
    pub slo: bool,
    pub lineage: bool,
    #[serde(rename = "crossBUImpact", default)]
    pub cross_bu_impact: bool,
}

impl QueueChecks {
    /// The four pass/fail checks; cross-BU impact is a signal, not a check.
    pub fn all_pass(&self) -> bool {
        self.lint && self.unit && self.slo && self.lineage
    }
}

/// One field-level change carried by an update or deprecation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field: String,
    pub old_value: String,
    pub new_value: String,
}

/// A pending or resolved proposal to create, update or deprecate a metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationQueueItem {
    pub metric_id: String,
    #[serde(default)]
    pub metric_name: String,
    pub status: QueueStatus,
    #[serde(default)]
    pub submitted_by: String,
    #[serde(default)]
    pub submitted_at: String,
    pub change_type: ChangeType,
    #[serde(default)]
    pub auto_checks: QueueChecks,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diff: Vec<FieldChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_reason: Option<String>,
}

// ── Adapter ─────────────────────────────────────────────────────────

/// A named external system with independent read and write capability flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adapter {
    pub id: String,
    pub name: String,
    #[serde(default = "enabled")]
    pub read: bool,
    #[serde(default = "enabled")]
    pub write: bool,
    #[serde(default)]
    pub description: String,
}

fn enabled() -> bool {
    true
}

// ── Catalog document ────────────────────────────────────────────────

/// The fully materialized record collections handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub validation_queue: Vec<ValidationQueueItem>,
    #[serde(default)]
    pub adapters: Vec<Adapter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Canonical".parse::<MetricStatus>(), Ok(MetricStatus::Canonical));
        assert_eq!(
            "deprecated".parse::<MetricStatus>(),
            Ok(MetricStatus::Deprecated)
        );
        assert!("retired".parse::<MetricStatus>().is_err());
    }

    #[test]
    fn usage_total_sums_all_counters() {
        let usage = Usage {
            dashboards: 42,
            experiments: 15,
            decisions: 8,
        };
        assert_eq!(usage.total(), 65);
    }

    #[test]
    fn usage_total_saturates_on_huge_counters() {
        let usage = Usage {
            dashboards: u64::MAX,
            experiments: 1,
            decisions: u64::MAX,
        };
        assert_eq!(usage.total(), u64::MAX);
    }

    #[test]
    fn queue_item_uses_ui_field_names() {
        let item: ValidationQueueItem = serde_json::from_value(serde_json::json!({
            "metricId": "revenue.arpu",
            "metricName": "Average Revenue Per User",
            "status": "pending",
            "submittedBy": "@fernando.alves",
            "submittedAt": "2024-10-19T10:15:00Z",
            "changeType": "update",
            "autoChecks": {
                "lint": true, "unit": true, "slo": true, "lineage": true,
                "crossBUImpact": true
            },
            "diff": [{ "field": "formula", "oldValue": "a", "newValue": "b" }]
        }))
        .unwrap();

        assert_eq!(item.change_type, ChangeType::Update);
        assert!(item.auto_checks.cross_bu_impact);
        assert_eq!(item.diff[0].new_value, "b");
        assert_eq!(item.flag_reason, None);

        let back = serde_json::to_value(&item).unwrap();
        assert!(back.get("flagReason").is_none());
        assert_eq!(back["autoChecks"]["crossBUImpact"], true);
    }

    #[test]
    fn adapter_modes_default_on() {
        let adapter: Adapter =
            serde_json::from_str(r#"{"id": "xp", "name": "XP"}"#).unwrap();
        assert!(adapter.read);
        assert!(adapter.write);
    }

    #[test]
    fn terminal_states() {
        assert!(!QueueStatus::Pending.is_terminal());
        assert!(QueueStatus::Approved.is_terminal());
        assert!(QueueStatus::Flagged.is_terminal());
    }
}
