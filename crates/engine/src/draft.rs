//! Create-form drafts: automated checks, suggestion round-trip and
//! submission into the validation queue.

use prisma_catalog::{ChangeType, MetricChecks, QueueChecks, QueueStatus, ValidationQueueItem};
use serde::{Deserialize, Serialize};

use crate::suggest::{DescriptionRequest, SuggestedDescription};

/// Minimum formula length for the unit check to pass.
const MIN_FORMULA_CHARS: usize = 10;

/// An unsubmitted metric definition as entered on the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricDraft {
    pub metric_id: String,
    pub name: String,
    pub owners_business: String,
    pub owners_tech: String,
    pub theme: Vec<String>,
    pub bu: Vec<String>,
    pub dataset_link: String,
    pub business_summary: String,
    pub when_to_use: String,
    pub when_not_to_use: String,
    pub formula: String,
    pub grain: String,
    pub filters: String,
    #[serde(rename = "freshnessSLO")]
    pub freshness_slo: String,
}

impl MetricDraft {
    /// Live checks shown while the form is edited.
    pub fn checks(&self) -> MetricChecks {
        MetricChecks {
            lint: self.metric_id.contains('.') && !self.formula.is_empty(),
            unit: self.formula.chars().count() > MIN_FORMULA_CHARS,
            slo: !self.freshness_slo.is_empty(),
            lineage: self.dataset_link.starts_with("http"),
        }
    }

    /// Names of required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("metricId", &self.metric_id),
            ("name", &self.name),
            ("ownersBusiness", &self.owners_business),
            ("ownersTech", &self.owners_tech),
            ("formula", &self.formula),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn description_request(&self) -> DescriptionRequest {
        DescriptionRequest {
            name: self.name.clone(),
            theme: self.theme.clone(),
            bu: self.bu.clone(),
            formula: self.formula.clone(),
            grain: self.grain.clone(),
            filters: self.filters.clone(),
        }
    }

    /// Copy a suggestion's texts into the draft. Guardrails are advisory
    /// and are not stored on the draft.
    pub fn accept_suggestion(&mut self, suggestion: &SuggestedDescription) {
        self.business_summary = suggestion.business_summary.clone();
        self.when_to_use = suggestion.when_to_use.clone();
        self.when_not_to_use = suggestion.when_not_to_use.clone();
    }

    /// Build the pending `new` review for this draft.
    pub fn submit(&self, submitted_by: &str, submitted_at: &str) -> ValidationQueueItem {
        let checks = self.checks();
        ValidationQueueItem {
            metric_id: self.metric_id.clone(),
            metric_name: self.name.clone(),
            status: QueueStatus::Pending,
            submitted_by: submitted_by.to_string(),
            submitted_at: submitted_at.to_string(),
            change_type: ChangeType::New,
            auto_checks: QueueChecks {
                lint: checks.lint,
                unit: checks.unit,
                slo: checks.slo,
                lineage: checks.lineage,
                cross_bu_impact: self.bu.len() > 1,
            },
            diff: Vec::new(),
            flag_reason: None,
        }
    }
}
