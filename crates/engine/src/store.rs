//! Immutable metric record store.
//!
//! The store never changes in place. Applying an approved review with
//! [`MetricStore::promote`] yields a new store; the old one stays valid,
//! so readers holding it keep a consistent view.

use prisma_catalog::{
    ChangeType, FieldChange, FilterSpec, Metric, MetricStatus, QueueStatus, ValidationQueueItem,
};
use time::Date;
use tracing::{info, warn};

use crate::query::{query, QueryResult};
use crate::timestamp::format_date;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PromotionError {
    #[error("review for '{metric_id}' is {status}, only approved reviews can be promoted")]
    NotApproved {
        metric_id: String,
        status: QueueStatus,
    },

    #[error("metric '{metric_id}' is not in the catalog")]
    UnknownMetric { metric_id: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricStore {
    records: Vec<Metric>,
}

impl MetricStore {
    pub fn new(records: Vec<Metric>) -> Self {
        MetricStore { records }
    }

    pub fn records(&self) -> &[Metric] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Metric> {
        self.records.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn query(&self, spec: &FilterSpec) -> QueryResult {
        query(&self.records, spec)
    }

    /// Apply an approved review and return the resulting store.
    ///
    /// - `update` bumps the version by one, applies the diff and stamps
    ///   `updatedAt` with `on`.
    /// - `deprecation` marks the metric deprecated and stamps `updatedAt`.
    /// - `new` leaves the store unchanged; the definition is not part of
    ///   the review item.
    pub fn promote(&self, item: &ValidationQueueItem, on: Date) -> Result<MetricStore, PromotionError> {
        if item.status != QueueStatus::Approved {
            return Err(PromotionError::NotApproved {
                metric_id: item.metric_id.clone(),
                status: item.status,
            });
        }

        if item.change_type == ChangeType::New {
            return Ok(self.clone());
        }

        let mut records = self.records.clone();
        let metric = records
            .iter_mut()
            .find(|m| m.id == item.metric_id)
            .ok_or_else(|| PromotionError::UnknownMetric {
                metric_id: item.metric_id.clone(),
            })?;

        match item.change_type {
            ChangeType::Update => {
                for change in &item.diff {
                    apply_change(metric, change);
                }
                metric.version += 1;
            }
            ChangeType::Deprecation => metric.status = MetricStatus::Deprecated,
            ChangeType::New => {}
        }
        metric.updated_at = format_date(on);

        info!(
            metric = %metric.id,
            change = %item.change_type,
            version = metric.version,
            "review promoted"
        );
        Ok(MetricStore { records })
    }
}

/// Set the field named by `change`. Unknown fields are logged and skipped.
fn apply_change(metric: &mut Metric, change: &FieldChange) {
    let slot = match change.field.as_str() {
        "name" => &mut metric.name,
        "formula" => &mut metric.formula,
        "grain" => &mut metric.grain,
        "filters" => &mut metric.filters,
        "freshnessSLO" => &mut metric.freshness_slo,
        "businessSummary" => &mut metric.business_summary,
        "whenToUse" => &mut metric.when_to_use,
        "whenNotToUse" => &mut metric.when_not_to_use,
        "datasetLink" => &mut metric.dataset_link,
        other => {
            warn!(metric = %metric.id, field = other, "diff names an unknown field, skipping");
            return;
        }
    };
    *slot = change.new_value.clone();
}

#[cfg(test)]
mod tests {
    use super::*;
    use prisma_catalog::sample_catalog;
    use time::macros::date;

    fn store_and_queue() -> (MetricStore, Vec<ValidationQueueItem>) {
        let catalog = sample_catalog().unwrap();
        (MetricStore::new(catalog.metrics), catalog.validation_queue)
    }

    fn approved(items: &[ValidationQueueItem], metric_id: &str) -> ValidationQueueItem {
        let mut item = items
            .iter()
            .find(|i| i.metric_id == metric_id)
            .cloned()
            .unwrap();
        item.status = QueueStatus::Approved;
        item
    }

    #[test]
    fn update_bumps_version_and_applies_diff() {
        let (store, queue) = store_and_queue();
        let item = approved(&queue, "revenue.arpu");

        let next = store.promote(&item, date!(2024-10-21)).unwrap();
        let before = store.get("revenue.arpu").unwrap();
        let after = next.get("revenue.arpu").unwrap();

        assert_eq!(after.version, before.version + 1);
        assert_eq!(after.formula, "SUM(revenue) / COUNT(DISTINCT active_users)");
        assert_eq!(after.filters, "Includes only completed transactions, excludes refunds");
        assert_eq!(after.updated_at, "2024-10-21");
        // the original store is untouched
        assert_eq!(before.updated_at, "2024-09-15");
    }

    #[test]
    fn pending_items_cannot_be_promoted() {
        let (store, queue) = store_and_queue();
        let item = queue.iter().find(|i| i.metric_id == "revenue.arpu").unwrap();
        assert_eq!(
            store.promote(item, date!(2024-10-21)),
            Err(PromotionError::NotApproved {
                metric_id: "revenue.arpu".to_string(),
                status: QueueStatus::Pending,
            })
        );
    }

    #[test]
    fn deprecation_of_unknown_metric_errors() {
        let (store, queue) = store_and_queue();
        let item = approved(&queue, "legacy.old_metric");
        assert!(matches!(
            store.promote(&item, date!(2024-10-21)),
            Err(PromotionError::UnknownMetric { .. })
        ));
    }

    #[test]
    fn deprecation_keeps_version() {
        let (store, queue) = store_and_queue();
        let mut item = approved(&queue, "legacy.old_metric");
        item.metric_id = "growth.mau".to_string();

        let next = store.promote(&item, date!(2024-11-02)).unwrap();
        let mau = next.get("growth.mau").unwrap();
        assert_eq!(mau.status, MetricStatus::Deprecated);
        assert_eq!(mau.version, store.get("growth.mau").unwrap().version);
        assert_eq!(mau.updated_at, "2024-11-02");
    }

    #[test]
    fn new_items_leave_store_unchanged() {
        let (store, queue) = store_and_queue();
        let item = approved(&queue, "engagement.session_duration");
        assert_eq!(store.promote(&item, date!(2024-10-21)).unwrap(), store);
    }

    #[test]
    fn unknown_diff_fields_are_skipped() {
        let (store, queue) = store_and_queue();
        let mut item = approved(&queue, "revenue.arpu");
        item.diff = vec![FieldChange {
            field: "owners".to_string(),
            old_value: "a".to_string(),
            new_value: "b".to_string(),
        }];
        let next = store.promote(&item, date!(2024-10-21)).unwrap();
        let after = next.get("revenue.arpu").unwrap();
        assert_eq!(after.owners, store.get("revenue.arpu").unwrap().owners);
        assert_eq!(after.version, 6);
    }
}
