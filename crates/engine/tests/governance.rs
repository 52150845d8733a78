//! End-to-end behavior of the engine against the bundled sample catalog.

use prisma_catalog::{sample_catalog, Catalog, FilterSpec, MetricStatus, QueueStatus, SortKey};
use prisma_engine::{
    query, snippets_for, suggest, AdapterMode, AdapterRegistry, DescriptionRequest, MetricDraft,
    MetricStore, QueryNotice, Transition, ValidationQueue,
};
use time::macros::date;

fn catalog() -> Catalog {
    sample_catalog().expect("sample catalog loads")
}

fn ids(spec: &FilterSpec) -> Vec<String> {
    let catalog = catalog();
    query(&catalog.metrics, spec)
        .metrics
        .into_iter()
        .map(|m| m.id)
        .collect()
}

// ──────────────────────────────────────────────
// Filter & sort
// ──────────────────────────────────────────────

#[test]
fn default_view_orders_by_usage() {
    assert_eq!(
        ids(&FilterSpec::default()),
        [
            "growth.mau",
            "revenue.arpu",
            "operations.support_tickets",
            "credit.default_rate",
            "product.conversion_rate",
        ]
    );
}

#[test]
fn canonical_within_a_day() {
    let spec = FilterSpec::default()
        .with_statuses([MetricStatus::Canonical])
        .with_freshness(24);
    assert_eq!(
        ids(&spec),
        [
            "growth.mau",
            "revenue.arpu",
            "operations.support_tickets",
            "credit.default_rate",
        ]
    );
}

#[test]
fn freshness_bounds() {
    assert!(ids(&FilterSpec::default().with_freshness(0)).is_empty());
    assert_eq!(
        ids(&FilterSpec::default().with_freshness(6)),
        [
            "revenue.arpu",
            "operations.support_tickets",
            "product.conversion_rate",
        ]
    );
    assert_eq!(ids(&FilterSpec::default().with_freshness(168)).len(), 5);
}

#[test]
fn search_matches_name_and_summary() {
    let spec = FilterSpec::default().with_search("USERS");
    assert_eq!(ids(&spec), ["growth.mau", "product.conversion_rate"]);
}

#[test]
fn business_unit_facet() {
    let spec = FilterSpec::default().with_business_unit("Retail");
    assert_eq!(
        ids(&spec),
        ["growth.mau", "revenue.arpu", "product.conversion_rate"]
    );
}

#[test]
fn empty_statuses_surface_a_notice() {
    let catalog = catalog();
    let result = query(&catalog.metrics, &FilterSpec::default().with_statuses([]));
    assert!(result.metrics.is_empty());
    assert_eq!(result.notice, Some(QueryNotice::NoStatusesSelected));
}

#[test]
fn sort_by_updated_and_name() {
    let all = FilterSpec::default().with_statuses(MetricStatus::ALL);
    assert_eq!(
        ids(&all.clone().sorted_by(SortKey::Updated)),
        [
            "product.conversion_rate",
            "credit.default_rate",
            "growth.mau",
            "operations.support_tickets",
            "revenue.arpu",
        ]
    );

    let catalog = catalog();
    let names: Vec<String> = query(&catalog.metrics, &all.sorted_by(SortKey::Name))
        .metrics
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(
        names,
        [
            "Average Revenue Per User",
            "Credit Default Rate",
            "Monthly Active Users",
            "Product Conversion Rate",
            "Support Tickets Volume",
        ]
    );
}

#[test]
fn query_is_idempotent_and_leaves_input_alone() {
    let catalog = catalog();
    let spec = FilterSpec::default().with_theme("Revenue");
    let snapshot = catalog.metrics.clone();

    let first = query(&catalog.metrics, &spec);
    let second = query(&catalog.metrics, &spec);
    assert_eq!(first, second);
    assert_eq!(catalog.metrics, snapshot);
}

#[test]
fn querying_a_result_again_changes_nothing() {
    let catalog = catalog();
    let specs = [
        FilterSpec::default(),
        FilterSpec::default().with_theme("Revenue").with_theme("Growth"),
        FilterSpec::default().with_search("user").sorted_by(SortKey::Name),
        FilterSpec::default()
            .with_business_unit("Retail")
            .sorted_by(SortKey::Updated),
        FilterSpec::default()
            .with_statuses([MetricStatus::Canonical])
            .with_freshness(6),
    ];
    for spec in &specs {
        let once = query(&catalog.metrics, spec);
        let twice = query(&once.metrics, spec);
        assert_eq!(twice, once, "{spec:?}");
    }
}

#[test]
fn adding_a_theme_keeps_matches_carrying_it() {
    let catalog = catalog();
    let mut tags: Vec<String> = catalog
        .metrics
        .iter()
        .flat_map(|m| m.themes.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();

    let mut bases = vec![FilterSpec::default()];
    bases.extend(tags.iter().map(|t| FilterSpec::default().with_theme(t.as_str())));

    for base in &bases {
        let before = query(&catalog.metrics, base);
        for tag in &tags {
            let after = query(&catalog.metrics, &base.clone().with_theme(tag.as_str()));
            for kept in before.metrics.iter().filter(|m| m.themes.contains(tag)) {
                assert!(
                    after.metrics.iter().any(|m| m.id == kept.id),
                    "{} dropped after adding theme {tag} to {base:?}",
                    kept.id
                );
            }
        }
    }
}

#[test]
fn adding_constraints_never_grows_results() {
    let base = FilterSpec::default();
    let narrowed = [
        base.clone().with_search("rate"),
        base.clone().with_theme("Growth"),
        base.clone().with_business_unit("Credit"),
        base.clone().with_statuses([MetricStatus::Experimental]),
        base.clone().with_freshness(3),
    ];
    let all = ids(&base);
    for spec in &narrowed {
        let subset = ids(spec);
        assert!(subset.iter().all(|id| all.contains(id)), "{spec:?}");
    }
}

// ──────────────────────────────────────────────
// Suggester
// ──────────────────────────────────────────────

#[test]
fn suggester_on_catalog_metric() {
    let catalog = catalog();
    let mau = catalog.metrics.iter().find(|m| m.id == "growth.mau").unwrap();
    let out = suggest(&DescriptionRequest {
        name: mau.name.clone(),
        theme: mau.themes.clone(),
        bu: mau.business_units.clone(),
        formula: mau.formula.clone(),
        grain: String::new(),
        filters: String::new(),
    });
    assert!(out.business_summary.starts_with("Counts active users"));
    assert_eq!(out.guardrails.len(), 3);
    assert!(out.guardrails[0].contains("Cross-BU impact"));
    assert!(out.guardrails[1].contains("PII present"));
    assert!(out.guardrails[2].contains("Breaking change"));
}

// ──────────────────────────────────────────────
// Workflow and promotion
// ──────────────────────────────────────────────

#[test]
fn approve_then_promote_update() {
    let catalog = catalog();
    let store = MetricStore::new(catalog.metrics);
    let mut queue = ValidationQueue::new(catalog.validation_queue);

    assert!(queue.approve("revenue.arpu").is_applied());
    let item = queue.get("revenue.arpu").unwrap().clone();
    assert_eq!(item.status, QueueStatus::Approved);

    let next = store.promote(&item, date!(2024-10-21)).unwrap();
    assert_eq!(next.get("revenue.arpu").unwrap().version, 6);
    assert_eq!(store.get("revenue.arpu").unwrap().version, 5);
}

#[test]
fn flag_then_approve_is_rejected() {
    let mut queue = ValidationQueue::new(catalog().validation_queue);
    assert!(queue
        .flag("legacy.old_metric", "still used by finance")
        .is_applied());
    assert_eq!(
        queue.approve("legacy.old_metric"),
        Transition::AlreadyResolved {
            metric_id: "legacy.old_metric".to_string(),
            status: QueueStatus::Flagged,
        }
    );
    let summary = queue.summary();
    assert_eq!((summary.pending, summary.approved, summary.flagged), (2, 0, 1));
}

#[test]
fn draft_submission_enters_queue() {
    let mut queue = ValidationQueue::new(catalog().validation_queue);
    let draft = MetricDraft {
        metric_id: "growth.dau".to_string(),
        name: "Daily Active Users".to_string(),
        formula: "COUNT(DISTINCT user_id)".to_string(),
        freshness_slo: "24h".to_string(),
        dataset_link: "https://databricks.com/datasets/user_activity".to_string(),
        ..MetricDraft::default()
    };
    queue
        .submit(draft.submit("@ana.costa", "2024-10-22T08:00:00Z"))
        .unwrap();
    assert_eq!(queue.summary().pending, 4);
    assert!(queue.submit(draft.submit("@ana.costa", "2024-10-22T09:00:00Z")).is_err());
}

// ──────────────────────────────────────────────
// Adapters and snippets
// ──────────────────────────────────────────────

#[test]
fn disabling_quicksight_write_warns_in_snippets() {
    let catalog = catalog();
    let mut registry = AdapterRegistry::new(catalog.adapters);
    let mau = catalog.metrics.iter().find(|m| m.id == "growth.mau").unwrap();

    assert_eq!(registry.toggle("quicksight", AdapterMode::Write), Ok(false));
    let snippets = snippets_for(mau, &registry);
    assert!(snippets.sql.contains("metric_read('growth.mau', 3)"));
    assert_eq!(
        snippets.warnings,
        ["⚠️ QuickSight write adapter is disabled - version pinning not applied"]
    );
    assert_eq!(registry.active().count(), 5);
}
