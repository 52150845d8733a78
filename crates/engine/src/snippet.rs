//! Version-pinned access snippets for a metric.

use prisma_catalog::Metric;
use serde::Serialize;

use crate::adapters::{AdapterMode, AdapterRegistry};

/// Adapters whose write path applies version pinning, in warning order.
const PINNING_ADAPTERS: [&str; 2] = ["quicksight", "databricks"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionPinnedSnippets {
    pub sql: String,
    pub python: String,
    /// One entry per pinning adapter whose write mode is off.
    pub warnings: Vec<String>,
}

/// Build the SQL and Python snippets that read `metric` at its current version.
pub fn snippets_for(metric: &Metric, registry: &AdapterRegistry) -> VersionPinnedSnippets {
    let sql = format!(
        "SELECT *\nFROM governed.metric_read('{}', {});",
        metric.id, metric.version
    );
    let python = format!(
        "from prisma_lite import metric_read\nm = metric_read(\"{}\", version={})",
        metric.id, metric.version
    );

    let warnings = PINNING_ADAPTERS
        .iter()
        .filter(|id| !registry.is_active(id, AdapterMode::Write))
        .map(|id| {
            let name = registry.get(id).map_or(*id, |a| a.name.as_str());
            format!("⚠️ {name} write adapter is disabled - version pinning not applied")
        })
        .collect();

    VersionPinnedSnippets {
        sql,
        python,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prisma_catalog::sample_catalog;

    fn fixture() -> (Metric, AdapterRegistry) {
        let catalog = sample_catalog().unwrap();
        let metric = catalog
            .metrics
            .iter()
            .find(|m| m.id == "revenue.arpu")
            .cloned()
            .unwrap();
        (metric, AdapterRegistry::new(catalog.adapters))
    }

    #[test]
    fn pins_id_and_version() {
        let (metric, registry) = fixture();
        let s = snippets_for(&metric, &registry);
        assert_eq!(
            s.sql,
            format!("SELECT *\nFROM governed.metric_read('revenue.arpu', {});", metric.version)
        );
        assert_eq!(
            s.python,
            format!(
                "from prisma_lite import metric_read\nm = metric_read(\"revenue.arpu\", version={})",
                metric.version
            )
        );
        assert!(s.warnings.is_empty());
    }

    #[test]
    fn warns_per_disabled_pinning_adapter() {
        let (metric, mut registry) = fixture();
        registry.set("databricks", AdapterMode::Write, false).unwrap();
        registry.set("quicksight", AdapterMode::Write, false).unwrap();
        // other adapters never produce warnings
        registry.set("momo", AdapterMode::Write, false).unwrap();

        let s = snippets_for(&metric, &registry);
        assert_eq!(s.warnings.len(), 2);
        assert!(s.warnings[0].contains("QuickSight write adapter is disabled"));
        assert!(s.warnings[1].contains("Databricks write adapter is disabled"));
    }

    #[test]
    fn missing_adapter_counts_as_disabled() {
        let (metric, _) = fixture();
        let s = snippets_for(&metric, &AdapterRegistry::default());
        assert_eq!(
            s.warnings,
            [
                "⚠️ quicksight write adapter is disabled - version pinning not applied",
                "⚠️ databricks write adapter is disabled - version pinning not applied",
            ]
        );
    }
}
