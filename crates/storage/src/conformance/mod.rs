//! Conformance test suite for `FilterSetStore` implementations.
//!
//! A backend-agnostic suite any `FilterSetStore` can run to check it
//! behaves like the others. It covers:
//!
//! - **Save**: appends in order, repeated names append rather than replace
//! - **Load**: newest entry per name, filter state survives unchanged
//! - **Errors**: `NotFound` for unknown names, `BlankName` on save
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory that
//! creates a fresh, empty store for each test:
//!
//! ```ignore
//! use prisma_storage::conformance::run_conformance_suite;
//! use prisma_storage::MemoryFilterStore;
//!
//! #[test]
//! fn memory_conformance() {
//!     let report = run_conformance_suite(MemoryFilterStore::new);
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod errors;
mod load;
mod save;

use std::fmt;

use prisma_catalog::{FilterSpec, MetricStatus, SortKey};

use crate::FilterSetStore;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category (e.g. "save", "load").
    pub category: String,
    /// Test name (e.g. "save_appends_in_order").
    pub name: String,
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        let (passed, message) = match result {
            Ok(()) => (true, None),
            Err(msg) => (false, Some(msg)),
        };
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed,
            message,
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in self.results.iter().filter(|r| !r.passed) {
            writeln!(
                f,
                "  FAIL [{}/{}]: {}",
                r.category,
                r.name,
                r.message.as_deref().unwrap_or("(no message)")
            )?;
        }
        Ok(())
    }
}

/// Run the full conformance suite against a store backend.
///
/// `factory` is called once per test and must return an empty store.
pub fn run_conformance_suite<S, F>(factory: F) -> ConformanceReport
where
    S: FilterSetStore,
    F: Fn() -> S,
{
    let mut results = Vec::new();

    results.extend(save::run_save_tests(&factory));
    results.extend(load::run_load_tests(&factory));
    results.extend(errors::run_error_tests(&factory));

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// A filter spec with every field moved off its default.
fn busy_spec() -> FilterSpec {
    FilterSpec::default()
        .with_search("revenue")
        .with_theme("Monetization")
        .with_business_unit("Retail")
        .with_statuses([MetricStatus::Deprecated])
        .with_freshness(6)
        .sorted_by(SortKey::Name)
}

fn names<S: FilterSetStore>(store: &S) -> Result<Vec<String>, String> {
    Ok(store
        .list()
        .map_err(|e| e.to_string())?
        .into_iter()
        .map(|s| s.name)
        .collect())
}
