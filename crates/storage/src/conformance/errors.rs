use super::{names, TestResult};
use crate::{FilterSetStore, SavedFilterSet, StorageError};
use prisma_catalog::FilterSpec;

pub(super) fn run_error_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: FilterSetStore,
    F: Fn() -> S,
{
    vec![
        TestResult::from_result(
            "error",
            "unknown_name_returns_not_found",
            unknown_name_returns_not_found(factory),
        ),
        TestResult::from_result(
            "error",
            "blank_name_is_rejected_and_not_stored",
            blank_name_is_rejected_and_not_stored(factory),
        ),
    ]
}

// ── Test implementations ──────────────────────────────────────────────────────

fn unknown_name_returns_not_found<S, F>(factory: &F) -> Result<(), String>
where
    S: FilterSetStore,
    F: Fn() -> S,
{
    let store = factory();
    match store.load("nope") {
        Err(StorageError::NotFound { name }) if name == "nope" => Ok(()),
        Err(e) => Err(format!("expected NotFound {{ name: \"nope\" }}, got {e}")),
        Ok(set) => Err(format!("expected NotFound, loaded {set:?}")),
    }
}

fn blank_name_is_rejected_and_not_stored<S, F>(factory: &F) -> Result<(), String>
where
    S: FilterSetStore,
    F: Fn() -> S,
{
    let mut store = factory();
    match store.save(SavedFilterSet::new("   ", FilterSpec::default())) {
        Err(StorageError::BlankName) => {}
        Err(e) => return Err(format!("expected BlankName, got {e}")),
        Ok(()) => return Err("blank name was accepted".to_string()),
    }
    let listed = names(&store)?;
    if !listed.is_empty() {
        return Err(format!("rejected save left entries behind: {listed:?}"));
    }
    Ok(())
}
