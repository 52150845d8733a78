use super::{names, TestResult};
use crate::{FilterSetStore, SavedFilterSet};
use prisma_catalog::FilterSpec;

pub(super) fn run_save_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: FilterSetStore,
    F: Fn() -> S,
{
    vec![
        TestResult::from_result(
            "save",
            "fresh_store_lists_nothing",
            fresh_store_lists_nothing(factory),
        ),
        TestResult::from_result(
            "save",
            "save_appends_in_order",
            save_appends_in_order(factory),
        ),
        TestResult::from_result(
            "save",
            "repeated_name_appends",
            repeated_name_appends(factory),
        ),
    ]
}

// ── Test implementations ──────────────────────────────────────────────────────

fn fresh_store_lists_nothing<S, F>(factory: &F) -> Result<(), String>
where
    S: FilterSetStore,
    F: Fn() -> S,
{
    let store = factory();
    let listed = names(&store)?;
    if !listed.is_empty() {
        return Err(format!("expected an empty store, got {listed:?}"));
    }
    Ok(())
}

fn save_appends_in_order<S, F>(factory: &F) -> Result<(), String>
where
    S: FilterSetStore,
    F: Fn() -> S,
{
    let mut store = factory();
    for name in ["first", "second", "third"] {
        store
            .save(SavedFilterSet::new(name, FilterSpec::default()))
            .map_err(|e| e.to_string())?;
    }
    let listed = names(&store)?;
    if listed != ["first", "second", "third"] {
        return Err(format!("expected save order, got {listed:?}"));
    }
    Ok(())
}

/// Saving under an existing name keeps both entries.
fn repeated_name_appends<S, F>(factory: &F) -> Result<(), String>
where
    S: FilterSetStore,
    F: Fn() -> S,
{
    let mut store = factory();
    store
        .save(SavedFilterSet::new("mine", FilterSpec::default()))
        .map_err(|e| e.to_string())?;
    store
        .save(SavedFilterSet::new("mine", FilterSpec::default().with_freshness(1)))
        .map_err(|e| e.to_string())?;
    let listed = names(&store)?;
    if listed != ["mine", "mine"] {
        return Err(format!("expected two 'mine' entries, got {listed:?}"));
    }
    Ok(())
}
