use super::{busy_spec, TestResult};
use crate::{FilterSetStore, SavedFilterSet};
use prisma_catalog::FilterSpec;

pub(super) fn run_load_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: FilterSetStore,
    F: Fn() -> S,
{
    vec![
        TestResult::from_result(
            "load",
            "load_round_trips_every_field",
            load_round_trips_every_field(factory),
        ),
        TestResult::from_result(
            "load",
            "load_prefers_newest_entry",
            load_prefers_newest_entry(factory),
        ),
        TestResult::from_result(
            "load",
            "names_are_case_sensitive",
            names_are_case_sensitive(factory),
        ),
    ]
}

// ── Test implementations ──────────────────────────────────────────────────────

fn load_round_trips_every_field<S, F>(factory: &F) -> Result<(), String>
where
    S: FilterSetStore,
    F: Fn() -> S,
{
    let mut store = factory();
    store
        .save(SavedFilterSet::new("busy", busy_spec()))
        .map_err(|e| e.to_string())?;
    let loaded = store.load("busy").map_err(|e| e.to_string())?;
    if loaded.filters != busy_spec() {
        return Err(format!("filters changed in storage: {:?}", loaded.filters));
    }
    Ok(())
}

fn load_prefers_newest_entry<S, F>(factory: &F) -> Result<(), String>
where
    S: FilterSetStore,
    F: Fn() -> S,
{
    let mut store = factory();
    for hours in [168, 24, 3] {
        store
            .save(SavedFilterSet::new(
                "mine",
                FilterSpec::default().with_freshness(hours),
            ))
            .map_err(|e| e.to_string())?;
    }
    let loaded = store.load("mine").map_err(|e| e.to_string())?;
    if loaded.filters.freshness != 3 {
        return Err(format!(
            "expected newest entry (freshness 3), got freshness {}",
            loaded.filters.freshness
        ));
    }
    Ok(())
}

fn names_are_case_sensitive<S, F>(factory: &F) -> Result<(), String>
where
    S: FilterSetStore,
    F: Fn() -> S,
{
    let mut store = factory();
    store
        .save(SavedFilterSet::new("Mine", FilterSpec::default()))
        .map_err(|e| e.to_string())?;
    if store.load("mine").is_ok() {
        return Err("load('mine') matched an entry saved as 'Mine'".to_string());
    }
    Ok(())
}
