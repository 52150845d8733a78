use tracing::info;

use crate::error::StorageError;
use crate::record::SavedFilterSet;
use crate::traits::{check_name, FilterSetStore};

/// In-process filter set store. Contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilterStore {
    sets: Vec<SavedFilterSet>,
}

impl MemoryFilterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FilterSetStore for MemoryFilterStore {
    fn save(&mut self, set: SavedFilterSet) -> Result<(), StorageError> {
        check_name(&set)?;
        info!(name = %set.name, "filter set saved");
        self.sets.push(set);
        Ok(())
    }

    fn list(&self) -> Result<Vec<SavedFilterSet>, StorageError> {
        Ok(self.sets.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prisma_catalog::FilterSpec;

    #[test]
    fn newest_entry_wins_on_load() {
        let mut store = MemoryFilterStore::new();
        store
            .save(SavedFilterSet::new("mine", FilterSpec::default()))
            .unwrap();
        store
            .save(SavedFilterSet::new(
                "mine",
                FilterSpec::default().with_freshness(6),
            ))
            .unwrap();

        assert_eq!(store.list().unwrap().len(), 2);
        assert_eq!(store.load("mine").unwrap().filters.freshness, 6);
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut store = MemoryFilterStore::new();
        let err = store
            .save(SavedFilterSet::new(" ", FilterSpec::default()))
            .unwrap_err();
        assert!(matches!(err, StorageError::BlankName));
        assert!(store.list().unwrap().is_empty());
    }
}
