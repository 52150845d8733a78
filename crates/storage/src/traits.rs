use crate::error::StorageError;
use crate::record::SavedFilterSet;

/// The storage trait for saved filter sets.
///
/// Entries are kept in save order. Saving never overwrites: a repeated
/// name appends, and [`FilterSetStore::load`] picks the newest entry with
/// that name.
pub trait FilterSetStore {
    /// Append a filter set. Blank names are rejected with
    /// `StorageError::BlankName`.
    fn save(&mut self, set: SavedFilterSet) -> Result<(), StorageError>;

    /// Every saved set, oldest first.
    fn list(&self) -> Result<Vec<SavedFilterSet>, StorageError>;

    /// The most recently saved set called `name`.
    ///
    /// Returns `Err(StorageError::NotFound)` when no set has that name.
    fn load(&self, name: &str) -> Result<SavedFilterSet, StorageError> {
        self.list()?
            .into_iter()
            .rev()
            .find(|set| set.name == name)
            .ok_or_else(|| StorageError::NotFound {
                name: name.to_string(),
            })
    }
}

pub(crate) fn check_name(set: &SavedFilterSet) -> Result<(), StorageError> {
    if set.name.trim().is_empty() {
        return Err(StorageError::BlankName);
    }
    Ok(())
}
