use prisma_catalog::FilterSpec;
use serde::{Deserialize, Serialize};

/// A named snapshot of filter state.
///
/// Names are not unique: saving under an existing name appends a new
/// entry, and lookups by name resolve to the most recent one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFilterSet {
    pub name: String,
    pub filters: FilterSpec,
}

impl SavedFilterSet {
    pub fn new(name: impl Into<String>, filters: FilterSpec) -> Self {
        SavedFilterSet {
            name: name.into(),
            filters,
        }
    }
}
