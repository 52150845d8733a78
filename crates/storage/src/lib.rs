//! Persistence for saved filter sets.
//!
//! Saved sets live in a small key-value store under a single key, the way
//! a browser keeps them in local storage. Two backends ship here:
//!
//! - [`MemoryFilterStore`]: process-local, for tests and one-shot sessions
//! - [`JsonFileFilterStore`]: a JSON object on disk, one entry per key
//!
//! Any backend can be checked with [`conformance::run_conformance_suite`].

pub mod conformance;
mod error;
mod json_file;
mod memory;
mod record;
mod traits;

pub use error::StorageError;
pub use json_file::{JsonFileFilterStore, SAVED_FILTERS_KEY};
pub use memory::MemoryFilterStore;
pub use record::SavedFilterSet;
pub use traits::FilterSetStore;
