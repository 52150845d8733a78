//! prisma-catalog: shared record types for the metric governance catalog.
//!
//! Provides typed structs for the three record kinds the engine works over
//! (Metric, ValidationQueueItem, Adapter), the Filter Specification the UI
//! hands to the query engine, and a single `load_catalog()` entry point that
//! deserializes a catalog JSON document and checks its invariants.
//!
//! The engine, storage and CLI crates all depend on this crate for their
//! record types, so the JSON field names (camelCase, as the UI writes them)
//! are decided here once.

pub mod filter;
pub mod load;
pub mod types;
pub mod validate;

pub use filter::{FilterSpec, SortKey};
pub use load::{load_catalog, sample_catalog, CatalogError, SAMPLE_CATALOG_JSON};
pub use types::*;
pub use validate::{is_valid_metric_id, validate_catalog, Violation};
