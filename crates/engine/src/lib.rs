//! Prisma metric governance engine -- accepts catalog records and UI inputs,
//! produces query results, suggested descriptions and workflow transitions.
//!
//! The engine never performs I/O. Callers hand it fully materialized
//! record collections (see `prisma-catalog`) and render what it returns.
//!
//! - [`query`]: faceted filter and stable sort over metric records
//! - [`suggest`]: rule-table description suggester
//! - [`workflow`]: validation-queue state machine (approve / flag)
//! - [`adapters`]: read/write toggle registry for external systems
//! - [`store`]: immutable metric record store and version promotion
//! - [`draft`]: create-form auto-checks and submission
//! - [`snippet`]: version-pinned access snippets

pub mod adapters;
pub mod draft;
pub mod freshness;
pub mod query;
pub mod snippet;
pub mod store;
pub mod suggest;
pub mod timestamp;
pub mod workflow;

pub use adapters::{AdapterMode, AdapterRegistry, RegistryError};
pub use draft::MetricDraft;
pub use freshness::{slo_hours, DEFAULT_SLO_HOURS};
pub use query::{query, QueryNotice, QueryResult};
pub use snippet::{snippets_for, VersionPinnedSnippets};
pub use store::{MetricStore, PromotionError};
pub use suggest::{suggest, DescriptionRequest, SuggestedDescription};
pub use workflow::{FlagCheck, QueueSummary, SubmitError, Transition, ValidationQueue};
