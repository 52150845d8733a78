//! Loading catalog documents from JSON.
//!
//! The main entry point is [`load_catalog`], which reads a file, parses it
//! into a [`Catalog`] and runs [`validate_catalog`] over the result.

use std::path::Path;

use crate::types::Catalog;
use crate::validate::{validate_catalog, Violation};

/// The demo catalog: five metrics, three queue items, five adapters.
pub const SAMPLE_CATALOG_JSON: &str = include_str!("../fixtures/sample_catalog.json");

/// Errors raised while loading a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("could not read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but breaks one or more data-model invariants.
    #[error("catalog has {} invariant violation(s): {}", .0.len(), join_violations(.0))]
    Invalid(Vec<Violation>),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl Catalog {
    /// Parse and validate a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Catalog, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        validate_catalog(&catalog).map_err(CatalogError::Invalid)?;
        Ok(catalog)
    }
}

/// Read, parse and validate the catalog at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Catalog::from_json_str(&content)
}

/// The bundled demo catalog.
pub fn sample_catalog() -> Result<Catalog, CatalogError> {
    Catalog::from_json_str(SAMPLE_CATALOG_JSON)
}
