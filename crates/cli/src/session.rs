//! Everything a command needs, resolved once from flags and config.

use std::path::{Path, PathBuf};

use prisma_catalog::{load_catalog, sample_catalog, Catalog, CatalogError};
use prisma_engine::{AdapterRegistry, MetricStore, ValidationQueue};
use prisma_storage::JsonFileFilterStore;
use tracing::info;

use crate::config::{apply_adapter_overrides, PrismaConfig};

pub(crate) struct Session {
    pub store: MetricStore,
    pub queue: ValidationQueue,
    pub registry: AdapterRegistry,
    pub filters_path: PathBuf,
}

impl Session {
    /// Load the catalog (`--catalog`, then config `catalog.path`, then the
    /// bundled sample) and apply config adapter overrides.
    pub fn open(config: &PrismaConfig, catalog_flag: Option<&Path>) -> Result<Session, String> {
        let catalog_path = catalog_flag.or(config.catalog.path.as_deref());
        let catalog = read_catalog(catalog_path).map_err(|e| e.to_string())?;
        info!(
            source = %catalog_path.map_or("bundled sample".to_string(), |p| p.display().to_string()),
            metrics = catalog.metrics.len(),
            queue = catalog.validation_queue.len(),
            "catalog loaded"
        );

        let mut registry = AdapterRegistry::new(catalog.adapters);
        apply_adapter_overrides(config, &mut registry).map_err(|e| e.to_string())?;

        Ok(Session {
            store: MetricStore::new(catalog.metrics),
            queue: ValidationQueue::new(catalog.validation_queue),
            registry,
            filters_path: config.storage.filters_path.clone(),
        })
    }

    pub fn filter_store(&self) -> JsonFileFilterStore {
        JsonFileFilterStore::new(&self.filters_path)
    }
}

fn read_catalog(path: Option<&Path>) -> Result<Catalog, CatalogError> {
    match path {
        Some(path) => load_catalog(path),
        None => sample_catalog(),
    }
}
