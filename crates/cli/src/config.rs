//! CLI configuration file (`prisma.toml`).
//!
//! Every section is optional. A missing file means defaults: the bundled
//! sample catalog, saved filters under `.prisma/filters.json`, `warn`
//! logging and every adapter enabled.
//!
//! # Example
//!
//! ```toml
//! [catalog]
//! path = "catalog.json"
//!
//! [storage]
//! filters_path = ".prisma/filters.json"
//!
//! [log]
//! level = "info"
//!
//! [adapters.quicksight]
//! write = false
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use prisma_engine::{AdapterMode, AdapterRegistry};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "prisma.toml";

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PrismaConfig {
    pub catalog: CatalogSection,
    pub storage: StorageSection,
    pub log: LogSection,
    /// Session overrides keyed by adapter id.
    pub adapters: BTreeMap<String, AdapterOverride>,
}

/// `[catalog]`: where the record collections come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CatalogSection {
    /// Catalog JSON file. The bundled sample catalog when absent.
    pub path: Option<PathBuf>,
}

/// `[storage]`: the saved filter set key-value file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct StorageSection {
    pub filters_path: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        StorageSection {
            filters_path: PathBuf::from(".prisma/filters.json"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LogSection {
    /// An `EnvFilter` directive such as `info` or `prisma_engine=debug`.
    pub level: Option<String>,
}

/// `[adapters.<id>]`: flags to force at startup. Unset flags keep the
/// catalog's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AdapterOverride {
    pub read: Option<bool>,
    pub write: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("could not read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("config overrides unknown adapter(s): {}", .0.join(", "))]
    UnknownAdapters(Vec<String>),
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load the config at `explicit`, or `prisma.toml` if present, or defaults.
///
/// An explicit path must exist; the implicit one may not.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<PrismaConfig, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                read_config(path)
            } else {
                Ok(PrismaConfig::default())
            }
        }
    }
}

pub(crate) fn read_config(path: &Path) -> Result<PrismaConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub(crate) fn parse_config(content: &str) -> Result<PrismaConfig, toml::de::Error> {
    toml::from_str(content)
}

// ── Validation and application ────────────────────────────────────────────────

/// Adapter override ids the registry does not know, sorted.
pub(crate) fn validate_config(config: &PrismaConfig, registry: &AdapterRegistry) -> Vec<String> {
    config
        .adapters
        .keys()
        .filter(|id| registry.get(id).is_none())
        .cloned()
        .collect()
}

/// Apply `[adapters.*]` overrides to `registry`. Nothing is applied when
/// any override names an unknown adapter.
pub(crate) fn apply_adapter_overrides(
    config: &PrismaConfig,
    registry: &mut AdapterRegistry,
) -> Result<(), ConfigError> {
    let unknown = validate_config(config, registry);
    if !unknown.is_empty() {
        return Err(ConfigError::UnknownAdapters(unknown));
    }

    for (id, overrides) in &config.adapters {
        for (mode, value) in [
            (AdapterMode::Read, overrides.read),
            (AdapterMode::Write, overrides.write),
        ] {
            if let Some(on) = value {
                debug!(adapter = %id, %mode, on, "config override");
                // ids were checked above
                let _ = registry.set(id, mode, on);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prisma_catalog::sample_catalog;

    fn registry() -> AdapterRegistry {
        AdapterRegistry::new(sample_catalog().unwrap().adapters)
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, PrismaConfig::default());
        assert_eq!(
            config.storage.filters_path,
            PathBuf::from(".prisma/filters.json")
        );
    }

    #[test]
    fn parses_every_section() {
        let config = parse_config(
            r#"
[catalog]
path = "catalog.json"

[storage]
filters_path = "state/filters.json"

[log]
level = "debug"

[adapters.quicksight]
write = false
"#,
        )
        .unwrap();

        assert_eq!(config.catalog.path, Some(PathBuf::from("catalog.json")));
        assert_eq!(config.storage.filters_path, PathBuf::from("state/filters.json"));
        assert_eq!(config.log.level.as_deref(), Some("debug"));
        assert_eq!(
            config.adapters["quicksight"],
            AdapterOverride {
                read: None,
                write: Some(false)
            }
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("[catalog]\nfile = \"x.json\"\n").is_err());
    }

    #[test]
    fn overrides_touch_only_named_flags() {
        let config = parse_config("[adapters.databricks]\nwrite = false\n").unwrap();
        let mut reg = registry();
        apply_adapter_overrides(&config, &mut reg).unwrap();

        assert!(reg.is_active("databricks", AdapterMode::Read));
        assert!(!reg.is_active("databricks", AdapterMode::Write));
        assert!(reg.is_active("quicksight", AdapterMode::Write));
    }

    #[test]
    fn unknown_adapter_overrides_are_reported() {
        let config = parse_config("[adapters.snowflake]\nread = false\n").unwrap();
        let mut reg = registry();
        assert_eq!(validate_config(&config, &reg), ["snowflake"]);

        let before = reg.clone();
        let err = apply_adapter_overrides(&config, &mut reg).unwrap_err();
        assert!(err.to_string().contains("snowflake"));
        assert_eq!(reg, before);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
