//! Adapter registry: read/write capability flags for external systems.
//!
//! Each adapter carries two independent booleans. Registration order is
//! preserved for display. Ids the registry does not know are inactive in
//! both modes.

use std::fmt;
use std::str::FromStr;

use prisma_catalog::Adapter;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterMode {
    Read,
    Write,
}

impl AdapterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterMode::Read => "read",
            AdapterMode::Write => "write",
        }
    }
}

impl fmt::Display for AdapterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdapterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "read" => Ok(AdapterMode::Read),
            "write" => Ok(AdapterMode::Write),
            other => Err(format!("unknown adapter mode '{other}' (expected read or write)")),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown adapter '{0}'")]
    UnknownAdapter(String),
}

/// Ordered set of adapters keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterRegistry {
    adapters: Vec<Adapter>,
}

impl AdapterRegistry {
    pub fn new(adapters: Vec<Adapter>) -> Self {
        AdapterRegistry { adapters }
    }

    pub fn adapters(&self) -> &[Adapter] {
        &self.adapters
    }

    pub fn get(&self, id: &str) -> Option<&Adapter> {
        self.adapters.iter().find(|a| a.id == id)
    }

    /// Whether `id` is known and enabled for `mode`.
    pub fn is_active(&self, id: &str, mode: AdapterMode) -> bool {
        self.get(id).is_some_and(|a| flag(a, mode))
    }

    /// Adapters with at least one mode enabled, in registration order.
    pub fn active(&self) -> impl Iterator<Item = &Adapter> {
        self.adapters.iter().filter(|a| a.read || a.write)
    }

    /// Set one mode of one adapter. Leaves every other flag untouched.
    pub fn set(&mut self, id: &str, mode: AdapterMode, on: bool) -> Result<(), RegistryError> {
        let adapter = self
            .adapters
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| RegistryError::UnknownAdapter(id.to_string()))?;
        match mode {
            AdapterMode::Read => adapter.read = on,
            AdapterMode::Write => adapter.write = on,
        }
        info!(adapter = id, %mode, enabled = on, "adapter toggled");
        Ok(())
    }

    /// Flip one mode of one adapter and return the new value.
    pub fn toggle(&mut self, id: &str, mode: AdapterMode) -> Result<bool, RegistryError> {
        let current = self
            .get(id)
            .map(|a| flag(a, mode))
            .ok_or_else(|| RegistryError::UnknownAdapter(id.to_string()))?;
        self.set(id, mode, !current)?;
        Ok(!current)
    }
}

fn flag(adapter: &Adapter, mode: AdapterMode) -> bool {
    match mode {
        AdapterMode::Read => adapter.read,
        AdapterMode::Write => adapter.write,
    }
}
