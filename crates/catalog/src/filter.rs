//! The Filter Specification: an ephemeral, UI-owned description of a catalog query.
//!
//! A `FilterSpec` is persisted verbatim into saved filter sets, so it carries
//! `#[serde(default)]`: a blob written before a field existed still loads,
//! with the missing field taking its default.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::MetricStatus;

/// Loosest freshness bound, in hours (`7d`).
pub const MAX_FRESHNESS_HOURS: u32 = 168;

/// Total order applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Descending total usage.
    #[default]
    Usage,
    /// Most recently updated first.
    Updated,
    /// Ascending by display name.
    Name,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Usage => "usage",
            SortKey::Updated => "updated",
            SortKey::Name => "name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "usage" => Ok(SortKey::Usage),
            "updated" => Ok(SortKey::Updated),
            "name" => Ok(SortKey::Name),
            other => Err(format!(
                "unknown sort key '{other}' (expected usage, updated or name)"
            )),
        }
    }
}

/// Query parameters for the Filter & Sort Engine.
///
/// `themes` and `business_units` are unconstrained when empty. `statuses`
/// is not: an empty status set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Case-insensitive substring matched against id, name and business summary.
    pub search: String,
    pub themes: BTreeSet<String>,
    pub business_units: BTreeSet<String>,
    pub statuses: BTreeSet<MetricStatus>,
    /// Maximum allowed SLO, in hours.
    pub freshness: u32,
    pub sort_by: SortKey,
}

impl Default for FilterSpec {
    /// The Consult view's initial filters: canonical and experimental
    /// metrics of any freshness, most used first.
    fn default() -> Self {
        FilterSpec {
            search: String::new(),
            themes: BTreeSet::new(),
            business_units: BTreeSet::new(),
            statuses: [MetricStatus::Canonical, MetricStatus::Experimental]
                .into_iter()
                .collect(),
            freshness: MAX_FRESHNESS_HOURS,
            sort_by: SortKey::Usage,
        }
    }
}

impl FilterSpec {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.themes.insert(theme.into());
        self
    }

    pub fn with_business_unit(mut self, bu: impl Into<String>) -> Self {
        self.business_units.insert(bu.into());
        self
    }

    /// Replace the allowed statuses.
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = MetricStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_freshness(mut self, hours: u32) -> Self {
        self.freshness = hours;
        self
    }

    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort_by = key;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_consult_view() {
        let spec = FilterSpec::default();
        assert!(spec.search.is_empty());
        assert_eq!(spec.freshness, 168);
        assert_eq!(spec.sort_by, SortKey::Usage);
        assert!(spec.statuses.contains(&MetricStatus::Canonical));
        assert!(spec.statuses.contains(&MetricStatus::Experimental));
        assert!(!spec.statuses.contains(&MetricStatus::Deprecated));
    }

    #[test]
    fn serializes_with_ui_field_names() {
        let spec = FilterSpec::default()
            .with_business_unit("Retail")
            .sorted_by(SortKey::Name);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["businessUnits"], serde_json::json!(["Retail"]));
        assert_eq!(json["sortBy"], "name");
        assert_eq!(
            json["statuses"],
            serde_json::json!(["canonical", "experimental"])
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let spec: FilterSpec = serde_json::from_str(r#"{"search": "rate"}"#).unwrap();
        assert_eq!(spec.search, "rate");
        assert_eq!(spec.freshness, MAX_FRESHNESS_HOURS);
        assert_eq!(spec.statuses, FilterSpec::default().statuses);
    }

    #[test]
    fn explicit_empty_statuses_stay_empty() {
        let spec: FilterSpec = serde_json::from_str(r#"{"statuses": []}"#).unwrap();
        assert!(spec.statuses.is_empty());
    }

    #[test]
    fn sort_key_parses() {
        assert_eq!("Updated".parse::<SortKey>(), Ok(SortKey::Updated));
        assert!("popularity".parse::<SortKey>().is_err());
    }
}
