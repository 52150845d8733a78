//! Freshness SLO labels and their hour bounds.

/// Canonical label → hour table. Labels match exactly.
pub const SLO_HOURS: [(&str, u32); 6] = [
    ("1h", 1),
    ("3h", 3),
    ("6h", 6),
    ("24h", 24),
    ("3d", 72),
    ("7d", 168),
];

/// Bound used for unknown or missing labels (the loosest, `7d`).
pub const DEFAULT_SLO_HOURS: u32 = 168;

/// Resolve an SLO label to its maximum staleness in hours.
pub fn slo_hours(label: &str) -> u32 {
    SLO_HOURS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, hours)| *hours)
        .unwrap_or(DEFAULT_SLO_HOURS)
}
