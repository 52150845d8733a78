use clap::Args;
use prisma_catalog::{FilterSpec, MetricStatus, SortKey};
use prisma_engine::{QueryNotice, QueryResult};
use prisma_storage::FilterSetStore;

use crate::session::Session;
use crate::{exit_with_error, print_json, OutputFormat};

/// Filter flags shared by `query` and `filters save`.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct FilterArgs {
    /// Case-insensitive text matched against id, name and business summary
    #[arg(long)]
    pub search: Option<String>,

    /// Keep metrics tagged with any of these themes (repeatable)
    #[arg(long = "theme", value_name = "THEME")]
    pub themes: Vec<String>,

    /// Keep metrics tagged with any of these business units (repeatable)
    #[arg(long = "bu", value_name = "BU")]
    pub business_units: Vec<String>,

    /// Allowed status (repeatable; default canonical and experimental)
    #[arg(long = "status", value_name = "STATUS")]
    pub statuses: Vec<MetricStatus>,

    /// Allow no status at all (matches nothing)
    #[arg(long, conflicts_with = "statuses")]
    pub no_status: bool,

    /// Maximum freshness SLO in hours (default 168)
    #[arg(long, value_name = "HOURS")]
    pub freshness: Option<u32>,

    /// Sort order: usage, updated or name (default usage)
    #[arg(long, value_name = "KEY")]
    pub sort: Option<SortKey>,
}

impl FilterArgs {
    /// Layer the flags that were given over `base`. Tag flags add to the
    /// base's tags; every other flag replaces its field.
    pub fn apply(self, mut spec: FilterSpec) -> FilterSpec {
        if let Some(search) = self.search {
            spec.search = search;
        }
        spec.themes.extend(self.themes);
        spec.business_units.extend(self.business_units);
        if self.no_status {
            spec.statuses.clear();
        } else if !self.statuses.is_empty() {
            spec.statuses = self.statuses.into_iter().collect();
        }
        if let Some(hours) = self.freshness {
            spec.freshness = hours;
        }
        if let Some(key) = self.sort {
            spec.sort_by = key;
        }
        spec
    }
}

pub(crate) fn cmd_query(
    session: &Session,
    args: FilterArgs,
    saved: Option<&str>,
    output: OutputFormat,
    quiet: bool,
) {
    let base = match saved {
        Some(name) => match session.filter_store().load(name) {
            Ok(set) => set.filters,
            Err(e) => exit_with_error(&e.to_string(), output, quiet),
        },
        None => FilterSpec::default(),
    };
    let spec = args.apply(base);
    let result = session.store.query(&spec);

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Text => print_result(&result),
    }
}

fn print_result(result: &QueryResult) {
    if result.notice == Some(QueryNotice::NoStatusesSelected) {
        println!("No statuses selected: choose at least one status to see metrics.");
        return;
    }
    if result.metrics.is_empty() {
        println!("No metrics match these filters.");
        return;
    }

    println!(
        "{:<28} {:<13} {:>4} {:>5} {:>6}  NAME",
        "ID", "STATUS", "VER", "SLO", "USAGE"
    );
    for m in &result.metrics {
        println!(
            "{:<28} {:<13} {:>4} {:>5} {:>6}  {}",
            m.id,
            m.status.as_str(),
            format!("v{}", m.version),
            m.freshness_slo,
            m.usage.total(),
            m.name
        );
    }
    println!();
    println!("{} metric(s)", result.metrics.len());
}

/// One-line description of a spec, for listings.
pub(crate) fn describe_spec(spec: &FilterSpec) -> String {
    let mut parts = Vec::new();
    if !spec.search.is_empty() {
        parts.push(format!("search=\"{}\"", spec.search));
    }
    if !spec.themes.is_empty() {
        parts.push(format!("themes={}", join(&spec.themes)));
    }
    if !spec.business_units.is_empty() {
        parts.push(format!("bu={}", join(&spec.business_units)));
    }
    let statuses: Vec<&str> = spec.statuses.iter().map(|s| s.as_str()).collect();
    parts.push(format!("status={}", statuses.join(",")));
    parts.push(format!("freshness<={}h", spec.freshness));
    parts.push(format!("sort={}", spec.sort_by));
    parts.join(" ")
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
