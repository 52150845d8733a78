//! Tracing subscriber setup. Logs go to stderr so stdout stays parseable
//! under `--output json`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub(crate) const LOG_ENV: &str = "PRISMA_LOG";

const DEFAULT_LEVEL: &str = "warn";

/// Pick the filter: `PRISMA_LOG`, then the config's `log.level`, then `warn`.
/// A directive that fails to parse falls through to the next source.
pub(crate) fn filter(config_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(config_level.unwrap_or(DEFAULT_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

pub(crate) fn init(config_level: Option<&str>) {
    // try_init: a second call (or a test harness subscriber) is not an error
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(config_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
