//! Log output for the binary (tracing-subscriber).
//!
//! Behavior:
//! - ICOOK_LOG controls the filter (e.g. "debug" or "info,icook=debug").
//! - ICOOK_LOG_FORMAT selects "pretty" (default) or "json".
//!
//! The library itself only logs through the `log` facade; the fmt
//! subscriber picks those records up once installed.

use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "ICOOK_LOG";
pub const LOG_FORMAT_ENV: &str = "ICOOK_LOG_FORMAT";
pub const DEFAULT_FILTER: &str = "info,icook=debug";

/// Installs the global subscriber. Returns false if one was already set.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let installed = match std::env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => builder.json().try_init(),
        _ => builder.try_init(),
    };

    installed.is_ok()
}
