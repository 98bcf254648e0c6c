//! Log subscriber setup
//!
//! Output goes to stderr so it never mixes with command output.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured log filter
pub const LOG_ENV: &str = "FINDASH_LOG";

/// Filter directive for a bare level, scoped to this crate's targets
pub fn filter_directive(level: &str) -> String {
    format!("finance_dashboard={level},findash={level}", level = level.trim())
}

fn build_filter(configured_level: &str) -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(raw) if !raw.trim().is_empty() => {
            let directive = if raw.contains('=') {
                raw
            } else {
                filter_directive(&raw)
            };
            EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(filter_directive("warn")))
        }
        _ => EnvFilter::try_new(filter_directive(configured_level))
            .unwrap_or_else(|_| EnvFilter::new(filter_directive("warn"))),
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init(configured_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(configured_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
