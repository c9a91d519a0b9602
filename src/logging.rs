//! Diagnostic logging on stderr, kept quiet by default so it never mixes with the
//! program's own output.

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Filter directives in this variable take precedence over `--log-level`.
pub const LOG_ENV: &str = "POLYRUN_LOG";

pub const DEFAULT_LEVEL: &str = "warn";

/// Install the global subscriber.
pub fn init(default_level: &str) -> Result<()> {
    let filter = build_filter(std::env::var(LOG_ENV).ok(), default_level)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init()
        .context("failed to install log subscriber")
}

fn build_filter(directives: Option<String>, default_level: &str) -> Result<EnvFilter> {
    match directives {
        Some(directives) if !directives.is_empty() => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {LOG_ENV} filter: {directives}")),
        _ => {
            let level: Level = default_level
                .parse()
                .with_context(|| format!("invalid log level: {default_level}"))?;
            Ok(EnvFilter::default().add_directive(level.into()))
        }
    }
}
