//! Log subscriber setup
//!
//! Logs go to stderr so stdout carries nothing but the hints. `RUST_LOG`
//! overrides the level chosen from `-v`/`-q`. Hint events written by
//! `--log-hints` are enabled at every verbosity.

use crate::config::{CliConfig, LogFormat};
use brhint::HINTS_LOG_TARGET;
use tracing_subscriber::EnvFilter;

/// Filter directives used when `RUST_LOG` is unset
#[must_use]
pub fn default_directives(config: &CliConfig) -> String {
    format!("{},{HINTS_LOG_TARGET}=info", config.verbosity.log_filter())
}

/// Build the filter: `RUST_LOG` if set and valid, otherwise the CLI level
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(config: &CliConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr);
    let _ = match config.log_format {
        LogFormat::Text => builder
            .with_ansi(config.color.should_color())
            .with_target(false)
            .try_init(),
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
    };
}
