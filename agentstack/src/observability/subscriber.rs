//! Tracing subscriber installation.

use crate::config::{LogFormat, Settings};
use crate::errors::{AgentStackError, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Builds the log filter: `RUST_LOG` when set, otherwise `settings.log_level`.
pub fn build_filter(settings: &Settings) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directive = if settings.debug {
        "debug".to_string()
    } else {
        settings.log_level.to_ascii_lowercase()
    };
    EnvFilter::try_new(&directive)
        .map_err(|e| AgentStackError::Config(format!("invalid log level '{directive}': {e}")))
}

/// Installs the global tracing subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed.
pub fn init_tracing(settings: &Settings) -> Result<bool> {
    let filter = build_filter(settings)?;
    let format = if settings.debug {
        LogFormat::Pretty
    } else {
        settings.log_format
    };

    let installed = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
    };

    Ok(installed.is_ok())
}
