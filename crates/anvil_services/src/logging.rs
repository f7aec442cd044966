//! Logging bootstrap

use crate::settings::LoggingSettings;
use crate::ServiceError;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` overrides the configured
/// filter. Call once, early.
pub fn init(settings: &LoggingSettings) -> Result<(), ServiceError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .map_err(|err| ServiceError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| ServiceError::Logging(err.to_string()))
}
