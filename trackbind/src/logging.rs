//! Logging initialization

use crate::config::GlobalConfig;
use trackbind_core::{TrackError, TrackResult};
use tracing_subscriber::EnvFilter;

/// Install a `tracing` fmt subscriber configured from `config`.
///
/// An already-installed global subscriber is left in place.
pub fn init_logging(config: &GlobalConfig) -> TrackResult<()> {
    let directive = config.filter_directive();
    let filter = EnvFilter::try_new(directive).map_err(|e| TrackError::InvalidConfiguration {
        reason: format!("invalid log filter '{}': {}", directive, e),
    })?;

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global subscriber already installed");
    }
    Ok(())
}
