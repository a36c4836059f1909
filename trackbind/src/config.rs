//! Configuration types and defaults

use serde::Deserialize;

/// Global trackbind configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Enable debug logging
    pub debug_logging: bool,
    /// Maximum number of tracks a session may own
    pub max_tracks: usize,
    /// Explicit `tracing` filter directive, overriding `debug_logging`
    pub log_filter: Option<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            debug_logging: false,
            max_tracks: 64,
            log_filter: None,
        }
    }
}

impl GlobalConfig {
    /// Filter directive the logging subscriber is installed with
    pub fn filter_directive(&self) -> &str {
        match &self.log_filter {
            Some(filter) => filter.as_str(),
            None if self.debug_logging => "debug",
            None => "info",
        }
    }
}
