//! Error types for trackbind
//!
//! Selector failures come from the host document; everything else is raised
//! by the track adapter or the session that owns tracks.

use thiserror::Error;

/// A selector the host document could not parse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid selector '{selector}': {reason}")]
pub struct SelectorError {
    /// The offending selector text
    pub selector: String,
    /// Why the selector was rejected
    pub reason: String,
}

impl SelectorError {
    /// Create a new selector error
    pub fn new(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type for track operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// Selector was syntactically invalid
    #[error("{0}")]
    InvalidSelector(#[from] SelectorError),

    /// Selector was well-formed but matched nothing
    #[error("No element matches selector '{selector}'")]
    ElementNotFound {
        /// The selector that matched nothing
        selector: String,
    },

    /// Signaling descriptor disagrees with the native track
    #[error("Signaling {field} mismatch: expected '{expected}', got '{actual}'")]
    SignalingMismatch {
        /// Which descriptor field disagreed
        field: &'static str,
        /// Value held by the track
        expected: String,
        /// Value carried by the descriptor
        actual: String,
    },

    /// Invalid configuration provided
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// The reason why the configuration is invalid
        reason: String,
    },

    /// Track not found
    #[error("Track with ID '{track_id}' not found")]
    TrackNotFound {
        /// The ID of the track that was not found
        track_id: String,
    },

    /// Track already exists
    #[error("Track with ID '{track_id}' already exists")]
    TrackAlreadyExists {
        /// The ID of the track that already exists
        track_id: String,
    },
}

/// Result type alias for track operations
pub type TrackResult<T> = Result<T, TrackError>;

impl TrackError {
    /// Check if error is recoverable
    ///
    /// A missing element may appear later in the document, so lookups are
    /// worth retrying. Malformed input is not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            TrackError::ElementNotFound { .. } => true,
            TrackError::TrackNotFound { .. } => true,
            TrackError::InvalidSelector(_) => false,
            TrackError::SignalingMismatch { .. } => false,
            TrackError::InvalidConfiguration { .. } => false,
            TrackError::TrackAlreadyExists { .. } => false,
        }
    }

    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrackError::InvalidSelector(_) => ErrorCategory::Selector,
            TrackError::ElementNotFound { .. } => ErrorCategory::Selector,
            TrackError::SignalingMismatch { .. } => ErrorCategory::Signaling,
            TrackError::InvalidConfiguration { .. } => ErrorCategory::Configuration,
            TrackError::TrackNotFound { .. } => ErrorCategory::State,
            TrackError::TrackAlreadyExists { .. } => ErrorCategory::State,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Element lookup errors
    Selector,
    /// Signaling descriptor errors
    Signaling,
    /// Configuration and parameter errors
    Configuration,
    /// Track ownership and state errors
    State,
}
