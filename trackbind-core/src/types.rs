//! Track kinds, native readiness and the signaling descriptor

use serde::{Deserialize, Serialize};

/// Track kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Audio track
    Audio,
    /// Video track
    Video,
}

impl TrackKind {
    /// Tag name of the media element that renders this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Audio => "audio",
            TrackKind::Video => "video",
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readiness of a native track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    /// Track is producing media
    #[default]
    Live,
    /// Track has ended and will never produce media again
    Ended,
}

/// Intrinsic size of rendered video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl VideoDimensions {
    /// Create new dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Signaling metadata accompanying a track
///
/// Supplied by the signaling layer and never mutated by the adapter. Updates
/// arrive as fresh descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSignaling {
    id: String,
    kind: TrackKind,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl TrackSignaling {
    /// Create a new descriptor
    pub fn new(id: impl Into<String>, kind: TrackKind, enabled: bool) -> Self {
        Self {
            id: id.into(),
            kind,
            enabled,
        }
    }

    /// Track ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Track kind
    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    /// Whether the track is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
