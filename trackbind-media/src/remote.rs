//! Tracks received from remote participants

use crate::options::TrackOptions;
use crate::track::Track;
use std::ops::Deref;
use trackbind_core::{NativeTrackRef, TrackError, TrackResult, TrackSignaling};

/// Track received from another participant.
///
/// Its enabled flag follows signaling updates; it cannot be stopped locally
/// and ends when the native layer ends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTrack {
    track: Track,
}

impl RemoteTrack {
    /// Wrap a received native track and its descriptor
    pub fn new(
        native: NativeTrackRef,
        signaling: TrackSignaling,
        options: TrackOptions,
    ) -> TrackResult<Self> {
        Ok(Self {
            track: Track::new(native, signaling, options)?,
        })
    }

    /// Apply a signaling update for this track
    pub fn update(&self, signaling: &TrackSignaling) -> TrackResult<()> {
        if signaling.id() != self.track.id() {
            return Err(TrackError::SignalingMismatch {
                field: "id",
                expected: self.track.id().to_string(),
                actual: signaling.id().to_string(),
            });
        }
        if signaling.kind() != self.track.kind() {
            return Err(TrackError::SignalingMismatch {
                field: "kind",
                expected: self.track.kind().to_string(),
                actual: signaling.kind().to_string(),
            });
        }
        self.track.update_enabled(signaling.is_enabled());
        Ok(())
    }

    /// The underlying track
    pub fn track(&self) -> &Track {
        &self.track
    }
}

impl Deref for RemoteTrack {
    type Target = Track;

    fn deref(&self) -> &Track {
        &self.track
    }
}

impl From<RemoteTrack> for Track {
    fn from(remote: RemoteTrack) -> Self {
        remote.track
    }
}
