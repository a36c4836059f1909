//! Locally produced tracks

use crate::options::TrackOptions;
use crate::track::Track;
use std::ops::Deref;
use tracing::{debug, info};
use trackbind_core::{NativeTrackRef, TrackResult, TrackSignaling};

/// Track published by this participant.
///
/// The descriptor is derived from the native track, so the two always
/// agree. Dereferences to [`Track`] for attach/detach and events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTrack {
    track: Track,
}

impl LocalTrack {
    /// Wrap a locally captured native track
    pub fn new(native: NativeTrackRef, options: TrackOptions) -> TrackResult<Self> {
        let signaling = TrackSignaling::new(native.id(), native.kind(), native.is_enabled());
        let track = Track::new(native, signaling, options)?;
        Ok(Self { track })
    }

    /// Stop the native track.
    ///
    /// The native layer reports the end, which emits `Stopped`. The enabled
    /// flag is left as it was.
    pub fn stop(&self) {
        if self.track.is_stopped() {
            debug!("Local track {} already stopped", self.track.id());
            return;
        }
        info!("🛑 Stopping local track: {}", self.track.id());
        self.track.native().stop();
    }

    /// Enable the track
    pub fn enable(&self) {
        self.set_enabled(true);
    }

    /// Disable the track
    pub fn disable(&self) {
        self.set_enabled(false);
    }

    /// Enable or disable media production; emits only on change
    pub fn set_enabled(&self, enabled: bool) {
        self.track.native().set_enabled(enabled);
        if self.track.update_enabled(enabled) {
            info!(
                "{} local track: {}",
                if enabled { "🔊 Enabled" } else { "🔇 Disabled" },
                self.track.id()
            );
        }
    }

    /// The underlying track
    pub fn track(&self) -> &Track {
        &self.track
    }
}

impl Deref for LocalTrack {
    type Target = Track;

    fn deref(&self) -> &Track {
        &self.track
    }
}

impl From<LocalTrack> for Track {
    fn from(local: LocalTrack) -> Self {
        local.track
    }
}
