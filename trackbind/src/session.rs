//! Track ownership for a session
//!
//! A [`TrackSession`] owns the tracks of one participant session by id and
//! releases them once they are finished: stopped, with nothing attached.

use crate::config::GlobalConfig;
use tracing::{debug, info};
use trackbind_core::{TrackError, TrackResult};
use trackbind_media::Track;

/// Owner of the tracks in a session
#[derive(Debug, Default)]
pub struct TrackSession {
    config: GlobalConfig,
    tracks: Vec<Track>,
}

impl TrackSession {
    /// Create a session with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with custom configuration
    pub fn with_config(config: GlobalConfig) -> Self {
        Self {
            config,
            tracks: Vec::new(),
        }
    }

    /// Configuration of this session
    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// Take ownership of a track
    pub fn add(&mut self, track: impl Into<Track>) -> TrackResult<()> {
        let track = track.into();
        if self.get(track.id()).is_some() {
            return Err(TrackError::TrackAlreadyExists {
                track_id: track.id().to_string(),
            });
        }
        if self.tracks.len() >= self.config.max_tracks {
            return Err(TrackError::InvalidConfiguration {
                reason: format!("session is limited to {} tracks", self.config.max_tracks),
            });
        }

        info!("➕ Session now owns {} track: {}", track.kind(), track.id());
        self.tracks.push(track);
        Ok(())
    }

    /// Look up a track by id
    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    /// Release a track by id
    pub fn remove(&mut self, id: &str) -> TrackResult<Track> {
        let index = self
            .tracks
            .iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| TrackError::TrackNotFound {
                track_id: id.to_string(),
            })?;
        debug!("➖ Session released track: {}", id);
        Ok(self.tracks.remove(index))
    }

    /// Tracks owned by this session, in the order they were added
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Number of owned tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the session owns no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Release every stopped track with no attachments; returns their ids
    pub fn prune(&mut self) -> Vec<String> {
        let mut pruned = Vec::new();
        self.tracks.retain(|track| {
            let finished = track.is_stopped() && track.attachment_count() == 0;
            if finished {
                pruned.push(track.id().to_string());
            }
            !finished
        });
        if !pruned.is_empty() {
            info!("🧹 Pruned {} finished track(s): {:?}", pruned.len(), pruned);
        }
        pruned
    }
}
