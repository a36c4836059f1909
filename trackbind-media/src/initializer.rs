//! Track initialization strategies
//!
//! A track runs its strategy exactly once, during construction. Tests and
//! embedders substitute their own strategy through
//! [`TrackOptions::with_initializer`](crate::TrackOptions::with_initializer).

use crate::track::Track;
use std::rc::Rc;
use tracing::debug;
use trackbind_core::same_object;

/// Strategy run once when a track is constructed
pub trait TrackInitializer {
    /// Wire the track to its native callbacks
    fn initialize(&self, track: &Track);
}

/// Default strategy: detect the render-ready moment with a hidden element.
///
/// A muted internal element is created and wired to the native track. Its
/// first "can play" notification marks the track started, and the native
/// "ended" notification marks it stopped and releases the element if it never
/// rendered. Running the strategy again on the same track replaces both the
/// element and the "ended" listener instead of adding more.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderReadyInitializer;

impl TrackInitializer for RenderReadyInitializer {
    fn initialize(&self, track: &Track) {
        debug!("🔧 Initializing {} track {}", track.kind(), track.id());

        let element = track.create_element();
        element.set_muted(true);
        track.attach_element(&element);
        track.replace_render_element(element.clone());

        let weak_track = track.downgrade();
        let weak_element = Rc::downgrade(&element);
        element.set_on_can_play(Some(Rc::new(move || {
            let (Some(track), Some(element)) = (weak_track.upgrade(), weak_element.upgrade())
            else {
                return;
            };
            let current = track
                .render_element()
                .is_some_and(|current| same_object(&current, &element));
            if !current {
                return;
            }
            track.release_render_element();
            track.mark_started(&element);
        })));

        let weak_track = track.downgrade();
        track.replace_ended_listener(Rc::new(move || {
            if let Some(track) = weak_track.upgrade() {
                track.release_render_element();
                track.mark_stopped();
            }
        }));
    }
}
