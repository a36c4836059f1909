//! Host capability traits
//!
//! The track adapter never owns media or markup. It drives these traits,
//! which a browser build implements over its DOM bindings and which
//! [`crate::headless`] implements in memory.
//!
//! All host objects are single-threaded and shared through [`Rc`]. Identity
//! of host objects is pointer identity; see [`same_object`].

use crate::error::SelectorError;
use crate::types::{ReadyState, TrackKind, VideoDimensions};
use std::rc::Rc;

/// Shared handle to a native track
pub type NativeTrackRef = Rc<dyn NativeTrack>;

/// Shared handle to a renderable media element
pub type ElementRef = Rc<dyn MediaElement>;

/// Shared handle to a stream container
pub type MediaStreamRef = Rc<dyn MediaStream>;

/// Registration handle returned by [`NativeTrack::add_ended_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    /// Wrap a host-assigned listener id
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Host-assigned listener id
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Live audio or video source owned by the host media stack
pub trait NativeTrack {
    /// Track ID assigned by the host
    fn id(&self) -> &str;

    /// Track kind
    fn kind(&self) -> TrackKind;

    /// Current readiness
    fn ready_state(&self) -> ReadyState;

    /// Whether the track currently produces media
    fn is_enabled(&self) -> bool;

    /// Enable or disable media production
    fn set_enabled(&self, enabled: bool);

    /// Terminate the track; the host fires its "ended" notification
    fn stop(&self);

    /// Register a listener for the "ended" notification
    fn add_ended_listener(&self, listener: Rc<dyn Fn()>) -> ListenerHandle;

    /// Remove a listener; returns whether it was registered
    fn remove_ended_listener(&self, handle: ListenerHandle) -> bool;
}

/// Stream container grouping native tracks for playback through one element
pub trait MediaStream {
    /// Add a track
    fn add_track(&self, track: NativeTrackRef);

    /// Remove a track
    fn remove_track(&self, track: &NativeTrackRef);

    /// Tracks of the given kind currently in the container
    fn tracks_of_kind(&self, kind: TrackKind) -> Vec<NativeTrackRef>;
}

/// Constructor for empty stream containers
pub trait MediaStreamFactory {
    /// Construct a new, empty container
    fn create(&self) -> MediaStreamRef;
}

/// Renderable audio or video element
pub trait MediaElement {
    /// Kind of media the element renders
    fn kind(&self) -> TrackKind;

    /// Current source container, if any
    fn src_object(&self) -> Option<MediaStreamRef>;

    /// Replace the source container
    fn set_src_object(&self, stream: Option<MediaStreamRef>);

    /// Whether playback starts automatically
    fn autoplay(&self) -> bool;

    /// Set automatic playback
    fn set_autoplay(&self, autoplay: bool);

    /// Whether output is muted
    fn muted(&self) -> bool;

    /// Mute or unmute output
    fn set_muted(&self, muted: bool);

    /// Remove a markup attribute
    fn remove_attribute(&self, name: &str);

    /// Install or clear the "can play" handler
    fn set_on_can_play(&self, handler: Option<Rc<dyn Fn()>>);

    /// Intrinsic size of the rendered video, once known
    fn video_dimensions(&self) -> Option<VideoDimensions>;
}

/// Document the host renders media elements into
pub trait Document {
    /// Create a detached media element for the given kind
    fn create_element(&self, kind: TrackKind) -> ElementRef;

    /// Find the first element matching `selector`
    ///
    /// Malformed selectors are errors; a well-formed selector that matches
    /// nothing is `Ok(None)`.
    fn query_selector(&self, selector: &str) -> Result<Option<ElementRef>, SelectorError>;
}

/// Pointer identity of two shared host objects
///
/// Compares the data address only, so a concrete handle and a trait-object
/// handle to the same allocation are the same object.
pub fn same_object<A: ?Sized, B: ?Sized>(a: &Rc<A>, b: &Rc<B>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}
