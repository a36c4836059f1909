//! # trackbind core
//!
//! Host capability traits, track descriptors and error types shared by the
//! trackbind crates. The native media stack and the document that renders
//! media are owned by the host; this crate only describes what the track
//! adapter needs from them, and ships an in-memory headless host that
//! implements every capability.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod headless;
pub mod host;
pub mod types;

// Re-export main types
pub use error::{ErrorCategory, SelectorError, TrackError, TrackResult};
pub use headless::{
    HeadlessDocument, HeadlessElement, HeadlessStream, HeadlessStreamFactory, HeadlessTrack,
};
pub use host::{
    same_object, Document, ElementRef, ListenerHandle, MediaElement, MediaStream,
    MediaStreamFactory, MediaStreamRef, NativeTrack, NativeTrackRef,
};
pub use types::{ReadyState, TrackKind, TrackSignaling, VideoDimensions};
