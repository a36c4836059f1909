//! # trackbind - Attach real-time media tracks to media elements
//!
//! trackbind wraps the native media tracks of a real-time communications
//! client, renders them through audio and video elements supplied by the
//! host, and reports their lifecycle as events.
//!
//! ## Key Features
//!
//! - **Attach anywhere**: into a fresh element, a selector match, or a given element
//! - **Lifecycle events**: `started` on first render, `stopped` when the native track ends
//! - **Local and remote tracks**: stop/enable locally, follow signaling remotely
//! - **Host agnostic**: every host capability is a trait, with a headless host included
//!
//! ## Quick Start
//!
//! ```rust
//! use trackbind::{
//!     AttachTarget, HeadlessDocument, HeadlessStreamFactory, HeadlessTrack, LocalTrack,
//!     TrackEventKind, TrackKind, TrackOptions,
//! };
//!
//! # fn main() -> Result<(), trackbind::TrackError> {
//! let document = HeadlessDocument::new();
//! let options = TrackOptions::new(document.clone(), HeadlessStreamFactory::new());
//!
//! let microphone = HeadlessTrack::new("mic", TrackKind::Audio);
//! let track = LocalTrack::new(microphone, options)?;
//! track.on(TrackEventKind::Stopped, |t| println!("track {} stopped", t.id()));
//!
//! let _element = track.attach(AttachTarget::None)?;
//! track.stop();
//! assert!(track.is_stopped());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core types for easy access
pub use trackbind_core::{
    same_object, Document, ElementRef, ErrorCategory, HeadlessDocument, HeadlessElement,
    HeadlessStream, HeadlessStreamFactory, HeadlessTrack, ListenerHandle, MediaElement,
    MediaStream, MediaStreamFactory, MediaStreamRef, NativeTrack, NativeTrackRef, ReadyState,
    SelectorError, TrackError, TrackKind, TrackResult, TrackSignaling, VideoDimensions,
};

pub use trackbind_media::{
    AttachTarget, EventStream, ListenerId, LocalTrack, RemoteTrack, RenderReadyInitializer,
    Track, TrackEvent, TrackEventKind, TrackInitializer, TrackOptions, TrackState,
};

// Public API modules
pub mod config;
pub mod logging;
pub mod session;

// Re-export main API types
pub use config::GlobalConfig;
pub use logging::init_logging;
pub use session::TrackSession;
