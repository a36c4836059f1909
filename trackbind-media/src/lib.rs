//! # trackbind media
//!
//! The track adapter: binds a native media track to renderable elements and
//! surfaces `started` / `stopped` lifecycle events derived from native
//! callbacks, plus the local and remote specializations.

#![warn(clippy::all)]

mod attachments;
pub mod event;
pub mod initializer;
pub mod local;
pub mod options;
pub mod remote;
pub mod track;

// Re-export main types
pub use event::{EventStream, ListenerId, TrackEvent, TrackEventKind};
pub use initializer::{RenderReadyInitializer, TrackInitializer};
pub use local::LocalTrack;
pub use options::TrackOptions;
pub use remote::RemoteTrack;
pub use track::{AttachTarget, Track, TrackState};
