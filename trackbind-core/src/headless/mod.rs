//! In-memory host
//!
//! A headless implementation of every host capability: native tracks that
//! can be ended on demand, media elements whose "can play" moment is
//! dispatched explicitly, stream containers, and a document with a flat
//! element tree and compound selector queries. Used wherever no browser is
//! available, including the test-suites of the trackbind crates.

mod selector;

use crate::error::SelectorError;
use crate::host::{
    same_object, Document, ElementRef, ListenerHandle, MediaElement, MediaStream,
    MediaStreamFactory, MediaStreamRef, NativeTrack, NativeTrackRef,
};
use crate::types::{ReadyState, TrackKind, VideoDimensions};
use selector::Selector;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// Native track whose lifecycle is driven by the caller
pub struct HeadlessTrack {
    id: String,
    kind: TrackKind,
    ready_state: Cell<ReadyState>,
    enabled: Cell<bool>,
    listeners: RefCell<Vec<(ListenerHandle, Rc<dyn Fn()>)>>,
    next_listener: Cell<u64>,
}

impl HeadlessTrack {
    /// Create a live, enabled track
    pub fn new(id: impl Into<String>, kind: TrackKind) -> Rc<Self> {
        Rc::new(Self {
            id: id.into(),
            kind,
            ready_state: Cell::new(ReadyState::Live),
            enabled: Cell::new(true),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        })
    }

    /// End the track and notify "ended" listeners
    ///
    /// Ending is one-shot: a track that already ended stays silent.
    pub fn end(&self) {
        if self.ready_state.get() == ReadyState::Ended {
            return;
        }
        debug!("⏹️ Headless track {} ended", self.id);
        self.ready_state.set(ReadyState::Ended);

        let listeners: Vec<Rc<dyn Fn()>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }

    /// Overwrite the readiness without notifying anyone
    pub fn set_ready_state(&self, state: ReadyState) {
        self.ready_state.set(state);
    }

    /// Number of registered "ended" listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl NativeTrack for HeadlessTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn ready_state(&self) -> ReadyState {
        self.ready_state.get()
    }

    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    fn stop(&self) {
        self.end();
    }

    fn add_ended_listener(&self, listener: Rc<dyn Fn()>) -> ListenerHandle {
        let handle = ListenerHandle::new(self.next_listener.get());
        self.next_listener.set(handle.raw() + 1);
        self.listeners.borrow_mut().push((handle, listener));
        handle
    }

    fn remove_ended_listener(&self, handle: ListenerHandle) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != handle);
        listeners.len() != before
    }
}

/// Stream container backed by a vector of tracks
#[derive(Default)]
pub struct HeadlessStream {
    tracks: RefCell<Vec<NativeTrackRef>>,
}

impl HeadlessStream {
    /// Create an empty container
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Number of tracks in the container
    pub fn len(&self) -> usize {
        self.tracks.borrow().len()
    }

    /// Whether the container holds no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.borrow().is_empty()
    }

    /// Whether `track` is in the container
    pub fn contains(&self, track: &NativeTrackRef) -> bool {
        self.tracks.borrow().iter().any(|t| same_object(t, track))
    }
}

impl MediaStream for HeadlessStream {
    fn add_track(&self, track: NativeTrackRef) {
        if !self.contains(&track) {
            self.tracks.borrow_mut().push(track);
        }
    }

    fn remove_track(&self, track: &NativeTrackRef) {
        self.tracks.borrow_mut().retain(|t| !same_object(t, track));
    }

    fn tracks_of_kind(&self, kind: TrackKind) -> Vec<NativeTrackRef> {
        self.tracks
            .borrow()
            .iter()
            .filter(|t| t.kind() == kind)
            .cloned()
            .collect()
    }
}

/// Factory producing [`HeadlessStream`] containers
#[derive(Default)]
pub struct HeadlessStreamFactory {
    created: Cell<usize>,
}

impl HeadlessStreamFactory {
    /// Create a new factory
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// How many containers this factory has constructed
    pub fn created_count(&self) -> usize {
        self.created.get()
    }
}

impl MediaStreamFactory for HeadlessStreamFactory {
    fn create(&self) -> MediaStreamRef {
        self.created.set(self.created.get() + 1);
        HeadlessStream::new()
    }
}

/// Audio or video element held in memory
pub struct HeadlessElement {
    kind: TrackKind,
    element_id: RefCell<Option<String>>,
    classes: RefCell<Vec<String>>,
    attributes: RefCell<HashMap<String, String>>,
    src_object: RefCell<Option<MediaStreamRef>>,
    autoplay: Cell<bool>,
    muted: Cell<bool>,
    on_can_play: RefCell<Option<Rc<dyn Fn()>>>,
    video_dimensions: Cell<Option<VideoDimensions>>,
}

impl HeadlessElement {
    /// Create a detached element rendering `kind`
    pub fn new(kind: TrackKind) -> Rc<Self> {
        Rc::new(Self {
            kind,
            element_id: RefCell::new(None),
            classes: RefCell::new(Vec::new()),
            attributes: RefCell::new(HashMap::new()),
            src_object: RefCell::new(None),
            autoplay: Cell::new(false),
            muted: Cell::new(false),
            on_can_play: RefCell::new(None),
            video_dimensions: Cell::new(None),
        })
    }

    /// Tag name (`audio` or `video`)
    pub fn tag_name(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Element id, if set
    pub fn element_id(&self) -> Option<String> {
        self.element_id.borrow().clone()
    }

    /// Set the element id
    pub fn set_element_id(&self, id: impl Into<String>) {
        *self.element_id.borrow_mut() = Some(id.into());
    }

    /// Add a class name
    pub fn add_class(&self, class: impl Into<String>) {
        let class = class.into();
        let mut classes = self.classes.borrow_mut();
        if !classes.contains(&class) {
            classes.push(class);
        }
    }

    /// Whether the element carries `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    /// Set a markup attribute
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.borrow_mut().insert(name.into(), value.into());
    }

    /// Value of a markup attribute
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    /// Whether a "can play" handler is installed
    pub fn has_can_play_handler(&self) -> bool {
        self.on_can_play.borrow().is_some()
    }

    /// Fire the "can play" handler, if one is installed
    ///
    /// The handler may clear or replace itself while running.
    pub fn dispatch_can_play(&self) {
        let handler = self.on_can_play.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    /// Set the intrinsic video size reported to the adapter
    pub fn set_video_dimensions(&self, dimensions: Option<VideoDimensions>) {
        self.video_dimensions.set(dimensions);
    }
}

impl MediaElement for HeadlessElement {
    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn src_object(&self) -> Option<MediaStreamRef> {
        self.src_object.borrow().clone()
    }

    fn set_src_object(&self, stream: Option<MediaStreamRef>) {
        *self.src_object.borrow_mut() = stream;
    }

    fn autoplay(&self) -> bool {
        self.autoplay.get()
    }

    fn set_autoplay(&self, autoplay: bool) {
        self.autoplay.set(autoplay);
    }

    fn muted(&self) -> bool {
        self.muted.get()
    }

    fn set_muted(&self, muted: bool) {
        self.muted.set(muted);
    }

    fn remove_attribute(&self, name: &str) {
        self.attributes.borrow_mut().remove(name);
    }

    fn set_on_can_play(&self, handler: Option<Rc<dyn Fn()>>) {
        *self.on_can_play.borrow_mut() = handler;
    }

    fn video_dimensions(&self) -> Option<VideoDimensions> {
        match self.kind {
            TrackKind::Video => self.video_dimensions.get(),
            TrackKind::Audio => None,
        }
    }
}

/// Document with a flat body of media elements
#[derive(Default)]
pub struct HeadlessDocument {
    body: RefCell<Vec<Rc<HeadlessElement>>>,
    created: Cell<usize>,
}

impl HeadlessDocument {
    /// Create an empty document
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Create a detached element, keeping its concrete type
    pub fn create_headless_element(&self, kind: TrackKind) -> Rc<HeadlessElement> {
        self.created.set(self.created.get() + 1);
        HeadlessElement::new(kind)
    }

    /// How many elements this document has created
    pub fn created_count(&self) -> usize {
        self.created.get()
    }

    /// Append an element to the body
    pub fn append_child(&self, element: Rc<HeadlessElement>) {
        let mut body = self.body.borrow_mut();
        if !body.iter().any(|e| same_object(e, &element)) {
            body.push(element);
        }
    }

    /// Remove an element from the body; returns whether it was present
    pub fn remove_child(&self, element: &Rc<HeadlessElement>) -> bool {
        let mut body = self.body.borrow_mut();
        let before = body.len();
        body.retain(|e| !same_object(e, element));
        body.len() != before
    }

    /// Whether the element is in the body
    pub fn contains(&self, element: &Rc<HeadlessElement>) -> bool {
        self.body.borrow().iter().any(|e| same_object(e, element))
    }
}

impl Document for HeadlessDocument {
    fn create_element(&self, kind: TrackKind) -> ElementRef {
        self.create_headless_element(kind)
    }

    fn query_selector(&self, selector: &str) -> Result<Option<ElementRef>, SelectorError> {
        let selector = Selector::parse(selector)?;
        let found = self
            .body
            .borrow()
            .iter()
            .find(|element| selector.matches(element))
            .cloned();
        Ok(found.map(|element| element as ElementRef))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_end_notifies_once() {
        let track = HeadlessTrack::new("1", TrackKind::Audio);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        track.add_ended_listener(Rc::new(move || counter.set(counter.get() + 1)));

        track.end();
        track.end();

        assert_eq!(calls.get(), 1);
        assert_eq!(track.ready_state(), ReadyState::Ended);
    }

    #[test]
    fn test_track_listener_removal() {
        let track = HeadlessTrack::new("1", TrackKind::Audio);
        let handle = track.add_ended_listener(Rc::new(|| {}));
        assert_eq!(track.listener_count(), 1);

        assert!(track.remove_ended_listener(handle));
        assert!(!track.remove_ended_listener(handle));
        assert_eq!(track.listener_count(), 0);
    }

    #[test]
    fn test_stream_filters_by_kind() {
        let stream = HeadlessStream::new();
        let audio: NativeTrackRef = HeadlessTrack::new("a", TrackKind::Audio);
        let video: NativeTrackRef = HeadlessTrack::new("v", TrackKind::Video);
        stream.add_track(audio.clone());
        stream.add_track(audio.clone());
        stream.add_track(video.clone());

        assert_eq!(stream.len(), 2);
        let audio_tracks = stream.tracks_of_kind(TrackKind::Audio);
        assert_eq!(audio_tracks.len(), 1);
        assert!(same_object(&audio_tracks[0], &audio));

        stream.remove_track(&audio);
        assert!(!stream.contains(&audio));
        assert!(stream.contains(&video));
    }

    #[test]
    fn test_query_selector_matches_tree_members_only() {
        let document = HeadlessDocument::new();
        let attached = document.create_headless_element(TrackKind::Audio);
        attached.add_class("foo");
        document.append_child(attached.clone());

        let detached = document.create_headless_element(TrackKind::Video);
        detached.add_class("bar");

        let found = document.query_selector(".foo").unwrap().unwrap();
        assert!(same_object(&found, &attached));
        assert!(document.query_selector("audio.foo").unwrap().is_some());
        assert!(document.query_selector("video.foo").unwrap().is_none());
        assert!(document.query_selector(".bar").unwrap().is_none());
        assert!(document.query_selector(".").is_err());

        assert!(document.remove_child(&attached));
        assert!(document.query_selector(".foo").unwrap().is_none());
    }

    #[test]
    fn test_query_selector_by_id() {
        let document = HeadlessDocument::new();
        let element = document.create_headless_element(TrackKind::Video);
        element.set_element_id("remote");
        document.append_child(element.clone());

        let found = document.query_selector("#remote").unwrap().unwrap();
        assert!(same_object(&found, &element));
        assert!(document.query_selector("#local").unwrap().is_none());
    }

    #[test]
    fn test_can_play_handler_may_clear_itself() {
        let element = HeadlessElement::new(TrackKind::Audio);
        let weak = Rc::downgrade(&element);
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        element.set_on_can_play(Some(Rc::new(move || {
            flag.set(true);
            if let Some(element) = weak.upgrade() {
                element.set_on_can_play(None);
            }
        })));

        element.dispatch_can_play();
        assert!(fired.get());
        assert!(!element.has_can_play_handler());
    }
}
