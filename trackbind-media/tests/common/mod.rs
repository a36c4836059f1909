//! Shared headless host for track tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use trackbind_core::{
    Document, ElementRef, HeadlessDocument, HeadlessElement, HeadlessStreamFactory,
    HeadlessTrack, NativeTrack, SelectorError, TrackKind, TrackSignaling,
};
use trackbind_media::{Track, TrackInitializer, TrackOptions};

/// Document that remembers every element it created
#[derive(Default)]
pub struct RecordingDocument {
    pub inner: Rc<HeadlessDocument>,
    created: RefCell<Vec<Rc<HeadlessElement>>>,
}

impl RecordingDocument {
    pub fn created(&self) -> Vec<Rc<HeadlessElement>> {
        self.created.borrow().clone()
    }

    pub fn created_count(&self) -> usize {
        self.created.borrow().len()
    }

    /// The internal element made by the default initializer
    pub fn hidden_element(&self) -> Rc<HeadlessElement> {
        self.created.borrow()[0].clone()
    }
}

impl Document for RecordingDocument {
    fn create_element(&self, kind: TrackKind) -> ElementRef {
        let element = self.inner.create_headless_element(kind);
        self.created.borrow_mut().push(element.clone());
        element
    }

    fn query_selector(&self, selector: &str) -> Result<Option<ElementRef>, SelectorError> {
        self.inner.query_selector(selector)
    }
}

/// Initializer that only counts its invocations
#[derive(Default)]
pub struct CountingInitializer {
    pub calls: Cell<usize>,
}

impl TrackInitializer for CountingInitializer {
    fn initialize(&self, _track: &Track) {
        self.calls.set(self.calls.get() + 1);
    }
}

pub struct Host {
    pub document: Rc<RecordingDocument>,
    pub streams: Rc<HeadlessStreamFactory>,
}

impl Host {
    pub fn new() -> Self {
        Self {
            document: Rc::new(RecordingDocument::default()),
            streams: HeadlessStreamFactory::new(),
        }
    }

    pub fn options(&self) -> TrackOptions {
        TrackOptions::new(self.document.clone(), self.streams.clone())
    }

    /// Options whose initializer does nothing, isolating attach/detach
    pub fn bare_options(&self) -> TrackOptions {
        self.options()
            .with_initializer(Rc::new(CountingInitializer::default()))
    }

    pub fn track(&self, id: &str, kind: TrackKind) -> (Rc<HeadlessTrack>, Track) {
        let native = HeadlessTrack::new(id, kind);
        let track = Track::new(native.clone(), signaling_for(&native), self.options()).unwrap();
        (native, track)
    }

    pub fn bare_track(&self, id: &str, kind: TrackKind) -> (Rc<HeadlessTrack>, Track) {
        let native = HeadlessTrack::new(id, kind);
        let track =
            Track::new(native.clone(), signaling_for(&native), self.bare_options()).unwrap();
        (native, track)
    }

    /// Element placed in the document body under `class`
    pub fn element_in_body(&self, kind: TrackKind, class: &str) -> Rc<HeadlessElement> {
        let element = self.document.inner.create_headless_element(kind);
        element.add_class(class);
        self.document.inner.append_child(element.clone());
        element
    }
}

pub fn signaling_for(native: &HeadlessTrack) -> TrackSignaling {
    TrackSignaling::new(native.id(), native.kind(), native.is_enabled())
}
