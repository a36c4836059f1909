//! Track adapter: attach a native track to media elements
//!
//! A [`Track`] wraps a host-owned native track and its signaling descriptor.
//! It wires the native track into media elements for rendering and turns
//! native callbacks into [`TrackEvent`](crate::TrackEvent)s.

use crate::attachments::Attachments;
use crate::event::{Emitter, EventStream, ListenerId, TrackEventKind};
use crate::options::TrackOptions;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, info};
use trackbind_core::{
    Document, ElementRef, ListenerHandle, MediaStreamFactory, NativeTrackRef,
    ReadyState, TrackError, TrackKind, TrackResult, TrackSignaling, VideoDimensions,
};

/// Track lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Constructed, initialization not yet run
    Created,
    /// Initialization strategy is running
    Initializing,
    /// Wired, waiting for the first render-ready moment
    Idle,
    /// Rendered at least once
    Started,
    /// Native track ended
    Stopped,
}

/// Where to attach or detach
#[derive(Clone, Default)]
pub enum AttachTarget {
    /// No target: attach creates an element, detach applies to every attachment
    #[default]
    None,
    /// Resolve through the document
    Selector(String),
    /// This exact element
    Element(ElementRef),
}

impl From<()> for AttachTarget {
    fn from(_: ()) -> Self {
        AttachTarget::None
    }
}

impl From<&str> for AttachTarget {
    fn from(selector: &str) -> Self {
        AttachTarget::Selector(selector.to_string())
    }
}

impl From<String> for AttachTarget {
    fn from(selector: String) -> Self {
        AttachTarget::Selector(selector)
    }
}

impl From<ElementRef> for AttachTarget {
    fn from(element: ElementRef) -> Self {
        AttachTarget::Element(element)
    }
}

impl From<&ElementRef> for AttachTarget {
    fn from(element: &ElementRef) -> Self {
        AttachTarget::Element(element.clone())
    }
}

impl<T: Into<AttachTarget>> From<Option<T>> for AttachTarget {
    fn from(target: Option<T>) -> Self {
        target.map_or(AttachTarget::None, Into::into)
    }
}

impl std::fmt::Debug for AttachTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachTarget::None => f.write_str("None"),
            AttachTarget::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            AttachTarget::Element(element) => f.debug_tuple("Element").field(&element.kind()).finish(),
        }
    }
}

struct TrackInner {
    id: String,
    kind: TrackKind,
    native: NativeTrackRef,
    signaling: TrackSignaling,
    document: Rc<dyn Document>,
    streams: Rc<dyn MediaStreamFactory>,
    phase: Cell<TrackState>,
    started: Cell<bool>,
    ended: Cell<bool>,
    enabled: Cell<bool>,
    dimensions: Cell<Option<VideoDimensions>>,
    attachments: RefCell<Attachments>,
    render_element: RefCell<Option<ElementRef>>,
    ended_listener: Cell<Option<ListenerHandle>>,
    emitter: Emitter,
}

impl Drop for TrackInner {
    fn drop(&mut self) {
        if let Some(handle) = self.ended_listener.take() {
            self.native.remove_ended_listener(handle);
        }
    }
}

/// Media track bound to renderable elements.
///
/// Cheap to clone; clones share state. Two handles refer to the same track
/// when [`Track::ptr_eq`] says so, and event handlers receive the emitting
/// track itself.
#[derive(Clone)]
pub struct Track {
    inner: Rc<TrackInner>,
}

/// Weak handle used by native callbacks so they never keep a track alive
#[derive(Clone)]
pub(crate) struct WeakTrack(Weak<TrackInner>);

impl WeakTrack {
    pub(crate) fn upgrade(&self) -> Option<Track> {
        self.0.upgrade().map(|inner| Track { inner })
    }
}

impl Track {
    /// Build a track and run its initialization strategy once.
    ///
    /// The descriptor must describe the same track as the native handle.
    pub fn new(
        native: NativeTrackRef,
        signaling: TrackSignaling,
        options: TrackOptions,
    ) -> TrackResult<Self> {
        if signaling.id() != native.id() {
            return Err(TrackError::SignalingMismatch {
                field: "id",
                expected: native.id().to_string(),
                actual: signaling.id().to_string(),
            });
        }
        if signaling.kind() != native.kind() {
            return Err(TrackError::SignalingMismatch {
                field: "kind",
                expected: native.kind().to_string(),
                actual: signaling.kind().to_string(),
            });
        }

        info!("🎚️ Creating {} track: {}", native.kind(), native.id());
        let track = Self {
            inner: Rc::new(TrackInner {
                id: native.id().to_string(),
                kind: native.kind(),
                enabled: Cell::new(signaling.is_enabled()),
                native,
                signaling,
                document: options.document().clone(),
                streams: options.streams().clone(),
                phase: Cell::new(TrackState::Created),
                started: Cell::new(false),
                ended: Cell::new(false),
                dimensions: Cell::new(None),
                attachments: RefCell::new(Attachments::default()),
                render_element: RefCell::new(None),
                ended_listener: Cell::new(None),
                emitter: Emitter::default(),
            }),
        };

        track.inner.phase.set(TrackState::Initializing);
        options.initializer().initialize(&track);
        track.inner.phase.set(TrackState::Idle);

        Ok(track)
    }

    /// Get track ID
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Get track kind
    pub fn kind(&self) -> TrackKind {
        self.inner.kind
    }

    /// The native track this adapter wraps
    pub fn native(&self) -> &NativeTrackRef {
        &self.inner.native
    }

    /// Descriptor the track was built with
    pub fn signaling(&self) -> &TrackSignaling {
        &self.inner.signaling
    }

    /// Whether the track has rendered at least once
    pub fn is_started(&self) -> bool {
        self.inner.started.get()
    }

    /// Whether the native track ended. Never reverts once true.
    pub fn is_stopped(&self) -> bool {
        self.inner.ended.get() || self.inner.native.ready_state() == ReadyState::Ended
    }

    /// Whether the track is enabled
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.get()
    }

    /// Rendered video size; always `None` for audio
    pub fn dimensions(&self) -> Option<VideoDimensions> {
        self.inner.dimensions.get()
    }

    /// Current lifecycle state
    pub fn state(&self) -> TrackState {
        if self.is_stopped() {
            TrackState::Stopped
        } else if self.is_started() {
            TrackState::Started
        } else {
            self.inner.phase.get()
        }
    }

    /// Whether both handles refer to the same track
    pub fn ptr_eq(&self, other: &Track) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Attach the track to an element.
    ///
    /// With no target a new element of the track's kind is created. A
    /// selector is resolved through the document and must match; it never
    /// creates an element. Returns the element the track now renders into.
    pub fn attach(&self, target: impl Into<AttachTarget>) -> TrackResult<ElementRef> {
        let element = match target.into() {
            AttachTarget::None => self.create_element(),
            AttachTarget::Selector(selector) => self
                .select_element(&selector)?
                .ok_or(TrackError::ElementNotFound { selector })?,
            AttachTarget::Element(element) => element,
        };
        Ok(self.attach_element(&element))
    }

    /// Detach the track from elements.
    ///
    /// With no target every attached element is detached. Returns the
    /// elements that were processed, attached or not.
    pub fn detach(&self, target: impl Into<AttachTarget>) -> TrackResult<Vec<ElementRef>> {
        let elements = match target.into() {
            AttachTarget::None => self.attached_elements(),
            AttachTarget::Selector(selector) => {
                let element = self
                    .select_element(&selector)?
                    .ok_or(TrackError::ElementNotFound { selector })?;
                vec![element]
            }
            AttachTarget::Element(element) => vec![element],
        };
        Ok(self.detach_elements(&elements))
    }

    /// Query the document for a single element
    pub fn select_element(&self, selector: &str) -> TrackResult<Option<ElementRef>> {
        Ok(self.inner.document.query_selector(selector)?)
    }

    /// Create a detached element matching the track's kind
    pub fn create_element(&self) -> ElementRef {
        self.inner.document.create_element(self.inner.kind)
    }

    /// Wire the native track into `element` and record the attachment.
    ///
    /// An element without a source container gets a new one. An existing
    /// container is reused after removing its tracks of this track's kind.
    pub fn attach_element(&self, element: &ElementRef) -> ElementRef {
        let stream = match element.src_object() {
            Some(stream) => {
                for existing in stream.tracks_of_kind(self.inner.kind) {
                    stream.remove_track(&existing);
                }
                stream
            }
            None => {
                let stream = self.inner.streams.create();
                element.set_src_object(Some(stream.clone()));
                stream
            }
        };
        stream.add_track(self.inner.native.clone());
        element.set_autoplay(true);

        if self.inner.attachments.borrow_mut().insert(element.clone()) {
            debug!("📎 Attached track {} to {} element", self.inner.id, element.kind());
        }
        element.clone()
    }

    /// Detach one element; a no-op when it is not attached
    pub fn detach_element(&self, element: &ElementRef) -> ElementRef {
        let removed = self.inner.attachments.borrow_mut().remove(element);
        if removed {
            element.remove_attribute("src");
            debug!("✂️ Detached track {} from {} element", self.inner.id, element.kind());
        }
        element.clone()
    }

    /// Detach each element in turn
    pub fn detach_elements(&self, elements: &[ElementRef]) -> Vec<ElementRef> {
        elements.iter().map(|e| self.detach_element(e)).collect()
    }

    /// Elements currently attached, in attachment order
    pub fn attached_elements(&self) -> Vec<ElementRef> {
        self.inner.attachments.borrow().snapshot()
    }

    /// Whether `element` is attached
    pub fn is_attached(&self, element: &ElementRef) -> bool {
        self.inner.attachments.borrow().contains(element)
    }

    /// Number of attached elements
    pub fn attachment_count(&self) -> usize {
        self.inner.attachments.borrow().len()
    }

    /// Register a handler for `kind`
    pub fn on(&self, kind: TrackEventKind, handler: impl Fn(&Track) + 'static) -> ListenerId {
        self.inner.emitter.add(kind, false, Rc::new(handler))
    }

    /// Register a handler that runs for the next `kind` event only
    pub fn once(&self, kind: TrackEventKind, handler: impl Fn(&Track) + 'static) -> ListenerId {
        self.inner.emitter.add(kind, true, Rc::new(handler))
    }

    /// Remove a handler; returns whether it was registered
    pub fn off(&self, id: ListenerId) -> bool {
        self.inner.emitter.remove(id)
    }

    /// Number of handlers registered for `kind`
    pub fn listener_count(&self, kind: TrackEventKind) -> usize {
        self.inner.emitter.listener_count(kind)
    }

    /// Async stream of every event emitted from now on
    pub fn events(&self) -> EventStream {
        self.inner.emitter.subscribe()
    }

    pub(crate) fn downgrade(&self) -> WeakTrack {
        WeakTrack(Rc::downgrade(&self.inner))
    }

    /// Swap the native "ended" listener, removing the previous one first.
    pub(crate) fn replace_ended_listener(&self, listener: Rc<dyn Fn()>) {
        if let Some(previous) = self.inner.ended_listener.take() {
            self.inner.native.remove_ended_listener(previous);
        }
        let handle = self.inner.native.add_ended_listener(listener);
        self.inner.ended_listener.set(Some(handle));
    }

    /// Internal element waiting for the first render-ready signal
    pub(crate) fn render_element(&self) -> Option<ElementRef> {
        self.inner.render_element.borrow().clone()
    }

    /// Track `element` as the internal render-ready element, releasing any previous one.
    pub(crate) fn replace_render_element(&self, element: ElementRef) {
        self.release_render_element();
        *self.inner.render_element.borrow_mut() = Some(element);
    }

    /// Silence and detach the internal render-ready element, if any.
    pub(crate) fn release_render_element(&self) -> Option<ElementRef> {
        let element = self.inner.render_element.borrow_mut().take()?;
        element.set_on_can_play(None);
        self.detach_element(&element);
        Some(element)
    }

    pub(crate) fn mark_started(&self, element: &ElementRef) {
        if let Some(dimensions) = element.video_dimensions() {
            self.update_dimensions(dimensions);
        }
        self.inner.started.set(true);
        info!("▶️ Track {} started", self.inner.id);
        self.emit(TrackEventKind::Started);
    }

    pub(crate) fn mark_stopped(&self) {
        self.inner.ended.set(true);
        info!("⏹️ Track {} stopped", self.inner.id);
        self.emit(TrackEventKind::Stopped);
    }

    /// Record a new enabled flag; emits only on change.
    pub(crate) fn update_enabled(&self, enabled: bool) -> bool {
        if self.inner.enabled.replace(enabled) == enabled {
            return false;
        }
        debug!("🔄 Track {} enabled changed to: {}", self.inner.id, enabled);
        self.emit(if enabled {
            TrackEventKind::Enabled
        } else {
            TrackEventKind::Disabled
        });
        true
    }

    fn update_dimensions(&self, dimensions: VideoDimensions) {
        if self.inner.kind != TrackKind::Video || self.inner.dimensions.get() == Some(dimensions) {
            return;
        }
        self.inner.dimensions.set(Some(dimensions));
        debug!(
            "📐 Track {} dimensions: {}x{}",
            self.inner.id, dimensions.width, dimensions.height
        );
        self.emit(TrackEventKind::DimensionsChanged);
    }

    fn emit(&self, kind: TrackEventKind) {
        self.inner.emitter.emit(kind, self);
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Track {}

impl std::fmt::Debug for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Track")
            .field("id", &self.inner.id)
            .field("kind", &self.inner.kind)
            .field("state", &self.state())
            .field("enabled", &self.inner.enabled.get())
            .field("attachments", &self.attachment_count())
            .finish()
    }
}

