//! Track lifecycle events
//!
//! Events are delivered two ways: synchronously to handlers registered with
//! [`Track::on`](crate::Track::on), in registration order, and to any number
//! of [`EventStream`]s for async consumers.

use crate::track::Track;
use std::cell::{Cell, RefCell};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Kinds of events a track emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackEventKind {
    /// First render-ready moment
    Started,
    /// Native track ended
    Stopped,
    /// Track became enabled
    Enabled,
    /// Track became disabled
    Disabled,
    /// Rendered video size changed
    DimensionsChanged,
}

/// Event carrying the track that emitted it
#[derive(Debug, Clone)]
pub enum TrackEvent {
    /// The track started rendering
    Started {
        /// The track
        track: Track,
    },
    /// The track stopped
    Stopped {
        /// The track
        track: Track,
    },
    /// The track was enabled
    Enabled {
        /// The track
        track: Track,
    },
    /// The track was disabled
    Disabled {
        /// The track
        track: Track,
    },
    /// The track's video dimensions changed
    DimensionsChanged {
        /// The track
        track: Track,
    },
}

impl TrackEvent {
    pub(crate) fn new(kind: TrackEventKind, track: Track) -> Self {
        match kind {
            TrackEventKind::Started => TrackEvent::Started { track },
            TrackEventKind::Stopped => TrackEvent::Stopped { track },
            TrackEventKind::Enabled => TrackEvent::Enabled { track },
            TrackEventKind::Disabled => TrackEvent::Disabled { track },
            TrackEventKind::DimensionsChanged => TrackEvent::DimensionsChanged { track },
        }
    }

    /// Kind of this event
    pub fn kind(&self) -> TrackEventKind {
        match self {
            TrackEvent::Started { .. } => TrackEventKind::Started,
            TrackEvent::Stopped { .. } => TrackEventKind::Stopped,
            TrackEvent::Enabled { .. } => TrackEventKind::Enabled,
            TrackEvent::Disabled { .. } => TrackEventKind::Disabled,
            TrackEvent::DimensionsChanged { .. } => TrackEventKind::DimensionsChanged,
        }
    }

    /// The track that emitted this event
    pub fn track(&self) -> &Track {
        match self {
            TrackEvent::Started { track }
            | TrackEvent::Stopped { track }
            | TrackEvent::Enabled { track }
            | TrackEvent::Disabled { track }
            | TrackEvent::DimensionsChanged { track } => track,
        }
    }

    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            TrackEvent::Started { .. } => "started",
            TrackEvent::Stopped { .. } => "stopped",
            TrackEvent::Enabled { .. } => "enabled",
            TrackEvent::Disabled { .. } => "disabled",
            TrackEvent::DimensionsChanged { .. } => "dimensionsChanged",
        }
    }
}

/// Identifies a registered handler for [`Track::off`](crate::Track::off)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Rc<dyn Fn(&Track)>;

struct Listener {
    id: ListenerId,
    kind: TrackEventKind,
    once: bool,
    handler: Handler,
}

/// Listener table and stream fan-out owned by a track
#[derive(Default)]
pub(crate) struct Emitter {
    listeners: RefCell<Vec<Listener>>,
    streams: RefCell<Vec<mpsc::UnboundedSender<TrackEvent>>>,
    next_id: Cell<u64>,
}

impl Emitter {
    pub(crate) fn add(&self, kind: TrackEventKind, once: bool, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            kind,
            once,
            handler,
        });
        id
    }

    pub(crate) fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        listeners.len() != before
    }

    pub(crate) fn listener_count(&self, kind: TrackEventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }

    pub(crate) fn subscribe(&self) -> EventStream {
        let (tx, rx) = mpsc::unbounded_channel();
        self.streams.borrow_mut().push(tx);
        EventStream::new(rx)
    }

    /// Run due handlers, then fan out to streams.
    ///
    /// The table is snapshotted first so handlers can re-enter the track.
    pub(crate) fn emit(&self, kind: TrackEventKind, track: &Track) {
        let due: Vec<Handler> = {
            let mut listeners = self.listeners.borrow_mut();
            let due = listeners
                .iter()
                .filter(|l| l.kind == kind)
                .map(|l| l.handler.clone())
                .collect();
            listeners.retain(|l| !(l.once && l.kind == kind));
            due
        };
        for handler in due {
            handler(track);
        }

        self.streams
            .borrow_mut()
            .retain(|tx| tx.send(TrackEvent::new(kind, track.clone())).is_ok());
    }
}

/// Stream of track events for async iteration
#[derive(Debug)]
pub struct EventStream {
    receiver: mpsc::UnboundedReceiver<TrackEvent>,
}

impl EventStream {
    fn new(receiver: mpsc::UnboundedReceiver<TrackEvent>) -> Self {
        Self { receiver }
    }

    /// Get the next event from the stream
    pub async fn next(&mut self) -> Option<TrackEvent> {
        self.receiver.recv().await
    }

    /// Try to get the next event without blocking
    pub fn try_next(&mut self) -> Result<Option<TrackEvent>, mpsc::error::TryRecvError> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => {
                Err(mpsc::error::TryRecvError::Disconnected)
            }
        }
    }

    /// Close the event stream
    pub fn close(&mut self) {
        self.receiver.close();
    }

    /// Check if the event stream is closed
    pub fn is_closed(&self) -> bool {
        self.receiver.is_closed()
    }
}

impl futures::Stream for EventStream {
    type Item = TrackEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
