//! Construction options for tracks

use crate::initializer::{RenderReadyInitializer, TrackInitializer};
use std::rc::Rc;
use trackbind_core::{Document, MediaStreamFactory};

/// Host capabilities and strategies a track is built with
#[derive(Clone)]
pub struct TrackOptions {
    document: Rc<dyn Document>,
    streams: Rc<dyn MediaStreamFactory>,
    initializer: Rc<dyn TrackInitializer>,
}

impl TrackOptions {
    /// Options using the default [`RenderReadyInitializer`]
    pub fn new(document: Rc<dyn Document>, streams: Rc<dyn MediaStreamFactory>) -> Self {
        Self {
            document,
            streams,
            initializer: Rc::new(RenderReadyInitializer),
        }
    }

    /// Replace the initialization strategy
    pub fn with_initializer(mut self, initializer: Rc<dyn TrackInitializer>) -> Self {
        self.initializer = initializer;
        self
    }

    /// Document used for element creation and lookup
    pub fn document(&self) -> &Rc<dyn Document> {
        &self.document
    }

    /// Stream container constructor
    pub fn streams(&self) -> &Rc<dyn MediaStreamFactory> {
        &self.streams
    }

    /// Initialization strategy
    pub fn initializer(&self) -> &Rc<dyn TrackInitializer> {
        &self.initializer
    }
}

impl std::fmt::Debug for TrackOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackOptions").finish_non_exhaustive()
    }
}
