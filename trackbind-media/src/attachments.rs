//! Identity-keyed set of attached elements

use trackbind_core::{same_object, ElementRef};

/// Elements currently wired to a track, in attachment order.
///
/// Membership is pointer identity: two distinct elements that look alike are
/// both kept, the same element is never kept twice.
#[derive(Default)]
pub(crate) struct Attachments {
    elements: Vec<ElementRef>,
}

impl Attachments {
    pub(crate) fn insert(&mut self, element: ElementRef) -> bool {
        if self.contains(&element) {
            return false;
        }
        self.elements.push(element);
        true
    }

    pub(crate) fn remove(&mut self, element: &ElementRef) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| !same_object(e, element));
        self.elements.len() != before
    }

    pub(crate) fn contains(&self, element: &ElementRef) -> bool {
        self.elements.iter().any(|e| same_object(e, element))
    }

    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn snapshot(&self) -> Vec<ElementRef> {
        self.elements.clone()
    }
}
