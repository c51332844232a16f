use std::ops::Range;

use ndn_name::{Component, Name};

use super::MatcherId;

/// What a capturing node recorded on its most recent match call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Capture {
    /// Back reference: a range of the input name.
    Span(Range<usize>),
    /// Pseudo matcher: one component built from a component regex group.
    Value(Component),
}

/// Capture slots of one match attempt, indexed by [`MatcherId`].
///
/// A slot only changes when its own node is matched: a group is cleared when it is called and
/// set when that call succeeds. Backtracking past a node does not restore its old slot, so a
/// group that is not on the final path keeps whatever its last call left behind.
#[derive(Debug)]
pub(crate) struct Slots {
    slots: Vec<Option<Capture>>,
}

impl Slots {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn set(&mut self, id: MatcherId, capture: Capture) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            *slot = Some(capture);
        }
    }

    pub fn clear(&mut self, id: MatcherId) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            *slot = None;
        }
    }

    pub fn get(&self, id: MatcherId) -> Option<&Capture> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// The components captured by `id`, or nothing if its last call did not succeed.
    pub fn resolve(&self, id: MatcherId, name: &Name) -> Vec<Component> {
        match self.get(id) {
            Some(Capture::Span(span)) => name
                .components()
                .get(span.clone())
                .map(<[Component]>::to_vec)
                .unwrap_or_default(),
            Some(Capture::Value(component)) => vec![component.clone()],
            None => Vec::new(),
        }
    }
}
