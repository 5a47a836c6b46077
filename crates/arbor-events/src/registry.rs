//! Listener registry
//!
//! Listeners live in a per-node, per-event-type ordered list, resolved
//! fresh at each (node, phase) boundary during dispatch. Registration
//! hands back a [`ListenerId`] so removal never has to compare handler
//! identities.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use arbor_dom::NodeId;

use crate::dispatch::EventCtx;
use crate::event::HandlerFault;

/// Opaque handle to one registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registration options
#[derive(Debug, Clone, Copy, Default)]
pub struct ListenerOptions {
    /// Fire during the capturing phase instead of bubbling
    pub capture: bool,
    /// Deregister automatically after the first invocation
    pub once: bool,
}

pub(crate) type HandlerFn = dyn FnMut(&mut EventCtx<'_>) -> Result<(), HandlerFault>;

#[derive(Clone)]
pub(crate) struct Listener {
    pub(crate) id: ListenerId,
    pub(crate) capture: bool,
    pub(crate) once: bool,
    pub(crate) handler: Rc<RefCell<HandlerFn>>,
}

/// Which registrations a dispatch boundary selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PhaseFilter {
    Capture,
    Bubble,
    /// At-target: every registration regardless of declared phase
    All,
}

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    entries: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

pub(crate) type SharedRegistry = Rc<RefCell<ListenerRegistry>>;

impl ListenerRegistry {
    pub(crate) fn add(
        &mut self,
        node: NodeId,
        event_type: &str,
        options: ListenerOptions,
        handler: Rc<RefCell<HandlerFn>>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries
            .entry(node)
            .or_default()
            .entry(event_type.to_string())
            .or_default()
            .push(Listener {
                id,
                capture: options.capture,
                once: options.once,
                handler,
            });
        id
    }

    /// Remove one registration; `true` if it was present
    pub(crate) fn remove(&mut self, node: NodeId, event_type: &str, id: ListenerId) -> bool {
        let Some(listeners) = self
            .entries
            .get_mut(&node)
            .and_then(|by_type| by_type.get_mut(event_type))
        else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        listeners.len() < before
    }

    /// Drop every registration for a node, all event types
    pub(crate) fn clear_node(&mut self, node: NodeId) {
        self.entries.remove(&node);
    }

    /// Number of registrations on a node across all event types
    pub(crate) fn count_node(&self, node: NodeId) -> usize {
        self.entries
            .get(&node)
            .map(|by_type| by_type.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Clone the registrations a boundary will run, in registration order
    pub(crate) fn snapshot(
        &self,
        node: NodeId,
        event_type: &str,
        filter: PhaseFilter,
    ) -> Vec<Listener> {
        self.entries
            .get(&node)
            .and_then(|by_type| by_type.get(event_type))
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|l| match filter {
                        PhaseFilter::Capture => l.capture,
                        PhaseFilter::Bubble => !l.capture,
                        PhaseFilter::All => true,
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
