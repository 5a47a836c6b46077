//! Event dispatch
//!
//! One dispatch walks the ancestor path root-to-target (capturing),
//! runs the target's listeners, then walks back up (bubbling). The path
//! is computed once at dispatch start; listener lists are read fresh at
//! each (node, phase) boundary, so registrations changed by a handler
//! take effect at boundaries not yet reached. Nodes destroyed mid-flight
//! are skipped, never an error.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use arbor_dom::{DomResult, DomTree, NodeId};

use crate::event::{EventRecord, HandlerFault, Phase};
use crate::registry::{PhaseFilter, SharedRegistry};
use crate::{ListenerId, ListenerOptions};

/// Context handed to every listener invocation
///
/// Gives the handler mutable tree access, the event flags, and the
/// ability to add or remove listeners mid-dispatch.
pub struct EventCtx<'a> {
    /// The tree the event is dispatched on; structural mutation here is
    /// allowed and will not corrupt the dispatch
    pub tree: &'a mut DomTree,
    event: &'a mut EventRecord,
    registry: SharedRegistry,
}

impl EventCtx<'_> {
    /// Read the in-flight event record
    pub fn event(&self) -> &EventRecord {
        self.event
    }

    /// The originating target node
    pub fn target(&self) -> NodeId {
        self.event.target()
    }

    /// Current dispatch phase
    pub fn phase(&self) -> Phase {
        self.event.phase()
    }

    /// Set the canceled flag; propagation continues
    pub fn prevent_default(&mut self) {
        self.event.prevent_default();
    }

    /// Halt traversal once the current node's remaining listeners finish
    pub fn stop_propagation(&mut self) {
        self.event.stop_propagation();
    }

    /// Halt everything immediately, current node included
    pub fn stop_immediate_propagation(&mut self) {
        self.event.stop_immediate_propagation();
    }

    /// Register a listener; takes effect at boundaries not yet reached
    pub fn add_listener<F>(
        &mut self,
        node: NodeId,
        event_type: &str,
        options: ListenerOptions,
        handler: F,
    ) -> ListenerId
    where
        F: FnMut(&mut EventCtx<'_>) -> Result<(), HandlerFault> + 'static,
    {
        self.registry
            .borrow_mut()
            .add(node, event_type, options, Rc::new(RefCell::new(handler)))
    }

    /// Deregister a listener; a listener removed at a boundary already
    /// snapshotted still runs there
    pub fn remove_listener(&mut self, node: NodeId, event_type: &str, id: ListenerId) -> bool {
        self.registry.borrow_mut().remove(node, event_type, id)
    }
}

/// Two-phase event dispatcher over one listener registry
///
/// Holds per-instance dispatch policy: which event types do not bubble,
/// and whether a listener fault halts the dispatch (default: recorded
/// and propagation continues).
#[derive(Default)]
pub struct EventDispatcher {
    registry: SharedRegistry,
    non_bubbling: HashSet<String>,
    fail_fast: bool,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an event type as non-bubbling: dispatch skips from the
    /// at-target phase straight to done
    pub fn set_non_bubbling(&mut self, event_type: &str) {
        self.non_bubbling.insert(event_type.to_string());
    }

    /// Opt into halting a dispatch on the first listener fault
    pub fn set_fail_fast(&mut self, fail_fast: bool) {
        self.fail_fast = fail_fast;
    }

    /// Register a listener on a node
    pub fn add_listener<F>(
        &mut self,
        node: NodeId,
        event_type: &str,
        options: ListenerOptions,
        handler: F,
    ) -> ListenerId
    where
        F: FnMut(&mut EventCtx<'_>) -> Result<(), HandlerFault> + 'static,
    {
        self.registry
            .borrow_mut()
            .add(node, event_type, options, Rc::new(RefCell::new(handler)))
    }

    /// Deregister a listener; `true` if it was registered
    pub fn remove_listener(&mut self, node: NodeId, event_type: &str, id: ListenerId) -> bool {
        self.registry.borrow_mut().remove(node, event_type, id)
    }

    /// Drop every listener registered on a node, typically after the
    /// node has been destroyed
    pub fn clear_listeners(&mut self, node: NodeId) {
        self.registry.borrow_mut().clear_node(node);
    }

    /// Number of listeners currently registered on a node
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.registry.borrow().count_node(node)
    }

    /// Dispatch an event at `target` and return the final record
    ///
    /// Fails with `NotFound` only if `target` is already stale when the
    /// dispatch starts. The ancestor path is fixed here; nodes destroyed
    /// by handlers mid-dispatch are skipped at their boundary.
    pub fn dispatch(
        &mut self,
        tree: &mut DomTree,
        target: NodeId,
        event_type: &str,
    ) -> DomResult<EventRecord> {
        tree.get(target)?;
        // nearest-first ancestor chain, reversed to root-first; the
        // target itself is not part of the capture/bubble path
        let mut path: Vec<NodeId> = tree.ancestors(target)?.collect();
        path.reverse();

        let mut event = EventRecord::new(event_type, target);
        tracing::debug!(%target, event_type, depth = path.len(), "dispatch");

        for &node in &path {
            self.run_boundary(tree, &mut event, node, PhaseFilter::Capture);
            if self.halted(&event) {
                return Ok(event);
            }
        }

        event.set_phase(Phase::AtTarget);
        self.run_boundary(tree, &mut event, target, PhaseFilter::All);
        if self.halted(&event) {
            return Ok(event);
        }

        if !self.non_bubbling.contains(event_type) {
            event.set_phase(Phase::Bubbling);
            for &node in path.iter().rev() {
                self.run_boundary(tree, &mut event, node, PhaseFilter::Bubble);
                if self.halted(&event) {
                    return Ok(event);
                }
            }
        }

        event.set_phase(Phase::Done);
        Ok(event)
    }

    fn halted(&self, event: &EventRecord) -> bool {
        event.propagation_stopped() || (self.fail_fast && event.failed_listeners() > 0)
    }

    /// Run every listener the (node, phase) boundary selects
    fn run_boundary(
        &mut self,
        tree: &mut DomTree,
        event: &mut EventRecord,
        node: NodeId,
        filter: PhaseFilter,
    ) {
        // a path node destroyed by an earlier handler: skip, don't fail.
        // Its id is never reused, so its registrations can go too.
        if !tree.contains(node) {
            self.registry.borrow_mut().clear_node(node);
            return;
        }
        let snapshot = self
            .registry
            .borrow()
            .snapshot(node, event.event_type(), filter);

        for listener in snapshot {
            // once-listeners come out of the registry before the call,
            // so a faulting handler is still deregistered
            if listener.once {
                self.registry
                    .borrow_mut()
                    .remove(node, event.event_type(), listener.id);
            }

            event.note_invocation();
            let result = {
                let mut ctx = EventCtx {
                    tree: &mut *tree,
                    event: &mut *event,
                    registry: Rc::clone(&self.registry),
                };
                let mut handler = listener.handler.borrow_mut();
                (&mut *handler)(&mut ctx)
            };
            if let Err(fault) = result {
                event.note_fault();
                tracing::warn!(%node, event_type = event.event_type(), %fault, "listener fault");
                if self.fail_fast {
                    return;
                }
            }

            if event.stopped_immediately() {
                return;
            }
        }
    }
}
