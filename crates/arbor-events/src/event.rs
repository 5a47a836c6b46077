//! Event records
//!
//! One record exists per dispatch. Handlers flip its flags through
//! [`EventCtx`](crate::EventCtx); after dispatch the caller branches on
//! the returned record.

use arbor_dom::NodeId;

/// A listener failure, recorded on the event without aborting dispatch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("listener fault: {0}")]
pub struct HandlerFault(pub String);

impl HandlerFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Dispatch phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Capturing,
    AtTarget,
    Bubbling,
    Done,
}

/// Per-dispatch state and outcome
#[derive(Debug, Clone)]
pub struct EventRecord {
    event_type: String,
    target: NodeId,
    phase: Phase,
    canceled: bool,
    stopped: bool,
    stopped_immediately: bool,
    invocations: u32,
    at_target_invocations: u32,
    failed_listeners: u32,
}

impl EventRecord {
    pub(crate) fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            phase: Phase::Capturing,
            canceled: false,
            stopped: false,
            stopped_immediately: false,
            invocations: 0,
            at_target_invocations: 0,
            failed_listeners: 0,
        }
    }

    /// The event type this dispatch carries
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The originating target node
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Current phase during dispatch; terminal phase afterwards (`Done`
    /// unless propagation was stopped or a fail-fast fault halted it)
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Mark the default action as canceled; does not affect propagation
    pub fn prevent_default(&mut self) {
        self.canceled = true;
    }

    /// Halt traversal after the current node's remaining listeners run
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// Halt everything, including remaining listeners at the current node
    pub fn stop_immediate_propagation(&mut self) {
        self.stopped = true;
        self.stopped_immediately = true;
    }

    /// Check the canceled flag
    pub fn canceled(&self) -> bool {
        self.canceled
    }

    /// Check whether any form of stop was requested
    pub fn propagation_stopped(&self) -> bool {
        self.stopped
    }

    /// Total listener invocations across all phases
    pub fn invocations(&self) -> u32 {
        self.invocations
    }

    /// Listener invocations during the at-target phase
    pub fn at_target_invocations(&self) -> u32 {
        self.at_target_invocations
    }

    /// Number of listeners that returned a fault
    pub fn failed_listeners(&self) -> u32 {
        self.failed_listeners
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn stopped_immediately(&self) -> bool {
        self.stopped_immediately
    }

    pub(crate) fn note_invocation(&mut self) {
        self.invocations += 1;
        if self.phase == Phase::AtTarget {
            self.at_target_invocations += 1;
        }
    }

    pub(crate) fn note_fault(&mut self) {
        self.failed_listeners += 1;
    }
}
