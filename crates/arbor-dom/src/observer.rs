//! Mutation observation
//!
//! Each tree carries one optional observer callback which receives a
//! record per structural or content change. Single-slot by design: the
//! consuming layer (renderer, accessibility) multiplexes if it needs to.

use crate::NodeId;

/// Observer callback type
pub(crate) type ObserverFn = Box<dyn FnMut(&MutationRecord)>;

/// Kind of change a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    Insert,
    Remove,
    AttributeChange,
    TextChange,
}

/// Description of a single change, emitted after the change is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub op: MutationOp,
    /// The node the change applies to
    pub node: NodeId,
    /// Parent involved in a structural change
    pub parent: Option<NodeId>,
    /// Attribute name for `AttributeChange`
    pub attribute: Option<String>,
    /// Previous attribute/text value, if there was one
    pub old_value: Option<String>,
    /// New attribute/text value; `None` means removed
    pub new_value: Option<String>,
}

impl MutationRecord {
    pub(crate) fn inserted(node: NodeId, parent: NodeId) -> Self {
        Self {
            op: MutationOp::Insert,
            node,
            parent: Some(parent),
            attribute: None,
            old_value: None,
            new_value: None,
        }
    }

    pub(crate) fn removed(node: NodeId, parent: NodeId) -> Self {
        Self {
            op: MutationOp::Remove,
            node,
            parent: Some(parent),
            attribute: None,
            old_value: None,
            new_value: None,
        }
    }

    /// Destruction of a root that had no parent to be unlinked from
    pub(crate) fn destroyed(node: NodeId) -> Self {
        Self {
            op: MutationOp::Remove,
            node,
            parent: None,
            attribute: None,
            old_value: None,
            new_value: None,
        }
    }

    pub(crate) fn attribute_changed(
        node: NodeId,
        name: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        Self {
            op: MutationOp::AttributeChange,
            node,
            parent: None,
            attribute: Some(name.to_string()),
            old_value,
            new_value,
        }
    }

    pub(crate) fn text_changed(node: NodeId, old_value: String, new_value: String) -> Self {
        Self {
            op: MutationOp::TextChange,
            node,
            parent: None,
            attribute: None,
            old_value: Some(old_value),
            new_value: Some(new_value),
        }
    }
}
