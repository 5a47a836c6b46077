//! Arbor DOM - hierarchical node tree
//!
//! Arena-based tree of element/text/comment nodes with structural
//! mutation, attribute handling, and mutation observation. Each
//! [`DomTree`] is an independent instance owned by its creator; there is
//! no global tree.

mod builder;
mod classes;
mod error;
mod node;
mod observer;
mod ops;
mod tree;

pub use builder::NodeDesc;
pub use error::{DomError, DomResult};
pub use node::{Attribute, Node, NodeData, NodeKind};
pub use observer::{MutationOp, MutationRecord};
pub use tree::{Ancestors, Descendants, DomTree};

/// Node identifier (index into the tree's arena).
///
/// Ids are never reused: once a node is destroyed its id stays invalid
/// for the lifetime of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
