//! DOM tree (arena-based allocation)
//!
//! The arena is the sole owner of node records. Slots of destroyed nodes
//! are tombstoned and never reused, so a stale id keeps failing with
//! `NotFound` instead of silently aliasing a newer node.

use crate::error::{DomError, DomResult};
use crate::node::Node;
use crate::observer::{MutationRecord, ObserverFn};
use crate::NodeId;

/// Arena-based node tree
///
/// Holds a forest: any node without a parent is a root. Structural
/// invariants (unique parent, no cycles, consistent child membership)
/// hold after every public operation; violating edits fail atomically.
#[derive(Default)]
pub struct DomTree {
    nodes: Vec<Option<Node>>,
    observer: Option<ObserverFn>,
}

impl std::fmt::Debug for DomTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomTree")
            .field("slots", &self.nodes.len())
            .field("live", &self.len())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl DomTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element node with a fresh id
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Create a detached text node with a fresh id
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text_node(content))
    }

    /// Create a detached comment node with a fresh id
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.alloc(Node::comment(content))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        id
    }

    /// Check whether an id refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.index()), Some(Some(_)))
    }

    /// Get a node by id
    pub fn get(&self, id: NodeId) -> DomResult<&Node> {
        self.nodes
            .get(id.index())
            .and_then(|slot| slot.as_ref())
            .ok_or(DomError::NotFound)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .and_then(|slot| slot.as_mut())
            .ok_or(DomError::NotFound)
    }

    /// Parent of a node, or `None` if it is a root
    pub fn parent(&self, id: NodeId) -> DomResult<Option<NodeId>> {
        Ok(self.get(id)?.parent)
    }

    /// Children of a node in sibling order
    pub fn children(&self, id: NodeId) -> DomResult<&[NodeId]> {
        Ok(self.get(id)?.children())
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Check if the tree has no live nodes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walk from a node's parent up to its root
    pub fn ancestors(&self, id: NodeId) -> DomResult<Ancestors<'_>> {
        let start = self.get(id)?.parent;
        Ok(Ancestors { tree: self, next: start })
    }

    /// Check whether `a` is a proper ancestor of `b`
    pub fn is_ancestor(&self, a: NodeId, b: NodeId) -> bool {
        let mut cur = self.get(b).ok().and_then(Node::parent);
        while let Some(p) = cur {
            if p == a {
                return true;
            }
            cur = self.get(p).ok().and_then(Node::parent);
        }
        false
    }

    /// Pre-order depth-first walk of a subtree, root included
    pub fn descendants(&self, root: NodeId) -> DomResult<Descendants<'_>> {
        self.get(root)?;
        Ok(Descendants {
            tree: self,
            stack: vec![root],
        })
    }

    /// Strictly link `child` into `parent`'s child list at `index`
    /// (clamped to the list length)
    ///
    /// Fails with `AlreadyAttached` if the child has a parent (use the
    /// re-parenting [`append`](DomTree::append) for that) and with
    /// `CycleDetected` if the child is the parent or one of its
    /// ancestors. Failed attempts leave the tree untouched.
    pub fn link_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> DomResult<()> {
        self.get(parent)?;
        if self.get(child)?.parent.is_some() {
            return Err(DomError::AlreadyAttached);
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(DomError::CycleDetected);
        }

        let parent_node = self.get_mut(parent)?;
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, child);
        self.get_mut(child)?.parent = Some(parent);

        tracing::trace!(%parent, %child, index, "linked child");
        self.emit(MutationRecord::inserted(child, parent));
        Ok(())
    }

    /// Remove the `parent`/`child` link; the child becomes a detached root
    pub fn unlink_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.get(child)?;
        let pos = self
            .get(parent)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(DomError::NotAChild)?;

        self.get_mut(parent)?.children.remove(pos);
        self.get_mut(child)?.parent = None;

        tracing::trace!(%parent, %child, "unlinked child");
        self.emit(MutationRecord::removed(child, parent));
        Ok(())
    }

    /// Destroy a node and its whole subtree
    ///
    /// The node is unlinked from its parent first (if attached), then
    /// every id in the subtree becomes permanently invalid.
    pub fn destroy_subtree(&mut self, id: NodeId) -> DomResult<()> {
        let doomed: Vec<NodeId> = self.descendants(id)?.collect();
        match self.get(id)?.parent {
            Some(parent) => self.unlink_child(parent, id)?,
            // detached root: the observer still has to learn these ids died
            None => self.emit(MutationRecord::destroyed(id)),
        }
        for victim in &doomed {
            self.nodes[victim.index()] = None;
        }
        tracing::debug!(root = %id, count = doomed.len(), "destroyed subtree");
        Ok(())
    }

    /// Register the tree's single mutation observer, replacing any
    /// previous one
    pub fn set_observer(&mut self, observer: impl FnMut(&MutationRecord) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Drop the mutation observer, if any
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub(crate) fn emit(&mut self, record: MutationRecord) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&record);
        }
    }
}

/// Iterator over a node's ancestor chain, nearest first
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.get(current).ok().and_then(Node::parent);
        Some(current)
    }
}

/// Pre-order depth-first iterator, children in sibling order
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        if let Ok(node) = self.tree.get(current) {
            self.stack.extend(node.children().iter().rev());
        }
        Some(current)
    }
}
