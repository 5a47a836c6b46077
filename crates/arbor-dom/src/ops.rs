//! Convenience mutation layer
//!
//! The API application code is expected to use. Layered over the strict
//! link primitives in `tree.rs`, with re-parenting semantics: appending a
//! node that is attached elsewhere detaches it first as part of the same
//! operation. Cycle checks run before any unlink so a failed edit leaves
//! both trees untouched.

use crate::classes::parse_tokens;
use crate::error::{DomError, DomResult};
use crate::node::{Attribute, NodeData};
use crate::observer::MutationRecord;
use crate::tree::DomTree;
use crate::NodeId;

impl DomTree {
    /// Append `child` as the last child of `parent`, detaching it from
    /// its current parent first if needed
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.get(parent)?;
        if child == parent || self.is_ancestor(child, parent) {
            return Err(DomError::CycleDetected);
        }
        if let Some(old_parent) = self.get(child)?.parent() {
            self.unlink_child(old_parent, child)?;
        }
        self.link_child(parent, child, usize::MAX)
    }

    /// Insert `child` immediately before `reference` in `parent`'s child
    /// list, detaching `child` from its current parent first if needed
    ///
    /// Fails with `NotAChild` if `reference` is not currently a child of
    /// `parent` (or is `child` itself).
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> DomResult<()> {
        self.get(child)?;
        self.get(reference)?;
        if reference == child || !self.children(parent)?.contains(&reference) {
            return Err(DomError::NotAChild);
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(DomError::CycleDetected);
        }
        if let Some(old_parent) = self.get(child)?.parent() {
            self.unlink_child(old_parent, child)?;
        }
        // position looked up after the unlink: detaching a sibling shifts it
        let index = self
            .children(parent)?
            .iter()
            .position(|&c| c == reference)
            .ok_or(DomError::NotAChild)?;
        self.link_child(parent, child, index)
    }

    /// Put `new` in `old`'s position under `parent`; `old` becomes a
    /// detached root, not destroyed
    pub fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> DomResult<()> {
        self.get(new)?;
        if !self.children(parent)?.contains(&old) {
            return Err(DomError::NotAChild);
        }
        if new == old {
            return Ok(());
        }
        if new == parent || self.is_ancestor(new, parent) {
            return Err(DomError::CycleDetected);
        }
        if let Some(old_parent) = self.get(new)?.parent() {
            self.unlink_child(old_parent, new)?;
        }
        let index = self
            .children(parent)?
            .iter()
            .position(|&c| c == old)
            .ok_or(DomError::NotAChild)?;
        self.unlink_child(parent, old)?;
        self.link_child(parent, new, index)
    }

    /// Detach a node from its parent without destroying it; the subtree
    /// stays valid as a new root. No-op on an already-detached node.
    pub fn remove(&mut self, id: NodeId) -> DomResult<()> {
        match self.get(id)?.parent() {
            Some(parent) => self.unlink_child(parent, id),
            None => Ok(()),
        }
    }

    /// Set an attribute on an element; setting `class` recomputes the
    /// derived class token set before returning
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let node = self.get_mut(id)?;
        let NodeData::Element { attrs, classes, .. } = &mut node.data else {
            return Err(DomError::WrongKind);
        };

        let old_value = match attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => Some(std::mem::replace(&mut attr.value, value.to_string())),
            None => {
                attrs.push(Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                });
                None
            }
        };
        if name == "class" {
            *classes = parse_tokens(value);
        }

        self.emit(MutationRecord::attribute_changed(
            id,
            name,
            old_value,
            Some(value.to_string()),
        ));
        Ok(())
    }

    /// Remove an attribute from an element; removing `class` empties the
    /// derived class token set. No-op if the attribute is absent.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<()> {
        let node = self.get_mut(id)?;
        let NodeData::Element { attrs, classes, .. } = &mut node.data else {
            return Err(DomError::WrongKind);
        };

        let Some(pos) = attrs.iter().position(|a| a.name == name) else {
            return Ok(());
        };
        let old = attrs.remove(pos);
        if name == "class" {
            classes.clear();
        }

        self.emit(MutationRecord::attribute_changed(
            id,
            name,
            Some(old.value),
            None,
        ));
        Ok(())
    }

    /// Replace the payload of a text or comment node
    pub fn set_text(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        let node = self.get_mut(id)?;
        let old_value = match &mut node.data {
            NodeData::Text(t) | NodeData::Comment(t) => {
                std::mem::replace(t, value.to_string())
            }
            NodeData::Element { .. } => return Err(DomError::WrongKind),
        };

        self.emit(MutationRecord::text_changed(id, old_value, value.to_string()));
        Ok(())
    }
}
