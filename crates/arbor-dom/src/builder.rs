//! Bulk tree ingestion
//!
//! The boundary a markup parser feeds: a pre-validated description of a
//! subtree is materialized through the ordinary create/link/set paths so
//! class derivation and mutation records behave exactly as for piecemeal
//! edits.

use crate::error::DomResult;
use crate::tree::DomTree;
use crate::NodeId;

/// Ordered description of one node and its subtree
#[derive(Debug, Clone)]
pub enum NodeDesc {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<NodeDesc>,
    },
    Text(String),
    Comment(String),
}

impl NodeDesc {
    /// Describe an element with no attributes or children
    pub fn element(tag: &str) -> Self {
        Self::Element {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Describe a text node
    pub fn text(content: &str) -> Self {
        Self::Text(content.to_string())
    }

    /// Describe a comment node
    pub fn comment(content: &str) -> Self {
        Self::Comment(content.to_string())
    }

    /// Add an attribute (element descriptions only; ignored otherwise)
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        if let Self::Element { attrs, .. } = &mut self {
            attrs.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Add a child description (element descriptions only; ignored otherwise)
    pub fn with_child(mut self, child: NodeDesc) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }
}

impl DomTree {
    /// Materialize a described subtree and return its (detached) root id
    pub fn build(&mut self, desc: &NodeDesc) -> DomResult<NodeId> {
        match desc {
            NodeDesc::Text(content) => Ok(self.create_text(content)),
            NodeDesc::Comment(content) => Ok(self.create_comment(content)),
            NodeDesc::Element { tag, attrs, children } => {
                let id = self.create_element(tag);
                for (name, value) in attrs {
                    self.set_attribute(id, name, value)?;
                }
                for child_desc in children {
                    let child = self.build(child_desc)?;
                    self.link_child(id, child, usize::MAX)?;
                }
                tracing::trace!(root = %id, "built subtree");
                Ok(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_subtree() {
        let mut tree = DomTree::new();
        let desc = NodeDesc::element("UL")
            .with_attr("class", "menu")
            .with_child(NodeDesc::element("li").with_child(NodeDesc::text("one")))
            .with_child(NodeDesc::element("li").with_child(NodeDesc::text("two")))
            .with_child(NodeDesc::comment("end of menu"));

        let root = tree.build(&desc).unwrap();
        let root_node = tree.get(root).unwrap();

        assert_eq!(root_node.tag(), Some("ul"));
        assert!(root_node.has_class("menu"));
        assert_eq!(root_node.children().len(), 3);
        assert_eq!(tree.parent(root).unwrap(), None);

        let first_li = root_node.children()[0];
        let text = tree.children(first_li).unwrap()[0];
        assert_eq!(tree.get(text).unwrap().text(), Some("one"));
    }
}
