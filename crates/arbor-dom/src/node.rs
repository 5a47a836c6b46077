//! Node records
//!
//! A node is a parent back-pointer, an ordered child list, and a
//! kind-specific payload. Parent links are plain id values (weak); the
//! child list is the sole ownership edge.

use crate::NodeId;

/// Node kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Element,
    Text,
    Comment,
}

/// A single attribute; order of appearance is preserved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Kind-specific node payload
#[derive(Debug)]
pub enum NodeData {
    /// Element with a lowercased tag, ordered attributes, and the class
    /// token set derived from the `class` attribute
    Element {
        tag: String,
        attrs: Vec<Attribute>,
        classes: Vec<String>,
    },
    /// Text content
    Text(String),
    /// Comment content
    Comment(String),
}

/// Node record stored in the tree arena
#[derive(Debug)]
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
}

impl Node {
    /// Create a detached element node; the tag is lowercased so tag
    /// comparisons stay case-insensitive
    pub(crate) fn element(tag: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element {
                tag: tag.to_ascii_lowercase(),
                attrs: Vec::new(),
                classes: Vec::new(),
            },
        }
    }

    /// Create a detached text node
    pub(crate) fn text_node(content: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Text(content.to_string()),
        }
    }

    /// Create a detached comment node
    pub(crate) fn comment(content: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Comment(content.to_string()),
        }
    }

    /// Parent id, if attached
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in sibling order
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Kind tag
    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Element { .. } => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment(_) => NodeKind::Comment,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element { .. })
    }

    /// Lowercased tag name, if this is an element
    pub fn tag(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Text payload, if this is a text or comment node
    pub fn text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) | NodeData::Comment(t) => Some(t),
            _ => None,
        }
    }

    /// Attribute value lookup (names are exact-match, values case-sensitive)
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match &self.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> &[Attribute] {
        match &self.data {
            NodeData::Element { attrs, .. } => attrs,
            _ => &[],
        }
    }

    /// Class tokens derived from the `class` attribute
    pub fn classes(&self) -> &[String] {
        match &self.data {
            NodeData::Element { classes, .. } => classes,
            _ => &[],
        }
    }

    /// Check class-token membership (case-sensitive)
    pub fn has_class(&self, token: &str) -> bool {
        self.classes().iter().any(|c| c == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_tag_lowercased() {
        let node = Node::element("DIV");
        assert_eq!(node.tag(), Some("div"));
        assert_eq!(node.kind(), NodeKind::Element);
    }

    #[test]
    fn test_text_node_payload() {
        let node = Node::text_node("hello");
        assert_eq!(node.text(), Some("hello"));
        assert_eq!(node.tag(), None);
        assert!(node.attributes().is_empty());
    }
}
