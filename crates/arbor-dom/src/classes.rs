//! Class token handling
//!
//! The class set is derived state: the `class` attribute is the source of
//! truth, and token-level edits here rewrite the attribute so the two
//! never drift apart.

use crate::error::DomResult;
use crate::tree::DomTree;
use crate::NodeId;

/// Split a `class` attribute value into unique tokens, first occurrence
/// order preserved
pub(crate) fn parse_tokens(value: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in value.split_whitespace() {
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

impl DomTree {
    /// Check class membership (case-sensitive)
    pub fn has_class(&self, id: NodeId, token: &str) -> DomResult<bool> {
        Ok(self.get(id)?.has_class(token))
    }

    /// Add a class token if absent
    pub fn add_class(&mut self, id: NodeId, token: &str) -> DomResult<()> {
        if self.get(id)?.has_class(token) {
            return Ok(());
        }
        let mut tokens: Vec<String> = self.get(id)?.classes().to_vec();
        tokens.push(token.to_string());
        self.set_attribute(id, "class", &tokens.join(" "))
    }

    /// Remove a class token if present
    pub fn remove_class(&mut self, id: NodeId, token: &str) -> DomResult<()> {
        if !self.get(id)?.has_class(token) {
            return Ok(());
        }
        let tokens: Vec<String> = self
            .get(id)?
            .classes()
            .iter()
            .filter(|t| t.as_str() != token)
            .cloned()
            .collect();
        self.set_attribute(id, "class", &tokens.join(" "))
    }

    /// Toggle a class token, returning the new membership state
    pub fn toggle_class(&mut self, id: NodeId, token: &str) -> DomResult<bool> {
        if self.get(id)?.has_class(token) {
            self.remove_class(id, token)?;
            Ok(false)
        } else {
            self.add_class(id, token)?;
            Ok(true)
        }
    }
}
