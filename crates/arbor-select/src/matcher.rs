//! Pattern matching and tree queries
//!
//! Matching runs right to left: the subject compound is tested on the
//! candidate node, then ancestor constraints are resolved walking up the
//! parent chain, backtracking across ancestors for the descendant
//! combinator. Only element nodes can match.

use arbor_dom::{DomResult, DomTree, Node, NodeId};

use crate::pattern::{Combinator, Compound, Pattern, SimpleSelector};

/// Check whether a node satisfies a pattern
///
/// Pure: no side effects on the tree. Fails with `NotFound` only for a
/// stale id; a live node that doesn't satisfy the pattern is `Ok(false)`.
pub fn matches(tree: &DomTree, id: NodeId, pattern: &Pattern) -> DomResult<bool> {
    tree.get(id)?;
    Ok(node_matches(tree, id, pattern))
}

/// First match in pre-order depth-first traversal of `root`'s subtree
/// (root included), or `None`
pub fn query_first(tree: &DomTree, root: NodeId, pattern: &Pattern) -> DomResult<Option<NodeId>> {
    Ok(tree
        .descendants(root)?
        .find(|&id| node_matches(tree, id, pattern)))
}

/// All matches in pre-order depth-first traversal of `root`'s subtree
///
/// The result is a point-in-time id snapshot: matching happens against
/// the tree as it is now, and ids destroyed afterwards simply fail later
/// lookups with `NotFound`.
pub fn query_all(tree: &DomTree, root: NodeId, pattern: &Pattern) -> DomResult<Vec<NodeId>> {
    let found: Vec<NodeId> = tree
        .descendants(root)?
        .filter(|&id| node_matches(tree, id, pattern))
        .collect();
    tracing::trace!(%root, matches = found.len(), "query_all");
    Ok(found)
}

fn node_matches(tree: &DomTree, id: NodeId, pattern: &Pattern) -> bool {
    let Ok(node) = tree.get(id) else {
        return false;
    };
    compound_matches(node, pattern.subject())
        && ancestors_match(tree, id, pattern, pattern.compounds.len() - 1)
}

/// Resolve the constraints left of `index`, with `id` already matched
/// against `compounds[index]`
fn ancestors_match(tree: &DomTree, id: NodeId, pattern: &Pattern, index: usize) -> bool {
    if index == 0 {
        return true;
    }
    let compound = &pattern.compounds[index - 1];
    match pattern.combinators[index - 1] {
        Combinator::Child => {
            let Some(parent) = tree.get(id).ok().and_then(Node::parent) else {
                return false;
            };
            let Ok(parent_node) = tree.get(parent) else {
                return false;
            };
            compound_matches(parent_node, compound)
                && ancestors_match(tree, parent, pattern, index - 1)
        }
        Combinator::Descendant => {
            let Ok(chain) = tree.ancestors(id) else {
                return false;
            };
            chain.into_iter().any(|ancestor| {
                tree.get(ancestor)
                    .is_ok_and(|node| compound_matches(node, compound))
                    && ancestors_match(tree, ancestor, pattern, index - 1)
            })
        }
    }
}

fn compound_matches(node: &Node, compound: &Compound) -> bool {
    if !node.is_element() {
        return false;
    }
    compound.selectors.iter().all(|selector| match selector {
        SimpleSelector::Tag(tag) => node.tag() == Some(tag.as_str()),
        SimpleSelector::Class(token) => node.has_class(token),
        SimpleSelector::AttrPresent(name) => node.attribute(name).is_some(),
        SimpleSelector::AttrEq(name, value) => node.attribute(name) == Some(value.as_str()),
    })
}
