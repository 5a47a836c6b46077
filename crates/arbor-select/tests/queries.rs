//! Query-surface tests for arbor-select
//!
//! Traversal order, the match/query round-trip, and snapshot behavior
//! when the tree changes after a query.

use arbor_dom::{DomError, DomTree, NodeDesc, NodeId};
use arbor_select::{matches, query_all, query_first, Pattern};

fn nested_list() -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let root = tree
        .build(
            &NodeDesc::element("div")
                .with_child(
                    NodeDesc::element("ul").with_child(
                        NodeDesc::element("li")
                            .with_attr("class", "item first")
                            .with_child(NodeDesc::element("span").with_attr("class", "item")),
                    ),
                )
                .with_child(NodeDesc::element("p").with_attr("class", "item")),
        )
        .unwrap();
    (tree, root)
}

#[test]
fn test_query_all_preorder() {
    let (tree, root) = nested_list();
    let pattern = Pattern::parse(".item").unwrap();

    let found = query_all(&tree, root, &pattern).unwrap();
    assert_eq!(found.len(), 3);

    // pre-order: the li comes before the span nested inside it, and both
    // before the later p sibling
    let tags: Vec<&str> = found
        .iter()
        .map(|&id| tree.get(id).unwrap().tag().unwrap())
        .collect();
    assert_eq!(tags, vec!["li", "span", "p"]);
}

#[test]
fn test_query_first_is_first_of_query_all() {
    let (tree, root) = nested_list();
    let pattern = Pattern::parse(".item").unwrap();

    let first = query_first(&tree, root, &pattern).unwrap();
    let all = query_all(&tree, root, &pattern).unwrap();
    assert_eq!(first, all.first().copied());
}

#[test]
fn test_query_all_round_trip() {
    let (tree, root) = nested_list();
    for text in ["li", ".item", "ul .item", "ul > li", "div span"] {
        let pattern = Pattern::parse(text).unwrap();
        for id in query_all(&tree, root, &pattern).unwrap() {
            assert!(
                matches(&tree, id, &pattern).unwrap(),
                "query_all result must satisfy matches() for `{text}`"
            );
        }
    }
}

#[test]
fn test_snapshot_survives_mutation() {
    let (mut tree, root) = nested_list();
    let pattern = Pattern::parse(".item").unwrap();

    let snapshot = query_all(&tree, root, &pattern).unwrap();
    assert_eq!(snapshot.len(), 3);

    // destroy one matched subtree, then walk the stale snapshot: stale
    // ids fail with NotFound, nothing crashes
    tree.destroy_subtree(snapshot[0]).unwrap();

    let mut live = 0;
    let mut stale = 0;
    for id in snapshot {
        match tree.get(id) {
            Ok(_) => live += 1,
            Err(DomError::NotFound) => stale += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    // the li and its nested span died together
    assert_eq!((live, stale), (1, 2));
}

#[test]
fn test_matches_on_detached_subtree() {
    let (mut tree, root) = nested_list();
    let pattern = Pattern::parse("div .item").unwrap();
    let li = query_first(&tree, root, &pattern).unwrap().unwrap();

    // detaching the ul breaks the ancestor relation to the div
    let ul = tree.parent(li).unwrap().unwrap();
    tree.remove(ul).unwrap();

    assert!(!matches(&tree, li, &pattern).unwrap());
    assert!(matches(&tree, li, &Pattern::parse("ul .item").unwrap()).unwrap());
}
