//! Cross-module tests for arbor-dom
//!
//! Structural invariants, destroy semantics, and mutation records
//! exercised through the public surface only.

use arbor_dom::{DomError, DomTree, MutationOp, MutationRecord, NodeDesc, NodeId};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_link_positions_and_parent() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    let a = tree.create_element("a");
    let b = tree.create_element("b");
    let c = tree.create_element("c");

    tree.link_child(parent, a, 0).unwrap();
    tree.link_child(parent, b, 1).unwrap();
    // index beyond the end clamps to the end
    tree.link_child(parent, c, 42).unwrap();

    assert_eq!(tree.children(parent).unwrap(), &[a, b, c]);
    for child in [a, b, c] {
        assert_eq!(tree.parent(child).unwrap(), Some(parent));
    }
}

#[test]
fn test_cycle_attempt_leaves_tree_intact() {
    let mut tree = DomTree::new();
    let a = tree.create_element("div");
    let b = tree.create_element("div");
    tree.link_child(a, b, 0).unwrap();

    assert_eq!(tree.link_child(b, a, 0), Err(DomError::CycleDetected));

    assert_eq!(tree.children(a).unwrap(), &[b]);
    assert_eq!(tree.children(b).unwrap(), &[] as &[NodeId]);
    assert_eq!(tree.parent(a).unwrap(), None);
    assert_eq!(tree.parent(b).unwrap(), Some(a));
}

#[test]
fn test_destroy_subtree_invalidates_every_id() {
    let mut tree = DomTree::new();
    let root = tree.build(
        &NodeDesc::element("div")
            .with_child(NodeDesc::element("p").with_child(NodeDesc::text("hi")))
            .with_child(NodeDesc::element("span")),
    )
    .unwrap();
    let doomed: Vec<NodeId> = tree.descendants(root).unwrap().collect();
    assert_eq!(doomed.len(), 4);

    tree.destroy_subtree(root).unwrap();

    for id in doomed {
        assert_eq!(tree.get(id).err(), Some(DomError::NotFound));
        assert_eq!(tree.parent(id).err(), Some(DomError::NotFound));
        assert_eq!(tree.children(id).err(), Some(DomError::NotFound));
    }
    assert!(tree.is_empty());
}

#[test]
fn test_reparent_idempotence() {
    let mut tree = DomTree::new();
    let p1 = tree.create_element("div");
    let p2 = tree.create_element("div");
    let c = tree.create_element("span");

    tree.append(p1, c).unwrap();
    tree.append(p2, c).unwrap();
    tree.append(p2, c).unwrap();

    assert_eq!(tree.parent(c).unwrap(), Some(p2));
    assert_eq!(tree.children(p2).unwrap(), &[c]);
    assert!(!tree.children(p1).unwrap().contains(&c));
}

#[test]
fn test_mutation_records_full_history() {
    let mut tree = DomTree::new();
    let records: Rc<RefCell<Vec<MutationRecord>>> = Rc::default();
    let sink = Rc::clone(&records);
    tree.set_observer(move |record| sink.borrow_mut().push(record.clone()));

    let parent = tree.create_element("div");
    let text = tree.create_text("old");
    tree.append(parent, text).unwrap();
    tree.set_attribute(parent, "id", "main").unwrap();
    tree.set_text(text, "new").unwrap();
    tree.remove(text).unwrap();

    let records = records.borrow();
    let ops: Vec<MutationOp> = records.iter().map(|r| r.op).collect();
    assert_eq!(
        ops,
        vec![
            MutationOp::Insert,
            MutationOp::AttributeChange,
            MutationOp::TextChange,
            MutationOp::Remove,
        ]
    );

    assert_eq!(records[0].node, text);
    assert_eq!(records[0].parent, Some(parent));
    assert_eq!(records[1].attribute.as_deref(), Some("id"));
    assert_eq!(records[1].new_value.as_deref(), Some("main"));
    assert_eq!(records[2].old_value.as_deref(), Some("old"));
    assert_eq!(records[2].new_value.as_deref(), Some("new"));
    assert_eq!(records[3].parent, Some(parent));
}

#[test]
fn test_destroy_detached_root_notifies_observer() {
    let mut tree = DomTree::new();
    let root = tree.create_element("div");
    let child = tree.create_element("p");
    tree.append(root, child).unwrap();

    let records: Rc<RefCell<Vec<MutationRecord>>> = Rc::default();
    let sink = Rc::clone(&records);
    tree.set_observer(move |record| sink.borrow_mut().push(record.clone()));

    // root has no parent to unlink from, but its destruction must still
    // reach the observer
    tree.destroy_subtree(root).unwrap();

    let records = records.borrow();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].op, MutationOp::Remove);
    assert_eq!(records[0].node, root);
    assert_eq!(records[0].parent, None);
}

#[test]
fn test_observer_can_be_cleared() {
    let mut tree = DomTree::new();
    let count: Rc<RefCell<usize>> = Rc::default();
    let sink = Rc::clone(&count);
    tree.set_observer(move |_| *sink.borrow_mut() += 1);

    let parent = tree.create_element("div");
    let child = tree.create_element("p");
    tree.append(parent, child).unwrap();
    assert_eq!(*count.borrow(), 1);

    tree.clear_observer();
    tree.remove(child).unwrap();
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_forest_of_independent_roots() {
    let mut tree = DomTree::new();
    let r1 = tree.create_element("div");
    let r2 = tree.create_element("div");
    let c = tree.create_element("span");
    tree.append(r1, c).unwrap();

    // r2 stays a root, untouched by edits under r1
    tree.remove(c).unwrap();
    assert_eq!(tree.parent(r2).unwrap(), None);
    assert_eq!(tree.parent(c).unwrap(), None);

    // a detached subtree can move between roots
    tree.append(r2, c).unwrap();
    assert_eq!(tree.parent(c).unwrap(), Some(r2));
}
