//! Tests for nodes with unique sibling values.

mod common;

use listree::{unique_tree_node, InvalidElement, TreeError, UniqueTreeNode};

use common::{assert_consistent, child_values, init_logging};

/// The error for a value that a sibling already carries.
const DUPLICATE: TreeError = TreeError::InvalidElement(InvalidElement::DuplicateValue);

//  root
//  |-- a
//  |-- b
//  `-- c
fn sample_tree() -> UniqueTreeNode<&'static str> {
    unique_tree_node! {
        "root", [
            ("a", []),
            ("b", []),
            ("c", []),
        ]
    }
}

#[test]
fn duplicate_add_is_rejected_until_removed() {
    init_logging();
    let root = sample_tree();
    let dup = UniqueTreeNode::new("b");
    assert_eq!(root.add_last(dup.clone()), Err(DUPLICATE));
    assert!(dup.is_root());
    assert_eq!(root.len(), 3);

    root.remove_value(&"b").expect("a child carries `b`");
    root.add_last(dup.clone()).expect("`b` is free again");
    assert_eq!(child_values(&root), ["a", "c", "b"]);
    assert_consistent(&root);
}

#[test]
fn same_value_under_different_parents() {
    let root = sample_tree();
    let a = root.first_child().expect("root has children");
    a.add_last(UniqueTreeNode::new("b"))
        .expect("uniqueness is per child list");
    assert_eq!(a.len(), 1);
}

#[test]
fn empty_value_counts_once() {
    let root = sample_tree();
    root.add_last(UniqueTreeNode::empty()).expect("no empty child yet");
    assert_eq!(root.add_last(UniqueTreeNode::empty()), Err(DUPLICATE));
    assert!(root.contains_value(None));
    assert!(root.policy().holds_empty());
    assert_eq!(root.policy().len(), 4);
}

#[test]
fn batch_rejects_duplicates_inside_and_outside() {
    let root = sample_tree();
    let batch = ["x", "x"].map(UniqueTreeNode::new);
    assert_eq!(
        root.add_many_at(0, batch),
        Err(TreeError::InvalidElement(InvalidElement::DuplicateInBatch))
    );
    let batch = ["x", "a"].map(UniqueTreeNode::new);
    assert_eq!(root.add_many_at(0, batch), Err(DUPLICATE));
    assert_eq!(child_values(&root), ["a", "b", "c"]);
    assert!(!root.contains_value(&"x"));

    let batch = ["x", "y"].map(UniqueTreeNode::new);
    root.add_many_at(1, batch).expect("distinct new values");
    assert_eq!(child_values(&root), ["a", "x", "y", "b", "c"]);
    assert_consistent(&root);
}

#[test]
fn policy_follows_removal_and_moves_between_parents() {
    let root = sample_tree();
    let other = UniqueTreeNode::new("other");
    let b = root.child(1).expect("root has three children");

    other.add_last(b.clone()).expect("`other` has no `b` yet");
    assert!(!root.contains_value(&"b"));
    assert!(other.contains_value(&"b"));

    let cleared = root.clear();
    assert_eq!(cleared.len(), 2);
    assert!(root.policy().is_empty());
    root.add_last(UniqueTreeNode::new("a"))
        .expect("the cleared values are free again");
}

#[test]
fn replace_keeps_policy_in_step() {
    let root = sample_tree();
    assert_eq!(
        root.replace_at(0, UniqueTreeNode::new("c")),
        Err(DUPLICATE),
        "`c` is carried by another sibling"
    );
    let old = root
        .replace_at(0, UniqueTreeNode::new("a"))
        .expect("replacing `a` with an equal value");
    assert!(old.value_eq(&"a"));

    root.replace_at(0, UniqueTreeNode::new("z")).expect("new value");
    assert!(!root.contains_value(&"a"));
    assert!(root.contains_value(&"z"));
    assert_eq!(child_values(&root), ["z", "b", "c"]);
}

#[test]
fn set_value_checks_siblings() {
    let root = sample_tree();
    let a = root.first_child().expect("root has children");

    assert_eq!(a.set_value(Some("b")), Err(DUPLICATE));
    assert!(a.value_eq(&"a"), "a rejected value leaves the node unchanged");

    assert_eq!(a.set_value(Some("a")), Ok(Some("a")), "same value is a no-op");
    assert_eq!(a.set_value(Some("x")), Ok(Some("a")));
    assert!(root.contains_value(&"x"));
    assert!(!root.contains_value(&"a"));
    root.add_last(UniqueTreeNode::new("a")).expect("`a` is free again");
}

#[test]
fn empty_value_transitions() {
    let root = sample_tree();
    let b = root.child(1).expect("root has three children");
    let e = root.add_last(UniqueTreeNode::empty()).expect("no empty child yet");

    assert_eq!(b.set_value(None), Err(DUPLICATE), "`e` already has no value");
    assert!(b.value_eq(&"b"));
    assert_eq!(root.policy().len(), 4);

    assert_eq!(e.set_value(Some("e")), Ok(None));
    assert!(!root.policy().holds_empty());
    assert!(!root.contains_value(None));

    assert_eq!(b.set_value(None), Ok(Some("b")));
    assert_eq!(b.set_value(None), Ok(None), "clearing twice is a no-op");
    assert!(root.policy().holds_empty());
    assert!(!root.contains_value(&"b"));
    assert_eq!(root.policy().len(), 4);
    assert_eq!(e.set_value(None), Err(DUPLICATE));

    assert_eq!(root.replace_at(0, UniqueTreeNode::empty()), Err(DUPLICATE));
    assert_eq!(root.children_values(), [Some("a"), None, Some("c"), Some("e")]);

    let old = root
        .replace_at(1, UniqueTreeNode::empty())
        .expect("the replaced child is the empty one");
    assert_eq!(old, b);
    assert!(old.is_root());
    assert!(root.policy().holds_empty());
    assert_eq!(root.policy().len(), 4);
    assert_consistent(&root);
}

#[test]
fn exact_existence_check_with_spans() {
    let root = sample_tree();
    assert_eq!(root.contains_value_in(&"c", ..), Ok(true));
    assert_eq!(root.contains_value_in(&"c", ..2), Ok(false));
    assert_eq!(root.contains_value_in(&"q", 0..1), Ok(false));
    assert_eq!(root.index_of_value(&"c"), Some(2));
}

#[test]
#[should_panic]
fn literal_tree_with_duplicates_panics() {
    let _ = unique_tree_node! {
        1, [
            (2, []),
            (2, []),
        ]
    };
}
