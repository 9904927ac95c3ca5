//! Tests for levels, roots, traversals, lowest common ancestors and paths.

mod common;

use listree::{tree_node, TreeNode};

use common::{assert_consistent, child_values, init_logging};

/// Returns the values of the nodes.
fn values<'a>(nodes: impl IntoIterator<Item = TreeNode<&'a str>>) -> Vec<&'a str> {
    nodes
        .into_iter()
        .map(|node| node.borrow_value().expect("nodes in this test carry values"))
        .collect()
}

/// Returns the node reached by following child offsets from `root`.
fn at(root: &TreeNode<&'static str>, offsets: &[usize]) -> TreeNode<&'static str> {
    offsets.iter().fold(root.clone(), |node, &i| {
        node.child(i).expect("the offsets should point to a node")
    })
}

//  r
//  |-- a
//  |   |-- c
//  |   |   `-- e
//  |   `-- d
//  `-- b
//      `-- f
fn sample_tree() -> TreeNode<&'static str> {
    tree_node! {
        "r", [
            ("a", [
                ("c", [
                    ("e", []),
                ]),
                ("d", []),
            ]),
            ("b", [
                ("f", []),
            ]),
        ]
    }
}

#[test]
fn scenario_small_tree() {
    init_logging();
    //  r
    //  |-- a
    //  |   `-- c
    //  `-- b
    let r = TreeNode::new("r");
    let a = r.add_last(TreeNode::new("a")).expect("fresh node");
    let b = r.add_last(TreeNode::new("b")).expect("fresh node");
    let c = a.add_last(TreeNode::new("c")).expect("fresh node");

    assert_eq!(c.lowest_common_ancestor(&b), Some(r.clone()));
    assert_eq!(values(c.path_to(&b)), ["c", "a", "b"]);

    r.move_child(1, 0).expect("both offsets are valid");
    assert_eq!(child_values(&r), ["b", "a"]);
    assert_eq!(b.sibling_index(), 0);
    assert_eq!(a.sibling_index(), 1);

    let d = TreeNode::new("d");
    assert_eq!(r.replace_at(1, d.clone()), Ok(a.clone()));
    assert!(a.is_root());
    assert_eq!(d.parent(), Some(r.clone()));
    assert_eq!(d.sibling_index(), 1);
    assert_eq!(c.root(), a);
    assert_eq!(c.level(), 1);
    assert_consistent(&r);
    assert_consistent(&a);
}

#[test]
fn levels_and_roots() {
    let r = sample_tree();
    let e = at(&r, &[0, 0, 0]);
    assert_eq!(r.level(), 0);
    assert_eq!(e.level(), 3);
    assert_eq!(e.root(), r);
    assert_consistent(&r);
}

#[test]
fn levels_follow_reparenting() {
    let r = sample_tree();
    let c = at(&r, &[0, 0]);
    let e = at(&r, &[0, 0, 0]);
    let f = at(&r, &[1, 0]);
    // Fill the caches before editing.
    assert_eq!(e.level(), 3);
    assert_eq!(f.level(), 2);

    f.add_last(c.clone()).expect("`c` is not an ancestor of `f`");
    assert_eq!(c.level(), 3);
    assert_eq!(e.level(), 4);
    assert_eq!(e.root(), r);

    assert!(c.detach());
    assert_eq!(c.level(), 0);
    assert_eq!(e.level(), 1);
    assert_eq!(e.root(), c);
    assert_consistent(&r);
    assert_consistent(&c);
}

#[test]
fn ancestors_from_parent_to_root() {
    let r = sample_tree();
    let e = at(&r, &[0, 0, 0]);
    assert_eq!(values(e.ancestors()), ["c", "a", "r"]);
    assert_eq!(r.ancestors().count(), 0);
}

#[test]
fn pre_order_continues_past_subtree() {
    let r = sample_tree();
    assert_eq!(
        values(r.pre_order_traverse()),
        ["r", "a", "c", "e", "d", "b", "f"]
    );
    let a = at(&r, &[0]);
    assert_eq!(values(a.pre_order_traverse()), ["a", "c", "e", "d", "b", "f"]);
    let e = at(&r, &[0, 0, 0]);
    assert_eq!(values(e.pre_order_traverse()), ["e", "d", "b", "f"]);
    let f = at(&r, &[1, 0]);
    assert_eq!(values(f.pre_order_traverse()), ["f"]);
}

#[test]
fn pre_order_of_small_tree_reaches_following_sibling() {
    //  r
    //  |-- a
    //  |   `-- c
    //  `-- b
    let r = tree_node! { "r", [("a", [("c", [])]), ("b", [])] };
    let a = at(&r, &[0]);
    assert_eq!(values(a.pre_order_traverse()), ["a", "c", "b"]);
    assert_eq!(values(a.subtree_pre_order_traverse()), ["a", "c"]);
}

#[test]
fn subtree_pre_order_stays_in_subtree() {
    let r = sample_tree();
    assert_eq!(
        values(r.subtree_pre_order_traverse()),
        ["r", "a", "c", "e", "d", "b", "f"]
    );
    let a = at(&r, &[0]);
    assert_eq!(values(a.subtree_pre_order_traverse()), ["a", "c", "e", "d"]);
    let d = at(&r, &[0, 1]);
    assert_eq!(values(d.subtree_pre_order_traverse()), ["d"]);
}

#[test]
fn children_iterator() {
    let r = sample_tree();
    let a = at(&r, &[0]);
    let children = a.children();
    assert_eq!(children.size_hint(), (2, Some(2)));
    assert_eq!(values(children), ["c", "d"]);
    assert_eq!(r.children_values(), [Some("a"), Some("b")]);
}

#[test]
fn lowest_common_ancestor_cases() {
    let r = sample_tree();
    let a = at(&r, &[0]);
    let d = at(&r, &[0, 1]);
    let e = at(&r, &[0, 0, 0]);
    let f = at(&r, &[1, 0]);

    assert_eq!(e.lowest_common_ancestor(&d), Some(a.clone()));
    assert_eq!(d.lowest_common_ancestor(&e), Some(a.clone()));
    assert_eq!(e.lowest_common_ancestor(&f), Some(r.clone()));
    assert_eq!(e.lowest_common_ancestor(&a), Some(a.clone()));
    assert_eq!(e.lowest_common_ancestor(&e), Some(e.clone()));
    assert_eq!(e.lowest_common_ancestor(&TreeNode::new("x")), None);
}

#[test]
fn paths() {
    let r = sample_tree();
    let a = at(&r, &[0]);
    let d = at(&r, &[0, 1]);
    let e = at(&r, &[0, 0, 0]);
    let f = at(&r, &[1, 0]);

    assert_eq!(values(e.path_to(&d)), ["e", "c", "d"]);
    assert_eq!(values(e.path_to(&f)), ["e", "c", "a", "b", "f"]);
    assert_eq!(values(e.path_to(&a)), ["e", "c"]);
    assert_eq!(values(a.path_to(&e)), ["c", "e"]);
    assert_eq!(e.path_to(&e).count(), 0);

    let mut forward = values(f.path_to(&d));
    forward.reverse();
    assert_eq!(forward, values(d.path_to(&f)));
}

#[test]
fn path_across_trees_runs_through_roots() {
    let r = sample_tree();
    let d = at(&r, &[0, 1]);
    let other = tree_node! { "s", [("t", [])] };
    let t = at(&other, &[0]);

    assert_eq!(values(d.path_to(&t)), ["d", "a", "r", "s", "t"]);
    assert_eq!(values(t.path_to(&d)), ["t", "s", "r", "a", "d"]);
}
