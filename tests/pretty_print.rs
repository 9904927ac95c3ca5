//! Tests for pretty and debug printing.

use listree::{tree_node, TreeNode};

//  root
//  |-- 0
//  |   |-- 0-0
//  |   `-- 0-1
//  |-- 1
//  `-- 2
//      `-- 2-0
//          `-- 2-0-0
fn sample_tree() -> TreeNode<&'static str> {
    tree_node! {
        "root", [
            ("0", [
                ("0-0", []),
                ("0-1", []),
            ]),
            ("1", []),
            ("2", [
                ("2-0", [
                    ("2-0-0", []),
                ]),
            ]),
        ]
    }
}

#[test]
fn pretty_print_draws_branches() {
    let root = sample_tree();
    let expected = "\
root
├─ 0
│  ├─ 0-0
│  └─ 0-1
├─ 1
└─ 2
   └─ 2-0
      └─ 2-0-0
";
    assert_eq!(root.pretty_print().to_string(), expected);
}

#[test]
fn pretty_print_of_subtree() {
    let root = sample_tree();
    let two = root.last_child().expect("root has children");
    assert_eq!(two.pretty_print().to_string(), "2\n└─ 2-0\n   └─ 2-0-0\n");
}

#[test]
fn pretty_print_leaves_empty_values_blank() {
    let root = TreeNode::new(1);
    root.add_last(TreeNode::empty()).expect("fresh node");
    root.add_last(TreeNode::new(3)).expect("fresh node");
    assert_eq!(root.pretty_print().to_string(), "1\n├─ \n└─ 3\n");
}

#[test]
fn debug_print_nests_children() {
    let root = tree_node! { 0, [(1, [(2, [])])] };
    assert_eq!(
        format!("{root:?}"),
        "Node { value: Some(0), parent: None, children: \
         [Node { value: Some(1), children: [Node { value: Some(2), children: [] }] }] }"
    );

    let child = root.first_child().expect("root has a child");
    assert_eq!(
        format!("{child:?}"),
        "Node { value: Some(1), parent: Some(_), children: \
         [Node { value: Some(2), children: [] }] }"
    );
}
