//! Macros.

/// A macro that evaluates to the root node of a new [`TreeNode`][`crate::TreeNode`] tree.
///
/// Every child is written as `(value, [children...])`.
///
/// # Examples
///
/// ```
/// use listree::tree_node;
///
/// let root = tree_node! {
///     "root", [
///         ("0", [
///             ("0-0", []),
///             ("0-1", []),
///         ]),
///         ("1", []),
///         ("2", [
///             ("2-0", [
///                 ("2-0-0", []),
///             ]),
///             ("2-1", []),
///         ]),
///     ]
/// };
///
/// assert_eq!(
///     root.pre_order_traverse()
///         .map(|node| node.borrow_value().unwrap())
///         .collect::<Vec<_>>(),
///     &["root", "0", "0-0", "0-1", "1", "2", "2-0", "2-0-0", "2-1"]
/// );
/// ```
#[macro_export]
macro_rules! tree_node {
    () => {
        compile_error!("tree should have a root node")
    };
    ($value:expr) => {
        $crate::TreeNode::new($value)
    };
    ($value:expr, [$($children:tt)*]) => {
        $crate::__build_tree!(TreeNode, $value, [$($children)*])
    };
}

/// A macro that evaluates to the root node of a new
/// [`UniqueTreeNode`][`crate::UniqueTreeNode`] tree.
///
/// The syntax is the same as [`tree_node!`].
///
/// # Panics
///
/// Panics if two siblings have equal values.
///
/// ```should_panic
/// use listree::unique_tree_node;
///
/// let _ = unique_tree_node! {
///     "root", [
///         ("a", []),
///         ("a", []),
///     ]
/// };
/// ```
#[macro_export]
macro_rules! unique_tree_node {
    () => {
        compile_error!("tree should have a root node")
    };
    ($value:expr) => {
        $crate::UniqueTreeNode::new($value)
    };
    ($value:expr, [$($children:tt)*]) => {
        $crate::__build_tree!(UniqueTreeNode, $value, [$($children)*])
    };
}

/// Builds a literal tree of the given node type.
#[doc(hidden)]
#[macro_export]
macro_rules! __build_tree {
    (@@append_child, $ty:ident, $parent:ident, [$(($child:expr, [$($descendants:tt)*])),* $(,)?]) => {{
        $({
            let node = $parent
                .add_last($crate::$ty::new($child))
                .expect("siblings in a literal tree should be acceptable to the policy");
            $crate::__build_tree!(@@append_child, $ty, node, [$($descendants)*]);
        })*
    }};
    ($ty:ident, $value:expr, [$($children:tt)*]) => {{
        let root = $crate::$ty::new($value);
        $crate::__build_tree!(@@append_child, $ty, root, [$($children)*]);
        root
    }};
}
