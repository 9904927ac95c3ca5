//! Node.

mod debug_print;
mod edit;
mod internal;

use core::cell::{BorrowError, Ref};
use core::fmt;

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;

use crate::anchor::{Position, Span};
use crate::policy::{ChildPolicy, Plain, Unique};
use crate::traverse::{self, AncestorsTraverser, PathTraverser, PreOrderTraverser};

pub use self::debug_print::PrettyPrint;
pub(crate) use self::internal::NodeCore;

/// Reason a node is refused as a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidElement {
    /// Attempt to make a node its own descendant or ancestor.
    #[error("attempt to make a node its own descendant or ancestor")]
    AncestorLoop,
    /// Attempt to attach a node to the parent it already belongs to.
    #[error("the node is already a child of the parent")]
    AlreadyChild,
    /// A sibling already carries the same value.
    #[error("the value already exists among the siblings")]
    DuplicateValue,
    /// A batch of nodes carries the same value more than once, or contains
    /// the same node more than once.
    #[error("the batch contains the same value or node more than once")]
    DuplicateInBatch,
}

/// Tree edit and navigation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    /// Position or span outside of the child list.
    #[error("index {index} is out of range for {len} children")]
    IndexOutOfRange {
        /// Offending position.
        index: Position,
        /// Number of children at the time of the call.
        len: usize,
    },
    /// The node cannot be a child here.
    #[error("invalid element: {0}")]
    InvalidElement(#[from] InvalidElement),
    /// Attempt to navigate through the parent of a root node.
    #[error("the node has no parent")]
    NoParent,
}

/// A shared reference to a tree node.
///
/// Cloning a `Node` clones the reference, not the node. Two handles compare
/// equal if and only if they refer to the same node.
pub struct Node<T, P = Plain> {
    /// Target node core.
    core: Rc<NodeCore<T, P>>,
}

/// A node without constraint on the values of siblings.
pub type TreeNode<T> = Node<T, Plain>;

/// A node whose children carry distinct values.
pub type UniqueTreeNode<T> = Node<T, Unique<T>>;

impl<T, P> Clone for Node<T, P> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T, P> PartialEq for Node<T, P> {
    /// Compares the identities of the nodes.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq_core(other)
    }
}

impl<T, P> Eq for Node<T, P> {}

impl<T: fmt::Debug, P> fmt::Debug for Node<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self::debug_print::DebugPrintSubtree::new(self), f)
    }
}

impl<T, P: ChildPolicy<T>> From<T> for Node<T, P> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

/// Creation.
impl<T, P: ChildPolicy<T>> Node<T, P> {
    /// Creates a new parentless node with the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use listree::TreeNode;
    ///
    /// let root = TreeNode::new("root");
    ///
    /// assert!(root.is_root());
    /// assert_eq!(root.level(), 0);
    /// assert!(root.value_eq(&"root"));
    /// ```
    #[inline]
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::with_value(Some(value))
    }

    /// Creates a new parentless node without a value.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::with_value(None)
    }

    /// Creates a new parentless node with the given optional value.
    #[inline]
    #[must_use]
    pub fn with_value(value: Option<T>) -> Self {
        Self {
            core: NodeCore::new_rc(value, P::default()),
        }
    }

    /// Creates a subtree by repeatedly expanding values into child values.
    ///
    /// `children_of` is called once for every created node and returns the
    /// values of its children in order. Expansion stops where it returns no
    /// values, so a factory that never does so never returns.
    ///
    /// # Failures
    ///
    /// Fails if the policy rejects the children produced for some node, for
    /// example duplicate values for [`UniqueTreeNode`].
    ///
    /// # Examples
    ///
    /// ```
    /// use listree::TreeNode;
    ///
    /// //  3
    /// //  |-- 2
    /// //  |   `-- 1
    /// //  `-- 1
    /// let root = TreeNode::with_children(3, |&n: &i32| (1..n).rev())?;
    ///
    /// let values: Vec<i32> = root
    ///     .pre_order_traverse()
    ///     .map(|node| node.borrow_value().unwrap_or_default())
    ///     .collect();
    /// assert_eq!(values, [3, 2, 1, 1]);
    /// # Ok::<_, listree::TreeError>(())
    /// ```
    pub fn with_children<F, I>(value: T, mut children_of: F) -> Result<Self, TreeError>
    where
        F: FnMut(&T) -> I,
        I: IntoIterator<Item = T>,
    {
        let root = Self::new(value);
        let mut pending = alloc::vec![root.clone()];
        while let Some(node) = pending.pop() {
            let child_values: Vec<T> = match &*node.borrow_value() {
                Some(value) => children_of(value).into_iter().collect(),
                None => Vec::new(),
            };
            if child_values.is_empty() {
                continue;
            }
            let children: Vec<Self> = child_values.into_iter().map(Self::new).collect();
            node.add_many_at(Position::END, children.iter().cloned())?;
            pending.extend(children);
        }
        Ok(root)
    }
}

/// Identity and value.
impl<T, P> Node<T, P> {
    /// Returns true if the two handles refer to the same node.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.ptr_eq_core(other)
    }

    /// Creates a weak reference to the node.
    #[inline]
    #[must_use]
    pub fn downgrade(&self) -> NodeWeak<T, P> {
        NodeWeak {
            core: self.downgrade_core(),
        }
    }

    /// Returns a reference to the value of the node.
    ///
    /// # Panics
    ///
    /// Panics if the value is being replaced, which cannot happen outside of
    /// [`set_value`][`Self::set_value`].
    #[inline]
    #[must_use]
    pub fn borrow_value(&self) -> Ref<'_, Option<T>> {
        self.value_cell().borrow()
    }

    /// Returns a reference to the value of the node.
    #[inline]
    pub fn try_borrow_value(&self) -> Result<Ref<'_, Option<T>>, BorrowError> {
        self.value_cell().try_borrow()
    }

    /// Returns true if the node carries the given value.
    #[must_use]
    pub fn value_eq<'a>(&self, value: impl Into<Option<&'a T>>) -> bool
    where
        T: PartialEq + 'a,
    {
        self.borrow_value().as_ref() == value.into()
    }

    /// Returns the policy that watches the values of the children.
    #[inline]
    #[must_use]
    pub fn policy(&self) -> Ref<'_, P> {
        self.policy_ref()
    }
}

/// Neighbors.
impl<T, P> Node<T, P> {
    /// Returns the parent node.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.parent_link()
    }

    /// Returns the parent node, or fails for a root.
    #[inline]
    pub fn required_parent(&self) -> Result<Self, TreeError> {
        self.parent_link().ok_or(TreeError::NoParent)
    }

    /// Returns true if the node has no parent.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        !self.has_parent()
    }

    /// Returns the position of the node among its siblings.
    ///
    /// This is `0` for a root.
    #[inline]
    #[must_use]
    pub fn sibling_index(&self) -> usize {
        if self.has_parent() {
            self.raw_sibling_index()
        } else {
            0
        }
    }

    /// Returns the depth of the node. A root is at level 0.
    #[inline]
    #[must_use]
    pub fn level(&self) -> usize {
        self.placement().0
    }

    /// Returns the root of the tree the node belongs to.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Self {
        self.placement().1
    }

    /// Returns the number of children.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.children_ref().len()
    }

    /// Returns true if the node has no children.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children_ref().is_empty()
    }

    /// Returns the child at the given position.
    #[must_use]
    pub fn child(&self, index: impl Into<Position>) -> Option<Self> {
        let children = self.children_ref();
        let offset = children.offset(index).ok()?;
        children.get(offset).cloned()
    }

    /// Returns the first child.
    #[inline]
    #[must_use]
    pub fn first_child(&self) -> Option<Self> {
        self.child_link(0)
    }

    /// Returns the last child.
    #[inline]
    #[must_use]
    pub fn last_child(&self) -> Option<Self> {
        self.children_ref().last().cloned()
    }

    /// Returns the previous sibling.
    ///
    /// # Failures
    ///
    /// Fails with [`TreeError::NoParent`] if the node is a root.
    pub fn prev_sibling(&self) -> Result<Option<Self>, TreeError> {
        let parent = self.required_parent()?;
        Ok(self
            .raw_sibling_index()
            .checked_sub(1)
            .and_then(|offset| parent.child_link(offset)))
    }

    /// Returns the next sibling.
    ///
    /// # Failures
    ///
    /// Fails with [`TreeError::NoParent`] if the node is a root.
    pub fn next_sibling(&self) -> Result<Option<Self>, TreeError> {
        let parent = self.required_parent()?;
        Ok(parent.child_link(self.raw_sibling_index() + 1))
    }

    /// Returns an iterator of the children.
    #[inline]
    #[must_use]
    pub fn children(&self) -> traverse::SiblingsTraverser<T, P> {
        traverse::SiblingsTraverser::new(self.first_child())
    }

    /// Returns an iterator of the ancestors, from the parent to the root.
    #[inline]
    #[must_use]
    pub fn ancestors(&self) -> AncestorsTraverser<T, P> {
        AncestorsTraverser::new(self.parent())
    }

    /// Returns an iterator in depth-first pre-order, starting from the node
    /// itself.
    ///
    /// After the subtree of the node, the traversal continues with the next
    /// sibling of the node, or of the nearest ancestor that has one, up to
    /// the end of the tree. Use
    /// [`subtree_pre_order_traverse`][`Self::subtree_pre_order_traverse`] to
    /// stay inside the subtree.
    ///
    /// The traverser follows the live tree; editing the tree while iterating
    /// is allowed but the resulting order is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use listree::tree_node;
    ///
    /// //  r
    /// //  |-- a
    /// //  |   `-- c
    /// //  `-- b
    /// let r = tree_node! { "r", [("a", [("c", [])]), ("b", [])] };
    /// let a = r.first_child().expect("`r` has children");
    ///
    /// let values: Vec<_> = a
    ///     .pre_order_traverse()
    ///     .map(|node| node.borrow_value().unwrap())
    ///     .collect();
    /// assert_eq!(values, ["a", "c", "b"]);
    /// ```
    #[inline]
    #[must_use]
    pub fn pre_order_traverse(&self) -> PreOrderTraverser<T, P> {
        PreOrderTraverser::with_start(self.clone())
    }

    /// Returns an iterator of the subtree in depth-first pre-order, starting
    /// from the node itself.
    ///
    /// Unlike [`pre_order_traverse`][`Self::pre_order_traverse`], the
    /// traversal never leaves the subtree.
    #[inline]
    #[must_use]
    pub fn subtree_pre_order_traverse(&self) -> PreOrderTraverser<T, P> {
        PreOrderTraverser::subtree(self.clone())
    }

    /// Returns the values of the children in order.
    ///
    /// Children without a value yield `None`.
    #[must_use]
    pub fn children_values(&self) -> Vec<Option<T>>
    where
        T: Clone,
    {
        self.children_ref()
            .iter()
            .map(|child| child.borrow_value().clone())
            .collect()
    }
}

/// Membership queries.
impl<T, P: ChildPolicy<T>> Node<T, P> {
    /// Returns true if the given node is a child of this node.
    #[inline]
    #[must_use]
    pub fn contains(&self, node: &Self) -> bool {
        node.parent_link().map_or(false, |parent| parent.ptr_eq(self))
    }

    /// Returns the position of the given node among the children.
    #[inline]
    #[must_use]
    pub fn index_of(&self, node: &Self) -> Option<usize> {
        self.contains(node).then(|| node.raw_sibling_index())
    }

    /// Returns true if some child carries the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use listree::UniqueTreeNode;
    ///
    /// let root = UniqueTreeNode::new("root");
    /// root.add_last(UniqueTreeNode::new("a"))?;
    /// root.add_last(UniqueTreeNode::empty())?;
    ///
    /// assert!(root.contains_value(&"a"));
    /// assert!(root.contains_value(None));
    /// assert!(!root.contains_value(&"b"));
    /// # Ok::<_, listree::TreeError>(())
    /// ```
    #[must_use]
    pub fn contains_value<'a>(&self, value: impl Into<Option<&'a T>>) -> bool
    where
        T: PartialEq + 'a,
    {
        let value = value.into();
        if !self.policy_ref().may_contain(value) {
            return false;
        }
        if P::EXACT {
            return true;
        }
        self.find_value(value, 0..self.len()).is_some()
    }

    /// Returns true if some child in the span carries the given value.
    pub fn contains_value_in<'a>(
        &self,
        value: impl Into<Option<&'a T>>,
        span: impl Into<Span>,
    ) -> Result<bool, TreeError>
    where
        T: PartialEq + 'a,
    {
        let span = span.into();
        let range = self.children_ref().span(span)?;
        let value = value.into();
        if !self.policy_ref().may_contain(value) {
            return Ok(false);
        }
        if P::EXACT && span.is_full() {
            return Ok(true);
        }
        Ok(self.find_value(value, range).is_some())
    }

    /// Returns the position of the first child carrying the given value.
    #[must_use]
    pub fn index_of_value<'a>(&self, value: impl Into<Option<&'a T>>) -> Option<usize>
    where
        T: PartialEq + 'a,
    {
        let value = value.into();
        if !self.policy_ref().may_contain(value) {
            return None;
        }
        self.find_value(value, 0..self.len())
    }

    /// Returns the position of the first child in the span carrying the
    /// given value.
    pub fn index_of_value_in<'a>(
        &self,
        value: impl Into<Option<&'a T>>,
        span: impl Into<Span>,
    ) -> Result<Option<usize>, TreeError>
    where
        T: PartialEq + 'a,
    {
        let range = self.children_ref().span(span)?;
        let value = value.into();
        if !self.policy_ref().may_contain(value) {
            return Ok(None);
        }
        Ok(self.find_value(value, range))
    }

    /// Scans the children in the range for the value.
    #[must_use]
    fn find_value(&self, value: Option<&T>, range: core::ops::Range<usize>) -> Option<usize>
    where
        T: PartialEq,
    {
        let start = range.start;
        self.children_ref()
            .iter_range(range)
            .position(|child| child.borrow_value().as_ref() == value)
            .map(|found| start + found)
    }
}

/// Topology.
impl<T, P> Node<T, P> {
    /// Returns the lowest common ancestor of the two nodes.
    ///
    /// A node counts as its own ancestor here, so the result may be one of
    /// the arguments. Returns `None` if the nodes belong to different trees.
    ///
    /// # Examples
    ///
    /// ```
    /// use listree::TreeNode;
    ///
    /// //  r
    /// //  |-- a
    /// //  |   `-- c
    /// //  `-- b
    /// let r = TreeNode::new("r");
    /// let a = r.add_last(TreeNode::new("a"))?;
    /// let b = r.add_last(TreeNode::new("b"))?;
    /// let c = a.add_last(TreeNode::new("c"))?;
    ///
    /// assert_eq!(c.lowest_common_ancestor(&b), Some(r.clone()));
    /// assert_eq!(c.lowest_common_ancestor(&a), Some(a.clone()));
    /// assert_eq!(c.lowest_common_ancestor(&TreeNode::new("x")), None);
    /// # Ok::<_, listree::TreeError>(())
    /// ```
    #[must_use]
    pub fn lowest_common_ancestor(&self, other: &Self) -> Option<Self> {
        traverse::lowest_common_ancestor(self, other)
    }

    /// Returns an iterator of the nodes on the path from this node to `other`.
    ///
    /// The path includes both ends but never their lowest common ancestor.
    /// For nodes in different trees the path runs through both roots.
    ///
    /// # Examples
    ///
    /// ```
    /// use listree::TreeNode;
    ///
    /// let r = TreeNode::new("r");
    /// let a = r.add_last(TreeNode::new("a"))?;
    /// let b = r.add_last(TreeNode::new("b"))?;
    /// let c = a.add_last(TreeNode::new("c"))?;
    ///
    /// let path: Vec<_> = c.path_to(&b).collect();
    /// assert_eq!(path, [c.clone(), a.clone(), b.clone()]);
    /// assert_eq!(c.path_to(&c).count(), 0);
    /// # Ok::<_, listree::TreeError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn path_to(&self, other: &Self) -> PathTraverser<T, P> {
        PathTraverser::new(self, other)
    }
}

/// Debug printing.
impl<T, P> Node<T, P> {
    /// Returns a displayable proxy drawing the node and its descendants.
    ///
    /// # Examples
    ///
    /// ```
    /// use listree::TreeNode;
    ///
    /// let root = TreeNode::new("root");
    /// let a = root.add_last(TreeNode::new("a"))?;
    /// a.add_last(TreeNode::new("c"))?;
    /// root.add_last(TreeNode::new("b"))?;
    ///
    /// let expected = "\
    /// root
    /// ├─ a
    /// │  └─ c
    /// └─ b
    /// ";
    /// assert_eq!(root.pretty_print().to_string(), expected);
    /// # Ok::<_, listree::TreeError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn pretty_print(&self) -> PrettyPrint<'_, T, P> {
        PrettyPrint::new(self)
    }
}

/// A weak reference to a node.
pub struct NodeWeak<T, P = Plain> {
    /// Target node core.
    core: Weak<NodeCore<T, P>>,
}

impl<T, P> Clone for NodeWeak<T, P> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T, P> fmt::Debug for NodeWeak<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NodeWeak { .. }")
    }
}

impl<T, P> NodeWeak<T, P> {
    /// Creates a strong reference if the node is still alive.
    #[inline]
    #[must_use]
    pub fn upgrade(&self) -> Option<Node<T, P>> {
        Node::upgrade_core(&self.core)
    }
}
