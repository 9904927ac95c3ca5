//! Node edit algorithms.
//!
//! Every operation resolves its positions and validates its nodes before
//! touching any child list, so a failing call leaves the tree unchanged.

use core::mem;
use core::ops::Range;

use alloc::rc::Rc;
use alloc::vec::Vec;
use std::collections::HashSet;

use tracing::{debug, trace};

use crate::anchor::{Position, Span};
use crate::node::{InvalidElement, Node, TreeError};
use crate::policy::ChildPolicy;

/// Validation.
impl<T, P: ChildPolicy<T>> Node<T, P> {
    /// Returns true if `self` is `target` or an ancestor of `target`.
    #[must_use]
    fn is_self_or_ancestor_of(&self, target: &Self) -> bool {
        if self.ptr_eq(target) {
            return true;
        }
        if self.is_empty() {
            // A leaf is nobody's ancestor.
            return false;
        }
        target.ancestors().any(|ancestor| ancestor.ptr_eq(self))
    }

    /// Logs and returns the rejection.
    fn reject<R>(&self, reason: InvalidElement) -> Result<R, TreeError> {
        debug!(%reason, len = self.len(), "child rejected");
        Err(reason.into())
    }

    /// Checks whether the node may become a child without forming a loop.
    fn validate_structure(&self, node: &Self) -> Result<(), TreeError> {
        if node.is_self_or_ancestor_of(self) {
            return self.reject(InvalidElement::AncestorLoop);
        }
        if self.contains(node) {
            return self.reject(InvalidElement::AlreadyChild);
        }
        Ok(())
    }

    /// Checks whether the node may become a new child.
    fn validate_element(&self, node: &Self) -> Result<(), TreeError> {
        self.validate_structure(node)?;
        let verdict = self.policy_ref().validate(node.borrow_value().as_ref());
        verdict.or_else(|reason| self.reject(reason))
    }

    /// Checks whether the nodes may become new children at once.
    fn validate_batch(&self, nodes: &[Self]) -> Result<(), TreeError> {
        let mut seen = HashSet::with_capacity(nodes.len());
        for node in nodes {
            self.validate_structure(node)?;
            if !seen.insert(Rc::as_ptr(&node.core)) {
                return self.reject(InvalidElement::DuplicateInBatch);
            }
        }

        let values: Vec<_> = nodes.iter().map(|node| node.borrow_value()).collect();
        let values: Vec<Option<&T>> = values.iter().map(|value| value.as_ref()).collect();
        let verdict = self.policy_ref().validate_batch(&values);
        verdict.or_else(|reason| self.reject(reason))
    }
}

/// Bookkeeping.
impl<T, P: ChildPolicy<T>> Node<T, P> {
    /// Re-derives the sibling indices of the children in the range.
    fn reindex(&self, range: Range<usize>) {
        let start = range.start;
        for (i, child) in self.children_ref().iter_range(range).enumerate() {
            child.set_sibling_index(start + i);
        }
    }

    /// Re-derives the sibling indices from `start` to the last child.
    #[inline]
    fn reindex_from(&self, start: usize) {
        let len = self.len();
        self.reindex(start..len);
    }

    /// Links the nodes already placed in the child list to `self`.
    fn link_children(&self, nodes: &[Self]) {
        {
            let mut policy = self.policy_mut();
            for node in nodes {
                policy.on_attach(node.borrow_value().as_ref());
            }
        }
        for node in nodes {
            node.replace_parent(Some(self));
        }
    }

    /// Unlinks the nodes already taken out of the child list from `self`.
    fn unlink_children(&self, nodes: &[Self]) {
        {
            let mut policy = self.policy_mut();
            for node in nodes {
                policy.on_detach(node.borrow_value().as_ref());
            }
        }
        for node in nodes {
            node.set_sibling_index(0);
            node.replace_parent(None);
        }
    }

    /// Removes the child at the offset without reindexing the siblings.
    fn unlink_at(&self, offset: usize) -> Result<Self, TreeError> {
        let removed = self.children_mut().remove(offset)?;
        self.unlink_children(core::slice::from_ref(&removed));
        trace!(offset, len = self.len(), "detached child");
        Ok(removed)
    }
}

/// Addition.
impl<T, P: ChildPolicy<T>> Node<T, P> {
    /// Inserts the node as a child at the given position and returns it.
    ///
    /// If the node belongs to another parent, it is detached from there
    /// first.
    ///
    /// # Failures
    ///
    /// * [`TreeError::IndexOutOfRange`] if the position is outside of
    ///   `0..=len`.
    /// * [`TreeError::InvalidElement`] if the node is `self` or one of its
    ///   ancestors, is already a child of `self`, or is refused by the policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use listree::{Position, TreeNode};
    ///
    /// let root = TreeNode::new("root");
    /// let b = root.add_at(0, TreeNode::new("b"))?;
    /// let a = root.add_at(0, TreeNode::new("a"))?;
    /// let c = root.add_at(Position::END, TreeNode::new("c"))?;
    ///
    /// assert_eq!(a.sibling_index(), 0);
    /// assert_eq!(b.sibling_index(), 1);
    /// assert_eq!(c.sibling_index(), 2);
    ///
    /// // A node cannot be its own child.
    /// assert!(root.add_at(0, root.clone()).is_err());
    /// # Ok::<_, listree::TreeError>(())
    /// ```
    pub fn add_at(&self, index: impl Into<Position>, node: Self) -> Result<Self, TreeError> {
        let offset = self.children_ref().insertion_offset(index)?;
        self.validate_element(&node)?;

        node.detach();
        self.children_mut().insert(offset, node.clone())?;
        self.link_children(core::slice::from_ref(&node));
        self.reindex_from(offset);
        trace!(offset, len = self.len(), "attached child");

        Ok(node)
    }

    /// Inserts the nodes as children at the given position, keeping their
    /// order.
    ///
    /// Every node is validated before any of them is attached, so either all
    /// of them are attached or none.
    ///
    /// # Failures
    ///
    /// Fails for the same reasons as [`add_at`][`Self::add_at`], and also if
    /// the same node or (depending on the policy) the same value appears
    /// twice in the batch.
    pub fn add_many_at<I>(&self, index: impl Into<Position>, nodes: I) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = Self>,
    {
        let nodes: Vec<Self> = nodes.into_iter().collect();
        let offset = self.children_ref().insertion_offset(index)?;
        self.validate_batch(&nodes)?;

        for node in &nodes {
            node.detach();
        }
        let range = self.children_mut().insert_many(offset, nodes.iter().cloned())?;
        self.link_children(&nodes);
        self.reindex_from(offset);
        trace!(?range, len = self.len(), "attached children");

        Ok(())
    }

    /// Builds a subtree from the value and inserts it at the given position.
    ///
    /// See [`with_children`][`Self::with_children`] for how `children_of`
    /// expands the subtree. Returns the root of the inserted subtree.
    pub fn add_subtree_at<F, I>(
        &self,
        index: impl Into<Position>,
        value: T,
        children_of: F,
    ) -> Result<Self, TreeError>
    where
        F: FnMut(&T) -> I,
        I: IntoIterator<Item = T>,
    {
        let index = index.into();
        self.children_ref().insertion_offset(index)?;
        let verdict = self.policy_ref().validate(Some(&value));
        verdict.or_else(|reason| self.reject(reason))?;

        let subtree = Self::with_children(value, children_of)?;
        self.add_at(index, subtree)
    }

    /// Inserts the node as the first child.
    #[inline]
    pub fn add_first(&self, node: Self) -> Result<Self, TreeError> {
        self.add_at(Position::FIRST, node)
    }

    /// Inserts the node as the last child.
    #[inline]
    pub fn add_last(&self, node: Self) -> Result<Self, TreeError> {
        self.add_at(Position::END, node)
    }
}

/// Removal.
impl<T, P: ChildPolicy<T>> Node<T, P> {
    /// Removes the child at the given position and returns it.
    pub fn remove_at(&self, index: impl Into<Position>) -> Result<Self, TreeError> {
        let offset = self.children_ref().offset(index)?;
        let removed = self.unlink_at(offset)?;
        self.reindex_from(offset);
        Ok(removed)
    }

    /// Removes the given child and returns it.
    ///
    /// Returns `None` if the node is not a child of `self`.
    pub fn remove(&self, node: &Self) -> Option<Self> {
        if !self.contains(node) {
            return None;
        }
        let offset = node.raw_sibling_index();
        let removed = self.unlink_at(offset).ok()?;
        self.reindex_from(offset);
        Some(removed)
    }

    /// Detaches the node from its parent.
    ///
    /// Returns `false` if the node had no parent.
    pub fn detach(&self) -> bool {
        match self.parent_link() {
            Some(parent) => parent.remove(self).is_some(),
            None => false,
        }
    }

    /// Removes the first child carrying the given value and returns it.
    pub fn remove_value<'a>(&self, value: impl Into<Option<&'a T>>) -> Option<Self>
    where
        T: PartialEq + 'a,
    {
        let offset = self.index_of_value(value)?;
        self.remove_at(offset).ok()
    }

    /// Removes the first child in the span carrying the given value and
    /// returns it.
    pub fn remove_value_in<'a>(
        &self,
        value: impl Into<Option<&'a T>>,
        span: impl Into<Span>,
    ) -> Result<Option<Self>, TreeError>
    where
        T: PartialEq + 'a,
    {
        match self.index_of_value_in(value, span)? {
            Some(offset) => self.remove_at(offset).map(Some),
            None => Ok(None),
        }
    }

    /// Removes every child in the span for which the predicate holds.
    ///
    /// Children are examined from the end of the span backward, and the
    /// removed nodes are returned in that order. Each removal reindexes the
    /// following siblings, so sibling indices are current whenever the
    /// predicate runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use listree::TreeNode;
    ///
    /// let root = TreeNode::new(0);
    /// for i in 1..=6 {
    ///     root.add_last(TreeNode::new(i))?;
    /// }
    ///
    /// let removed = root.remove_all(|node| node.value_eq(&2) || node.value_eq(&5), ..)?;
    /// let removed: Vec<i32> = removed.iter().map(|node| node.borrow_value().unwrap()).collect();
    /// assert_eq!(removed, [5, 2]);
    /// assert_eq!(root.len(), 4);
    /// # Ok::<_, listree::TreeError>(())
    /// ```
    pub fn remove_all<F>(&self, mut predicate: F, span: impl Into<Span>) -> Result<Vec<Self>, TreeError>
    where
        F: FnMut(&Self) -> bool,
    {
        let range = self.children_ref().span(span)?;
        let mut removed = Vec::new();
        for offset in range.rev() {
            let Some(child) = self.child_link(offset) else {
                continue;
            };
            if predicate(&child) {
                removed.push(self.unlink_at(offset)?);
                self.reindex_from(offset);
            }
        }
        Ok(removed)
    }

    /// Removes the children in the span and returns them in order.
    pub fn remove_range(&self, span: impl Into<Span>) -> Result<Vec<Self>, TreeError> {
        let range = self.children_ref().span(span)?;
        let removed = self.children_mut().remove_span(range.clone())?;
        self.unlink_children(&removed);
        self.reindex_from(range.start);
        trace!(?range, len = self.len(), "detached children");
        Ok(removed)
    }

    /// Removes all children and returns them in order.
    pub fn clear(&self) -> Vec<Self> {
        let removed = self.take_children();
        self.unlink_children(&removed);
        trace!(count = removed.len(), "cleared children");
        removed
    }
}

/// Replacement and reordering.
impl<T, P: ChildPolicy<T>> Node<T, P> {
    /// Puts the node at the given position in the way a list assignment
    /// would, and returns the node that left the child list, if any.
    ///
    /// Depending on the arguments this:
    ///
    /// * removes the child at `index` if `node` is `None`,
    /// * moves `node` to `index` if it is already a child of `self`,
    /// * appends `node` if `index` is just past the last child,
    /// * otherwise replaces the child at `index` with `node`.
    ///
    /// # Examples
    ///
    /// ```
    /// use listree::TreeNode;
    ///
    /// let root = TreeNode::new("root");
    /// let a = root.add_last(TreeNode::new("a"))?;
    /// let b = root.add_last(TreeNode::new("b"))?;
    ///
    /// // Already a child: moved.
    /// assert_eq!(root.set_child(0, Some(b.clone()))?, None);
    /// assert_eq!(b.sibling_index(), 0);
    ///
    /// // Foreign node: replaces `a`.
    /// let d = TreeNode::new("d");
    /// assert_eq!(root.set_child(1, Some(d.clone()))?, Some(a.clone()));
    /// assert!(a.is_root());
    ///
    /// // `None`: removed.
    /// assert_eq!(root.set_child(0, None)?, Some(b.clone()));
    /// assert_eq!(root.len(), 1);
    /// # Ok::<_, listree::TreeError>(())
    /// ```
    pub fn set_child(
        &self,
        index: impl Into<Position>,
        node: Option<Self>,
    ) -> Result<Option<Self>, TreeError> {
        let index = index.into();
        let (offset, len) = {
            let children = self.children_ref();
            (children.insertion_offset(index)?, children.len())
        };

        match node {
            None if offset == len => Err(TreeError::IndexOutOfRange { index, len }),
            None => self.remove_at(offset).map(Some),
            Some(node) if self.contains(&node) => {
                if offset == len {
                    return Err(TreeError::IndexOutOfRange { index, len });
                }
                self.move_child(node.raw_sibling_index(), offset)?;
                Ok(None)
            }
            Some(node) if offset == len => {
                self.add_at(offset, node)?;
                Ok(None)
            }
            Some(node) => self.replace_at(offset, node).map(Some),
        }
    }

    /// Replaces the child at the given position with the node and returns
    /// the old child.
    ///
    /// The old child becomes the root of its own tree. If the new node
    /// belongs to another parent, it is detached from there first.
    pub fn replace_at(&self, index: impl Into<Position>, node: Self) -> Result<Self, TreeError> {
        let index = index.into();
        let old = {
            let children = self.children_ref();
            let offset = children.offset(index)?;
            children.get(offset).cloned()
        };
        let Some(old) = old else {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        };
        let offset = old.raw_sibling_index();

        self.validate_structure(&node)?;
        let verdict = self
            .policy_ref()
            .validate_replacement(old.borrow_value().as_ref(), node.borrow_value().as_ref());
        verdict.or_else(|reason| self.reject(reason))?;

        // Fields to update:
        //  * self.children[offset] (old --> node)
        //  * self.policy (old value out, new value in)
        //  * old.parent, old.sibling_index (cleared)
        //  * node.parent, node.sibling_index (set)
        node.detach();
        self.children_mut().replace(offset, node.clone())?;
        self.unlink_children(core::slice::from_ref(&old));
        self.link_children(core::slice::from_ref(&node));
        node.set_sibling_index(offset);
        trace!(offset, len = self.len(), "replaced child");

        Ok(old)
    }

    /// Moves a child from one position to another among the same siblings.
    ///
    /// The children between the two positions slide by one. The moved child
    /// keeps its parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use listree::{Position, TreeNode};
    ///
    /// let root = TreeNode::new('r');
    /// for c in ['a', 'b', 'c', 'd'] {
    ///     root.add_last(TreeNode::new(c))?;
    /// }
    ///
    /// root.move_child(0, Position::LAST)?;
    /// let order: String = root.children().map(|n| n.borrow_value().unwrap()).collect();
    /// assert_eq!(order, "bcda");
    /// # Ok::<_, listree::TreeError>(())
    /// ```
    pub fn move_child(
        &self,
        from: impl Into<Position>,
        to: impl Into<Position>,
    ) -> Result<(), TreeError> {
        let touched = self.children_mut().move_item(from, to)?;
        if !touched.is_empty() {
            trace!(?touched, "moved child");
            self.reindex(touched);
        }
        Ok(())
    }

    /// Replaces the value of the node and returns the old value.
    ///
    /// The policy of the parent is consulted and updated. Setting a value
    /// equal to the current one does nothing and returns the given value.
    ///
    /// # Failures
    ///
    /// Fails with [`TreeError::InvalidElement`] if the policy of the parent
    /// refuses the new value; the value is left unchanged then.
    ///
    /// # Panics
    ///
    /// Panics if the value is borrowed (see [`borrow_value`][`Self::borrow_value`]).
    pub fn set_value(&self, value: Option<T>) -> Result<Option<T>, TreeError>
    where
        T: PartialEq,
    {
        if *self.borrow_value() == value {
            return Ok(value);
        }
        if let Some(parent) = self.parent_link() {
            let old = self.borrow_value();
            let verdict = parent
                .policy_ref()
                .validate_replacement(old.as_ref(), value.as_ref());
            verdict.or_else(|reason| parent.reject(reason))?;
            parent
                .policy_mut()
                .on_value_replaced(old.as_ref(), value.as_ref());
        }

        let mut slot = self
            .value_cell()
            .try_borrow_mut()
            .expect("[precondition] the value should not be borrowed while it is replaced");
        Ok(mem::replace(&mut *slot, value))
    }
}
