//! Depth-first traversal.

use core::iter;

use crate::Node;

/// Depth-first pre-order traverser.
///
/// Every node is yielded before its descendants, and siblings are visited
/// in order. An unbounded traversal continues past the subtree of the start
/// node to the following siblings of the start node and of its ancestors,
/// up to the end of the tree. A bounded traversal stops at the end of the
/// subtree of the start node.
#[derive(Debug)]
pub struct PreOrderTraverser<T, P> {
    /// Node whose subtree bounds the traversal, if any.
    bound: Option<Node<T, P>>,
    /// Next node to return.
    next: Option<Node<T, P>>,
}

impl<T, P> Clone for PreOrderTraverser<T, P> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            bound: self.bound.clone(),
            next: self.next.clone(),
        }
    }
}

impl<T, P> PreOrderTraverser<T, P> {
    /// Creates a traverser from the given node to the end of its tree.
    #[inline]
    #[must_use]
    pub fn with_start(start: Node<T, P>) -> Self {
        Self {
            bound: None,
            next: Some(start),
        }
    }

    /// Creates a traverser of the subtree rooted at the given node.
    #[inline]
    #[must_use]
    pub fn subtree(start: Node<T, P>) -> Self {
        Self {
            next: Some(start.clone()),
            bound: Some(start),
        }
    }

    /// Returns the next item without advancing the iterator.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&Node<T, P>> {
        self.next.as_ref()
    }

    /// Returns the node visited after the given one.
    #[must_use]
    fn successor(&self, current: &Node<T, P>) -> Option<Node<T, P>> {
        if let Some(child) = current.first_child() {
            return Some(child);
        }
        // Leave nodes until one of them has a next sibling.
        let mut node = current.clone();
        loop {
            if self.bound.as_ref().map_or(false, |bound| bound.ptr_eq(&node)) {
                return None;
            }
            if let Some(next_sib) = node.next_sibling_link() {
                return Some(next_sib);
            }
            node = node.parent_link()?;
        }
    }
}

impl<T, P> Iterator for PreOrderTraverser<T, P> {
    type Item = Node<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.successor(&current);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next.is_some() {
            (1, None)
        } else {
            (0, Some(0))
        }
    }
}

impl<T, P> iter::FusedIterator for PreOrderTraverser<T, P> {}
