//! Ancestors traversal.

use core::iter;
use core::mem;

use crate::Node;

/// Ancestors traverser.
///
/// Yields the parent, the grandparent, and so on up to the root.
#[derive(Debug)]
pub struct AncestorsTraverser<T, P> {
    /// Next node to return.
    next: Option<Node<T, P>>,
}

impl<T, P> Clone for AncestorsTraverser<T, P> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            next: self.next.clone(),
        }
    }
}

impl<T, P> AncestorsTraverser<T, P> {
    /// Creates a traverser from the given node.
    #[inline]
    #[must_use]
    pub fn new(next: Option<Node<T, P>>) -> Self {
        Self { next }
    }

    /// Returns the next item without advancing the iterator.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&Node<T, P>> {
        self.next.as_ref()
    }
}

impl<T, P> Iterator for AncestorsTraverser<T, P> {
    type Item = Node<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let next_of_next = self.next.as_ref()?.parent_link();
        mem::replace(&mut self.next, next_of_next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next.is_some() {
            (1, None)
        } else {
            (0, Some(0))
        }
    }
}

impl<T, P> iter::FusedIterator for AncestorsTraverser<T, P> {}
