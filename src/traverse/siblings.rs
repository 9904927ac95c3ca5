//! Siblings traversal.

use core::iter;
use core::mem;

use crate::Node;

/// Siblings traverser.
///
/// Yields the start node and the siblings after it, in order.
#[derive(Debug)]
pub struct SiblingsTraverser<T, P> {
    /// Next node to return.
    next: Option<Node<T, P>>,
}

impl<T, P> Clone for SiblingsTraverser<T, P> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            next: self.next.clone(),
        }
    }
}

impl<T, P> SiblingsTraverser<T, P> {
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

impl<T, P> Iterator for SiblingsTraverser<T, P> {
    type Item = Node<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let next_of_next = self.next.as_ref()?.next_sibling_link();
        mem::replace(&mut self.next, next_of_next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let Some(next) = &self.next else {
            return (0, Some(0));
        };
        match next.parent_link() {
            Some(parent) => {
                let rest = parent.len().saturating_sub(next.raw_sibling_index());
                (rest, Some(rest))
            }
            None => (1, Some(1)),
        }
    }
}

impl<T, P> iter::FusedIterator for SiblingsTraverser<T, P> {}
