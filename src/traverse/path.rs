//! Lowest common ancestor and paths between nodes.

use core::iter;

use alloc::vec::Vec;

use crate::Node;

/// Returns the lowest common ancestor of the two nodes, counting a node as
/// its own ancestor.
///
/// Returns `None` if the nodes belong to different trees.
#[must_use]
pub(crate) fn lowest_common_ancestor<T, P>(a: &Node<T, P>, b: &Node<T, P>) -> Option<Node<T, P>> {
    let (mut level_a, root_a) = a.placement();
    let (mut level_b, root_b) = b.placement();
    if !root_a.ptr_eq(&root_b) {
        return None;
    }

    let mut a = a.clone();
    let mut b = b.clone();
    while level_a > level_b {
        a = a.parent_link()?;
        level_a -= 1;
    }
    while level_b > level_a {
        b = b.parent_link()?;
        level_b -= 1;
    }
    while !a.ptr_eq(&b) {
        a = a.parent_link()?;
        b = b.parent_link()?;
    }
    Some(a)
}

/// Traverser of the nodes on the path between two nodes.
///
/// Yields the nodes from the start up to (but excluding) the lowest common
/// ancestor, then the nodes from there down to the end. For nodes in
/// different trees, the path climbs to the root of the start node and
/// continues from the root of the end node.
#[derive(Debug)]
pub struct PathTraverser<T, P> {
    /// Next node on the ascending half.
    ascending: Option<Node<T, P>>,
    /// Lowest common ancestor, where the ascending half stops.
    stop: Option<Node<T, P>>,
    /// Nodes of the descending half, the next one last.
    descending: Vec<Node<T, P>>,
}

impl<T, P> Clone for PathTraverser<T, P> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            ascending: self.ascending.clone(),
            stop: self.stop.clone(),
            descending: self.descending.clone(),
        }
    }
}

impl<T, P> PathTraverser<T, P> {
    /// Creates a traverser of the path from `from` to `to`.
    #[must_use]
    pub fn new(from: &Node<T, P>, to: &Node<T, P>) -> Self {
        if from.ptr_eq(to) {
            return Self {
                ascending: None,
                stop: None,
                descending: Vec::new(),
            };
        }

        let stop = lowest_common_ancestor(from, to);
        let is_stop = |node: &Node<T, P>| stop.as_ref().map_or(false, |stop| stop.ptr_eq(node));

        let mut descending = Vec::new();
        let mut next = Some(to.clone());
        while let Some(node) = next {
            if is_stop(&node) {
                break;
            }
            next = node.parent_link();
            descending.push(node);
        }
        let ascending = (!is_stop(from)).then(|| from.clone());

        Self {
            ascending,
            stop,
            descending,
        }
    }
}

impl<T, P> Iterator for PathTraverser<T, P> {
    type Item = Node<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current) = self.ascending.take() {
            self.ascending = current.parent_link().filter(|parent| match &self.stop {
                Some(stop) => !stop.ptr_eq(parent),
                None => true,
            });
            return Some(current);
        }
        self.descending.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.descending.len();
        if self.ascending.is_some() {
            (rest + 1, None)
        } else {
            (rest, Some(rest))
        }
    }
}

impl<T, P> iter::FusedIterator for PathTraverser<T, P> {}
