//! Internals of a node.

use core::cell::{Cell, Ref, RefCell, RefMut};
use core::mem;

use alloc::rc::{Rc, Weak};
use alloc::vec;
use alloc::vec::Vec;

use crate::child_list::ChildList;
use crate::node::Node;

/// Internal node data.
pub(crate) struct NodeCore<T, P> {
    /// Value associated to the node.
    value: RefCell<Option<T>>,
    /// Children.
    children: RefCell<ChildList<Node<T, P>>>,
    /// Policy watching the values of the children.
    policy: RefCell<P>,
    /// Parent.
    ///
    /// Dangling (`Weak::new()`) when the node has no parent.
    parent: RefCell<Weak<NodeCore<T, P>>>,
    /// Position among the children of the parent.
    ///
    /// This is `0` when the node has no parent.
    sibling_index: Cell<usize>,
    /// Cached placement in the tree.
    ///
    /// `None` means the cache is dirty and should be recomputed on read.
    placement: RefCell<Option<Placement<T, P>>>,
}

/// Level and root of a node, computed lazily.
struct Placement<T, P> {
    /// Depth from the root.
    level: usize,
    /// Root node.
    root: Weak<NodeCore<T, P>>,
}

impl<T, P> NodeCore<T, P> {
    /// Creates a new parentless node core.
    #[must_use]
    pub(super) fn new_rc(value: Option<T>, policy: P) -> Rc<Self> {
        Rc::new(Self {
            value: RefCell::new(value),
            children: RefCell::new(ChildList::default()),
            policy: RefCell::new(policy),
            parent: RefCell::new(Weak::new()),
            sibling_index: Cell::new(0),
            placement: RefCell::new(None),
        })
    }
}

// This drop prevents stack overflow on drop of very deep tree.
impl<T, P> Drop for NodeCore<T, P> {
    fn drop(&mut self) {
        let mut pending = self.children.get_mut().take_all();
        while let Some(child) = pending.pop() {
            match Rc::try_unwrap(child.core) {
                Ok(mut core) => {
                    // Nobody else refers to the child, so its children are
                    // released here instead of by a recursive drop.
                    pending.extend(core.children.get_mut().take_all());
                }
                Err(core) => {
                    // The child is still referred from outside and survives
                    // as a root of its own tree.
                    Node { core }.orphan();
                }
            }
        }
    }
}

/// Neighbors.
impl<T, P> Node<T, P> {
    /// Returns a link to the parent node.
    #[inline]
    #[must_use]
    pub(crate) fn parent_link(&self) -> Option<Self> {
        self.core
            .parent
            .borrow()
            .upgrade()
            .map(|core| Self { core })
    }

    /// Returns true if the node has a live parent.
    #[inline]
    #[must_use]
    pub(crate) fn has_parent(&self) -> bool {
        self.core.parent.borrow().strong_count() != 0
    }

    /// Sets the parent and marks the placement of the subtree dirty.
    ///
    /// Note that this does not take care of the child lists.
    pub(crate) fn replace_parent(&self, parent: Option<&Self>) {
        let link = parent.map_or_else(Weak::new, |parent| Rc::downgrade(&parent.core));
        *self.core.parent.borrow_mut() = link;
        self.invalidate_placement();
    }

    /// Sets the sibling index.
    #[inline]
    pub(crate) fn set_sibling_index(&self, index: usize) {
        self.core.sibling_index.set(index);
    }

    /// Returns the raw sibling index.
    #[inline]
    #[must_use]
    pub(crate) fn raw_sibling_index(&self) -> usize {
        self.core.sibling_index.get()
    }

    /// Returns the child at the given offset.
    #[inline]
    #[must_use]
    pub(crate) fn child_link(&self, offset: usize) -> Option<Self> {
        self.children_ref().get(offset).cloned()
    }

    /// Returns the next sibling, or `None` for the last child and roots.
    #[must_use]
    pub(crate) fn next_sibling_link(&self) -> Option<Self> {
        self.parent_link()?.child_link(self.raw_sibling_index() + 1)
    }

    /// Clears the parent link of a node whose parent is gone.
    fn orphan(&self) {
        self.set_sibling_index(0);
        self.replace_parent(None);
    }
}

/// Borrows.
impl<T, P> Node<T, P> {
    /// Returns the child list.
    #[must_use]
    pub(crate) fn children_ref(&self) -> Ref<'_, ChildList<Self>> {
        self.core
            .children
            .try_borrow()
            .expect("[consistency] `NodeCore::children` should not be borrowed mutably and nestedly")
    }

    /// Returns the mutable child list.
    #[must_use]
    pub(crate) fn children_mut(&self) -> RefMut<'_, ChildList<Self>> {
        self.core
            .children
            .try_borrow_mut()
            .expect("[consistency] `NodeCore::children` should not be borrowed nestedly")
    }

    /// Returns the policy.
    #[must_use]
    pub(crate) fn policy_ref(&self) -> Ref<'_, P> {
        self.core
            .policy
            .try_borrow()
            .expect("[consistency] `NodeCore::policy` should not be borrowed mutably and nestedly")
    }

    /// Returns the mutable policy.
    #[must_use]
    pub(crate) fn policy_mut(&self) -> RefMut<'_, P> {
        self.core
            .policy
            .try_borrow_mut()
            .expect("[consistency] `NodeCore::policy` should not be borrowed nestedly")
    }

    /// Returns the value cell.
    #[inline]
    #[must_use]
    pub(crate) fn value_cell(&self) -> &RefCell<Option<T>> {
        &self.core.value
    }

    /// Returns true if the two handles refer to the same node.
    #[inline]
    #[must_use]
    pub(crate) fn ptr_eq_core(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }

    /// Returns a weak link to the core.
    #[inline]
    #[must_use]
    pub(crate) fn downgrade_core(&self) -> Weak<NodeCore<T, P>> {
        Rc::downgrade(&self.core)
    }

    /// Creates a node handle from a weak link to the core.
    #[inline]
    #[must_use]
    pub(crate) fn upgrade_core(core: &Weak<NodeCore<T, P>>) -> Option<Self> {
        core.upgrade().map(|core| Self { core })
    }
}

/// Level and root cache.
impl<T, P> Node<T, P> {
    /// Returns the cached level and root, if the cache is clean.
    #[must_use]
    fn cached_placement(&self) -> Option<(usize, Self)> {
        let placement = self.core.placement.borrow();
        let placement = placement.as_ref()?;
        let root = Self::upgrade_core(&placement.root)?;
        Some((placement.level, root))
    }

    /// Stores the level and root.
    fn store_placement(&self, level: usize, root: &Self) {
        *self.core.placement.borrow_mut() = Some(Placement {
            level,
            root: root.downgrade_core(),
        });
    }

    /// Returns the level and root, recomputing dirty caches on the way.
    ///
    /// Dirty ancestors are recomputed top-down without recursion, so this is
    /// safe for very deep trees.
    #[must_use]
    pub(crate) fn placement(&self) -> (usize, Self) {
        if let Some(cached) = self.cached_placement() {
            return cached;
        }

        // `dirty[0]` is `self`, and `dirty[i + 1]` is the parent of `dirty[i]`.
        let mut dirty = Vec::new();
        let mut top = self.clone();
        let (top_level, root) = loop {
            match top.parent_link() {
                None => break (0, top.clone()),
                Some(parent) => match parent.cached_placement() {
                    Some((parent_level, root)) => break (parent_level + 1, root),
                    None => dirty.push(mem::replace(&mut top, parent)),
                },
            }
        };
        dirty.push(top);

        let self_level = top_level + dirty.len() - 1;
        for (depth_from_top, node) in dirty.iter().rev().enumerate() {
            node.store_placement(top_level + depth_from_top, &root);
        }
        (self_level, root)
    }

    /// Marks the placement of every node in the subtree dirty.
    pub(crate) fn invalidate_placement(&self) {
        let mut pending = vec![self.clone()];
        while let Some(node) = pending.pop() {
            *node.core.placement.borrow_mut() = None;
            pending.extend(node.children_ref().iter().cloned());
        }
    }

    /// Takes the children out of the node without touching their links.
    #[must_use]
    pub(crate) fn take_children(&self) -> Vec<Self> {
        self.children_mut().take_all()
    }
}
