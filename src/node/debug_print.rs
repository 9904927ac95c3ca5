//! Debug printing of a subtree.

use core::fmt;

use alloc::vec;
use alloc::vec::Vec;

use crate::node::Node;

/// Connector drawn before a child that has a next sibling.
const BRANCH: &str = "├─ ";
/// Connector drawn before the last child.
const LAST_BRANCH: &str = "└─ ";
/// Continuation drawn under a child that has a next sibling.
const VERTICAL: &str = "│  ";
/// Continuation drawn under the last child.
const BLANK: &str = "   ";

/// Fake option for debug printing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum FakeOption {
    /// Fake `Some(_)`.
    Some,
    /// Fake `None`.
    None,
}

impl fmt::Debug for FakeOption {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Some => "Some(_)",
            Self::None => "None",
        })
    }
}

impl FakeOption {
    /// Returns `Some` if the given value is true, `None` if false.
    #[inline]
    #[must_use]
    fn some_if_true(v: bool) -> Self {
        if v {
            Self::Some
        } else {
            Self::None
        }
    }
}

/// Raw string for debug printing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct RawStr<'a>(&'a str);

impl fmt::Debug for RawStr<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A wrapper to debug-print a node and its descendants.
pub(super) struct DebugPrintSubtree<'a, T, P> {
    /// Target node.
    node: &'a Node<T, P>,
}

impl<'a, T, P> DebugPrintSubtree<'a, T, P> {
    /// Creates a new `DebugPrintSubtree`.
    #[inline]
    #[must_use]
    pub(super) fn new(node: &'a Node<T, P>) -> Self {
        Self { node }
    }
}

impl<T: fmt::Debug, P> fmt::Debug for DebugPrintSubtree<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ds = f.debug_struct("Node");
        match self.node.try_borrow_value() {
            Ok(v) => ds.field("value", &v),
            Err(_) => ds.field("value", &RawStr("<borrowed>")),
        };
        ds.field("parent", &FakeOption::some_if_true(!self.node.is_root()))
            .field("children", &DebugPrintChildren(self.node))
            .finish()
    }
}

/// An internal wrapper for the children of a debug-printed node.
struct DebugPrintChildren<'a, T, P>(&'a Node<T, P>);

impl<T: fmt::Debug, P> fmt::Debug for DebugPrintChildren<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dl = f.debug_list();
        for child in self.0.children() {
            dl.entry(&DebugPrintDescendant(&child));
        }
        dl.finish()
    }
}

/// An internal wrapper for a descendant of a debug-printed node.
struct DebugPrintDescendant<'a, T, P>(&'a Node<T, P>);

impl<T: fmt::Debug, P> fmt::Debug for DebugPrintDescendant<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ds = f.debug_struct("Node");
        match self.0.try_borrow_value() {
            Ok(v) => ds.field("value", &v),
            Err(_) => ds.field("value", &RawStr("<borrowed>")),
        };
        ds.field("children", &DebugPrintChildren(self.0)).finish()
    }
}

/// A wrapper to draw a node and its descendants with box-drawing characters.
///
/// Every node takes one line, and a node without a value leaves its line
/// empty after the connector. Every line, including the last one, ends with
/// a newline.
///
/// ```text
/// root
/// ├─ a
/// │  └─ c
/// └─ b
/// ```
///
/// Created by [`Node::pretty_print`].
pub struct PrettyPrint<'a, T, P> {
    /// Top node.
    node: &'a Node<T, P>,
}

impl<'a, T, P> PrettyPrint<'a, T, P> {
    /// Creates a new `PrettyPrint`.
    #[inline]
    #[must_use]
    pub(super) fn new(node: &'a Node<T, P>) -> Self {
        Self { node }
    }
}

impl<T: fmt::Display, P> fmt::Display for PrettyPrint<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `continues[i]` tells whether the ancestor at depth `i + 1` has a
        // next sibling.
        let mut continues: Vec<bool> = Vec::new();
        let mut pending = vec![(self.node.clone(), 0_usize)];
        while let Some((node, depth)) = pending.pop() {
            if depth > 0 {
                continues.truncate(depth - 1);
                for &more in &continues {
                    f.write_str(if more { VERTICAL } else { BLANK })?;
                }
                let more = node.next_sibling_link().is_some();
                f.write_str(if more { BRANCH } else { LAST_BRANCH })?;
                continues.push(more);
            }
            match &*node.borrow_value() {
                Some(value) => writeln!(f, "{value}")?,
                None => writeln!(f)?,
            }
            let children: Vec<_> = node.children_ref().iter().rev().cloned().collect();
            pending.extend(children.into_iter().map(|child| (child, depth + 1)));
        }
        Ok(())
    }
}
