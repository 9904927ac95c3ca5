//! Ordered multi-way tree with list-like child editing.
//!
//! # Concepts
//!
//! ## Nodes are their own child lists
//!
//! A [`Node`] holds an optional value and an ordered list of children, and
//! is edited like a list: children are inserted, removed, replaced and moved
//! by position. Positions are [`Position`]s, counted either from the start
//! or from the end of the child list, and ranges of children are [`Span`]s.
//!
//! ```
//! use listree::{Position, TreeNode};
//!
//! let root = TreeNode::new("root");
//! let a = root.add_last(TreeNode::new("a"))?;
//! let b = root.add_last(TreeNode::new("b"))?;
//! let c = a.add_last(TreeNode::new("c"))?;
//! //  root
//! //  |-- a
//! //  |   `-- c
//! //  `-- b
//!
//! assert_eq!(c.level(), 2);
//! assert_eq!(c.root(), root);
//! assert_eq!(b.sibling_index(), 1);
//!
//! // Move `b` before `a`.
//! root.move_child(Position::LAST, Position::FIRST)?;
//! assert_eq!(b.sibling_index(), 0);
//! assert_eq!(a.sibling_index(), 1);
//!
//! // Moving a node under another parent detaches it from the old one.
//! b.add_last(c.clone())?;
//! assert!(a.is_empty());
//! assert_eq!(c.parent(), Some(b.clone()));
//! # Ok::<_, listree::TreeError>(())
//! ```
//!
//! ## Reference counting
//!
//! Children are owned by their parent, and a child refers to its parent
//! weakly. Dropping every handle to a node releases its subtree, except for
//! the descendants still referred from outside: they survive as roots of
//! their own trees.
//!
//! ```
//! use listree::TreeNode;
//!
//! let root = TreeNode::new("root");
//! let child = root.add_last(TreeNode::new("child"))?;
//! drop(root);
//!
//! assert!(child.is_root());
//! assert_eq!(child.level(), 0);
//! # Ok::<_, listree::TreeError>(())
//! ```
//!
//! ## Child policies
//!
//! The type parameter `P` of [`Node`] chooses a [`ChildPolicy`] that rules
//! the values of siblings. [`TreeNode`] allows anything, and
//! [`UniqueTreeNode`] refuses a child whose value equals one of its
//! siblings'.
//!
//! ```
//! use listree::{InvalidElement, TreeError, UniqueTreeNode};
//!
//! let root = UniqueTreeNode::new("root");
//! root.add_last(UniqueTreeNode::new("a"))?;
//!
//! assert_eq!(
//!     root.add_last(UniqueTreeNode::new("a")),
//!     Err(TreeError::InvalidElement(InvalidElement::DuplicateValue))
//! );
//! # Ok::<_, listree::TreeError>(())
//! ```
//!
//! ## Failures leave the tree unchanged
//!
//! Every edit validates its positions and nodes before touching the tree,
//! and a batch insertion either attaches all the nodes or none of them.
#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
// `clippy::missing_docs_in_private_items` implies `missing_docs`.
#![warn(clippy::missing_docs_in_private_items)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::unwrap_used)]

extern crate alloc;

#[macro_use]
mod macros;

mod anchor;
mod child_list;
pub mod node;
pub mod policy;
pub mod traverse;

pub use self::anchor::{Position, Span};
pub use self::node::{InvalidElement, Node, NodeWeak, TreeError, TreeNode, UniqueTreeNode};
pub use self::policy::{ChildPolicy, Plain, Unique};
