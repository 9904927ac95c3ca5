//! Tree traversals.

mod ancestors;
mod depth_first;
mod path;
mod siblings;

pub use self::ancestors::AncestorsTraverser;
pub use self::depth_first::PreOrderTraverser;
pub use self::path::PathTraverser;
pub use self::siblings::SiblingsTraverser;

pub(crate) use self::path::lowest_common_ancestor;
