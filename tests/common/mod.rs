//! Helpers shared by the integration tests.
#![allow(dead_code)]

use core::fmt;
use std::sync::Once;

use listree::{ChildPolicy, Node};
use tracing_subscriber::EnvFilter;

/// Guard of the logger initialization.
static LOGGING: Once = Once::new();

/// Installs a test logger once per test binary.
///
/// The filter is taken from `RUST_LOG`, falling back to `warn`.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Returns the values of the children, panicking on an empty value.
pub fn child_values<T: Clone, P>(node: &Node<T, P>) -> Vec<T> {
    node.children()
        .map(|child| {
            child
                .borrow_value()
                .clone()
                .expect("children in this test should carry values")
        })
        .collect()
}

/// Checks the parent links, sibling indices, levels and roots of the whole
/// subtree.
pub fn assert_consistent<T: fmt::Debug, P: ChildPolicy<T>>(top: &Node<T, P>) {
    let root = top.root();
    for node in top.subtree_pre_order_traverse() {
        assert!(node.root().ptr_eq(&root), "root of {node:?}");
        assert_eq!(node.children().count(), node.len());
        for (i, child) in node.children().enumerate() {
            assert_eq!(child.sibling_index(), i, "sibling index of {child:?}");
            assert_eq!(child.parent(), Some(node.clone()));
            assert_eq!(node.index_of(&child), Some(i));
            assert_eq!(child.level(), node.level() + 1);
        }
    }
}
