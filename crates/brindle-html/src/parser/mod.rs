//! HTML parser module for tree construction.

/// Insertion modes and the tree builder.
pub mod core;
/// Debug outlines of a built tree.
mod dump;

pub use self::core::{HtmlTreeBuilder, InsertionMode};
pub use self::dump::{print_tree, tree_dump};
