//! Depth-first tree walking.
//!
//! The walk is iterative: it descends through first children and climbs
//! back through parents using sibling indices, so document depth never
//! turns into call-stack depth.

use std::ops::ControlFlow;

use crate::{DomTree, NodeId};

/// Callbacks for [`traverse`].
///
/// `head` runs when a node is first reached, `tail` after all of its
/// descendants. Returning [`ControlFlow::Break`] from either stops the walk.
pub trait NodeVisitor {
    /// Called on entering a node. `depth` is 0 for the walk's root.
    fn head(&mut self, tree: &DomTree, id: NodeId, depth: usize) -> ControlFlow<()>;

    /// Called on leaving a node.
    fn tail(&mut self, _tree: &DomTree, _id: NodeId, _depth: usize) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Walk the subtree rooted at `root`, calling `visitor` in document order.
///
/// Returns [`ControlFlow::Break`] if the visitor stopped the walk early.
pub fn traverse<V: NodeVisitor + ?Sized>(
    tree: &DomTree,
    root: NodeId,
    visitor: &mut V,
) -> ControlFlow<()> {
    let mut node = root;
    let mut depth = 0;

    loop {
        visitor.head(tree, node, depth)?;
        if let Some(first) = tree.first_child(node) {
            node = first;
            depth += 1;
            continue;
        }

        // Climb until a node with an unvisited sibling turns up.
        loop {
            visitor.tail(tree, node, depth)?;
            if node == root {
                return ControlFlow::Continue(());
            }
            if let Some(next) = tree.next_sibling(node) {
                node = next;
                break;
            }
            let Some(parent) = tree.parent(node) else {
                return ControlFlow::Continue(());
            };
            node = parent;
            depth -= 1;
        }
    }
}

/// Return the first node in document order (starting with `root`) for which
/// `predicate` holds, without visiting the rest of the tree.
pub fn find<F>(tree: &DomTree, root: NodeId, mut predicate: F) -> Option<NodeId>
where
    F: FnMut(&DomTree, NodeId) -> bool,
{
    struct First<F> {
        predicate: F,
        found: Option<NodeId>,
    }

    impl<F: FnMut(&DomTree, NodeId) -> bool> NodeVisitor for First<F> {
        fn head(&mut self, tree: &DomTree, id: NodeId, _depth: usize) -> ControlFlow<()> {
            if (self.predicate)(tree, id) {
                self.found = Some(id);
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        }
    }

    let mut visitor = First {
        predicate: &mut predicate,
        found: None,
    };
    let _ = traverse(tree, root, &mut visitor);
    visitor.found
}

/// Collect every node in the subtree rooted at `root` in document order.
#[must_use]
pub fn descendants(tree: &DomTree, root: NodeId) -> Vec<NodeId> {
    struct All(Vec<NodeId>);

    impl NodeVisitor for All {
        fn head(&mut self, _tree: &DomTree, id: NodeId, _depth: usize) -> ControlFlow<()> {
            self.0.push(id);
            ControlFlow::Continue(())
        }
    }

    let mut all = All(Vec::new());
    let _ = traverse(tree, root, &mut all);
    all.0
}
