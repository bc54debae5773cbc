//! Node tree for the Brindle HTML parser.
//!
//! This crate provides an arena-based tree of markup nodes together with
//! everything that reads or reshapes it after parsing:
//!
//! - [`DomTree`] and its child-management primitives (append, insert,
//!   remove, replace, clone), all of which keep every node's sibling index
//!   equal to its position among its parent's children
//! - [`Attributes`], an ordered, case-insensitive attribute list
//! - [`tag`], the tag registry consulted by the tree builder and serializer
//! - [`entities`], named character references and escaping
//! - [`traverse`], an iterative depth-first walker
//! - [`serialize`], HTML output driven by [`OutputSettings`]
//! - [`select`], read-only element queries
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. A node
//! can be reachable from at most one parent: appending a node that is already
//! attached detaches it first.

pub mod attributes;
mod element;
pub mod entities;
pub mod select;
pub mod serialize;
pub mod tag;
mod text;
pub mod traverse;

pub use attributes::{Attribute, Attributes};
pub use select::Evaluator;
pub use serialize::{Charset, EscapeMode, OutputSettings, SettingsError};
pub use tag::{TagInfo, TagRegistry};
pub use traverse::NodeVisitor;

/// A type-safe index into the node arena.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A node in the arena: its payload plus the structural links shared by
/// every kind.
///
/// The links are only changed through [`DomTree`] methods so the
/// parent/child/sibling-index invariants cannot be broken from outside.
#[derive(Debug, Clone)]
pub struct Node {
    /// What this node is.
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    sibling_index: usize,
}

impl Node {
    const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            sibling_index: 0,
        }
    }

    /// The parent of this node, or `None` for the document and orphans.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The children of this node, in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Position of this node among its parent's children (0 for orphans).
    #[must_use]
    pub const fn sibling_index(&self) -> usize {
        self.sibling_index
    }
}

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The root of a parsed tree.
    Document,
    /// A tagged element with attributes.
    Element(ElementData),
    /// A run of character data.
    Text(TextData),
    /// A `<!-- comment -->`.
    Comment(String),
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag_name: String,
    /// Ordered attribute list.
    pub attrs: Attributes,
}

impl ElementData {
    /// Create element data for `tag_name` with no attributes.
    ///
    /// # Panics
    ///
    /// Panics if `tag_name` is empty or whitespace.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self::with_attributes(tag_name, Attributes::new())
    }

    /// Create element data for `tag_name` with the given attributes.
    ///
    /// # Panics
    ///
    /// Panics if `tag_name` is empty or whitespace.
    #[must_use]
    pub fn with_attributes(tag_name: &str, attrs: Attributes) -> Self {
        let tag_name = tag_name.trim();
        assert!(!tag_name.is_empty(), "tag name must not be empty");
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs,
        }
    }
}

/// Text payload: the raw string plus whether serialization escapes it.
///
/// Character data from ordinary content and RCDATA is escaped on output;
/// script/style bodies and doctype text are written back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextData {
    /// The unnormalised text.
    pub text: String,
    /// Escape `&`, `<`, `>` when serializing.
    pub escape: bool,
}

impl TextData {
    /// The text with whitespace runs collapsed to single spaces.
    #[must_use]
    pub fn normalised(&self) -> String {
        text::normalise_whitespace(&self.text)
    }

    /// True if the text is empty or only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// Arena-based node tree.
///
/// All nodes live in one vector and refer to each other by [`NodeId`]. The
/// Document node is always at [`NodeId::ROOT`]. Detached subtrees (removed
/// nodes, clones) stay in the arena as orphans until re-attached.
///
/// The tree also carries the document-level configuration read when
/// serializing: its [`OutputSettings`] and a [`TagRegistry`] overlay that
/// remembers unknown tags seen self-closed.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    output_settings: OutputSettings,
    tags: TagRegistry,
}

impl DomTree {
    /// Create a new tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document)],
            output_settings: OutputSettings::default(),
            tags: TagRegistry::new(),
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    ///
    /// Only the payload is writable; structural links stay under the tree's
    /// control.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the arena, orphans included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (never true: the Document always exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialization settings for this document.
    #[must_use]
    pub const fn output_settings(&self) -> &OutputSettings {
        &self.output_settings
    }

    /// Mutable serialization settings for this document.
    pub const fn output_settings_mut(&mut self) -> &mut OutputSettings {
        &mut self.output_settings
    }

    /// The document's tag registry.
    #[must_use]
    pub const fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// Mutable access to the document's tag registry.
    pub const fn tags_mut(&mut self) -> &mut TagRegistry {
        &mut self.tags
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    /// Allocate a detached element.
    ///
    /// # Panics
    ///
    /// Panics if `tag_name` is empty.
    pub fn alloc_element(&mut self, tag_name: &str, attrs: Attributes) -> NodeId {
        self.alloc(NodeKind::Element(ElementData::with_attributes(
            tag_name, attrs,
        )))
    }

    /// Allocate a detached text node.
    pub fn alloc_text(&mut self, text: &str, escape: bool) -> NodeId {
        self.alloc(NodeKind::Text(TextData {
            text: text.to_string(),
            escape,
        }))
    }

    // =========================================================================
    // Structural mutation
    // =========================================================================

    /// Append `child` as the last child of `parent`.
    ///
    /// If `child` already has a parent it is detached from it first.
    ///
    /// # Panics
    ///
    /// Panics if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let at = self.nodes[parent.0].children.len();
        self.insert_children_at(parent, at, &[child]);
    }

    /// Insert `children` into `parent` starting at `index`.
    ///
    /// Each child is detached from any prior parent first; `index` is then
    /// clamped to the parent's child count. Sibling indices of every child
    /// from `index` onward are re-derived.
    ///
    /// # Panics
    ///
    /// Panics if any child is `parent` or one of its ancestors.
    pub fn insert_children_at(&mut self, parent: NodeId, index: usize, children: &[NodeId]) {
        for &child in children {
            assert!(
                child != parent
                    && (self.nodes[child.0].children.is_empty()
                        || !self.is_descendant_of(parent, child)),
                "cannot insert a node into its own subtree"
            );
            self.detach(child);
        }

        let at = index.min(self.nodes[parent.0].children.len());
        let _ = self.nodes[parent.0]
            .children
            .splice(at..at, children.iter().copied());
        for &child in children {
            self.nodes[child.0].parent = Some(parent);
        }
        self.reindex_children(parent, at);
    }

    /// Insert `new_child` into `parent` immediately before `reference`.
    ///
    /// # Panics
    ///
    /// Panics if `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, new_child: NodeId, reference: NodeId) {
        assert_eq!(
            self.nodes[reference.0].parent,
            Some(parent),
            "reference node is not a child of the given parent"
        );
        self.detach(new_child);
        // Detaching may have shifted the reference.
        let at = self.nodes[reference.0].sibling_index;
        self.insert_children_at(parent, at, &[new_child]);
    }

    /// Remove `child` from `parent`, leaving it as a consistent orphan.
    ///
    /// # Panics
    ///
    /// Panics if `child`'s recorded parent is not `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        assert_eq!(
            self.nodes[child.0].parent,
            Some(parent),
            "node is not a child of the given parent"
        );
        let index = self.nodes[child.0].sibling_index;
        let _ = self.nodes[parent.0].children.remove(index);
        self.nodes[child.0].parent = None;
        self.nodes[child.0].sibling_index = 0;
        self.reindex_children(parent, index);
    }

    /// Remove a node from its parent, if it has one.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
    }

    /// Put `replacement` where `old` was; `old` becomes an orphan.
    ///
    /// # Panics
    ///
    /// Panics if `old` has no parent, or if `replacement` is an ancestor of `old`.
    pub fn replace(&mut self, old: NodeId, replacement: NodeId) {
        let Some(parent) = self.nodes[old.0].parent else {
            panic!("cannot replace a node that has no parent");
        };
        self.replace_child(parent, old, replacement);
    }

    /// Replace the child `old` of `parent` with `replacement`.
    ///
    /// # Panics
    ///
    /// Panics if `old` is not a child of `parent`, or if `replacement` is
    /// `parent` or one of its ancestors.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, replacement: NodeId) {
        assert_eq!(
            self.nodes[old.0].parent,
            Some(parent),
            "node is not a child of the given parent"
        );
        if old == replacement {
            return;
        }
        self.insert_before(parent, replacement, old);
        self.remove_child(parent, old);
    }

    /// Detach every child of `id`.
    pub fn empty(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
            self.nodes[child.0].sibling_index = 0;
        }
    }

    /// Deep-copy the subtree rooted at `id`.
    ///
    /// The copy is an orphan (no parent, sibling index 0); attributes and
    /// every descendant are duplicated. Built with an explicit work list so
    /// deep subtrees do not recurse.
    pub fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let root_copy = self.alloc(self.nodes[id.0].kind.clone());
        let mut pending: Vec<(NodeId, NodeId)> = vec![(id, root_copy)];

        while let Some((source, copy)) = pending.pop() {
            let source_children = self.nodes[source.0].children.clone();
            let mut copied = Vec::with_capacity(source_children.len());
            for (index, child) in source_children.into_iter().enumerate() {
                let child_copy = self.alloc(self.nodes[child.0].kind.clone());
                let node = &mut self.nodes[child_copy.0];
                node.parent = Some(copy);
                node.sibling_index = index;
                copied.push(child_copy);
                pending.push((child, child_copy));
            }
            self.nodes[copy.0].children = copied;
        }
        root_copy
    }

    /// Deep-copy `id` and append the copy to `parent`.
    pub fn clone_into(&mut self, id: NodeId, parent: NodeId) -> NodeId {
        let copy = self.deep_clone(id);
        self.append_child(parent, copy);
        copy
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent {
            self.remove_child(parent, id);
        }
    }

    fn reindex_children(&mut self, parent: NodeId, from: usize) {
        let children = std::mem::take(&mut self.nodes[parent.0].children);
        for (index, &child) in children.iter().enumerate().skip(from) {
            self.nodes[child.0].sibling_index = index;
        }
        self.nodes[parent.0].children = children;
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the child at `index`.
    #[must_use]
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// A node's position among its parent's children.
    #[must_use]
    pub fn sibling_index(&self, id: NodeId) -> usize {
        self.get(id).map_or(0, |n| n.sibling_index)
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        self.child(parent, self.sibling_index(id) + 1)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.sibling_index(id).checked_sub(1)?;
        self.child(parent, index)
    }

    /// Check if `descendant` is a strict descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// The first element child of the Document, usually `<html>`.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    // =========================================================================
    // Payload access
    // =========================================================================

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text data if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&TextData> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable text data if this node is a text node.
    pub fn as_text_mut(&mut self, id: NodeId) -> Option<&mut TextData> {
        self.get_mut(id).and_then(|n| match &mut n.kind {
            NodeKind::Text(data) => Some(data),
            _ => None,
        })
    }

    /// The element's tag name, or `None` for other kinds.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|e| e.tag_name.as_str())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
