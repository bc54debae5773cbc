//! Read-only element queries.
//!
//! Every query walks the subtree below (and including) a root node with
//! [`traverse`](crate::traverse::traverse) and tests elements against an
//! [`Evaluator`]. First-match queries stop the walk as soon as they hit.

use std::fmt;
use std::ops::ControlFlow;

use crate::traverse::{self, NodeVisitor};
use crate::{DomTree, ElementData, NodeId};

/// A match predicate over elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluator {
    /// `id` attribute equals the value.
    Id(String),
    /// Has the attribute key.
    Attribute(String),
    /// Has an attribute whose key starts with the prefix.
    AttributeStarting(String),
    /// Has at least one of the attribute keys.
    MultiAttribute(Vec<String>),
    /// Has the class (ASCII case-insensitive).
    Class(String),
    /// Tag name equals `tag`; when `key` is given the element must also
    /// carry that attribute, and when `value` is given as well the
    /// attribute must have exactly that value.
    TagName {
        /// Lowercase tag name.
        tag: String,
        /// Required attribute key.
        key: Option<String>,
        /// Required attribute value (only checked together with `key`).
        value: Option<String>,
    },
}

impl Evaluator {
    /// Test element `id` of `tree`.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(element) = tree.as_element(id) else {
            return false;
        };
        match self {
            Self::Id(wanted) => element.attrs.get("id") == Some(wanted.as_str()),
            Self::Attribute(key) => element.attrs.has_key(key),
            Self::AttributeStarting(prefix) => {
                element.attrs.iter().any(|a| a.key().starts_with(prefix.as_str()))
            }
            Self::MultiAttribute(keys) => element
                .attrs
                .iter()
                .any(|a| keys.iter().any(|k| k == a.key())),
            Self::Class(name) => tree.has_class(id, name),
            Self::TagName { tag, key, value } => {
                Self::tag_matches(element, tag, key.as_deref(), value.as_deref())
            }
        }
    }

    fn tag_matches(
        element: &ElementData,
        tag: &str,
        key: Option<&str>,
        value: Option<&str>,
    ) -> bool {
        if element.tag_name != tag {
            return false;
        }
        let key = key.filter(|k| !k.trim().is_empty());
        let value = value.filter(|v| !v.trim().is_empty());
        match (key, value) {
            (Some(key), Some(value)) => element.attrs.get(key) == Some(value),
            (Some(key), None) => element.attrs.has_key(key),
            (None, _) => true,
        }
    }
}

impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Attribute(key) => write!(f, "[{key}]"),
            Self::AttributeStarting(prefix) => write!(f, "[^{prefix}]"),
            Self::MultiAttribute(keys) => write!(f, "[{}]", keys.join("|")),
            Self::Class(name) => write!(f, ".{name}"),
            Self::TagName { tag, key: Some(key), value: Some(value) } => {
                write!(f, "{tag}[{key}={value}]")
            }
            Self::TagName { tag, key: Some(key), .. } => write!(f, "{tag}[{key}]"),
            Self::TagName { tag, .. } => write!(f, "{tag}"),
        }
    }
}

struct Collector<F> {
    predicate: F,
    matched: Vec<NodeId>,
    first_only: bool,
}

impl<F: FnMut(&DomTree, NodeId) -> bool> NodeVisitor for Collector<F> {
    fn head(&mut self, tree: &DomTree, id: NodeId, _depth: usize) -> ControlFlow<()> {
        if tree.as_element(id).is_some() && (self.predicate)(tree, id) {
            self.matched.push(id);
            if self.first_only {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }
}

/// All elements under `root` (inclusive) matching `evaluator`, in document order.
#[must_use]
pub fn collect(tree: &DomTree, root: NodeId, evaluator: &Evaluator) -> Vec<NodeId> {
    run(tree, root, |t, id| evaluator.matches(t, id), false)
}

/// The first element under `root` (inclusive) matching `evaluator`.
#[must_use]
pub fn first(tree: &DomTree, root: NodeId, evaluator: &Evaluator) -> Option<NodeId> {
    run(tree, root, |t, id| evaluator.matches(t, id), true)
        .first()
        .copied()
}

fn run<F>(tree: &DomTree, root: NodeId, predicate: F, first_only: bool) -> Vec<NodeId>
where
    F: FnMut(&DomTree, NodeId) -> bool,
{
    let mut collector = Collector {
        predicate,
        matched: Vec::new(),
        first_only,
    };
    let _ = traverse::traverse(tree, root, &mut collector);
    collector.matched
}

fn required(what: &str, value: &str) -> String {
    let value = value.trim();
    assert!(!value.is_empty(), "{what} must not be empty");
    value.to_string()
}

impl DomTree {
    /// First element under `root` whose `id` attribute is `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty.
    #[must_use]
    pub fn element_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        first(self, root, &Evaluator::Id(required("id", id)))
    }

    /// Elements under `root` that have attribute `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is empty.
    #[must_use]
    pub fn elements_by_attribute(&self, root: NodeId, key: &str) -> Vec<NodeId> {
        let key = required("attribute key", key).to_lowercase();
        collect(self, root, &Evaluator::Attribute(key))
    }

    /// First element under `root` that has attribute `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is empty.
    #[must_use]
    pub fn element_by_attribute(&self, root: NodeId, key: &str) -> Option<NodeId> {
        let key = required("attribute key", key).to_lowercase();
        first(self, root, &Evaluator::Attribute(key))
    }

    /// Elements under `root` with an attribute key starting with `prefix`.
    ///
    /// # Panics
    ///
    /// Panics if `prefix` is empty.
    #[must_use]
    pub fn elements_by_attribute_prefix(&self, root: NodeId, prefix: &str) -> Vec<NodeId> {
        let prefix = required("attribute prefix", prefix).to_lowercase();
        collect(self, root, &Evaluator::AttributeStarting(prefix))
    }

    /// Elements under `root` carrying any of `keys`.
    #[must_use]
    pub fn elements_by_attributes(&self, root: NodeId, keys: &[&str]) -> Vec<NodeId> {
        let keys = keys.iter().map(|k| k.trim().to_lowercase()).collect();
        collect(self, root, &Evaluator::MultiAttribute(keys))
    }

    /// Elements under `root` with class `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    #[must_use]
    pub fn elements_by_class(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        collect(self, root, &Evaluator::Class(required("class name", name)))
    }

    /// Elements under `root` named `tag`, optionally filtered by an
    /// attribute key and value.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is empty.
    #[must_use]
    pub fn elements_by_tag_name(
        &self,
        root: NodeId,
        tag: &str,
        key: Option<&str>,
        value: Option<&str>,
    ) -> Vec<NodeId> {
        let evaluator = Evaluator::TagName {
            tag: required("tag name", tag).to_ascii_lowercase(),
            key: key.map(|k| k.trim().to_lowercase()),
            value: value.map(str::to_string),
        };
        collect(self, root, &evaluator)
    }

    /// Elements under `root` for which `predicate` holds.
    pub fn elements_matching<F>(&self, root: NodeId, predicate: F) -> Vec<NodeId>
    where
        F: FnMut(&DomTree, NodeId) -> bool,
    {
        run(self, root, predicate, false)
    }
}
