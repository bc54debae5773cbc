//! Visible text extraction.

use std::ops::ControlFlow;

use crate::traverse::{NodeVisitor, traverse};
use crate::{DomTree, NodeId, NodeKind};

/// Collapse every run of whitespace to a single space. Does not trim.
pub(crate) fn normalise_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C') {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

struct VisibleText {
    root: NodeId,
    accum: String,
}

impl VisibleText {
    fn ends_in_space(&self) -> bool {
        self.accum.ends_with(' ')
    }

    fn preserves_whitespace(tree: &DomTree, text_node: NodeId) -> bool {
        tree.ancestors(text_node).any(|id| {
            tree.tag_name(id)
                .is_some_and(|name| tree.tags().lookup(name).preserve_whitespace)
        })
    }
}

impl NodeVisitor for VisibleText {
    fn head(&mut self, tree: &DomTree, id: NodeId, _depth: usize) -> ControlFlow<()> {
        match tree.get(id).map(|n| &n.kind) {
            Some(NodeKind::Element(data)) => {
                let info = tree.tags().lookup(&data.tag_name);
                if id != self.root && info.is_block && !self.accum.is_empty() && !self.ends_in_space()
                {
                    self.accum.push(' ');
                }
                if data.tag_name == "br" && !self.ends_in_space() {
                    self.accum.push(' ');
                }
            }
            Some(NodeKind::Text(text)) => {
                if Self::preserves_whitespace(tree, id) {
                    self.accum.push_str(&text.text);
                } else {
                    let normalised = normalise_whitespace(&text.text);
                    let normalised = if self.ends_in_space() {
                        normalised.trim_start()
                    } else {
                        normalised.as_str()
                    };
                    self.accum.push_str(normalised);
                }
            }
            _ => {}
        }
        ControlFlow::Continue(())
    }
}

impl DomTree {
    /// The visible text of `id` and its descendants.
    ///
    /// Whitespace runs collapse to one space unless inside a
    /// whitespace-preserving element; `br` and block-level elements
    /// separate their surroundings with a single space. The result is
    /// trimmed.
    #[must_use]
    pub fn text(&self, id: NodeId) -> String {
        let mut visitor = VisibleText {
            root: id,
            accum: String::new(),
        };
        let _ = traverse(self, id, &mut visitor);
        visitor.accum.trim().to_string()
    }

    /// The raw text of a text node, or `None` for other kinds.
    #[must_use]
    pub fn whole_text(&self, id: NodeId) -> Option<&str> {
        self.as_text(id).map(|t| t.text.as_str())
    }

    /// Trim surrounding whitespace from a text node in place.
    pub fn minimize(&mut self, id: NodeId) {
        if let Some(text) = self.as_text_mut(id) {
            let trimmed = text.text.trim();
            if trimmed.len() != text.text.len() {
                text.text = trimmed.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_whitespace() {
        assert_eq!(normalise_whitespace("  a \n\t b  "), " a b ");
        assert_eq!(normalise_whitespace("ab"), "ab");
    }
}
