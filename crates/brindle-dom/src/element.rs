//! Element conveniences: attributes, classes, values and text replacement.

use crate::{DomTree, NodeId};

impl DomTree {
    /// The value of attribute `key` on element `id`.
    #[must_use]
    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        self.as_element(id).and_then(|e| e.attrs.get(key))
    }

    /// True if element `id` has attribute `key`.
    #[must_use]
    pub fn has_attr(&self, id: NodeId, key: &str) -> bool {
        self.attr(id, key).is_some()
    }

    /// Set attribute `key` on element `id`. Ignored for non-elements.
    ///
    /// # Panics
    ///
    /// Panics if `key` is empty after trimming.
    pub fn set_attr(&mut self, id: NodeId, key: &str, value: &str) {
        if let Some(element) = self.as_element_mut(id) {
            element.attrs.put(key, value);
        }
    }

    /// Remove attribute `key` from element `id`, returning its old value.
    pub fn remove_attr(&mut self, id: NodeId, key: &str) -> Option<String> {
        self.as_element_mut(id).and_then(|e| e.attrs.remove(key))
    }

    /// The `id` attribute of element `id`.
    #[must_use]
    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.attr(id, "id")
    }

    /// Class names in attribute order, without duplicates.
    #[must_use]
    pub fn class_names(&self, id: NodeId) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.attr(id, "class").unwrap_or("").split_whitespace() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// True if element `id` has class `name` (ASCII case-insensitive).
    #[must_use]
    pub fn has_class(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, "class")
            .unwrap_or("")
            .split_whitespace()
            .any(|c| c.eq_ignore_ascii_case(name))
    }

    /// Replace the class attribute with `names` joined by spaces.
    pub fn set_class_names(&mut self, id: NodeId, names: &[&str]) {
        self.set_attr(id, "class", &names.join(" "));
    }

    /// Add class `name` if not already present.
    pub fn add_class(&mut self, id: NodeId, name: &str) {
        if self.has_class(id, name) {
            return;
        }
        let mut names: Vec<String> = self.class_names(id).into_iter().map(String::from).collect();
        names.push(name.to_string());
        let joined = names.join(" ");
        self.set_attr(id, "class", &joined);
    }

    /// Remove class `name` (ASCII case-insensitive).
    pub fn remove_class(&mut self, id: NodeId, name: &str) {
        let kept: Vec<String> = self
            .class_names(id)
            .into_iter()
            .filter(|c| !c.eq_ignore_ascii_case(name))
            .map(String::from)
            .collect();
        let joined = kept.join(" ");
        self.set_attr(id, "class", &joined);
    }

    /// Form value: a `textarea`'s text, otherwise the `value` attribute.
    #[must_use]
    pub fn value(&self, id: NodeId) -> String {
        if self.tag_name(id) == Some("textarea") {
            self.text(id)
        } else {
            self.attr(id, "value").unwrap_or_default().to_string()
        }
    }

    /// Replace the children of `id` with a single text node.
    ///
    /// On a text node, replaces its content instead.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(data) = self.as_text_mut(id) {
            text.clone_into(&mut data.text);
            return;
        }
        self.empty(id);
        let child = self.alloc_text(text, true);
        self.append_child(id, child);
    }
}
