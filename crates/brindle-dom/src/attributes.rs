//! Ordered attribute list for elements and tag tokens.
//!
//! Keys are trimmed and lowercased on the way in, so `put("ID", ..)` and
//! `put(" id ", ..)` address the same entry. Entries keep first-seen order;
//! writing an existing key overwrites its value in place.

use std::slice;

use crate::entities;
use crate::serialize::OutputSettings;

/// A single `key="value"` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    key: String,
    value: String,
}

impl Attribute {
    /// Create an attribute, normalising the key.
    ///
    /// # Panics
    ///
    /// Panics if the key is empty after trimming.
    #[must_use]
    pub fn new(key: &str, value: &str) -> Self {
        let key = normalise_key(key);
        assert!(!key.is_empty(), "attribute key must not be empty");
        Self {
            key,
            value: value.to_string(),
        }
    }

    /// The normalised key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value.
    pub fn set_value(&mut self, value: &str) {
        value.clone_into(&mut self.value);
    }

    /// Append ` key="escaped value"` to `accum`.
    pub fn html(&self, accum: &mut String, settings: &OutputSettings) {
        accum.push(' ');
        accum.push_str(&self.key);
        accum.push_str("=\"");
        accum.push_str(&entities::escape(&self.value, settings, true));
        accum.push('"');
    }
}

/// Insertion-ordered attributes with case-insensitive keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    attrs: Vec<Attribute>,
}

impl Attributes {
    /// An empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self { attrs: Vec::new() }
    }

    /// Look up a value by key (any case, surrounding whitespace ignored).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = normalise_key(key);
        self.attrs
            .iter()
            .find(|a| a.key == key)
            .map(Attribute::value)
    }

    /// Set `key` to `value`. An existing entry keeps its position.
    ///
    /// # Panics
    ///
    /// Panics if the key is empty after trimming.
    pub fn put(&mut self, key: &str, value: &str) {
        self.put_attribute(Attribute::new(key, value));
    }

    /// Insert a prepared attribute, overwriting any entry with the same key.
    pub fn put_attribute(&mut self, attribute: Attribute) {
        match self.attrs.iter_mut().find(|a| a.key == attribute.key) {
            Some(existing) => existing.value = attribute.value,
            None => self.attrs.push(attribute),
        }
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let key = normalise_key(key);
        let index = self.attrs.iter().position(|a| a.key == key)?;
        Some(self.attrs.remove(index).value)
    }

    /// True if `key` is present.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// True if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Attribute> {
        self.attrs.iter()
    }

    /// Append every attribute as ` key="value"` to `accum`.
    pub fn html(&self, accum: &mut String, settings: &OutputSettings) {
        for attr in &self.attrs {
            attr.html(accum, settings);
        }
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.put(key.as_ref(), value.as_ref());
        }
        attrs
    }
}

fn normalise_key(key: &str) -> String {
    key.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_normalises_and_overwrites_in_place() {
        let mut attrs = Attributes::new();
        attrs.put("ID", "x");
        attrs.put("class", "c");
        attrs.put(" id ", "y");

        assert_eq!(attrs.len(), 2);
        let keys: Vec<&str> = attrs.iter().map(Attribute::key).collect();
        assert_eq!(keys, ["id", "class"]);
        assert_eq!(attrs.get("Id"), Some("y"));
    }

    #[test]
    fn test_remove_returns_value() {
        let mut attrs: Attributes = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(attrs.remove("A").as_deref(), Some("1"));
        assert_eq!(attrs.remove("a"), None);
        assert!(attrs.has_key("b"));
    }

    #[test]
    #[should_panic(expected = "attribute key must not be empty")]
    fn test_empty_key_panics() {
        let mut attrs = Attributes::new();
        attrs.put("  ", "v");
    }

    #[test]
    fn test_html_escapes_quotes() {
        let attrs: Attributes = [("title", "say \"hi\" & go")].into_iter().collect();
        let mut out = String::new();
        attrs.html(&mut out, &OutputSettings::default());
        assert_eq!(out, " title=\"say &quot;hi&quot; &amp; go\"");
    }
}
