//! HTML serialization.
//!
//! Output is produced by a [`NodeVisitor`] writing start tags on `head` and
//! end tags on `tail`. Formatting is controlled by an explicit
//! [`OutputSettings`] value; there is no shared global default.

use std::ops::ControlFlow;
use std::str::FromStr;

use strum_macros::{Display, EnumString};
use thiserror::Error;

use crate::entities;
use crate::tag::TagRegistry;
use crate::text::normalise_whitespace;
use crate::traverse::{NodeVisitor, traverse};
use crate::{DomTree, NodeId, NodeKind};

/// Which characters get named entity references on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum EscapeMode {
    /// Only the characters that must be escaped; unencodable characters
    /// become numeric references.
    #[default]
    #[strum(to_string = "minimal")]
    Minimal,
    /// Unencodable characters use a named reference when one exists.
    #[strum(to_string = "extended")]
    Extended,
}

/// The output character set, used to decide which characters need escaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Charset {
    /// Every character is encodable.
    #[default]
    #[strum(to_string = "UTF-8", serialize = "utf8")]
    Utf8,
    /// 7-bit ASCII.
    #[strum(to_string = "US-ASCII", serialize = "ascii")]
    Ascii,
    /// ISO-8859-1.
    #[strum(to_string = "ISO-8859-1", serialize = "latin1")]
    Latin1,
}

impl Charset {
    /// True if `c` can be written in this charset without escaping.
    #[must_use]
    pub const fn can_encode(self, c: char) -> bool {
        match self {
            Self::Utf8 => true,
            Self::Ascii => (c as u32) < 0x80,
            Self::Latin1 => (c as u32) < 0x100,
        }
    }
}

/// Errors building [`OutputSettings`] from names.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// The charset name is not one we can encode to.
    #[error("unsupported charset: {0}")]
    UnknownCharset(String),
    /// The escape mode name is not `minimal` or `extended`.
    #[error("unknown escape mode: {0}")]
    UnknownEscapeMode(String),
}

/// Serialization configuration.
///
/// `Default` gives minimal escaping, UTF-8, pretty printing on and an
/// indent of one space per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSettings {
    /// Entity set used for unencodable characters.
    pub escape_mode: EscapeMode,
    /// Target charset.
    pub charset: Charset,
    /// Put block elements on their own indented lines.
    pub pretty_print: bool,
    /// Spaces per nesting level when pretty printing.
    pub indent_amount: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            escape_mode: EscapeMode::Minimal,
            charset: Charset::Utf8,
            pretty_print: true,
            indent_amount: 1,
        }
    }
}

impl OutputSettings {
    /// Set the escape mode.
    #[must_use]
    pub const fn escape_mode(mut self, escape_mode: EscapeMode) -> Self {
        self.escape_mode = escape_mode;
        self
    }

    /// Set the charset.
    #[must_use]
    pub const fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Enable or disable pretty printing.
    #[must_use]
    pub const fn pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    /// Set the indent width.
    #[must_use]
    pub const fn indent_amount(mut self, indent_amount: usize) -> Self {
        self.indent_amount = indent_amount;
        self
    }

    /// Set the charset from a name such as `"utf-8"` or `"ISO-8859-1"`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownCharset`] if the name is not supported.
    pub fn with_charset_name(self, name: &str) -> Result<Self, SettingsError> {
        let charset = Charset::from_str(name.trim())
            .map_err(|_| SettingsError::UnknownCharset(name.to_string()))?;
        Ok(self.charset(charset))
    }

    /// Set the escape mode from `"minimal"` or `"extended"`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownEscapeMode`] for any other name.
    pub fn with_escape_mode_name(self, name: &str) -> Result<Self, SettingsError> {
        let mode = EscapeMode::from_str(name.trim())
            .map_err(|_| SettingsError::UnknownEscapeMode(name.to_string()))?;
        Ok(self.escape_mode(mode))
    }
}

/// Serialize the node `id` (and its subtree) under `settings`.
///
/// A Document serializes as its children concatenated.
#[must_use]
pub fn serialize(tree: &DomTree, id: NodeId, settings: &OutputSettings) -> String {
    let mut visitor = OuterHtml::new(settings, tree.tags());
    if matches!(tree.get(id).map(|n| &n.kind), Some(NodeKind::Document)) {
        for &child in tree.children(id) {
            let _ = traverse(tree, child, &mut visitor);
        }
    } else {
        let _ = traverse(tree, id, &mut visitor);
    }
    visitor.accum
}

/// Serialize with [`OutputSettings::default`].
#[must_use]
pub fn serialize_default(tree: &DomTree, id: NodeId) -> String {
    serialize(tree, id, &OutputSettings::default())
}

impl DomTree {
    /// Outer HTML of `id` using this document's settings.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        serialize(self, id, self.output_settings())
    }

    /// HTML of `id`'s children using this document's settings.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut visitor = OuterHtml::new(self.output_settings(), self.tags());
        for &child in self.children(id) {
            let _ = traverse(self, child, &mut visitor);
        }
        visitor.accum
    }
}

struct OuterHtml<'a> {
    accum: String,
    settings: &'a OutputSettings,
    tags: &'a TagRegistry,
    /// Depth of the outermost open whitespace-preserving element.
    preserve_depth: Option<usize>,
}

impl<'a> OuterHtml<'a> {
    const fn new(settings: &'a OutputSettings, tags: &'a TagRegistry) -> Self {
        Self {
            accum: String::new(),
            settings,
            tags,
            preserve_depth: None,
        }
    }

    const fn formatting(&self) -> bool {
        self.settings.pretty_print && self.preserve_depth.is_none()
    }

    fn indent(&mut self, depth: usize) {
        self.accum.push('\n');
        self.accum
            .extend(std::iter::repeat_n(' ', depth * self.settings.indent_amount));
    }

    fn parent_formats_as_block(&self, tree: &DomTree, id: NodeId) -> bool {
        tree.parent(id).is_none_or(|parent| {
            tree.tag_name(parent)
                .is_none_or(|name| self.tags.lookup(name).format_as_block)
        })
    }
}

impl NodeVisitor for OuterHtml<'_> {
    fn head(&mut self, tree: &DomTree, id: NodeId, depth: usize) -> ControlFlow<()> {
        let Some(node) = tree.get(id) else {
            return ControlFlow::Continue(());
        };
        match &node.kind {
            NodeKind::Document => {}
            NodeKind::Element(data) => {
                let info = self.tags.lookup(&data.tag_name);
                if self.formatting() && info.format_as_block && !self.accum.is_empty() {
                    self.indent(depth);
                }
                self.accum.push('<');
                self.accum.push_str(&data.tag_name);
                data.attrs.html(&mut self.accum, self.settings);
                if node.children().is_empty() && info.is_self_closing {
                    self.accum.push_str("/>");
                } else {
                    self.accum.push('>');
                }
                if info.preserve_whitespace && self.preserve_depth.is_none() {
                    self.preserve_depth = Some(depth);
                }
            }
            // Unescaped text (raw text element bodies, doctypes) is written verbatim.
            NodeKind::Text(text) => {
                if self.formatting() && text.escape {
                    if text.is_blank() && self.parent_formats_as_block(tree, id) {
                        return ControlFlow::Continue(());
                    }
                    let collapsed = normalise_whitespace(&text.text);
                    self.push_text(&collapsed, text.escape);
                } else {
                    self.push_text(&text.text, text.escape);
                }
            }
            NodeKind::Comment(data) => {
                self.accum.push_str("<!--");
                self.accum.push_str(data);
                self.accum.push_str("-->");
            }
        }
        ControlFlow::Continue(())
    }

    fn tail(&mut self, tree: &DomTree, id: NodeId, depth: usize) -> ControlFlow<()> {
        let Some(node) = tree.get(id) else {
            return ControlFlow::Continue(());
        };
        if let NodeKind::Element(data) = &node.kind {
            let info = self.tags.lookup(&data.tag_name);
            if !(node.children().is_empty() && info.is_self_closing) {
                let has_element_child = node
                    .children()
                    .iter()
                    .any(|&child| tree.as_element(child).is_some());
                if self.formatting() && info.format_as_block && has_element_child {
                    self.indent(depth);
                }
                self.accum.push_str("</");
                self.accum.push_str(&data.tag_name);
                self.accum.push('>');
            }
            if self.preserve_depth == Some(depth) {
                self.preserve_depth = None;
            }
        }
        ControlFlow::Continue(())
    }
}

impl OuterHtml<'_> {
    fn push_text(&mut self, text: &str, escape: bool) {
        if escape {
            self.accum
                .push_str(&entities::escape(text, self.settings, false));
        } else {
            self.accum.push_str(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_names() {
        let settings = OutputSettings::default()
            .with_charset_name("iso-8859-1")
            .and_then(|s| s.with_escape_mode_name("EXTENDED"));
        let settings = settings.unwrap();
        assert_eq!(settings.charset, Charset::Latin1);
        assert_eq!(settings.escape_mode, EscapeMode::Extended);
        assert_eq!(settings.charset.to_string(), "ISO-8859-1");

        assert_eq!(
            OutputSettings::default().with_charset_name("koi8-r"),
            Err(SettingsError::UnknownCharset("koi8-r".to_string()))
        );
    }
}
