//! Tag registry.
//!
//! A static table of known HTML tags and their layout/serialization flags,
//! plus a per-document overlay that remembers unknown tags seen written as
//! `<foo/>` so they serialize the same way.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use brindle_common::warning::warn_once;

/// What the parser and serializer need to know about a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct TagInfo {
    /// The tag is in the registry.
    pub is_known: bool,
    /// Block-level for visible-text extraction.
    pub is_block: bool,
    /// Starts on its own line when pretty printing.
    pub format_as_block: bool,
    /// Void element, or an unknown tag marked self-closing.
    pub is_self_closing: bool,
    /// Whitespace inside is significant.
    pub preserve_whitespace: bool,
}

const BLOCK_TAGS: &[&str] = &[
    "html", "head", "body", "frameset", "script", "noscript", "style", "meta", "link", "title",
    "frame", "noframes", "section", "nav", "aside", "hgroup", "header", "footer", "p", "h1", "h2",
    "h3", "h4", "h5", "h6", "ul", "ol", "pre", "div", "blockquote", "hr", "address", "figure",
    "figcaption", "form", "fieldset", "ins", "del", "dl", "dt", "dd", "li", "table", "caption",
    "thead", "tfoot", "tbody", "colgroup", "col", "tr", "th", "td", "video", "audio", "canvas",
    "details", "menu", "plaintext", "article", "main", "listing", "xmp", "center", "dir",
];

const INLINE_TAGS: &[&str] = &[
    "object", "base", "font", "tt", "i", "b", "u", "big", "small", "em", "strong", "dfn", "code",
    "samp", "kbd", "var", "cite", "abbr", "time", "acronym", "mark", "ruby", "rt", "rp", "a",
    "img", "br", "wbr", "map", "q", "sub", "sup", "bdo", "iframe", "embed", "span", "input",
    "select", "textarea", "label", "button", "optgroup", "option", "legend", "datalist", "keygen",
    "output", "progress", "meter", "area", "param", "source", "track", "summary", "command",
    "basefont", "bgsound", "s", "strike", "nobr", "applet", "marquee", "image", "isindex",
];

/// Block tags that still flow inline when pretty printing.
const FORMAT_AS_INLINE: &[&str] = &[
    "title", "p", "h1", "h2", "h3", "h4", "h5", "h6", "pre", "address", "li", "th", "td",
    "script", "style", "ins", "del", "listing", "xmp",
];

const VOID_TAGS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "command", "embed", "frame", "hr", "img",
    "input", "keygen", "link", "meta", "param", "source", "track", "wbr",
];

const PRESERVE_WHITESPACE: &[&str] = &["pre", "plaintext", "title", "textarea", "listing", "xmp"];

static TAGS: LazyLock<HashMap<&'static str, TagInfo>> = LazyLock::new(|| {
    let mut tags = HashMap::new();
    for &name in BLOCK_TAGS {
        let _ = tags.insert(
            name,
            TagInfo {
                is_known: true,
                is_block: true,
                format_as_block: !FORMAT_AS_INLINE.contains(&name),
                ..TagInfo::default()
            },
        );
    }
    for &name in INLINE_TAGS {
        let _ = tags.insert(
            name,
            TagInfo {
                is_known: true,
                ..TagInfo::default()
            },
        );
    }
    for &name in VOID_TAGS {
        tags.entry(name).or_default().is_self_closing = true;
    }
    for &name in PRESERVE_WHITESPACE {
        tags.entry(name).or_default().preserve_whitespace = true;
    }
    tags
});

/// Look up `name` in the static table only.
///
/// Unknown tags are inline, non-void and report `is_known == false`.
#[must_use]
pub fn lookup(name: &str) -> TagInfo {
    TAGS.get(name).copied().unwrap_or_default()
}

/// True if `name` is a void element.
#[must_use]
pub fn is_void(name: &str) -> bool {
    lookup(name).is_self_closing
}

/// A document's view of the tag table.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    marked_self_closing: HashSet<String>,
}

impl TagRegistry {
    /// A registry with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `name`, including self-closing marks made on this document.
    #[must_use]
    pub fn lookup(&self, name: &str) -> TagInfo {
        let mut info = lookup(name);
        if self.marked_self_closing.contains(name) {
            info.is_self_closing = true;
        }
        info
    }

    /// Remember that an unknown tag was written self-closed.
    ///
    /// Known tags keep their table entry; returns true if the mark was new.
    pub fn mark_self_closing(&mut self, name: &str) -> bool {
        if lookup(name).is_known {
            return false;
        }
        let added = self.marked_self_closing.insert(name.to_string());
        if added {
            warn_once("Tag Registry", &format!("treating unknown tag <{name}/> as self-closing"));
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_flags() {
        let br = lookup("br");
        assert!(br.is_known && br.is_self_closing && !br.is_block);

        let div = lookup("div");
        assert!(div.is_block && div.format_as_block && !div.is_self_closing);

        let p = lookup("p");
        assert!(p.is_block && !p.format_as_block);

        assert!(lookup("pre").preserve_whitespace);
        assert!(!lookup("x-widget").is_known);
    }

    #[test]
    fn test_mark_self_closing_only_affects_unknown_tags() {
        let mut tags = TagRegistry::new();
        assert!(tags.mark_self_closing("x-icon"));
        assert!(!tags.mark_self_closing("x-icon"));
        assert!(tags.lookup("x-icon").is_self_closing);

        assert!(!tags.mark_self_closing("div"));
        assert!(!tags.lookup("div").is_self_closing);
    }
}
