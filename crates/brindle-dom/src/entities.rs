//! Named character references and output escaping.
//!
//! The table holds the legacy "base" names (the Latin-1 set plus `amp`,
//! `lt`, `gt`, `quot`), which are recognised even without a trailing
//! semicolon, and an extended set of common symbols that require one.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::LazyLock;

use crate::serialize::{EscapeMode, OutputSettings};

/// Names for U+00A0 through U+00FF, in code point order.
const LATIN1_NAMES: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect", "uml", "copy", "ordf",
    "laquo", "not", "shy", "reg", "macr", "deg", "plusmn", "sup2", "sup3", "acute", "micro",
    "para", "middot", "cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest",
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil", "Egrave", "Eacute",
    "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml", "ETH", "Ntilde", "Ograve", "Oacute",
    "Ocirc", "Otilde", "Ouml", "times", "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute",
    "THORN", "szlig", "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil",
    "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml", "eth", "ntilde",
    "ograve", "oacute", "ocirc", "otilde", "ouml", "divide", "oslash", "ugrave", "uacute", "ucirc",
    "uuml", "yacute", "thorn", "yuml",
];

const EXTENDED: &[(&str, char)] = &[
    ("apos", '\''),
    ("OElig", '\u{0152}'),
    ("oelig", '\u{0153}'),
    ("Scaron", '\u{0160}'),
    ("scaron", '\u{0161}'),
    ("Yuml", '\u{0178}'),
    ("fnof", '\u{0192}'),
    ("circ", '\u{02C6}'),
    ("tilde", '\u{02DC}'),
    ("Omega", '\u{03A9}'),
    ("alpha", '\u{03B1}'),
    ("beta", '\u{03B2}'),
    ("gamma", '\u{03B3}'),
    ("delta", '\u{03B4}'),
    ("lambda", '\u{03BB}'),
    ("mu", '\u{03BC}'),
    ("pi", '\u{03C0}'),
    ("sigma", '\u{03C3}'),
    ("omega", '\u{03C9}'),
    ("ensp", '\u{2002}'),
    ("emsp", '\u{2003}'),
    ("thinsp", '\u{2009}'),
    ("zwnj", '\u{200C}'),
    ("zwj", '\u{200D}'),
    ("lrm", '\u{200E}'),
    ("rlm", '\u{200F}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("sbquo", '\u{201A}'),
    ("ldquo", '\u{201C}'),
    ("rdquo", '\u{201D}'),
    ("bdquo", '\u{201E}'),
    ("dagger", '\u{2020}'),
    ("Dagger", '\u{2021}'),
    ("bull", '\u{2022}'),
    ("hellip", '\u{2026}'),
    ("permil", '\u{2030}'),
    ("prime", '\u{2032}'),
    ("Prime", '\u{2033}'),
    ("lsaquo", '\u{2039}'),
    ("rsaquo", '\u{203A}'),
    ("oline", '\u{203E}'),
    ("frasl", '\u{2044}'),
    ("euro", '\u{20AC}'),
    ("trade", '\u{2122}'),
    ("larr", '\u{2190}'),
    ("uarr", '\u{2191}'),
    ("rarr", '\u{2192}'),
    ("darr", '\u{2193}'),
    ("harr", '\u{2194}'),
    ("forall", '\u{2200}'),
    ("part", '\u{2202}'),
    ("exist", '\u{2203}'),
    ("empty", '\u{2205}'),
    ("nabla", '\u{2207}'),
    ("isin", '\u{2208}'),
    ("notin", '\u{2209}'),
    ("prod", '\u{220F}'),
    ("sum", '\u{2211}'),
    ("minus", '\u{2212}'),
    ("radic", '\u{221A}'),
    ("infin", '\u{221E}'),
    ("and", '\u{2227}'),
    ("or", '\u{2228}'),
    ("cap", '\u{2229}'),
    ("cup", '\u{222A}'),
    ("int", '\u{222B}'),
    ("asymp", '\u{2248}'),
    ("ne", '\u{2260}'),
    ("equiv", '\u{2261}'),
    ("le", '\u{2264}'),
    ("ge", '\u{2265}'),
    ("sub", '\u{2282}'),
    ("sup", '\u{2283}'),
    ("loz", '\u{25CA}'),
    ("spades", '\u{2660}'),
    ("clubs", '\u{2663}'),
    ("hearts", '\u{2665}'),
    ("diams", '\u{2666}'),
];

/// A table entry: the replacement character and whether the name is a
/// legacy one usable without `;`.
#[derive(Debug, Clone, Copy)]
struct Entry {
    value: char,
    base: bool,
}

static BY_NAME: LazyLock<HashMap<&'static str, Entry>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (name, value) in [("amp", '&'), ("lt", '<'), ("gt", '>'), ("quot", '"')] {
        let _ = map.insert(name, Entry { value, base: true });
    }
    for (value, &name) in ('\u{A0}'..='\u{FF}').zip(LATIN1_NAMES.iter()) {
        let _ = map.insert(name, Entry { value, base: true });
    }
    for &(name, value) in EXTENDED {
        let _ = map.insert(name, Entry { value, base: false });
    }
    map
});

static BY_CHAR: LazyLock<HashMap<char, &'static str>> = LazyLock::new(|| {
    BY_NAME
        .iter()
        .map(|(&name, entry)| (entry.value, name))
        .collect()
});

/// The character named by `name` (without `&` or `;`).
#[must_use]
pub fn lookup(name: &str) -> Option<char> {
    BY_NAME.get(name).map(|e| e.value)
}

/// True if `name` is any known entity.
#[must_use]
pub fn is_named(name: &str) -> bool {
    BY_NAME.contains_key(name)
}

/// True if `name` is a legacy entity recognised without a semicolon.
#[must_use]
pub fn is_base_named(name: &str) -> bool {
    BY_NAME.get(name).is_some_and(|e| e.base)
}

/// The entity name for `c`, if it has one.
#[must_use]
pub fn name_for(c: char) -> Option<&'static str> {
    BY_CHAR.get(&c).copied()
}

/// Escape `text` for output under `settings`.
///
/// `&` and U+00A0 are always escaped. In text, `<` and `>` are escaped; in
/// attribute values, `"` is. A character the target charset cannot encode
/// is written by name in [`EscapeMode::Extended`] when one exists, and as a
/// hexadecimal reference otherwise.
#[must_use]
pub fn escape(text: &str, settings: &OutputSettings, in_attribute: bool) -> String {
    let mut accum = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => accum.push_str("&amp;"),
            '\u{A0}' => accum.push_str("&nbsp;"),
            '<' if !in_attribute => accum.push_str("&lt;"),
            '>' if !in_attribute => accum.push_str("&gt;"),
            '"' if in_attribute => accum.push_str("&quot;"),
            c if settings.charset.can_encode(c) => accum.push(c),
            c => match (settings.escape_mode, name_for(c)) {
                (EscapeMode::Extended, Some(name)) => {
                    accum.push('&');
                    accum.push_str(name);
                    accum.push(';');
                }
                _ => {
                    let _ = write!(accum, "&#x{:x};", u32::from(c));
                }
            },
        }
    }
    accum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::Charset;

    #[test]
    fn test_lookup_base_and_extended() {
        assert_eq!(lookup("amp"), Some('&'));
        assert_eq!(lookup("eacute"), Some('é'));
        assert_eq!(lookup("hellip"), Some('…'));
        assert!(is_base_named("copy"));
        assert!(!is_base_named("hellip"));
        assert!(is_named("hellip"));
        assert!(!is_named("bogus"));
    }

    #[test]
    fn test_escape_text_and_attribute() {
        let settings = OutputSettings::default();
        assert_eq!(escape("a < b & \"c\"", &settings, false), "a &lt; b &amp; \"c\"");
        assert_eq!(escape("a < b & \"c\"", &settings, true), "a < b &amp; &quot;c&quot;");
        assert_eq!(escape("x\u{A0}y", &settings, false), "x&nbsp;y");
    }

    #[test]
    fn test_escape_unencodable_characters() {
        let ascii = OutputSettings::default().charset(Charset::Ascii);
        assert_eq!(escape("é…", &ascii, false), "&#xe9;&#x2026;");

        let extended = ascii.escape_mode(EscapeMode::Extended);
        assert_eq!(escape("é…", &extended, false), "&eacute;&hellip;");
    }
}
