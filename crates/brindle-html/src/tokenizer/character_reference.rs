//! Character reference decoding.
//!
//! Shared by the tokenizer (which reports problems as parse errors) and
//! [`unescape`] (which ignores them).

use brindle_dom::entities;

use super::core::{REPLACEMENT_CHARACTER, is_whitespace_char};
use crate::cursor::Cursor;

/// Decode the reference that follows an already consumed `&`.
///
/// Returns `None` and leaves the cursor where it was when the input is not
/// a reference, in which case the `&` stands for itself. `additional_allowed`
/// is the character that ends the surrounding attribute value, if any.
/// Problems are pushed onto `problems` as messages.
pub(crate) fn consume_character_reference(
    cursor: &mut Cursor<'_>,
    additional_allowed: Option<char>,
    in_attribute: bool,
    problems: &mut Vec<String>,
) -> Option<char> {
    let c = cursor.current()?;
    if Some(c) == additional_allowed || is_whitespace_char(c) || c == '<' || c == '&' {
        return None;
    }

    cursor.mark();
    if cursor.match_consume("#") {
        consume_numeric(cursor, problems)
    } else {
        consume_named(cursor, in_attribute, problems)
    }
}

fn consume_numeric(cursor: &mut Cursor<'_>, problems: &mut Vec<String>) -> Option<char> {
    let is_hex = cursor.match_consume_ignore_case("x");
    let digits = if is_hex {
        cursor.consume_hex_sequence()
    } else {
        cursor.consume_digit_sequence()
    };
    if digits.is_empty() {
        problems.push("numeric reference with no numerals".to_string());
        cursor.rewind_to_mark();
        return None;
    }
    if !cursor.match_consume(";") {
        problems.push("missing semicolon".to_string());
    }

    let radix = if is_hex { 16 } else { 10 };
    // Out of range values (including ones too long for u32) and
    // surrogates fail one of these two steps.
    match u32::from_str_radix(digits, radix)
        .ok()
        .filter(|&code| code != 0)
        .and_then(char::from_u32)
    {
        Some(c) => Some(c),
        None => {
            problems.push("character outside of valid range".to_string());
            Some(REPLACEMENT_CHARACTER)
        }
    }
}

fn consume_named(
    cursor: &mut Cursor<'_>,
    in_attribute: bool,
    problems: &mut Vec<String>,
) -> Option<char> {
    let name = cursor.consume_letter_then_digit_sequence();
    let looks_legit = cursor.matches(";");
    let found = entities::is_base_named(name) || (entities::is_named(name) && looks_legit);

    if !found {
        cursor.rewind_to_mark();
        if looks_legit {
            problems.push(format!("invalid named reference '{name}'"));
        }
        return None;
    }

    // `href="?a=1&copy=2"` is a query string, not a reference.
    if in_attribute
        && cursor
            .current()
            .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '=' | '-' | '_'))
    {
        cursor.rewind_to_mark();
        return None;
    }

    if !cursor.match_consume(";") {
        problems.push("missing semicolon".to_string());
    }
    entities::lookup(name)
}

/// Decode every character reference in `text`.
///
/// Malformed references are kept as they are. With `in_attribute` set,
/// the stricter attribute-value rules apply.
#[must_use]
pub fn unescape(text: &str, in_attribute: bool) -> String {
    let mut cursor = Cursor::new(text);
    let mut problems = Vec::new();
    let mut out = String::with_capacity(text.len());

    while !cursor.is_empty() {
        out.push_str(cursor.consume_to('&'));
        if cursor.match_consume("&") {
            match consume_character_reference(&mut cursor, None, in_attribute, &mut problems) {
                Some(c) => out.push(c),
                None => out.push('&'),
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(input: &str, in_attribute: bool) -> (Option<char>, usize, Vec<String>) {
        let mut cursor = Cursor::new(input);
        let mut problems = Vec::new();
        let c = consume_character_reference(&mut cursor, None, in_attribute, &mut problems);
        (c, cursor.pos(), problems)
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode("#65;", false), (Some('A'), 4, vec![]));
        assert_eq!(decode("#x41;", false), (Some('A'), 5, vec![]));
        assert_eq!(
            decode("#65 ", false),
            (Some('A'), 3, vec!["missing semicolon".to_string()])
        );
        assert_eq!(
            decode("#;", false),
            (None, 0, vec!["numeric reference with no numerals".to_string()])
        );
    }

    #[test]
    fn test_invalid_code_points_become_replacement() {
        for input in ["#0;", "#xD800;", "#x110000;", "#99999999999;"] {
            let (c, _, problems) = decode(input, false);
            assert_eq!(c, Some(REPLACEMENT_CHARACTER), "{input}");
            assert_eq!(problems, vec!["character outside of valid range".to_string()]);
        }
    }

    #[test]
    fn test_named_references() {
        assert_eq!(decode("amp;", false), (Some('&'), 4, vec![]));
        assert_eq!(
            decode("lt b", false),
            (Some('<'), 2, vec!["missing semicolon".to_string()])
        );
        assert_eq!(
            decode("bogus;", false),
            (None, 0, vec!["invalid named reference 'bogus'".to_string()])
        );
        assert_eq!(decode(" x", false), (None, 0, vec![]));
    }

    #[test]
    fn test_attribute_rules() {
        assert_eq!(decode("copy=2", true), (None, 0, vec![]));
        assert_eq!(decode("copy=2", false).0, Some('\u{A9}'));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("a &amp; b &lt;c&gt; &#x263A;", false), "a & b <c> \u{263A}");
        assert_eq!(unescape("AT&T &bogus; &", false), "AT&T &bogus; &");
        assert_eq!(unescape("?a=1&copy=2", true), "?a=1&copy=2");
    }
}
