//! Position-tracked read access to the input text.
//!
//! The cursor never copies the input: every span it returns borrows from
//! the original string. Positions are byte offsets and always sit on a
//! `char` boundary. Reading past the end keeps returning `None`.

/// A read position over an immutable input buffer.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    mark: usize,
}

impl<'a> Cursor<'a> {
    /// Start reading `input` from its first character.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            mark: 0,
        }
    }

    /// Current byte offset into the input.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// True once every character has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// The character at the read position, or `None` at end of input.
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Return the current character and move past it.
    pub fn consume(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Move past the current character. No-op at end of input.
    pub fn advance(&mut self) {
        let _ = self.consume();
    }

    /// Step back over the previously consumed character.
    pub fn unconsume(&mut self) {
        if let Some(c) = self.input[..self.pos].chars().next_back() {
            self.pos -= c.len_utf8();
        }
    }

    /// The character `offset` characters ahead; `peek(0)` is [`current`](Self::current).
    #[must_use]
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    /// Remember the current position.
    pub const fn mark(&mut self) {
        self.mark = self.pos;
    }

    /// Go back to the last [`mark`](Self::mark).
    pub const fn rewind_to_mark(&mut self) {
        self.pos = self.mark;
    }

    // =========================================================================
    // Span consumption
    // =========================================================================

    /// Consume characters while `predicate` holds and return them.
    pub fn consume_while<F>(&mut self, mut predicate: F) -> &'a str
    where
        F: FnMut(char) -> bool,
    {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !predicate(c))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += len;
        &rest[..len]
    }

    /// Consume up to (not including) `c`, or to the end.
    pub fn consume_to(&mut self, c: char) -> &'a str {
        self.consume_while(|x| x != c)
    }

    /// Consume up to the first of `chars`, or to the end.
    pub fn consume_to_any(&mut self, chars: &[char]) -> &'a str {
        self.consume_while(|x| !chars.contains(&x))
    }

    /// Consume up to (not including) the literal `seq`, or to the end.
    pub fn consume_until(&mut self, seq: &str) -> &'a str {
        let rest = self.rest();
        let len = rest.find(seq).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Consume everything that is left.
    pub fn consume_to_end(&mut self) -> &'a str {
        let rest = self.rest();
        self.pos = self.input.len();
        rest
    }

    /// Consume a run of ASCII letters.
    pub fn consume_letter_sequence(&mut self) -> &'a str {
        self.consume_while(|c| c.is_ascii_alphabetic())
    }

    /// Consume ASCII letters followed by ASCII digits, as in `frac12`.
    pub fn consume_letter_then_digit_sequence(&mut self) -> &'a str {
        let start = self.pos;
        let _ = self.consume_while(|c| c.is_ascii_alphabetic());
        let _ = self.consume_while(|c| c.is_ascii_digit());
        &self.input[start..self.pos]
    }

    /// Consume a run of hexadecimal digits.
    pub fn consume_hex_sequence(&mut self) -> &'a str {
        self.consume_while(|c| c.is_ascii_hexdigit())
    }

    /// Consume a run of decimal digits.
    pub fn consume_digit_sequence(&mut self) -> &'a str {
        self.consume_while(|c| c.is_ascii_digit())
    }

    // =========================================================================
    // Lookahead
    // =========================================================================

    /// True if the input continues with `seq`.
    #[must_use]
    pub fn matches(&self, seq: &str) -> bool {
        self.rest().starts_with(seq)
    }

    /// True if the input continues with `seq`, ignoring ASCII case.
    #[must_use]
    pub fn matches_ignore_case(&self, seq: &str) -> bool {
        self.rest()
            .as_bytes()
            .get(..seq.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(seq.as_bytes()))
    }

    /// True if the current character is one of `chars`.
    #[must_use]
    pub fn matches_any(&self, chars: &[char]) -> bool {
        self.current().is_some_and(|c| chars.contains(&c))
    }

    /// True if the current character is an ASCII letter.
    #[must_use]
    pub fn matches_letter(&self) -> bool {
        self.current().is_some_and(|c| c.is_ascii_alphabetic())
    }

    /// True if the current character is an ASCII digit.
    #[must_use]
    pub fn matches_digit(&self) -> bool {
        self.current().is_some_and(|c| c.is_ascii_digit())
    }

    /// Consume `seq` if the input continues with it.
    pub fn match_consume(&mut self, seq: &str) -> bool {
        if self.matches(seq) {
            self.pos += seq.len();
            true
        } else {
            false
        }
    }

    /// Consume `seq` (ignoring ASCII case) if the input continues with it.
    pub fn match_consume_ignore_case(&mut self, seq: &str) -> bool {
        if self.matches_ignore_case(seq) {
            self.pos += seq.len();
            true
        } else {
            false
        }
    }

    /// True if `seq` occurs anywhere in the unread input, ignoring ASCII case.
    #[must_use]
    pub fn contains_ignore_case(&self, seq: &str) -> bool {
        let needle = seq.as_bytes();
        !needle.is_empty()
            && self
                .rest()
                .as_bytes()
                .windows(needle.len())
                .any(|w| w.eq_ignore_ascii_case(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_and_eof_sentinel() {
        let mut cursor = Cursor::new("hé");
        assert_eq!(cursor.consume(), Some('h'));
        assert_eq!(cursor.current(), Some('é'));
        cursor.advance();
        assert!(cursor.is_empty());
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.consume(), None);
        assert_eq!(cursor.consume(), None);
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn test_spans() {
        let mut cursor = Cursor::new("abc123 <!-- x -->tail");
        assert_eq!(cursor.consume_letter_then_digit_sequence(), "abc123");
        assert_eq!(cursor.consume_to('<'), " ");
        assert_eq!(cursor.consume_until("-->"), "<!-- x ");
        assert!(cursor.match_consume("-->"));
        assert_eq!(cursor.consume_to_any(&['z', 'q']), "tail");
        assert_eq!(cursor.consume_until("missing"), "");
    }

    #[test]
    fn test_lookahead_and_mark() {
        let mut cursor = Cursor::new("DocType html");
        assert!(cursor.matches_ignore_case("doctype"));
        assert!(!cursor.matches("doctype"));
        assert!(cursor.contains_ignore_case("HTML"));
        assert_eq!(cursor.peek(3), Some('T'));

        cursor.mark();
        assert!(cursor.match_consume_ignore_case("DOCTYPE"));
        assert_eq!(cursor.current(), Some(' '));
        cursor.unconsume();
        assert_eq!(cursor.current(), Some('e'));
        cursor.rewind_to_mark();
        assert_eq!(cursor.pos(), 0);
    }
}
