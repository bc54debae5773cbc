use super::character_reference;
use super::core::{DoctypeId, Tokenizer, TokenizerState};
use super::token::Token;
use crate::error::{ErrorState, ParseError};

const COMPONENT: &str = "HTML Tokenizer";

// =============================================================================
// State transitions and emission
// =============================================================================

impl Tokenizer<'_> {
    /// Switch to `state` without consuming anything. The tree builder uses
    /// this to put the tokenizer into a raw text state.
    pub const fn switch_to(&mut self, state: TokenizerState) {
        self.state = state;
    }

    /// Consume the current character, then switch to `state`.
    pub(super) fn advance_to(&mut self, state: TokenizerState) {
        self.cursor.advance();
        self.state = state;
    }

    /// Make `token` the pending token.
    ///
    /// # Panics
    ///
    /// Panics if an earlier token has not been read yet.
    pub(super) fn emit(&mut self, token: Token) {
        assert!(self.pending.is_none(), "there is an unread token pending");

        match &token {
            Token::StartTag { name, .. } => {
                self.last_start_tag_name = Some(name.clone());
            }
            Token::EndTag { attributes, .. } if !attributes.is_empty() => {
                self.log_error("Attributes incorrectly present on end tag");
            }
            _ => {}
        }
        self.pending = Some(token);
    }

    /// Finish the token under construction and emit it.
    pub(super) fn emit_token(&mut self) {
        self.finish_attribute();
        if let Some(token) = self.current_token.take() {
            self.emit(token);
        }
    }

    pub(super) fn emit_str(&mut self, s: &str) {
        self.char_buffer.push_str(s);
    }

    pub(super) fn emit_char(&mut self, c: char) {
        self.char_buffer.push(c);
    }

    /// Not the end tag we were waiting for: what looked like one is text.
    pub(super) fn emit_end_tag_name_anything_else(&mut self, text: TokenizerState) {
        self.char_buffer.push_str("</");
        self.char_buffer.push_str(&self.temporary_buffer);
        self.current_token = None;
        self.switch_to(text);
    }

    /// True if the end tag being built closes the last start tag emitted.
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.last_start_tag_name, &self.current_token) {
            (Some(last), Some(Token::EndTag { name, .. })) => last == name,
            _ => false,
        }
    }
}

// =============================================================================
// Current token helpers
// =============================================================================

impl Tokenizer<'_> {
    pub(super) fn append_to_tag_name(&mut self, s: &str) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_tag_name(s);
        }
    }

    pub(super) fn append_to_comment(&mut self, s: &str) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_comment(s);
        }
    }

    pub(super) fn append_to_doctype_name(&mut self, s: &str) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_doctype_name(s);
        }
    }

    pub(super) fn append_to_doctype_identifier(&mut self, id: DoctypeId, s: &str) {
        if let Some(token) = self.current_token.as_mut() {
            match id {
                DoctypeId::Public => token.append_to_public_identifier(s),
                DoctypeId::System => token.append_to_system_identifier(s),
            }
        }
    }

    pub(super) fn set_force_quirks(&mut self) {
        if let Some(token) = self.current_token.as_mut() {
            token.set_force_quirks();
        }
    }

    /// Begin a new attribute, storing the previous one first.
    pub(super) fn start_new_attribute(&mut self) {
        self.finish_attribute();
        self.current_attribute = Some((String::new(), String::new()));
    }

    pub(super) fn append_to_attribute_name(&mut self, s: &str) {
        if let Some((name, _)) = self.current_attribute.as_mut() {
            name.push_str(s);
        }
    }

    pub(super) fn append_to_attribute_value(&mut self, s: &str) {
        if let Some((_, value)) = self.current_attribute.as_mut() {
            value.push_str(s);
        }
    }

    /// Move the pending attribute onto the current tag.
    ///
    /// Names that are blank after trimming are dropped. A repeated name
    /// overwrites the earlier value in place.
    fn finish_attribute(&mut self) {
        let Some((name, value)) = self.current_attribute.take() else {
            return;
        };
        if name.trim().is_empty() {
            return;
        }
        if let Some(
            token @ (Token::StartTag { .. } | Token::EndTag { .. }),
        ) = self.current_token.as_mut()
        {
            token.attributes_mut().put(&name, &value);
        }
    }
}

// =============================================================================
// Character references
// =============================================================================

impl Tokenizer<'_> {
    /// Decode a character reference after `&`, logging any problems.
    ///
    /// Returns `None` when the input is not a reference and `&` should be
    /// taken literally.
    pub(super) fn consume_character_reference(
        &mut self,
        additional_allowed: Option<char>,
        in_attribute: bool,
    ) -> Option<char> {
        let mut problems = Vec::new();
        let decoded = character_reference::consume_character_reference(
            &mut self.cursor,
            additional_allowed,
            in_attribute,
            &mut problems,
        );
        for problem in problems {
            self.log_character_reference_error(&problem);
        }
        decoded
    }
}

// =============================================================================
// Error reporting
// =============================================================================

impl Tokenizer<'_> {
    pub(super) fn log_error(&mut self, message: &str) {
        let error = ParseError {
            position: self.cursor.pos(),
            message: message.to_string(),
            state: ErrorState::Tokenizer(self.state),
        };
        self.errors.record(COMPONENT, error);
    }

    pub(super) fn log_parse_error(&mut self, c: char) {
        let message = format!(
            "Unexpected character '{}' in input state [{}]",
            c.escape_default(),
            self.state
        );
        self.log_error(&message);
    }

    /// As [`log_parse_error`](Self::log_parse_error), treating `None` as end of input.
    pub(super) fn log_parse_error_at(&mut self, c: Option<char>) {
        match c {
            Some(c) => self.log_parse_error(c),
            None => self.log_eof_error(),
        }
    }

    pub(super) fn log_eof_error(&mut self) {
        let message = format!(
            "Unexpectedly reached end of file (EOF) in input state [{}]",
            self.state
        );
        self.log_error(&message);
    }

    fn log_character_reference_error(&mut self, problem: &str) {
        self.log_error(&format!("Invalid character reference: {problem}"));
    }
}
