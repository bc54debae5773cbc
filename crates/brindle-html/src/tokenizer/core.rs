use strum_macros::Display;

use super::token::Token;
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrors};

/// The tokenizer state machine states.
///
/// `Rcdata`, `Rawtext` and `ScriptData` (with their sub-states) are only
/// entered when the tree builder asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Ordinary content.
    Data,
    /// `&` in ordinary content.
    CharacterReferenceInData,
    /// Escapable raw text, such as `textarea` content.
    Rcdata,
    /// `&` in RCDATA.
    CharacterReferenceInRcdata,
    /// Raw text, such as `style` content.
    Rawtext,
    /// `script` content.
    ScriptData,
    /// After `<`.
    TagOpen,
    /// After `</`.
    EndTagOpen,
    /// Reading a start or end tag name.
    TagName,
    /// `<` in RCDATA.
    RcdataLessThanSign,
    /// `</` in RCDATA.
    RcdataEndTagOpen,
    /// Reading a possible end tag name in RCDATA.
    RcdataEndTagName,
    /// `<` in raw text.
    RawtextLessThanSign,
    /// `</` in raw text.
    RawtextEndTagOpen,
    /// Reading a possible end tag name in raw text.
    RawtextEndTagName,
    /// `<` in script data.
    ScriptDataLessThanSign,
    /// `</` in script data.
    ScriptDataEndTagOpen,
    /// Reading a possible end tag name in script data.
    ScriptDataEndTagName,
    /// After `<!` in script data.
    ScriptDataEscapeStart,
    /// After `<!-` in script data.
    ScriptDataEscapeStartDash,
    /// Inside `<!--` in script data.
    ScriptDataEscaped,
    /// `-` inside escaped script data.
    ScriptDataEscapedDash,
    /// `--` inside escaped script data.
    ScriptDataEscapedDashDash,
    /// `<` inside escaped script data.
    ScriptDataEscapedLessThanSign,
    /// `</` inside escaped script data.
    ScriptDataEscapedEndTagOpen,
    /// Reading a possible end tag name inside escaped script data.
    ScriptDataEscapedEndTagName,
    /// Reading a possible nested `<script` inside escaped script data.
    ScriptDataDoubleEscapeStart,
    /// Inside a nested `<script>` within escaped script data.
    ScriptDataDoubleEscaped,
    /// `-` inside double-escaped script data.
    ScriptDataDoubleEscapedDash,
    /// `--` inside double-escaped script data.
    ScriptDataDoubleEscapedDashDash,
    /// `<` inside double-escaped script data.
    ScriptDataDoubleEscapedLessThanSign,
    /// Reading a possible nested `</script` inside double-escaped script data.
    ScriptDataDoubleEscapeEnd,
    /// Between attributes.
    BeforeAttributeName,
    /// Reading an attribute name.
    AttributeName,
    /// After an attribute name, before `=` or the next attribute.
    AfterAttributeName,
    /// After `=`.
    BeforeAttributeValue,
    /// `"value"`
    AttributeValueDoubleQuoted,
    /// `'value'`
    AttributeValueSingleQuoted,
    /// `value`
    AttributeValueUnquoted,
    /// After a closing attribute quote.
    AfterAttributeValueQuoted,
    /// After `/` in a tag.
    SelfClosingStartTag,
    /// A malformed declaration read as a comment up to `>`.
    BogusComment,
    /// After `<!`.
    MarkupDeclarationOpen,
    /// After `<!--`.
    CommentStart,
    /// After `<!---`.
    CommentStartDash,
    /// Comment text.
    Comment,
    /// `-` in a comment.
    CommentEndDash,
    /// `--` in a comment.
    CommentEnd,
    /// `--!` in a comment.
    CommentEndBang,
    /// After `<!DOCTYPE`.
    Doctype,
    /// Before the doctype name.
    BeforeDoctypeName,
    /// Reading the doctype name.
    DoctypeName,
    /// After the doctype name.
    AfterDoctypeName,
    /// After `PUBLIC`.
    AfterDoctypePublicKeyword,
    /// Before the public identifier.
    BeforeDoctypePublicIdentifier,
    /// `"public id"`
    DoctypePublicIdentifierDoubleQuoted,
    /// `'public id'`
    DoctypePublicIdentifierSingleQuoted,
    /// After the public identifier.
    AfterDoctypePublicIdentifier,
    /// Between the public and system identifiers.
    BetweenDoctypePublicAndSystemIdentifiers,
    /// After `SYSTEM`.
    AfterDoctypeSystemKeyword,
    /// Before the system identifier.
    BeforeDoctypeSystemIdentifier,
    /// `"system id"`
    DoctypeSystemIdentifierDoubleQuoted,
    /// `'system id'`
    DoctypeSystemIdentifierSingleQuoted,
    /// After the system identifier.
    AfterDoctypeSystemIdentifier,
    /// A malformed doctype read up to `>`.
    BogusDoctype,
    /// Inside `<![CDATA[`.
    CdataSection,
}

/// Converts input text into [`Token`]s, one per [`read`](Tokenizer::read).
///
/// Character data is buffered across states: when a non-character token
/// becomes ready, the buffered run is returned first as a single
/// `Character` token and the other token on the following call. At most
/// one token is ever pending.
pub struct Tokenizer<'a> {
    pub(super) cursor: Cursor<'a>,
    pub(super) state: TokenizerState,
    pub(super) errors: ParseErrors,

    /// The token ready to be returned by the next `read`.
    pub(super) pending: Option<Token>,
    /// Character data waiting to be returned as one token.
    pub(super) char_buffer: String,

    /// The tag, comment or doctype under construction.
    pub(super) current_token: Option<Token>,
    /// Name and value of the attribute under construction.
    pub(super) current_attribute: Option<(String, String)>,
    /// Characters of a possible end tag name in raw text.
    pub(super) temporary_buffer: String,
    /// Used to recognise the end tag that closes raw text.
    pub(super) last_start_tag_name: Option<String>,

    pub(super) self_closing_flag_acknowledged: bool,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `input`, starting in the Data state.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            state: TokenizerState::Data,
            errors: ParseErrors::default(),
            pending: None,
            char_buffer: String::new(),
            current_token: None,
            current_attribute: None,
            temporary_buffer: String::new(),
            last_start_tag_name: None,
            self_closing_flag_acknowledged: true,
            finished: false,
        }
    }

    /// Stop recording errors after `max` of them.
    #[must_use]
    pub fn with_max_errors(mut self, max: usize) -> Self {
        self.errors = ParseErrors::new(Some(max));
        self
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Current byte offset into the input.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.cursor.pos()
    }

    /// Errors recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        self.errors.as_slice()
    }

    pub(crate) const fn errors_mut(&mut self) -> &mut ParseErrors {
        &mut self.errors
    }

    /// Take the recorded errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors.into_vec()
    }

    /// Mark the self-closing flag of the last start tag as handled.
    pub const fn acknowledge_self_closing_flag(&mut self) {
        self.self_closing_flag_acknowledged = true;
    }

    /// Run the state machine until a token is ready and return it.
    ///
    /// After the input is exhausted every call returns
    /// [`Token::EndOfFile`].
    pub fn read(&mut self) -> Token {
        if !self.self_closing_flag_acknowledged {
            self.log_error("Self closing flag not acknowledged");
            self.self_closing_flag_acknowledged = true;
        }

        loop {
            if self.pending.is_some() {
                if !self.char_buffer.is_empty() {
                    return Token::Character {
                        data: std::mem::take(&mut self.char_buffer),
                    };
                }
                if let Some(token) = self.pending.take() {
                    if let Token::StartTag {
                        self_closing: true, ..
                    } = token
                    {
                        self.self_closing_flag_acknowledged = false;
                    }
                    return token;
                }
            }
            self.step();
        }
    }

    /// Process input in the current state until it switches or emits.
    fn step(&mut self) {
        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::CharacterReferenceInData => {
                self.handle_character_reference_state(TokenizerState::Data);
            }
            TokenizerState::Rcdata => self.handle_rcdata_state(),
            TokenizerState::CharacterReferenceInRcdata => {
                self.handle_character_reference_state(TokenizerState::Rcdata);
            }
            TokenizerState::Rawtext => {
                self.handle_raw_text_state(TokenizerState::RawtextLessThanSign);
            }
            TokenizerState::ScriptData => {
                self.handle_raw_text_state(TokenizerState::ScriptDataLessThanSign);
            }
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::RcdataLessThanSign => self.handle_raw_less_than_sign_state(
                TokenizerState::RcdataEndTagOpen,
                TokenizerState::Rcdata,
            ),
            TokenizerState::RcdataEndTagOpen => self.handle_raw_end_tag_open_state(
                TokenizerState::RcdataEndTagName,
                TokenizerState::Rcdata,
            ),
            TokenizerState::RcdataEndTagName => {
                self.handle_raw_end_tag_name_state(TokenizerState::Rcdata);
            }
            TokenizerState::RawtextLessThanSign => self.handle_raw_less_than_sign_state(
                TokenizerState::RawtextEndTagOpen,
                TokenizerState::Rawtext,
            ),
            TokenizerState::RawtextEndTagOpen => self.handle_raw_end_tag_open_state(
                TokenizerState::RawtextEndTagName,
                TokenizerState::Rawtext,
            ),
            TokenizerState::RawtextEndTagName => {
                self.handle_raw_end_tag_name_state(TokenizerState::Rawtext);
            }
            TokenizerState::ScriptDataLessThanSign => {
                self.handle_script_data_less_than_sign_state();
            }
            TokenizerState::ScriptDataEndTagOpen => self.handle_raw_end_tag_open_state(
                TokenizerState::ScriptDataEndTagName,
                TokenizerState::ScriptData,
            ),
            TokenizerState::ScriptDataEndTagName => {
                self.handle_raw_end_tag_name_state(TokenizerState::ScriptData);
            }
            TokenizerState::ScriptDataEscapeStart => self.handle_script_data_escape_start_state(
                TokenizerState::ScriptDataEscapeStartDash,
            ),
            TokenizerState::ScriptDataEscapeStartDash => self
                .handle_script_data_escape_start_state(
                    TokenizerState::ScriptDataEscapedDashDash,
                ),
            TokenizerState::ScriptDataEscaped => self.handle_script_data_escaped_state(),
            TokenizerState::ScriptDataEscapedDash => {
                self.handle_script_data_escaped_dash_state();
            }
            TokenizerState::ScriptDataEscapedDashDash => {
                self.handle_script_data_escaped_dash_dash_state();
            }
            TokenizerState::ScriptDataEscapedLessThanSign => {
                self.handle_script_data_escaped_less_than_sign_state();
            }
            TokenizerState::ScriptDataEscapedEndTagOpen => self.handle_raw_end_tag_open_state(
                TokenizerState::ScriptDataEscapedEndTagName,
                TokenizerState::ScriptDataEscaped,
            ),
            TokenizerState::ScriptDataEscapedEndTagName => {
                self.handle_raw_end_tag_name_state(TokenizerState::ScriptDataEscaped);
            }
            TokenizerState::ScriptDataDoubleEscapeStart => self
                .handle_script_data_double_escape_boundary_state(
                    TokenizerState::ScriptDataDoubleEscaped,
                    TokenizerState::ScriptDataEscaped,
                ),
            TokenizerState::ScriptDataDoubleEscaped => {
                self.handle_script_data_double_escaped_state();
            }
            TokenizerState::ScriptDataDoubleEscapedDash => {
                self.handle_script_data_double_escaped_dash_state();
            }
            TokenizerState::ScriptDataDoubleEscapedDashDash => {
                self.handle_script_data_double_escaped_dash_dash_state();
            }
            TokenizerState::ScriptDataDoubleEscapedLessThanSign => {
                self.handle_script_data_double_escaped_less_than_sign_state();
            }
            TokenizerState::ScriptDataDoubleEscapeEnd => self
                .handle_script_data_double_escape_boundary_state(
                    TokenizerState::ScriptDataEscaped,
                    TokenizerState::ScriptDataDoubleEscaped,
                ),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state('"');
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state('\'');
            }
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state();
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            TokenizerState::BogusComment => self.handle_bogus_comment_state(),
            TokenizerState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(),
            TokenizerState::CommentStart => self.handle_comment_start_state(),
            TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
            TokenizerState::Comment => self.handle_comment_state(),
            TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
            TokenizerState::CommentEnd => self.handle_comment_end_state(),
            TokenizerState::CommentEndBang => self.handle_comment_end_bang_state(),
            TokenizerState::Doctype => self.handle_doctype_state(),
            TokenizerState::BeforeDoctypeName => self.handle_before_doctype_name_state(),
            TokenizerState::DoctypeName => self.handle_doctype_name_state(),
            TokenizerState::AfterDoctypeName => self.handle_after_doctype_name_state(),
            TokenizerState::AfterDoctypePublicKeyword => self.handle_after_doctype_keyword_state(
                TokenizerState::BeforeDoctypePublicIdentifier,
                DoctypeId::Public,
            ),
            TokenizerState::BeforeDoctypePublicIdentifier => {
                self.handle_before_doctype_identifier_state(DoctypeId::Public);
            }
            TokenizerState::DoctypePublicIdentifierDoubleQuoted => {
                self.handle_doctype_identifier_quoted_state('"', DoctypeId::Public);
            }
            TokenizerState::DoctypePublicIdentifierSingleQuoted => {
                self.handle_doctype_identifier_quoted_state('\'', DoctypeId::Public);
            }
            TokenizerState::AfterDoctypePublicIdentifier => {
                self.handle_after_doctype_public_identifier_state(true);
            }
            TokenizerState::BetweenDoctypePublicAndSystemIdentifiers => {
                self.handle_after_doctype_public_identifier_state(false);
            }
            TokenizerState::AfterDoctypeSystemKeyword => self.handle_after_doctype_keyword_state(
                TokenizerState::BeforeDoctypeSystemIdentifier,
                DoctypeId::System,
            ),
            TokenizerState::BeforeDoctypeSystemIdentifier => {
                self.handle_before_doctype_identifier_state(DoctypeId::System);
            }
            TokenizerState::DoctypeSystemIdentifierDoubleQuoted => {
                self.handle_doctype_identifier_quoted_state('"', DoctypeId::System);
            }
            TokenizerState::DoctypeSystemIdentifierSingleQuoted => {
                self.handle_doctype_identifier_quoted_state('\'', DoctypeId::System);
            }
            TokenizerState::AfterDoctypeSystemIdentifier => {
                self.handle_after_doctype_system_identifier_state();
            }
            TokenizerState::BogusDoctype => self.handle_bogus_doctype_state(),
            TokenizerState::CdataSection => self.handle_cdata_section_state(),
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Yields tokens up to and including the first `EndOfFile`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.read();
        self.finished = token.is_eof();
        Some(token)
    }
}

/// Which doctype identifier a shared state handler is reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DoctypeId {
    Public,
    System,
}

pub(super) const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Whitespace inside tags.
pub(super) const fn is_whitespace_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

// =============================================================================
// Content states
// =============================================================================

impl Tokenizer<'_> {
    fn handle_data_state(&mut self) {
        match self.cursor.current() {
            Some('&') => self.advance_to(TokenizerState::CharacterReferenceInData),
            Some('<') => self.advance_to(TokenizerState::TagOpen),
            // NUL is passed through in content; it is replaced everywhere else.
            Some('\0') => {
                self.log_parse_error('\0');
                self.cursor.advance();
                self.emit_char('\0');
            }
            None => self.emit(Token::EndOfFile),
            Some(_) => {
                let data = self.cursor.consume_to_any(&['&', '<', '\0']);
                self.emit_str(data);
            }
        }
    }

    fn handle_character_reference_state(&mut self, return_state: TokenizerState) {
        match self.consume_character_reference(None, false) {
            Some(c) => self.emit_char(c),
            None => self.emit_char('&'),
        }
        self.switch_to(return_state);
    }

    fn handle_rcdata_state(&mut self) {
        match self.cursor.current() {
            Some('&') => self.advance_to(TokenizerState::CharacterReferenceInRcdata),
            Some('<') => self.advance_to(TokenizerState::RcdataLessThanSign),
            Some('\0') => {
                self.log_parse_error('\0');
                self.cursor.advance();
                self.emit_char(REPLACEMENT_CHARACTER);
            }
            None => self.emit(Token::EndOfFile),
            Some(_) => {
                let data = self.cursor.consume_to_any(&['&', '<', '\0']);
                self.emit_str(data);
            }
        }
    }

    /// RAWTEXT and script data: no character references, only `<` matters.
    fn handle_raw_text_state(&mut self, less_than_sign: TokenizerState) {
        match self.cursor.current() {
            Some('<') => self.advance_to(less_than_sign),
            Some('\0') => {
                self.log_parse_error('\0');
                self.cursor.advance();
                self.emit_char(REPLACEMENT_CHARACTER);
            }
            None => self.emit(Token::EndOfFile),
            Some(_) => {
                let data = self.cursor.consume_to_any(&['<', '\0']);
                self.emit_str(data);
            }
        }
    }

    fn handle_cdata_section_state(&mut self) {
        let data = self.cursor.consume_until("]]>");
        self.emit_str(data);
        let _ = self.cursor.match_consume("]]>");
        self.switch_to(TokenizerState::Data);
    }
}

// =============================================================================
// Tag states
// =============================================================================

impl Tokenizer<'_> {
    fn handle_tag_open_state(&mut self) {
        match self.cursor.current() {
            Some('!') => self.advance_to(TokenizerState::MarkupDeclarationOpen),
            Some('/') => self.advance_to(TokenizerState::EndTagOpen),
            // The `?` becomes part of the bogus comment.
            Some('?') => self.switch_to(TokenizerState::BogusComment),
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_start_tag());
                self.switch_to(TokenizerState::TagName);
            }
            other => {
                self.log_parse_error_at(other);
                self.emit_char('<');
                self.switch_to(TokenizerState::Data);
            }
        }
    }

    fn handle_end_tag_open_state(&mut self) {
        match self.cursor.current() {
            None => {
                self.log_eof_error();
                self.emit_str("</");
                self.switch_to(TokenizerState::Data);
            }
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.switch_to(TokenizerState::TagName);
            }
            Some('>') => {
                self.log_parse_error('>');
                self.advance_to(TokenizerState::Data);
            }
            Some(c) => {
                self.log_parse_error(c);
                self.switch_to(TokenizerState::BogusComment);
            }
        }
    }

    fn handle_tag_name_state(&mut self) {
        let name = self
            .cursor
            .consume_to_any(&['\t', '\n', '\x0C', '\r', ' ', '/', '>', '\0']);
        self.append_to_tag_name(name);

        match self.cursor.consume() {
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some(_) => {
                self.log_parse_error('\0');
                self.append_to_tag_name("\u{FFFD}");
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
        }
    }

    fn handle_before_attribute_name_state(&mut self) {
        match self.cursor.current() {
            Some(c) if is_whitespace_char(c) => self.cursor.advance(),
            Some('/') => self.advance_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.cursor.advance();
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some(c @ ('"' | '\'' | '<' | '=')) => {
                self.log_parse_error(c);
                self.cursor.advance();
                self.start_new_attribute();
                self.append_to_attribute_name(c.encode_utf8(&mut [0; 4]));
                self.switch_to(TokenizerState::AttributeName);
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
            Some(_) => {
                self.start_new_attribute();
                self.switch_to(TokenizerState::AttributeName);
            }
        }
    }

    fn handle_attribute_name_state(&mut self) {
        let name = self.cursor.consume_to_any(&[
            '\t', '\n', '\x0C', '\r', ' ', '/', '=', '>', '\0', '"', '\'', '<',
        ]);
        self.append_to_attribute_name(name);

        match self.cursor.consume() {
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some('\0') => {
                self.log_parse_error('\0');
                self.append_to_attribute_name("\u{FFFD}");
            }
            Some(c) => {
                self.log_parse_error(c);
                self.append_to_attribute_name(c.encode_utf8(&mut [0; 4]));
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
        }
    }

    fn handle_after_attribute_name_state(&mut self) {
        match self.cursor.current() {
            Some(c) if is_whitespace_char(c) => self.cursor.advance(),
            Some('/') => self.advance_to(TokenizerState::SelfClosingStartTag),
            Some('=') => self.advance_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.cursor.advance();
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some('\0') => {
                self.log_parse_error('\0');
                self.cursor.advance();
                self.append_to_attribute_name("\u{FFFD}");
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(c @ ('"' | '\'' | '<')) => {
                self.log_parse_error(c);
                self.cursor.advance();
                self.start_new_attribute();
                self.append_to_attribute_name(c.encode_utf8(&mut [0; 4]));
                self.switch_to(TokenizerState::AttributeName);
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
            Some(_) => {
                self.start_new_attribute();
                self.switch_to(TokenizerState::AttributeName);
            }
        }
    }

    fn handle_before_attribute_value_state(&mut self) {
        match self.cursor.current() {
            Some(c) if is_whitespace_char(c) => self.cursor.advance(),
            Some('"') => self.advance_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.advance_to(TokenizerState::AttributeValueSingleQuoted),
            Some('\0') => {
                self.log_parse_error('\0');
                self.cursor.advance();
                self.append_to_attribute_value("\u{FFFD}");
                self.switch_to(TokenizerState::AttributeValueUnquoted);
            }
            Some('>') => {
                self.log_parse_error('>');
                self.cursor.advance();
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some(c @ ('<' | '=' | '`')) => {
                self.log_parse_error(c);
                self.cursor.advance();
                self.append_to_attribute_value(c.encode_utf8(&mut [0; 4]));
                self.switch_to(TokenizerState::AttributeValueUnquoted);
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
            // `&` included: the unquoted state decodes it.
            Some(_) => self.switch_to(TokenizerState::AttributeValueUnquoted),
        }
    }

    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        let value = self.cursor.consume_to_any(&[quote, '&', '\0']);
        self.append_to_attribute_value(value);

        match self.cursor.consume() {
            Some('&') => {
                match self.consume_character_reference(Some(quote), true) {
                    Some(c) => self.append_to_attribute_value(c.encode_utf8(&mut [0; 4])),
                    None => self.append_to_attribute_value("&"),
                }
            }
            Some('\0') => {
                self.log_parse_error('\0');
                self.append_to_attribute_value("\u{FFFD}");
            }
            Some(_) => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
        }
    }

    fn handle_attribute_value_unquoted_state(&mut self) {
        let value = self.cursor.consume_to_any(&[
            '\t', '\n', '\x0C', '\r', ' ', '&', '>', '\0', '"', '\'', '<', '=', '`',
        ]);
        self.append_to_attribute_value(value);

        match self.cursor.consume() {
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('&') => match self.consume_character_reference(Some('>'), true) {
                Some(c) => self.append_to_attribute_value(c.encode_utf8(&mut [0; 4])),
                None => self.append_to_attribute_value("&"),
            },
            Some('>') => {
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some('\0') => {
                self.log_parse_error('\0');
                self.append_to_attribute_value("\u{FFFD}");
            }
            Some(c) => {
                self.log_parse_error(c);
                self.append_to_attribute_value(c.encode_utf8(&mut [0; 4]));
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
        }
    }

    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.cursor.current() {
            Some(c) if is_whitespace_char(c) => {
                self.advance_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.advance_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.cursor.advance();
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
            Some(c) => {
                self.log_parse_error(c);
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
        }
    }

    fn handle_self_closing_start_tag_state(&mut self) {
        match self.cursor.current() {
            Some('>') => {
                if let Some(token) = self.current_token.as_mut() {
                    token.set_self_closing();
                }
                self.cursor.advance();
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
            Some(c) => {
                self.log_parse_error(c);
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
        }
    }
}

// =============================================================================
// Raw text end tag states
// =============================================================================

impl Tokenizer<'_> {
    fn handle_raw_less_than_sign_state(
        &mut self,
        end_tag_open: TokenizerState,
        text: TokenizerState,
    ) {
        if self.cursor.matches("/") {
            self.temporary_buffer.clear();
            self.advance_to(end_tag_open);
        } else {
            self.emit_char('<');
            self.switch_to(text);
        }
    }

    fn handle_raw_end_tag_open_state(&mut self, end_tag_name: TokenizerState, text: TokenizerState) {
        if self.cursor.matches_letter() {
            self.current_token = Some(Token::new_end_tag());
            self.switch_to(end_tag_name);
        } else {
            self.emit_str("</");
            self.switch_to(text);
        }
    }

    /// Only the end tag matching the last start tag leaves raw text.
    fn handle_raw_end_tag_name_state(&mut self, text: TokenizerState) {
        if self.cursor.matches_letter() {
            let name = self.cursor.consume_letter_sequence();
            self.append_to_tag_name(name);
            self.temporary_buffer.push_str(name);
            return;
        }

        let appropriate = self.is_appropriate_end_tag_token();
        match self.cursor.current() {
            Some(c) if appropriate && is_whitespace_char(c) => {
                self.advance_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') if appropriate => self.advance_to(TokenizerState::SelfClosingStartTag),
            Some('>') if appropriate => {
                self.cursor.advance();
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            _ => self.emit_end_tag_name_anything_else(text),
        }
    }

    fn handle_script_data_less_than_sign_state(&mut self) {
        match self.cursor.current() {
            Some('/') => {
                self.temporary_buffer.clear();
                self.advance_to(TokenizerState::ScriptDataEndTagOpen);
            }
            Some('!') => {
                self.emit_str("<!");
                self.advance_to(TokenizerState::ScriptDataEscapeStart);
            }
            _ => {
                self.emit_char('<');
                self.switch_to(TokenizerState::ScriptData);
            }
        }
    }

    /// `<!` then `<!-`: each `-` moves on to `next`, anything else is plain
    /// script data.
    fn handle_script_data_escape_start_state(&mut self, next: TokenizerState) {
        if self.cursor.matches("-") {
            self.emit_char('-');
            self.advance_to(next);
        } else {
            self.switch_to(TokenizerState::ScriptData);
        }
    }

    fn handle_script_data_escaped_state(&mut self) {
        match self.cursor.current() {
            Some('-') => {
                self.emit_char('-');
                self.advance_to(TokenizerState::ScriptDataEscapedDash);
            }
            Some('<') => self.advance_to(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('\0') => {
                self.log_parse_error('\0');
                self.cursor.advance();
                self.emit_char(REPLACEMENT_CHARACTER);
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
            Some(_) => {
                let data = self.cursor.consume_to_any(&['-', '<', '\0']);
                self.emit_str(data);
            }
        }
    }

    fn handle_script_data_escaped_dash_state(&mut self) {
        match self.cursor.consume() {
            Some('-') => {
                self.emit_char('-');
                self.switch_to(TokenizerState::ScriptDataEscapedDashDash);
            }
            Some('<') => self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('\0') => {
                self.log_parse_error('\0');
                self.emit_char(REPLACEMENT_CHARACTER);
                self.switch_to(TokenizerState::ScriptDataEscaped);
            }
            Some(c) => {
                self.emit_char(c);
                self.switch_to(TokenizerState::ScriptDataEscaped);
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
        }
    }

    fn handle_script_data_escaped_dash_dash_state(&mut self) {
        match self.cursor.consume() {
            Some('-') => self.emit_char('-'),
            Some('<') => self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('>') => {
                self.emit_char('>');
                self.switch_to(TokenizerState::ScriptData);
            }
            Some('\0') => {
                self.log_parse_error('\0');
                self.emit_char(REPLACEMENT_CHARACTER);
                self.switch_to(TokenizerState::ScriptDataEscaped);
            }
            Some(c) => {
                self.emit_char(c);
                self.switch_to(TokenizerState::ScriptDataEscaped);
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
        }
    }

    fn handle_script_data_escaped_less_than_sign_state(&mut self) {
        match self.cursor.current() {
            Some(c) if c.is_ascii_alphabetic() => {
                self.temporary_buffer.clear();
                self.emit_char('<');
                self.switch_to(TokenizerState::ScriptDataDoubleEscapeStart);
            }
            Some('/') => {
                self.temporary_buffer.clear();
                self.advance_to(TokenizerState::ScriptDataEscapedEndTagOpen);
            }
            _ => {
                self.emit_char('<');
                self.switch_to(TokenizerState::ScriptDataEscaped);
            }
        }
    }

    /// Reads a tag name inside escaped script data: `script` switches to
    /// `on_script`, any other name to `otherwise`. The name is emitted as
    /// character data either way.
    fn handle_script_data_double_escape_boundary_state(
        &mut self,
        on_script: TokenizerState,
        otherwise: TokenizerState,
    ) {
        if self.cursor.matches_letter() {
            let name = self.cursor.consume_letter_sequence();
            self.temporary_buffer.push_str(&name.to_ascii_lowercase());
            self.emit_str(name);
            return;
        }

        match self.cursor.current() {
            Some(c) if is_whitespace_char(c) || c == '/' || c == '>' => {
                self.cursor.advance();
                self.emit_char(c);
                if self.temporary_buffer == "script" {
                    self.switch_to(on_script);
                } else {
                    self.switch_to(otherwise);
                }
            }
            _ => self.switch_to(otherwise),
        }
    }

    fn handle_script_data_double_escaped_state(&mut self) {
        match self.cursor.current() {
            Some('-') => {
                self.emit_char('-');
                self.advance_to(TokenizerState::ScriptDataDoubleEscapedDash);
            }
            Some('<') => {
                self.emit_char('<');
                self.advance_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
            }
            Some('\0') => {
                self.log_parse_error('\0');
                self.cursor.advance();
                self.emit_char(REPLACEMENT_CHARACTER);
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
            Some(_) => {
                let data = self.cursor.consume_to_any(&['-', '<', '\0']);
                self.emit_str(data);
            }
        }
    }

    fn handle_script_data_double_escaped_dash_state(&mut self) {
        match self.cursor.consume() {
            Some('-') => {
                self.emit_char('-');
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedDashDash);
            }
            Some('<') => {
                self.emit_char('<');
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
            }
            Some('\0') => {
                self.log_parse_error('\0');
                self.emit_char(REPLACEMENT_CHARACTER);
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
            }
            Some(c) => {
                self.emit_char(c);
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
        }
    }

    fn handle_script_data_double_escaped_dash_dash_state(&mut self) {
        match self.cursor.consume() {
            Some('-') => self.emit_char('-'),
            Some('<') => {
                self.emit_char('<');
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
            }
            Some('>') => {
                self.emit_char('>');
                self.switch_to(TokenizerState::ScriptData);
            }
            Some('\0') => {
                self.log_parse_error('\0');
                self.emit_char(REPLACEMENT_CHARACTER);
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
            }
            Some(c) => {
                self.emit_char(c);
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
            }
            None => {
                self.log_eof_error();
                self.switch_to(TokenizerState::Data);
            }
        }
    }

    fn handle_script_data_double_escaped_less_than_sign_state(&mut self) {
        if self.cursor.matches("/") {
            self.emit_char('/');
            self.temporary_buffer.clear();
            self.advance_to(TokenizerState::ScriptDataDoubleEscapeEnd);
        } else {
            self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
        }
    }
}

// =============================================================================
// Comment states
// =============================================================================

impl Tokenizer<'_> {
    fn handle_markup_declaration_open_state(&mut self) {
        if self.cursor.match_consume("--") {
            self.current_token = Some(Token::new_comment());
            self.switch_to(TokenizerState::CommentStart);
        } else if self.cursor.match_consume_ignore_case("DOCTYPE") {
            self.switch_to(TokenizerState::Doctype);
        } else if self.cursor.match_consume("[CDATA[") {
            self.switch_to(TokenizerState::CdataSection);
        } else {
            self.log_parse_error_at(self.cursor.current());
            self.switch_to(TokenizerState::BogusComment);
        }
    }

    fn handle_bogus_comment_state(&mut self) {
        let data = self.cursor.consume_to('>');
        let mut comment = Token::new_comment();
        comment.append_to_comment(data);
        self.emit(comment);
        self.advance_to(TokenizerState::Data);
    }

    fn handle_comment_start_state(&mut self) {
        match self.cursor.consume() {
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            Some('\0') => {
                self.log_parse_error('\0');
                self.append_to_comment("\u{FFFD}");
                self.switch_to(TokenizerState::Comment);
            }
            Some('>') => {
                self.log_parse_error('>');
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some(c) => {
                self.append_to_comment(c.encode_utf8(&mut [0; 4]));
                self.switch_to(TokenizerState::Comment);
            }
            None => self.eof_in_comment(),
        }
    }

    fn handle_comment_start_dash_state(&mut self) {
        match self.cursor.consume() {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            Some('\0') => {
                self.log_parse_error('\0');
                self.append_to_comment("-\u{FFFD}");
                self.switch_to(TokenizerState::Comment);
            }
            Some('>') => {
                self.log_parse_error('>');
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some(c) => {
                self.append_to_comment("-");
                self.append_to_comment(c.encode_utf8(&mut [0; 4]));
                self.switch_to(TokenizerState::Comment);
            }
            None => self.eof_in_comment(),
        }
    }

    fn handle_comment_state(&mut self) {
        match self.cursor.current() {
            Some('-') => self.advance_to(TokenizerState::CommentEndDash),
            Some('\0') => {
                self.log_parse_error('\0');
                self.cursor.advance();
                self.append_to_comment("\u{FFFD}");
            }
            None => self.eof_in_comment(),
            Some(_) => {
                let data = self.cursor.consume_to_any(&['-', '\0']);
                self.append_to_comment(data);
            }
        }
    }

    fn handle_comment_end_dash_state(&mut self) {
        match self.cursor.consume() {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            Some('\0') => {
                self.log_parse_error('\0');
                self.append_to_comment("-\u{FFFD}");
                self.switch_to(TokenizerState::Comment);
            }
            Some(c) => {
                self.append_to_comment("-");
                self.append_to_comment(c.encode_utf8(&mut [0; 4]));
                self.switch_to(TokenizerState::Comment);
            }
            None => self.eof_in_comment(),
        }
    }

    fn handle_comment_end_state(&mut self) {
        match self.cursor.consume() {
            Some('>') => {
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some('\0') => {
                self.log_parse_error('\0');
                self.append_to_comment("--\u{FFFD}");
                self.switch_to(TokenizerState::Comment);
            }
            Some('!') => {
                self.log_parse_error('!');
                self.switch_to(TokenizerState::CommentEndBang);
            }
            Some('-') => {
                self.log_parse_error('-');
                self.append_to_comment("-");
            }
            Some(c) => {
                self.log_parse_error(c);
                self.append_to_comment("--");
                self.append_to_comment(c.encode_utf8(&mut [0; 4]));
                self.switch_to(TokenizerState::Comment);
            }
            None => self.eof_in_comment(),
        }
    }

    fn handle_comment_end_bang_state(&mut self) {
        match self.cursor.consume() {
            Some('-') => {
                self.append_to_comment("--!");
                self.switch_to(TokenizerState::CommentEndDash);
            }
            Some('>') => {
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some('\0') => {
                self.log_parse_error('\0');
                self.append_to_comment("--!\u{FFFD}");
                self.switch_to(TokenizerState::Comment);
            }
            Some(c) => {
                self.append_to_comment("--!");
                self.append_to_comment(c.encode_utf8(&mut [0; 4]));
                self.switch_to(TokenizerState::Comment);
            }
            None => self.eof_in_comment(),
        }
    }

    /// Premature end of input inside a comment: emit what was read.
    fn eof_in_comment(&mut self) {
        self.log_eof_error();
        self.emit_token();
        self.switch_to(TokenizerState::Data);
    }
}

// =============================================================================
// DOCTYPE states
// =============================================================================

impl Tokenizer<'_> {
    fn handle_doctype_state(&mut self) {
        match self.cursor.current() {
            Some(c) if is_whitespace_char(c) => {
                self.advance_to(TokenizerState::BeforeDoctypeName);
            }
            None => {
                self.log_eof_error();
                self.current_token = Some(Token::new_doctype());
                self.emit_doctype_with_quirks();
            }
            Some(c) => {
                self.log_parse_error(c);
                self.switch_to(TokenizerState::BeforeDoctypeName);
            }
        }
    }

    fn handle_before_doctype_name_state(&mut self) {
        match self.cursor.current() {
            Some(c) if is_whitespace_char(c) => self.cursor.advance(),
            Some('>') => {
                self.log_parse_error('>');
                self.cursor.advance();
                self.current_token = Some(Token::new_doctype());
                self.emit_doctype_with_quirks();
            }
            Some('\0') => {
                self.log_parse_error('\0');
                self.cursor.advance();
                self.current_token = Some(Token::new_doctype());
                self.append_to_doctype_name("\u{FFFD}");
                self.switch_to(TokenizerState::DoctypeName);
            }
            None => {
                self.log_eof_error();
                self.current_token = Some(Token::new_doctype());
                self.emit_doctype_with_quirks();
            }
            Some(_) => {
                self.current_token = Some(Token::new_doctype());
                self.switch_to(TokenizerState::DoctypeName);
            }
        }
    }

    fn handle_doctype_name_state(&mut self) {
        let name = self
            .cursor
            .consume_to_any(&['\t', '\n', '\x0C', '\r', ' ', '>', '\0']);
        self.append_to_doctype_name(name);

        match self.cursor.consume() {
            Some('>') => {
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some('\0') => {
                self.log_parse_error('\0');
                self.append_to_doctype_name("\u{FFFD}");
            }
            Some(_) => self.switch_to(TokenizerState::AfterDoctypeName),
            None => {
                self.log_eof_error();
                self.emit_doctype_with_quirks();
            }
        }
    }

    fn handle_after_doctype_name_state(&mut self) {
        match self.cursor.current() {
            None => {
                self.log_eof_error();
                self.emit_doctype_with_quirks();
            }
            Some(c) if is_whitespace_char(c) => self.cursor.advance(),
            Some('>') => {
                self.cursor.advance();
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some(c) => {
                if self.cursor.match_consume_ignore_case("PUBLIC") {
                    self.switch_to(TokenizerState::AfterDoctypePublicKeyword);
                } else if self.cursor.match_consume_ignore_case("SYSTEM") {
                    self.switch_to(TokenizerState::AfterDoctypeSystemKeyword);
                } else {
                    self.log_parse_error(c);
                    self.set_force_quirks();
                    self.advance_to(TokenizerState::BogusDoctype);
                }
            }
        }
    }

    /// After `PUBLIC` or `SYSTEM`: whitespace, then a quoted identifier.
    fn handle_after_doctype_keyword_state(&mut self, before: TokenizerState, id: DoctypeId) {
        match self.cursor.consume() {
            Some(c) if is_whitespace_char(c) => self.switch_to(before),
            Some(quote @ ('"' | '\'')) => {
                self.log_parse_error(quote);
                self.start_doctype_identifier(id, quote);
            }
            Some('>') => {
                self.log_parse_error('>');
                self.emit_doctype_with_quirks();
            }
            Some(c) => {
                self.log_parse_error(c);
                self.set_force_quirks();
                self.switch_to(TokenizerState::BogusDoctype);
            }
            None => {
                self.log_eof_error();
                self.emit_doctype_with_quirks();
            }
        }
    }

    fn handle_before_doctype_identifier_state(&mut self, id: DoctypeId) {
        match self.cursor.consume() {
            Some(c) if is_whitespace_char(c) => {}
            Some(quote @ ('"' | '\'')) => self.start_doctype_identifier(id, quote),
            Some('>') => {
                self.log_parse_error('>');
                self.emit_doctype_with_quirks();
            }
            Some(c) => {
                self.log_parse_error(c);
                self.set_force_quirks();
                self.switch_to(TokenizerState::BogusDoctype);
            }
            None => {
                self.log_eof_error();
                self.emit_doctype_with_quirks();
            }
        }
    }

    fn handle_doctype_identifier_quoted_state(&mut self, quote: char, id: DoctypeId) {
        let value = self.cursor.consume_to_any(&[quote, '\0', '>']);
        self.append_to_doctype_identifier(id, value);

        match self.cursor.consume() {
            Some('\0') => {
                self.log_parse_error('\0');
                self.append_to_doctype_identifier(id, "\u{FFFD}");
            }
            Some('>') => {
                self.log_parse_error('>');
                self.emit_doctype_with_quirks();
            }
            Some(_) => match id {
                DoctypeId::Public => self.switch_to(TokenizerState::AfterDoctypePublicIdentifier),
                DoctypeId::System => self.switch_to(TokenizerState::AfterDoctypeSystemIdentifier),
            },
            None => {
                self.log_eof_error();
                self.emit_doctype_with_quirks();
            }
        }
    }

    /// After the public identifier; `directly_after` is false once
    /// whitespace has been seen.
    fn handle_after_doctype_public_identifier_state(&mut self, directly_after: bool) {
        match self.cursor.consume() {
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BetweenDoctypePublicAndSystemIdentifiers);
            }
            Some('>') => {
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some(quote @ ('"' | '\'')) => {
                if directly_after {
                    self.log_parse_error(quote);
                }
                self.start_doctype_identifier(DoctypeId::System, quote);
            }
            Some(c) => {
                self.log_parse_error(c);
                self.set_force_quirks();
                self.switch_to(TokenizerState::BogusDoctype);
            }
            None => {
                self.log_eof_error();
                self.emit_doctype_with_quirks();
            }
        }
    }

    fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.cursor.consume() {
            Some(c) if is_whitespace_char(c) => {}
            Some('>') => {
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some(c) => {
                self.log_parse_error(c);
                self.switch_to(TokenizerState::BogusDoctype);
            }
            None => {
                self.log_eof_error();
                self.emit_doctype_with_quirks();
            }
        }
    }

    fn handle_bogus_doctype_state(&mut self) {
        match self.cursor.consume() {
            Some('>') | None => {
                self.emit_token();
                self.switch_to(TokenizerState::Data);
            }
            Some(_) => {}
        }
    }

    /// Create the identifier as an empty string and read it in the state
    /// for `quote`.
    fn start_doctype_identifier(&mut self, id: DoctypeId, quote: char) {
        self.append_to_doctype_identifier(id, "");
        let next = match (id, quote) {
            (DoctypeId::Public, '"') => TokenizerState::DoctypePublicIdentifierDoubleQuoted,
            (DoctypeId::Public, _) => TokenizerState::DoctypePublicIdentifierSingleQuoted,
            (DoctypeId::System, '"') => TokenizerState::DoctypeSystemIdentifierDoubleQuoted,
            (DoctypeId::System, _) => TokenizerState::DoctypeSystemIdentifierSingleQuoted,
        };
        self.switch_to(next);
    }

    fn emit_doctype_with_quirks(&mut self) {
        self.set_force_quirks();
        self.emit_token();
        self.switch_to(TokenizerState::Data);
    }
}
