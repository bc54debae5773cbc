//! Tests for the tokenizer state machine.

use brindle_dom::Attributes;
use brindle_html::{ErrorState, Token, Tokenizer, TokenizerState, tokenize};

fn chars(data: &str) -> Token {
    Token::Character {
        data: data.to_string(),
    }
}

fn start_tag(name: &str, attrs: &[(&str, &str)], self_closing: bool) -> Token {
    Token::StartTag {
        name: name.to_string(),
        self_closing,
        attributes: attrs.iter().copied().collect::<Attributes>(),
    }
}

/// Tokenize and return the tokens together with the error messages.
fn tokenize_with_errors(input: &str) -> (Vec<Token>, Vec<String>) {
    let mut tokenizer = Tokenizer::new(input);
    let tokens: Vec<Token> = tokenizer.by_ref().collect();
    let errors = tokenizer
        .into_errors()
        .into_iter()
        .map(|e| e.message)
        .collect();
    (tokens, errors)
}

// ========== tags and attributes ==========

#[test]
fn test_start_tag_with_attributes() {
    let tokens = tokenize(r#"<A HREF="/x" Title='t' disabled data-n=5>"#);
    assert_eq!(
        tokens,
        vec![
            start_tag(
                "a",
                &[("href", "/x"), ("title", "t"), ("disabled", ""), ("data-n", "5")],
                false
            ),
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_duplicate_attribute_overwrites_in_place() {
    let tokens = tokenize(r#"<p a="1" b="2" A="3">"#);
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected a start tag, got {:?}", tokens[0]);
    };
    let pairs: Vec<(&str, &str)> = attributes.iter().map(|a| (a.key(), a.value())).collect();
    assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
}

#[test]
fn test_end_tag_and_self_closing() {
    let tokens = tokenize("<br/></P >");
    assert_eq!(
        tokens,
        vec![
            start_tag("br", &[], true),
            Token::end_tag("p"),
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_unacknowledged_self_closing_flag_is_an_error() {
    let mut tokenizer = Tokenizer::new("<x/>y");
    assert_eq!(tokenizer.read(), start_tag("x", &[], true));
    assert_eq!(tokenizer.read(), chars("y"));
    assert!(
        tokenizer
            .errors()
            .iter()
            .any(|e| e.message == "Self closing flag not acknowledged")
    );

    let mut tokenizer = Tokenizer::new("<x/>y");
    let _ = tokenizer.read();
    tokenizer.acknowledge_self_closing_flag();
    let _ = tokenizer.read();
    assert!(tokenizer.errors().is_empty());

    // The flag only needs acknowledging once the tag itself has been read.
    let mut tokenizer = Tokenizer::new("a<x/>");
    assert_eq!(tokenizer.read(), chars("a"));
    assert_eq!(tokenizer.read(), start_tag("x", &[], true));
    assert!(tokenizer.errors().is_empty());
    tokenizer.acknowledge_self_closing_flag();
    assert_eq!(tokenizer.read(), Token::EndOfFile);
    assert!(tokenizer.errors().is_empty());
}

#[test]
fn test_end_tag_with_attributes_is_an_error() {
    let (tokens, errors) = tokenize_with_errors(r#"</div class="x">"#);
    assert!(matches!(&tokens[0], Token::EndTag { name, .. } if name == "div"));
    assert_eq!(errors, vec!["Attributes incorrectly present on end tag"]);
}

#[test]
fn test_character_reference_in_attribute_value() {
    let tokens = tokenize(r#"<a href="?x=1&copy=2&amp;y" title=a&lt;b>"#);
    assert_eq!(
        tokens[0],
        start_tag("a", &[("href", "?x=1&copy=2&y"), ("title", "a<b")], false)
    );
}

// ========== character data ==========

#[test]
fn test_character_runs_are_never_adjacent() {
    let tokens = tokenize("a &amp; b<!--c-->d&#33;e");
    assert_eq!(
        tokens,
        vec![
            chars("a & b"),
            Token::Comment {
                data: "c".to_string()
            },
            chars("d!e"),
            Token::EndOfFile,
        ]
    );
    for pair in tokens.windows(2) {
        assert!(
            !matches!(pair, [Token::Character { .. }, Token::Character { .. }]),
            "adjacent character tokens: {pair:?}"
        );
    }
}

#[test]
fn test_malformed_tag_openers_are_text() {
    let (tokens, errors) = tokenize_with_errors("1 <3 a</>b");
    assert_eq!(tokens, vec![chars("1 <3 ab"), Token::EndOfFile]);
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_nul_in_data_is_kept_with_an_error() {
    let (tokens, errors) = tokenize_with_errors("a\0b");
    assert_eq!(tokens, vec![chars("a\0b"), Token::EndOfFile]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_references_in_data() {
    let (tokens, errors) = tokenize_with_errors("&#60;&#x3e;&bogus; AT&T &#0;");
    assert_eq!(
        tokens,
        vec![chars("<>&bogus; AT&T \u{FFFD}"), Token::EndOfFile]
    );
    assert_eq!(
        errors,
        vec![
            "Invalid character reference: invalid named reference 'bogus'",
            "Invalid character reference: character outside of valid range",
        ]
    );
}

#[test]
fn test_cdata_section_is_character_data() {
    assert_eq!(
        tokenize("<![CDATA[a<b]]>c"),
        vec![chars("a<bc"), Token::EndOfFile]
    );
}

// ========== comments and doctypes ==========

#[test]
fn test_comments() {
    let tokens = tokenize("<!-- a -- b --><!----><?xml version=\"1.0\"?>");
    assert_eq!(
        tokens,
        vec![
            Token::Comment {
                data: " a -- b ".to_string()
            },
            Token::Comment {
                data: String::new()
            },
            Token::Comment {
                data: "?xml version=\"1.0\"?".to_string()
            },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_unterminated_comment_is_emitted() {
    let (tokens, errors) = tokenize_with_errors("<!-- open");
    assert_eq!(
        tokens,
        vec![
            Token::Comment {
                data: " open".to_string()
            },
            Token::EndOfFile
        ]
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_doctype_with_identifiers() {
    let input = r#"<!doctype HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" 'http://www.w3.org/TR/html4/strict.dtd'>"#;
    let tokens = tokenize(input);
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: Some("html".to_string()),
            public_identifier: Some("-//W3C//DTD HTML 4.01//EN".to_string()),
            system_identifier: Some("http://www.w3.org/TR/html4/strict.dtd".to_string()),
            force_quirks: false,
        }
    );
    assert_eq!(
        tokens[0].to_string(),
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#
    );
}

#[test]
fn test_malformed_doctypes_force_quirks() {
    let tokens = tokenize("<!DOCTYPE><!DOCTYPE html bogus>");
    assert_eq!(
        tokens,
        vec![
            Token::Doctype {
                name: None,
                public_identifier: None,
                system_identifier: None,
                force_quirks: true,
            },
            Token::Doctype {
                name: Some("html".to_string()),
                public_identifier: None,
                system_identifier: None,
                force_quirks: true,
            },
            Token::EndOfFile,
        ]
    );
}

// ========== raw text states ==========

#[test]
fn test_rawtext_ends_only_at_matching_end_tag() {
    let mut tokenizer = Tokenizer::new("<style>a<b</p></style>x");
    assert_eq!(tokenizer.read(), start_tag("style", &[], false));
    tokenizer.switch_to(TokenizerState::Rawtext);
    assert_eq!(tokenizer.read(), chars("a<b</p>"));
    assert_eq!(tokenizer.read(), Token::end_tag("style"));
    assert_eq!(tokenizer.read(), chars("x"));
    assert_eq!(tokenizer.read(), Token::EndOfFile);
}

#[test]
fn test_rcdata_decodes_references() {
    let mut tokenizer = Tokenizer::new("<textarea>&lt;b&gt;</TEXTAREA>");
    let _ = tokenizer.read();
    tokenizer.switch_to(TokenizerState::Rcdata);
    assert_eq!(tokenizer.read(), chars("<b>"));
    assert_eq!(tokenizer.read(), Token::end_tag("textarea"));
}

#[test]
fn test_script_data_escapes() {
    let input = "<script><!--<script>x</script>--></script>";
    let mut tokenizer = Tokenizer::new(input);
    let _ = tokenizer.read();
    tokenizer.switch_to(TokenizerState::ScriptData);
    assert_eq!(tokenizer.read(), chars("<!--<script>x</script>-->"));
    assert_eq!(tokenizer.read(), Token::end_tag("script"));
    assert_eq!(tokenizer.read(), Token::EndOfFile);
}

#[test]
fn test_script_data_keeps_markup_literal() {
    let mut tokenizer = Tokenizer::new("<script>if (a<b) {}</script>");
    let _ = tokenizer.read();
    tokenizer.switch_to(TokenizerState::ScriptData);
    assert_eq!(tokenizer.read(), chars("if (a<b) {}"));
    assert_eq!(tokenizer.read(), Token::end_tag("script"));
}

// ========== errors and iteration ==========

#[test]
fn test_eof_in_attribute_value_records_state_and_position() {
    let mut tokenizer = Tokenizer::new("<a b='c>");
    let tokens: Vec<Token> = tokenizer.by_ref().collect();
    assert_eq!(tokens, vec![Token::EndOfFile]);

    let errors = tokenizer.into_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].position, 8);
    assert_eq!(
        errors[0].state,
        ErrorState::Tokenizer(TokenizerState::AttributeValueSingleQuoted)
    );
    assert_eq!(
        errors[0].message,
        "Unexpectedly reached end of file (EOF) in input state [AttributeValueSingleQuoted]"
    );
}

#[test]
fn test_error_cap() {
    let mut tokenizer = Tokenizer::new("<1<2<3<4").with_max_errors(2);
    let _ = tokenizer.by_ref().count();
    assert_eq!(tokenizer.errors().len(), 2);
}

#[test]
fn test_iterator_stops_after_eof() {
    let mut tokenizer = Tokenizer::new("");
    assert_eq!(tokenizer.next(), Some(Token::EndOfFile));
    assert_eq!(tokenizer.next(), None);
    assert_eq!(tokenizer.read(), Token::EndOfFile);
}
