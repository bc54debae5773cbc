//! HTML tokenizer and tree builder for Brindle.
//!
//! # Scope
//!
//! This crate implements:
//! - A [`Cursor`] over the input text
//! - The [`Tokenizer`] state machine, including RCDATA, RAWTEXT and script
//!   data states, comments, doctypes, CDATA sections and character references
//! - The [`HtmlTreeBuilder`], a pragmatic two-mode tree builder that
//!   closes list items, definition terms, rows, paragraphs and headings
//!   implicitly and routes raw text elements through the tokenizer
//!
//! Malformed markup never aborts a parse. Every problem becomes a
//! [`ParseError`] and a best-effort tree is always returned.
//!
//! # Not Implemented
//!
//! - Foreign content (SVG, MathML) and `template`
//! - Table, form and frameset insertion modes
//! - The adoption agency algorithm
//!
//! # Example
//!
//! ```
//! let (tree, errors) = brindle_html::parse("<p>Hello<br>World</p>");
//! let p = tree.elements_by_tag_name(tree.root(), "p", None, None)[0];
//! assert_eq!(tree.text(p), "Hello World");
//! assert!(errors.is_empty());
//! ```

/// Position-tracked access to the input.
pub mod cursor;
/// Parse error values.
pub mod error;
/// Tree construction.
pub mod parser;
/// The tokenizer state machine.
pub mod tokenizer;

pub use cursor::Cursor;
pub use error::{ErrorState, ParseError, ParseErrors};
pub use parser::{HtmlTreeBuilder, InsertionMode, print_tree, tree_dump};
pub use tokenizer::{Token, Tokenizer, TokenizerState, unescape};

use brindle_dom::DomTree;

/// Parse `input` into a document tree and the ordered list of parse errors.
#[must_use]
pub fn parse(input: &str) -> (DomTree, Vec<ParseError>) {
    HtmlTreeBuilder::new(input).run_with_errors()
}

/// Tokenize all of `input`, ending with [`Token::EndOfFile`].
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).collect()
}
