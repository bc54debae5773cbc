use std::fmt;

use strum_macros::Display;

use brindle_dom::{Attributes, DomTree, NodeId, NodeKind, tag};

use crate::error::{ErrorState, ParseError};
use crate::tokenizer::{Token, Tokenizer, TokenizerState};

const COMPONENT: &str = "HTML Parser";

/// The tree builder's state: how the next token is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// The general mode, handling every structural rule.
    InBody,
    /// Inside a raw text or RCDATA element, until its end tag.
    Text,
}

/// Elements that stop scope walks.
const DEFAULT_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object",
];

const BUTTON_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "button",
];

/// Elements whose end tag may be omitted when their parent closes.
const IMPLIED_END_TAG_ELEMENTS: &[&str] = &["dd", "dt", "li", "option", "optgroup", "p", "rp", "rt"];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Builds a [`DomTree`] from the tokens of a [`Tokenizer`].
///
/// The open-element stack starts with the Document, which is never
/// popped, so there is always a current node to insert into.
pub struct HtmlTreeBuilder<'a> {
    tokenizer: Tokenizer<'a>,

    insertion_mode: InsertionMode,

    /// The mode to return to when a raw text element closes.
    original_insertion_mode: Option<InsertionMode>,

    /// Ancestors currently open for insertion; the last is the current node.
    stack_of_open_elements: Vec<NodeId>,

    tree: DomTree,
}

impl<'a> HtmlTreeBuilder<'a> {
    /// Create a tree builder over `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            tokenizer: Tokenizer::new(input),
            insertion_mode: InsertionMode::InBody,
            original_insertion_mode: None,
            stack_of_open_elements: vec![NodeId::ROOT],
            tree: DomTree::new(),
        }
    }

    /// Record at most `max` parse errors. Parsing itself is not affected.
    #[must_use]
    pub fn with_max_errors(mut self, max: usize) -> Self {
        self.tokenizer = self.tokenizer.with_max_errors(max);
        self
    }

    /// Parse the whole input and return the tree.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_errors().0
    }

    /// Parse the whole input and return the tree together with every
    /// recorded parse error, in detection order.
    #[must_use]
    pub fn run_with_errors(mut self) -> (DomTree, Vec<ParseError>) {
        loop {
            let token = self.tokenizer.read();
            let eof = token.is_eof();
            let _ = self.process_token(token);
            if eof {
                break;
            }
        }
        (self.tree, self.tokenizer.into_errors())
    }

    /// Apply `token` in the current insertion mode.
    ///
    /// Returns false when the token was dropped (for example an end tag
    /// with no matching open element).
    pub fn process_token(&mut self, token: Token) -> bool {
        match self.insertion_mode {
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
        }
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// The tree built so far.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    fn parse_error<T: fmt::Display + ?Sized>(&mut self, token: &T) {
        let error = ParseError {
            position: self.tokenizer.pos(),
            message: format!(
                "Unexpected token [{token}] when in state [{}]",
                self.insertion_mode
            ),
            state: ErrorState::TreeBuilder(self.insertion_mode),
        };
        self.tokenizer.errors_mut().record(COMPONENT, error);
    }
}

// =============================================================================
// Insertion modes
// =============================================================================

impl HtmlTreeBuilder<'_> {
    fn handle_in_body_mode(&mut self, token: Token) -> bool {
        match token {
            Token::Character { data } => {
                self.insert_text(&data, true);
                true
            }
            Token::Comment { data } => {
                self.insert_node(NodeKind::Comment(data));
                true
            }
            // No doctype node kind: the declaration is kept as raw text.
            doctype @ Token::Doctype { .. } => {
                self.insert_text(&doctype.to_string(), false);
                true
            }
            Token::StartTag { .. } => self.handle_in_body_start_tag(token),
            Token::EndTag { .. } => self.handle_in_body_end_tag(&token),
            Token::EndOfFile => false,
        }
    }

    fn handle_in_body_start_tag(&mut self, token: Token) -> bool {
        let Token::StartTag {
            name,
            self_closing,
            attributes,
        } = token
        else {
            return false;
        };

        match name.as_str() {
            // Authoring-error compatibility: <image> means <img>.
            "image" => {
                return self.process_token(Token::StartTag {
                    name: "img".to_string(),
                    self_closing,
                    attributes,
                });
            }
            "script" => {
                self.insert_raw_text_element(
                    &name,
                    self_closing,
                    attributes,
                    TokenizerState::ScriptData,
                );
                return true;
            }
            "textarea" => {
                self.insert_raw_text_element(&name, self_closing, attributes, TokenizerState::Rcdata);
                return true;
            }
            "style" | "iframe" => {
                self.insert_raw_text_element(
                    &name,
                    self_closing,
                    attributes,
                    TokenizerState::Rawtext,
                );
                return true;
            }
            "li" => self.close_no_embedded_tag(&["li"]),
            "dd" | "dt" => self.close_no_embedded_tag(&["dd", "dt"]),
            "tr" => self.close_open_row(),
            heading if HEADINGS.contains(&heading) => {
                self.close_p_in_button_scope();
                if self
                    .current_tag_name()
                    .is_some_and(|current| HEADINGS.contains(&current))
                {
                    self.parse_error(&format!("<{name}>"));
                    self.pop();
                }
            }
            _ => {}
        }

        if tag::is_void(&name) {
            self.insert_empty_element(&name, self_closing, attributes);
        } else if self_closing {
            self.insert_empty_element(&name, self_closing, attributes);
            let _ = self.tree.tags_mut().mark_self_closing(&name);
        } else {
            self.insert_html_element(&name, attributes);
        }
        true
    }

    fn handle_in_body_end_tag(&mut self, token: &Token) -> bool {
        let Some(name) = token.tag_name() else {
            return false;
        };
        if !self.has_element_in_scope(name) {
            self.parse_error(token);
            return false;
        }

        self.generate_implied_end_tags_excluding(Some(name));
        if self.current_tag_name() != Some(name) {
            self.parse_error(token);
        }
        self.pop_until_tag(name);
        true
    }

    fn handle_text_mode(&mut self, token: Token) -> bool {
        match token {
            Token::Character { data } => {
                // RCDATA (textarea) text is escaped on output; raw text is not.
                let escape = self.current_tag_name() == Some("textarea");
                self.insert_text(&data, escape);
                true
            }
            Token::EndOfFile => {
                self.parse_error(&Token::EndOfFile);
                self.pop();
                self.restore_original_insertion_mode();
                self.process_token(Token::EndOfFile)
            }
            Token::EndTag { .. } => {
                self.pop();
                self.restore_original_insertion_mode();
                true
            }
            other => {
                self.parse_error(&other);
                false
            }
        }
    }

    fn restore_original_insertion_mode(&mut self) {
        self.insertion_mode = self
            .original_insertion_mode
            .take()
            .unwrap_or(InsertionMode::InBody);
    }
}

// =============================================================================
// Implicit closes
// =============================================================================

impl HtmlTreeBuilder<'_> {
    /// `li`, `dd` and `dt` cannot nest: close an open one of `names`
    /// unless a special element lies in between, then close an open `p`.
    fn close_no_embedded_tag(&mut self, names: &[&str]) {
        for index in (1..self.stack_of_open_elements.len()).rev() {
            let Some(tag_name) = self.tree.tag_name(self.stack_of_open_elements[index]) else {
                continue;
            };
            if names.contains(&tag_name) {
                let end_tag = Token::end_tag(tag_name);
                let _ = self.process_token(end_tag);
                break;
            }
            if Self::is_special_element(tag_name) && !matches!(tag_name, "address" | "div" | "p")
            {
                break;
            }
        }
        self.close_p_in_button_scope();
    }

    /// A new `tr` closes the open one within the same table section.
    fn close_open_row(&mut self) {
        for index in (1..self.stack_of_open_elements.len()).rev() {
            match self.tree.tag_name(self.stack_of_open_elements[index]) {
                Some("tr") => {
                    let _ = self.process_token(Token::end_tag("tr"));
                    break;
                }
                Some("tbody" | "table") => break,
                _ => {}
            }
        }
    }

    fn close_p_in_button_scope(&mut self) {
        if self.has_element_in_button_scope("p") {
            let _ = self.process_token(Token::end_tag("p"));
        }
    }

    /// Pop the current node while it is an element with an optional end
    /// tag, other than `exclude`.
    fn generate_implied_end_tags_excluding(&mut self, exclude: Option<&str>) {
        while let Some(tag) = self.current_tag_name()
            && IMPLIED_END_TAG_ELEMENTS.contains(&tag)
            && exclude != Some(tag)
        {
            self.pop();
        }
    }

    fn is_special_element(tag_name: &str) -> bool {
        matches!(
            tag_name,
            "address" | "applet" | "area" | "article" | "aside" | "base" | "basefont"
                | "bgsound" | "blockquote" | "body" | "br" | "button" | "caption" | "center"
                | "col" | "colgroup" | "command" | "dd" | "details" | "dir" | "div" | "dl"
                | "dt" | "embed" | "fieldset" | "figcaption" | "figure" | "footer" | "form"
                | "frame" | "frameset" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "head"
                | "header" | "hgroup" | "hr" | "html" | "iframe" | "img" | "input" | "isindex"
                | "li" | "link" | "listing" | "marquee" | "menu" | "meta" | "nav" | "noembed"
                | "noframes" | "noscript" | "object" | "ol" | "p" | "param" | "plaintext"
                | "pre" | "script" | "section" | "select" | "style" | "summary" | "table"
                | "tbody" | "td" | "textarea" | "tfoot" | "th" | "thead" | "title" | "tr"
                | "ul" | "wbr" | "xmp"
        )
    }
}

// =============================================================================
// Stack of open elements
// =============================================================================

impl HtmlTreeBuilder<'_> {
    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    fn current_tag_name(&self) -> Option<&str> {
        self.tree.tag_name(self.current_node())
    }

    /// Pop the current node. The Document stays.
    fn pop(&mut self) {
        if self.stack_of_open_elements.len() > 1 {
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// Pop up to and including the nearest element named `tag_name`.
    fn pop_until_tag(&mut self, tag_name: &str) {
        while self.stack_of_open_elements.len() > 1 {
            let popped = self.current_tag_name() == Some(tag_name);
            self.pop();
            if popped {
                break;
            }
        }
    }

    /// Walk from the current node outward: true on `tag_name`, false on
    /// any of `scope_markers`.
    fn has_element_in_specific_scope(&self, tag_name: &str, scope_markers: &[&str]) -> bool {
        for &node_id in self.stack_of_open_elements.iter().skip(1).rev() {
            if let Some(node_tag) = self.tree.tag_name(node_id) {
                if node_tag == tag_name {
                    return true;
                }
                if scope_markers.contains(&node_tag) {
                    return false;
                }
            }
        }
        false
    }

    fn has_element_in_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(tag_name, DEFAULT_SCOPE)
    }

    fn has_element_in_button_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(tag_name, BUTTON_SCOPE)
    }
}

// =============================================================================
// Insertion
// =============================================================================

impl HtmlTreeBuilder<'_> {
    /// Append a new element to the current node and make it current.
    fn insert_html_element(&mut self, name: &str, attributes: Attributes) {
        let element = self.tree.alloc_element(name, attributes);
        self.tree.append_child(self.current_node(), element);
        self.stack_of_open_elements.push(element);
    }

    /// Append a leaf element; it is never pushed.
    fn insert_empty_element(
        &mut self,
        name: &str,
        self_closing: bool,
        attributes: Attributes,
    ) {
        if self_closing {
            self.tokenizer.acknowledge_self_closing_flag();
        }
        let element = self.tree.alloc_element(name, attributes);
        self.tree.append_child(self.current_node(), element);
    }

    /// Open a `script`, `style`, `iframe` or `textarea` and hand its
    /// content to the tokenizer's `state`. The element is opened even when
    /// written self-closed, so the closing end tag has something to pop.
    fn insert_raw_text_element(
        &mut self,
        name: &str,
        self_closing: bool,
        attributes: Attributes,
        state: TokenizerState,
    ) {
        if self_closing {
            self.tokenizer.acknowledge_self_closing_flag();
        }
        self.insert_html_element(name, attributes);
        self.tokenizer.switch_to(state);
        self.original_insertion_mode = Some(self.insertion_mode);
        self.insertion_mode = InsertionMode::Text;
    }

    fn insert_node(&mut self, kind: NodeKind) {
        let node = self.tree.alloc(kind);
        self.tree.append_child(self.current_node(), node);
    }

    /// Append character data to the current node, extending its last
    /// child when that is a text node with the same escape flag.
    fn insert_text(&mut self, data: &str, escape: bool) {
        let parent = self.current_node();
        if let Some(last) = self.tree.last_child(parent)
            && let Some(text) = self.tree.as_text_mut(last)
            && text.escape == escape
        {
            text.text.push_str(data);
            return;
        }
        let node = self.tree.alloc_text(data, escape);
        self.tree.append_child(parent, node);
    }
}
