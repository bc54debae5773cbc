use core::fmt;

use brindle_dom::Attributes;
use strum_macros::IntoStaticStr;

/// One lexical unit produced by the [`Tokenizer`](super::Tokenizer).
///
/// Tokens are transient: the tree builder consumes each one and drops it.
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum Token {
    /// `<!DOCTYPE name PUBLIC "pub" "sys">`. Missing parts stay `None`,
    /// which is distinct from an empty string.
    Doctype {
        /// Lowercased doctype name.
        name: Option<String>,
        /// The public identifier.
        public_identifier: Option<String>,
        /// The system identifier.
        system_identifier: Option<String>,
        /// Set when the declaration was malformed.
        force_quirks: bool,
    },

    /// A start tag with its attributes and self-closing flag.
    StartTag {
        /// Lowercased tag name.
        name: String,
        /// `<name/>`
        self_closing: bool,
        /// Attributes in first-seen order.
        attributes: Attributes,
    },

    /// An end tag. Attributes are kept only so they can be reported.
    EndTag {
        /// Lowercased tag name.
        name: String,
        /// Expected to be empty.
        attributes: Attributes,
    },

    /// `<!--data-->`
    Comment {
        /// The comment text.
        data: String,
    },

    /// A run of character data. Never empty, and never emitted twice in a row.
    Character {
        /// The decoded characters.
        data: String,
    },

    /// End of input.
    EndOfFile,
}

impl Token {
    /// A doctype with every part missing.
    #[must_use]
    pub const fn new_doctype() -> Self {
        Self::Doctype {
            name: None,
            public_identifier: None,
            system_identifier: None,
            force_quirks: false,
        }
    }

    /// A start tag with an empty name.
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Attributes::new(),
        }
    }

    /// An end tag with an empty name.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
            attributes: Attributes::new(),
        }
    }

    /// An end tag for `name`, as synthesized by the tree builder.
    #[must_use]
    pub fn end_tag(name: &str) -> Self {
        Self::EndTag {
            name: name.to_string(),
            attributes: Attributes::new(),
        }
    }

    /// A comment with empty data.
    #[must_use]
    pub const fn new_comment() -> Self {
        Self::Comment {
            data: String::new(),
        }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// The variant name, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// The tag name of a start or end tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name, .. } => Some(name),
            _ => None,
        }
    }

    // Mutation helpers for the tokenizer. Calling one on the wrong variant
    // is a tokenizer bug, so they panic.

    /// Append to the tag name, lowercasing ASCII letters.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub fn append_to_tag_name(&mut self, s: &str) {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name, .. } => {
                name.extend(s.chars().map(|c| c.to_ascii_lowercase()));
            }
            _ => panic!("append_to_tag_name called on non-tag token"),
        }
    }

    /// Set the self-closing flag. End tags have none, so `</br/>` is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub fn set_self_closing(&mut self) {
        match self {
            Self::StartTag { self_closing, .. } => *self_closing = true,
            Self::EndTag { .. } => {}
            _ => panic!("set_self_closing called on non-tag token"),
        }
    }

    /// The attribute list of a start or end tag.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => attributes,
            _ => panic!("attributes_mut called on non-tag token"),
        }
    }

    /// Append to comment data.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-comment token.
    pub fn append_to_comment(&mut self, s: &str) {
        match self {
            Self::Comment { data } => data.push_str(s),
            _ => panic!("append_to_comment called on non-comment token"),
        }
    }

    /// Append to the doctype name, creating it if missing.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub fn append_to_doctype_name(&mut self, s: &str) {
        match self {
            Self::Doctype { name, .. } => name
                .get_or_insert_with(String::new)
                .extend(s.chars().map(|c| c.to_ascii_lowercase())),
            _ => panic!("append_to_doctype_name called on non-DOCTYPE token"),
        }
    }

    /// Append to the public identifier, creating it if missing.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub fn append_to_public_identifier(&mut self, s: &str) {
        match self {
            Self::Doctype {
                public_identifier, ..
            } => public_identifier.get_or_insert_with(String::new).push_str(s),
            _ => panic!("append_to_public_identifier called on non-DOCTYPE token"),
        }
    }

    /// Append to the system identifier, creating it if missing.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub fn append_to_system_identifier(&mut self, s: &str) {
        match self {
            Self::Doctype {
                system_identifier, ..
            } => system_identifier.get_or_insert_with(String::new).push_str(s),
            _ => panic!("append_to_system_identifier called on non-DOCTYPE token"),
        }
    }

    /// Turn on the force-quirks flag.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-DOCTYPE token.
    pub fn set_force_quirks(&mut self) {
        match self {
            Self::Doctype { force_quirks, .. } => *force_quirks = true,
            _ => panic!("set_force_quirks called on non-DOCTYPE token"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype {
                name,
                public_identifier,
                system_identifier,
                ..
            } => {
                write!(f, "<!DOCTYPE")?;
                if let Some(name) = name {
                    write!(f, " {name}")?;
                }
                match (public_identifier, system_identifier) {
                    (Some(public), Some(system)) => write!(f, " PUBLIC \"{public}\" \"{system}\"")?,
                    (Some(public), None) => write!(f, " PUBLIC \"{public}\"")?,
                    (None, Some(system)) => write!(f, " SYSTEM \"{system}\"")?,
                    (None, None) => {}
                }
                write!(f, ">")
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.key(), attr.value())?;
                }
                if *self_closing {
                    write!(f, "/")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name, .. } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Character { data } => write!(f, "{data}"),
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
