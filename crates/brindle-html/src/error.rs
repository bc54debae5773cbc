//! Parse errors.
//!
//! Malformed markup never stops a parse. Each problem is recorded as a
//! [`ParseError`] and parsing carries on with a recovery rule.

use std::fmt;

use brindle_common::warning::warn_once;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::parser::InsertionMode;
use crate::tokenizer::TokenizerState;

/// The state machine state active when an error was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorState {
    /// Found while tokenizing.
    Tokenizer(TokenizerState),
    /// Found while building the tree.
    TreeBuilder(InsertionMode),
}

impl fmt::Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tokenizer(state) => write!(f, "{state}"),
            Self::TreeBuilder(mode) => write!(f, "{mode}"),
        }
    }
}

impl Serialize for ErrorState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A recoverable problem in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message} at offset {position} in {state}")]
pub struct ParseError {
    /// Byte offset into the input.
    pub position: usize,
    /// What went wrong.
    pub message: String,
    /// State machine state at detection.
    pub state: ErrorState,
}

/// The ordered list of errors for one parse, optionally capped.
///
/// Every recorded error is also forwarded to the warning log under the
/// component that found it.
#[derive(Debug, Clone, Default)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
    max: Option<usize>,
}

impl ParseErrors {
    /// An empty list that records at most `max` errors (`None` = unlimited).
    #[must_use]
    pub const fn new(max: Option<usize>) -> Self {
        Self {
            errors: Vec::new(),
            max,
        }
    }

    /// Record `error`, unless the cap has been reached.
    pub fn record(&mut self, component: &str, error: ParseError) {
        if self.max.is_some_and(|max| self.errors.len() >= max) {
            return;
        }
        warn_once(component, &error.to_string());
        self.errors.push(error);
    }

    /// Recorded errors in detection order.
    #[must_use]
    pub fn as_slice(&self) -> &[ParseError] {
        &self.errors
    }

    /// Number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Take the recorded errors.
    #[must_use]
    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }
}
