//! HTML tokenizer module.
//!
//! A state machine over a [`Cursor`](crate::cursor::Cursor) that turns
//! markup into [`Token`]s. Malformed input never stops it; each problem is
//! recorded as a [`ParseError`](crate::error::ParseError) and tokenizing
//! continues.

/// Character reference decoding and [`unescape`].
pub mod character_reference;
/// State machine states and the tokenizer itself.
pub mod core;
/// Emission, current-token and error helpers.
mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::character_reference::unescape;
pub use self::core::{Tokenizer, TokenizerState};
pub use self::token::Token;
