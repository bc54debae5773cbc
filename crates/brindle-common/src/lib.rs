//! Common utilities for the Brindle parser.
//!
//! This crate provides shared infrastructure used by the parser crates:
//! - **Warning System** - deduplicated, switchable diagnostics on stderr

pub mod warning;
