//! Lexer
//!
//!     This module orchestrates tokenization for the meraki format. Lexing runs as two passes
//!     over the source:
//!
//!         1. Core tokenization using the logos lexer. See [base_tokenization](base_tokenization).
//!            Every token gets its byte range and 1-based line. Unterminated strings and
//!            characters no token matches stop here with a [LexError].
//!
//!         2. Comment extraction. See
//!            [comment_extraction](transformations::comment_extraction).
//!            Line, inline and `@END` block comments are lifted into a side list, leaving a
//!            clean token stream for the structural parser.
//!
//!     Comment extraction never fails. A block comment that runs off the end of the input is
//!     reported as a warning and kept as a trailing comment.

pub mod base_tokenization;
pub mod common;
pub mod transformations;

pub use base_tokenization::tokenize;
pub use common::{LexError, Lexed};
// Re-export token types for consumers that still import them from `lexing`
pub use crate::meraki::token::{LocatedToken, Token, TokenStream};
