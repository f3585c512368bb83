//! Common lexer module
//!
//! Shared output and error types for the tokenizer.

use crate::meraki::token::TokenStream;
use thiserror::Error;

/// Longest identifier the tokenizer accepts
pub const MAX_IDENTIFIER_LENGTH: usize = 50;

/// Output of the tokenizer: the source it was run on and its located tokens.
///
/// The source travels with the tokens because later stages slice commands out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    pub source: String,
    pub tokens: TokenStream,
}

/// Errors that can occur during lexing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A double-quoted string reached end of line or end of input before its closing quote
    #[error("unterminated string literal starting on line {line}")]
    UnterminatedString { line: usize },
    #[error("identifier on line {line} is {length} characters long (max {max})", max = MAX_IDENTIFIER_LENGTH)]
    IdentifierTooLong { length: usize, line: usize },
    /// No token matches the input at this position
    #[error("unexpected character {ch:?} on line {line}")]
    UnexpectedCharacter { ch: char, line: usize },
}

impl LexError {
    /// The 1-based line the error starts on
    pub fn line(&self) -> usize {
        match self {
            LexError::UnterminatedString { line } => *line,
            LexError::IdentifierTooLong { line, .. } => *line,
            LexError::UnexpectedCharacter { line, .. } => *line,
        }
    }
}
