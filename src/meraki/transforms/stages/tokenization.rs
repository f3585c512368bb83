//! Tokenization stage
//!
//! Runs the logos lexer over the source and keeps the source with the tokens.

use crate::meraki::ast::ParseError;
use crate::meraki::lexing::base_tokenization::lex;
use crate::meraki::lexing::Lexed;
use crate::meraki::transforms::Runnable;

/// Tokenization stage
///
/// # Input
/// - `String` - source text
///
/// # Output
/// - `Lexed` - the source and its located tokens
pub struct Tokenization;

impl Tokenization {
    pub fn new() -> Self {
        Tokenization
    }
}

impl Default for Tokenization {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, Lexed> for Tokenization {
    fn run(&self, input: String) -> Result<Lexed, ParseError> {
        Ok(lex(input)?)
    }
}
