//! Comment extraction stage
//!
//! Lifts comments out of the token stream. Never fails; unclosed `@END` blocks become
//! warnings on the output.

use crate::meraki::ast::ParseError;
use crate::meraki::lexing::transformations::{extract_comments, Extracted};
use crate::meraki::lexing::Lexed;
use crate::meraki::transforms::Runnable;

/// Comment extraction stage
///
/// # Input
/// - `Lexed` - the source and its located tokens
///
/// # Output
/// - `Extracted` - clean tokens, comments, and warnings
pub struct CommentExtraction;

impl CommentExtraction {
    pub fn new() -> Self {
        CommentExtraction
    }
}

impl Default for CommentExtraction {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Lexed, Extracted> for CommentExtraction {
    fn run(&self, input: Lexed) -> Result<Extracted, ParseError> {
        Ok(extract_comments(input))
    }
}
