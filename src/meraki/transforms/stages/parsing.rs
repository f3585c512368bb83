//! Structural parsing stage
//!
//! Builds the provisional AST from the clean token stream and carries the comments and
//! warnings along for attachment.

use crate::meraki::ast::ParseError;
use crate::meraki::lexing::transformations::Extracted;
use crate::meraki::options::ParserOptions;
use crate::meraki::parsing::{parse_from_clean_tokens, Provisional};
use crate::meraki::transforms::Runnable;

/// Structural parsing stage
///
/// # Input
/// - `Extracted` - clean tokens, comments, and warnings
///
/// # Output
/// - `Provisional` - AST without comments, plus the comments and warnings
#[derive(Default)]
pub struct StructuralParsing {
    options: ParserOptions,
}

impl StructuralParsing {
    pub fn new(options: ParserOptions) -> Self {
        StructuralParsing { options }
    }
}

impl Runnable<Extracted, Provisional> for StructuralParsing {
    fn run(&self, input: Extracted) -> Result<Provisional, ParseError> {
        let ast = parse_from_clean_tokens(&input.tokens, &input.source, &self.options)?;
        Ok(Provisional {
            ast,
            comments: input.comments,
            diagnostics: input.diagnostics,
        })
    }
}
