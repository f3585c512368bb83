//! Parser facade
//!
//! [Parser] holds a pipeline built for its [ParserOptions]; [parse] runs the static default
//! pipeline. Both take the source as an in-memory string and return the AST with its
//! warnings, or the first structural error.
//!
//! ```rust,ignore
//! use meraki_parser::{parse, Parser, ParserOptions};
//!
//! let parsed = parse("mod1 = lcmd + lalt\nmod1 - m : open -a Mail.app")?;
//! assert_eq!(parsed.ast.keybindings.len(), 1);
//!
//! let parser = Parser::with_options(ParserOptions::default().with_default_timeout(750));
//! let parsed = parser.parse("mod1 - l : {\n h : open -a Safari\n}")?;
//! ```

use crate::meraki::assembling::{AttachComments, Parsed};
use crate::meraki::ast::ParseError;
use crate::meraki::lexing::transformations::Extracted;
use crate::meraki::options::ParserOptions;
use crate::meraki::token::TokenStream;
use crate::meraki::transforms::stages::StructuralParsing;
use crate::meraki::transforms::standard::{COMMENT_EXTRACTION, STRING_TO_AST, TOKENIZATION};
use crate::meraki::transforms::Transform;

/// Parse with default options
pub fn parse(source: &str) -> Result<Parsed, ParseError> {
    STRING_TO_AST.run(source.to_string())
}

/// A parser configured with [ParserOptions]
pub struct Parser {
    options: ParserOptions,
    pipeline: Transform<String, Parsed>,
}

impl Parser {
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> Self {
        let pipeline = Transform::from_fn(Ok)
            .then_transform(&COMMENT_EXTRACTION)
            .then(StructuralParsing::new(options.clone()))
            .then(AttachComments::new());
        Parser { options, pipeline }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn parse(&self, source: &str) -> Result<Parsed, ParseError> {
        self.pipeline.run(source.to_string())
    }

    /// Located tokens, comments included
    pub fn tokenize(&self, source: &str) -> Result<TokenStream, ParseError> {
        Ok(TOKENIZATION.run(source.to_string())?.tokens)
    }

    /// Clean tokens and comments, before structural parsing
    pub fn extract_comments(&self, source: &str) -> Result<Extracted, ParseError> {
        COMMENT_EXTRACTION.run(source.to_string())
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
