//! Standard transform definitions
//!
//! Pre-built pipelines with default [ParserOptions](crate::meraki::options::ParserOptions),
//! defined as static references using `once_cell::sync::Lazy`. For custom options use
//! [Parser](crate::meraki::parser::Parser), which builds the same chain per instance.

use crate::meraki::assembling::{AttachComments, Parsed};
use crate::meraki::lexing::transformations::Extracted;
use crate::meraki::lexing::Lexed;
use crate::meraki::transforms::stages::{CommentExtraction, StructuralParsing, Tokenization};
use crate::meraki::transforms::Transform;
use once_cell::sync::Lazy;

/// Type alias for the lexing transform
pub type LexingTransform = Transform<String, Lexed>;

/// Type alias for the full parse transform
pub type AstTransform = Transform<String, Parsed>;

/// Tokenization: String → Lexed
pub static TOKENIZATION: Lazy<LexingTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(Tokenization::new()));

/// Tokenization and comment extraction: String → Extracted
pub static COMMENT_EXTRACTION: Lazy<Transform<String, Extracted>> =
    Lazy::new(|| Transform::from_fn(Ok).then_transform(&TOKENIZATION).then(CommentExtraction::new()));

/// The complete pipeline: String → Parsed
///
/// 1. Tokenization
/// 2. Comment extraction
/// 3. Structural parsing with semantic checks
/// 4. Comment attachment
pub static STRING_TO_AST: Lazy<AstTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then_transform(&COMMENT_EXTRACTION)
        .then(StructuralParsing::default())
        .then(AttachComments::new())
});
