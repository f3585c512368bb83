//! Individual transformation stages
//!
//! Each stage wraps one pass of the parser behind [`Runnable`](super::Runnable):
//!
//! - [`Tokenization`]: `String` → `Lexed`
//! - [`CommentExtraction`]: `Lexed` → `Extracted`
//! - [`StructuralParsing`]: `Extracted` → `Provisional`
//!
//! The final stage, comment attachment, lives with the other tree passes in
//! [assembling](crate::meraki::assembling).

pub mod comment_extraction;
pub mod parsing;
pub mod tokenization;

pub use comment_extraction::CommentExtraction;
pub use parsing::StructuralParsing;
pub use tokenization::Tokenization;
