//! Token stream transformations
//!
//! Transformations receive the located token stream produced by the tokenizer and reshape
//! it before structural parsing.

pub mod comment_extraction;

pub use comment_extraction::{extract_comments, Extracted};
