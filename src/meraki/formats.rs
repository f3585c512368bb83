//! Output formats
//!
//! The parser's consumers (formatter, compiler) own the real output formats. This module only
//! carries the normalized text rendition used to check that an AST survives being written out
//! and parsed again.

pub mod normalized;

pub use normalized::{to_normalized_string, ToMerakiString};
