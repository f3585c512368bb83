//! Parsing module for the meraki format
//!
//!     Structural parsing turns the clean token stream (comments already extracted) into the
//!     provisional AST: modifier definitions and the keybinding tree with line numbers, but no
//!     comments. Semantic checks run inline, statement by statement:
//!
//!         - modifier key literals must be recognized keys
//!         - key groups and command groups must have the same non-zero length
//!         - timeouts must be positive `<n>ms` values on leader blocks
//!         - leader blocks nest one level deep
//!         - a binding carries exactly one payload shape
//!
//!     Cross-statement checks (undefined modifiers, duplicate bindings) are not made here.
//!
//!     See [engine](engine) for the statement loop, [keybinding](keybinding) and
//!     [payload](payload) for the binding grammar.

pub mod cursor;
pub mod engine;
pub mod keybinding;
pub mod modifier;
pub mod payload;

use crate::meraki::ast::{Ast, Comment, Diagnostics};

pub use engine::parse_from_clean_tokens;

/// Structural parsing output, waiting for its comments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisional {
    pub ast: Ast,
    pub comments: Vec<Comment>,
    pub diagnostics: Diagnostics,
}
