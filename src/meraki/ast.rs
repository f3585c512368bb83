//! AST definitions for the meraki format
//!
//!     The tree handed to every consumer of the parser (validator, linter, formatter,
//!     compiler). It is produced once per parse call and never shared between calls.
//!
//! Shape
//!
//!     An [Ast] holds the modifier table, the top-level keybindings in source order, and the
//!     comments reattachment could not place on any node.
//!
//!     A [Keybinding] carries exactly one [Payload]: a single action, a `;` chain, a leader
//!     block of nested bindings, or a command group expansion. Leader blocks nest one level
//!     only, so the tree is at most two bindings deep.
//!
//!     Every node records the 1-based line it was declared on; comments are matched to nodes
//!     by those lines.
//!
//! Errors and Warnings
//!
//!     Structural problems are [ParseError]s and end the parse. Comment problems are
//!     [Warning]s collected in [Diagnostics] and never fail a parse.

pub mod diagnostics;
pub mod elements;
pub mod error;

pub use diagnostics::{Diagnostics, Warning, WarningKind};
pub use elements::{
    ActivationFlag, Ast, Comment, CommentKind, GroupExpansion, Key, Keybinding, ModifierDef,
    Payload,
};
pub use error::{format_source_context, ErrorKind, ParseError};
