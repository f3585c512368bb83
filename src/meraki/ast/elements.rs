//! Element-specific AST node definitions
//!
//!     document:    [Ast], the root
//!     modifier:    [ModifierDef], `name = key + key`
//!     keybinding:  [Keybinding] and its parts ([Key], [ActivationFlag], [Payload],
//!                  [GroupExpansion])
//!     comment:     [Comment], owned by the node it documents or by the root as an orphan

pub mod comment;
pub mod document;
pub mod keybinding;
pub mod modifier;

pub use comment::{Comment, CommentKind};
pub use document::Ast;
pub use keybinding::{ActivationFlag, GroupExpansion, Key, Keybinding, Payload};
pub use modifier::ModifierDef;
