//! Main module for meraki library functionality

pub mod assembling;
pub mod ast;
pub mod formats;
pub mod lexing;
pub mod options;
pub mod parser;
pub mod parsing;
pub mod testing;
pub mod token;
pub mod transforms;

pub use assembling::Parsed;
pub use ast::{
    ActivationFlag, Ast, Comment, CommentKind, Diagnostics, ErrorKind, GroupExpansion, Key,
    Keybinding, ModifierDef, ParseError, Payload, Warning, WarningKind,
};
pub use options::ParserOptions;
pub use parser::{parse, Parser};
