//! # meraki-parser
//!
//! A parser for the meraki keybinding configuration language.
//!
//! Parsing runs as a strict left-to-right pipeline of stages, each one fully consuming
//! its input before the next starts:
//!
//!     text → tokens → (clean tokens, comments) → provisional AST → AST with comments
//!
//! Layout
//!
//! src/meraki
//!   ├── token         Token kinds (logos) and located tokens
//!   ├── lexing        Tokenizer and the comment extraction transformation
//!   ├── parsing       Structural parser and the per-statement semantic checks
//!   ├── assembling    Comment reattachment over the finished tree
//!   ├── ast           AST nodes, parse errors and warnings
//!   ├── transforms    Runnable stages and the pre-built pipelines
//!   └── formats       Normalized text rendition of an AST
//!
//! The AST is the contract with the tools built on top of this crate (validator, linter,
//! formatter, compiler). They take it read-only; nothing here resolves modifier references
//! or checks for duplicate bindings across a file.
//!
//! For testing helpers, see the [testing module](meraki::testing).

pub mod meraki;

pub use meraki::{parse, Parsed, Parser, ParserOptions};
