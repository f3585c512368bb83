//! Testing utilities for AST assertions
//!
//!     Tests walk the AST through [assert_ast](fn@assert_ast) rather than matching on node
//!     fields directly. The fluent API names what is being checked (`.action(..)`,
//!     `.timeout(..)`, `.nested(..)`), reports the path of the failing node, and keeps tests
//!     working when a node's representation changes.
//!
//!     ```rust,ignore
//!     use meraki_parser::meraki::testing::assert_ast;
//!
//!     let parsed = parse("mod1 - l : {\n h : open -a Safari;\n}")?;
//!     assert_ast(&parsed.ast)
//!         .keybinding_count(1)
//!         .keybinding(0, |binding| {
//!             binding
//!                 .combination("mod1")
//!                 .key("l")
//!                 .timeout(500)
//!                 .nested("h", |entry| {
//!                     entry.action("open -a Safari");
//!                 });
//!         });
//!     ```
//!
//!     [structure_of] drops line numbers and comments, for comparing trees that are expected
//!     to differ only in layout.

mod ast_assertions;

pub use ast_assertions::{
    assert_ast, AstAssertion, CommentAssertion, KeybindingAssertion, ModifierAssertion,
};

use crate::meraki::ast::Ast;

/// Copy of `ast` with every line number zeroed and every comment removed
pub fn structure_of(ast: &Ast) -> Ast {
    let mut ast = ast.clone();
    for modifier in ast.modifiers.values_mut() {
        modifier.line_number = 0;
        modifier.comments.clear();
    }
    for binding in &mut ast.keybindings {
        binding.line_number = 0;
        binding.comments.clear();
        if let Some(nested) = binding.nested_bindings_mut() {
            for entry in nested.values_mut() {
                entry.line_number = 0;
                entry.comments.clear();
            }
        }
    }
    ast.orphan_comments.clear();
    ast
}
