//! Fluent assertion API for meraki AST nodes

mod comment;
mod keybinding;
mod modifier;

pub use comment::CommentAssertion;
pub use keybinding::KeybindingAssertion;
pub use modifier::ModifierAssertion;

use crate::meraki::ast::Ast;

/// Create an assertion builder for an AST
pub fn assert_ast(ast: &Ast) -> AstAssertion<'_> {
    AstAssertion { ast }
}

pub struct AstAssertion<'a> {
    ast: &'a Ast,
}

impl<'a> AstAssertion<'a> {
    pub fn modifier_count(self, expected: usize) -> Self {
        let names: Vec<&String> = self.ast.modifiers.keys().collect();
        assert_eq!(
            names.len(),
            expected,
            "Expected {} modifiers, found {}: {:?}",
            expected,
            names.len(),
            names
        );
        self
    }

    /// Assert on a modifier definition by name
    pub fn modifier<F>(self, name: &str, assertion: F) -> Self
    where
        F: FnOnce(ModifierAssertion<'a>),
    {
        let modifier = self.ast.modifiers.get(name).unwrap_or_else(|| {
            panic!(
                "No modifier named '{}' (defined: {:?})",
                name,
                self.ast.modifiers.keys().collect::<Vec<_>>()
            )
        });
        assertion(ModifierAssertion::new(
            modifier,
            format!("modifiers[{}]", name),
        ));
        self
    }

    pub fn keybinding_count(self, expected: usize) -> Self {
        assert_eq!(
            self.ast.keybindings.len(),
            expected,
            "Expected {} keybindings, found {}",
            expected,
            self.ast.keybindings.len()
        );
        self
    }

    /// Assert on a top-level keybinding by index
    pub fn keybinding<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(KeybindingAssertion<'a>),
    {
        assert!(
            index < self.ast.keybindings.len(),
            "Keybinding index {} out of bounds (AST has {} keybindings)",
            index,
            self.ast.keybindings.len()
        );
        assertion(KeybindingAssertion::new(
            &self.ast.keybindings[index],
            format!("keybindings[{}]", index),
        ));
        self
    }

    pub fn orphan_count(self, expected: usize) -> Self {
        assert_eq!(
            self.ast.orphan_comments.len(),
            expected,
            "Expected {} orphan comments, found {:?}",
            expected,
            self.ast.orphan_comments
        );
        self
    }

    pub fn orphan<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(CommentAssertion<'a>),
    {
        assert!(
            index < self.ast.orphan_comments.len(),
            "Orphan index {} out of bounds ({} orphans)",
            index,
            self.ast.orphan_comments.len()
        );
        assertion(CommentAssertion::new(
            &self.ast.orphan_comments[index],
            format!("orphan_comments[{}]", index),
        ));
        self
    }
}
