//! Document root

use super::comment::Comment;
use super::keybinding::Keybinding;
use super::modifier::ModifierDef;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The root of a parsed meraki file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ast {
    /// Modifier definitions by name, in declaration order
    pub modifiers: IndexMap<String, ModifierDef>,
    pub keybindings: Vec<Keybinding>,
    /// Comments no node claimed
    pub orphan_comments: Vec<Comment>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifier(&self, name: &str) -> Option<&ModifierDef> {
        self.modifiers.get(name)
    }

    /// Add a modifier definition. A redefinition replaces the earlier one in place.
    pub fn define_modifier(&mut self, modifier: ModifierDef) {
        self.modifiers.insert(modifier.name.clone(), modifier);
    }

    /// Every keybinding with leader entries following their leader
    pub fn iter_all_keybindings(&self) -> impl Iterator<Item = &Keybinding> {
        self.keybindings.iter().flat_map(|binding| {
            std::iter::once(binding).chain(
                binding
                    .nested_bindings()
                    .into_iter()
                    .flat_map(|nested| nested.values()),
            )
        })
    }

    /// Top-level bindings with every group binding expanded
    pub fn expanded_keybindings(&self) -> Vec<Keybinding> {
        self.keybindings.iter().flat_map(Keybinding::expand).collect()
    }

    /// Every comment in the tree, attached or orphaned
    pub fn all_comments(&self) -> impl Iterator<Item = &Comment> {
        self.modifiers
            .values()
            .flat_map(|m| m.comments.iter())
            .chain(self.iter_all_keybindings().flat_map(|b| b.comments.iter()))
            .chain(self.orphan_comments.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty() && self.keybindings.is_empty() && self.orphan_comments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meraki::ast::{Key, Payload};

    #[test]
    fn test_redefined_modifier_keeps_position() {
        let mut ast = Ast::new();
        ast.define_modifier(ModifierDef::new("mod1", vec!["lcmd".into()], 1));
        ast.define_modifier(ModifierDef::new("mod2", vec!["lalt".into()], 2));
        ast.define_modifier(ModifierDef::new("mod1", vec!["rcmd".into()], 3));

        let names: Vec<&str> = ast.modifiers.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["mod1", "mod2"]);
        assert_eq!(ast.modifier("mod1").map(|m| m.line_number), Some(3));
    }

    #[test]
    fn test_iter_all_keybindings_walks_leader_entries() {
        let mut nested = IndexMap::new();
        nested.insert(
            "h".to_string(),
            Keybinding::new("", Some(Key::Single("h".into())), Payload::Action("a".into()), 2),
        );
        let leader = Keybinding::new("mod1", Some(Key::Single("l".into())), Payload::Nested(nested), 1)
            .with_timeout(500);
        let ast = Ast {
            keybindings: vec![leader],
            ..Ast::default()
        };
        let lines: Vec<usize> = ast.iter_all_keybindings().map(|b| b.line_number).collect();
        assert_eq!(lines, vec![1, 2]);
    }
}
