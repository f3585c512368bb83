//! Keybinding element
//!
//!     mod_combo ["-" key | "-" {keys} | "+" {keys}] [timeout] [~flag ...] ":" payload
//!
//!     The payload is a sum type: a binding has exactly one of a single action, an action
//!     chain, a leader block or a command group expansion.
//!
//! Leader blocks
//!
//!     A binding whose payload is `{ ... }` is a leader key. Its entries are keybindings with
//!     an empty key combination, keyed by their key literal in source order. Entries never
//!     open a block of their own.
//!
//! Group expansion
//!
//!     `mod1 + { c, f } : open -a { Chrome, Finder }` pairs keys with command elements by
//!     position. The binding keeps the unexpanded form; [Keybinding::expand] produces the
//!     independent bindings.

use super::comment::Comment;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Key-transition phase a modifier-only binding fires on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationFlag {
    Down,
    Up,
    Repeat,
}

impl ActivationFlag {
    /// Parse a flag name without its `~`
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "down" => Some(ActivationFlag::Down),
            "up" => Some(ActivationFlag::Up),
            "repeat" => Some(ActivationFlag::Repeat),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationFlag::Down => "down",
            ActivationFlag::Up => "up",
            ActivationFlag::Repeat => "repeat",
        }
    }
}

impl fmt::Display for ActivationFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "~{}", self.as_str())
    }
}

/// The key part of a binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Single(String),
    Group(Vec<String>),
}

impl Key {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Key::Single(key) => Some(key),
            Key::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&[String]> {
        match self {
            Key::Single(_) => None,
            Key::Group(keys) => Some(keys),
        }
    }
}

/// A key group paired positionally with a command group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupExpansion {
    pub keys: Vec<String>,
    pub commands: Vec<String>,
    /// Command text before the `{`, verbatim
    #[serde(default)]
    pub prefix: String,
    /// Command text after the `}`, verbatim
    #[serde(default)]
    pub suffix: String,
}

impl GroupExpansion {
    pub fn new(keys: Vec<String>, commands: Vec<String>) -> Self {
        GroupExpansion {
            keys,
            commands,
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    pub fn with_template(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    /// `(key, command)` pairs with the template applied to each command element
    pub fn expand(&self) -> Vec<(String, String)> {
        self.keys
            .iter()
            .zip(&self.commands)
            .map(|(key, command)| {
                let full = format!("{}{}{}", self.prefix, command, self.suffix);
                (key.clone(), full.trim().to_string())
            })
            .collect()
    }
}

/// What a binding does when it fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    Action(String),
    Actions(Vec<String>),
    Nested(IndexMap<String, Keybinding>),
    Group(GroupExpansion),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybinding {
    /// Modifier name or compound expression, not resolved here. Empty for leader entries.
    pub key_combination: String,
    pub key: Option<Key>,
    /// Only set on leader bindings
    pub timeout_ms: Option<u64>,
    pub activation_flags: BTreeSet<ActivationFlag>,
    pub payload: Payload,
    pub comments: Vec<Comment>,
    pub line_number: usize,
}

impl Keybinding {
    pub fn new(
        key_combination: impl Into<String>,
        key: Option<Key>,
        payload: Payload,
        line_number: usize,
    ) -> Self {
        Keybinding {
            key_combination: key_combination.into(),
            key,
            timeout_ms: None,
            activation_flags: BTreeSet::new(),
            payload,
            comments: Vec::new(),
            line_number,
        }
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_flags(mut self, flags: impl IntoIterator<Item = ActivationFlag>) -> Self {
        self.activation_flags.extend(flags);
        self
    }

    pub fn action(&self) -> Option<&str> {
        match &self.payload {
            Payload::Action(action) => Some(action),
            _ => None,
        }
    }

    pub fn actions(&self) -> Option<&[String]> {
        match &self.payload {
            Payload::Actions(actions) => Some(actions),
            _ => None,
        }
    }

    pub fn nested_bindings(&self) -> Option<&IndexMap<String, Keybinding>> {
        match &self.payload {
            Payload::Nested(nested) => Some(nested),
            _ => None,
        }
    }

    pub fn nested_bindings_mut(&mut self) -> Option<&mut IndexMap<String, Keybinding>> {
        match &mut self.payload {
            Payload::Nested(nested) => Some(nested),
            _ => None,
        }
    }

    pub fn group_expansion(&self) -> Option<&GroupExpansion> {
        match &self.payload {
            Payload::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn is_leader(&self) -> bool {
        matches!(self.payload, Payload::Nested(_))
    }

    /// The key as written for single-key bindings
    pub fn key_literal(&self) -> Option<&str> {
        self.key.as_ref().and_then(Key::as_single)
    }

    /// Expand a group binding into one binding per key
    ///
    /// Non-group bindings expand to themselves. Expanded bindings share the line and flags
    /// of the group binding; comments stay with the unexpanded binding only.
    pub fn expand(&self) -> Vec<Keybinding> {
        let Payload::Group(group) = &self.payload else {
            return vec![self.clone()];
        };
        group
            .expand()
            .into_iter()
            .map(|(key, command)| Keybinding {
                key_combination: self.key_combination.clone(),
                key: Some(Key::Single(key)),
                timeout_ms: None,
                activation_flags: self.activation_flags.clone(),
                payload: Payload::Action(command),
                comments: Vec::new(),
                line_number: self.line_number,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_names() {
        assert_eq!(ActivationFlag::parse("down"), Some(ActivationFlag::Down));
        assert_eq!(ActivationFlag::parse("repeat"), Some(ActivationFlag::Repeat));
        assert_eq!(ActivationFlag::parse("hold"), None);
        assert_eq!(ActivationFlag::Up.to_string(), "~up");
    }

    #[test]
    fn test_group_expansion_applies_template() {
        let group = GroupExpansion::new(
            vec!["c".into(), "f".into()],
            vec!["Chrome".into(), "Finder".into()],
        )
        .with_template("open -a ", "");
        assert_eq!(
            group.expand(),
            vec![
                ("c".to_string(), "open -a Chrome".to_string()),
                ("f".to_string(), "open -a Finder".to_string()),
            ]
        );
    }

    #[test]
    fn test_keybinding_expand() {
        let binding = Keybinding::new(
            "mod1",
            Some(Key::Group(vec!["n".into(), "p".into()])),
            Payload::Group(
                GroupExpansion::new(vec!["n".into(), "p".into()], vec!["Chrome".into(), "Safari".into()])
                    .with_template("open -a ", ""),
            ),
            4,
        );
        let expanded = binding.expand();
        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[0].key_literal(), Some("n"));
        assert_eq!(expanded[0].action(), Some("open -a Chrome"));
        assert_eq!(expanded[1].key_literal(), Some("p"));
        assert_eq!(expanded[1].action(), Some("open -a Safari"));
        assert!(expanded.iter().all(|b| b.line_number == 4));
    }

    #[test]
    fn test_non_group_expands_to_itself() {
        let binding = Keybinding::new(
            "mod1",
            Some(Key::Single("m".into())),
            Payload::Action("open -a Mail.app".into()),
            1,
        );
        assert_eq!(binding.expand(), vec![binding.clone()]);
    }

    #[test]
    fn test_payload_accessors_are_exclusive() {
        let binding = Keybinding::new(
            "mod1",
            Some(Key::Single("x".into())),
            Payload::Actions(vec!["a".into(), "b".into()]),
            1,
        );
        assert!(binding.action().is_none());
        assert_eq!(binding.actions().map(|a| a.len()), Some(2));
        assert!(binding.nested_bindings().is_none());
        assert!(binding.group_expansion().is_none());
        assert!(!binding.is_leader());
    }
}
