//! Keybinding assertions

use super::comment::{assert_comment_count, comment_at, CommentAssertion};
use crate::meraki::ast::{ActivationFlag, Key, Keybinding, Payload};

pub struct KeybindingAssertion<'a> {
    binding: &'a Keybinding,
    context: String,
}

impl<'a> KeybindingAssertion<'a> {
    pub(crate) fn new(binding: &'a Keybinding, context: String) -> Self {
        KeybindingAssertion { binding, context }
    }

    pub fn combination(self, expected: &str) -> Self {
        assert_eq!(
            self.binding.key_combination, expected,
            "{}: Expected key combination {:?}, found {:?}",
            self.context, expected, self.binding.key_combination
        );
        self
    }

    /// Assert a single key
    pub fn key(self, expected: &str) -> Self {
        match &self.binding.key {
            Some(Key::Single(key)) => assert_eq!(
                key, expected,
                "{}: Expected key {:?}, found {:?}",
                self.context, expected, key
            ),
            other => panic!("{}: Expected key {:?}, found {:?}", self.context, expected, other),
        }
        self
    }

    pub fn key_group(self, expected: &[&str]) -> Self {
        match &self.binding.key {
            Some(Key::Group(keys)) => assert_eq!(
                keys, expected,
                "{}: Expected key group {:?}, found {:?}",
                self.context, expected, keys
            ),
            other => panic!(
                "{}: Expected key group {:?}, found {:?}",
                self.context, expected, other
            ),
        }
        self
    }

    pub fn no_key(self) -> Self {
        assert!(
            self.binding.key.is_none(),
            "{}: Expected no key, found {:?}",
            self.context,
            self.binding.key
        );
        self
    }

    pub fn timeout(self, expected: u64) -> Self {
        assert_eq!(
            self.binding.timeout_ms,
            Some(expected),
            "{}: Expected timeout {}ms, found {:?}",
            self.context,
            expected,
            self.binding.timeout_ms
        );
        self
    }

    pub fn no_timeout(self) -> Self {
        assert_eq!(
            self.binding.timeout_ms, None,
            "{}: Expected no timeout",
            self.context
        );
        self
    }

    /// Assert the exact set of activation flags
    pub fn flags(self, expected: &[ActivationFlag]) -> Self {
        let actual: Vec<ActivationFlag> = self.binding.activation_flags.iter().copied().collect();
        let mut expected = expected.to_vec();
        expected.sort();
        expected.dedup();
        assert_eq!(
            actual, expected,
            "{}: Expected flags {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn action(self, expected: &str) -> Self {
        match &self.binding.payload {
            Payload::Action(action) => assert_eq!(
                action, expected,
                "{}: Expected action {:?}, found {:?}",
                self.context, expected, action
            ),
            other => panic!(
                "{}: Expected action {:?}, found {}",
                self.context,
                expected,
                payload_name(other)
            ),
        }
        self
    }

    pub fn actions(self, expected: &[&str]) -> Self {
        match &self.binding.payload {
            Payload::Actions(actions) => assert_eq!(
                actions, expected,
                "{}: Expected actions {:?}, found {:?}",
                self.context, expected, actions
            ),
            other => panic!(
                "{}: Expected actions {:?}, found {}",
                self.context,
                expected,
                payload_name(other)
            ),
        }
        self
    }

    /// Assert a command group with the given keys and command elements
    pub fn group(self, keys: &[&str], commands: &[&str]) -> Self {
        match &self.binding.payload {
            Payload::Group(group) => {
                assert_eq!(group.keys, keys, "{}: group keys", self.context);
                assert_eq!(group.commands, commands, "{}: group commands", self.context);
            }
            other => panic!(
                "{}: Expected command group, found {}",
                self.context,
                payload_name(other)
            ),
        }
        self
    }

    /// Assert the `(key, action)` pairs this binding expands into
    pub fn expands_to(self, expected: &[(&str, &str)]) -> Self {
        let actual: Vec<(String, String)> = self
            .binding
            .expand()
            .into_iter()
            .map(|b| {
                let key = b.key_literal().unwrap_or_default().to_string();
                let action = b.action().unwrap_or_default().to_string();
                (key, action)
            })
            .collect();
        let expected: Vec<(String, String)> = expected
            .iter()
            .map(|(k, a)| (k.to_string(), a.to_string()))
            .collect();
        assert_eq!(actual, expected, "{}: expansion", self.context);
        self
    }

    pub fn nested_count(self, expected: usize) -> Self {
        let nested = self.expect_nested();
        assert_eq!(
            nested.len(),
            expected,
            "{}: Expected {} leader entries, found {:?}",
            self.context,
            expected,
            nested.keys().collect::<Vec<_>>()
        );
        self
    }

    /// Assert on a leader block entry by key
    pub fn nested<F>(self, key: &str, assertion: F) -> Self
    where
        F: FnOnce(KeybindingAssertion<'a>),
    {
        let nested = self.expect_nested();
        let entry = nested.get(key).unwrap_or_else(|| {
            panic!(
                "{}: No leader entry for key {:?} (entries: {:?})",
                self.context,
                key,
                nested.keys().collect::<Vec<_>>()
            )
        });
        assertion(KeybindingAssertion::new(
            entry,
            format!("{}.nested[{}]", self.context, key),
        ));
        self
    }

    pub fn line(self, expected: usize) -> Self {
        assert_eq!(
            self.binding.line_number, expected,
            "{}: Expected line {}, found {}",
            self.context, expected, self.binding.line_number
        );
        self
    }

    pub fn comment_count(self, expected: usize) -> Self {
        assert_comment_count(&self.context, &self.binding.comments, expected);
        self
    }

    pub fn comment<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(CommentAssertion<'a>),
    {
        assertion(comment_at(&self.context, &self.binding.comments, index));
        self
    }

    fn expect_nested(&self) -> &'a indexmap::IndexMap<String, Keybinding> {
        let binding: &'a Keybinding = self.binding;
        match &binding.payload {
            Payload::Nested(nested) => nested,
            other => panic!(
                "{}: Expected leader block, found {}",
                self.context,
                payload_name(other)
            ),
        }
    }
}

fn payload_name(payload: &Payload) -> &'static str {
    match payload {
        Payload::Action(_) => "single action",
        Payload::Actions(_) => "action chain",
        Payload::Nested(_) => "leader block",
        Payload::Group(_) => "command group",
    }
}
