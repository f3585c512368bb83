//! Modifier definition assertions

use super::comment::{assert_comment_count, comment_at, CommentAssertion};
use crate::meraki::ast::ModifierDef;

pub struct ModifierAssertion<'a> {
    modifier: &'a ModifierDef,
    context: String,
}

impl<'a> ModifierAssertion<'a> {
    pub(crate) fn new(modifier: &'a ModifierDef, context: String) -> Self {
        ModifierAssertion { modifier, context }
    }

    pub fn keys(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.modifier.keys, expected,
            "{}: Expected keys {:?}, found {:?}",
            self.context, expected, self.modifier.keys
        );
        self
    }

    pub fn line(self, expected: usize) -> Self {
        assert_eq!(
            self.modifier.line_number, expected,
            "{}: Expected line {}, found {}",
            self.context, expected, self.modifier.line_number
        );
        self
    }

    pub fn comment_count(self, expected: usize) -> Self {
        assert_comment_count(&self.context, &self.modifier.comments, expected);
        self
    }

    pub fn comment<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(CommentAssertion<'a>),
    {
        assertion(comment_at(&self.context, &self.modifier.comments, index));
        self
    }
}
