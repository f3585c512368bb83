//! Comment assertions

use crate::meraki::ast::{Comment, CommentKind};

pub struct CommentAssertion<'a> {
    comment: &'a Comment,
    context: String,
}

impl<'a> CommentAssertion<'a> {
    pub(crate) fn new(comment: &'a Comment, context: String) -> Self {
        CommentAssertion { comment, context }
    }

    pub fn kind(self, expected: CommentKind) -> Self {
        assert_eq!(
            self.comment.kind, expected,
            "{}: Expected {:?} comment, found {:?}",
            self.context, expected, self.comment.kind
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.comment.text, expected,
            "{}: Expected comment text {:?}, found {:?}",
            self.context, expected, self.comment.text
        );
        self
    }

    /// Assert the first and last line the comment spans
    pub fn lines(self, start: usize, end: usize) -> Self {
        assert_eq!(
            (self.comment.start_line, self.comment.end_line),
            (start, end),
            "{}: Expected comment on lines {}..={}, found {}..={}",
            self.context,
            start,
            end,
            self.comment.start_line,
            self.comment.end_line
        );
        self
    }
}

/// Shared comment-list assertions for node assertions
pub(crate) fn assert_comment_count(context: &str, comments: &[Comment], expected: usize) {
    assert_eq!(
        comments.len(),
        expected,
        "{}: Expected {} comments, found {:?}",
        context,
        expected,
        comments.iter().map(|c| c.text.as_str()).collect::<Vec<_>>()
    );
}

pub(crate) fn comment_at<'a>(context: &str, comments: &'a [Comment], index: usize) -> CommentAssertion<'a> {
    assert!(
        index < comments.len(),
        "{}: Comment index {} out of bounds ({} comments)",
        context,
        index,
        comments.len()
    );
    CommentAssertion::new(&comments[index], format!("{}.comments[{}]", context, index))
}
