//! Comment element
//!
//!     Comments are extracted before structural parsing and attached back to nodes
//!     afterwards. A comment is owned by exactly one node, or by the [Ast](super::Ast) as an
//!     orphan when no node sits where it points.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three comment forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    /// `#` on a line of its own
    Line,
    /// `#` after code on the same line
    Inline,
    /// `@END` ... `END`
    Multiline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
    pub start_line: usize,
    pub end_line: usize,
    /// The code line the comment starts on: always set for inline comments, and set for a
    /// multiline block that opens after code
    pub associated_line: Option<usize>,
}

impl Comment {
    pub fn line(text: impl Into<String>, line: usize) -> Self {
        Comment {
            kind: CommentKind::Line,
            text: text.into(),
            start_line: line,
            end_line: line,
            associated_line: None,
        }
    }

    pub fn inline(text: impl Into<String>, line: usize) -> Self {
        Comment {
            kind: CommentKind::Inline,
            text: text.into(),
            start_line: line,
            end_line: line,
            associated_line: Some(line),
        }
    }

    pub fn multiline(text: impl Into<String>, start_line: usize, end_line: usize) -> Self {
        Comment {
            kind: CommentKind::Multiline,
            text: text.into(),
            start_line,
            end_line,
            associated_line: None,
        }
    }

    pub fn is_inline(&self) -> bool {
        self.kind == CommentKind::Inline
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CommentKind::Line | CommentKind::Inline if self.text.is_empty() => write!(f, "#"),
            CommentKind::Line | CommentKind::Inline => write!(f, "# {}", self.text),
            CommentKind::Multiline => write!(f, "@END\n{}\nEND", self.text),
        }
    }
}
