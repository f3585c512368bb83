//! Error types for parsing
//!
//!     A parse either succeeds or stops at the first structural error. Every error carries the
//!     1-based line it was raised on and a message describing what the grammar expected there.

use crate::meraki::lexing::common::LexError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// What went wrong, independent of where
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Unterminated string or unmatched input
    Lex,
    /// Right-hand side of a modifier definition is not a known modifier key
    InvalidModifierKey,
    /// Missing key, colon or payload
    MalformedKeybinding,
    /// Non-positive or unparsable timeout, or a timeout on a non-block payload
    InvalidTimeout,
    /// Brace mismatch
    UnbalancedBlock,
    /// Leader block inside a leader block
    UnsupportedNesting,
    /// Key group and command group differ in length, or one is empty
    GroupArityMismatch,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Lex => "lexical error",
            ErrorKind::InvalidModifierKey => "invalid modifier key",
            ErrorKind::MalformedKeybinding => "malformed keybinding",
            ErrorKind::InvalidTimeout => "invalid timeout",
            ErrorKind::UnbalancedBlock => "unbalanced block",
            ErrorKind::UnsupportedNesting => "unsupported nesting",
            ErrorKind::GroupArityMismatch => "group arity mismatch",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}: {message}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ErrorKind, line: usize, message: impl Into<String>) -> Self {
        ParseError {
            kind,
            line,
            message: message.into(),
        }
    }

    pub fn invalid_modifier_key(line: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidModifierKey, line, message)
    }

    pub fn malformed_keybinding(line: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedKeybinding, line, message)
    }

    pub fn invalid_timeout(line: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTimeout, line, message)
    }

    pub fn unbalanced_block(line: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnbalancedBlock, line, message)
    }

    pub fn unsupported_nesting(line: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedNesting, line, message)
    }

    pub fn group_arity_mismatch(line: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::GroupArityMismatch, line, message)
    }

    /// Full report with the offending line marked in its surrounding source
    pub fn render(&self, source: &str) -> String {
        let mut report = format!("error: {}\n", self);
        report.push_str(&format_source_context(source, self.line));
        report
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(ErrorKind::Lex, err.line(), err.to_string())
    }
}

/// Format source code context around an error line
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// `line` is 1-based, as carried by every error.
pub fn format_source_context(source: &str, line: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = line.saturating_sub(1);

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();
    for (offset, text) in lines[start_line.min(end_line)..end_line].iter().enumerate() {
        let line_num = start_line + offset;
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, text));
    }
    context
}
