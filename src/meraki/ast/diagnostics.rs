//! Recoverable diagnostics
//!
//!     Comment problems never fail a parse. They are recorded here as warnings and returned
//!     next to the AST.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    /// `@END` without a closing `END`
    MalformedComment,
    /// A comment with no node at the line it documents
    OrphanedComment,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::MalformedComment => write!(f, "malformed comment"),
            WarningKind::OrphanedComment => write!(f, "orphaned comment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub line: usize,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, line: usize, message: impl Into<String>) -> Self {
        Warning {
            kind,
            line,
            message: message.into(),
        }
    }

    pub fn malformed_comment(line: usize, message: impl Into<String>) -> Self {
        Self::new(WarningKind::MalformedComment, line, message)
    }

    pub fn orphaned_comment(line: usize, message: impl Into<String>) -> Self {
        Self::new(WarningKind::OrphanedComment, line, message)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: warning: {}: {}", self.line, self.kind, self.message)
    }
}

/// Warning sink threaded through the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        warn!(line = warning.line, kind = %warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
