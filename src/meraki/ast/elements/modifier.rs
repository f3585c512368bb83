//! Modifier definition element
//!
//!     `mod1 = lcmd + lalt` names a set of physical modifier keys. The name may itself be a
//!     compound such as `mod2 + shift`; it is kept as an opaque string.

use super::comment::Comment;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierDef {
    pub name: String,
    /// Key literals in source order, duplicates kept
    pub keys: Vec<String>,
    pub comments: Vec<Comment>,
    pub line_number: usize,
}

impl ModifierDef {
    pub fn new(name: impl Into<String>, keys: Vec<String>, line_number: usize) -> Self {
        ModifierDef {
            name: name.into(),
            keys,
            comments: Vec::new(),
            line_number,
        }
    }
}

impl fmt::Display for ModifierDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.keys.join(" + "))
    }
}
