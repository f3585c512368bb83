//! Parser configuration
//!
//!     Loading configuration files is left to callers; [ParserOptions] only derives serde so
//!     a loader can deserialize it from whatever format it reads. Missing fields fall back to
//!     the defaults.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

/// Timeout given to leader blocks that do not declare one
pub const DEFAULT_TIMEOUT_MS: u64 = 500;

const DEFAULT_TIMEOUT: NonZeroU64 = match NonZeroU64::new(DEFAULT_TIMEOUT_MS) {
    Some(timeout) => timeout,
    None => NonZeroU64::MIN,
};

/// Key literals accepted on the right-hand side of a modifier definition
pub const BUILTIN_MODIFIER_KEYS: &[&str] = &[
    "cmd", "alt", "shift", "ctrl", "fn", "lcmd", "lalt", "lshift", "lctrl", "rcmd", "ralt",
    "rshift", "rctrl", "hyper", "meh",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Timeouts are positive, so a configured `0` is rejected on deserialization
    pub default_timeout_ms: NonZeroU64,
    /// Accepted in modifier definitions in addition to [BUILTIN_MODIFIER_KEYS]
    pub extra_modifier_keys: Vec<String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            default_timeout_ms: DEFAULT_TIMEOUT,
            extra_modifier_keys: Vec::new(),
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the leader timeout. Zero is raised to 1ms.
    pub fn with_default_timeout(mut self, timeout_ms: u64) -> Self {
        self.default_timeout_ms = NonZeroU64::new(timeout_ms).unwrap_or(NonZeroU64::MIN);
        self
    }

    pub fn with_modifier_key(mut self, key: impl Into<String>) -> Self {
        self.extra_modifier_keys.push(key.into());
        self
    }

    pub fn is_modifier_key(&self, key: &str) -> bool {
        BUILTIN_MODIFIER_KEYS.contains(&key) || self.extra_modifier_keys.iter().any(|k| k == key)
    }
}
