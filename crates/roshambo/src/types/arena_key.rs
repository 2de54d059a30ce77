use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the public channel a match is bound to.
///
/// At most one active session exists per arena key.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ArenaKey(pub String);

impl ArenaKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl fmt::Display for ArenaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ArenaKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
