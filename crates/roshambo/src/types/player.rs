use serde::{Deserialize, Serialize};

use crate::types::PlayerId;

/// A match participant: stable identity plus the display name the chat
/// platform resolved for it. Immutable for the lifetime of a session.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
}

impl Player {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            username: username.into(),
        }
    }
}
