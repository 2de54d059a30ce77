//! Outbound notification boundary.
//!
//! The core never talks to the chat transport directly; an adapter
//! implements this trait and delivers the text verbatim.

use async_trait::async_trait;

use crate::error::ArenaError;
use crate::types::{ArenaKey, PlayerId};

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Announce text publicly in an arena.
    async fn announce(&self, arena: &ArenaKey, text: &str) -> Result<(), ArenaError>;

    /// Send text privately to a player.
    async fn whisper(&self, player_id: &PlayerId, text: &str) -> Result<(), ArenaError>;
}
