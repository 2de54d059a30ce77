//! Durable win tallies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ArenaError;
use crate::types::{Player, PlayerId};

/// One player's cumulative win record.
///
/// Created on the first win; `wins` is monotonically non-decreasing and the
/// stored username tracks the winner's latest display name. No entry exists
/// for a player with zero wins.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub username: String,
    pub wins: u64,
}

/// Durable mapping from player identity to cumulative win count.
///
/// Implementations must apply `record_win` as one atomic upsert-increment:
/// concurrent wins for the same player may never lose an update. A recorded
/// win must survive process restart (the in-memory implementation is for
/// tests and embedded use only).
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Record one win: create the entry with `wins = 1` on the player's
    /// first win, otherwise increment and overwrite the stored username.
    async fn record_win(&self, winner: &Player) -> Result<(), ArenaError>;

    /// The top `limit` entries ordered by wins descending, ties broken by
    /// first-win insertion order. Empty when no one has won yet.
    async fn top_entries(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ArenaError>;
}
