//! Inbound event boundary.
//!
//! The chat adapter resolves identities and strips command syntax before
//! events reach the core, so routing over this closed set is exhaustive.

use serde::{Deserialize, Serialize};

use crate::types::{ArenaKey, Player, PlayerId};

/// One event per arriving chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InboundEvent {
    /// Someone asked to start a match between two players in an arena.
    StartRequested {
        arena: ArenaKey,
        players: [Player; 2],
    },
    /// A player sent a private move. `text` is the raw move text; token
    /// parsing happens in the engine, not in the session.
    MoveSubmitted { player_id: PlayerId, text: String },
    /// Someone asked to discard the arena's match.
    ResetRequested { arena: ArenaKey },
    /// Someone asked to see the leaderboard.
    LeaderboardRequested { arena: ArenaKey },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serialization_round_trip() {
        let event = InboundEvent::MoveSubmitted {
            player_id: PlayerId::new("u-1"),
            text: "rock".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let parsed: InboundEvent = serde_json::from_str(&json).unwrap();
        match parsed {
            InboundEvent::MoveSubmitted { player_id, text } => {
                assert_eq!(player_id, PlayerId::new("u-1"));
                assert_eq!(text, "rock");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
