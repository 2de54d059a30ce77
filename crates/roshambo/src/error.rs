use crate::types::{ArenaKey, PlayerId};

/// Errors that can occur while running game sessions.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("invalid move: {input:?}")]
    InvalidMove { input: String },

    #[error("player {player_id} is not part of this match")]
    UnknownPlayer { player_id: PlayerId },

    #[error("a match needs two distinct players")]
    PlayersNotDistinct { player_id: PlayerId },

    #[error("player {player_id} already made a move this round")]
    DuplicateMove { player_id: PlayerId },

    #[error("arena {arena} already has a match in progress")]
    ArenaOccupied { arena: ArenaKey },

    #[error("player {player_id} is already in a match")]
    PlayerAlreadyPlaying { player_id: PlayerId },

    #[error("this match has already finished")]
    SessionClosed,

    #[error("no match in progress in arena {arena}")]
    NoSessionInArena { arena: ArenaKey },

    #[error("player {player_id} is not in a match")]
    PlayerNotInGame { player_id: PlayerId },

    #[error("persistence error: {reason}")]
    Persistence {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Coarse classification used to decide how a failure is reported.
///
/// Validation, conflict and not-found errors are user mistakes and become
/// user-visible messages. Persistence errors are data-integrity failures and
/// must never be silently swallowed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Persistence,
}

impl ArenaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMove { .. }
            | Self::UnknownPlayer { .. }
            | Self::PlayersNotDistinct { .. }
            | Self::InvalidConfig { .. } => ErrorKind::Validation,
            Self::DuplicateMove { .. }
            | Self::ArenaOccupied { .. }
            | Self::PlayerAlreadyPlaying { .. } => ErrorKind::Conflict,
            Self::SessionClosed
            | Self::NoSessionInArena { .. }
            | Self::PlayerNotInGame { .. } => ErrorKind::NotFound,
            Self::Persistence { .. } => ErrorKind::Persistence,
        }
    }
}
