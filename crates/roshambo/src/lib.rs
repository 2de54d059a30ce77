//! Turn-based rock-paper-scissors sessions for chat arenas.
//!
//! The core is a game-session state machine: a match is created between two
//! players in an arena, private moves from both players are correlated into
//! round resolutions, and the first player to reach the match target wins,
//! committing exactly one durable leaderboard increment. Chat transport is
//! out of scope; adapters feed [`event::InboundEvent`]s into a
//! [`engine::GameEngine`] and deliver the text it emits through a
//! [`notifier::Notifier`].

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod leaderboard;
pub mod notifier;
pub mod reaper;
pub mod registry;
pub mod round;
pub mod session;
pub mod storage;
pub mod testing;
pub mod types;

pub use config::ArenaConfig;
pub use engine::GameEngine;
pub use error::{ArenaError, ErrorKind};
pub use event::InboundEvent;
pub use leaderboard::{LeaderboardEntry, LeaderboardStore};
pub use notifier::Notifier;
pub use registry::SessionRegistry;
pub use round::{resolve, MoveToken, RoundOutcome};
pub use types::{ArenaKey, Player, PlayerId};
