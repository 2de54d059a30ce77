//! In-memory test harness.
//!
//! Wires a [`GameEngine`] to the in-memory leaderboard and a notifier that
//! records every outbound message, so tests can drive chat events and
//! assert on exactly what the arena and the players would have seen.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::config::ArenaConfig;
use crate::engine::GameEngine;
use crate::error::ArenaError;
use crate::event::InboundEvent;
use crate::notifier::Notifier;
use crate::storage::memory::MemoryLeaderboard;
use crate::types::{ArenaKey, Player, PlayerId};

/// Notifier that records messages instead of delivering them.
#[derive(Default)]
pub struct RecordingNotifier {
    announcements: Mutex<Vec<(ArenaKey, String)>>,
    whispers: Mutex<Vec<(PlayerId, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All arena announcements, in delivery order.
    pub fn announcements(&self) -> Vec<(ArenaKey, String)> {
        self.announcements.lock().clone()
    }

    /// All private messages, in delivery order.
    pub fn whispers(&self) -> Vec<(PlayerId, String)> {
        self.whispers.lock().clone()
    }

    /// Announcement texts delivered to one arena.
    pub fn arena_texts(&self, arena: &ArenaKey) -> Vec<String> {
        self.announcements
            .lock()
            .iter()
            .filter(|(key, _)| key == arena)
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Private texts delivered to one player.
    pub fn whisper_texts(&self, player_id: &PlayerId) -> Vec<String> {
        self.whispers
            .lock()
            .iter()
            .filter(|(id, _)| id == player_id)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.announcements.lock().clear();
        self.whispers.lock().clear();
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn announce(&self, arena: &ArenaKey, text: &str) -> Result<(), ArenaError> {
        self.announcements
            .lock()
            .push((arena.clone(), text.to_string()));
        Ok(())
    }

    async fn whisper(&self, player_id: &PlayerId, text: &str) -> Result<(), ArenaError> {
        self.whispers
            .lock()
            .push((player_id.clone(), text.to_string()));
        Ok(())
    }
}

/// A fully wired in-memory engine for tests.
pub struct TestArena {
    pub engine: GameEngine,
    pub notifier: Arc<RecordingNotifier>,
    pub leaderboard: Arc<MemoryLeaderboard>,
}

impl TestArena {
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::default())
    }

    pub fn with_config(config: ArenaConfig) -> Self {
        let notifier = Arc::new(RecordingNotifier::new());
        let leaderboard = Arc::new(MemoryLeaderboard::new());
        let engine = GameEngine::new(
            config,
            Arc::clone(&leaderboard) as Arc<dyn crate::leaderboard::LeaderboardStore>,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
        )
        .expect("TestArena config should be valid");
        Self {
            engine,
            notifier,
            leaderboard,
        }
    }

    pub async fn start(&self, arena: &str, first: &Player, second: &Player) {
        self.engine
            .handle_event(InboundEvent::StartRequested {
                arena: ArenaKey::new(arena),
                players: [first.clone(), second.clone()],
            })
            .await;
    }

    pub async fn submit(&self, player_id: &str, text: &str) {
        self.engine
            .handle_event(InboundEvent::MoveSubmitted {
                player_id: PlayerId::new(player_id),
                text: text.to_string(),
            })
            .await;
    }

    pub async fn reset(&self, arena: &str) {
        self.engine
            .handle_event(InboundEvent::ResetRequested {
                arena: ArenaKey::new(arena),
            })
            .await;
    }

    pub async fn request_leaderboard(&self, arena: &str) {
        self.engine
            .handle_event(InboundEvent::LeaderboardRequested {
                arena: ArenaKey::new(arena),
            })
            .await;
    }
}

impl Default for TestArena {
    fn default() -> Self {
        Self::new()
    }
}
