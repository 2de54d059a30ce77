//! Process-wide mapping from arenas and players to active sessions.
//!
//! The registry owns every live [`GameSession`] and enforces two compound
//! invariants: at most one session per arena, and at most one session per
//! player across all arenas. Both maps live behind a single mutex so the
//! checks and the inserts are atomic.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::ArenaError;
use crate::session::GameSession;
use crate::types::{ArenaKey, Player, PlayerId};

/// Shared handle to a live session. The inner mutex serializes every
/// mutation of one session; it must never be held across an `.await`.
pub type SessionHandle = Arc<Mutex<GameSession>>;

/// Owned registry of active sessions. Created at process start, cleared at
/// shutdown; passed by reference to whichever component needs it.
pub struct SessionRegistry {
    inner: Mutex<Inner>,
}

struct Inner {
    by_arena: HashMap<ArenaKey, SessionHandle>,
    /// Index for routing private move submissions and for the per-player
    /// "already playing" check.
    by_player: HashMap<PlayerId, ArenaKey>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                by_arena: HashMap::new(),
                by_player: HashMap::new(),
            }),
        }
    }

    /// Create and register a session for `arena` between two distinct
    /// players, with scores zeroed and the round counter at 1.
    ///
    /// Fails with `ArenaOccupied` if the arena already hosts a session and
    /// with `PlayerAlreadyPlaying` if either player is in an active session
    /// anywhere, not just in this arena.
    pub fn start_session(
        &self,
        arena: ArenaKey,
        players: [Player; 2],
        match_target: u32,
    ) -> Result<SessionHandle, ArenaError> {
        if players[0].id == players[1].id {
            return Err(ArenaError::PlayersNotDistinct {
                player_id: players[0].id.clone(),
            });
        }

        let mut inner = self.inner.lock();
        if inner.by_arena.contains_key(&arena) {
            return Err(ArenaError::ArenaOccupied { arena });
        }
        for player in &players {
            if inner.by_player.contains_key(&player.id) {
                return Err(ArenaError::PlayerAlreadyPlaying {
                    player_id: player.id.clone(),
                });
            }
        }

        let player_ids = [players[0].id.clone(), players[1].id.clone()];
        let session = Arc::new(Mutex::new(GameSession::new(
            arena.clone(),
            players,
            match_target,
        )));
        inner.by_arena.insert(arena.clone(), Arc::clone(&session));
        for id in player_ids {
            inner.by_player.insert(id, arena.clone());
        }
        debug!(%arena, "session created");
        Ok(session)
    }

    /// Route a private move submission to the session the player belongs
    /// to, regardless of arena.
    pub fn find_by_player(&self, player_id: &PlayerId) -> Result<SessionHandle, ArenaError> {
        let inner = self.inner.lock();
        inner
            .by_player
            .get(player_id)
            .and_then(|arena| inner.by_arena.get(arena))
            .cloned()
            .ok_or_else(|| ArenaError::PlayerNotInGame {
                player_id: player_id.clone(),
            })
    }

    /// Route an arena-scoped command (reset, score display) to its session.
    pub fn find_by_arena(&self, arena: &ArenaKey) -> Result<SessionHandle, ArenaError> {
        self.inner
            .lock()
            .by_arena
            .get(arena)
            .cloned()
            .ok_or_else(|| ArenaError::NoSessionInArena {
                arena: arena.clone(),
            })
    }

    /// Remove the session for `arena`, releasing both players for future
    /// matches. Idempotent: a no-op when no session exists.
    pub fn remove_session(&self, arena: &ArenaKey) -> bool {
        let mut inner = self.inner.lock();
        let Some(session) = inner.by_arena.remove(arena) else {
            return false;
        };
        let players = session.lock().players().clone();
        for player in players {
            inner.by_player.remove(&player.id);
        }
        debug!(%arena, "session removed");
        true
    }

    /// Remove every session idle for at least `max_idle`. Returns the keys
    /// of the removed sessions.
    pub fn reap_idle(&self, max_idle: Duration) -> Vec<ArenaKey> {
        let mut inner = self.inner.lock();
        let idle: Vec<ArenaKey> = inner
            .by_arena
            .iter()
            .filter(|(_, session)| session.lock().is_idle(max_idle))
            .map(|(arena, _)| arena.clone())
            .collect();
        for arena in &idle {
            if let Some(session) = inner.by_arena.remove(arena) {
                let players = session.lock().players().clone();
                for player in players {
                    inner.by_player.remove(&player.id);
                }
            }
        }
        idle
    }

    /// Number of active sessions.
    pub fn len(&self) -> usize {
        self.inner.lock().by_arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().by_arena.is_empty()
    }

    /// Drop all sessions. Used at shutdown.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.by_arena.clear();
        inner.by_player.clear();
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> [Player; 2] {
        [Player::new(a, a), Player::new(b, b)]
    }

    #[test]
    fn start_session_registers_under_arena_and_players() {
        let registry = SessionRegistry::new();
        registry
            .start_session(ArenaKey::new("ch-1"), pair("u-1", "u-2"), 3)
            .unwrap();

        assert_eq!(registry.len(), 1);
        registry.find_by_arena(&ArenaKey::new("ch-1")).unwrap();
        registry.find_by_player(&PlayerId::new("u-1")).unwrap();
        registry.find_by_player(&PlayerId::new("u-2")).unwrap();
    }

    #[test]
    fn occupied_arena_rejects_a_second_session() {
        let registry = SessionRegistry::new();
        registry
            .start_session(ArenaKey::new("ch-1"), pair("u-1", "u-2"), 3)
            .unwrap();
        let err = registry
            .start_session(ArenaKey::new("ch-1"), pair("u-3", "u-4"), 3)
            .unwrap_err();
        assert!(matches!(err, ArenaError::ArenaOccupied { .. }));
    }

    #[test]
    fn a_player_may_be_in_at_most_one_session_across_arenas() {
        let registry = SessionRegistry::new();
        registry
            .start_session(ArenaKey::new("ch-1"), pair("u-1", "u-2"), 3)
            .unwrap();
        // Same player, different arena.
        let err = registry
            .start_session(ArenaKey::new("ch-2"), pair("u-2", "u-3"), 3)
            .unwrap_err();
        assert!(matches!(
            err,
            ArenaError::PlayerAlreadyPlaying { player_id } if player_id == PlayerId::new("u-2")
        ));
    }

    #[test]
    fn identical_players_are_rejected() {
        let registry = SessionRegistry::new();
        let err = registry
            .start_session(ArenaKey::new("ch-1"), pair("u-1", "u-1"), 3)
            .unwrap_err();
        assert!(matches!(err, ArenaError::PlayersNotDistinct { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_session_releases_both_players() {
        let registry = SessionRegistry::new();
        registry
            .start_session(ArenaKey::new("ch-1"), pair("u-1", "u-2"), 3)
            .unwrap();

        assert!(registry.remove_session(&ArenaKey::new("ch-1")));
        assert!(registry.find_by_arena(&ArenaKey::new("ch-1")).is_err());
        assert!(registry.find_by_player(&PlayerId::new("u-1")).is_err());

        // Players are free again.
        registry
            .start_session(ArenaKey::new("ch-2"), pair("u-1", "u-2"), 3)
            .unwrap();
    }

    #[test]
    fn remove_session_is_idempotent() {
        let registry = SessionRegistry::new();
        assert!(!registry.remove_session(&ArenaKey::new("ch-1")));
        assert!(!registry.remove_session(&ArenaKey::new("ch-1")));
    }

    #[test]
    fn lookups_on_an_empty_registry_are_not_found() {
        let registry = SessionRegistry::new();
        let err = registry.find_by_arena(&ArenaKey::new("ch-1")).unwrap_err();
        assert!(matches!(err, ArenaError::NoSessionInArena { .. }));
        let err = registry.find_by_player(&PlayerId::new("u-1")).unwrap_err();
        assert!(matches!(err, ArenaError::PlayerNotInGame { .. }));
    }

    #[test]
    fn reap_idle_removes_stale_sessions_and_frees_players() {
        let registry = SessionRegistry::new();
        registry
            .start_session(ArenaKey::new("ch-1"), pair("u-1", "u-2"), 3)
            .unwrap();

        // Nothing is idle against a generous bound.
        assert!(registry.reap_idle(Duration::from_secs(3600)).is_empty());

        let reaped = registry.reap_idle(Duration::ZERO);
        assert_eq!(reaped, vec![ArenaKey::new("ch-1")]);
        assert!(registry.is_empty());
        assert!(registry.find_by_player(&PlayerId::new("u-1")).is_err());
    }

    #[test]
    fn clear_drops_everything() {
        let registry = SessionRegistry::new();
        registry
            .start_session(ArenaKey::new("ch-1"), pair("u-1", "u-2"), 3)
            .unwrap();
        registry
            .start_session(ArenaKey::new("ch-2"), pair("u-3", "u-4"), 3)
            .unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.find_by_player(&PlayerId::new("u-3")).is_err());
    }
}
