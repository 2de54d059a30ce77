//! In-memory leaderboard for tests and embedded use. Not durable.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::ArenaError;
use crate::leaderboard::{LeaderboardEntry, LeaderboardStore};
use crate::types::{Player, PlayerId};

pub struct MemoryLeaderboard {
    inner: Mutex<Inner>,
}

struct Inner {
    entries: HashMap<PlayerId, StoredEntry>,
    /// Monotone counter assigning each player a first-win sequence number,
    /// used as the deterministic tie-break in `top_entries`.
    next_seq: u64,
}

struct StoredEntry {
    username: String,
    wins: u64,
    first_win_seq: u64,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                next_seq: 0,
            }),
        }
    }
}

impl Default for MemoryLeaderboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeaderboardStore for MemoryLeaderboard {
    async fn record_win(&self, winner: &Player) -> Result<(), ArenaError> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        match inner.entries.get_mut(&winner.id) {
            Some(entry) => {
                entry.wins += 1;
                entry.username = winner.username.clone();
            }
            None => {
                let seq = inner.next_seq;
                inner.next_seq += 1;
                inner.entries.insert(
                    winner.id.clone(),
                    StoredEntry {
                        username: winner.username.clone(),
                        wins: 1,
                        first_win_seq: seq,
                    },
                );
            }
        }
        Ok(())
    }

    async fn top_entries(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ArenaError> {
        let inner = self.inner.lock();
        let mut ranked: Vec<(&PlayerId, &StoredEntry)> = inner.entries.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.wins
                .cmp(&a.1.wins)
                .then(a.1.first_win_seq.cmp(&b.1.first_win_seq))
        });
        Ok(ranked
            .into_iter()
            .take(limit)
            .map(|(id, entry)| LeaderboardEntry {
                player_id: id.clone(),
                username: entry.username.clone(),
                wins: entry.wins,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn first_win_creates_an_entry() {
        let store = MemoryLeaderboard::new();
        store.record_win(&Player::new("u-1", "alice")).await.unwrap();

        let top = store.top_entries(10).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].wins, 1);
        assert_eq!(top[0].username, "alice");
    }

    #[tokio::test]
    async fn later_wins_increment_and_refresh_the_username() {
        let store = MemoryLeaderboard::new();
        store.record_win(&Player::new("u-1", "alice")).await.unwrap();
        store
            .record_win(&Player::new("u-1", "alice-renamed"))
            .await
            .unwrap();

        let top = store.top_entries(10).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].wins, 2);
        assert_eq!(top[0].username, "alice-renamed");
    }

    #[tokio::test]
    async fn empty_store_returns_an_empty_sequence() {
        let store = MemoryLeaderboard::new();
        assert!(store.top_entries(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ranking_is_wins_descending_then_first_win_order() {
        let store = MemoryLeaderboard::new();
        let alice = Player::new("u-1", "alice");
        let bob = Player::new("u-2", "bob");
        let carol = Player::new("u-3", "carol");

        store.record_win(&bob).await.unwrap();
        store.record_win(&carol).await.unwrap();
        store.record_win(&alice).await.unwrap();
        store.record_win(&alice).await.unwrap();

        let top = store.top_entries(10).await.unwrap();
        let names: Vec<&str> = top.iter().map(|e| e.username.as_str()).collect();
        // alice leads on wins; bob and carol tie and keep first-win order.
        assert_eq!(names, ["alice", "bob", "carol"]);

        let top_two = store.top_entries(2).await.unwrap();
        assert_eq!(top_two.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_wins_for_one_player_never_lose_updates() {
        let store = Arc::new(MemoryLeaderboard::new());
        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.record_win(&Player::new("u-1", "alice")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let top = store.top_entries(1).await.unwrap();
        assert_eq!(top[0].wins, 32);
    }
}
