//! SQLite-backed leaderboard via sqlx.
//!
//! One table:
//! - `leaderboard` — `player_id TEXT PRIMARY KEY, username TEXT, wins INTEGER`
//!
//! The win increment is a single `INSERT .. ON CONFLICT DO UPDATE` so
//! concurrent winners can never lose an update. Tie order in `top_entries`
//! is first-win insertion order, carried by the implicit `rowid`.
//!
//! This module is only available when the `sql` feature is enabled.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use crate::error::ArenaError;
use crate::leaderboard::{LeaderboardEntry, LeaderboardStore};
use crate::types::{Player, PlayerId};

/// SQLite-backed leaderboard store.
pub struct SqlLeaderboard {
    pool: SqlitePool,
}

impl SqlLeaderboard {
    /// Create a store over an existing connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a store at the given SQLite URL (e.g. `sqlite://leaderboard.db`)
    /// and create the schema if it does not exist yet.
    pub async fn open(url: &str) -> Result<Self, ArenaError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|e| ArenaError::Persistence {
                reason: format!("failed to open leaderboard database: {e}"),
                source: Some(Box::new(e)),
            })?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Create the leaderboard table if it does not exist.
    pub async fn migrate(&self) -> Result<(), ArenaError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS leaderboard (
                player_id TEXT PRIMARY KEY,
                username TEXT NOT NULL,
                wins INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ArenaError::Persistence {
            reason: format!("migration failed: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(())
    }
}

#[async_trait]
impl LeaderboardStore for SqlLeaderboard {
    async fn record_win(&self, winner: &Player) -> Result<(), ArenaError> {
        sqlx::query(
            r#"
            INSERT INTO leaderboard (player_id, username, wins)
            VALUES (?1, ?2, 1)
            ON CONFLICT(player_id)
            DO UPDATE SET wins = wins + 1, username = excluded.username
            "#,
        )
        .bind(winner.id.as_ref())
        .bind(&winner.username)
        .execute(&self.pool)
        .await
        .map_err(|e| ArenaError::Persistence {
            reason: format!("record win failed: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(())
    }

    async fn top_entries(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ArenaError> {
        let rows = sqlx::query(
            r#"
            SELECT player_id, username, wins
            FROM leaderboard
            ORDER BY wins DESC, rowid ASC
            LIMIT ?1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ArenaError::Persistence {
            reason: format!("leaderboard read failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(rows
            .into_iter()
            .map(|row| LeaderboardEntry {
                player_id: PlayerId::new(row.get::<String, _>("player_id")),
                username: row.get::<String, _>("username"),
                wins: row.get::<i64, _>("wins") as u64,
            })
            .collect())
    }
}
