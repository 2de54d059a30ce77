//! Event routing: one inbound chat event handled to completion.
//!
//! The engine is the only component that renders user-facing text and the
//! only one that talks to the leaderboard and the notifier. Sessions are
//! mutated under their lock and the lock is released before anything is
//! awaited, so per-session serialization never blocks the notifier.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::config::ArenaConfig;
use crate::error::{ArenaError, ErrorKind};
use crate::event::InboundEvent;
use crate::leaderboard::LeaderboardStore;
use crate::notifier::Notifier;
use crate::registry::SessionRegistry;
use crate::round::{MoveToken, RoundOutcome};
use crate::session::{MoveDisposition, RoundSummary};
use crate::types::{ArenaKey, Player, PlayerId};

pub struct GameEngine {
    config: ArenaConfig,
    registry: Arc<SessionRegistry>,
    leaderboard: Arc<dyn LeaderboardStore>,
    notifier: Arc<dyn Notifier>,
}

impl GameEngine {
    pub fn new(
        config: ArenaConfig,
        leaderboard: Arc<dyn LeaderboardStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self {
            config,
            registry: Arc::new(SessionRegistry::new()),
            leaderboard,
            notifier,
        })
    }

    /// The session registry, shared so a [`crate::reaper::SessionReaper`]
    /// can expire idle sessions.
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Handle one inbound event to completion.
    ///
    /// Never returns an error: every failure is scoped to this event and
    /// reported back to the originating player or arena, or logged.
    pub async fn handle_event(&self, event: InboundEvent) {
        match event {
            InboundEvent::StartRequested { arena, players } => {
                self.handle_start(arena, players).await;
            }
            InboundEvent::MoveSubmitted { player_id, text } => {
                self.handle_move(player_id, &text).await;
            }
            InboundEvent::ResetRequested { arena } => {
                self.handle_reset(arena).await;
            }
            InboundEvent::LeaderboardRequested { arena } => {
                self.handle_leaderboard(arena).await;
            }
        }
    }

    async fn handle_start(&self, arena: ArenaKey, players: [Player; 2]) {
        let names = (players[0].username.clone(), players[1].username.clone());
        let ids = [players[0].id.clone(), players[1].id.clone()];

        if let Err(err) =
            self.registry
                .start_session(arena.clone(), players, self.config.match_target)
        {
            debug!(%arena, kind = ?err.kind(), "start request rejected");
            self.announce(&arena, &err.to_string()).await;
            return;
        }

        self.announce(
            &arena,
            &format!(
                "Game started between {} and {}! Moves should be sent in DMs.",
                names.0, names.1
            ),
        )
        .await;
        for id in &ids {
            self.whisper(
                id,
                "Game started! Send your move (`!rock`, `!paper`, or `!scissors`) here in DMs.",
            )
            .await;
        }
        self.announce(&arena, &score_line(&names.0, &names.1, 0, 0))
            .await;
        self.announce(&arena, "Round 1").await;
    }

    async fn handle_move(&self, player_id: PlayerId, text: &str) {
        let token: MoveToken = match text.parse() {
            Ok(token) => token,
            Err(_) => {
                self.whisper(
                    &player_id,
                    "Invalid move. Use `!rock`, `!paper`, or `!scissors` to play.",
                )
                .await;
                return;
            }
        };

        let session = match self.registry.find_by_player(&player_id) {
            Ok(session) => session,
            Err(_) => {
                self.whisper(
                    &player_id,
                    "You're not currently in a game. Start a new game in a server channel.",
                )
                .await;
                return;
            }
        };

        // Mutate under the session lock, release it, then notify.
        let resolved = {
            let mut session = session.lock();
            match session.submit_move(&player_id, token) {
                Ok(MoveDisposition::Waiting) => None,
                Ok(MoveDisposition::Resolved(summary)) => Some((
                    session.arena().clone(),
                    session.players().clone(),
                    session.scores(),
                    summary,
                )),
                Err(err) => {
                    drop(session);
                    self.report_move_error(&player_id, err).await;
                    return;
                }
            }
        };

        let Some((arena, players, scores, summary)) = resolved else {
            return;
        };

        // Unregister before any await so the arena and both players are
        // released the instant the match completes.
        if summary.match_winner.is_some() {
            self.registry.remove_session(&arena);
        }

        self.announce_round(&arena, &players, scores, &summary).await;
    }

    async fn announce_round(
        &self,
        arena: &ArenaKey,
        players: &[Player; 2],
        scores: [u32; 2],
        summary: &RoundSummary,
    ) {
        let result_text = match (&summary.outcome, &summary.round_winner) {
            (RoundOutcome::Tie, _) => "It's a tie!".to_string(),
            (_, Some(winner)) => format!("{} wins this round!", winner.username),
            // A non-tie outcome always carries a winner.
            (_, None) => return,
        };
        self.announce(arena, &result_text).await;
        self.announce(
            arena,
            &score_line(
                &players[0].username,
                &players[1].username,
                scores[0],
                scores[1],
            ),
        )
        .await;

        match &summary.match_winner {
            Some(winner) => self.commit_and_congratulate(arena, winner).await,
            None => {
                self.announce(arena, &format!("Round {}", summary.next_round))
                    .await;
            }
        }
    }

    /// Commit the winner's leaderboard entry, then announce the victory.
    ///
    /// The congratulation is only sent once the write succeeded; a lost win
    /// is a data-integrity defect, so a failed write gets one retry and
    /// then a distinct announcement instead of the normal victory text.
    async fn commit_and_congratulate(&self, arena: &ArenaKey, winner: &Player) {
        let committed = match self.leaderboard.record_win(winner).await {
            Ok(()) => Ok(()),
            Err(first_err) => {
                warn!(%arena, winner = %winner.id, error = %first_err, "leaderboard write failed, retrying");
                self.leaderboard.record_win(winner).await
            }
        };

        match committed {
            Ok(()) => {
                self.announce(
                    arena,
                    &format!("Congratulations {}, you won the game!", winner.username),
                )
                .await;
            }
            Err(err) => {
                error!(%arena, winner = %winner.id, error = %err, "leaderboard write lost");
                self.announce(
                    arena,
                    &format!(
                        "{} won the game, but the win could not be saved to the leaderboard.",
                        winner.username
                    ),
                )
                .await;
            }
        }
    }

    async fn handle_reset(&self, arena: ArenaKey) {
        if self.registry.remove_session(&arena) {
            self.announce(&arena, "Game has been reset!").await;
        } else {
            self.announce(&arena, "No game to reset in this channel.")
                .await;
        }
    }

    async fn handle_leaderboard(&self, arena: ArenaKey) {
        let entries = match self.leaderboard.top_entries(self.config.leaderboard_size).await {
            Ok(entries) => entries,
            Err(err) => {
                error!(%arena, error = %err, "leaderboard read failed");
                self.announce(&arena, "The leaderboard is unavailable right now.")
                    .await;
                return;
            }
        };

        if entries.is_empty() {
            self.announce(&arena, "The leaderboard is empty.").await;
            return;
        }

        let mut text = String::from("🏆 **Leaderboard** 🏆");
        for (index, entry) in entries.iter().enumerate() {
            text.push_str(&format!(
                "\n{}. {} - {} wins",
                index + 1,
                entry.username,
                entry.wins
            ));
        }
        self.announce(&arena, &text).await;
    }

    async fn report_move_error(&self, player_id: &PlayerId, err: ArenaError) {
        match err.kind() {
            ErrorKind::Validation | ErrorKind::Conflict | ErrorKind::NotFound => {
                self.whisper(player_id, &err.to_string()).await;
            }
            ErrorKind::Persistence => {
                error!(player = %player_id, error = %err, "move handling failed");
            }
        }
    }

    async fn announce(&self, arena: &ArenaKey, text: &str) {
        if let Err(err) = self.notifier.announce(arena, text).await {
            warn!(%arena, error = %err, "arena announcement not delivered");
        }
    }

    async fn whisper(&self, player_id: &PlayerId, text: &str) {
        if let Err(err) = self.notifier.whisper(player_id, text).await {
            warn!(player = %player_id, error = %err, "private message not delivered");
        }
    }
}

fn score_line(first: &str, second: &str, first_score: u32, second_score: u32) -> String {
    format!("Score: {first} {first_score} - {second_score} {second}")
}
