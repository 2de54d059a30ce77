//! The per-match state machine.
//!
//! A session collects one private move per player, resolves a round the
//! moment the second move arrives, and closes itself when either score
//! reaches the match target. Score mutation, round advance and the
//! match-end decision all happen inside one `submit_move` call, so no
//! caller can observe a score at the target while the session still
//! accepts moves.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::ArenaError;
use crate::round::{self, MoveToken, RoundOutcome};
use crate::types::{ArenaKey, Player, PlayerId};

/// What a move submission did to the session.
#[derive(Debug, Clone)]
pub enum MoveDisposition {
    /// First move of the round banked; waiting for the opponent.
    Waiting,
    /// Second move arrived and the round was resolved.
    Resolved(RoundSummary),
}

/// Result of one resolved round.
#[derive(Debug, Clone)]
pub struct RoundSummary {
    pub outcome: RoundOutcome,
    /// Round winner, `None` on a tie.
    pub round_winner: Option<Player>,
    /// Round number after the resolution.
    pub next_round: u32,
    /// Set when this resolution ended the match. The session is closed
    /// and must be removed from the registry.
    pub match_winner: Option<Player>,
}

/// Live state of one in-progress match between two players.
#[derive(Debug)]
pub struct GameSession {
    arena: ArenaKey,
    /// Order-significant for display only, not for game logic.
    players: [Player; 2],
    scores: [u32; 2],
    round: u32,
    pending: HashMap<PlayerId, MoveToken>,
    match_target: u32,
    last_activity: Instant,
    closed: bool,
}

impl GameSession {
    pub fn new(arena: ArenaKey, players: [Player; 2], match_target: u32) -> Self {
        Self {
            arena,
            players,
            scores: [0, 0],
            round: 1,
            pending: HashMap::with_capacity(2),
            match_target,
            last_activity: Instant::now(),
            closed: false,
        }
    }

    pub fn arena(&self) -> &ArenaKey {
        &self.arena
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Whether the match has completed. A closed session rejects all
    /// further moves and only awaits removal from the registry.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether the session has seen no activity for at least `max_idle`.
    pub fn is_idle(&self, max_idle: Duration) -> bool {
        self.last_activity.elapsed() >= max_idle
    }

    pub fn is_participant(&self, player_id: &PlayerId) -> bool {
        self.player_index(player_id).is_some()
    }

    fn player_index(&self, player_id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == player_id)
    }

    /// Submit one player's move for the current round.
    ///
    /// A duplicate submission for the same round is rejected rather than
    /// overwritten, so a player cannot revise a banked move after probing
    /// the opponent. When the second distinct player's move arrives the
    /// round is resolved synchronously: score updated, pending moves
    /// cleared, round counter advanced and match end evaluated.
    pub fn submit_move(
        &mut self,
        player_id: &PlayerId,
        token: MoveToken,
    ) -> Result<MoveDisposition, ArenaError> {
        if self.closed {
            return Err(ArenaError::SessionClosed);
        }
        if !self.is_participant(player_id) {
            return Err(ArenaError::UnknownPlayer {
                player_id: player_id.clone(),
            });
        }
        if self.pending.contains_key(player_id) {
            return Err(ArenaError::DuplicateMove {
                player_id: player_id.clone(),
            });
        }

        self.last_activity = Instant::now();
        self.pending.insert(player_id.clone(), token);
        debug_assert!(self.pending.len() <= 2);

        if self.pending.len() < 2 {
            return Ok(MoveDisposition::Waiting);
        }

        Ok(MoveDisposition::Resolved(self.resolve_round()))
    }

    fn resolve_round(&mut self) -> RoundSummary {
        let first = self.pending[&self.players[0].id];
        let second = self.pending[&self.players[1].id];
        let outcome = round::resolve(first, second);

        let round_winner = match outcome {
            RoundOutcome::Tie => None,
            RoundOutcome::FirstWins => Some(0),
            RoundOutcome::SecondWins => Some(1),
        };
        if let Some(index) = round_winner {
            self.scores[index] += 1;
        }

        self.pending.clear();
        self.round += 1;

        let match_winner = round_winner.filter(|&index| self.scores[index] >= self.match_target);
        if match_winner.is_some() {
            self.closed = true;
        }

        RoundSummary {
            outcome,
            round_winner: round_winner.map(|i| self.players[i].clone()),
            next_round: self.round,
            match_winner: match_winner.map(|i| self.players[i].clone()),
        }
    }
}
