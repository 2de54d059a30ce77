//! Move tokens and the pure round-outcome function.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ArenaError;

/// The closed set of moves a player can submit.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveToken {
    Rock,
    Paper,
    Scissors,
}

impl MoveToken {
    /// Whether this token beats `other` under the closed-loop relation:
    /// rock > scissors > paper > rock.
    pub fn beats(self, other: MoveToken) -> bool {
        matches!(
            (self, other),
            (MoveToken::Rock, MoveToken::Scissors)
                | (MoveToken::Scissors, MoveToken::Paper)
                | (MoveToken::Paper, MoveToken::Rock)
        )
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveToken::Rock => "rock",
            MoveToken::Paper => "paper",
            MoveToken::Scissors => "scissors",
        };
        write!(f, "{name}")
    }
}

impl FromStr for MoveToken {
    type Err = ArenaError;

    /// Parse raw chat text into a token. This is the validation boundary:
    /// anything that fails here never reaches a session.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(MoveToken::Rock),
            "paper" => Ok(MoveToken::Paper),
            "scissors" => Ok(MoveToken::Scissors),
            _ => Err(ArenaError::InvalidMove {
                input: s.to_string(),
            }),
        }
    }
}

/// Outcome of one round, from the perspective of submission order in the
/// session's player pair.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Tie,
    FirstWins,
    SecondWins,
}

/// Compute the round outcome for a pair of tokens. Pure: no state, no
/// side effects.
pub fn resolve(first: MoveToken, second: MoveToken) -> RoundOutcome {
    if first == second {
        RoundOutcome::Tie
    } else if first.beats(second) {
        RoundOutcome::FirstWins
    } else {
        RoundOutcome::SecondWins
    }
}
