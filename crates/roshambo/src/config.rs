use std::time::Duration;

use crate::error::ArenaError;

/// Configuration for the game engine.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    /// Score a player must reach to win the match. Default: 3.
    pub match_target: u32,
    /// Number of entries shown by a leaderboard request. Default: 10.
    pub leaderboard_size: usize,
    /// Max idle time before a session is reaped. `None` disables idle
    /// expiry; sessions then persist until an explicit reset. Default: None.
    pub session_max_idle: Option<Duration>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            match_target: 3,
            leaderboard_size: 10,
            session_max_idle: None,
        }
    }
}

impl ArenaConfig {
    /// Validate configuration values. Returns an error if any value is invalid.
    ///
    /// Checks:
    /// - `match_target >= 1` (a zero target would end a match before it starts)
    /// - `leaderboard_size >= 1`
    /// - `session_max_idle`, when set, is non-zero
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.match_target < 1 {
            return Err(ArenaError::InvalidConfig {
                reason: format!("match_target must be >= 1, got {}", self.match_target),
            });
        }
        if self.leaderboard_size < 1 {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "leaderboard_size must be >= 1, got {}",
                    self.leaderboard_size
                ),
            });
        }
        if self.session_max_idle == Some(Duration::ZERO) {
            return Err(ArenaError::InvalidConfig {
                reason: "session_max_idle must be non-zero when set".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ArenaConfig::default();
        assert_eq!(config.match_target, 3);
        assert_eq!(config.leaderboard_size, 10);
        assert!(config.session_max_idle.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn zero_match_target_rejected() {
        let config = ArenaConfig {
            match_target: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_idle_time_rejected() {
        let config = ArenaConfig {
            session_max_idle: Some(Duration::ZERO),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
