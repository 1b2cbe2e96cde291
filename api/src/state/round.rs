use serde::{Deserialize, Serialize};

use super::Color;

/// One settled round as reported in the status history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastResult {
    /// The round number.
    pub round_id: u64,

    /// The color the round settled on.
    pub color: Color,
}

/// Decoded success body of the status endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    /// The round currently open for wagers.
    pub current_round_id: u64,

    /// Seconds until the open round is due for settlement.
    pub time_remaining: i64,

    /// Settled rounds, most recent first.
    pub past_results: Vec<PastResult>,
}

/// The client's read-only snapshot of the open round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Round {
    /// The round number.
    pub id: u64,

    /// Seconds remaining when the snapshot was taken, never negative.
    pub time_remaining: i64,

    /// Set once a settlement call reports the outcome.
    pub winning_color: Option<Color>,
}

impl Round {
    pub fn from_status(status: &GameStatus) -> Self {
        Self {
            id: status.current_round_id,
            time_remaining: status.time_remaining.max(0),
            winning_color: None,
        }
    }

    /// Whether `status` describes a later round than this one.
    pub fn is_superseded_by(&self, status: &GameStatus) -> bool {
        status.current_round_id > self.id
    }
}
