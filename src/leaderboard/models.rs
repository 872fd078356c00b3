use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::team::models::Team;

/// Placeholder shown wherever a final score has not been computed yet
pub const ABSENT_SCORE_LABEL: &str = "N/A";

/// One round slot of a team; `value` is `None` until the round is scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundScore {
    pub round: u32,
    pub value: Option<f64>,
}

impl RoundScore {
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }
}

/// A team's row on the leaderboard, rebuilt on every query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamScore {
    pub team: Team,
    /// Exactly one entry per round of the modality, absent slots included
    pub rounds: Vec<RoundScore>,
    pub final_score: Option<f64>,
}

impl TeamScore {
    /// Values of the rounds that were actually scored
    pub fn recorded_values(&self) -> Vec<f64> {
        self.rounds.iter().filter_map(|r| r.value).collect()
    }

    pub fn final_score_display(&self) -> String {
        format_final_score(self.final_score)
    }
}

/// Renders a final score with two decimals, or "N/A" when absent
pub fn format_final_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{:.2}", value),
        None => ABSENT_SCORE_LABEL.to_string(),
    }
}

/// A ranked leaderboard delivered by the refresh scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    pub modality_id: String,
    /// Starts at 1 and increases with every build of the subscription, across modality switches
    pub sequence: u64,
    pub built_at: DateTime<Utc>,
    pub entries: Vec<TeamScore>,
}

impl LeaderboardSnapshot {
    /// Team ids in rank order
    pub fn ranking(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.team.id.as_str()).collect()
    }
}
