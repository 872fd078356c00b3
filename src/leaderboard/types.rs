use serde::{Deserialize, Serialize};

use super::models::TeamScore;

/// Response for the leaderboard endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub modality_id: String,
    pub entries: Vec<LeaderboardRow>,
}

/// One ranked row as rendered by the leaderboard display
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: usize, // 1-based position, not stored anywhere
    pub team_id: String,
    pub team_name: String,
    pub institution: String,
    pub rounds: Vec<Option<f64>>,
    pub final_score: Option<f64>,
    pub final_score_display: String,
}

impl LeaderboardResponse {
    pub fn from_entries(modality_id: &str, entries: &[TeamScore]) -> Self {
        Self {
            modality_id: modality_id.to_string(),
            entries: entries
                .iter()
                .enumerate()
                .map(|(index, entry)| LeaderboardRow {
                    rank: index + 1,
                    team_id: entry.team.id.clone(),
                    team_name: entry.team.name.clone(),
                    institution: entry.team.institution.clone(),
                    rounds: entry.rounds.iter().map(|r| r.value).collect(),
                    final_score: entry.final_score,
                    final_score_display: entry.final_score_display(),
                })
                .collect(),
        }
    }
}
