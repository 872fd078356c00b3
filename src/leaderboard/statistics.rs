use serde::{Deserialize, Serialize};

use super::models::TeamScore;

/// Final score of one team, for the per-team totals chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamTotal {
    pub team_id: String,
    pub team_name: String,
    pub final_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundPoint {
    pub team_id: String,
    pub value: Option<f64>,
}

/// Every team's value for one round, in leaderboard order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSeries {
    pub round: u32,
    pub points: Vec<RoundPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalityStatistics {
    pub modality_id: String,
    pub totals: Vec<TeamTotal>,
    pub rounds: Vec<RoundSeries>,
}

/// Reshapes a built leaderboard into chart series. No aggregation happens
/// here; final scores are taken as the leaderboard computed them.
pub fn statistics_from_leaderboard(modality_id: &str, entries: &[TeamScore]) -> ModalityStatistics {
    let totals = entries
        .iter()
        .map(|entry| TeamTotal {
            team_id: entry.team.id.clone(),
            team_name: entry.team.name.clone(),
            final_score: entry.final_score,
        })
        .collect();

    let round_numbers: Vec<u32> = entries
        .first()
        .map(|entry| entry.rounds.iter().map(|r| r.round).collect())
        .unwrap_or_default();

    let rounds = round_numbers
        .into_iter()
        .map(|round| RoundSeries {
            round,
            points: entries
                .iter()
                .map(|entry| RoundPoint {
                    team_id: entry.team.id.clone(),
                    value: entry
                        .rounds
                        .iter()
                        .find(|r| r.round == round)
                        .and_then(|r| r.value),
                })
                .collect(),
        })
        .collect();

    ModalityStatistics {
        modality_id: modality_id.to_string(),
        totals,
        rounds,
    }
}
