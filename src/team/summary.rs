use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::models::Team;
use crate::aggregation::final_score;
use crate::leaderboard::models::format_final_score;
use crate::score::{Score, ScoreStore, ScoringError};

/// Single-team view: where it competes, its final score and its score history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team: Team,
    /// `None` when the team's modality has since been removed
    pub modality_name: Option<String>,
    pub final_score: Option<f64>,
    pub final_score_display: String,
    /// Every score recorded for the team, ordered by round
    pub scores: Vec<Score>,
}

pub struct TeamSummaryService {
    store: Arc<dyn ScoreStore>,
}

impl TeamSummaryService {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn team_summary(&self, team_id: &str) -> Result<TeamSummary, ScoringError> {
        let team = self
            .store
            .get_team(team_id)
            .await
            .ok_or_else(|| ScoringError::UnknownTeam(team_id.to_string()))?;

        let modality = self.store.get_modality(&team.modality_id).await;

        let mut scores = self.store.query(Some(team_id), None).await;
        scores.sort_by(|a, b| a.round.cmp(&b.round).then(a.recorded_at.cmp(&b.recorded_at)));

        // Same rule and same round window as the leaderboard
        let final_score = modality.as_ref().and_then(|modality| {
            let values: Vec<f64> = scores
                .iter()
                .filter(|s| s.modality_id == modality.id && modality.contains_round(s.round))
                .map(|s| s.value)
                .collect();
            final_score(&values, modality.aggregation_method)
        });

        debug!(score_count = scores.len(), ?final_score, "Team summary built");

        Ok(TeamSummary {
            modality_name: modality.map(|m| m.name),
            final_score_display: format_final_score(final_score),
            final_score,
            team,
            scores,
        })
    }
}
