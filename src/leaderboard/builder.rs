use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::models::{RoundScore, TeamScore};
use crate::aggregation::final_score;
use crate::modality::models::Modality;
use crate::score::{ModalitySnapshot, Score, ScoreStore};
use crate::team::models::Team;

/// Builds ranked leaderboards from the score store. Never writes.
pub struct LeaderboardBuilder {
    store: Arc<dyn ScoreStore>,
}

impl LeaderboardBuilder {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    /// Ranks every team of a modality by final score.
    /// An unknown modality yields an empty leaderboard.
    #[instrument(skip(self))]
    pub async fn build_leaderboard(&self, modality_id: &str) -> Vec<TeamScore> {
        // The store lock is released here; ranking runs on the copy
        let Some(snapshot) = self.store.modality_snapshot(modality_id).await else {
            debug!("Modality not found, returning empty leaderboard");
            return Vec::new();
        };

        let leaderboard = rank_snapshot(&snapshot);
        debug!(teams = leaderboard.len(), "Leaderboard built");
        leaderboard
    }
}

/// Ranks the teams of a snapshot: highest final score first, absent last,
/// ties kept in registration order.
pub fn rank_snapshot(snapshot: &ModalitySnapshot) -> Vec<TeamScore> {
    let mut entries: Vec<TeamScore> = snapshot
        .teams
        .iter()
        .map(|team| {
            let scores: Vec<&Score> = snapshot.scores_for_team(&team.id).collect();
            build_team_score(&snapshot.modality, team, &scores)
        })
        .collect();

    // sort_by is stable, which keeps equal scores in team order
    entries.sort_by(|a, b| compare_final_scores(a.final_score, b.final_score));
    entries
}

/// Lays out one team's rounds and computes its final score
pub fn build_team_score(modality: &Modality, team: &Team, scores: &[&Score]) -> TeamScore {
    let rounds: Vec<RoundScore> = modality
        .round_numbers()
        .map(|round| RoundScore {
            round,
            value: scores.iter().find(|s| s.round == round).map(|s| s.value),
        })
        .collect();

    let mut entry = TeamScore {
        team: team.clone(),
        rounds,
        final_score: None,
    };
    entry.final_score = final_score(&entry.recorded_values(), modality.aggregation_method);
    entry
}

/// Descending by score; an absent score is never ahead of a present one
fn compare_final_scores(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
