use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modality::models::Modality;
use crate::shared::generate_id;
use crate::team::models::Team;

/// One recorded round value for a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub id: String,
    pub team_id: String,
    pub modality_id: String,
    pub round: u32,
    pub value: f64,
    pub recorded_at: DateTime<Utc>, // Assigned by the store on write
}

impl Score {
    pub fn new(team_id: String, modality_id: String, round: u32, value: f64) -> Self {
        Self {
            id: generate_id("score"),
            team_id,
            modality_id,
            round,
            value,
            recorded_at: Utc::now(),
        }
    }

    pub fn key(&self) -> ScoreKey {
        ScoreKey::new(&self.team_id, &self.modality_id, self.round)
    }
}

/// The (team, modality, round) triple a score is unique on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreKey {
    pub team_id: String,
    pub modality_id: String,
    pub round: u32,
}

impl ScoreKey {
    pub fn new(team_id: &str, modality_id: &str, round: u32) -> Self {
        Self {
            team_id: team_id.to_string(),
            modality_id: modality_id.to_string(),
            round,
        }
    }
}

/// Everything a leaderboard build needs, copied out of the store in one read
#[derive(Debug, Clone)]
pub struct ModalitySnapshot {
    pub modality: Modality,
    /// Teams entered in the modality, in registration order
    pub teams: Vec<Team>,
    pub scores: Vec<Score>,
}

impl ModalitySnapshot {
    /// Scores of one team in this modality
    pub fn scores_for_team<'a>(&'a self, team_id: &'a str) -> impl Iterator<Item = &'a Score> {
        self.scores.iter().filter(move |s| s.team_id == team_id)
    }
}
