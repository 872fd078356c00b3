use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::aggregation::AggregationMethod;
use crate::score::ScoringError;
use crate::shared::generate_id;

/// A competition category with its own rounds, score bounds and aggregation rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modality {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rounds: u32,
    pub min_score: f64,
    pub max_score: f64,
    pub aggregation_method: AggregationMethod,
}

impl Modality {
    /// Creates a new modality with a generated `mod-` prefixed ID
    pub fn new(
        name: String,
        description: String,
        rounds: u32,
        min_score: f64,
        max_score: f64,
        aggregation_method: AggregationMethod,
    ) -> Self {
        Self {
            id: generate_id("mod"),
            name,
            description,
            rounds,
            min_score,
            max_score,
            aggregation_method,
        }
    }

    /// Checks the round count and score bounds
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.name.trim().is_empty() {
            return Err(ScoringError::InvalidModality(
                "name cannot be empty".to_string(),
            ));
        }

        if self.rounds < 1 {
            return Err(ScoringError::InvalidModality(format!(
                "modality {} must have at least one round",
                self.id
            )));
        }

        if !self.min_score.is_finite() || !self.max_score.is_finite() {
            return Err(ScoringError::InvalidModality(format!(
                "modality {} has non-finite score bounds",
                self.id
            )));
        }

        if self.min_score >= self.max_score {
            return Err(ScoringError::InvalidModality(format!(
                "modality {} needs min_score < max_score (got {}..{})",
                self.id, self.min_score, self.max_score
            )));
        }

        Ok(())
    }

    /// All round numbers of this modality, starting at 1
    pub fn round_numbers(&self) -> RangeInclusive<u32> {
        1..=self.rounds
    }

    pub fn contains_round(&self, round: u32) -> bool {
        self.round_numbers().contains(&round)
    }

    /// Pulls a value into `[min_score, max_score]`
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min_score, self.max_score)
    }
}
