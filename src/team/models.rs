use serde::{Deserialize, Serialize};

use crate::score::ScoringError;
use crate::shared::generate_id;

/// A team entered in exactly one modality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub institution: String,
    pub members: Vec<String>,
    pub modality_id: String,
}

impl Team {
    /// Creates a new team with a generated `team-` prefixed ID
    pub fn new(
        name: String,
        institution: String,
        members: Vec<String>,
        modality_id: String,
    ) -> Self {
        Self {
            id: generate_id("team"),
            name,
            institution,
            members,
            modality_id,
        }
    }

    /// Rejects blank names
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.name.trim().is_empty() {
            return Err(ScoringError::InvalidTeam("name cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn is_entered_in(&self, modality_id: &str) -> bool {
        self.modality_id == modality_id
    }
}
