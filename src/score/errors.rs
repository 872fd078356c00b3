use thiserror::Error;

/// Validation failures raised by the score store and the entry workflow.
///
/// None of these are fatal; they are meant to be surfaced to whoever issued
/// the write so the input can be corrected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Round {round} is outside 1..={rounds} for modality {modality_id}")]
    InvalidRound {
        modality_id: String,
        round: u32,
        rounds: u32,
    },

    #[error("Unknown modality: {0}")]
    UnknownModality(String),

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Team {team_id} is entered in modality {entered}, not {requested}")]
    ModalityMismatch {
        team_id: String,
        entered: String,
        requested: String,
    },

    #[error("Score value must be a finite number, got {0}")]
    InvalidValue(f64),

    #[error("Invalid modality configuration: {0}")]
    InvalidModality(String),

    #[error("Invalid team: {0}")]
    InvalidTeam(String),

    #[error("Team {0} already has recorded scores and cannot change modality")]
    TeamHasScores(String),

    #[error("Id already exists: {0}")]
    DuplicateId(String),
}
