use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::score::{ScoreStore, ScoringError};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ScoreStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }
}

/// Generates an ID like `team-1a2b3c4d`
pub fn generate_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &uuid[..8])
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Scoring(err) => match err {
                ScoringError::UnknownModality(_) | ScoringError::UnknownTeam(_) => {
                    StatusCode::NOT_FOUND
                }
                ScoringError::InvalidRound { .. }
                | ScoringError::InvalidValue(_)
                | ScoringError::InvalidModality(_)
                | ScoringError::InvalidTeam(_)
                | ScoringError::ModalityMismatch { .. } => StatusCode::BAD_REQUEST,
                ScoringError::TeamHasScores(_) | ScoringError::DuplicateId(_) => {
                    StatusCode::CONFLICT
                }
            },
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
