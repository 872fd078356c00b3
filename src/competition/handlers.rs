use axum::{extract::State, Json};
use tracing::instrument;

use super::models::Competition;
use crate::shared::{AppError, AppState};

/// GET /competitions
#[instrument(name = "list_competitions", skip(state))]
pub async fn list_competitions(State(state): State<AppState>) -> Json<Vec<Competition>> {
    Json(state.store.list_competitions().await)
}

/// GET /competitions/active
#[instrument(name = "active_competition", skip(state))]
pub async fn active_competition(
    State(state): State<AppState>,
) -> Result<Json<Competition>, AppError> {
    state
        .store
        .active_competition()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No active competition".to_string()))
}
