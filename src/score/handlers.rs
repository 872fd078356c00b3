use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::Score,
    service::ScoringService,
    types::{RecordScoreRequest, ScoreQuery},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for recording a score
///
/// POST /scores
/// Clamps the value into the modality's bounds, then upserts it
#[instrument(name = "record_score", skip(state))]
pub async fn record_score(
    State(state): State<AppState>,
    Json(request): Json<RecordScoreRequest>,
) -> Result<Json<Score>, AppError> {
    let service = ScoringService::new(Arc::clone(&state.store));
    let score = service
        .record_score(
            &request.team_id,
            &request.modality_id,
            request.round,
            request.value,
        )
        .await?;

    Ok(Json(score))
}

/// HTTP handler for listing scores
///
/// GET /scores?team_id=&modality_id=
#[instrument(name = "list_scores", skip(state))]
pub async fn list_scores(
    State(state): State<AppState>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<Vec<Score>>, AppError> {
    let service = ScoringService::new(Arc::clone(&state.store));
    let scores = service
        .list_scores(query.team_id.as_deref(), query.modality_id.as_deref())
        .await;

    info!(score_count = scores.len(), "Scores listed");
    Ok(Json(scores))
}
