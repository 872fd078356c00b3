use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};

use super::{models::Modality, types::ModalityRequest};
use crate::score::ScoringError;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing modalities
///
/// GET /modalities
#[instrument(name = "list_modalities", skip(state))]
pub async fn list_modalities(State(state): State<AppState>) -> Json<Vec<Modality>> {
    let modalities = state.store.list_modalities().await;
    info!(modality_count = modalities.len(), "Modalities listed");
    Json(modalities)
}

/// HTTP handler for creating a modality
///
/// POST /modalities
#[instrument(name = "create_modality", skip(state))]
pub async fn create_modality(
    State(state): State<AppState>,
    Json(request): Json<ModalityRequest>,
) -> Result<(StatusCode, Json<Modality>), AppError> {
    let modality = Modality::new(
        request.name,
        request.description,
        request.rounds,
        request.min_score,
        request.max_score,
        request.aggregation_method,
    );
    let modality = state.store.create_modality(modality).await?;

    Ok((StatusCode::CREATED, Json(modality)))
}

/// GET /modalities/:id
#[instrument(name = "get_modality", skip(state))]
pub async fn get_modality(
    State(state): State<AppState>,
    Path(modality_id): Path<String>,
) -> Result<Json<Modality>, AppError> {
    state
        .store
        .get_modality(&modality_id)
        .await
        .map(Json)
        .ok_or_else(|| ScoringError::UnknownModality(modality_id).into())
}

/// PUT /modalities/:id
#[instrument(name = "update_modality", skip(state))]
pub async fn update_modality(
    State(state): State<AppState>,
    Path(modality_id): Path<String>,
    Json(request): Json<ModalityRequest>,
) -> Result<Json<Modality>, AppError> {
    let modality = Modality {
        id: modality_id,
        name: request.name,
        description: request.description,
        rounds: request.rounds,
        min_score: request.min_score,
        max_score: request.max_score,
        aggregation_method: request.aggregation_method,
    };

    Ok(Json(state.store.update_modality(modality).await?))
}

/// DELETE /modalities/:id
///
/// Teams and scores of the modality are not removed
#[instrument(name = "delete_modality", skip(state))]
pub async fn delete_modality(
    State(state): State<AppState>,
    Path(modality_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.remove_modality(&modality_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
