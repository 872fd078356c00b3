use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    builder::LeaderboardBuilder,
    statistics::{statistics_from_leaderboard, ModalityStatistics},
    types::LeaderboardResponse,
};
use crate::shared::AppState;

/// HTTP handler for the ranked leaderboard of a modality
///
/// GET /modalities/:id/leaderboard
/// Clients poll this endpoint; an unknown modality returns an empty board
#[instrument(name = "get_leaderboard", skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(modality_id): Path<String>,
) -> Json<LeaderboardResponse> {
    let builder = LeaderboardBuilder::new(Arc::clone(&state.store));
    let entries = builder.build_leaderboard(&modality_id).await;

    info!(team_count = entries.len(), "Leaderboard served");
    Json(LeaderboardResponse::from_entries(&modality_id, &entries))
}

/// HTTP handler for modality statistics
///
/// GET /modalities/:id/statistics
#[instrument(name = "get_statistics", skip(state))]
pub async fn get_statistics(
    State(state): State<AppState>,
    Path(modality_id): Path<String>,
) -> Json<ModalityStatistics> {
    let builder = LeaderboardBuilder::new(Arc::clone(&state.store));
    let entries = builder.build_leaderboard(&modality_id).await;

    Json(statistics_from_leaderboard(&modality_id, &entries))
}
