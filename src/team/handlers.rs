use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::Team,
    summary::{TeamSummary, TeamSummaryService},
    types::{TeamQuery, TeamRequest},
};
use crate::score::ScoringError;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing teams
///
/// GET /teams?modality_id=
#[instrument(name = "list_teams", skip(state))]
pub async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<TeamQuery>,
) -> Json<Vec<Team>> {
    let teams = state.store.list_teams(query.modality_id.as_deref()).await;
    info!(team_count = teams.len(), "Teams listed");
    Json(teams)
}

/// HTTP handler for registering a team
///
/// POST /teams
#[instrument(name = "create_team", skip(state))]
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<TeamRequest>,
) -> Result<(StatusCode, Json<Team>), AppError> {
    let team = Team::new(
        request.name,
        request.institution,
        request.members,
        request.modality_id,
    );
    let team = state.store.create_team(team).await?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// GET /teams/:id
#[instrument(name = "get_team", skip(state))]
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Team>, AppError> {
    state
        .store
        .get_team(&team_id)
        .await
        .map(Json)
        .ok_or_else(|| ScoringError::UnknownTeam(team_id).into())
}

/// PUT /teams/:id
#[instrument(name = "update_team", skip(state))]
pub async fn update_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(request): Json<TeamRequest>,
) -> Result<Json<Team>, AppError> {
    let team = Team {
        id: team_id,
        name: request.name,
        institution: request.institution,
        members: request.members,
        modality_id: request.modality_id,
    };

    Ok(Json(state.store.update_team(team).await?))
}

/// DELETE /teams/:id
///
/// Recorded scores of the team are kept
#[instrument(name = "delete_team", skip(state))]
pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.remove_team(&team_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /teams/:id/summary
#[instrument(name = "team_summary", skip(state))]
pub async fn team_summary(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamSummary>, AppError> {
    let service = TeamSummaryService::new(Arc::clone(&state.store));
    Ok(Json(service.team_summary(&team_id).await?))
}
