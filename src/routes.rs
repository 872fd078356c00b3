use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::competition::{active_competition, list_competitions};
use crate::leaderboard::{get_leaderboard, get_statistics};
use crate::modality::{
    create_modality, delete_modality, get_modality, list_modalities, update_modality,
};
use crate::score::{list_scores, record_score};
use crate::shared::AppState;
use crate::team::{create_team, delete_team, get_team, list_teams, team_summary, update_team};

/// Builds the HTTP router for the scoreboard API
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/competitions", get(list_competitions))
        .route("/competitions/active", get(active_competition))
        .route("/modalities", get(list_modalities).post(create_modality))
        .route(
            "/modalities/:id",
            get(get_modality).put(update_modality).delete(delete_modality),
        )
        .route("/modalities/:id/leaderboard", get(get_leaderboard))
        .route("/modalities/:id/statistics", get(get_statistics))
        .route("/teams", get(list_teams).post(create_team))
        .route(
            "/teams/:id",
            get(get_team).put(update_team).delete(delete_team),
        )
        .route("/teams/:id/summary", get(team_summary))
        .route("/scores", post(record_score).get(list_scores))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
