//! REST API endpoints.
//!
//! Axum-based HTTP API: read-only scoreboard views under `/api` and JSON
//! CRUD for administrators under `/api/admin`.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::models::Tournament;
use crate::storage::{StorageError, TournamentStore};
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            error!("{}", self);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// The configured tournament, or 404 when none exists yet.
pub fn require_tournament(store: &TournamentStore) -> Result<Tournament, ApiError> {
    store
        .tournament()?
        .ok_or_else(|| ApiError::NotFound("no tournament configured".to_string()))
}

/// CORS policy for the configured origin; `*` allows any origin.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, allowing any origin", origin);
            layer.allow_origin(Any)
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    use routes::{admin, public};

    let admin_routes = Router::new()
        .route("/tournament", put(admin::save_tournament))
        .route("/teams", get(admin::list_teams).post(admin::create_team))
        .route(
            "/teams/:id",
            put(admin::update_team).delete(admin::delete_team),
        )
        .route("/groups", get(admin::list_groups).post(admin::create_group))
        .route(
            "/groups/:id",
            put(admin::update_group).delete(admin::delete_group),
        )
        .route(
            "/groups/:id/teams",
            get(admin::group_teams).put(admin::set_group_teams),
        )
        .route("/matches", get(admin::list_matches).post(admin::create_match))
        .route(
            "/matches/:id",
            put(admin::update_match).delete(admin::delete_match),
        )
        .route("/players", get(admin::list_players).post(admin::create_player))
        .route(
            "/players/:id",
            put(admin::update_player).delete(admin::delete_player),
        )
        .route("/players/:id/stats", put(admin::set_player_stats));

    let api_routes = Router::new()
        .route("/tournament", get(public::tournament))
        .route("/standings", get(public::standings))
        .route("/groups/:id/standings", get(public::group_standings))
        .route("/fixtures", get(public::fixtures))
        .route("/results", get(public::results))
        .route("/scorers", get(public::scorers))
        .route("/cards", get(public::cards))
        .nest("/admin", admin_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .with_state(state)
}
