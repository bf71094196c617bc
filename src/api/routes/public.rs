//! Read-only scoreboard endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::{require_tournament, ApiError};
use crate::calculate::{CardKind, LeaderboardEntry, MatchSummary, LEADERBOARD_LIMIT};
use crate::dashboard::{self, Board};
use crate::models::{GroupId, GroupStandings, MatchStatus, Tournament};

pub async fn tournament(State(state): State<AppState>) -> Result<Json<Tournament>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(require_tournament(&store)?))
}

pub async fn standings(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupStandings>>, ApiError> {
    let store = state.store.read().await;
    let tournament = require_tournament(&store)?;
    Ok(Json(dashboard::standings(&store, &tournament)?))
}

pub async fn group_standings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GroupStandings>, ApiError> {
    let store = state.store.read().await;
    let tournament = require_tournament(&store)?;
    let group_id = GroupId::new(id);

    dashboard::standings(&store, &tournament)?
        .into_iter()
        .find(|table| table.group.id == group_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("group {}", group_id)))
}

pub async fn fixtures(State(state): State<AppState>) -> Result<Json<Vec<MatchSummary>>, ApiError> {
    matches_with_status(&state, MatchStatus::Scheduled).await
}

pub async fn results(State(state): State<AppState>) -> Result<Json<Vec<MatchSummary>>, ApiError> {
    matches_with_status(&state, MatchStatus::Finished).await
}

async fn matches_with_status(
    state: &AppState,
    status: MatchStatus,
) -> Result<Json<Vec<MatchSummary>>, ApiError> {
    let store = state.store.read().await;
    let tournament = require_tournament(&store)?;
    Ok(Json(dashboard::fixtures(&store, &tournament, status)?))
}

pub async fn scorers(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let store = state.store.read().await;
    let tournament = require_tournament(&store)?;
    let entries = dashboard::leaderboard(&store, &tournament, Board::Scorers, LEADERBOARD_LIMIT)?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
pub struct CardsParams {
    #[serde(rename = "type", default)]
    pub kind: CardKind,
}

pub async fn cards(
    State(state): State<AppState>,
    Query(params): Query<CardsParams>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let store = state.store.read().await;
    let tournament = require_tournament(&store)?;
    let entries = dashboard::leaderboard(
        &store,
        &tournament,
        Board::Cards(params.kind),
        LEADERBOARD_LIMIT,
    )?;
    Ok(Json(entries))
}
