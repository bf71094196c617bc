//! Administrative CRUD endpoints.
//!
//! Mutations hold the store's write lock for the whole request.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::{require_tournament, ApiError};
use crate::models::{
    Group, GroupId, Match, MatchFilter, MatchId, MatchStatus, MatchUpdate, NewGroup, NewMatch,
    NewPlayer, NewTeam, Player, PlayerId, PlayerStats, PlayerUpdate, StatsUpdate, Team, TeamId,
    TeamUpdate, Tournament, TournamentUpdate,
};

type Created<T> = (StatusCode, Json<T>);

fn require_name(name: &str, what: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{} name must not be empty", what)));
    }
    Ok(())
}

// --- tournament ---

pub async fn save_tournament(
    State(state): State<AppState>,
    Json(update): Json<TournamentUpdate>,
) -> Result<Json<Tournament>, ApiError> {
    if let Some(name) = &update.name {
        require_name(name, "tournament")?;
    }
    let store = state.store.write().await;
    Ok(Json(store.save_tournament(update)?))
}

// --- teams ---

pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<Team>>, ApiError> {
    let store = state.store.read().await;
    let tournament = require_tournament(&store)?;
    Ok(Json(store.teams(&tournament.id)?))
}

pub async fn create_team(
    State(state): State<AppState>,
    Json(new): Json<NewTeam>,
) -> Result<Created<Team>, ApiError> {
    require_name(&new.name, "team")?;
    let store = state.store.write().await;
    let tournament = require_tournament(&store)?;
    let team = store.create_team(&tournament.id, new)?;
    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
    Json(update): Json<TeamUpdate>,
) -> Result<Json<Team>, ApiError> {
    if let Some(name) = &update.name {
        require_name(name, "team")?;
    }
    let store = state.store.write().await;
    Ok(Json(store.update_team(&id, update)?))
}

pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> Result<StatusCode, ApiError> {
    let store = state.store.write().await;
    store.delete_team(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- groups ---

pub async fn list_groups(State(state): State<AppState>) -> Result<Json<Vec<Group>>, ApiError> {
    let store = state.store.read().await;
    let tournament = require_tournament(&store)?;
    Ok(Json(store.groups(&tournament.id)?))
}

pub async fn create_group(
    State(state): State<AppState>,
    Json(new): Json<NewGroup>,
) -> Result<Created<Group>, ApiError> {
    require_name(&new.name, "group")?;
    let store = state.store.write().await;
    let tournament = require_tournament(&store)?;
    let group = store.create_group(&tournament.id, new)?;
    Ok((StatusCode::CREATED, Json(group)))
}

pub async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<GroupId>,
    Json(new): Json<NewGroup>,
) -> Result<Json<Group>, ApiError> {
    require_name(&new.name, "group")?;
    let store = state.store.write().await;
    Ok(Json(store.update_group(&id, new)?))
}

pub async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<GroupId>,
) -> Result<StatusCode, ApiError> {
    let store = state.store.write().await;
    store.delete_group(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn group_teams(
    State(state): State<AppState>,
    Path(id): Path<GroupId>,
) -> Result<Json<Vec<Team>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.teams_by_group(&id)?))
}

#[derive(Debug, Deserialize)]
pub struct GroupTeamsBody {
    pub team_ids: Vec<TeamId>,
}

/// Replace a group's membership with the given teams.
pub async fn set_group_teams(
    State(state): State<AppState>,
    Path(id): Path<GroupId>,
    Json(body): Json<GroupTeamsBody>,
) -> Result<Json<Vec<Team>>, ApiError> {
    let store = state.store.write().await;
    let tournament = require_tournament(&store)?;
    if !store.groups(&tournament.id)?.iter().any(|g| g.id == id) {
        return Err(ApiError::NotFound(format!("group {}", id)));
    }
    store.set_group_teams(&id, &body.team_ids)?;
    Ok(Json(store.teams_by_group(&id)?))
}

// --- matches ---

#[derive(Debug, Deserialize)]
pub struct ListMatchesParams {
    pub group: Option<GroupId>,
    pub status: Option<String>,
}

pub async fn list_matches(
    State(state): State<AppState>,
    Query(params): Query<ListMatchesParams>,
) -> Result<Json<Vec<Match>>, ApiError> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<MatchStatus>)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let filter = MatchFilter {
        group_id: params.group,
        status,
    };

    let store = state.store.read().await;
    let tournament = require_tournament(&store)?;
    Ok(Json(store.matches(&tournament.id, &filter)?))
}

pub async fn create_match(
    State(state): State<AppState>,
    Json(new): Json<NewMatch>,
) -> Result<Created<Match>, ApiError> {
    if new.home_team_id == new.away_team_id {
        return Err(ApiError::BadRequest(
            "a team cannot play itself".to_string(),
        ));
    }
    let store = state.store.write().await;
    let tournament = require_tournament(&store)?;
    let created = store.create_match(&tournament.id, new)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_match(
    State(state): State<AppState>,
    Path(id): Path<MatchId>,
    Json(update): Json<MatchUpdate>,
) -> Result<Json<Match>, ApiError> {
    let store = state.store.write().await;
    Ok(Json(store.update_match(&id, update)?))
}

pub async fn delete_match(
    State(state): State<AppState>,
    Path(id): Path<MatchId>,
) -> Result<StatusCode, ApiError> {
    let store = state.store.write().await;
    store.delete_match(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- players ---

#[derive(Debug, Deserialize)]
pub struct ListPlayersParams {
    pub team: Option<TeamId>,
}

pub async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<ListPlayersParams>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let store = state.store.read().await;
    let tournament = require_tournament(&store)?;
    Ok(Json(store.players(&tournament.id, params.team.as_ref())?))
}

pub async fn create_player(
    State(state): State<AppState>,
    Json(new): Json<NewPlayer>,
) -> Result<Created<Player>, ApiError> {
    require_name(&new.name, "player")?;
    let store = state.store.write().await;
    let tournament = require_tournament(&store)?;
    let player = store.create_player(&tournament.id, new)?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
    Json(update): Json<PlayerUpdate>,
) -> Result<Json<Player>, ApiError> {
    if let Some(name) = &update.name {
        require_name(name, "player")?;
    }
    let store = state.store.write().await;
    Ok(Json(store.update_player(&id, update)?))
}

pub async fn delete_player(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
) -> Result<StatusCode, ApiError> {
    let store = state.store.write().await;
    store.delete_player(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Overwrite a player's goal and card totals. Omitted counts become zero.
pub async fn set_player_stats(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
    Json(update): Json<StatsUpdate>,
) -> Result<Json<PlayerStats>, ApiError> {
    let store = state.store.write().await;
    let tournament = require_tournament(&store)?;
    Ok(Json(store.upsert_player_stats(&id, &tournament.id, update)?))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    use crate::api::test_support::{get_json, send, test_app};

    async fn put(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, Method::PUT, uri, Some(body)).await
    }

    async fn post(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, Method::POST, uri, Some(body)).await
    }

    async fn delete(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::DELETE, uri, None).await
    }

    async fn create_team(app: &axum::Router, name: &str) -> String {
        let (status, json) = post(app.clone(), "/api/admin/teams", json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED);
        json["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_save_tournament_creates_then_updates() {
        let temp_dir = TempDir::new().unwrap();
        let (app, _) = test_app(&temp_dir);

        let (status, json) = put(app.clone(), "/api/admin/tournament", json!({ "year": 2025 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Copa Test");
        assert_eq!(json["points_win"], 3);
        let id = json["id"].clone();

        let (_, json) = put(
            app.clone(),
            "/api/admin/tournament",
            json!({ "name": "Apertura", "points_win": 2 }),
        )
        .await;
        assert_eq!(json["id"], id);
        assert_eq!(json["name"], "Apertura");
        assert_eq!(json["year"], 2025);

        let (status, _) = put(app, "/api/admin/tournament", json!({ "name": " " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_team_crud() {
        let temp_dir = TempDir::new().unwrap();
        let (app, _) = test_app(&temp_dir);

        let (status, _) = post(app.clone(), "/api/admin/teams", json!({ "name": "Rojos" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        put(app.clone(), "/api/admin/tournament", json!({})).await;
        let id = create_team(&app, "Rojos").await;
        create_team(&app, "Azules").await;

        let (_, json) = get_json(app.clone(), "/api/admin/teams").await;
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Azules", "Rojos"]);

        let uri = format!("/api/admin/teams/{}", id);
        let (status, json) = put(app.clone(), &uri, json!({ "color": "#ff0000" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["color"], "#ff0000");
        assert_eq!(json["name"], "Rojos");

        let (status, _) = delete(app.clone(), &uri).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, json) = delete(app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_blank_team_name_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let (app, _) = test_app(&temp_dir);
        put(app.clone(), "/api/admin/tournament", json!({})).await;

        let (status, json) = post(app, "/api/admin/teams", json!({ "name": "  " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_group_membership() {
        let temp_dir = TempDir::new().unwrap();
        let (app, _) = test_app(&temp_dir);
        put(app.clone(), "/api/admin/tournament", json!({})).await;

        let a = create_team(&app, "Rojos").await;
        let b = create_team(&app, "Azules").await;
        let (status, group) = post(app.clone(), "/api/admin/groups", json!({ "name": "A" })).await;
        assert_eq!(status, StatusCode::CREATED);
        let uri = format!("/api/admin/groups/{}/teams", group["id"].as_str().unwrap());

        let (status, json) = put(app.clone(), &uri, json!({ "team_ids": [a, b, a] })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 2);

        let (_, json) = get_json(app.clone(), &uri).await;
        assert_eq!(json[0]["name"], "Rojos");

        let (_, standings) = get_json(app.clone(), "/api/standings").await;
        assert_eq!(standings[0]["standings"].as_array().unwrap().len(), 2);

        let (status, _) = put(
            app,
            "/api/admin/groups/missing/teams",
            json!({ "team_ids": [] }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_match_lifecycle_updates_standings() {
        let temp_dir = TempDir::new().unwrap();
        let (app, _) = test_app(&temp_dir);
        put(app.clone(), "/api/admin/tournament", json!({})).await;

        let home = create_team(&app, "Rojos").await;
        let away = create_team(&app, "Azules").await;
        let (_, group) = post(app.clone(), "/api/admin/groups", json!({ "name": "A" })).await;
        let group_id = group["id"].as_str().unwrap().to_string();
        put(
            app.clone(),
            &format!("/api/admin/groups/{}/teams", group_id),
            json!({ "team_ids": [home, away] }),
        )
        .await;

        let (status, created) = post(
            app.clone(),
            "/api/admin/matches",
            json!({
                "group_id": group_id,
                "match_date": "2025-04-05T20:00:00Z",
                "home_team_id": home,
                "away_team_id": away,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "scheduled");

        let (_, json) = get_json(app.clone(), "/api/admin/matches?status=finished").await;
        assert!(json.as_array().unwrap().is_empty());

        let uri = format!("/api/admin/matches/{}", created["id"].as_str().unwrap());
        let (status, _) = put(
            app.clone(),
            &uri,
            json!({ "home_goals": 0, "away_goals": 2, "status": "finished" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, json) = get_json(
            app.clone(),
            &format!("/api/admin/matches?group={}&status=finished", group_id),
        )
        .await;
        assert_eq!(json.as_array().unwrap().len(), 1);

        let (_, standings) = get_json(app.clone(), "/api/standings").await;
        let top = &standings[0]["standings"][0];
        assert_eq!(top["team"]["name"], "Azules");
        assert_eq!(top["PTS"], 3);
        assert_eq!(top["GF"], 2);

        let (status, _) = get_json(app, "/api/admin/matches?status=postponed").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_match_against_itself_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let (app, _) = test_app(&temp_dir);
        put(app.clone(), "/api/admin/tournament", json!({})).await;
        let team = create_team(&app, "Rojos").await;

        let (status, _) = post(
            app,
            "/api/admin/matches",
            json!({
                "match_date": "2025-04-05T20:00:00Z",
                "home_team_id": team,
                "away_team_id": team,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_player_stats_upsert() {
        let temp_dir = TempDir::new().unwrap();
        let (app, _) = test_app(&temp_dir);
        put(app.clone(), "/api/admin/tournament", json!({})).await;
        let team = create_team(&app, "Rojos").await;

        let (status, player) = post(
            app.clone(),
            "/api/admin/players",
            json!({ "team_id": team, "name": "Carla" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let uri = format!("/api/admin/players/{}/stats", player["id"].as_str().unwrap());

        let (status, json) = put(app.clone(), &uri, json!({ "goals": 4, "yellow_cards": 2 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["goals"], 4);

        let (_, json) = put(app.clone(), &uri, json!({ "goals": 5 })).await;
        assert_eq!(json["goals"], 5);
        assert_eq!(json["yellow_cards"], 0);

        let (_, scorers) = get_json(app.clone(), "/api/scorers").await;
        assert_eq!(scorers.as_array().unwrap().len(), 1);
        assert_eq!(scorers[0]["count"], 5);

        let (_, json) = get_json(app.clone(), &format!("/api/admin/players?team={}", team)).await;
        assert_eq!(json[0]["name"], "Carla");

        let (status, _) = put(app, "/api/admin/players/ghost/stats", json!({ "goals": 1 })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
