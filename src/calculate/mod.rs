//! Derived views computed from stored tournament data:
//! - Group standings tables
//! - Scorer and card leaderboards
//! - Fixture and result listings

mod leaderboard;
mod standings;

pub use leaderboard::*;
pub use standings::*;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{
    Group, GroupId, Match, MatchId, MatchPhase, MatchStatus, Player, PlayerCardAggregate,
    PlayerId, PlayerStats, Team, TeamId,
};

/// Attribute each player's card counts to the player's team.
///
/// Stats rows for players that no longer exist are dropped.
pub fn card_aggregates(players: &[Player], stats: &[PlayerStats]) -> Vec<PlayerCardAggregate> {
    let team_of: HashMap<&PlayerId, &TeamId> =
        players.iter().map(|p| (&p.id, &p.team_id)).collect();

    stats
        .iter()
        .filter_map(|s| {
            team_of.get(&s.player_id).map(|team_id| {
                PlayerCardAggregate::new((*team_id).clone(), s.yellow_cards, s.red_cards)
            })
        })
        .collect()
}

/// Label shown for a side whose team can't be resolved.
pub const UNKNOWN_TEAM: &str = "TBD";

/// A match with team and group names resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub id: MatchId,
    pub match_date: DateTime<Utc>,
    pub venue: Option<String>,
    pub phase: MatchPhase,
    pub status: MatchStatus,
    pub group: Option<String>,
    pub home_team: String,
    pub away_team: String,
    /// Score, only present once the match is finished
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
}

/// Matches with the given status, in date order, ready for display.
pub fn match_summaries(
    matches: &[Match],
    teams: &[Team],
    groups: &[Group],
    status: MatchStatus,
) -> Vec<MatchSummary> {
    let team_names: HashMap<&TeamId, &str> =
        teams.iter().map(|t| (&t.id, t.name.as_str())).collect();
    let group_names: HashMap<&GroupId, &str> =
        groups.iter().map(|g| (&g.id, g.name.as_str())).collect();
    let team_name = |id: &TeamId| {
        team_names
            .get(id)
            .copied()
            .unwrap_or(UNKNOWN_TEAM)
            .to_string()
    };

    let mut selected: Vec<&Match> = matches.iter().filter(|m| m.status == status).collect();
    selected.sort_by_key(|m| m.match_date);

    selected
        .into_iter()
        .map(|m| {
            let finished = m.is_finished();
            MatchSummary {
                id: m.id.clone(),
                match_date: m.match_date,
                venue: m.venue.clone(),
                phase: m.phase,
                status: m.status,
                group: m
                    .group_id
                    .as_ref()
                    .and_then(|g| group_names.get(g))
                    .map(|n| n.to_string()),
                home_team: team_name(&m.home_team_id),
                away_team: team_name(&m.away_team_id),
                home_goals: finished.then_some(m.home_goals),
                away_goals: finished.then_some(m.away_goals),
            }
        })
        .collect()
}
