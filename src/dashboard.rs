//! Public dashboard views.
//!
//! Loads what each view needs from the store and hands it to the
//! calculation engine. Shared by the HTTP API and the CLI.

use tracing::debug;

use crate::calculate::{
    card_aggregates, card_leaders, group_standings, match_summaries, top_scorers, CardKind,
    LeaderboardEntry, MatchSummary, UNKNOWN_TEAM,
};
use crate::models::{GroupStandings, MatchFilter, MatchStatus, Tournament};
use crate::storage::{StorageError, TournamentStore};

/// Every group's table for a tournament, groups ordered by name.
pub fn standings(
    store: &TournamentStore,
    tournament: &Tournament,
) -> Result<Vec<GroupStandings>, StorageError> {
    let teams = store.teams(&tournament.id)?;
    let groups = store.groups(&tournament.id)?;
    let memberships = store.group_memberships(&groups)?;
    let matches = store.matches(&tournament.id, &MatchFilter::default())?;
    let players = store.players(&tournament.id, None)?;
    let stats = store.player_stats(&tournament.id)?;
    let cards = card_aggregates(&players, &stats);

    debug!(
        "Computing standings for {} groups, {} teams, {} matches",
        groups.len(),
        teams.len(),
        matches.len()
    );

    Ok(group_standings(
        &groups,
        &teams,
        &memberships,
        &matches,
        &cards,
        tournament.point_system(),
    ))
}

/// Matches with the given status, with names resolved.
pub fn fixtures(
    store: &TournamentStore,
    tournament: &Tournament,
    status: MatchStatus,
) -> Result<Vec<MatchSummary>, StorageError> {
    let filter = MatchFilter {
        group_id: None,
        status: Some(status),
    };
    let matches = store.matches(&tournament.id, &filter)?;
    let teams = store.teams(&tournament.id)?;
    let groups = store.groups(&tournament.id)?;
    Ok(match_summaries(&matches, &teams, &groups, status))
}

/// Which leaderboard to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    Scorers,
    Cards(CardKind),
}

pub fn leaderboard(
    store: &TournamentStore,
    tournament: &Tournament,
    board: Board,
    limit: usize,
) -> Result<Vec<LeaderboardEntry>, StorageError> {
    let players = store.players(&tournament.id, None)?;
    let stats = store.player_stats(&tournament.id)?;
    let teams = store.teams(&tournament.id)?;

    Ok(match board {
        Board::Scorers => top_scorers(&players, &stats, &teams, limit),
        Board::Cards(kind) => card_leaders(&players, &stats, &teams, kind, limit),
    })
}

/// Plain-text table for one group, as printed by the CLI.
pub fn render_standings(table: &GroupStandings) -> String {
    let mut out = format!("Group {}\n", table.group.name);
    out.push_str(&format!(
        "{:>3}  {:<24} {:>3} {:>4} {:>3} {:>3} {:>3} {:>3} {:>3} {:>4} {:>3}\n",
        "Pos", "Team", "PJ", "PTS", "PG", "PE", "PP", "GF", "GC", "DG", "TA"
    ));
    for (i, row) in table.standings.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}  {:<24} {:>3} {:>4} {:>3} {:>3} {:>3} {:>3} {:>3} {:>4} {:>3}\n",
            i + 1,
            row.team.name,
            row.played,
            row.points,
            row.won,
            row.drawn,
            row.lost,
            row.goals_for,
            row.goals_against,
            row.signed_goal_difference(),
            row.yellow_cards
        ));
    }
    out
}

pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    let mut out = format!("{:>3}  {:<24} {:<24} {:>5}\n", "Pos", "Player", "Team", "Total");
    for entry in entries {
        out.push_str(&format!(
            "{:>3}  {:<24} {:<24} {:>5}\n",
            entry.position,
            entry.player_name,
            entry.team_name.as_deref().unwrap_or(UNKNOWN_TEAM),
            entry.count
        ));
    }
    out
}
