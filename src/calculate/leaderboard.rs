//! Player leaderboards: top scorers and card tallies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Player, PlayerId, PlayerStats, Team, TeamId};

/// Maximum rows shown on a leaderboard.
pub const LEADERBOARD_LIMIT: usize = 20;

/// Which card colour to rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    #[default]
    Yellow,
    Red,
}

impl CardKind {
    fn count(&self, stats: &PlayerStats) -> u32 {
        match self {
            CardKind::Yellow => stats.yellow_cards,
            CardKind::Red => stats.red_cards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based rank
    pub position: usize,
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_name: Option<String>,
    pub count: u32,
}

/// Players with at least one goal, most goals first.
pub fn top_scorers(
    players: &[Player],
    stats: &[PlayerStats],
    teams: &[Team],
    limit: usize,
) -> Vec<LeaderboardEntry> {
    rank_players(players, stats, teams, limit, |s| s.goals)
}

/// Players with at least one card of `kind`, most cards first.
pub fn card_leaders(
    players: &[Player],
    stats: &[PlayerStats],
    teams: &[Team],
    kind: CardKind,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    rank_players(players, stats, teams, limit, |s| kind.count(s))
}

fn rank_players<F>(
    players: &[Player],
    stats: &[PlayerStats],
    teams: &[Team],
    limit: usize,
    metric: F,
) -> Vec<LeaderboardEntry>
where
    F: Fn(&PlayerStats) -> u32,
{
    let stats_by_player: HashMap<&PlayerId, &PlayerStats> =
        stats.iter().map(|s| (&s.player_id, s)).collect();
    let team_names: HashMap<&TeamId, &str> =
        teams.iter().map(|t| (&t.id, t.name.as_str())).collect();

    let mut ranked: Vec<(&Player, u32)> = players
        .iter()
        .filter_map(|p| {
            let count = stats_by_player.get(&p.id).map(|s| metric(s)).unwrap_or(0);
            (count > 0).then_some((p, count))
        })
        .collect();

    // Stable: equal counts keep the player order given.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, (player, count))| LeaderboardEntry {
            position: i + 1,
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            team_name: team_names.get(&player.team_id).map(|n| n.to_string()),
            count,
        })
        .collect()
}
