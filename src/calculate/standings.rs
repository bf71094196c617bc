//! Group standings engine.
//!
//! Turns finished matches into a ranked league table. Rows are ordered by:
//!
//! 1. Points, highest first
//! 2. Goal difference, highest first
//! 3. Goals scored, highest first
//! 4. Goals conceded, lowest first
//! 5. Yellow cards, lowest first
//!
//! Rows still tied after the fifth key keep the order in which their teams
//! were passed in.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{
    Group, GroupId, GroupStandings, Match, PlayerCardAggregate, PointSystem, Team, TeamId,
    TeamStanding,
};

/// Compute the ordered table for a set of teams.
///
/// Only finished matches count. A match naming a team that is not in
/// `teams` is skipped entirely, for both sides. Card aggregates for
/// unknown teams are ignored.
///
/// Callers guarantee well-formed finished matches. A team listed twice
/// keeps only its first row.
pub fn calculate_standings(
    teams: &[Team],
    matches: &[Match],
    card_stats: &[PlayerCardAggregate],
    points: PointSystem,
) -> Vec<TeamStanding> {
    let mut table = Accumulator::new(teams);

    for m in matches.iter().filter(|m| m.is_finished()) {
        table.record(m, points);
    }

    for cards in card_stats {
        table.add_cards(cards);
    }

    table.into_ranked()
}

/// Table ordering used by [`calculate_standings`].
pub fn compare_standings(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.goals_against.cmp(&b.goals_against))
        .then_with(|| a.yellow_cards.cmp(&b.yellow_cards))
}

/// Compute a table for every group.
///
/// Each group's teams are taken from `memberships` in the order they
/// appear in `teams`; its matches are those tagged with the group's id.
pub fn group_standings(
    groups: &[Group],
    teams: &[Team],
    memberships: &HashMap<GroupId, Vec<TeamId>>,
    matches: &[Match],
    card_stats: &[PlayerCardAggregate],
    points: PointSystem,
) -> Vec<GroupStandings> {
    groups
        .iter()
        .map(|group| {
            let members = memberships
                .get(&group.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let group_teams: Vec<Team> = teams
                .iter()
                .filter(|t| members.contains(&t.id))
                .cloned()
                .collect();
            let group_matches: Vec<Match> = matches
                .iter()
                .filter(|m| m.group_id.as_ref() == Some(&group.id))
                .cloned()
                .collect();

            GroupStandings {
                group: group.clone(),
                standings: calculate_standings(&group_teams, &group_matches, card_stats, points),
            }
        })
        .collect()
}

/// Per-invocation accumulator: rows in input order plus an id index.
struct Accumulator<'a> {
    rows: Vec<TeamStanding>,
    index: HashMap<&'a TeamId, usize>,
}

impl<'a> Accumulator<'a> {
    fn new(teams: &'a [Team]) -> Self {
        let mut rows = Vec::with_capacity(teams.len());
        let mut index = HashMap::with_capacity(teams.len());

        for team in teams {
            if index.contains_key(&team.id) {
                continue;
            }
            index.insert(&team.id, rows.len());
            rows.push(TeamStanding::new(team.clone()));
        }

        Self { rows, index }
    }

    fn record(&mut self, m: &Match, points: PointSystem) {
        let (Some(&home), Some(&away)) = (
            self.index.get(&m.home_team_id),
            self.index.get(&m.away_team_id),
        ) else {
            return;
        };
        apply_result(&mut self.rows[home], m.home_goals, m.away_goals, points);
        apply_result(&mut self.rows[away], m.away_goals, m.home_goals, points);
    }

    fn add_cards(&mut self, cards: &PlayerCardAggregate) {
        if let Some(&i) = self.index.get(&cards.team_id) {
            let row = &mut self.rows[i];
            row.yellow_cards += cards.yellow_cards;
            row.red_cards += cards.red_cards;
        }
    }

    fn into_ranked(self) -> Vec<TeamStanding> {
        let mut rows = self.rows;
        for row in &mut rows {
            row.goal_difference = row.goals_for as i32 - row.goals_against as i32;
        }
        // Stable: full ties keep input order.
        rows.sort_by(compare_standings);
        rows
    }
}

fn apply_result(row: &mut TeamStanding, scored: u32, conceded: u32, points: PointSystem) {
    row.played += 1;
    row.goals_for += scored;
    row.goals_against += conceded;

    match scored.cmp(&conceded) {
        Ordering::Greater => {
            row.won += 1;
            row.points += points.win;
        }
        Ordering::Less => {
            row.lost += 1;
            row.points += points.loss;
        }
        Ordering::Equal => {
            row.drawn += 1;
            row.points += points.draw;
        }
    }
}
