//! League table rows.

use serde::{Deserialize, Serialize};

use super::{Group, Team};

/// One team's row in a group table.
///
/// Derived on demand from match and card data; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team: Team,

    /// Matches played
    #[serde(rename = "PJ")]
    pub played: u32,

    #[serde(rename = "PG")]
    pub won: u32,

    #[serde(rename = "PE")]
    pub drawn: u32,

    #[serde(rename = "PP")]
    pub lost: u32,

    /// Goals scored
    #[serde(rename = "GF")]
    pub goals_for: u32,

    /// Goals conceded
    #[serde(rename = "GC")]
    pub goals_against: u32,

    #[serde(rename = "DG")]
    pub goal_difference: i32,

    #[serde(rename = "PTS")]
    pub points: i32,

    /// Yellow cards across the team's players
    #[serde(rename = "TA")]
    pub yellow_cards: u32,

    /// Red cards across the team's players
    #[serde(rename = "TR")]
    pub red_cards: u32,
}

impl TeamStanding {
    /// A zeroed row for a team that has not played yet.
    pub fn new(team: Team) -> Self {
        Self {
            team,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            yellow_cards: 0,
            red_cards: 0,
        }
    }

    /// Goal difference formatted with an explicit sign for positive values.
    pub fn signed_goal_difference(&self) -> String {
        if self.goal_difference > 0 {
            format!("+{}", self.goal_difference)
        } else {
            self.goal_difference.to_string()
        }
    }
}

/// A group together with its computed table.
#[derive(Debug, Clone, Serialize)]
pub struct GroupStandings {
    pub group: Group,
    pub standings: Vec<TeamStanding>,
}
