//! Players and their per-tournament stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, PlayerId, TeamId, TournamentId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub tournament_id: TournamentId,
    pub team_id: TeamId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    pub fn new(tournament_id: TournamentId, team_id: TeamId, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::random(),
            tournament_id,
            team_id,
            name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: PlayerUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(team_id) = update.team_id {
            self.team_id = team_id;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
    pub team_id: TeamId,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub team_id: Option<TeamId>,
}

/// Goal and card totals for one player in one tournament.
///
/// At most one row exists per `(player_id, tournament_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub id: EntityId,
    pub player_id: PlayerId,
    pub tournament_id: TournamentId,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub yellow_cards: u32,
    #[serde(default)]
    pub red_cards: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlayerStats {
    pub fn new(player_id: PlayerId, tournament_id: TournamentId) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::random(),
            player_id,
            tournament_id,
            goals: 0,
            yellow_cards: 0,
            red_cards: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the counters; absent values reset to zero.
    pub fn set(&mut self, update: StatsUpdate) {
        self.goals = update.goals.unwrap_or(0);
        self.yellow_cards = update.yellow_cards.unwrap_or(0);
        self.red_cards = update.red_cards.unwrap_or(0);
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsUpdate {
    pub goals: Option<u32>,
    pub yellow_cards: Option<u32>,
    pub red_cards: Option<u32>,
}

/// Card totals for one player, attributed to the player's team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCardAggregate {
    pub team_id: TeamId,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

impl PlayerCardAggregate {
    pub fn new(team_id: impl Into<TeamId>, yellow_cards: u32, red_cards: u32) -> Self {
        Self {
            team_id: team_id.into(),
            yellow_cards,
            red_cards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_set_defaults_missing_to_zero() {
        let mut stats = PlayerStats::new("p1".into(), "t1".into());
        stats.goals = 4;
        stats.red_cards = 1;

        stats.set(StatsUpdate {
            yellow_cards: Some(2),
            ..Default::default()
        });

        assert_eq!(stats.goals, 0);
        assert_eq!(stats.yellow_cards, 2);
        assert_eq!(stats.red_cards, 0);
    }

    #[test]
    fn test_player_transfer() {
        let mut player = Player::new("t1".into(), "team-a".into(), "Ana".to_string());
        player.apply(PlayerUpdate {
            team_id: Some("team-b".into()),
            ..Default::default()
        });
        assert_eq!(player.team_id.as_str(), "team-b");
        assert_eq!(player.name, "Ana");
    }
}
