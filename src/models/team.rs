//! Teams, groups, and group membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, GroupId, TeamId, TournamentId};

/// A team registered in a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub tournament_id: TournamentId,
    pub name: String,

    #[serde(default)]
    pub logo_url: Option<String>,

    /// Kit colour, as entered by the admin
    #[serde(default)]
    pub color: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(tournament_id: TournamentId, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::random(),
            tournament_id,
            name,
            logo_url: None,
            color: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: impl Into<TeamId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_color(mut self, color: String) -> Self {
        self.color = Some(color);
        self
    }

    pub fn apply(&mut self, update: TeamUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(logo_url) = update.logo_url {
            self.logo_url = Some(logo_url);
        }
        if let Some(color) = update.color {
            self.color = Some(color);
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub logo_url: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub color: Option<String>,
}

/// A group (pool) of teams that play each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub tournament_id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn new(tournament_id: TournamentId, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::random(),
            tournament_id,
            name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGroup {
    pub name: String,
}

/// Membership of a team in a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTeam {
    pub id: EntityId,
    pub group_id: GroupId,
    pub team_id: TeamId,
    pub created_at: DateTime<Utc>,
}

impl GroupTeam {
    /// Link a team to a group. The id is derived from the pair.
    pub fn new(group_id: GroupId, team_id: TeamId) -> Self {
        let id = EntityId::generate(&[group_id.as_str(), team_id.as_str()]);
        Self {
            id,
            group_id,
            team_id,
            created_at: Utc::now(),
        }
    }
}
