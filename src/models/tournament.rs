//! Tournament model and its scoring rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, TournamentId};

/// Points awarded for a win, a draw and a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSystem {
    pub win: i32,
    pub draw: i32,
    pub loss: i32,
}

impl PointSystem {
    pub fn new(win: i32, draw: i32, loss: i32) -> Self {
        Self { win, draw, loss }
    }
}

impl Default for PointSystem {
    fn default() -> Self {
        Self::new(3, 1, 0)
    }
}

/// A configured tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,

    /// Display name
    pub name: String,

    /// Edition label (e.g. "Apertura")
    #[serde(default)]
    pub edition: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    pub points_win: i32,
    pub points_draw: i32,
    pub points_loss: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament with the default 3/1/0 scoring.
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        let points = PointSystem::default();
        Self {
            id: EntityId::random(),
            name,
            edition: None,
            year: None,
            points_win: points.win,
            points_draw: points.draw,
            points_loss: points.loss,
            created_at: now,
            updated_at: now,
        }
    }

    /// Scoring rules configured for this tournament.
    pub fn point_system(&self) -> PointSystem {
        PointSystem::new(self.points_win, self.points_draw, self.points_loss)
    }

    /// Apply a partial update, bumping `updated_at`.
    pub fn apply(&mut self, update: TournamentUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(edition) = update.edition {
            self.edition = Some(edition);
        }
        if let Some(year) = update.year {
            self.year = Some(year);
        }
        if let Some(points) = update.points_win {
            self.points_win = points;
        }
        if let Some(points) = update.points_draw {
            self.points_draw = points;
        }
        if let Some(points) = update.points_loss {
            self.points_loss = points;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial tournament fields, used for both create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TournamentUpdate {
    pub name: Option<String>,
    pub edition: Option<String>,
    pub year: Option<i32>,
    pub points_win: Option<i32>,
    pub points_draw: Option<i32>,
    pub points_loss: Option<i32>,
}
