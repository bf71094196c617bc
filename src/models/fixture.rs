//! Match model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{EntityId, GroupId, MatchId, TeamId, TournamentId};

/// Whether a match has been played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Finished,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(MatchStatus::Scheduled),
            "finished" => Ok(MatchStatus::Finished),
            other => Err(format!("unknown match status: {}", other)),
        }
    }
}

/// Stage of the tournament a match belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPhase {
    #[default]
    Groups,
    Elimination,
}

/// A match between two teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,

    /// Group this match counts towards, if any
    #[serde(default)]
    pub group_id: Option<GroupId>,

    #[serde(default)]
    pub phase: MatchPhase,

    pub match_date: DateTime<Utc>,

    #[serde(default)]
    pub venue: Option<String>,

    pub home_team_id: TeamId,
    pub away_team_id: TeamId,

    #[serde(default)]
    pub home_goals: u32,
    #[serde(default)]
    pub away_goals: u32,

    #[serde(default)]
    pub status: MatchStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Create a scheduled 0-0 match.
    pub fn new(
        tournament_id: TournamentId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        match_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::random(),
            tournament_id,
            group_id: None,
            phase: MatchPhase::Groups,
            match_date,
            venue: None,
            home_team_id,
            away_team_id,
            home_goals: 0,
            away_goals: 0,
            status: MatchStatus::Scheduled,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn in_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Record a final score and mark the match as finished.
    pub fn finished(mut self, home_goals: u32, away_goals: u32) -> Self {
        self.home_goals = home_goals;
        self.away_goals = away_goals;
        self.status = MatchStatus::Finished;
        self
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    pub fn apply(&mut self, update: MatchUpdate) {
        if let Some(group_id) = update.group_id {
            self.group_id = Some(group_id);
        }
        if let Some(phase) = update.phase {
            self.phase = phase;
        }
        if let Some(match_date) = update.match_date {
            self.match_date = match_date;
        }
        if let Some(venue) = update.venue {
            self.venue = Some(venue);
        }
        if let Some(home) = update.home_team_id {
            self.home_team_id = home;
        }
        if let Some(away) = update.away_team_id {
            self.away_team_id = away;
        }
        if let Some(goals) = update.home_goals {
            self.home_goals = goals;
        }
        if let Some(goals) = update.away_goals {
            self.away_goals = goals;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMatch {
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub phase: MatchPhase,
    pub match_date: DateTime<Utc>,
    pub venue: Option<String>,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    #[serde(default)]
    pub home_goals: u32,
    #[serde(default)]
    pub away_goals: u32,
    #[serde(default)]
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchUpdate {
    pub group_id: Option<GroupId>,
    pub phase: Option<MatchPhase>,
    pub match_date: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub home_team_id: Option<TeamId>,
    pub away_team_id: Option<TeamId>,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub status: Option<MatchStatus>,
}

/// Optional filters when listing matches.
#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    pub group_id: Option<GroupId>,
    pub status: Option<MatchStatus>,
}

impl MatchFilter {
    pub fn matches(&self, m: &Match) -> bool {
        if let Some(ref group_id) = self.group_id {
            if m.group_id.as_ref() != Some(group_id) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if m.status != status {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Match {
        Match::new("t1".into(), "home".into(), "away".into(), Utc::now())
    }

    #[test]
    fn test_new_match_is_scheduled() {
        let m = sample();
        assert_eq!(m.status, MatchStatus::Scheduled);
        assert_eq!((m.home_goals, m.away_goals), (0, 0));
        assert!(!m.is_finished());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("finished".parse::<MatchStatus>(), Ok(MatchStatus::Finished));
        assert_eq!(" Scheduled ".parse::<MatchStatus>(), Ok(MatchStatus::Scheduled));
        assert!("postponed".parse::<MatchStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let m = sample().finished(2, 1);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["status"], "finished");
        assert_eq!(json["phase"], "groups");
    }

    #[test]
    fn test_filter_by_group_and_status() {
        let a = sample().in_group("g1".into()).finished(1, 0);
        let b = sample().in_group("g2".into());
        let c = sample();

        let filter = MatchFilter {
            group_id: Some("g1".into()),
            status: None,
        };
        assert!(filter.matches(&a));
        assert!(!filter.matches(&b));
        assert!(!filter.matches(&c));

        let filter = MatchFilter {
            group_id: None,
            status: Some(MatchStatus::Scheduled),
        };
        assert!(!filter.matches(&a));
        assert!(filter.matches(&b));
        assert!(filter.matches(&c));
    }

    #[test]
    fn test_apply_update_records_result() {
        let mut m = sample();
        m.apply(MatchUpdate {
            home_goals: Some(3),
            away_goals: Some(1),
            status: Some(MatchStatus::Finished),
            ..Default::default()
        });
        assert!(m.is_finished());
        assert_eq!((m.home_goals, m.away_goals), (3, 1));
    }
}
