//! Tournament data access.
//!
//! `TournamentStore` is the only way the application reaches persisted
//! data. It is constructed once and handed to whoever needs it; there is
//! no global client.

use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use super::{EntityType, JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::models::{
    EntityId, Group, GroupId, GroupTeam, Match, MatchFilter, MatchUpdate, NewGroup, NewMatch,
    NewPlayer, NewTeam, Player, PlayerId, PlayerStats, PlayerUpdate, PointSystem, StatsUpdate,
    Team, TeamId, TeamUpdate, Tournament, TournamentId, TournamentUpdate,
};

/// A row stored in its own JSONL table.
pub trait Record: Serialize + DeserializeOwned {
    const ENTITY: EntityType;

    fn id(&self) -> &EntityId;
}

macro_rules! impl_record {
    ($ty:ty, $entity:expr) => {
        impl Record for $ty {
            const ENTITY: EntityType = $entity;

            fn id(&self) -> &EntityId {
                &self.id
            }
        }
    };
}

impl_record!(Tournament, EntityType::Tournament);
impl_record!(Team, EntityType::Team);
impl_record!(Group, EntityType::Group);
impl_record!(GroupTeam, EntityType::GroupTeam);
impl_record!(Match, EntityType::Match);
impl_record!(Player, EntityType::Player);
impl_record!(PlayerStats, EntityType::PlayerStats);

/// File-backed store for one scoreboard installation.
#[derive(Debug, Clone)]
pub struct TournamentStore {
    config: StorageConfig,
    default_name: String,
    default_points: PointSystem,
}

impl TournamentStore {
    /// `default_name` is used when a tournament is created without a name.
    pub fn new(config: StorageConfig, default_name: impl Into<String>) -> Self {
        Self {
            config,
            default_name: default_name.into(),
            default_points: PointSystem::default(),
        }
    }

    /// Scoring applied to newly created tournaments.
    pub fn with_default_points(mut self, points: PointSystem) -> Self {
        self.default_points = points;
        self
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    // --- generic table access ---

    fn load<T: Record>(&self) -> Result<Vec<T>, StorageError> {
        JsonlReader::for_entity(&self.config, T::ENTITY).read_all()
    }

    fn load_where<T, F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        T: Record,
        F: Fn(&T) -> bool,
    {
        JsonlReader::for_entity(&self.config, T::ENTITY).read_where(predicate)
    }

    /// Load a table that is about to be rewritten. Fails on unparseable
    /// lines instead of dropping them.
    fn load_for_rewrite<T: Record>(&self) -> Result<Vec<T>, StorageError> {
        JsonlReader::for_entity(&self.config, T::ENTITY).read_all_strict()
    }

    fn save<T: Record>(&self, rows: &[T]) -> Result<(), StorageError> {
        JsonlWriter::for_entity(&self.config, T::ENTITY).write_all(rows)?;
        Ok(())
    }

    fn insert<T: Record>(&self, row: T) -> Result<T, StorageError> {
        JsonlWriter::for_entity(&self.config, T::ENTITY).append(&row)?;
        info!("Created {} {}", T::ENTITY.label(), row.id());
        Ok(row)
    }

    fn modify<T, F>(&self, id: &EntityId, change: F) -> Result<T, StorageError>
    where
        T: Record + Clone,
        F: FnOnce(&mut T),
    {
        let mut rows: Vec<T> = self.load_for_rewrite()?;
        let row = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StorageError::not_found(T::ENTITY.label(), id))?;
        change(row);
        let updated = row.clone();
        self.save(&rows)?;
        info!("Updated {} {}", T::ENTITY.label(), id);
        Ok(updated)
    }

    fn remove<T: Record>(&self, id: &EntityId) -> Result<(), StorageError> {
        let mut rows: Vec<T> = self.load_for_rewrite()?;
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        if rows.len() == before {
            return Err(StorageError::not_found(T::ENTITY.label(), id));
        }
        self.save(&rows)?;
        info!("Deleted {} {}", T::ENTITY.label(), id);
        Ok(())
    }

    // --- tournament ---

    /// The most recently created tournament, if any.
    pub fn tournament(&self) -> Result<Option<Tournament>, StorageError> {
        let tournaments: Vec<Tournament> = self.load()?;
        Ok(tournaments.into_iter().max_by_key(|t| t.created_at))
    }

    /// Update the current tournament, or create one if none exists.
    pub fn save_tournament(&self, update: TournamentUpdate) -> Result<Tournament, StorageError> {
        match self.tournament()? {
            Some(existing) => self.modify(&existing.id, |t: &mut Tournament| t.apply(update)),
            None => {
                let name = update
                    .name
                    .clone()
                    .unwrap_or_else(|| self.default_name.clone());
                let mut tournament = Tournament::new(name);
                tournament.points_win = self.default_points.win;
                tournament.points_draw = self.default_points.draw;
                tournament.points_loss = self.default_points.loss;
                tournament.apply(update);
                self.insert(tournament)
            }
        }
    }

    // --- teams ---

    /// Teams in a tournament, sorted by name.
    pub fn teams(&self, tournament_id: &TournamentId) -> Result<Vec<Team>, StorageError> {
        let mut teams: Vec<Team> = self.load_where(|t: &Team| &t.tournament_id == tournament_id)?;
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }

    pub fn create_team(
        &self,
        tournament_id: &TournamentId,
        new: NewTeam,
    ) -> Result<Team, StorageError> {
        let mut team = Team::new(tournament_id.clone(), new.name);
        team.logo_url = new.logo_url;
        team.color = new.color;
        self.insert(team)
    }

    pub fn update_team(&self, id: &TeamId, update: TeamUpdate) -> Result<Team, StorageError> {
        self.modify(id, |t: &mut Team| t.apply(update))
    }

    /// Delete a team along with its group memberships.
    pub fn delete_team(&self, id: &TeamId) -> Result<(), StorageError> {
        let mut links: Vec<GroupTeam> = self.load_for_rewrite()?;
        self.remove::<Team>(id)?;
        links.retain(|l| &l.team_id != id);
        self.save(&links)
    }

    // --- groups ---

    /// Groups in a tournament, sorted by name.
    pub fn groups(&self, tournament_id: &TournamentId) -> Result<Vec<Group>, StorageError> {
        let mut groups: Vec<Group> =
            self.load_where(|g: &Group| &g.tournament_id == tournament_id)?;
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    pub fn create_group(
        &self,
        tournament_id: &TournamentId,
        new: NewGroup,
    ) -> Result<Group, StorageError> {
        self.insert(Group::new(tournament_id.clone(), new.name))
    }

    pub fn update_group(&self, id: &GroupId, new: NewGroup) -> Result<Group, StorageError> {
        self.modify(id, |g: &mut Group| g.rename(new.name))
    }

    /// Delete a group along with its team links.
    pub fn delete_group(&self, id: &GroupId) -> Result<(), StorageError> {
        let mut links: Vec<GroupTeam> = self.load_for_rewrite()?;
        self.remove::<Group>(id)?;
        links.retain(|l| &l.group_id != id);
        self.save(&links)
    }

    // --- group membership ---

    /// Ids of the teams in a group, in the order they were linked.
    pub fn group_team_ids(&self, group_id: &GroupId) -> Result<Vec<TeamId>, StorageError> {
        let links: Vec<GroupTeam> = self.load_where(|l: &GroupTeam| &l.group_id == group_id)?;
        Ok(links.into_iter().map(|l| l.team_id).collect())
    }

    /// Teams in a group. Links to deleted teams are skipped.
    pub fn teams_by_group(&self, group_id: &GroupId) -> Result<Vec<Team>, StorageError> {
        let ids = self.group_team_ids(group_id)?;
        let teams: Vec<Team> = self.load()?;
        let by_id: HashMap<&TeamId, &Team> = teams.iter().map(|t| (&t.id, t)).collect();
        Ok(ids
            .iter()
            .filter_map(|id| by_id.get(id).map(|t| (*t).clone()))
            .collect())
    }

    /// Replace a group's membership. An empty list clears it.
    pub fn set_group_teams(
        &self,
        group_id: &GroupId,
        team_ids: &[TeamId],
    ) -> Result<(), StorageError> {
        let mut links: Vec<GroupTeam> = self.load_for_rewrite()?;
        links.retain(|l| &l.group_id != group_id);
        for team_id in team_ids {
            let link = GroupTeam::new(group_id.clone(), team_id.clone());
            if !links.iter().any(|l| l.id == link.id) {
                links.push(link);
            }
        }
        self.save(&links)?;
        info!("Group {} now has {} teams", group_id, team_ids.len());
        Ok(())
    }

    /// Membership map for a set of groups.
    pub fn group_memberships(
        &self,
        groups: &[Group],
    ) -> Result<HashMap<GroupId, Vec<TeamId>>, StorageError> {
        let links: Vec<GroupTeam> = self.load()?;
        let mut map: HashMap<GroupId, Vec<TeamId>> =
            groups.iter().map(|g| (g.id.clone(), Vec::new())).collect();
        for link in links {
            if let Some(members) = map.get_mut(&link.group_id) {
                members.push(link.team_id);
            }
        }
        Ok(map)
    }

    // --- matches ---

    /// Matches in a tournament, earliest first.
    pub fn matches(
        &self,
        tournament_id: &TournamentId,
        filter: &MatchFilter,
    ) -> Result<Vec<Match>, StorageError> {
        let mut matches: Vec<Match> = self.load_where(|m: &Match| {
            &m.tournament_id == tournament_id && filter.matches(m)
        })?;
        matches.sort_by_key(|m| m.match_date);
        Ok(matches)
    }

    pub fn create_match(
        &self,
        tournament_id: &TournamentId,
        new: NewMatch,
    ) -> Result<Match, StorageError> {
        let mut m = Match::new(
            tournament_id.clone(),
            new.home_team_id,
            new.away_team_id,
            new.match_date,
        );
        m.group_id = new.group_id;
        m.phase = new.phase;
        m.venue = new.venue;
        m.home_goals = new.home_goals;
        m.away_goals = new.away_goals;
        m.status = new.status;
        self.insert(m)
    }

    pub fn update_match(&self, id: &EntityId, update: MatchUpdate) -> Result<Match, StorageError> {
        self.modify(id, |m: &mut Match| m.apply(update))
    }

    pub fn delete_match(&self, id: &EntityId) -> Result<(), StorageError> {
        self.remove::<Match>(id)
    }

    // --- players ---

    /// Players in a tournament, optionally for one team, sorted by name.
    pub fn players(
        &self,
        tournament_id: &TournamentId,
        team_id: Option<&TeamId>,
    ) -> Result<Vec<Player>, StorageError> {
        let mut players: Vec<Player> = self.load_where(|p: &Player| {
            &p.tournament_id == tournament_id && team_id.map_or(true, |t| &p.team_id == t)
        })?;
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }

    pub fn create_player(
        &self,
        tournament_id: &TournamentId,
        new: NewPlayer,
    ) -> Result<Player, StorageError> {
        self.insert(Player::new(tournament_id.clone(), new.team_id, new.name))
    }

    pub fn update_player(
        &self,
        id: &PlayerId,
        update: PlayerUpdate,
    ) -> Result<Player, StorageError> {
        self.modify(id, |p: &mut Player| p.apply(update))
    }

    /// Delete a player along with their stats.
    pub fn delete_player(&self, id: &PlayerId) -> Result<(), StorageError> {
        let mut stats: Vec<PlayerStats> = self.load_for_rewrite()?;
        self.remove::<Player>(id)?;
        stats.retain(|s| &s.player_id != id);
        self.save(&stats)
    }

    // --- player stats ---

    pub fn player_stats(
        &self,
        tournament_id: &TournamentId,
    ) -> Result<Vec<PlayerStats>, StorageError> {
        self.load_where(|s: &PlayerStats| &s.tournament_id == tournament_id)
    }

    /// Set a player's counters for a tournament, creating the row if needed.
    pub fn upsert_player_stats(
        &self,
        player_id: &PlayerId,
        tournament_id: &TournamentId,
        update: StatsUpdate,
    ) -> Result<PlayerStats, StorageError> {
        let players: Vec<Player> = self.load()?;
        if !players.iter().any(|p| &p.id == player_id) {
            return Err(StorageError::not_found(
                EntityType::Player.label(),
                player_id,
            ));
        }

        let mut rows: Vec<PlayerStats> = self.load_for_rewrite()?;
        let position = rows
            .iter()
            .position(|s| &s.player_id == player_id && &s.tournament_id == tournament_id);

        let stats = match position {
            Some(i) => {
                rows[i].set(update);
                rows[i].clone()
            }
            None => {
                let mut row = PlayerStats::new(player_id.clone(), tournament_id.clone());
                row.set(update);
                rows.push(row.clone());
                row
            }
        };

        self.save(&rows)?;
        info!("Stats for player {} set", player_id);
        Ok(stats)
    }
}
