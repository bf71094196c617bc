//! JSONL (JSON Lines) tables.
//!
//! Each line is a valid JSON object representing one record.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};

/// Entity types, one table each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Tournament,
    Team,
    Group,
    GroupTeam,
    Match,
    Player,
    PlayerStats,
}

impl EntityType {
    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Tournament => "tournaments.jsonl",
            EntityType::Team => "teams.jsonl",
            EntityType::Group => "groups.jsonl",
            EntityType::GroupTeam => "group_teams.jsonl",
            EntityType::Match => "matches.jsonl",
            EntityType::Player => "players.jsonl",
            EntityType::PlayerStats => "player_stats.jsonl",
        }
    }

    /// Singular name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            EntityType::Tournament => "tournament",
            EntityType::Team => "team",
            EntityType::Group => "group",
            EntityType::GroupTeam => "group team",
            EntityType::Match => "match",
            EntityType::Player => "player",
            EntityType::PlayerStats => "player stats",
        }
    }
}

/// Path of an entity's table.
pub fn entity_path(config: &StorageConfig, entity: EntityType) -> PathBuf {
    config.tables_dir().join(entity.filename())
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for an entity table.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(entity_path(config, entity))
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single record to the file.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended record to {:?}", self.path);
        Ok(())
    }

    /// Write records, replacing the entire file.
    ///
    /// Writes to a sibling temp file first and renames it over the table,
    /// so readers never see a half-written file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let tmp_path = self.path.with_extension("jsonl.tmp");
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        drop(writer);
        fs::rename(&tmp_path, &self.path)?;
        debug!("Wrote {} records to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for an entity table.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(entity_path(config, entity))
    }

    /// Read all records. A missing file reads as empty; unparseable lines
    /// are skipped with a warning.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        self.read_lines(false)
    }

    /// Read all records, failing on the first unparseable line.
    ///
    /// Used before a table is rewritten, so bad lines stay on disk.
    pub fn read_all_strict(&self) -> Result<Vec<T>, StorageError> {
        self.read_lines(true)
    }

    fn read_lines(&self, strict: bool) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(source) if strict => {
                    return Err(StorageError::Corrupt {
                        path: self.path.clone(),
                        line: i + 1,
                        source,
                    });
                }
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", i + 1, self.path, e);
                }
            }
        }

        debug!("Read {} records from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    /// Read records matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::models::{EntityId, Team};

    fn teams(names: &[&str]) -> Vec<Team> {
        let tid = EntityId::from("t1");
        names
            .iter()
            .map(|n| Team::new(tid.clone(), n.to_string()))
            .collect()
    }

    #[test]
    fn test_round_trip_table() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        let rows = teams(&["Halcones", "Toros"]);

        let writer = JsonlWriter::<Team>::for_entity(&config, EntityType::Team);
        assert_eq!(writer.write_all(&rows).unwrap(), 2);

        let reader = JsonlReader::<Team>::for_entity(&config, EntityType::Team);
        assert_eq!(reader.read_all().unwrap(), rows);
    }

    #[test]
    fn test_append_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("teams.jsonl");
        let writer = JsonlWriter::<Team>::new(path.clone());

        for team in teams(&["Halcones", "Toros", "Pumas"]) {
            writer.append(&team).unwrap();
        }

        let names: Vec<String> = JsonlReader::<Team>::new(path)
            .read_all()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Halcones", "Toros", "Pumas"]);
    }

    #[test]
    fn test_missing_table_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        let reader = JsonlReader::<Team>::for_entity(&config, EntityType::Match);
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_write_all_replaces_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("teams.jsonl");
        let writer = JsonlWriter::<Team>::new(path.clone());

        writer.write_all(&teams(&["Viejo"])).unwrap();
        writer.write_all(&teams(&["Nuevo", "Otro"])).unwrap();

        let rows = JsonlReader::<Team>::new(path.clone()).read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Nuevo");
        assert!(!path.with_extension("jsonl.tmp").exists());
    }

    #[test]
    fn test_corrupt_lines_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("teams.jsonl");
        let good = serde_json::to_string(&teams(&["Halcones"])[0]).unwrap();
        std::fs::write(&path, format!("{}\n{{broken\n\n{}\n", good, good)).unwrap();

        let rows = JsonlReader::<Team>::new(path).read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|t| t.name == "Halcones"));
    }

    #[test]
    fn test_strict_read_rejects_corrupt_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("teams.jsonl");
        let good = serde_json::to_string(&teams(&["Halcones"])[0]).unwrap();
        std::fs::write(&path, format!("{}\n\n{{broken\n", good)).unwrap();

        let reader = JsonlReader::<Team>::new(path.clone());
        match reader.read_all_strict() {
            Err(StorageError::Corrupt { line, path: bad, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(bad, path);
            }
            other => panic!("expected corrupt line error, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_read_where_filters() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("teams.jsonl");
        JsonlWriter::<Team>::new(path.clone())
            .write_all(&teams(&["Halcones", "Toros", "Tigres"]))
            .unwrap();

        let t_names = JsonlReader::<Team>::new(path)
            .read_where(|t| t.name.starts_with('T'))
            .unwrap();
        assert_eq!(t_names.len(), 2);
        assert_eq!(t_names[1].name, "Tigres");
    }

    #[test]
    fn test_table_locations() {
        let config = StorageConfig::new(PathBuf::from("/srv/scoreboard"));
        assert_eq!(
            entity_path(&config, EntityType::GroupTeam),
            PathBuf::from("/srv/scoreboard/tables/group_teams.jsonl")
        );
        assert_eq!(EntityType::Tournament.filename(), "tournaments.jsonl");
        assert_eq!(EntityType::PlayerStats.filename(), "player_stats.jsonl");
        assert_eq!(EntityType::GroupTeam.label(), "group team");
    }
}
