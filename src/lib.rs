//! # Scoreboard
//!
//! A local football tournament scoreboard: group tables, fixtures,
//! results and player leaderboards, with an admin API to maintain them.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (tournaments, teams, matches, players)
//! - **calculate**: Standings engine and leaderboards
//! - **storage**: JSONL tables and the `TournamentStore`
//! - **dashboard**: Public views assembled from the store
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod storage;

pub use models::*;
