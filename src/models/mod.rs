//! Core data models for the scoreboard.

mod fixture;
mod ids;
mod player;
mod standing;
mod team;
mod tournament;

pub use fixture::*;
pub use ids::*;
pub use player::*;
pub use standing::*;
pub use team::*;
pub use tournament::*;
