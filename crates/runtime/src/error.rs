//! Errors surfaced while assembling an arena.
//!
//! Stepping never fails; every error here is raised by [`crate::ArenaBuilder::build`].
use glam::Vec3;
use thiserror::Error;

use combat_core::{ActorId, ConfigError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("arena requires bounds to be configured before building")]
    MissingBounds,

    #[error("arena requires spawn points to be configured before building")]
    MissingSpawns,

    #[error("spawn point {position} for actor {actor} lies outside the arena bounds")]
    SpawnOutOfBounds { actor: ActorId, position: Vec3 },
}
