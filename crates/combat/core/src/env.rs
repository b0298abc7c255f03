//! Collaborator boundaries the simulation asks but never implements.
//!
//! Controllers do not enforce arena bounds or pick spawn points; the runtime
//! supplies implementations of these traits and applies their answers.

use glam::Vec3;

/// Where actors may stand.
pub trait ArenaBounds {
    /// Nearest in-bounds position to `position`.
    fn clamp_to_bounds(&self, position: Vec3) -> Vec3;

    fn is_in_bounds(&self, position: Vec3) -> bool;
}

/// Where actors appear when an encounter starts.
pub trait SpawnProvider {
    fn player_spawn_position(&self) -> Vec3;

    fn boss_spawn_position(&self) -> Vec3;
}

/// Ground sensor reading for one actor at the start of a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroundContact {
    pub on_floor: bool,
}

impl GroundContact {
    pub const GROUNDED: Self = Self { on_floor: true };
    pub const AIRBORNE: Self = Self { on_floor: false };
}
