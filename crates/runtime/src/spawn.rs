//! Fixed spawn points.

use glam::Vec3;

use combat_core::SpawnProvider;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSpawns {
    pub player: Vec3,
    pub boss: Vec3,
}

impl FixedSpawns {
    pub fn new(player: Vec3, boss: Vec3) -> Self {
        Self { player, boss }
    }
}

impl SpawnProvider for FixedSpawns {
    fn player_spawn_position(&self) -> Vec3 {
        self.player
    }

    fn boss_spawn_position(&self) -> Vec3 {
        self.boss
    }
}
