//! Arena layout description.
//!
//! Kept as plain data so content stays independent of the runtime; the
//! runtime turns a spec into its bounds and spawn providers.

/// Shape of the walkable floor on the XZ plane.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundsSpec {
    Circle { center: (f32, f32), radius: f32 },
    Rect { min: (f32, f32), max: (f32, f32) },
}

/// Bounds plus spawn points, positions as `(x, y, z)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaSpec {
    pub bounds: BoundsSpec,
    pub player_spawn: (f32, f32, f32),
    pub boss_spawn: (f32, f32, f32),
}

impl ArenaSpec {
    /// Checks shape dimensions and spawn coordinates.
    pub fn validate(&self) -> Result<(), String> {
        match self.bounds {
            BoundsSpec::Circle { radius, .. } if !(radius > 0.0 && radius.is_finite()) => {
                return Err(format!("circle radius must be positive (got {radius})"));
            }
            BoundsSpec::Rect { min, max } if !(min.0 < max.0 && min.1 < max.1) => {
                return Err(format!("rect min {min:?} must be below max {max:?}"));
            }
            _ => {}
        }
        for (name, (x, y, z)) in [("player_spawn", self.player_spawn), ("boss_spawn", self.boss_spawn)] {
            if !(x.is_finite() && y.is_finite() && z.is_finite()) {
                return Err(format!("{name} must be finite"));
            }
        }
        Ok(())
    }
}

impl Default for ArenaSpec {
    fn default() -> Self {
        Self {
            bounds: BoundsSpec::Circle {
                center: (0.0, 0.0),
                radius: 15.0,
            },
            player_spawn: (0.0, 0.0, 6.0),
            boss_spawn: (0.0, 0.0, -6.0),
        }
    }
}
