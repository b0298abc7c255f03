//! Walkable floor shapes on the XZ plane.
//!
//! Both shapes ignore height: an airborne actor above the floor is in bounds
//! when its ground projection is.

use glam::{Vec2, Vec3};

use combat_core::ArenaBounds;
use combat_core::math::{horizontal, with_horizontal};

/// A round arena.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleArena {
    center: Vec2,
    radius: f32,
}

impl CircleArena {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl ArenaBounds for CircleArena {
    fn clamp_to_bounds(&self, position: Vec3) -> Vec3 {
        let offset = horizontal(position) - self.center;
        let planar = self.center + offset.clamp_length_max(self.radius);
        with_horizontal(position, planar)
    }

    fn is_in_bounds(&self, position: Vec3) -> bool {
        horizontal(position).distance(self.center) <= self.radius
    }
}

/// An axis-aligned rectangular arena.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectArena {
    min: Vec2,
    max: Vec2,
}

impl RectArena {
    /// Corners may be passed in any order.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> Vec2 {
        self.min
    }

    pub fn max(&self) -> Vec2 {
        self.max
    }
}

impl ArenaBounds for RectArena {
    fn clamp_to_bounds(&self, position: Vec3) -> Vec3 {
        with_horizontal(position, horizontal(position).clamp(self.min, self.max))
    }

    fn is_in_bounds(&self, position: Vec3) -> bool {
        let planar = horizontal(position);
        planar.cmpge(self.min).all() && planar.cmple(self.max).all()
    }
}
