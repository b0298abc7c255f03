//! Position integration and floor sensing.
//!
//! The floor is the plane `y = GROUND_HEIGHT`. Anything at or below it is
//! grounded and gets snapped back onto it.

use glam::{Vec2, Vec3};

use combat_core::GroundContact;
use combat_core::math::horizontal;

pub const GROUND_HEIGHT: f32 = 0.0;

const GROUND_TOLERANCE: f32 = 1e-4;

/// A positioned actor body with a horizontal collision radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub position: Vec3,
    pub radius: f32,
}

impl Body {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self { position, radius }
    }

    /// Ground projection on the XZ plane.
    pub fn planar(&self) -> Vec2 {
        horizontal(self.position)
    }

    pub fn ground_contact(&self) -> GroundContact {
        GroundContact {
            on_floor: self.position.y <= GROUND_HEIGHT + GROUND_TOLERANCE,
        }
    }

    /// Moves by `velocity * dt`, never sinking below the floor.
    pub fn integrate(&mut self, velocity: Vec3, dt: f32) {
        self.position += velocity * dt;
        if self.position.y < GROUND_HEIGHT {
            self.position.y = GROUND_HEIGHT;
        }
    }

    /// Planar distance between the two bodies' centers.
    pub fn distance_to(&self, other: &Body) -> f32 {
        self.planar().distance(other.planar())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrates_and_lands_on_floor() {
        let mut body = Body::new(Vec3::new(0.0, 0.5, 0.0), 0.5);
        assert!(!body.ground_contact().on_floor);

        body.integrate(Vec3::new(2.0, -10.0, 0.0), 0.1);
        assert_eq!(body.position, Vec3::new(0.2, 0.0, 0.0));
        assert!(body.ground_contact().on_floor);
    }

    #[test]
    fn distance_ignores_height() {
        let a = Body::new(Vec3::new(0.0, 3.0, 0.0), 0.5);
        let b = Body::new(Vec3::new(3.0, 0.0, 4.0), 0.5);
        assert_eq!(a.distance_to(&b), 5.0);
    }
}
