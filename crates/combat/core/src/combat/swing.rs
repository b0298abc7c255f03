//! Attack descriptors and the per-swing hit volume.

use arrayvec::ArrayVec;
use glam::Vec2;

use crate::config::AttackProfile;
use crate::math::{DIRECTION_EPSILON, forward_from_yaw};
use crate::state::ActorId;

/// Most targets a single swing can register.
pub const MAX_TARGETS_PER_SWING: usize = 4;

/// Light or heavy attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackKind {
    Light,
    Heavy,
}

/// What a landed hit carries. Built once per swing and never mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackDescriptor {
    damage: f32,
    poise_damage: f32,
    is_heavy: bool,
}

impl AttackDescriptor {
    pub const fn new(damage: f32, poise_damage: f32, is_heavy: bool) -> Self {
        Self {
            damage,
            poise_damage,
            is_heavy,
        }
    }

    pub const fn damage(&self) -> f32 {
        self.damage
    }

    pub const fn poise_damage(&self) -> f32 {
        self.poise_damage
    }

    pub const fn is_heavy(&self) -> bool {
        self.is_heavy
    }
}

/// An in-progress attack: descriptor, timing and the targets already hit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swing {
    kind: AttackKind,
    descriptor: AttackDescriptor,
    elapsed: f32,
    active_start: f32,
    active_end: f32,
    reach: f32,
    half_arc: f32,
    hits: ArrayVec<ActorId, MAX_TARGETS_PER_SWING>,
}

impl Swing {
    /// Starts a swing; damage and poise damage are scaled by `multiplier`.
    pub fn from_profile(kind: AttackKind, profile: &AttackProfile, multiplier: f32) -> Self {
        Self {
            kind,
            descriptor: AttackDescriptor::new(
                profile.damage * multiplier,
                profile.poise_damage * multiplier,
                profile.is_heavy,
            ),
            elapsed: 0.0,
            active_start: profile.active_start,
            active_end: profile.active_end,
            reach: profile.reach,
            half_arc: profile.arc_degrees.to_radians() * 0.5,
            hits: ArrayVec::new(),
        }
    }

    pub fn kind(&self) -> AttackKind {
        self.kind
    }

    pub fn descriptor(&self) -> &AttackDescriptor {
        &self.descriptor
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn reach(&self) -> f32 {
        self.reach
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Hit detection is live during `[active_start, active_end)`.
    pub fn is_active(&self) -> bool {
        self.elapsed >= self.active_start && self.elapsed < self.active_end
    }

    pub fn has_hit(&self, target: ActorId) -> bool {
        self.hits.contains(&target)
    }

    /// Records `target` as hit. Returns `false` if it was already hit this
    /// swing or the registry is full.
    pub fn register_hit(&mut self, target: ActorId) -> bool {
        if self.has_hit(target) {
            return false;
        }
        self.hits.try_push(target).is_ok()
    }

    /// Whether `target` lies inside the swing's cone on the ground plane.
    pub fn covers(&self, origin: Vec2, facing: f32, target: Vec2, target_radius: f32) -> bool {
        let offset = target - origin;
        let distance = offset.length();
        if distance > self.reach + target_radius {
            return false;
        }
        if distance < DIRECTION_EPSILON {
            return true;
        }
        let forward = forward_from_yaw(facing);
        let cos = forward.dot(offset / distance).clamp(-1.0, 1.0);
        cos.acos() <= self.half_arc
    }
}
