//! Actor locomotion/combat states and the transition machinery around them.
//!
//! - [`ActorState`] is the tagged state shared by player and boss.
//! - [`transition`] holds the pure transition function and its trigger/guard types.
//! - [`physics`] holds the per-state velocity policy table.
mod physics;
mod transition;

pub use physics::{MovementTuning, PhysicsTable, VelocityMode, VelocityRule};
pub use transition::{Effects, Guards, Transition, Trigger, next_state};

use core::fmt;

/// Identifier for an actor in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl ActorId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Reserved identifier for the arena boss.
    pub const BOSS: Self = Self(1);
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which transition profile an actor follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActorKind {
    /// Full locomotion + combat table, stamina, stagger as the STUNNED state.
    Player,
    /// Reduced table; stagger is a flag orthogonal to the locomotion state.
    Boss,
}

/// Locomotion + combat state of an actor.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::EnumCount,
    strum::EnumIter,
    strum::IntoStaticStr,
    strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorState {
    #[default]
    Idle,
    Moving,
    Sprinting,
    Stopping,
    Jumping,
    Falling,
    Dodging,
    LightAttack,
    HeavyAttack,
    Parrying,
    Stunned,
    Dead,
}

impl ActorState {
    /// Busy states reject new discretionary actions until they complete.
    pub const fn is_busy(self) -> bool {
        matches!(
            self,
            Self::Stopping
                | Self::Dodging
                | Self::LightAttack
                | Self::HeavyAttack
                | Self::Parrying
                | Self::Stunned
                | Self::Dead
        )
    }

    /// States from which a grounded action (jump) can start.
    pub const fn is_grounded_locomotion(self) -> bool {
        matches!(self, Self::Idle | Self::Moving | Self::Sprinting)
    }

    pub const fn is_attacking(self) -> bool {
        matches!(self, Self::LightAttack | Self::HeavyAttack)
    }

    pub const fn is_airborne(self) -> bool {
        matches!(self, Self::Jumping | Self::Falling)
    }

    /// Dense index for per-state tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
