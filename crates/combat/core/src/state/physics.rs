//! Per-state horizontal velocity policy.
//!
//! Each [`ActorState`] owns one [`VelocityRule`] in a [`PhysicsTable`]. The
//! table is plain data built from [`MovementTuning`], so deceleration
//! strength per state can be inspected and tested without running a tick.

use glam::Vec2;
use strum::EnumCount;

use super::ActorState;
use crate::error::ConfigError;
use crate::math::move_towards;
use crate::resource::{require_non_negative, require_positive};

/// How a state steers horizontal velocity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VelocityMode {
    /// Decelerate toward zero.
    Stop,
    /// Accelerate toward `intent direction × speed`.
    Steer,
    /// Velocity is pinned to `locked direction × speed` (dodge roll).
    Lunge,
    /// Limited air control toward `intent direction × speed`.
    Drift,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityRule {
    pub mode: VelocityMode,
    /// Target speed in units/s (ignored by `Stop`).
    pub speed: f32,
    /// Acceleration toward the target in units/s².
    pub rate: f32,
}

impl VelocityRule {
    pub const fn stop(rate: f32) -> Self {
        Self {
            mode: VelocityMode::Stop,
            speed: 0.0,
            rate,
        }
    }

    pub const fn steer(speed: f32, rate: f32) -> Self {
        Self {
            mode: VelocityMode::Steer,
            speed,
            rate,
        }
    }

    pub const fn lunge(speed: f32) -> Self {
        Self {
            mode: VelocityMode::Lunge,
            speed,
            rate: 0.0,
        }
    }

    pub const fn drift(speed: f32, rate: f32) -> Self {
        Self {
            mode: VelocityMode::Drift,
            speed,
            rate,
        }
    }

    /// Applies the rule for one step.
    ///
    /// `steer` is the (unit or zero) intent direction, `locked` the direction
    /// captured when a lunge started.
    pub fn apply(&self, velocity: Vec2, steer: Vec2, locked: Vec2, dt: f32) -> Vec2 {
        match self.mode {
            VelocityMode::Stop => move_towards(velocity, Vec2::ZERO, self.rate * dt),
            VelocityMode::Steer | VelocityMode::Drift => {
                move_towards(velocity, steer * self.speed, self.rate * dt)
            }
            VelocityMode::Lunge => locked * self.speed,
        }
    }
}

/// Movement speeds and friction values for one actor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementTuning {
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub dodge_speed: f32,
    pub acceleration: f32,
    /// Deceleration while idle, stunned or dead.
    pub friction: f32,
    /// Deceleration while coming out of a sprint.
    pub stop_friction: f32,
    /// Deceleration while attacking or parrying.
    pub attack_friction: f32,
    pub air_control: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            walk_speed: 4.0,
            sprint_speed: 7.0,
            dodge_speed: 9.0,
            acceleration: 40.0,
            friction: 30.0,
            stop_friction: 18.0,
            attack_friction: 60.0,
            air_control: 8.0,
            gravity: 20.0,
            jump_velocity: 7.0,
        }
    }
}

impl MovementTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("movement.walk_speed", self.walk_speed)?;
        require_positive("movement.sprint_speed", self.sprint_speed)?;
        require_non_negative("movement.dodge_speed", self.dodge_speed)?;
        require_positive("movement.acceleration", self.acceleration)?;
        require_positive("movement.friction", self.friction)?;
        require_positive("movement.stop_friction", self.stop_friction)?;
        require_positive("movement.attack_friction", self.attack_friction)?;
        require_non_negative("movement.air_control", self.air_control)?;
        require_non_negative("movement.gravity", self.gravity)?;
        require_non_negative("movement.jump_velocity", self.jump_velocity)
    }
}

/// Velocity rules indexed by [`ActorState`].
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsTable {
    rules: [VelocityRule; ActorState::COUNT],
}

impl PhysicsTable {
    pub fn from_tuning(tuning: &MovementTuning) -> Self {
        let rule_for = |state: ActorState| match state {
            ActorState::Idle | ActorState::Stunned | ActorState::Dead => {
                VelocityRule::stop(tuning.friction)
            }
            ActorState::Moving => VelocityRule::steer(tuning.walk_speed, tuning.acceleration),
            ActorState::Sprinting => VelocityRule::steer(tuning.sprint_speed, tuning.acceleration),
            ActorState::Stopping => VelocityRule::stop(tuning.stop_friction),
            ActorState::Jumping | ActorState::Falling => {
                VelocityRule::drift(tuning.walk_speed, tuning.air_control)
            }
            ActorState::Dodging => VelocityRule::lunge(tuning.dodge_speed),
            ActorState::LightAttack | ActorState::HeavyAttack | ActorState::Parrying => {
                VelocityRule::stop(tuning.attack_friction)
            }
        };

        let mut rules = [VelocityRule::stop(tuning.friction); ActorState::COUNT];
        for state in <ActorState as strum::IntoEnumIterator>::iter() {
            rules[state.index()] = rule_for(state);
        }
        Self { rules }
    }

    pub fn rule(&self, state: ActorState) -> VelocityRule {
        self.rules[state.index()]
    }

    /// Replaces a single rule, e.g. for a heavier enemy variant.
    pub fn with_rule(mut self, state: ActorState, rule: VelocityRule) -> Self {
        self.rules[state.index()] = rule;
        self
    }
}

impl Default for PhysicsTable {
    fn default() -> Self {
        Self::from_tuning(&MovementTuning::default())
    }
}
