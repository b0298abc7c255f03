//! Input intents consumed by the controllers.
//!
//! Controllers read an [`InputIntentSource`] once per tick: a clamped
//! movement vector, a camera vector, and edge (`pressed`) and level (`held`)
//! state for a fixed action vocabulary. [`IntentSnapshot`] is the plain-data
//! implementation; [`BoundInputSource`] builds snapshots from raw device
//! state through an [`InputBindings`] table.

mod bindings;

pub use bindings::{AxisBindings, BoundInputSource, InputBindings, PhysicalInput, RawInputState};

use bitflags::bitflags;
use glam::Vec2;

use crate::math::clamp_intent;

/// The fixed action vocabulary.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumCount,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum InputAction {
    Jump,
    Dodge,
    Sprint,
    LightAttack,
    HeavyAttack,
    Parry,
    TargetLock,
    PauseMenu,
}

impl InputAction {
    pub const fn flag(self) -> ActionSet {
        match self {
            Self::Jump => ActionSet::JUMP,
            Self::Dodge => ActionSet::DODGE,
            Self::Sprint => ActionSet::SPRINT,
            Self::LightAttack => ActionSet::LIGHT_ATTACK,
            Self::HeavyAttack => ActionSet::HEAVY_ATTACK,
            Self::Parry => ActionSet::PARRY,
            Self::TargetLock => ActionSet::TARGET_LOCK,
            Self::PauseMenu => ActionSet::PAUSE_MENU,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

bitflags! {
    /// A set of [`InputAction`]s.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ActionSet: u8 {
        const JUMP         = 1 << 0;
        const DODGE        = 1 << 1;
        const SPRINT       = 1 << 2;
        const LIGHT_ATTACK = 1 << 3;
        const HEAVY_ATTACK = 1 << 4;
        const PARRY        = 1 << 5;
        const TARGET_LOCK  = 1 << 6;
        const PAUSE_MENU   = 1 << 7;
    }
}

/// Per-tick input as seen by a controller.
pub trait InputIntentSource {
    /// Movement intent; each axis in `[-1, 1]`, magnitude at most 1.
    fn movement_vector(&self) -> Vec2;

    /// Look input (x = yaw rate, y = pitch rate) in `[-1, 1]`.
    fn camera_vector(&self) -> Vec2;

    /// True only on the tick the action went down.
    fn action_pressed(&self, action: InputAction) -> bool;

    /// True on every tick the action is down.
    fn action_held(&self, action: InputAction) -> bool;

    /// Copies the current intent into a plain snapshot.
    fn snapshot(&self) -> IntentSnapshot {
        let mut snapshot = IntentSnapshot {
            movement: self.movement_vector(),
            camera: self.camera_vector(),
            ..IntentSnapshot::NEUTRAL
        };
        for action in <InputAction as strum::IntoEnumIterator>::iter() {
            snapshot.pressed.set(action.flag(), self.action_pressed(action));
            snapshot.held.set(action.flag(), self.action_held(action));
        }
        snapshot
    }
}

/// Plain-data intent for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntentSnapshot {
    pub movement: Vec2,
    pub camera: Vec2,
    pub pressed: ActionSet,
    pub held: ActionSet,
}

impl IntentSnapshot {
    /// No movement, no actions.
    pub const NEUTRAL: Self = Self {
        movement: Vec2::ZERO,
        camera: Vec2::ZERO,
        pressed: ActionSet::empty(),
        held: ActionSet::empty(),
    };

    pub fn moving(movement: Vec2) -> Self {
        Self {
            movement,
            ..Self::NEUTRAL
        }
    }

    /// Marks `action` as pressed this tick (and therefore held).
    pub fn press(mut self, action: InputAction) -> Self {
        self.pressed |= action.flag();
        self.held |= action.flag();
        self
    }

    pub fn hold(mut self, action: InputAction) -> Self {
        self.held |= action.flag();
        self
    }

    pub fn look(mut self, camera: Vec2) -> Self {
        self.camera = camera;
        self
    }
}

impl InputIntentSource for IntentSnapshot {
    fn movement_vector(&self) -> Vec2 {
        clamp_intent(self.movement)
    }

    fn camera_vector(&self) -> Vec2 {
        if self.camera.is_finite() {
            self.camera.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
        } else {
            Vec2::ZERO
        }
    }

    fn action_pressed(&self, action: InputAction) -> bool {
        self.pressed.contains(action.flag())
    }

    fn action_held(&self, action: InputAction) -> bool {
        self.held.contains(action.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn action_names_are_snake_case() {
        assert_eq!(InputAction::LightAttack.as_str(), "light_attack");
        assert_eq!(InputAction::from_str("pause_menu"), Ok(InputAction::PauseMenu));
        assert!(InputAction::from_str("riposte").is_err());
    }

    #[test]
    fn snapshot_clamps_movement() {
        let intent = IntentSnapshot::moving(Vec2::new(2.0, 2.0));
        assert!((intent.movement_vector().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn pressed_implies_held() {
        let intent = IntentSnapshot::NEUTRAL.press(InputAction::Dodge).hold(InputAction::Sprint);
        assert!(intent.action_pressed(InputAction::Dodge));
        assert!(intent.action_held(InputAction::Dodge));
        assert!(intent.action_held(InputAction::Sprint));
        assert!(!intent.action_pressed(InputAction::Sprint));
    }

    #[test]
    fn default_snapshot_round_trips_through_trait() {
        let intent = IntentSnapshot::moving(Vec2::new(0.0, 1.0))
            .press(InputAction::Jump)
            .look(Vec2::new(0.5, 0.0));
        assert_eq!(intent.snapshot(), intent);
    }
}
