//! Scripted player input.
//!
//! Scripts produce raw device frames, which go through the same bindings
//! and edge detection as real input.

use glam::Vec2;

use combat_core::{ActorId, InputAction, InputBindings, RawInputState};
use runtime::Arena;

/// Distance at which the duel script stops closing in and starts swinging.
const STRIKE_DISTANCE: f32 = 1.8;

/// Frames between two scripted button presses.
const PRESS_INTERVAL: u32 = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScriptKind {
    /// Stand still and take it.
    Idle,
    /// Close in, swing light attacks, dodge boss windups.
    Duel,
}

impl ScriptKind {
    pub fn build(self, bindings: InputBindings) -> Box<dyn Script> {
        match self {
            Self::Idle => Box::new(IdleScript),
            Self::Duel => Box::new(DuelScript::new(bindings)),
        }
    }
}

pub trait Script {
    fn frame(&mut self, arena: &Arena) -> RawInputState;
}

pub struct IdleScript;

impl Script for IdleScript {
    fn frame(&mut self, _arena: &Arena) -> RawInputState {
        RawInputState::default()
    }
}

pub struct DuelScript {
    bindings: InputBindings,
    cooldown: u32,
}

impl DuelScript {
    pub fn new(bindings: InputBindings) -> Self {
        Self {
            bindings,
            cooldown: 0,
        }
    }

    fn press(&self, raw: &mut RawInputState, action: InputAction) {
        if let Some(input) = self.bindings.inputs_for(action).first() {
            raw.down.insert(input.clone());
        }
    }
}

impl Script for DuelScript {
    fn frame(&mut self, arena: &Arena) -> RawInputState {
        let mut raw = RawInputState::default();
        let player = arena.player();
        let actor = player.actor();
        if arena.is_over() || actor.is_dead() {
            return raw;
        }
        self.cooldown = self.cooldown.saturating_sub(1);

        let to_boss = arena.boss_body().planar() - arena.player_body().planar();
        let stamina = actor.stamina().map_or(0.0, |pool| pool.current());
        let light_cost = actor.config().light_attack.stamina_cost;
        let dodge_cost = player.rules().dodge.stamina_cost;
        let boss = arena.boss().actor();

        let windup = boss.swing().is_some_and(|swing| {
            !swing.is_active()
                && !swing.has_hit(ActorId::PLAYER)
                && (0.25..0.5).contains(&swing.elapsed())
        });

        if windup && self.cooldown == 0 && stamina >= dodge_cost {
            raw.stick = stick_toward(-to_boss, player.camera_yaw());
            self.press(&mut raw, InputAction::Dodge);
            self.cooldown = PRESS_INTERVAL;
        } else if to_boss.length() > STRIKE_DISTANCE {
            raw.stick = stick_toward(to_boss, player.camera_yaw());
        } else if self.cooldown == 0
            && !actor.state().is_busy()
            && stamina >= light_cost
        {
            self.press(&mut raw, InputAction::LightAttack);
            self.cooldown = PRESS_INTERVAL;
        }
        raw
    }
}

/// Stick deflection that moves along the world direction `direction` for a
/// camera at `camera_yaw`.
pub fn stick_toward(direction: Vec2, camera_yaw: f32) -> Vec2 {
    let (sin, cos) = camera_yaw.sin_cos();
    let right = Vec2::new(cos, -sin);
    let forward = Vec2::new(-sin, -cos);
    let direction = direction.normalize_or_zero();
    Vec2::new(direction.dot(right), direction.dot(forward))
}
