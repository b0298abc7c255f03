//! Boss controller: commands in, transitions and events out.
//!
//! The boss has no stamina and a reduced transition table. Stagger is a flag
//! that freezes its decisions without replacing its locomotion state, so a
//! staggered boss keeps falling under gravity.

use glam::Vec2;

use super::Actor;
use crate::combat::AttackKind;
use crate::config::BossConfig;
use crate::env::GroundContact;
use crate::error::{ConfigError, Rejection};
use crate::event::CombatEvent;
use crate::math::{DIRECTION_EPSILON, yaw_from_direction};
use crate::state::{ActorId, ActorState, Trigger};

/// What the boss should try to do this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BossCommand {
    /// Stand still.
    #[default]
    Hold,
    /// Walk along a planar direction.
    Chase(Vec2),
    /// Start a swing facing `toward`.
    Attack { kind: AttackKind, toward: Vec2 },
}

#[derive(Clone, Debug)]
pub struct BossController {
    actor: Actor,
    engage_range: f32,
}

impl BossController {
    pub fn new(id: ActorId, config: &BossConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            actor: Actor::boss(id, config)?,
            engage_range: config.engage_range,
        })
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    pub fn engage_range(&self) -> f32 {
        self.engage_range
    }

    pub fn current_phase(&self) -> u8 {
        self.actor.current_phase().unwrap_or(1)
    }

    /// Starts a swing facing `toward`. Returns whether it started.
    pub fn attack(&mut self, kind: AttackKind, toward: Vec2) -> bool {
        let trigger = match kind {
            AttackKind::Light => Trigger::LightAttack,
            AttackKind::Heavy => Trigger::HeavyAttack,
        };
        let accepted = self.request(trigger).is_ok();
        if accepted && toward.length() > DIRECTION_EPSILON {
            self.actor.facing = yaw_from_direction(toward);
        }
        accepted
    }

    pub fn request(&mut self, trigger: Trigger) -> Result<ActorState, Rejection> {
        self.actor.fire(trigger).map(|t| t.to)
    }

    /// Advances the boss by one fixed step and returns the events it produced.
    pub fn tick(&mut self, dt: f32, command: BossCommand, ground: GroundContact) -> Vec<CombatEvent> {
        if self.actor.is_dead() {
            self.actor.settle(ground, dt);
            return self.actor.drain_events();
        }
        let before = self.actor.observe();

        let expired = self.actor.advance_timers(dt);
        self.actor.handle_expired(expired);
        self.actor.apply_ground(ground);

        let mut steer = Vec2::ZERO;
        match command {
            BossCommand::Hold => {
                let _ = self.actor.fire(Trigger::Halt);
            }
            BossCommand::Chase(direction) if direction.length() > DIRECTION_EPSILON => {
                let _ = self.actor.fire(Trigger::Move);
                if self.actor.state() == ActorState::Moving {
                    steer = direction.normalize();
                }
            }
            BossCommand::Chase(_) => {
                let _ = self.actor.fire(Trigger::Halt);
            }
            BossCommand::Attack { kind, toward } => {
                self.attack(kind, toward);
            }
        }

        self.actor.regenerate(dt);
        self.actor.integrate_velocity(steer, dt);

        self.actor.emit_changes(&before);
        self.actor.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.0625;

    fn controller() -> BossController {
        BossController::new(ActorId::BOSS, &BossConfig::default()).unwrap()
    }

    fn step(boss: &mut BossController, command: BossCommand) -> Vec<CombatEvent> {
        boss.tick(DT, command, GroundContact::GROUNDED)
    }

    #[test]
    fn chase_walks_and_faces_target() {
        let mut boss = controller();
        step(&mut boss, BossCommand::Chase(Vec2::new(1.0, 0.0)));
        assert_eq!(boss.actor().state(), ActorState::Moving);
        assert!(boss.actor().velocity().x > 0.0);
        assert!((boss.actor().forward() - Vec2::X).length() < 1e-5);

        step(&mut boss, BossCommand::Hold);
        assert_eq!(boss.actor().state(), ActorState::Idle);
    }

    #[test]
    fn swing_runs_its_duration_then_cools_down() {
        let mut boss = controller();
        let swing = BossCommand::Attack {
            kind: AttackKind::Light,
            toward: Vec2::new(0.0, 1.0),
        };
        step(&mut boss, swing);
        assert_eq!(boss.actor().state(), ActorState::LightAttack);
        assert!((boss.actor().forward() - Vec2::Y).length() < 1e-5);

        // 1.0s light swing.
        for _ in 0..16 {
            step(&mut boss, BossCommand::Hold);
        }
        assert_eq!(boss.actor().state(), ActorState::Idle);
        assert!(!boss.attack(AttackKind::Light, Vec2::Y));

        // 1.5s cooldown.
        for _ in 0..24 {
            step(&mut boss, BossCommand::Hold);
        }
        assert!(boss.attack(AttackKind::Heavy, Vec2::Y));
    }

    #[test]
    fn stagger_blocks_attacks_then_recovers_half_poise() {
        let mut boss = controller();
        boss.actor_mut().poise.deplete(100.0);
        boss.request(Trigger::PoiseBroken).unwrap();
        assert!(boss.actor().is_staggered());
        assert_eq!(boss.actor().state(), ActorState::Idle);
        assert!(!boss.attack(AttackKind::Heavy, Vec2::Y));

        // 3.0s stagger, no poise regen meanwhile.
        let mut events = Vec::new();
        for _ in 0..47 {
            events.extend(step(&mut boss, BossCommand::Chase(Vec2::X)));
            assert_eq!(boss.actor().poise().current(), 0.0);
        }
        assert!(boss.actor().is_staggered());
        assert_eq!(boss.actor().state(), ActorState::Idle);

        events.extend(step(&mut boss, BossCommand::Hold));
        assert!(!boss.actor().is_staggered());
        assert!(events.contains(&CombatEvent::StaggerRecovered));
        assert!(boss.actor().poise().current() >= 50.0);
    }

    #[test]
    fn staggered_boss_keeps_falling() {
        let mut boss = controller();
        boss.tick(DT, BossCommand::Hold, GroundContact::AIRBORNE);
        assert_eq!(boss.actor().state(), ActorState::Falling);

        boss.request(Trigger::PoiseBroken).unwrap();
        assert_eq!(boss.actor().state(), ActorState::Falling);
        assert!(boss.actor().is_staggered());

        boss.tick(DT, BossCommand::Hold, GroundContact::AIRBORNE);
        assert!(boss.actor().velocity().y < 0.0);

        step(&mut boss, BossCommand::Hold);
        assert_eq!(boss.actor().state(), ActorState::Idle);
        assert!(boss.actor().is_staggered());
    }
}
