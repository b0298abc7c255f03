//! Boss decision making.
//!
//! Arena users plug in a [`BossProvider`] so the boss can run a scripted
//! pattern, a test fixture, or a smarter policy.

use glam::Vec2;

use combat_core::math::DIRECTION_EPSILON;
use combat_core::{Actor, AttackKind, BossCommand};

use crate::kinematics::Body;

/// Read-only view of the encounter handed to a [`BossProvider`].
#[derive(Clone, Copy, Debug)]
pub struct EncounterView<'a> {
    pub tick: u64,
    pub boss: &'a Actor,
    pub boss_body: &'a Body,
    pub player: &'a Actor,
    pub player_body: &'a Body,
}

impl EncounterView<'_> {
    /// Planar offset from the boss to the player.
    pub fn to_player(&self) -> Vec2 {
        self.player_body.planar() - self.boss_body.planar()
    }

    pub fn distance(&self) -> f32 {
        self.boss_body.distance_to(self.player_body)
    }
}

/// Trait for choosing the boss command each step.
pub trait BossProvider {
    fn decide(&mut self, view: &EncounterView<'_>) -> BossCommand;
}

/// A boss that never moves or attacks.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stationary;

impl BossProvider for Stationary {
    fn decide(&mut self, _view: &EncounterView<'_>) -> BossCommand {
        BossCommand::Hold
    }
}

/// Deterministic chase-and-swing behaviour.
///
/// Chases until the player is within the boss's engage range, then swings
/// whenever the attack cooldown allows, cycling through the attack pattern of
/// the current phase. Holds while staggered, mid-swing, or once the player
/// is dead.
#[derive(Clone, Debug)]
pub struct BossBrain {
    engage_range: f32,
    /// Attack pattern per phase, starting at phase 1. Later phases reuse the
    /// last pattern.
    patterns: Vec<Vec<AttackKind>>,
    cursor: usize,
    phase: u8,
}

impl BossBrain {
    pub fn new(engage_range: f32) -> Self {
        use AttackKind::{Heavy, Light};

        Self {
            engage_range,
            patterns: vec![
                vec![Light, Light, Heavy],
                vec![Light, Heavy],
                vec![Heavy, Light, Heavy],
            ],
            cursor: 0,
            phase: 1,
        }
    }

    /// Replaces the pattern used in `phase` (1-based). Empty patterns are ignored.
    pub fn with_pattern(mut self, phase: u8, pattern: Vec<AttackKind>) -> Self {
        if pattern.is_empty() {
            return self;
        }
        let index = usize::from(phase.max(1) - 1);
        while self.patterns.len() <= index {
            let last = self.patterns.last().cloned().unwrap_or_else(|| pattern.clone());
            self.patterns.push(last);
        }
        self.patterns[index] = pattern;
        self
    }

    pub fn engage_range(&self) -> f32 {
        self.engage_range
    }

    fn pattern(&self, phase: u8) -> &[AttackKind] {
        let index = usize::from(phase.max(1) - 1).min(self.patterns.len().saturating_sub(1));
        self.patterns.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    fn next_attack(&mut self, phase: u8) -> AttackKind {
        if phase != self.phase {
            self.phase = phase;
            self.cursor = 0;
        }
        let pattern = self.pattern(phase);
        let Some(&kind) = pattern.get(self.cursor % pattern.len().max(1)) else {
            return AttackKind::Light;
        };
        self.cursor = self.cursor.wrapping_add(1);
        kind
    }
}

impl Default for BossBrain {
    fn default() -> Self {
        Self::new(combat_core::BossConfig::default().engage_range)
    }
}

impl BossProvider for BossBrain {
    fn decide(&mut self, view: &EncounterView<'_>) -> BossCommand {
        let boss = view.boss;
        if view.player.is_dead() || boss.is_dead() || boss.is_staggered() || boss.state().is_busy() {
            return BossCommand::Hold;
        }

        let toward = view.to_player();
        if view.distance() > self.engage_range {
            return if toward.length() > DIRECTION_EPSILON {
                BossCommand::Chase(toward)
            } else {
                BossCommand::Hold
            };
        }

        if boss.timers().attack_cooldown.is_running() || !boss.on_floor() {
            return BossCommand::Hold;
        }
        let kind = self.next_attack(boss.current_phase().unwrap_or(1));
        BossCommand::Attack { kind, toward }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ActorId, BossConfig, PlayerConfig};
    use glam::Vec3;

    fn actors() -> (Actor, Actor) {
        (
            Actor::boss(ActorId::BOSS, &BossConfig::default()).unwrap(),
            Actor::player(ActorId::PLAYER, &PlayerConfig::default()).unwrap(),
        )
    }

    fn decide(brain: &mut BossBrain, boss: &Actor, player: &Actor, distance: f32) -> BossCommand {
        let boss_body = Body::new(Vec3::ZERO, 0.5);
        let player_body = Body::new(Vec3::new(0.0, 0.0, distance), 0.5);
        brain.decide(&EncounterView {
            tick: 0,
            boss,
            boss_body: &boss_body,
            player,
            player_body: &player_body,
        })
    }

    #[test]
    fn chases_then_swings_in_pattern_order() {
        let (boss, player) = actors();
        let mut brain = BossBrain::new(2.5);

        assert_eq!(
            decide(&mut brain, &boss, &player, 8.0),
            BossCommand::Chase(Vec2::new(0.0, 8.0))
        );

        let kinds: Vec<_> = (0..4)
            .map(|_| match decide(&mut brain, &boss, &player, 2.0) {
                BossCommand::Attack { kind, .. } => kind,
                other => panic!("expected attack, got {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![AttackKind::Light, AttackKind::Light, AttackKind::Heavy, AttackKind::Light]
        );
    }

    #[test]
    fn custom_pattern_replaces_phase_one() {
        let (boss, player) = actors();
        let mut brain = BossBrain::new(2.5).with_pattern(1, vec![AttackKind::Heavy]);
        assert!(matches!(
            decide(&mut brain, &boss, &player, 1.0),
            BossCommand::Attack {
                kind: AttackKind::Heavy,
                ..
            }
        ));
    }

    #[test]
    fn holds_once_the_player_is_dead() {
        let (boss, _) = actors();
        let mut config = PlayerConfig::default();
        config.actor.defense = 0.0;
        let mut player = Actor::player(ActorId::PLAYER, &config).unwrap();
        combat_core::resolve_hit(&combat_core::AttackDescriptor::new(1000.0, 0.0, true), &mut player);
        assert!(player.is_dead());

        let mut brain = BossBrain::new(2.5);
        assert_eq!(decide(&mut brain, &boss, &player, 1.0), BossCommand::Hold);
    }
}
