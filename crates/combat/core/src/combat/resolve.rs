//! Hit resolution.

use super::swing::AttackDescriptor;
use crate::actor::Actor;
use crate::event::CombatEvent;
use crate::state::Trigger;

/// Damage floor after defense. Hits are never fully negated.
pub const MIN_DAMAGE: f32 = 1.0;

/// How a resolution ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitKind {
    /// Damage was applied.
    Landed,
    /// The defender was invulnerable; nothing changed.
    Evaded,
    /// The defender was already dead; nothing changed.
    DefenderDead,
}

/// Result of [`resolve_hit`], for damage numbers and VFX.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitOutcome {
    pub kind: HitKind,
    /// Damage applied after defense (0 unless `Landed`).
    pub damage: f32,
    pub health_after: f32,
    pub poise_after: f32,
    pub triggered_stagger: bool,
    pub triggered_death: bool,
    /// Phase entered because of this hit.
    pub phase_changed: Option<u8>,
}

impl HitOutcome {
    fn unchanged(kind: HitKind, defender: &Actor) -> Self {
        Self {
            kind,
            damage: 0.0,
            health_after: defender.health().current(),
            poise_after: defender.poise().current(),
            triggered_stagger: false,
            triggered_death: false,
            phase_changed: None,
        }
    }

    pub fn landed(&self) -> bool {
        self.kind == HitKind::Landed
    }
}

/// Applies one hit to `defender`.
///
/// `actual = max(1, damage - defense)` comes off health, `poise_damage` off
/// poise, both clamped at zero. Health reaching zero kills the defender and
/// takes priority over stagger; otherwise poise reaching zero staggers it
/// unless it is already staggered. Phase thresholds are checked for survivors.
///
/// Every call applies damage again. Callers must ensure at most one
/// resolution per swing per target (see [`crate::combat::Swing::register_hit`]).
pub fn resolve_hit(attack: &AttackDescriptor, defender: &mut Actor) -> HitOutcome {
    if defender.is_dead() {
        return HitOutcome::unchanged(HitKind::DefenderDead, defender);
    }
    if defender.is_invulnerable() {
        return HitOutcome::unchanged(HitKind::Evaded, defender);
    }

    let before = defender.observe();
    let damage = (attack.damage() - defender.defense()).max(MIN_DAMAGE);

    defender.health.deplete(damage);
    defender.poise.deplete(attack.poise_damage());
    if let Some(stamina) = defender.stamina.as_mut() {
        stamina.interrupt_regen();
    }
    defender
        .timers
        .hit_flash
        .start(defender.config.hit_flash_duration);
    defender.outbox.push(CombatEvent::Damaged {
        amount: damage,
        current_hp: defender.health.current(),
        max_hp: defender.health.max(),
    });

    let mut triggered_stagger = false;
    let mut triggered_death = false;
    let mut phase_changed = None;

    if defender.health.is_empty() {
        triggered_death = defender.fire(Trigger::HealthDepleted).is_ok();
    } else {
        if defender.poise.is_empty() {
            triggered_stagger = defender.fire(Trigger::PoiseBroken).is_ok();
        }
        let fraction = defender.health.fraction();
        if let Some(phase) = defender.phases.as_mut().and_then(|p| p.check_phase(fraction)) {
            defender.outbox.push(CombatEvent::PhaseChanged { phase });
            phase_changed = Some(phase);
        }
    }

    defender.emit_changes(&before);

    HitOutcome {
        kind: HitKind::Landed,
        damage,
        health_after: defender.health.current(),
        poise_after: defender.poise.current(),
        triggered_stagger,
        triggered_death,
        phase_changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ActorConfig, BossConfig, PlayerConfig};
    use crate::resource::PoolConfig;
    use crate::state::{ActorId, ActorState};

    fn boss_with_defense(defense: f32) -> Actor {
        let config = BossConfig {
            actor: ActorConfig {
                health: PoolConfig::fixed(500.0),
                poise: PoolConfig::new(100.0, 10.0, 0.0),
                defense,
                ..ActorConfig::boss()
            },
            ..BossConfig::default()
        };
        Actor::boss(ActorId::BOSS, &config).unwrap()
    }

    const HEAVY: AttackDescriptor = AttackDescriptor::new(40.0, 30.0, true);

    #[test]
    fn four_heavy_hits_stagger_on_the_fourth() {
        let mut boss = boss_with_defense(5.0);
        let mut health = Vec::new();
        let mut poise = Vec::new();
        let mut staggers = Vec::new();

        for _ in 0..4 {
            let outcome = resolve_hit(&HEAVY, &mut boss);
            health.push(outcome.health_after);
            poise.push(outcome.poise_after);
            staggers.push(outcome.triggered_stagger);
        }

        assert_eq!(health, vec![465.0, 430.0, 395.0, 360.0]);
        assert_eq!(poise, vec![70.0, 40.0, 10.0, 0.0]);
        assert_eq!(staggers, vec![false, false, false, true]);
        assert!(boss.is_staggered());
    }

    #[test]
    fn damage_never_drops_below_one() {
        let mut boss = boss_with_defense(10.0);
        let outcome = resolve_hit(&AttackDescriptor::new(3.0, 0.0, false), &mut boss);
        assert_eq!(outcome.damage, 1.0);
        assert_eq!(outcome.health_after, 499.0);
    }

    #[test]
    fn poise_damage_while_staggered_does_not_restagger() {
        let mut boss = boss_with_defense(5.0);
        for _ in 0..4 {
            resolve_hit(&HEAVY, &mut boss);
        }
        boss.drain_events();

        let outcome = resolve_hit(&HEAVY, &mut boss);
        assert!(!outcome.triggered_stagger);
        assert!(!boss.drain_events().contains(&CombatEvent::Staggered));
    }

    #[test]
    fn death_is_terminal() {
        let mut boss = boss_with_defense(0.0);
        let outcome = resolve_hit(&AttackDescriptor::new(1000.0, 0.0, true), &mut boss);
        assert!(outcome.triggered_death);
        assert!(!outcome.triggered_stagger);
        assert_eq!(boss.state(), ActorState::Dead);

        let frozen = boss.snapshot();
        let again = resolve_hit(&HEAVY, &mut boss);
        assert_eq!(again.kind, HitKind::DefenderDead);
        boss.health.restore(100.0);
        assert!(!boss.poise.spend(1.0));
        assert_eq!(boss.snapshot(), frozen);
    }

    #[test]
    fn death_outranks_stagger() {
        let mut boss = boss_with_defense(0.0);
        let outcome = resolve_hit(&AttackDescriptor::new(500.0, 100.0, true), &mut boss);
        assert!(outcome.triggered_death);
        assert!(!outcome.triggered_stagger);
        assert!(!boss.is_staggered());
    }

    #[test]
    fn hits_cross_phase_thresholds() {
        let mut boss = boss_with_defense(0.0);
        let big = AttackDescriptor::new(100.0, 0.0, true);
        let phases: Vec<_> = (0..4).map(|_| resolve_hit(&big, &mut boss).phase_changed).collect();
        // 400, 300 (= 60%), 200, 100 (< 30%)
        assert_eq!(phases, vec![None, Some(2), None, Some(3)]);
    }

    #[test]
    fn events_follow_the_hit() {
        let mut boss = boss_with_defense(5.0);
        resolve_hit(&HEAVY, &mut boss);
        let events = boss.drain_events();
        assert_eq!(
            events,
            vec![
                CombatEvent::Damaged {
                    amount: 35.0,
                    current_hp: 465.0,
                    max_hp: 500.0
                },
                CombatEvent::HealthChanged {
                    current: 465.0,
                    max: 500.0
                },
            ]
        );
        assert!(boss.is_flashing());
    }

    #[test]
    fn invulnerable_defender_evades() {
        let mut player = Actor::player(ActorId::PLAYER, &PlayerConfig::default()).unwrap();
        player.fire(Trigger::Dodge).unwrap();
        let outcome = resolve_hit(&HEAVY, &mut player);
        assert_eq!(outcome.kind, HitKind::Evaded);
        assert!(player.health().is_full());
    }

    #[test]
    fn hit_pauses_stamina_regen() {
        let mut player = Actor::player(ActorId::PLAYER, &PlayerConfig::default()).unwrap();
        resolve_hit(&AttackDescriptor::new(10.0, 0.0, false), &mut player);
        assert_eq!(player.stamina().unwrap().regen_delay_remaining(), 1.0);
    }
}
