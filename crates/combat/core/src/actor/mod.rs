//! Actor state shared by the player and the boss.
//!
//! An [`Actor`] owns its pools, timers, locomotion state and event outbox.
//! It applies [`Transition`]s produced by [`next_state`]: the table decides,
//! `Actor::apply` carries out the side effects. Controllers in [`player`] and
//! [`boss`] decide which triggers to fire on each tick.

pub mod boss;
pub mod player;

pub use boss::{BossCommand, BossController};
pub use player::PlayerController;

use glam::{Vec2, Vec3};

use crate::combat::{AttackDescriptor, AttackKind, Swing};
use crate::config::{ActorConfig, BossConfig, PlayerConfig, PlayerRules};
use crate::env::GroundContact;
use crate::error::{ConfigError, Rejection};
use crate::event::{CombatEvent, EventOutbox, Observation, diff_events};
use crate::math::{DIRECTION_EPSILON, forward_from_yaw, horizontal, with_horizontal, yaw_from_direction};
use crate::phase::PhaseController;
use crate::resource::{ResourceKind, ResourcePool};
use crate::snapshot::ActorSnapshot;
use crate::state::{
    ActorId, ActorKind, ActorState, Effects, Guards, PhysicsTable, Transition, Trigger, next_state,
};
use crate::timer::{ExpiredTimers, TimerSet};

/// One combatant.
#[derive(Clone, Debug)]
pub struct Actor {
    pub(crate) id: ActorId,
    pub(crate) kind: ActorKind,
    pub(crate) health: ResourcePool,
    pub(crate) stamina: Option<ResourcePool>,
    pub(crate) poise: ResourcePool,
    pub(crate) state: ActorState,
    pub(crate) previous_state: ActorState,
    pub(crate) is_invulnerable: bool,
    pub(crate) is_staggered: bool,
    pub(crate) is_dead: bool,
    pub(crate) hit_detection: bool,
    pub(crate) velocity: Vec3,
    pub(crate) facing: f32,
    pub(crate) on_floor: bool,
    pub(crate) timers: TimerSet,
    pub(crate) swing: Option<Swing>,
    pub(crate) combo: u8,
    pub(crate) phases: Option<PhaseController>,
    pub(crate) config: ActorConfig,
    pub(crate) rules: Option<PlayerRules>,
    pub(crate) attack_cooldown: f32,
    pub(crate) physics: PhysicsTable,
    /// Direction locked in when a dodge starts.
    pub(crate) dodge_direction: Vec2,
    /// Direction of travel when a sprint stop began.
    pub(crate) stop_direction: Vec2,
    pub(crate) outbox: EventOutbox,
}

impl Actor {
    fn new(id: ActorId, kind: ActorKind, config: &ActorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            id,
            kind,
            health: ResourcePool::new(ResourceKind::Health, config.health)?,
            stamina: None,
            poise: ResourcePool::new(ResourceKind::Poise, config.poise)?,
            state: ActorState::Idle,
            previous_state: ActorState::Idle,
            is_invulnerable: false,
            is_staggered: false,
            is_dead: false,
            hit_detection: true,
            velocity: Vec3::ZERO,
            facing: 0.0,
            on_floor: true,
            timers: TimerSet::default(),
            swing: None,
            combo: 0,
            phases: None,
            config: config.clone(),
            rules: None,
            attack_cooldown: 0.0,
            physics: PhysicsTable::from_tuning(&config.movement),
            dodge_direction: Vec2::ZERO,
            stop_direction: Vec2::ZERO,
            outbox: EventOutbox::default(),
        })
    }

    /// Builds a player with full pools.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for any invalid value in `config`.
    pub fn player(id: ActorId, config: &PlayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut actor = Self::new(id, ActorKind::Player, &config.actor)?;
        actor.stamina = Some(ResourcePool::new(ResourceKind::Stamina, config.stamina)?);
        actor.rules = Some(config.rules);
        Ok(actor)
    }

    /// Builds a boss with full pools, in phase 1.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for any invalid value in `config`, including a
    /// malformed phase table.
    pub fn boss(id: ActorId, config: &BossConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut actor = Self::new(id, ActorKind::Boss, &config.actor)?;
        actor.phases = Some(PhaseController::new(&config.phases)?);
        actor.attack_cooldown = config.attack_cooldown;
        Ok(actor)
    }

    /// Replaces the per-state velocity table built from the movement tuning.
    pub fn with_physics(mut self, physics: PhysicsTable) -> Self {
        self.physics = physics;
        self
    }

    // ===== queries =====

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    pub fn state(&self) -> ActorState {
        self.state
    }

    pub fn previous_state(&self) -> ActorState {
        self.previous_state
    }

    pub fn health(&self) -> &ResourcePool {
        &self.health
    }

    pub fn stamina(&self) -> Option<&ResourcePool> {
        self.stamina.as_ref()
    }

    pub fn poise(&self) -> &ResourcePool {
        &self.poise
    }

    pub fn defense(&self) -> f32 {
        self.config.defense
    }

    pub fn is_invulnerable(&self) -> bool {
        self.is_invulnerable
    }

    pub fn is_staggered(&self) -> bool {
        self.is_staggered
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn is_hit_detection_enabled(&self) -> bool {
        self.hit_detection
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Facing yaw in radians (0 faces -Z).
    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn forward(&self) -> Vec2 {
        forward_from_yaw(self.facing)
    }

    pub fn on_floor(&self) -> bool {
        self.on_floor
    }

    pub fn combo(&self) -> u8 {
        self.combo
    }

    pub fn current_phase(&self) -> Option<u8> {
        self.phases.as_ref().map(PhaseController::current_phase)
    }

    /// True while the hit flash countdown runs.
    pub fn is_flashing(&self) -> bool {
        self.timers.hit_flash.is_running()
    }

    pub fn timers(&self) -> &TimerSet {
        &self.timers
    }

    pub fn config(&self) -> &ActorConfig {
        &self.config
    }

    pub fn swing(&self) -> Option<&Swing> {
        self.swing.as_ref()
    }

    /// The swing whose hit volume is live right now, if any.
    pub fn active_swing(&self) -> Option<&Swing> {
        if !self.hit_detection {
            return None;
        }
        self.swing.as_ref().filter(|swing| swing.is_active())
    }

    /// Claims a hit on `target` for the live swing.
    ///
    /// Returns the descriptor to resolve, or `None` when no swing is live or
    /// `target` was already hit by it.
    pub fn claim_hit(&mut self, target: ActorId) -> Option<AttackDescriptor> {
        if !self.hit_detection {
            return None;
        }
        let swing = self.swing.as_mut().filter(|swing| swing.is_active())?;
        swing.register_hit(target).then(|| *swing.descriptor())
    }

    /// Events pushed since the last drain, without taking them.
    pub fn pending_events(&self) -> &[CombatEvent] {
        self.outbox.as_slice()
    }

    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.outbox.drain()
    }

    pub fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            id: self.id,
            kind: self.kind,
            state: self.state,
            previous_state: self.previous_state,
            health: self.health.current(),
            stamina: self.stamina.as_ref().map(ResourcePool::current),
            poise: self.poise.current(),
            is_invulnerable: self.is_invulnerable,
            is_staggered: self.is_staggered,
            is_dead: self.is_dead,
            velocity: self.velocity,
            facing: self.facing,
            combo: self.combo,
            phase: self.current_phase(),
        }
    }

    // ===== transitions =====

    pub(crate) fn guards(&self, sprint_held: bool, resume_within_angle: bool) -> Guards {
        let affords = |cost: f32| self.stamina.as_ref().is_none_or(|s| s.current() >= cost);
        Guards {
            on_floor: self.on_floor,
            sprint_held,
            has_stamina: self.stamina.as_ref().is_some_and(|s| !s.is_empty()),
            can_afford_dodge: self
                .rules
                .as_ref()
                .is_some_and(|rules| affords(rules.dodge.stamina_cost)),
            can_afford_light: affords(self.config.light_attack.stamina_cost),
            can_afford_heavy: affords(self.config.heavy_attack.stamina_cost),
            dodge_ready: !self.timers.dodge_cooldown.is_running(),
            attack_ready: !self.timers.attack_cooldown.is_running(),
            staggered: self.is_staggered,
            resume_within_angle,
        }
    }

    /// Fires a trigger with guards derived from the actor alone.
    pub(crate) fn fire(&mut self, trigger: Trigger) -> Result<Transition, Rejection> {
        let guards = self.guards(false, false);
        self.try_transition(trigger, &guards)
    }

    /// Runs the transition table and applies the resulting effects.
    ///
    /// A rejection leaves the actor untouched.
    pub(crate) fn try_transition(
        &mut self,
        trigger: Trigger,
        guards: &Guards,
    ) -> Result<Transition, Rejection> {
        if self.is_dead {
            return Err(Rejection::Dead);
        }
        let transition = next_state(self.kind, self.state, trigger, guards)?;

        if let (Some(cost), Some(stamina)) = (self.stamina_cost(transition.effects), self.stamina.as_mut())
            && !stamina.spend(cost)
        {
            return Err(Rejection::InsufficientStamina);
        }

        self.apply(&transition);
        Ok(transition)
    }

    fn stamina_cost(&self, effects: Effects) -> Option<f32> {
        if effects.contains(Effects::SPEND_DODGE_STAMINA) {
            self.rules.as_ref().map(|rules| rules.dodge.stamina_cost)
        } else if effects.contains(Effects::SPEND_LIGHT_STAMINA) {
            Some(self.config.light_attack.stamina_cost)
        } else if effects.contains(Effects::SPEND_HEAVY_STAMINA) {
            Some(self.config.heavy_attack.stamina_cost)
        } else {
            None
        }
    }

    fn apply(&mut self, transition: &Transition) {
        let effects = transition.effects;
        let rules = self.rules.unwrap_or_default();

        if effects.contains(Effects::CANCEL_TIMERS) {
            self.timers.cancel_actions();
            self.is_invulnerable = false;
            self.swing = None;
            self.combo = 0;
        }
        if effects.contains(Effects::DISABLE_HIT_DETECTION) {
            self.hit_detection = false;
        }
        if effects.contains(Effects::START_DODGE) {
            self.timers.dodge.start(rules.dodge.duration);
        }
        if effects.contains(Effects::GRANT_INVULNERABILITY) {
            self.is_invulnerable = rules.dodge.invulnerability_window > 0.0;
        }
        if effects.contains(Effects::START_DODGE_COOLDOWN) {
            self.timers.dodge_cooldown.start(rules.dodge.cooldown);
        }
        if effects.contains(Effects::START_ATTACK) {
            let (kind, profile) = if transition.to == ActorState::HeavyAttack {
                (AttackKind::Heavy, self.config.heavy_attack)
            } else {
                (AttackKind::Light, self.config.light_attack)
            };
            let multiplier = self
                .phases
                .as_ref()
                .map_or(1.0, PhaseController::damage_multiplier);
            self.swing = Some(Swing::from_profile(kind, &profile, multiplier));
            self.timers.attack.start(profile.duration);
            self.timers.combo_grace.cancel();
        }
        if effects.contains(Effects::START_ATTACK_COOLDOWN) {
            let multiplier = self
                .phases
                .as_ref()
                .map_or(1.0, PhaseController::cooldown_multiplier);
            self.timers
                .attack_cooldown
                .start(self.attack_cooldown * multiplier);
        }
        if effects.contains(Effects::ADVANCE_COMBO) {
            self.combo = self.combo % rules.max_combo.max(1) + 1;
        }
        if effects.contains(Effects::START_COMBO_GRACE) {
            self.timers.combo_grace.start(rules.combo_grace);
        }
        if effects.contains(Effects::START_STOPPING) {
            self.timers.stopping.start(rules.stop_duration);
            self.stop_direction = horizontal(self.velocity).normalize_or_zero();
        }
        if effects.contains(Effects::JUMP_IMPULSE) {
            self.velocity.y = self.config.movement.jump_velocity;
        }
        if effects.contains(Effects::START_STAGGER) {
            self.timers.stagger.start(self.config.stagger_duration);
        }
        if effects.contains(Effects::SET_STAGGERED) {
            self.is_staggered = true;
            self.outbox.push(CombatEvent::Staggered);
        }
        if effects.contains(Effects::CLEAR_STAGGERED) {
            self.is_staggered = false;
            self.outbox.push(CombatEvent::StaggerRecovered);
        }
        if effects.contains(Effects::RESTORE_HALF_POISE) {
            self.poise.reset_to(self.poise.max() * 0.5);
        }

        if transition.from == ActorState::Dodging && transition.to != ActorState::Dodging {
            self.is_invulnerable = false;
        }
        if !transition.to.is_attacking() {
            self.swing = None;
        }

        if transition.from != transition.to {
            self.previous_state = transition.from;
            self.state = transition.to;
        }

        if transition.to == ActorState::Dead {
            self.is_dead = true;
            self.health.freeze();
            self.poise.freeze();
            if let Some(stamina) = self.stamina.as_mut() {
                stamina.freeze();
            }
            self.outbox.push(CombatEvent::Died);
        }
    }

    // ===== per-tick helpers =====

    pub(crate) fn observe(&self) -> Observation {
        Observation {
            state: self.state,
            health: (self.health.current(), self.health.max()),
            stamina: self.stamina.as_ref().map(|s| (s.current(), s.max())),
        }
    }

    /// Pushes change events relative to an earlier observation.
    pub(crate) fn emit_changes(&mut self, before: &Observation) {
        let after = self.observe();
        self.outbox.extend(diff_events(before, &after));
    }

    /// Advances every countdown and the live swing. Ends invulnerability once
    /// the dodge has run for the configured window.
    pub(crate) fn advance_timers(&mut self, dt: f32) -> ExpiredTimers {
        let expired = self.timers.advance(dt);
        if let Some(swing) = self.swing.as_mut() {
            swing.advance(dt);
        }
        if self.is_invulnerable {
            let window = self.rules.map_or(0.0, |rules| rules.dodge.invulnerability_window);
            if self.timers.dodge.elapsed() >= window {
                self.is_invulnerable = false;
            }
        }
        expired
    }

    /// Fires expiry triggers for timers that ran out this tick.
    pub(crate) fn handle_expired(&mut self, expired: ExpiredTimers) {
        if expired.stagger {
            let _ = self.fire(Trigger::StaggerElapsed);
        }
        if expired.dodge {
            let _ = self.fire(Trigger::DodgeFinished);
        }
        if expired.attack {
            let _ = self.fire(Trigger::AttackFinished);
        }
        if expired.stopping {
            let _ = self.fire(Trigger::StoppingFinished);
        }
        if expired.combo_grace {
            self.combo = 0;
        }
    }

    /// Updates the floor sensor and fires the airborne/landing triggers.
    pub(crate) fn apply_ground(&mut self, ground: GroundContact) {
        let was_on_floor = self.on_floor;
        self.on_floor = ground.on_floor;

        if was_on_floor && !ground.on_floor && self.velocity.y <= 0.0 {
            let _ = self.fire(Trigger::Airborne);
        }
        if self.state == ActorState::Jumping && self.velocity.y <= 0.0 {
            let _ = self.fire(Trigger::ApexReached);
        }
        if ground.on_floor && self.velocity.y <= 0.0 && self.state.is_airborne() {
            let _ = self.fire(Trigger::Landed);
        }
    }

    /// Regenerates pools. Poise stays down while staggered.
    pub(crate) fn regenerate(&mut self, dt: f32) {
        self.health.advance(dt);
        if let Some(stamina) = self.stamina.as_mut() {
            stamina.advance(dt);
        }
        if !self.is_staggered {
            self.poise.advance(dt);
        }
    }

    /// Lets a dead actor come to rest: no input, no triggers, only friction
    /// and gravity.
    pub(crate) fn settle(&mut self, ground: GroundContact, dt: f32) {
        self.on_floor = ground.on_floor;
        self.integrate_velocity(Vec2::ZERO, dt);
    }

    /// Applies the state's velocity rule, gravity and facing.
    pub(crate) fn integrate_velocity(&mut self, steer: Vec2, dt: f32) {
        let rule = self.physics.rule(self.state);
        let planar = rule.apply(horizontal(self.velocity), steer, self.dodge_direction, dt);
        self.velocity = with_horizontal(self.velocity, planar);

        if self.on_floor && self.velocity.y <= 0.0 {
            self.velocity.y = 0.0;
        } else {
            self.velocity.y -= self.config.movement.gravity * dt;
        }

        let turns = !matches!(
            self.state,
            ActorState::LightAttack
                | ActorState::HeavyAttack
                | ActorState::Parrying
                | ActorState::Stunned
                | ActorState::Dead
        );
        if turns && planar.length() > DIRECTION_EPSILON {
            self.facing = yaw_from_direction(planar);
        }
    }
}
