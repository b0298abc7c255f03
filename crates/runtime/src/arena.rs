//! Fixed-timestep arena orchestrator.
//!
//! The arena owns both controllers and their bodies and drives one encounter.
//! Each [`Arena::step`] runs, in order: boss decision, controller ticks,
//! position integration, bounds correction, hit detection, outcome check.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use combat_core::{
    Actor, ActorId, ActorSnapshot, ArenaBounds, CombatConfig, CombatEvent, ConfigError,
    InputIntentSource, IntentSnapshot, ActionSet, BossController, PlayerController, SpawnProvider,
    compute_state_digest, resolve_hit,
};

use crate::brain::{BossBrain, BossProvider, EncounterView};
use crate::error::{Result, RuntimeError};
use crate::kinematics::Body;
use crate::report::{ArenaEvent, EncounterOutcome, FrameReport, HitRecord};

/// Slack when comparing accumulated real time against the fixed step.
const ACCUMULATOR_EPSILON: f32 = 1e-6;

/// Arena configuration shared by the orchestrator and its controllers.
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaConfig {
    pub combat: CombatConfig,
    /// Horizontal radius of every actor body, used by hit detection.
    pub actor_radius: f32,
    /// Upper bound on fixed steps run by one [`Arena::advance`] call.
    pub max_steps_per_advance: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            actor_radius: 0.5,
            max_steps_per_advance: 8,
        }
    }
}

impl ArenaConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.combat.validate()?;
        if !(self.actor_radius > 0.0 && self.actor_radius.is_finite()) {
            return Err(ConfigError::NotPositive {
                field: "actor_radius",
                value: self.actor_radius,
            });
        }
        if self.max_steps_per_advance == 0 {
            return Err(ConfigError::NotPositive {
                field: "max_steps_per_advance",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Serializable state of the whole encounter at one step boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub tick: u64,
    pub player: ActorSnapshot,
    pub player_position: Vec3,
    pub boss: ActorSnapshot,
    pub boss_position: Vec3,
    pub outcome: Option<EncounterOutcome>,
}

/// One player-versus-boss encounter.
///
/// Design: the arena owns all mutable simulation state and is stepped by a
/// single caller. Presentation happens after each step through the returned
/// [`FrameReport`].
pub struct Arena {
    config: ArenaConfig,
    dt: f32,
    tick: u64,
    accumulator: f32,
    /// Presses seen by [`Arena::advance`] that no step has consumed yet.
    pending_pressed: ActionSet,

    player: PlayerController,
    player_body: Body,
    boss: BossController,
    boss_body: Body,

    bounds: Box<dyn ArenaBounds>,
    brain: Box<dyn BossProvider>,

    outcome: Option<EncounterOutcome>,
}

impl Arena {
    /// Create a new arena builder
    pub fn builder() -> ArenaBuilder {
        ArenaBuilder::new()
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Seconds per fixed step.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Number of steps run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn player_body(&self) -> &Body {
        &self.player_body
    }

    pub fn boss(&self) -> &BossController {
        &self.boss
    }

    pub fn boss_body(&self) -> &Body {
        &self.boss_body
    }

    pub fn bounds(&self) -> &dyn ArenaBounds {
        self.bounds.as_ref()
    }

    pub fn outcome(&self) -> Option<EncounterOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Real time accumulated but not yet simulated.
    pub fn pending_time(&self) -> f32 {
        self.accumulator
    }

    pub fn snapshot(&self) -> ArenaSnapshot {
        ArenaSnapshot {
            tick: self.tick,
            player: self.player.actor().snapshot(),
            player_position: self.player_body.position,
            boss: self.boss.actor().snapshot(),
            boss_position: self.boss_body.position,
            outcome: self.outcome,
        }
    }

    /// SHA-256 digest of [`Arena::snapshot`].
    pub fn digest(&self) -> [u8; 32] {
        compute_state_digest(&[self.snapshot()])
    }

    // ===== stepping =====

    /// Runs one fixed step with the player's intent for this step.
    pub fn step(&mut self, intent: &impl InputIntentSource) -> FrameReport {
        let mut report = FrameReport::new(self.tick);

        let command = self.brain.decide(&EncounterView {
            tick: self.tick,
            boss: self.boss.actor(),
            boss_body: &self.boss_body,
            player: self.player.actor(),
            player_body: &self.player_body,
        });

        let player_id = self.player.actor().id();
        let boss_id = self.boss.actor().id();

        let player_events = self
            .player
            .tick(self.dt, intent, self.player_body.ground_contact());
        report.extend(player_id, player_events);
        let boss_events = self
            .boss
            .tick(self.dt, command, self.boss_body.ground_contact());
        report.extend(boss_id, boss_events);

        self.player_body.integrate(self.player.actor().velocity(), self.dt);
        self.boss_body.integrate(self.boss.actor().velocity(), self.dt);

        let bounds = self.bounds.as_ref();
        for (actor, body) in [
            (player_id, &mut self.player_body),
            (boss_id, &mut self.boss_body),
        ] {
            if let Some(event) = keep_in_bounds(bounds, actor, body) {
                report.arena_events.push(event);
            }
        }

        if let Some(hit) = strike(
            self.player.actor_mut(),
            &self.player_body,
            self.boss.actor_mut(),
            &self.boss_body,
        ) {
            report.extend(boss_id, self.boss.actor_mut().drain_events());
            report.hits.push(hit);
        }
        if let Some(hit) = strike(
            self.boss.actor_mut(),
            &self.boss_body,
            self.player.actor_mut(),
            &self.player_body,
        ) {
            report.extend(player_id, self.player.actor_mut().drain_events());
            report.hits.push(hit);
        }

        self.check_outcome(&mut report);
        log_frame(&report);

        self.tick += 1;
        report
    }

    /// Accumulates `real_dt` seconds and runs as many fixed steps as fit.
    ///
    /// `intent` is applied to every step. Pressed actions are buffered until
    /// a step runs and reach only that first step. Backlog beyond
    /// `max_steps_per_advance` steps is dropped.
    pub fn advance(&mut self, real_dt: f32, intent: &IntentSnapshot) -> Vec<FrameReport> {
        if real_dt.is_finite() && real_dt > 0.0 {
            self.accumulator += real_dt;
        }
        self.pending_pressed |= intent.pressed;

        let max_steps = self.config.max_steps_per_advance as usize;
        let mut reports = Vec::new();
        let mut current = *intent;
        while self.accumulator + ACCUMULATOR_EPSILON >= self.dt && reports.len() < max_steps {
            current.pressed = std::mem::take(&mut self.pending_pressed);
            current.held |= current.pressed;
            reports.push(self.step(&current));
            self.accumulator = (self.accumulator - self.dt).max(0.0);
        }

        if self.accumulator + ACCUMULATOR_EPSILON >= self.dt {
            tracing::debug!(
                "Dropping {:.3}s of simulation backlog after {} steps",
                self.accumulator,
                reports.len()
            );
            self.accumulator %= self.dt;
        }
        reports
    }

    fn check_outcome(&mut self, report: &mut FrameReport) {
        if self.outcome.is_some() {
            return;
        }
        let outcome = if self.player.actor().is_dead() {
            EncounterOutcome::PlayerDefeated
        } else if self.boss.actor().is_dead() {
            EncounterOutcome::PlayerVictory
        } else {
            return;
        };
        self.outcome = Some(outcome);
        report
            .arena_events
            .push(ArenaEvent::EncounterEnded { outcome });
        tracing::info!("Encounter ended at tick {}: {:?}", self.tick, outcome);
    }
}

/// Clamps `body` back into bounds, reporting the correction.
fn keep_in_bounds(bounds: &dyn ArenaBounds, actor: ActorId, body: &mut Body) -> Option<ArenaEvent> {
    if bounds.is_in_bounds(body.position) {
        return None;
    }
    let from = body.position;
    let to = bounds.clamp_to_bounds(from);
    body.position = to;
    tracing::warn!("Actor {} left the arena at {}; corrected to {}", actor, from, to);
    Some(ArenaEvent::PositionCorrected { actor, from, to })
}

/// Resolves `attacker`'s live swing against `defender`, at most once per swing.
fn strike(
    attacker: &mut Actor,
    attacker_body: &Body,
    defender: &mut Actor,
    defender_body: &Body,
) -> Option<HitRecord> {
    let swing = attacker.active_swing()?;
    if !swing.covers(
        attacker_body.planar(),
        attacker.facing(),
        defender_body.planar(),
        defender_body.radius,
    ) {
        return None;
    }
    let descriptor = attacker.claim_hit(defender.id())?;
    let outcome = resolve_hit(&descriptor, defender);
    tracing::debug!(
        "Actor {} hit {}: {:?}, {} damage, health {}",
        attacker.id(),
        defender.id(),
        outcome.kind,
        outcome.damage,
        outcome.health_after
    );
    Some(HitRecord {
        attacker: attacker.id(),
        defender: defender.id(),
        outcome,
    })
}

fn log_frame(report: &FrameReport) {
    for (actor, event) in &report.events {
        match event {
            CombatEvent::StateChanged { new, old } => {
                tracing::debug!("Actor {} state {:?} -> {:?}", actor, old, new);
            }
            CombatEvent::PhaseChanged { phase } => {
                tracing::info!("Actor {} entered phase {}", actor, phase);
            }
            CombatEvent::Died => tracing::info!("Actor {} died", actor),
            CombatEvent::Staggered => tracing::debug!("Actor {} staggered", actor),
            _ => tracing::trace!("Actor {} emitted {}", actor, event.name()),
        }
    }
}

/// Builder for [`Arena`].
pub struct ArenaBuilder {
    config: ArenaConfig,
    bounds: Option<Box<dyn ArenaBounds>>,
    spawns: Option<Box<dyn SpawnProvider>>,
    brain: Option<Box<dyn BossProvider>>,
}

impl ArenaBuilder {
    fn new() -> Self {
        Self {
            config: ArenaConfig::default(),
            bounds: None,
            spawns: None,
            brain: None,
        }
    }

    /// Override arena configuration
    pub fn config(mut self, config: ArenaConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the combat tuning
    pub fn combat(mut self, combat: CombatConfig) -> Self {
        self.config.combat = combat;
        self
    }

    /// Set required bounds provider
    pub fn bounds(mut self, bounds: impl ArenaBounds + 'static) -> Self {
        self.bounds = Some(Box::new(bounds));
        self
    }

    /// Set required spawn provider
    pub fn spawns(mut self, spawns: impl SpawnProvider + 'static) -> Self {
        self.spawns = Some(Box::new(spawns));
        self
    }

    /// Set boss provider (defaults to [`BossBrain`] at the configured engage range)
    pub fn boss_provider(mut self, provider: impl BossProvider + 'static) -> Self {
        self.brain = Some(Box::new(provider));
        self
    }

    /// Build the arena
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, a missing collaborator, or a spawn
    /// point outside the bounds.
    pub fn build(self) -> Result<Arena> {
        self.config.validate()?;
        let bounds = self.bounds.ok_or(RuntimeError::MissingBounds)?;
        let spawns = self.spawns.ok_or(RuntimeError::MissingSpawns)?;

        let player_spawn = spawns.player_spawn_position();
        let boss_spawn = spawns.boss_spawn_position();
        for (actor, position) in [(ActorId::PLAYER, player_spawn), (ActorId::BOSS, boss_spawn)] {
            if !bounds.is_in_bounds(position) {
                return Err(RuntimeError::SpawnOutOfBounds { actor, position });
            }
        }

        let combat = &self.config.combat;
        let player = PlayerController::new(ActorId::PLAYER, &combat.player)?;
        let boss = BossController::new(ActorId::BOSS, &combat.boss)?;
        let brain = self
            .brain
            .unwrap_or_else(|| Box::new(BossBrain::new(combat.boss.engage_range)));

        let radius = self.config.actor_radius;
        let dt = combat.tick_dt();
        tracing::info!(
            "Arena built: {} Hz, player at {}, boss at {}",
            combat.tick_rate,
            player_spawn,
            boss_spawn
        );

        Ok(Arena {
            dt,
            tick: 0,
            accumulator: 0.0,
            pending_pressed: ActionSet::empty(),
            player,
            player_body: Body::new(player_spawn, radius),
            boss,
            boss_body: Body::new(boss_spawn, radius),
            bounds,
            brain,
            outcome: None,
            config: self.config,
        })
    }
}
