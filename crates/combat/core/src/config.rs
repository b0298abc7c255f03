//! Tunable combat configuration.
//!
//! All values are plain data with `Default` impls matching the bundled
//! content. Constructors that take a config call `validate()` first, so a
//! malformed file fails when the arena is built rather than on the first tick.

use crate::error::ConfigError;
use crate::phase::{PhaseController, PhaseThreshold};
use crate::resource::{PoolConfig, ResourceKind, require_non_negative, require_positive};
use crate::state::MovementTuning;

// ============================================================================
// Attacks
// ============================================================================

/// Timing, reach and cost of one attack type.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackProfile {
    pub damage: f32,
    pub poise_damage: f32,
    pub is_heavy: bool,
    /// Total swing length in seconds.
    pub duration: f32,
    /// Hit detection is live for `[active_start, active_end)` seconds into the swing.
    pub active_start: f32,
    pub active_end: f32,
    /// Horizontal reach of the hit volume.
    pub reach: f32,
    /// Full opening angle of the hit cone, in degrees.
    pub arc_degrees: f32,
    /// Flat stamina cost paid on entry. Ignored for actors without stamina.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stamina_cost: f32,
}

impl AttackProfile {
    pub fn validate(&self, attack: &'static str) -> Result<(), ConfigError> {
        require_non_negative("attack.damage", self.damage)?;
        require_non_negative("attack.poise_damage", self.poise_damage)?;
        require_positive("attack.duration", self.duration)?;
        require_positive("attack.reach", self.reach)?;
        require_positive("attack.arc_degrees", self.arc_degrees)?;
        require_non_negative("attack.stamina_cost", self.stamina_cost)?;

        let window_fits = self.active_start >= 0.0
            && self.active_start < self.active_end
            && self.active_end <= self.duration;
        if !window_fits {
            return Err(ConfigError::ActiveWindowOutOfRange {
                attack,
                start: self.active_start,
                end: self.active_end,
                duration: self.duration,
            });
        }
        Ok(())
    }

    const fn player_light() -> Self {
        Self {
            damage: 20.0,
            poise_damage: 15.0,
            is_heavy: false,
            duration: 0.5,
            active_start: 0.15,
            active_end: 0.3,
            reach: 2.0,
            arc_degrees: 90.0,
            stamina_cost: 15.0,
        }
    }

    const fn player_heavy() -> Self {
        Self {
            damage: 40.0,
            poise_damage: 30.0,
            is_heavy: true,
            duration: 0.9,
            active_start: 0.4,
            active_end: 0.6,
            reach: 2.5,
            arc_degrees: 120.0,
            stamina_cost: 30.0,
        }
    }

    const fn boss_light() -> Self {
        Self {
            damage: 25.0,
            poise_damage: 20.0,
            is_heavy: false,
            duration: 1.0,
            active_start: 0.4,
            active_end: 0.6,
            reach: 3.0,
            arc_degrees: 100.0,
            stamina_cost: 0.0,
        }
    }

    const fn boss_heavy() -> Self {
        Self {
            damage: 45.0,
            poise_damage: 40.0,
            is_heavy: true,
            duration: 1.6,
            active_start: 0.8,
            active_end: 1.1,
            reach: 3.5,
            arc_degrees: 140.0,
            stamina_cost: 0.0,
        }
    }
}

/// Dodge roll timing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DodgeTuning {
    pub duration: f32,
    /// Invulnerable for `[0, invulnerability_window)` seconds into the dodge.
    pub invulnerability_window: f32,
    pub cooldown: f32,
    pub stamina_cost: f32,
}

impl Default for DodgeTuning {
    fn default() -> Self {
        Self {
            duration: 0.5,
            invulnerability_window: 0.25,
            cooldown: 0.25,
            stamina_cost: 20.0,
        }
    }
}

impl DodgeTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("dodge.duration", self.duration)?;
        require_non_negative("dodge.invulnerability_window", self.invulnerability_window)?;
        require_non_negative("dodge.cooldown", self.cooldown)?;
        require_non_negative("dodge.stamina_cost", self.stamina_cost)?;
        if self.invulnerability_window > self.duration {
            return Err(ConfigError::InvulnerabilityExceedsDodge {
                window: self.invulnerability_window,
                duration: self.duration,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Actors
// ============================================================================

/// Settings shared by every actor kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActorConfig {
    pub health: PoolConfig,
    pub poise: PoolConfig,
    /// Flat damage reduction per hit.
    pub defense: f32,
    pub stagger_duration: f32,
    pub hit_flash_duration: f32,
    pub movement: MovementTuning,
    pub light_attack: AttackProfile,
    pub heavy_attack: AttackProfile,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            health: PoolConfig::fixed(200.0),
            poise: PoolConfig::new(50.0, 10.0, 0.0),
            defense: 5.0,
            stagger_duration: 1.5,
            hit_flash_duration: 0.15,
            movement: MovementTuning::default(),
            light_attack: AttackProfile::player_light(),
            heavy_attack: AttackProfile::player_heavy(),
        }
    }
}

impl ActorConfig {
    /// Boss defaults: larger pools, slower but wider swings.
    pub fn boss() -> Self {
        Self {
            health: PoolConfig::fixed(500.0),
            poise: PoolConfig::new(100.0, 10.0, 0.0),
            defense: 5.0,
            stagger_duration: 3.0,
            hit_flash_duration: 0.15,
            movement: MovementTuning {
                walk_speed: 3.0,
                sprint_speed: 3.0,
                ..MovementTuning::default()
            },
            light_attack: AttackProfile::boss_light(),
            heavy_attack: AttackProfile::boss_heavy(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.health.validate(ResourceKind::Health)?;
        self.poise.validate(ResourceKind::Poise)?;
        if self.poise.regen_delay != 0.0 {
            return Err(ConfigError::PoiseRegenDelayed {
                delay: self.poise.regen_delay,
            });
        }
        require_non_negative("defense", self.defense)?;
        require_positive("stagger_duration", self.stagger_duration)?;
        require_non_negative("hit_flash_duration", self.hit_flash_duration)?;
        self.movement.validate()?;
        self.light_attack.validate("light_attack")?;
        self.heavy_attack.validate("heavy_attack")
    }
}

/// Player-only rules layered on top of [`ActorConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerRules {
    /// Stamina drained per second while sprinting.
    pub sprint_drain: f32,
    pub dodge: DodgeTuning,
    /// Length of the sprint stopping animation.
    pub stop_duration: f32,
    /// Combo steps before the counter wraps back to 1.
    pub max_combo: u8,
    /// Seconds after an attack before the combo counter resets.
    pub combo_grace: f32,
    /// Camera yaw radians per second at full look deflection.
    pub camera_sensitivity: f32,
    /// Resuming movement within this angle of the sprint direction lets the
    /// stopping animation finish.
    pub resume_angle_degrees: f32,
}

impl Default for PlayerRules {
    fn default() -> Self {
        Self {
            sprint_drain: 15.0,
            dodge: DodgeTuning::default(),
            stop_duration: 0.3,
            max_combo: 3,
            combo_grace: 0.6,
            camera_sensitivity: 3.0,
            resume_angle_degrees: 90.0,
        }
    }
}

impl PlayerRules {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("sprint_drain", self.sprint_drain)?;
        self.dodge.validate()?;
        require_positive("stop_duration", self.stop_duration)?;
        if self.max_combo == 0 {
            return Err(ConfigError::EmptyCombo);
        }
        require_non_negative("combo_grace", self.combo_grace)?;
        require_non_negative("camera_sensitivity", self.camera_sensitivity)?;
        require_non_negative("resume_angle_degrees", self.resume_angle_degrees)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    pub actor: ActorConfig,
    pub stamina: PoolConfig,
    pub rules: PlayerRules,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            actor: ActorConfig::default(),
            stamina: PoolConfig::new(100.0, 20.0, 1.0),
            rules: PlayerRules::default(),
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.actor.validate()?;
        self.stamina.validate(ResourceKind::Stamina)?;
        self.rules.validate()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossConfig {
    pub actor: ActorConfig,
    /// Thresholds for phase 2, 3, ... in strictly decreasing health fraction.
    pub phases: Vec<PhaseThreshold>,
    /// Seconds between the end of one swing and the next.
    pub attack_cooldown: f32,
    /// Distance at which the boss stops chasing and starts swinging.
    pub engage_range: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            actor: ActorConfig::boss(),
            phases: vec![
                PhaseThreshold::new(2, 0.6).with_multipliers(1.2, 0.8),
                PhaseThreshold::new(3, 0.3).with_multipliers(1.5, 0.6),
            ],
            attack_cooldown: 1.5,
            engage_range: 2.5,
        }
    }
}

impl BossConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.actor.validate()?;
        PhaseController::new(&self.phases)?;
        require_non_negative("attack_cooldown", self.attack_cooldown)?;
        require_positive("engage_range", self.engage_range)
    }
}

// ============================================================================
// Top level
// ============================================================================

/// Complete configuration for one encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Fixed simulation rate in Hz.
    pub tick_rate: u32,
    pub player: PlayerConfig,
    pub boss: BossConfig,
}

impl CombatConfig {
    pub const DEFAULT_TICK_RATE: u32 = 60;

    /// Seconds per fixed tick.
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        self.player.validate()?;
        self.boss.validate()
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            tick_rate: Self::DEFAULT_TICK_RATE,
            player: PlayerConfig::default(),
            boss: BossConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        CombatConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let config = CombatConfig {
            tick_rate: 0,
            ..CombatConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));
    }

    #[test]
    fn invulnerability_must_fit_inside_dodge() {
        let mut config = PlayerConfig::default();
        config.rules.dodge.invulnerability_window = 0.75;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvulnerabilityExceedsDodge { .. })
        ));
    }

    #[test]
    fn active_window_must_fit_inside_swing() {
        let mut config = ActorConfig::default();
        config.heavy_attack.active_end = 2.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ActiveWindowOutOfRange {
                attack: "heavy_attack",
                ..
            })
        ));
    }

    #[test]
    fn non_positive_max_health_fails_fast() {
        let mut config = CombatConfig::default();
        config.boss.actor.health.max = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "health.max",
                ..
            })
        ));
    }

    #[test]
    fn poise_regen_cannot_be_delayed() {
        let mut config = CombatConfig::default();
        config.boss.actor.poise = PoolConfig::new(100.0, 10.0, 2.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::PoiseRegenDelayed { delay: 2.0 })
        );
        assert!(matches!(
            crate::actor::BossController::new(crate::state::ActorId::BOSS, &config.boss),
            Err(ConfigError::PoiseRegenDelayed { .. })
        ));
    }

    #[test]
    fn malformed_phase_table_is_rejected() {
        let mut config = BossConfig::default();
        config.phases.reverse();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_combo_is_rejected() {
        let mut rules = PlayerRules::default();
        rules.max_combo = 0;
        assert_eq!(rules.validate(), Err(ConfigError::EmptyCombo));
    }
}
