//! Boss phase progression driven by health thresholds.

use arrayvec::ArrayVec;

use crate::error::ConfigError;

/// Maximum number of thresholds a phase table can hold.
pub const MAX_PHASES: usize = 8;

/// Phase entered when health fraction drops to or below `health_fraction`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseThreshold {
    pub phase: u8,
    pub health_fraction: f32,
    /// Scales attack damage and poise damage while in this phase.
    #[cfg_attr(feature = "serde", serde(default = "unit_multiplier"))]
    pub damage_multiplier: f32,
    /// Scales the attack cooldown while in this phase.
    #[cfg_attr(feature = "serde", serde(default = "unit_multiplier"))]
    pub cooldown_multiplier: f32,
}

#[cfg(feature = "serde")]
fn unit_multiplier() -> f32 {
    1.0
}

impl PhaseThreshold {
    pub const fn new(phase: u8, health_fraction: f32) -> Self {
        Self {
            phase,
            health_fraction,
            damage_multiplier: 1.0,
            cooldown_multiplier: 1.0,
        }
    }

    pub const fn with_multipliers(mut self, damage: f32, cooldown: f32) -> Self {
        self.damage_multiplier = damage;
        self.cooldown_multiplier = cooldown;
        self
    }
}

/// Tracks the current boss phase.
///
/// Phases start at 1 and only ever increase. When one health update crosses
/// several thresholds, the controller jumps straight to the lowest qualifying
/// phase and reports that single change.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseController {
    current_phase: u8,
    thresholds: ArrayVec<PhaseThreshold, MAX_PHASES>,
}

impl PhaseController {
    /// Builds a controller from thresholds ordered phase 2, 3, ...
    ///
    /// # Errors
    ///
    /// Fails when phases are out of sequence, a fraction lies outside `(0, 1)`,
    /// fractions are not strictly decreasing, or there are more than
    /// [`MAX_PHASES`] entries.
    pub fn new(thresholds: &[PhaseThreshold]) -> Result<Self, ConfigError> {
        if thresholds.len() > MAX_PHASES {
            return Err(ConfigError::TooManyPhases {
                max: MAX_PHASES,
                count: thresholds.len(),
            });
        }

        let mut previous = 1.0_f32;
        let mut table = ArrayVec::new();
        for (i, threshold) in thresholds.iter().enumerate() {
            let expected = i as u8 + 2;
            if threshold.phase != expected {
                return Err(ConfigError::PhaseOutOfSequence {
                    expected,
                    found: threshold.phase,
                });
            }
            let fraction = threshold.health_fraction;
            if !(fraction > 0.0 && fraction < 1.0) {
                return Err(ConfigError::ThresholdOutOfRange {
                    phase: threshold.phase,
                    fraction,
                });
            }
            if i > 0 && fraction >= previous {
                return Err(ConfigError::ThresholdNotDecreasing {
                    phase: threshold.phase,
                    fraction,
                    previous,
                });
            }
            crate::resource::require_positive("phase.damage_multiplier", threshold.damage_multiplier)?;
            crate::resource::require_positive(
                "phase.cooldown_multiplier",
                threshold.cooldown_multiplier,
            )?;
            previous = fraction;
            table.push(*threshold);
        }

        Ok(Self {
            current_phase: 1,
            thresholds: table,
        })
    }

    pub fn current_phase(&self) -> u8 {
        self.current_phase
    }

    pub fn thresholds(&self) -> &[PhaseThreshold] {
        &self.thresholds
    }

    /// Advances the phase if `health_fraction` crossed a threshold beyond the
    /// current phase. Returns the new phase exactly once per change.
    pub fn check_phase(&mut self, health_fraction: f32) -> Option<u8> {
        if health_fraction.is_nan() {
            return None;
        }
        let reached = self
            .thresholds
            .iter()
            .filter(|t| health_fraction <= t.health_fraction)
            .map(|t| t.phase)
            .max()?;

        if reached > self.current_phase {
            self.current_phase = reached;
            Some(reached)
        } else {
            None
        }
    }

    fn active(&self) -> Option<&PhaseThreshold> {
        self.thresholds.iter().find(|t| t.phase == self.current_phase)
    }

    pub fn damage_multiplier(&self) -> f32 {
        self.active().map_or(1.0, |t| t.damage_multiplier)
    }

    pub fn cooldown_multiplier(&self) -> f32 {
        self.active().map_or(1.0, |t| t.cooldown_multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_phase() -> PhaseController {
        PhaseController::new(&[PhaseThreshold::new(2, 0.6), PhaseThreshold::new(3, 0.3)]).unwrap()
    }

    #[test]
    fn each_threshold_fires_once() {
        let mut phases = two_phase();
        let fired: Vec<u8> = [1.0, 0.65, 0.59, 0.31, 0.29]
            .into_iter()
            .filter_map(|f| phases.check_phase(f))
            .collect();
        assert_eq!(fired, vec![2, 3]);
    }

    #[test]
    fn repeated_fraction_is_idempotent() {
        let mut phases = two_phase();
        assert_eq!(phases.check_phase(0.6), Some(2));
        assert_eq!(phases.check_phase(0.6), None);
        assert_eq!(phases.check_phase(0.5), None);
    }

    #[test]
    fn burst_damage_jumps_to_lowest_phase() {
        let mut phases = two_phase();
        assert_eq!(phases.check_phase(0.1), Some(3));
        assert_eq!(phases.check_phase(0.05), None);
    }

    #[test]
    fn healing_never_de_escalates() {
        let mut phases = two_phase();
        phases.check_phase(0.2);
        assert_eq!(phases.check_phase(1.0), None);
        assert_eq!(phases.current_phase(), 3);
    }

    #[test]
    fn multipliers_follow_current_phase() {
        let mut phases = PhaseController::new(&[
            PhaseThreshold::new(2, 0.6).with_multipliers(1.2, 0.8),
            PhaseThreshold::new(3, 0.3).with_multipliers(1.5, 0.6),
        ])
        .unwrap();
        assert_eq!(phases.damage_multiplier(), 1.0);
        phases.check_phase(0.5);
        assert_eq!(phases.damage_multiplier(), 1.2);
        assert_eq!(phases.cooldown_multiplier(), 0.8);
    }

    #[test]
    fn rejects_malformed_tables() {
        let unordered = PhaseController::new(&[PhaseThreshold::new(2, 0.3), PhaseThreshold::new(3, 0.6)]);
        assert!(matches!(
            unordered,
            Err(ConfigError::ThresholdNotDecreasing { phase: 3, .. })
        ));

        let skipped = PhaseController::new(&[PhaseThreshold::new(3, 0.5)]);
        assert!(matches!(
            skipped,
            Err(ConfigError::PhaseOutOfSequence {
                expected: 2,
                found: 3
            })
        ));

        let out_of_range = PhaseController::new(&[PhaseThreshold::new(2, 1.0)]);
        assert!(matches!(out_of_range, Err(ConfigError::ThresholdOutOfRange { .. })));
    }

    #[test]
    fn empty_table_stays_in_phase_one() {
        let mut phases = PhaseController::new(&[]).unwrap();
        assert_eq!(phases.check_phase(0.0), None);
        assert_eq!(phases.current_phase(), 1);
    }
}
