//! Clamped resource pools (health, stamina, poise).
//!
//! A pool holds `0 <= current <= max` at all times. Spending is all-or-nothing,
//! damage clamps at zero, restoring clamps at `max`. Regeneration is gated by a
//! delay that restarts on every expenditure; a pool with `regen_delay == 0`
//! regenerates continuously. Pools are frozen when their owner dies, after which
//! no call changes the value.

use crate::error::ConfigError;

/// Identifies which pool a value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    Health,
    Stamina,
    Poise,
}

impl ResourceKind {
    const fn max_field(self) -> &'static str {
        match self {
            Self::Health => "health.max",
            Self::Stamina => "stamina.max",
            Self::Poise => "poise.max",
        }
    }

    const fn regen_rate_field(self) -> &'static str {
        match self {
            Self::Health => "health.regen_rate",
            Self::Stamina => "stamina.regen_rate",
            Self::Poise => "poise.regen_rate",
        }
    }

    const fn regen_delay_field(self) -> &'static str {
        match self {
            Self::Health => "health.regen_delay",
            Self::Stamina => "stamina.regen_delay",
            Self::Poise => "poise.regen_delay",
        }
    }
}

/// Tunable parameters for a single pool.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    pub max: f32,
    /// Units regenerated per second once the delay has elapsed.
    pub regen_rate: f32,
    /// Seconds of no expenditure before regeneration resumes.
    pub regen_delay: f32,
}

impl PoolConfig {
    pub const fn new(max: f32, regen_rate: f32, regen_delay: f32) -> Self {
        Self {
            max,
            regen_rate,
            regen_delay,
        }
    }

    /// A pool that never regenerates on its own.
    pub const fn fixed(max: f32) -> Self {
        Self::new(max, 0.0, 0.0)
    }

    pub fn validate(&self, kind: ResourceKind) -> Result<(), ConfigError> {
        require_positive(kind.max_field(), self.max)?;
        require_non_negative(kind.regen_rate_field(), self.regen_rate)?;
        require_non_negative(kind.regen_delay_field(), self.regen_delay)
    }
}

pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

/// A clamped numeric resource with delayed regeneration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    kind: ResourceKind,
    current: f32,
    max: f32,
    regen_rate: f32,
    regen_delay: f32,
    regen_delay_remaining: f32,
    frozen: bool,
}

impl ResourcePool {
    /// Creates a full pool.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max <= 0` or a rate/delay is negative.
    pub fn new(kind: ResourceKind, config: PoolConfig) -> Result<Self, ConfigError> {
        config.validate(kind)?;
        Ok(Self {
            kind,
            current: config.max,
            max: config.max,
            regen_rate: config.regen_rate,
            regen_delay: config.regen_delay,
            regen_delay_remaining: 0.0,
            frozen: false,
        })
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn regen_rate(&self) -> f32 {
        self.regen_rate
    }

    pub fn regen_delay(&self) -> f32 {
        self.regen_delay
    }

    pub fn regen_delay_remaining(&self) -> f32 {
        self.regen_delay_remaining
    }

    /// Current value as a fraction of max, in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        self.current / self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Spends `amount` if the pool can cover it.
    ///
    /// Returns `false` without touching the pool when `amount > current`,
    /// when `amount` is negative or NaN, or when the pool is frozen.
    pub fn spend(&mut self, amount: f32) -> bool {
        if self.frozen || !(amount >= 0.0) || amount > self.current {
            return false;
        }
        self.current -= amount;
        if amount > 0.0 {
            self.interrupt_regen();
        }
        true
    }

    /// Removes up to `amount`, clamping at zero, and returns what was removed.
    ///
    /// Used for incoming damage and continuous drains (sprinting). Any
    /// positive removal restarts the regeneration delay.
    pub fn deplete(&mut self, amount: f32) -> f32 {
        if self.frozen || !(amount > 0.0) {
            return 0.0;
        }
        let removed = amount.min(self.current);
        self.current -= removed;
        self.interrupt_regen();
        removed
    }

    /// Adds `amount`, clamped to max. Negative amounts are ignored.
    pub fn restore(&mut self, amount: f32) {
        if self.frozen || !(amount > 0.0) {
            return;
        }
        self.current = (self.current + amount).min(self.max);
    }

    /// Sets the value directly, clamped into `[0, max]`.
    pub fn reset_to(&mut self, value: f32) {
        if self.frozen || value.is_nan() {
            return;
        }
        self.current = value.clamp(0.0, self.max);
    }

    /// Restarts the regeneration delay without spending anything.
    pub fn interrupt_regen(&mut self) {
        self.regen_delay_remaining = self.regen_delay;
    }

    /// Advances the regeneration clock by `dt` seconds.
    ///
    /// The delay is consumed first; only the part of `dt` left over after the
    /// delay elapses regenerates.
    pub fn advance(&mut self, dt: f32) {
        if self.frozen || !(dt > 0.0) {
            return;
        }
        let mut regen_time = dt;
        if self.regen_delay_remaining > 0.0 {
            if dt < self.regen_delay_remaining {
                self.regen_delay_remaining -= dt;
                return;
            }
            regen_time = dt - self.regen_delay_remaining;
            self.regen_delay_remaining = 0.0;
        }
        if self.regen_rate > 0.0 && regen_time > 0.0 {
            self.restore(self.regen_rate * regen_time);
        }
    }

    /// Locks the pool at its current value.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }
}
