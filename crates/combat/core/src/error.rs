//! Common error infrastructure for combat-core.
//!
//! The simulation has no fatal runtime errors. Two families exist:
//!
//! - [`ConfigError`]: a data defect detected while constructing actors or
//!   phase tables. Construction fails fast instead of surfacing on the first tick.
//! - [`Rejection`]: the reason code behind a discretionary action that did not
//!   happen (busy, not enough stamina, ...). Controllers report these as plain
//!   booleans; the reason is available to callers that want it.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request was rejected without side effects; the caller may try again later.
    ///
    /// Examples: dodge while attacking, attack without stamina
    Recoverable,

    /// Invalid input data that must be fixed before retrying.
    ///
    /// Examples: non-positive max health, unordered phase thresholds
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Invalid configuration detected at construction time.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A value that must be strictly positive was zero or negative.
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    /// A value that must be zero or positive was negative.
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    /// A value is not a finite number.
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },

    /// The dodge invulnerability window does not fit inside the dodge.
    #[error("invulnerability window {window}s exceeds dodge duration {duration}s")]
    InvulnerabilityExceedsDodge { window: f32, duration: f32 },

    /// An attack's active window is empty or extends past the swing.
    #[error("{attack} active window [{start}, {end}) does not fit a {duration}s swing")]
    ActiveWindowOutOfRange {
        attack: &'static str,
        start: f32,
        end: f32,
        duration: f32,
    },

    /// A phase threshold fraction is outside `(0, 1)`.
    #[error("phase {phase} threshold {fraction} must lie strictly between 0 and 1")]
    ThresholdOutOfRange { phase: u8, fraction: f32 },

    /// Phase thresholds are not strictly decreasing in health fraction.
    #[error("phase {phase} threshold {fraction} is not below the previous threshold {previous}")]
    ThresholdNotDecreasing { phase: u8, fraction: f32, previous: f32 },

    /// Phase indices must start at 2 and increase by one.
    #[error("expected phase {expected} in threshold table, found {found}")]
    PhaseOutOfSequence { expected: u8, found: u8 },

    /// More thresholds than the phase table can hold.
    #[error("at most {max} phase thresholds are supported (got {count})")]
    TooManyPhases { max: usize, count: usize },

    /// Poise regenerates continuously; a regen delay is not supported.
    #[error("poise.regen_delay must be 0 (got {delay})")]
    PoiseRegenDelayed { delay: f32 },

    /// Combo length must be at least one step.
    #[error("combo must allow at least one step")]
    EmptyCombo,

    /// Stick deadzone must lie in `[0, 1)`.
    #[error("deadzone {deadzone} must lie in [0, 1)")]
    DeadzoneOutOfRange { deadzone: f32 },

    /// The fixed tick rate must be non-zero.
    #[error("tick rate must be at least 1 Hz")]
    ZeroTickRate,
}

impl CombatError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ConfigError::*;
        match self {
            NotPositive { .. } => "CONFIG_NOT_POSITIVE",
            Negative { .. } => "CONFIG_NEGATIVE",
            NotFinite { .. } => "CONFIG_NOT_FINITE",
            InvulnerabilityExceedsDodge { .. } => "CONFIG_INVULNERABILITY_EXCEEDS_DODGE",
            ActiveWindowOutOfRange { .. } => "CONFIG_ACTIVE_WINDOW_OUT_OF_RANGE",
            ThresholdOutOfRange { .. } => "CONFIG_THRESHOLD_OUT_OF_RANGE",
            ThresholdNotDecreasing { .. } => "CONFIG_THRESHOLD_NOT_DECREASING",
            PhaseOutOfSequence { .. } => "CONFIG_PHASE_OUT_OF_SEQUENCE",
            TooManyPhases { .. } => "CONFIG_TOO_MANY_PHASES",
            PoiseRegenDelayed { .. } => "CONFIG_POISE_REGEN_DELAYED",
            EmptyCombo => "CONFIG_EMPTY_COMBO",
            DeadzoneOutOfRange { .. } => "CONFIG_DEADZONE_OUT_OF_RANGE",
            ZeroTickRate => "CONFIG_ZERO_TICK_RATE",
        }
    }
}

/// Why a requested transition did not happen.
///
/// A rejection never has side effects: no state change, no resource spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    /// The actor is dead; nothing transitions out of DEAD.
    #[error("actor is dead")]
    Dead,

    /// The current state is busy and refuses discretionary actions.
    #[error("actor is busy")]
    Busy,

    /// The actor is staggered (boss stagger flag).
    #[error("actor is staggered")]
    Staggered,

    /// Not enough stamina to pay the flat cost.
    #[error("insufficient stamina")]
    InsufficientStamina,

    /// The action is still cooling down.
    #[error("action is on cooldown")]
    OnCooldown,

    /// The action requires standing on the floor.
    #[error("actor is not grounded")]
    NotGrounded,

    /// The trigger has no edge out of the current state.
    #[error("trigger does not apply to the current state")]
    NotApplicable,
}

impl CombatError for Rejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        use Rejection::*;
        match self {
            Dead => "REJECT_DEAD",
            Busy => "REJECT_BUSY",
            Staggered => "REJECT_STAGGERED",
            InsufficientStamina => "REJECT_INSUFFICIENT_STAMINA",
            OnCooldown => "REJECT_ON_COOLDOWN",
            NotGrounded => "REJECT_NOT_GROUNDED",
            NotApplicable => "REJECT_NOT_APPLICABLE",
        }
    }
}
