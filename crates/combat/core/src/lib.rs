//! Deterministic combat simulation shared by the arena runtime and tools.
//!
//! `combat-core` defines the combat rules (actor state machine, resource
//! pools, hit resolution, boss phases) as pure, tick-driven APIs. Nothing here
//! blocks, logs or performs I/O: every delay is a countdown advanced by the
//! caller, and every outward notification is returned as a [`CombatEvent`]
//! from the tick that produced it. All state transitions flow through
//! [`state::next_state`].
pub mod actor;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod event;
pub mod input;
pub mod math;
pub mod phase;
pub mod resource;
pub mod snapshot;
pub mod state;
pub mod timer;

pub use actor::{Actor, BossCommand, BossController, PlayerController};
pub use combat::{
    AttackDescriptor, AttackKind, HitKind, HitOutcome, MAX_TARGETS_PER_SWING, MIN_DAMAGE, Swing,
    resolve_hit,
};
pub use config::{
    ActorConfig, AttackProfile, BossConfig, CombatConfig, DodgeTuning, PlayerConfig, PlayerRules,
};
pub use env::{ArenaBounds, GroundContact, SpawnProvider};
pub use error::{CombatError, ConfigError, ErrorSeverity, Rejection};
pub use event::{CombatEvent, EventOutbox, Observation, PresentationSink, RecordingSink, diff_events};
pub use input::{
    ActionSet, AxisBindings, BoundInputSource, InputAction, InputBindings, InputIntentSource,
    IntentSnapshot, PhysicalInput, RawInputState,
};
pub use phase::{MAX_PHASES, PhaseController, PhaseThreshold};
pub use resource::{PoolConfig, ResourceKind, ResourcePool};
#[cfg(feature = "serde")]
pub use snapshot::compute_state_digest;
pub use snapshot::ActorSnapshot;
pub use state::{
    ActorId, ActorKind, ActorState, Effects, Guards, MovementTuning, PhysicsTable, Transition,
    Trigger, VelocityMode, VelocityRule, next_state,
};
pub use timer::{Countdown, ExpiredTimers, TimerSet};
