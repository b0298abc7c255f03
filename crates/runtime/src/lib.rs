//! Arena orchestration for the deterministic combat simulation.
//!
//! This crate wires the player and boss controllers from `combat-core` into a
//! fixed-timestep encounter. Consumers build an [`Arena`] with
//! [`ArenaBuilder`], feed it one input intent per step, and forward the
//! returned [`FrameReport`] to a presentation layer.
//!
//! Modules are organized by responsibility:
//! - [`arena`] hosts the orchestrator, its builder and configuration
//! - [`bounds`] and [`spawn`] implement the collaborator traits
//! - [`brain`] provides boss decisions
//! - [`kinematics`] integrates positions and senses the floor
//! - [`report`] holds per-frame events and outcomes
pub mod arena;
pub mod bounds;
pub mod brain;
pub mod error;
pub mod kinematics;
pub mod report;
pub mod spawn;

pub use arena::{Arena, ArenaBuilder, ArenaConfig, ArenaSnapshot};
pub use bounds::{CircleArena, RectArena};
pub use brain::{BossBrain, BossProvider, EncounterView, Stationary};
pub use error::{Result, RuntimeError};
pub use kinematics::{Body, GROUND_HEIGHT};
pub use report::{ArenaEvent, EncounterOutcome, FrameReport, HitRecord};
pub use spawn::FixedSpawns;
