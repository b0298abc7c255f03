//! Combat resolution.
//!
//! - [`Swing`]: an attack in progress, its active window and hit registry
//! - [`AttackDescriptor`]: immutable damage/poise payload of a swing
//! - [`resolve_hit`]: applies one hit to a defender and reports the outcome

mod resolve;
mod swing;

pub use resolve::{HitKind, HitOutcome, MIN_DAMAGE, resolve_hit};
pub use swing::{AttackDescriptor, AttackKind, MAX_TARGETS_PER_SWING, Swing};
