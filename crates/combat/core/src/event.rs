//! Events emitted toward presentation layers.
//!
//! Actors never call out during a tick. Events accumulate in an
//! [`EventOutbox`] and are handed back from the tick call, after which the
//! caller may relay them to any number of [`PresentationSink`]s. Sinks only
//! receive shared references, so nothing they do can reach back into the
//! simulation.
//!
//! Two sources feed the outbox:
//!
//! - explicit pushes (`Damaged`, `Staggered`, `StaggerRecovered`, `Died`,
//!   `PhaseChanged`) at the point where the resolver or controller decides them;
//! - [`diff_events`] between an [`Observation`] taken before and after a mutation,
//!   which yields `HealthChanged`, `StaminaChanged` and `StateChanged`.

use crate::state::{ActorId, ActorState};

/// A fire-and-forget notification about one actor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    HealthChanged { current: f32, max: f32 },
    StaminaChanged { current: f32, max: f32 },
    StateChanged { new: ActorState, old: ActorState },
    /// A hit landed. `amount` is the damage after defense.
    Damaged { amount: f32, current_hp: f32, max_hp: f32 },
    Staggered,
    StaggerRecovered,
    Died,
    PhaseChanged { phase: u8 },
}

impl CombatEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HealthChanged { .. } => "health_changed",
            Self::StaminaChanged { .. } => "stamina_changed",
            Self::StateChanged { .. } => "state_changed",
            Self::Damaged { .. } => "damaged",
            Self::Staggered => "staggered",
            Self::StaggerRecovered => "stagger_recovered",
            Self::Died => "actor_died",
            Self::PhaseChanged { .. } => "phase_changed",
        }
    }
}

/// Pending events for one actor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventOutbox {
    events: Vec<CombatEvent>,
}

impl EventOutbox {
    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = CombatEvent>) {
        self.events.extend(events);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn as_slice(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Takes every pending event, leaving the outbox empty.
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }
}

/// The parts of an actor that produce change events when they differ.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    pub state: ActorState,
    pub health: (f32, f32),
    pub stamina: Option<(f32, f32)>,
}

/// Change events between two observations of the same actor.
pub fn diff_events(before: &Observation, after: &Observation) -> impl Iterator<Item = CombatEvent> {
    let health = (before.health.0 != after.health.0).then_some(CombatEvent::HealthChanged {
        current: after.health.0,
        max: after.health.1,
    });

    let stamina = match (before.stamina, after.stamina) {
        (Some((old, _)), Some((current, max))) if old != current => {
            Some(CombatEvent::StaminaChanged { current, max })
        }
        _ => None,
    };

    let state = (before.state != after.state).then_some(CombatEvent::StateChanged {
        new: after.state,
        old: before.state,
    });

    health.into_iter().chain(stamina).chain(state)
}

/// Receives events after a frame completes.
///
/// Implementations get shared references only and return nothing.
pub trait PresentationSink {
    fn on_event(&mut self, actor: ActorId, event: &CombatEvent);
}

/// Collects every event it receives. Handy for tests and replays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSink {
    pub events: Vec<(ActorId, CombatEvent)>,
}

impl PresentationSink for RecordingSink {
    fn on_event(&mut self, actor: ActorId, event: &CombatEvent) {
        self.events.push((actor, *event));
    }
}
