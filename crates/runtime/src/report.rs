//! Per-frame output of [`crate::Arena::step`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use combat_core::{ActorId, CombatEvent, HitOutcome, PresentationSink};

/// How an encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterOutcome {
    /// The boss died.
    PlayerVictory,
    /// The player died.
    PlayerDefeated,
}

/// Arena-level notifications that are not actor combat events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArenaEvent {
    /// Bounds moved an actor back onto the floor.
    PositionCorrected { actor: ActorId, from: Vec3, to: Vec3 },
    /// Emitted once, on the frame the outcome was decided.
    EncounterEnded { outcome: EncounterOutcome },
}

/// One resolved hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitRecord {
    pub attacker: ActorId,
    pub defender: ActorId,
    pub outcome: HitOutcome,
}

/// Everything one fixed step produced, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Index of the step that produced this report.
    pub tick: u64,
    pub events: Vec<(ActorId, CombatEvent)>,
    pub arena_events: Vec<ArenaEvent>,
    pub hits: Vec<HitRecord>,
}

impl FrameReport {
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    pub(crate) fn extend(&mut self, actor: ActorId, events: impl IntoIterator<Item = CombatEvent>) {
        self.events.extend(events.into_iter().map(|event| (actor, event)));
    }

    /// Combat events emitted by `actor` this frame.
    pub fn events_for(&self, actor: ActorId) -> impl Iterator<Item = &CombatEvent> {
        self.events
            .iter()
            .filter(move |(id, _)| *id == actor)
            .map(|(_, event)| event)
    }

    pub fn outcome(&self) -> Option<EncounterOutcome> {
        self.arena_events.iter().find_map(|event| match event {
            ArenaEvent::EncounterEnded { outcome } => Some(*outcome),
            ArenaEvent::PositionCorrected { .. } => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.arena_events.is_empty() && self.hits.is_empty()
    }

    /// Hands every combat event to `sink`, in order.
    pub fn dispatch(&self, sink: &mut impl PresentationSink) {
        for (actor, event) in &self.events {
            sink.on_event(*actor, event);
        }
    }
}
