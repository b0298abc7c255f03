//! Presentation sink that writes combat events to the log.

use combat_core::{ActorId, CombatEvent, PresentationSink};

#[derive(Debug, Default)]
pub struct TracingSink {
    tick: u64,
}

impl TracingSink {
    pub fn set_tick(&mut self, tick: u64) {
        self.tick = tick;
    }
}

fn label(actor: ActorId) -> &'static str {
    match actor {
        ActorId::PLAYER => "player",
        ActorId::BOSS => "boss",
        _ => "actor",
    }
}

impl PresentationSink for TracingSink {
    fn on_event(&mut self, actor: ActorId, event: &CombatEvent) {
        let who = label(actor);
        let tick = self.tick;
        match event {
            CombatEvent::Damaged {
                amount,
                current_hp,
                max_hp,
            } => tracing::info!("[{tick}] {who} took {amount:.0} damage ({current_hp:.0}/{max_hp:.0})"),
            CombatEvent::Staggered => tracing::info!("[{tick}] {who} staggered"),
            CombatEvent::StaggerRecovered => tracing::info!("[{tick}] {who} recovered"),
            CombatEvent::Died => tracing::info!("[{tick}] {who} died"),
            CombatEvent::PhaseChanged { phase } => {
                tracing::info!("[{tick}] {who} entered phase {phase}")
            }
            CombatEvent::StateChanged { new, old } => {
                tracing::debug!("[{tick}] {who} {old:?} -> {new:?}")
            }
            CombatEvent::HealthChanged { current, max } => {
                tracing::debug!("[{tick}] {who} health {current:.0}/{max:.0}")
            }
            CombatEvent::StaminaChanged { current, max } => {
                tracing::trace!("[{tick}] {who} stamina {current:.1}/{max:.1}")
            }
        }
    }
}
