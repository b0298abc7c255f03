//! Pure transition function for the actor state machine.
//!
//! [`next_state`] maps `(kind, current, trigger, guards)` to the new state and
//! the set of side effects to run, or to a [`Rejection`]. It never mutates
//! anything; [`crate::actor::Actor`] applies the returned [`Transition`].
//!
//! Player table:
//!
//! ```text
//! IDLE        --Move-->            MOVING | SPRINTING (sprint held, stamina > 0)
//! MOVING      --Halt-->            IDLE
//! MOVING      --Move+sprint-->     SPRINTING
//! SPRINTING   --Halt-->            STOPPING
//! SPRINTING   --Move, no sprint--> MOVING
//! STOPPING    --Move-->            stays (within resume angle, not sprinting) | MOVING | SPRINTING
//! STOPPING    --StoppingFinished-> IDLE
//! grounded    --Jump-->            JUMPING
//! JUMPING     --ApexReached-->     FALLING
//! any         --Airborne-->        FALLING (not while DODGING)
//! FALLING     --Landed-->          IDLE
//! not busy    --Dodge-->           DODGING (stamina, cooldown)
//! DODGING     --DodgeFinished-->   IDLE | FALLING (off the floor)
//! not busy    --Light/Heavy-->     LIGHT_ATTACK / HEAVY_ATTACK (stamina)
//! attacking   --AttackFinished-->  IDLE | FALLING (off the floor)
//! not busy    --Parry-->           PARRYING
//! PARRYING    --ParryReleased-->   IDLE | FALLING (off the floor)
//! non-dead    --PoiseBroken-->     STUNNED
//! STUNNED     --StaggerElapsed-->  IDLE | FALLING (off the floor)
//! non-dead    --HealthDepleted-->  DEAD
//! ```

use bitflags::bitflags;

use super::{ActorKind, ActorState};
use crate::error::Rejection;

/// Events that may move an actor between states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Trigger {
    /// Movement intent above the dead zone.
    Move,
    /// Movement intent back to (nearly) zero.
    Halt,
    StoppingFinished,
    Jump,
    /// Vertical velocity reached zero while jumping.
    ApexReached,
    /// Left the floor with downward velocity.
    Airborne,
    Landed,
    Dodge,
    DodgeFinished,
    LightAttack,
    HeavyAttack,
    AttackFinished,
    Parry,
    ParryReleased,
    PoiseBroken,
    StaggerElapsed,
    HealthDepleted,
}

impl Trigger {
    /// Player-initiated actions that busy states refuse.
    pub const fn is_discretionary(self) -> bool {
        matches!(
            self,
            Self::Jump | Self::Dodge | Self::LightAttack | Self::HeavyAttack | Self::Parry
        )
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Facts about the actor the transition table needs but does not own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Guards {
    pub on_floor: bool,
    pub sprint_held: bool,
    /// Stamina strictly above zero.
    pub has_stamina: bool,
    pub can_afford_dodge: bool,
    pub can_afford_light: bool,
    pub can_afford_heavy: bool,
    pub dodge_ready: bool,
    pub attack_ready: bool,
    pub staggered: bool,
    /// While STOPPING: the resumed direction is within the resume angle of the
    /// direction the actor was sprinting in.
    pub resume_within_angle: bool,
}

impl Guards {
    fn wants_sprint(&self) -> bool {
        self.sprint_held && self.has_stamina
    }

    /// Where a finished timed action leaves the player.
    fn rest_state(&self) -> ActorState {
        if self.on_floor {
            ActorState::Idle
        } else {
            ActorState::Falling
        }
    }
}

bitflags! {
    /// Side effects that accompany a transition.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Effects: u32 {
        const SPEND_DODGE_STAMINA   = 1 << 0;
        const SPEND_LIGHT_STAMINA   = 1 << 1;
        const SPEND_HEAVY_STAMINA   = 1 << 2;
        const START_DODGE           = 1 << 3;
        const GRANT_INVULNERABILITY = 1 << 4;
        const START_DODGE_COOLDOWN  = 1 << 5;
        const START_ATTACK          = 1 << 6;
        const START_ATTACK_COOLDOWN = 1 << 7;
        const ADVANCE_COMBO         = 1 << 8;
        const START_COMBO_GRACE     = 1 << 9;
        const START_STOPPING        = 1 << 10;
        const JUMP_IMPULSE          = 1 << 11;
        const START_STAGGER         = 1 << 12;
        const SET_STAGGERED         = 1 << 13;
        const CLEAR_STAGGERED       = 1 << 14;
        const RESTORE_HALF_POISE    = 1 << 15;
        const CANCEL_TIMERS         = 1 << 16;
        const DISABLE_HIT_DETECTION = 1 << 17;
    }
}

/// Result of a legal transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: ActorState,
    pub to: ActorState,
    pub trigger: Trigger,
    pub effects: Effects,
}

impl Transition {
    const fn new(from: ActorState, trigger: Trigger, to: ActorState, effects: Effects) -> Self {
        Self {
            from,
            to,
            trigger,
            effects,
        }
    }
}

/// Computes the transition for `trigger` without mutating anything.
///
/// # Errors
///
/// Returns the [`Rejection`] reason when the trigger has no effect. A rejected
/// trigger must leave the actor untouched.
pub fn next_state(
    kind: ActorKind,
    current: ActorState,
    trigger: Trigger,
    guards: &Guards,
) -> Result<Transition, Rejection> {
    use ActorState::*;

    if current == Dead {
        return Err(Rejection::Dead);
    }

    let edge = |to, effects| Ok(Transition::new(current, trigger, to, effects));

    match trigger {
        Trigger::HealthDepleted => edge(
            Dead,
            Effects::CANCEL_TIMERS | Effects::DISABLE_HIT_DETECTION,
        ),
        Trigger::PoiseBroken => {
            if guards.staggered {
                return Err(Rejection::Staggered);
            }
            let effects = Effects::CANCEL_TIMERS | Effects::START_STAGGER | Effects::SET_STAGGERED;
            match kind {
                ActorKind::Player => edge(Stunned, effects),
                // The boss keeps falling while staggered; otherwise it drops
                // whatever it was doing.
                ActorKind::Boss if current.is_airborne() => edge(current, effects),
                ActorKind::Boss => edge(Idle, effects),
            }
        }
        Trigger::StaggerElapsed => {
            if !guards.staggered {
                return Err(Rejection::NotApplicable);
            }
            let effects = Effects::CLEAR_STAGGERED | Effects::RESTORE_HALF_POISE;
            match (kind, current) {
                (ActorKind::Player, Stunned) => edge(guards.rest_state(), effects),
                (ActorKind::Player, _) => Err(Rejection::NotApplicable),
                (ActorKind::Boss, _) => edge(current, effects),
            }
        }
        _ => match kind {
            ActorKind::Player => player_edge(current, trigger, guards),
            ActorKind::Boss => boss_edge(current, trigger, guards),
        },
    }
}

fn player_edge(
    current: ActorState,
    trigger: Trigger,
    guards: &Guards,
) -> Result<Transition, Rejection> {
    use ActorState::*;

    let edge = |to, effects| Ok(Transition::new(current, trigger, to, effects));

    if trigger.is_discretionary() {
        if current.is_busy() {
            return Err(Rejection::Busy);
        }
        if guards.staggered {
            return Err(Rejection::Staggered);
        }
    }

    match (trigger, current) {
        (Trigger::Move, Idle) => {
            if guards.wants_sprint() {
                edge(Sprinting, Effects::empty())
            } else {
                edge(Moving, Effects::empty())
            }
        }
        (Trigger::Move, Moving) if guards.wants_sprint() => edge(Sprinting, Effects::empty()),
        (Trigger::Move, Sprinting) if !guards.wants_sprint() => edge(Moving, Effects::empty()),
        (Trigger::Move, Stopping) => {
            if guards.resume_within_angle && !guards.wants_sprint() {
                // Let the stopping animation finish.
                Err(Rejection::Busy)
            } else if guards.wants_sprint() {
                edge(Sprinting, Effects::empty())
            } else {
                edge(Moving, Effects::empty())
            }
        }
        (Trigger::Halt, Moving) => edge(Idle, Effects::empty()),
        (Trigger::Halt, Sprinting) => edge(Stopping, Effects::START_STOPPING),
        (Trigger::StoppingFinished, Stopping) => edge(Idle, Effects::empty()),

        (Trigger::Jump, _) => {
            if !guards.on_floor || !current.is_grounded_locomotion() {
                return Err(Rejection::NotGrounded);
            }
            edge(Jumping, Effects::JUMP_IMPULSE)
        }
        (Trigger::ApexReached, Jumping) => edge(Falling, Effects::empty()),
        (Trigger::Airborne, Dodging | Jumping | Falling | Stunned) => {
            Err(Rejection::NotApplicable)
        }
        (Trigger::Airborne, _) => edge(Falling, Effects::CANCEL_TIMERS),
        (Trigger::Landed, Falling | Jumping) => edge(Idle, Effects::empty()),

        (Trigger::Dodge, _) => {
            if !guards.dodge_ready {
                return Err(Rejection::OnCooldown);
            }
            if !guards.can_afford_dodge {
                return Err(Rejection::InsufficientStamina);
            }
            edge(
                Dodging,
                Effects::SPEND_DODGE_STAMINA | Effects::START_DODGE | Effects::GRANT_INVULNERABILITY,
            )
        }
        (Trigger::DodgeFinished, Dodging) => {
            edge(guards.rest_state(), Effects::START_DODGE_COOLDOWN)
        }

        (Trigger::LightAttack, _) => {
            if !guards.can_afford_light {
                return Err(Rejection::InsufficientStamina);
            }
            edge(
                LightAttack,
                Effects::SPEND_LIGHT_STAMINA | Effects::START_ATTACK | Effects::ADVANCE_COMBO,
            )
        }
        (Trigger::HeavyAttack, _) => {
            if !guards.can_afford_heavy {
                return Err(Rejection::InsufficientStamina);
            }
            edge(
                HeavyAttack,
                Effects::SPEND_HEAVY_STAMINA | Effects::START_ATTACK | Effects::ADVANCE_COMBO,
            )
        }
        (Trigger::AttackFinished, LightAttack | HeavyAttack) => {
            edge(guards.rest_state(), Effects::START_COMBO_GRACE)
        }

        (Trigger::Parry, _) => edge(Parrying, Effects::empty()),
        (Trigger::ParryReleased, Parrying) => edge(guards.rest_state(), Effects::empty()),

        _ => Err(Rejection::NotApplicable),
    }
}

fn boss_edge(
    current: ActorState,
    trigger: Trigger,
    guards: &Guards,
) -> Result<Transition, Rejection> {
    use ActorState::*;

    let edge = |to, effects| Ok(Transition::new(current, trigger, to, effects));

    match (trigger, current) {
        (Trigger::LightAttack | Trigger::HeavyAttack, _) => {
            if guards.staggered {
                return Err(Rejection::Staggered);
            }
            if current.is_attacking() {
                return Err(Rejection::Busy);
            }
            if !matches!(current, Idle | Moving) || !guards.on_floor {
                return Err(Rejection::NotGrounded);
            }
            if !guards.attack_ready {
                return Err(Rejection::OnCooldown);
            }
            let to = if trigger == Trigger::LightAttack {
                LightAttack
            } else {
                HeavyAttack
            };
            edge(to, Effects::START_ATTACK)
        }
        (Trigger::AttackFinished, LightAttack | HeavyAttack) => {
            edge(Idle, Effects::START_ATTACK_COOLDOWN)
        }
        (Trigger::Move, Idle) => {
            if guards.staggered {
                return Err(Rejection::Staggered);
            }
            edge(Moving, Effects::empty())
        }
        (Trigger::Halt, Moving) => edge(Idle, Effects::empty()),
        (Trigger::Airborne, Jumping | Falling) => Err(Rejection::NotApplicable),
        (Trigger::Airborne, _) => edge(Falling, Effects::CANCEL_TIMERS),
        (Trigger::Landed, Falling | Jumping) => edge(Idle, Effects::empty()),
        _ => Err(Rejection::NotApplicable),
    }
}
