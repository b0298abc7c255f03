//! Player controller: input intents in, transitions and events out.

use glam::Vec2;

use super::Actor;
use crate::config::{PlayerConfig, PlayerRules};
use crate::env::GroundContact;
use crate::error::{ConfigError, Rejection};
use crate::event::CombatEvent;
use crate::input::{InputAction, InputIntentSource};
use crate::math::{DIRECTION_EPSILON, angle_between, camera_relative, forward_from_yaw};
use crate::state::{ActorId, ActorState, Trigger};

/// Drives the player [`Actor`] from an [`InputIntentSource`].
#[derive(Clone, Debug)]
pub struct PlayerController {
    actor: Actor,
    rules: PlayerRules,
    camera_yaw: f32,
}

impl PlayerController {
    pub fn new(id: ActorId, config: &PlayerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            actor: Actor::player(id, config)?,
            rules: config.rules,
            camera_yaw: 0.0,
        })
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Mutable access for the cross-actor hit path.
    pub fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    pub fn rules(&self) -> &PlayerRules {
        &self.rules
    }

    pub fn camera_yaw(&self) -> f32 {
        self.camera_yaw
    }

    pub fn set_camera_yaw(&mut self, yaw: f32) {
        self.camera_yaw = yaw;
    }

    // ===== discretionary actions =====
    //
    // Each returns whether the action started. A `false` means nothing
    // changed: no state change, no stamina spent.

    /// Starts a dodge roll along `direction`, or along the facing when
    /// `direction` is zero.
    pub fn dodge(&mut self, direction: Vec2) -> bool {
        let locked = if direction.length() > DIRECTION_EPSILON {
            direction.normalize()
        } else {
            self.actor.forward()
        };
        let accepted = self.request(Trigger::Dodge).is_ok();
        if accepted {
            self.actor.dodge_direction = locked;
        }
        accepted
    }

    pub fn light_attack(&mut self) -> bool {
        self.request(Trigger::LightAttack).is_ok()
    }

    pub fn heavy_attack(&mut self) -> bool {
        self.request(Trigger::HeavyAttack).is_ok()
    }

    pub fn parry(&mut self) -> bool {
        self.request(Trigger::Parry).is_ok()
    }

    pub fn jump(&mut self) -> bool {
        self.request(Trigger::Jump).is_ok()
    }

    /// Fires a trigger and returns the reason if it was rejected.
    pub fn request(&mut self, trigger: Trigger) -> Result<ActorState, Rejection> {
        self.actor.fire(trigger).map(|t| t.to)
    }

    // ===== tick =====

    /// Advances the player by one fixed step and returns the events it produced.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &impl InputIntentSource,
        ground: GroundContact,
    ) -> Vec<CombatEvent> {
        if self.actor.is_dead() {
            self.actor.settle(ground, dt);
            return self.actor.drain_events();
        }
        let before = self.actor.observe();

        let expired = self.actor.advance_timers(dt);
        self.actor.handle_expired(expired);

        self.camera_yaw += input.camera_vector().x * self.rules.camera_sensitivity * dt;
        let intent = camera_relative(input.movement_vector(), self.camera_yaw);
        let has_intent = intent.length() > DIRECTION_EPSILON;

        self.actor.apply_ground(ground);

        if input.action_pressed(InputAction::Dodge) {
            self.dodge(intent);
        }
        if input.action_pressed(InputAction::HeavyAttack) {
            self.heavy_attack();
        }
        if input.action_pressed(InputAction::LightAttack) {
            self.light_attack();
        }
        if input.action_pressed(InputAction::Parry) {
            self.parry();
        }
        if input.action_pressed(InputAction::Jump) {
            self.jump();
        }
        if self.actor.state() == ActorState::Parrying && !input.action_held(InputAction::Parry) {
            let _ = self.actor.fire(Trigger::ParryReleased);
        }

        if self.actor.state() == ActorState::Sprinting
            && let Some(stamina) = self.actor.stamina.as_mut()
        {
            stamina.deplete(self.rules.sprint_drain * dt);
        }

        self.update_locomotion(intent, has_intent, input.action_held(InputAction::Sprint));
        self.actor.regenerate(dt);

        let steer = if has_intent { intent } else { Vec2::ZERO };
        self.actor.integrate_velocity(steer, dt);

        self.actor.emit_changes(&before);
        self.actor.drain_events()
    }

    fn update_locomotion(&mut self, intent: Vec2, has_intent: bool, sprint_held: bool) {
        if !has_intent {
            let _ = self.actor.fire(Trigger::Halt);
            return;
        }
        let resume_within_angle = self.actor.state() == ActorState::Stopping
            && angle_between(intent, self.actor.stop_direction)
                <= self.rules.resume_angle_degrees.to_radians();
        let guards = self.actor.guards(sprint_held, resume_within_angle);
        let _ = self.actor.try_transition(Trigger::Move, &guards);
    }

    /// World-space forward of the camera.
    pub fn camera_forward(&self) -> Vec2 {
        forward_from_yaw(self.camera_yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::IntentSnapshot;

    const DT: f32 = 0.0625;

    fn controller() -> PlayerController {
        PlayerController::new(ActorId::PLAYER, &PlayerConfig::default()).unwrap()
    }

    fn step(player: &mut PlayerController, input: IntentSnapshot) -> Vec<CombatEvent> {
        player.tick(DT, &input, GroundContact::GROUNDED)
    }

    #[test]
    fn walking_then_releasing_returns_to_idle() {
        let mut player = controller();
        let events = step(&mut player, IntentSnapshot::moving(Vec2::new(0.0, 1.0)));
        assert_eq!(player.actor().state(), ActorState::Moving);
        assert!(events.contains(&CombatEvent::StateChanged {
            new: ActorState::Moving,
            old: ActorState::Idle
        }));
        assert!(player.actor().velocity().z < 0.0, "forward is -Z");

        step(&mut player, IntentSnapshot::NEUTRAL);
        assert_eq!(player.actor().state(), ActorState::Idle);
    }

    #[test]
    fn sprint_drains_stamina_continuously() {
        let mut player = controller();
        let sprint = IntentSnapshot::moving(Vec2::new(0.0, 1.0)).hold(InputAction::Sprint);
        step(&mut player, sprint);
        assert_eq!(player.actor().state(), ActorState::Sprinting);

        for _ in 0..16 {
            step(&mut player, sprint);
        }
        let stamina = player.actor().stamina().unwrap().current();
        assert!((stamina - 85.0).abs() < 1e-3, "one second of sprint drains 15, got {stamina}");
    }

    #[test]
    fn exhausted_sprint_falls_back_to_walk() {
        let mut player = controller();
        assert!(player.actor.stamina.as_mut().unwrap().spend(99.5));
        let sprint = IntentSnapshot::moving(Vec2::new(0.0, 1.0)).hold(InputAction::Sprint);
        step(&mut player, sprint);
        assert_eq!(player.actor().state(), ActorState::Sprinting);
        step(&mut player, sprint);
        assert_eq!(player.actor().state(), ActorState::Moving);
    }

    #[test]
    fn sprint_release_goes_through_stopping() {
        let mut player = controller();
        let sprint = IntentSnapshot::moving(Vec2::new(0.0, 1.0)).hold(InputAction::Sprint);
        for _ in 0..8 {
            step(&mut player, sprint);
        }
        step(&mut player, IntentSnapshot::NEUTRAL);
        assert_eq!(player.actor().state(), ActorState::Stopping);

        // Resuming the same way lets the stop finish.
        step(&mut player, IntentSnapshot::moving(Vec2::new(0.0, 1.0)));
        assert_eq!(player.actor().state(), ActorState::Stopping);

        // Reversing interrupts it.
        step(&mut player, IntentSnapshot::moving(Vec2::new(0.0, -1.0)));
        assert_eq!(player.actor().state(), ActorState::Moving);
    }

    #[test]
    fn dodge_invulnerability_covers_only_the_window() {
        let mut player = controller();
        // Default dodge: 0.5s with a 0.25s window, i.e. 8 ticks with 4 invulnerable.
        step(&mut player, IntentSnapshot::NEUTRAL.press(InputAction::Dodge));
        assert_eq!(player.actor().state(), ActorState::Dodging);

        let mut flags = vec![player.actor().is_invulnerable()];
        for _ in 0..7 {
            step(&mut player, IntentSnapshot::NEUTRAL);
            assert_eq!(player.actor().state(), ActorState::Dodging);
            flags.push(player.actor().is_invulnerable());
        }
        assert_eq!(flags, vec![true, true, true, true, false, false, false, false]);

        step(&mut player, IntentSnapshot::NEUTRAL);
        assert_eq!(player.actor().state(), ActorState::Idle);
        assert!(player.actor().timers().dodge_cooldown.is_running());
    }

    #[test]
    fn busy_dodge_rejects_attacks_without_spending() {
        let mut player = controller();
        step(&mut player, IntentSnapshot::NEUTRAL.press(InputAction::Dodge));
        let stamina = player.actor().stamina().unwrap().current();

        assert!(!player.light_attack());
        assert!(!player.heavy_attack());
        assert_eq!(player.actor().stamina().unwrap().current(), stamina);
    }

    #[test]
    fn attack_finishes_then_combo_resets_after_grace() {
        let mut player = controller();
        step(&mut player, IntentSnapshot::NEUTRAL.press(InputAction::LightAttack));
        assert_eq!(player.actor().state(), ActorState::LightAttack);
        assert_eq!(player.actor().combo(), 1);

        // 0.5s swing.
        for _ in 0..8 {
            step(&mut player, IntentSnapshot::NEUTRAL);
        }
        assert_eq!(player.actor().state(), ActorState::Idle);
        assert_eq!(player.actor().combo(), 1);

        // 0.6s grace.
        for _ in 0..10 {
            step(&mut player, IntentSnapshot::NEUTRAL);
        }
        assert_eq!(player.actor().combo(), 0);
    }

    #[test]
    fn parry_lasts_while_held() {
        let mut player = controller();
        step(&mut player, IntentSnapshot::NEUTRAL.press(InputAction::Parry));
        assert_eq!(player.actor().state(), ActorState::Parrying);
        step(&mut player, IntentSnapshot::NEUTRAL.hold(InputAction::Parry));
        assert_eq!(player.actor().state(), ActorState::Parrying);
        step(&mut player, IntentSnapshot::NEUTRAL);
        assert_eq!(player.actor().state(), ActorState::Idle);
    }

    #[test]
    fn jump_rises_then_falls_then_lands() {
        let mut player = controller();
        step(&mut player, IntentSnapshot::NEUTRAL.press(InputAction::Jump));
        assert_eq!(player.actor().state(), ActorState::Jumping);
        assert!(player.actor().velocity().y > 0.0);

        let mut saw_falling = false;
        for _ in 0..64 {
            player.tick(DT, &IntentSnapshot::NEUTRAL, GroundContact::AIRBORNE);
            if player.actor().state() == ActorState::Falling {
                saw_falling = true;
                break;
            }
        }
        assert!(saw_falling);

        step(&mut player, IntentSnapshot::NEUTRAL);
        assert_eq!(player.actor().state(), ActorState::Idle);
        assert_eq!(player.actor().velocity().y, 0.0);
    }

    #[test]
    fn camera_input_turns_movement() {
        let mut player = controller();
        let look = IntentSnapshot::NEUTRAL.look(Vec2::new(1.0, 0.0));
        step(&mut player, look);
        let expected = 3.0 * DT;
        assert!((player.camera_yaw() - expected).abs() < 1e-6);
    }

    #[test]
    fn dead_player_ignores_input() {
        let mut player = controller();
        player.actor_mut().fire(Trigger::HealthDepleted).unwrap();
        let events = step(&mut player, IntentSnapshot::NEUTRAL.press(InputAction::Dodge));
        assert_eq!(events, vec![CombatEvent::Died]);
        assert_eq!(player.actor().state(), ActorState::Dead);
        assert!(step(&mut player, IntentSnapshot::moving(Vec2::X)).is_empty());
    }
}
