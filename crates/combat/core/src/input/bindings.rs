use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;

use super::{ActionSet, InputAction, InputIntentSource, IntentSnapshot};
use crate::error::ConfigError;
use crate::math::clamp_intent;

/// A physical control an action can be bound to.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhysicalInput {
    Key(String),
    MouseButton(u8),
    GamepadButton(u8),
}

impl PhysicalInput {
    pub fn key(name: &str) -> Self {
        Self::Key(name.to_owned())
    }
}

/// Keys for the four movement directions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AxisBindings {
    pub forward: Vec<PhysicalInput>,
    pub back: Vec<PhysicalInput>,
    pub left: Vec<PhysicalInput>,
    pub right: Vec<PhysicalInput>,
}

/// Action → physical input table, passed in at construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputBindings {
    pub actions: BTreeMap<InputAction, Vec<PhysicalInput>>,
    pub movement: AxisBindings,
    /// Analog stick values below this magnitude read as zero.
    pub deadzone: f32,
}

impl Default for InputBindings {
    fn default() -> Self {
        use PhysicalInput::{GamepadButton, MouseButton};

        let actions = BTreeMap::from([
            (InputAction::Jump, vec![PhysicalInput::key("Space"), GamepadButton(0)]),
            (InputAction::Dodge, vec![PhysicalInput::key("LeftControl"), GamepadButton(1)]),
            (InputAction::Sprint, vec![PhysicalInput::key("LeftShift"), GamepadButton(8)]),
            (InputAction::LightAttack, vec![MouseButton(0), GamepadButton(2)]),
            (InputAction::HeavyAttack, vec![MouseButton(1), GamepadButton(3)]),
            (InputAction::Parry, vec![PhysicalInput::key("F"), GamepadButton(4)]),
            (InputAction::TargetLock, vec![MouseButton(2), GamepadButton(9)]),
            (InputAction::PauseMenu, vec![PhysicalInput::key("Escape"), GamepadButton(6)]),
        ]);

        Self {
            actions,
            movement: AxisBindings {
                forward: vec![PhysicalInput::key("W")],
                back: vec![PhysicalInput::key("S")],
                left: vec![PhysicalInput::key("A")],
                right: vec![PhysicalInput::key("D")],
            },
            deadzone: 0.2,
        }
    }
}

impl InputBindings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.deadzone) {
            return Err(ConfigError::DeadzoneOutOfRange {
                deadzone: self.deadzone,
            });
        }
        Ok(())
    }

    pub fn inputs_for(&self, action: InputAction) -> &[PhysicalInput] {
        self.actions.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Actions with at least one bound input currently down.
    pub fn held_actions(&self, raw: &RawInputState) -> ActionSet {
        self.actions
            .iter()
            .filter(|(_, inputs)| raw.any_down(inputs))
            .fold(ActionSet::empty(), |set, (action, _)| set | action.flag())
    }

    fn apply_deadzone(&self, stick: Vec2) -> Vec2 {
        if !stick.is_finite() || stick.length() < self.deadzone {
            Vec2::ZERO
        } else {
            stick
        }
    }
}

/// Raw device state for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawInputState {
    pub down: BTreeSet<PhysicalInput>,
    /// Left stick (x = right, y = forward).
    pub stick: Vec2,
    /// Right stick or mouse delta, already scaled to `[-1, 1]`.
    pub look: Vec2,
}

impl RawInputState {
    pub fn with_down(mut self, input: PhysicalInput) -> Self {
        self.down.insert(input);
        self
    }

    pub fn any_down(&self, inputs: &[PhysicalInput]) -> bool {
        inputs.iter().any(|input| self.down.contains(input))
    }
}

/// Turns raw device frames into [`IntentSnapshot`]s.
///
/// `pressed` is edge-detected against the previous frame, so holding a key
/// produces one press followed by held-only frames.
#[derive(Clone, Debug)]
pub struct BoundInputSource {
    bindings: InputBindings,
    previous_held: ActionSet,
    current: IntentSnapshot,
}

impl BoundInputSource {
    pub fn new(bindings: InputBindings) -> Result<Self, ConfigError> {
        bindings.validate()?;
        Ok(Self {
            bindings,
            previous_held: ActionSet::empty(),
            current: IntentSnapshot::NEUTRAL,
        })
    }

    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    pub fn current(&self) -> &IntentSnapshot {
        &self.current
    }

    /// Reads one raw frame and returns the resulting intent.
    pub fn update(&mut self, raw: &RawInputState) -> IntentSnapshot {
        let held = self.bindings.held_actions(raw);
        let pressed = held - self.previous_held;
        self.previous_held = held;

        let axis = &self.bindings.movement;
        let axis_value = |positive: &[PhysicalInput], negative: &[PhysicalInput]| {
            f32::from(u8::from(raw.any_down(positive))) - f32::from(u8::from(raw.any_down(negative)))
        };
        let keys = Vec2::new(
            axis_value(&axis.right, &axis.left),
            axis_value(&axis.forward, &axis.back),
        );
        let stick = self.bindings.apply_deadzone(raw.stick);

        self.current = IntentSnapshot {
            movement: clamp_intent(keys + stick),
            camera: self.bindings.apply_deadzone(raw.look),
            pressed,
            held,
        };
        self.current
    }
}

impl InputIntentSource for BoundInputSource {
    fn movement_vector(&self) -> Vec2 {
        self.current.movement_vector()
    }

    fn camera_vector(&self) -> Vec2 {
        self.current.camera_vector()
    }

    fn action_pressed(&self, action: InputAction) -> bool {
        self.current.action_pressed(action)
    }

    fn action_held(&self, action: InputAction) -> bool {
        self.current.action_held(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> BoundInputSource {
        BoundInputSource::new(InputBindings::default()).unwrap()
    }

    #[test]
    fn press_fires_once_then_holds() {
        let mut input = source();
        let frame = RawInputState::default().with_down(PhysicalInput::key("Space"));

        let first = input.update(&frame);
        assert!(first.action_pressed(InputAction::Jump));

        let second = input.update(&frame);
        assert!(!second.action_pressed(InputAction::Jump));
        assert!(second.action_held(InputAction::Jump));

        let released = input.update(&RawInputState::default());
        assert!(!released.action_held(InputAction::Jump));
    }

    #[test]
    fn any_bound_input_triggers_action() {
        let mut input = source();
        let pad = RawInputState::default().with_down(PhysicalInput::GamepadButton(2));
        assert!(input.update(&pad).action_pressed(InputAction::LightAttack));
    }

    #[test]
    fn diagonal_keys_are_normalized() {
        let mut input = source();
        let frame = RawInputState::default()
            .with_down(PhysicalInput::key("W"))
            .with_down(PhysicalInput::key("D"));
        let intent = input.update(&frame);
        assert!((intent.movement.length() - 1.0).abs() < 1e-5);
        assert!(intent.movement.x > 0.0 && intent.movement.y > 0.0);
    }

    #[test]
    fn stick_deadzone_filters_drift() {
        let mut input = source();
        let drift = RawInputState {
            stick: Vec2::new(0.1, 0.05),
            ..RawInputState::default()
        };
        assert_eq!(input.update(&drift).movement, Vec2::ZERO);
    }

    #[test]
    fn unbound_action_has_no_inputs() {
        let mut bindings = InputBindings::default();
        bindings.actions.remove(&InputAction::Parry);
        assert!(bindings.inputs_for(InputAction::Parry).is_empty());
    }

    #[test]
    fn deadzone_must_leave_headroom() {
        let bindings = InputBindings {
            deadzone: 1.0,
            ..InputBindings::default()
        };
        assert!(BoundInputSource::new(bindings).is_err());
    }
}
