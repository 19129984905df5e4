//! Motion primitives: precondition-gated generators of control input.
//!
//! A primitive is one selectable behavior choice. The library asks
//! [`Primitive::is_pre_condition_satisfied`] to filter choices that are
//! contextually infeasible, then replays [`Primitive::get_input`] every
//! reporting interval while the primitive is active. Calling `get_input`
//! without checking the precondition first is a caller bug; the returned
//! input is defined but carries no contract.

use std::any::Any;

use corsa_protocol::Input;
use serde::{Deserialize, Serialize};

use crate::world::ObservedWorld;

pub trait Primitive: std::fmt::Debug {
    /// Pure predicate over the observed world; must not mutate anything.
    fn is_pre_condition_satisfied(&self, world: &dyn ObservedWorld) -> bool;

    /// Control input for the upcoming integration window.
    ///
    /// Takes `&mut self` because macro actions advance their internal phase
    /// machine based on what they observe.
    fn get_input(&mut self, world: &dyn ObservedWorld) -> Input;

    /// Runtime-type access for the closed-world envelope registry.
    fn as_any(&self) -> &dyn Any;

    fn clone_box(&self) -> Box<dyn Primitive>;
}

impl Clone for Box<dyn Primitive> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Null the acceleration and steering, holding the current velocity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveConstantVelocity;

impl PrimitiveConstantVelocity {
    pub fn new() -> Self {
        Self
    }
}

impl Primitive for PrimitiveConstantVelocity {
    fn is_pre_condition_satisfied(&self, world: &dyn ObservedWorld) -> bool {
        let vel = world.current_ego_state().vel();
        vel.is_finite() && vel >= 0.0
    }

    fn get_input(&mut self, _world: &dyn ObservedWorld) -> Input {
        Input::zeroed(2)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn Primitive> {
        Box::new(self.clone())
    }
}

/// A fixed, caller-supplied input replayed on every interval.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveContinuousAction {
    input: Input,
}

impl PrimitiveContinuousAction {
    pub fn new(input: Input) -> Self {
        Self { input }
    }

    pub fn input(&self) -> &Input {
        &self.input
    }
}

impl Primitive for PrimitiveContinuousAction {
    fn is_pre_condition_satisfied(&self, _world: &dyn ObservedWorld) -> bool {
        true
    }

    fn get_input(&mut self, _world: &dyn ObservedWorld) -> Input {
        self.input.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn Primitive> {
        Box::new(self.clone())
    }
}

/// One phase of a macro action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MacroPhase {
    /// Apply `acceleration` until the ego speed crosses `target_speed`.
    AccelerateTo {
        target_speed: f64,
        acceleration: f64,
    },
    /// Hold the current velocity for `duration` seconds of world time.
    Hold { duration: f64 },
}

impl MacroPhase {
    /// Completion is a pure function of (phase, observed state, clock).
    fn is_complete(&self, speed: f64, entered_at: f64, now: f64) -> bool {
        match self {
            MacroPhase::AccelerateTo {
                target_speed,
                acceleration,
            } => {
                if *acceleration >= 0.0 {
                    speed >= *target_speed
                } else {
                    speed <= *target_speed
                }
            }
            MacroPhase::Hold { duration } => now - entered_at >= *duration,
        }
    }
}

/// Time-extended primitive: a chain of phases driven by completion
/// predicates, with the current phase and its entry time as explicit state.
/// Past the final phase the action keeps holding velocity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveMacroAction {
    phases: Vec<MacroPhase>,
    current: usize,
    phase_entered_at: Option<f64>,
}

impl PrimitiveMacroAction {
    pub fn new(phases: Vec<MacroPhase>) -> Self {
        Self {
            phases,
            current: 0,
            phase_entered_at: None,
        }
    }

    pub fn current_phase(&self) -> Option<&MacroPhase> {
        self.phases.get(self.current)
    }

    fn advance(&mut self, speed: f64, now: f64) {
        if self.phase_entered_at.is_none() {
            self.phase_entered_at = Some(now);
        }
        while let Some(phase) = self.phases.get(self.current) {
            let entered = self.phase_entered_at.unwrap_or(now);
            if !phase.is_complete(speed, entered, now) {
                break;
            }
            self.current += 1;
            self.phase_entered_at = Some(now);
        }
    }
}

impl Primitive for PrimitiveMacroAction {
    fn is_pre_condition_satisfied(&self, _world: &dyn ObservedWorld) -> bool {
        !self.phases.is_empty()
    }

    fn get_input(&mut self, world: &dyn ObservedWorld) -> Input {
        let speed = world.current_ego_state().vel();
        let now = world.world_time();
        self.advance(speed, now);

        match self.phases.get(self.current) {
            Some(MacroPhase::AccelerateTo { acceleration, .. }) => {
                Input::new(vec![*acceleration, 0.0])
            }
            Some(MacroPhase::Hold { .. }) | None => Input::zeroed(2),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn Primitive> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::FixedWorld;
    use corsa_protocol::State;

    fn world_with_speed(speed: f64, time: f64) -> FixedWorld {
        FixedWorld::new(State::new(vec![time, 0.0, 0.0, 0.0, speed]), time)
    }

    #[test]
    fn constant_velocity_requires_defined_forward_speed() {
        let primitive = PrimitiveConstantVelocity::new();
        assert!(primitive.is_pre_condition_satisfied(&world_with_speed(5.0, 0.0)));
        assert!(primitive.is_pre_condition_satisfied(&world_with_speed(0.0, 0.0)));
        assert!(!primitive.is_pre_condition_satisfied(&world_with_speed(-1.0, 0.0)));
        assert!(!primitive.is_pre_condition_satisfied(&world_with_speed(f64::NAN, 0.0)));
    }

    #[test]
    fn continuous_action_replays_its_input() {
        let mut primitive = PrimitiveContinuousAction::new(Input::new(vec![2.0, 0.1]));
        let input = primitive.get_input(&world_with_speed(3.0, 0.0));
        assert_eq!(input, Input::new(vec![2.0, 0.1]));
    }

    #[test]
    fn macro_action_accelerates_until_target_then_holds() {
        let mut primitive = PrimitiveMacroAction::new(vec![
            MacroPhase::AccelerateTo {
                target_speed: 5.0,
                acceleration: 2.0,
            },
            MacroPhase::Hold { duration: 1.0 },
        ]);

        let input = primitive.get_input(&world_with_speed(0.0, 0.0));
        assert_eq!(input.get(0), 2.0);

        let input = primitive.get_input(&world_with_speed(5.0, 2.5));
        assert_eq!(input.get(0), 0.0);
        assert_eq!(
            primitive.current_phase(),
            Some(&MacroPhase::Hold { duration: 1.0 })
        );

        // Hold expires after one second of world time.
        let input = primitive.get_input(&world_with_speed(5.0, 3.6));
        assert_eq!(input.get(0), 0.0);
        assert_eq!(primitive.current_phase(), None);
    }

    #[test]
    fn macro_action_with_no_phases_fails_precondition() {
        let primitive = PrimitiveMacroAction::new(vec![]);
        assert!(!primitive.is_pre_condition_satisfied(&world_with_speed(1.0, 0.0)));
    }

    #[test]
    fn deceleration_phase_completes_from_above() {
        let mut primitive = PrimitiveMacroAction::new(vec![MacroPhase::AccelerateTo {
            target_speed: 2.0,
            acceleration: -1.0,
        }]);

        let input = primitive.get_input(&world_with_speed(6.0, 0.0));
        assert_eq!(input.get(0), -1.0);

        let input = primitive.get_input(&world_with_speed(2.0, 4.0));
        assert_eq!(input.get(0), 0.0);
    }
}
