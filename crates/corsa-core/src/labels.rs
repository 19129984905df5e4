use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::world::ObservedWorld;

/// Atomic proposition over an observed world, usable by rule evaluators.
pub trait LabelFunction: std::fmt::Debug {
    fn evaluate(&self, world: &dyn ObservedWorld) -> bool;

    /// Runtime-type access for the closed-world envelope registry.
    fn as_any(&self) -> &dyn Any;

    fn clone_box(&self) -> Box<dyn LabelFunction>;
}

impl Clone for Box<dyn LabelFunction> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// True while the ego speed exceeds `threshold`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedAboveLabel {
    pub threshold: f64,
}

impl LabelFunction for SpeedAboveLabel {
    fn evaluate(&self, world: &dyn ObservedWorld) -> bool {
        world.current_ego_state().vel() > self.threshold
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn LabelFunction> {
        Box::new(self.clone())
    }
}

/// True while the ego position is within `radius` of `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearPositionLabel {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl LabelFunction for NearPositionLabel {
    fn evaluate(&self, world: &dyn ObservedWorld) -> bool {
        let state = world.current_ego_state();
        let dx = state.x() - self.x;
        let dy = state.y() - self.y;
        (dx * dx + dy * dy).sqrt() <= self.radius
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn LabelFunction> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::FixedWorld;
    use corsa_protocol::State;

    #[test]
    fn speed_label_is_strictly_above() {
        let label = SpeedAboveLabel { threshold: 5.0 };
        let at = FixedWorld::new(State::new(vec![0.0, 0.0, 0.0, 0.0, 5.0]), 0.0);
        let above = FixedWorld::new(State::new(vec![0.0, 0.0, 0.0, 0.0, 5.1]), 0.0);

        assert!(!label.evaluate(&at));
        assert!(label.evaluate(&above));
    }

    #[test]
    fn near_position_label_uses_euclidean_distance() {
        let label = NearPositionLabel {
            x: 0.0,
            y: 0.0,
            radius: 5.0,
        };
        let inside = FixedWorld::new(State::new(vec![0.0, 3.0, 4.0, 0.0, 0.0]), 0.0);
        let outside = FixedWorld::new(State::new(vec![0.0, 3.1, 4.0, 0.0, 0.0]), 0.0);

        assert!(label.evaluate(&inside));
        assert!(!label.evaluate(&outside));
    }
}
