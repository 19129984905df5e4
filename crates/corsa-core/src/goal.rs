use std::any::Any;

use corsa_protocol::State;
use serde::{Deserialize, Serialize};

/// A goal a behavior is trying to reach, testable against a single state.
pub trait GoalDefinition: std::fmt::Debug {
    fn at_goal(&self, state: &State) -> bool;

    /// Runtime-type access for the closed-world envelope registry.
    fn as_any(&self) -> &dyn Any;

    fn clone_box(&self) -> Box<dyn GoalDefinition>;
}

impl Clone for Box<dyn GoalDefinition> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Axis-aligned position box plus a heading band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalDefinitionStateLimits {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub theta_min: f64,
    pub theta_max: f64,
}

impl GoalDefinition for GoalDefinitionStateLimits {
    fn at_goal(&self, state: &State) -> bool {
        let (x, y, theta) = (state.x(), state.y(), state.theta());
        x >= self.x_min
            && x <= self.x_max
            && y >= self.y_min
            && y <= self.y_max
            && theta >= self.theta_min
            && theta <= self.theta_max
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn GoalDefinition> {
        Box::new(self.clone())
    }
}

/// Circular goal region around a point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalDefinitionPosition {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl GoalDefinition for GoalDefinitionPosition {
    fn at_goal(&self, state: &State) -> bool {
        let dx = state.x() - self.x;
        let dy = state.y() - self.y;
        (dx * dx + dy * dy).sqrt() <= self.radius
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn GoalDefinition> {
        Box::new(self.clone())
    }
}
