use std::any::Any;
use std::sync::Arc;

use corsa_protocol::{StateIndex, Trajectory};
use tracing::debug;

use crate::behavior::primitives::Primitive;
use crate::behavior::{check_ego_state, check_horizon, BehaviorModel, PlanError, TIME_EPS};
use crate::dynamic::DynamicModel;
use crate::params::Params;
use crate::world::{FixedWorld, ObservedWorld};

/// Stable identity of a registered motion primitive.
///
/// Indices are handed out in registration order starting at zero and are
/// never reused; the library is append-only.
pub type MotionIdx = usize;

/// Motion-primitive library and planner.
///
/// Moves through three states: empty, populated (primitives registered but
/// none selected), and armed (an active primitive selected via
/// [`action_to_behavior`](Self::action_to_behavior)). Planning requires the
/// armed state.
pub struct BehaviorMotionPrimitives {
    dynamics: Arc<dyn DynamicModel>,
    primitives: Vec<Box<dyn Primitive>>,
    active: Option<MotionIdx>,
    planning_time_delta: f64,
}

impl BehaviorMotionPrimitives {
    pub fn new(dynamics: Arc<dyn DynamicModel>, params: &dyn Params) -> Self {
        Self {
            dynamics,
            primitives: Vec::new(),
            active: None,
            planning_time_delta: params.real("planning_time_delta", 0.05),
        }
    }

    /// Register a primitive, returning its stable index.
    pub fn add_motion_primitive(&mut self, primitive: Box<dyn Primitive>) -> MotionIdx {
        self.primitives.push(primitive);
        self.primitives.len() - 1
    }

    /// Select the active primitive for subsequent [`plan`](BehaviorModel::plan) calls.
    pub fn action_to_behavior(&mut self, idx: MotionIdx) -> Result<(), PlanError> {
        if idx >= self.primitives.len() {
            return Err(PlanError::OutOfRange(idx));
        }
        self.active = Some(idx);
        Ok(())
    }

    pub fn num_motion_primitives(&self) -> usize {
        self.primitives.len()
    }

    pub fn active_index(&self) -> Option<MotionIdx> {
        self.active
    }

    pub fn primitive(&self, idx: MotionIdx) -> Option<&dyn Primitive> {
        self.primitives.get(idx).map(|p| p.as_ref())
    }

    /// Indices of primitives whose precondition holds in `world`.
    pub fn admissible_primitives(&self, world: &dyn ObservedWorld) -> Vec<MotionIdx> {
        self.primitives
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_pre_condition_satisfied(world))
            .map(|(idx, _)| idx)
            .collect()
    }
}

impl BehaviorModel for BehaviorMotionPrimitives {
    /// Integrate the active primitive forward until `horizon` is covered.
    ///
    /// The first trajectory row is the world's current ego state stamped
    /// with the world clock. Each following row is one reporting interval
    /// (`planning_time_delta`) later, except the last interval, which is
    /// shortened so the trajectory ends exactly on `horizon`. The active
    /// index is left untouched, so repeat calls with different horizons
    /// need no re-arming.
    fn plan(
        &mut self,
        horizon: f64,
        world: &dyn ObservedWorld,
    ) -> Result<Trajectory, PlanError> {
        let active = self.active.ok_or(PlanError::NotArmed)?;
        check_horizon(horizon)?;

        let ego = world.current_ego_state();
        check_ego_state(&ego)?;
        let start = ego.with(StateIndex::Time, world.world_time());
        debug!(active, horizon, "planning with motion primitive");

        let rows = (horizon / self.planning_time_delta).ceil() as usize + 1;
        let mut trajectory = Trajectory::with_capacity(rows);
        trajectory.push(start.clone());

        let mut current = start;
        let mut elapsed = 0.0;
        while horizon - elapsed > TIME_EPS {
            let dt = self.planning_time_delta.min(horizon - elapsed);
            let view = FixedWorld::new(current.clone(), current.time());
            let input = self.primitives[active].get_input(&view);
            current = self.dynamics.integrate(&current, &input, dt)?;
            trajectory.push(current.clone());
            elapsed += dt;
        }

        debug!(rows = trajectory.len(), "plan complete");
        Ok(trajectory)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
