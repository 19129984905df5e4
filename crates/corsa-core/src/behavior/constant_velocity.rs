use std::any::Any;

use corsa_protocol::{State, StateIndex, Trajectory};
use serde::{Deserialize, Serialize};

use crate::behavior::{check_ego_state, check_horizon, BehaviorModel, PlanError, TIME_EPS};
use crate::params::Params;
use crate::world::ObservedWorld;

/// Hold the observed speed and heading for the whole horizon.
///
/// Equivalent to the single-track model under zero input, written in closed
/// form so the model stays plain data for the envelope registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehaviorConstantVelocity {
    planning_time_delta: f64,
}

impl BehaviorConstantVelocity {
    pub fn new(params: &dyn Params) -> Self {
        Self {
            planning_time_delta: params.real("planning_time_delta", 0.05),
        }
    }
}

impl BehaviorModel for BehaviorConstantVelocity {
    fn plan(
        &mut self,
        horizon: f64,
        world: &dyn ObservedWorld,
    ) -> Result<Trajectory, PlanError> {
        check_horizon(horizon)?;

        let ego = world.current_ego_state();
        check_ego_state(&ego)?;
        let start = ego.with(StateIndex::Time, world.world_time());
        let theta = start.theta();
        let vel = start.vel();

        let rows = (horizon / self.planning_time_delta).ceil() as usize + 1;
        let mut trajectory = Trajectory::with_capacity(rows);
        trajectory.push(start.clone());

        let mut elapsed = 0.0;
        while horizon - elapsed > TIME_EPS {
            let dt = self.planning_time_delta.min(horizon - elapsed);
            elapsed += dt;
            let state = State::new(vec![
                start.time() + elapsed,
                start.x() + vel * theta.cos() * elapsed,
                start.y() + vel * theta.sin() * elapsed,
                theta,
                vel,
            ]);
            trajectory.push(state);
        }
        Ok(trajectory)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
