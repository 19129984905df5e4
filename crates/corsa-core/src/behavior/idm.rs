use std::any::Any;

use corsa_protocol::{State, StateIndex, Trajectory};
use serde::{Deserialize, Serialize};

use crate::behavior::{check_ego_state, check_horizon, BehaviorModel, PlanError, TIME_EPS};
use crate::params::Params;
use crate::world::ObservedWorld;

/// Intelligent Driver Model (classic form), single-lane longitudinal control.
///
/// `a_idm = a_max (1 - (v/v0)^4 - (s*/s)^2)` with the desired gap
/// `s* = s0 + vT + v dv / (2 sqrt(a_max b))`. The leader is parameterized:
/// a vehicle `leader_distance` ahead at plan start moving at constant
/// `leader_velocity`. Map lookup of real leaders is an external concern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehaviorIdmClassic {
    desired_velocity: f64,
    minimum_spacing: f64,
    time_headway: f64,
    max_acceleration: f64,
    comfortable_braking: f64,
    leader_distance: f64,
    leader_velocity: f64,
    planning_time_delta: f64,
}

impl BehaviorIdmClassic {
    pub fn new(params: &dyn Params) -> Self {
        Self {
            desired_velocity: params.real("idm_desired_velocity", 15.0),
            minimum_spacing: params.real("idm_minimum_spacing", 2.0),
            time_headway: params.real("idm_time_headway", 1.5),
            max_acceleration: params.real("idm_max_acceleration", 1.4),
            comfortable_braking: params.real("idm_comfortable_braking", 2.0),
            leader_distance: params.real("idm_leader_distance", 100.0),
            leader_velocity: params.real("idm_leader_velocity", 15.0),
            planning_time_delta: params.real("planning_time_delta", 0.05),
        }
    }

    fn acceleration(&self, speed: f64, gap: f64) -> f64 {
        let free_term = (speed / self.desired_velocity).powi(4);
        let approach_rate = speed - self.leader_velocity;
        let desired_gap = self.minimum_spacing
            + speed * self.time_headway
            + speed * approach_rate / (2.0 * (self.max_acceleration * self.comfortable_braking).sqrt());
        let interaction_term = (desired_gap / gap.max(self.minimum_spacing)).powi(2);
        self.max_acceleration * (1.0 - free_term - interaction_term)
    }
}

impl BehaviorModel for BehaviorIdmClassic {
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

        let rows = (horizon / self.planning_time_delta).ceil() as usize + 1;
        let mut trajectory = Trajectory::with_capacity(rows);
        trajectory.push(start.clone());

        let mut time = start.time();
        let mut x = start.x();
        let mut y = start.y();
        let mut speed = start.vel();
        let mut gap = self.leader_distance;

        let mut elapsed = 0.0;
        while horizon - elapsed > TIME_EPS {
            let dt = self.planning_time_delta.min(horizon - elapsed);
            let accel = self.acceleration(speed, gap);

            time += dt;
            x += speed * theta.cos() * dt;
            y += speed * theta.sin() * dt;
            gap += (self.leader_velocity - speed) * dt;
            speed = (speed + accel * dt).max(0.0);

            trajectory.push(State::new(vec![time, x, y, theta, speed]));
            elapsed += dt;
        }
        Ok(trajectory)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
