use corsa_protocol::{Input, State, StateIndex, MIN_STATE_SIZE};
use thiserror::Error;

use crate::params::Params;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum DynamicsError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// A vehicle dynamics model: pure function of (state, input, duration).
pub trait DynamicModel {
    /// Integrate `state` forward by `duration` under constant `input`.
    ///
    /// Fails with [`DynamicsError::InvalidArgument`] for a non-positive
    /// duration or mismatched state/input dimensions; no partial state is
    /// ever returned.
    fn integrate(&self, state: &State, input: &Input, duration: f64)
        -> Result<State, DynamicsError>;

    /// Number of control inputs the model consumes.
    fn input_size(&self) -> usize;
}

/// Kinematic single-track (bicycle) model.
///
/// Inputs are `(acceleration, steering angle)`. Derivatives:
/// `x' = v cos θ`, `y' = v sin θ`, `θ' = v tan δ / wheel_base`, `v' = a`.
/// Integration is fixed-step forward Euler with an internal substep of
/// `integration_time_delta`, shortened on the last substep to land exactly
/// on the requested duration.
#[derive(Clone, Debug)]
pub struct SingleTrackModel {
    wheel_base: f64,
    integration_time_delta: f64,
}

impl SingleTrackModel {
    pub fn new(params: &dyn Params) -> Self {
        Self {
            wheel_base: params.real("wheel_base", 2.7),
            integration_time_delta: params.real("integration_time_delta", 0.01),
        }
    }

    fn step(&self, state: &State, input: &Input, dt: f64) -> State {
        let theta = state.theta();
        let v = state.vel();

        // Entries past the kinematic block are carried through untouched.
        let mut values = state.values().to_vec();
        values[StateIndex::Time as usize] = state.time() + dt;
        values[StateIndex::X as usize] = state.x() + v * theta.cos() * dt;
        values[StateIndex::Y as usize] = state.y() + v * theta.sin() * dt;
        values[StateIndex::Theta as usize] = theta + v * input.get(1).tan() / self.wheel_base * dt;
        values[StateIndex::Vel as usize] = v + input.get(0) * dt;
        State::new(values)
    }
}

impl DynamicModel for SingleTrackModel {
    fn integrate(
        &self,
        state: &State,
        input: &Input,
        duration: f64,
    ) -> Result<State, DynamicsError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(DynamicsError::InvalidArgument(format!(
                "duration must be positive and finite, got {duration}"
            )));
        }
        if state.len() < MIN_STATE_SIZE {
            return Err(DynamicsError::InvalidArgument(format!(
                "state has {} entries, single-track model needs at least {MIN_STATE_SIZE}",
                state.len()
            )));
        }
        if input.len() != self.input_size() {
            return Err(DynamicsError::InvalidArgument(format!(
                "input has {} entries, single-track model takes {}",
                input.len(),
                self.input_size()
            )));
        }

        let mut next = state.clone();
        let mut remaining = duration;
        while remaining > 1e-12 {
            let dt = self.integration_time_delta.min(remaining);
            next = self.step(&next, input, dt);
            remaining -= dt;
        }
        Ok(next)
    }

    fn input_size(&self) -> usize {
        2
    }
}
