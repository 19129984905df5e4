mod constant_velocity;
mod idm;
mod motion_primitives;
pub mod primitives;

pub use crate::behavior::constant_velocity::BehaviorConstantVelocity;
pub use crate::behavior::idm::BehaviorIdmClassic;
pub use crate::behavior::motion_primitives::{BehaviorMotionPrimitives, MotionIdx};

use std::any::Any;

use corsa_protocol::Trajectory;
use thiserror::Error;

use crate::dynamic::DynamicsError;
use crate::world::ObservedWorld;

/// Accumulated-time slack below which a horizon counts as covered.
pub(crate) const TIME_EPS: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("motion primitive index {0} was never registered")]
    OutOfRange(usize),
    #[error("no active motion primitive selected")]
    NotArmed,
    #[error(transparent)]
    Dynamics(#[from] DynamicsError),
}

/// A behavior model turns an observed world into a planned trajectory.
///
/// `plan` is deterministic: identical (state, configuration, horizon)
/// inputs always produce the identical trajectory.
pub trait BehaviorModel {
    fn plan(&mut self, horizon: f64, world: &dyn ObservedWorld)
        -> Result<Trajectory, PlanError>;

    /// Runtime-type access for the closed-world envelope registry.
    fn as_any(&self) -> &dyn Any;
}

pub(crate) fn check_horizon(horizon: f64) -> Result<(), PlanError> {
    if !horizon.is_finite() || horizon <= 0.0 {
        return Err(PlanError::InvalidArgument(format!(
            "planning horizon must be positive and finite, got {horizon}"
        )));
    }
    Ok(())
}

pub(crate) fn check_ego_state(state: &corsa_protocol::State) -> Result<(), PlanError> {
    if state.len() < corsa_protocol::MIN_STATE_SIZE {
        return Err(PlanError::InvalidArgument(format!(
            "ego state has {} entries, planning needs at least {}",
            state.len(),
            corsa_protocol::MIN_STATE_SIZE
        )));
    }
    Ok(())
}
