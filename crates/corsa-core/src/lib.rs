//! Deterministic single-agent motion-primitive planning core.
//!
//! Given an observed world view and a library of precondition-gated motion
//! primitives, the planner integrates a kinematic vehicle model forward over
//! a horizon and produces a dynamically feasible trajectory. Behavior
//! models, goal definitions, primitives, and label functions can cross a
//! serialization boundary through the closed-world envelope registry in
//! [`persist`].

pub mod behavior;
mod dynamic;
mod goal;
mod labels;
mod params;
pub mod persist;
mod world;

pub use crate::behavior::{
    BehaviorConstantVelocity, BehaviorIdmClassic, BehaviorModel, BehaviorMotionPrimitives,
    MotionIdx, PlanError,
};
pub use crate::dynamic::*;
pub use crate::goal::*;
pub use crate::labels::*;
pub use crate::params::*;
pub use crate::world::*;
