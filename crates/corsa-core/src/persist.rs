//! Closed-world envelope registry for polymorphic model hierarchies.
//!
//! Checkpointing an agent means moving trait objects across a
//! serialization boundary while preserving their concrete type. Each
//! hierarchy (behavior model, goal definition, primitive, label function)
//! enumerates its supported concrete subtypes here: conversion to an
//! [`Envelope`] matches on the runtime type, conversion back matches on the
//! tag. Anything outside the enumerated set is a hard error; adding a new
//! subtype means adding one branch to each direction for its hierarchy.

use corsa_protocol::Envelope;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::behavior::primitives::{
    Primitive, PrimitiveConstantVelocity, PrimitiveContinuousAction, PrimitiveMacroAction,
};
use crate::behavior::{BehaviorConstantVelocity, BehaviorIdmClassic, BehaviorModel};
use crate::goal::{GoalDefinition, GoalDefinitionPosition, GoalDefinitionStateLimits};
use crate::labels::{LabelFunction, NearPositionLabel, SpeedAboveLabel};

pub const TAG_BEHAVIOR_CONSTANT_VELOCITY: &str = "BehaviorConstantVelocity";
pub const TAG_BEHAVIOR_IDM_CLASSIC: &str = "BehaviorIdmClassic";
pub const TAG_PRIMITIVE_CONSTANT_VELOCITY: &str = "PrimitiveConstantVelocity";
pub const TAG_PRIMITIVE_CONTINUOUS_ACTION: &str = "PrimitiveContinuousAction";
pub const TAG_PRIMITIVE_MACRO_ACTION: &str = "PrimitiveMacroAction";
pub const TAG_GOAL_STATE_LIMITS: &str = "GoalDefinitionStateLimits";
pub const TAG_GOAL_POSITION: &str = "GoalDefinitionPosition";
pub const TAG_LABEL_SPEED_ABOVE: &str = "SpeedAboveLabel";
pub const TAG_LABEL_NEAR_POSITION: &str = "NearPositionLabel";

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("runtime type is not a registered {hierarchy} subtype")]
    UnknownSubtype { hierarchy: &'static str },
    #[error("tag `{tag}` is not a registered {hierarchy} subtype")]
    UnknownTag {
        hierarchy: &'static str,
        tag: String,
    },
    #[error("payload encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("payload decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

fn pack<T: Serialize>(tag: &str, value: &T) -> Result<Envelope, EnvelopeError> {
    Ok(Envelope::new(tag, rmp_serde::to_vec(value)?))
}

fn unpack<T: DeserializeOwned>(envelope: &Envelope) -> Result<T, EnvelopeError> {
    Ok(rmp_serde::from_slice(&envelope.payload)?)
}

pub fn behavior_to_envelope(model: &dyn BehaviorModel) -> Result<Envelope, EnvelopeError> {
    let any = model.as_any();
    if let Some(m) = any.downcast_ref::<BehaviorConstantVelocity>() {
        return pack(TAG_BEHAVIOR_CONSTANT_VELOCITY, m);
    }
    if let Some(m) = any.downcast_ref::<BehaviorIdmClassic>() {
        return pack(TAG_BEHAVIOR_IDM_CLASSIC, m);
    }
    Err(EnvelopeError::UnknownSubtype {
        hierarchy: "behavior model",
    })
}

pub fn behavior_from_envelope(
    envelope: &Envelope,
) -> Result<Box<dyn BehaviorModel>, EnvelopeError> {
    match envelope.tag.as_str() {
        TAG_BEHAVIOR_CONSTANT_VELOCITY => {
            Ok(Box::new(unpack::<BehaviorConstantVelocity>(envelope)?))
        }
        TAG_BEHAVIOR_IDM_CLASSIC => Ok(Box::new(unpack::<BehaviorIdmClassic>(envelope)?)),
        _ => Err(EnvelopeError::UnknownTag {
            hierarchy: "behavior model",
            tag: envelope.tag.clone(),
        }),
    }
}

pub fn primitive_to_envelope(primitive: &dyn Primitive) -> Result<Envelope, EnvelopeError> {
    let any = primitive.as_any();
    if let Some(p) = any.downcast_ref::<PrimitiveConstantVelocity>() {
        return pack(TAG_PRIMITIVE_CONSTANT_VELOCITY, p);
    }
    if let Some(p) = any.downcast_ref::<PrimitiveContinuousAction>() {
        return pack(TAG_PRIMITIVE_CONTINUOUS_ACTION, p);
    }
    if let Some(p) = any.downcast_ref::<PrimitiveMacroAction>() {
        return pack(TAG_PRIMITIVE_MACRO_ACTION, p);
    }
    Err(EnvelopeError::UnknownSubtype {
        hierarchy: "primitive",
    })
}

pub fn primitive_from_envelope(envelope: &Envelope) -> Result<Box<dyn Primitive>, EnvelopeError> {
    match envelope.tag.as_str() {
        TAG_PRIMITIVE_CONSTANT_VELOCITY => {
            Ok(Box::new(unpack::<PrimitiveConstantVelocity>(envelope)?))
        }
        TAG_PRIMITIVE_CONTINUOUS_ACTION => {
            Ok(Box::new(unpack::<PrimitiveContinuousAction>(envelope)?))
        }
        TAG_PRIMITIVE_MACRO_ACTION => Ok(Box::new(unpack::<PrimitiveMacroAction>(envelope)?)),
        _ => Err(EnvelopeError::UnknownTag {
            hierarchy: "primitive",
            tag: envelope.tag.clone(),
        }),
    }
}

pub fn goal_definition_to_envelope(goal: &dyn GoalDefinition) -> Result<Envelope, EnvelopeError> {
    let any = goal.as_any();
    if let Some(g) = any.downcast_ref::<GoalDefinitionStateLimits>() {
        return pack(TAG_GOAL_STATE_LIMITS, g);
    }
    if let Some(g) = any.downcast_ref::<GoalDefinitionPosition>() {
        return pack(TAG_GOAL_POSITION, g);
    }
    Err(EnvelopeError::UnknownSubtype {
        hierarchy: "goal definition",
    })
}

pub fn goal_definition_from_envelope(
    envelope: &Envelope,
) -> Result<Box<dyn GoalDefinition>, EnvelopeError> {
    match envelope.tag.as_str() {
        TAG_GOAL_STATE_LIMITS => Ok(Box::new(unpack::<GoalDefinitionStateLimits>(envelope)?)),
        TAG_GOAL_POSITION => Ok(Box::new(unpack::<GoalDefinitionPosition>(envelope)?)),
        _ => Err(EnvelopeError::UnknownTag {
            hierarchy: "goal definition",
            tag: envelope.tag.clone(),
        }),
    }
}

pub fn label_to_envelope(label: &dyn LabelFunction) -> Result<Envelope, EnvelopeError> {
    let any = label.as_any();
    if let Some(l) = any.downcast_ref::<SpeedAboveLabel>() {
        return pack(TAG_LABEL_SPEED_ABOVE, l);
    }
    if let Some(l) = any.downcast_ref::<NearPositionLabel>() {
        return pack(TAG_LABEL_NEAR_POSITION, l);
    }
    Err(EnvelopeError::UnknownSubtype {
        hierarchy: "label function",
    })
}

pub fn label_from_envelope(envelope: &Envelope) -> Result<Box<dyn LabelFunction>, EnvelopeError> {
    match envelope.tag.as_str() {
        TAG_LABEL_SPEED_ABOVE => Ok(Box::new(unpack::<SpeedAboveLabel>(envelope)?)),
        TAG_LABEL_NEAR_POSITION => Ok(Box::new(unpack::<NearPositionLabel>(envelope)?)),
        _ => Err(EnvelopeError::UnknownTag {
            hierarchy: "label function",
            tag: envelope.tag.clone(),
        }),
    }
}
