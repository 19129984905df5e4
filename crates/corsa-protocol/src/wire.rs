use rmp_serde::{decode, encode};
use thiserror::Error;

use crate::{Envelope, State, Trajectory};

#[derive(Debug, Error)]
pub enum WireError {
    #[error("encode error: {0}")]
    Encode(#[from] encode::Error),
    #[error("decode error: {0}")]
    Decode(#[from] decode::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn serialize_state(state: &State) -> Result<Vec<u8>, WireError> {
    Ok(encode::to_vec(state)?)
}

pub fn deserialize_state(bytes: &[u8]) -> Result<State, WireError> {
    Ok(decode::from_slice(bytes)?)
}

pub fn serialize_trajectory(trajectory: &Trajectory) -> Result<Vec<u8>, WireError> {
    Ok(encode::to_vec(trajectory)?)
}

pub fn deserialize_trajectory(bytes: &[u8]) -> Result<Trajectory, WireError> {
    Ok(decode::from_slice(bytes)?)
}

pub fn serialize_envelope(envelope: &Envelope) -> Result<Vec<u8>, WireError> {
    Ok(encode::to_vec(envelope)?)
}

pub fn deserialize_envelope(bytes: &[u8]) -> Result<Envelope, WireError> {
    Ok(decode::from_slice(bytes)?)
}

pub fn serialize_trajectory_json(trajectory: &Trajectory) -> Result<String, WireError> {
    Ok(serde_json::to_string(trajectory)?)
}

pub fn deserialize_trajectory_json(json: &str) -> Result<Trajectory, WireError> {
    Ok(serde_json::from_str(json)?)
}

pub fn serialize_envelope_json(envelope: &Envelope) -> Result<String, WireError> {
    Ok(serde_json::to_string(envelope)?)
}

pub fn deserialize_envelope_json(json: &str) -> Result<Envelope, WireError> {
    Ok(serde_json::from_str(json)?)
}
