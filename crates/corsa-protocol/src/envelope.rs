use serde::{Deserialize, Serialize};

/// A polymorphic object flattened for a serialization boundary.
///
/// `tag` names the concrete subtype; `payload` is its MessagePack encoding.
/// Envelopes exist only while crossing the boundary; the in-memory
/// representation is always the concrete type behind its hierarchy handle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub tag: String,
    pub payload: Vec<u8>,
}

impl Envelope {
    pub fn new(tag: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            tag: tag.into(),
            payload,
        }
    }
}
