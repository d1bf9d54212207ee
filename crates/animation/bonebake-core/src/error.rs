//! Error types raised while loading and validating blueprints.
//!
//! Baking itself never fails on validated data; these errors stop bad input at
//! the boundary instead.

use crate::data::Channel;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BakeError {
    /// Blueprint JSON could not be parsed.
    #[error("blueprint parse error: {0}")]
    Parse(String),

    /// Animation length must be finite and non-negative.
    #[error("invalid length {length} for animation '{animation}'")]
    InvalidLength { animation: String, length: f32 },

    /// Keyframe time must be finite and non-negative.
    #[error("invalid keyframe time {time} on {bone}.{channel}")]
    InvalidTime {
        bone: String,
        channel: Channel,
        time: f32,
    },

    /// Keyframe vector components must be finite.
    #[error("non-finite keyframe vector at t={time} on {bone}.{channel}")]
    InvalidVector {
        bone: String,
        channel: Channel,
        time: f32,
    },

    /// Bone names must be unique within a skeleton.
    #[error("duplicate bone '{0}' in skeleton")]
    DuplicateBone(String),
}

impl From<serde_json::Error> for BakeError {
    fn from(e: serde_json::Error) -> Self {
        BakeError::Parse(e.to_string())
    }
}
