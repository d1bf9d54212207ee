//! Bake configuration for bonebake-core.

use serde::{Deserialize, Serialize};

/// Default cubic-bezier control points (x1, y1, x2, y2) used to ease the
/// interpolation alpha while resolving hierarchical deltas.
pub const DEFAULT_HIERARCHY_EASE: [f32; 4] = [0.42, 0.0, 0.58, 1.0];

/// Tuning knobs for one bake. Defaults reproduce the production behaviour;
/// expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    /// Two timeline instants closer than this (seconds) are the same instant.
    pub frame_epsilon: f32,
    /// Smallest sub-step (seconds) the rotation resampler may insert.
    pub min_frame_step: f32,
    /// Largest hierarchical rotation (degrees) allowed between two adjacent instants.
    pub max_segment_rotation: f32,
    /// How far (seconds) before a stepped keyframe the held value is sampled.
    pub step_lead: f32,
    /// Ease applied to the alpha when resolving hierarchical values. `None` keeps it linear.
    pub hierarchy_ease: Option<[f32; 4]>,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            frame_epsilon: 1e-4,
            min_frame_step: 0.05,
            max_segment_rotation: 90.0,
            step_lead: 0.05,
            hierarchy_ease: Some(DEFAULT_HIERARCHY_EASE),
        }
    }
}

impl BakeConfig {
    /// Replace non-finite or non-positive settings with their defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let pick = |v: f32, fallback: f32| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                fallback
            }
        };
        Self {
            frame_epsilon: pick(self.frame_epsilon, defaults.frame_epsilon),
            min_frame_step: pick(self.min_frame_step, defaults.min_frame_step),
            max_segment_rotation: pick(self.max_segment_rotation, defaults.max_segment_rotation),
            step_lead: pick(self.step_lead, defaults.step_lead),
            hierarchy_ease: self
                .hierarchy_ease
                .filter(|ctrl| ctrl.iter().all(|c| c.is_finite())),
        }
    }
}
