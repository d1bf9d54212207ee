//! Baking API: compile an animation blueprint into per-bone movements sampled
//! on one unified timeline.
//!
//! Pipeline: authored times → rotation subdivision → step boundaries →
//! per-bone evaluation of each bone's own tracks.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::blueprint::AnimationBlueprint;
use crate::config::BakeConfig;
use crate::data::{BoneAnimatorData, Channel, ChannelTrack, Vec3, ONE, ZERO};
use crate::error::BakeError;
use crate::hierarchy::AccumulationTree;
use crate::interp::{alpha, lerp_vec3};
use crate::resample::{interpolate_rotation, interpolate_step};
use crate::skeleton::Skeleton;
use crate::timeline::build_timeline;

/// Resolved transform of one bone at one timeline instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub time: f32,
    pub position: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Movement {
    pub fn identity(time: f32) -> Self {
        Self {
            time,
            position: ZERO,
            rotation: ZERO,
            scale: ONE,
        }
    }

    /// All-zero movement, used for the neutral `empty_movements` sequence.
    pub fn zero(time: f32) -> Self {
        Self {
            time,
            position: ZERO,
            rotation: ZERO,
            scale: ZERO,
        }
    }
}

/// Baked output for one bone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedAnimator {
    pub name: String,
    pub movements: Vec<Movement>,
}

impl BakedAnimator {
    /// Movement recorded at `time` (within `epsilon`).
    pub fn movement_at(&self, time: f32, epsilon: f32) -> Option<&Movement> {
        let idx = self.movements.partition_point(|m| m.time < time - epsilon);
        self.movements
            .get(idx)
            .filter(|m| (m.time - time).abs() <= epsilon)
    }
}

/// Forward-only evaluator over one channel track. Times must be non-decreasing.
struct TrackEvaluator<'a> {
    track: &'a ChannelTrack,
    identity: Vec3,
    cursor: usize,
}

impl<'a> TrackEvaluator<'a> {
    fn new(track: &'a ChannelTrack, channel: Channel) -> Self {
        Self {
            track,
            identity: channel.identity(),
            cursor: 0,
        }
    }

    fn sample(&mut self, time: f32) -> Vec3 {
        let points = self.track.points();
        match points.len() {
            0 => return self.identity,
            1 => return points[0].vector,
            _ => {}
        }
        let last = points.len() - 1;
        if time <= points[0].time {
            return points[0].vector;
        }
        if time >= points[last].time {
            return points[last].vector;
        }
        while self.cursor < last && points[self.cursor + 1].time < time {
            self.cursor += 1;
        }
        // points[cursor].time < time <= points[cursor + 1].time
        let next_idx = self.cursor + 1;
        let prev = &points[self.cursor];
        let next = &points[next_idx];
        if next.time == time {
            next.vector
        } else if self.track.is_stepped_segment(next_idx) {
            prev.vector
        } else {
            lerp_vec3(prev.vector, next.vector, alpha(prev.time, next.time, time))
        }
    }
}

/// Evaluate one channel at every time in `times` (sorted ascending).
pub fn bake_channel_values(track: &ChannelTrack, channel: Channel, times: &[f32]) -> Vec<Vec3> {
    let mut eval = TrackEvaluator::new(track, channel);
    times.iter().map(|&t| eval.sample(t)).collect()
}

/// Evaluate all three channels of one bone on the unified timeline.
pub fn bake_animator(name: &str, data: &BoneAnimatorData, times: &[f32]) -> BakedAnimator {
    let mut position = TrackEvaluator::new(&data.position, Channel::Position);
    let mut rotation = TrackEvaluator::new(&data.rotation, Channel::Rotation);
    let mut scale = TrackEvaluator::new(&data.scale, Channel::Scale);
    let movements = times
        .iter()
        .map(|&time| Movement {
            time,
            position: position.sample(time),
            rotation: rotation.sample(time),
            scale: scale.sample(time),
        })
        .collect();
    BakedAnimator {
        name: name.to_string(),
        movements,
    }
}

/// Bake one animation against the skeleton it was authored for.
///
/// Deterministic: identical inputs give identical output. The accumulation
/// tree is private to this call.
pub fn bake_animation(
    blueprint: &AnimationBlueprint,
    skeleton: &Skeleton,
    cfg: &BakeConfig,
) -> Animation {
    let cfg = cfg.sanitized();
    let mut timeline = build_timeline(
        blueprint.animators.values(),
        blueprint.length,
        cfg.frame_epsilon,
    );
    let authored = timeline.len();

    let rotation_inserts = {
        let mut tree = AccumulationTree::new(skeleton, &blueprint.animators, cfg.hierarchy_ease);
        interpolate_rotation(&mut timeline, &mut tree, &cfg)
    };
    let step_inserts = interpolate_step(&mut timeline, blueprint.animators.values(), &cfg);

    debug!(
        "baked '{}': {} bones, {} authored instants, +{} rotation, +{} step",
        blueprint.name,
        blueprint.animators.len(),
        authored,
        rotation_inserts,
        step_inserts
    );

    let times = timeline.into_times();
    let animators = blueprint
        .animators
        .iter()
        .map(|(name, data)| (name.clone(), bake_animator(name, data, &times)))
        .collect();
    let empty_movements = times.iter().map(|&t| Movement::zero(t)).collect();

    Animation {
        name: blueprint.name.clone(),
        loop_mode: blueprint.loop_mode,
        length: blueprint.length,
        override_flag: blueprint.override_flag,
        animators,
        script: blueprint.script.clone(),
        empty_movements,
    }
}

/// Export a baked animation as serde_json::Value (stable schema for FFI/serialization).
pub fn export_baked_json(baked: &Animation) -> Result<serde_json::Value, BakeError> {
    Ok(serde_json::to_value(baked)?)
}
