//! Unified timeline: the sorted, epsilon-deduplicated set of bake instants.

use serde::{Deserialize, Serialize};

use crate::data::BoneAnimatorData;

/// Strictly increasing set of times (seconds). Two times closer than
/// `epsilon` count as the same instant; the first one inserted is kept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    times: Vec<f32>,
    epsilon: f32,
}

impl Timeline {
    pub fn new(epsilon: f32) -> Self {
        Self {
            times: Vec::new(),
            epsilon: epsilon.max(0.0),
        }
    }

    /// Insert `time` unless an equal (within epsilon) instant exists.
    /// Returns whether the set grew.
    pub fn insert(&mut self, time: f32) -> bool {
        if !time.is_finite() {
            return false;
        }
        let idx = self.times.partition_point(|&t| t < time);
        let near_prev = idx > 0 && time - self.times[idx - 1] < self.epsilon;
        let near_next = idx < self.times.len() && self.times[idx] - time < self.epsilon;
        if near_prev || near_next {
            return false;
        }
        self.times.insert(idx, time);
        true
    }

    pub fn contains(&self, time: f32) -> bool {
        let idx = self.times.partition_point(|&t| t < time);
        (idx > 0 && time - self.times[idx - 1] < self.epsilon)
            || (idx < self.times.len() && self.times[idx] - time < self.epsilon)
    }

    #[inline]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn into_times(self) -> Vec<f32> {
        self.times
    }
}

/// Union of every authored keyframe time, seeded with `0` and `length`.
pub fn build_timeline<'a, I>(animators: I, length: f32, epsilon: f32) -> Timeline
where
    I: IntoIterator<Item = &'a BoneAnimatorData>,
{
    let mut timeline = Timeline::new(epsilon);
    timeline.insert(0.0);
    timeline.insert(length);
    for data in animators {
        for point in data.all_points() {
            timeline.insert(point.time);
        }
    }
    timeline
}
