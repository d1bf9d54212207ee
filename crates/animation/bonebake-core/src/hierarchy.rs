//! Hierarchical accumulation tree.
//!
//! Mirrors the skeleton as an arena of nodes with parent indices. Each node
//! answers how much a channel changes across a time window once all of its
//! ancestors are included. The result only steers resampling density; final
//! baked values come from each bone's own tracks (see `baking`).
//!
//! Queries for one node/channel must arrive in non-decreasing time order: the
//! scan cursor never rewinds. The resampler is the only caller and walks the
//! timeline left to right.

use hashbrown::HashMap;
use indexmap::IndexMap;
use log::warn;

use crate::data::{BoneAnimatorData, Channel, Vec3, ZERO};
use crate::interp::functions::{add_vec3, length_vec3, sub_vec3};
use crate::interp::{alpha, bezier_ease_t, lerp_vec3};
use crate::skeleton::Skeleton;

/// Per-channel scan state. Lives for one bake only.
#[derive(Debug, Default)]
struct ChannelScratch {
    cursor: usize,
    /// Keyed by `f32::to_bits` of the queried time.
    cache: HashMap<u32, Vec3>,
}

#[derive(Debug)]
pub struct AccumulationNode<'a> {
    name: &'a str,
    data: Option<&'a BoneAnimatorData>,
    parent: Option<usize>,
    scratch: [ChannelScratch; 3],
}

impl<'a> AccumulationNode<'a> {
    fn new(name: &'a str, data: Option<&'a BoneAnimatorData>, parent: Option<usize>) -> Self {
        Self {
            name,
            data,
            parent,
            scratch: Default::default(),
        }
    }

    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Local channel value at `time`, memoized.
    fn resolve(&mut self, time: f32, channel: Channel, ease: Option<[f32; 4]>) -> Vec3 {
        let Some(data) = self.data else {
            return ZERO;
        };
        let points = data.channel(channel).points();
        if points.len() < 2 {
            return ZERO;
        }
        let scratch = &mut self.scratch[channel.index()];
        if let Some(hit) = scratch.cache.get(&time.to_bits()) {
            return *hit;
        }

        let mut i = scratch.cursor;
        while i < points.len() && points[i].time < time {
            i += 1;
        }
        scratch.cursor = i;

        // Outside the authored span there is no bracketing pair.
        let value = if i == 0 || i == points.len() {
            ZERO
        } else {
            let prev = &points[i - 1];
            let next = &points[i];
            if next.time == time {
                next.vector
            } else {
                let raw = alpha(prev.time, next.time, time);
                let a = match ease {
                    Some(ctrl) => bezier_ease_t(raw, ctrl),
                    None => raw,
                };
                lerp_vec3(prev.vector, next.vector, a)
            }
        };
        scratch.cache.insert(time.to_bits(), value);
        value
    }
}

/// Arena of accumulation nodes built top-down from a skeleton.
#[derive(Debug)]
pub struct AccumulationTree<'a> {
    nodes: Vec<AccumulationNode<'a>>,
    ease: Option<[f32; 4]>,
}

impl<'a> AccumulationTree<'a> {
    /// Build a fresh tree for one bake.
    ///
    /// Bones declared in the skeleton without animator data become identity
    /// nodes. Animator data for bones the skeleton does not declare is kept as
    /// detached roots so it still drives resampling.
    pub fn new(
        skeleton: &'a Skeleton,
        animators: &'a IndexMap<String, BoneAnimatorData>,
        ease: Option<[f32; 4]>,
    ) -> Self {
        let flat = skeleton.flatten();
        let mut nodes: Vec<AccumulationNode<'a>> = flat
            .iter()
            .map(|bone| AccumulationNode::new(bone.name, animators.get(bone.name), bone.parent))
            .collect();
        for (name, data) in animators {
            if !flat.iter().any(|b| b.name == name.as_str()) {
                warn!("animator data for undeclared bone '{name}' is baked as a root");
                nodes.push(AccumulationNode::new(name.as_str(), Some(data), None));
            }
        }
        Self { nodes, ease }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn nodes(&self) -> &[AccumulationNode<'a>] {
        &self.nodes
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    /// Local (non-accumulated) value of one node's channel at `time`.
    pub fn value_at(&mut self, index: usize, time: f32, channel: Channel) -> Vec3 {
        let ease = self.ease;
        self.nodes[index].resolve(time, channel, ease)
    }

    /// Channel change over `[start, end]` summed from `index` up to its root.
    pub fn accumulated_delta(&mut self, index: usize, start: f32, end: f32, channel: Channel) -> Vec3 {
        let ease = self.ease;
        let mut sum = ZERO;
        let mut cursor = Some(index);
        while let Some(i) = cursor {
            let node = &mut self.nodes[i];
            let from = node.resolve(start, channel, ease);
            let to = node.resolve(end, channel, ease);
            sum = add_vec3(sum, sub_vec3(to, from));
            cursor = node.parent;
        }
        sum
    }

    /// Magnitude of [`Self::accumulated_delta`].
    pub fn window_delta(&mut self, index: usize, start: f32, end: f32, channel: Channel) -> f32 {
        length_vec3(self.accumulated_delta(index, start, end, channel))
    }

    /// Worst-case accumulated change any bone sees over the window.
    pub fn max_window_delta(&mut self, start: f32, end: f32, channel: Channel) -> f32 {
        (0..self.nodes.len())
            .map(|i| self.window_delta(i, start, end, channel))
            .fold(0.0, f32::max)
    }
}
