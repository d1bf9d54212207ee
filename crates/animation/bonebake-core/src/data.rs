//! Raw keyframe data model: sample points, channel tracks and per-bone animator data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Plain 3-component vector (position offset, Euler degrees, or scale).
pub type Vec3 = [f32; 3];

pub const ZERO: Vec3 = [0.0, 0.0, 0.0];
pub const ONE: Vec3 = [1.0, 1.0, 1.0];

/// The three animatable attributes of a bone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Position,
    Rotation,
    Scale,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Position, Channel::Rotation, Channel::Scale];

    /// Value a bone holds on this channel when nothing is authored.
    #[inline]
    pub fn identity(self) -> Vec3 {
        match self {
            Channel::Position | Channel::Rotation => ZERO,
            Channel::Scale => ONE,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Channel::Position => 0,
            Channel::Rotation => 1,
            Channel::Scale => 2,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::Position => "position",
            Channel::Rotation => "rotation",
            Channel::Scale => "scale",
        })
    }
}

/// How a keyframe connects to its neighbours.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Continuity {
    /// Interpolate towards / away from this keyframe.
    #[default]
    Continuous,
    /// Hold the neighbouring value and jump at the keyframe.
    Step,
}

/// A single authored keyframe.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    /// Seconds from the start of the animation.
    pub time: f32,
    pub vector: Vec3,
    #[serde(default)]
    pub continuity: Continuity,
}

impl SamplePoint {
    pub fn new(time: f32, vector: Vec3) -> Self {
        Self {
            time,
            vector,
            continuity: Continuity::Continuous,
        }
    }

    pub fn step(time: f32, vector: Vec3) -> Self {
        Self {
            time,
            vector,
            continuity: Continuity::Step,
        }
    }

    #[inline]
    pub fn is_continuous(&self) -> bool {
        self.continuity == Continuity::Continuous
    }
}

/// Time-ordered keyframes for one (bone, channel) pair.
///
/// Points are sorted on construction and exact duplicate times collapse to the
/// first authored point, so times are strictly increasing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<SamplePoint>", into = "Vec<SamplePoint>")]
pub struct ChannelTrack {
    points: Vec<SamplePoint>,
}

impl ChannelTrack {
    pub fn new(mut points: Vec<SamplePoint>) -> Self {
        points.sort_by(|a, b| a.time.total_cmp(&b.time));
        points.dedup_by(|next, prev| next.time == prev.time);
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the segment ending at `index` holds its left value.
    ///
    /// A step keyframe holds on both sides: the segment leaving it and the
    /// segment arriving at it.
    #[inline]
    pub fn is_stepped_segment(&self, index: usize) -> bool {
        if index == 0 || index >= self.points.len() {
            return false;
        }
        !self.points[index - 1].is_continuous() || !self.points[index].is_continuous()
    }
}

impl From<Vec<SamplePoint>> for ChannelTrack {
    fn from(points: Vec<SamplePoint>) -> Self {
        Self::new(points)
    }
}

impl From<ChannelTrack> for Vec<SamplePoint> {
    fn from(track: ChannelTrack) -> Self {
        track.points
    }
}

/// All authored channels for one bone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoneAnimatorData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: ChannelTrack,
    #[serde(default)]
    pub rotation: ChannelTrack,
    #[serde(default)]
    pub scale: ChannelTrack,
}

impl BoneAnimatorData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_channel(mut self, channel: Channel, points: Vec<SamplePoint>) -> Self {
        *self.channel_mut(channel) = ChannelTrack::new(points);
        self
    }

    #[inline]
    pub fn channel(&self, channel: Channel) -> &ChannelTrack {
        match channel {
            Channel::Position => &self.position,
            Channel::Rotation => &self.rotation,
            Channel::Scale => &self.scale,
        }
    }

    fn channel_mut(&mut self, channel: Channel) -> &mut ChannelTrack {
        match channel {
            Channel::Position => &mut self.position,
            Channel::Rotation => &mut self.rotation,
            Channel::Scale => &mut self.scale,
        }
    }

    /// Every authored point across the three channels.
    pub fn all_points(&self) -> impl Iterator<Item = &SamplePoint> + '_ {
        Channel::ALL
            .into_iter()
            .flat_map(move |c| self.channel(c).points().iter())
    }
}
