//! Timeline densification passes run before evaluation:
//! - `interpolate_rotation` subdivides windows with large hierarchical rotation.
//! - `interpolate_step` samples held values right before stepped keyframes.

use log::trace;

use crate::config::BakeConfig;
use crate::data::{BoneAnimatorData, Channel, ChannelTrack};
use crate::hierarchy::AccumulationTree;
use crate::interp::lerp_f32;
use crate::timeline::Timeline;

/// Insert extra instants wherever some bone's accumulated rotation between two
/// adjacent instants exceeds `cfg.max_segment_rotation`.
///
/// Windows come from a snapshot of the timeline and are visited once, left to
/// right, so the tree sees monotonic queries. Returns the number of inserted instants.
pub fn interpolate_rotation(
    timeline: &mut Timeline,
    tree: &mut AccumulationTree<'_>,
    cfg: &BakeConfig,
) -> usize {
    let cfg = cfg.sanitized();
    let snapshot = timeline.times().to_vec();
    let min_step = cfg.min_frame_step;
    let mut inserted = 0;

    for pair in snapshot.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let width = end - start;
        if width <= 0.0 {
            continue;
        }
        let max_delta = tree.max_window_delta(start, end, Channel::Rotation);
        if max_delta.is_nan() {
            continue;
        }
        // No more pieces than the frame step allows; an overflowing delta takes the cap.
        let max_segments = (width / min_step).floor();
        let segments = (max_delta / cfg.max_segment_rotation).ceil().min(max_segments);
        if segments < 2.0 {
            continue;
        }
        let add_time = lerp_f32(0.0, width, 1.0 / segments).max(min_step);
        let last_room = end - (min_step + timeline.epsilon());
        trace!("window [{start}, {end}] rotates {max_delta} deg, {segments} segments");
        for k in 1..segments as usize {
            let time = start + k as f32 * add_time;
            // Keep the trailing segment at least one frame step wide.
            if time > last_room {
                break;
            }
            if timeline.insert(time) {
                inserted += 1;
            }
        }
    }
    inserted
}

/// Insert an instant `cfg.step_lead` before every stepped transition on every
/// channel of every bone. Returns the number of inserted instants.
pub fn interpolate_step<'a, I>(timeline: &mut Timeline, animators: I, cfg: &BakeConfig) -> usize
where
    I: IntoIterator<Item = &'a BoneAnimatorData>,
{
    let mut inserted = 0;
    for data in animators {
        for channel in Channel::ALL {
            inserted += interpolate_step_track(timeline, data.channel(channel), cfg.step_lead);
        }
    }
    inserted
}

fn interpolate_step_track(timeline: &mut Timeline, track: &ChannelTrack, lead: f32) -> usize {
    let points = track.points();
    let mut inserted = 0;
    for i in 1..points.len() {
        if !track.is_stepped_segment(i) {
            continue;
        }
        let time = (points[i].time - lead).max(points[i - 1].time).max(0.0);
        if timeline.insert(time) {
            inserted += 1;
        }
    }
    inserted
}
