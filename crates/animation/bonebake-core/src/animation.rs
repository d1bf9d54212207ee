//! Baked animation aggregate and the metadata that travels with it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::baking::{BakedAnimator, Movement};

/// What playback does when it reaches the end of the timeline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    #[default]
    #[serde(alias = "play_once")]
    Once,
    Loop,
    #[serde(alias = "hold_last")]
    HoldOn,
}

/// Opaque script payload attached to an animation; executed by an external runner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationScript {
    pub data: serde_json::Value,
}

impl AnimationScript {
    pub fn new(data: serde_json::Value) -> Self {
        Self { data }
    }
}

/// Per-play options supplied by whoever starts an animation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationModifier {
    /// Explicit override request; `None` defers to the animation's own flag.
    #[serde(default)]
    pub override_flag: Option<bool>,
    /// Player the animation is shown to exclusively, if any.
    #[serde(default)]
    pub player: Option<String>,
}

impl AnimationModifier {
    pub fn with_override(mut self, flag: bool) -> Self {
        self.override_flag = Some(flag);
        self
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    #[inline]
    pub fn resolve_override(&self, default: bool) -> bool {
        self.override_flag.unwrap_or(default)
    }
}

/// A fully baked animation. Immutable once produced; every animator shares the
/// same ordered set of times, so playback can walk them in lockstep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub name: String,
    pub loop_mode: LoopMode,
    /// Declared length in seconds.
    pub length: f32,
    pub override_flag: bool,
    pub animators: IndexMap<String, BakedAnimator>,
    pub script: Option<AnimationScript>,
    /// All-zero movement at every timeline instant; a neutral animator.
    pub empty_movements: Vec<Movement>,
}

impl Animation {
    /// Script to run for this play, or `None` when the play overrides or
    /// targets a single player.
    pub fn script(&self, modifier: &AnimationModifier) -> Option<&AnimationScript> {
        if modifier.resolve_override(self.override_flag) || modifier.player.is_some() {
            None
        } else {
            self.script.as_ref()
        }
    }

    /// The unified timeline shared by every animator.
    pub fn timeline(&self) -> impl Iterator<Item = f32> + '_ {
        self.empty_movements.iter().map(|m| m.time)
    }

    pub fn frame_count(&self) -> usize {
        self.empty_movements.len()
    }

    pub fn animator(&self, bone: &str) -> Option<&BakedAnimator> {
        self.animators.get(bone)
    }
}
