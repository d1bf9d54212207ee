//! Blueprint documents: the in-memory hand-off between a model-format parser
//! and the baker, with a JSON form for fixtures and tooling.
//!
//! Notes:
//! - Times and lengths are seconds.
//! - Rotation vectors are Euler degrees; scale vectors are absolute.
//! - Channel tracks are sorted and deduplicated on load.
//! - An animator's `name` may be omitted; it defaults to its map key.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::animation::{Animation, AnimationScript, LoopMode};
use crate::baking::bake_animation;
use crate::config::BakeConfig;
use crate::data::{BoneAnimatorData, Channel};
use crate::error::BakeError;
use crate::skeleton::Skeleton;

/// One animation definition before baking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationBlueprint {
    pub name: String,
    #[serde(rename = "loop", default)]
    pub loop_mode: LoopMode,
    /// Seconds.
    pub length: f32,
    #[serde(rename = "override", default)]
    pub override_flag: bool,
    /// Authored channels keyed by bone name.
    #[serde(default)]
    pub animators: IndexMap<String, BoneAnimatorData>,
    #[serde(default)]
    pub script: Option<AnimationScript>,
}

impl AnimationBlueprint {
    pub fn new(name: impl Into<String>, length: f32) -> Self {
        Self {
            name: name.into(),
            loop_mode: LoopMode::default(),
            length,
            override_flag: false,
            animators: IndexMap::new(),
            script: None,
        }
    }

    pub fn with_animator(mut self, data: BoneAnimatorData) -> Self {
        self.animators.insert(data.name.clone(), data);
        self
    }

    /// Check lengths, keyframe times and vectors are usable.
    pub fn validate(&self) -> Result<(), BakeError> {
        if !self.length.is_finite() || self.length < 0.0 {
            return Err(BakeError::InvalidLength {
                animation: self.name.clone(),
                length: self.length,
            });
        }
        for (bone, data) in &self.animators {
            for channel in Channel::ALL {
                for p in data.channel(channel).points() {
                    if !p.time.is_finite() || p.time < 0.0 {
                        return Err(BakeError::InvalidTime {
                            bone: bone.clone(),
                            channel,
                            time: p.time,
                        });
                    }
                    if !p.vector.iter().all(|c| c.is_finite()) {
                        return Err(BakeError::InvalidVector {
                            bone: bone.clone(),
                            channel,
                            time: p.time,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn fill_names(&mut self) {
        for (key, data) in self.animators.iter_mut() {
            if data.name.is_empty() {
                data.name = key.clone();
            }
        }
    }

    /// Validate, then bake against `skeleton`.
    pub fn bake(&self, skeleton: &Skeleton, cfg: &BakeConfig) -> Result<Animation, BakeError> {
        self.validate()?;
        Ok(bake_animation(self, skeleton, cfg))
    }
}

/// A skeleton plus every animation authored for it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelBlueprint {
    #[serde(default)]
    pub skeleton: Skeleton,
    #[serde(default)]
    pub animations: Vec<AnimationBlueprint>,
}

impl ModelBlueprint {
    pub fn validate(&self) -> Result<(), BakeError> {
        self.skeleton.validate()?;
        self.animations.iter().try_for_each(AnimationBlueprint::validate)
    }

    pub fn animation(&self, name: &str) -> Option<&AnimationBlueprint> {
        self.animations.iter().find(|a| a.name == name)
    }

    /// Bake every animation in declaration order.
    pub fn bake_all(&self, cfg: &BakeConfig) -> Result<Vec<Animation>, BakeError> {
        self.validate()?;
        Ok(self
            .animations
            .iter()
            .map(|a| bake_animation(a, &self.skeleton, cfg))
            .collect())
    }
}

/// Public API: parse a model blueprint JSON document and validate it.
pub fn parse_model_blueprint_json(s: &str) -> Result<ModelBlueprint, BakeError> {
    let mut model: ModelBlueprint = serde_json::from_str(s)?;
    model
        .animations
        .iter_mut()
        .for_each(AnimationBlueprint::fill_names);
    model.validate()?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SamplePoint;
    use serde_json::json;

    #[test]
    fn parses_minimal_document_with_defaults() {
        let doc = json!({
            "skeleton": [{ "name": "body", "children": [{ "name": "head" }] }],
            "animations": [{
                "name": "idle",
                "length": 1.5,
                "animators": {
                    "head": {
                        "rotation": [
                            { "time": 1.0, "vector": [0, 45, 0] },
                            { "time": 0.0, "vector": [0, 0, 0] }
                        ]
                    }
                }
            }]
        });
        let model = parse_model_blueprint_json(&doc.to_string()).expect("parse blueprint");
        let idle = model.animation("idle").expect("idle");
        assert_eq!(idle.loop_mode, LoopMode::Once);
        assert!(!idle.override_flag);
        let head = &idle.animators["head"];
        assert_eq!(head.name, "head");
        let times: Vec<f32> = head.rotation.points().iter().map(|p| p.time).collect();
        assert_eq!(times, vec![0.0, 1.0]);
        assert!(model.skeleton.contains("head"));
    }

    #[test]
    fn rejects_negative_keyframe_time() {
        let blueprint = AnimationBlueprint::new("bad", 1.0).with_animator(
            BoneAnimatorData::new("arm")
                .with_channel(Channel::Position, vec![SamplePoint::new(-0.5, [0.0; 3])]),
        );
        match blueprint.validate() {
            Err(BakeError::InvalidTime { bone, channel, .. }) => {
                assert_eq!(bone, "arm");
                assert_eq!(channel, Channel::Position);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_non_finite_vectors_and_lengths() {
        let blueprint = AnimationBlueprint::new("bad", 1.0).with_animator(
            BoneAnimatorData::new("arm").with_channel(
                Channel::Scale,
                vec![SamplePoint::new(0.0, [1.0, f32::NAN, 1.0])],
            ),
        );
        assert!(matches!(
            blueprint.validate(),
            Err(BakeError::InvalidVector { .. })
        ));
        assert!(matches!(
            AnimationBlueprint::new("bad", f32::INFINITY).validate(),
            Err(BakeError::InvalidLength { .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            parse_model_blueprint_json("{ not json"),
            Err(BakeError::Parse(_))
        ));
    }
}
