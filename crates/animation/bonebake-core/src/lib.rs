//! bonebake core (engine-agnostic)
//!
//! Compiles sparse per-bone keyframes into a dense animation whose bones all
//! share one timeline. Hierarchical rotation drives extra sampling where linear
//! playback would drift; stepped keyframes get a boundary sample so the held
//! value survives; every bone is then evaluated from its own tracks.

pub mod animation;
pub mod baking;
pub mod blueprint;
pub mod config;
pub mod data;
pub mod error;
pub mod hierarchy;
pub mod interp;
pub mod resample;
pub mod skeleton;
pub mod timeline;

// Re-exports for consumers (parsers, playback adapters)
pub use animation::{Animation, AnimationModifier, AnimationScript, LoopMode};
pub use baking::{bake_animation, export_baked_json, BakedAnimator, Movement};
pub use blueprint::{parse_model_blueprint_json, AnimationBlueprint, ModelBlueprint};
pub use config::BakeConfig;
pub use data::{BoneAnimatorData, Channel, ChannelTrack, Continuity, SamplePoint, Vec3};
pub use error::BakeError;
pub use hierarchy::AccumulationTree;
pub use resample::{interpolate_rotation, interpolate_step};
pub use skeleton::{BoneDecl, Skeleton};
pub use timeline::{build_timeline, Timeline};
