//! Interpolation helpers shared by hierarchy sampling and final evaluation.
//!
//! Final evaluation blends linearly; hierarchy sampling optionally eases the
//! alpha through a cubic-bezier timing curve first.

pub mod functions;

pub use functions::{alpha, bezier_ease_t, lerp_f32, lerp_vec3};
