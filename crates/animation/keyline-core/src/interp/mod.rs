//! Interpolation helpers.
//!
//! Each [`InterpolationMode`](crate::keyframe::InterpolationMode) maps to one easing
//! function here; the sequence evaluator remaps segment time with it and then blends
//! linearly.

pub mod functions;

pub use functions::{ease_in, ease_in_out, ease_out, lerp_f64, smoothstep};
