//! Keyline Core (renderer-agnostic)
//!
//! Parameter keyframe animation engine: named parameters own time-ordered keyframes
//! that can be sampled at any (fractional) frame. A [`TimelineDocument`] bundles the
//! parameters with frame rate, duration, markers and clips and round-trips through a
//! JSON file format.
//!
//! The engine is a value store, not a player: there is no clock, no playback and no
//! internal locking. Hosts own a document and pass it by reference.

pub mod baking;
pub mod config;
pub mod document;
pub mod error;
pub mod interp;
pub mod keyframe;
pub mod parameter;
pub mod sequence;
pub mod store;
pub mod stored_document;
pub mod timecode;

// Re-exports for consumers (editors, exporters, CLI)
pub use baking::{bake_document, export_baked_json, BakedParameter, BakedTimeline, BakingConfig};
pub use config::Config;
pub use document::{Clip, Marker, TimelineDocument};
pub use error::{EngineError, NotFoundKind, Result};
pub use keyframe::{InterpolationMode, Keyframe};
pub use parameter::AnimationParameter;
pub use sequence::KeyframeSequence;
pub use store::ParameterStore;
pub use stored_document::{parse_timeline_json, parse_timeline_json_with_config};
pub use timecode::{frame_to_timecode, StandardRate, Timecode};
