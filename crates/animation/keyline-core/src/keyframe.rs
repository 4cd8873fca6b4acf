//! Keyframes and interpolation modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::interp::functions;

/// Interpolation rule for the segment that starts at a keyframe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    /// Hold the left value until the next keyframe.
    Step,
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Smoothstep timing; not a control-point cubic.
    Bezier,
}

impl InterpolationMode {
    pub const ALL: [InterpolationMode; 6] = [
        InterpolationMode::Step,
        InterpolationMode::Linear,
        InterpolationMode::EaseIn,
        InterpolationMode::EaseOut,
        InterpolationMode::EaseInOut,
        InterpolationMode::Bezier,
    ];

    /// Symbolic name written to files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Linear => "linear",
            Self::EaseIn => "ease_in",
            Self::EaseOut => "ease_out",
            Self::EaseInOut => "ease_in_out",
            Self::Bezier => "bezier",
        }
    }

    /// Remap a normalized segment position `t` in [0,1].
    ///
    /// `Step` returns 0 so the left value is held.
    #[inline]
    pub fn ease(&self, t: f64) -> f64 {
        match self {
            Self::Step => 0.0,
            Self::Linear => t,
            Self::EaseIn => functions::ease_in(t),
            Self::EaseOut => functions::ease_out(t),
            Self::EaseInOut => functions::ease_in_out(t),
            Self::Bezier => functions::smoothstep(t),
        }
    }
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpolationMode {
    type Err = EngineError;

    /// Case-insensitive; `_`, `-` and spaces are ignored, so `EaseIn`, `ease_in` and
    /// `EASE-IN` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let mode = match folded.as_str() {
            "step" => Self::Step,
            "linear" => Self::Linear,
            "easein" => Self::EaseIn,
            "easeout" => Self::EaseOut,
            "easeinout" => Self::EaseInOut,
            "bezier" => Self::Bezier,
            _ => {
                return Err(EngineError::UnknownInterpolation {
                    name: s.to_string(),
                })
            }
        };
        Ok(mode)
    }
}

/// An authored anchor point on a parameter curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub frame: u32,
    pub value: f64,
    /// Governs the segment from this keyframe to the next one.
    pub interpolation: InterpolationMode,
    /// Transient editor selection; never persisted.
    #[serde(skip)]
    pub selected: bool,
}

impl Keyframe {
    pub fn new(frame: u32, value: f64, interpolation: InterpolationMode) -> Self {
        Self {
            frame,
            value,
            interpolation,
            selected: false,
        }
    }

    /// Same frame, value and mode; ignores `selected`.
    pub fn same_key(&self, other: &Keyframe) -> bool {
        self.frame == other.frame
            && self.value == other.value
            && self.interpolation == other.interpolation
    }
}
