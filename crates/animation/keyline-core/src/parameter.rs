//! A named, range-bounded animatable parameter.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::keyframe::InterpolationMode;
use crate::sequence::KeyframeSequence;

/// Check `min < max` with both bounds finite.
pub(crate) fn validate_range(min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(EngineError::InvalidRange { min, max });
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationParameter {
    name: String,
    min_value: f64,
    max_value: f64,
    default_value: f64,
    keyframes: KeyframeSequence,
    pub visible: bool,
    /// Display tag assigned by the owning store; opaque to the engine.
    pub color: String,
}

impl AnimationParameter {
    /// Build a parameter with an empty curve. A finite default is clamped into range.
    pub fn new(
        name: impl Into<String>,
        min_value: f64,
        max_value: f64,
        default_value: f64,
        color: impl Into<String>,
    ) -> Result<Self> {
        validate_range(min_value, max_value)?;
        if !default_value.is_finite() {
            return Err(EngineError::InvalidDefault {
                default: default_value,
                min: min_value,
                max: max_value,
            });
        }
        Ok(Self {
            name: name.into(),
            min_value,
            max_value,
            default_value: default_value.clamp(min_value, max_value),
            keyframes: KeyframeSequence::new(),
            visible: true,
            color: color.into(),
        })
    }

    /// Identity in the owning store; changed only through
    /// [`ParameterStore::rename_parameter`](crate::store::ParameterStore::rename_parameter).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn keyframes(&self) -> &KeyframeSequence {
        &self.keyframes
    }

    /// Unclamped access for the loader and the store's editing helpers.
    pub(crate) fn keyframes_mut(&mut self) -> &mut KeyframeSequence {
        &mut self.keyframes
    }

    #[inline]
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    #[inline]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    #[inline]
    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min_value, self.max_value)
    }

    /// Replace range and default. Existing keyframe values are left as authored even
    /// when they now fall outside the range.
    pub fn set_range(&mut self, min: f64, max: f64, default: f64) -> Result<()> {
        validate_range(min, max)?;
        if !(min..=max).contains(&default) {
            return Err(EngineError::InvalidDefault { default, min, max });
        }
        self.min_value = min;
        self.max_value = max;
        self.default_value = default;
        Ok(())
    }

    /// Add a keyframe with its value clamped into range; returns the stored value.
    /// Non-finite values are rejected.
    pub fn add_keyframe(&mut self, frame: u32, value: f64, mode: InterpolationMode) -> Result<f64> {
        if !value.is_finite() {
            return Err(EngineError::InvalidValue { value });
        }
        let stored = self.clamp(value);
        self.keyframes.add(frame, stored, mode);
        Ok(stored)
    }

    /// Sample the curve; falls back to the default when there are no keyframes.
    #[inline]
    pub fn value_at(&self, frame: f64) -> f64 {
        self.keyframes.evaluate(frame, self.default_value)
    }
}
