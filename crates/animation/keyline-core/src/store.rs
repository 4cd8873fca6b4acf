//! Parameter store: name -> parameter, with the query/mutation surface used by editors
//! and exporters.

use indexmap::IndexMap;
use log::debug;

use crate::config::{pick_color, Config};
use crate::error::{EngineError, Result};
use crate::keyframe::{InterpolationMode, Keyframe};
use crate::parameter::AnimationParameter;

#[derive(Clone, Debug, PartialEq)]
pub struct ParameterStore {
    params: IndexMap<String, AnimationParameter>,
    palette: Vec<String>,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(cfg: &Config) -> Self {
        Self {
            params: IndexMap::new(),
            palette: cfg.palette.clone(),
        }
    }

    fn next_color(&self) -> String {
        pick_color(&self.palette, self.params.len())
    }

    fn get(&self, name: &str) -> Result<&AnimationParameter> {
        self.params
            .get(name)
            .ok_or_else(|| EngineError::parameter_not_found(name))
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut AnimationParameter> {
        self.params
            .get_mut(name)
            .ok_or_else(|| EngineError::parameter_not_found(name))
    }

    // ----- mutation -----

    /// Create a parameter with an empty curve and the next palette color.
    pub fn add_parameter(
        &mut self,
        name: &str,
        min: f64,
        max: f64,
        default: f64,
    ) -> Result<&mut AnimationParameter> {
        if self.params.contains_key(name) {
            return Err(EngineError::DuplicateName {
                name: name.to_string(),
            });
        }
        let param = AnimationParameter::new(name, min, max, default, self.next_color())?;
        debug!("add parameter '{name}' [{min}, {max}] default {}", param.default_value());
        let (index, _) = self.params.insert_full(name.to_string(), param);
        Ok(&mut self.params[index])
    }

    /// Delete a parameter together with all of its keyframes.
    pub fn remove_parameter(&mut self, name: &str) -> Result<AnimationParameter> {
        let removed = self
            .params
            .shift_remove(name)
            .ok_or_else(|| EngineError::parameter_not_found(name))?;
        debug!(
            "remove parameter '{name}' ({} keyframes)",
            removed.keyframes().len()
        );
        Ok(removed)
    }

    /// Move a parameter to a new key. Renaming onto itself is a no-op.
    pub fn rename_parameter(&mut self, old: &str, new: &str) -> Result<()> {
        if !self.params.contains_key(old) {
            return Err(EngineError::parameter_not_found(old));
        }
        if old == new {
            return Ok(());
        }
        if self.params.contains_key(new) {
            return Err(EngineError::DuplicateName {
                name: new.to_string(),
            });
        }
        let mut param = self
            .params
            .shift_remove(old)
            .ok_or_else(|| EngineError::parameter_not_found(old))?;
        param.set_name(new);
        self.params.insert(new.to_string(), param);
        debug!("rename parameter '{old}' -> '{new}'");
        Ok(())
    }

    /// Replace range and default; keyframe values are not re-clamped.
    pub fn edit_range(&mut self, name: &str, min: f64, max: f64, default: f64) -> Result<()> {
        self.get_mut(name)?.set_range(min, max, default)?;
        debug!("edit range '{name}' -> [{min}, {max}] default {default}");
        Ok(())
    }

    /// Add (or replace) a keyframe; the value is clamped into the parameter range.
    /// Returns the value actually stored. Non-finite values are `InvalidValue`.
    pub fn add_keyframe(
        &mut self,
        name: &str,
        frame: u32,
        value: f64,
        mode: InterpolationMode,
    ) -> Result<f64> {
        let stored = self.get_mut(name)?.add_keyframe(frame, value, mode)?;
        debug!("add keyframe '{name}'@{frame} = {stored} ({mode})");
        Ok(stored)
    }

    /// Remove the keyframe at `frame`. Returns whether one existed.
    pub fn remove_keyframe(&mut self, name: &str, frame: u32) -> Result<bool> {
        let removed = self.get_mut(name)?.keyframes_mut().remove(frame).is_some();
        if removed {
            debug!("remove keyframe '{name}'@{frame}");
        }
        Ok(removed)
    }

    pub fn move_keyframe(&mut self, name: &str, from: u32, to: u32) -> Result<()> {
        self.get_mut(name)?.keyframes_mut().move_keyframe(from, to)
    }

    pub fn set_keyframe_interpolation(
        &mut self,
        name: &str,
        frame: u32,
        mode: InterpolationMode,
    ) -> Result<()> {
        self.get_mut(name)?.keyframes_mut().set_interpolation(frame, mode)
    }

    pub fn set_visible(&mut self, name: &str, visible: bool) -> Result<()> {
        self.get_mut(name)?.visible = visible;
        Ok(())
    }

    pub fn select_keyframe(&mut self, name: &str, frame: u32, selected: bool) -> Result<()> {
        self.get_mut(name)?.keyframes_mut().select(frame, selected)
    }

    pub fn clear_selection(&mut self) {
        for p in self.params.values_mut() {
            p.keyframes_mut().clear_selection();
        }
    }

    // ----- queries -----

    /// Interpolated value of `name` at a (possibly fractional) frame.
    pub fn value_at(&self, name: &str, frame: f64) -> Result<f64> {
        Ok(self.get(name)?.value_at(frame))
    }

    /// Parameter names in store order.
    pub fn list_parameters(&self) -> Vec<&str> {
        self.params.keys().map(String::as_str).collect()
    }

    pub fn keyframes_of(&self, name: &str) -> Result<&[Keyframe]> {
        Ok(self.get(name)?.keyframes().as_slice())
    }

    pub fn parameter(&self, name: &str) -> Option<&AnimationParameter> {
        self.params.get(name)
    }

    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut AnimationParameter> {
        self.params.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationParameter> {
        self.params.values()
    }

    /// Evaluate `name` from `start` to `end` (inclusive) every `step` frames.
    /// A non-finite or non-positive step falls back to one frame; windows needing more
    /// than [`MAX_SAMPLES`] samples are `TooManySamples`.
    pub fn sample_range(
        &self,
        name: &str,
        start: f64,
        end: f64,
        step: f64,
    ) -> Result<Vec<(f64, f64)>> {
        let param = self.get(name)?;
        Ok(sample_frames(start, end, step)?
            .into_iter()
            .map(|f| (f, param.value_at(f)))
            .collect())
    }
}

/// Upper bound on samples produced by one sampling or baking call.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Frame positions from `start` to `end` inclusive; the final sample is exactly `end`.
pub(crate) fn sample_frames(start: f64, end: f64, step: f64) -> Result<Vec<f64>> {
    let step = if step.is_finite() && step > 0.0 {
        step
    } else {
        1.0
    };
    if !start.is_finite() || !end.is_finite() || end < start {
        return Ok(Vec::new());
    }
    let intervals = ((end - start) / step).ceil();
    if !intervals.is_finite() || intervals >= MAX_SAMPLES as f64 {
        return Err(EngineError::TooManySamples {
            start,
            end,
            step,
            limit: MAX_SAMPLES,
        });
    }
    let count = intervals as usize + 1;
    Ok((0..count)
        .map(|i| (start + i as f64 * step).min(end))
        .collect())
}
