//! Ordered keyframe storage and sampling for a single parameter.
//!
//! Model:
//! - Keyframes are kept sorted ascending by frame with at most one per frame.
//! - Segment [Ki -> K(i+1)] timing is remapped by Ki's interpolation mode, then the
//!   value is blended linearly.
//! - Queries before the first keyframe or after the last hold the boundary value.
//! - Queries landing exactly on a keyframe return its value untouched.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::interp::functions::lerp_f64;
use crate::keyframe::{InterpolationMode, Keyframe};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyframeSequence {
    keys: Vec<Keyframe>,
}

impl KeyframeSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the keyframe at `frame`, or where it would be inserted.
    #[inline]
    fn search(&self, frame: u32) -> std::result::Result<usize, usize> {
        self.keys.binary_search_by_key(&frame, |k| k.frame)
    }

    /// Insert a keyframe, replacing any existing one at the same frame.
    pub fn add(&mut self, frame: u32, value: f64, mode: InterpolationMode) {
        self.insert(Keyframe::new(frame, value, mode));
    }

    /// Insert an already-built keyframe with replace semantics.
    pub fn insert(&mut self, keyframe: Keyframe) {
        match self.search(keyframe.frame) {
            Ok(i) => self.keys[i] = keyframe,
            Err(i) => self.keys.insert(i, keyframe),
        }
    }

    /// Remove the keyframe at `frame`. Absent frames are a no-op.
    pub fn remove(&mut self, frame: u32) -> Option<Keyframe> {
        match self.search(frame) {
            Ok(i) => Some(self.keys.remove(i)),
            Err(_) => None,
        }
    }

    pub fn get(&self, frame: u32) -> Option<&Keyframe> {
        self.search(frame).ok().map(|i| &self.keys[i])
    }

    pub fn get_mut(&mut self, frame: u32) -> Option<&mut Keyframe> {
        match self.search(frame) {
            Ok(i) => Some(&mut self.keys[i]),
            Err(_) => None,
        }
    }

    pub fn contains(&self, frame: u32) -> bool {
        self.search(frame).is_ok()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyframe> {
        self.keys.iter()
    }

    pub fn as_slice(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn first(&self) -> Option<&Keyframe> {
        self.keys.first()
    }

    pub fn last(&self) -> Option<&Keyframe> {
        self.keys.last()
    }

    /// `(first_frame, last_frame)` of the authored keys.
    pub fn span(&self) -> Option<(u32, u32)> {
        Some((self.keys.first()?.frame, self.keys.last()?.frame))
    }

    /// Keyframes with `start <= frame <= end`.
    pub fn in_range(&self, start: u32, end: u32) -> &[Keyframe] {
        if start > end {
            return &[];
        }
        let lo = self.keys.partition_point(|k| k.frame < start);
        let hi = self.keys.partition_point(|k| k.frame <= end);
        &self.keys[lo..hi]
    }

    /// Re-key the keyframe at `from` onto `to`, replacing whatever sat at `to`.
    pub fn move_keyframe(&mut self, from: u32, to: u32) -> Result<()> {
        let mut kf = self
            .remove(from)
            .ok_or_else(|| EngineError::keyframe_not_found(from))?;
        kf.frame = to;
        self.insert(kf);
        Ok(())
    }

    pub fn set_interpolation(&mut self, frame: u32, mode: InterpolationMode) -> Result<()> {
        let kf = self
            .get_mut(frame)
            .ok_or_else(|| EngineError::keyframe_not_found(frame))?;
        kf.interpolation = mode;
        Ok(())
    }

    /// Set the selection flag of the keyframe at `frame`.
    pub fn select(&mut self, frame: u32, selected: bool) -> Result<()> {
        let kf = self
            .get_mut(frame)
            .ok_or_else(|| EngineError::keyframe_not_found(frame))?;
        kf.selected = selected;
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        for k in &mut self.keys {
            k.selected = false;
        }
    }

    pub fn selected(&self) -> impl Iterator<Item = &Keyframe> {
        self.keys.iter().filter(|k| k.selected)
    }

    /// Sample at a (possibly fractional) frame; an empty sequence yields `default`.
    pub fn evaluate(&self, frame: f64, default: f64) -> f64 {
        let keys = &self.keys;
        let (first, last) = match (keys.first(), keys.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return default,
        };
        if frame.is_nan() || frame <= first.frame as f64 {
            return first.value;
        }
        if frame >= last.frame as f64 {
            return last.value;
        }

        // First keyframe strictly after `frame`; both neighbours exist because the
        // boundary cases returned above.
        let next = keys.partition_point(|k| (k.frame as f64) <= frame);
        let left = &keys[next - 1];
        if left.frame as f64 == frame {
            return left.value;
        }
        let right = &keys[next];

        let span = (right.frame - left.frame) as f64;
        let t = (frame - left.frame as f64) / span;
        match left.interpolation {
            InterpolationMode::Step => left.value,
            mode => lerp_f64(left.value, right.value, mode.ease(t)),
        }
    }
}

impl FromIterator<Keyframe> for KeyframeSequence {
    fn from_iter<I: IntoIterator<Item = Keyframe>>(iter: I) -> Self {
        let mut seq = KeyframeSequence::new();
        for kf in iter {
            seq.insert(kf);
        }
        seq
    }
}

impl<'a> IntoIterator for &'a KeyframeSequence {
    type Item = &'a Keyframe;
    type IntoIter = std::slice::Iter<'a, Keyframe>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}
