//! Timeline document: the persisted aggregate of frame rate, duration, markers, clips,
//! and the parameter store. Also carries the transient playhead.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{EngineError, NotFoundKind, Result};
use crate::store::ParameterStore;
use crate::timecode::{frame_to_timecode, Timecode};

/// Labelled point on the timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub frame: u32,
    pub label: String,
}

/// Labelled half-open frame span `[start, end)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    pub label: String,
    #[serde(rename = "start")]
    pub start_frame: u32,
    #[serde(rename = "end")]
    pub end_frame: u32,
}

impl Clip {
    pub fn new(label: impl Into<String>, start_frame: u32, end_frame: u32) -> Result<Self> {
        let label = label.into();
        if start_frame >= end_frame {
            return Err(EngineError::InvalidClip {
                label,
                start: start_frame,
                end: end_frame,
            });
        }
        Ok(Self {
            label,
            start_frame,
            end_frame,
        })
    }

    pub fn contains(&self, frame: u32) -> bool {
        (self.start_frame..self.end_frame).contains(&frame)
    }

    pub fn len(&self) -> u32 {
        self.end_frame - self.start_frame
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineDocument {
    frame_rate: f64,
    duration_frames: u32,
    markers: Vec<Marker>,
    clips: Vec<Clip>,
    parameters: ParameterStore,
    current_frame: u32,
    pub(crate) config: Config,
}

impl Default for TimelineDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineDocument {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Empty document using the configured defaults. Out-of-range config values are
    /// replaced by the built-in defaults.
    pub fn with_config(cfg: &Config) -> Self {
        Self {
            frame_rate: cfg.fallback_frame_rate(),
            duration_frames: cfg.fallback_duration(),
            markers: Vec::new(),
            clips: Vec::new(),
            parameters: ParameterStore::with_config(cfg),
            current_frame: 0,
            config: cfg.clone(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ----- timing -----

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn set_frame_rate(&mut self, fps: f64) -> Result<()> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(EngineError::InvalidFrameRate { fps });
        }
        self.frame_rate = fps;
        Ok(())
    }

    pub fn duration_frames(&self) -> u32 {
        self.duration_frames
    }

    /// Change the duration and pull the playhead back inside it.
    pub fn set_duration(&mut self, frames: u32) -> Result<()> {
        if frames == 0 {
            return Err(EngineError::InvalidDuration);
        }
        self.duration_frames = frames;
        self.current_frame = self.current_frame.min(frames - 1);
        Ok(())
    }

    /// Duration in seconds at the document frame rate.
    pub fn duration_seconds(&self) -> f64 {
        self.duration_frames as f64 / self.frame_rate
    }

    pub fn last_frame(&self) -> u32 {
        self.duration_frames - 1
    }

    // ----- playhead -----

    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    /// Move the playhead; clamped into `[0, duration - 1]`. Returns the new frame.
    pub fn set_current_frame(&mut self, frame: u32) -> u32 {
        self.current_frame = frame.min(self.last_frame());
        self.current_frame
    }

    /// Move the playhead by `delta` frames with the same clamp.
    pub fn step_frames(&mut self, delta: i64) -> u32 {
        let target = (self.current_frame as i64 + delta).clamp(0, self.last_frame() as i64);
        self.current_frame = target as u32;
        self.current_frame
    }

    pub fn timecode_at(&self, frame: u32) -> Timecode {
        // frame_rate is validated on every write path.
        frame_to_timecode(frame as u64, self.frame_rate).unwrap_or_default()
    }

    pub fn current_timecode(&self) -> Timecode {
        self.timecode_at(self.current_frame)
    }

    // ----- markers -----

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Add a marker, relabelling any marker already at `frame`. Markers stay sorted.
    pub fn add_marker(&mut self, frame: u32, label: impl Into<String>) {
        let label = label.into();
        match self.markers.binary_search_by_key(&frame, |m| m.frame) {
            Ok(i) => self.markers[i].label = label,
            Err(i) => self.markers.insert(i, Marker { frame, label }),
        }
    }

    pub fn remove_marker(&mut self, frame: u32) -> Option<Marker> {
        let i = self
            .markers
            .binary_search_by_key(&frame, |m| m.frame)
            .ok()?;
        Some(self.markers.remove(i))
    }

    pub fn marker_at(&self, frame: u32) -> Option<&Marker> {
        self.markers.iter().find(|m| m.frame == frame)
    }

    // ----- clips -----

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn add_clip(&mut self, label: impl Into<String>, start: u32, end: u32) -> Result<&Clip> {
        let clip = Clip::new(label, start, end)?;
        debug!("add clip '{}' [{start}, {end})", clip.label);
        self.clips.push(clip);
        Ok(&self.clips[self.clips.len() - 1])
    }

    pub fn remove_clip(&mut self, index: usize) -> Result<Clip> {
        if index >= self.clips.len() {
            return Err(EngineError::NotFound {
                kind: NotFoundKind::Clip,
                key: index.to_string(),
            });
        }
        Ok(self.clips.remove(index))
    }

    pub fn clips_at(&self, frame: u32) -> impl Iterator<Item = &Clip> {
        self.clips.iter().filter(move |c| c.contains(frame))
    }

    // ----- parameters -----

    pub fn parameters(&self) -> &ParameterStore {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ParameterStore {
        &mut self.parameters
    }

    pub fn value_at(&self, name: &str, frame: f64) -> Result<f64> {
        self.parameters.value_at(name, frame)
    }

    /// Every parameter evaluated at one frame, in store order.
    pub fn values_at(&self, frame: f64) -> Vec<(&str, f64)> {
        self.parameters
            .iter()
            .map(|p| (p.name(), p.value_at(frame)))
            .collect()
    }

    // Used by the loader after it has validated every field.
    pub(crate) fn from_parts(
        cfg: &Config,
        frame_rate: f64,
        duration_frames: u32,
        markers: Vec<Marker>,
        clips: Vec<Clip>,
        parameters: ParameterStore,
    ) -> Self {
        let mut doc = Self {
            frame_rate,
            duration_frames,
            markers: Vec::with_capacity(markers.len()),
            clips,
            parameters,
            current_frame: 0,
            config: cfg.clone(),
        };
        // Same path as editing: sorted, and a repeated frame keeps the last label.
        for m in markers {
            doc.add_marker(m.frame, m.label);
        }
        doc
    }
}
