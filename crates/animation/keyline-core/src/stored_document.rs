//! Persisted timeline file format.
//!
//! Public API: [`parse_timeline_json`] / [`TimelineDocument::to_json_string`] and the
//! path-based helpers. The JSON schema is a compatibility contract:
//!
//! ```json
//! {
//!   "frame_rate": 30.0,
//!   "duration": 3600,
//!   "markers": [{ "frame": 0, "label": "start" }],
//!   "clips": [{ "label": "intro", "start": 0, "end": 48 }],
//!   "animation_parameters": {
//!     "Opacity": {
//!       "min_value": 0.0, "max_value": 100.0, "default_value": 100.0,
//!       "keyframes": [[0, 0.0, "linear"], [30, 100.0, "ease_out"]]
//!     }
//!   }
//! }
//! ```
//!
//! Notes:
//! - `frame_rate` / `duration` fall back to [`Config`] defaults when absent.
//! - `markers` / `clips` default to empty; `animation_parameters` is required.
//! - Keyframes are re-inserted through [`KeyframeSequence::add`], so ordering and
//!   uniqueness are rebuilt rather than trusted from the file. Values are not clamped.
//! - Loading never touches an existing document; [`TimelineDocument::restore_from_json`]
//!   swaps only after the whole file validated.
//!
//! [`KeyframeSequence::add`]: crate::sequence::KeyframeSequence::add

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::document::{Clip, Marker, TimelineDocument};
use crate::error::{EngineError, Result};
use crate::keyframe::InterpolationMode;
use crate::store::ParameterStore;

/// Parse a timeline file using the default [`Config`].
pub fn parse_timeline_json(s: &str) -> Result<TimelineDocument> {
    parse_timeline_json_with_config(s, &Config::default())
}

/// Parse a timeline file; `cfg` supplies fallbacks and the display palette.
pub fn parse_timeline_json_with_config(s: &str, cfg: &Config) -> Result<TimelineDocument> {
    let raw: RawDocument = serde_json::from_str(s)?;

    let frame_rate = match raw.frame_rate {
        Some(fps) if fps.is_finite() && fps > 0.0 => fps,
        Some(fps) => {
            return Err(EngineError::malformed(format!(
                "frame_rate must be a positive number, got {fps}"
            )))
        }
        None => {
            let fps = cfg.fallback_frame_rate();
            warn!("document has no frame_rate; using {fps}");
            fps
        }
    };
    let duration = match raw.duration {
        Some(0) => return Err(EngineError::malformed("duration must be at least 1 frame")),
        Some(d) => d,
        None => {
            let frames = cfg.fallback_duration();
            warn!("document has no duration; using {frames} frames");
            frames
        }
    };

    let mut clips = Vec::with_capacity(raw.clips.len());
    for c in raw.clips {
        let clip = Clip::new(c.label, c.start, c.end)
            .map_err(|e| EngineError::malformed(e.to_string()))?;
        clips.push(clip);
    }

    let params = raw
        .animation_parameters
        .ok_or_else(|| EngineError::malformed("missing field `animation_parameters`"))?;

    let mut store = ParameterStore::with_config(cfg);
    for (name, p) in params {
        let min = p.min_value.ok_or_else(|| missing(&name, "min_value"))?;
        let max = p.max_value.ok_or_else(|| missing(&name, "max_value"))?;
        let default = p
            .default_value
            .ok_or_else(|| missing(&name, "default_value"))?;

        let param = store.add_parameter(&name, min, max, default)?;
        for (frame, value, mode_name) in p.keyframes {
            let mode: InterpolationMode = mode_name.parse()?;
            // Authored values load as written; only runtime inserts clamp.
            param.keyframes_mut().add(frame, value, mode);
        }
        debug!(
            "loaded parameter '{name}' with {} keyframes",
            param.keyframes().len()
        );
    }

    let markers = raw
        .markers
        .into_iter()
        .map(|m| Marker {
            frame: m.frame,
            label: m.label,
        })
        .collect();

    Ok(TimelineDocument::from_parts(
        cfg, frame_rate, duration, markers, clips, store,
    ))
}

fn missing(param: &str, field: &str) -> EngineError {
    EngineError::malformed(format!("parameter '{param}' is missing `{field}`"))
}

impl TimelineDocument {
    /// Snapshot into the on-disk schema.
    fn to_stored(&self) -> StoredDocument<'_> {
        let animation_parameters = self
            .parameters()
            .iter()
            .map(|p| {
                let keyframes = p
                    .keyframes()
                    .iter()
                    .map(|k| (k.frame, k.value, k.interpolation.name()))
                    .collect();
                (
                    p.name(),
                    StoredParameter {
                        min_value: p.min_value(),
                        max_value: p.max_value(),
                        default_value: p.default_value(),
                        keyframes,
                    },
                )
            })
            .collect();
        StoredDocument {
            frame_rate: self.frame_rate(),
            duration: self.duration_frames(),
            markers: self.markers(),
            clips: self.clips(),
            animation_parameters,
        }
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.to_stored())?)
    }

    /// Serialize the full document; pretty-printed when the config asks for it.
    pub fn to_json_string(&self) -> Result<String> {
        let stored = self.to_stored();
        let out = if self.config.pretty {
            serde_json::to_string_pretty(&stored)?
        } else {
            serde_json::to_string(&stored)?
        };
        Ok(out)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        parse_timeline_json(s)
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json_string()?;
        fs::write(path, json)?;
        info!(
            "saved timeline ({} parameters) to {}",
            self.parameters().len(),
            path.display()
        );
        Ok(())
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_path_with_config(path, &Config::default())
    }

    pub fn load_from_path_with_config(path: impl AsRef<Path>, cfg: &Config) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let doc = parse_timeline_json_with_config(&text, cfg)?;
        info!(
            "loaded timeline ({} parameters) from {}",
            doc.parameters().len(),
            path.display()
        );
        Ok(doc)
    }

    /// Replace this document with the one in `s`. On error `self` is left untouched.
    pub fn restore_from_json(&mut self, s: &str) -> Result<()> {
        let fresh = parse_timeline_json_with_config(s, &self.config)?;
        *self = fresh;
        Ok(())
    }
}

// ----- JSON schema (serde) -----

#[derive(Debug, Serialize)]
struct StoredDocument<'a> {
    frame_rate: f64,
    duration: u32,
    markers: &'a [Marker],
    clips: &'a [Clip],
    animation_parameters: IndexMap<&'a str, StoredParameter>,
}

#[derive(Debug, Serialize)]
struct StoredParameter {
    min_value: f64,
    max_value: f64,
    default_value: f64,
    keyframes: Vec<(u32, f64, &'static str)>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    frame_rate: Option<f64>,
    #[serde(default)]
    duration: Option<u32>,
    #[serde(default)]
    markers: Vec<RawMarker>,
    #[serde(default)]
    clips: Vec<RawClip>,
    #[serde(default)]
    animation_parameters: Option<IndexMap<String, RawParameter>>,
}

#[derive(Debug, Deserialize)]
struct RawMarker {
    frame: u32,
    label: String,
}

#[derive(Debug, Deserialize)]
struct RawClip {
    label: String,
    start: u32,
    end: u32,
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    #[serde(default)]
    min_value: Option<f64>,
    #[serde(default)]
    max_value: Option<f64>,
    #[serde(default)]
    default_value: Option<f64>,
    #[serde(default)]
    keyframes: Vec<(u32, f64, String)>,
}
