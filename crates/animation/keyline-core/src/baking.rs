//! Baking API: sample every parameter of a document over a frame window for export.

use serde::{Deserialize, Serialize};

use crate::document::TimelineDocument;
use crate::error::Result;
use crate::store::sample_frames;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakingConfig {
    /// First frame to sample.
    pub start_frame: u32,
    /// Last frame to sample (inclusive); if None, uses the document's last frame.
    pub end_frame: Option<u32>,
    /// Distance between samples in frames; fractional steps sample sub-frame.
    pub step: f64,
}

impl Default for BakingConfig {
    fn default() -> Self {
        Self {
            start_frame: 0,
            end_frame: None,
            step: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedParameter {
    pub name: String,
    /// One value per entry of [`BakedTimeline::frames`].
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedTimeline {
    pub frame_rate: f64,
    pub start_frame: u32,
    pub end_frame: u32,
    pub step: f64,
    /// Sampled frame positions.
    pub frames: Vec<f64>,
    pub parameters: Vec<BakedParameter>,
}

/// Bake every parameter of `doc` using the provided config.
///
/// Fails with `TooManySamples` when the window and step exceed
/// [`MAX_SAMPLES`](crate::store::MAX_SAMPLES).
pub fn bake_document(doc: &TimelineDocument, cfg: &BakingConfig) -> Result<BakedTimeline> {
    let step = if cfg.step.is_finite() && cfg.step > 0.0 {
        cfg.step
    } else {
        1.0
    };
    let last = doc.last_frame();
    let start = cfg.start_frame.min(last);
    let end = cfg.end_frame.unwrap_or(last).clamp(start, last);

    let frames = sample_frames(start as f64, end as f64, step)?;
    let parameters = doc
        .parameters()
        .iter()
        .map(|p| BakedParameter {
            name: p.name().to_string(),
            values: frames.iter().map(|f| p.value_at(*f)).collect(),
        })
        .collect();

    Ok(BakedTimeline {
        frame_rate: doc.frame_rate(),
        start_frame: start,
        end_frame: end,
        step,
        frames,
        parameters,
    })
}

/// Export baked data as serde_json::Value (stable schema for serialization).
pub fn export_baked_json(baked: &BakedTimeline) -> serde_json::Value {
    serde_json::to_value(baked).unwrap_or(serde_json::Value::Null)
}
