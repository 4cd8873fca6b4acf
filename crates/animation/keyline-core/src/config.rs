//! Core configuration for keyline-core.

use serde::{Deserialize, Serialize};

/// Frame rate used when a document omits `frame_rate`.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// Duration (in frames) used when a document omits `duration`.
pub const DEFAULT_DURATION_FRAMES: u32 = 3600;

/// Display colors handed out to parameters in insertion order.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#feca57", "#ff9ff3", "#54a0ff", "#5f27cd",
];

/// Configuration for fresh documents and loader fallbacks.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frame rate for new documents and for files that omit it.
    pub default_frame_rate: f64,
    /// Duration in frames for new documents and for files that omit it.
    pub default_duration_frames: u32,
    /// Rotating display palette; an empty list falls back to [`DEFAULT_PALETTE`].
    pub palette: Vec<String>,
    /// Pretty-print JSON when saving.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_frame_rate: DEFAULT_FRAME_RATE,
            default_duration_frames: DEFAULT_DURATION_FRAMES,
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_string()).collect(),
            pretty: true,
        }
    }
}

impl Config {
    /// Palette entry for the `index`-th parameter, wrapping around.
    pub fn palette_color(&self, index: usize) -> String {
        pick_color(&self.palette, index)
    }

    /// `default_frame_rate`, or [`DEFAULT_FRAME_RATE`] when that is not a positive number.
    pub(crate) fn fallback_frame_rate(&self) -> f64 {
        if self.default_frame_rate.is_finite() && self.default_frame_rate > 0.0 {
            self.default_frame_rate
        } else {
            DEFAULT_FRAME_RATE
        }
    }

    pub(crate) fn fallback_duration(&self) -> u32 {
        self.default_duration_frames.max(1)
    }
}

/// Wrapping palette lookup; an empty palette uses [`DEFAULT_PALETTE`].
pub(crate) fn pick_color(palette: &[String], index: usize) -> String {
    if palette.is_empty() {
        return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string();
    }
    palette[index % palette.len()].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps() {
        let cfg = Config::default();
        assert_eq!(cfg.palette_color(0), DEFAULT_PALETTE[0]);
        assert_eq!(cfg.palette_color(DEFAULT_PALETTE.len()), DEFAULT_PALETTE[0]);
        assert_eq!(cfg.palette_color(9), DEFAULT_PALETTE[1]);
    }

    #[test]
    fn empty_palette_falls_back() {
        let cfg = Config {
            palette: Vec::new(),
            ..Config::default()
        };
        assert_eq!(cfg.palette_color(2), DEFAULT_PALETTE[2]);
    }
}
