//! SMPTE-style `HH:MM:SS:FF` timecode helpers.
//!
//! Frame -> timecode is a plain decomposition (no drop-frame counting):
//! seconds = floor(frame / rate), frames = floor(frame mod rate).

use std::fmt;

use crate::error::{EngineError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timecode {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub frames: u32,
}

fn check_rate(frame_rate: f64) -> Result<()> {
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return Err(EngineError::InvalidFrameRate { fps: frame_rate });
    }
    Ok(())
}

/// Decompose an absolute frame index into a timecode at `frame_rate`.
pub fn frame_to_timecode(frame: u64, frame_rate: f64) -> Result<Timecode> {
    check_rate(frame_rate)?;
    let f = frame as f64;
    let total_seconds = (f / frame_rate).floor() as u64;
    let frames = (f % frame_rate).floor() as u32;
    Ok(Timecode {
        hours: (total_seconds / 3600) as u32,
        minutes: ((total_seconds % 3600) / 60) as u32,
        seconds: (total_seconds % 60) as u32,
        frames,
    })
}

impl Timecode {
    pub fn new(hours: u32, minutes: u32, seconds: u32, frames: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            frames,
        }
    }

    /// Parse `HH:MM:SS:FF` (hours may be one digit) and range-check each field
    /// against a 24h clock and `frame_rate`.
    pub fn parse(text: &str, frame_rate: f64) -> Result<Self> {
        check_rate(frame_rate)?;
        let invalid = |reason: String| EngineError::InvalidTimecode { reason };

        let parts: Vec<&str> = text.trim().split(':').collect();
        if parts.len() != 4 {
            return Err(invalid(format!(
                "'{text}' is not in HH:MM:SS:FF form"
            )));
        }
        let mut fields = [0u32; 4];
        for (i, part) in parts.iter().enumerate() {
            let width_ok = if i == 0 {
                (1..=2).contains(&part.len())
            } else {
                part.len() == 2
            };
            if !width_ok || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(format!(
                    "'{text}' is not in HH:MM:SS:FF form"
                )));
            }
            fields[i] = part
                .parse()
                .map_err(|_| invalid(format!("bad field '{part}' in '{text}'")))?;
        }
        let [hours, minutes, seconds, frames] = fields;
        if hours > 23 {
            return Err(invalid(format!("hours must be 0-23, got {hours}")));
        }
        if minutes > 59 {
            return Err(invalid(format!("minutes must be 0-59, got {minutes}")));
        }
        if seconds > 59 {
            return Err(invalid(format!("seconds must be 0-59, got {seconds}")));
        }
        let max_frames = frame_rate.floor() as u32;
        if frames >= max_frames {
            return Err(invalid(format!(
                "frames must be 0-{} for {frame_rate} fps, got {frames}",
                max_frames.saturating_sub(1)
            )));
        }
        Ok(Self::new(hours, minutes, seconds, frames))
    }

    /// Whole seconds covered by the H/M/S fields.
    pub fn total_seconds(&self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    /// Absolute frame index at `frame_rate`.
    pub fn to_frame(&self, frame_rate: f64) -> u64 {
        (self.total_seconds() as f64 * frame_rate).round() as u64 + self.frames as u64
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}

/// Broadcast and film rates the tooling knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StandardRate {
    Film23976,
    Film24,
    Pal25,
    Ntsc2997,
    Ntsc30,
    Pal50,
    Ntsc5994,
    Hfr60,
}

impl StandardRate {
    pub const ALL: [StandardRate; 8] = [
        StandardRate::Film23976,
        StandardRate::Film24,
        StandardRate::Pal25,
        StandardRate::Ntsc2997,
        StandardRate::Ntsc30,
        StandardRate::Pal50,
        StandardRate::Ntsc5994,
        StandardRate::Hfr60,
    ];

    pub fn all() -> &'static [StandardRate] {
        &Self::ALL
    }

    pub fn fps(&self) -> f64 {
        match self {
            Self::Film23976 => 23.976,
            Self::Film24 => 24.0,
            Self::Pal25 => 25.0,
            Self::Ntsc2997 => 29.97,
            Self::Ntsc30 => 30.0,
            Self::Pal50 => 50.0,
            Self::Ntsc5994 => 59.94,
            Self::Hfr60 => 60.0,
        }
    }

    /// NTSC fractional rates are conventionally counted drop-frame.
    pub fn is_drop_frame(&self) -> bool {
        matches!(self, Self::Ntsc2997 | Self::Ntsc5994)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Film23976 => "Film transferred to video",
            Self::Film24 => "Cinema/Film standard",
            Self::Pal25 => "PAL video standard",
            Self::Ntsc2997 => "NTSC video (drop-frame)",
            Self::Ntsc30 => "NTSC non-drop",
            Self::Pal50 => "PAL progressive",
            Self::Ntsc5994 => "NTSC HD (drop-frame)",
            Self::Hfr60 => "High frame rate",
        }
    }

    pub fn from_fps(fps: f64) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| (r.fps() - fps).abs() < 1e-6)
            .ok_or(EngineError::UnsupportedFrameRate { fps })
    }
}

impl fmt::Display for StandardRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fps - {}", self.fps(), self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_rate_decomposition() {
        // 100 / 29.97 = 3.33.. s; 100 mod 29.97 = 10.09
        let tc = frame_to_timecode(100, 29.97).unwrap();
        assert_eq!(tc, Timecode::new(0, 0, 3, 10));
    }

    #[test]
    fn rejects_zero_rate() {
        assert!(matches!(
            frame_to_timecode(1, 0.0),
            Err(EngineError::InvalidFrameRate { .. })
        ));
    }

    #[test]
    fn display_pads() {
        assert_eq!(Timecode::new(1, 2, 3, 4).to_string(), "01:02:03:04");
    }

    #[test]
    fn standard_rates_lookup() {
        assert_eq!(StandardRate::from_fps(29.97).unwrap(), StandardRate::Ntsc2997);
        assert!(StandardRate::from_fps(29.97).unwrap().is_drop_frame());
        assert!(!StandardRate::from_fps(25.0).unwrap().is_drop_frame());
        assert!(StandardRate::from_fps(48.0).is_err());
    }
}
