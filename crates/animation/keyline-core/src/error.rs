//! Error types for the keyframe engine.

use std::fmt;

/// What kind of entity a [`EngineError::NotFound`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotFoundKind {
    Parameter,
    Keyframe,
    Clip,
}

impl fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotFoundKind::Parameter => "parameter",
            NotFoundKind::Keyframe => "keyframe",
            NotFoundKind::Clip => "clip",
        };
        f.write_str(s)
    }
}

/// Every failure the engine reports. None of them are fatal; callers decide how to
/// present them.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EngineError {
    /// A parameter, keyframe, or clip reference is missing.
    #[error("{kind} not found: {key}")]
    NotFound { kind: NotFoundKind, key: String },

    /// Adding or renaming would collide with an existing parameter name.
    #[error("parameter already exists: {name}")]
    DuplicateName { name: String },

    /// `min >= max`, or a bound is not finite.
    #[error("invalid range: min {min} must be less than max {max}")]
    InvalidRange { min: f64, max: f64 },

    /// Edited default lies outside the new range.
    #[error("default {default} is outside [{min}, {max}]")]
    InvalidDefault { default: f64, min: f64, max: f64 },

    /// The persisted document is structurally incomplete or has bad field values.
    #[error("malformed document: {reason}")]
    MalformedDocument { reason: String },

    /// A keyframe names an interpolation mode outside the closed set.
    #[error("unknown interpolation: {name}")]
    UnknownInterpolation { name: String },

    /// Keyframe values must be finite numbers.
    #[error("invalid keyframe value: {value}")]
    InvalidValue { value: f64 },

    /// Sampling window and step would produce an unusable number of samples.
    #[error("cannot sample [{start}, {end}] every {step} frames: more than {limit} samples")]
    TooManySamples {
        start: f64,
        end: f64,
        step: f64,
        limit: usize,
    },

    #[error("invalid frame rate: {fps}")]
    InvalidFrameRate { fps: f64 },

    #[error("duration must be at least one frame")]
    InvalidDuration,

    #[error("invalid clip '{label}': start {start} must be before end {end}")]
    InvalidClip { label: String, start: u32, end: u32 },

    #[error("invalid timecode: {reason}")]
    InvalidTimecode { reason: String },

    #[error("unsupported frame rate: {fps}")]
    UnsupportedFrameRate { fps: f64 },

    #[error("io error: {reason}")]
    Io { reason: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub(crate) fn parameter_not_found(name: &str) -> Self {
        Self::NotFound {
            kind: NotFoundKind::Parameter,
            key: name.to_string(),
        }
    }

    pub(crate) fn keyframe_not_found(frame: u32) -> Self {
        Self::NotFound {
            kind: NotFoundKind::Keyframe,
            key: frame.to_string(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            reason: reason.into(),
        }
    }

    /// Check whether this error refers to a missing entity.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Get error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound { .. } | Self::DuplicateName { .. } => "lookup",
            Self::InvalidRange { .. }
            | Self::InvalidDefault { .. }
            | Self::InvalidValue { .. }
            | Self::TooManySamples { .. }
            | Self::InvalidFrameRate { .. }
            | Self::InvalidDuration
            | Self::InvalidClip { .. } => "validation",
            Self::MalformedDocument { .. } | Self::UnknownInterpolation { .. } => "document",
            Self::InvalidTimecode { .. } | Self::UnsupportedFrameRate { .. } => "timecode",
            Self::Io { .. } => "io",
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return Self::Io {
                reason: err.to_string(),
            };
        }
        Self::MalformedDocument {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_kind_and_key() {
        let err = EngineError::parameter_not_found("Opacity");
        assert_eq!(err.to_string(), "parameter not found: Opacity");
        assert!(err.is_not_found());
    }

    #[test]
    fn categories() {
        assert_eq!(EngineError::keyframe_not_found(4).category(), "lookup");
        assert_eq!(
            EngineError::InvalidRange { min: 1.0, max: 0.0 }.category(),
            "validation"
        );
        assert_eq!(
            EngineError::UnknownInterpolation {
                name: "Quadratic".into()
            }
            .category(),
            "document"
        );
    }

    #[test]
    fn json_syntax_errors_become_malformed_document() {
        let err: EngineError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, EngineError::MalformedDocument { .. }));
    }
}
