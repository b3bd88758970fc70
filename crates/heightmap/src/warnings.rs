//! Non-fatal conditions raised while producing a frame.
//!
//! Every warning is logged with `warn!` where it happens and also returned to
//! the caller, so hosts and tests can react without scraping logs.

use std::fmt;

/// Grid axis named in a clamping warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

/// Why a color map mutation was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The map is a built-in preset.
    ReadOnlyPreset,
    /// The key is NaN or infinite.
    NonFiniteKey,
    /// The key lies outside `[0, 1]`.
    KeyOutOfRange,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::ReadOnlyPreset => write!(f, "preset color maps are read-only"),
            RejectReason::NonFiniteKey => write!(f, "key is not finite"),
            RejectReason::KeyOutOfRange => write!(f, "key is outside [0, 1]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeightMapWarning {
    /// A grid side exceeded the guardrail (or was zero) and was clamped.
    GridSideClamped {
        axis: Axis,
        requested: usize,
        applied: usize,
    },
    /// The ridge count exceeded the guardrail and was clamped.
    IterationsClamped { requested: u32, applied: u32 },
    /// The raw field had no usable range; it was replaced by a constant.
    DegenerateField { value: f32 },
    /// A control point insertion was ignored.
    InvalidColorMapMutation { key: f32, reason: RejectReason },
}

impl HeightMapWarning {
    /// True for the guardrail warnings (grid size / iteration count).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            HeightMapWarning::GridSideClamped { .. } | HeightMapWarning::IterationsClamped { .. }
        )
    }
}

impl fmt::Display for HeightMapWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeightMapWarning::GridSideClamped {
                axis,
                requested,
                applied,
            } => write!(
                f,
                "grid {axis} {requested} is outside the supported range, using {applied} (enable experimental mode to override)"
            ),
            HeightMapWarning::IterationsClamped { requested, applied } => write!(
                f,
                "{requested} ridge iterations exceed the supported maximum, using {applied} (enable experimental mode to override)"
            ),
            HeightMapWarning::DegenerateField { value } => write!(
                f,
                "height field has no range to normalize, filled with constant {value}"
            ),
            HeightMapWarning::InvalidColorMapMutation { key, reason } => {
                write!(f, "ignored control point at key {key}: {reason}")
            }
        }
    }
}
