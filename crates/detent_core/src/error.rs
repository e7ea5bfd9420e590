//! Configuration diagnostics
//!
//! The engine never rejects a configuration. Anything it cannot honour is
//! replaced by the nearest safe setting and reported as a `ConfigWarning`.

use thiserror::Error;

/// A configuration value that was replaced during sanitizing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// `min` or `max` is NaN or infinite
    #[error("`{bound}` is not finite ({value}), using {fallback}")]
    NonFiniteBound {
        bound: &'static str,
        value: f64,
        fallback: f64,
    },

    /// `min` is greater than `max`
    #[error("`min` ({min}) is greater than `max` ({max}), using 0..100")]
    InvertedRange { min: f64, max: f64 },

    /// `step` is zero, negative or not finite
    #[error("`step` must be positive, got {0}, using 1")]
    InvalidStep(f64),

    /// `pushable` distance is negative or not finite
    #[error("`pushable` distance must be non-negative, got {0}, disabling push")]
    InvalidPushable(f64),

    /// A mark lies outside `[min, max]` or is not finite
    #[error("mark {0} is outside the slider range and was dropped")]
    MarkOutOfRange(f64),

    /// Whole-track dragging needs a step grid to keep handles aligned
    #[error("`draggable_track` is not supported when `step` is disabled")]
    DraggableTrackWithoutStep,

    /// `min_count` exceeds `max_count`
    #[error("`min_count` ({min_count}) exceeds `max_count` ({max_count}), raising `max_count`")]
    CountBoundsInverted { min_count: usize, max_count: usize },
}

/// A key name that does not map to a slider key
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown key `{0}`")]
pub struct UnknownKey(pub String);
