//! Slider configuration
//!
//! `SliderConfig` is what integrators write (by hand or from a TOML file).
//! `ResolvedConfig` is what the engine runs on: bounds are finite and ordered,
//! the step is positive, marks are sorted and in range, and unsupported
//! combinations are switched off. Sanitizing never fails; every substitution
//! is reported as a [`ConfigWarning`].
//!
//! # Example
//!
//! ```rust
//! use detent_core::{Pushable, SliderConfig};
//!
//! let config = SliderConfig::new()
//!     .min(0.0)
//!     .max(50.0)
//!     .step(Some(5.0))
//!     .pushable(Pushable::Gap(10.0));
//!
//! let (resolved, warnings) = config.sanitize();
//! assert!(warnings.is_empty());
//! assert_eq!(resolved.max, 50.0);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigWarning;
use crate::geometry::Direction;
use crate::marks::{Mark, Marks};

/// Minimum spacing policy between adjacent handles
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PushableRepr", into = "PushableRepr")]
pub enum Pushable {
    /// No spacing is enforced
    #[default]
    Off,
    /// Handles may not share a value; each push moves one unit
    Adjacent,
    /// Adjacent handles must be at least this far apart
    Gap(f64),
}

impl Pushable {
    /// Check if the distance between two adjacent handles needs a push
    pub fn needs_push(&self, gap: f64) -> bool {
        match self {
            Pushable::Off => false,
            Pushable::Adjacent => gap == 0.0,
            Pushable::Gap(min_gap) => gap < *min_gap,
        }
    }

    /// Gap used when crossing is forbidden and handles are only clamped
    pub fn clamp_distance(&self) -> f64 {
        match self {
            Pushable::Gap(min_gap) => *min_gap,
            _ => 0.0,
        }
    }
}

/// `pushable = true | false | <number>` in config files
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum PushableRepr {
    Flag(bool),
    Gap(f64),
}

impl From<PushableRepr> for Pushable {
    fn from(repr: PushableRepr) -> Self {
        match repr {
            PushableRepr::Flag(false) => Pushable::Off,
            PushableRepr::Flag(true) => Pushable::Adjacent,
            PushableRepr::Gap(gap) => Pushable::Gap(gap),
        }
    }
}

impl From<Pushable> for PushableRepr {
    fn from(pushable: Pushable) -> Self {
        match pushable {
            Pushable::Off => PushableRepr::Flag(false),
            Pushable::Adjacent => PushableRepr::Flag(true),
            Pushable::Gap(gap) => PushableRepr::Gap(gap),
        }
    }
}

/// `step = <number> | false` in config files
mod step_setting {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Grid(f64),
        Flag(bool),
    }

    pub fn serialize<S: Serializer>(step: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match step {
            Some(step) => Repr::Grid(*step),
            None => Repr::Flag(false),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Grid(step) => Some(step),
            Repr::Flag(true) => Some(super::default_step()),
            Repr::Flag(false) => None,
        })
    }
}

fn default_step() -> f64 {
    1.0
}

/// Multi-handle range settings
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    /// Range mode (more than one handle)
    pub enabled: bool,
    /// Handles can be inserted by clicking and removed by dragging or keys
    pub editable: bool,
    /// Dragging the segment between the handles shifts all of them
    pub draggable_track: bool,
    /// Handles can not be removed below this count
    pub min_count: usize,
    /// Handles can not be inserted above this count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,
}

/// Slider configuration as written by integrators
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    /// Step grid; `None` snaps only to marks and bounds
    #[serde(with = "step_setting")]
    pub step: Option<f64>,
    pub marks: Vec<Mark>,
    /// Allow handles to pass each other
    pub allow_cross: bool,
    pub pushable: Pushable,
    pub range: RangeConfig,
    /// Explicit direction, overrides `vertical` / `reverse`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    pub vertical: bool,
    pub reverse: bool,
    pub disabled: bool,
    /// Respond to keyboard input
    pub keyboard: bool,
    /// Drag sessions idle for longer than this are cancelled (0 disables)
    pub drag_timeout_ms: u64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: Some(default_step()),
            marks: Vec::new(),
            allow_cross: true,
            pushable: Pushable::Off,
            range: RangeConfig::default(),
            direction: None,
            vertical: false,
            reverse: false,
            disabled: false,
            keyboard: true,
            drag_timeout_ms: 3000,
        }
    }
}

impl SliderConfig {
    /// Create a configuration with default settings (0..100, step 1)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum value (default: 0.0)
    pub fn min(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    /// Set the maximum value (default: 100.0)
    pub fn max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    /// Set the step grid, `None` to disable it
    pub fn step(mut self, step: Option<f64>) -> Self {
        self.step = step;
        self
    }

    /// Add a mark
    pub fn mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }

    /// Replace all marks
    pub fn marks(mut self, marks: impl IntoIterator<Item = Mark>) -> Self {
        self.marks = marks.into_iter().collect();
        self
    }

    /// Allow or forbid handles passing each other
    pub fn allow_cross(mut self, allow_cross: bool) -> Self {
        self.allow_cross = allow_cross;
        self
    }

    /// Set the spacing policy
    pub fn pushable(mut self, pushable: Pushable) -> Self {
        self.pushable = pushable;
        self
    }

    /// Set the range settings
    pub fn range(mut self, range: RangeConfig) -> Self {
        self.range = range;
        self
    }

    /// Set an explicit direction
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Lay the slider out vertically
    pub fn vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    /// Reverse the value direction
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Set disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Enable or disable keyboard input
    pub fn keyboard(mut self, keyboard: bool) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Set the idle timeout for drag sessions
    pub fn drag_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.drag_timeout_ms =
            timeout.map_or(0, |t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Resolve into the configuration the engine runs on
    pub fn sanitize(&self) -> (ResolvedConfig, Vec<ConfigWarning>) {
        let mut warnings = Vec::new();

        let mut min = finite_or(self.min, "min", 0.0, &mut warnings);
        let mut max = finite_or(self.max, "max", 100.0, &mut warnings);
        if min > max {
            warnings.push(ConfigWarning::InvertedRange { min, max });
            min = 0.0;
            max = 100.0;
        }

        let step = match self.step {
            Some(step) if !(step.is_finite() && step > 0.0) => {
                warnings.push(ConfigWarning::InvalidStep(step));
                Some(default_step())
            }
            other => other,
        };

        // `true` means "one step apart" when there is a step grid
        let pushable = match self.pushable {
            Pushable::Gap(gap) if !(gap.is_finite() && gap >= 0.0) => {
                warnings.push(ConfigWarning::InvalidPushable(gap));
                Pushable::Off
            }
            Pushable::Adjacent => step.map_or(Pushable::Adjacent, Pushable::Gap),
            other => other,
        };

        let (marks, rejected) = Marks::within(self.marks.iter().cloned(), min, max);
        warnings.extend(rejected.into_iter().map(ConfigWarning::MarkOutOfRange));

        let mut range = self.range.clone();
        if range.editable {
            range.enabled = true;
        }
        if range.draggable_track && step.is_none() {
            warnings.push(ConfigWarning::DraggableTrackWithoutStep);
            range.draggable_track = false;
        }
        if let Some(max_count) = range.max_count {
            if range.min_count > max_count {
                warnings.push(ConfigWarning::CountBoundsInverted {
                    min_count: range.min_count,
                    max_count,
                });
                range.max_count = Some(range.min_count);
            }
        }

        let resolved = ResolvedConfig {
            min,
            max,
            step,
            marks,
            allow_cross: self.allow_cross,
            pushable,
            range,
            direction: self
                .direction
                .unwrap_or_else(|| Direction::from_orientation(self.vertical, self.reverse)),
            disabled: self.disabled,
            keyboard: self.keyboard,
            drag_timeout: (self.drag_timeout_ms > 0)
                .then(|| Duration::from_millis(self.drag_timeout_ms)),
        };

        (resolved, warnings)
    }
}

fn finite_or(
    value: f64,
    bound: &'static str,
    fallback: f64,
    warnings: &mut Vec<ConfigWarning>,
) -> f64 {
    if value.is_finite() {
        value
    } else {
        warnings.push(ConfigWarning::NonFiniteBound {
            bound,
            value,
            fallback,
        });
        fallback
    }
}

/// Sanitized configuration the engine operates on
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    /// Finite lower bound, `min <= max`
    pub min: f64,
    /// Finite upper bound
    pub max: f64,
    /// Positive step, or `None`
    pub step: Option<f64>,
    /// Sorted, deduplicated marks inside `[min, max]`
    pub marks: Marks,
    pub allow_cross: bool,
    pub pushable: Pushable,
    pub range: RangeConfig,
    pub direction: Direction,
    pub disabled: bool,
    pub keyboard: bool,
    pub drag_timeout: Option<Duration>,
}

impl ResolvedConfig {
    /// Length of the value range
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        SliderConfig::default().sanitize().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_clean() {
        let (resolved, warnings) = SliderConfig::default().sanitize();
        assert!(warnings.is_empty());
        assert_eq!(resolved.min, 0.0);
        assert_eq!(resolved.max, 100.0);
        assert_eq!(resolved.step, Some(1.0));
        assert_eq!(resolved.direction, Direction::Ltr);
        assert_eq!(resolved.drag_timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_non_positive_step_falls_back_to_one() {
        let (resolved, warnings) = SliderConfig::new().step(Some(0.0)).sanitize();
        assert_eq!(resolved.step, Some(1.0));
        assert_eq!(warnings, vec![ConfigWarning::InvalidStep(0.0)]);

        let (resolved, _) = SliderConfig::new().step(Some(-3.0)).sanitize();
        assert_eq!(resolved.step, Some(1.0));
    }

    #[test]
    fn test_non_finite_bounds() {
        let (resolved, warnings) = SliderConfig::new()
            .min(f64::NEG_INFINITY)
            .max(f64::NAN)
            .sanitize();
        assert_eq!(resolved.min, 0.0);
        assert_eq!(resolved.max, 100.0);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_inverted_range_falls_back() {
        let (resolved, warnings) = SliderConfig::new().min(80.0).max(20.0).sanitize();
        assert_eq!((resolved.min, resolved.max), (0.0, 100.0));
        assert_eq!(
            warnings,
            vec![ConfigWarning::InvertedRange {
                min: 80.0,
                max: 20.0
            }]
        );
    }

    #[test]
    fn test_draggable_track_requires_step() {
        let (resolved, warnings) = SliderConfig::new()
            .step(None)
            .range(RangeConfig {
                enabled: true,
                draggable_track: true,
                ..Default::default()
            })
            .sanitize();

        assert!(!resolved.range.draggable_track);
        assert_eq!(warnings, vec![ConfigWarning::DraggableTrackWithoutStep]);
    }

    #[test]
    fn test_pushable_true_uses_step() {
        let (resolved, _) = SliderConfig::new()
            .step(Some(5.0))
            .pushable(Pushable::Adjacent)
            .sanitize();
        assert_eq!(resolved.pushable, Pushable::Gap(5.0));

        let (resolved, _) = SliderConfig::new()
            .step(None)
            .pushable(Pushable::Adjacent)
            .sanitize();
        assert_eq!(resolved.pushable, Pushable::Adjacent);
    }

    #[test]
    fn test_negative_pushable_disabled() {
        let (resolved, warnings) = SliderConfig::new().pushable(Pushable::Gap(-1.0)).sanitize();
        assert_eq!(resolved.pushable, Pushable::Off);
        assert_eq!(warnings, vec![ConfigWarning::InvalidPushable(-1.0)]);
    }

    #[test]
    fn test_needs_push() {
        assert!(!Pushable::Off.needs_push(0.0));
        assert!(Pushable::Adjacent.needs_push(0.0));
        assert!(!Pushable::Adjacent.needs_push(0.5));
        assert!(Pushable::Gap(10.0).needs_push(9.0));
        assert!(!Pushable::Gap(10.0).needs_push(10.0));
    }

    #[test]
    fn test_editable_implies_range_and_count_bounds() {
        let (resolved, warnings) = SliderConfig::new()
            .range(RangeConfig {
                editable: true,
                min_count: 4,
                max_count: Some(2),
                ..Default::default()
            })
            .sanitize();

        assert!(resolved.range.enabled);
        assert_eq!(resolved.range.max_count, Some(4));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_explicit_direction_wins() {
        let (resolved, _) = SliderConfig::new()
            .vertical(true)
            .direction(Direction::Rtl)
            .sanitize();
        assert_eq!(resolved.direction, Direction::Rtl);

        let (resolved, _) = SliderConfig::new().vertical(true).reverse(true).sanitize();
        assert_eq!(resolved.direction, Direction::Ttb);
    }

    #[test]
    fn test_drag_timeout_zero_disables() {
        let (resolved, _) = SliderConfig::new().drag_timeout(None).sanitize();
        assert_eq!(resolved.drag_timeout, None);

        let config = SliderConfig::new().drag_timeout(Some(Duration::MAX));
        assert_eq!(config.drag_timeout_ms, u64::MAX);
    }
}
