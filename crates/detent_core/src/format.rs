//! Value formatting
//!
//! Turns any raw number into a legal handle value: clamped into the range and
//! snapped to the closest of the marks, the step grid and the bounds.

use crate::config::ResolvedConfig;
use crate::marks::Marks;

/// Clamps and snaps raw values for one slider configuration
#[derive(Clone, Copy, Debug)]
pub struct ValueFormatter<'a> {
    min: f64,
    max: f64,
    step: Option<f64>,
    marks: &'a Marks,
    precision: usize,
}

impl<'a> ValueFormatter<'a> {
    pub fn new(config: &'a ResolvedConfig) -> Self {
        let precision = [config.step.unwrap_or(0.0), config.min, config.max]
            .into_iter()
            .map(decimal_places)
            .max()
            .unwrap_or(0);

        Self {
            min: config.min,
            max: config.max,
            step: config.step,
            marks: &config.marks,
            precision,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn marks(&self) -> &'a Marks {
        self.marks
    }

    /// Clamp a raw value into `[min, max]`; NaN clamps to `min`
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Project a value onto the step grid anchored at `min`
    ///
    /// The result is rounded to the decimal precision of `step`, `min` and
    /// `max` so that `0.1 + 0.2` style drift never leaks out. Returns `None`
    /// without a step grid or when the projection falls outside the range.
    pub fn format_step_value(&self, value: f64) -> Option<f64> {
        let step = self.step?;
        let projected = self.min + ((value - self.min) / step).round() * step;
        let fixed = round_to(projected, self.precision);
        (self.min <= fixed && fixed <= self.max).then_some(fixed)
    }

    /// Clamp and snap a raw value
    ///
    /// Candidates are scanned in the order marks, step projection, `min`,
    /// `max`; on equal distance the earlier candidate wins.
    pub fn format_value(&self, raw: f64) -> f64 {
        let clamped = self.clamp(raw);

        let candidates = self
            .marks
            .values()
            .chain(self.format_step_value(clamped))
            .chain([self.min, self.max]);

        let mut closest = self.min;
        let mut closest_dist = f64::INFINITY;
        for candidate in candidates {
            let dist = (clamped - candidate).abs();
            if dist < closest_dist {
                closest = candidate;
                closest_dist = dist;
            }
        }
        closest
    }
}

/// Number of digits after the decimal point in the shortest representation
fn decimal_places(value: f64) -> usize {
    let repr = value.to_string();
    repr.split_once('.').map_or(0, |(_, fraction)| fraction.len())
}

fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliderConfig;
    use crate::marks::Mark;

    fn resolved(config: SliderConfig) -> ResolvedConfig {
        config.sanitize().0
    }

    #[test]
    fn test_basic_clamp() {
        let config = resolved(SliderConfig::new().step(Some(10.0)));
        let formatter = ValueFormatter::new(&config);

        assert_eq!(formatter.format_value(107.0), 100.0);
        assert_eq!(formatter.format_value(-3.0), 0.0);
        assert_eq!(formatter.format_value(f64::NAN), 0.0);
    }

    #[test]
    fn test_mark_snapping() {
        let config = resolved(SliderConfig::new().step(Some(10.0)).mark(Mark::new(30.0)));
        let formatter = ValueFormatter::new(&config);

        assert_eq!(formatter.format_value(31.0), 30.0);
        // Step value 40 is closer than the mark
        assert_eq!(formatter.format_value(36.0), 40.0);
    }

    #[test]
    fn test_mark_wins_over_step_without_grid_hit() {
        let config = resolved(SliderConfig::new().step(Some(10.0)).mark(Mark::new(33.0)));
        let formatter = ValueFormatter::new(&config);

        // 34 -> mark 33 (dist 1) beats step 30 (dist 4)
        assert_eq!(formatter.format_value(34.0), 33.0);
    }

    #[test]
    fn test_tie_goes_to_first_candidate() {
        // 25 is equidistant from mark 20 and step value 30
        let config = resolved(SliderConfig::new().step(Some(30.0)).mark(Mark::new(20.0)));
        let formatter = ValueFormatter::new(&config);

        assert_eq!(formatter.format_value(25.0), 20.0);
    }

    #[test]
    fn test_step_projection_precision() {
        let config = resolved(SliderConfig::new().min(0.0).max(1.0).step(Some(0.1)));
        let formatter = ValueFormatter::new(&config);

        assert_eq!(formatter.format_step_value(0.3), Some(0.3));
        assert_eq!(formatter.format_value(0.1 + 0.2), 0.3);
        assert_eq!(formatter.format_value(0.74), 0.7);
    }

    #[test]
    fn test_step_projection_outside_range_discarded() {
        // Grid 0, 40, 80; 100 would project onto 120
        let config = resolved(SliderConfig::new().step(Some(40.0)));
        let formatter = ValueFormatter::new(&config);

        assert_eq!(formatter.format_step_value(99.0), Some(80.0));
        assert_eq!(formatter.format_step_value(100.0), None);
        // max is a candidate of its own
        assert_eq!(formatter.format_value(95.0), 100.0);
    }

    #[test]
    fn test_no_step_snaps_to_marks_and_bounds() {
        let config = resolved(
            SliderConfig::new()
                .step(None)
                .marks([Mark::new(20.0), Mark::new(70.0)]),
        );
        let formatter = ValueFormatter::new(&config);

        assert_eq!(formatter.format_step_value(42.0), None);
        assert_eq!(formatter.format_value(42.0), 20.0);
        assert_eq!(formatter.format_value(50.0), 70.0);
        assert_eq!(formatter.format_value(91.0), 100.0);
    }

    #[test]
    fn test_format_is_idempotent_and_in_range() {
        let config = resolved(
            SliderConfig::new()
                .min(-20.0)
                .max(80.0)
                .step(Some(7.0))
                .marks([Mark::new(-12.5), Mark::new(33.0), Mark::new(79.0)]),
        );
        let formatter = ValueFormatter::new(&config);

        let mut raw = -60.0;
        while raw <= 120.0 {
            let once = formatter.format_value(raw);
            assert!((-20.0..=80.0).contains(&once), "{raw} -> {once}");
            assert_eq!(formatter.format_value(once), once, "not idempotent at {raw}");
            raw += 0.37;
        }
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places(1.0), 0);
        assert_eq!(decimal_places(0.25), 2);
        assert_eq!(decimal_places(-3.125), 3);
    }
}
