//! Offset resolution
//!
//! Moves one handle by a relative amount and settles it on a legal snap
//! point. Two flavours exist:
//!
//! - **Unit** offsets count snap points (keyboard arrows, page keys). Each unit
//!   moves to the nearest mark, grid value or bound strictly past the current
//!   value, so a page step walks through unevenly spaced marks.
//! - **Dist** offsets are value-space distances (pointer drags). The handle
//!   lands on the snap point closest to `origin + offset` on the travel side.

use crate::config::ResolvedConfig;
use crate::format::ValueFormatter;
use crate::push::CollisionResolver;
use crate::values::Values;

/// Requested movement of a handle
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offset {
    /// Jump to the lower bound
    Min,
    /// Jump to the upper bound
    Max,
    /// Signed units (`OffsetMode::Unit`) or value distance (`OffsetMode::Dist`)
    By(f64),
}

/// How a numeric offset is interpreted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OffsetMode {
    /// Count of snap points
    #[default]
    Unit,
    /// Distance in value space
    Dist,
}

/// Result of moving one handle and resolving its neighbours
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetResult {
    /// Resolved value of the moved handle
    pub value: f64,
    /// All handle values after collision resolution
    pub values: Values,
}

/// Resolves handle offsets for one slider configuration
#[derive(Clone, Copy, Debug)]
pub struct OffsetResolver<'a> {
    formatter: ValueFormatter<'a>,
    step: Option<f64>,
    collisions: CollisionResolver,
}

impl<'a> OffsetResolver<'a> {
    pub fn new(config: &'a ResolvedConfig) -> Self {
        Self {
            formatter: ValueFormatter::new(config),
            step: config.step,
            collisions: CollisionResolver::new(config.allow_cross, config.pushable),
        }
    }

    pub fn formatter(&self) -> &ValueFormatter<'a> {
        &self.formatter
    }

    /// Compute the new value of `values[index]` for an offset
    ///
    /// Never fails: when no snap point exists in the travel direction the
    /// handle goes to the bound it was heading for. An out-of-bounds index is
    /// treated the same way.
    pub fn offset_value(&self, values: &[f64], offset: Offset, index: usize, mode: OffsetMode) -> f64 {
        let delta = match offset {
            Offset::Min => return self.formatter.min(),
            Offset::Max => return self.formatter.max(),
            Offset::By(delta) => delta,
        };

        let Some(&origin) = values.get(index) else {
            return self.boundary(delta);
        };
        if !delta.is_finite() {
            return origin;
        }

        match mode {
            OffsetMode::Dist => self
                .nearest(origin, delta, mode)
                .unwrap_or_else(|| self.boundary(delta)),
            OffsetMode::Unit => {
                if delta == 0.0 {
                    return origin;
                }
                // One snap point per iteration; |delta| bounds the loop
                let mut current = origin;
                let mut remaining = delta;
                loop {
                    let Some(next) = self.nearest(current, remaining, mode) else {
                        return self.boundary(remaining);
                    };
                    current = next;
                    if remaining.abs() <= 1.0 {
                        return current;
                    }
                    remaining -= remaining.signum();
                }
            }
        }
    }

    /// Move `values[index]` by a single unit and report whether it moved
    pub fn offset_changed_value(&self, values: &[f64], direction: f64, index: usize) -> (f64, bool) {
        let origin = values.get(index).copied();
        let next = self.offset_value(values, Offset::By(direction), index, OffsetMode::Unit);
        (next, origin != Some(next))
    }

    /// Move one handle and resolve collisions with the others
    ///
    /// All values are formatted first; the inputs are not modified. Returns
    /// `None` if `index` is out of bounds.
    pub fn offset_values(
        &self,
        values: &[f64],
        offset: Offset,
        index: usize,
        mode: OffsetMode,
    ) -> Option<OffsetResult> {
        if index >= values.len() {
            return None;
        }

        let mut next: Values = values
            .iter()
            .map(|v| self.formatter.format_value(*v))
            .collect();
        let origin = next[index];
        next[index] = self.offset_value(&next, offset, index, mode);

        self.collisions.resolve(self, &mut next, index, origin);

        Some(OffsetResult {
            value: next[index],
            values: next,
        })
    }

    /// Closest snap point past `origin` in the direction of `offset`
    fn nearest(&self, origin: f64, offset: f64, mode: OffsetMode) -> Option<f64> {
        let sign = if offset > 0.0 { 1.0 } else { -1.0 };
        let target = origin + offset;

        let stepped = match mode {
            OffsetMode::Unit => self
                .step
                .and_then(|step| self.formatter.format_step_value(origin + sign * step)),
            OffsetMode::Dist => self.formatter.format_step_value(target),
        };

        let compare = match mode {
            OffsetMode::Unit => origin,
            OffsetMode::Dist => target,
        };

        let candidates = self
            .formatter
            .marks()
            .values()
            .chain([self.formatter.min(), self.formatter.max()])
            .chain(self.formatter.format_step_value(origin))
            .chain(stepped)
            .filter(|&c| if offset < 0.0 { c <= origin } else { c >= origin })
            .filter(|&c| mode == OffsetMode::Dist || c != origin);

        let mut nearest: Option<(f64, f64)> = None;
        for candidate in candidates {
            let dist = (candidate - compare).abs();
            match nearest {
                Some((_, best)) if dist >= best => {}
                _ => nearest = Some((candidate, dist)),
            }
        }
        nearest.map(|(value, _)| value)
    }

    fn boundary(&self, delta: f64) -> f64 {
        if delta < 0.0 {
            self.formatter.min()
        } else {
            self.formatter.max()
        }
    }
}
