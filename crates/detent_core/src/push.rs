//! Collision resolution between neighbouring handles
//!
//! After one handle moved, its neighbours are corrected with one of two
//! policies:
//!
//! - crossing forbidden: the moved handle is clamped against its immediate
//!   neighbours (plus the push distance, if any);
//! - pushing: neighbours that end up too close are pushed away one unit at a
//!   time, cascading outwards, followed by two corrective passes over the
//!   whole array.
//!
//! Bounds win over spacing. A push that cannot move any further stops and the
//! gap may stay short at `min` / `max`.

use crate::config::Pushable;
use crate::offset::OffsetResolver;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionResolver {
    allow_cross: bool,
    pushable: Pushable,
}

impl CollisionResolver {
    pub fn new(allow_cross: bool, pushable: Pushable) -> Self {
        Self {
            allow_cross,
            pushable,
        }
    }

    /// Correct `values` after `values[index]` moved away from `origin`
    pub fn resolve(&self, offsets: &OffsetResolver<'_>, values: &mut [f64], index: usize, origin: f64) {
        if index >= values.len() {
            return;
        }

        if !self.allow_cross {
            self.clamp_to_neighbours(offsets, values, index, origin);
        } else if self.pushable != Pushable::Off {
            self.push_apart(offsets, values, index);
        }
    }

    fn clamp_to_neighbours(
        &self,
        offsets: &OffsetResolver<'_>,
        values: &mut [f64],
        index: usize,
        origin: f64,
    ) {
        let distance = self.pushable.clamp_distance();

        // A neighbour stacked on the old position does not block the move
        if index > 0 && values[index - 1] != origin {
            values[index] = values[index].max(values[index - 1] + distance);
        }
        if index + 1 < values.len() && values[index + 1] != origin {
            values[index] = values[index].min(values[index + 1] - distance);
        }
        // Bounds win over spacing
        values[index] = offsets.formatter().clamp(values[index]);
    }

    fn push_apart(&self, offsets: &OffsetResolver<'_>, values: &mut [f64], index: usize) {
        let len = values.len();

        // 1. handles after the moved one, pushed forward
        for i in index + 1..len {
            self.push_while_needed(offsets, values, i - 1, i, i, 1.0);
        }

        // 2. handles before the moved one, pushed backward
        for i in (1..=index).rev() {
            self.push_while_needed(offsets, values, i - 1, i, i - 1, -1.0);
        }

        // 3. corrective backward pass over the whole array
        for i in (1..len).rev() {
            self.push_while_needed(offsets, values, i - 1, i, i - 1, -1.0);
        }

        // 4. corrective forward pass over the whole array
        for i in 0..len.saturating_sub(1) {
            self.push_while_needed(offsets, values, i, i + 1, i + 1, 1.0);
        }
    }

    /// Push `values[moving]` one unit at a time until the pair `(low, high)`
    /// is far enough apart or the pushed handle stops moving.
    fn push_while_needed(
        &self,
        offsets: &OffsetResolver<'_>,
        values: &mut [f64],
        low: usize,
        high: usize,
        moving: usize,
        direction: f64,
    ) {
        let mut changed = true;
        while changed && self.pushable.needs_push(values[high] - values[low]) {
            let (next, moved) = offsets.offset_changed_value(values, direction, moving);
            values[moving] = next;
            changed = moved;
        }
    }
}
