//! Drag sessions
//!
//! A session lives from pointer-down to pointer-up (or cancellation). It keeps
//! the values at drag start (`origin_values`) and a working copy
//! (`cache_values`) that is recomputed from the origin on every move, so the
//! result only depends on where the pointer is, not on the path it took.
//!
//! Handle identity is stable inside the working copy: index `i` is always the
//! dragged handle, even after it crossed a neighbour. Sorting happens only when
//! values leave the session.
//!
//! ```text
//!          press                    release
//!   Idle ─────────► Dragging ─────────────────► Idle (committed)
//!                    │    ▲
//!        off-axis    │    │ back on axis
//!                    ▼    │
//!                   Deleting ─────────────────► Idle (handle removed)
//!                               release
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::engine::SliderEngine;
use crate::geometry::{Point, TrackRect};
use crate::offset::{Offset, OffsetMode};
use crate::values::{sort_values, sorted, Values};

/// Off-axis pointer distance (in pointer units) beyond which a handle of an
/// editable range is marked for deletion
pub const REMOVE_DISTANCE: f64 = 130.0;

/// What a drag session moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragTarget {
    /// A single handle by index
    Handle(usize),
    /// The whole track: every handle shifts by the same amount
    Track,
}

/// Drag state machine phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    /// Pointer moved far enough off-axis to remove the handle on release
    Deleting,
}

/// Inputs of the drag state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragInput {
    Press,
    /// Move within the removal distance
    Move,
    /// Move beyond the removal distance
    MoveOffAxis,
    Release,
    Cancel,
}

impl DragPhase {
    /// Next phase for an input, `None` if the input does not change the phase
    pub fn on_event(&self, input: DragInput) -> Option<Self> {
        match (self, input) {
            (DragPhase::Idle, DragInput::Press) => Some(DragPhase::Dragging),

            (DragPhase::Dragging, DragInput::MoveOffAxis) => Some(DragPhase::Deleting),
            (DragPhase::Dragging, DragInput::Move) => None,

            (DragPhase::Deleting, DragInput::Move) => Some(DragPhase::Dragging),
            (DragPhase::Deleting, DragInput::MoveOffAxis) => None,

            (DragPhase::Dragging | DragPhase::Deleting, DragInput::Release | DragInput::Cancel) => {
                Some(DragPhase::Idle)
            }

            _ => None,
        }
    }
}

/// How a session ended
#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome {
    /// Working values become the new values
    Committed {
        values: Values,
        /// Sorted index of the dragged handle (`None` for track drags)
        focus: Option<usize>,
    },
    /// The dragged handle was removed
    Deleted { index: usize, values: Values },
    /// The session was abandoned; values are the ones from drag start
    Cancelled { values: Values },
}

/// One pointer interaction
#[derive(Clone, Debug)]
pub struct DragSession {
    target: DragTarget,
    phase: DragPhase,
    origin_values: Values,
    cache_values: Values,
    start: Point,
    track: TrackRect,
    last_activity: Instant,
}

impl DragSession {
    /// Begin a session from the given start values
    pub fn start(
        target: DragTarget,
        start_values: &[f64],
        position: Point,
        track: TrackRect,
        now: Instant,
    ) -> Self {
        let origin_values: Values = start_values.iter().copied().collect();
        let phase = DragPhase::Idle
            .on_event(DragInput::Press)
            .unwrap_or(DragPhase::Dragging);

        tracing::debug!(dragging = ?target, values = ?origin_values, "drag started");

        Self {
            target,
            phase,
            cache_values: origin_values.clone(),
            origin_values,
            start: position,
            track,
            last_activity: now,
        }
    }

    pub fn target(&self) -> DragTarget {
        self.target
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_deleting(&self) -> bool {
        self.phase == DragPhase::Deleting
    }

    pub fn origin_values(&self) -> &Values {
        &self.origin_values
    }

    /// Working values in handle order (not necessarily sorted)
    pub fn cache_values(&self) -> &Values {
        &self.cache_values
    }

    /// Sorted position of the dragged handle in the working values
    pub fn dragging_index(&self) -> Option<usize> {
        let DragTarget::Handle(index) = self.target else {
            return None;
        };
        let value = *self.cache_values.get(index)?;
        let rank = self
            .cache_values
            .iter()
            .enumerate()
            .filter(|(i, v)| **v < value || (**v == value && *i < index))
            .count();
        Some(rank)
    }

    /// Values to render while dragging: sorted, without a handle that is
    /// about to be removed
    pub fn live_values(&self) -> Values {
        match (self.phase, self.target) {
            (DragPhase::Deleting, DragTarget::Handle(index)) => {
                let mut values = self.cache_values.clone();
                values.remove(index);
                sort_values(&mut values);
                values
            }
            _ => sorted(&self.cache_values),
        }
    }

    /// Recompute the working values for a pointer position
    pub fn update(&mut self, engine: &SliderEngine, position: Point, now: Instant) {
        self.last_activity = now;

        let config = engine.config();
        let (percent, remove_dist) = config.direction.split_delta(
            position.x - self.start.x,
            position.y - self.start.y,
            &self.track,
        );

        let deleting = match self.target {
            DragTarget::Handle(_) => {
                config.range.editable
                    && remove_dist.abs() > REMOVE_DISTANCE
                    && self.cache_values.len() > config.range.min_count
            }
            DragTarget::Track => false,
        };
        let input = if deleting {
            DragInput::MoveOffAxis
        } else {
            DragInput::Move
        };
        if let Some(phase) = self.phase.on_event(input) {
            tracing::debug!(from = ?self.phase, to = ?phase, "drag phase changed");
            self.phase = phase;
        }

        let distance = percent * config.span();
        match self.target {
            DragTarget::Track => self.shift_track(engine, distance),
            DragTarget::Handle(index) => self.move_handle(engine, index, distance),
        }
    }

    fn shift_track(&mut self, engine: &SliderEngine, distance: f64) {
        let config = engine.config();
        let (Some(&first), Some(&last)) = (self.origin_values.first(), self.origin_values.last())
        else {
            return;
        };

        let lowest = config.min - first;
        let highest = config.max - last;
        let offset = distance.max(lowest).min(highest);

        // Snap the first handle, shift the rest by the same amount
        let snapped = engine.format_value(first + offset) - first;
        let offset = snapped.max(lowest).min(highest);

        let formatter = engine.formatter();
        self.cache_values = self
            .origin_values
            .iter()
            .map(|v| formatter.clamp(v + offset))
            .collect();
    }

    fn move_handle(&mut self, engine: &SliderEngine, index: usize, distance: f64) {
        let Some(&origin) = self.origin_values.get(index) else {
            return;
        };

        let mut values = self.cache_values.clone();
        values[index] = origin;
        if let Some(result) = engine.offset_values(&values, Offset::By(distance), index, OffsetMode::Dist)
        {
            self.cache_values = result.values;
        }
    }

    /// Check if the session saw no pointer activity for `timeout`
    pub fn is_stale(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_activity) >= timeout
    }

    /// Finish the session on pointer-up
    pub fn release(self) -> DragOutcome {
        let outcome = match (self.phase, self.target) {
            (DragPhase::Deleting, DragTarget::Handle(index)) => {
                let position = self.dragging_index().unwrap_or(index);
                let mut values = self.cache_values;
                values.remove(index);
                sort_values(&mut values);
                DragOutcome::Deleted {
                    index: position,
                    values,
                }
            }
            _ => DragOutcome::Committed {
                focus: self.dragging_index(),
                values: sorted(&self.cache_values),
            },
        };
        tracing::debug!(?outcome, "drag released");
        outcome
    }

    /// Abandon the session, restoring the start values
    pub fn cancel(self) -> DragOutcome {
        tracing::debug!(dragging = ?self.target, "drag cancelled");
        DragOutcome::Cancelled {
            values: sorted(&self.origin_values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Pushable, RangeConfig, SliderConfig};
    use crate::geometry::Direction;

    fn engine(config: SliderConfig) -> SliderEngine {
        SliderEngine::new(config.sanitize().0)
    }

    fn track() -> TrackRect {
        TrackRect::new(0.0, 0.0, 200.0, 20.0)
    }

    #[test]
    fn test_phase_transitions() {
        assert_eq!(DragPhase::Idle.on_event(DragInput::Press), Some(DragPhase::Dragging));
        assert_eq!(DragPhase::Idle.on_event(DragInput::Release), None);
        assert_eq!(
            DragPhase::Dragging.on_event(DragInput::MoveOffAxis),
            Some(DragPhase::Deleting)
        );
        assert_eq!(DragPhase::Deleting.on_event(DragInput::Move), Some(DragPhase::Dragging));
        assert_eq!(DragPhase::Deleting.on_event(DragInput::Release), Some(DragPhase::Idle));
        assert_eq!(DragPhase::Dragging.on_event(DragInput::Cancel), Some(DragPhase::Idle));
        assert_eq!(DragPhase::Dragging.on_event(DragInput::Press), None);
    }

    #[test]
    fn test_handle_drag_recomputes_from_origin() {
        let engine = engine(SliderConfig::new().step(Some(10.0)));
        let now = Instant::now();
        let mut session = DragSession::start(
            DragTarget::Handle(0),
            &[20.0, 60.0],
            Point::new(40.0, 10.0),
            track(),
            now,
        );

        // 50px of 200px = 25 units -> 45 -> snaps to 40 or 50, forward only
        session.update(&engine, Point::new(90.0, 10.0), now);
        assert_eq!(session.cache_values().as_slice(), &[50.0, 60.0]);

        // Back to the start position restores the origin
        session.update(&engine, Point::new(40.0, 10.0), now);
        assert_eq!(session.cache_values().as_slice(), &[20.0, 60.0]);

        match session.release() {
            DragOutcome::Committed { values, focus } => {
                assert_eq!(values.as_slice(), &[20.0, 60.0]);
                assert_eq!(focus, Some(0));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_handle_drag_directions() {
        let now = Instant::now();
        let track = TrackRect::new(0.0, 0.0, 100.0, 100.0);

        for (direction, to, expected) in [
            (Direction::Ltr, Point::new(60.0, 50.0), 60.0),
            (Direction::Rtl, Point::new(60.0, 50.0), 40.0),
            (Direction::Ttb, Point::new(50.0, 60.0), 60.0),
            (Direction::Btt, Point::new(50.0, 60.0), 40.0),
        ] {
            let engine = engine(SliderConfig::new().direction(direction));
            let mut session = DragSession::start(
                DragTarget::Handle(0),
                &[50.0],
                Point::new(50.0, 50.0),
                track,
                now,
            );
            session.update(&engine, to, now);
            assert_eq!(session.cache_values().as_slice(), &[expected], "{direction:?}");
        }
    }

    #[test]
    fn test_crossing_handle_keeps_identity() {
        let engine = engine(SliderConfig::new().step(Some(10.0)));
        let now = Instant::now();
        let mut session = DragSession::start(
            DragTarget::Handle(0),
            &[20.0, 40.0],
            Point::new(0.0, 0.0),
            track(),
            now,
        );

        // +80 units
        session.update(&engine, Point::new(160.0, 0.0), now);
        assert_eq!(session.cache_values().as_slice(), &[100.0, 40.0]);
        assert_eq!(session.live_values().as_slice(), &[40.0, 100.0]);
        assert_eq!(session.dragging_index(), Some(1));
    }

    #[test]
    fn test_push_during_drag_sticks() {
        let engine = engine(
            SliderConfig::new()
                .step(Some(10.0))
                .pushable(Pushable::Gap(10.0)),
        );
        let now = Instant::now();
        let mut session = DragSession::start(
            DragTarget::Handle(0),
            &[20.0, 40.0],
            Point::new(0.0, 0.0),
            track(),
            now,
        );

        session.update(&engine, Point::new(80.0, 0.0), now);
        assert_eq!(session.cache_values().as_slice(), &[60.0, 70.0]);

        // Pulling back leaves the pushed neighbour where it is
        session.update(&engine, Point::new(0.0, 0.0), now);
        assert_eq!(session.cache_values().as_slice(), &[20.0, 70.0]);
    }

    #[test]
    fn test_track_drag_shifts_all_and_clamps() {
        let engine = engine(SliderConfig::new().step(Some(10.0)).range(RangeConfig {
            enabled: true,
            draggable_track: true,
            ..Default::default()
        }));
        let now = Instant::now();
        let mut session = DragSession::start(
            DragTarget::Track,
            &[20.0, 50.0],
            Point::new(0.0, 0.0),
            track(),
            now,
        );

        // +22 units -> first snaps to 40 -> shift 20
        session.update(&engine, Point::new(44.0, 0.0), now);
        assert_eq!(session.cache_values().as_slice(), &[40.0, 70.0]);

        // far right: last handle stops at max
        session.update(&engine, Point::new(400.0, 0.0), now);
        assert_eq!(session.cache_values().as_slice(), &[70.0, 100.0]);

        // far left: first handle stops at min
        session.update(&engine, Point::new(-400.0, 0.0), now);
        assert_eq!(session.cache_values().as_slice(), &[0.0, 30.0]);

        match session.release() {
            DragOutcome::Committed { values, focus } => {
                assert_eq!(values.as_slice(), &[0.0, 30.0]);
                assert_eq!(focus, None);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_track_drag_stays_in_range_when_snapping_up() {
        // Grid 0..90 with max 95: snapping the first handle up must not push
        // the last one past max
        let engine = engine(SliderConfig::new().max(95.0).step(Some(10.0)));
        let now = Instant::now();
        let mut session = DragSession::start(
            DragTarget::Track,
            &[10.0, 90.0],
            Point::new(0.0, 0.0),
            TrackRect::new(0.0, 0.0, 95.0, 10.0),
            now,
        );

        session.update(&engine, Point::new(50.0, 0.0), now);
        let values = session.cache_values();
        assert!(values.iter().all(|v| (0.0..=95.0).contains(v)), "{values:?}");
    }

    #[test]
    fn test_drag_off_axis_marks_delete() {
        let engine = engine(SliderConfig::new().range(RangeConfig {
            editable: true,
            min_count: 1,
            ..Default::default()
        }));
        let now = Instant::now();
        let mut session = DragSession::start(
            DragTarget::Handle(1),
            &[20.0, 50.0, 80.0],
            Point::new(100.0, 10.0),
            track(),
            now,
        );

        session.update(&engine, Point::new(100.0, 10.0 + REMOVE_DISTANCE), now);
        assert_eq!(session.phase(), DragPhase::Dragging);

        session.update(&engine, Point::new(100.0, 10.0 + REMOVE_DISTANCE + 1.0), now);
        assert!(session.is_deleting());
        assert_eq!(session.live_values().as_slice(), &[20.0, 80.0]);

        match session.release() {
            DragOutcome::Deleted { index, values } => {
                assert_eq!(index, 1);
                assert_eq!(values.as_slice(), &[20.0, 80.0]);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_drag_delete_blocked_by_min_count() {
        let engine = engine(SliderConfig::new().range(RangeConfig {
            editable: true,
            min_count: 2,
            ..Default::default()
        }));
        let now = Instant::now();
        let mut session = DragSession::start(
            DragTarget::Handle(0),
            &[20.0, 50.0],
            Point::new(0.0, 0.0),
            track(),
            now,
        );

        session.update(&engine, Point::new(0.0, 500.0), now);
        assert!(!session.is_deleting());
    }

    #[test]
    fn test_drag_delete_requires_editable() {
        let engine = engine(SliderConfig::new());
        let now = Instant::now();
        let mut session = DragSession::start(
            DragTarget::Handle(0),
            &[20.0, 50.0],
            Point::new(0.0, 0.0),
            track(),
            now,
        );

        session.update(&engine, Point::new(0.0, -500.0), now);
        assert!(!session.is_deleting());
    }

    #[test]
    fn test_cancel_restores_origin() {
        let engine = engine(SliderConfig::new());
        let now = Instant::now();
        let mut session = DragSession::start(
            DragTarget::Handle(0),
            &[30.0],
            Point::new(0.0, 0.0),
            track(),
            now,
        );
        session.update(&engine, Point::new(100.0, 0.0), now);
        assert_eq!(session.cache_values().as_slice(), &[80.0]);
        assert_eq!(session.origin_values().as_slice(), &[30.0]);

        assert_eq!(
            session.cancel(),
            DragOutcome::Cancelled {
                values: Values::from_slice(&[30.0])
            }
        );
    }

    #[test]
    fn test_is_stale() {
        let now = Instant::now();
        let session = DragSession::start(
            DragTarget::Handle(0),
            &[30.0],
            Point::default(),
            track(),
            now,
        );

        assert!(!session.is_stale(now + Duration::from_millis(500), Duration::from_secs(1)));
        assert!(session.is_stale(now + Duration::from_secs(1), Duration::from_secs(1)));
    }
}
