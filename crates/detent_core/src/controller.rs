//! Interaction surface
//!
//! `SliderController` owns the committed handle values and at most one drag
//! session. Every input returns the events it produced, in order. The host
//! forwards pointer, keyboard and mark-click input and renders whatever the
//! events carry.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::SliderConfig;
use crate::drag::{DragOutcome, DragSession, DragTarget};
use crate::engine::SliderEngine;
use crate::events::SliderEvent;
use crate::geometry::{Point, TrackRect};
use crate::keyboard::{KeyAction, KeyCode};
use crate::offset::OffsetMode;
use crate::values::{same_values, sort_values, Values};

/// Element hit by a pointer-down
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    /// A handle by index into the committed values
    Handle(usize),
    /// The highlighted segment between the first and last handle
    Track,
    /// The slider background
    Rail,
}

/// Stateful slider: committed values, focus and the active drag session
#[derive(Clone, Debug)]
pub struct SliderController {
    engine: SliderEngine,
    values: Values,
    /// Values last reported to the host (live values while dragging)
    live: Values,
    focused: Option<usize>,
    session: Option<DragSession>,
}

impl SliderController {
    /// Sanitize `config` and set up the initial values
    pub fn new(config: &SliderConfig, values: &[f64]) -> Self {
        let (engine, _) = SliderEngine::from_config(config);
        Self::with_engine(engine, values)
    }

    /// Build a controller around an existing engine
    pub fn with_engine(engine: SliderEngine, values: &[f64]) -> Self {
        let values = engine.normalize(values);
        Self {
            engine,
            live: values.clone(),
            values,
            focused: None,
            session: None,
        }
    }

    pub fn engine(&self) -> &SliderEngine {
        &self.engine
    }

    /// Committed values, sorted ascending
    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Values to render: live drag values while dragging, committed otherwise
    pub fn live_values(&self) -> &Values {
        &self.live
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Focus a handle; returns `false` for an out-of-range index
    pub fn focus_handle(&mut self, index: usize) -> bool {
        if index < self.values.len() {
            self.focused = Some(index);
            true
        } else {
            false
        }
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Controlled update from the host; emits no events
    pub fn set_values(&mut self, values: &[f64]) {
        if let Some(session) = self.session.take() {
            tracing::debug!(dragging = ?session.target(), "drag dropped by controlled update");
        }
        self.values = self.engine.normalize(values);
        self.live = self.values.clone();
        if let Some(focused) = self.focused {
            self.focused = Some(focused.min(self.values.len() - 1));
        }
    }

    pub fn pointer_down(
        &mut self,
        target: PointerTarget,
        position: Point,
        track: TrackRect,
    ) -> Vec<SliderEvent> {
        if self.engine.config().disabled {
            return Vec::new();
        }
        if let Some(session) = &self.session {
            tracing::debug!(
                active = ?session.target(),
                requested = ?target,
                "pointer down ignored while dragging"
            );
            return Vec::new();
        }

        let target = match target {
            PointerTarget::Track if !self.engine.config().range.draggable_track => {
                PointerTarget::Rail
            }
            other => other,
        };

        match target {
            PointerTarget::Handle(index) => {
                if index >= self.values.len() {
                    return Vec::new();
                }
                self.focused = Some(index);
                self.start_drag(DragTarget::Handle(index), position, track);
                vec![self.before_change()]
            }
            PointerTarget::Track => {
                self.start_drag(DragTarget::Track, position, track);
                vec![self.before_change()]
            }
            PointerTarget::Rail => {
                let config = self.engine.config();
                let fraction = track.fraction_at(position, config.direction);
                let raw = config.min + fraction * config.span();

                let mut events = vec![self.before_change()];
                let Some(focus) = self.change_to_close_value(raw, &mut events) else {
                    return events;
                };
                self.start_drag(DragTarget::Handle(focus), position, track);
                events
            }
        }
    }

    pub fn pointer_move(&mut self, position: Point) -> Vec<SliderEvent> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        session.update(&self.engine, position, Instant::now());
        let live = session.live_values();

        let mut events = Vec::new();
        self.publish(live, &mut events);
        events
    }

    pub fn pointer_up(&mut self) -> Vec<SliderEvent> {
        match self.session.take() {
            Some(session) => self.finish(session.release()),
            None => Vec::new(),
        }
    }

    /// The pointer was lost (capture released, window blurred, ...)
    pub fn pointer_cancel(&mut self) -> Vec<SliderEvent> {
        match self.session.take() {
            Some(session) => self.finish(session.cancel()),
            None => Vec::new(),
        }
    }

    /// Cancel a drag session that saw no pointer activity for the configured
    /// timeout
    pub fn expire_stale(&mut self, now: Instant) -> Vec<SliderEvent> {
        let Some(timeout) = self.engine.config().drag_timeout else {
            return Vec::new();
        };
        let stale = self
            .session
            .as_ref()
            .is_some_and(|session| session.is_stale(now, timeout));
        if !stale {
            return Vec::new();
        }
        tracing::debug!(?timeout, "drag session expired");
        self.pointer_cancel()
    }

    pub fn key_down(&mut self, key: KeyCode, index: usize) -> Vec<SliderEvent> {
        let config = self.engine.config();
        if config.disabled || !config.keyboard || index >= self.values.len() {
            return Vec::new();
        }
        if self.session.is_some() {
            tracing::debug!(%key, "key ignored while dragging");
            return Vec::new();
        }

        let offset = match key.action(config.direction) {
            KeyAction::Remove => return self.delete_handle(index),
            KeyAction::Offset(offset) => offset,
        };
        let Some(result) = self
            .engine
            .offset_values(&self.values, offset, index, OffsetMode::Unit)
        else {
            return Vec::new();
        };

        let mut values = result.values;
        sort_values(&mut values);
        self.focused = values.iter().position(|v| *v == result.value).or(Some(index));

        let mut events = vec![self.before_change()];
        self.commit(values, None, &mut events);
        events
    }

    /// Move the closest handle to a clicked mark (or insert one)
    pub fn mark_click(&mut self, value: f64) -> Vec<SliderEvent> {
        if self.engine.config().disabled || self.session.is_some() {
            return Vec::new();
        }

        let mut events = vec![self.before_change()];
        if self.change_to_close_value(value, &mut events).is_some() {
            events.push(SliderEvent::ChangeComplete {
                values: self.values.clone(),
                deleted: None,
            });
        }
        events
    }

    /// Remove a handle of an editable range
    pub fn delete_handle(&mut self, index: usize) -> Vec<SliderEvent> {
        let config = self.engine.config();
        if config.disabled || !config.range.editable || self.session.is_some() {
            return Vec::new();
        }
        if index >= self.values.len() || self.values.len() <= config.range.min_count {
            tracing::debug!(index, count = self.values.len(), "delete blocked");
            return Vec::new();
        }

        let mut values = self.values.clone();
        values.remove(index);
        self.focused = Some(index.saturating_sub(1));

        let mut events = vec![self.before_change()];
        self.commit(values, Some(index), &mut events);
        events
    }

    fn start_drag(&mut self, target: DragTarget, position: Point, track: TrackRect) {
        self.session = Some(DragSession::start(
            target,
            &self.values,
            position,
            track,
            Instant::now(),
        ));
    }

    /// Replace the handle closest to `raw` (the last one on a tie), or insert
    /// a new handle in editable mode. Returns the index of the affected handle.
    fn change_to_close_value(&mut self, raw: f64, events: &mut Vec<SliderEvent>) -> Option<usize> {
        let value = self.engine.format_value(raw);
        let range = &self.engine.config().range;

        let mut closest: Option<(usize, f64)> = None;
        for (i, v) in self.values.iter().enumerate() {
            let dist = (v - value).abs();
            match closest {
                Some((_, best)) if dist > best => {}
                _ => closest = Some((i, dist)),
            }
        }
        let (index, dist) = closest?;

        let can_insert = range.editable
            && dist != 0.0
            && range.max_count.map_or(true, |max| self.values.len() < max);

        let mut values = self.values.clone();
        if can_insert {
            values.push(value);
        } else {
            values[index] = value;
        }
        sort_values(&mut values);

        let focus = if can_insert {
            values.iter().position(|v| *v == value).unwrap_or(index)
        } else {
            index
        };
        self.focused = Some(focus);

        self.values = values.clone();
        self.publish(values, events);
        Some(focus)
    }

    fn finish(&mut self, outcome: DragOutcome) -> Vec<SliderEvent> {
        let mut events = Vec::new();
        match outcome {
            DragOutcome::Committed { values, focus } => {
                if focus.is_some() {
                    self.focused = focus;
                }
                self.commit(values, None, &mut events);
            }
            DragOutcome::Deleted { index, values } => {
                self.focused = Some(index.saturating_sub(1));
                self.commit(values, Some(index), &mut events);
            }
            DragOutcome::Cancelled { values } => {
                self.commit(values, None, &mut events);
            }
        }
        events
    }

    fn commit(&mut self, values: Values, deleted: Option<usize>, events: &mut Vec<SliderEvent>) {
        self.values = values.clone();
        self.publish(values.clone(), events);
        events.push(SliderEvent::ChangeComplete { values, deleted });
    }

    /// Emit a change if `values` differ from what the host last saw
    fn publish(&mut self, values: Values, events: &mut Vec<SliderEvent>) {
        if !same_values(&self.live, &values) {
            events.push(SliderEvent::Change {
                values: values.clone(),
            });
            self.live = values;
        }
    }

    fn before_change(&self) -> SliderEvent {
        SliderEvent::BeforeChange {
            values: self.values.clone(),
        }
    }
}
