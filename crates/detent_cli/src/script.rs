//! Interaction scripts
//!
//! A script is a TOML file holding a slider configuration, the initial values
//! and a list of steps replayed against a `SliderController`:
//!
//! ```toml
//! values = [20, 50]
//!
//! [slider]
//! step = 10
//!
//! [track]
//! width = 200
//!
//! [[steps]]
//! action = "pointer_down"
//! target = { handle = 0 }
//! x = 40
//!
//! [[steps]]
//! action = "pointer_move"
//! x = 90
//!
//! [[steps]]
//! action = "pointer_up"
//! ```

use anyhow::{Context, Result};
use detent_core::{
    KeyCode, Point, PointerTarget, SliderConfig, SliderController, SliderEngine, SliderEvent,
    TrackRect, Values,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub values: Vec<f64>,
    #[serde(default = "default_track")]
    pub track: TrackRect,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// 100 x 10 track at the origin: one pointer unit per value unit on 0..100
fn default_track() -> TrackRect {
    TrackRect::new(0.0, 0.0, 100.0, 10.0)
}

/// One scripted interaction
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    PointerDown {
        target: PointerTarget,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    PointerMove {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    PointerUp,
    PointerCancel,
    /// Key press on a handle, DOM key names (`ArrowLeft`, `PageUp`, ...)
    Key { key: String, index: usize },
    MarkClick { value: f64 },
    Delete { index: usize },
    /// Controlled update from the host
    SetValues { values: Vec<f64> },
    /// Let time pass without pointer activity; stale drags expire
    Wait { ms: u64 },
}

/// An event tagged with the step that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventLine {
    pub step: usize,
    #[serde(flatten)]
    pub event: SliderEvent,
}

/// Result of replaying a script
#[derive(Debug)]
pub struct Replay {
    pub events: Vec<EventLine>,
    pub values: Values,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Run every step against a fresh controller
    pub fn replay(&self) -> Result<Replay> {
        let (engine, warnings) = SliderEngine::from_config(&self.slider);
        if !warnings.is_empty() {
            tracing::info!("{} config setting(s) replaced", warnings.len());
        }
        let mut slider = SliderController::with_engine(engine, &self.values);
        let mut events = Vec::new();

        for (index, step) in self.steps.iter().enumerate() {
            tracing::debug!(index, ?step, "replaying");
            let emitted = apply(&mut slider, step, self.track)
                .with_context(|| format!("step {} ({:?})", index, step))?;
            events.extend(emitted.into_iter().map(|event| EventLine { step: index, event }));
        }

        if slider.is_dragging() {
            tracing::warn!("script ended with a drag still active");
        }

        Ok(Replay {
            events,
            values: slider.values().clone(),
        })
    }
}

fn apply(slider: &mut SliderController, step: &Step, track: TrackRect) -> Result<Vec<SliderEvent>> {
    let events = match step {
        Step::PointerDown { target, x, y } => slider.pointer_down(*target, Point::new(*x, *y), track),
        Step::PointerMove { x, y } => slider.pointer_move(Point::new(*x, *y)),
        Step::PointerUp => slider.pointer_up(),
        Step::PointerCancel => slider.pointer_cancel(),
        Step::Key { key, index } => {
            let key: KeyCode = key.parse()?;
            slider.key_down(key, *index)
        }
        Step::MarkClick { value } => slider.mark_click(*value),
        Step::Delete { index } => slider.delete_handle(*index),
        Step::SetValues { values } => {
            slider.set_values(values);
            Vec::new()
        }
        Step::Wait { ms } => slider.expire_stale(Instant::now() + Duration::from_millis(*ms)),
    };
    Ok(events)
}
