//! Detent Core
//!
//! Headless value engine for single and multi-handle sliders:
//!
//! - **Formatting**: clamp and snap raw values to marks, a step grid and the bounds
//! - **Offsets**: keyboard-style unit steps and pointer-style distance moves
//! - **Collisions**: no-cross clamping or cascading pushes between handles
//! - **Drag Sessions**: handle and whole-track drags, drag-to-delete, cancellation
//! - **Controller**: pointer, keyboard and mark-click input producing change events
//!
//! Nothing here renders; the host maps pointer positions into a [`TrackRect`]
//! and draws whatever values the [`SliderEvent`]s carry.
//!
//! # Example
//!
//! ```rust
//! use detent_core::{KeyCode, SliderConfig, SliderController};
//!
//! let config = SliderConfig::new().step(Some(10.0));
//! let mut slider = SliderController::new(&config, &[20.0, 50.0]);
//!
//! slider.key_down(KeyCode::ArrowRight, 1);
//! assert_eq!(slider.values().as_slice(), &[20.0, 60.0]);
//! ```

pub mod config;
pub mod controller;
pub mod drag;
pub mod engine;
pub mod error;
pub mod events;
pub mod format;
pub mod geometry;
pub mod keyboard;
pub mod marks;
pub mod offset;
pub mod push;
pub mod values;

pub use config::{Pushable, RangeConfig, ResolvedConfig, SliderConfig};
pub use controller::{PointerTarget, SliderController};
pub use drag::{DragInput, DragOutcome, DragPhase, DragSession, DragTarget, REMOVE_DISTANCE};
pub use engine::SliderEngine;
pub use error::{ConfigWarning, UnknownKey};
pub use events::SliderEvent;
pub use format::ValueFormatter;
pub use geometry::{Direction, Point, TrackRect};
pub use keyboard::{KeyAction, KeyCode};
pub use marks::{Mark, Marks};
pub use offset::{Offset, OffsetMode, OffsetResolver, OffsetResult};
pub use push::CollisionResolver;
pub use values::Values;
