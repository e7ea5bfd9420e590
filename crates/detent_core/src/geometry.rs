//! Slider orientation and pointer geometry
//!
//! The engine never sees layout; the host reports pointer positions and the
//! track rectangle in one coordinate space (page or window coordinates).

use serde::{Deserialize, Serialize};

/// Direction in which values increase along the track
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right
    #[default]
    Ltr,
    /// Right to left
    Rtl,
    /// Top to bottom
    Ttb,
    /// Bottom to top
    Btt,
}

impl Direction {
    /// Derive the direction from slider orientation flags
    ///
    /// Vertical sliders grow upwards unless reversed.
    pub fn from_orientation(vertical: bool, reverse: bool) -> Self {
        match (vertical, reverse) {
            (true, false) => Direction::Btt,
            (true, true) => Direction::Ttb,
            (false, false) => Direction::Ltr,
            (false, true) => Direction::Rtl,
        }
    }

    /// Check if the primary axis is vertical
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Ttb | Direction::Btt)
    }

    /// Split a pointer delta into the track offset (fraction of the track
    /// length, signed along the value direction) and the displacement along
    /// the orthogonal axis.
    pub fn split_delta(&self, dx: f64, dy: f64, track: &TrackRect) -> (f64, f64) {
        match self {
            Direction::Ltr => (ratio(dx, track.width), dy),
            Direction::Rtl => (ratio(-dx, track.width), dy),
            Direction::Ttb => (ratio(dy, track.height), dx),
            Direction::Btt => (ratio(-dy, track.height), dx),
        }
    }
}

fn ratio(delta: f64, length: f64) -> f64 {
    if length > 0.0 {
        delta / length
    } else {
        0.0
    }
}

/// A pointer position
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of the slider track
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TrackRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Fraction of the track (0.0..=1.0) at which a point lies, measured in
    /// the value direction. Degenerate tracks report 0.0.
    pub fn fraction_at(&self, point: Point, direction: Direction) -> f64 {
        let fraction = match direction {
            Direction::Ltr => ratio(point.x - self.x, self.width),
            Direction::Rtl => ratio(self.x + self.width - point.x, self.width),
            Direction::Ttb => ratio(point.y - self.y, self.height),
            Direction::Btt => ratio(self.y + self.height - point.y, self.height),
        };
        fraction.clamp(0.0, 1.0)
    }
}
