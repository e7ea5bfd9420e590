//! Slider marks
//!
//! A mark is a fixed snap point that attracts handles regardless of the step
//! grid. The list is kept sorted ascending and deduplicated by value.

use serde::{Deserialize, Serialize};

/// A labeled snap point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    /// Position of the mark in value space
    pub value: f64,
    /// Optional label shown by the rendering layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Mark {
    /// Create an unlabeled mark
    pub fn new(value: f64) -> Self {
        Self { value, label: None }
    }

    /// Create a labeled mark
    pub fn labeled(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(label.into()),
        }
    }
}

/// Sorted, deduplicated marks restricted to a value range
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Marks {
    marks: Vec<Mark>,
}

impl Marks {
    /// Build a mark list for `[min, max]`
    ///
    /// Returns the list together with the values that were rejected for being
    /// non-finite or outside the range. When two marks share a value the first
    /// one (and its label) is kept.
    pub fn within(marks: impl IntoIterator<Item = Mark>, min: f64, max: f64) -> (Self, Vec<f64>) {
        let mut rejected = Vec::new();
        let mut kept: Vec<Mark> = Vec::new();

        for mark in marks {
            if !mark.value.is_finite() || mark.value < min || mark.value > max {
                rejected.push(mark.value);
                continue;
            }
            kept.push(mark);
        }

        // Stable sort keeps the first of equal values in front for dedup_by
        kept.sort_by(|a, b| a.value.total_cmp(&b.value));
        kept.dedup_by(|later, earlier| later.value == earlier.value);

        (Self { marks: kept }, rejected)
    }

    /// Iterate over mark values in ascending order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.marks.iter().map(|m| m.value)
    }

    /// Iterate over the marks
    pub fn iter(&self) -> std::slice::Iter<'_, Mark> {
        self.marks.iter()
    }

    /// Number of marks
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Check if there are no marks
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
