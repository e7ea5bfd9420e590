//! Change notifications emitted by the controller

use serde::Serialize;

use crate::values::Values;

/// Notification for the host / rendering layer
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SliderEvent {
    /// An interaction is about to change the values (carries the old ones)
    BeforeChange { values: Values },
    /// Values changed; during a drag these are live, uncommitted values
    Change { values: Values },
    /// An interaction settled; `values` are the committed values
    ChangeComplete {
        values: Values,
        /// Index of a handle removed by this interaction
        #[serde(skip_serializing_if = "Option::is_none")]
        deleted: Option<usize>,
    },
}

impl SliderEvent {
    /// Values carried by the event
    pub fn values(&self) -> &Values {
        match self {
            SliderEvent::BeforeChange { values }
            | SliderEvent::Change { values }
            | SliderEvent::ChangeComplete { values, .. } => values,
        }
    }
}
