//! Error types used by the crate.
//!
//! Gesture handling itself never fails: every handler returns `false` when an event cannot be
//! used. The errors here describe *why* an event was rejected and are written to the log before
//! the handler gives up.

use thiserror::Error;

use crate::detector::GestureKind;

/// Gestures error type.
#[derive(Debug, Error, PartialEq)]
pub enum GesturesError {
    /// A screen coordinate of a gesture is `NaN` or infinite.
    #[error("{gesture:?}: focal point ({x}, {y}) is not finite")]
    InvalidFocalPoint {
        /// Gesture the point belongs to.
        gesture: GestureKind,
        /// Horizontal component.
        x: f64,
        /// Vertical component.
        y: f64,
    },
    /// Displacement of a gesture is `NaN` or infinite.
    #[error("{gesture:?}: distance ({dx}, {dy}) is not finite")]
    InvalidDistance {
        /// Gesture the distance belongs to.
        gesture: GestureKind,
        /// Horizontal component.
        dx: f64,
        /// Vertical component.
        dy: f64,
    },
    /// Rotation angle or shove offset is `NaN` or infinite.
    #[error("{gesture:?}: delta {delta} is not finite")]
    InvalidDelta {
        /// Gesture the delta belongs to.
        gesture: GestureKind,
        /// The value.
        delta: f64,
    },
    /// Fling or scroll input is `NaN` or infinite.
    #[error("{event}: position ({x}, {y}) or velocity ({vx}, {vy}) is not finite")]
    InvalidRelease {
        /// Kind of the event.
        event: &'static str,
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
        /// Horizontal velocity or scroll amount.
        vx: f64,
        /// Vertical velocity or scroll amount.
        vy: f64,
    },
    /// A settings value is outside of its allowed range.
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting {
        /// Name of the setting.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// Scroll mode string could not be parsed.
    #[error("unknown scroll mode: {0}")]
    UnknownScrollMode(String),
}
