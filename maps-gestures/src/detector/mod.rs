//! Recognition of gestures from raw pointer events.
//!
//! [`GestureDetectors`] tracks the pointers of a touch sequence and produces [`DetectorEvent`]s.
//! Continuous gestures (move, scale, rotate, shove) go through the [`DetectorState`] lifecycle;
//! discrete gestures (taps, clicks, flings) are reported once.

mod event;
mod gesture;
mod processor;
mod state;

pub use event::{Buttons, InputSource, MotionAction, MotionEvent, Pointer, PointerId};
pub use gesture::{GestureContext, MoveGesture, RotateGesture, ScaleGesture, ShoveGesture};
pub use processor::{
    DetectorEvent, DetectorThresholds, GestureDetectors, DEFAULT_ROTATE_ANGLE_THRESHOLD,
    DEFAULT_SCALE_SPAN_THRESHOLD, DOUBLE_TAP_TIMEOUT, LONG_PRESS_TIMEOUT, MAX_SHOVE_ANGLE,
    ROTATE_ANGLE_THRESHOLD_WHEN_SCALING, SCALE_SPAN_THRESHOLD_WHEN_ROTATING,
    TWO_FINGER_TAP_TIMEOUT,
};
pub use state::{DetectorState, DetectorStates};

/// Continuous gestures recognized by the detectors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Pan with one or more fingers.
    Move,
    /// Pinch zoom or quick zoom.
    Scale,
    /// Two-finger rotation.
    Rotate,
    /// Two-finger vertical drag.
    Shove,
}

impl GestureKind {
    /// Gestures that cannot be in progress at the same time as this one.
    pub fn exclusive_with(&self) -> &'static [GestureKind] {
        match self {
            GestureKind::Move => &[],
            GestureKind::Scale | GestureKind::Rotate => &[GestureKind::Shove],
            GestureKind::Shove => &[GestureKind::Scale, GestureKind::Rotate],
        }
    }
}
