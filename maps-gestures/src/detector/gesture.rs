use std::time::Duration;

use maps_gestures_types::{FinitePoint, ScreenCoordinate};

use crate::detector::GestureKind;
use crate::error::GesturesError;

/// State shared by all continuous gestures at the moment of a detector callback.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GestureContext {
    /// Number of pointers on the screen.
    pub pointers_count: usize,
    /// Average position of the pointers.
    pub focal_point: ScreenCoordinate,
    /// Time of the event being processed.
    pub current_event_time: Duration,
    /// Time of the previously processed event of the same touch sequence.
    pub previous_event_time: Duration,
}

impl GestureContext {
    /// Creates a context with both event times set to zero.
    pub fn new(pointers_count: usize, focal_point: ScreenCoordinate) -> Self {
        Self {
            pointers_count,
            focal_point,
            current_event_time: Duration::ZERO,
            previous_event_time: Duration::ZERO,
        }
    }

    /// Sets the event times.
    pub fn with_event_times(mut self, current: Duration, previous: Duration) -> Self {
        self.current_event_time = current;
        self.previous_event_time = previous;
        self
    }

    /// Milliseconds between the previous and the current event. Negative if the events arrived
    /// out of order.
    pub fn time_delta_ms(&self) -> f64 {
        (self.current_event_time.as_secs_f64() - self.previous_event_time.as_secs_f64()) * 1000.0
    }

    pub(crate) fn validate(&self, gesture: GestureKind) -> Result<(), GesturesError> {
        if self.focal_point.is_finite() {
            Ok(())
        } else {
            Err(GesturesError::InvalidFocalPoint {
                gesture,
                x: self.focal_point.x,
                y: self.focal_point.y,
            })
        }
    }
}

/// One- or multi-finger pan.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MoveGesture {
    /// Common gesture state.
    pub context: GestureContext,
}

impl MoveGesture {
    /// Creates a new move gesture value.
    pub fn new(context: GestureContext) -> Self {
        Self { context }
    }
}

/// Pinch zoom, or quick zoom when performed with a single pointer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScaleGesture {
    /// Common gesture state.
    pub context: GestureContext,
    /// Distance between the pointers at the current event.
    pub current_span: f64,
    /// Distance between the pointers at the previous event.
    pub previous_span: f64,
    /// `current_span / previous_span`.
    pub scale_factor: f64,
    /// True if the pointers move towards each other.
    pub is_scaling_out: bool,
}

impl ScaleGesture {
    /// Creates a scale gesture value, deriving the scale factor from the spans.
    pub fn new(context: GestureContext, current_span: f64, previous_span: f64) -> Self {
        Self {
            context,
            current_span,
            previous_span,
            scale_factor: current_span / previous_span,
            is_scaling_out: current_span < previous_span,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), GesturesError> {
        self.context.validate(GestureKind::Scale)?;
        if self.current_span.is_finite()
            && self.previous_span.is_finite()
            && self.current_span > 0.0
            && self.previous_span > 0.0
        {
            Ok(())
        } else {
            Err(GesturesError::InvalidDistance {
                gesture: GestureKind::Scale,
                dx: self.current_span,
                dy: self.previous_span,
            })
        }
    }
}

/// Two-finger rotation.
///
/// Angles are in degrees. Positive values mean clockwise rotation of the fingers on the screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotateGesture {
    /// Common gesture state.
    pub context: GestureContext,
    /// Rotation since the pointers went down.
    pub delta_since_start: f64,
    /// Rotation since the previous event.
    pub delta_since_last: f64,
}

impl RotateGesture {
    /// Creates a new rotate gesture value.
    pub fn new(context: GestureContext, delta_since_start: f64, delta_since_last: f64) -> Self {
        Self {
            context,
            delta_since_start,
            delta_since_last,
        }
    }
}

/// Two-finger vertical drag that tilts the map.
///
/// Distances are in pixels. Positive values mean the fingers move down the screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShoveGesture {
    /// Common gesture state.
    pub context: GestureContext,
    /// Vertical movement since the gesture started.
    pub delta_since_start: f64,
    /// Vertical movement since the previous event.
    pub delta_since_last: f64,
}

impl ShoveGesture {
    /// Creates a new shove gesture value.
    pub fn new(context: GestureContext, delta_since_start: f64, delta_since_last: f64) -> Self {
        Self {
            context,
            delta_since_start,
            delta_since_last,
        }
    }
}
