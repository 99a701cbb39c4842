//! This module contains the types that turn recognized gestures into camera changes.
//!
//! User interaction handling is done in several steps:
//! 1. Platform input is converted into [`MotionEvent`](crate::detector::MotionEvent)s. Apps that
//!    use `winit` can use [`WinitInputHandler`](crate::winit::WinitInputHandler) for that.
//! 2. The events are given to [`GestureCoordinator::on_touch_event`] (or
//!    [`GestureCoordinator::on_generic_motion_event`] for mouse wheels). The coordinator runs the
//!    [`GestureDetectors`](crate::detector::GestureDetectors) and decides, based on the
//!    [`GesturesSettings`](crate::GesturesSettings) and on the other gestures in progress, which
//!    of the recognized gestures may change the camera.
//! 3. Allowed gestures are applied through the [`CameraEngine`], which talks to the map core
//!    via the [`MapDelegates`](crate::delegate::MapDelegates).
//!
//! The application can observe every gesture, and consume pans and clicks, by registering
//! listeners in [`GestureListeners`].

mod camera;
mod coordinator;
mod listeners;
mod owners;

pub use camera::{
    fling, fling_pitch_factor, pinch_zoom, rotate_deceleration, rotated_bearing,
    scale_deceleration, shoved_pitch, wrap_bearing, CameraEngine, Deceleration, Fling,
};
pub use coordinator::{
    GestureCoordinator, MINIMUM_FLING_VELOCITY, MINIMUM_SCALE_SPEED, ZOOM_ANIMATION_DURATION,
};
pub use listeners::{
    GestureListeners, ListenerId, ListenerRegistry, OnFlingListener, OnMapClickListener,
    OnMapLongClickListener, OnMoveListener, OnRotateListener, OnScaleListener, OnShoveListener,
};
pub use owners::ProtectedAnimationOwners;
