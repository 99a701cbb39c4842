//! Interfaces of the map core that the gestures engine talks to.
//!
//! The engine never owns the camera. It reads snapshots through [`CameraDelegate`] and asks
//! [`AnimationDelegate`] to change the camera. Delegates are called synchronously from the UI
//! thread and take `&self`; implementations keep their own state behind interior mutability.

use std::rc::Rc;

use maps_gestures_types::{
    CameraOptions, CameraState, GeoPoint2d, ProjectionName, ScreenCoordinate, Size,
};

use crate::animation::{AnimationEndCallback, AnimationOptions, AnimatorId};

/// Access to the authoritative camera of the map.
pub trait CameraDelegate {
    /// Current camera.
    fn camera_state(&self) -> CameraState;

    /// Geographic point under the given screen pixel.
    fn coordinate_for_pixel(&self, pixel: ScreenCoordinate) -> GeoPoint2d;

    /// Screen pixel of the given geographic point.
    fn pixel_for_coordinate(&self, coordinate: GeoPoint2d) -> ScreenCoordinate;

    /// Camera that keeps the geographic point under `from` located under `to`.
    fn camera_for_drag(&self, from: ScreenCoordinate, to: ScreenCoordinate) -> CameraOptions;

    /// Applies the camera immediately, bypassing animations.
    ///
    /// The gesture handlers never call it: every camera change of a gesture goes through
    /// [`AnimationDelegate`] so that it can be cancelled by the next gesture. Hosts that drive the
    /// camera outside of gestures use it through the same delegate.
    fn set_camera(&self, options: CameraOptions);
}

/// Access to the map view transform.
pub trait TransformDelegate {
    /// Size of the map view in pixels.
    fn size(&self) -> Size;

    /// Tells the core that user interaction is in progress, so that it can defer expensive work.
    fn set_gesture_in_progress(&self, in_progress: bool);
}

/// Access to the projection of the current style.
pub trait ProjectionDelegate {
    /// Current projection, or `None` if the style does not define one (rendered as mercator).
    fn projection(&self) -> Option<ProjectionName>;
}

/// Camera animation system of the map.
pub trait AnimationDelegate {
    /// Animates the camera to the given options.
    fn ease_to(
        &self,
        camera: CameraOptions,
        options: AnimationOptions,
        on_end: Option<AnimationEndCallback>,
    );

    /// Creates (but does not start) an animator of the zoom level.
    fn create_zoom_animator(
        &self,
        target: f64,
        anchor: ScreenCoordinate,
        options: AnimationOptions,
    ) -> AnimatorId;

    /// Creates (but does not start) an animator of the bearing.
    fn create_bearing_animator(
        &self,
        target: f64,
        anchor: ScreenCoordinate,
        options: AnimationOptions,
    ) -> AnimatorId;

    /// Starts the given animators at the same time.
    fn play_animators_together(&self, animators: &[AnimatorId]);

    /// Cancels every running animation except the ones owned by `owners_to_exclude`.
    fn cancel_all_animators(&self, owners_to_exclude: &[String]);
}

/// Set of delegates the gestures engine needs from the map.
///
/// A single object implementing all four traits can be shared by cloning its `Rc` into every
/// field, see [`MapDelegates::from_map`].
#[derive(Clone)]
pub struct MapDelegates {
    /// Camera access.
    pub camera: Rc<dyn CameraDelegate>,
    /// View transform access.
    pub transform: Rc<dyn TransformDelegate>,
    /// Projection access.
    pub projection: Rc<dyn ProjectionDelegate>,
    /// Animation system.
    pub animation: Rc<dyn AnimationDelegate>,
}

impl MapDelegates {
    /// Uses one object as all of the delegates.
    pub fn from_map<M>(map: Rc<M>) -> Self
    where
        M: CameraDelegate + TransformDelegate + ProjectionDelegate + AnimationDelegate + 'static,
    {
        Self {
            camera: map.clone(),
            transform: map.clone(),
            projection: map.clone(),
            animation: map,
        }
    }

    /// True if the map is currently rendered as a globe.
    pub fn is_globe(&self) -> bool {
        self.projection.projection() == Some(ProjectionName::Globe)
    }
}
