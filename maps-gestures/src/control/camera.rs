use std::time::Duration;

use maps_gestures_types::{CameraOptions, CameraState, FinitePoint, ScreenCoordinate, ScreenVector};

use crate::animation::{AnimationOptions, AnimatorId, Interpolator};
use crate::control::owners::ProtectedAnimationOwners;
use crate::delegate::MapDelegates;
use crate::settings::ScrollMode;

/// Pitch in degrees change per pixel of a shove.
const SHOVE_PIXEL_CHANGE_FACTOR: f64 = 0.1;

const NORMAL_MAX_PITCH: f64 = 60.0;
const MAX_FLING_PITCH: f64 = 85.0;
const MAX_FLING_PITCH_FACTOR: f64 = 300.0;
const FLING_VELOCITY_DIVISOR: f64 = 10.0;

const HORIZON_TOP_MARGIN_RATIO: f64 = 0.04;
const MAX_REPROJECT_ERROR_MARGIN: f64 = 10.0;

/// Slower pinch releases do not continue zooming, in pixels per second.
const MINIMUM_SCALE_VELOCITY: f64 = 300.0;
const SCALE_VELOCITY_DIVISOR: f64 = 1000.0;
const SCALE_DECELERATION_MS_PER_ZOOM: f64 = 1000.0 / 4.0;

/// Slower rotation releases do not continue rotating, in degrees per second.
const MINIMUM_ANGULAR_VELOCITY: f64 = 30.0;
const MAXIMUM_ANGULAR_VELOCITY: f64 = 360.0;
const ANGULAR_DECELERATION: f64 = 1800.0;

/// Parameters of a fling animation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fling {
    /// Movement of the map content in pixels.
    pub displacement: ScreenVector,
    /// Duration of the animation.
    pub duration: Duration,
}

/// Parameters of a zoom or bearing animation that continues a gesture after release.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Deceleration {
    /// Change of the zoom level or bearing.
    pub delta: f64,
    /// Duration of the animation.
    pub duration: Duration,
}

/// Zoom level after a pinch step.
pub fn pinch_zoom(zoom: f64, current_span: f64, previous_span: f64) -> f64 {
    zoom + (current_span / previous_span).log2()
}

/// Normalizes bearing into `[0, 360)`.
pub fn wrap_bearing(bearing: f64) -> f64 {
    let wrapped = bearing.rem_euclid(360.0);
    // rem_euclid of tiny negative values rounds up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Bearing after the fingers rotated by `delta` degrees. Clockwise finger rotation decreases the
/// bearing.
pub fn rotated_bearing(bearing: f64, delta: f64) -> f64 {
    wrap_bearing(bearing - delta)
}

/// Pitch after the fingers moved vertically by `delta_pixels`. Moving the fingers up tilts the
/// map. A negative or NaN `max_pitch` keeps the map flat.
pub fn shoved_pitch(pitch: f64, delta_pixels: f64, max_pitch: f64) -> f64 {
    (pitch - SHOVE_PIXEL_CHANGE_FACTOR * delta_pixels)
        .min(max_pitch.max(0.0))
        .max(0.0)
}

/// Extra divisor of fling velocity for tilted maps, where the same screen distance covers more
/// of the map the closer it is to the horizon.
pub fn fling_pitch_factor(pitch: f64) -> f64 {
    if pitch < NORMAL_MAX_PITCH {
        pitch / 10.0
    } else if pitch <= MAX_FLING_PITCH {
        let normal_factor = (NORMAL_MAX_PITCH / 10.0).ln();
        let max_factor = MAX_FLING_PITCH_FACTOR.ln();
        let t = (pitch - NORMAL_MAX_PITCH) / (MAX_FLING_PITCH - NORMAL_MAX_PITCH);
        (normal_factor + (max_factor - normal_factor) * t).exp()
    } else {
        MAX_FLING_PITCH_FACTOR
    }
}

/// Displacement and duration of a fling released with `velocity` pixels per second.
///
/// The duration is computed from the full velocity even if the scroll mode drops one of the
/// axes.
pub fn fling(velocity: ScreenVector, pitch: f64, pixel_ratio: f64, scroll_mode: ScrollMode) -> Fling {
    let divisor = FLING_VELOCITY_DIVISOR * pixel_ratio + fling_pitch_factor(pitch);
    let displacement = scroll_mode.restrict(velocity / divisor);
    let duration_ms = (velocity.x.hypot(velocity.y) / divisor).floor();

    Fling {
        displacement,
        duration: Duration::from_millis(duration_ms as u64),
    }
}

/// Zoom change that continues a pinch released with `velocity` pixels per second.
pub fn scale_deceleration(
    velocity: ScreenVector,
    is_scaling_out: bool,
    pixel_ratio: f64,
) -> Option<Deceleration> {
    let speed = (velocity.x.abs() + velocity.y.abs()) / pixel_ratio;
    if !speed.is_finite() || speed < MINIMUM_SCALE_VELOCITY {
        return None;
    }

    let magnitude = (speed / SCALE_VELOCITY_DIVISOR + 1.0).ln();
    let delta = if is_scaling_out { -magnitude } else { magnitude };

    Some(Deceleration {
        delta,
        duration: Duration::from_secs_f64(magnitude * SCALE_DECELERATION_MS_PER_ZOOM / 1000.0),
    })
}

/// Rotation in degrees that continues a rotation released with `angular_velocity` degrees per
/// second.
pub fn rotate_deceleration(angular_velocity: f64) -> Option<Deceleration> {
    if !angular_velocity.is_finite() || angular_velocity.abs() < MINIMUM_ANGULAR_VELOCITY {
        return None;
    }

    let velocity = angular_velocity.clamp(-MAXIMUM_ANGULAR_VELOCITY, MAXIMUM_ANGULAR_VELOCITY);
    let seconds = velocity.abs() / ANGULAR_DECELERATION;

    Some(Deceleration {
        delta: velocity * seconds / 2.0,
        duration: Duration::from_secs_f64(seconds),
    })
}

/// Translates gesture values into calls of the map delegates.
///
/// Zoom and bearing animators created between [`CameraEngine::begin_frame`] and
/// [`CameraEngine::end_frame`] are started together at the end of the frame, so that pinch and
/// rotation of the same motion event produce a single camera change.
pub struct CameraEngine {
    delegates: MapDelegates,
    frame: Option<Vec<AnimatorId>>,
}

impl CameraEngine {
    /// Creates a new engine.
    pub fn new(delegates: MapDelegates) -> Self {
        Self {
            delegates,
            frame: None,
        }
    }

    /// Map delegates.
    pub fn delegates(&self) -> &MapDelegates {
        &self.delegates
    }

    /// Current camera.
    pub fn camera_state(&self) -> CameraState {
        self.delegates.camera.camera_state()
    }

    /// Starts collecting animators.
    pub fn begin_frame(&mut self) {
        self.frame = Some(vec![]);
    }

    /// Plays the animators collected since [`CameraEngine::begin_frame`].
    pub fn end_frame(&mut self) {
        if let Some(animators) = self.frame.take() {
            if !animators.is_empty() {
                self.delegates.animation.play_animators_together(&animators);
            }
        }
    }

    /// Cancels running animations, except the protected ones.
    pub fn cancel_animations(&self, protected: &ProtectedAnimationOwners) {
        self.delegates
            .animation
            .cancel_all_animators(&protected.to_vec());
    }

    /// Moves the map so that the content under `focal_point` follows the fingers.
    ///
    /// `distance` is the previous focal point minus the current one.
    pub fn pan(&self, focal_point: ScreenCoordinate, distance: ScreenVector) {
        let camera = self
            .delegates
            .camera
            .camera_for_drag(focal_point, focal_point - distance);
        self.delegates
            .animation
            .ease_to(camera, AnimationOptions::immediate(), None);
    }

    /// Continues a pan released at `position`. Returns the parameters of the started animation.
    pub fn fling(
        &self,
        position: ScreenCoordinate,
        velocity: ScreenVector,
        pixel_ratio: f64,
        scroll_mode: ScrollMode,
    ) -> Fling {
        let pitch = self.camera_state().pitch();
        let fling = fling(velocity, pitch, pixel_ratio, scroll_mode);
        log::trace!("Fling from {position:?}: {fling:?}");

        let camera = self
            .delegates
            .camera
            .camera_for_drag(position, position + fling.displacement);
        self.delegates.animation.ease_to(
            camera,
            AnimationOptions::gestures(fling.duration).with_interpolator(Interpolator::Decelerate),
            None,
        );

        fling
    }

    /// Eases the zoom level, anchored at `anchor`.
    pub fn ease_zoom(
        &self,
        zoom: f64,
        anchor: ScreenCoordinate,
        duration: Duration,
        interpolator: Interpolator,
    ) {
        let camera = CameraOptions::default().with_zoom(zoom).with_anchor(anchor);
        self.delegates.animation.ease_to(
            camera,
            AnimationOptions::gestures(duration).with_interpolator(interpolator),
            None,
        );
    }

    /// Eases the bearing, anchored at `anchor`.
    pub fn ease_bearing(
        &self,
        bearing: f64,
        anchor: ScreenCoordinate,
        duration: Duration,
        interpolator: Interpolator,
    ) {
        let camera = CameraOptions::default()
            .with_bearing(bearing)
            .with_anchor(anchor);
        self.delegates.animation.ease_to(
            camera,
            AnimationOptions::gestures(duration).with_interpolator(interpolator),
            None,
        );
    }

    /// Changes the zoom level with an animator, played together with other animators of the
    /// frame.
    pub fn animate_zoom(&mut self, zoom: f64, anchor: ScreenCoordinate) {
        let animator = self.delegates.animation.create_zoom_animator(
            zoom,
            anchor,
            AnimationOptions::immediate(),
        );
        self.play(animator);
    }

    /// Changes the bearing with an animator, played together with other animators of the frame.
    pub fn animate_bearing(&mut self, bearing: f64, anchor: ScreenCoordinate) {
        let animator = self.delegates.animation.create_bearing_animator(
            bearing,
            anchor,
            AnimationOptions::immediate(),
        );
        self.play(animator);
    }

    /// Tilts the map around the screen position of the camera center.
    pub fn set_pitch(&self, pitch: f64) {
        let center = self.camera_state().center();
        let anchor = self.delegates.camera.pixel_for_coordinate(center);
        let camera = CameraOptions::default().with_pitch(pitch).with_anchor(anchor);
        self.delegates
            .animation
            .ease_to(camera, AnimationOptions::immediate(), None);
    }

    /// True if the pixel is above the horizon of a globe, where panning the map would move the
    /// camera off the planet.
    ///
    /// Always `false` for flat projections.
    pub fn is_point_above_horizon(&self, pixel: ScreenCoordinate) -> bool {
        if !self.delegates.is_globe() {
            return false;
        }

        let x = if pixel.x.is_nan() {
            log::error!("is_point_above_horizon: screen coordinate x is NaN");
            0.0
        } else {
            pixel.x
        };
        let y = if pixel.y.is_nan() {
            log::error!("is_point_above_horizon: screen coordinate y is NaN");
            0.0
        } else {
            pixel.y
        };

        let top_margin = HORIZON_TOP_MARGIN_RATIO * self.delegates.transform.size().height();
        let error_margin = (top_margin / 2.0).min(MAX_REPROJECT_ERROR_MARGIN);
        let probe = ScreenCoordinate::new(x, y - top_margin);

        let coordinate = self.delegates.camera.coordinate_for_pixel(probe);
        if !coordinate.is_finite() {
            return true;
        }

        let reprojected = self.delegates.camera.pixel_for_coordinate(coordinate);
        if !reprojected.is_finite() {
            return true;
        }

        reprojected.y - probe.y >= error_margin
    }

    fn play(&mut self, animator: AnimatorId) {
        match &mut self.frame {
            Some(animators) => animators.push(animator),
            None => self.delegates.animation.play_animators_together(&[animator]),
        }
    }
}
