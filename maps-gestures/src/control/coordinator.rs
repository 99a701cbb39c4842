use std::time::Duration;

use maps_gestures_types::{FinitePoint, ScreenCoordinate, ScreenVector};

use crate::animation::Interpolator;
use crate::control::camera::{
    pinch_zoom, rotate_deceleration, rotated_bearing, scale_deceleration, shoved_pitch,
    CameraEngine,
};
use crate::control::listeners::GestureListeners;
use crate::control::owners::ProtectedAnimationOwners;
use crate::delegate::MapDelegates;
use crate::detector::{
    DetectorEvent, DetectorState, DetectorThresholds, GestureContext, GestureDetectors,
    GestureKind, MotionAction, MotionEvent, MoveGesture, RotateGesture, ScaleGesture,
    ShoveGesture, DEFAULT_ROTATE_ANGLE_THRESHOLD, DEFAULT_SCALE_SPAN_THRESHOLD,
    DOUBLE_TAP_TIMEOUT, ROTATE_ANGLE_THRESHOLD_WHEN_SCALING, SCALE_SPAN_THRESHOLD_WHEN_ROTATING,
};
use crate::error::GesturesError;
use crate::settings::{GesturesSettings, DEFAULT_MAX_PITCH};

/// Duration of the zoom animation of tap gestures.
pub const ZOOM_ANIMATION_DURATION: Duration = Duration::from_millis(300);
/// Minimum speed of the span change in pixels per millisecond (multiplied by the pixel ratio)
/// for a pinch to begin zooming.
pub const MINIMUM_SCALE_SPEED: f64 = 0.6;
/// Slower releases in pixels per second (divided by the pixel ratio) do not start a fling.
pub const MINIMUM_FLING_VELOCITY: f64 = 1.0;

/// Every mouse wheel line zooms the map by this fraction.
const WHEEL_ZOOM_SPEED: f64 = 0.2;
const WHEEL_ZOOM_DURATION: Duration = Duration::from_millis(50);

/// Rotations slower than this, in degrees per millisecond, are noise.
const MINIMUM_ANGULAR_SPEED: f64 = 0.04;
/// Fast rotations are noise until the total rotation reaches the given angle.
const ANGULAR_SPEED_NOISE_BANDS: [(f64, f64); 3] = [(0.07, 5.0), (0.15, 7.0), (0.5, 15.0)];

#[derive(Debug, Copy, Clone)]
struct RegisteredTap {
    position: ScreenCoordinate,
    time: Duration,
}

/// Decides what the recognized gestures do with the camera.
///
/// The coordinator owns the [`GestureDetectors`] and feeds them with the events given to
/// [`GestureCoordinator::on_touch_event`]. For every gesture event it checks the settings and the
/// state of the other gestures, notifies the listeners and, if the gesture is allowed, changes
/// the camera through the [`MapDelegates`].
///
/// Hosts that recognize gestures themselves can skip the touch entry point and call the
/// `handle_*` methods directly. Every handler returns `true` if the event was used.
pub struct GestureCoordinator {
    settings: GesturesSettings,
    camera: CameraEngine,
    detectors: GestureDetectors,
    listeners: GestureListeners,
    protected_owners: ProtectedAnimationOwners,
    double_tap: Option<RegisteredTap>,
    quick_zoom: bool,
}

impl GestureCoordinator {
    /// Creates a coordinator with default settings.
    pub fn new(delegates: MapDelegates) -> Self {
        let mut coordinator = Self {
            settings: GesturesSettings::default(),
            camera: CameraEngine::new(delegates),
            detectors: GestureDetectors::default(),
            listeners: GestureListeners::default(),
            protected_owners: ProtectedAnimationOwners::default(),
            double_tap: None,
            quick_zoom: false,
        };
        coordinator.apply_settings();
        coordinator
    }

    /// Replaces the settings.
    pub fn with_settings(mut self, settings: GesturesSettings) -> Self {
        self.set_settings(settings);
        self
    }

    /// Current settings.
    pub fn settings(&self) -> &GesturesSettings {
        &self.settings
    }

    /// Replaces the settings.
    pub fn set_settings(&mut self, settings: GesturesSettings) {
        self.settings = settings;
        self.apply_settings();
    }

    /// Changes the settings in place.
    ///
    /// ```ignore
    /// coordinator.update_settings(|settings| settings.set_rotate_enabled(false));
    /// ```
    pub fn update_settings(&mut self, update: impl FnOnce(&mut GesturesSettings)) {
        update(&mut self.settings);
        self.apply_settings();
    }

    /// Listener lists. The returned handle can be cloned and kept.
    pub fn listeners(&self) -> &GestureListeners {
        &self.listeners
    }

    /// Gesture detectors fed by [`GestureCoordinator::on_touch_event`].
    pub fn detectors(&self) -> &GestureDetectors {
        &self.detectors
    }

    /// Gesture detectors fed by [`GestureCoordinator::on_touch_event`].
    ///
    /// Hosts calling the `handle_*` methods directly report the state of their own detectors
    /// here.
    pub fn detectors_mut(&mut self) -> &mut GestureDetectors {
        &mut self.detectors
    }

    /// Map delegates.
    pub fn delegates(&self) -> &MapDelegates {
        self.camera.delegates()
    }

    /// Protects the animations of the owner from being cancelled by gestures.
    pub fn add_protected_animation_owner(&mut self, owner: impl Into<String>) {
        self.protected_owners.add(owner);
    }

    /// Removes the protection of the owner's animations.
    pub fn remove_protected_animation_owner(&mut self, owner: &str) {
        self.protected_owners.remove(owner);
    }

    /// Owners whose animations are not cancelled by gestures.
    pub fn protected_animation_owners(&self) -> &ProtectedAnimationOwners {
        &self.protected_owners
    }

    /// True between the down and the up of the second tap of a double tap.
    pub fn double_tap_registered(&self) -> bool {
        self.double_tap.is_some()
    }

    /// True if the pixel is above the horizon of a globe. See
    /// [`CameraEngine::is_point_above_horizon`].
    pub fn is_point_above_horizon(&self, pixel: ScreenCoordinate) -> bool {
        self.camera.is_point_above_horizon(pixel)
    }

    /// Processes a touch event. Returns `false` if the event was ignored.
    ///
    /// Events with a secondary or tertiary button pressed are ignored, so that mouse drags
    /// with those buttons can be handled by the host.
    pub fn on_touch_event(&mut self, event: &MotionEvent) -> bool {
        if !event.buttons.is_primary_only() {
            log::trace!("Ignoring touch event with buttons {:?}", event.buttons);
            return false;
        }

        if event.pointers.is_empty() {
            return false;
        }

        match event.action {
            MotionAction::Down => self.set_gesture_in_progress(true),
            MotionAction::PointerDown => {
                if self.double_tap.take().is_some() {
                    self.detectors
                        .states_mut()
                        .set_enabled(GestureKind::Move, true);
                }
            }
            MotionAction::Scroll | MotionAction::HoverMove => return false,
            _ => {}
        }

        let events = self.detectors.process(event);

        self.camera.begin_frame();
        for gesture_event in events {
            self.dispatch(gesture_event);
        }
        self.camera.end_frame();

        if matches!(event.action, MotionAction::Up | MotionAction::Cancel) {
            self.finish_touch_sequence();
        }

        true
    }

    /// Processes a mouse wheel or touchpad scroll. Returns `false` for every other event.
    pub fn on_generic_motion_event(&mut self, event: &MotionEvent) -> bool {
        if event.action != MotionAction::Scroll || !event.source.is_pointer() {
            return false;
        }

        if !self.settings.pinch_to_zoom_enabled() {
            return false;
        }

        let Some(position) = event.position() else {
            return false;
        };

        if !position.is_finite() || !event.scroll.is_finite() {
            log::error!(
                "{}",
                GesturesError::InvalidRelease {
                    event: "scroll",
                    x: position.x,
                    y: position.y,
                    vx: event.scroll.x,
                    vy: event.scroll.y,
                }
            );
            return false;
        }

        if event.scroll.y == 0.0 {
            return false;
        }

        self.cancel_animations();

        let zoom_delta = event.scroll.y * (1.0 + WHEEL_ZOOM_SPEED).log2();
        let zoom = self.camera.camera_state().zoom() + zoom_delta;
        self.camera
            .ease_zoom(zoom, position, WHEEL_ZOOM_DURATION, Interpolator::Linear);

        true
    }

    /// Pan candidate.
    pub fn handle_move_begin(&mut self, gesture: &MoveGesture) -> bool {
        if !self.settings.scroll_enabled() {
            return false;
        }

        if let Err(err) = gesture.context.validate(GestureKind::Move) {
            log::error!("{err}");
            return false;
        }

        if self.is_pinch_scroll_suppressed(gesture.context.pointers_count) {
            log::debug!("Pan with {} pointers suppressed while pinching", gesture.context.pointers_count);
            return false;
        }

        self.cancel_animations();
        self.listeners
            .moves()
            .for_each(|listener| listener.on_move_begin(gesture));

        true
    }

    /// Pan update. `distance` is the previous focal point minus the current one.
    pub fn handle_move(&mut self, gesture: &MoveGesture, distance: ScreenVector) -> bool {
        if let Err(err) = validate_move(gesture, distance) {
            log::error!("{err}");
            return false;
        }

        if distance == ScreenVector::zeros() {
            return false;
        }

        if self
            .listeners
            .moves()
            .any(|listener| listener.on_move(gesture))
        {
            return true;
        }

        if !self.settings.scroll_enabled()
            || self.is_pinch_scroll_suppressed(gesture.context.pointers_count)
        {
            return false;
        }

        let focal_point = gesture.context.focal_point;
        if self.camera.is_point_above_horizon(focal_point) {
            log::debug!("Pan at {focal_point:?} is above the horizon");
            return false;
        }

        self.camera
            .pan(focal_point, self.settings.scroll_mode().restrict(distance));

        true
    }

    /// End of a pan.
    pub fn handle_move_end(&mut self, gesture: &MoveGesture) {
        self.listeners
            .moves()
            .for_each(|listener| listener.on_move_end(gesture));
    }

    /// Pinch or quick zoom candidate. A gesture with a single pointer is a quick zoom.
    pub fn handle_scale_begin(&mut self, gesture: &ScaleGesture) -> bool {
        if let Err(err) = gesture.validate() {
            log::error!("{err}");
            return false;
        }

        let quick_zoom = gesture.context.pointers_count == 1;
        if quick_zoom {
            if !self.settings.quick_zoom_enabled() {
                return false;
            }

            self.detectors
                .states_mut()
                .set_enabled(GestureKind::Move, false);
        } else {
            if !self.settings.pinch_to_zoom_enabled() {
                return false;
            }

            let time_delta = gesture.context.time_delta_ms();
            if time_delta == 0.0 {
                return false;
            }

            let speed = (gesture.current_span - gesture.previous_span).abs() / time_delta;
            if speed < MINIMUM_SCALE_SPEED * self.pixel_ratio() {
                log::debug!("Pinch is too slow to begin zooming: {speed} px/ms");
                return false;
            }

            if self.settings.increase_rotate_threshold_when_pinching_to_zoom()
                && !self.detectors.is_in_progress(GestureKind::Rotate)
            {
                self.detectors.thresholds_mut().rotate_angle = ROTATE_ANGLE_THRESHOLD_WHEN_SCALING;
            }
        }

        self.quick_zoom = quick_zoom;
        self.cancel_animations();
        self.listeners
            .scales()
            .for_each(|listener| listener.on_scale_begin(gesture));

        true
    }

    /// Pinch or quick zoom update.
    pub fn handle_scale(&mut self, gesture: &ScaleGesture) -> bool {
        if let Err(err) = gesture.validate() {
            log::error!("{err}");
            return false;
        }

        self.listeners
            .scales()
            .for_each(|listener| listener.on_scale(gesture));

        let simultaneous = self.settings.simultaneous_rotate_and_pinch_to_zoom_enabled();
        if !simultaneous && !self.quick_zoom && self.detectors.is_in_progress(GestureKind::Rotate)
        {
            return false;
        }

        let zoom = pinch_zoom(
            self.camera.camera_state().zoom(),
            gesture.current_span,
            gesture.previous_span,
        );
        let anchor = self.anchor(gesture.context.focal_point);

        if simultaneous && !self.quick_zoom {
            self.camera.animate_zoom(zoom, anchor);
        } else {
            self.camera
                .ease_zoom(zoom, anchor, Duration::ZERO, Interpolator::Linear);
        }

        true
    }

    /// End of a pinch or quick zoom. `velocity` is the velocity of the focal point in pixels per
    /// second.
    pub fn handle_scale_end(&mut self, gesture: &ScaleGesture, velocity: ScreenVector) {
        let quick_zoom = std::mem::take(&mut self.quick_zoom);
        if quick_zoom {
            self.detectors
                .states_mut()
                .set_enabled(GestureKind::Move, true);
        } else {
            self.detectors.thresholds_mut().rotate_angle = DEFAULT_ROTATE_ANGLE_THRESHOLD;
        }

        self.listeners
            .scales()
            .for_each(|listener| listener.on_scale_end(gesture));

        if quick_zoom || !self.settings.pinch_to_zoom_deceleration_enabled() {
            return;
        }

        let anchor = self.anchor(gesture.context.focal_point);
        if !anchor.is_finite() {
            return;
        }

        if let Some(deceleration) =
            scale_deceleration(velocity, gesture.is_scaling_out, self.pixel_ratio())
        {
            let zoom = self.camera.camera_state().zoom() + deceleration.delta;
            self.camera.ease_zoom(
                zoom,
                anchor,
                deceleration.duration,
                Interpolator::Decelerate,
            );
        }
    }

    /// Rotation candidate. The rotate detector must already be in progress.
    pub fn handle_rotate_begin(&mut self, gesture: &RotateGesture) -> bool {
        if !self.settings.rotate_enabled() {
            return false;
        }

        let context = &gesture.context;
        let valid = validate_delta(context, GestureKind::Rotate, gesture.delta_since_start)
            .and_then(|_| validate_delta(context, GestureKind::Rotate, gesture.delta_since_last));
        if let Err(err) = valid {
            log::error!("{err}");
            return false;
        }

        if !self.detectors.is_in_progress(GestureKind::Rotate) {
            return false;
        }

        let time_delta = gesture.context.time_delta_ms();
        if time_delta == 0.0 {
            return false;
        }

        let speed = gesture.delta_since_last.abs() / time_delta;
        if is_rotation_noise(speed, gesture.delta_since_start.abs()) {
            log::debug!(
                "Rotation of {} degrees at {speed} deg/ms is ignored",
                gesture.delta_since_start
            );
            return false;
        }

        if self.settings.increase_pinch_to_zoom_threshold_when_rotating() {
            self.detectors.thresholds_mut().scale_span =
                SCALE_SPAN_THRESHOLD_WHEN_ROTATING * self.pixel_ratio();
        }

        self.cancel_animations();
        self.listeners
            .rotates()
            .for_each(|listener| listener.on_rotate_begin(gesture));

        true
    }

    /// Rotation update by `delta` degrees.
    pub fn handle_rotate(&mut self, gesture: &RotateGesture, delta: f64) -> bool {
        if let Err(err) = validate_delta(&gesture.context, GestureKind::Rotate, delta) {
            log::error!("{err}");
            return false;
        }

        self.listeners
            .rotates()
            .for_each(|listener| listener.on_rotate(gesture));

        let simultaneous = self.settings.simultaneous_rotate_and_pinch_to_zoom_enabled();
        if !simultaneous && self.detectors.is_in_progress(GestureKind::Scale) {
            return false;
        }

        let bearing = rotated_bearing(self.camera.camera_state().bearing(), delta);
        let anchor = self.anchor(gesture.context.focal_point);

        if simultaneous {
            self.camera.animate_bearing(bearing, anchor);
        } else {
            self.camera
                .ease_bearing(bearing, anchor, Duration::ZERO, Interpolator::Linear);
        }

        true
    }

    /// End of a rotation. `angular_velocity` is in degrees per second.
    pub fn handle_rotate_end(&mut self, gesture: &RotateGesture, angular_velocity: f64) {
        self.detectors.thresholds_mut().scale_span =
            DEFAULT_SCALE_SPAN_THRESHOLD * self.pixel_ratio();

        self.listeners
            .rotates()
            .for_each(|listener| listener.on_rotate_end(gesture));

        if !self.settings.rotate_deceleration_enabled() {
            return;
        }

        let anchor = self.anchor(gesture.context.focal_point);
        if !anchor.is_finite() {
            return;
        }

        if let Some(deceleration) = rotate_deceleration(angular_velocity) {
            let bearing = rotated_bearing(self.camera.camera_state().bearing(), deceleration.delta);
            self.camera.ease_bearing(
                bearing,
                anchor,
                deceleration.duration,
                Interpolator::Decelerate,
            );
        }
    }

    /// Shove candidate.
    pub fn handle_shove_begin(&mut self, gesture: &ShoveGesture) -> bool {
        if !self.settings.pitch_enabled() {
            return false;
        }

        self.cancel_animations();
        self.detectors
            .states_mut()
            .set_enabled(GestureKind::Move, false);
        self.listeners
            .shoves()
            .for_each(|listener| listener.on_shove_begin(gesture));

        true
    }

    /// Shove update by `delta_pixels` vertically.
    pub fn handle_shove(&mut self, gesture: &ShoveGesture, delta_pixels: f64) -> bool {
        if let Err(err) = validate_delta(&gesture.context, GestureKind::Shove, delta_pixels) {
            log::error!("{err}");
            return false;
        }

        self.listeners
            .shoves()
            .for_each(|listener| listener.on_shove(gesture));

        let pitch = shoved_pitch(
            self.camera.camera_state().pitch(),
            delta_pixels,
            self.max_pitch(),
        );
        self.camera.set_pitch(pitch);

        true
    }

    /// End of a shove.
    pub fn handle_shove_end(&mut self, gesture: &ShoveGesture) {
        self.detectors
            .states_mut()
            .set_enabled(GestureKind::Move, true);
        self.listeners
            .shoves()
            .for_each(|listener| listener.on_shove_end(gesture));
    }

    /// The last pointer was released at `position` with `velocity` pixels per second.
    pub fn handle_fling_event(&mut self, position: ScreenCoordinate, velocity: ScreenVector) -> bool {
        if !self.settings.scroll_enabled() {
            return false;
        }

        if !position.is_finite() || !velocity.is_finite() {
            log::error!(
                "{}",
                GesturesError::InvalidRelease {
                    event: "fling",
                    x: position.x,
                    y: position.y,
                    vx: velocity.x,
                    vy: velocity.y,
                }
            );
            return false;
        }

        if self.camera.is_point_above_horizon(position) {
            log::debug!("Fling from {position:?} is above the horizon");
            return false;
        }

        self.listeners.flings().for_each(|listener| listener.on_fling());

        if !self.settings.scroll_deceleration_enabled() {
            return false;
        }

        let pixel_ratio = self.pixel_ratio();
        let speed = (velocity.x / pixel_ratio).hypot(velocity.y / pixel_ratio);
        if speed < MINIMUM_FLING_VELOCITY {
            return false;
        }

        self.cancel_animations();
        self.camera
            .fling(position, velocity, pixel_ratio, self.settings.scroll_mode());

        true
    }

    /// Down and up of the second tap of a double tap.
    ///
    /// The down registers the tap and disables panning. The up zooms in if it is no further than
    /// `threshold` pixels along each axis from the down and within [`DOUBLE_TAP_TIMEOUT`].
    pub fn handle_double_tap_event(&mut self, event: &MotionEvent, threshold: f64) -> bool {
        let Some(position) = event.position() else {
            return false;
        };

        match event.action {
            MotionAction::Down => {
                self.double_tap = Some(RegisteredTap {
                    position,
                    time: event.event_time,
                });
                self.detectors
                    .states_mut()
                    .set_enabled(GestureKind::Move, false);
                false
            }
            MotionAction::Up => {
                let Some(tap) = self.double_tap.take() else {
                    return false;
                };

                if self.detectors.states().state(GestureKind::Scale) == DetectorState::Ended {
                    // the second tap turned into a quick zoom
                    return false;
                }

                if !position.is_finite() {
                    log::error!(
                        "{}",
                        GesturesError::InvalidFocalPoint {
                            gesture: GestureKind::Scale,
                            x: position.x,
                            y: position.y,
                        }
                    );
                    return false;
                }

                let offset = position - tap.position;
                if offset.x.abs() > threshold || offset.y.abs() > threshold {
                    return false;
                }

                if event.event_time.saturating_sub(tap.time) > DOUBLE_TAP_TIMEOUT {
                    return false;
                }

                if !self.settings.double_tap_to_zoom_in_enabled() {
                    return false;
                }

                self.cancel_animations();
                let zoom = self.camera.camera_state().zoom() + self.settings.zoom_animation_amount();
                self.camera.ease_zoom(
                    zoom,
                    self.anchor(position),
                    ZOOM_ANIMATION_DURATION,
                    Interpolator::Linear,
                );

                true
            }
            _ => false,
        }
    }

    /// A single pointer was released without moving. Stops the running animations.
    pub fn handle_single_tap_up_event(&mut self) -> bool {
        self.cancel_animations();
        true
    }

    /// Short tap at the pixel. Returns `true` if a click listener consumed it.
    pub fn handle_click_event(&mut self, pixel: ScreenCoordinate) -> bool {
        if !pixel.is_finite() {
            return false;
        }

        let point = self.camera.delegates().camera.coordinate_for_pixel(pixel);
        self.listeners
            .clicks()
            .any(|listener| listener.on_map_click(point))
    }

    /// Long tap at the pixel. Returns `true` if a long click listener consumed it.
    pub fn handle_long_press_event(&mut self, pixel: ScreenCoordinate) -> bool {
        if !pixel.is_finite() {
            return false;
        }

        let point = self.camera.delegates().camera.coordinate_for_pixel(pixel);
        self.listeners
            .long_clicks()
            .any(|listener| listener.on_map_long_click(point))
    }

    /// Tap with two fingers at `focal_point`. Zooms the map out.
    pub fn handle_two_finger_tap(&mut self, focal_point: ScreenCoordinate) -> bool {
        if !self.settings.double_touch_to_zoom_out_enabled() {
            return false;
        }

        if !focal_point.is_finite() {
            return false;
        }

        self.cancel_animations();
        let zoom = self.camera.camera_state().zoom() - self.settings.zoom_animation_amount();
        self.camera.ease_zoom(
            zoom,
            self.anchor(focal_point),
            ZOOM_ANIMATION_DURATION,
            Interpolator::Linear,
        );

        true
    }

    fn dispatch(&mut self, event: DetectorEvent) {
        match event {
            DetectorEvent::MoveBegin(gesture) => {
                self.begin(GestureKind::Move, |c| c.handle_move_begin(&gesture));
            }
            DetectorEvent::Move { gesture, distance } => {
                self.handle_move(&gesture, distance);
                self.detectors.states_mut().update(GestureKind::Move);
            }
            DetectorEvent::MoveEnd { gesture, .. } => self.handle_move_end(&gesture),
            DetectorEvent::ScaleBegin(gesture) => {
                self.begin(GestureKind::Scale, |c| c.handle_scale_begin(&gesture));
            }
            DetectorEvent::Scale(gesture) => {
                self.handle_scale(&gesture);
                self.detectors.states_mut().update(GestureKind::Scale);
            }
            DetectorEvent::ScaleEnd { gesture, velocity } => {
                self.handle_scale_end(&gesture, velocity)
            }
            DetectorEvent::RotateBegin(gesture) => {
                self.begin(GestureKind::Rotate, |c| c.handle_rotate_begin(&gesture));
            }
            DetectorEvent::Rotate(gesture) => {
                self.handle_rotate(&gesture, gesture.delta_since_last);
                self.detectors.states_mut().update(GestureKind::Rotate);
            }
            DetectorEvent::RotateEnd {
                gesture,
                angular_velocity,
                ..
            } => self.handle_rotate_end(&gesture, angular_velocity),
            DetectorEvent::ShoveBegin(gesture) => {
                self.begin(GestureKind::Shove, |c| c.handle_shove_begin(&gesture));
            }
            DetectorEvent::Shove(gesture) => {
                self.handle_shove(&gesture, gesture.delta_since_last);
                self.detectors.states_mut().update(GestureKind::Shove);
            }
            DetectorEvent::ShoveEnd(gesture) => self.handle_shove_end(&gesture),
            DetectorEvent::Fling { position, velocity } => {
                self.handle_fling_event(position, velocity);
            }
            DetectorEvent::DoubleTap(event) => {
                let threshold = self.settings.double_tap_slop();
                self.handle_double_tap_event(&event, threshold);
            }
            DetectorEvent::SingleTapUp => {
                self.handle_single_tap_up_event();
            }
            DetectorEvent::Click(pixel) => {
                self.handle_click_event(pixel);
            }
            DetectorEvent::LongClick(pixel) => {
                self.handle_long_press_event(pixel);
            }
            DetectorEvent::TwoFingerTap(focal_point) => {
                self.handle_two_finger_tap(focal_point);
            }
        }
    }

    /// Accepts the begin candidate if the handler allows it.
    fn begin(&mut self, kind: GestureKind, handler: impl FnOnce(&mut Self) -> bool) -> bool {
        if !self.detectors.states().can_begin(kind) {
            return false;
        }

        self.detectors.states_mut().begin(kind);
        let accepted = handler(self);
        if !accepted {
            self.detectors.states_mut().reset(kind);
        }

        log::trace!("{kind:?} begin accepted: {accepted}");
        accepted
    }

    fn finish_touch_sequence(&mut self) {
        self.set_gesture_in_progress(false);
        self.double_tap = None;
        self.quick_zoom = false;
        self.detectors
            .states_mut()
            .set_enabled(GestureKind::Move, true);
        self.reset_thresholds();
    }

    fn apply_settings(&mut self) {
        if let Err(err) = self.settings.validate() {
            log::error!("{err}");
        }

        self.reset_thresholds();
    }

    fn reset_thresholds(&mut self) {
        let mut thresholds = DetectorThresholds::for_pixel_ratio(self.pixel_ratio());
        thresholds.double_tap_slop = self.settings.double_tap_slop();
        *self.detectors.thresholds_mut() = thresholds;
    }

    fn pixel_ratio(&self) -> f64 {
        let ratio = self.settings.pixel_ratio();
        if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            1.0
        }
    }

    fn max_pitch(&self) -> f64 {
        let max_pitch = self.settings.max_pitch();
        if max_pitch.is_finite() && (0.0..90.0).contains(&max_pitch) {
            max_pitch
        } else {
            DEFAULT_MAX_PITCH
        }
    }

    fn anchor(&self, focal_point: ScreenCoordinate) -> ScreenCoordinate {
        self.settings.focal_point().unwrap_or(focal_point)
    }

    fn is_pinch_scroll_suppressed(&self, pointers_count: usize) -> bool {
        !self.settings.pinch_scroll_enabled()
            && pointers_count >= 2
            && self.detectors.is_in_progress(GestureKind::Scale)
    }

    fn cancel_animations(&self) {
        self.camera.cancel_animations(&self.protected_owners);
    }

    fn set_gesture_in_progress(&self, in_progress: bool) {
        self.camera
            .delegates()
            .transform
            .set_gesture_in_progress(in_progress);
    }
}

fn validate_move(gesture: &MoveGesture, distance: ScreenVector) -> Result<(), GesturesError> {
    gesture.context.validate(GestureKind::Move)?;
    if distance.is_finite() {
        Ok(())
    } else {
        Err(GesturesError::InvalidDistance {
            gesture: GestureKind::Move,
            dx: distance.x,
            dy: distance.y,
        })
    }
}

fn validate_delta(
    context: &GestureContext,
    gesture: GestureKind,
    delta: f64,
) -> Result<(), GesturesError> {
    context.validate(gesture)?;
    if delta.is_finite() {
        Ok(())
    } else {
        Err(GesturesError::InvalidDelta { gesture, delta })
    }
}

fn is_rotation_noise(speed: f64, total_rotation: f64) -> bool {
    speed < MINIMUM_ANGULAR_SPEED
        || ANGULAR_SPEED_NOISE_BANDS
            .iter()
            .any(|(band_speed, min_rotation)| speed > *band_speed && total_rotation < *min_rotation)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use approx::assert_relative_eq;
    use maps_gestures_types::{CameraOptions, GeoPoint2d, ProjectionName, Size};

    use super::*;
    use crate::animation::{AnimationOptions, AnimatorId, GESTURES_OWNER};
    use crate::control::ListenerId;
    use crate::detector::{Buttons, InputSource, Pointer};
    use crate::settings::ScrollMode;
    use crate::tests::{camera, setup, Call, CountingListener};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn at(x: f64, y: f64) -> ScreenCoordinate {
        ScreenCoordinate::new(x, y)
    }

    fn touch(action: MotionAction, time: u64, x: f64, y: f64) -> MotionEvent {
        MotionEvent::single(action, ms(time), at(x, y))
    }

    fn move_gesture(pointers: usize, x: f64, y: f64) -> MoveGesture {
        MoveGesture::new(GestureContext::new(pointers, at(x, y)))
    }

    fn scale_gesture(current: u64, previous: u64, current_span: f64, previous_span: f64) -> ScaleGesture {
        let context = GestureContext::new(2, at(1.0, 1.0)).with_event_times(ms(current), ms(previous));
        ScaleGesture::new(context, current_span, previous_span)
    }

    fn rotate_gesture(current: u64, previous: u64, since_start: f64, since_last: f64) -> RotateGesture {
        let context = GestureContext::new(2, at(0.0, 0.0)).with_event_times(ms(current), ms(previous));
        RotateGesture::new(context, since_start, since_last)
    }

    fn shove_gesture() -> ShoveGesture {
        ShoveGesture::new(GestureContext::new(2, at(50.0, 50.0)), -15.0, -15.0)
    }

    fn counting_listener(coordinator: &GestureCoordinator) -> Rc<CountingListener> {
        let listener = Rc::new(CountingListener::default());
        let listeners = coordinator.listeners();
        listeners.add_on_move_listener(listener.clone());
        listeners.add_on_scale_listener(listener.clone());
        listeners.add_on_rotate_listener(listener.clone());
        listeners.add_on_shove_listener(listener.clone());
        listener
    }

    fn move_enabled(coordinator: &GestureCoordinator) -> bool {
        coordinator.detectors().states().is_enabled(GestureKind::Move)
    }

    #[test]
    fn move_with_invalid_focal_point_is_rejected() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let distance = ScreenVector::new(50.0, 50.0);

        assert!(!coordinator.handle_move(&move_gesture(1, f64::NAN, f64::NAN), distance));
        assert!(!coordinator.handle_move(&move_gesture(1, f64::INFINITY, f64::NAN), distance));
        assert_eq!(map.calls(), vec![]);
    }

    #[test]
    fn move_begin_with_invalid_focal_point_is_rejected() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let listener = counting_listener(&coordinator);

        assert!(!coordinator.handle_move_begin(&move_gesture(1, f64::NAN, f64::INFINITY)));
        assert!(!coordinator.handle_move_begin(&move_gesture(2, 10.0, f64::NEG_INFINITY)));
        assert_eq!(listener.move_begins.get(), 0);
        assert_eq!(map.calls(), vec![]);
    }

    #[test]
    fn move_with_invalid_distance_is_rejected() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let gesture = move_gesture(1, 0.0, 0.0);

        assert!(!coordinator.handle_move(&gesture, ScreenVector::new(1.0, f64::NAN)));
        assert!(!coordinator.handle_move(&gesture, ScreenVector::new(f64::NAN, 1.0)));
        assert_eq!(map.calls(), vec![]);
    }

    #[test]
    fn zero_move_is_ignored() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let listener = counting_listener(&coordinator);

        assert!(!coordinator.handle_move(&move_gesture(1, 0.0, 0.0), ScreenVector::zeros()));
        assert_eq!(listener.moves.get(), 0);
        assert!(map.no_camera_changes());
    }

    #[test]
    fn pinch_scroll_disabled_allows_only_single_pointer_pan_while_pinching() {
        let (map, mut coordinator) =
            setup(GesturesSettings::default().with_pinch_scroll_enabled(false));
        let listener = counting_listener(&coordinator);
        coordinator
            .detectors_mut()
            .states_mut()
            .begin(GestureKind::Scale);
        let distance = ScreenVector::new(50.0, 50.0);

        assert!(!coordinator.handle_move(&move_gesture(3, 0.0, 0.0), distance));
        assert!(!coordinator.handle_move(&move_gesture(2, 0.0, 0.0), distance));
        assert!(coordinator.handle_move(&move_gesture(1, 0.0, 0.0), distance));

        assert_eq!(listener.moves.get(), 3);
        assert_eq!(
            map.count(|call| *call == Call::CameraForDrag(at(0.0, 0.0), at(-50.0, -50.0))),
            1
        );
        assert_eq!(map.eases().len(), 1);
    }

    #[test]
    fn pinch_scroll_enabled_allows_multi_pointer_pan() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let listener = counting_listener(&coordinator);
        coordinator
            .detectors_mut()
            .states_mut()
            .begin(GestureKind::Scale);
        let distance = ScreenVector::new(50.0, 50.0);

        assert!(coordinator.handle_move(&move_gesture(3, 0.0, 0.0), distance));
        assert!(coordinator.handle_move(&move_gesture(2, 0.0, 0.0), distance));
        assert!(coordinator.handle_move(&move_gesture(1, 0.0, 0.0), distance));

        assert_eq!(listener.moves.get(), 3);
        let eases = map.eases();
        assert_eq!(eases.len(), 3);
        assert_eq!(eases[0].1, AnimationOptions::immediate());
        assert_eq!(eases[0].1.owner.as_deref(), Some(GESTURES_OWNER));
    }

    #[test]
    fn move_listener_consumes_update() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let listener = counting_listener(&coordinator);
        listener.consume_moves.set(true);

        assert!(coordinator.handle_move(&move_gesture(1, 0.0, 0.0), ScreenVector::new(5.0, 5.0)));
        assert_eq!(listener.moves.get(), 1);
        assert!(map.no_camera_changes());
    }

    #[test]
    fn scroll_mode_restricts_pan() {
        let (map, mut coordinator) =
            setup(GesturesSettings::default().with_scroll_mode(ScrollMode::Vertical));

        assert!(coordinator.handle_move(&move_gesture(1, 0.0, 0.0), ScreenVector::new(50.0, 50.0)));
        assert_eq!(
            map.count(|call| *call == Call::CameraForDrag(at(0.0, 0.0), at(0.0, -50.0))),
            1
        );
    }

    #[test]
    fn move_begin() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let listener = Rc::new(CountingListener::default());
        let id = coordinator
            .listeners()
            .add_on_move_listener(listener.clone());
        let gesture = move_gesture(1, 0.0, 0.0);

        assert!(coordinator.handle_move_begin(&gesture));
        assert_eq!(listener.move_begins.get(), 1);
        assert_eq!(map.cancels(), vec![Vec::<String>::new()]);

        coordinator.listeners().remove_on_move_listener(id);
        assert!(coordinator.handle_move_begin(&gesture));
        assert_eq!(listener.move_begins.get(), 1);

        coordinator.update_settings(|settings| settings.set_scroll_enabled(false));
        assert!(!coordinator.handle_move_begin(&gesture));

        coordinator.handle_move_end(&gesture);
        assert_eq!(listener.move_ends.get(), 0);
    }

    #[test]
    fn scale_begin() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let listener = Rc::new(CountingListener::default());
        let id = coordinator
            .listeners()
            .add_on_scale_listener(listener.clone());
        let gesture = scale_gesture(500, 300, 80.0, 5000.0);

        assert!(coordinator.handle_scale_begin(&gesture));
        assert_eq!(listener.scale_begins.get(), 1);
        assert_eq!(map.cancels().len(), 1);

        coordinator.listeners().remove_on_scale_listener(id);
        coordinator.handle_scale_begin(&gesture);
        assert_eq!(listener.scale_begins.get(), 1);
    }

    #[test]
    fn scale_begin_rejects_reversed_and_equal_times() {
        let (_map, mut coordinator) = setup(GesturesSettings::default());
        let listener = counting_listener(&coordinator);

        assert!(!coordinator.handle_scale_begin(&scale_gesture(300, 500, 80.0, 5000.0)));
        assert!(!coordinator.handle_scale_begin(&scale_gesture(300, 300, 80.0, 5000.0)));
        assert!(!coordinator.handle_scale_begin(&scale_gesture(500, 300, 80.0, 80.0)));
        assert_eq!(listener.scale_begins.get(), 0);
    }

    #[test]
    fn invalid_scale_and_rotate_inputs_are_rejected() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let nan_focal = GestureContext::new(2, at(f64::NAN, 1.0));

        assert!(!coordinator.handle_scale_begin(&ScaleGesture::new(nan_focal, 80.0, 5000.0)));
        assert!(!coordinator.handle_scale(&ScaleGesture::new(nan_focal, 80.0, 5000.0)));
        assert!(!coordinator.handle_scale(&scale_gesture(0, 0, f64::NAN, 80.0)));
        assert!(!coordinator.handle_rotate(&RotateGesture::new(nan_focal, 5.0, 5.0), 5.0));
        assert!(!coordinator.handle_rotate(&rotate_gesture(0, 0, 5.0, 5.0), f64::INFINITY));

        assert_eq!(map.calls(), vec![]);
    }

    #[test]
    fn slow_pinch_does_not_begin() {
        let (_map, mut coordinator) = setup(GesturesSettings::default().with_pixel_ratio(2.0));

        // 100 px in 100 ms is 1 px/ms, below 0.6 * 2
        assert!(!coordinator.handle_scale_begin(&scale_gesture(200, 100, 200.0, 100.0)));
        assert!(coordinator.handle_scale_begin(&scale_gesture(200, 100, 300.0, 100.0)));
    }

    #[test]
    fn pinch_to_zoom_disabled() {
        let (_map, mut coordinator) =
            setup(GesturesSettings::default().with_pinch_to_zoom_enabled(false));
        let listener = counting_listener(&coordinator);

        assert!(!coordinator.handle_scale_begin(&scale_gesture(500, 300, 100.0, 80.0)));
        assert_eq!(listener.scale_begins.get(), 0);
    }

    #[test]
    fn scale_begin_raises_rotate_threshold_until_end() {
        let (_map, mut coordinator) = setup(GesturesSettings::default());
        let gesture = scale_gesture(500, 300, 80.0, 5000.0);

        assert!(coordinator.handle_scale_begin(&gesture));
        assert_eq!(
            coordinator.detectors().thresholds().rotate_angle,
            ROTATE_ANGLE_THRESHOLD_WHEN_SCALING
        );

        coordinator.handle_scale_end(&gesture, ScreenVector::zeros());
        assert_eq!(
            coordinator.detectors().thresholds().rotate_angle,
            DEFAULT_ROTATE_ANGLE_THRESHOLD
        );
    }

    #[test]
    fn scale_without_simultaneous_rotation_eases() {
        let (map, mut coordinator) = setup(
            GesturesSettings::default().with_simultaneous_rotate_and_pinch_to_zoom_enabled(false),
        );
        counting_listener(&coordinator);

        assert!(coordinator.handle_scale(&scale_gesture(0, 0, 100.0, 80.0)));

        let eases = map.eases();
        assert_eq!(eases.len(), 1);
        let (options, animation) = &eases[0];
        assert_relative_eq!(options.zoom.expect("zoom"), 1.0 + 1.25f64.log2());
        assert_eq!(options.anchor, Some(at(1.0, 1.0)));
        assert_eq!(animation.duration, Duration::ZERO);
    }

    #[test]
    fn scale_with_simultaneous_rotation_plays_animator() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let listener = counting_listener(&coordinator);

        assert!(coordinator.handle_scale(&scale_gesture(0, 0, 100.0, 80.0)));

        assert_eq!(listener.scales.get(), 1);
        assert_eq!(map.count(|call| matches!(call, Call::CreateZoomAnimator(..))), 1);
        assert_eq!(
            map.count(|call| matches!(call, Call::PlayAnimatorsTogether(_))),
            1
        );
        assert!(map.eases().is_empty());
    }

    #[test]
    fn scale_and_rotation_of_one_frame_are_played_together() {
        let (map, mut coordinator) = setup(GesturesSettings::default());

        coordinator.camera.begin_frame();
        assert!(coordinator.handle_scale(&scale_gesture(0, 0, 100.0, 80.0)));
        assert!(coordinator.handle_rotate(&rotate_gesture(0, 0, 34.0, 34.0), 34.0));
        assert_eq!(
            map.count(|call| matches!(call, Call::PlayAnimatorsTogether(_))),
            0
        );
        coordinator.camera.end_frame();

        assert_eq!(
            map.count(|call| *call == Call::PlayAnimatorsTogether(vec![AnimatorId(1), AnimatorId(2)])),
            1
        );
    }

    #[test]
    fn quick_zoom() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let context = GestureContext::new(1, at(1.0, 1.0));
        let gesture = ScaleGesture::new(context, 100.0, 80.0);

        assert!(coordinator.handle_scale_begin(&gesture));
        assert!(!move_enabled(&coordinator));

        assert!(coordinator.handle_scale(&gesture));
        assert_eq!(map.eases().len(), 1);
        assert_eq!(map.count(|call| matches!(call, Call::CreateZoomAnimator(..))), 0);

        coordinator.handle_scale_end(&gesture, ScreenVector::new(5000.0, 0.0));
        assert!(move_enabled(&coordinator));
        assert_eq!(map.eases().len(), 1);
    }

    #[test]
    fn quick_zoom_disabled() {
        let (_map, mut coordinator) =
            setup(GesturesSettings::default().with_quick_zoom_enabled(false));
        let gesture = ScaleGesture::new(GestureContext::new(1, at(1.0, 1.0)), 100.0, 80.0);

        assert!(!coordinator.handle_scale_begin(&gesture));
        assert!(move_enabled(&coordinator));
    }

    #[test]
    fn rotation_in_progress_suppresses_scale() {
        let (map, mut coordinator) = setup(
            GesturesSettings::default().with_simultaneous_rotate_and_pinch_to_zoom_enabled(false),
        );
        let listener = counting_listener(&coordinator);
        coordinator
            .detectors_mut()
            .states_mut()
            .begin(GestureKind::Rotate);

        assert!(!coordinator.handle_scale(&scale_gesture(0, 0, 100.0, 80.0)));
        assert_eq!(listener.scales.get(), 1);
        assert!(map.no_camera_changes());
    }

    #[test]
    fn scale_in_progress_suppresses_rotation() {
        let (map, mut coordinator) = setup(
            GesturesSettings::default().with_simultaneous_rotate_and_pinch_to_zoom_enabled(false),
        );
        let listener = counting_listener(&coordinator);
        coordinator
            .detectors_mut()
            .states_mut()
            .begin(GestureKind::Scale);

        assert!(!coordinator.handle_rotate(&rotate_gesture(0, 0, 34.0, 34.0), 34.0));
        assert_eq!(listener.rotates.get(), 1);
        assert!(map.no_camera_changes());
    }

    #[test]
    fn scale_end_decelerates() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let gesture = scale_gesture(0, 0, 80.0, 100.0);
        assert!(gesture.is_scaling_out);

        coordinator.handle_scale_end(&gesture, ScreenVector::new(1000.0, 0.0));

        let eases = map.eases();
        assert_eq!(eases.len(), 1);
        let (options, animation) = &eases[0];
        assert_relative_eq!(options.zoom.expect("zoom"), 1.0 - 2.0f64.ln());
        assert_eq!(animation.interpolator, Interpolator::Decelerate);
        assert_eq!(animation.duration.as_millis(), 173);
    }

    #[test]
    fn scale_end_without_deceleration() {
        let (map, mut coordinator) =
            setup(GesturesSettings::default().with_pinch_to_zoom_deceleration_enabled(false));
        let listener = counting_listener(&coordinator);

        coordinator.handle_scale_end(&scale_gesture(0, 0, 80.0, 100.0), ScreenVector::new(1000.0, 0.0));
        assert_eq!(listener.scale_ends.get(), 1);
        assert!(map.no_camera_changes());
    }

    #[test]
    fn rotate_disabled() {
        let (_map, mut coordinator) = setup(GesturesSettings::default().with_rotate_enabled(false));
        let listener = counting_listener(&coordinator);
        coordinator
            .detectors_mut()
            .states_mut()
            .begin(GestureKind::Rotate);

        assert!(!coordinator.handle_rotate_begin(&rotate_gesture(500, 300, 10000.0, 500.0)));
        assert_eq!(listener.rotate_begins.get(), 0);
    }

    #[test]
    fn rotate_begin_rejects_noise() {
        let (_map, mut coordinator) = setup(GesturesSettings::default());
        let listener = counting_listener(&coordinator);
        coordinator
            .detectors_mut()
            .states_mut()
            .begin(GestureKind::Rotate);

        // same time
        assert!(!coordinator.handle_rotate_begin(&rotate_gesture(300, 300, 10000.0, 500.0)));
        // too slow
        assert!(!coordinator.handle_rotate_begin(&rotate_gesture(500, 300, 0.0, 0.0)));
        // fast but short
        assert!(!coordinator.handle_rotate_begin(&rotate_gesture(500, 300, 10.0, 500.0)));
        assert!(!coordinator.handle_rotate_begin(&rotate_gesture(200, 100, 4.0, 10.0)));

        assert_eq!(listener.rotate_begins.get(), 0);
    }

    #[test]
    fn rotate_begin_with_invalid_input_is_rejected() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let listener = counting_listener(&coordinator);
        coordinator
            .detectors_mut()
            .states_mut()
            .begin(GestureKind::Rotate);

        let nan_focal = GestureContext::new(2, at(f64::NAN, f64::NAN))
            .with_event_times(ms(500), ms(300));
        assert!(!coordinator.handle_rotate_begin(&RotateGesture::new(nan_focal, f64::NAN, f64::NAN)));
        assert!(!coordinator.handle_rotate_begin(&RotateGesture::new(nan_focal, 10000.0, 500.0)));
        assert!(!coordinator.handle_rotate_begin(&rotate_gesture(500, 300, 10000.0, f64::NAN)));
        assert!(!coordinator.handle_rotate_begin(&rotate_gesture(500, 300, f64::INFINITY, 500.0)));

        assert_eq!(listener.rotate_begins.get(), 0);
        assert_eq!(map.calls(), vec![]);
    }

    #[test]
    fn rotate_begin_requires_detector_in_progress() {
        let (_map, mut coordinator) = setup(GesturesSettings::default());
        assert!(!coordinator.handle_rotate_begin(&rotate_gesture(500, 300, 10000.0, 500.0)));
    }

    #[test]
    fn rotate_begin() {
        let (_map, mut coordinator) = setup(GesturesSettings::default().with_pixel_ratio(2.0));
        let listener = Rc::new(CountingListener::default());
        let id = coordinator
            .listeners()
            .add_on_rotate_listener(listener.clone());
        coordinator
            .detectors_mut()
            .states_mut()
            .begin(GestureKind::Rotate);
        let gesture = rotate_gesture(500, 300, 10000.0, 500.0);

        assert!(coordinator.handle_rotate_begin(&gesture));
        assert_eq!(listener.rotate_begins.get(), 1);
        assert_eq!(
            coordinator.detectors().thresholds().scale_span,
            SCALE_SPAN_THRESHOLD_WHEN_ROTATING * 2.0
        );

        coordinator.listeners().remove_on_rotate_listener(id);
        coordinator.handle_rotate_begin(&gesture);
        assert_eq!(listener.rotate_begins.get(), 1);

        coordinator.handle_rotate_end(&gesture, 0.0);
        assert_eq!(
            coordinator.detectors().thresholds().scale_span,
            DEFAULT_SCALE_SPAN_THRESHOLD * 2.0
        );
    }

    #[test]
    fn rotate_without_simultaneous_scale_eases() {
        let (map, mut coordinator) = setup(
            GesturesSettings::default().with_simultaneous_rotate_and_pinch_to_zoom_enabled(false),
        );
        map.camera.set(camera(0.0, 1.0, 0.0));

        assert!(coordinator.handle_rotate(&rotate_gesture(0, 0, 34.0, 34.0), 34.0));

        let eases = map.eases();
        assert_eq!(eases.len(), 1);
        assert_eq!(eases[0].0.bearing, Some(327.0));
        assert_eq!(eases[0].0.anchor, Some(at(0.0, 0.0)));
    }

    #[test]
    fn rotate_with_simultaneous_scale_plays_animator() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let listener = counting_listener(&coordinator);

        assert!(coordinator.handle_rotate(&rotate_gesture(0, 0, 34.0, 34.0), 34.0));

        assert_eq!(listener.rotates.get(), 1);
        assert_eq!(
            map.count(|call| *call == Call::CreateBearingAnimator(326.0, at(0.0, 0.0))),
            1
        );
        assert_eq!(
            map.count(|call| matches!(call, Call::PlayAnimatorsTogether(_))),
            1
        );
    }

    #[test]
    fn rotate_end_decelerates() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let listener = counting_listener(&coordinator);

        coordinator.handle_rotate_end(&rotate_gesture(0, 0, 30.0, 5.0), -720.0);

        assert_eq!(listener.rotate_ends.get(), 1);
        let eases = map.eases();
        assert_eq!(eases.len(), 1);
        assert_relative_eq!(eases[0].0.bearing.expect("bearing"), 36.0);
        assert_eq!(eases[0].1.duration.as_millis(), 200);
        assert_eq!(eases[0].1.interpolator, Interpolator::Decelerate);
    }

    #[test]
    fn shove_disabled() {
        let (_map, mut coordinator) = setup(GesturesSettings::default().with_pitch_enabled(false));
        let listener = counting_listener(&coordinator);

        assert!(!coordinator.handle_shove_begin(&shove_gesture()));
        assert_eq!(listener.shove_begins.get(), 0);
        assert!(move_enabled(&coordinator));
    }

    #[test]
    fn shove_lifecycle() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let listener = Rc::new(CountingListener::default());
        let id = coordinator
            .listeners()
            .add_on_shove_listener(listener.clone());
        map.camera.set(camera(0.0, 0.0, 1.0));
        map.pixel.set(at(10.0, 10.0));

        assert!(coordinator.handle_shove_begin(&shove_gesture()));
        assert_eq!(listener.shove_begins.get(), 1);
        assert!(!move_enabled(&coordinator));

        assert!(coordinator.handle_shove(&shove_gesture(), -15.0));
        let eases = map.eases();
        assert_eq!(eases.len(), 1);
        assert_relative_eq!(eases[0].0.pitch.expect("pitch"), 2.5, epsilon = 1e-6);
        assert_eq!(eases[0].0.anchor, Some(at(10.0, 10.0)));

        coordinator.handle_shove_end(&shove_gesture());
        assert_eq!(listener.shove_ends.get(), 1);
        assert!(move_enabled(&coordinator));

        coordinator.listeners().remove_on_shove_listener(id);
        assert!(coordinator.handle_shove_begin(&shove_gesture()));
        assert_eq!(listener.shove_begins.get(), 1);
    }

    #[test]
    fn shove_with_out_of_range_max_pitch() {
        for max_pitch in [-1.0, f64::NAN, 120.0] {
            let (map, mut coordinator) = setup(GesturesSettings::default());
            coordinator.update_settings(|settings| settings.set_max_pitch(max_pitch));
            map.camera.set(camera(0.0, 0.0, 80.0));

            assert!(coordinator.handle_shove(&shove_gesture(), -100.0));
            let eases = map.eases();
            assert_eq!(eases.len(), 1);
            assert_eq!(eases[0].0.pitch, Some(85.0));
        }
    }

    #[test]
    fn shove_with_invalid_delta_is_rejected() {
        let (map, mut coordinator) = setup(GesturesSettings::default());

        assert!(!coordinator.handle_shove(&shove_gesture(), f64::NAN));
        assert_eq!(map.calls(), vec![]);
    }

    fn fling_counter(coordinator: &GestureCoordinator) -> (Rc<Cell<usize>>, ListenerId) {
        let counter = Rc::new(Cell::new(0));
        let counter_clone = counter.clone();
        let id = coordinator
            .listeners()
            .add_on_fling_listener(Rc::new(move || counter_clone.set(counter_clone.get() + 1)));
        (counter, id)
    }

    #[test]
    fn fling_listener() {
        let (_map, mut coordinator) = setup(GesturesSettings::default());
        let (counter, id) = fling_counter(&coordinator);

        assert!(!coordinator.handle_fling_event(at(0.0, 0.0), ScreenVector::zeros()));
        assert_eq!(counter.get(), 1);

        coordinator.listeners().remove_on_fling_listener(id);
        coordinator.handle_fling_event(at(0.0, 0.0), ScreenVector::zeros());
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn slow_fling_is_ignored() {
        let (map, mut coordinator) = setup(GesturesSettings::default());

        assert!(!coordinator.handle_fling_event(at(0.0, 0.0), ScreenVector::new(0.1, 0.1)));
        assert!(map.no_camera_changes());
    }

    #[test]
    fn fling_requires_scroll() {
        let (_map, mut coordinator) = setup(GesturesSettings::default().with_scroll_enabled(false));
        let (counter, _) = fling_counter(&coordinator);

        assert!(!coordinator.handle_fling_event(at(0.0, 0.0), ScreenVector::new(0.1, 0.1)));
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn fling_without_deceleration_notifies_only() {
        let (map, mut coordinator) =
            setup(GesturesSettings::default().with_scroll_deceleration_enabled(false));
        let (counter, _) = fling_counter(&coordinator);

        assert!(!coordinator.handle_fling_event(at(0.0, 0.0), ScreenVector::new(1000.0, 0.0)));
        assert_eq!(counter.get(), 1);
        assert!(map.no_camera_changes());
    }

    #[test]
    fn fling_moves_camera() {
        use ScrollMode::{Horizontal, HorizontalAndVertical, Vertical};

        let fast = ScreenVector::new(10000.0, 10000.0);
        let slow = ScreenVector::new(800.0, 750.0);
        let cases = [
            (0.0, fast, HorizontalAndVertical, at(1000.0, 1000.0), 1414),
            (0.0, fast, Vertical, at(0.0, 1000.0), 1414),
            (0.0, fast, Horizontal, at(1000.0, 0.0), 1414),
            (55.0, fast, HorizontalAndVertical, at(645.1612903225806, 645.1612903225806), 912),
            (80.0, fast, HorizontalAndVertical, at(67.93869850933991, 67.93869850933991), 96),
            (0.0, slow, HorizontalAndVertical, at(80.0, 75.0), 109),
            (55.0, slow, HorizontalAndVertical, at(51.61290322580645, 48.38709677419355), 70),
            (80.0, slow, HorizontalAndVertical, at(5.435095880747194, 5.095402388200494), 7),
        ];

        for (pitch, velocity, scroll_mode, target, duration) in cases {
            let (map, mut coordinator) =
                setup(GesturesSettings::default().with_scroll_mode(scroll_mode));
            map.camera.set(camera(1.0, 0.0, pitch));

            assert!(coordinator.handle_fling_event(at(0.0, 0.0), velocity));

            let drag = map
                .calls()
                .into_iter()
                .find_map(|call| match call {
                    Call::CameraForDrag(from, to) => Some((from, to)),
                    _ => None,
                })
                .expect("drag camera requested");
            assert_eq!(drag.0, at(0.0, 0.0));
            assert_relative_eq!(drag.1.x, target.x, epsilon = 1e-6);
            assert_relative_eq!(drag.1.y, target.y, epsilon = 1e-6);

            let eases = map.eases();
            assert_eq!(eases.len(), 1);
            assert_eq!(
                eases[0].1,
                AnimationOptions::gestures(ms(duration)).with_interpolator(Interpolator::Decelerate)
            );
        }
    }

    #[test]
    fn fling_above_horizon_is_rejected() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        map.projection.set(Some(ProjectionName::Globe));
        let (counter, _) = fling_counter(&coordinator);

        assert!(!coordinator.handle_fling_event(at(0.0, 0.0), ScreenVector::new(1000.0, 0.0)));
        assert_eq!(counter.get(), 0);
        assert!(map.no_camera_changes());
    }

    #[test]
    fn horizon_on_globe() {
        let cases = [
            (100.0, at(0.0, 0.0), true),
            (100.0, at(0.0, 2.0), true),
            (100.0, at(0.0, 3.0), false),
            (500.0, at(0.0, 10.0), true),
            (500.0, at(0.0, 11.0), false),
            (1000.0, at(0.0, 10.0), true),
        ];

        for (size, point, expected) in cases {
            let (map, coordinator) = setup(GesturesSettings::default());
            map.projection.set(Some(ProjectionName::Globe));
            map.size.set(Size::new(size, size));

            assert_eq!(
                coordinator.is_point_above_horizon(point),
                expected,
                "size {size}, point {point:?}"
            );
        }
    }

    #[test]
    fn horizon_on_flat_maps() {
        for projection in [Some(ProjectionName::Mercator), None] {
            let (map, coordinator) = setup(GesturesSettings::default());
            map.projection.set(projection);

            assert!(!coordinator.is_point_above_horizon(at(0.0, 0.0)));
            assert!(!coordinator.is_point_above_horizon(at(0.0, 3.0)));
            assert_eq!(map.count(|call| matches!(call, Call::CoordinateForPixel(_))), 0);
        }
    }

    #[test]
    fn horizon_replaces_nan_with_zero() {
        let (map, coordinator) = setup(GesturesSettings::default());
        map.projection.set(Some(ProjectionName::Globe));

        coordinator.is_point_above_horizon(at(f64::NAN, 10.0));
        coordinator.is_point_above_horizon(at(0.0, f64::NAN));

        assert_eq!(map.count(|call| *call == Call::CoordinateForPixel(at(0.0, 6.0))), 1);
        assert_eq!(map.count(|call| *call == Call::CoordinateForPixel(at(0.0, -4.0))), 1);
    }

    #[test]
    fn unprojectable_pixel_is_above_horizon() {
        let (map, coordinator) = setup(GesturesSettings::default());
        map.projection.set(Some(ProjectionName::Globe));
        map.coordinate.set(GeoPoint2d::latlon(f64::NAN, 0.0));

        assert!(coordinator.is_point_above_horizon(at(50.0, 50.0)));
    }

    #[test]
    fn double_tap_zooms_in() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        map.camera.set(camera(5.0, 0.0, 0.0));

        assert!(!coordinator.handle_double_tap_event(&touch(MotionAction::Down, 300, 15.0, 10.0), 0.0));
        assert!(coordinator.double_tap_registered());
        assert!(!move_enabled(&coordinator));

        assert!(coordinator.handle_double_tap_event(&touch(MotionAction::Up, 300, 15.0, 10.0), 0.0));
        assert!(!coordinator.double_tap_registered());

        let eases = map.eases();
        assert_eq!(eases.len(), 1);
        assert_eq!(
            eases[0],
            (
                CameraOptions::default().with_zoom(6.0).with_anchor(at(15.0, 10.0)),
                AnimationOptions::gestures(ZOOM_ANIMATION_DURATION)
            )
        );
    }

    #[test]
    fn distant_double_tap_is_ignored() {
        let (map, mut coordinator) = setup(GesturesSettings::default());

        coordinator.handle_double_tap_event(&touch(MotionAction::Down, 300, 15.0, 10.0), 0.0);
        assert!(!coordinator.handle_double_tap_event(&touch(MotionAction::Up, 300, 500.0, 500.0), 0.0));
        assert!(map.no_camera_changes());
    }

    #[test]
    fn slow_double_tap_is_ignored() {
        let (map, mut coordinator) = setup(GesturesSettings::default());

        coordinator.handle_double_tap_event(&touch(MotionAction::Down, 300, 15.0, 10.0), 100.0);
        assert!(!coordinator.handle_double_tap_event(&touch(MotionAction::Up, 700, 15.0, 10.0), 100.0));
        assert!(map.no_camera_changes());
    }

    #[test]
    fn double_tap_disabled() {
        let (map, mut coordinator) =
            setup(GesturesSettings::default().with_double_tap_to_zoom_in_enabled(false));

        coordinator.handle_double_tap_event(&touch(MotionAction::Down, 300, 15.0, 10.0), 0.0);
        assert!(coordinator.double_tap_registered());
        assert!(!move_enabled(&coordinator));
        assert!(!coordinator.handle_double_tap_event(&touch(MotionAction::Up, 300, 15.0, 10.0), 0.0));
        assert!(map.no_camera_changes());
    }

    #[test]
    fn double_tap_uses_focal_point() {
        let (map, mut coordinator) =
            setup(GesturesSettings::default().with_focal_point(Some(at(0.5, 0.5))));

        coordinator.handle_double_tap_event(&touch(MotionAction::Down, 300, 15.0, 10.0), 0.0);
        assert!(coordinator.handle_double_tap_event(&touch(MotionAction::Up, 300, 15.0, 10.0), 0.0));
        assert_eq!(map.eases()[0].0.anchor, Some(at(0.5, 0.5)));
    }

    #[test]
    fn double_tap_up_without_down() {
        let (_map, mut coordinator) = setup(GesturesSettings::default());
        assert!(!coordinator.handle_double_tap_event(&touch(MotionAction::Up, 300, 15.0, 10.0), 0.0));
    }

    #[test]
    fn second_pointer_finishes_double_tap() {
        let (_map, mut coordinator) = setup(GesturesSettings::default());
        coordinator.handle_double_tap_event(&touch(MotionAction::Down, 300, 15.0, 10.0), 12.0);

        let pointer_down = MotionEvent::new(
            MotionAction::PointerDown,
            ms(310),
            vec![
                Pointer::new(0, at(15.0, 10.0)),
                Pointer::new(1, at(40.0, 10.0)),
            ],
        )
        .with_action_index(1);
        assert!(coordinator.on_touch_event(&pointer_down));
        assert!(!coordinator.double_tap_registered());
        assert!(move_enabled(&coordinator));
    }

    #[test]
    fn non_primary_buttons_are_ignored() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let event = touch(MotionAction::Down, 0, 10.0, 10.0).with_buttons(Buttons::SECONDARY);

        assert!(!coordinator.on_touch_event(&event));
        assert_eq!(map.calls(), vec![]);
    }

    #[test]
    fn event_without_pointers_is_ignored() {
        let (map, mut coordinator) = setup(GesturesSettings::default());

        assert!(!coordinator.on_touch_event(&MotionEvent::new(MotionAction::Down, ms(0), vec![])));
        assert_eq!(map.calls(), vec![]);
    }

    #[test]
    fn touch_pan_and_fling() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let listener = counting_listener(&coordinator);

        assert!(coordinator.on_touch_event(&touch(MotionAction::Down, 0, 10.0, 10.0)));
        assert_eq!(map.calls(), vec![Call::SetGestureInProgress(true)]);

        assert!(coordinator.on_touch_event(&touch(MotionAction::Move, 16, 30.0, 10.0)));
        assert_eq!(listener.move_begins.get(), 1);
        assert!(coordinator.on_touch_event(&touch(MotionAction::Move, 32, 50.0, 10.0)));
        assert_eq!(listener.moves.get(), 1);
        assert_eq!(
            map.count(|call| *call == Call::CameraForDrag(at(50.0, 10.0), at(70.0, 10.0))),
            1
        );

        assert!(coordinator.on_touch_event(&touch(MotionAction::Up, 40, 50.0, 10.0)));
        assert_eq!(listener.move_ends.get(), 1);
        assert_eq!(
            map.count(|call| *call == Call::CameraForDrag(at(50.0, 10.0), at(175.0, 10.0))),
            1
        );
        let eases = map.eases();
        assert_eq!(
            eases.last().map(|(_, options)| options.clone()),
            Some(AnimationOptions::gestures(ms(125)).with_interpolator(Interpolator::Decelerate))
        );
        assert_eq!(map.calls().last(), Some(&Call::SetGestureInProgress(false)));
        assert_eq!(
            coordinator.detectors().states().state(GestureKind::Move),
            DetectorState::Ended
        );
    }

    #[test]
    fn touch_double_tap_zooms_in() {
        let (map, mut coordinator) = setup(GesturesSettings::default());

        coordinator.on_touch_event(&touch(MotionAction::Down, 0, 10.0, 10.0));
        coordinator.on_touch_event(&touch(MotionAction::Up, 50, 10.0, 10.0));
        assert!(map.no_camera_changes());

        coordinator.on_touch_event(&touch(MotionAction::Down, 200, 12.0, 10.0));
        assert!(coordinator.double_tap_registered());
        assert!(!move_enabled(&coordinator));

        coordinator.on_touch_event(&touch(MotionAction::Up, 250, 12.0, 10.0));
        assert!(!coordinator.double_tap_registered());
        assert!(move_enabled(&coordinator));
        assert_eq!(
            map.eases(),
            vec![(
                CameraOptions::default().with_zoom(2.0).with_anchor(at(12.0, 10.0)),
                AnimationOptions::gestures(ZOOM_ANIMATION_DURATION)
            )]
        );
    }

    #[test]
    fn click_listeners_are_called_in_order() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let point = GeoPoint2d::latlon(1.0, 2.0);
        map.coordinate.set(point);
        let received = Rc::new(RefCell::new(vec![]));

        let make = |name: &'static str, consume: bool| {
            let received = received.clone();
            Rc::new(move |clicked: GeoPoint2d| {
                received.borrow_mut().push((name, clicked));
                consume
            })
        };
        let first = coordinator.listeners().add_on_map_click_listener(make("first", false));
        coordinator.listeners().add_on_map_click_listener(make("second", true));
        coordinator.listeners().add_on_map_click_listener(make("third", true));

        assert!(coordinator.handle_click_event(at(1.0, 1.0)));
        assert_eq!(*received.borrow(), vec![("first", point), ("second", point)]);
        assert_eq!(map.count(|call| *call == Call::CoordinateForPixel(at(1.0, 1.0))), 1);

        coordinator.listeners().remove_on_map_click_listener(first);
        received.borrow_mut().clear();
        coordinator.handle_click_event(at(1.0, 1.0));
        assert_eq!(*received.borrow(), vec![("second", point)]);
    }

    #[test]
    fn long_click_listener() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        let point = GeoPoint2d::latlon(0.0, 0.0);
        map.coordinate.set(point);
        let counter = Rc::new(Cell::new(0));
        let counter_clone = counter.clone();
        let id = coordinator
            .listeners()
            .add_on_map_long_click_listener(Rc::new(move |clicked: GeoPoint2d| {
                assert_eq!(clicked, point);
                counter_clone.set(counter_clone.get() + 1);
                true
            }));

        assert!(coordinator.handle_long_press_event(at(1.0, 1.0)));
        assert_eq!(counter.get(), 1);

        coordinator.listeners().remove_on_map_long_click_listener(id);
        assert!(!coordinator.handle_long_press_event(at(1.0, 1.0)));
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn single_tap_up_cancels_animations() {
        let (map, mut coordinator) = setup(GesturesSettings::default());

        coordinator.handle_single_tap_up_event();
        assert_eq!(map.calls(), vec![Call::CancelAllAnimators(vec![])]);
    }

    #[test]
    fn two_finger_tap_zooms_out() {
        let (map, mut coordinator) = setup(GesturesSettings::default().with_zoom_animation_amount(0.5));

        assert!(coordinator.handle_two_finger_tap(at(20.0, 20.0)));
        assert_eq!(
            map.eases(),
            vec![(
                CameraOptions::default().with_zoom(0.5).with_anchor(at(20.0, 20.0)),
                AnimationOptions::gestures(ZOOM_ANIMATION_DURATION)
            )]
        );

        coordinator.update_settings(|settings| settings.set_double_touch_to_zoom_out_enabled(false));
        assert!(!coordinator.handle_two_finger_tap(at(20.0, 20.0)));
        assert_eq!(map.eases().len(), 1);
    }

    fn wheel(y: f64) -> MotionEvent {
        touch(MotionAction::Scroll, 0, 20.0, 30.0)
            .with_source(InputSource::Mouse)
            .with_buttons(Buttons::SECONDARY)
            .with_scroll(ScreenVector::new(0.0, y))
    }

    #[test]
    fn generic_motion_zooms_with_wheel() {
        let (map, mut coordinator) = setup(GesturesSettings::default());

        assert!(!coordinator.on_generic_motion_event(&touch(MotionAction::Down, 0, 15.0, 10.0)));
        assert!(coordinator.on_generic_motion_event(&wheel(1.0)));

        let eases = map.eases();
        assert_eq!(eases.len(), 1);
        assert_relative_eq!(eases[0].0.zoom.expect("zoom"), 1.0 + 1.2f64.log2());
        assert_eq!(eases[0].0.anchor, Some(at(20.0, 30.0)));
        assert_eq!(eases[0].1.duration, ms(50));
    }

    #[test]
    fn generic_motion_ignored() {
        let (map, mut coordinator) =
            setup(GesturesSettings::default().with_pinch_to_zoom_enabled(false));

        assert!(!coordinator.on_generic_motion_event(&wheel(1.0)));
        assert!(!coordinator.on_generic_motion_event(&wheel(1.0).with_source(InputSource::Other)));
        assert_eq!(map.calls(), vec![]);
    }

    #[test]
    fn camera_changes_go_through_animations() {
        let (map, mut coordinator) = setup(GesturesSettings::default());
        map.camera.set(camera(1.0, 0.0, 10.0));

        assert!(coordinator.handle_move(&move_gesture(1, 10.0, 10.0), ScreenVector::new(5.0, 5.0)));
        assert!(coordinator.handle_rotate(&rotate_gesture(500, 300, 20.0, 20.0), 20.0));
        assert!(coordinator.handle_shove(&shove_gesture(), -15.0));
        assert!(coordinator.handle_fling_event(at(0.0, 0.0), ScreenVector::new(800.0, 750.0)));
        assert!(coordinator.on_generic_motion_event(&wheel(1.0)));

        assert!(!map.eases().is_empty());
        assert_eq!(map.count(|call| matches!(call, Call::SetCamera(_))), 0);
    }

    #[test]
    fn protected_owners_are_not_cancelled() {
        let (map, mut coordinator) = setup(GesturesSettings::default());

        coordinator.add_protected_animation_owner("Owner");
        assert!(coordinator.on_generic_motion_event(&wheel(1.0)));
        assert_eq!(map.cancels(), vec![vec!["Owner".to_string()]]);

        map.clear();
        coordinator.remove_protected_animation_owner("Owner");
        coordinator.add_protected_animation_owner("OwnerOne");
        coordinator.add_protected_animation_owner("OwnerTwo");
        coordinator.remove_protected_animation_owner("OwnerOne");
        assert!(coordinator.on_generic_motion_event(&wheel(1.0)));
        assert_eq!(map.cancels(), vec![vec!["OwnerTwo".to_string()]]);

        map.clear();
        coordinator.remove_protected_animation_owner("OwnerTwo");
        assert!(coordinator.on_generic_motion_event(&wheel(1.0)));
        assert_eq!(map.cancels(), vec![Vec::<String>::new()]);
    }

    #[test]
    fn settings_update_thresholds() {
        let (_map, mut coordinator) = setup(GesturesSettings::default().with_pixel_ratio(2.0));
        assert_eq!(coordinator.detectors().thresholds().touch_slop, 16.0);

        coordinator.update_settings(|settings| settings.set_double_tap_slop(12.0));
        assert_eq!(coordinator.detectors().thresholds().double_tap_slop, 12.0);
        assert_eq!(coordinator.settings().double_tap_slop(), 12.0);
    }

    #[test]
    fn noise_bands() {
        assert!(is_rotation_noise(0.03, 100.0));
        assert!(!is_rotation_noise(0.05, 1.0));
        assert!(is_rotation_noise(0.08, 4.0));
        assert!(!is_rotation_noise(0.08, 5.0));
        assert!(is_rotation_noise(0.2, 6.9));
        assert!(is_rotation_noise(0.6, 14.0));
        assert!(!is_rotation_noise(2.5, 10000.0));
    }
}
