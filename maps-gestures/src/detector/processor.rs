use std::time::Duration;

use ahash::AHashMap;
use maps_gestures_types::{ScreenCoordinate, ScreenVector};

use crate::detector::event::{MotionAction, MotionEvent, PointerId};
use crate::detector::gesture::{
    GestureContext, MoveGesture, RotateGesture, ScaleGesture, ShoveGesture,
};
use crate::detector::state::{DetectorState, DetectorStates};
use crate::detector::GestureKind;

/// Maximum time between the first tap up and the second tap down of a double tap.
pub const DOUBLE_TAP_TIMEOUT: Duration = Duration::from_millis(300);
/// Minimum time a pointer must stay down without moving to produce a long click.
pub const LONG_PRESS_TIMEOUT: Duration = Duration::from_millis(500);
/// Maximum duration of a two-finger tap.
pub const TWO_FINGER_TAP_TIMEOUT: Duration = Duration::from_millis(300);
/// Velocity measured before a pause longer than this is not used for flings.
const VELOCITY_TIMEOUT: Duration = Duration::from_millis(100);

/// Default rotation in degrees needed to begin a rotate gesture.
pub const DEFAULT_ROTATE_ANGLE_THRESHOLD: f64 = 3.0;
/// Rotation threshold while a pinch zoom is in progress.
pub const ROTATE_ANGLE_THRESHOLD_WHEN_SCALING: f64 = 25.0;
/// Default span change in pixels needed to begin a scale gesture.
pub const DEFAULT_SCALE_SPAN_THRESHOLD: f64 = 8.0;
/// Span change threshold while a rotation is in progress.
pub const SCALE_SPAN_THRESHOLD_WHEN_ROTATING: f64 = 36.0;
/// Maximum angle in degrees between the line connecting the fingers and the horizon for a
/// vertical drag to be recognized as shove.
pub const MAX_SHOVE_ANGLE: f64 = 45.0;

const DEFAULT_TOUCH_SLOP: f64 = 8.0;
const DEFAULT_SHOVE_PIXEL_THRESHOLD: f64 = 10.0;
const DEFAULT_MIN_FLING_VELOCITY: f64 = 50.0;
const QUICK_ZOOM_BASE_SPAN: f64 = 100.0;

/// Distances the detectors use to tell gestures from noise. All distances are in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DetectorThresholds {
    /// Movement of the focal point before a touch is no longer a tap.
    pub touch_slop: f64,
    /// Change of the span since the pointers went down needed to begin scaling.
    pub scale_span: f64,
    /// Rotation in degrees since the pointers went down needed to begin rotating.
    pub rotate_angle: f64,
    /// Vertical movement needed to begin a shove.
    pub shove_pixel: f64,
    /// See [`MAX_SHOVE_ANGLE`].
    pub max_shove_angle: f64,
    /// Maximum distance between the two taps of a double tap.
    pub double_tap_slop: f64,
    /// Slower releases do not produce a fling, in pixels per second.
    pub min_fling_velocity: f64,
}

impl Default for DetectorThresholds {
    fn default() -> Self {
        Self::for_pixel_ratio(1.0)
    }
}

impl DetectorThresholds {
    /// Default thresholds for a screen with the given pixel ratio.
    pub fn for_pixel_ratio(pixel_ratio: f64) -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP * pixel_ratio,
            scale_span: DEFAULT_SCALE_SPAN_THRESHOLD * pixel_ratio,
            rotate_angle: DEFAULT_ROTATE_ANGLE_THRESHOLD,
            shove_pixel: DEFAULT_SHOVE_PIXEL_THRESHOLD * pixel_ratio,
            max_shove_angle: MAX_SHOVE_ANGLE,
            double_tap_slop: 100.0 * pixel_ratio,
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY * pixel_ratio,
        }
    }
}

/// Output of the [`GestureDetectors`].
///
/// `*Begin` events are candidates: the detectors emit them every event while the gesture is
/// idle and its threshold is exceeded, until the consumer accepts one by calling
/// [`DetectorStates::begin`].
#[derive(Debug, Clone, PartialEq)]
pub enum DetectorEvent {
    /// Pan candidate.
    MoveBegin(MoveGesture),
    /// Pan update. `distance` is the movement of the focal point, negated.
    Move {
        /// Gesture state.
        gesture: MoveGesture,
        /// Previous focal point minus the current one.
        distance: ScreenVector,
    },
    /// End of a pan.
    MoveEnd {
        /// Gesture state.
        gesture: MoveGesture,
        /// Velocity of the focal point in pixels per second.
        velocity: ScreenVector,
    },
    /// Pinch or quick zoom candidate.
    ScaleBegin(ScaleGesture),
    /// Pinch or quick zoom update.
    Scale(ScaleGesture),
    /// End of a pinch or quick zoom.
    ScaleEnd {
        /// Gesture state.
        gesture: ScaleGesture,
        /// Velocity of the focal point in pixels per second.
        velocity: ScreenVector,
    },
    /// Rotation candidate.
    RotateBegin(RotateGesture),
    /// Rotation update.
    Rotate(RotateGesture),
    /// End of a rotation.
    RotateEnd {
        /// Gesture state.
        gesture: RotateGesture,
        /// Velocity of the focal point in pixels per second.
        velocity: ScreenVector,
        /// Rotation speed in degrees per second.
        angular_velocity: f64,
    },
    /// Shove candidate.
    ShoveBegin(ShoveGesture),
    /// Shove update.
    Shove(ShoveGesture),
    /// End of a shove.
    ShoveEnd(ShoveGesture),
    /// The last pointer was released while moving.
    Fling {
        /// Position of the release.
        position: ScreenCoordinate,
        /// Velocity of the pointer in pixels per second.
        velocity: ScreenVector,
    },
    /// Down and up of the second tap of a double tap. Also emitted for the up of a quick zoom.
    DoubleTap(MotionEvent),
    /// A single pointer was released without moving.
    SingleTapUp,
    /// Short tap.
    Click(ScreenCoordinate),
    /// Tap held for at least [`LONG_PRESS_TIMEOUT`].
    LongClick(ScreenCoordinate),
    /// Two pointers were put down and released without moving.
    TwoFingerTap(ScreenCoordinate),
}

#[derive(Debug, Copy, Clone)]
struct Measurement {
    focal: ScreenCoordinate,
    span: f64,
    angle: f64,
}

impl Measurement {
    fn empty() -> Self {
        Self {
            focal: ScreenCoordinate::origin(),
            span: 0.0,
            angle: 0.0,
        }
    }

    fn of(positions: &[ScreenCoordinate]) -> Option<Self> {
        if positions.is_empty() {
            return None;
        }

        let count = positions.len() as f64;
        let sum = positions
            .iter()
            .fold(ScreenVector::zeros(), |sum, p| sum + p.coords);
        let focal = ScreenCoordinate::from(sum / count);

        let (dev_x, dev_y) = positions.iter().fold((0.0, 0.0), |(dx, dy), p| {
            (dx + (p.x - focal.x).abs(), dy + (p.y - focal.y).abs())
        });
        let span = (2.0 * dev_x / count).hypot(2.0 * dev_y / count);

        let angle = match positions {
            [first, second, ..] => (second.y - first.y).atan2(second.x - first.x).to_degrees(),
            _ => 0.0,
        };

        Some(Self { focal, span, angle })
    }
}

#[derive(Debug, Copy, Clone)]
struct TouchSequence {
    down_position: ScreenCoordinate,
    down_time: Duration,
    max_pointers: usize,
    beyond_slop: bool,
    double_tap_anchor: Option<ScreenCoordinate>,
}

#[derive(Debug, Default)]
struct LastGestures {
    scale: Option<ScaleGesture>,
    rotate: Option<RotateGesture>,
    shove: Option<ShoveGesture>,
}

/// Turns a stream of [`MotionEvent`]s into gesture events.
///
/// The detectors only measure the pointers. Whether a gesture is allowed to begin is decided by
/// the consumer of the events, which reports the decision back through
/// [`GestureDetectors::states_mut`].
#[derive(Debug)]
pub struct GestureDetectors {
    states: DetectorStates,
    thresholds: DetectorThresholds,
    pointers: AHashMap<PointerId, ScreenCoordinate>,
    sequence: Option<TouchSequence>,
    start: Measurement,
    last: Measurement,
    current_event_time: Duration,
    previous_event_time: Duration,
    last_move_time: Duration,
    velocity: ScreenVector,
    angular_velocity: f64,
    last_tap: Option<(ScreenCoordinate, Duration)>,
    last_gestures: LastGestures,
}

impl Default for GestureDetectors {
    fn default() -> Self {
        Self::new(DetectorThresholds::default())
    }
}

impl GestureDetectors {
    /// Creates detectors with the given thresholds.
    pub fn new(thresholds: DetectorThresholds) -> Self {
        Self {
            states: DetectorStates::default(),
            thresholds,
            pointers: AHashMap::new(),
            sequence: None,
            start: Measurement::empty(),
            last: Measurement::empty(),
            current_event_time: Duration::ZERO,
            previous_event_time: Duration::ZERO,
            last_move_time: Duration::ZERO,
            velocity: ScreenVector::zeros(),
            angular_velocity: 0.0,
            last_tap: None,
            last_gestures: LastGestures::default(),
        }
    }

    /// States of the continuous gestures.
    pub fn states(&self) -> &DetectorStates {
        &self.states
    }

    /// States of the continuous gestures.
    pub fn states_mut(&mut self) -> &mut DetectorStates {
        &mut self.states
    }

    /// Current thresholds.
    pub fn thresholds(&self) -> &DetectorThresholds {
        &self.thresholds
    }

    /// Current thresholds.
    pub fn thresholds_mut(&mut self) -> &mut DetectorThresholds {
        &mut self.thresholds
    }

    /// True if the gesture has begun and not yet ended.
    pub fn is_in_progress(&self, kind: GestureKind) -> bool {
        self.states.is_in_progress(kind)
    }

    /// Processes an event and returns the gesture events it produced, in the order they should
    /// be handled.
    pub fn process(&mut self, event: &MotionEvent) -> Vec<DetectorEvent> {
        let mut events = vec![];
        match event.action {
            MotionAction::Down => self.on_down(event, &mut events),
            MotionAction::PointerDown => self.on_pointer_down(event, &mut events),
            MotionAction::Move => self.on_move(event, &mut events),
            MotionAction::PointerUp => self.on_pointer_up(event, &mut events),
            MotionAction::Up => self.on_up(event, &mut events),
            MotionAction::Cancel => self.on_cancel(&mut events),
            MotionAction::Scroll | MotionAction::HoverMove => {}
        }

        log::trace!("{:?} produced {} gesture events", event.action, events.len());
        events
    }

    fn on_down(&mut self, event: &MotionEvent, events: &mut Vec<DetectorEvent>) {
        if self.sequence.is_some() {
            log::debug!("Touch sequence restarted without up event");
            self.on_cancel(events);
        }

        self.states.reset_ended();

        let Some(position) = event.position() else {
            return;
        };

        self.current_event_time = event.event_time;
        self.previous_event_time = event.event_time;
        self.last_move_time = event.event_time;
        self.velocity = ScreenVector::zeros();
        self.angular_velocity = 0.0;
        self.track_pointers(event);
        self.rebaseline(&[position]);

        let double_tap_anchor = match self.last_tap.take() {
            Some((tap_position, tap_time))
                if event.event_time.saturating_sub(tap_time) <= DOUBLE_TAP_TIMEOUT
                    && (tap_position - position).norm() <= self.thresholds.double_tap_slop =>
            {
                events.push(DetectorEvent::DoubleTap(event.clone()));
                Some(position)
            }
            _ => None,
        };

        self.sequence = Some(TouchSequence {
            down_position: position,
            down_time: event.event_time,
            max_pointers: event.pointers.len(),
            beyond_slop: false,
            double_tap_anchor,
        });
    }

    fn on_pointer_down(&mut self, event: &MotionEvent, events: &mut Vec<DetectorEvent>) {
        let Some(sequence) = self.sequence.as_mut() else {
            return;
        };

        sequence.max_pointers = sequence.max_pointers.max(event.pointers.len());
        let quick_zoom = sequence.double_tap_anchor.take().is_some();

        self.advance_time(event.event_time);
        if quick_zoom {
            let velocity = ScreenVector::zeros();
            self.end_gestures(&[GestureKind::Scale], velocity, events);
        }

        self.track_pointers(event);
        let positions: Vec<_> = event.pointers.iter().map(|p| p.position).collect();
        self.rebaseline(&positions);
    }

    fn on_move(&mut self, event: &MotionEvent, events: &mut Vec<DetectorEvent>) {
        if self.sequence.is_none() {
            return;
        }

        let positions: Vec<_> = event.pointers.iter().map(|p| p.position).collect();
        let Some(measurement) = Measurement::of(&positions) else {
            return;
        };

        self.advance_time(event.event_time);
        self.last_move_time = event.event_time;

        let dt = self.current_event_time.as_secs_f64() - self.previous_event_time.as_secs_f64();
        if dt > 0.0 {
            self.velocity = (measurement.focal - self.last.focal) / dt;
            self.angular_velocity = angle_delta(measurement.angle, self.last.angle) / dt;
        }

        let beyond_slop = (measurement.focal - self.start.focal).norm() > self.thresholds.touch_slop;
        let Some(sequence) = self.sequence.as_mut() else {
            return;
        };
        sequence.beyond_slop |= beyond_slop;
        let beyond_slop = sequence.beyond_slop;
        let double_tap_anchor = sequence.double_tap_anchor;

        let count = positions.len();
        match double_tap_anchor {
            Some(anchor) if count == 1 => {
                if beyond_slop {
                    self.detect_quick_zoom(anchor, measurement, events);
                }
            }
            _ => {
                self.detect_move(count, measurement, beyond_slop, events);
                if count >= 2 {
                    self.detect_scale(count, measurement, events);
                    self.detect_rotate(count, measurement, events);
                    self.detect_shove(event, measurement, events);
                }
            }
        }

        self.last = measurement;
        self.track_pointers(event);
    }

    fn on_pointer_up(&mut self, event: &MotionEvent, events: &mut Vec<DetectorEvent>) {
        let Some(sequence) = self.sequence else {
            return;
        };

        self.advance_time(event.event_time);

        let remaining: Vec<_> = event.remaining_pointers().map(|p| p.position).collect();
        if remaining.len() < 2 {
            let velocity = self.release_velocity(event.event_time);
            self.end_gestures(
                &[GestureKind::Scale, GestureKind::Rotate, GestureKind::Shove],
                velocity,
                events,
            );
        }

        let is_two_finger_tap = sequence.max_pointers == 2
            && event.pointers.len() == 2
            && !sequence.beyond_slop
            && !self.had_multi_touch_gesture()
            && event.event_time.saturating_sub(sequence.down_time) <= TWO_FINGER_TAP_TIMEOUT;
        if is_two_finger_tap {
            let positions: Vec<_> = event.pointers.iter().map(|p| p.position).collect();
            if let Some(measurement) = Measurement::of(&positions) {
                events.push(DetectorEvent::TwoFingerTap(measurement.focal));
            }
        }

        if let Some(lifted) = event.pointers.get(event.action_index) {
            self.pointers.remove(&lifted.id);
        }
        self.rebaseline(&remaining);
    }

    fn on_up(&mut self, event: &MotionEvent, events: &mut Vec<DetectorEvent>) {
        let Some(sequence) = self.sequence.take() else {
            return;
        };

        self.advance_time(event.event_time);

        let position = event
            .pointers
            .get(event.action_index)
            .or(event.pointers.first())
            .map(|p| p.position)
            .unwrap_or(self.last.focal);
        let velocity = self.release_velocity(event.event_time);
        let multi_touch = self.had_multi_touch_gesture();

        self.end_gestures(
            &[
                GestureKind::Scale,
                GestureKind::Rotate,
                GestureKind::Shove,
                GestureKind::Move,
            ],
            velocity,
            events,
        );

        if sequence.double_tap_anchor.is_some() {
            events.push(DetectorEvent::DoubleTap(event.clone()));
        } else if !sequence.beyond_slop {
            if sequence.max_pointers == 1 {
                let held = event.event_time.saturating_sub(sequence.down_time);
                if held >= LONG_PRESS_TIMEOUT {
                    events.push(DetectorEvent::LongClick(sequence.down_position));
                } else {
                    events.push(DetectorEvent::SingleTapUp);
                    events.push(DetectorEvent::Click(position));
                    self.last_tap = Some((position, event.event_time));
                }
            }
        } else if !multi_touch && velocity.norm() >= self.thresholds.min_fling_velocity {
            events.push(DetectorEvent::Fling { position, velocity });
        }

        self.pointers.clear();
        self.last_gestures = LastGestures::default();
    }

    fn on_cancel(&mut self, events: &mut Vec<DetectorEvent>) {
        self.end_gestures(
            &[
                GestureKind::Scale,
                GestureKind::Rotate,
                GestureKind::Shove,
                GestureKind::Move,
            ],
            ScreenVector::zeros(),
            events,
        );

        self.sequence = None;
        self.last_tap = None;
        self.pointers.clear();
        self.last_gestures = LastGestures::default();
    }

    fn detect_quick_zoom(
        &mut self,
        anchor: ScreenCoordinate,
        measurement: Measurement,
        events: &mut Vec<DetectorEvent>,
    ) {
        let span = quick_zoom_span(anchor, measurement.focal);
        let previous_span = quick_zoom_span(anchor, self.last.focal);
        if span == previous_span {
            return;
        }

        let gesture = ScaleGesture::new(self.context(1, anchor), span, previous_span);
        if self.states.is_in_progress(GestureKind::Scale) {
            self.last_gestures.scale = Some(gesture);
            events.push(DetectorEvent::Scale(gesture));
        } else if self.states.can_begin(GestureKind::Scale) {
            self.last_gestures.scale = Some(gesture);
            events.push(DetectorEvent::ScaleBegin(gesture));
        }
    }

    fn detect_move(
        &mut self,
        count: usize,
        measurement: Measurement,
        beyond_slop: bool,
        events: &mut Vec<DetectorEvent>,
    ) {
        if !self.states.is_enabled(GestureKind::Move) {
            return;
        }

        let gesture = MoveGesture::new(self.context(count, measurement.focal));
        if self.states.is_in_progress(GestureKind::Move) {
            let distance = self.last.focal - measurement.focal;
            if distance != ScreenVector::zeros() {
                events.push(DetectorEvent::Move { gesture, distance });
            }
        } else if beyond_slop && self.states.can_begin(GestureKind::Move) {
            events.push(DetectorEvent::MoveBegin(gesture));
        }
    }

    fn detect_scale(
        &mut self,
        count: usize,
        measurement: Measurement,
        events: &mut Vec<DetectorEvent>,
    ) {
        if !self.states.is_enabled(GestureKind::Scale) || self.last.span <= 0.0 {
            return;
        }

        let gesture = ScaleGesture::new(
            self.context(count, measurement.focal),
            measurement.span,
            self.last.span,
        );

        if self.states.is_in_progress(GestureKind::Scale) {
            if measurement.span != self.last.span {
                self.last_gestures.scale = Some(gesture);
                events.push(DetectorEvent::Scale(gesture));
            }
        } else if (measurement.span - self.start.span).abs() > self.thresholds.scale_span
            && self.states.can_begin(GestureKind::Scale)
        {
            self.last_gestures.scale = Some(gesture);
            events.push(DetectorEvent::ScaleBegin(gesture));
        }
    }

    fn detect_rotate(
        &mut self,
        count: usize,
        measurement: Measurement,
        events: &mut Vec<DetectorEvent>,
    ) {
        if !self.states.is_enabled(GestureKind::Rotate) {
            return;
        }

        let gesture = RotateGesture::new(
            self.context(count, measurement.focal),
            angle_delta(measurement.angle, self.start.angle),
            angle_delta(measurement.angle, self.last.angle),
        );

        if self.states.is_in_progress(GestureKind::Rotate) {
            if gesture.delta_since_last != 0.0 {
                self.last_gestures.rotate = Some(gesture);
                events.push(DetectorEvent::Rotate(gesture));
            }
        } else if gesture.delta_since_start.abs() > self.thresholds.rotate_angle
            && self.states.can_begin(GestureKind::Rotate)
        {
            self.last_gestures.rotate = Some(gesture);
            events.push(DetectorEvent::RotateBegin(gesture));
        }
    }

    fn detect_shove(
        &mut self,
        event: &MotionEvent,
        measurement: Measurement,
        events: &mut Vec<DetectorEvent>,
    ) {
        if !self.states.is_enabled(GestureKind::Shove) {
            return;
        }

        let gesture = ShoveGesture::new(
            self.context(event.pointers.len(), measurement.focal),
            measurement.focal.y - self.start.focal.y,
            measurement.focal.y - self.last.focal.y,
        );

        if self.states.is_in_progress(GestureKind::Shove) {
            if gesture.delta_since_last != 0.0 {
                self.last_gestures.shove = Some(gesture);
                events.push(DetectorEvent::Shove(gesture));
            }
        } else if gesture.delta_since_start.abs() > self.thresholds.shove_pixel
            && self.is_shove_posture(event, measurement)
            && self.states.can_begin(GestureKind::Shove)
        {
            self.last_gestures.shove = Some(gesture);
            events.push(DetectorEvent::ShoveBegin(gesture));
        }
    }

    /// Two pointers side by side, both moving vertically in the same direction.
    fn is_shove_posture(&self, event: &MotionEvent, measurement: Measurement) -> bool {
        let [first, second] = event.pointers.as_slice() else {
            return false;
        };

        let angle = measurement.angle.abs() % 180.0;
        if angle.min(180.0 - angle) > self.thresholds.max_shove_angle {
            return false;
        }

        let offset = measurement.focal - self.start.focal;
        if offset.x.abs() >= offset.y.abs() {
            return false;
        }

        let vertical_move = |id: PointerId, y: f64| {
            self.pointers
                .get(&id)
                .map(|previous| y - previous.y)
                .unwrap_or(0.0)
        };
        let first_dy = vertical_move(first.id, first.position.y);
        let second_dy = vertical_move(second.id, second.position.y);

        first_dy * second_dy > 0.0
    }

    fn end_gestures(
        &mut self,
        kinds: &[GestureKind],
        velocity: ScreenVector,
        events: &mut Vec<DetectorEvent>,
    ) {
        let context = self.context(self.pointers.len(), self.last.focal);
        for kind in kinds {
            if !self.states.is_in_progress(*kind) {
                continue;
            }

            self.states.end(*kind);
            let event = match kind {
                GestureKind::Move => DetectorEvent::MoveEnd {
                    gesture: MoveGesture::new(context),
                    velocity,
                },
                GestureKind::Scale => {
                    let gesture = self
                        .last_gestures
                        .scale
                        .take()
                        .map(|g| ScaleGesture { context, ..g })
                        .unwrap_or(ScaleGesture::new(context, self.last.span, self.last.span));
                    DetectorEvent::ScaleEnd { gesture, velocity }
                }
                GestureKind::Rotate => {
                    let gesture = self
                        .last_gestures
                        .rotate
                        .take()
                        .map(|g| RotateGesture { context, ..g })
                        .unwrap_or(RotateGesture::new(context, 0.0, 0.0));
                    let angular_velocity = if velocity == ScreenVector::zeros() {
                        0.0
                    } else {
                        self.angular_velocity
                    };
                    DetectorEvent::RotateEnd {
                        gesture,
                        velocity,
                        angular_velocity,
                    }
                }
                GestureKind::Shove => {
                    let gesture = self
                        .last_gestures
                        .shove
                        .take()
                        .map(|g| ShoveGesture { context, ..g })
                        .unwrap_or(ShoveGesture::new(context, 0.0, 0.0));
                    DetectorEvent::ShoveEnd(gesture)
                }
            };

            events.push(event);
        }
    }

    fn had_multi_touch_gesture(&self) -> bool {
        [GestureKind::Scale, GestureKind::Rotate, GestureKind::Shove]
            .iter()
            .any(|kind| self.states.state(*kind) != DetectorState::Idle)
    }

    fn release_velocity(&self, release_time: Duration) -> ScreenVector {
        if release_time.saturating_sub(self.last_move_time) > VELOCITY_TIMEOUT {
            ScreenVector::zeros()
        } else {
            self.velocity
        }
    }

    fn context(&self, pointers_count: usize, focal_point: ScreenCoordinate) -> GestureContext {
        GestureContext::new(pointers_count, focal_point)
            .with_event_times(self.current_event_time, self.previous_event_time)
    }

    fn advance_time(&mut self, event_time: Duration) {
        self.previous_event_time = self.current_event_time;
        self.current_event_time = event_time;
    }

    fn track_pointers(&mut self, event: &MotionEvent) {
        for pointer in &event.pointers {
            self.pointers.insert(pointer.id, pointer.position);
        }
    }

    fn rebaseline(&mut self, positions: &[ScreenCoordinate]) {
        if let Some(measurement) = Measurement::of(positions) {
            self.start = measurement;
            self.last = measurement;
        }
    }
}

/// Signed difference between two angles in degrees, in `[-180, 180)`.
fn angle_delta(to: f64, from: f64) -> f64 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

/// Dragging down from the double tap point zooms in, dragging up zooms out.
fn quick_zoom_span(anchor: ScreenCoordinate, position: ScreenCoordinate) -> f64 {
    (QUICK_ZOOM_BASE_SPAN + position.y - anchor.y).max(1.0)
}
