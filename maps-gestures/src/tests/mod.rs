//! Recording delegates and listeners used by the unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use maps_gestures_types::{
    CameraOptions, CameraState, EdgeInsets, GeoPoint2d, ProjectionName, ScreenCoordinate, Size,
};

use crate::animation::{AnimationEndCallback, AnimationOptions, AnimatorId};
use crate::control::{
    GestureCoordinator, OnMoveListener, OnRotateListener, OnScaleListener, OnShoveListener,
};
use crate::delegate::{
    AnimationDelegate, CameraDelegate, MapDelegates, ProjectionDelegate, TransformDelegate,
};
use crate::detector::{MoveGesture, RotateGesture, ScaleGesture, ShoveGesture};
use crate::settings::GesturesSettings;

/// A call made to one of the delegates.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CameraState,
    CoordinateForPixel(ScreenCoordinate),
    PixelForCoordinate(GeoPoint2d),
    CameraForDrag(ScreenCoordinate, ScreenCoordinate),
    SetCamera(CameraOptions),
    Size,
    SetGestureInProgress(bool),
    Projection,
    EaseTo(CameraOptions, AnimationOptions),
    CreateZoomAnimator(f64, ScreenCoordinate),
    CreateBearingAnimator(f64, ScreenCoordinate),
    PlayAnimatorsTogether(Vec<AnimatorId>),
    CancelAllAnimators(Vec<String>),
}

/// Map core stand-in that returns configurable values and records every call.
pub(crate) struct MockMap {
    pub camera: Cell<CameraState>,
    pub size: Cell<Size>,
    pub projection: Cell<Option<ProjectionName>>,
    pub coordinate: Cell<GeoPoint2d>,
    pub pixel: Cell<ScreenCoordinate>,
    pub drag_camera: Cell<CameraOptions>,
    calls: RefCell<Vec<Call>>,
    next_animator: Cell<u64>,
}

impl Default for MockMap {
    fn default() -> Self {
        Self {
            camera: Cell::new(camera(1.0, 0.0, 0.0)),
            size: Cell::new(Size::new(100.0, 100.0)),
            projection: Cell::new(Some(ProjectionName::Mercator)),
            coordinate: Cell::new(GeoPoint2d::latlon(0.0, 0.0)),
            pixel: Cell::new(ScreenCoordinate::new(0.0, 0.0)),
            drag_camera: Cell::new(CameraOptions::default().with_center(GeoPoint2d::latlon(1.0, 1.0))),
            calls: RefCell::new(vec![]),
            next_animator: Cell::new(1),
        }
    }
}

impl MockMap {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Number of recorded calls matching the predicate.
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    /// Every `ease_to` call.
    pub fn eases(&self) -> Vec<(CameraOptions, AnimationOptions)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::EaseTo(camera, options) => Some((*camera, options.clone())),
                _ => None,
            })
            .collect()
    }

    /// Owners passed to every `cancel_all_animators` call.
    pub fn cancels(&self) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::CancelAllAnimators(owners) => Some(owners.clone()),
                _ => None,
            })
            .collect()
    }

    /// True if nothing changed or was asked to change the camera.
    pub fn no_camera_changes(&self) -> bool {
        self.count(|call| {
            matches!(
                call,
                Call::EaseTo(..)
                    | Call::SetCamera(_)
                    | Call::CreateZoomAnimator(..)
                    | Call::CreateBearingAnimator(..)
                    | Call::PlayAnimatorsTogether(_)
            )
        }) == 0
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn animator(&self) -> AnimatorId {
        let id = self.next_animator.get();
        self.next_animator.set(id + 1);
        AnimatorId(id)
    }
}

impl CameraDelegate for MockMap {
    fn camera_state(&self) -> CameraState {
        self.record(Call::CameraState);
        self.camera.get()
    }

    fn coordinate_for_pixel(&self, pixel: ScreenCoordinate) -> GeoPoint2d {
        self.record(Call::CoordinateForPixel(pixel));
        self.coordinate.get()
    }

    fn pixel_for_coordinate(&self, coordinate: GeoPoint2d) -> ScreenCoordinate {
        self.record(Call::PixelForCoordinate(coordinate));
        self.pixel.get()
    }

    fn camera_for_drag(&self, from: ScreenCoordinate, to: ScreenCoordinate) -> CameraOptions {
        self.record(Call::CameraForDrag(from, to));
        self.drag_camera.get()
    }

    fn set_camera(&self, options: CameraOptions) {
        self.record(Call::SetCamera(options));
    }
}

impl TransformDelegate for MockMap {
    fn size(&self) -> Size {
        self.record(Call::Size);
        self.size.get()
    }

    fn set_gesture_in_progress(&self, in_progress: bool) {
        self.record(Call::SetGestureInProgress(in_progress));
    }
}

impl ProjectionDelegate for MockMap {
    fn projection(&self) -> Option<ProjectionName> {
        self.record(Call::Projection);
        self.projection.get()
    }
}

impl AnimationDelegate for MockMap {
    fn ease_to(
        &self,
        camera: CameraOptions,
        options: AnimationOptions,
        _on_end: Option<AnimationEndCallback>,
    ) {
        self.record(Call::EaseTo(camera, options));
    }

    fn create_zoom_animator(
        &self,
        target: f64,
        anchor: ScreenCoordinate,
        _options: AnimationOptions,
    ) -> AnimatorId {
        self.record(Call::CreateZoomAnimator(target, anchor));
        self.animator()
    }

    fn create_bearing_animator(
        &self,
        target: f64,
        anchor: ScreenCoordinate,
        _options: AnimationOptions,
    ) -> AnimatorId {
        self.record(Call::CreateBearingAnimator(target, anchor));
        self.animator()
    }

    fn play_animators_together(&self, animators: &[AnimatorId]) {
        self.record(Call::PlayAnimatorsTogether(animators.to_vec()));
    }

    fn cancel_all_animators(&self, owners_to_exclude: &[String]) {
        self.record(Call::CancelAllAnimators(owners_to_exclude.to_vec()));
    }
}

pub(crate) fn camera(zoom: f64, bearing: f64, pitch: f64) -> CameraState {
    CameraState::new(
        GeoPoint2d::latlon(0.0, 0.0),
        EdgeInsets::default(),
        zoom,
        bearing,
        pitch,
    )
}

/// Mock map together with a coordinator using it.
pub(crate) fn setup(settings: GesturesSettings) -> (Rc<MockMap>, GestureCoordinator) {
    let _ = env_logger::builder().is_test(true).try_init();

    let map = Rc::new(MockMap::default());
    let coordinator =
        GestureCoordinator::new(MapDelegates::from_map(map.clone())).with_settings(settings);
    (map, coordinator)
}

/// Listener of every continuous gesture that counts the callbacks.
#[derive(Default)]
pub(crate) struct CountingListener {
    pub consume_moves: Cell<bool>,
    pub move_begins: Cell<usize>,
    pub moves: Cell<usize>,
    pub move_ends: Cell<usize>,
    pub scale_begins: Cell<usize>,
    pub scales: Cell<usize>,
    pub scale_ends: Cell<usize>,
    pub rotate_begins: Cell<usize>,
    pub rotates: Cell<usize>,
    pub rotate_ends: Cell<usize>,
    pub shove_begins: Cell<usize>,
    pub shoves: Cell<usize>,
    pub shove_ends: Cell<usize>,
}

fn increment(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl OnMoveListener for CountingListener {
    fn on_move_begin(&self, _gesture: &MoveGesture) {
        increment(&self.move_begins);
    }

    fn on_move(&self, _gesture: &MoveGesture) -> bool {
        increment(&self.moves);
        self.consume_moves.get()
    }

    fn on_move_end(&self, _gesture: &MoveGesture) {
        increment(&self.move_ends);
    }
}

impl OnScaleListener for CountingListener {
    fn on_scale_begin(&self, _gesture: &ScaleGesture) {
        increment(&self.scale_begins);
    }

    fn on_scale(&self, _gesture: &ScaleGesture) {
        increment(&self.scales);
    }

    fn on_scale_end(&self, _gesture: &ScaleGesture) {
        increment(&self.scale_ends);
    }
}

impl OnRotateListener for CountingListener {
    fn on_rotate_begin(&self, _gesture: &RotateGesture) {
        increment(&self.rotate_begins);
    }

    fn on_rotate(&self, _gesture: &RotateGesture) {
        increment(&self.rotates);
    }

    fn on_rotate_end(&self, _gesture: &RotateGesture) {
        increment(&self.rotate_ends);
    }
}

impl OnShoveListener for CountingListener {
    fn on_shove_begin(&self, _gesture: &ShoveGesture) {
        increment(&self.shove_begins);
    }

    fn on_shove(&self, _gesture: &ShoveGesture) {
        increment(&self.shoves);
    }

    fn on_shove_end(&self, _gesture: &ShoveGesture) {
        increment(&self.shove_ends);
    }
}
