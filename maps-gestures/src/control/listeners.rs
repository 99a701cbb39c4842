use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use maps_gestures_types::GeoPoint2d;

use crate::detector::{MoveGesture, RotateGesture, ScaleGesture, ShoveGesture};

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Handle of a registered listener, used to remove it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Observer of pan gestures.
pub trait OnMoveListener {
    /// Pan started.
    fn on_move_begin(&self, _gesture: &MoveGesture) {}

    /// Pan update. Returning `true` consumes the update: the camera is not moved and no further
    /// listeners are called.
    fn on_move(&self, gesture: &MoveGesture) -> bool;

    /// Pan finished.
    fn on_move_end(&self, _gesture: &MoveGesture) {}
}

/// Observer of rotation gestures.
pub trait OnRotateListener {
    /// Rotation started.
    fn on_rotate_begin(&self, _gesture: &RotateGesture) {}

    /// Rotation update.
    fn on_rotate(&self, gesture: &RotateGesture);

    /// Rotation finished.
    fn on_rotate_end(&self, _gesture: &RotateGesture) {}
}

/// Observer of pinch and quick zoom gestures.
pub trait OnScaleListener {
    /// Zoom started.
    fn on_scale_begin(&self, _gesture: &ScaleGesture) {}

    /// Zoom update.
    fn on_scale(&self, gesture: &ScaleGesture);

    /// Zoom finished.
    fn on_scale_end(&self, _gesture: &ScaleGesture) {}
}

/// Observer of shove (tilt) gestures.
pub trait OnShoveListener {
    /// Shove started.
    fn on_shove_begin(&self, _gesture: &ShoveGesture) {}

    /// Shove update.
    fn on_shove(&self, gesture: &ShoveGesture);

    /// Shove finished.
    fn on_shove_end(&self, _gesture: &ShoveGesture) {}
}

/// Observer of flings.
pub trait OnFlingListener {
    /// A fling was recognized.
    fn on_fling(&self);
}

impl<T: Fn()> OnFlingListener for T {
    fn on_fling(&self) {
        self()
    }
}

/// Observer of map clicks.
pub trait OnMapClickListener {
    /// The map was clicked at the given point. Returning `true` stops propagation to the
    /// following listeners.
    fn on_map_click(&self, point: GeoPoint2d) -> bool;
}

impl<T: Fn(GeoPoint2d) -> bool> OnMapClickListener for T {
    fn on_map_click(&self, point: GeoPoint2d) -> bool {
        self(point)
    }
}

/// Observer of long map clicks.
pub trait OnMapLongClickListener {
    /// The map was long-clicked at the given point. Returning `true` stops propagation to the
    /// following listeners.
    fn on_map_long_click(&self, point: GeoPoint2d) -> bool;
}

impl<T: Fn(GeoPoint2d) -> bool> OnMapLongClickListener for T {
    fn on_map_long_click(&self, point: GeoPoint2d) -> bool {
        self(point)
    }
}

/// Ordered list of listeners of one kind.
///
/// Dispatch iterates over a snapshot of the list, so listeners can add or remove listeners
/// (including themselves) while being called. A listener removed during dispatch is not called
/// for the rest of that dispatch; a listener added during dispatch is first called on the next
/// one.
pub struct ListenerRegistry<L: ?Sized> {
    entries: RefCell<Vec<(ListenerId, Rc<L>)>>,
}

impl<L: ?Sized> Default for ListenerRegistry<L> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(vec![]),
        }
    }
}

impl<L: ?Sized> ListenerRegistry<L> {
    /// Adds a listener to the end of the list.
    pub fn add(&self, listener: Rc<L>) -> ListenerId {
        let id = ListenerId::next();
        self.entries.borrow_mut().push((id, listener));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let len = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != len
    }

    /// True if the listener is registered.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.borrow().iter().any(|(entry_id, _)| *entry_id == id)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True if no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Calls `f` for every listener.
    pub fn for_each(&self, mut f: impl FnMut(&L)) {
        for (id, listener) in self.snapshot() {
            if self.contains(id) {
                f(&*listener);
            }
        }
    }

    /// Calls `f` for every listener until one of the calls returns `true`. Returns `true` if the
    /// dispatch was stopped.
    pub fn any(&self, mut f: impl FnMut(&L) -> bool) -> bool {
        for (id, listener) in self.snapshot() {
            if self.contains(id) && f(&*listener) {
                return true;
            }
        }

        false
    }

    fn snapshot(&self) -> Vec<(ListenerId, Rc<L>)> {
        self.entries.borrow().clone()
    }
}

/// All listener lists of a [`GestureCoordinator`](super::GestureCoordinator).
///
/// The struct is a cheap handle: clones share the same lists, so a listener can keep a clone to
/// unregister itself.
#[derive(Clone, Default)]
pub struct GestureListeners {
    moves: Rc<ListenerRegistry<dyn OnMoveListener>>,
    rotates: Rc<ListenerRegistry<dyn OnRotateListener>>,
    scales: Rc<ListenerRegistry<dyn OnScaleListener>>,
    shoves: Rc<ListenerRegistry<dyn OnShoveListener>>,
    flings: Rc<ListenerRegistry<dyn OnFlingListener>>,
    clicks: Rc<ListenerRegistry<dyn OnMapClickListener>>,
    long_clicks: Rc<ListenerRegistry<dyn OnMapLongClickListener>>,
}

impl GestureListeners {
    /// Adds a pan listener.
    pub fn add_on_move_listener(&self, listener: Rc<dyn OnMoveListener>) -> ListenerId {
        self.moves.add(listener)
    }

    /// Removes a pan listener.
    pub fn remove_on_move_listener(&self, id: ListenerId) -> bool {
        self.moves.remove(id)
    }

    /// Adds a rotation listener.
    pub fn add_on_rotate_listener(&self, listener: Rc<dyn OnRotateListener>) -> ListenerId {
        self.rotates.add(listener)
    }

    /// Removes a rotation listener.
    pub fn remove_on_rotate_listener(&self, id: ListenerId) -> bool {
        self.rotates.remove(id)
    }

    /// Adds a zoom listener.
    pub fn add_on_scale_listener(&self, listener: Rc<dyn OnScaleListener>) -> ListenerId {
        self.scales.add(listener)
    }

    /// Removes a zoom listener.
    pub fn remove_on_scale_listener(&self, id: ListenerId) -> bool {
        self.scales.remove(id)
    }

    /// Adds a shove listener.
    pub fn add_on_shove_listener(&self, listener: Rc<dyn OnShoveListener>) -> ListenerId {
        self.shoves.add(listener)
    }

    /// Removes a shove listener.
    pub fn remove_on_shove_listener(&self, id: ListenerId) -> bool {
        self.shoves.remove(id)
    }

    /// Adds a fling listener.
    pub fn add_on_fling_listener(&self, listener: Rc<dyn OnFlingListener>) -> ListenerId {
        self.flings.add(listener)
    }

    /// Removes a fling listener.
    pub fn remove_on_fling_listener(&self, id: ListenerId) -> bool {
        self.flings.remove(id)
    }

    /// Adds a click listener.
    pub fn add_on_map_click_listener(&self, listener: Rc<dyn OnMapClickListener>) -> ListenerId {
        self.clicks.add(listener)
    }

    /// Removes a click listener.
    pub fn remove_on_map_click_listener(&self, id: ListenerId) -> bool {
        self.clicks.remove(id)
    }

    /// Adds a long click listener.
    pub fn add_on_map_long_click_listener(
        &self,
        listener: Rc<dyn OnMapLongClickListener>,
    ) -> ListenerId {
        self.long_clicks.add(listener)
    }

    /// Removes a long click listener.
    pub fn remove_on_map_long_click_listener(&self, id: ListenerId) -> bool {
        self.long_clicks.remove(id)
    }

    pub(crate) fn moves(&self) -> &ListenerRegistry<dyn OnMoveListener> {
        &self.moves
    }

    pub(crate) fn rotates(&self) -> &ListenerRegistry<dyn OnRotateListener> {
        &self.rotates
    }

    pub(crate) fn scales(&self) -> &ListenerRegistry<dyn OnScaleListener> {
        &self.scales
    }

    pub(crate) fn shoves(&self) -> &ListenerRegistry<dyn OnShoveListener> {
        &self.shoves
    }

    pub(crate) fn flings(&self) -> &ListenerRegistry<dyn OnFlingListener> {
        &self.flings
    }

    pub(crate) fn clicks(&self) -> &ListenerRegistry<dyn OnMapClickListener> {
        &self.clicks
    }

    pub(crate) fn long_clicks(&self) -> &ListenerRegistry<dyn OnMapLongClickListener> {
        &self.long_clicks
    }
}
