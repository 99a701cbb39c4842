use std::time::Duration;

use maps_gestures_types::{ScreenCoordinate, ScreenVector};

/// Id of a touch pointer. Valid and unique only until the pointer is lifted.
pub type PointerId = u64;

/// A single pointer of a [`MotionEvent`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pointer {
    /// Id of the pointer.
    pub id: PointerId,
    /// Position of the pointer in pixels from the top-left corner of the map view.
    pub position: ScreenCoordinate,
}

impl Pointer {
    /// Creates a new pointer.
    pub fn new(id: PointerId, position: ScreenCoordinate) -> Self {
        Self { id, position }
    }
}

/// What happened in a [`MotionEvent`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MotionAction {
    /// The first pointer touched the screen.
    Down,
    /// An additional pointer touched the screen. The new pointer is at
    /// [`MotionEvent::action_index`].
    PointerDown,
    /// One or more pointers moved.
    Move,
    /// A pointer other than the last one left the screen. The lifted pointer is at
    /// [`MotionEvent::action_index`].
    PointerUp,
    /// The last pointer left the screen.
    Up,
    /// The touch sequence was aborted by the platform.
    Cancel,
    /// Mouse wheel or touchpad scroll. The amount is in [`MotionEvent::scroll`].
    Scroll,
    /// A pointer moved without touching the screen.
    HoverMove,
}

/// Device class the event came from.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Finger on a touch screen.
    #[default]
    Touchscreen,
    /// Mouse.
    Mouse,
    /// Stylus.
    Stylus,
    /// Touchpad.
    Touchpad,
    /// Anything without a screen position: keyboards, joysticks etc.
    Other,
}

impl InputSource {
    /// True for sources that report positions on the screen.
    pub fn is_pointer(&self) -> bool {
        !matches!(self, InputSource::Other)
    }
}

/// Pressed mouse or stylus buttons.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Buttons {
    /// Primary (left) button.
    pub primary: bool,
    /// Secondary (right) button.
    pub secondary: bool,
    /// Tertiary (middle) button.
    pub tertiary: bool,
}

impl Buttons {
    /// Only the secondary button.
    pub const SECONDARY: Buttons = Buttons {
        primary: false,
        secondary: true,
        tertiary: false,
    };

    /// True if nothing but the primary button is pressed.
    ///
    /// Finger touches have no buttons at all; a primary mouse button drag behaves like a finger.
    pub fn is_primary_only(&self) -> bool {
        !self.secondary && !self.tertiary
    }
}

/// Raw input event, modelled after the platform motion events.
///
/// Every event carries the positions of *all* pointers that are on the screen at the moment of
/// the event, including the pointer being lifted in [`MotionAction::PointerUp`] and
/// [`MotionAction::Up`].
#[derive(Debug, Clone, PartialEq)]
pub struct MotionEvent {
    /// Kind of the event.
    pub action: MotionAction,
    /// Index into `pointers` of the pointer that went down or up.
    pub action_index: usize,
    /// All pointers on the screen.
    pub pointers: Vec<Pointer>,
    /// Monotonic time of the event.
    pub event_time: Duration,
    /// Device class.
    pub source: InputSource,
    /// Pressed buttons.
    pub buttons: Buttons,
    /// Scroll amount in lines for [`MotionAction::Scroll`]. Positive `y` scrolls up.
    pub scroll: ScreenVector,
}

impl MotionEvent {
    /// Creates an event with the given pointers.
    pub fn new(action: MotionAction, event_time: Duration, pointers: Vec<Pointer>) -> Self {
        Self {
            action,
            action_index: 0,
            pointers,
            event_time,
            source: InputSource::Touchscreen,
            buttons: Buttons::default(),
            scroll: ScreenVector::zeros(),
        }
    }

    /// Creates an event with a single pointer with id `0`.
    pub fn single(action: MotionAction, event_time: Duration, position: ScreenCoordinate) -> Self {
        Self::new(action, event_time, vec![Pointer::new(0, position)])
    }

    /// Sets the index of the pointer that changed.
    pub fn with_action_index(mut self, index: usize) -> Self {
        self.action_index = index;
        self
    }

    /// Sets the source device class.
    pub fn with_source(mut self, source: InputSource) -> Self {
        self.source = source;
        self
    }

    /// Sets the pressed buttons.
    pub fn with_buttons(mut self, buttons: Buttons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Sets the scroll amount.
    pub fn with_scroll(mut self, scroll: ScreenVector) -> Self {
        self.scroll = scroll;
        self
    }

    /// Position of the first pointer.
    pub fn position(&self) -> Option<ScreenCoordinate> {
        self.pointers.first().map(|p| p.position)
    }

    /// Pointers that stay on the screen after this event.
    pub fn remaining_pointers(&self) -> impl Iterator<Item = &Pointer> {
        let lifted = match self.action {
            MotionAction::PointerUp | MotionAction::Up | MotionAction::Cancel => {
                Some(self.action_index)
            }
            _ => None,
        };

        self.pointers
            .iter()
            .enumerate()
            .filter(move |(index, _)| Some(*index) != lifted)
            .map(|(_, pointer)| pointer)
    }
}
