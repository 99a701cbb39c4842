//! Conversion of `winit` window events into [`MotionEvent`]s.

use std::time::Duration;

use maps_gestures_types::{ScreenCoordinate, ScreenVector};
use web_time::Instant;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};

use crate::control::GestureCoordinator;
use crate::detector::{Buttons, InputSource, MotionAction, MotionEvent, Pointer, PointerId};

/// Pixels of a touchpad scroll that count as one wheel line.
const PIXELS_PER_LINE: f64 = 114.0;

/// Pointer id used for the mouse cursor. Touch ids come from the platform and are small.
const MOUSE_POINTER_ID: PointerId = u64::MAX;

/// Keeps track of the pointers of a window and converts its events into [`MotionEvent`]s.
///
/// ```ignore
/// if let Event::WindowEvent { event, .. } = &event {
///     input_handler.handle(event, &mut coordinator);
/// }
/// ```
#[derive(Debug)]
pub struct WinitInputHandler {
    start: Instant,
    touches: Vec<Pointer>,
    cursor: Option<ScreenCoordinate>,
    buttons: Buttons,
}

impl Default for WinitInputHandler {
    fn default() -> Self {
        Self {
            start: Instant::now(),
            touches: vec![],
            cursor: None,
            buttons: Buttons::default(),
        }
    }
}

impl WinitInputHandler {
    /// Converts the event and gives it to the coordinator. Returns `true` if the coordinator used
    /// the event.
    pub fn handle(&mut self, winit_event: &WindowEvent, coordinator: &mut GestureCoordinator) -> bool {
        match self.process_user_input(winit_event) {
            Some(event) if event.action == MotionAction::Scroll => {
                coordinator.on_generic_motion_event(&event)
            }
            Some(event) => coordinator.on_touch_event(&event),
            None => false,
        }
    }

    /// Converts the event. Returns `None` for events that do not concern pointers.
    pub fn process_user_input(&mut self, winit_event: &WindowEvent) -> Option<MotionEvent> {
        let time = self.start.elapsed();
        match winit_event {
            WindowEvent::Touch(touch) => self.touch(
                touch.id,
                touch.phase,
                ScreenCoordinate::new(touch.location.x, touch.location.y),
                time,
            ),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(ScreenCoordinate::new(position.x, position.y), time)
            }
            WindowEvent::CursorLeft { .. } => self.cursor_left(time),
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_input(*button, *state == ElementState::Pressed, time)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, dy) => *dy as f64,
                    MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_LINE,
                };
                self.wheel(lines, time)
            }
            _ => None,
        }
    }

    fn touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        position: ScreenCoordinate,
        time: Duration,
    ) -> Option<MotionEvent> {
        match phase {
            TouchPhase::Started => {
                self.touches.retain(|pointer| pointer.id != id);
                self.touches.push(Pointer::new(id, position));
                let action = if self.touches.len() == 1 {
                    MotionAction::Down
                } else {
                    MotionAction::PointerDown
                };
                Some(self.touch_event(action, self.touches.len() - 1, time))
            }
            TouchPhase::Moved => {
                let pointer = self.touches.iter_mut().find(|pointer| pointer.id == id)?;
                pointer.position = position;
                Some(self.touch_event(MotionAction::Move, 0, time))
            }
            TouchPhase::Ended => {
                let index = self.touches.iter().position(|pointer| pointer.id == id)?;
                self.touches[index].position = position;
                let action = if self.touches.len() == 1 {
                    MotionAction::Up
                } else {
                    MotionAction::PointerUp
                };
                let event = self.touch_event(action, index, time);
                self.touches.remove(index);
                Some(event)
            }
            TouchPhase::Cancelled => {
                if self.touches.is_empty() {
                    return None;
                }

                let event = self.touch_event(MotionAction::Cancel, 0, time);
                self.touches.clear();
                Some(event)
            }
        }
    }

    fn touch_event(&self, action: MotionAction, action_index: usize, time: Duration) -> MotionEvent {
        MotionEvent::new(action, time, self.touches.clone()).with_action_index(action_index)
    }

    fn cursor_moved(&mut self, position: ScreenCoordinate, time: Duration) -> Option<MotionEvent> {
        self.cursor = Some(position);
        let action = if self.buttons.primary {
            MotionAction::Move
        } else {
            MotionAction::HoverMove
        };
        self.mouse_event(action, time)
    }

    fn cursor_left(&mut self, time: Duration) -> Option<MotionEvent> {
        let event = if self.buttons.primary {
            self.mouse_event(MotionAction::Cancel, time)
        } else {
            None
        };

        self.buttons = Buttons::default();
        self.cursor = None;
        event
    }

    fn mouse_input(&mut self, button: MouseButton, pressed: bool, time: Duration) -> Option<MotionEvent> {
        match button {
            MouseButton::Left => {
                if self.buttons.primary == pressed {
                    return None;
                }

                self.buttons.primary = pressed;
                let action = if pressed {
                    MotionAction::Down
                } else {
                    MotionAction::Up
                };
                self.mouse_event(action, time)
            }
            MouseButton::Right => {
                self.buttons.secondary = pressed;
                None
            }
            MouseButton::Middle => {
                self.buttons.tertiary = pressed;
                None
            }
            _ => None,
        }
    }

    fn wheel(&mut self, lines: f64, time: Duration) -> Option<MotionEvent> {
        if lines.abs() < 0.0001 {
            return None;
        }

        self.mouse_event(MotionAction::Scroll, time)
            .map(|event| event.with_scroll(ScreenVector::new(0.0, lines)))
    }

    fn mouse_event(&self, action: MotionAction, time: Duration) -> Option<MotionEvent> {
        let position = self.cursor?;
        Some(
            MotionEvent::new(action, time, vec![Pointer::new(MOUSE_POINTER_ID, position)])
                .with_source(InputSource::Mouse)
                .with_buttons(self.buttons),
        )
    }
}
