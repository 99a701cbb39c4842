//! Maps Gestures is a touch gesture engine for interactive maps. It recognizes pans, pinches,
//! rotations, tilts, taps and flings from raw pointer events and turns them into camera changes
//! of a map core it does not own.
//!
//! # Quick start
//!
//! The map core implements the [`delegate`] traits. The application creates a
//! [`GestureCoordinator`] with them and feeds it with input events:
//!
//! ```ignore
//! use maps_gestures::{GestureCoordinator, GesturesSettings, MapDelegates};
//!
//! let mut coordinator = GestureCoordinator::new(MapDelegates::from_map(map.clone()))
//!     .with_settings(GesturesSettings::default().with_pixel_ratio(2.0));
//!
//! coordinator.listeners().add_on_map_click_listener(Rc::new(|point: GeoPoint2d| {
//!     log::info!("Clicked at {point:?}");
//!     true
//! }));
//!
//! // for every platform input event
//! coordinator.on_touch_event(&event);
//! ```
//!
//! # Main components
//!
//! * [`detector`] tracks the pointers of a touch sequence and recognizes gestures. It knows
//!   nothing about maps.
//! * [`control`] decides which of the recognized gestures may change the camera, notifies the
//!   listeners and computes the camera changes: zoom steps, bearing, pitch, fling and
//!   deceleration animations.
//! * [`delegate`] is the boundary to the map core: reading the camera, projecting pixels and
//!   starting animations.
//! * [`GesturesSettings`] enables and tunes every gesture. Settings can be changed at any time.
//!
//! Apps built on `winit` can enable the `winit` feature and convert window events with
//! [`WinitInputHandler`](crate::winit::WinitInputHandler).

pub mod animation;
pub mod control;
pub mod delegate;
pub mod detector;
pub mod error;
mod settings;

#[cfg(feature = "winit")]
pub mod winit;

#[cfg(test)]
pub(crate) mod tests;

pub use animation::{AnimationOptions, Interpolator, GESTURES_OWNER};
pub use control::GestureCoordinator;
pub use delegate::MapDelegates;
pub use error::GesturesError;
pub use maps_gestures_types;
pub use settings::{GesturesSettings, ScrollMode};
