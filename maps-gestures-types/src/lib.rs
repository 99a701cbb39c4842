//! Value types shared between the gestures engine and the map core: screen coordinates, viewport
//! sizes, geographic points and camera descriptions.
//!
//! Nothing in this crate knows how to project or render anything. The types only carry data
//! across the boundary between [`maps-gestures`](https://docs.rs/maps-gestures) and whatever
//! engine owns the camera.

pub mod camera;
pub mod error;
pub mod geo;
pub mod projection;
pub mod screen;
mod size;

pub use camera::{CameraOptions, CameraState, EdgeInsets};
pub use geo::GeoPoint2d;
pub use projection::ProjectionName;
pub use screen::{FinitePoint, ScreenCoordinate, ScreenVector};
pub use size::Size;
