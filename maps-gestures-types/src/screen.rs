//! Screen space primitives.

pub use nalgebra::{Point2, Vector2};

/// Position on the screen in pixels from the top-left corner of the map view.
pub type ScreenCoordinate = Point2<f64>;

/// Displacement on the screen in pixels.
pub type ScreenVector = Vector2<f64>;

/// Checks for coordinates that can be safely used in camera calculations.
pub trait FinitePoint {
    /// Returns true if none of the components is `NaN` or infinite.
    fn is_finite(&self) -> bool;
}

impl FinitePoint for ScreenCoordinate {
    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl FinitePoint for ScreenVector {
    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
