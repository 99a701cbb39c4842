//! Camera descriptions exchanged with the map core.

use crate::geo::GeoPoint2d;
use crate::screen::ScreenCoordinate;

/// Insets of the visible map area from the view edges, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeInsets {
    /// Inset from the top edge.
    pub top: f64,
    /// Inset from the left edge.
    pub left: f64,
    /// Inset from the bottom edge.
    pub bottom: f64,
    /// Inset from the right edge.
    pub right: f64,
}

impl EdgeInsets {
    /// Creates new insets.
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// Snapshot of the camera at the moment it was requested.
///
/// The camera delegate is the only owner of the real camera; a snapshot is never written back.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraState {
    center: GeoPoint2d,
    padding: EdgeInsets,
    zoom: f64,
    bearing: f64,
    pitch: f64,
}

impl CameraState {
    /// Creates a new snapshot.
    pub fn new(center: GeoPoint2d, padding: EdgeInsets, zoom: f64, bearing: f64, pitch: f64) -> Self {
        Self {
            center,
            padding,
            zoom,
            bearing,
            pitch,
        }
    }

    /// Geographic point in the center of the (padded) view.
    pub fn center(&self) -> GeoPoint2d {
        self.center
    }

    /// Padding of the view.
    pub fn padding(&self) -> EdgeInsets {
        self.padding
    }

    /// Zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Bearing in degrees, clockwise from north.
    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    /// Pitch in degrees, `0.0` meaning the map is viewed from above.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Returns a copy with the given zoom.
    pub fn with_zoom(&self, zoom: f64) -> Self {
        Self { zoom, ..*self }
    }

    /// Returns a copy with the given bearing.
    pub fn with_bearing(&self, bearing: f64) -> Self {
        Self { bearing, ..*self }
    }

    /// Returns a copy with the given pitch.
    pub fn with_pitch(&self, pitch: f64) -> Self {
        Self { pitch, ..*self }
    }
}

/// Partial camera update. Every `None` field is left untouched by the map core.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraOptions {
    /// New center.
    pub center: Option<GeoPoint2d>,
    /// New padding.
    pub padding: Option<EdgeInsets>,
    /// Screen point that stays in place while zoom, bearing or pitch change.
    pub anchor: Option<ScreenCoordinate>,
    /// New zoom level.
    pub zoom: Option<f64>,
    /// New bearing.
    pub bearing: Option<f64>,
    /// New pitch.
    pub pitch: Option<f64>,
}

impl CameraOptions {
    /// Sets the center.
    pub fn with_center(mut self, center: GeoPoint2d) -> Self {
        self.center = Some(center);
        self
    }

    /// Sets the padding.
    pub fn with_padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Sets the anchor.
    pub fn with_anchor(mut self, anchor: ScreenCoordinate) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Sets the zoom.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Sets the bearing.
    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = Some(bearing);
        self
    }

    /// Sets the pitch.
    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = Some(pitch);
        self
    }

    /// Returns true if the options would not change anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlon;

    #[test]
    fn options_builder() {
        let options = CameraOptions::default()
            .with_zoom(2.0)
            .with_anchor(ScreenCoordinate::new(1.0, 1.0));
        assert_eq!(options.zoom, Some(2.0));
        assert_eq!(options.anchor, Some(ScreenCoordinate::new(1.0, 1.0)));
        assert_eq!(options.bearing, None);
        assert!(!options.is_empty());
        assert!(CameraOptions::default().is_empty());
    }

    #[test]
    fn state_copies() {
        let state = CameraState::new(latlon!(1.0, 2.0), EdgeInsets::default(), 3.0, 4.0, 5.0);
        let pitched = state.with_pitch(10.0);
        assert_eq!(pitched.pitch(), 10.0);
        assert_eq!(pitched.zoom(), 3.0);
        assert_eq!(pitched.center(), latlon!(1.0, 2.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn options_serialize() {
        let options = CameraOptions::default().with_pitch(2.5);
        let json = serde_json::to_string(&options).expect("serialization failed");
        let back: CameraOptions = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(back, options);
    }
}
