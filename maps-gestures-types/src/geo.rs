//! Geographic coordinates.

use approx::AbsDiffEq;

/// 2d point on the surface of the Earth, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint2d {
    /// Creates a point from latitude and longitude.
    pub fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Map cores return `NaN` coordinates for pixels that cannot be unprojected (for example a
    /// pixel in the sky of a tilted map). Such points must not be fed back into the camera.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl AbsDiffEq for GeoPoint2d {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.lat.abs_diff_eq(&other.lat, epsilon) && self.lon.abs_diff_eq(&other.lon, epsilon)
    }
}

/// Creates a new GeoPoint2d from latitude and longitude values (in degrees).
///
/// ```
/// use maps_gestures_types::latlon;
///
/// let point = latlon!(38.0, 52.0);
/// assert_eq!(point.lat(), 38.0);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        $crate::geo::GeoPoint2d::latlon($lat, $lon)
    };
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn latlon_order() {
        let point = GeoPoint2d::latlon(20.0, 10.0);
        assert_eq!(point.lat(), 20.0);
        assert_eq!(point.lon(), 10.0);
        assert_abs_diff_eq!(point, latlon!(20.0, 10.0));
        assert!(!point.abs_diff_eq(&latlon!(10.0, 20.0), 1e-9));
    }

    #[test]
    fn nan_is_not_finite() {
        assert!(latlon!(0.0, 0.0).is_finite());
        assert!(!latlon!(f64::NAN, 0.0).is_finite());
    }
}
