//! Configuration of the gestures engine.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use maps_gestures_types::{FinitePoint, ScreenCoordinate, ScreenVector};

use crate::error::GesturesError;

const DEFAULT_DOUBLE_TAP_SLOP: f64 = 100.0;
pub(crate) const DEFAULT_MAX_PITCH: f64 = 85.0;

/// Axes along which the map can be panned.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScrollMode {
    /// Only horizontal panning.
    Horizontal,
    /// Only vertical panning.
    Vertical,
    /// Free panning.
    #[default]
    HorizontalAndVertical,
}

impl ScrollMode {
    /// Zeroes the component of the vector that is not allowed by the mode.
    pub fn restrict(&self, vector: ScreenVector) -> ScreenVector {
        match self {
            ScrollMode::Horizontal => ScreenVector::new(vector.x, 0.0),
            ScrollMode::Vertical => ScreenVector::new(0.0, vector.y),
            ScrollMode::HorizontalAndVertical => vector,
        }
    }
}

impl Display for ScrollMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScrollMode::Horizontal => "horizontal",
            ScrollMode::Vertical => "vertical",
            ScrollMode::HorizontalAndVertical => "horizontal_and_vertical",
        };
        f.write_str(name)
    }
}

impl FromStr for ScrollMode {
    type Err = GesturesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(ScrollMode::Horizontal),
            "vertical" => Ok(ScrollMode::Vertical),
            "horizontal_and_vertical" => Ok(ScrollMode::HorizontalAndVertical),
            other => Err(GesturesError::UnknownScrollMode(other.to_string())),
        }
    }
}

/// Configuration of a [`GestureCoordinator`](crate::control::GestureCoordinator).
///
/// All gestures are enabled by default. With the `serde` feature the settings can be loaded from
/// any host configuration format; missing fields take their default values.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GesturesSettings {
    rotate_enabled: bool,
    pinch_to_zoom_enabled: bool,
    scroll_enabled: bool,
    simultaneous_rotate_and_pinch_to_zoom_enabled: bool,
    pitch_enabled: bool,
    scroll_mode: ScrollMode,
    double_tap_to_zoom_in_enabled: bool,
    double_touch_to_zoom_out_enabled: bool,
    quick_zoom_enabled: bool,
    focal_point: Option<ScreenCoordinate>,
    pinch_to_zoom_deceleration_enabled: bool,
    rotate_deceleration_enabled: bool,
    scroll_deceleration_enabled: bool,
    increase_rotate_threshold_when_pinching_to_zoom: bool,
    increase_pinch_to_zoom_threshold_when_rotating: bool,
    zoom_animation_amount: f64,
    pinch_scroll_enabled: bool,
    double_tap_slop: f64,
    pixel_ratio: f64,
    max_pitch: f64,
}

impl Default for GesturesSettings {
    fn default() -> Self {
        Self {
            rotate_enabled: true,
            pinch_to_zoom_enabled: true,
            scroll_enabled: true,
            simultaneous_rotate_and_pinch_to_zoom_enabled: true,
            pitch_enabled: true,
            scroll_mode: ScrollMode::HorizontalAndVertical,
            double_tap_to_zoom_in_enabled: true,
            double_touch_to_zoom_out_enabled: true,
            quick_zoom_enabled: true,
            focal_point: None,
            pinch_to_zoom_deceleration_enabled: true,
            rotate_deceleration_enabled: true,
            scroll_deceleration_enabled: true,
            increase_rotate_threshold_when_pinching_to_zoom: true,
            increase_pinch_to_zoom_threshold_when_rotating: true,
            zoom_animation_amount: 1.0,
            pinch_scroll_enabled: true,
            double_tap_slop: DEFAULT_DOUBLE_TAP_SLOP,
            pixel_ratio: 1.0,
            max_pitch: DEFAULT_MAX_PITCH,
        }
    }
}

impl GesturesSettings {
    /// Whether the map can be rotated with two fingers.
    pub fn rotate_enabled(&self) -> bool {
        self.rotate_enabled
    }

    /// Enables or disables rotation.
    pub fn with_rotate_enabled(mut self, enabled: bool) -> Self {
        self.rotate_enabled = enabled;
        self
    }

    /// Enables or disables rotation.
    pub fn set_rotate_enabled(&mut self, enabled: bool) {
        self.rotate_enabled = enabled;
    }

    /// Whether the map can be zoomed with a pinch (and with a mouse wheel).
    pub fn pinch_to_zoom_enabled(&self) -> bool {
        self.pinch_to_zoom_enabled
    }

    /// Enables or disables pinch to zoom.
    pub fn with_pinch_to_zoom_enabled(mut self, enabled: bool) -> Self {
        self.pinch_to_zoom_enabled = enabled;
        self
    }

    /// Enables or disables pinch to zoom.
    pub fn set_pinch_to_zoom_enabled(&mut self, enabled: bool) {
        self.pinch_to_zoom_enabled = enabled;
    }

    /// Whether the map can be panned.
    pub fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    /// Enables or disables panning.
    pub fn with_scroll_enabled(mut self, enabled: bool) -> Self {
        self.scroll_enabled = enabled;
        self
    }

    /// Enables or disables panning.
    pub fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    /// Whether rotation and pinch zoom may change the camera within the same touch sequence.
    ///
    /// When enabled, both are played as animators together. When disabled, whichever of the two
    /// is in progress suppresses the camera changes of the other one.
    pub fn simultaneous_rotate_and_pinch_to_zoom_enabled(&self) -> bool {
        self.simultaneous_rotate_and_pinch_to_zoom_enabled
    }

    /// See [`GesturesSettings::simultaneous_rotate_and_pinch_to_zoom_enabled`].
    pub fn with_simultaneous_rotate_and_pinch_to_zoom_enabled(mut self, enabled: bool) -> Self {
        self.simultaneous_rotate_and_pinch_to_zoom_enabled = enabled;
        self
    }

    /// See [`GesturesSettings::simultaneous_rotate_and_pinch_to_zoom_enabled`].
    pub fn set_simultaneous_rotate_and_pinch_to_zoom_enabled(&mut self, enabled: bool) {
        self.simultaneous_rotate_and_pinch_to_zoom_enabled = enabled;
    }

    /// Whether the map can be tilted with a two-finger vertical drag (shove).
    pub fn pitch_enabled(&self) -> bool {
        self.pitch_enabled
    }

    /// Enables or disables tilting.
    pub fn with_pitch_enabled(mut self, enabled: bool) -> Self {
        self.pitch_enabled = enabled;
        self
    }

    /// Enables or disables tilting.
    pub fn set_pitch_enabled(&mut self, enabled: bool) {
        self.pitch_enabled = enabled;
    }

    /// Axes the map can be panned along.
    pub fn scroll_mode(&self) -> ScrollMode {
        self.scroll_mode
    }

    /// Sets the axes the map can be panned along.
    pub fn with_scroll_mode(mut self, mode: ScrollMode) -> Self {
        self.scroll_mode = mode;
        self
    }

    /// Sets the axes the map can be panned along.
    pub fn set_scroll_mode(&mut self, mode: ScrollMode) {
        self.scroll_mode = mode;
    }

    /// Whether a double tap zooms in.
    pub fn double_tap_to_zoom_in_enabled(&self) -> bool {
        self.double_tap_to_zoom_in_enabled
    }

    /// Enables or disables zooming in with a double tap.
    pub fn with_double_tap_to_zoom_in_enabled(mut self, enabled: bool) -> Self {
        self.double_tap_to_zoom_in_enabled = enabled;
        self
    }

    /// Enables or disables zooming in with a double tap.
    pub fn set_double_tap_to_zoom_in_enabled(&mut self, enabled: bool) {
        self.double_tap_to_zoom_in_enabled = enabled;
    }

    /// Whether a single tap with two fingers zooms out.
    pub fn double_touch_to_zoom_out_enabled(&self) -> bool {
        self.double_touch_to_zoom_out_enabled
    }

    /// Enables or disables zooming out with a two-finger tap.
    pub fn with_double_touch_to_zoom_out_enabled(mut self, enabled: bool) -> Self {
        self.double_touch_to_zoom_out_enabled = enabled;
        self
    }

    /// Enables or disables zooming out with a two-finger tap.
    pub fn set_double_touch_to_zoom_out_enabled(&mut self, enabled: bool) {
        self.double_touch_to_zoom_out_enabled = enabled;
    }

    /// Whether a one-finger drag after a double tap zooms the map.
    pub fn quick_zoom_enabled(&self) -> bool {
        self.quick_zoom_enabled
    }

    /// Enables or disables quick zoom.
    pub fn with_quick_zoom_enabled(mut self, enabled: bool) -> Self {
        self.quick_zoom_enabled = enabled;
        self
    }

    /// Enables or disables quick zoom.
    pub fn set_quick_zoom_enabled(&mut self, enabled: bool) {
        self.quick_zoom_enabled = enabled;
    }

    /// Fixed anchor for zoom and rotation. If not set, the gesture's own focal point is used.
    pub fn focal_point(&self) -> Option<ScreenCoordinate> {
        self.focal_point
    }

    /// Sets the fixed anchor for zoom and rotation.
    pub fn with_focal_point(mut self, focal_point: Option<ScreenCoordinate>) -> Self {
        self.focal_point = focal_point;
        self
    }

    /// Sets the fixed anchor for zoom and rotation.
    pub fn set_focal_point(&mut self, focal_point: Option<ScreenCoordinate>) {
        self.focal_point = focal_point;
    }

    /// Whether the zoom keeps changing for a while after a fast pinch.
    pub fn pinch_to_zoom_deceleration_enabled(&self) -> bool {
        self.pinch_to_zoom_deceleration_enabled
    }

    /// Enables or disables pinch deceleration.
    pub fn with_pinch_to_zoom_deceleration_enabled(mut self, enabled: bool) -> Self {
        self.pinch_to_zoom_deceleration_enabled = enabled;
        self
    }

    /// Enables or disables pinch deceleration.
    pub fn set_pinch_to_zoom_deceleration_enabled(&mut self, enabled: bool) {
        self.pinch_to_zoom_deceleration_enabled = enabled;
    }

    /// Whether the bearing keeps changing for a while after a fast rotation.
    pub fn rotate_deceleration_enabled(&self) -> bool {
        self.rotate_deceleration_enabled
    }

    /// Enables or disables rotation deceleration.
    pub fn with_rotate_deceleration_enabled(mut self, enabled: bool) -> Self {
        self.rotate_deceleration_enabled = enabled;
        self
    }

    /// Enables or disables rotation deceleration.
    pub fn set_rotate_deceleration_enabled(&mut self, enabled: bool) {
        self.rotate_deceleration_enabled = enabled;
    }

    /// Whether a fast pan is continued with a fling.
    pub fn scroll_deceleration_enabled(&self) -> bool {
        self.scroll_deceleration_enabled
    }

    /// Enables or disables flings.
    pub fn with_scroll_deceleration_enabled(mut self, enabled: bool) -> Self {
        self.scroll_deceleration_enabled = enabled;
        self
    }

    /// Enables or disables flings.
    pub fn set_scroll_deceleration_enabled(&mut self, enabled: bool) {
        self.scroll_deceleration_enabled = enabled;
    }

    /// Whether a started pinch makes rotation harder to trigger.
    pub fn increase_rotate_threshold_when_pinching_to_zoom(&self) -> bool {
        self.increase_rotate_threshold_when_pinching_to_zoom
    }

    /// See [`GesturesSettings::increase_rotate_threshold_when_pinching_to_zoom`].
    pub fn with_increase_rotate_threshold_when_pinching_to_zoom(mut self, enabled: bool) -> Self {
        self.increase_rotate_threshold_when_pinching_to_zoom = enabled;
        self
    }

    /// See [`GesturesSettings::increase_rotate_threshold_when_pinching_to_zoom`].
    pub fn set_increase_rotate_threshold_when_pinching_to_zoom(&mut self, enabled: bool) {
        self.increase_rotate_threshold_when_pinching_to_zoom = enabled;
    }

    /// Whether a started rotation makes pinch zoom harder to trigger.
    pub fn increase_pinch_to_zoom_threshold_when_rotating(&self) -> bool {
        self.increase_pinch_to_zoom_threshold_when_rotating
    }

    /// See [`GesturesSettings::increase_pinch_to_zoom_threshold_when_rotating`].
    pub fn with_increase_pinch_to_zoom_threshold_when_rotating(mut self, enabled: bool) -> Self {
        self.increase_pinch_to_zoom_threshold_when_rotating = enabled;
        self
    }

    /// See [`GesturesSettings::increase_pinch_to_zoom_threshold_when_rotating`].
    pub fn set_increase_pinch_to_zoom_threshold_when_rotating(&mut self, enabled: bool) {
        self.increase_pinch_to_zoom_threshold_when_rotating = enabled;
    }

    /// Number of zoom levels added by a double tap or removed by a two-finger tap.
    pub fn zoom_animation_amount(&self) -> f64 {
        self.zoom_animation_amount
    }

    /// Sets the number of zoom levels changed by tap gestures.
    pub fn with_zoom_animation_amount(mut self, amount: f64) -> Self {
        self.zoom_animation_amount = amount;
        self
    }

    /// Sets the number of zoom levels changed by tap gestures.
    pub fn set_zoom_animation_amount(&mut self, amount: f64) {
        self.zoom_animation_amount = amount;
    }

    /// Whether the map can be panned with two fingers while pinching.
    pub fn pinch_scroll_enabled(&self) -> bool {
        self.pinch_scroll_enabled
    }

    /// Enables or disables panning with several fingers.
    pub fn with_pinch_scroll_enabled(mut self, enabled: bool) -> Self {
        self.pinch_scroll_enabled = enabled;
        self
    }

    /// Enables or disables panning with several fingers.
    pub fn set_pinch_scroll_enabled(&mut self, enabled: bool) {
        self.pinch_scroll_enabled = enabled;
    }

    /// Maximum distance in pixels along each axis between the two taps of a double tap.
    pub fn double_tap_slop(&self) -> f64 {
        self.double_tap_slop
    }

    /// Sets the maximum distance between the two taps of a double tap.
    pub fn with_double_tap_slop(mut self, slop: f64) -> Self {
        self.double_tap_slop = slop;
        self
    }

    /// Sets the maximum distance between the two taps of a double tap.
    pub fn set_double_tap_slop(&mut self, slop: f64) {
        self.double_tap_slop = slop;
    }

    /// Number of physical pixels per logical pixel of the screen.
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Sets the pixel ratio of the screen.
    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.pixel_ratio = ratio;
        self
    }

    /// Sets the pixel ratio of the screen.
    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }

    /// Maximum pitch in degrees a shove can tilt the map to.
    pub fn max_pitch(&self) -> f64 {
        self.max_pitch
    }

    /// Sets the maximum pitch.
    pub fn with_max_pitch(mut self, pitch: f64) -> Self {
        self.max_pitch = pitch;
        self
    }

    /// Sets the maximum pitch.
    pub fn set_max_pitch(&mut self, pitch: f64) {
        self.max_pitch = pitch;
    }

    /// Checks that numeric settings are usable.
    pub fn validate(&self) -> Result<(), GesturesError> {
        if !(self.zoom_animation_amount.is_finite() && self.zoom_animation_amount > 0.0) {
            return Err(invalid(
                "zoom_animation_amount",
                format!("must be positive, got {}", self.zoom_animation_amount),
            ));
        }

        if !(self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0) {
            return Err(invalid(
                "pixel_ratio",
                format!("must be positive, got {}", self.pixel_ratio),
            ));
        }

        if !(0.0..90.0).contains(&self.max_pitch) {
            return Err(invalid(
                "max_pitch",
                format!("must be in [0, 90), got {}", self.max_pitch),
            ));
        }

        if !(self.double_tap_slop.is_finite() && self.double_tap_slop >= 0.0) {
            return Err(invalid(
                "double_tap_slop",
                format!("must not be negative, got {}", self.double_tap_slop),
            ));
        }

        if let Some(point) = self.focal_point {
            if !point.is_finite() {
                return Err(invalid(
                    "focal_point",
                    format!("must be finite, got ({}, {})", point.x, point.y),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> GesturesError {
    GesturesError::InvalidSetting { name, reason }
}
