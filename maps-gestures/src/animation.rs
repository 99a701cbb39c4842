//! Parameters of camera animations requested by gestures.

use std::time::Duration;

/// Owner tag of every animation started by the gestures engine.
pub const GESTURES_OWNER: &str = "Maps-Gestures";

/// Timing curve of an animation.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Interpolator {
    /// Constant speed.
    #[default]
    Linear,
    /// Starts fast and slows down towards the end. Used for flings.
    Decelerate,
}

/// How a camera change should be animated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationOptions {
    /// Owner of the animation, used to exclude it from cancellation.
    pub owner: Option<String>,
    /// Total duration. Zero means the change is applied on the next frame.
    pub duration: Duration,
    /// Timing curve.
    pub interpolator: Interpolator,
}

impl AnimationOptions {
    /// Options for a change that follows the fingers frame by frame.
    pub fn immediate() -> Self {
        Self::gestures(Duration::ZERO)
    }

    /// Options owned by the gestures engine with the given duration.
    pub fn gestures(duration: Duration) -> Self {
        Self {
            owner: Some(GESTURES_OWNER.to_string()),
            duration,
            interpolator: Interpolator::Linear,
        }
    }

    /// Sets the interpolator.
    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }
}

/// Handle of an animator created by the [`AnimationDelegate`](crate::delegate::AnimationDelegate).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AnimatorId(pub u64);

/// Callback invoked by the animation delegate when an `ease_to` animation finishes.
pub type AnimationEndCallback = Box<dyn FnOnce()>;
