use crate::detector::GestureKind;

/// Lifecycle of a continuous gesture.
///
/// ```text
/// Idle --begin accepted--> Began --update--> Active --end--> Ended --new sequence--> Idle
///   ^                        |                                 |
///   +------begin rejected----+                                 |
///   +--------------------------------------reset---------------+
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum DetectorState {
    /// Gesture is not recognized.
    #[default]
    Idle,
    /// Begin was accepted, no update has been processed yet.
    Began,
    /// At least one update was processed.
    Active,
    /// Gesture finished in the current touch sequence.
    Ended,
}

impl DetectorState {
    /// True if the gesture has begun and not yet ended.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, DetectorState::Began | DetectorState::Active)
    }
}

#[derive(Debug, Copy, Clone)]
struct Detector {
    state: DetectorState,
    enabled: bool,
}

impl Default for Detector {
    fn default() -> Self {
        Self {
            state: DetectorState::Idle,
            enabled: true,
        }
    }
}

/// States and enabled flags of the continuous gesture detectors.
#[derive(Debug, Default, Clone)]
pub struct DetectorStates {
    detectors: [Detector; 4],
}

fn index(kind: GestureKind) -> usize {
    match kind {
        GestureKind::Move => 0,
        GestureKind::Scale => 1,
        GestureKind::Rotate => 2,
        GestureKind::Shove => 3,
    }
}

impl DetectorStates {
    /// Current state of the gesture.
    pub fn state(&self, kind: GestureKind) -> DetectorState {
        self.detectors[index(kind)].state
    }

    /// True if the gesture has begun and not yet ended.
    pub fn is_in_progress(&self, kind: GestureKind) -> bool {
        self.state(kind).is_in_progress()
    }

    /// Whether the detector produces events.
    pub fn is_enabled(&self, kind: GestureKind) -> bool {
        self.detectors[index(kind)].enabled
    }

    /// Enables or disables the detector. A disabled detector stops producing begin and update
    /// events but still ends a gesture that is in progress.
    pub fn set_enabled(&mut self, kind: GestureKind, enabled: bool) {
        self.detectors[index(kind)].enabled = enabled;
    }

    /// True if a begin event of the gesture could be accepted now: the detector is enabled, the
    /// gesture is not in progress, and no gesture exclusive with it is in progress.
    pub fn can_begin(&self, kind: GestureKind) -> bool {
        self.is_enabled(kind)
            && !self.is_in_progress(kind)
            && !kind
                .exclusive_with()
                .iter()
                .any(|other| self.is_in_progress(*other))
    }

    /// Marks the gesture as begun.
    pub fn begin(&mut self, kind: GestureKind) {
        self.detectors[index(kind)].state = DetectorState::Began;
    }

    /// Records an update of the gesture. Has no effect unless the gesture is in progress.
    pub fn update(&mut self, kind: GestureKind) {
        let detector = &mut self.detectors[index(kind)];
        if detector.state.is_in_progress() {
            detector.state = DetectorState::Active;
        }
    }

    /// Marks the gesture as finished. Has no effect unless the gesture is in progress.
    pub fn end(&mut self, kind: GestureKind) {
        let detector = &mut self.detectors[index(kind)];
        if detector.state.is_in_progress() {
            detector.state = DetectorState::Ended;
        }
    }

    /// Returns the gesture to [`DetectorState::Idle`].
    pub fn reset(&mut self, kind: GestureKind) {
        self.detectors[index(kind)].state = DetectorState::Idle;
    }

    /// Returns every finished gesture to [`DetectorState::Idle`]. Called at the start of a touch
    /// sequence.
    pub fn reset_ended(&mut self) {
        for detector in &mut self.detectors {
            if detector.state == DetectorState::Ended {
                detector.state = DetectorState::Idle;
            }
        }
    }
}
