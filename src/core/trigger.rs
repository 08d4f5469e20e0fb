// Act 1 -> Act 2 trigger classification and the scroll-in guard.

/// Forward scroll on most devices reports a negative `deltaY`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelVerdict {
    Trigger,
    /// Large enough to be deliberate but in the other direction.
    WrongDirection,
    Ignore,
}

pub fn classify_wheel(delta_y: f64, threshold: f64) -> WheelVerdict {
    if delta_y < -threshold {
        WheelVerdict::Trigger
    } else if delta_y.abs() > threshold {
        WheelVerdict::WrongDirection
    } else {
        WheelVerdict::Ignore
    }
}

/// Page-level keyboard fallback.
pub fn is_trigger_key(key: &str) -> bool {
    matches!(key, "ArrowDown" | "PageDown" | " ")
}

/// Activation keys for the focused center hint.
pub fn is_hint_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

pub const TOUCH_HINT_LABEL: &str = "\"tap to explore\"";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollInPhase {
    #[default]
    Waiting,
    InProgress,
    Done,
}

/// Debounce for the scroll-in animation: only the first trigger starts it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollIn {
    phase: ScrollInPhase,
}

impl ScrollIn {
    pub fn phase(&self) -> ScrollInPhase {
        self.phase
    }

    pub fn accepts_triggers(&self) -> bool {
        self.phase == ScrollInPhase::Waiting
    }

    /// Returns true if this call started the animation.
    pub fn try_begin(&mut self) -> bool {
        if self.phase != ScrollInPhase::Waiting {
            return false;
        }
        self.phase = ScrollInPhase::InProgress;
        true
    }

    /// Returns true on the in-progress -> done edge.
    pub fn complete(&mut self) -> bool {
        if self.phase != ScrollInPhase::InProgress {
            return false;
        }
        self.phase = ScrollInPhase::Done;
        true
    }
}
