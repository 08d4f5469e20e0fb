// Act 1 media bookkeeping: persisted preferences, per-medium error budgets and
// loader timing. Browser glue lives in `audio.rs` and `act1.rs`.

use crate::constants::{DEFAULT_VOLUME, MAX_ERROR_LOGS};

/// Volume in `[0, 1]` plus mute flag, restored from and written to key-value
/// storage as `"0".."100"` and `"0"`/`"1"`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MediaPrefs {
    pub volume: f64,
    pub muted: bool,
}

impl Default for MediaPrefs {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            muted: false,
        }
    }
}

impl MediaPrefs {
    /// Unparseable or missing entries fall back to the defaults individually.
    pub fn from_stored(volume: Option<&str>, muted: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            volume: volume
                .and_then(parse_volume_percent)
                .unwrap_or(defaults.volume),
            muted: muted.map(|m| m.trim() == "1").unwrap_or(defaults.muted),
        }
    }

    /// Slider value `"0".."100"`.
    pub fn volume_percent(&self) -> String {
        format!("{}", (self.volume.clamp(0.0, 1.0) * 100.0).round() as u32)
    }

    pub fn muted_flag(&self) -> &'static str {
        if self.muted {
            "1"
        } else {
            "0"
        }
    }
}

/// Parses a slider value into `[0, 1]`.
pub fn parse_volume_percent(raw: &str) -> Option<f64> {
    let v: f64 = raw.trim().parse().ok()?;
    if !v.is_finite() {
        return None;
    }
    Some((v / 100.0).clamp(0.0, 1.0))
}

pub fn mute_button_label(muted: bool) -> &'static str {
    if muted {
        "Unmute music"
    } else {
        "Mute music"
    }
}

/// What to do with one more media error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorLog {
    Log,
    /// Budget just ran out: say so once.
    SuppressNotice,
    Silent,
}

/// Caps per-medium error logging so a broken source cannot flood the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorBudget {
    count: u32,
    cap: u32,
}

impl Default for ErrorBudget {
    fn default() -> Self {
        Self::new(MAX_ERROR_LOGS)
    }
}

impl ErrorBudget {
    pub fn new(cap: u32) -> Self {
        Self { count: 0, cap }
    }

    pub fn record(&mut self) -> ErrorLog {
        self.count = self.count.saturating_add(1);
        if self.count <= self.cap {
            ErrorLog::Log
        } else if self.count == self.cap + 1 {
            ErrorLog::SuppressNotice
        } else {
            ErrorLog::Silent
        }
    }

    /// True once more errors arrived than the budget allows.
    pub fn exhausted(&self) -> bool {
        self.count > self.cap
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Milliseconds the loader must still stay up, or `None` if it may hide now.
pub fn loader_remaining_ms(shown_at_ms: f64, now_ms: f64, min_show_ms: f64) -> Option<f64> {
    let elapsed = now_ms - shown_at_ms;
    if elapsed < min_show_ms {
        Some(min_show_ms - elapsed)
    } else {
        None
    }
}

/// Result of the best-effort autoplay ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoplayOutcome {
    WithSound,
    Muted,
    Blocked,
}

impl AutoplayOutcome {
    /// The volume slider only makes sense while something is playing.
    pub fn shows_volume(self) -> bool {
        !matches!(self, AutoplayOutcome::Blocked)
    }
}
