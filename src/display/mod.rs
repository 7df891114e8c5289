//! Display formatting for the countdown.
//!
//! Every renderable value is a pure function of the timer state (and, for
//! the alert blink, the wall clock). Nothing here is cached; all of it is
//! cheap enough to recompute every frame.

use crate::types::{TimerPhase, TimerState};

/// Half-period of the idle colon "breathing", in remaining milliseconds.
pub const COLON_BLINK_MS: u64 = 500;

/// Half-period of the alert dimming, in wall-clock milliseconds.
pub const ALERT_BLINK_MS: u64 = 300;

// ============================================================================
// DisplayDigits
// ============================================================================

/// Digits of an `MM:SS.d` readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayDigits {
    pub minutes_tens: u8,
    pub minutes_ones: u8,
    pub seconds_tens: u8,
    pub seconds_ones: u8,
    pub deciseconds: u8,
}

impl DisplayDigits {
    /// Splits remaining milliseconds into display digits.
    ///
    /// ```
    /// use segment_timer::display::DisplayDigits;
    ///
    /// let digits = DisplayDigits::from_ms(599_900);
    /// assert_eq!(digits.minutes(), "09");
    /// assert_eq!(digits.seconds(), "59");
    /// assert_eq!(digits.tenths(), "9");
    /// ```
    pub fn from_ms(remaining_ms: u64) -> Self {
        let deciseconds = (remaining_ms / 100) % 10;
        let total_seconds = remaining_ms / 1000;
        let seconds = total_seconds % 60;
        // Input clamping caps the duration at 99:59.
        let minutes = (total_seconds / 60) % 100;

        Self {
            minutes_tens: (minutes / 10) as u8,
            minutes_ones: (minutes % 10) as u8,
            seconds_tens: (seconds / 10) as u8,
            seconds_ones: (seconds % 10) as u8,
            deciseconds: deciseconds as u8,
        }
    }

    /// Minutes as two zero-padded digits.
    pub fn minutes(&self) -> String {
        format!("{}{}", self.minutes_tens, self.minutes_ones)
    }

    /// Seconds as two zero-padded digits.
    pub fn seconds(&self) -> String {
        format!("{}{}", self.seconds_tens, self.seconds_ones)
    }

    /// Tenths of a second as one digit.
    pub fn tenths(&self) -> String {
        self.deciseconds.to_string()
    }

    /// All five digits in display order.
    pub fn as_array(&self) -> [u8; 5] {
        [
            self.minutes_tens,
            self.minutes_ones,
            self.seconds_tens,
            self.seconds_ones,
            self.deciseconds,
        ]
    }
}

/// Formats remaining milliseconds into display digits.
pub fn format(remaining_ms: u64) -> DisplayDigits {
    DisplayDigits::from_ms(remaining_ms)
}

// ============================================================================
// Derived flags
// ============================================================================

/// Whether the colon between minutes and seconds is lit.
///
/// Always lit while running; otherwise it breathes with the remaining time.
pub fn colon_visible(phase: TimerPhase, remaining_ms: u64) -> bool {
    phase.is_running() || (remaining_ms / COLON_BLINK_MS) % 2 == 0
}

/// Whether the alert dimming is on at the given wall-clock time.
pub fn alert_blink(phase: TimerPhase, wall_clock_ms: u64) -> bool {
    phase.is_alerting() && (wall_clock_ms / ALERT_BLINK_MS) % 2 == 0
}

/// Elapsed share of the configured duration, in `[0, 100]`.
pub fn progress_percent(initial_duration_ms: u64, remaining_ms: u64) -> f64 {
    if initial_duration_ms == 0 {
        return 0.0;
    }
    let elapsed = initial_duration_ms as f64 - remaining_ms as f64;
    (elapsed / initial_duration_ms as f64 * 100.0).clamp(0.0, 100.0)
}

// ============================================================================
// FrameView
// ============================================================================

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub digits: DisplayDigits,
    pub colon_visible: bool,
    pub alert_blink: bool,
    pub progress_percent: f64,
    pub phase: TimerPhase,
    /// Start affordance is disabled (zero-length countdown)
    pub start_disabled: bool,
}

impl FrameView {
    /// Derives the view from the timer state.
    pub fn from_state(state: &TimerState, wall_clock_ms: u64) -> Self {
        Self {
            digits: format(state.remaining_ms),
            colon_visible: colon_visible(state.phase, state.remaining_ms),
            alert_blink: alert_blink(state.phase, wall_clock_ms),
            progress_percent: progress_percent(state.initial_duration_ms, state.remaining_ms),
            phase: state.phase,
            start_disabled: state.cannot_start(),
        }
    }

    /// Progress rounded to a whole percent, for accessibility labels.
    pub fn progress_rounded(&self) -> u8 {
        self.progress_percent.round() as u8
    }
}

// ============================================================================
// Tests
// ============================================================================
