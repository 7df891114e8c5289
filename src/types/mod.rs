//! Core data types for the countdown timer.
//!
//! This module defines the data structures used for:
//! - The countdown phase (state-machine position)
//! - Clamped timer configuration built from raw input
//! - The mutable timer state owned by the countdown engine

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Largest accepted minutes value.
pub const MAX_MINUTES: u32 = 99;

/// Largest accepted seconds value.
pub const MAX_SECONDS: u32 = 59;

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the current phase of the countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Configured but not started (or reset)
    #[default]
    Idle,
    /// Counting down towards the deadline
    Running,
    /// Stopped mid-countdown, remaining time preserved
    Paused,
    /// Countdown reached zero, alert is showing
    Alerting,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Alerting => "alerting",
        }
    }

    /// Returns true if the countdown is actively ticking.
    pub fn is_running(&self) -> bool {
        matches!(self, TimerPhase::Running)
    }

    /// Returns true if the countdown has completed and is alerting.
    pub fn is_alerting(&self) -> bool {
        matches!(self, TimerPhase::Alerting)
    }
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerConfiguration
// ============================================================================

/// A countdown duration expressed as clamped minutes and seconds.
///
/// Values outside `[0, 99]` minutes or `[0, 59]` seconds are clamped on
/// construction, so a configuration never exceeds 99:59. Deserialized
/// values go through the same clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawConfiguration")]
pub struct TimerConfiguration {
    minutes: u32,
    seconds: u32,
}

/// Unclamped wire form of [`TimerConfiguration`].
#[derive(Deserialize)]
struct RawConfiguration {
    #[serde(default)]
    minutes: i64,
    #[serde(default)]
    seconds: i64,
}

impl From<RawConfiguration> for TimerConfiguration {
    fn from(raw: RawConfiguration) -> Self {
        Self::new(raw.minutes, raw.seconds)
    }
}

impl TimerConfiguration {
    /// Creates a configuration, clamping both fields into range.
    pub fn new(minutes: i64, seconds: i64) -> Self {
        Self {
            minutes: minutes.clamp(0, i64::from(MAX_MINUTES)) as u32,
            seconds: seconds.clamp(0, i64::from(MAX_SECONDS)) as u32,
        }
    }

    /// Builds a configuration from raw text input.
    ///
    /// Empty, non-numeric and non-finite text counts as 0. Fractional
    /// values truncate toward zero before clamping.
    ///
    /// ```
    /// use segment_timer::types::TimerConfiguration;
    ///
    /// let config = TimerConfiguration::from_raw("7", "abc");
    /// assert_eq!(config.minutes(), 7);
    /// assert_eq!(config.seconds(), 0);
    /// ```
    pub fn from_raw(minutes: &str, seconds: &str) -> Self {
        Self::new(coerce_numeric(minutes), coerce_numeric(seconds))
    }

    /// Returns the clamped minutes.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns the clamped seconds.
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Returns the total duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        (u64::from(self.minutes) * 60 + u64::from(self.seconds)) * 1000
    }
}

/// Coerces free-form numeric text into an integer, treating garbage as 0.
pub fn coerce_numeric(raw: &str) -> i64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => {
            // Saturating float-to-int cast; clamping happens afterwards.
            value.trunc() as i64
        }
        _ => 0,
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// The mutable countdown state, owned exclusively by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    /// Duration from the last configuration
    pub initial_duration_ms: u64,
    /// Time left; never negative
    pub remaining_ms: u64,
    /// Absolute instant at which the countdown reaches zero (Running only)
    pub deadline: Option<Instant>,
    /// Current phase of the countdown
    pub phase: TimerPhase,
}

impl TimerState {
    /// Creates an idle, zero-length state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the countdown is actively ticking.
    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    /// Returns true if the countdown completed and is alerting.
    pub fn is_alerting(&self) -> bool {
        self.phase.is_alerting()
    }

    /// Returns true if a start request would be refused.
    ///
    /// Used by the control surface to disable its start affordance.
    pub fn cannot_start(&self) -> bool {
        !self.is_running() && self.initial_duration_ms == 0 && self.remaining_ms == 0
    }
}

// ============================================================================
// Tests
// ============================================================================
