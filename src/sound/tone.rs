//! The alert tone.

use std::time::Duration;

/// Default pitch of an alert pulse.
pub const DEFAULT_FREQUENCY_HZ: f32 = 1100.0;

/// Default audible length of an alert pulse.
pub const DEFAULT_PULSE_MS: u64 = 180;

/// Default pulse amplitude (0.0 - 1.0).
pub const DEFAULT_VOLUME: f32 = 0.2;

/// Attack ramp at the start of each pulse, to avoid a click.
pub const ATTACK_MS: u64 = 20;

/// A single synthesized beep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub volume: f32,
    pub attack: Duration,
}

impl Tone {
    /// Creates a tone; volume is clamped into `[0, 1]` and frequency kept audible.
    pub fn new(frequency_hz: f32, duration: Duration, volume: f32) -> Self {
        let frequency_hz = if frequency_hz.is_finite() {
            frequency_hz.clamp(20.0, 20_000.0)
        } else {
            DEFAULT_FREQUENCY_HZ
        };
        let volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            DEFAULT_VOLUME
        };
        Self {
            frequency_hz,
            duration,
            volume,
            attack: Duration::from_millis(ATTACK_MS).min(duration),
        }
    }
}

impl Default for Tone {
    fn default() -> Self {
        Self::new(
            DEFAULT_FREQUENCY_HZ,
            Duration::from_millis(DEFAULT_PULSE_MS),
            DEFAULT_VOLUME,
        )
    }
}
