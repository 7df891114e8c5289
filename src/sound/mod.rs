//! Sound playback for the end-of-countdown alert.
//!
//! This module provides:
//!
//! - A synthesized alert tone (no audio assets)
//! - A rodio-backed, non-blocking player
//! - The alert trigger that plays a bounded pulse sequence
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │   AlertTrigger   │────▶│   SoundPlayer    │ ← trait
//! │ (detached task)  │     └────────┬─────────┘
//! └──────────────────┘              │
//!                          ┌────────┴─────────┐
//!                          ▼                  ▼
//!                  RodioSoundPlayer    MockSoundPlayer
//! ```

mod alert;
mod error;
mod player;
mod tone;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub use alert::{AlertTrigger, DEFAULT_INTERVAL_MS, DEFAULT_PULSES};
pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use tone::{Tone, DEFAULT_FREQUENCY_HZ, DEFAULT_PULSE_MS, DEFAULT_VOLUME};

/// Trait for sound playback implementations.
///
/// Implementations are shared with the detached alert task, hence the
/// `Send + Sync` bound.
pub trait SoundPlayer: Send + Sync {
    /// Plays a tone without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, tone: &Tone) -> Result<(), SoundError>;

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, tone: &Tone) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, tone)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<Tone>>,
    disabled: AtomicBool,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            play_calls: Mutex::new(Vec::new()),
            disabled: AtomicBool::new(false),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<Tone> {
        self.play_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, tone: &Tone) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        if self.disabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        if let Ok(mut calls) = self.play_calls.lock() {
            calls.push(*tone);
        }
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }
}
