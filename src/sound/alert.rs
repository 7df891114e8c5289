//! End-of-countdown alert.
//!
//! The trigger plays a bounded sequence of beeps on a detached task. The
//! engine never waits for it and never sees its failures.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::tone::Tone;
use super::SoundPlayer;

/// Default number of pulses per alert.
pub const DEFAULT_PULSES: u32 = 5;

/// Default spacing between pulse starts.
pub const DEFAULT_INTERVAL_MS: u64 = 250;

/// Fires the audible pulse sequence once per completion.
#[derive(Clone)]
pub struct AlertTrigger {
    player: Option<Arc<dyn SoundPlayer>>,
    tone: Tone,
    pulses: u32,
    interval: Duration,
}

impl AlertTrigger {
    /// Creates a trigger.
    ///
    /// `player` is `None` when no audio device is available; firing is then
    /// a no-op.
    pub fn new(
        player: Option<Arc<dyn SoundPlayer>>,
        tone: Tone,
        pulses: u32,
        interval: Duration,
    ) -> Self {
        Self {
            player,
            tone,
            pulses,
            interval,
        }
    }

    /// Creates a trigger that never plays anything.
    pub fn silent() -> Self {
        Self::new(
            None,
            Tone::default(),
            DEFAULT_PULSES,
            Duration::from_millis(DEFAULT_INTERVAL_MS),
        )
    }

    /// Number of pulses in a sequence.
    pub fn pulses(&self) -> u32 {
        self.pulses
    }

    /// Spacing between pulses.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts the pulse sequence on a detached task.
    ///
    /// Must be called from within a tokio runtime. Returns the task handle
    /// when a sequence was actually started; callers are free to drop it.
    pub fn fire(&self) -> Option<JoinHandle<()>> {
        let Some(player) = self.player.clone() else {
            debug!("Alert fired without an audio device, staying silent");
            return None;
        };
        if player.is_disabled() || self.pulses == 0 {
            debug!("Alert sound disabled, skipping");
            return None;
        }

        info!(pulses = self.pulses, "Playing completion alert");

        let tone = self.tone;
        let pulses = self.pulses;
        let interval = self.interval;

        Some(tokio::spawn(async move {
            for pulse in 0..pulses {
                if let Err(e) = player.play(&tone) {
                    debug!(pulse, error = %e, "Alert pulse failed, abandoning sequence");
                    return;
                }
                tokio::time::sleep(interval).await;
            }
        }))
    }
}

impl std::fmt::Debug for AlertTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertTrigger")
            .field("has_player", &self.player.is_some())
            .field("tone", &self.tone)
            .field("pulses", &self.pulses)
            .field("interval", &self.interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::MockSoundPlayer;

    fn trigger_with(mock: &Arc<MockSoundPlayer>) -> AlertTrigger {
        AlertTrigger::new(
            Some(mock.clone() as Arc<dyn SoundPlayer>),
            Tone::default(),
            DEFAULT_PULSES,
            Duration::from_millis(DEFAULT_INTERVAL_MS),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_fire_plays_five_spaced_pulses() {
        let mock = Arc::new(MockSoundPlayer::new());
        let trigger = trigger_with(&mock);

        let handle = trigger.fire().expect("sequence should start");

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(mock.play_count(), 1);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(mock.play_count(), 3);

        handle.await.unwrap();
        assert_eq!(mock.play_count(), 5);
        assert!(mock.get_play_calls().iter().all(|t| *t == Tone::default()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fire_is_detached() {
        let mock = Arc::new(MockSoundPlayer::new());
        let trigger = trigger_with(&mock);

        let start = tokio::time::Instant::now();
        let handle = trigger.fire();

        // Returning from fire() took no virtual time.
        assert_eq!(tokio::time::Instant::now(), start);
        assert!(handle.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_player_is_swallowed() {
        let mock = Arc::new(MockSoundPlayer::new());
        mock.set_should_fail(true);
        let trigger = trigger_with(&mock);

        let handle = trigger.fire().expect("sequence should start");

        assert!(handle.await.is_ok());
        assert_eq!(mock.play_count(), 0);
    }

    #[tokio::test]
    async fn test_silent_trigger_does_nothing() {
        let trigger = AlertTrigger::silent();
        assert!(trigger.fire().is_none());
    }

    #[tokio::test]
    async fn test_disabled_player_skips_sequence() {
        let mock = Arc::new(MockSoundPlayer::new());
        mock.set_disabled(true);
        let trigger = trigger_with(&mock);

        assert!(trigger.fire().is_none());
        assert_eq!(mock.play_count(), 0);
    }
}
