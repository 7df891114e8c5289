//! Sound player implementation using rodio.
//!
//! The rodio output stream is not `Send`, so it lives on a dedicated audio
//! thread for the lifetime of the process. The player only keeps the stream
//! handle, which can be shared with the detached alert task.

use std::sync::{mpsc, Arc};
use std::thread;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::tone::Tone;

/// A sound player that synthesizes tones through rodio.
///
/// Playback is non-blocking; each tone plays on a detached sink.
pub struct RodioSoundPlayer {
    /// Handle to the output stream owned by the audio thread.
    stream_handle: OutputStreamHandle,
    /// Whether sound playback is disabled.
    disabled: bool,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
    ///
    /// # Arguments
    ///
    /// * `disabled` - If true, all sound playback will be silently skipped.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available, or `SoundError::StreamError` if the audio thread
    /// cannot be started.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let stream_handle = spawn_output_stream()?;

        debug!("Audio output stream initialized");

        Ok(Self {
            stream_handle,
            disabled,
        })
    }

    /// Plays a tone.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::StreamError` if the output stream is gone.
    pub fn play(&self, tone: &Tone) -> Result<(), SoundError> {
        if self.disabled {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        let source = SineWave::new(tone.frequency_hz)
            .take_duration(tone.duration)
            .fade_in(tone.attack)
            .amplify(tone.volume);

        sink.append(source);
        sink.detach(); // Non-blocking: tone continues after function returns

        debug!(frequency_hz = tone.frequency_hz, "Tone playback started");
        Ok(())
    }

    /// Returns true if sound playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

/// Opens the default output stream on its own thread and returns its handle.
fn spawn_output_stream() -> Result<OutputStreamHandle, SoundError> {
    let (tx, rx) = mpsc::channel();

    thread::Builder::new()
        .name("audio-output".to_string())
        .spawn(move || match OutputStream::try_default() {
            Ok((stream, handle)) => {
                if tx.send(Ok(handle)).is_err() {
                    return;
                }
                let _stream = stream;
                loop {
                    thread::park();
                }
            }
            Err(e) => {
                let _ = tx.send(Err(SoundError::DeviceNotAvailable(e.to_string())));
            }
        })
        .map_err(|e| SoundError::StreamError(e.to_string()))?;

    rx.recv()
        .map_err(|e| SoundError::StreamError(e.to_string()))?
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player(disabled: bool) -> Option<Arc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new(disabled) {
        Ok(player) => Some(Arc::new(player)),
        Err(e) => {
            warn!("Audio not available, alert will be silent: {} ({})", e, e.suggestion());
            None
        }
    }
}
