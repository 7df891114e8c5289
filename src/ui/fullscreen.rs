//! Fullscreen capability.
//!
//! In a terminal the window size belongs to the emulator, so fullscreen
//! means "chromeless": the renderer drops the progress bar, the controls
//! and the borders so the digits take the whole screen.

use tracing::debug;

use super::error::UiError;

/// Something that can enter and leave fullscreen.
pub trait Fullscreen {
    /// Returns true while fullscreen is active.
    fn is_active(&self) -> bool;

    /// Enters fullscreen.
    ///
    /// # Errors
    ///
    /// Returns an error if the capability is unavailable.
    fn enter(&mut self) -> Result<(), UiError>;

    /// Leaves fullscreen.
    ///
    /// # Errors
    ///
    /// Returns an error if the capability is unavailable.
    fn exit(&mut self) -> Result<(), UiError>;
}

/// Chromeless fullscreen for terminal rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromelessFullscreen {
    active: bool,
}

impl ChromelessFullscreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Fullscreen for ChromelessFullscreen {
    fn is_active(&self) -> bool {
        self.active
    }

    fn enter(&mut self) -> Result<(), UiError> {
        self.active = true;
        debug!("Entered chromeless fullscreen");
        Ok(())
    }

    fn exit(&mut self) -> Result<(), UiError> {
        self.active = false;
        debug!("Left chromeless fullscreen");
        Ok(())
    }
}
