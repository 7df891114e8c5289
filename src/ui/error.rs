//! UI error types.

use thiserror::Error;

/// Errors raised by the terminal surface and its capabilities.
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal I/O failed (raw mode, alternate screen, drawing).
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The fullscreen capability refused a request.
    #[error("fullscreen unavailable: {0}")]
    Fullscreen(String),
}
