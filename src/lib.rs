//! Segment Timer Library
//!
//! This library provides the core functionality for a full-screen
//! seven-segment countdown timer.
//! It includes:
//! - Countdown engine with a drift-free, deadline-based state machine
//! - Frame driver that ticks the engine once per display frame
//! - Display formatting (digits, blink phases, progress)
//! - Keyboard command decoding and dispatch
//! - End-of-countdown alert with synthesized beeps
//! - Terminal UI built on ratatui
//! - Configuration and CLI definitions

pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod input;
pub mod sound;
pub mod types;
pub mod ui;

// Re-export commonly used types for convenience
pub use types::{TimerConfiguration, TimerPhase, TimerState};

pub use engine::{Clock, CountdownEngine, FrameDriver, ManualClock, SystemClock, TimerEvent};

pub use display::{DisplayDigits, FrameView};

pub use input::{Command, CommandDispatcher, Dispatch};

// Re-export sound types
pub use sound::{
    try_create_player, AlertTrigger, MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer,
    Tone,
};

pub use config::{AlertConfig, AppConfig, ConfigError};
