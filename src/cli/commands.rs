//! Command-line definitions for the countdown timer.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ConfigOverrides;

// ============================================================================
// CLI Structure
// ============================================================================

/// Full-screen seven-segment countdown timer
#[derive(Parser, Debug)]
#[command(
    name = "segtimer",
    version,
    about = "Full-screen seven-segment countdown timer",
    long_about = "A full-screen countdown timer for the terminal with large digits.\n\
                  Keys: Space start/pause, R reset, F fullscreen, H hide controls,\n\
                  Tab switch field, Enter apply, Q quit.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Initial minutes (0-99, larger values are clamped)
    #[arg(short, long)]
    pub minutes: Option<u32>,

    /// Initial seconds (0-59, larger values are clamped)
    #[arg(short, long)]
    pub seconds: Option<u32>,

    /// Disable the completion beeps
    #[arg(long)]
    pub no_sound: bool,

    /// Number of completion beeps
    #[arg(long)]
    pub pulses: Option<u32>,

    /// Display refresh rate while running (frames per second)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,

    /// Start with the controls bar hidden
    #[arg(long)]
    pub hide_controls: bool,

    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file (the terminal is used by the display)
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Configuration overrides given on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            minutes: self.minutes,
            seconds: self.seconds,
            no_sound: self.no_sound,
            pulses: self.pulses,
            frame_rate: self.fps,
            hide_controls: self.hide_controls,
        }
    }
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Tests
// ============================================================================
