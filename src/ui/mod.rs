//! Full-screen terminal front end.
//!
//! - `app`: composition of engine, dispatcher, driver and alert
//! - `render`: ratatui drawing of the seven-segment readout
//! - `terminal`: raw mode / alternate screen lifecycle
//! - `fullscreen`: the fullscreen capability
//!
//! The event loop runs on a single task. Key presses arrive from a reader
//! thread over a channel and are handled in the same `select!` as frame
//! ticks, so a command never races a tick.

pub mod app;
pub mod error;
pub mod fullscreen;
pub mod glyphs;
pub mod render;
pub mod terminal;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

pub use app::App;
pub use error::UiError;
pub use fullscreen::{ChromelessFullscreen, Fullscreen};

use crate::config::AppConfig;
use crate::engine::SystemClock;
use crate::input::Dispatch;
use crate::sound::{try_create_player, AlertTrigger, SoundPlayer};
use terminal::TerminalSession;

/// Repaint cadence while the frame driver is stopped.
pub const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Terminal events forwarded by the reader thread.
#[derive(Debug)]
enum InputEvent {
    Key(KeyEvent),
    Resize,
    Failed(std::io::Error),
}

/// Milliseconds since the Unix epoch, for wall-clock driven blinking.
pub fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Builds the alert trigger for the configuration.
pub fn build_alert(config: &AppConfig) -> AlertTrigger {
    let player = if config.sound {
        try_create_player(false).map(|p| p as Arc<dyn SoundPlayer>)
    } else {
        info!("Sound disabled by configuration");
        None
    };
    AlertTrigger::new(
        player,
        config.alert.tone(),
        config.alert.pulses,
        config.alert.interval(),
    )
}

/// Runs the full-screen timer until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be driven.
pub async fn run(config: AppConfig) -> Result<()> {
    let alert = build_alert(&config);
    let mut app = App::new(SystemClock, ChromelessFullscreen::new(), alert, &config);

    let mut session = TerminalSession::enter().context("Failed to initialize terminal")?;

    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    spawn_input_reader(input_tx).context("Failed to start input reader")?;

    let mut repaint = interval(REPAINT_INTERVAL);
    repaint.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("Timer display started");

    loop {
        session
            .draw(&app.render_context(wall_clock_ms()))
            .context("Failed to draw frame")?;

        tokio::select! {
            () = app.driver_mut().next_frame() => app.on_frame(),
            Some(input) = input_rx.recv() => match input {
                InputEvent::Key(key) => {
                    if app.handle_key(&key) == Dispatch::Quit {
                        break;
                    }
                }
                InputEvent::Resize => {}
                InputEvent::Failed(e) => {
                    return Err(e).context("Failed to read terminal input");
                }
            },
            _ = repaint.tick() => {}
        }
    }

    info!("Timer display closed");
    Ok(())
}

/// Reads terminal events on a blocking thread and forwards them.
fn spawn_input_reader(tx: mpsc::UnboundedSender<InputEvent>) -> std::io::Result<()> {
    thread::Builder::new()
        .name("input-reader".to_string())
        .spawn(move || loop {
            let forwarded = match event::read() {
                Ok(Event::Key(key)) => tx.send(InputEvent::Key(key)),
                Ok(Event::Resize(..)) => tx.send(InputEvent::Resize),
                Ok(_) => continue,
                Err(e) => {
                    warn!("Terminal input failed: {}", e);
                    let _ = tx.send(InputEvent::Failed(e));
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        })?;
    Ok(())
}
