//! Terminal lifecycle: raw mode, alternate screen, restoration.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::debug;

use super::error::UiError;
use super::render::{render, RenderContext};

static PANIC_HOOK: Once = Once::new();

/// Owns the terminal for the lifetime of the display and restores it on drop.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    /// Switches the terminal to raw mode on the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be prepared; any partial
    /// setup is undone first.
    pub fn enter() -> Result<Self, UiError> {
        install_panic_hook();

        let setup = || -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, Hide)?;
            Terminal::new(CrosstermBackend::new(stdout))
        };

        match setup() {
            Ok(terminal) => {
                debug!("Terminal prepared");
                Ok(Self { terminal })
            }
            Err(e) => {
                restore();
                Err(e.into())
            }
        }
    }

    /// Draws one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn draw(&mut self, ctx: &RenderContext<'_>) -> Result<(), UiError> {
        self.terminal.draw(|frame| render(frame, ctx))?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore();
        debug!("Terminal restored");
    }
}

/// Leaves raw mode and the alternate screen, ignoring failures.
pub fn restore() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Restores the terminal before the default panic message is printed.
///
/// Installed at most once per process; later sessions reuse the hook.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore();
            default_hook(info);
        }));
    });
}
