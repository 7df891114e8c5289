//! Keyboard command decoding.
//!
//! Raw key events are turned into [`Command`]s here; everything downstream
//! works on commands only. Letter keys are case-insensitive and unknown keys
//! are ignored.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

// ============================================================================
// Command
// ============================================================================

/// A decoded user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start or pause the countdown (Space)
    ToggleRun,
    /// Reset to the configured duration (R)
    Reset,
    /// Enter or leave fullscreen (F)
    ToggleFullscreen,
    /// Show or hide the controls bar (H)
    ToggleControls,
    /// Apply the input fields as the new duration (Enter)
    ApplyConfiguration,
    /// Move input focus to the other field (Tab)
    FocusNextField,
    /// Append a digit to the focused field
    InputDigit(char),
    /// Delete the last character of the focused field (Backspace)
    DeleteDigit,
    /// Leave the application (Q, Esc, Ctrl+C)
    Quit,
}

impl Command {
    /// Decodes a key event, returning `None` for keys without a binding.
    ///
    /// Only key presses count; release and repeat events are ignored.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c' | 'C') => Some(Command::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(' ') => Some(Command::ToggleRun),
            KeyCode::Char(c) => Self::from_char(c),
            KeyCode::Enter => Some(Command::ApplyConfiguration),
            KeyCode::Tab | KeyCode::BackTab => Some(Command::FocusNextField),
            KeyCode::Backspace => Some(Command::DeleteDigit),
            KeyCode::Esc => Some(Command::Quit),
            _ => None,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            ' ' => Some(Command::ToggleRun),
            'r' => Some(Command::Reset),
            'f' => Some(Command::ToggleFullscreen),
            'h' => Some(Command::ToggleControls),
            'q' => Some(Command::Quit),
            d if d.is_ascii_digit() => Some(Command::InputDigit(d)),
            _ => None,
        }
    }

    /// Returns true for commands that edit the input fields.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Command::InputDigit(_) | Command::DeleteDigit | Command::FocusNextField
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::ToggleRun => write!(f, "toggle-run"),
            Command::Reset => write!(f, "reset"),
            Command::ToggleFullscreen => write!(f, "toggle-fullscreen"),
            Command::ToggleControls => write!(f, "toggle-controls-visibility"),
            Command::ApplyConfiguration => write!(f, "apply-configuration"),
            Command::FocusNextField => write!(f, "focus-next-field"),
            Command::InputDigit(d) => write!(f, "input-digit({})", d),
            Command::DeleteDigit => write!(f, "delete-digit"),
            Command::Quit => write!(f, "quit"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
