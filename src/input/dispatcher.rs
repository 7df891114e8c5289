//! Command dispatcher.
//!
//! A thin translation layer from decoded commands onto the countdown engine
//! and the UI-only state (fullscreen, controls visibility, input fields).
//! It does no timing work of its own.

use tracing::{debug, warn};

use super::commands::Command;
use super::fields::InputFields;
use crate::engine::{Clock, CountdownEngine};
use crate::ui::fullscreen::Fullscreen;

/// What the event loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Quit,
}

/// Routes commands to the engine and the UI state.
#[derive(Debug)]
pub struct CommandDispatcher<F: Fullscreen> {
    fullscreen: F,
    controls_visible: bool,
    fields: InputFields,
}

impl<F: Fullscreen> CommandDispatcher<F> {
    pub fn new(fullscreen: F, fields: InputFields, controls_visible: bool) -> Self {
        Self {
            fullscreen,
            controls_visible,
            fields,
        }
    }

    /// Handles one command.
    pub fn dispatch<C: Clock>(
        &mut self,
        command: Command,
        engine: &mut CountdownEngine<C>,
    ) -> Dispatch {
        debug!(%command, "Dispatching command");

        match command {
            Command::ToggleRun => engine.toggle(),
            Command::Reset => engine.reset(),
            Command::ToggleFullscreen => self.toggle_fullscreen(),
            Command::ToggleControls => self.controls_visible = !self.controls_visible,
            Command::ApplyConfiguration => engine.apply(self.fields.configuration()),
            Command::Quit => return Dispatch::Quit,
            edit if edit.is_edit() => self.edit(edit),
            _ => {}
        }
        Dispatch::Continue
    }

    fn toggle_fullscreen(&mut self) {
        let result = if self.fullscreen.is_active() {
            self.fullscreen.exit()
        } else {
            self.fullscreen.enter()
        };
        if let Err(e) = result {
            warn!("Fullscreen toggle failed: {}", e);
        }
    }

    fn edit(&mut self, command: Command) {
        // Hidden fields cannot be typed into.
        if !self.controls_visible {
            return;
        }
        match command {
            Command::InputDigit(d) => self.fields.focused_mut().push(d),
            Command::DeleteDigit => self.fields.focused_mut().pop(),
            Command::FocusNextField => self.fields.focus_next(),
            _ => {}
        }
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn fullscreen(&self) -> &F {
        &self.fullscreen
    }

    pub fn fields(&self) -> &InputFields {
        &self.fields
    }
}
