//! Minute and second input fields.
//!
//! The fields only hold raw text. Coercion and clamping happen when the
//! text is turned into a [`TimerConfiguration`].

use crate::types::TimerConfiguration;

/// Longest text a field accepts.
pub const MAX_FIELD_LEN: usize = 3;

/// Which field receives typed digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldFocus {
    #[default]
    Minutes,
    Seconds,
}

/// A free-form numeric text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumericField {
    text: String,
}

impl NumericField {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into().chars().take(MAX_FIELD_LEN).collect();
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Appends a character; ignored once the field is full.
    pub fn push(&mut self, c: char) {
        if self.text.chars().count() < MAX_FIELD_LEN {
            self.text.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.text.pop();
    }
}

/// The pair of fields feeding `apply-configuration`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFields {
    pub minutes: NumericField,
    pub seconds: NumericField,
    pub focus: FieldFocus,
}

impl InputFields {
    /// Creates fields pre-filled with the given values.
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self {
            minutes: NumericField::new(minutes.to_string()),
            seconds: NumericField::new(seconds.to_string()),
            focus: FieldFocus::Minutes,
        }
    }

    pub fn focused_mut(&mut self) -> &mut NumericField {
        match self.focus {
            FieldFocus::Minutes => &mut self.minutes,
            FieldFocus::Seconds => &mut self.seconds,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FieldFocus::Minutes => FieldFocus::Seconds,
            FieldFocus::Seconds => FieldFocus::Minutes,
        };
    }

    /// The clamped configuration described by the current text.
    pub fn configuration(&self) -> TimerConfiguration {
        TimerConfiguration::from_raw(self.minutes.text(), self.seconds.text())
    }
}
