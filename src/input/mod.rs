//! Keyboard input: command decoding, the numeric input fields and the
//! dispatcher that routes commands to the engine.

pub mod commands;
pub mod dispatcher;
pub mod fields;

pub use commands::Command;
pub use dispatcher::{CommandDispatcher, Dispatch};
pub use fields::{FieldFocus, InputFields, NumericField};
