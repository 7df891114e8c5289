//! Countdown engine, its clock source and the frame driver that ticks it.

pub mod clock;
pub mod driver;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::FrameDriver;
pub use timer::{CountdownEngine, TimerEvent};
