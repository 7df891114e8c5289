//! Frame driver.
//!
//! A cooperative scheduler that yields once per display frame while it is
//! active. The owner starts and stops it to mirror whether the countdown is
//! running; stopping drops the pending frame request so no stale tick can
//! fire after the state has moved on.

use std::future;

use tokio::time::{interval, Duration, Interval, MissedTickBehavior};
use tracing::debug;

/// Default display refresh rate.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Bounds for the configurable refresh rate.
pub const MIN_FRAME_RATE: u32 = 1;
pub const MAX_FRAME_RATE: u32 = 240;

/// Schedules one wake-up per frame while active.
#[derive(Debug)]
pub struct FrameDriver {
    period: Duration,
    pending: Option<Interval>,
}

impl FrameDriver {
    /// Creates a stopped driver for the given refresh rate.
    pub fn new(frame_rate: u32) -> Self {
        let rate = frame_rate.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE);
        Self {
            period: Duration::from_secs(1) / rate,
            pending: None,
        }
    }

    /// Returns the time between frames.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true while frames are being scheduled.
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Begins scheduling frames. Already active drivers keep their cadence.
    pub fn start(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.pending = Some(ticker);
        debug!(period_ms = self.period.as_millis() as u64, "Frame driver started");
    }

    /// Stops scheduling and cancels the pending frame request.
    pub fn stop(&mut self) {
        if self.pending.take().is_some() {
            debug!("Frame driver stopped");
        }
    }

    /// Starts or stops the driver to match `running`.
    pub fn sync(&mut self, running: bool) {
        if running {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Waits for the next frame.
    ///
    /// Never resolves while the driver is stopped, which makes it safe to
    /// poll unconditionally from a `tokio::select!` loop.
    pub async fn next_frame(&mut self) {
        match self.pending.as_mut() {
            Some(ticker) => {
                ticker.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}
