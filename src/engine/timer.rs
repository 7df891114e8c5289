//! Countdown engine.
//!
//! This module provides the core timer functionality:
//! - State transitions (Idle → Running ⇄ Paused → Alerting)
//! - Drift-free remaining time computed from an absolute deadline
//! - A single completion event per countdown for the alert trigger
//!
//! None of the operations fail. Out-of-range input is clamped and a start
//! request on a zero-length countdown is silently refused.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use crate::types::{TimerConfiguration, TimerPhase, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Events emitted by the engine after each state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A new duration was applied
    Configured {
        /// Configured duration in milliseconds
        duration_ms: u64,
    },
    /// Countdown started or resumed
    Started {
        /// Remaining milliseconds at the start instant
        remaining_ms: u64,
    },
    /// Countdown paused
    Paused {
        /// Remaining milliseconds at the pause instant
        remaining_ms: u64,
    },
    /// Countdown reset to the configured duration
    Reset {
        /// Remaining milliseconds after the reset
        remaining_ms: u64,
    },
    /// Countdown reached zero
    Completed,
}

// ============================================================================
// CountdownEngine
// ============================================================================

/// Engine that owns the countdown state and drives its state machine.
pub struct CountdownEngine<C: Clock = SystemClock> {
    /// Current timer state
    state: TimerState,
    /// Time source used by `start` and `pause`
    clock: C,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl<C: Clock> CountdownEngine<C> {
    /// Creates an idle engine with a zero-length countdown.
    pub fn new(clock: C, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            state: TimerState::new(),
            clock,
            event_tx,
        }
    }

    /// Applies a new duration from minutes and seconds, clamped into range.
    ///
    /// Cancels any running countdown and clears the alert.
    pub fn configure(&mut self, minutes: i64, seconds: i64) {
        self.apply(TimerConfiguration::new(minutes, seconds));
    }

    /// Applies an already clamped configuration.
    pub fn apply(&mut self, config: TimerConfiguration) {
        let duration_ms = config.duration_ms();

        self.state.initial_duration_ms = duration_ms;
        self.state.remaining_ms = duration_ms;
        self.state.deadline = None;
        self.state.phase = TimerPhase::Idle;

        info!(
            minutes = config.minutes(),
            seconds = config.seconds(),
            "Countdown configured"
        );
        self.emit(TimerEvent::Configured { duration_ms });
    }

    /// Starts or resumes the countdown.
    ///
    /// Resumes from the remaining time when there is any, otherwise starts
    /// over from the configured duration. A zero-length countdown is not
    /// started.
    pub fn start(&mut self) {
        if self.state.is_running() {
            return;
        }

        let base = if self.state.remaining_ms > 0 {
            self.state.remaining_ms
        } else {
            self.state.initial_duration_ms
        };
        if base == 0 {
            debug!("Refusing to start a zero-length countdown");
            return;
        }

        self.state.remaining_ms = base;
        self.state.deadline = Some(self.clock.now() + Duration::from_millis(base));
        self.state.phase = TimerPhase::Running;

        info!(remaining_ms = base, "Countdown started");
        self.emit(TimerEvent::Started { remaining_ms: base });
    }

    /// Pauses a running countdown.
    ///
    /// The remaining time is evaluated against the deadline at the pause
    /// instant rather than taken from the last frame. If that evaluation
    /// reaches zero the countdown completes instead.
    pub fn pause(&mut self) {
        if !self.state.is_running() {
            return;
        }

        let left = self.remaining_at(self.clock.now());
        if left == 0 {
            self.complete();
            return;
        }

        self.state.remaining_ms = left;
        self.state.deadline = None;
        self.state.phase = TimerPhase::Paused;

        info!(remaining_ms = left, "Countdown paused");
        self.emit(TimerEvent::Paused { remaining_ms: left });
    }

    /// Restores the configured duration and returns to idle.
    pub fn reset(&mut self) {
        self.state.remaining_ms = self.state.initial_duration_ms;
        self.state.deadline = None;
        self.state.phase = TimerPhase::Idle;

        info!(remaining_ms = self.state.remaining_ms, "Countdown reset");
        self.emit(TimerEvent::Reset {
            remaining_ms: self.state.remaining_ms,
        });
    }

    /// Pauses when running, starts otherwise.
    pub fn toggle(&mut self) {
        if self.state.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Evaluates the remaining time at `now`.
    ///
    /// Does nothing unless the countdown is running. Returns true when this
    /// tick completed the countdown.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.state.is_running() {
            return false;
        }

        let left = self.remaining_at(now);
        self.state.remaining_ms = left;

        if left == 0 {
            self.complete();
            return true;
        }
        false
    }

    /// Ticks with the engine's own clock.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        self.tick(now)
    }

    /// Returns a reference to the current timer state.
    pub fn get_state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TimerPhase {
        self.state.phase
    }

    /// Returns the remaining milliseconds.
    pub fn remaining_ms(&self) -> u64 {
        self.state.remaining_ms
    }

    /// Returns true if the countdown is running.
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Returns the engine's clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Milliseconds left before the deadline, rounded half up.
    ///
    /// Never exceeds the current remaining time, so an out-of-order clock
    /// reading cannot make the countdown go backwards.
    fn remaining_at(&self, now: Instant) -> u64 {
        let Some(deadline) = self.state.deadline else {
            return self.state.remaining_ms;
        };
        let micros = deadline.saturating_duration_since(now).as_micros();
        let rounded = u64::try_from((micros + 500) / 1000).unwrap_or(u64::MAX);
        rounded.min(self.state.remaining_ms)
    }

    /// Switches to alerting and emits the completion event.
    fn complete(&mut self) {
        if self.state.is_alerting() {
            return;
        }

        self.state.remaining_ms = 0;
        self.state.deadline = None;
        self.state.phase = TimerPhase::Alerting;

        info!("Countdown completed");
        self.emit(TimerEvent::Completed);
    }

    fn emit(&self, event: TimerEvent) {
        // The receiver going away only means nobody listens any more.
        if self.event_tx.send(event).is_err() {
            debug!(?event, "Timer event dropped, no receiver");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::ManualClock;

    fn create_engine() -> (
        CountdownEngine<ManualClock>,
        ManualClock,
        mpsc::UnboundedReceiver<TimerEvent>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let clock = ManualClock::new();
        let engine = CountdownEngine::new(clock.clone(), tx);
        (engine, clock, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    // ------------------------------------------------------------------------
    // Configure
    // ------------------------------------------------------------------------

    mod configure_tests {
        use super::*;

        #[test]
        fn test_new_engine_is_idle_and_empty() {
            let (engine, _clock, _rx) = create_engine();
            let state = engine.get_state();

            assert_eq!(state.phase, TimerPhase::Idle);
            assert_eq!(state.initial_duration_ms, 0);
            assert_eq!(state.remaining_ms, 0);
            assert!(state.deadline.is_none());
        }

        #[test]
        fn test_configure_sets_duration() {
            let (mut engine, _clock, mut rx) = create_engine();

            engine.configure(2, 30);

            let state = engine.get_state();
            assert_eq!(state.initial_duration_ms, 150_000);
            assert_eq!(state.remaining_ms, 150_000);
            assert_eq!(state.phase, TimerPhase::Idle);
            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::Configured {
                    duration_ms: 150_000
                }
            );
        }

        #[test]
        fn test_configure_every_valid_input() {
            let (mut engine, _clock, _rx) = create_engine();

            for m in 0..=99 {
                for s in 0..=59 {
                    engine.configure(m, s);
                    let expected = ((m * 60 + s) * 1000) as u64;
                    assert_eq!(engine.remaining_ms(), expected);
                    assert_eq!(engine.get_state().initial_duration_ms, expected);
                    assert_eq!(engine.phase(), TimerPhase::Idle);
                }
            }
        }

        #[test]
        fn test_configure_clamps_to_maximum() {
            let (mut engine, _clock, _rx) = create_engine();

            engine.configure(99, 59);
            assert_eq!(engine.get_state().initial_duration_ms, 5_999_000);

            engine.configure(1000, 1000);
            assert_eq!(engine.get_state().initial_duration_ms, 5_999_000);
        }

        #[test]
        fn test_configure_cancels_running_countdown() {
            let (mut engine, clock, _rx) = create_engine();

            engine.configure(0, 10);
            engine.start();
            clock.advance_ms(3000);
            engine.poll();

            engine.configure(0, 20);

            let state = engine.get_state();
            assert_eq!(state.phase, TimerPhase::Idle);
            assert_eq!(state.remaining_ms, 20_000);
            assert!(state.deadline.is_none());
        }
    }

    // ------------------------------------------------------------------------
    // Start / Pause / Toggle
    // ------------------------------------------------------------------------

    mod run_control_tests {
        use super::*;

        #[test]
        fn test_start_zero_duration_is_refused() {
            let (mut engine, _clock, mut rx) = create_engine();

            engine.start();

            assert_eq!(engine.phase(), TimerPhase::Idle);
            assert!(engine.get_state().deadline.is_none());
            assert!(drain(&mut rx).is_empty());

            engine.configure(0, 0);
            engine.start();
            assert_eq!(engine.phase(), TimerPhase::Idle);
            assert!(engine.get_state().deadline.is_none());
        }

        #[test]
        fn test_start_sets_deadline() {
            let (mut engine, clock, mut rx) = create_engine();
            engine.configure(1, 0);
            let _ = rx.try_recv();

            engine.start();

            let state = engine.get_state();
            assert_eq!(state.phase, TimerPhase::Running);
            assert_eq!(
                state.deadline,
                Some(clock.now() + Duration::from_millis(60_000))
            );
            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::Started {
                    remaining_ms: 60_000
                }
            );
        }

        #[test]
        fn test_start_while_running_is_noop() {
            let (mut engine, clock, mut rx) = create_engine();
            engine.configure(1, 0);
            engine.start();
            let deadline = engine.get_state().deadline;
            let _ = drain(&mut rx);

            clock.advance_ms(500);
            engine.start();

            assert_eq!(engine.get_state().deadline, deadline);
            assert!(drain(&mut rx).is_empty());
        }

        #[test]
        fn test_pause_captures_exact_remaining() {
            let (mut engine, clock, _rx) = create_engine();
            engine.configure(0, 10);
            engine.start();

            clock.advance_ms(1000);
            engine.poll();
            // Between frames: no tick happens before the pause.
            clock.advance_ms(7);
            engine.pause();

            let state = engine.get_state();
            assert_eq!(state.phase, TimerPhase::Paused);
            assert_eq!(state.remaining_ms, 8993);
            assert!(state.deadline.is_none());
        }

        #[test]
        fn test_pause_then_start_resumes_from_remaining() {
            let (mut engine, clock, _rx) = create_engine();
            engine.configure(0, 10);
            engine.start();

            clock.advance_ms(4321);
            engine.pause();
            assert_eq!(engine.remaining_ms(), 5679);

            // Time spent paused does not count.
            clock.advance_ms(60_000);
            engine.start();
            assert_eq!(engine.remaining_ms(), 5679);
            assert_eq!(
                engine.get_state().deadline,
                Some(clock.now() + Duration::from_millis(5679))
            );

            clock.advance_ms(679);
            engine.poll();
            assert_eq!(engine.remaining_ms(), 5000);
        }

        #[test]
        fn test_pause_when_not_running_is_noop() {
            let (mut engine, _clock, mut rx) = create_engine();
            engine.configure(0, 5);
            let _ = drain(&mut rx);

            engine.pause();

            assert_eq!(engine.phase(), TimerPhase::Idle);
            assert!(drain(&mut rx).is_empty());
        }

        #[test]
        fn test_pause_at_deadline_completes() {
            let (mut engine, clock, mut rx) = create_engine();
            engine.configure(0, 1);
            engine.start();
            let _ = drain(&mut rx);

            clock.advance_ms(1000);
            engine.pause();

            assert_eq!(engine.phase(), TimerPhase::Alerting);
            assert_eq!(engine.remaining_ms(), 0);
            assert_eq!(drain(&mut rx), vec![TimerEvent::Completed]);
        }

        #[test]
        fn test_toggle_alternates() {
            let (mut engine, clock, _rx) = create_engine();
            engine.configure(0, 30);

            engine.toggle();
            assert_eq!(engine.phase(), TimerPhase::Running);

            clock.advance_ms(100);
            engine.toggle();
            assert_eq!(engine.phase(), TimerPhase::Paused);

            engine.toggle();
            assert_eq!(engine.phase(), TimerPhase::Running);
        }

        #[test]
        fn test_start_from_alerting_restarts_full_duration() {
            let (mut engine, clock, _rx) = create_engine();
            engine.configure(0, 2);
            engine.start();
            clock.advance_ms(2000);
            engine.poll();
            assert_eq!(engine.phase(), TimerPhase::Alerting);

            engine.start();

            assert_eq!(engine.phase(), TimerPhase::Running);
            assert_eq!(engine.remaining_ms(), 2000);
        }
    }

    // ------------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_tick_ignored_when_not_running() {
            let (mut engine, clock, _rx) = create_engine();
            engine.configure(0, 5);

            clock.advance_ms(10_000);
            assert!(!engine.poll());
            assert_eq!(engine.remaining_ms(), 5000);
        }

        #[test]
        fn test_tick_is_monotonic_down_to_zero() {
            let (mut engine, clock, _rx) = create_engine();
            engine.configure(0, 3);
            engine.start();

            let mut previous = engine.remaining_ms();
            for _ in 0..250 {
                clock.advance_ms(16);
                engine.poll();
                let current = engine.remaining_ms();
                assert!(current <= previous);
                previous = current;
            }
            assert_eq!(engine.remaining_ms(), 0);
        }

        #[test]
        fn test_tick_with_earlier_instant_does_not_rewind() {
            let (mut engine, clock, _rx) = create_engine();
            let before = clock.now();
            clock.advance_ms(100);
            engine.configure(0, 5);
            engine.start();
            clock.advance_ms(1000);
            engine.poll();

            engine.tick(before);

            assert_eq!(engine.remaining_ms(), 4000);
        }

        #[test]
        fn test_tick_rounds_to_nearest_millisecond() {
            let (mut engine, clock, _rx) = create_engine();
            engine.configure(0, 1);
            engine.start();

            clock.advance(Duration::from_micros(1400));
            engine.poll();
            assert_eq!(engine.remaining_ms(), 999);

            clock.advance(Duration::from_micros(200));
            engine.poll();
            // 998.4 ms left
            assert_eq!(engine.remaining_ms(), 998);

            clock.advance(Duration::from_micros(900));
            engine.poll();
            // 997.5 ms left rounds half up
            assert_eq!(engine.remaining_ms(), 998);
        }

        #[test]
        fn test_no_drift_from_irregular_frames() {
            let (mut engine, clock, _rx) = create_engine();
            engine.configure(0, 10);
            engine.start();

            for step in [3, 17, 40, 16, 16, 250, 1, 33] {
                clock.advance_ms(step);
                engine.poll();
            }
            let elapsed = clock.elapsed().as_millis() as u64;
            assert_eq!(engine.remaining_ms(), 10_000 - elapsed);
        }

        #[test]
        fn test_completion_fires_once() {
            let (mut engine, clock, mut rx) = create_engine();
            engine.configure(0, 1);
            engine.start();
            let _ = drain(&mut rx);

            clock.advance_ms(1200);
            assert!(engine.poll());
            for _ in 0..10 {
                clock.advance_ms(16);
                assert!(!engine.poll());
            }

            let state = engine.get_state();
            assert_eq!(state.phase, TimerPhase::Alerting);
            assert_eq!(state.remaining_ms, 0);
            assert!(state.deadline.is_none());
            assert_eq!(drain(&mut rx), vec![TimerEvent::Completed]);
        }
    }

    // ------------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------------

    mod reset_tests {
        use super::*;

        #[test]
        fn test_reset_restores_duration_from_every_phase() {
            let (mut engine, clock, _rx) = create_engine();
            engine.configure(0, 5);

            engine.reset();
            assert_eq!(engine.remaining_ms(), 5000);

            engine.start();
            clock.advance_ms(1234);
            engine.poll();
            engine.reset();
            assert_eq!(engine.remaining_ms(), 5000);
            assert_eq!(engine.phase(), TimerPhase::Idle);
            assert!(engine.get_state().deadline.is_none());

            engine.start();
            clock.advance_ms(500);
            engine.pause();
            engine.reset();
            assert_eq!(engine.remaining_ms(), 5000);

            engine.start();
            clock.advance_ms(6000);
            engine.poll();
            assert_eq!(engine.phase(), TimerPhase::Alerting);
            engine.reset();
            assert_eq!(engine.remaining_ms(), 5000);
            assert_eq!(engine.phase(), TimerPhase::Idle);
        }

        #[test]
        fn test_reset_emits_event() {
            let (mut engine, _clock, mut rx) = create_engine();
            engine.configure(0, 7);
            let _ = drain(&mut rx);

            engine.reset();

            assert_eq!(
                drain(&mut rx),
                vec![TimerEvent::Reset { remaining_ms: 7000 }]
            );
        }
    }

    #[test]
    fn test_dropped_receiver_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let clock = ManualClock::new();
        let mut engine = CountdownEngine::new(clock.clone(), tx);

        engine.configure(0, 1);
        engine.start();
        clock.advance_ms(1000);
        assert!(engine.poll());
    }
}
