//! Application composition root.
//!
//! `App` wires the engine, dispatcher, frame driver and alert trigger
//! together without touching the terminal, so the whole interaction flow
//! can be exercised in tests.

use crossterm::event::KeyEvent;
use tokio::sync::mpsc;
use tracing::debug;

use super::fullscreen::{ChromelessFullscreen, Fullscreen};
use super::render::RenderContext;
use crate::config::AppConfig;
use crate::display::FrameView;
use crate::engine::{Clock, CountdownEngine, FrameDriver, SystemClock, TimerEvent};
use crate::input::{Command, CommandDispatcher, Dispatch, InputFields};
use crate::sound::AlertTrigger;

/// The running application, minus the terminal.
pub struct App<C: Clock = SystemClock, F: Fullscreen = ChromelessFullscreen> {
    engine: CountdownEngine<C>,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    dispatcher: CommandDispatcher<F>,
    driver: FrameDriver,
    alert: AlertTrigger,
    alerts_fired: u32,
}

impl<C: Clock, F: Fullscreen> App<C, F> {
    /// Builds the app and applies the configured initial duration.
    pub fn new(clock: C, fullscreen: F, alert: AlertTrigger, config: &AppConfig) -> Self {
        let (event_tx, events) = mpsc::unbounded_channel();
        let mut engine = CountdownEngine::new(clock, event_tx);
        let fields = InputFields::new(config.minutes, config.seconds);
        engine.apply(fields.configuration());

        let mut app = Self {
            engine,
            events,
            dispatcher: CommandDispatcher::new(fullscreen, fields, config.show_controls),
            driver: FrameDriver::new(config.frame_rate),
            alert,
            alerts_fired: 0,
        };
        app.settle();
        app
    }

    /// Decodes and handles a key press.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Dispatch {
        match Command::from_key(key) {
            Some(command) => self.handle_command(command),
            None => Dispatch::Continue,
        }
    }

    /// Handles a decoded command.
    pub fn handle_command(&mut self, command: Command) -> Dispatch {
        let flow = self.dispatcher.dispatch(command, &mut self.engine);
        self.settle();
        flow
    }

    /// Called once per frame by the frame driver.
    pub fn on_frame(&mut self) {
        self.engine.poll();
        self.settle();
    }

    /// Reacts to engine events and keeps the driver in step with the phase.
    fn settle(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(?event, "Timer event");
            if event == TimerEvent::Completed {
                self.alerts_fired += 1;
                // Detached: the sequence outlives this call.
                let _ = self.alert.fire();
            }
        }
        self.driver.sync(self.engine.is_running());
    }

    /// The frame driver, for the event loop to await.
    pub fn driver_mut(&mut self) -> &mut FrameDriver {
        &mut self.driver
    }

    /// The frame driver.
    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    /// The countdown engine.
    pub fn engine(&self) -> &CountdownEngine<C> {
        &self.engine
    }

    /// The command dispatcher and its UI state.
    pub fn dispatcher(&self) -> &CommandDispatcher<F> {
        &self.dispatcher
    }

    /// How many completion alerts have been triggered.
    pub fn alerts_fired(&self) -> u32 {
        self.alerts_fired
    }

    /// Derived display values at the given wall-clock time.
    pub fn view(&self, wall_clock_ms: u64) -> FrameView {
        FrameView::from_state(self.engine.get_state(), wall_clock_ms)
    }

    /// Everything the renderer needs for one frame.
    pub fn render_context(&self, wall_clock_ms: u64) -> RenderContext<'_> {
        RenderContext {
            view: self.view(wall_clock_ms),
            fields: self.dispatcher.fields(),
            controls_visible: self.dispatcher.controls_visible(),
            fullscreen: self.dispatcher.fullscreen().is_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ManualClock;
    use crate::sound::{MockSoundPlayer, SoundPlayer, Tone};
    use crate::types::TimerPhase;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::Arc;
    use std::time::Duration;

    fn create_app(
        minutes: u32,
        seconds: u32,
    ) -> (App<ManualClock>, ManualClock, Arc<MockSoundPlayer>) {
        let clock = ManualClock::new();
        let mock = Arc::new(MockSoundPlayer::new());
        let alert = AlertTrigger::new(
            Some(mock.clone() as Arc<dyn SoundPlayer>),
            Tone::default(),
            5,
            Duration::from_millis(250),
        );
        let config = AppConfig {
            minutes,
            seconds,
            ..AppConfig::default()
        };
        let app = App::new(clock.clone(), ChromelessFullscreen::new(), alert, &config);
        (app, clock, mock)
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_configuration_applied() {
        let (app, _clock, _mock) = create_app(1, 30);

        assert_eq!(app.engine().get_state().initial_duration_ms, 90_000);
        assert_eq!(app.engine().phase(), TimerPhase::Idle);
        assert!(!app.driver().is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_follows_running_state() {
        let (mut app, clock, _mock) = create_app(0, 10);

        app.handle_key(&key(' '));
        assert!(app.driver().is_active());

        clock.advance_ms(100);
        app.handle_key(&key(' '));
        assert!(!app.driver().is_active());

        app.handle_key(&key(' '));
        assert!(app.driver().is_active());

        app.handle_key(&key('R'));
        assert!(!app.driver().is_active());
        assert_eq!(app.engine().remaining_ms(), 10_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_start_keeps_driver_stopped() {
        let (mut app, _clock, _mock) = create_app(0, 0);

        app.handle_key(&key(' '));

        assert_eq!(app.engine().phase(), TimerPhase::Idle);
        assert!(!app.driver().is_active());
        assert!(app.view(0).start_disabled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_fires_alert_once() {
        let (mut app, clock, mock) = create_app(0, 5);
        app.handle_command(Command::ToggleRun);

        for _ in 0..400 {
            clock.advance_ms(16);
            app.on_frame();
        }

        assert_eq!(app.engine().phase(), TimerPhase::Alerting);
        assert_eq!(app.engine().remaining_ms(), 0);
        assert_eq!(app.alerts_fired(), 1);
        assert!(!app.driver().is_active());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(mock.play_count(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_alert_sequence() {
        let (mut app, clock, mock) = create_app(0, 1);
        app.handle_command(Command::ToggleRun);
        clock.advance_ms(1000);
        app.on_frame();
        assert_eq!(app.alerts_fired(), 1);

        app.handle_command(Command::Reset);
        assert_eq!(app.engine().phase(), TimerPhase::Idle);
        assert_eq!(app.engine().remaining_ms(), 1000);

        // The sequence keeps playing after the reset.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(mock.play_count(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_context_reflects_ui_flags() {
        let (mut app, _clock, _mock) = create_app(2, 0);

        app.handle_key(&key('f'));
        app.handle_key(&key('h'));

        let ctx = app.render_context(0);
        assert!(ctx.fullscreen);
        assert!(!ctx.controls_visible);
        assert_eq!(ctx.view.digits.minutes(), "02");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbound_key_is_ignored() {
        let (mut app, _clock, _mock) = create_app(0, 3);
        assert_eq!(app.handle_key(&key('z')), Dispatch::Continue);
        assert_eq!(app.engine().phase(), TimerPhase::Idle);
        assert_eq!(app.handle_key(&key('q')), Dispatch::Quit);
    }
}
