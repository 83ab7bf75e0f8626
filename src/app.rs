use crate::config::Config;
use crate::language::Vocabulary;
use crate::runtime::{AppEvent, SessionTimers};
use crate::session::Session;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use std::sync::mpsc::Sender;
use std::time::SystemTime;

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Owns the current session and the timers driving it
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub vocabulary: Vocabulary,
    pub config: Config,
    timers: Option<SessionTimers>,
    timer_tx: Sender<AppEvent>,
}

impl App {
    pub fn new(vocabulary: Vocabulary, config: Config, timer_tx: Sender<AppEvent>) -> Self {
        Self {
            session: Session::generate(&vocabulary),
            vocabulary,
            config,
            timers: None,
            timer_tx,
        }
    }

    pub fn timers_active(&self) -> bool {
        self.timers.as_ref().is_some_and(SessionTimers::is_active)
    }

    pub fn handle_event(&mut self, event: AppEvent, now: SystemTime) -> Control {
        let control = match event {
            AppEvent::Key(key) => self.on_key(key, now),
            AppEvent::Countdown => {
                self.session.on_countdown_tick(now);
                Control::Continue
            }
            AppEvent::StatsRefresh => {
                self.session.on_stats_tick(now);
                Control::Continue
            }
            AppEvent::Resize => Control::Continue,
        };
        self.sync_timers();
        control
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: SystemTime) -> Control {
        self.handle_event(AppEvent::Key(key), now)
    }

    fn on_key(&mut self, key: KeyEvent, now: SystemTime) -> Control {
        if key.kind == KeyEventKind::Release {
            return Control::Continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if ctrl => return Control::Quit,
            KeyCode::Char('f') if ctrl => self.session.finish(now),
            KeyCode::Tab => self.new_test(),
            KeyCode::Char('n') if self.session.has_finished() => self.new_test(),
            KeyCode::Char(' ') | KeyCode::Enter => self.session.submit(now),
            KeyCode::Backspace => self.session.backspace(now),
            KeyCode::Char(c) if !ctrl => self.session.type_char(c, now),
            _ => {}
        }
        Control::Continue
    }

    /// Tear down the running timers and deal a fresh idle session.
    pub fn new_test(&mut self) {
        self.timers = None;
        self.session = self.session.reset(&self.vocabulary);
        info!("new test ready");
    }

    /// Stop all timers; called before the app goes away.
    pub fn shutdown(&mut self) {
        if self.timers.take().is_some() {
            debug!("timers stopped on shutdown");
        }
    }

    /// Exactly one pair of timers while the session runs, none otherwise.
    fn sync_timers(&mut self) {
        match (self.session.is_running(), self.timers.is_some()) {
            (true, false) => {
                self.timers = Some(SessionTimers::start(
                    self.config.countdown_interval(),
                    self.config.stats_interval(),
                    self.timer_tx.clone(),
                ));
            }
            (false, true) => {
                self.timers = None;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{FinishReason, Phase};
    use std::sync::mpsc;
    use std::time::Duration;

    fn app() -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let vocab = Vocabulary::english().unwrap();
        (App::new(vocab, Config::default(), tx), rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_current_word(app: &mut App, now: SystemTime) {
        let word = app.session.current_word().unwrap().to_string();
        for c in word.chars() {
            app.handle_key(key(KeyCode::Char(c)), now);
        }
    }

    #[test]
    fn idle_app_has_no_timers() {
        let (app, _rx) = app();

        assert_eq!(app.session.phase(), Phase::Idle);
        assert!(!app.timers_active());
    }

    #[test]
    fn first_keystroke_starts_timers() {
        let (mut app, rx) = app();
        app.handle_key(key(KeyCode::Char('x')), SystemTime::now());

        assert!(app.session.is_running());
        assert!(app.timers_active());
        assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
    }

    #[test]
    fn key_events_share_the_event_path() {
        let (mut app, rx) = app();
        let now = SystemTime::now();

        let control = app.handle_event(AppEvent::Key(key(KeyCode::Char('x'))), now);
        assert_eq!(control, Control::Continue);
        assert!(app.timers_active());
        assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());

        assert_eq!(app.handle_key(key(KeyCode::Esc), now), Control::Quit);
        assert!(app.timers_active());
    }

    #[test]
    fn space_submits_word() {
        let (mut app, _rx) = app();
        let now = SystemTime::now();

        type_current_word(&mut app, now);
        app.handle_key(key(KeyCode::Char(' ')), now);

        assert_eq!(app.session.current_index(), 1);
        assert_eq!(app.session.correct_words(), 1);
        assert_eq!(app.session.input(), "");

        app.handle_key(key(KeyCode::Char('q')), now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.session.current_index(), 2);
    }

    #[test]
    fn backspace_removes_last_char() {
        let (mut app, _rx) = app();
        let now = SystemTime::now();

        app.handle_key(key(KeyCode::Char('a')), now);
        app.handle_key(key(KeyCode::Char('b')), now);
        app.handle_key(key(KeyCode::Backspace), now);

        assert_eq!(app.session.input(), "a");
        assert_eq!(app.session.total_keystrokes(), 3);
    }

    #[test]
    fn ctrl_f_finishes_and_stops_timers() {
        let (mut app, _rx) = app();
        let now = SystemTime::now();

        app.handle_key(key(KeyCode::Char('a')), now);
        assert!(app.timers_active());

        app.handle_key(ctrl('f'), now + Duration::from_secs(3));

        assert!(app.session.has_finished());
        assert_eq!(app.session.finish_reason(), Some(FinishReason::Manual));
        assert!(!app.timers_active());
    }

    #[test]
    fn ctrl_f_while_idle_does_nothing() {
        let (mut app, _rx) = app();
        app.handle_key(ctrl('f'), SystemTime::now());

        assert_eq!(app.session.phase(), Phase::Idle);
    }

    #[test]
    fn countdown_expiry_stops_timers() {
        let (mut app, _rx) = app();
        let now = SystemTime::now();

        app.handle_key(key(KeyCode::Char('a')), now);
        app.handle_event(AppEvent::Countdown, now + Duration::from_secs(61));

        assert!(app.session.has_finished());
        assert_eq!(app.session.time_left_secs(), 0);
        assert!(!app.timers_active());
    }

    #[test]
    fn stats_event_refreshes_stats() {
        let (mut app, _rx) = app();
        let now = SystemTime::now();

        type_current_word(&mut app, now);
        app.handle_key(key(KeyCode::Char(' ')), now);
        app.handle_event(AppEvent::StatsRefresh, now + Duration::from_secs(10));

        assert!(app.session.stats().wpm > 0);
        assert_eq!(app.session.stats().accuracy, 100);
    }

    #[test]
    fn input_ignored_after_finish() {
        let (mut app, _rx) = app();
        let now = SystemTime::now();

        app.handle_key(key(KeyCode::Char('a')), now);
        app.handle_key(ctrl('f'), now);
        let keystrokes = app.session.total_keystrokes();

        app.handle_key(key(KeyCode::Char('b')), now);
        app.handle_key(key(KeyCode::Backspace), now);
        app.handle_key(key(KeyCode::Enter), now);

        assert_eq!(app.session.total_keystrokes(), keystrokes);
        assert!(!app.timers_active());
    }

    #[test]
    fn tab_starts_new_test_from_any_phase() {
        let (mut app, _rx) = app();
        let now = SystemTime::now();

        app.handle_key(key(KeyCode::Char('a')), now);
        app.handle_key(key(KeyCode::Tab), now);
        assert_eq!(app.session.phase(), Phase::Idle);
        assert_eq!(app.session.total_keystrokes(), 0);
        assert!(!app.timers_active());

        app.handle_key(key(KeyCode::Char('a')), now);
        app.handle_key(ctrl('f'), now);
        app.handle_key(key(KeyCode::Tab), now);
        assert_eq!(app.session.phase(), Phase::Idle);
    }

    #[test]
    fn n_starts_new_test_only_when_finished() {
        let (mut app, _rx) = app();
        let now = SystemTime::now();

        app.handle_key(key(KeyCode::Char('n')), now);
        assert_eq!(app.session.input(), "n");

        app.handle_key(ctrl('f'), now);
        app.handle_key(key(KeyCode::Char('n')), now);

        assert_eq!(app.session.phase(), Phase::Idle);
        assert_eq!(app.session.input(), "");
    }

    #[test]
    fn quit_keys() {
        let (mut app, _rx) = app();
        let now = SystemTime::now();

        assert_eq!(app.handle_key(key(KeyCode::Esc), now), Control::Quit);
        assert_eq!(app.handle_key(ctrl('c'), now), Control::Quit);
        assert_eq!(
            app.handle_key(key(KeyCode::Left), now),
            Control::Continue
        );
    }

    #[test]
    fn shutdown_stops_timers() {
        let (mut app, _rx) = app();
        app.handle_key(key(KeyCode::Char('a')), SystemTime::now());
        assert!(app.timers_active());

        app.shutdown();
        assert!(!app.timers_active());
    }
}
