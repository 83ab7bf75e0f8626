use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use log::debug;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// Countdown timer fired
    Countdown,
    /// Stats refresh timer fired
    StatsRefresh,
}

/// Source of app events (keyboard, resize, timers)
pub trait EventSource {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;

    /// Sender that timers push their events through
    fn timer_sender(&self) -> Sender<AppEvent>;
}

/// Production event source: a crossterm reader thread plus any timers
/// feeding the same channel
pub struct CrosstermEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let key_tx = tx.clone();

        thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => AppEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if key_tx.send(evt).is_err() {
                break;
            }
        });

        Self { tx, rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn timer_sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

/// Channel-backed event source for tests
pub struct TestEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    /// Returns the source and a sender for injecting key events
    pub fn new() -> (Self, Sender<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx: tx.clone(), rx }, tx)
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn timer_sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

/// A periodic task that pushes `event` into a channel every `interval`.
///
/// The handle owns the task: dropping it (or calling [`IntervalTimer::cancel`])
/// stops the thread and waits for it, so no event is sent once the handle is gone.
#[derive(Debug)]
pub struct IntervalTimer {
    name: &'static str,
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl IntervalTimer {
    pub fn start(
        name: &'static str,
        interval: Duration,
        tx: Sender<AppEvent>,
        event: AppEvent,
    ) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let step = interval.min(Duration::from_millis(10)).max(Duration::from_millis(1));

        let handle = thread::spawn(move || loop {
            let mut waited = Duration::ZERO;
            while waited < interval {
                if flag.load(Ordering::Acquire) {
                    return;
                }
                let nap = step.min(interval - waited);
                thread::sleep(nap);
                waited += nap;
            }
            if flag.load(Ordering::Acquire) || tx.send(event.clone()).is_err() {
                return;
            }
        });

        debug!("{name} timer started every {}ms", interval.as_millis());
        Self {
            name,
            cancelled,
            handle: Some(handle),
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some() && !self.cancelled.load(Ordering::Acquire)
    }

    /// Stop the task and wait for its thread to exit.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            debug!("{} timer cancelled", self.name);
        }
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// The countdown and stats refresh timers of one running session.
/// At most one of each exists; both stop when this value is dropped.
#[derive(Debug)]
pub struct SessionTimers {
    countdown: IntervalTimer,
    stats: IntervalTimer,
}

impl SessionTimers {
    pub fn start(
        countdown_interval: Duration,
        stats_interval: Duration,
        tx: Sender<AppEvent>,
    ) -> Self {
        Self {
            countdown: IntervalTimer::start(
                "countdown",
                countdown_interval,
                tx.clone(),
                AppEvent::Countdown,
            ),
            stats: IntervalTimer::start("stats", stats_interval, tx, AppEvent::StatsRefresh),
        }
    }

    pub fn is_active(&self) -> bool {
        self.countdown.is_active() && self.stats.is_active()
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: EventSource> {
    event_source: E,
    poll_interval: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, poll_interval: Duration) -> Self {
        Self {
            event_source,
            poll_interval,
        }
    }

    pub fn timer_sender(&self) -> Sender<AppEvent> {
        self.event_source.timer_sender()
    }

    /// Blocks up to the poll interval; `None` when nothing arrived
    pub fn step(&self) -> Option<AppEvent> {
        match self.event_source.recv_timeout(self.poll_interval) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
