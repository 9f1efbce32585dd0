use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::typer::TypingSession;
use crate::word_bank::WordSupplier;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum SessionEvent {
    Key(KeyEvent),
    /// A multi-character input packet, e.g. a bracketed paste.
    Paste(String),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, paste, resize)
pub trait SessionEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<SessionEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => SessionEvent::Key(key),
                Ok(CtEvent::Paste(text)) => SessionEvent::Paste(text),
                Ok(CtEvent::Resize(_, _)) => SessionEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<SessionEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<SessionEvent>) -> Self {
        Self { rx }
    }
}

impl SessionEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: SessionEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: SessionEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> SessionEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                SessionEvent::Tick
            }
        }
    }
}

/// Monotonic session clock. Each lap yields the time since the previous lap
/// and the time since the session started, in seconds.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn start_at(origin: Instant) -> Self {
        Self {
            origin,
            last: origin,
        }
    }

    pub fn start() -> Self {
        Self::start_at(Instant::now())
    }

    pub fn lap(&mut self) -> (f64, f64) {
        self.lap_at(Instant::now())
    }

    pub fn lap_at(&mut self, at: Instant) -> (f64, f64) {
        let dt = at.saturating_duration_since(self.last).as_secs_f64();
        self.last = self.last.max(at);
        (dt, at.saturating_duration_since(self.origin).as_secs_f64())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Apply one event to the session. Every event advances the clock first, so
/// keystrokes are stamped with the current time even when they arrive faster
/// than the tick interval.
pub fn dispatch<S: WordSupplier>(
    session: &mut TypingSession<S>,
    event: SessionEvent,
    clock: &mut FrameClock,
) -> Control {
    let (dt, now) = clock.lap();
    session.tick(dt, now);

    match event {
        SessionEvent::Tick | SessionEvent::Resize => Control::Continue,
        SessionEvent::Paste(text) => {
            session.on_input(&text);
            Control::Continue
        }
        SessionEvent::Key(key) => dispatch_key(session, key),
    }
}

fn dispatch_key<S: WordSupplier>(session: &mut TypingSession<S>, key: KeyEvent) -> Control {
    if key.kind != KeyEventKind::Press {
        return Control::Continue;
    }
    match key.code {
        KeyCode::Esc => Control::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Control::Quit,
        KeyCode::Char(c) => {
            session.on_keystroke(c);
            Control::Continue
        }
        _ => Control::Continue,
    }
}
