use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::matcher::KeyInput;

pub const DEFAULT_FPS: u32 = 60;

/// Everything the frame loop reacts to
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Something the frame loop can wait on between frames
pub trait GameEventSource: Send + 'static {
    /// Next event within `timeout`, or None when the frame is due first
    fn poll(&self, timeout: Duration) -> Option<GameEvent>;
}

/// Game-relevant part of a terminal event. Key releases (reported on
/// Windows) and mouse or focus events are dropped.
pub fn translate(event: CtEvent) -> Option<GameEvent> {
    match event {
        CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(GameEvent::Key(key)),
        CtEvent::Resize(_, _) => Some(GameEvent::Resize),
        _ => None,
    }
}

fn poll_channel(rx: &Receiver<GameEvent>, timeout: Duration) -> Option<GameEvent> {
    match rx.recv_timeout(timeout) {
        Ok(event) => Some(event),
        Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
    }
}

/// Reads the terminal on a background thread so the frame loop never blocks on input
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(raw) = event::read() {
                let Some(event) = translate(raw) else {
                    continue;
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
            debug!("Terminal reader stopped");
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEventSource for CrosstermEventSource {
    fn poll(&self, timeout: Duration) -> Option<GameEvent> {
        poll_channel(&self.rx, timeout)
    }
}

/// Scripted events for headless runs
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl GameEventSource for TestEventSource {
    fn poll(&self, timeout: Duration) -> Option<GameEvent> {
        poll_channel(&self.rx, timeout)
    }
}

/// Frame pacing of the simulation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / fps.max(1) as f64))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::from_fps(DEFAULT_FPS)
    }
}

/// Hands the frame loop one event at a time, turning quiet periods into ticks
pub struct Runner<E: GameEventSource> {
    source: E,
    ticker: FixedTicker,
}

impl<E: GameEventSource> Runner<E> {
    pub fn new(source: E, ticker: FixedTicker) -> Self {
        Self { source, ticker }
    }

    pub fn interval(&self) -> Duration {
        self.ticker.interval()
    }

    /// Waits at most one frame
    pub fn step(&self) -> GameEvent {
        self.step_within(self.ticker.interval())
    }

    /// Waits at most `timeout`, so keys arriving mid-frame do not delay the next tick
    pub fn step_within(&self, timeout: Duration) -> GameEvent {
        self.source.poll(timeout).unwrap_or(GameEvent::Tick)
    }
}

/// Maps a terminal key to game input. Control and alt chords are not typing.
pub fn key_input(key: &KeyEvent) -> Option<KeyInput> {
    match key.code {
        KeyCode::Backspace => Some(KeyInput::Erase),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                && !c.is_control() =>
        {
            Some(KeyInput::Char(c))
        }
        _ => None,
    }
}
