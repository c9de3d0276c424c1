use crate::input::{InputSource, Key};
use crate::types::BoxSize;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Keyboard input from the controlling terminal.
pub struct TermInput {
    timeout: Duration,
}

impl TermInput {
    /// `timeout` bounds each poll; zero makes polling non-blocking.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Block until a real key (or resize) arrives.
    pub fn wait_key(&mut self) -> anyhow::Result<Key> {
        loop {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => return Ok(map_key_event(k)),
                Event::Resize(cols, rows) => return Ok(Key::Resize(BoxSize::new(cols, rows))),
                _ => {}
            }
        }
    }
}

impl InputSource for TermInput {
    fn poll_key(&mut self) -> anyhow::Result<Key> {
        if !event::poll(self.timeout)? {
            return Ok(Key::Idle);
        }
        Ok(match event::read()? {
            Event::Key(k) if k.kind != KeyEventKind::Release => map_key_event(k),
            Event::Resize(cols, rows) => Key::Resize(BoxSize::new(cols, rows)),
            _ => Key::Idle,
        })
    }
}

pub fn map_key_event(k: KeyEvent) -> Key {
    if k.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(c) = k.code {
            return Key::Ctrl(c.to_ascii_lowercase());
        }
    }
    match k.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}
