use crate::types::BoxSize;
use crate::ui_state::{Field, UiState};

/// Backend-neutral key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// No key arrived before the poll timeout.
    Idle,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    Char(char),
    Ctrl(char),
    /// The terminal changed size.
    Resize(BoxSize),
    Other,
}

pub trait InputSource {
    /// Next key, or [`Key::Idle`] when nothing arrived within the source's timeout.
    fn poll_key(&mut self) -> anyhow::Result<Key>;

    /// Printable characters up to Enter. Idle polls are skipped; Esc abandons the line.
    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        loop {
            match self.poll_key()? {
                Key::Enter => return Ok(Some(line)),
                Key::Esc | Key::Ctrl('c') => return Ok(None),
                Key::Backspace => {
                    line.pop();
                }
                Key::Char(c) if (' '..='~').contains(&c) => line.push(c),
                _ => {}
            }
        }
    }
}

/// What the driving loop must do after a key was routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
    Resize(BoxSize),
}

/// Apply one key to the UI state.
pub fn route_key(ui: &mut UiState, key: Key) -> Action {
    match key {
        Key::Idle | Key::Other => {}
        Key::Char('q') | Key::Char('Q') | Key::Esc | Key::Ctrl('c') => return Action::Quit,
        Key::Resize(size) => return Action::Resize(size),
        Key::Up => ui.move_selection(-1),
        Key::Down => ui.move_selection(1),
        Key::Enter => handle_selection_key(ui),
        Key::Left => handle_arrow_key(ui, -1),
        Key::Right => handle_arrow_key(ui, 1),
        _ => {}
    }
    Action::Continue
}

/// Commit key. Time signature and BPM entry have no editor yet, so only Flashing reacts.
fn handle_selection_key(ui: &mut UiState) {
    match ui.selected_field() {
        Field::TimeSignature | Field::Bpm | Field::Color | Field::Visualization => {}
        Field::Flashing => ui.toggle_flashing(),
    }
}

fn handle_arrow_key(ui: &mut UiState, direction: i8) {
    match ui.selected_field() {
        Field::TimeSignature => {}
        Field::Bpm => {
            if let Err(err) = ui.set_bpm(ui.bpm() + direction.signum() as f32) {
                log::warn!("bpm edit rejected: {err}");
            }
        }
        Field::Color => ui.set_color(direction.signum()),
        Field::Visualization => ui.set_visualization(direction.signum()),
        // Either arrow toggles.
        Field::Flashing => ui.toggle_flashing(),
    }
}
