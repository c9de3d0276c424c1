use anyhow::Context;
use crossterm::{
    QueueableCommand, cursor,
    style::ResetColor,
    terminal::{self, ClearType},
};
use std::io::{Stdout, Write, stdout};

/// Puts the controlling terminal into panel mode and restores it on drop.
///
/// Raw mode is entered first; a failure while switching screens still leaves a guard
/// behind, so the caller's `?` unwinds through `Drop`.
pub struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    pub fn new() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        let mut guard = Self { out: stdout() };

        guard
            .out
            .queue(terminal::EnterAlternateScreen)
            .and_then(|o| o.queue(terminal::DisableLineWrap))
            .and_then(|o| o.queue(terminal::Clear(ClearType::All)))
            .and_then(|o| o.queue(cursor::Hide))
            .and_then(|o| o.flush())
            .context("switch to the panel screen")?;

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let out = &mut self.out;
        let _ = out
            .queue(ResetColor)
            .and_then(|o| o.queue(terminal::EnableLineWrap))
            .and_then(|o| o.queue(cursor::Show))
            .and_then(|o| o.queue(terminal::LeaveAlternateScreen));
        let _ = out.flush();
    }
}
