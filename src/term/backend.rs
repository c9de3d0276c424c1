use crate::capability::ColorMode;
use crate::drawer::Backend;
use crate::term::TermWindow;
use crate::types::{BoxSize, Rect};
use crate::window::{Border, DrawError};
use crossterm::QueueableCommand;
use crossterm::style::ResetColor;
use crossterm::terminal::{self, Clear, ClearType};
use std::cell::RefCell;
use std::io::{BufWriter, Stdout, Write};
use std::rc::Rc;

/// Terminal display shared by every window it creates.
pub struct TermBackend<O: Write> {
    out: Rc<RefCell<O>>,
    size: BoxSize,
    mode: ColorMode,
}

impl TermBackend<BufWriter<Stdout>> {
    pub fn stdout(mode: ColorMode) -> Result<Self, DrawError> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::new(
            BufWriter::new(std::io::stdout()),
            BoxSize::new(cols, rows),
            mode,
        ))
    }
}

impl<O: Write> TermBackend<O> {
    pub fn new(out: O, size: BoxSize, mode: ColorMode) -> Self {
        Self {
            out: Rc::new(RefCell::new(out)),
            size,
            mode,
        }
    }

    pub fn output(&self) -> Rc<RefCell<O>> {
        Rc::clone(&self.out)
    }
}

impl<O: Write> Backend for TermBackend<O> {
    type Window = TermWindow<O>;

    fn screen_size(&self) -> Result<BoxSize, DrawError> {
        Ok(self.size)
    }

    fn resized(&mut self, size: BoxSize) {
        self.size = size;
    }

    fn create_window(&mut self, rect: Rect, border: Border) -> Result<Self::Window, DrawError> {
        let rect = rect.clipped_to(self.size);
        Ok(TermWindow::new(Rc::clone(&self.out), rect, border, self.mode))
    }

    fn flush(&mut self) -> Result<(), DrawError> {
        self.out.borrow_mut().flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DrawError> {
        self.out
            .borrow_mut()
            .queue(ResetColor)?
            .queue(Clear(ClearType::All))?;
        Ok(())
    }
}
