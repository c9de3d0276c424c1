use crate::capability::ColorMode;
use crate::types::{BoxSize, Position, Rect, Rgba};
use crate::window::{Border, Cell, CellGrid, DrawError, TextStyle, Window};
use crossterm::cursor::MoveTo;
use crossterm::QueueableCommand;
use crossterm::style::{Attribute, Color, Colors, Print, SetAttribute, SetColors};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Backgrounds brighter than this are drawn in reverse video when color is unavailable.
const MONO_LUMA_THRESHOLD: u8 = 64;

/// A cell-buffered region of the terminal. `refresh` writes only the cells that changed.
pub struct TermWindow<O: Write> {
    out: Rc<RefCell<O>>,
    grid: CellGrid,
    origin: Position,
    mode: ColorMode,
    active: bool,
}

impl<O: Write> TermWindow<O> {
    pub fn new(out: Rc<RefCell<O>>, rect: Rect, border: Border, mode: ColorMode) -> Self {
        Self {
            out,
            grid: CellGrid::new(rect.size(), border),
            origin: rect.origin(),
            mode,
            active: true,
        }
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl<O: Write> Window for TermWindow<O> {
    fn is_active(&self) -> bool {
        self.active
    }

    fn refresh(&mut self) -> Result<(), DrawError> {
        if !self.active {
            return Ok(());
        }
        let dirty = self.grid.take_dirty();
        if dirty.is_empty() {
            return Ok(());
        }
        let mut guard = self.out.borrow_mut();
        let out = &mut *guard;
        let mut last_style: Option<(Color, Color, bool)> = None;
        let mut cursor: Option<(u16, u16)> = None;
        for (col, row, cell) in dirty {
            let x = self.origin.x.saturating_add(col);
            let y = self.origin.y.saturating_add(row);
            if cursor != Some((x, y)) {
                out.queue(MoveTo(x, y))?;
            }
            let style = cell_style(&cell, self.mode);
            if last_style != Some(style) {
                let (fg, bg, reverse) = style;
                out.queue(SetAttribute(Attribute::Reset))?
                    .queue(SetColors(Colors::new(fg, bg)))?;
                if reverse {
                    out.queue(SetAttribute(Attribute::Reverse))?;
                }
                last_style = Some(style);
            }
            out.queue(Print(cell.ch))?;
            cursor = Some((x.saturating_add(1), y));
        }
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn redraw(&mut self) {
        self.grid.mark_all_dirty();
    }

    fn size(&self) -> BoxSize {
        self.grid.size()
    }

    fn origin(&self) -> Position {
        self.origin
    }

    fn resize(&mut self, rect: Rect) -> Result<(), DrawError> {
        self.origin = rect.origin();
        self.grid.resize(rect.size());
        Ok(())
    }

    fn fill(&mut self, color: Rgba) {
        let inner = self.grid.interior();
        self.grid.fill_rect(inner, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.grid.fill_rect(rect, color);
    }

    fn put(&mut self, pos: Position, ch: char, fg: Rgba) {
        self.grid.put(pos.x, pos.y, ch, fg);
    }

    fn print(&mut self, row: u16, col: u16, text: &str, style: TextStyle) {
        self.grid.print(row, col, text, style);
    }
}

fn cell_style(cell: &Cell, mode: ColorMode) -> (Color, Color, bool) {
    let standout = cell.style == TextStyle::Standout;
    match mode {
        ColorMode::Monochrome => {
            let lit = cell.ch == ' ' && cell.bg.luma() > MONO_LUMA_THRESHOLD;
            (Color::Reset, Color::Reset, standout != lit)
        }
        _ => (
            to_term_color(cell.fg, mode),
            to_term_color(cell.bg, mode),
            standout,
        ),
    }
}

const ANSI16: [(Color, Rgba); 16] = [
    (Color::Black, Rgba::rgb(0, 0, 0)),
    (Color::DarkRed, Rgba::rgb(128, 0, 0)),
    (Color::DarkGreen, Rgba::rgb(0, 128, 0)),
    (Color::DarkYellow, Rgba::rgb(128, 128, 0)),
    (Color::DarkBlue, Rgba::rgb(0, 0, 128)),
    (Color::DarkMagenta, Rgba::rgb(128, 0, 128)),
    (Color::DarkCyan, Rgba::rgb(0, 128, 128)),
    (Color::Grey, Rgba::rgb(192, 192, 192)),
    (Color::DarkGrey, Rgba::rgb(128, 128, 128)),
    (Color::Red, Rgba::rgb(255, 0, 0)),
    (Color::Green, Rgba::rgb(0, 255, 0)),
    (Color::Yellow, Rgba::rgb(255, 255, 0)),
    (Color::Blue, Rgba::rgb(0, 0, 255)),
    (Color::Magenta, Rgba::rgb(255, 0, 255)),
    (Color::Cyan, Rgba::rgb(0, 255, 255)),
    (Color::White, Rgba::rgb(255, 255, 255)),
];

pub fn to_term_color(c: Rgba, mode: ColorMode) -> Color {
    match mode {
        ColorMode::TrueColor => Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        },
        ColorMode::Ansi16 => {
            let dist = |p: Rgba| {
                let dr = c.r as i32 - p.r as i32;
                let dg = c.g as i32 - p.g as i32;
                let db = c.b as i32 - p.b as i32;
                dr * dr + dg * dg + db * db
            };
            ANSI16
                .iter()
                .min_by_key(|(_, p)| dist(*p))
                .map(|(color, _)| *color)
                .unwrap_or(Color::Reset)
        }
        ColorMode::Monochrome => Color::Reset,
    }
}
