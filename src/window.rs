use crate::flash::TimingError;
use crate::types::{BoxSize, Orientation, Position, Rect, Rgba};
use std::fmt;

#[derive(Debug)]
pub enum DrawError {
    /// Primitive declared by [`Window`] but not provided by the backend.
    NotImplemented(&'static str),
    UnsupportedLayout(Orientation),
    MissingWindow(&'static str),
    Timing(TimingError),
    Io(std::io::Error),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotImplemented(what) => write!(f, "{what} drawing is not implemented"),
            Self::UnsupportedLayout(o) => write!(f, "{o:?} layout is not implemented"),
            Self::MissingWindow(role) => write!(f, "{role} window has not been created"),
            Self::Timing(err) => write!(f, "timing: {err}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for DrawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timing(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DrawError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<TimingError> for DrawError {
    fn from(err: TimingError) -> Self {
        Self::Timing(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Border {
    #[default]
    None,
    /// Box-drawing line characters.
    Line,
    /// Every border cell uses the given character.
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    #[default]
    Normal,
    /// Highlighted (reverse video on terminals).
    Standout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgba,
    pub bg: Rgba,
    pub style: TextStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgba::rgb(220, 228, 242),
            bg: Rgba::BLACK,
            style: TextStyle::Normal,
        }
    }
}

impl Cell {
    pub fn blank(bg: Rgba) -> Self {
        Self {
            bg,
            ..Self::default()
        }
    }
}

/// A drawable rectangular surface owned by a drawer.
pub trait Window {
    fn is_active(&self) -> bool;
    /// Push buffered changes to the display.
    fn refresh(&mut self) -> Result<(), DrawError>;
    /// Mark the whole surface dirty so the next refresh repaints everything.
    fn redraw(&mut self);
    fn size(&self) -> BoxSize;
    fn origin(&self) -> Position;
    fn resize(&mut self, rect: Rect) -> Result<(), DrawError>;
    /// Fill the area inside the border.
    fn fill(&mut self, color: Rgba);
    /// Fill a rectangle in window coordinates, clipped to the area inside the border.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn put(&mut self, pos: Position, ch: char, fg: Rgba);
    fn print(&mut self, row: u16, col: u16, text: &str, style: TextStyle);

    fn draw_circle(
        &mut self,
        _radius: f32,
        _center: Position<f32>,
        _border: Rgba,
        _thickness: f32,
        _fill: Option<Rgba>,
    ) -> Result<(), DrawError> {
        Err(DrawError::NotImplemented("circle"))
    }

    fn draw_triangle(
        &mut self,
        _points: [Position<f32>; 3],
        _border: Rgba,
        _thickness: f32,
        _offset: Position<f32>,
        _fill: Option<Rgba>,
    ) -> Result<(), DrawError> {
        Err(DrawError::NotImplemented("triangle"))
    }

    fn draw_line(
        &mut self,
        _from: Position<f32>,
        _to: Position<f32>,
        _thickness: f32,
        _offset: Position<f32>,
    ) -> Result<(), DrawError> {
        Err(DrawError::NotImplemented("line"))
    }
}

/// Back buffer shared by cell-based windows. Only cells whose content changed since the
/// last [`CellGrid::take_dirty`] are reported.
#[derive(Debug, Clone)]
pub struct CellGrid {
    size: BoxSize,
    border: Border,
    cells: Vec<Cell>,
    dirty: Vec<bool>,
}

impl CellGrid {
    pub fn new(size: BoxSize, border: Border) -> Self {
        let mut grid = Self {
            size,
            border,
            cells: vec![Cell::default(); size.area()],
            dirty: vec![true; size.area()],
        };
        grid.draw_border();
        grid
    }

    pub fn size(&self) -> BoxSize {
        self.size
    }

    /// Drop contents and reallocate at `size`; everything becomes dirty.
    pub fn resize(&mut self, size: BoxSize) {
        self.size = size;
        self.cells = vec![Cell::default(); size.area()];
        self.dirty = vec![true; size.area()];
        self.draw_border();
    }

    pub fn interior(&self) -> Rect {
        let inset = if self.border == Border::None { 0 } else { 1 };
        Rect::new(
            inset,
            inset,
            self.size.width.saturating_sub(inset * 2),
            self.size.height.saturating_sub(inset * 2),
        )
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, col: u16, row: u16, cell: Cell) {
        let Some(i) = self.index(col, row) else {
            return;
        };
        if self.cells[i] != cell {
            self.cells[i] = cell;
            self.dirty[i] = true;
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let inner = self.interior();
        let x0 = rect.x.max(inner.x);
        let y0 = rect.y.max(inner.y);
        let x1 = rect.x.saturating_add(rect.width).min(inner.x + inner.width);
        let y1 = rect.y.saturating_add(rect.height).min(inner.y + inner.height);
        for row in y0..y1 {
            for col in x0..x1 {
                self.set(col, row, Cell::blank(color));
            }
        }
    }

    /// Writes a glyph over the existing background.
    pub fn put(&mut self, col: u16, row: u16, ch: char, fg: Rgba) {
        if !self.in_interior(col, row) {
            return;
        }
        let bg = self.get(col, row).map(|c| c.bg).unwrap_or_default();
        self.set(
            col,
            row,
            Cell {
                ch,
                fg,
                bg,
                style: TextStyle::Normal,
            },
        );
    }

    /// Text is clipped at the right edge of the interior.
    pub fn print(&mut self, row: u16, col: u16, text: &str, style: TextStyle) {
        let inner = self.interior();
        if row < inner.y || row >= inner.y + inner.height {
            return;
        }
        let right = inner.x + inner.width;
        for (i, ch) in text.chars().enumerate() {
            let Ok(offset) = u16::try_from(i) else {
                break;
            };
            let x = col.saturating_add(offset);
            if x >= right {
                break;
            }
            if x < inner.x {
                continue;
            }
            self.set(
                x,
                row,
                Cell {
                    ch,
                    style,
                    ..Cell::default()
                },
            );
        }
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty.iter_mut().for_each(|d| *d = true);
    }

    /// Row-major list of `(col, row, cell)` for every dirty cell; clears the dirty set.
    pub fn take_dirty(&mut self) -> Vec<(u16, u16, Cell)> {
        let w = self.size.width as usize;
        let mut out = Vec::new();
        if w == 0 {
            return out;
        }
        for (i, dirty) in self.dirty.iter_mut().enumerate() {
            if *dirty {
                *dirty = false;
                out.push(((i % w) as u16, (i / w) as u16, self.cells[i]));
            }
        }
        out
    }

    fn in_interior(&self, col: u16, row: u16) -> bool {
        let inner = self.interior();
        col >= inner.x && col < inner.x + inner.width && row >= inner.y && row < inner.y + inner.height
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        if col >= self.size.width || row >= self.size.height {
            return None;
        }
        Some(row as usize * self.size.width as usize + col as usize)
    }

    fn draw_border(&mut self) {
        let (w, h) = (self.size.width, self.size.height);
        if self.border == Border::None || w < 2 || h < 2 {
            return;
        }
        let border = self.border;
        let glyph = |line: char| match border {
            Border::Char(c) => c,
            _ => line,
        };
        let (horiz, vert) = (glyph('─'), glyph('│'));
        let corners = [glyph('┌'), glyph('┐'), glyph('└'), glyph('┘')];
        let edge = |ch| Cell {
            ch,
            ..Cell::default()
        };
        for col in 1..w - 1 {
            self.set(col, 0, edge(horiz));
            self.set(col, h - 1, edge(horiz));
        }
        for row in 1..h - 1 {
            self.set(0, row, edge(vert));
            self.set(w - 1, row, edge(vert));
        }
        self.set(0, 0, edge(corners[0]));
        self.set(w - 1, 0, edge(corners[1]));
        self.set(0, h - 1, edge(corners[2]));
        self.set(w - 1, h - 1, edge(corners[3]));
    }
}
