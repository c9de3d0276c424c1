use crate::fingerprint::Fingerprint;
use crate::layout::{PanelLayout, layout};
use crate::types::{BoxSize, Orientation, Rect};
use crate::ui_state::{Field, UiState};
use crate::visual::VisualOutput;
use crate::window::{Border, DrawError, TextStyle, Window};
use std::time::Instant;

/// Concrete output system: creates windows and owns the physical display.
pub trait Backend {
    type Window: Window;

    fn screen_size(&self) -> Result<BoxSize, DrawError>;
    /// Called before children are laid out again for a new screen size.
    fn resized(&mut self, _size: BoxSize) {}
    fn create_window(&mut self, rect: Rect, border: Border) -> Result<Self::Window, DrawError>;
    /// Push everything the windows have queued to the display.
    fn flush(&mut self) -> Result<(), DrawError>;
    fn clear(&mut self) -> Result<(), DrawError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Input,
    Visual,
}

impl Role {
    pub fn name(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Visual => "visual",
        }
    }
}

/// Owns the input and visual windows and composes their updates.
pub trait Drawer {
    fn create_input_window(&mut self) -> Result<(), DrawError>;
    fn create_visual_window(&mut self) -> Result<(), DrawError>;
    fn refresh(&mut self) -> Result<(), DrawError>;
    /// Repaint every child from scratch.
    fn redraw(&mut self) -> Result<(), DrawError>;
    fn window_size(&self) -> Result<BoxSize, DrawError>;
    /// Render the field list. Returns `false` when skipped because nothing changed.
    fn print_ui(&mut self, ui: &UiState) -> Result<bool, DrawError>;
    fn update_visual(&mut self, ui: &UiState, now: Instant) -> Result<(), DrawError>;
    fn resize(&mut self, screen: BoxSize) -> Result<(), DrawError>;
}

pub struct PanelDrawer<B: Backend> {
    backend: B,
    orientation: Orientation,
    children: Vec<(Role, B::Window)>,
    visual: Box<dyn VisualOutput>,
    last_ui: Option<Fingerprint>,
    force_redraw: bool,
}

impl<B: Backend> PanelDrawer<B> {
    pub fn new(backend: B, orientation: Orientation, visual: Box<dyn VisualOutput>) -> Self {
        Self {
            backend,
            orientation,
            children: Vec::new(),
            visual,
            last_ui: None,
            force_redraw: true,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn window(&self, role: Role) -> Option<&B::Window> {
        self.children.iter().find(|(r, _)| *r == role).map(|(_, w)| w)
    }

    pub fn window_mut(&mut self, role: Role) -> Option<&mut B::Window> {
        self.children
            .iter_mut()
            .find(|(r, _)| *r == role)
            .map(|(_, w)| w)
    }

    pub fn force_redraw_pending(&self) -> bool {
        self.force_redraw
    }

    fn current_layout(&self) -> Result<PanelLayout, DrawError> {
        layout(self.orientation, self.backend.screen_size()?)
    }

    fn create_child(&mut self, role: Role, rect: Rect) -> Result<(), DrawError> {
        if let Some(win) = self.window_mut(role) {
            return win.resize(rect);
        }
        let win = self.backend.create_window(rect, Border::Line)?;
        log::debug!("created {} window at {rect:?}", role.name());
        self.children.push((role, win));
        self.force_redraw = true;
        Ok(())
    }
}

impl<B: Backend> Drawer for PanelDrawer<B> {
    fn create_input_window(&mut self) -> Result<(), DrawError> {
        let rect = self.current_layout()?.input;
        self.create_child(Role::Input, rect)
    }

    fn create_visual_window(&mut self) -> Result<(), DrawError> {
        let rect = self.current_layout()?.visual;
        self.create_child(Role::Visual, rect)
    }

    fn refresh(&mut self) -> Result<(), DrawError> {
        for (_, win) in self.children.iter_mut().filter(|(_, w)| w.is_active()) {
            win.refresh()?;
        }
        self.backend.flush()
    }

    /// Inactive children keep their buffered changes until reactivated.
    fn redraw(&mut self) -> Result<(), DrawError> {
        for (_, win) in self.children.iter_mut().filter(|(_, w)| w.is_active()) {
            win.redraw();
            win.refresh()?;
        }
        self.backend.flush()
    }

    fn window_size(&self) -> Result<BoxSize, DrawError> {
        self.backend.screen_size()
    }

    fn print_ui(&mut self, ui: &UiState) -> Result<bool, DrawError> {
        let fp = ui.fingerprint();
        if !self.force_redraw && self.last_ui == Some(fp) {
            return Ok(false);
        }
        let selection = ui.selection();
        let win = self
            .window_mut(Role::Input)
            .ok_or(DrawError::MissingWindow(Role::Input.name()))?;
        let width = win.size().width.saturating_sub(2) as usize;
        for field in Field::ALL {
            let row = field.index() as u16 + 1;
            let label = ui.label(field);
            let style = if field.index() == selection {
                TextStyle::Standout
            } else {
                TextStyle::Normal
            };
            win.print(row, 1, &label, style);
            let used = label.chars().count();
            if used < width {
                let pad = " ".repeat(width - used);
                win.print(row, 1 + used as u16, &pad, TextStyle::Normal);
            }
        }
        self.last_ui = Some(fp);
        self.force_redraw = false;
        Ok(true)
    }

    fn update_visual(&mut self, ui: &UiState, now: Instant) -> Result<(), DrawError> {
        let Some((_, win)) = self.children.iter_mut().find(|(r, _)| *r == Role::Visual) else {
            return Err(DrawError::MissingWindow(Role::Visual.name()));
        };
        self.visual.update(ui, now, win)
    }

    fn resize(&mut self, screen: BoxSize) -> Result<(), DrawError> {
        let PanelLayout { input, visual } = layout(self.orientation, screen)?;
        log::debug!("resize to {}x{}", screen.width, screen.height);
        self.backend.resized(screen);
        for (role, win) in &mut self.children {
            let rect = match role {
                Role::Input => input,
                Role::Visual => visual,
            };
            win.resize(rect)?;
        }
        self.force_redraw = true;
        self.backend.clear()?;
        self.redraw()
    }
}

impl<B: Backend> Drop for PanelDrawer<B> {
    fn drop(&mut self) {
        while let Some((role, win)) = self.children.pop() {
            log::trace!("dropping {} window", role.name());
            drop(win);
        }
    }
}
