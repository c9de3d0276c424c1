use crate::capability::{TermEnv, probe_colors};
use crate::config::Config;
use crate::drawer::{Backend, Drawer, PanelDrawer};
use crate::input::{Action, InputSource, Key, route_key};
use crate::layout::{INPUT_ROWS, layout};
use crate::term::{TermBackend, TermInput};
use crate::terminal::TerminalGuard;
use crate::types::{BoxSize, Orientation, Rect};
use crate::ui_state::UiState;
use crate::visual::BeatVisual;
use crate::window::{Border, DrawError, TextStyle, Window};
use anyhow::Context;
use std::io::Write;
use std::time::{Duration, Instant};

const WARNING: &str = "\
~~~~~~~~~~~~~~~~WARNING!~~~~~~~~~~~~~~~~~~~
This program produces flashing images which
   may trigger individuals with epilepsy.

To continue, press 'y'.
Press any other key to exit.";

const WARNING_SIZE: BoxSize = BoxSize {
    width: 48,
    height: 11,
};

/// Top-level controller: routes input into the UI state and drives the drawer.
pub struct Panel<D: Drawer, I: InputSource> {
    ui: UiState,
    drawer: D,
    input: I,
}

impl<D: Drawer, I: InputSource> Panel<D, I> {
    pub fn new(ui: UiState, mut drawer: D, input: I) -> Result<Self, DrawError> {
        drawer.create_input_window()?;
        drawer.create_visual_window()?;
        drawer.refresh()?;
        Ok(Self { ui, drawer, input })
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    pub fn drawer(&self) -> &D {
        &self.drawer
    }

    pub fn drawer_mut(&mut self) -> &mut D {
        &mut self.drawer
    }

    /// Read one key and apply it. Returns `false` once the user asked to quit.
    pub fn handle_input(&mut self) -> anyhow::Result<bool> {
        let key = self.input.poll_key()?;
        match route_key(&mut self.ui, key) {
            Action::Continue => Ok(true),
            Action::Quit => {
                log::info!("quit requested");
                Ok(false)
            }
            Action::Resize(size) => {
                self.drawer.resize(size).context("relayout after resize")?;
                Ok(true)
            }
        }
    }

    /// Render the current tick.
    pub fn draw(&mut self, now: Instant) -> Result<(), DrawError> {
        self.drawer.print_ui(&self.ui)?;
        self.drawer.update_visual(&self.ui, now)
    }

    pub fn refresh(&mut self) -> Result<(), DrawError> {
        self.drawer.refresh()
    }

    pub fn redraw(&mut self) -> Result<(), DrawError> {
        self.drawer.redraw()?;
        self.drawer.refresh()
    }
}

pub fn run(cfg: Config) -> anyhow::Result<()> {
    let ui = cfg.initial_state()?;
    let orientation = Orientation::from(cfg.orientation);

    let report = probe_colors(cfg.color_mode, &TermEnv::from_process());
    for note in report.notes() {
        log::info!("color probe: {note}");
    }
    log::info!("color mode {}", report.status_label());

    let _term = TerminalGuard::new()?;
    let mut backend = TermBackend::stdout(report.color_mode).context("query terminal size")?;
    let screen = backend.screen_size()?;
    if screen.height <= INPUT_ROWS || screen.width < WARNING_SIZE.width {
        return Err(anyhow::anyhow!(
            "terminal too small (need at least {}x{}, got {}x{})",
            WARNING_SIZE.width,
            INPUT_ROWS + 1,
            screen.width,
            screen.height
        ));
    }

    layout(orientation, screen)?;

    let mut input = TermInput::new(Duration::from_millis(cfg.tick_ms));
    if !cfg.skip_warning && !confirm_warning(&mut backend, &mut input)? {
        log::info!("warning declined");
        return Ok(());
    }
    backend.clear()?;

    let visual = BeatVisual::new(Duration::from_millis(cfg.flash_interval_ms), Instant::now());
    let drawer = PanelDrawer::new(backend, orientation, Box::new(visual));
    let mut panel = Panel::new(ui, drawer, input).context("create panel windows")?;
    log::info!(
        "panel ready: bpm={} flashing={}",
        panel.ui().bpm(),
        panel.ui().flashing()
    );

    while panel.handle_input()? {
        panel.draw(Instant::now())?;
        panel.refresh()?;
    }
    Ok(())
}

/// Show the photosensitivity warning. Only `y` continues; a resize re-centers it.
fn confirm_warning<O: Write>(
    backend: &mut TermBackend<O>,
    input: &mut TermInput,
) -> anyhow::Result<bool> {
    loop {
        let screen = backend.screen_size()?;
        let rect = Rect::new(
            screen.width.saturating_sub(WARNING_SIZE.width) / 2,
            screen.height.saturating_sub(WARNING_SIZE.height) / 2,
            WARNING_SIZE.width,
            WARNING_SIZE.height,
        );
        let mut win = backend.create_window(rect, Border::Char(' '))?;
        for (i, line) in WARNING.lines().enumerate() {
            win.print(i as u16 + 2, 2, line, TextStyle::Normal);
        }
        win.refresh()?;
        backend.flush()?;

        match input.wait_key()? {
            Key::Resize(size) => {
                backend.resized(size);
                backend.clear()?;
            }
            Key::Char('y' | 'Y') => return Ok(true),
            _ => return Ok(false),
        }
    }
}
