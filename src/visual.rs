use crate::flash::{FlashTick, FlashTimer, millis_per_beat};
use crate::palette::{Scheme, scheme};
use crate::types::{BoxSize, Direction, Position, Rect, Visualization};
use crate::ui_state::UiState;
use crate::window::{DrawError, Window};
use std::time::{Duration, Instant};

/// Renders beat-driven visuals into a window it does not own.
pub trait VisualOutput {
    fn update(&mut self, ui: &UiState, now: Instant, win: &mut dyn Window) -> Result<(), DrawError>;
}

/// Beat position independent of the flash timer, which resets whenever flashing is off.
#[derive(Debug, Clone, Copy)]
pub struct BeatClock {
    origin: Instant,
    bpm: f32,
}

impl BeatClock {
    pub fn new(bpm: f32, now: Instant) -> Self {
        Self { origin: now, bpm }
    }

    /// Restarts from `now` when the tempo changed.
    pub fn sync(&mut self, bpm: f32, now: Instant) {
        if bpm != self.bpm {
            self.origin = now;
            self.bpm = bpm;
        }
    }

    /// Beats elapsed since the origin, fractional.
    pub fn beats(&self, now: Instant) -> Result<f64, DrawError> {
        let mpb = millis_per_beat(self.bpm)?;
        let ms = now.saturating_duration_since(self.origin).as_nanos() as f64 / 1_000_000.0;
        Ok(ms / mpb)
    }
}

#[derive(Debug, Clone, Copy)]
struct Particle {
    /// Distance travelled along the direction of motion, in cells.
    along: f32,
    /// Fixed offset across the direction of motion.
    across: u16,
    speed: f32,
}

/// Flash overlay plus the selected visualization.
pub struct BeatVisual {
    timer: FlashTimer,
    clock: BeatClock,
    drops: Vec<Particle>,
    rng: fastrand::Rng,
    last_frame: Option<Instant>,
    last_beat: Option<u64>,
    last_kind: Visualization,
    last_tick: Option<FlashTick>,
}

impl BeatVisual {
    pub fn new(flash_interval: Duration, now: Instant) -> Self {
        Self::with_rng(flash_interval, now, fastrand::Rng::new())
    }

    pub fn with_rng(flash_interval: Duration, now: Instant, rng: fastrand::Rng) -> Self {
        Self {
            timer: FlashTimer::new(flash_interval, now),
            clock: BeatClock::new(0.0, now),
            drops: Vec::new(),
            rng,
            last_frame: None,
            last_beat: None,
            last_kind: Visualization::default(),
            last_tick: None,
        }
    }

    pub fn timer(&self) -> &FlashTimer {
        &self.timer
    }

    pub fn last_tick(&self) -> Option<FlashTick> {
        self.last_tick
    }

    pub fn drop_count(&self) -> usize {
        self.drops.len()
    }

    pub fn draw_flash(&self, flash_on: bool, colors: &Scheme, win: &mut dyn Window) {
        win.fill(if flash_on { colors.flash } else { colors.idle });
    }

    /// Pendulum swinging between the window edges, reaching an extreme on every beat.
    pub fn draw_metronome(&self, beats: f64, colors: &Scheme, win: &mut dyn Window) {
        let area = interior(win.size());
        if area.width < 3 || area.height < 2 {
            return;
        }
        let pivot_x = area.x as f32 + (area.width - 1) as f32 / 2.0;
        let amplitude = (area.width as f32 / 2.0 - 2.0).max(0.0);
        let swing = -(std::f64::consts::PI * beats).cos() as f32;
        let bob_x = pivot_x + amplitude * swing;
        let bottom = area.y + area.height - 1;

        let pivot = Position::new(pivot_x, area.y as f32);
        let bob = Position::new(bob_x, bottom as f32);
        let span = (bottom - area.y).max(1) as f32;
        for row in area.y..bottom {
            let t = (row - area.y) as f32 / span;
            let x = pivot.x + (bob.x - pivot.x) * t;
            win.put(Position::new(x.round() as u16, row), '│', colors.accent);
        }
        let bob_col = bob.x.round() as u16;
        win.fill_rect(
            Rect::new(bob_col.saturating_sub(1), bottom, 3, 1),
            colors.accent,
        );
    }

    /// Release a wave of particles on every new beat and move the live ones.
    pub fn step_particles(
        &mut self,
        beats: f64,
        dt: f32,
        direction: Direction,
        area: Rect,
    ) -> Result<(), DrawError> {
        if area.width == 0 || area.height == 0 {
            self.drops.clear();
            return Ok(());
        }
        let (length, breadth) = match direction {
            Direction::TopDown | Direction::BottomUp => (area.height, area.width),
            Direction::LeftToRight | Direction::RightToLeft => (area.width, area.height),
        };

        let beat = beats.floor().max(0.0) as u64;
        if self.last_beat != Some(beat) {
            self.last_beat = Some(beat);
            let secs_per_beat = millis_per_beat(self.clock.bpm)? as f32 / 1000.0;
            let count = (breadth / 4).max(1);
            for _ in 0..count {
                // Cross the window in one to two beats.
                let beats_to_cross = 1.0 + self.rng.f32();
                self.drops.push(Particle {
                    along: 0.0,
                    across: self.rng.u16(0..breadth),
                    speed: length as f32 / (beats_to_cross * secs_per_beat),
                });
            }
        }

        for d in &mut self.drops {
            d.along += d.speed * dt;
        }
        self.drops
            .retain(|d| d.along < length as f32 && d.across < breadth);
        Ok(())
    }

    /// Draw the live particles travelling in `direction`.
    pub fn draw_raindrops(&self, direction: Direction, colors: &Scheme, win: &mut dyn Window) {
        let area = interior(win.size());
        let glyph = match direction {
            Direction::TopDown | Direction::BottomUp => '│',
            Direction::LeftToRight | Direction::RightToLeft => '─',
        };
        for d in &self.drops {
            let along = d.along as u16;
            let pos = match direction {
                Direction::TopDown => Position::new(area.x + d.across, area.y + along),
                Direction::BottomUp => {
                    Position::new(area.x + d.across, (area.y + area.height).saturating_sub(along + 1))
                }
                Direction::LeftToRight => Position::new(area.x + along, area.y + d.across),
                Direction::RightToLeft => {
                    Position::new((area.x + area.width).saturating_sub(along + 1), area.y + d.across)
                }
            };
            win.put(pos, glyph, colors.accent);
        }
    }

    /// Bar filling across one measure of the time signature.
    pub fn draw_progress(
        &self,
        beats: f64,
        beats_per_bar: u8,
        direction: Direction,
        colors: &Scheme,
        win: &mut dyn Window,
    ) {
        let area = interior(win.size());
        let per_bar = beats_per_bar.max(1) as f64;
        let progress = (beats.rem_euclid(per_bar) / per_bar) as f32;
        let rect = match direction {
            Direction::TopDown => {
                let h = (area.height as f32 * progress).round() as u16;
                Rect::new(area.x, area.y, area.width, h)
            }
            Direction::BottomUp => {
                let h = (area.height as f32 * progress).round() as u16;
                Rect::new(area.x, area.y + area.height - h, area.width, h)
            }
            Direction::LeftToRight => {
                let w = (area.width as f32 * progress).round() as u16;
                Rect::new(area.x, area.y, w, area.height)
            }
            Direction::RightToLeft => {
                let w = (area.width as f32 * progress).round() as u16;
                Rect::new(area.x + area.width - w, area.y, w, area.height)
            }
        };
        win.fill_rect(rect, colors.accent);
    }
}

impl VisualOutput for BeatVisual {
    fn update(&mut self, ui: &UiState, now: Instant, win: &mut dyn Window) -> Result<(), DrawError> {
        let tick = self.timer.tick(ui, now)?;
        self.last_tick = Some(tick);
        self.clock.sync(ui.bpm(), now);

        let dt = self
            .last_frame
            .map(|t| now.saturating_duration_since(t).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);

        let kind = ui.visualization();
        if kind != self.last_kind {
            self.drops.clear();
            self.last_beat = None;
            self.last_kind = kind;
        }

        let beats = self.clock.beats(now)?;
        let particles = kind.particle_direction();
        if let Some(direction) = particles {
            self.step_particles(beats, dt, direction, interior(win.size()))?;
        }

        let colors = scheme(ui.color());
        self.draw_flash(tick.flash_on, colors, win);
        if tick.flash_on {
            return Ok(());
        }

        if let Some(direction) = particles {
            self.draw_raindrops(direction, colors, win);
        } else if let Some(direction) = kind.progress_direction() {
            self.draw_progress(beats, ui.signature().upper, direction, colors, win);
        } else if kind == Visualization::Pendulum {
            self.draw_metronome(beats, colors, win);
        }
        Ok(())
    }
}

/// Drawable area of a bordered child window.
fn interior(size: BoxSize) -> Rect {
    Rect::new(1, 1, size.width.saturating_sub(2), size.height.saturating_sub(2))
}
