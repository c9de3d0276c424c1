//! Beat-synchronized flash pulse timing.
//!
//! Beats are scheduled as integer multiples of the beat period from the first tick, so a
//! late loop iteration delays one pulse but never shifts the ones after it.

use crate::fingerprint::Fingerprint;
use crate::ui_state::UiState;
use std::fmt;
use std::time::{Duration, Instant};

/// Shortest pulse that stays visible.
pub const MIN_PULSE_MS: f64 = 24.0;
pub const DEFAULT_FLASH_INTERVAL_MS: u64 = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingError {
    InvalidBpm(f32),
}

impl fmt::Display for TimingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBpm(v) => write!(f, "bpm must be positive and finite, got {v}"),
        }
    }
}

impl std::error::Error for TimingError {}

pub fn millis_per_beat(bpm: f32) -> Result<f64, TimingError> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(TimingError::InvalidBpm(bpm));
    }
    Ok(60_000.0 / bpm as f64)
}

/// Pulse length in ms: the configured interval, capped at a sixth of a beat, never below
/// [`MIN_PULSE_MS`].
pub fn pulse_width_ms(flash_interval_ms: f64, millis_per_beat: f64) -> f64 {
    flash_interval_ms.min(millis_per_beat / 6.0).max(MIN_PULSE_MS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashTransition {
    On,
    Off,
}

/// Result of one timer step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashTick {
    pub flash_on: bool,
    /// Set when this step changed the flash state or reset the machine.
    pub transition: Option<FlashTransition>,
    pub reset: bool,
}

#[derive(Debug, Clone)]
pub struct FlashTimer {
    flash_interval: Duration,
    first_tick: Instant,
    last_tick: Instant,
    tick_timer: Instant,
    flash_counter: u64,
    flash_on: bool,
    seen: Option<Fingerprint>,
}

impl FlashTimer {
    pub fn new(flash_interval: Duration, now: Instant) -> Self {
        Self {
            flash_interval,
            first_tick: now,
            last_tick: now,
            tick_timer: now,
            flash_counter: 1,
            flash_on: false,
            seen: None,
        }
    }

    pub fn flash_interval(&self) -> Duration {
        self.flash_interval
    }

    pub fn first_tick(&self) -> Instant {
        self.first_tick
    }

    /// Scheduled instant of the most recent beat.
    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }

    pub fn tick_timer(&self) -> Instant {
        self.tick_timer
    }

    pub fn flash_counter(&self) -> u64 {
        self.flash_counter
    }

    pub fn flash_on(&self) -> bool {
        self.flash_on
    }

    pub fn pulse_width_ms(&self, bpm: f32) -> Result<f64, TimingError> {
        let mpb = millis_per_beat(bpm)?;
        Ok(pulse_width_ms(duration_ms(self.flash_interval), mpb))
    }

    pub fn reset(&mut self, now: Instant) {
        self.first_tick = now;
        self.last_tick = now;
        self.tick_timer = now;
        self.flash_counter = 1;
        self.flash_on = false;
    }

    /// Advance the machine to `now`.
    ///
    /// Any change to the state fingerprint, or flashing being disabled, restarts the beat
    /// count at `now` with the flash off.
    pub fn tick(&mut self, ui: &UiState, now: Instant) -> Result<FlashTick, TimingError> {
        let fp = ui.fingerprint();
        let changed = self.seen != Some(fp);
        self.seen = Some(fp);

        if changed || !ui.flashing() {
            let was_on = self.flash_on;
            self.reset(now);
            if changed {
                log::trace!("flash timer reset at fingerprint {fp}");
            }
            return Ok(FlashTick {
                flash_on: false,
                transition: was_on.then_some(FlashTransition::Off),
                reset: true,
            });
        }

        let mpb = millis_per_beat(ui.bpm())?;
        let pulse = pulse_width_ms(duration_ms(self.flash_interval), mpb);
        let mut transition = None;

        if self.flash_on && elapsed_ms(self.tick_timer, now) >= pulse {
            self.flash_on = false;
            transition = Some(FlashTransition::Off);
        }

        let elapsed = elapsed_ms(self.first_tick, now);
        if elapsed >= mpb * self.flash_counter as f64 {
            // Beats missed during a stall collapse into one pulse.
            let beat = ((elapsed / mpb).floor() as u64).max(self.flash_counter);
            if beat > self.flash_counter {
                log::debug!("skipped {} beats after a stall", beat - self.flash_counter);
            }
            let scheduled = mpb * beat as f64;
            self.last_tick = self.first_tick + Duration::from_secs_f64(scheduled / 1000.0);
            self.flash_on = true;
            self.tick_timer = now;
            self.flash_counter = beat + 1;
            transition = Some(FlashTransition::On);
        }

        Ok(FlashTick {
            flash_on: self.flash_on,
            transition,
            reset: false,
        })
    }
}

fn elapsed_ms(since: Instant, now: Instant) -> f64 {
    duration_ms(now.saturating_duration_since(since))
}

// Whole-nanosecond division keeps millisecond boundaries exact.
fn duration_ms(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}
