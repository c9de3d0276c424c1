use crate::flash::DEFAULT_FLASH_INTERVAL_MS;
use crate::palette::MAX_COLORS;
use crate::types::{Orientation, Signature, Visualization};
use crate::ui_state::{BPM_MAX, BPM_MIN, DEFAULT_BPM, UiState};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "tui-metronome", version, about = "Beat-synchronized terminal flash panel")]
pub struct Config {
    #[arg(long, default_value_t = DEFAULT_BPM)]
    pub bpm: f32,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=MAX_COLORS as i64))]
    pub color: u8,

    #[arg(long, value_enum, default_value_t = VisualizationArg::Pendulum)]
    pub visualization: VisualizationArg,

    #[arg(long, default_value = "4/4")]
    pub signature: Signature,

    #[arg(long, default_value_t = false)]
    pub flashing: bool,

    /// Input poll timeout, which is also the frame period.
    #[arg(long, default_value_t = 16)]
    pub tick_ms: u64,

    /// Preferred flash pulse length before the per-beat cap applies.
    #[arg(long, default_value_t = DEFAULT_FLASH_INTERVAL_MS)]
    pub flash_interval_ms: u64,

    #[arg(long, value_enum, default_value_t = OrientationArg::North)]
    pub orientation: OrientationArg,

    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color_mode: ColorChoice,

    /// Skip the photosensitivity warning.
    #[arg(long, default_value_t = false)]
    pub skip_warning: bool,

    /// Write log output here instead of discarding it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log verbosity. Add more v's for more verbosity.
    #[arg(short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Initial panel state from the command line; out-of-range tempos are clamped.
    pub fn initial_state(&self) -> anyhow::Result<UiState> {
        let mut ui = UiState::default();
        ui.set_bpm(self.bpm)?;
        if self.bpm != ui.bpm() {
            log::warn!(
                "--bpm {} outside {BPM_MIN}..={BPM_MAX}, using {}",
                self.bpm,
                ui.bpm()
            );
        }
        ui.set_color_index(self.color);
        ui.set_visualization_kind(self.visualization.into());
        ui.set_signature(self.signature.upper, self.signature.lower)?;
        ui.set_flashing(self.flashing);
        Ok(ui)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    #[value(alias = "24bit")]
    Truecolor,
    #[value(alias = "16")]
    Ansi,
    #[value(alias = "none", alias = "monochrome")]
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrientationArg {
    North,
    East,
    South,
    West,
}

impl From<OrientationArg> for Orientation {
    fn from(v: OrientationArg) -> Self {
        match v {
            OrientationArg::North => Self::North,
            OrientationArg::East => Self::East,
            OrientationArg::South => Self::South,
            OrientationArg::West => Self::West,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VisualizationArg {
    Pendulum,
    #[value(name = "particles-down")]
    ParticlesTopDown,
    #[value(name = "particles-up")]
    ParticlesBottomUp,
    #[value(name = "particles-right")]
    ParticlesLeftToRight,
    #[value(name = "particles-left")]
    ParticlesRightToLeft,
    #[value(name = "progress-down")]
    ProgressTopDown,
    #[value(name = "progress-up")]
    ProgressBottomUp,
    #[value(name = "progress-right")]
    ProgressLeftToRight,
    #[value(name = "progress-left")]
    ProgressRightToLeft,
    #[value(name = "flash", alias = "flash-only")]
    FlashOnly,
}

impl From<VisualizationArg> for Visualization {
    fn from(v: VisualizationArg) -> Self {
        match v {
            VisualizationArg::Pendulum => Self::Pendulum,
            VisualizationArg::ParticlesTopDown => Self::ParticlesTopDown,
            VisualizationArg::ParticlesBottomUp => Self::ParticlesBottomUp,
            VisualizationArg::ParticlesLeftToRight => Self::ParticlesLeftToRight,
            VisualizationArg::ParticlesRightToLeft => Self::ParticlesRightToLeft,
            VisualizationArg::ProgressTopDown => Self::ProgressTopDown,
            VisualizationArg::ProgressBottomUp => Self::ProgressBottomUp,
            VisualizationArg::ProgressLeftToRight => Self::ProgressLeftToRight,
            VisualizationArg::ProgressRightToLeft => Self::ProgressRightToLeft,
            VisualizationArg::FlashOnly => Self::FlashOnly,
        }
    }
}
