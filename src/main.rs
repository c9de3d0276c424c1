use anyhow::Result;
use clap::Parser;
use tui_metronome::config::Config;

fn main() -> Result<()> {
    let cfg = Config::parse();
    tui_metronome::logging::init(&cfg)?;
    tui_metronome::app::run(cfg)
}
