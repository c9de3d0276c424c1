use crate::config::Config;
use anyhow::Context;
use env_logger::{Builder, Target};
use std::fs::File;

/// Logger for the panel. Output only goes to `--log-file`; `rust_log` refines the filter
/// there and is ignored otherwise, since stderr shares the screen with the panel.
pub fn builder(cfg: &Config, rust_log: Option<&str>) -> anyhow::Result<Builder> {
    let mut builder = Builder::new();
    builder.format_timestamp_millis().format_module_path(false);
    let Some(path) = &cfg.log_file else {
        builder.filter_level(log::LevelFilter::Off);
        return Ok(builder);
    };
    let file =
        File::create(path).with_context(|| format!("open log file {}", path.display()))?;
    builder
        .filter_module("tui_metronome", cfg.log_level())
        .target(Target::Pipe(Box::new(file)));
    if let Some(filters) = rust_log {
        builder.parse_filters(filters);
    }
    Ok(builder)
}

/// Install the global logger, reading `RUST_LOG` from the environment.
pub fn init(cfg: &Config) -> anyhow::Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    if rust_log.is_some() && cfg.log_file.is_none() {
        eprintln!("RUST_LOG is ignored without --log-file");
    }
    builder(cfg, rust_log.as_deref())?
        .try_init()
        .context("install logger")
}
