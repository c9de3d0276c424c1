use clap::Parser;
use tui_metronome::capability::{ColorMode, TermEnv, probe_colors};
use tui_metronome::config::{ColorChoice, Config, OrientationArg, VisualizationArg};
use tui_metronome::types::{Orientation, Signature, Visualization};
use tui_metronome::ui_state::{BPM_MAX, BPM_MIN};

fn env(term: &str, colorterm: Option<&str>, no_color: bool) -> TermEnv {
    TermEnv {
        term: Some(term.to_string()),
        colorterm: colorterm.map(str::to_string),
        no_color,
    }
}

fn parse(args: &[&str]) -> Result<Config, clap::Error> {
    Config::try_parse_from(std::iter::once("tui-metronome").chain(args.iter().copied()))
}

#[test]
fn probe_detects_truecolor() {
    let report = probe_colors(ColorChoice::Auto, &env("xterm-256color", Some("truecolor"), false));
    assert_eq!(report.color_mode, ColorMode::TrueColor);
    assert!(report.auto_probe);
    assert!(!report.degraded());
    assert_eq!(report.status_label(), "ok TrueColor");

    let report = probe_colors(ColorChoice::Auto, &env("xterm", Some("24BIT"), false));
    assert_eq!(report.color_mode, ColorMode::TrueColor);
}

#[test]
fn probe_falls_back_to_sixteen_colors() {
    let report = probe_colors(ColorChoice::Auto, &env("xterm-256color", None, false));
    assert_eq!(report.color_mode, ColorMode::Ansi16);
    assert!(report.degraded());
    assert_eq!(report.status_label(), "fallback Ansi16");
    assert!(report.notes().iter().any(|n| n.contains("16 colors")));
}

#[test]
fn probe_goes_monochrome_without_color() {
    let report = probe_colors(ColorChoice::Auto, &env("xterm", Some("truecolor"), true));
    assert_eq!(report.color_mode, ColorMode::Monochrome);
    assert!(report.notes().iter().any(|n| n.contains("NO_COLOR")));

    let report = probe_colors(ColorChoice::Auto, &env("dumb", None, false));
    assert_eq!(report.color_mode, ColorMode::Monochrome);

    let report = probe_colors(ColorChoice::Auto, &TermEnv::default());
    assert_eq!(report.color_mode, ColorMode::Monochrome);
}

#[test]
fn forced_choice_skips_probe() {
    let report = probe_colors(ColorChoice::Mono, &env("xterm", Some("truecolor"), false));
    assert_eq!(report.color_mode, ColorMode::Monochrome);
    assert!(!report.auto_probe);
    assert_eq!(report.status_label(), "forced Monochrome");

    let report = probe_colors(ColorChoice::Truecolor, &env("dumb", None, true));
    assert_eq!(report.color_mode, ColorMode::TrueColor);
}

#[test]
fn defaults_build_default_state() {
    let cfg = parse(&[]).expect("defaults parse");
    assert_eq!(cfg.bpm, 120.0);
    assert_eq!(cfg.signature, Signature::default());
    assert_eq!(cfg.orientation, OrientationArg::North);
    assert_eq!(cfg.color_mode, ColorChoice::Auto);
    assert_eq!(cfg.flash_interval_ms, 64);
    assert!(!cfg.skip_warning);
    assert!(cfg.log_file.is_none());
    assert_eq!(cfg.log_level(), log::LevelFilter::Info);

    let ui = cfg.initial_state().expect("state");
    assert_eq!(ui.fingerprint(), tui_metronome::ui_state::UiState::default().fingerprint());
}

#[test]
fn flags_override_initial_state() {
    let cfg = parse(&[
        "--bpm",
        "90.5",
        "--color",
        "3",
        "--visualization",
        "progress-left",
        "--signature",
        "7:8",
        "--flashing",
        "--orientation",
        "east",
        "-vv",
    ])
    .expect("parse");
    assert_eq!(Orientation::from(cfg.orientation), Orientation::East);
    assert_eq!(cfg.log_level(), log::LevelFilter::Trace);

    let ui = cfg.initial_state().expect("state");
    assert_eq!(ui.bpm(), 90.5);
    assert_eq!(ui.color(), 3);
    assert_eq!(ui.visualization(), Visualization::ProgressRightToLeft);
    assert_eq!(ui.signature(), Signature { upper: 7, lower: 8 });
    assert!(ui.flashing());
}

#[test]
fn out_of_range_bpm_is_clamped() {
    let ui = parse(&["--bpm", "900"]).expect("parse").initial_state().expect("state");
    assert_eq!(ui.bpm(), BPM_MAX);
    let ui = parse(&["--bpm", "0"]).expect("parse").initial_state().expect("state");
    assert_eq!(ui.bpm(), BPM_MIN);
}

#[test]
fn bad_values_are_rejected() {
    assert!(parse(&["--color", "8"]).is_err());
    assert!(parse(&["--signature", "3/5"]).is_err());
    assert!(parse(&["--signature", "four"]).is_err());
    assert!(parse(&["--visualization", "spiral"]).is_err());
    assert!(parse(&["--color-mode", "sepia"]).is_err());
}

#[test]
fn visualization_and_color_aliases() {
    let cfg = parse(&["--visualization", "flash-only", "--color-mode", "24bit"]).expect("parse");
    assert_eq!(cfg.visualization, VisualizationArg::FlashOnly);
    assert_eq!(cfg.color_mode, ColorChoice::Truecolor);

    let cfg = parse(&["--visualization", "particles-up", "--color-mode", "none"]).expect("parse");
    assert_eq!(Visualization::from(cfg.visualization), Visualization::ParticlesBottomUp);
    assert_eq!(cfg.color_mode, ColorChoice::Mono);
}

#[test]
fn logging_is_off_without_a_log_file() {
    let cfg = parse(&["-vv"]).expect("parse");
    let logger = tui_metronome::logging::builder(&cfg, Some("trace"))
        .expect("builder")
        .build();
    assert_eq!(logger.filter(), log::LevelFilter::Off);
}

#[test]
fn log_file_honours_verbosity_and_rust_log() {
    let path = std::env::temp_dir().join(format!("tui-metronome-{}.log", std::process::id()));
    let path_arg = path.to_string_lossy().into_owned();

    let cfg = parse(&["--log-file", &path_arg]).expect("parse");
    let logger = tui_metronome::logging::builder(&cfg, None)
        .expect("builder")
        .build();
    assert_eq!(logger.filter(), log::LevelFilter::Info);

    let logger = tui_metronome::logging::builder(&cfg, Some("tui_metronome=trace"))
        .expect("builder")
        .build();
    assert_eq!(logger.filter(), log::LevelFilter::Trace);

    let _ = std::fs::remove_file(&path);
}
