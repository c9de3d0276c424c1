use crate::config::ColorChoice;

/// How much color the terminal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    TrueColor,
    Ansi16,
    /// No color at all; fills are shown with reverse video.
    Monochrome,
}

#[derive(Debug, Clone)]
pub struct CapabilityReport {
    pub auto_probe: bool,
    pub requested: ColorChoice,
    pub color_mode: ColorMode,
    notes: Vec<String>,
}

impl CapabilityReport {
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn push_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn degraded(&self) -> bool {
        self.color_mode != ColorMode::TrueColor
    }

    pub fn status_label(&self) -> String {
        if !self.auto_probe {
            return format!("forced {:?}", self.color_mode);
        }
        if self.degraded() {
            return format!("fallback {:?}", self.color_mode);
        }
        format!("ok {:?}", self.color_mode)
    }
}

/// Terminal environment as seen by the probe.
#[derive(Debug, Clone, Default)]
pub struct TermEnv {
    pub term: Option<String>,
    pub colorterm: Option<String>,
    pub no_color: bool,
}

impl TermEnv {
    pub fn from_process() -> Self {
        Self {
            term: std::env::var("TERM").ok(),
            colorterm: std::env::var("COLORTERM").ok(),
            no_color: std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
        }
    }
}

pub fn probe_colors(requested: ColorChoice, env: &TermEnv) -> CapabilityReport {
    let forced = match requested {
        ColorChoice::Auto => None,
        ColorChoice::Truecolor => Some(ColorMode::TrueColor),
        ColorChoice::Ansi => Some(ColorMode::Ansi16),
        ColorChoice::Mono => Some(ColorMode::Monochrome),
    };
    let mut report = CapabilityReport {
        auto_probe: forced.is_none(),
        requested,
        color_mode: forced.unwrap_or(ColorMode::TrueColor),
        notes: Vec::new(),
    };
    if forced.is_some() {
        report.push_note("color probe disabled by --color-mode");
        return report;
    }

    let term = env.term.as_deref().unwrap_or_default().to_ascii_lowercase();
    let colorterm = env
        .colorterm
        .as_deref()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if env.no_color {
        report.color_mode = ColorMode::Monochrome;
        report.push_note("NO_COLOR set; flashing with reverse video");
    } else if term.is_empty() || term == "dumb" {
        report.color_mode = ColorMode::Monochrome;
        report.push_note("terminal reports no color support; flashing with reverse video");
    } else if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        report.color_mode = ColorMode::TrueColor;
    } else {
        report.color_mode = ColorMode::Ansi16;
        report.push_note("no 24-bit color advertised; falling back to 16 colors");
    }

    if report.notes.is_empty() {
        report.push_note("probe selected truecolor with no fallback");
    }
    report
}
