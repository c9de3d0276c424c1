use crate::fingerprint::{Fingerprint, FingerprintBuilder};
use crate::palette::MAX_COLORS;
use crate::types::{Signature, Visualization};
use std::fmt;

pub const BPM_MIN: f32 = 1.0;
pub const BPM_MAX: f32 = 350.0;
pub const DEFAULT_BPM: f32 = 120.0;

/// Editable rows of the control panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    TimeSignature,
    Bpm,
    Color,
    Visualization,
    Flashing,
}

impl Field {
    pub const ALL: [Self; 5] = [
        Self::TimeSignature,
        Self::Bpm,
        Self::Color,
        Self::Visualization,
        Self::Flashing,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateError {
    NonFiniteBpm(f32),
    InvalidSignature(Signature),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteBpm(v) => write!(f, "bpm must be a finite number, got {v}"),
            Self::InvalidSignature(sig) => write!(f, "invalid time signature {sig}"),
        }
    }
}

impl std::error::Error for StateError {}

/// Every user-adjustable value of the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    selection: usize,
    bpm: f32,
    color: u8,
    signature: Signature,
    visualization: Visualization,
    flashing: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selection: 0,
            bpm: DEFAULT_BPM,
            color: 0,
            signature: Signature::default(),
            visualization: Visualization::default(),
            flashing: false,
        }
    }
}

impl UiState {
    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn selected_field(&self) -> Field {
        Field::from_index(self.selection).unwrap_or(Field::TimeSignature)
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    pub fn color(&self) -> u8 {
        self.color
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn visualization(&self) -> Visualization {
        self.visualization
    }

    pub fn flashing(&self) -> bool {
        self.flashing
    }

    /// Positive moves down the field list, negative moves up; both wrap.
    pub fn move_selection(&mut self, direction: i8) {
        let n = Field::COUNT;
        if direction > 0 {
            self.selection = (self.selection + 1) % n;
        } else if direction < 0 {
            self.selection = (self.selection + n - 1) % n;
        }
    }

    pub fn select(&mut self, field: Field) {
        self.selection = field.index();
    }

    /// Clamps into `[BPM_MIN, BPM_MAX]`. Non-finite values leave the state untouched.
    pub fn set_bpm(&mut self, bpm: f32) -> Result<(), StateError> {
        if !bpm.is_finite() {
            return Err(StateError::NonFiniteBpm(bpm));
        }
        let clamped = bpm.clamp(BPM_MIN, BPM_MAX);
        if clamped != bpm {
            log::debug!("bpm {bpm} clamped to {clamped}");
        }
        self.bpm = clamped;
        Ok(())
    }

    pub fn set_color(&mut self, direction: i8) {
        self.color = wrap_step(self.color, MAX_COLORS, direction);
    }

    pub fn set_color_index(&mut self, index: u8) {
        self.color = index.min(MAX_COLORS);
    }

    pub fn set_visualization(&mut self, direction: i8) {
        let next = wrap_step(self.visualization.ordinal(), Visualization::MAX, direction);
        self.visualization = Visualization::from_ordinal(next).unwrap_or_default();
    }

    pub fn set_visualization_kind(&mut self, vis: Visualization) {
        self.visualization = vis;
    }

    pub fn set_signature(&mut self, upper: u8, lower: u8) -> Result<(), StateError> {
        let sig = Signature { upper, lower };
        if !sig.is_valid() {
            return Err(StateError::InvalidSignature(sig));
        }
        self.signature = sig;
        Ok(())
    }

    pub fn toggle_flashing(&mut self) {
        self.flashing = !self.flashing;
    }

    pub fn set_flashing(&mut self, on: bool) {
        self.flashing = on;
    }

    /// Display text for one field row, rebuilt from the current values on every call.
    pub fn label(&self, field: Field) -> String {
        match field {
            Field::TimeSignature => format!(
                "Time signature: {} : {}",
                self.signature.upper, self.signature.lower
            ),
            Field::Bpm => format!("Beats Per Minute: {}", format_bpm(self.bpm)),
            Field::Color => format!("Color scheme: {}", self.color),
            Field::Visualization => format!(
                "Visualization: {} ({})",
                self.visualization.ordinal(),
                self.visualization.label()
            ),
            Field::Flashing => format!("Flashing: {}", if self.flashing { "Yes" } else { "No" }),
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = String> + '_ {
        Field::ALL.iter().map(|&f| self.label(f))
    }

    pub fn fingerprint(&self) -> Fingerprint {
        FingerprintBuilder::new()
            .fold_usize(self.selection)
            .fold_f32(self.bpm)
            .fold_u8(self.color)
            .fold_u8(self.signature.upper)
            .fold_u8(self.signature.lower)
            .fold_u8(self.visualization.ordinal())
            .fold_bool(self.flashing)
            .finish()
    }
}

fn wrap_step(value: u8, max: u8, direction: i8) -> u8 {
    if direction > 0 {
        if value < max { value + 1 } else { 0 }
    } else if direction < 0 {
        if value > 0 { value - 1 } else { max }
    } else {
        value
    }
}

/// Five significant digits, trailing zeros dropped.
pub fn format_bpm(bpm: f32) -> String {
    let int_digits = if bpm.abs() >= 1.0 {
        (bpm.abs().log10().floor() as i32 + 1).max(1)
    } else {
        1
    };
    let decimals = (5 - int_digits).max(0) as usize;
    let mut s = format!("{bpm:.decimals$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}
