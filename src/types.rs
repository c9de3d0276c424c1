use std::fmt;
use std::str::FromStr;

/// Width/height pair in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxSize {
    pub width: u16,
    pub height: u16,
}

impl BoxSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position<T = u16> {
    pub x: T,
    pub y: T,
}

impl<T> Position<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Cell rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(self) -> BoxSize {
        BoxSize::new(self.width, self.height)
    }

    /// Clip to `bounds`-sized area starting at (0, 0).
    pub fn clipped_to(self, bounds: BoxSize) -> Self {
        let x = self.x.min(bounds.width);
        let y = self.y.min(bounds.height);
        let width = self.width.min(bounds.width - x);
        let height = self.height.min(bounds.height - y);
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Rec. 601 luma.
    pub fn luma(self) -> u8 {
        ((self.r as u32 * 77 + self.g as u32 * 150 + self.b as u32 * 29) >> 8) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub upper: u8,
    pub lower: u8,
}

impl Default for Signature {
    fn default() -> Self {
        Self { upper: 4, lower: 4 }
    }
}

impl Signature {
    pub const MAX_UPPER: u8 = 32;
    pub const MAX_LOWER: u8 = 32;

    pub fn is_valid(self) -> bool {
        (1..=Self::MAX_UPPER).contains(&self.upper)
            && (1..=Self::MAX_LOWER).contains(&self.lower)
            && self.lower.is_power_of_two()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.upper, self.lower)
    }
}

impl FromStr for Signature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((upper, lower)) = s.trim().split_once(['/', ':']) else {
            return Err(format!("expected <upper>/<lower>, got {s:?}"));
        };
        let upper = upper
            .trim()
            .parse::<u8>()
            .map_err(|e| format!("bad upper value {upper:?}: {e}"))?;
        let lower = lower
            .trim()
            .parse::<u8>()
            .map_err(|e| format!("bad lower value {lower:?}: {e}"))?;
        let sig = Self { upper, lower };
        if !sig.is_valid() {
            return Err(format!(
                "time signature {sig} out of range (upper 1..={}, lower a power of two up to {})",
                Self::MAX_UPPER,
                Self::MAX_LOWER
            ));
        }
        Ok(sig)
    }
}

/// Placement of the input strip relative to the visual region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    North,
    East,
    South,
    West,
}

/// Travel direction for particle and progress visualizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TopDown,
    BottomUp,
    LeftToRight,
    RightToLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visualization {
    #[default]
    Pendulum,
    ParticlesTopDown,
    ParticlesBottomUp,
    ParticlesLeftToRight,
    ParticlesRightToLeft,
    ProgressTopDown,
    ProgressBottomUp,
    ProgressLeftToRight,
    ProgressRightToLeft,
    FlashOnly,
}

impl Visualization {
    pub const ALL: [Self; 10] = [
        Self::Pendulum,
        Self::ParticlesTopDown,
        Self::ParticlesBottomUp,
        Self::ParticlesLeftToRight,
        Self::ParticlesRightToLeft,
        Self::ProgressTopDown,
        Self::ProgressBottomUp,
        Self::ProgressLeftToRight,
        Self::ProgressRightToLeft,
        Self::FlashOnly,
    ];

    /// Highest ordinal; selection wraps over `0..=MAX`.
    pub const MAX: u8 = (Self::ALL.len() - 1) as u8;

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pendulum => "Pendulum",
            Self::ParticlesTopDown => "Particles (top down)",
            Self::ParticlesBottomUp => "Particles (bottom up)",
            Self::ParticlesLeftToRight => "Particles (left to right)",
            Self::ParticlesRightToLeft => "Particles (right to left)",
            Self::ProgressTopDown => "Progress (top down)",
            Self::ProgressBottomUp => "Progress (bottom up)",
            Self::ProgressLeftToRight => "Progress (left to right)",
            Self::ProgressRightToLeft => "Progress (right to left)",
            Self::FlashOnly => "Flash only",
        }
    }

    pub fn particle_direction(self) -> Option<Direction> {
        match self {
            Self::ParticlesTopDown => Some(Direction::TopDown),
            Self::ParticlesBottomUp => Some(Direction::BottomUp),
            Self::ParticlesLeftToRight => Some(Direction::LeftToRight),
            Self::ParticlesRightToLeft => Some(Direction::RightToLeft),
            _ => None,
        }
    }

    pub fn progress_direction(self) -> Option<Direction> {
        match self {
            Self::ProgressTopDown => Some(Direction::TopDown),
            Self::ProgressBottomUp => Some(Direction::BottomUp),
            Self::ProgressLeftToRight => Some(Direction::LeftToRight),
            Self::ProgressRightToLeft => Some(Direction::RightToLeft),
            _ => None,
        }
    }
}
