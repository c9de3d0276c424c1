use crate::types::Rgba;

/// Colors used by one selectable scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheme {
    pub name: &'static str,
    /// Fill while the flash pulse is on.
    pub flash: Rgba,
    /// Fill between pulses.
    pub idle: Rgba,
    /// Foreground for pendulum, particles and progress bars.
    pub accent: Rgba,
}

/// Highest scheme index; color selection wraps over `0..=MAX_COLORS`.
pub const MAX_COLORS: u8 = 7;

pub const SCHEMES: [Scheme; MAX_COLORS as usize + 1] = [
    Scheme {
        name: "mono",
        flash: Rgba::rgb(245, 245, 245),
        idle: Rgba::rgb(8, 8, 10),
        accent: Rgba::rgb(170, 170, 180),
    },
    Scheme {
        name: "ember",
        flash: Rgba::rgb(255, 72, 40),
        idle: Rgba::rgb(20, 4, 2),
        accent: Rgba::rgb(255, 150, 60),
    },
    Scheme {
        name: "lime",
        flash: Rgba::rgb(120, 255, 60),
        idle: Rgba::rgb(4, 16, 2),
        accent: Rgba::rgb(60, 200, 90),
    },
    Scheme {
        name: "ocean",
        flash: Rgba::rgb(40, 140, 255),
        idle: Rgba::rgb(2, 6, 22),
        accent: Rgba::rgb(80, 220, 255),
    },
    Scheme {
        name: "amber",
        flash: Rgba::rgb(255, 196, 20),
        idle: Rgba::rgb(18, 12, 0),
        accent: Rgba::rgb(255, 230, 120),
    },
    Scheme {
        name: "violet",
        flash: Rgba::rgb(190, 60, 255),
        idle: Rgba::rgb(12, 2, 20),
        accent: Rgba::rgb(240, 120, 255),
    },
    Scheme {
        name: "cyan",
        flash: Rgba::rgb(0, 255, 230),
        idle: Rgba::rgb(0, 14, 14),
        accent: Rgba::rgb(120, 255, 200),
    },
    Scheme {
        name: "rose",
        flash: Rgba::rgb(255, 80, 160),
        idle: Rgba::rgb(22, 2, 10),
        accent: Rgba::rgb(255, 170, 200),
    },
];

/// Out-of-range indices fall back to the first scheme.
pub fn scheme(index: u8) -> &'static Scheme {
    SCHEMES.get(index as usize).unwrap_or(&SCHEMES[0])
}
