/// CSS color string as consumed by the paint step.
pub type Color = &'static str;

/// The named color set for one color mode.
///
/// Exactly two instances exist (`LIGHT`, `DARK`); palettes are never built
/// at runtime and never mutated. A theme change swaps which instance is
/// threaded into style resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ThemePalette {
    pub boundaries: Color,
    pub earth: Color,
    pub water: Color,
    pub roads: Color,
    pub landuse: Color,
    pub label: Color,
    pub label_halo: Color,
}

pub const LIGHT: ThemePalette = ThemePalette {
    boundaries: "#adadad",
    earth: "white",
    water: "#dcdcdc",
    roads: "#ebebeb",
    landuse: "#fcfcfc",
    label: "#555555",
    label_halo: "white",
};

pub const DARK: ThemePalette = ThemePalette {
    boundaries: "#707070",
    earth: "#141414",
    water: "#333333",
    roads: "#292929",
    landuse: "#181818",
    label: "#eeeeee",
    label_halo: "black",
};

impl ThemePalette {
    /// Maps the host's color-mode signal to a palette.
    ///
    /// `"light"` selects the light palette; every other value, recognized
    /// or not, deterministically falls back to dark.
    pub fn resolve(color_mode: &str) -> &'static ThemePalette {
        if color_mode == "light" { &LIGHT } else { &DARK }
    }
}
