//! Glyph and color tables for drawing the board.

use kbkb_core::Cell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// SGR code used for colors missing from the table.
pub const NEUTRAL_COLOR_CODE: &str = "00m";

/// Color label to SGR parameter table shared by the presets.
#[must_use]
pub fn default_color_codes() -> BTreeMap<String, String> {
    [
        ("red", "31m"),
        ("green", "32m"),
        ("yellow", "33m"),
        ("blue", "34m"),
        ("purple", "35m"),
    ]
    .into_iter()
    .map(|(label, code)| (label.to_string(), code.to_string()))
    .collect()
}

/// Everything the renderer draws with.
///
/// `floor` and `blank` are repeated once per column, so they should be as
/// wide as one icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharSet {
    /// Color label to SGR parameter (e.g. `"31m"`).
    pub color_codes: BTreeMap<String, String>,
    /// Left and right board edge.
    pub wall: String,
    /// Floor segment under one column.
    pub floor: String,
    /// Floor's left end.
    pub left_corner: String,
    /// Floor's right end.
    pub right_corner: String,
    /// Icon for a cell whose containers are all ready.
    pub stable_icon: String,
    /// Icon for a cell with an unready container.
    pub unstable_icon: String,
    /// Filler for an empty slot.
    pub blank: String,
}

impl Default for CharSet {
    fn default() -> Self {
        Self::narrow()
    }
}

impl CharSet {
    /// Single-width ASCII glyphs.
    #[must_use]
    pub fn narrow() -> Self {
        Self {
            color_codes: default_color_codes(),
            wall: "|".to_string(),
            floor: "-".to_string(),
            left_corner: "+".to_string(),
            right_corner: "+".to_string(),
            stable_icon: "@".to_string(),
            unstable_icon: "o".to_string(),
            blank: " ".to_string(),
        }
    }

    /// Double-width slots with Unicode circles.
    #[must_use]
    pub fn wide() -> Self {
        Self {
            floor: "--".to_string(),
            stable_icon: "●".to_string(),
            unstable_icon: "○".to_string(),
            blank: "  ".to_string(),
            ..Self::narrow()
        }
    }

    /// SGR parameter for a color label, neutral when unknown.
    #[must_use]
    pub fn color_code(&self, color: &str) -> &str {
        self.color_codes
            .get(color)
            .map_or(NEUTRAL_COLOR_CODE, String::as_str)
    }

    /// Colored stability icon for one cell, reset afterwards.
    #[must_use]
    pub fn paint(&self, cell: &Cell) -> String {
        let icon = if cell.is_stable() {
            &self.stable_icon
        } else {
            &self.unstable_icon
        };
        format!("\x1b[0;{}{}\x1b[0m", self.color_code(cell.color()), icon)
    }
}

/// Built-in charsets, selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharsetPreset {
    /// [`CharSet::narrow`].
    #[default]
    Narrow,
    /// [`CharSet::wide`].
    Wide,
}

impl CharsetPreset {
    /// The preset's charset.
    #[must_use]
    pub fn charset(self) -> CharSet {
        match self {
            Self::Narrow => CharSet::narrow(),
            Self::Wide => CharSet::wide(),
        }
    }
}

impl FromStr for CharsetPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "narrow" | "ascii" => Ok(Self::Narrow),
            "wide" | "unicode" => Ok(Self::Wide),
            other => Err(format!("unknown charset: {other} (expected narrow or wide)")),
        }
    }
}

impl fmt::Display for CharsetPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Narrow => write!(f, "narrow"),
            Self::Wide => write!(f, "wide"),
        }
    }
}
