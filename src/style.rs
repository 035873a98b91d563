//! Visual style of a rendered symbol: colours, frame, and the quick presets.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Border drawn around the whole canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    #[default]
    None,
    /// A stroked rounded rectangle.
    Rounded,
    /// Four filled bands flush with the canvas edges.
    Solid,
}

/// Module shape. Only square modules are drawn today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModulePattern {
    #[default]
    Square,
}

/// Immutable style for one render or one batch.
///
/// `eye_radius` and `pattern` are carried through untouched; the compositor
/// always draws square modules and square finder patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSpec {
    pub foreground: Color,
    pub background: Color,
    pub frame_style: FrameStyle,
    pub frame_color: Color,
    pub eye_radius: u32,
    pub pattern: ModulePattern,
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            foreground: Color::BLACK,
            background: Color::WHITE,
            frame_style: FrameStyle::None,
            frame_color: Color::BLACK,
            eye_radius: 0,
            pattern: ModulePattern::Square,
        }
    }
}

impl StyleSpec {
    pub fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    pub fn with_frame(mut self, frame_style: FrameStyle, frame_color: Color) -> Self {
        self.frame_style = frame_style;
        self.frame_color = frame_color;
        self
    }

    /// Returns this style with the preset's colours and frame applied.
    pub fn apply_preset(&self, preset: &Preset) -> Self {
        Self {
            foreground: preset.foreground,
            background: preset.background,
            frame_style: preset.frame_style,
            frame_color: preset.frame_color,
            ..self.clone()
        }
    }

    /// Returns this style with foreground, background and frame colour drawn
    /// from [`RANDOM_PALETTE`]. A background equal to the foreground becomes white.
    pub fn randomized<R: Rng>(&self, rng: &mut R) -> Self {
        let mut pick = || RANDOM_PALETTE[rng.gen_range(0..RANDOM_PALETTE.len())];
        let foreground = pick();
        let background = pick();
        let frame_color = pick();
        Self {
            foreground,
            background: if background == foreground { Color::WHITE } else { background },
            frame_color,
            ..self.clone()
        }
    }
}

/// A named quick style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub foreground: Color,
    pub background: Color,
    pub frame_style: FrameStyle,
    pub frame_color: Color,
}

pub const PRESETS: [Preset; 6] = [
    Preset {
        name: "Classic",
        foreground: Color::rgb(0x00, 0x00, 0x00),
        background: Color::rgb(0xFF, 0xFF, 0xFF),
        frame_style: FrameStyle::None,
        frame_color: Color::rgb(0x00, 0x00, 0x00),
    },
    Preset {
        name: "Ocean",
        foreground: Color::rgb(0x1E, 0x40, 0xAF),
        background: Color::rgb(0xDB, 0xEA, 0xFE),
        frame_style: FrameStyle::Rounded,
        frame_color: Color::rgb(0x3B, 0x82, 0xF6),
    },
    Preset {
        name: "Sunset",
        foreground: Color::rgb(0xDC, 0x26, 0x26),
        background: Color::rgb(0xFE, 0xF3, 0xC7),
        frame_style: FrameStyle::Solid,
        frame_color: Color::rgb(0xF5, 0x9E, 0x0B),
    },
    Preset {
        name: "Forest",
        foreground: Color::rgb(0x16, 0x65, 0x34),
        background: Color::rgb(0xDC, 0xFC, 0xE7),
        frame_style: FrameStyle::Rounded,
        frame_color: Color::rgb(0x22, 0xC5, 0x5E),
    },
    Preset {
        name: "Royal",
        foreground: Color::rgb(0x58, 0x1C, 0x87),
        background: Color::rgb(0xF3, 0xE8, 0xFF),
        frame_style: FrameStyle::Solid,
        frame_color: Color::rgb(0x8B, 0x5C, 0xF6),
    },
    Preset {
        name: "Neon",
        foreground: Color::rgb(0xFF, 0x00, 0x80),
        background: Color::rgb(0x00, 0x11, 0x22),
        frame_style: FrameStyle::Rounded,
        frame_color: Color::rgb(0x00, 0xFF, 0x88),
    },
];

/// Colours used by [`StyleSpec::randomized`].
pub const RANDOM_PALETTE: [Color; 8] = [
    Color::rgb(0xFF, 0x6B, 0x6B),
    Color::rgb(0x4E, 0xCD, 0xC4),
    Color::rgb(0x45, 0xB7, 0xD1),
    Color::rgb(0xF9, 0xCA, 0x24),
    Color::rgb(0xF0, 0x93, 0x2B),
    Color::rgb(0xEB, 0x4D, 0x4B),
    Color::rgb(0x6C, 0x5C, 0xE7),
    Color::rgb(0xA2, 0x9B, 0xFE),
];

/// Looks a preset up by name, ignoring case.
pub fn preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
