/*
 * Theme Module
 *
 * This module defines the two colour themes of the particle field and the
 * palette each one paints with. The theme is plain configuration pushed into
 * the engine by the host; nothing here reads global state.
 */

use serde::{Deserialize, Serialize};

// An sRGB colour with 8-bit channels and a floating point alpha
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    // Same colour with its alpha scaled by `factor`
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: self.a * factor.clamp(0.0, 1.0),
            ..self
        }
    }
}

// The colours used for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub particle: Color,
    pub edge: Color,
}

const NEURAL_CYAN: (u8, u8, u8) = (0, 240, 255);
const SLATE_600: (u8, u8, u8) = (71, 85, 105);

const DARK_PALETTE: Palette = Palette {
    background: Color::rgb(0, 0, 0),
    particle: Color::rgba(NEURAL_CYAN.0, NEURAL_CYAN.1, NEURAL_CYAN.2, 0.8),
    edge: Color::rgba(NEURAL_CYAN.0, NEURAL_CYAN.1, NEURAL_CYAN.2, 0.4),
};

const LIGHT_PALETTE: Palette = Palette {
    background: Color::rgb(248, 250, 252),
    particle: Color::rgba(SLATE_600.0, SLATE_600.1, SLATE_600.2, 0.8),
    edge: Color::rgba(SLATE_600.0, SLATE_600.1, SLATE_600.2, 0.4),
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK_PALETTE,
            Theme::Light => &LIGHT_PALETTE,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "System Mode",
            Theme::Light => "Research Mode",
        }
    }

    // Caption for the control that switches away from this theme
    pub fn toggle_caption(self) -> String {
        format!("Switch to {}", self.toggled().label())
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => f.write_str("dark"),
            Theme::Light => f.write_str("light"),
        }
    }
}
