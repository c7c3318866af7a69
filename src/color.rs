//! ARGB colours and the named palette

use serde::{Deserialize, Serialize};

/// 8-bit ARGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const C_DEFAULT: Color = Color::argb(0, 0, 0, 0);
pub const C_BLACK: Color = Color::rgb(0, 0, 0);
pub const C_WHITE: Color = Color::rgb(255, 255, 255);
pub const C_RED: Color = Color::rgb(255, 0, 0);
pub const C_GREEN: Color = Color::rgb(0, 255, 0);
pub const C_BLUE: Color = Color::rgb(0, 0, 255);
pub const C_YELLOW: Color = Color::rgb(255, 255, 0);
pub const C_CYAN: Color = Color::rgb(0, 255, 255);
pub const C_MAGENTA: Color = Color::rgb(255, 0, 255);

impl Color {
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(255, r, g, b)
    }

    /// CSS Color 4 string, e.g. `rgb(255 0 0 / 0.5019608)`
    pub fn to_css(&self) -> String {
        format!(
            "rgb({} {} {} / {})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }

    /// Alpha as a 0.0 - 1.0 fraction
    #[inline]
    pub fn alpha_f32(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        C_DEFAULT
    }
}

impl From<[u8; 4]> for Color {
    fn from([a, r, g, b]: [u8; 4]) -> Self {
        Self::argb(a, r, g, b)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}
