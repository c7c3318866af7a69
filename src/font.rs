//! Font descriptors
//!
//! A font is only a description; the backend turns `to_css` into whatever its
//! text renderer consumes.

use serde::{Deserialize, Serialize};

/// Fallback family when no name is given
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    /// CSS numeric weight (100 - 900)
    Numeric(u16),
}

/// Font descriptor used by text draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Pixel size
    pub size: u32,
    /// Family name (None = `sans-serif`)
    pub name: Option<String>,
    pub weight: FontWeight,
    pub italic: bool,
}

impl Font {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            name: None,
            weight: FontWeight::Normal,
            italic: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Family name the renderer should use
    pub fn family(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    /// CSS font shorthand, e.g. `italic bold 24px sans-serif`
    pub fn to_css(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if self.italic {
            parts.push("italic".to_string());
        }
        match self.weight {
            FontWeight::Normal => {}
            FontWeight::Bold => parts.push("bold".to_string()),
            FontWeight::Numeric(w) => parts.push(w.to_string()),
        }
        parts.push(format!("{}px {}", self.size, self.family()));
        parts.join(" ")
    }
}

impl Default for Font {
    /// 24px sans-serif
    fn default() -> Self {
        Self::new(24)
    }
}
