//! Stage settings
//!
//! Persisted in LocalStorage on the web; native builds use defaults or JSON
//! handed in by the caller.

use serde::{Deserialize, Serialize};

use crate::color::{C_BLACK, Color};
use crate::consts::{DEFAULT_FPS, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::{Error, Result};
use crate::scheduler::validate_fps;

/// Stage settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Canvas size in pixels
    pub width: u32,
    pub height: u32,
    /// Target frame rate
    pub fps: f64,
    /// Background painted under every frame
    pub bgcolor: Color,
    /// DOM id of the canvas element the host attaches to
    pub canvas_id: String,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: DEFAULT_FPS,
            bgcolor: C_BLACK,
            canvas_id: "sprite-stage-canvas".to_string(),
            show_fps: true,
        }
    }
}

impl Settings {
    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate_fps(self.fps)?;
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "canvas size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "sprite_stage_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No settings store on native, key {}", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::C_BLUE;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!((s.width, s.height), (640, 480));
        assert_eq!(s.fps, 60.0);
        assert_eq!(s.bgcolor, C_BLACK);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"fps": 30, "width": 320}"#).unwrap();
        assert_eq!(s.fps, 30.0);
        assert_eq!(s.width, 320);
        assert_eq!(s.height, 480);
    }

    #[test]
    fn test_json_round_trip_keeps_colour() {
        let s = Settings {
            bgcolor: C_BLUE,
            ..Default::default()
        };
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{"fps": 0}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"height": 0}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(Settings::from_json("not json"), Err(Error::Json(_))));
    }
}
