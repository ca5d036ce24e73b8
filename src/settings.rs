//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all tones
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Volume actually applied to a tone
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Decode stored preferences. Missing or unreadable data falls back to
    /// defaults; volumes are pulled back into 0..=1.
    pub fn from_stored(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("No stored settings, using defaults");
            return Self::default();
        };
        match serde_json::from_str::<Self>(json) {
            Ok(mut settings) => {
                settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
                settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web::storage().and_then(|s| s.get_item(web::STORAGE_KEY).ok().flatten());
        Self::from_stored(stored.as_deref())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = web::storage() else {
            log::warn!("LocalStorage unavailable; settings not saved");
            return;
        };
        let written = serde_json::to_string(self)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                storage
                    .set_item(web::STORAGE_KEY, &json)
                    .map_err(|e| format!("{:?}", e))
            });
        if let Err(e) = written {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    /// Native builds keep preferences for the process only
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::from_stored(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

#[cfg(target_arch = "wasm32")]
mod web {
    pub const STORAGE_KEY: &str = "shield_runner_settings";

    pub fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.toggle_mute();
        assert_eq!(settings.effective_volume(), 0.0);
        settings.toggle_mute();
        settings.master_volume = 3.0;
        assert_eq!(settings.effective_volume(), 1.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let settings = Settings::from_stored(Some(r#"{ "muted": true }"#));
        assert!(settings.muted);
        assert_eq!(settings.sfx_volume, 1.0);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_unreadable_or_absent_settings_fall_back() {
        assert_eq!(Settings::from_stored(None), Settings::default());
        assert_eq!(Settings::from_stored(Some("not json")), Settings::default());
        assert_eq!(Settings::from_stored(Some(r#"{ "muted": "yes" }"#)), Settings::default());
    }

    #[test]
    fn test_stored_volumes_are_clamped() {
        let settings = Settings::from_stored(Some(r#"{ "master_volume": 4.0, "sfx_volume": -1.0 }"#));
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_round_trip_through_storage_text() {
        let mut settings = Settings::default();
        settings.toggle_mute();
        settings.sfx_volume = 0.5;
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_stored(Some(&json)), settings);
    }
}
