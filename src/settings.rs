//! Game settings
//!
//! Read once at startup and frozen into a [`GameConfig`]; nothing here is
//! runtime-mutable once a [`crate::Game`] exists.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::PlayArea;

/// Game settings as stored on disk / in LocalStorage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play area ===
    /// Play area width in pixels
    pub area_width: f32,
    /// Play area height in pixels
    pub area_height: f32,
    /// Target diameter in pixels
    pub target_size: f32,

    // === Timing ===
    /// Seconds a clicked target counts down before vanishing
    pub countdown_secs: f32,
    /// Clock/countdown cadence in milliseconds
    pub tick_interval_ms: u64,
    /// Delay between automatic clicks in milliseconds
    pub autoplay_delay_ms: u64,

    // === Limits ===
    /// Upper bound for the requested target count
    pub max_target_count: u32,

    /// Fixed RNG seed for reproducible layouts (random if unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            area_width: AREA_WIDTH,
            area_height: AREA_HEIGHT,
            target_size: TARGET_SIZE,

            countdown_secs: COUNTDOWN_SECS,
            tick_interval_ms: TICK_INTERVAL_MS,
            autoplay_delay_ms: AUTOPLAY_DELAY_MS,

            max_target_count: MAX_TARGET_COUNT,

            seed: None,
        }
    }
}

/// Immutable engine configuration derived from [`Settings`]
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub area: PlayArea,
    pub countdown_secs: f32,
    pub tick_interval: Duration,
    pub autoplay_delay: Duration,
    pub max_target_count: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Settings::default().game_config()
    }
}

impl GameConfig {
    /// Tick interval in seconds, as fed to countdowns and the clock
    pub fn tick_secs(&self) -> f32 {
        self.tick_interval.as_secs_f32()
    }
}

impl Settings {
    /// Environment variable naming a JSON settings file (native only)
    pub const PATH_ENV: &'static str = "CLICK_ORDER_SETTINGS";

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "click_order_settings";

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build the engine configuration, replacing unusable values with defaults
    pub fn game_config(&self) -> GameConfig {
        let defaults = Settings::default();

        let positive = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        let target_size = positive(self.target_size, defaults.target_size);
        // The area must fit at least one target
        let area_width = positive(self.area_width, defaults.area_width).max(target_size);
        let area_height = positive(self.area_height, defaults.area_height).max(target_size);

        let millis = |value: u64, fallback: u64| {
            Duration::from_millis(if value == 0 { fallback } else { value })
        };

        GameConfig {
            area: PlayArea::new(area_width, area_height, target_size),
            countdown_secs: positive(self.countdown_secs, defaults.countdown_secs),
            tick_interval: millis(self.tick_interval_ms, defaults.tick_interval_ms),
            autoplay_delay: millis(self.autoplay_delay_ms, defaults.autoplay_delay_ms),
            max_target_count: self.max_target_count.max(1),
        }
    }

    /// Load settings from the file named by `CLICK_ORDER_SETTINGS` (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read settings from {}: {}", path, e);
                Self::default()
            }
        }
    }

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
                    Err(e) => log::warn!("Ignoring malformed settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let config = GameConfig::default();
        assert_eq!(config.area.width, 400.0);
        assert_eq!(config.area.height, 300.0);
        assert_eq!(config.area.target_size, 25.0);
        assert_eq!(config.countdown_secs, 3.0);
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.autoplay_delay, Duration::from_millis(400));
        assert_eq!(config.max_target_count, 99_999);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "max_target_count": 99, "seed": 7 }"#).unwrap();
        assert_eq!(settings.max_target_count, 99);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.area_width, AREA_WIDTH);
        assert_eq!(settings.tick_interval_ms, TICK_INTERVAL_MS);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_game_config_repairs_bad_values() {
        let settings = Settings {
            area_width: -5.0,
            area_height: 10.0,
            target_size: f32::NAN,
            tick_interval_ms: 0,
            max_target_count: 0,
            ..Default::default()
        };
        let config = settings.game_config();
        assert_eq!(config.area.width, AREA_WIDTH);
        assert_eq!(config.area.target_size, TARGET_SIZE);
        // Too small for a single target: grown to fit one
        assert_eq!(config.area.height, TARGET_SIZE);
        assert_eq!(config.tick_interval, Duration::from_millis(TICK_INTERVAL_MS));
        assert_eq!(config.max_target_count, 1);
    }
}
