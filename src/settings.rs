//! Game settings
//!
//! Viewport, timing and level table. Loaded from a JSON file; missing or
//! invalid files fall back to defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::secs_to_ticks;
use crate::sim::LevelTable;

/// Configuration problems caught before a session starts
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Viewport has a non-positive or non-finite dimension
    BadViewport { width: f32, height: f32 },
    /// Viewport too narrow to hold the flyer column
    ViewportTooNarrow { width: f32 },
    /// Tick rate of zero
    ZeroTickRate,
    /// No levels defined
    NoLevels,
    /// A level's gap cannot be placed between the keep-out margins
    GapTooLarge { level: u32, gap_size: f32, max: f32 },
    /// JSON could not be parsed
    Parse(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::BadViewport { width, height } => {
                write!(f, "invalid viewport {}x{}", width, height)
            }
            SettingsError::ViewportTooNarrow { width } => {
                write!(f, "viewport width {} cannot fit the flyer", width)
            }
            SettingsError::ZeroTickRate => write!(f, "tick rate must be at least 1"),
            SettingsError::NoLevels => write!(f, "level table is empty"),
            SettingsError::GapTooLarge { level, gap_size, max } => {
                write!(f, "level {} gap {} exceeds maximum {}", level, gap_size, max)
            }
            SettingsError::Parse(msg) => write!(f, "invalid settings JSON: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Viewport width (pixels); obstacles spawn at this edge
    pub screen_width: f32,
    /// Viewport height (pixels)
    pub screen_height: f32,
    /// Fixed simulation rate (ticks per second)
    pub tick_rate: u32,
    /// Seed for gap placement
    pub seed: u64,
    /// Levels in order, tuned for the 60 Hz reference rate
    pub levels: LevelTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate: REFERENCE_TICK_RATE,
            seed: 0x6057_F1E5,
            levels: LevelTable::standard(),
        }
    }
}

impl Settings {
    /// Check that every level fits the viewport
    pub fn validate(&self) -> Result<(), SettingsError> {
        let (width, height) = (self.screen_width, self.screen_height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SettingsError::BadViewport { width, height });
        }
        if width < FLYER_X + FLYER_SIZE {
            return Err(SettingsError::ViewportTooNarrow { width });
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::ZeroTickRate);
        }
        if self.levels.is_empty() {
            return Err(SettingsError::NoLevels);
        }

        let max = self.max_gap_size();
        for (i, level) in self.levels.entries().iter().enumerate() {
            if !(level.gap_size > 0.0 && level.gap_size <= max) {
                return Err(SettingsError::GapTooLarge {
                    level: i as u32 + 1,
                    gap_size: level.gap_size,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Largest gap that still leaves the keep-out margins
    pub fn max_gap_size(&self) -> f32 {
        self.screen_height - 2.0 * GAP_MARGIN
    }

    /// Level table rescaled to the configured tick rate
    pub fn timed_levels(&self) -> LevelTable {
        self.levels.retimed(self.tick_rate)
    }

    /// Length of the frozen level-up window
    pub fn transition_ticks(&self) -> u32 {
        secs_to_ticks(LEVEL_TRANSITION_SECS, self.tick_rate)
    }

    /// Length of the level name banner
    pub fn level_name_ticks(&self) -> u32 {
        secs_to_ticks(LEVEL_NAME_SECS, self.tick_rate)
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}, using default settings", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LevelEntry;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.transition_ticks(), 120);
        assert_eq!(settings.level_name_ticks(), 180);
        assert_eq!(settings.max_gap_size(), 400.0);
    }

    #[test]
    fn test_gap_too_large_rejected() {
        let mut settings = Settings::default();
        settings.screen_height = 400.0;
        let err = settings.validate().unwrap_err();
        assert_eq!(
            err,
            SettingsError::GapTooLarge {
                level: 1,
                gap_size: 220.0,
                max: 200.0
            }
        );
    }

    #[test]
    fn test_empty_levels_rejected() {
        let settings = Settings {
            levels: LevelTable::new(Vec::new()),
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::NoLevels));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let settings = Settings {
            tick_rate: 0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::ZeroTickRate));
    }

    #[test]
    fn test_narrow_viewport_rejected() {
        let settings = Settings {
            screen_width: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::ViewportTooNarrow { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 99, "tick_rate": 120 }"#).unwrap();
        assert_eq!(settings.seed, 99);
        assert_eq!(settings.tick_rate, 120);
        assert_eq!(settings.screen_width, SCREEN_WIDTH);
        assert_eq!(settings.transition_ticks(), 240);
        assert_eq!(settings.levels.max_level(), 5);
    }

    #[test]
    fn test_custom_levels_json() {
        let json = r#"{
            "levels": [
                { "name": "Only", "gravity": 0.5, "jump_impulse": -10.0, "scroll_speed": 2.0, "gap_size": 300.0 }
            ]
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.levels.max_level(), 1);
        assert_eq!(
            settings.levels.get(4),
            &LevelEntry::new("Only", 0.5, -10.0, 2.0, 300.0)
        );
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/ghost-flyer.json"));
        assert_eq!(settings, Settings::default());
    }
}
